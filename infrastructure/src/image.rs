//! Image payload encoding for multimodal requests.
//!
//! The capture boundary hands the core a still image as a data URI. In the
//! CLI that frame comes from a file on disk, so this module reads the file
//! and encodes `data:<mime>;base64,<bytes>`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} does not look like an image file")]
    NotAnImage(String),
}

/// Encode an image file as a data URI suitable for an `image_url` part.
///
/// The MIME type is guessed from the file extension; non-image files are
/// rejected before any bytes are read.
pub fn encode_image_file(path: &Path) -> Result<String, ImageError> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ImageError::NotAnImage(path.display().to_string()));
    }

    let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
        path: path.display().to_string(),
        source,
    })?;

    Ok(format!(
        "data:{};base64,{}",
        mime.essence_str(),
        STANDARD.encode(bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_encodes_jpeg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let uri = encode_image_file(&path).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(uri, format!("data:image/jpeg;base64,{}", STANDARD.encode([0xFF, 0xD8, 0xFF, 0xE0])));
    }

    #[test]
    fn test_rejects_non_image_extension() {
        let err = encode_image_file(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, ImageError::NotAnImage(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = encode_image_file(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, ImageError::Read { .. }));
    }
}
