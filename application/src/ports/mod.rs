//! Ports (interfaces) for the application layer

pub mod batch_observer;
pub mod chat_gateway;
