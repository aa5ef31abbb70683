//! Prompt templates for the capture-and-answer flow

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Vision prompt asking for a `Question:`/`Options:` formatted transcript
    pub fn extraction() -> &'static str {
        r#"Extract text from this image with high accuracy:

If it's a multiple choice question, format EXACTLY as:
Question: <full question text>
Options: A. <option A text>
B. <option B text>
C. <option C text>
D. <option D text>

If it's a regular question without options, format EXACTLY as:
Question: <full question text>

Important instructions:
1. Preserve ALL text exactly as written in the image
2. Include the full question text, not just a summary
3. For multiple choice, include the letter (A, B, C, D) with each option
4. Maintain proper formatting of mathematical equations, symbols, and special characters
5. If the image contains multiple questions, focus on the most prominent one
6. ONLY return a Question: line if you detect an actual question in the image
7. If no question is detected, return empty string

Return ONLY the formatted text without any additional explanation."#
    }

    /// System prompt for the initial answer request
    pub fn answer_system() -> &'static str {
        r#"You are an expert question-answering system designed to provide precise, accurate answers with absolute minimal verbosity. You follow instructions exactly and never include explanations or additional text beyond what was requested. Your goal is to provide the most accurate answer in the most concise format possible.

For mathematical questions: Provide the final numerical answer with appropriate units if applicable.
For scientific questions: Use proper scientific notation and terminology.
For factual questions: Provide the most widely accepted factual answer.
For historical questions: Provide accurate dates, names, and locations.
For definitional questions: Provide concise, accurate definitions.

Always prioritize accuracy over brevity, but aim for both."#
    }

    /// User prompt for a multiple-choice question
    pub fn multiple_choice(question: &str, options: &str) -> String {
        format!(
            r#"Multiple Choice Question:
{question}
{options}

Instructions:
1. You MUST respond with ONLY the letter of the correct answer: A, B, C, or D
2. Do not include any explanation, reasoning, or additional text
3. Do not repeat the question or options
4. Do not prefix your answer with "Answer:" or similar text
5. Your entire response must be a single letter: A, B, C, or D

Respond with exactly one letter."#
        )
    }

    /// User prompt for a free-form question
    pub fn free_form(question: &str) -> String {
        format!(
            r#"Question:
{question}

Instructions:
1. Provide the most accurate and factually correct answer
2. Your answer must be extremely concise - ideally 1-5 words only
3. For numerical answers, use digits (e.g., "42" not "forty-two")
4. For dates, use standard format (e.g., "May 15, 1989" or "1989")
5. For proper nouns, use correct capitalization (e.g., "Paris", "Einstein")
6. Do not include explanations, reasoning, or additional context
7. Do not use bullet points or formatting
8. Do not repeat or rephrase the question

Your response must be the shortest possible correct answer."#
        )
    }

    /// System prompt for the repair sub-dialogue
    pub fn repair_system() -> &'static str {
        "You are an expert question-answering system that follows instructions exactly. \
         Provide only the exact answer requested with no additional text."
    }

    /// Corrective follow-up after an invalid multiple-choice answer
    pub fn multiple_choice_repair(previous_answer: &str) -> String {
        format!(
            r#"Your previous answer "{previous_answer}" was invalid.

I need ONLY a single letter (A, B, C, or D) as the answer to this multiple choice question.
Do not include any other text, explanation, or punctuation.
Just respond with exactly one letter: A, B, C, or D."#
        )
    }

    /// Corrective follow-up after an invalid free-form answer
    pub fn free_form_repair(previous_answer: &str) -> String {
        format!(
            r#"Your previous answer "{previous_answer}" was invalid or too verbose.

Please provide an extremely concise answer (1-5 words if possible).
Do not include any explanation or additional context.
Just the direct answer and nothing else."#
        )
    }
}
