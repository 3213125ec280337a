//! Prompt construction for the command assistant.

/// Completion token cap per question.
pub const MAX_TOKENS: u32 = 500;

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.7;

/// `{question}` is replaced with the user's text.
pub const PROMPT_TEMPLATE: &str = "\
You are a command-line assistant for a desktop that manages packages with \
scoop and containers with docker. Answer with at most 3 shell commands, one \
per line, numbered \"1.\", \"2.\", \"3.\". Do not explain them and do not \
wrap them in code blocks.

Question: {question}";

/// Fill the prompt template.
#[must_use]
pub fn render_prompt(question: &str) -> String {
    PROMPT_TEMPLATE.replace("{question}", question.trim())
}
