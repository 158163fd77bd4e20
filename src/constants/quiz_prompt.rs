pub const QUIZ_TEMPERATURE: f32 = 0.7;

const CONTENT_PLACEHOLDER: &str = "{content}";

pub const QUIZ_GENERATOR_PROMPT: &str = "
    Generate 30 multiple-choice questions from the following content.
    Each question should have exactly 4 options with one correct answer marked.
    Format:
    Q1. <question text>
    A. <option>
    B. <option>
    C. <option>
    D. <option>
    Answer: B
    Content: '''{content}'''
    ";

/// Renders the quiz generation prompt around the extracted document text.
pub fn build_quiz_prompt(content: &str) -> String {
    QUIZ_GENERATOR_PROMPT.replacen(CONTENT_PLACEHOLDER, content, 1)
}
