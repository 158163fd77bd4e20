//! Best-effort conversion of a free-text model reply into question records.
//!
//! The reply is cut on every literal `Q`; each piece after the first is one
//! candidate block. A block is read with a small line grammar
//! (question, four options, answer) and dropped whole when it does not fit.
//! Dropping is silent to the caller: [`parse_questions`] never fails and may
//! return an empty list.

use crate::models::domain::{quiz_question::OPTION_COUNT, QuestionRecord};

const BLOCK_DELIMITER: char = 'Q';
const ANSWER_PREFIX: &str = "answer";
const EMPHASIS_MARKER: &str = "**";
/// Question line, four option lines and an answer line.
const MIN_BLOCK_LINES: usize = OPTION_COUNT + 2;
/// Width of an option label such as `A. `.
const OPTION_LABEL_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    ExpectQuestion,
    ExpectOption(usize),
    ExpectAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockError {
    TooFewLines(usize),
    MissingAnswer,
    WrongOptionCount(usize),
}

impl std::fmt::Display for BlockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockError::TooFewLines(n) => write!(f, "only {} lines", n),
            BlockError::MissingAnswer => write!(f, "no answer line"),
            BlockError::WrongOptionCount(n) => write!(f, "{} usable options", n),
        }
    }
}

pub fn parse_questions(raw_reply: &str) -> Vec<QuestionRecord> {
    let mut questions = Vec::new();
    let mut dropped = 0usize;

    for (index, block) in raw_reply.trim().split(BLOCK_DELIMITER).skip(1).enumerate() {
        match parse_block(block) {
            Ok(record) => questions.push(record),
            Err(reason) => {
                dropped += 1;
                log::debug!("Dropping reply block {}: {}", index + 1, reason);
            }
        }
    }

    log::info!(
        "Parsed {} questions from model reply ({} malformed blocks dropped)",
        questions.len(),
        dropped
    );
    questions
}

fn parse_block(block: &str) -> Result<QuestionRecord, BlockError> {
    let lines: Vec<&str> = block.trim().split('\n').collect();
    if lines.len() < MIN_BLOCK_LINES {
        return Err(BlockError::TooFewLines(lines.len()));
    }

    let mut state = LineState::ExpectQuestion;
    let mut question = String::new();
    let mut options = Vec::with_capacity(OPTION_COUNT);

    for line in &lines {
        state = match state {
            LineState::ExpectQuestion => {
                question = question_text(line);
                LineState::ExpectOption(0)
            }
            LineState::ExpectOption(seen) => {
                // Too-short lines are consumed but yield no option.
                if let Some(option) = option_text(line) {
                    options.push(option);
                }
                if seen + 1 == OPTION_COUNT {
                    LineState::ExpectAnswer
                } else {
                    LineState::ExpectOption(seen + 1)
                }
            }
            LineState::ExpectAnswer => break,
        };
    }

    // The answer may sit anywhere in the block, not only after the options.
    let answer_line = lines
        .iter()
        .map(|line| line.trim())
        .find(|line| is_answer_line(line))
        .ok_or(BlockError::MissingAnswer)?;

    if options.len() != OPTION_COUNT {
        return Err(BlockError::WrongOptionCount(options.len()));
    }

    Ok(QuestionRecord {
        question,
        options,
        answer: answer_letter(answer_line),
    })
}

/// Question line without emphasis markers or its leading `<n>.` number.
fn question_text(line: &str) -> String {
    let cleaned = line.trim().replace(EMPHASIS_MARKER, "");
    strip_question_number(&cleaned).to_string()
}

fn strip_question_number(line: &str) -> &str {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return line;
    }
    match line[digits_end..].strip_prefix(['.', ')']) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

fn option_text(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.chars().count() > 2 {
        Some(trimmed.chars().skip(OPTION_LABEL_WIDTH).collect())
    } else {
        None
    }
}

fn is_answer_line(trimmed: &str) -> bool {
    trimmed.to_lowercase().starts_with(ANSWER_PREFIX)
}

fn answer_letter(answer_line: &str) -> String {
    answer_line
        .chars()
        .last()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
