use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::QaPair;

// Outermost bracketed span: first `[` through last `]`, across lines.
static JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Decodes the `questions` form field. It must be a non-empty JSON array of strings.
pub fn parse_questions(raw: &str) -> Result<Vec<String>> {
    let questions: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| Error::invalid_input("Questions must be a JSON array of strings"))?;

    if questions.is_empty() {
        return Err(Error::invalid_input("At least one question is required"));
    }

    Ok(questions)
}

/// Best-effort extraction of an answer list from the model's free-text reply.
///
/// Tries, in order: a JSON array embedded anywhere in the reply, the reply's
/// non-empty lines, and finally the whole reply as one answer.
pub fn extract_answers(reply: &str) -> Vec<String> {
    if let Some(answers) = JSON_ARRAY
        .find(reply)
        .and_then(|m| serde_json::from_str::<Vec<Value>>(m.as_str()).ok())
    {
        return answers.into_iter().map(value_to_answer).collect();
    }

    let lines: Vec<String> = reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if !lines.is_empty() {
        return lines;
    }

    let whole = reply.trim();
    if whole.is_empty() {
        Vec::new()
    } else {
        vec![whole.to_string()]
    }
}

fn value_to_answer(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Pads with empty answers or truncates so exactly `count` answers remain.
pub fn reconcile(mut answers: Vec<String>, count: usize) -> Vec<String> {
    answers.resize(count, String::new());
    answers
}

pub fn pair_up(questions: Vec<String>, answers: Vec<String>) -> Vec<QaPair> {
    let answers = reconcile(answers, questions.len());
    questions
        .into_iter()
        .zip(answers)
        .map(|(question, answer)| QaPair { question, answer })
        .collect()
}
