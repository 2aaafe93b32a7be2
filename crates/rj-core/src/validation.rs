//! # Input Validation
//!
//! Turns raw form payloads into typed values before any core operation runs.
//! Everything past this module trusts its inputs.

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Stars;

/// Upper bound on joke and comment text, in characters.
pub const MAX_TEXT_LEN: usize = 1000;

/// Interaction form as submitted. Both fields may be blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInteraction {
    pub rating: Option<String>,
    pub comment: Option<String>,
}

/// A checked interaction: the rating is in range and the comment is non-blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    pub rating: Option<Stars>,
    pub comment: Option<String>,
}

/// Joke form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJoke {
    pub content: String,
}

/// Checked joke text, trimmed and within bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct JokeDraft {
    pub content: String,
}

impl RawInteraction {
    pub fn validate(self) -> Result<Interaction> {
        let mut problems = Vec::new();

        let rating = match non_blank(self.rating) {
            None => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) => match Stars::try_from(n) {
                    Ok(stars) => Some(stars),
                    Err(e) => {
                        problems.push(e.to_string());
                        None
                    }
                },
                Err(_) => {
                    problems.push(format!("rating must be a whole number, got {raw:?}"));
                    None
                }
            },
        };

        let comment = non_blank(self.comment);
        if let Some(text) = &comment {
            if let Some(problem) = too_long("comment", text) {
                problems.push(problem);
            }
        }

        finish(problems, Interaction { rating, comment })
    }
}

impl RawJoke {
    pub fn validate(self) -> Result<JokeDraft> {
        let mut problems = Vec::new();
        let content = self.content.trim().to_string();

        if content.is_empty() {
            problems.push("content is required".to_string());
        } else if let Some(problem) = too_long("content", &content) {
            problems.push(problem);
        }

        finish(problems, JokeDraft { content })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn too_long(field: &str, text: &str) -> Option<String> {
    let len = text.chars().count();
    (len > MAX_TEXT_LEN).then(|| format!("{field} must be at most {MAX_TEXT_LEN} characters, got {len}"))
}

fn finish<T>(problems: Vec<String>, value: T) -> Result<T> {
    if problems.is_empty() {
        Ok(value)
    } else {
        Err(AppError::ValidationError(problems.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rating: Option<&str>, comment: Option<&str>) -> RawInteraction {
        RawInteraction {
            rating: rating.map(String::from),
            comment: comment.map(String::from),
        }
    }

    #[test]
    fn accepts_rating_and_comment() {
        let checked = raw(Some("4"), Some("  groan  ")).validate().unwrap();
        assert_eq!(checked.rating.map(Stars::get), Some(4));
        assert_eq!(checked.comment.as_deref(), Some("groan"));
    }

    #[test]
    fn blank_fields_are_absent() {
        let checked = raw(Some(""), Some("   ")).validate().unwrap();
        assert_eq!(checked, Interaction::default());
    }

    #[test]
    fn rejects_out_of_range_and_garbage_ratings() {
        for bad in ["0", "6", "-1", "abc", "4.5"] {
            let err = raw(Some(bad), None).validate().unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)), "{bad} accepted");
        }
    }

    #[test]
    fn rejects_overlong_comment() {
        let long = "a".repeat(MAX_TEXT_LEN + 1);
        let err = raw(None, Some(&long)).validate().unwrap_err();
        assert!(err.to_string().contains("comment"));
    }

    #[test]
    fn collects_every_problem() {
        let long = "a".repeat(MAX_TEXT_LEN + 1);
        let err = raw(Some("9"), Some(&long)).validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("rating"));
        assert!(msg.contains("comment"));
    }

    #[test]
    fn joke_content_is_trimmed_and_required() {
        let draft = RawJoke { content: " knock knock ".into() }.validate().unwrap();
        assert_eq!(draft.content, "knock knock");

        let err = RawJoke { content: "   ".into() }.validate().unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
