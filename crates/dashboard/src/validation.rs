//! Client-side checks for the post form
//!
//! Lengths are counted in characters of the trimmed input. Nothing here touches
//! the store; a form only reaches a dispatcher once it validates.

use std::fmt;
use std::ops::RangeInclusive;

pub const TITLE_LENGTH: RangeInclusive<usize> = 3..=100;
pub const BODY_LENGTH: RangeInclusive<usize> = 10..=5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => f.write_str("title"),
            Field::Body => f.write_str("body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid post: {}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn validate_post_form(title: &str, body: &str) -> Result<(), ValidationError> {
    let errors: Vec<FieldError> = [check_title(title), check_body(body)]
        .into_iter()
        .flatten()
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

fn check_title(title: &str) -> Option<FieldError> {
    let len = title.trim().chars().count();
    let message = if len == 0 {
        "Title is required".to_string()
    } else if len < *TITLE_LENGTH.start() {
        format!("Title must be at least {} characters long", TITLE_LENGTH.start())
    } else if len > *TITLE_LENGTH.end() {
        format!("Title must not exceed {} characters", TITLE_LENGTH.end())
    } else {
        return None;
    };
    Some(FieldError {
        field: Field::Title,
        message,
    })
}

fn check_body(body: &str) -> Option<FieldError> {
    let len = body.trim().chars().count();
    let message = if len == 0 {
        "Post content is required".to_string()
    } else if len < *BODY_LENGTH.start() {
        format!("Post content must be at least {} characters long", BODY_LENGTH.start())
    } else if len > *BODY_LENGTH.end() {
        format!("Post content must not exceed {} characters", BODY_LENGTH.end())
    } else {
        return None;
    };
    Some(FieldError {
        field: Field::Body,
        message,
    })
}
