//! Caller-side checks run before a request reaches the todo store.
//! The store itself trusts its callers.

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "Task title cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trims `raw` and rejects titles that are empty afterwards
pub fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}
