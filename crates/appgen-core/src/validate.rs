//! Package-name legality checks
//!
//! Run before a manifest carrying a `name` is written, so an illegal name
//! aborts the run instead of landing in the generated project.

use thiserror::Error;

/// npm registry limit
pub const MAX_NAME_LENGTH: usize = 214;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name cannot exceed {MAX_NAME_LENGTH} characters")]
    TooLong,

    #[error("name cannot have surrounding whitespace")]
    SurroundingWhitespace,

    #[error("name cannot start with '{0}'")]
    BadLeadingChar(char),

    #[error("name cannot contain uppercase letters")]
    Uppercase,

    #[error("name contains illegal character '{0}'")]
    IllegalChar(char),

    #[error("scoped name must look like @scope/name")]
    MalformedScope,
}

/// Validate a package name against npm legality rules. Plain and
/// `@scope/name` forms are accepted.
pub fn validate_package_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.trim() != name {
        return Err(NameError::SurroundingWhitespace);
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong);
    }

    match name.strip_prefix('@') {
        Some(rest) => {
            let (scope, bare) = rest.split_once('/').ok_or(NameError::MalformedScope)?;
            validate_segment(scope)?;
            validate_segment(bare)
        }
        None => validate_segment(name),
    }
}

fn validate_segment(segment: &str) -> Result<(), NameError> {
    if segment.is_empty() {
        return Err(NameError::Empty);
    }
    if let Some(first @ ('.' | '_')) = segment.chars().next() {
        return Err(NameError::BadLeadingChar(first));
    }
    for c in segment.chars() {
        if c.is_ascii_uppercase() {
            return Err(NameError::Uppercase);
        }
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')) {
            return Err(NameError::IllegalChar(c));
        }
    }
    Ok(())
}
