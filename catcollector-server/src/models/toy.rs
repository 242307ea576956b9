//! Toy form field validation

use super::ValidationError;

/// Maximum length for a toy's name
const MAX_NAME_LEN: usize = 50;

/// Maximum length for a color
const MAX_COLOR_LEN: usize = 20;

/// Validated toy name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToyName(String);

impl ToyName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "toy name" });
        }
        if s.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong { field: "toy name", max: MAX_NAME_LEN });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated toy color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToyColor(String);

impl ToyColor {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "color" });
        }
        if s.chars().count() > MAX_COLOR_LEN {
            return Err(ValidationError::TooLong { field: "color", max: MAX_COLOR_LEN });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
