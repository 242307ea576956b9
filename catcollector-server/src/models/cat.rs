//! Cat form field validation
//!
//! The editable fields are exactly {name, breed, description, age}; the
//! owner is never part of the form. Limits mirror the database columns.

use super::ValidationError;

/// Maximum length for a cat's name
const MAX_NAME_LEN: usize = 100;

/// Maximum length for a breed
const MAX_BREED_LEN: usize = 100;

/// Maximum length for a description
const MAX_DESCRIPTION_LEN: usize = 250;

/// Allowed age range, inclusive
const AGE_RANGE: (i32, i32) = (0, 99);

fn bounded(field: &'static str, s: &str, max: usize) -> Result<String, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(s.to_owned())
}

/// Validated cat name
///
/// # Example
/// ```
/// use catcollector_server::models::CatName;
///
/// assert!(CatName::new("Whiskers").is_ok());
/// assert!(CatName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatName(String);

impl CatName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded("name", s, MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated breed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breed(String);

impl Breed {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded("breed", s, MAX_BREED_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatDescription(String);

impl CatDescription {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded("description", s, MAX_DESCRIPTION_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated age in years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatAge(i32);

impl CatAge {
    /// Validate an age already parsed to an integer.
    pub fn new(age: i32) -> Result<Self, ValidationError> {
        let (min, max) = AGE_RANGE;
        if age < min || age > max {
            return Err(ValidationError::OutOfRange { field: "age", min, max });
        }
        Ok(Self(age))
    }

    /// Parse and validate an age from raw form input.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let age: i32 = s.trim().parse().map_err(|_| ValidationError::InvalidFormat {
            field: "age",
            reason: "must be a whole number",
        })?;
        Self::new(age)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
