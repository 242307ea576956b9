//! Account field validation
//!
//! Signup takes a username and a password entered twice. The rules are the
//! stock ones users expect from account forms: a restricted username
//! charset, a minimum password length, and a not-all-digits check.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for a username
const MAX_USERNAME_LEN: usize = 150;

/// Minimum length for a password
const MIN_PASSWORD_LEN: usize = 8;

/// Letters, digits and @ . + - _ only
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("invalid username regex"));

/// Validated username
///
/// # Rules
/// - Max 150 characters
/// - Letters, digits and `@`, `.`, `+`, `-`, `_` only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }
        if s.chars().count() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong { field: "username", max: MAX_USERNAME_LEN });
        }
        if !USERNAME_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "username",
                reason: "may contain only letters, digits and @/./+/-/_",
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated password, held only long enough to hash it.
///
/// Deliberately has no `Debug` or `Display` so it cannot end up in logs.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
pub struct Password(String);

impl Password {
    /// # Rules
    /// - At least 8 characters
    /// - Not entirely numeric
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        if s.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::InvalidFormat {
                field: "password",
                reason: "must be at least 8 characters",
            });
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "password",
                reason: "cannot be entirely numeric",
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Validate a password entered twice, requiring both entries to agree.
    pub fn confirmed(first: &str, second: &str) -> Result<Self, ValidationError> {
        if first != second {
            return Err(ValidationError::Mismatch { field: "password" });
        }
        Self::new(first)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
