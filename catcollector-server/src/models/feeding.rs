//! Feeding form validation
//!
//! A feeding is a date plus a meal code. Meals are stored as single-letter
//! codes (`B`/`L`/`D`) with breakfast as the default.

use chrono::NaiveDate;

use super::ValidationError;

/// Meal of the day for a feeding record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealKind {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
}

impl MealKind {
    /// Parse the single-letter code used in forms and in the database.
    ///
    /// # Example
    /// ```
    /// use catcollector_server::models::MealKind;
    ///
    /// assert_eq!(MealKind::from_code("B").unwrap(), MealKind::Breakfast);
    /// assert!(MealKind::from_code("X").is_err());
    /// ```
    pub fn from_code(s: &str) -> Result<Self, ValidationError> {
        match s.trim() {
            "B" => Ok(Self::Breakfast),
            "L" => Ok(Self::Lunch),
            "D" => Ok(Self::Dinner),
            other => Err(ValidationError::InvalidVariant {
                field: "meal",
                value: other.to_owned(),
            }),
        }
    }

    /// Single-letter storage code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Breakfast => "B",
            Self::Lunch => "L",
            Self::Dinner => "D",
        }
    }

    /// Human-readable label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }

    /// Label for a stored code, used when rendering rows loaded from the
    /// database. Unknown codes render as-is rather than failing the page.
    pub fn label_for_code(code: &str) -> String {
        match Self::from_code(code) {
            Ok(meal) => meal.label().to_owned(),
            Err(_) => code.to_owned(),
        }
    }
}

/// Validated feeding date (`YYYY-MM-DD`, the HTML date input format)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedingDate(NaiveDate);

impl FeedingDate {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "date" });
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "date",
                reason: "must be a date in YYYY-MM-DD form",
            })
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}
