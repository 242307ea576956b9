//! Domain models with validation at construction
//!
//! All form input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod account;
pub mod cat;
pub mod feeding;
pub mod toy;
pub mod validation;

pub use account::{Password, Username};
pub use cat::{Breed, CatAge, CatDescription, CatName};
pub use feeding::{FeedingDate, MealKind};
pub use toy::{ToyColor, ToyName};
pub use validation::ValidationError;
