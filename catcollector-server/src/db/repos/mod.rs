//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Ownership scoping happens in the WHERE clause (no fetch-then-check)
//! - Handles conflicts via ON CONFLICT (no check-then-insert)
//! - Another collector's row is reported as NotFound, never leaked

pub mod users;
pub mod sessions;
pub mod cats;
pub mod toys;
pub mod feedings;
pub mod photos;

pub use users::{UserRepo, User, DbError};
pub use sessions::{SessionRepo, Session};
pub use cats::{CatRepo, Cat};
pub use toys::{ToyRepo, Toy};
pub use feedings::{FeedingRepo, Feeding};
pub use photos::{PhotoRepo, Photo};
