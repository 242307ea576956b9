//! Database layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Ownership scoping happens in SQL, not after the fetch
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Cascades enforce the cat -> feedings/photos/toy-links lifecycle

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
