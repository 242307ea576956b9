//! Route handlers organized by resource

pub mod pages;
pub mod health;
pub mod accounts;
pub mod cats;
pub mod toys;
pub mod feedings;
pub mod photos;
