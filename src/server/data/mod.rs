//! Database repository layer.
//!
//! Repositories handle database operations for each domain. They use SeaORM entity models
//! internally and return domain models to keep the data layer separate from business logic.

pub mod gadget;
pub mod user;
