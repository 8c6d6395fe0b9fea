//! SeaORM entity models for the gadget registry database.

pub mod prelude;

pub mod gadget;
pub mod user;
