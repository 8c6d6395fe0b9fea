//! Test fixtures providing entity models without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. Use them for
//! conversion and serialization tests.

pub mod gadget;

pub use gadget::entity as gadget_entity;
