//! HTTP request handlers.
//!
//! Controllers authenticate the request, convert DTOs into parameter types, call the
//! service layer, and convert the resulting domain models back into DTOs.

pub mod auth;
pub mod gadget;
pub mod health;
