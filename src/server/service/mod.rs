//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data (repository) layer. They
//! implement the gadget lifecycle rules, the confirmation-code protocol and account
//! management, working with domain models rather than DTOs or entity models.

pub mod auth;
pub mod codename;
pub mod confirmation;
pub mod gadget;
pub mod mission;
pub mod token;

#[cfg(test)]
mod test;
