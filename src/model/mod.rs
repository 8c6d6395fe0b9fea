//! Wire-format DTOs shared by the HTTP controllers and the OpenAPI document.

pub mod api;
pub mod auth;
pub mod gadget;
