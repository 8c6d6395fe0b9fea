//! IMF Gadgets Test Utils
//!
//! Provides shared testing utilities for the gadget registry. This crate offers a builder
//! pattern for creating test contexts with in-memory SQLite databases, factories that insert
//! users and gadgets with sensible defaults, and fixtures for building entity models without
//! touching a database.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_gadget_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_gadget_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (user, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
