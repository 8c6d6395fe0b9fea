//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let gadget = factory::gadget::GadgetFactory::new(&db, user.id)
//!     .status("Decommissioned")
//!     .build()
//!     .await?;
//! ```

pub mod gadget;
pub mod helpers;
pub mod user;

pub use gadget::create_gadget;
pub use user::create_user;
