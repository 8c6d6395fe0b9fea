//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user and a gadget owned by that user.
///
/// Both entities are created with default values. Use the individual factories if you
/// need to customize either of them.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, gadget))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_gadget_with_owner(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::gadget::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let gadget = crate::factory::gadget::create_gadget(db, user.id).await?;

    Ok((user, gadget))
}
