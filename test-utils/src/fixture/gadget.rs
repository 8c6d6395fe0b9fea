use chrono::{TimeZone, Utc};
use uuid::Uuid;

/// Fixed creator/updater id used by [`entity`].
pub const FIXTURE_OWNER_ID: Uuid = Uuid::from_u128(0x1);

/// Fixed gadget id used by [`entity`].
pub const FIXTURE_GADGET_ID: Uuid = Uuid::from_u128(0x60d9e7);

/// Returns an Available gadget model with deterministic field values.
pub fn entity() -> entity::gadget::Model {
    let created = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

    entity::gadget::Model {
        id: FIXTURE_GADGET_ID,
        name: "Exploding Gum".to_string(),
        codename: "The Nightingale".to_string(),
        status: "Available".to_string(),
        created_at: created,
        updated_at: created,
        decommissioned_at: None,
        destroyed_at: None,
        created_by: FIXTURE_OWNER_ID,
        updated_by: FIXTURE_OWNER_ID,
    }
}
