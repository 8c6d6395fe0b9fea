use super::*;
use uuid::Uuid;

/// Tests a partial update.
///
/// Verifies that only the provided columns change and that the audit columns are
/// always written.
///
/// Expected: Ok(Some) with new name, unchanged status, new updater
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let editor = factory::create_user(db).await?;

    let repo = GadgetRepository::new(db);
    let updated = repo
        .update_by_id(
            gadget.id,
            &GadgetStatus::Available,
            GadgetChanges {
                name: Some("Renamed".to_string()),
                ..GadgetChanges::by(editor.id)
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.codename, gadget.codename);
    assert_eq!(updated.status, GadgetStatus::Available);
    assert_eq!(updated.created_by, owner.id);
    assert_eq!(updated.updated_by, editor.id);
    assert!(updated.updated_at >= gadget.updated_at);

    Ok(())
}

/// Tests writing a lifecycle transition with its timestamp.
///
/// Expected: Ok(Some) with status and decommissioned_at set together
#[tokio::test]
async fn writes_status_and_timestamp_together() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;

    let now = Utc::now();
    let repo = GadgetRepository::new(db);
    let updated = repo
        .update_by_id(
            gadget.id,
            &GadgetStatus::Available,
            GadgetChanges {
                status: Some(GadgetStatus::Decommissioned),
                decommissioned_at: Some(now),
                ..GadgetChanges::by(owner.id)
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, GadgetStatus::Decommissioned);
    assert!(updated.decommissioned_at.is_some());
    assert!(updated.destroyed_at.is_none());

    Ok(())
}

/// Tests the status guard.
///
/// Verifies that the update is skipped when the stored status differs from the
/// expected one, leaving the row untouched.
///
/// Expected: Ok(None) and unchanged row
#[tokio::test]
async fn skips_update_when_status_changed() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let gadget = factory::gadget::GadgetFactory::new(db, user.id)
        .destroyed()
        .build()
        .await?;

    let repo = GadgetRepository::new(db);
    let result = repo
        .update_by_id(
            gadget.id,
            &GadgetStatus::Available,
            GadgetChanges {
                name: Some("Should not apply".to_string()),
                ..GadgetChanges::by(user.id)
            },
        )
        .await?;

    assert!(result.is_none());
    let stored = repo.find_by_id(gadget.id).await?.unwrap();
    assert_eq!(stored.name, gadget.name);
    assert_eq!(stored.status, GadgetStatus::Destroyed);

    Ok(())
}

/// Tests updating an unknown id.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let repo = GadgetRepository::new(db);
    let result = repo
        .update_by_id(
            Uuid::new_v4(),
            &GadgetStatus::Available,
            GadgetChanges::by(user.id),
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
