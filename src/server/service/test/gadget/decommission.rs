use super::*;
use uuid::Uuid;

/// Tests decommissioning an available gadget.
///
/// Expected: Ok with status Decommissioned, timestamp set, caller as updater
#[tokio::test]
async fn decommissions_gadget() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let handler = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let updated = service.decommission(gadget.id, handler.id).await?;

    assert_eq!(updated.status, GadgetStatus::Decommissioned);
    assert!(updated.decommissioned_at.is_some());
    assert!(updated.destroyed_at.is_none());
    assert_eq!(updated.updated_by, handler.id);

    Ok(())
}

/// Tests decommissioning twice.
///
/// Expected: second call fails with AlreadyDecommissioned and the timestamp is kept
#[tokio::test]
async fn rejects_second_decommission() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let first = service.decommission(gadget.id, owner.id).await?;
    let result = service.decommission(gadget.id, owner.id).await;

    assert_gadget_err(result, GadgetError::AlreadyDecommissioned);
    assert_eq!(
        service.get(gadget.id).await?.decommissioned_at,
        first.decommissioned_at
    );

    Ok(())
}

/// Tests decommissioning a destroyed gadget.
///
/// Expected: Err(DecommissionDestroyed)
#[tokio::test]
async fn rejects_decommission_of_destroyed_gadget() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let gadget = factory::gadget::GadgetFactory::new(db, user.id)
        .destroyed()
        .build()
        .await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let result = service.decommission(gadget.id, user.id).await;

    assert_gadget_err(result, GadgetError::DecommissionDestroyed);

    Ok(())
}

/// Tests that decommissioning drops a pending confirmation code.
///
/// Expected: the code issued before decommissioning no longer validates
#[tokio::test]
async fn decommission_invalidates_pending_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let issued = service.generate_confirmation(gadget.id).await?;
    service.decommission(gadget.id, owner.id).await?;

    assert!(!codes.consume(gadget.id, &issued.code));

    Ok(())
}

/// Tests decommissioning a gadget that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn decommission_unknown_gadget_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let result = service.decommission(Uuid::new_v4(), user.id).await;

    assert_gadget_err(result, GadgetError::NotFound);

    Ok(())
}
