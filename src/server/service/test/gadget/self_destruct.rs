use super::*;
use std::time::Duration;
use uuid::Uuid;

/// Tests the full two-step self-destruct.
///
/// Expected: six digit code, then Ok with status Destroyed and destroyed_at set
#[tokio::test]
async fn self_destructs_with_valid_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let issued = service.generate_confirmation(gadget.id).await?;
    assert_eq!(issued.code.len(), 6);
    assert!(issued.code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(issued.expires_in_label(), "5 minutes");

    let destroyed = service
        .self_destruct(gadget.id, Some(&issued.code), owner.id)
        .await?;

    assert_eq!(destroyed.status, GadgetStatus::Destroyed);
    assert!(destroyed.destroyed_at.is_some());
    assert!(destroyed.decommissioned_at.is_none());
    assert_eq!(destroyed.codename, gadget.codename);

    Ok(())
}

/// Tests repeating a self-destruct with the same code.
///
/// Expected: Err(AlreadyDestroyed) and the original destruction time is kept
#[tokio::test]
async fn repeat_self_destruct_reports_already_destroyed() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let issued = service.generate_confirmation(gadget.id).await?;
    let destroyed = service
        .self_destruct(gadget.id, Some(&issued.code), owner.id)
        .await?;

    let result = service
        .self_destruct(gadget.id, Some(&issued.code), owner.id)
        .await;

    assert_gadget_err(result, GadgetError::AlreadyDestroyed);
    assert_eq!(
        service.get(gadget.id).await?.destroyed_at,
        destroyed.destroyed_at
    );

    Ok(())
}

/// Tests self-destruct without a code or with a wrong one.
///
/// Expected: ConfirmationRequired, then InvalidConfirmation, gadget untouched
#[tokio::test]
async fn rejects_missing_or_wrong_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let result = service.self_destruct(gadget.id, None, owner.id).await;
    assert_gadget_err(result, GadgetError::ConfirmationRequired);

    let result = service.self_destruct(gadget.id, Some(""), owner.id).await;
    assert_gadget_err(result, GadgetError::ConfirmationRequired);

    // No code was ever issued.
    let result = service
        .self_destruct(gadget.id, Some("123456"), owner.id)
        .await;
    assert_gadget_err(result, GadgetError::InvalidConfirmation);

    let issued = service.generate_confirmation(gadget.id).await?;
    let wrong = if issued.code == "999999" { "100000" } else { "999999" };
    let result = service.self_destruct(gadget.id, Some(wrong), owner.id).await;
    assert_gadget_err(result, GadgetError::InvalidConfirmation);

    assert_eq!(service.get(gadget.id).await?.status, GadgetStatus::Available);

    Ok(())
}

/// Tests that a code for one gadget cannot destroy another.
///
/// Expected: Err(InvalidConfirmation)
#[tokio::test]
async fn rejects_code_issued_for_another_gadget() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, first) = factory::helpers::create_gadget_with_owner(db).await?;
    let second = factory::create_gadget(db, owner.id).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let issued = service.generate_confirmation(first.id).await?;
    let result = service
        .self_destruct(second.id, Some(&issued.code), owner.id)
        .await;

    assert_gadget_err(result, GadgetError::InvalidConfirmation);

    Ok(())
}

/// Tests that only the latest code is accepted after regeneration.
///
/// Expected: old code rejected, new code destroys the gadget
#[tokio::test]
async fn only_latest_code_is_accepted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let old = service.generate_confirmation(gadget.id).await?;
    let mut new = service.generate_confirmation(gadget.id).await?;
    while new.code == old.code {
        new = service.generate_confirmation(gadget.id).await?;
    }

    let result = service
        .self_destruct(gadget.id, Some(&old.code), owner.id)
        .await;
    assert_gadget_err(result, GadgetError::InvalidConfirmation);

    service
        .self_destruct(gadget.id, Some(&new.code), owner.id)
        .await?;

    Ok(())
}

/// Tests using a code after it expired.
///
/// Expected: Err(InvalidConfirmation) and the gadget stays available
#[tokio::test]
async fn rejects_expired_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (owner, gadget) = factory::helpers::create_gadget_with_owner(db).await?;
    let codes = ConfirmationCodeService::with_ttl(Duration::from_millis(20));
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let issued = service.generate_confirmation(gadget.id).await?;
    tokio::time::sleep(Duration::from_millis(60)).await;

    let result = service
        .self_destruct(gadget.id, Some(&issued.code), owner.id)
        .await;

    assert_gadget_err(result, GadgetError::InvalidConfirmation);
    assert_eq!(service.get(gadget.id).await?.status, GadgetStatus::Available);

    Ok(())
}

/// Tests the confirmation flow against gadgets in terminal states.
///
/// Expected: no code for terminal gadgets; a decommissioned gadget cannot be destroyed
#[tokio::test]
async fn terminal_gadgets_cannot_self_destruct() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let decommissioned = factory::gadget::GadgetFactory::new(db, user.id)
        .decommissioned()
        .build()
        .await?;
    let destroyed = factory::gadget::GadgetFactory::new(db, user.id)
        .destroyed()
        .build()
        .await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    assert_gadget_err(
        service.generate_confirmation(decommissioned.id).await,
        GadgetError::SelfDestructUnavailable(GadgetStatus::Decommissioned),
    );
    assert_gadget_err(
        service.generate_confirmation(destroyed.id).await,
        GadgetError::SelfDestructUnavailable(GadgetStatus::Destroyed),
    );

    assert_gadget_err(
        service
            .self_destruct(decommissioned.id, Some("123456"), user.id)
            .await,
        GadgetError::DestroyDecommissioned,
    );
    assert_gadget_err(
        service
            .self_destruct(destroyed.id, Some("123456"), user.id)
            .await,
        GadgetError::AlreadyDestroyed,
    );

    Ok(())
}

/// Tests the confirmation flow for an unknown gadget.
///
/// Expected: Err(NotFound) for both steps
#[tokio::test]
async fn unknown_gadget_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);
    let id = Uuid::new_v4();

    assert_gadget_err(
        service.generate_confirmation(id).await,
        GadgetError::NotFound,
    );
    assert_gadget_err(
        service.self_destruct(id, Some("123456"), user.id).await,
        GadgetError::NotFound,
    );

    Ok(())
}
