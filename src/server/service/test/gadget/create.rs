use super::*;
use std::collections::HashSet;

/// Tests creating a gadget with only a name.
///
/// Expected: Ok with default status, pool codename, caller as creator and updater
#[tokio::test]
async fn creates_gadget_with_defaults() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();

    let service = GadgetService::new(db, &codes, &codenames);
    let gadget = service.create(create_param("Exploding Gum", user.id)).await?;

    assert_eq!(gadget.name, "Exploding Gum");
    assert_eq!(gadget.status, GadgetStatus::Available);
    assert!(crate::server::service::codename::CODENAMES.contains(&gadget.codename.as_str()));
    assert_eq!(gadget.created_by, user.id);
    assert_eq!(gadget.updated_by, user.id);
    assert!(gadget.decommissioned_at.is_none());
    assert!(gadget.destroyed_at.is_none());

    Ok(())
}

/// Tests creating a gadget with a custom status.
///
/// Expected: Ok with the status stored verbatim
#[tokio::test]
async fn creates_gadget_with_custom_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();

    let service = GadgetService::new(db, &codes, &codenames);
    let gadget = service
        .create(CreateGadgetParam {
            name: Some("  Laser Watch  ".to_string()),
            status: Some("Deployed".to_string()),
            actor: user.id,
        })
        .await?;

    assert_eq!(gadget.name, "Laser Watch");
    assert_eq!(gadget.status, GadgetStatus::Custom("Deployed".to_string()));

    Ok(())
}

/// Tests that a blank status falls back to the default.
///
/// Expected: Ok with status Available
#[tokio::test]
async fn blank_status_defaults_to_available() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();

    let service = GadgetService::new(db, &codes, &codenames);
    let gadget = service
        .create(CreateGadgetParam {
            name: Some("Pen Camera".to_string()),
            status: Some("   ".to_string()),
            actor: user.id,
        })
        .await?;

    assert_eq!(gadget.status, GadgetStatus::Available);

    Ok(())
}

/// Tests creating without a usable name.
///
/// Expected: Err(NameRequired) for a missing, empty or whitespace name
#[tokio::test]
async fn rejects_missing_or_blank_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    for name in [None, Some(""), Some("   ")] {
        let result = service
            .create(CreateGadgetParam {
                name: name.map(str::to_string),
                status: None,
                actor: user.id,
            })
            .await;

        assert_gadget_err(result, GadgetError::NameRequired);
    }

    Ok(())
}

/// Tests creating directly into a terminal status.
///
/// Expected: Err(ReservedStatus) for Decommissioned and Destroyed
#[tokio::test]
async fn rejects_terminal_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    for status in [GadgetStatus::Decommissioned, GadgetStatus::Destroyed] {
        let result = service
            .create(CreateGadgetParam {
                name: Some("Shoe Phone".to_string()),
                status: Some(status.to_string()),
                actor: user.id,
            })
            .await;

        assert_gadget_err(result, GadgetError::ReservedStatus(status));
    }

    Ok(())
}

/// Tests that codenames never repeat across many creations.
///
/// Expected: every created gadget gets a distinct codename
#[tokio::test]
async fn assigns_distinct_codenames() -> Result<(), AppError> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::new();
    let service = GadgetService::new(db, &codes, &codenames);

    let mut seen = HashSet::new();
    for i in 0..codenames.capacity() {
        let gadget = service
            .create(create_param(&format!("Gadget {}", i), user.id))
            .await?;
        assert!(seen.insert(gadget.codename));
    }

    assert_eq!(seen.len(), codenames.capacity());

    Ok(())
}

/// Tests creating once the codename pool is used up.
///
/// Expected: Err(CodenamesExhausted) and no extra row
#[tokio::test]
async fn fails_when_codenames_exhausted() -> Result<(), AppError> {
    const POOL: &[&str] = &["The Kraken", "The Cobra"];

    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let codes = ConfirmationCodeService::new();
    let codenames = CodenameGenerator::with_pool(POOL);
    let service = GadgetService::new(db, &codes, &codenames);

    service.create(create_param("First", user.id)).await?;
    service.create(create_param("Second", user.id)).await?;
    let result = service.create(create_param("Third", user.id)).await;

    assert_gadget_err(result, GadgetError::CodenamesExhausted);
    assert_eq!(service.list(None).await?.len(), 2);

    Ok(())
}
