use super::*;
use uuid::Uuid;

/// Tests finding a gadget by id.
///
/// Expected: Ok(Some) for an existing id, Ok(None) for an unknown one
#[tokio::test]
async fn finds_gadget_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_user, gadget) = factory::helpers::create_gadget_with_owner(db).await?;

    let repo = GadgetRepository::new(db);

    let found = repo.find_by_id(gadget.id).await?;
    assert_eq!(found.map(|g| g.codename), Some(gadget.codename));

    assert!(repo.find_by_id(Uuid::new_v4()).await?.is_none());

    Ok(())
}

/// Tests finding a gadget by codename and the existence check built on it.
///
/// Expected: Ok with matching gadget and `codename_exists` agreeing
#[tokio::test]
async fn finds_gadget_by_codename() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let gadget = factory::gadget::GadgetFactory::new(db, user.id)
        .codename("The Cobra")
        .build()
        .await?;

    let repo = GadgetRepository::new(db);

    let found = repo.find_by_codename("The Cobra").await?.unwrap();
    assert_eq!(found.id, gadget.id);
    assert!(repo.codename_exists("The Cobra").await?);

    assert!(repo.find_by_codename("The Raptor").await?.is_none());
    assert!(!repo.codename_exists("The Raptor").await?);

    Ok(())
}

/// Tests listing gadgets with and without a status filter.
///
/// Verifies that the filter is an exact match and that an unfiltered list returns
/// every gadget.
///
/// Expected: Ok with filtered and unfiltered results
#[tokio::test]
async fn lists_gadgets_with_optional_status_filter() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_gadget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    factory::create_gadget(db, user.id).await?;
    factory::create_gadget(db, user.id).await?;
    factory::gadget::GadgetFactory::new(db, user.id)
        .decommissioned()
        .build()
        .await?;
    factory::gadget::GadgetFactory::new(db, user.id)
        .status("available")
        .build()
        .await?;

    let repo = GadgetRepository::new(db);

    assert_eq!(repo.find_all(None).await?.len(), 4);

    let available = repo.find_all(Some("Available")).await?;
    assert_eq!(available.len(), 2);
    assert!(available
        .iter()
        .all(|g| g.status == GadgetStatus::Available));

    let decommissioned = repo.find_all(Some("Decommissioned")).await?;
    assert_eq!(decommissioned.len(), 1);

    assert!(repo.find_all(Some("Destroyed")).await?.is_empty());

    Ok(())
}
