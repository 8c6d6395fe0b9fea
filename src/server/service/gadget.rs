//! Gadget lifecycle service.
//!
//! Enforces the lifecycle rules on top of `GadgetRepository`: required fields, codename
//! assignment, terminal states, and the two-step self-destruct protocol backed by the
//! confirmation code vault. Status transitions are written with a compare-and-set on the
//! status read beforehand, so racing transitions on one gadget cannot both succeed.

use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use uuid::Uuid;

use crate::server::{
    data::gadget::GadgetRepository,
    error::{gadget::GadgetError, AppError},
    model::gadget::{
        CreateGadgetParam, Gadget, GadgetChanges, GadgetStatus, NewGadget, UpdateGadgetParam,
    },
    service::{
        codename::CodenameGenerator,
        confirmation::{ConfirmationCodeService, IssuedCode},
    },
};

/// Inserts attempted when concurrent creates keep claiming the chosen codename.
const MAX_INSERT_ATTEMPTS: usize = 3;

pub struct GadgetService<'a> {
    db: &'a DatabaseConnection,
    codes: &'a ConfirmationCodeService,
    codenames: &'a CodenameGenerator,
}

impl<'a> GadgetService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        codes: &'a ConfirmationCodeService,
        codenames: &'a CodenameGenerator,
    ) -> Self {
        Self {
            db,
            codes,
            codenames,
        }
    }

    /// Creates a gadget with a freshly assigned codename.
    ///
    /// The name is required and stored trimmed. A missing or blank status defaults to
    /// `Available`; terminal statuses cannot be set here.
    ///
    /// # Returns
    /// - `Ok(Gadget)` - The created gadget
    /// - `Err(AppError::GadgetErr(NameRequired))` - Name missing or blank
    /// - `Err(AppError::GadgetErr(ReservedStatus))` - Status is `Decommissioned` or `Destroyed`
    /// - `Err(AppError::GadgetErr(CodenamesExhausted))` - No codename left in the pool
    /// - `Err(AppError::GadgetErr(Conflict))` - Every insert attempt lost a codename race
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateGadgetParam) -> Result<Gadget, AppError> {
        let name = param
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(GadgetError::NameRequired)?
            .to_string();
        let status = requested_status(param.status)?.unwrap_or(GadgetStatus::Available);

        let repo = GadgetRepository::new(self.db);

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let codename = self.codenames.generate(&repo).await?;

            let result = repo
                .create(NewGadget {
                    name: name.clone(),
                    codename: codename.clone(),
                    status: status.clone(),
                    actor: param.actor,
                })
                .await;

            match result {
                Ok(gadget) => {
                    tracing::info!(gadget_id = %gadget.id, codename = %gadget.codename, "Gadget created");
                    return Ok(gadget);
                }
                Err(err) if is_unique_violation(&err) => {
                    tracing::warn!(
                        "Codename {} was claimed concurrently (attempt {}/{})",
                        codename,
                        attempt,
                        MAX_INSERT_ATTEMPTS
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(GadgetError::Conflict.into())
    }

    /// Gets a gadget by id.
    pub async fn get(&self, id: Uuid) -> Result<Gadget, AppError> {
        let repo = GadgetRepository::new(self.db);

        Ok(repo.find_by_id(id).await?.ok_or(GadgetError::NotFound)?)
    }

    /// Gets all gadgets, optionally filtered by exact status. A blank filter is ignored.
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Gadget>, AppError> {
        let repo = GadgetRepository::new(self.db);
        let status = status.filter(|status| !status.trim().is_empty());

        Ok(repo.find_all(status).await?)
    }

    /// Applies a partial update. Only provided fields change; the updater is always set.
    ///
    /// # Returns
    /// - `Ok(Gadget)` - The updated gadget
    /// - `Err(AppError::GadgetErr(NotFound))` - No gadget with this id
    /// - `Err(AppError::GadgetErr(Terminal))` - Gadget is decommissioned or destroyed
    /// - `Err(AppError::GadgetErr(EmptyName))` - Provided name is blank
    /// - `Err(AppError::GadgetErr(ReservedStatus))` - Status is `Decommissioned` or `Destroyed`
    /// - `Err(AppError::GadgetErr(Conflict))` - Status changed concurrently
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn update(&self, param: UpdateGadgetParam) -> Result<Gadget, AppError> {
        let repo = GadgetRepository::new(self.db);

        let gadget = repo
            .find_by_id(param.id)
            .await?
            .ok_or(GadgetError::NotFound)?;

        if gadget.status.is_terminal() {
            return Err(GadgetError::Terminal(gadget.status).into());
        }

        let name = match param.name {
            Some(name) if name.trim().is_empty() => return Err(GadgetError::EmptyName.into()),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };
        let status = requested_status(param.status)?;

        let changes = GadgetChanges {
            name,
            status,
            ..GadgetChanges::by(param.actor)
        };

        let updated = repo
            .update_by_id(gadget.id, &gadget.status, changes)
            .await?
            .ok_or(GadgetError::Conflict)?;

        Ok(updated)
    }

    /// Moves a gadget to `Decommissioned` and drops any pending confirmation code.
    ///
    /// # Returns
    /// - `Ok(Gadget)` - The decommissioned gadget
    /// - `Err(AppError::GadgetErr(NotFound))` - No gadget with this id
    /// - `Err(AppError::GadgetErr(AlreadyDecommissioned))` - Already decommissioned
    /// - `Err(AppError::GadgetErr(DecommissionDestroyed))` - Gadget was destroyed
    /// - `Err(AppError::GadgetErr(Conflict))` - Status changed concurrently
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn decommission(&self, id: Uuid, actor: Uuid) -> Result<Gadget, AppError> {
        let repo = GadgetRepository::new(self.db);

        let gadget = repo.find_by_id(id).await?.ok_or(GadgetError::NotFound)?;

        match gadget.status {
            GadgetStatus::Decommissioned => {
                return Err(GadgetError::AlreadyDecommissioned.into())
            }
            GadgetStatus::Destroyed => return Err(GadgetError::DecommissionDestroyed.into()),
            _ => {}
        }

        let changes = GadgetChanges {
            status: Some(GadgetStatus::Decommissioned),
            decommissioned_at: Some(Utc::now()),
            ..GadgetChanges::by(actor)
        };

        let updated = repo
            .update_by_id(id, &gadget.status, changes)
            .await?
            .ok_or(GadgetError::Conflict)?;

        self.codes.invalidate(id);
        tracing::info!(gadget_id = %id, "Gadget decommissioned");

        Ok(updated)
    }

    /// Issues a self-destruct confirmation code for a gadget that is not terminal.
    ///
    /// # Returns
    /// - `Ok(IssuedCode)` - The code and its lifetime; any earlier code is replaced
    /// - `Err(AppError::GadgetErr(NotFound))` - No gadget with this id
    /// - `Err(AppError::GadgetErr(SelfDestructUnavailable))` - Gadget is terminal
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn generate_confirmation(&self, id: Uuid) -> Result<IssuedCode, AppError> {
        let repo = GadgetRepository::new(self.db);

        let gadget = repo.find_by_id(id).await?.ok_or(GadgetError::NotFound)?;

        if gadget.status.is_terminal() {
            return Err(GadgetError::SelfDestructUnavailable(gadget.status).into());
        }

        let issued = self.codes.generate(id);
        tracing::info!(gadget_id = %id, "Self-destruct confirmation code issued");

        Ok(issued)
    }

    /// Destroys a gadget after consuming its confirmation code.
    ///
    /// The code is consumed only once the gadget is known to be destroyable, so a request
    /// against a terminal gadget leaves a pending code untouched. If the write then fails,
    /// the code is put back and stays usable until its original deadline.
    ///
    /// # Returns
    /// - `Ok(Gadget)` - The destroyed gadget
    /// - `Err(AppError::GadgetErr(ConfirmationRequired))` - No code supplied
    /// - `Err(AppError::GadgetErr(NotFound))` - No gadget with this id
    /// - `Err(AppError::GadgetErr(AlreadyDestroyed))` - Gadget was already destroyed
    /// - `Err(AppError::GadgetErr(DestroyDecommissioned))` - Gadget is decommissioned
    /// - `Err(AppError::GadgetErr(InvalidConfirmation))` - Code absent, wrong or expired
    /// - `Err(AppError::GadgetErr(Conflict))` - Status changed concurrently
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn self_destruct(
        &self,
        id: Uuid,
        confirmation: Option<&str>,
        actor: Uuid,
    ) -> Result<Gadget, AppError> {
        let confirmation = confirmation
            .filter(|code| !code.trim().is_empty())
            .ok_or(GadgetError::ConfirmationRequired)?;

        let repo = GadgetRepository::new(self.db);

        let gadget = repo.find_by_id(id).await?.ok_or(GadgetError::NotFound)?;

        match gadget.status {
            GadgetStatus::Destroyed => return Err(GadgetError::AlreadyDestroyed.into()),
            GadgetStatus::Decommissioned => {
                return Err(GadgetError::DestroyDecommissioned.into())
            }
            _ => {}
        }

        let Some(redeemed) = self.codes.redeem(id, confirmation) else {
            tracing::warn!(gadget_id = %id, "Rejected self-destruct confirmation code");
            return Err(GadgetError::InvalidConfirmation.into());
        };

        let changes = GadgetChanges {
            status: Some(GadgetStatus::Destroyed),
            destroyed_at: Some(Utc::now()),
            ..GadgetChanges::by(actor)
        };

        let destroyed = match repo.update_by_id(id, &gadget.status, changes).await {
            Ok(Some(destroyed)) => destroyed,
            Ok(None) => {
                self.codes.restore(id, redeemed);
                return Err(GadgetError::Conflict.into());
            }
            Err(err) => {
                self.codes.restore(id, redeemed);
                return Err(err.into());
            }
        };

        tracing::info!(gadget_id = %id, "Gadget self-destructed");

        Ok(destroyed)
    }
}

/// Parses a requested status. Blank means "not provided"; terminal statuses are rejected.
fn requested_status(status: Option<String>) -> Result<Option<GadgetStatus>, GadgetError> {
    let Some(status) = status.filter(|status| !status.trim().is_empty()) else {
        return Ok(None);
    };

    let status = GadgetStatus::from(status);
    if status.is_terminal() {
        return Err(GadgetError::ReservedStatus(status));
    }

    Ok(Some(status))
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
