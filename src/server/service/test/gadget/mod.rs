use crate::server::{
    error::{gadget::GadgetError, AppError},
    model::gadget::{CreateGadgetParam, GadgetStatus, UpdateGadgetParam},
    service::{
        codename::CodenameGenerator, confirmation::ConfirmationCodeService,
        gadget::GadgetService,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod decommission;
mod self_destruct;

/// Asserts that `result` failed with the given gadget error.
fn assert_gadget_err<T: std::fmt::Debug>(result: Result<T, AppError>, expected: GadgetError) {
    match result {
        Err(AppError::GadgetErr(err)) => assert_eq!(err, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

fn create_param(name: &str, actor: uuid::Uuid) -> CreateGadgetParam {
    CreateGadgetParam {
        name: Some(name.to_string()),
        status: None,
        actor,
    }
}
