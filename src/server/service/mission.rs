//! Mission success estimates attached to gadget read responses.
//!
//! The estimate is cosmetic: it is rolled independently for every gadget on every read and
//! is never stored.

use rand::Rng;

use crate::{model::gadget::MissionGadgetDto, server::model::gadget::Gadget};

/// Rolls a uniform integer in `0..=100` and formats it as `"<n>% success probability"`.
pub fn success_probability() -> String {
    let percent = rand::rng().random_range(0..=100u8);
    format!("{}% success probability", percent)
}

/// Converts a gadget to its read DTO with a fresh success estimate.
pub fn annotate(gadget: Gadget) -> MissionGadgetDto {
    MissionGadgetDto {
        gadget: gadget.into_dto(),
        mission_success_probability: success_probability(),
    }
}
