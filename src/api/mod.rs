//! # API Module
//!
//! This module contains all the business logic and data processing functions
//! for the Barkive application. Each submodule handles a specific domain
//! of functionality.
//!
//! ## Modules
//!
//! - [`activity`] - Activity logs of the active pet
//! - [`care_tips`] - AI generated care tips
//! - [`feeding`] - Feeding logs of the active pet
//! - [`health`] - Health logs, reminders and the health overview
//! - [`insights`] - Streaks, goals, mood, meal slots and health score
//! - [`memory`] - Photo memories
//! - [`onboarding`] - Pet creation wizard
//! - [`pet`] - Pet profiles and the active pet
//! - [`user`] - Accounts and authentication

pub mod activity;
pub mod care_tips;
pub mod feeding;
pub mod health;
pub mod insights;
pub mod memory;
pub mod onboarding;
pub mod pet;
pub mod user;

use derive_more::{Display, Error};

use crate::services::live::Collection;

/// The record does not exist or belongs to another user/pet
#[derive(Debug, Display, Error, PartialEq)]
#[display("{collection} record {id} not found")]
pub struct RecordNotFound {
    pub collection: Collection,
    pub id: i64,
}

/// User input rejected by a validation rule, the message is shown to the user
#[derive(Debug, Display, Error, PartialEq)]
#[display("{message}")]
pub struct InvalidInput {
    pub message: String,
}

pub(crate) fn invalid_input(message: &str) -> anyhow::Error {
    InvalidInput {
        message: message.to_string(),
    }
    .into()
}

/// Trimmed text, `None` when nothing is left
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
