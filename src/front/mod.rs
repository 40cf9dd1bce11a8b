pub mod activity;
pub mod auth;
pub mod care_tips;
pub mod errors;
pub mod feeding;
pub mod forms;
pub mod health;
pub mod live;
pub mod media;
pub mod memories;
pub mod middleware;
pub mod oauth;
pub mod onboarding;
pub mod pet;
pub mod routes;
pub mod server;
pub mod session;
pub mod templates;
pub mod utils;

use crate::{repo, services};
use csrf::AesGcmCsrfProtection;

pub struct AppState {
    pub csrf_protec: AesGcmCsrfProtection,
    pub repo: repo::ImplAppRepo,
    pub storage_service: services::ImplStorageService,
    pub care_tips_service: services::ImplCareTipsService,
    pub live_feed: services::live::LiveFeed,
}
