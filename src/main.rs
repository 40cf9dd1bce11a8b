//! # Barkive
//!
//! Pet tracking web application: activity, feeding, health and memories of
//! every pet of the user, with live updates between open pages.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod metric;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;

use anyhow::Context;
use csrf::AesGcmCsrfProtection;
use logfire::config::MetricsOptions;
use ntex::web;
use ntex_cors::Cors;
use ntex_identity::{CookieIdentityPolicy, IdentityService};
use ntex_session::CookieSession;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    config::init_config()?;

    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;

    // logfire when a token is configured, console otherwise
    let shutdown_handler = if app_config.logfire_token.is_empty() {
        logger::setup_simple_logger()?;
        None
    } else {
        Some(
            logfire::configure()
                .install_panic_handler()
                .with_metrics(Some(MetricsOptions::default()))
                .send_to_logfire(logfire::config::SendToLogfire::Yes)
                .with_token(&app_config.logfire_token)
                .finish()?,
        )
    };

    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(app_config.is_prod()).await?,
    };

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(app_config.aws_region.to_string()))
        .load()
        .await;

    let storage_service = services::storage::StorageHandler {
        client: aws_sdk_s3::Client::new(&aws_config),
        bucket: app_config.storage_bucket.to_string(),
    };
    let care_tips_service = services::care_tips::CareTipsHandler {
        endpoint: app_config.care_tips_generate_endpoint(),
        api_key: app_config.care_tips_api_key.to_string(),
    };

    // one feed for every worker, so a write in one reaches listeners of all
    let live_feed = services::live::LiveFeed::new(consts::LIVE_FEED_CAPACITY);

    // csrf key derived from the configured password and salt using Argon2
    let csrf_key = utils::build_csrf_key(&app_config.csrf_pass, &app_config.csrf_salt)?;
    let session_key = utils::build_random_csrf_key()?;
    let identity_key = utils::build_random_csrf_key()?;

    configure_and_run_server(
        csrf_key,
        session_key,
        identity_key,
        AppServices {
            sqlite_repo,
            storage_service,
            care_tips_service,
            live_feed,
        },
    )
    .await?;

    if let Some(shutdown_handler) = shutdown_handler {
        shutdown_handler.shutdown()?;
    }

    Ok(())
}

/// Services cloned into the state of every worker
#[derive(Clone)]
struct AppServices {
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::StorageHandler,
    care_tips_service: services::care_tips::CareTipsHandler,
    live_feed: services::live::LiveFeed,
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;
    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

fn create_app_state(csrf_key: [u8; 32], app_services: AppServices) -> front::AppState {
    front::AppState {
        csrf_protec: AesGcmCsrfProtection::from_key(csrf_key),
        repo: Box::new(app_services.sqlite_repo),
        storage_service: Box::new(app_services.storage_service),
        care_tips_service: Box::new(app_services.care_tips_service),
        live_feed: app_services.live_feed,
    }
}

async fn configure_and_run_server(
    csrf_key: [u8; 32],
    session_key: [u8; 32],
    identity_key: [u8; 32],
    app_services: AppServices,
) -> anyhow::Result<()> {
    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;
    let server_addr = ("0.0.0.0", app_config.wep_server_port);
    let base_url = app_config.base_url();

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS", "DELETE"])
                    .allowed_origin("http://localhost:8080")
                    .allowed_origin(&base_url)
                    .allowed_origin("https://openidconnect.googleapis.com")
                    .allowed_origin("https://oauth2.googleapis.com")
                    .allowed_origin("https://www.googleapis.com")
                    .allowed_origin("https://accounts.google.com")
                    .finish(),
            )
            .wrap(
                CookieSession::private(&session_key)
                    .secure(app_config.is_prod())
                    .domain(app_config.wep_server_host.to_string())
                    .max_age(consts::MAX_AGE_COOKIES)
                    .name("barkive-session"),
            )
            .wrap(IdentityService::new(
                CookieIdentityPolicy::new(&identity_key)
                    .name("user_session")
                    .domain(app_config.wep_server_host.to_string())
                    .max_age(consts::MAX_AGE_COOKIES)
                    .secure(app_config.is_prod()),
            ))
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(csrf_key, app_services.clone()))
            .configure(front::routes::onboarding)
            .configure(front::routes::pet)
            .configure(front::routes::activity)
            .configure(front::routes::feeding)
            .configure(front::routes::health)
            .configure(front::routes::memories)
            .service((
                ntex_files::Files::new("/static", "web/static/"),
                front::server::serve_favicon,
                front::server::dashboard,
                front::server::dashboard_cards,
                front::auth::get_login_view,
                front::auth::get_signup_view,
                front::auth::login,
                front::auth::signup,
                front::auth::google_callback,
                front::auth::logout,
                front::auth::delete_account,
                front::care_tips::generate_care_tips,
                front::live::live_events,
                front::media::get_media,
            ))
            .default_service(web::route().to(front::server::serve_not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
