//! Handlers not linked to a specific collection: dashboard, favicon and not found

use ntex::web;
use ntex_files::NamedFile;
use serde_json::json;

use crate::{
    api::{self, insights},
    front::{AppState, errors, middleware, templates},
};

/// Serve `favicon.ico`
#[web::get("/favicon.ico")]
async fn serve_favicon() -> Result<impl web::Responder, web::Error> {
    Ok(NamedFile::open("web/static/images/favicon.ico")?)
}

/// Return a [UrlNotFound](errors::UserError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::UserError::UrlNotFound.into())
}

/// Endpoint to render the dashboard of the active pet
#[web::get("/")]
async fn dashboard(
    active_pet: middleware::logged_user::ActivePet,
    csrf: middleware::csrf_token::PageToken,
) -> Result<impl web::Responder, web::Error> {
    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "csrf_token": csrf.0,
        "display_weight": active_pet.pet.display_weight(),
        "user": &active_pet.session.user,
    }))
    .unwrap_or_default();

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            templates::WEB_TEMPLATES
                .render("dashboard.html", &context)
                .map_err(|e| {
                    errors::ServerError::TemplateError(format!(
                        "at / endpoint the template couldnt be rendered: {e}"
                    ))
                })?,
        ))
}

/// Mood, weekly activity and meal tracker cards, re-fetched on every log change
#[web::get("/dashboard/cards")]
async fn dashboard_cards(
    active_pet: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let now = user_now.0;
    let user_id = active_pet.user_id();
    let pet = &active_pet.pet;

    let activity_logs = api::activity::get_activity_logs(&app_state.repo, user_id, pet.id)
        .await
        .map_err(|e| {
            errors::ServerError::WidgetTemplateError(format!(
                "function get_activity_logs raised an error: {e}"
            ))
        })?;
    let feeding_logs = api::feeding::get_feeding_logs(&app_state.repo, user_id, pet.id)
        .await
        .map_err(|e| {
            errors::ServerError::WidgetTemplateError(format!(
                "function get_feeding_logs raised an error: {e}"
            ))
        })?;

    let mood = insights::pet_mood(&activity_logs, &feeding_logs, &now);

    let context = tera::Context::from_value(json!({
        "pet": pet,
        "mood": mood,
        "mood_message": mood.message(&pet.pet_name),
        "weekly_activity": insights::weekly_activity(&activity_logs, &now),
        "streak": insights::activity_streak(&activity_logs, &now),
        "meal_slots": insights::meal_slots(&feeding_logs, &now),
    }))
    .unwrap_or_default();

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            templates::WEB_TEMPLATES
                .render("widgets/dashboard_cards.html", &context)
                .map_err(|e| {
                    errors::ServerError::WidgetTemplateError(format!(
                        "at /dashboard/cards the template couldnt be rendered: {e}"
                    ))
                })?,
        ))
}
