use ntex::web;
use serde_json::json;

use crate::{
    api::{self, insights},
    front::{AppState, errors, forms, middleware, utils},
    models,
    services::live,
};

#[web::get("")]
async fn get_activity_view(
    active_pet: middleware::logged_user::ActivePet,
    csrf: middleware::csrf_token::PageToken,
) -> Result<impl web::Responder, web::Error> {
    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "csrf_token": csrf.0,
        "activity_types": models::select_options(&models::activity::ActivityType::ALL),
    }))
    .unwrap_or_default();

    utils::render_page("activity.html", &context)
}

/// Activity history, newest first
#[web::get("/list")]
async fn get_activity_logs(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let logs =
        api::activity::get_activity_logs(&app_state.repo, active_pet.user_id(), active_pet.pet.id)
            .await
            .map_err(|e| {
                errors::ServerError::WidgetTemplateError(format!(
                    "function get_activity_logs raised an error: {e}"
                ))
            })?;

    let context = tera::Context::from_value(json!({ "logs": logs })).unwrap_or_default();

    utils::render_widget("widgets/activity_list.html", &context)
}

/// Weekly minutes chart, weekly goal ring and streak
#[web::get("/stats")]
async fn get_activity_stats(
    active_pet: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let now = user_now.0;
    let logs =
        api::activity::get_activity_logs(&app_state.repo, active_pet.user_id(), active_pet.pet.id)
            .await
            .map_err(|e| {
                errors::ServerError::WidgetTemplateError(format!(
                    "function get_activity_logs raised an error: {e}"
                ))
            })?;

    let weekly_minutes = insights::weekly_minutes(&logs, &now);
    let max_minutes = weekly_minutes
        .iter()
        .map(|day| day.minutes)
        .max()
        .unwrap_or_default()
        .max(1);

    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "weekly_minutes": weekly_minutes,
        "max_minutes": max_minutes,
        "weekly_goal": insights::weekly_goal(&logs, &now),
        "weekly_activity": insights::weekly_activity(&logs, &now),
        "streak": insights::activity_streak(&logs, &now),
        "badges": insights::activity_badges(&logs, &now)
            .iter()
            .map(|badge| json!({
                "name": badge.to_string(),
                "description": badge.description(),
            }))
            .collect::<Vec<_>>(),
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/activity_stats.html", &context)
}

#[web::post("")]
async fn add_activity_log(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    form: web::types::Form<forms::logs::ActivityLogForm>,
) -> Result<impl web::Responder, web::Error> {
    let log = api::activity::add_activity_log(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        form.into_inner().into(),
    )
    .await
    .map_err(|e| errors::api_error(e, "Could not save the activity log. Please try again."))?;

    Ok(web::HttpResponse::Created()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::ActivityLogs.to_string(),
                "Success!",
                &format!(
                    "Logged a {} minute {}.",
                    log.duration_minutes,
                    log.activity_type.to_string().to_lowercase()
                ),
            ),
        )
        .finish())
}
