//! Health page: overview, timeline of health logs and reminders, with the
//! add/edit forms and the delete confirmations of both

use ntex::web;
use serde_json::json;

use crate::{
    api::{self, insights},
    front::{AppState, errors, forms, middleware, utils},
    models,
    services::live,
};

const SAVE_FAILED: &str = "Failed to save event.";
const DELETE_FAILED: &str = "Failed to delete event.";

const CHART_WIDTH: f64 = 300.0;
const CHART_HEIGHT: f64 = 100.0;

/// `points` attribute of the weight chart polyline, oldest point on the left.
/// Values are scaled between the lightest and heaviest point.
pub fn weight_chart_points(trend: &[insights::WeightPoint]) -> String {
    if trend.len() < 2 {
        return String::new();
    }

    let (min, max) = trend.iter().fold((f64::MAX, f64::MIN), |(min, max), point| {
        (min.min(point.value), max.max(point.value))
    });
    let range = if max > min { max - min } else { 1.0 };
    let step = CHART_WIDTH / (trend.len() - 1) as f64;

    trend
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let x = index as f64 * step;
            let y = CHART_HEIGHT - (point.value - min) / range * CHART_HEIGHT;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[web::get("")]
async fn get_health_view(
    active_pet: middleware::logged_user::ActivePet,
    csrf: middleware::csrf_token::PageToken,
) -> Result<impl web::Responder, web::Error> {
    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "csrf_token": csrf.0,
    }))
    .unwrap_or_default();

    utils::render_page("health.html", &context)
}

#[web::get("/overview")]
async fn get_health_overview(
    active_pet: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let overview = api::health::get_health_overview(
        &app_state.repo,
        active_pet.user_id(),
        active_pet.pet.id,
        &user_now.0,
    )
    .await
    .map_err(|e| {
        errors::ServerError::WidgetTemplateError(format!(
            "function get_health_overview raised an error: {e}"
        ))
    })?;

    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "chart_points": weight_chart_points(&overview.weight_trend),
        "overview": overview,
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/health_overview.html", &context)
}

/// Health logs, newest event first
#[web::get("/timeline")]
async fn get_health_timeline(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let logs =
        api::health::get_health_logs(&app_state.repo, active_pet.user_id(), active_pet.pet.id)
            .await
            .map_err(|e| {
                errors::ServerError::WidgetTemplateError(format!(
                    "function get_health_logs raised an error: {e}"
                ))
            })?;

    let context = tera::Context::from_value(json!({ "logs": logs })).unwrap_or_default();

    utils::render_widget("widgets/health_timeline.html", &context)
}

/// Reminders by due date, overdue ones flagged
#[web::get("/reminders")]
async fn get_reminders(
    active_pet: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let reminders =
        api::health::get_reminders(&app_state.repo, active_pet.user_id(), active_pet.pet.id)
            .await
            .map_err(|e| {
                errors::ServerError::WidgetTemplateError(format!(
                    "function get_reminders raised an error: {e}"
                ))
            })?;

    let context = tera::Context::from_value(json!({
        "reminders": api::health::reminder_views(reminders, &user_now.0),
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/reminder_list.html", &context)
}

fn render_health_log_form(
    form: serde_json::Value,
    action_url: &str,
    title: &str,
) -> Result<web::HttpResponse, web::Error> {
    let context = tera::Context::from_value(json!({
        "form": form,
        "action_url": action_url,
        "title": title,
        "log_types": models::select_options(&models::health::HealthLogType::ALL),
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/health_log_form.html", &context)
}

#[web::get("/log/new")]
async fn new_health_log_form(
    _: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
) -> Result<impl web::Responder, web::Error> {
    render_health_log_form(
        json!({
            "log_type": models::health::HealthLogType::VetVisit,
            "title": "",
            "notes": "",
            "value": "",
            "logged_at": user_now.0.date_naive(),
        }),
        "/health/log",
        "Log a health event",
    )
}

#[web::post("/log")]
async fn add_health_log(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
    app_state: web::types::State<AppState>,
    form: web::types::Form<forms::logs::HealthLogForm>,
) -> Result<impl web::Responder, web::Error> {
    let input = form
        .into_inner()
        .into_input(&user_now.0.timezone())
        .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    api::health::add_health_log(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        input,
    )
    .await
    .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    Ok(web::HttpResponse::Created()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::HealthLogs.to_string(),
                "Success!",
                "Health event logged.",
            ),
        )
        .finish())
}

#[web::get("/log/{log_id}/edit")]
async fn edit_health_log_form(
    active_pet: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let log = api::health::get_health_log(
        &app_state.repo,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
    )
    .await
    .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    render_health_log_form(
        json!({
            "log_type": log.log_type,
            "title": log.title,
            "notes": log.notes,
            "value": log.value.map(|value| value.to_string()).unwrap_or_default(),
            "logged_at": log.logged_at.with_timezone(&user_now.0.timezone()).date_naive(),
        }),
        &format!("/health/log/{}", log.id),
        "Edit health event",
    )
}

#[web::post("/log/{log_id}")]
async fn update_health_log(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::logs::HealthLogForm>,
) -> Result<impl web::Responder, web::Error> {
    let input = form
        .into_inner()
        .into_input(&user_now.0.timezone())
        .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    api::health::update_health_log(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
        input,
    )
    .await
    .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    Ok(web::HttpResponse::Ok()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::HealthLogs.to_string(),
                "Success!",
                "Health event updated.",
            ),
        )
        .finish())
}

#[web::get("/log/{log_id}/confirm-delete")]
async fn confirm_delete_health_log(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let log = api::health::get_health_log(
        &app_state.repo,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
    )
    .await
    .map_err(|e| errors::api_error(e, DELETE_FAILED))?;

    let context = tera::Context::from_value(json!({
        "title": "Delete this health log?",
        "description": format!(
            "\"{}\" will be removed from {}'s timeline. This can not be undone.",
            log.title, active_pet.pet.pet_name
        ),
        "delete_url": format!("/health/log/{}", log.id),
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/confirm_delete.html", &context)
}

#[web::delete("/log/{log_id}")]
async fn delete_health_log(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    api::health::delete_health_log(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
    )
    .await
    .map_err(|e| errors::api_error(e, DELETE_FAILED))?;

    Ok(web::HttpResponse::Ok()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::HealthLogs.to_string(),
                "Success!",
                "Health log deleted.",
            ),
        )
        .finish())
}

fn render_reminder_form(
    form: serde_json::Value,
    action_url: &str,
    title: &str,
) -> Result<web::HttpResponse, web::Error> {
    let context = tera::Context::from_value(json!({
        "form": form,
        "action_url": action_url,
        "title": title,
        "reminder_types": models::select_options(&models::reminder::ReminderType::ALL),
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/reminder_form.html", &context)
}

#[web::get("/reminder/new")]
async fn new_reminder_form(
    _: middleware::logged_user::ActivePet,
    user_now: middleware::user_clock::UserNow,
) -> Result<impl web::Responder, web::Error> {
    render_reminder_form(
        json!({
            "reminder_type": models::reminder::ReminderType::Vaccination,
            "name": "",
            "notes": "",
            "due_date": user_now.0.date_naive(),
        }),
        "/health/reminder",
        "Set a reminder",
    )
}

#[web::post("/reminder")]
async fn add_reminder(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    form: web::types::Form<forms::logs::ReminderForm>,
) -> Result<impl web::Responder, web::Error> {
    api::health::add_reminder(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        form.into_inner().into(),
    )
    .await
    .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    Ok(web::HttpResponse::Created()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::Reminders.to_string(),
                "Success!",
                "Reminder set.",
            ),
        )
        .finish())
}

#[web::get("/reminder/{reminder_id}/edit")]
async fn edit_reminder_form(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let reminder = api::health::get_reminder(
        &app_state.repo,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
    )
    .await
    .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    render_reminder_form(
        json!({
            "reminder_type": reminder.reminder_type,
            "name": reminder.name,
            "notes": reminder.notes,
            "due_date": reminder.due_date,
        }),
        &format!("/health/reminder/{}", reminder.id),
        "Edit reminder",
    )
}

#[web::post("/reminder/{reminder_id}")]
async fn update_reminder(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
    form: web::types::Form<forms::logs::ReminderForm>,
) -> Result<impl web::Responder, web::Error> {
    api::health::update_reminder(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
        form.into_inner().into(),
    )
    .await
    .map_err(|e| errors::api_error(e, SAVE_FAILED))?;

    Ok(web::HttpResponse::Ok()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::Reminders.to_string(),
                "Success!",
                "Reminder updated.",
            ),
        )
        .finish())
}

#[web::get("/reminder/{reminder_id}/confirm-delete")]
async fn confirm_delete_reminder(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let reminder = api::health::get_reminder(
        &app_state.repo,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
    )
    .await
    .map_err(|e| errors::api_error(e, DELETE_FAILED))?;

    let context = tera::Context::from_value(json!({
        "title": "Delete this reminder?",
        "description": format!(
            "\"{}\" due on {} will be removed. This can not be undone.",
            reminder.name,
            reminder.due_date.format("%b %d, %Y")
        ),
        "delete_url": format!("/health/reminder/{}", reminder.id),
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/confirm_delete.html", &context)
}

#[web::delete("/reminder/{reminder_id}")]
async fn delete_reminder(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    api::health::delete_reminder(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        path.0,
    )
    .await
    .map_err(|e| errors::api_error(e, DELETE_FAILED))?;

    Ok(web::HttpResponse::Ok()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::Reminders.to_string(),
                "Success!",
                "Reminder deleted.",
            ),
        )
        .finish())
}
