use ntex::web;
use serde_json::json;

use crate::{
    api,
    front::{AppState, errors, forms, middleware, utils},
    models,
    services::live,
};

#[web::get("")]
async fn get_feeding_view(
    active_pet: middleware::logged_user::ActivePet,
    csrf: middleware::csrf_token::PageToken,
) -> Result<impl web::Responder, web::Error> {
    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "csrf_token": csrf.0,
        "food_types": models::select_options(&models::feeding::FoodType::ALL),
        "reactions": models::select_options(&models::feeding::FoodReaction::ALL),
    }))
    .unwrap_or_default();

    utils::render_page("feeding.html", &context)
}

/// Feeding history, newest first
#[web::get("/list")]
async fn get_feeding_logs(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let logs =
        api::feeding::get_feeding_logs(&app_state.repo, active_pet.user_id(), active_pet.pet.id)
            .await
            .map_err(|e| {
                errors::ServerError::WidgetTemplateError(format!(
                    "function get_feeding_logs raised an error: {e}"
                ))
            })?;

    let context = tera::Context::from_value(json!({ "logs": logs })).unwrap_or_default();

    utils::render_widget("widgets/feeding_list.html", &context)
}

#[web::post("")]
async fn add_feeding_log(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    form: web::types::Form<forms::logs::FeedingLogForm>,
) -> Result<impl web::Responder, web::Error> {
    let log = api::feeding::add_feeding_log(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        form.into_inner().into(),
    )
    .await
    .map_err(|e| errors::api_error(e, "Could not save the feeding log. Please try again."))?;

    Ok(web::HttpResponse::Created()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::FeedingLogs.to_string(),
                "Success!",
                &format!("Logged {} of {}.", log.quantity, log.food_type),
            ),
        )
        .finish())
}
