use ntex::web;
use serde_json::json;

use crate::{
    api::{self, care_tips},
    front::{AppState, errors, middleware, utils},
};

/// Generates care tips for the active pet, shown in the dashboard card
#[web::post("/care-tips")]
async fn generate_care_tips(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let tips = care_tips::get_care_tips(
        &app_state.care_tips_service,
        &care_tips::CareTipsInput::from(&active_pet.pet),
    )
    .await
    .map_err(|e| {
        if e.downcast_ref::<api::InvalidInput>().is_some() {
            return errors::api_error(e, care_tips::CARE_TIPS_ERROR_MESSAGE);
        }

        errors::ServerError::ActionFailed {
            toast: care_tips::CARE_TIPS_ERROR_MESSAGE,
            detail: format!("care tips for pet {} failed: {e}", active_pet.pet.id),
        }
        .into()
    })?;

    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "care_tips": tips.care_tips,
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/care_tips.html", &context)
}
