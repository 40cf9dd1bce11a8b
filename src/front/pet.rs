use ntex::web;
use ntex_identity::Identity;
use serde_json::json;

use crate::{
    api,
    front::{AppState, errors, forms, middleware, session, templates, utils},
    models,
    services::live,
};

/// Pet switcher widget
#[web::get("/list")]
async fn user_pets_list(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let context = tera::Context::from_value(json!({
        "pets": api::pet::get_user_pets(&app_state.repo, active_pet.user_id())
        .await
        .map_err(|e| {
            errors::ServerError::WidgetTemplateError(format!(
                "function get_user_pets raised an error: {e}"
            ))
        })?,
        "active_pet_id": active_pet.pet.id,
    }))
    .unwrap_or_default();

    let content = templates::WEB_TEMPLATES
        .render("widgets/pet_switcher.html", &context)
        .map_err(|e| {
            errors::ServerError::WidgetTemplateError(format!(
                "at /pet/list endpoint the template couldnt be rendered: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

/// Makes `pet_id` the active pet of the session
#[web::post("/select/{pet_id}")]
async fn select_pet(
    _: middleware::csrf_token::CsrfToken,
    mut web_app_session: session::WebAppSession,
    app_state: web::types::State<AppState>,
    identity: Identity,
    path: web::types::Path<(i64,)>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::pet::get_pet(&app_state.repo, web_app_session.user.id, path.0)
        .await
        .map_err(|e| errors::api_error(e, "Could not switch pets. Please try again."))?;

    web_app_session.active_pet_id = Some(pet.id);
    identity.remember(serde_json::to_string(&web_app_session)?);

    Ok(web::HttpResponse::Ok()
        .set_header("HX-Refresh", "true")
        .finish())
}

#[web::get("/profile")]
async fn get_pet_profile_view(
    active_pet: middleware::logged_user::ActivePet,
    csrf: middleware::csrf_token::PageToken,
) -> Result<impl web::Responder, web::Error> {
    let pet = &active_pet.pet;

    let context = tera::Context::from_value(json!({
        "pet": pet,
        "csrf_token": csrf.0,
        "weight": format!("{:.1}", pet.preferred_weight()),
        "user": &active_pet.session.user,
        "is_recent_login": active_pet.session.is_recent_login(),
        "species": models::select_options(&models::pet::Species::ALL),
        "activity_levels": models::select_options(&models::pet::ActivityLevel::ALL),
        "unit_preferences": models::select_options(&models::pet::UnitPreference::ALL),
    }))
    .unwrap_or_default();

    let content = templates::WEB_TEMPLATES
        .render("pet_profile.html", &context)
        .map_err(|e| {
            errors::ServerError::TemplateError(format!(
                "at /pet/profile endpoint the template couldnt be rendered: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

#[web::post("/profile")]
async fn update_pet_profile(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    form: web::types::Form<forms::pet::PetProfileForm>,
) -> Result<impl web::Responder, web::Error> {
    let pet = api::pet::update_pet_profile(
        &app_state.repo,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        &models::pet::PetProfileUpdate::from(form.into_inner()),
    )
    .await
    .map_err(|e| errors::api_error(e, "Could not save the profile. Please try again."))?;

    Ok(web::HttpResponse::Ok()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::Pets.to_string(),
                "Profile saved",
                &format!("{}'s profile is up to date.", pet.pet_name),
            ),
        )
        .finish())
}

/// Replaces the avatar of the active pet with the posted `avatar` image
#[web::post("/avatar")]
async fn update_pet_avatar(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    payload: ntex_multipart::Multipart,
) -> Result<impl web::Responder, web::Error> {
    let form = utils::read_multipart_form(payload, "avatar")
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;
    let pic = form.pic.ok_or(errors::UserError::FormInputValueError(
        "A picture is required.".to_string(),
    ))?;

    api::pet::update_pet_avatar(
        &app_state.repo,
        &app_state.storage_service,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        pic,
    )
    .await
    .map_err(|e| errors::api_error(e, "Could not upload the photo."))?;

    Ok(web::HttpResponse::Ok()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::Pets.to_string(),
                "Photo updated",
                &format!("{} has a new photo.", active_pet.pet.pet_name),
            ),
        )
        .finish())
}
