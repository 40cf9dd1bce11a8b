use ntex::web;
use serde_json::json;

use crate::{
    api,
    front::{AppState, errors, middleware, utils},
    services::live,
};

#[web::get("")]
async fn get_memories_view(
    active_pet: middleware::logged_user::ActivePet,
    csrf: middleware::csrf_token::PageToken,
) -> Result<impl web::Responder, web::Error> {
    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "csrf_token": csrf.0,
    }))
    .unwrap_or_default();

    utils::render_page("memories.html", &context)
}

/// Newest memory featured on top, the others in a grid
#[web::get("/gallery")]
async fn get_memory_gallery(
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let memories =
        api::memory::get_memories(&app_state.repo, active_pet.user_id(), active_pet.pet.id)
            .await
            .map_err(|e| {
                errors::ServerError::WidgetTemplateError(format!(
                    "function get_memories raised an error: {e}"
                ))
            })?;

    let context = tera::Context::from_value(json!({
        "pet": &active_pet.pet,
        "gallery": api::memory::build_gallery(memories),
    }))
    .unwrap_or_default();

    utils::render_widget("widgets/memory_gallery.html", &context)
}

/// Multipart form with the `pic` image, a `caption` and an optional `ai_hint`
#[web::post("")]
async fn add_memory(
    _: middleware::csrf_token::CsrfToken,
    active_pet: middleware::logged_user::ActivePet,
    app_state: web::types::State<AppState>,
    payload: ntex_multipart::Multipart,
) -> Result<impl web::Responder, web::Error> {
    let form = utils::read_multipart_form(payload, "pic")
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    let pic = form
        .pic
        .clone()
        .ok_or(errors::UserError::FormInputValueError(
            "A picture is required.".into(),
        ))?;

    api::memory::add_memory(
        &app_state.repo,
        &app_state.storage_service,
        &app_state.live_feed,
        active_pet.user_id(),
        active_pet.pet.id,
        api::memory::MemoryUpload {
            pic,
            caption: form.field("caption"),
            ai_hint: Some(form.field("ai_hint")),
        },
    )
    .await
    .map_err(|e| errors::api_error(e, "Could not upload the memory."))?;

    Ok(web::HttpResponse::Created()
        .set_header(
            "HX-Trigger",
            utils::write_trigger(
                &live::Collection::Memories.to_string(),
                "Success!",
                "Memory added.",
            ),
        )
        .finish())
}
