//! Pet creation wizard, the draft lives in the session cookie until submitted

use ntex::web;
use ntex_identity::Identity;
use serde_json::json;

use crate::{
    api::{self, onboarding},
    consts,
    front::{AppState, errors, forms, middleware, session, utils},
    models,
};

fn load_draft(cookie: &ntex_session::Session) -> Result<onboarding::OnboardingDraft, web::Error> {
    Ok(cookie
        .get::<onboarding::OnboardingDraft>(consts::ONBOARDING_DRAFT_COOKIE_NAME)?
        .unwrap_or_default())
}

fn save_draft(
    cookie: &ntex_session::Session,
    draft: &onboarding::OnboardingDraft,
) -> Result<(), web::Error> {
    cookie
        .set(consts::ONBOARDING_DRAFT_COOKIE_NAME, draft)
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "cant set ONBOARDING_DRAFT_COOKIE_NAME: {e}"
            ))
            .into()
        })
}

fn step_context(draft: &onboarding::OnboardingDraft) -> tera::Context {
    let step = draft.step();

    tera::Context::from_value(json!({
        "draft": draft,
        "step": step,
        "title": step.title(&draft.pet_name),
        "progress": draft.progress_percentage(),
        "is_first": draft.cursor == 0,
        "is_last": draft.cursor == onboarding::LAST_STEP,
        "species": models::select_options(&models::pet::Species::ALL),
        "activity_levels": models::select_options(&models::pet::ActivityLevel::ALL),
    }))
    .unwrap_or_default()
}

fn render_step(draft: &onboarding::OnboardingDraft) -> Result<web::HttpResponse, web::Error> {
    utils::render_widget("widgets/onboarding_step.html", &step_context(draft))
}

/// Wizard page, resumes the draft kept in the session
#[web::get("")]
async fn get_onboarding_view(
    _: session::WebAppSession,
    cookie: ntex_session::Session,
    csrf: middleware::csrf_token::PageToken,
) -> Result<impl web::Responder, web::Error> {
    let draft = load_draft(&cookie)?;
    let mut context = step_context(&draft);
    context.insert("csrf_token", &csrf.0);

    utils::render_page("onboarding.html", &context)
}

#[web::post("/next")]
async fn next_step(
    _: middleware::csrf_token::CsrfToken,
    _: session::WebAppSession,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let mut draft = load_draft(&cookie)?;
    draft.next();
    save_draft(&cookie, &draft)?;

    render_step(&draft)
}

#[web::post("/prev")]
async fn prev_step(
    _: middleware::csrf_token::CsrfToken,
    _: session::WebAppSession,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let mut draft = load_draft(&cookie)?;
    draft.prev();
    save_draft(&cookie, &draft)?;

    render_step(&draft)
}

/// Saves the fields of the current step and moves to the next one
#[web::post("/step")]
async fn save_step(
    _: middleware::csrf_token::CsrfToken,
    _: session::WebAppSession,
    cookie: ntex_session::Session,
    form: web::types::Form<forms::pet::OnboardingStepForm>,
) -> Result<impl web::Responder, web::Error> {
    let mut draft = load_draft(&cookie)?;

    for field in form.into_inner().into_fields() {
        draft
            .apply(field)
            .map_err(|e| errors::api_error(e, "Please check the value and try again."))?;
    }
    draft.next();
    save_draft(&cookie, &draft)?;

    render_step(&draft)
}

/// Multipart form with the `avatar` image, stored right away
#[web::post("/avatar")]
async fn upload_avatar(
    _: middleware::csrf_token::CsrfToken,
    web_app_session: session::WebAppSession,
    cookie: ntex_session::Session,
    app_state: web::types::State<AppState>,
    payload: ntex_multipart::Multipart,
) -> Result<impl web::Responder, web::Error> {
    let mut draft = load_draft(&cookie)?;

    let form = utils::read_multipart_form(payload, "avatar")
        .await
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    if let Some(pic) = form.pic {
        onboarding::upload_avatar(
            &app_state.storage_service,
            web_app_session.user.id,
            &mut draft,
            pic,
        )
        .await
        .map_err(|e| errors::api_error(e, "Could not upload the photo."))?;
    }
    draft.next();
    save_draft(&cookie, &draft)?;

    render_step(&draft)
}

/// Creates the pet, makes it the active one and opens the dashboard
#[web::post("/submit")]
async fn submit(
    _: middleware::csrf_token::CsrfToken,
    mut web_app_session: session::WebAppSession,
    cookie: ntex_session::Session,
    identity: Identity,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let draft = load_draft(&cookie)?;

    let pet_id = onboarding::submit(
        &app_state.repo,
        &app_state.live_feed,
        web_app_session.user.id,
        &draft,
    )
    .await
    .map_err(|e| {
        if e.downcast_ref::<api::InvalidInput>().is_some() {
            return errors::UserError::MissingInformation.into();
        }

        errors::api_error(e, "Could not add your pet. Please try again.")
    })?;

    web_app_session.active_pet_id = Some(pet_id);
    identity.remember(serde_json::to_string(&web_app_session)?);
    cookie.remove(consts::ONBOARDING_DRAFT_COOKIE_NAME);

    Ok(web::HttpResponse::Ok()
        .set_header(
            "HX-Trigger",
            utils::toast_trigger(
                "Welcome!",
                &format!("{} has been added to your pack.", draft.pet_name),
                false,
            ),
        )
        .header("HX-Redirect", "/")
        .finish())
}
