//! Sign up, sign in (email or Google), sign out and account deletion

use ntex::web;
use ntex_identity::Identity;
use oauth2::{AuthorizationCode, CsrfToken, TokenResponse, reqwest};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api, consts, metric, models,
    front::{AppState, errors, forms, middleware, oauth, session, templates, utils},
};

/// Google oauth minimum data to handle the login callback request
#[derive(Deserialize, Debug)]
struct Q {
    code: String,
    state: String,
}

/// Google oauth minimum data to handle the login callback request
#[derive(Deserialize, Clone, Debug)]
pub struct UserProfile {
    email: String,
}

/// Signs the user in: new csrf pair plus the identity cookie
fn start_session(
    identity: &Identity,
    cookie: &ntex_session::Session,
    app_state: &AppState,
    user: models::user_app::User,
) -> Result<(), web::Error> {
    middleware::csrf_token::CsrfToken::issue(cookie, &app_state.csrf_protec)?;
    identity.remember(serde_json::to_string(&session::WebAppSession::new(user))?);

    Ok(())
}

fn render_auth_page(
    template_name: &str,
    cookie: &ntex_session::Session,
) -> Result<web::HttpResponse, web::Error> {
    let (auth_url, csrf_state) = oauth::get_new_auth_url().map_err(|e| {
        errors::ServerError::ExternalServiceError(format!("google auth url couldnt be built: {e}"))
    })?;

    cookie
        .set(consts::CSRF_STATE_COOKIE_NAME, csrf_state)
        .map_err(|e| {
            errors::ServerError::InternalServerError(format!(
                "at {template_name} cant set CSRF_STATE_COOKIE_NAME: {e}"
            ))
        })?;

    let context = tera::Context::from_value(json!({
        "google_outh_auth_url": &auth_url,
    }))
    .unwrap_or_default();

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(
            templates::WEB_TEMPLATES
                .render(template_name, &context)
                .map_err(|e| {
                    errors::ServerError::TemplateError(format!(
                        "the template {template_name} couldnt be rendered: {e}"
                    ))
                })?,
        ))
}

#[web::get("/login")]
async fn get_login_view(cookie: ntex_session::Session) -> Result<impl web::Responder, web::Error> {
    render_auth_page("login.html", &cookie)
}

#[web::get("/signup")]
async fn get_signup_view(cookie: ntex_session::Session) -> Result<impl web::Responder, web::Error> {
    render_auth_page("signup.html", &cookie)
}

#[web::post("/login")]
async fn login(
    form: web::types::Form<forms::user::CredentialsForm>,
    app_state: web::types::State<AppState>,
    identity: Identity,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::sign_in(&app_state.repo, &form.email, &form.password)
        .await
        .map_err(|e| errors::api_error(e, "Could not sign in. Please try again."))?;

    start_session(&identity, &cookie, &app_state, user)?;

    utils::hx_redirect_to("/")
}

#[web::post("/signup")]
async fn signup(
    form: web::types::Form<forms::user::CredentialsForm>,
    app_state: web::types::State<AppState>,
    identity: Identity,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::sign_up(&app_state.repo, &form.email, &form.password)
        .await
        .map_err(|e| errors::api_error(e, "Could not create the account. Please try again."))?;

    start_session(&identity, &cookie, &app_state, user)?;

    utils::hx_redirect_to("/onboarding")
}

/// Endpoint handles the google oauth callback login from the login view
#[web::get("/google_callback")]
async fn google_callback(
    q: web::types::Query<Q>,
    cookie: ntex_session::Session,
    app_state: web::types::State<AppState>,
    identity: Identity,
) -> Result<impl web::Responder, web::Error> {
    if q.state.ne(cookie
        .get::<CsrfToken>(consts::CSRF_STATE_COOKIE_NAME)?
        .unwrap_or(CsrfToken::new_random())
        .secret())
    {
        cookie.clear();
        return Err(errors::ServerError::InternalServerError(
            "at google_callback cant get CSRF_STATE_COOKIE_NAME".into(),
        )
        .into());
    }
    cookie.remove(consts::CSRF_STATE_COOKIE_NAME);

    let google_oauth = oauth::google_oauth_client().map_err(|e| {
        errors::ServerError::ExternalServiceError(format!("google oauth client: {e}"))
    })?;

    let token = google_oauth
        .exchange_code(AuthorizationCode::new(q.code.to_string()))
        .request_async(
            &reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::limited(1))
                .build()
                .map_err(|e| {
                    errors::ServerError::ExternalServiceError(format!(
                        "at google oauth token creation: {e}"
                    ))
                })?,
        )
        .await
        .map_err(|e| {
            errors::ServerError::ExternalServiceError(format!(
                "at google oauth token creation: {e}"
            ))
        })?
        .access_token()
        .secret()
        .to_string();

    let profile = crate::utils::REQUEST_CLIENT
        .get(consts::GOOGLE_ENDPOINT_USER_INFO)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| {
            errors::ServerError::ExternalServiceError(format!("at get google user info: {e}"))
        })?
        .json::<UserProfile>()
        .await
        .map_err(|e| {
            errors::ServerError::ExternalServiceError(format!("at get google user info: {e}"))
        })?;

    let user = api::user::get_or_create_federated_user(
        &app_state.repo,
        &profile.email,
        models::user_app::AuthProvider::Google,
    )
    .await
    .map_err(|e| {
        errors::ServerError::InternalServerError(format!(
            "at /google_callback user could not be retrieved: {e}"
        ))
    })?;

    start_session(&identity, &cookie, &app_state, user)?;

    utils::redirect_to("/")
}

#[web::post("/logout")]
async fn logout(
    _: middleware::csrf_token::CsrfToken,
    _: session::WebAppSession,
    identity: Identity,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    identity.forget();
    cookie.clear();
    metric::incr_user_action_statds("sign_out");

    utils::hx_redirect_to("/login")
}

/// Deletes the account with every pet, record and stored file.
/// The session must be recent, otherwise the user is asked to sign in again.
#[web::delete("/account")]
async fn delete_account(
    _: middleware::csrf_token::CsrfToken,
    web_app_session: session::WebAppSession,
    app_state: web::types::State<AppState>,
    identity: Identity,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    api::user::delete_account(
        &app_state.repo,
        &app_state.storage_service,
        web_app_session.user.id,
        web_app_session.authenticated_at,
    )
    .await
    .map_err(|e| errors::api_error(e, "Could not delete the account. Please try again."))?;

    identity.forget();
    cookie.clear();

    utils::hx_redirect_to("/signup")
}
