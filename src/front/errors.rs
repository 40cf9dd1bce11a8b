use super::{templates, utils};
use crate::api;
use derive_more::{Display, Error};
use log::{error, warn};
use ntex::{http, web};

const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Display, Error, PartialEq)]
pub enum UserError {
    UrlNotFound,
    Unauthorized,
    NeedOnboarding,
    RequiresRecentLogin,
    InvalidCredentials,
    EmailAlreadyInUse,
    MissingInformation,
    FormInputValueError(#[error(not(source))] String),
}

impl UserError {
    /// Title and description of the toast shown for the error
    fn toast(&self) -> (&'static str, String) {
        match self {
            UserError::UrlNotFound => ("Not found", "This record does not exist anymore.".into()),
            UserError::Unauthorized => ("Signed out", "Please sign in to continue.".into()),
            UserError::NeedOnboarding => ("Welcome!", "Add your first pet to get started.".into()),
            UserError::RequiresRecentLogin => (
                "Error",
                api::user::AuthError::RequiresRecentLogin.to_string(),
            ),
            UserError::InvalidCredentials => (
                "Error",
                api::user::AuthError::InvalidCredentials.to_string(),
            ),
            UserError::EmailAlreadyInUse => {
                ("Error", api::user::AuthError::EmailAlreadyInUse.to_string())
            }
            UserError::MissingInformation => (
                "Missing Information",
                "Please complete all fields before submitting.".into(),
            ),
            UserError::FormInputValueError(msg) => ("Error", msg.to_string()),
        }
    }

    /// Page the browser is sent to instead of showing the error
    fn redirect_url(&self) -> Option<&'static str> {
        match self {
            UserError::Unauthorized => Some("/login"),
            UserError::NeedOnboarding => Some("/onboarding"),
            _ => None,
        }
    }
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, req: &web::HttpRequest) -> web::HttpResponse {
        warn!("{:#?}", self);

        let (title, description) = self.toast();
        let is_htmx = utils::is_htmx_request(req.headers());

        if let Some(url) = self.redirect_url() {
            // htmx follows plain redirects inside the xhr, it needs the header instead
            if is_htmx {
                return web::HttpResponse::Ok()
                    .set_header("HX-Redirect", url)
                    .finish();
            }
            if *self == UserError::NeedOnboarding {
                return web::HttpResponse::build(self.status_code())
                    .set_header("location", url)
                    .finish();
            }
        }

        let mut response = web::HttpResponse::build(self.status_code());
        response.set_header("HX-Trigger", utils::toast_trigger(title, &description, true));

        if is_htmx {
            return response.finish();
        }

        let template_name = match self {
            UserError::UrlNotFound => "errors/url_not_found.html",
            UserError::Unauthorized => "errors/need_login.html",
            _ => "errors/invalid_input_values.html",
        };

        let mut context = tera::Context::new();
        context.insert("title", title);
        context.insert("msg_details", &description);

        response
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render(template_name, &context)
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::UrlNotFound => http::StatusCode::NOT_FOUND,
            UserError::Unauthorized => http::StatusCode::UNAUTHORIZED,
            UserError::NeedOnboarding => http::StatusCode::SEE_OTHER,
            UserError::RequiresRecentLogin => http::StatusCode::FORBIDDEN,
            UserError::InvalidCredentials => http::StatusCode::UNAUTHORIZED,
            UserError::EmailAlreadyInUse => http::StatusCode::CONFLICT,
            UserError::MissingInformation => http::StatusCode::BAD_REQUEST,
            UserError::FormInputValueError(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ServerError {
    TemplateError(#[error(not(source))] String),
    WidgetTemplateError(#[error(not(source))] String),
    ExternalServiceError(#[error(not(source))] String),
    InternalServerError(#[error(not(source))] String),
    InvalidCsrfToken,
    /// A write or fetch failed, `toast` tells the user which one
    #[display("{detail}")]
    ActionFailed { toast: &'static str, detail: String },
}

impl ServerError {
    fn get_error_message(&self) -> String {
        match self {
            ServerError::TemplateError(msg) => format!("[TemplateError] {:#?}", msg),
            ServerError::WidgetTemplateError(msg) => format!("[WidgetTemplateError] {:#?}", msg),
            ServerError::ExternalServiceError(msg) => format!("[ExternalServiceError] {:#?}", msg),
            ServerError::InternalServerError(msg) => format!("[InternalServerError] {:#?}", msg),
            ServerError::InvalidCsrfToken => "[InvalidCsrfToken]".to_string(),
            ServerError::ActionFailed { toast, detail } => {
                format!("[ActionFailed] {toast} {:#?}", detail)
            }
        }
    }

    fn toast_description(&self) -> &'static str {
        match self {
            ServerError::ActionFailed { toast, .. } => *toast,
            ServerError::InvalidCsrfToken => "Your session expired, please reload the page.",
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, req: &web::HttpRequest) -> web::HttpResponse {
        error!("{}", self.get_error_message());

        let mut response = web::HttpResponse::build(self.status_code());
        response.set_header(
            "HX-Trigger",
            utils::toast_trigger("Error", self.toast_description(), true),
        );

        let is_htmx = utils::is_htmx_request(req.headers());
        let template_name = match self {
            // will be a success status code cause it htmx should render something
            ServerError::WidgetTemplateError(_) => "errors/widget_page_err.html",
            _ if is_htmx => return response.finish(),
            _ => "errors/internal_error.html",
        };

        response
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render(template_name, &tera::Context::new())
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            // will be a success status code cause it htmx should render something
            ServerError::WidgetTemplateError(_) => http::StatusCode::ACCEPTED,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The [UserError] matching a typed api failure
fn user_error_of(e: &anyhow::Error) -> Option<UserError> {
    if let Some(auth_error) = e.downcast_ref::<api::user::AuthError>() {
        return Some(match auth_error {
            api::user::AuthError::EmailAlreadyInUse => UserError::EmailAlreadyInUse,
            api::user::AuthError::InvalidCredentials => UserError::InvalidCredentials,
            api::user::AuthError::RequiresRecentLogin => UserError::RequiresRecentLogin,
            api::user::AuthError::WeakPassword | api::user::AuthError::InvalidEmail => {
                UserError::FormInputValueError(auth_error.to_string())
            }
        });
    }

    if e.downcast_ref::<api::RecordNotFound>().is_some() {
        return Some(UserError::UrlNotFound);
    }

    e.downcast_ref::<api::InvalidInput>()
        .map(|invalid| UserError::FormInputValueError(invalid.message.to_string()))
}

/// Maps an api error to the response shown to the user.
/// Untyped failures become a toast with the `toast` description.
pub fn api_error(e: anyhow::Error, toast: &'static str) -> web::Error {
    match user_error_of(&e) {
        Some(user_error) => user_error.into(),
        None => ServerError::ActionFailed {
            toast,
            detail: format!("{e:#}"),
        }
        .into(),
    }
}
