use ntex::{
    http::Payload,
    web::{Error, FromRequest, HttpRequest},
};
use ntex_identity::RequestIdentity;

use crate::front::{AppState, errors, session};
use crate::{api, models};

/// Signed in user with the pet the pages work on
pub struct ActivePet {
    pub session: session::WebAppSession,
    pub pet: models::pet::Pet,
}

impl ActivePet {
    pub fn user_id(&self) -> i64 {
        self.session.user.id
    }
}

fn deserialize_web_app_session(str: &str) -> serde_json::Result<session::WebAppSession> {
    serde_json::from_str::<session::WebAppSession>(str)
}

/// Extracts the [WebAppSession](session::WebAppSession) from the identity cookie
fn get_web_app_session(auth_cookie: Option<String>) -> Result<session::WebAppSession, Error> {
    if let Ok(web_app_session) = deserialize_web_app_session(&auth_cookie.unwrap_or_default()) {
        return Ok(web_app_session);
    }

    Err(errors::UserError::Unauthorized.into())
}

impl<Err> FromRequest<Err> for session::WebAppSession {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let identity_cookie = req.get_identity();
        futures::future::ready(get_web_app_session(identity_cookie))
    }
}

/// Users without pets are sent to the onboarding wizard
impl<Err> FromRequest<Err> for ActivePet {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let req = req.clone();

        async move {
            let session = get_web_app_session(req.get_identity())?;
            let app_state = req.app_state::<AppState>().ok_or_else(|| {
                errors::ServerError::InternalServerError("app state is not configured".into())
            })?;

            let pet = api::pet::resolve_active_pet(
                &app_state.repo,
                session.user.id,
                session.active_pet_id,
            )
            .await
            .map_err(|e| {
                errors::ServerError::InternalServerError(format!(
                    "function resolve_active_pet raised an error: {e}"
                ))
            })?
            .ok_or(errors::UserError::NeedOnboarding)?;

            Ok::<Self, Error>(Self { session, pet })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_web_app_session() {
        let session = session::WebAppSession::new(models::user_app::User::create_federated(
            "ana@example.com",
            models::user_app::AuthProvider::Google,
        ));
        let cookie = serde_json::to_string(&session).unwrap();

        assert_eq!(
            get_web_app_session(Some(cookie)).unwrap().user.email,
            "ana@example.com"
        );
        assert!(get_web_app_session(None).is_err());
        assert!(get_web_app_session(Some("{}".into())).is_err());
    }
}
