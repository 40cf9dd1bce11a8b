use base64::{Engine, prelude::BASE64_STANDARD};
use csrf::{AesGcmCsrfProtection, CsrfProtection};
use ntex::{http::Payload, web};
use ntex_session::UserSession;

use crate::{
    consts,
    front::{AppState, errors},
};

/// Token pair kept in the private session cookie. Every state-changing
/// request must send the token in the `x-csrf-token` header, and the stored
/// pair must verify
#[derive(Default, serde::Serialize, serde::Deserialize)]
pub struct CsrfToken {
    pub token_base64: String,
    pub cookie_base64: String,
}

impl CsrfToken {
    /// Generates a new pair and stores it in the session
    pub fn issue(
        session: &ntex_session::Session,
        csrf_protec: &AesGcmCsrfProtection,
    ) -> Result<(), web::Error> {
        let (token, cookie) = csrf_protec
            .generate_token_pair(None, consts::MAX_AGE_COOKIES)
            .map_err(|e| {
                errors::ServerError::InternalServerError(format!(
                    "cant set token csrf protection: {e}"
                ))
            })?;

        session.set(
            consts::CSRF_TOKEN_COOKIE_NAME,
            serde_json::to_string(&Self {
                token_base64: token.b64_string(),
                cookie_base64: cookie.b64_string(),
            })?,
        )?;

        Ok(())
    }

    fn verify(&self, csrf_protec: &AesGcmCsrfProtection) -> bool {
        let token = BASE64_STANDARD
            .decode(self.token_base64.as_bytes())
            .map(|token| csrf_protec.parse_token(&token));
        let cookie = BASE64_STANDARD
            .decode(self.cookie_base64.as_bytes())
            .map(|cookie| csrf_protec.parse_cookie(&cookie));

        if let (Ok(Ok(token)), Ok(Ok(cookie))) = (token, cookie) {
            return csrf_protec.verify_token_pair(&token, &cookie).is_ok();
        }

        false
    }

    /// The header token must be the one of the stored pair
    fn accepts(&self, header_token: Option<&str>, csrf_protec: &AesGcmCsrfProtection) -> bool {
        match header_token {
            Some(header_token) if !self.token_base64.is_empty() => {
                header_token == self.token_base64 && self.verify(csrf_protec)
            }
            _ => false,
        }
    }
}

fn stored_token(session: &ntex_session::Session) -> Option<CsrfToken> {
    session
        .get::<String>(consts::CSRF_TOKEN_COOKIE_NAME)
        .ok()
        .flatten()
        .and_then(|stored| serde_json::from_str(&stored).ok())
}

fn is_csrf_valid(req: &web::HttpRequest) -> bool {
    let header_token = req
        .headers()
        .get(consts::CSRF_HEADER_NAME)
        .and_then(|value| value.to_str().ok());

    match (stored_token(&req.get_session()), req.app_state::<AppState>()) {
        (Some(stored), Some(app_state)) => stored.accepts(header_token, &app_state.csrf_protec),
        _ => false,
    }
}

impl<Err> web::FromRequest<Err> for CsrfToken {
    type Error = web::Error;

    fn from_request(
        req: &web::HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        if !is_csrf_valid(req) {
            return std::future::ready(Err(errors::ServerError::InvalidCsrfToken.into()));
        }

        std::future::ready(Ok(Self::default()))
    }
}

/// Token of the session pair, rendered by pages into the htmx headers.
/// Empty before sign in.
pub struct PageToken(pub String);

impl<Err> web::FromRequest<Err> for PageToken {
    type Error = web::Error;

    fn from_request(
        req: &web::HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let token = stored_token(&req.get_session())
            .map(|stored| stored.token_base64)
            .unwrap_or_default();

        std::future::ready(Ok(Self(token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued_pair(csrf_protec: &AesGcmCsrfProtection) -> CsrfToken {
        let (token, cookie) = csrf_protec
            .generate_token_pair(None, consts::MAX_AGE_COOKIES)
            .unwrap();

        CsrfToken {
            token_base64: token.b64_string(),
            cookie_base64: cookie.b64_string(),
        }
    }

    #[test]
    fn test_issued_pair_verifies() {
        let csrf_protec = AesGcmCsrfProtection::from_key([7; 32]);
        let csrf = issued_pair(&csrf_protec);
        assert!(csrf.verify(&csrf_protec));

        let other_key = AesGcmCsrfProtection::from_key([8; 32]);
        assert!(!csrf.verify(&other_key));
        assert!(!CsrfToken::default().verify(&csrf_protec));
    }

    #[test]
    fn test_header_token_is_required() {
        let csrf_protec = AesGcmCsrfProtection::from_key([7; 32]);
        let csrf = issued_pair(&csrf_protec);

        assert!(!csrf.accepts(None, &csrf_protec));
        assert!(!csrf.accepts(Some(""), &csrf_protec));
    }

    #[test]
    fn test_header_token_must_match_the_pair() {
        let csrf_protec = AesGcmCsrfProtection::from_key([7; 32]);
        let csrf = issued_pair(&csrf_protec);
        let other = issued_pair(&csrf_protec);

        assert!(!csrf.accepts(Some(&other.token_base64), &csrf_protec));
        assert!(!csrf.accepts(Some("bm90IGEgdG9rZW4="), &csrf_protec));
        assert!(csrf.accepts(Some(&csrf.token_base64), &csrf_protec));
    }

    #[test]
    fn test_matching_header_with_broken_pair() {
        let csrf_protec = AesGcmCsrfProtection::from_key([7; 32]);
        let csrf = issued_pair(&csrf_protec);
        let header = csrf.token_base64.clone();
        let broken = CsrfToken {
            cookie_base64: String::new(),
            ..csrf
        };

        assert!(!broken.accepts(Some(&header), &csrf_protec));
        assert!(!CsrfToken::default().accepts(Some(""), &csrf_protec));
    }
}
