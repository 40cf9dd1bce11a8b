use chrono::{DateTime, Utc};

use crate::{api, models};

/// Cookie session data stored (encrypt) on user side
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct WebAppSession {
    pub user: models::user_app::User,
    /// Pet selected in the switcher, the first pet is used when absent
    pub active_pet_id: Option<i64>,
    pub authenticated_at: DateTime<Utc>,
}

impl WebAppSession {
    pub fn new(user: models::user_app::User) -> Self {
        Self {
            user,
            active_pet_id: None,
            authenticated_at: Utc::now(),
        }
    }

    pub fn is_recent_login(&self) -> bool {
        api::user::is_recent_login(self.authenticated_at, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_roundtrip_keeps_active_pet() {
        let mut session = WebAppSession::new(models::user_app::User::create_federated(
            "ana@example.com",
            models::user_app::AuthProvider::Google,
        ));
        session.active_pet_id = Some(3);

        let cookie = serde_json::to_string(&session).unwrap();
        let restored: WebAppSession = serde_json::from_str(&cookie).unwrap();

        assert_eq!(restored.active_pet_id, Some(3));
        assert_eq!(restored.user.email, "ana@example.com");
        assert!(restored.is_recent_login());
    }

    #[test]
    fn test_old_session_is_not_recent() {
        let mut session = WebAppSession::new(models::user_app::User::create_federated(
            "ana@example.com",
            models::user_app::AuthProvider::Google,
        ));
        session.authenticated_at = Utc::now() - chrono::TimeDelta::minutes(6);

        assert!(!session.is_recent_login());
    }
}
