use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Display, Default, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    #[display("password")]
    Password,
    #[display("google")]
    Google,
}

#[derive(Serialize, Debug, Deserialize, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub auth_provider: AuthProvider,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn create_with_password(email: &str, password_hash: String) -> Self {
        Self {
            id: 0,
            email: email.to_string(),
            password_hash: Some(password_hash),
            auth_provider: AuthProvider::Password,
            is_enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn create_federated(email: &str, auth_provider: AuthProvider) -> Self {
        Self {
            id: 0,
            email: email.to_string(),
            password_hash: None,
            auth_provider,
            is_enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
