//! # User API Module
//!
//! This module handles accounts: email/password sign up and sign in,
//! federated sign in and account deletion.

use chrono::{DateTime, Utc};
use derive_more::{Display, Error};

use crate::{consts, metric, models, repo, services, utils};

/// Authentication failures the pages tell apart
#[derive(Debug, Display, Error, PartialEq, Eq, Clone, Copy)]
pub enum AuthError {
    #[display("This email is already in use by another account.")]
    EmailAlreadyInUse,
    #[display("Invalid email or password.")]
    InvalidCredentials,
    #[display("Password must be at least 6 characters.")]
    WeakPassword,
    #[display("Please enter a valid email.")]
    InvalidEmail,
    #[display("Please sign in again before deleting your account.")]
    RequiresRecentLogin,
}

/// Lowercased and trimmed email used as the account key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// An email needs a local part, an `@` and a dotted domain part
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Creates a password account.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `email` - Email of the new account
/// * `password` - Clear password, stored as an argon2 hash
///
/// # Errors
/// [AuthError::InvalidEmail], [AuthError::WeakPassword] or
/// [AuthError::EmailAlreadyInUse] when the input is rejected.
pub async fn sign_up(
    repo: &repo::ImplAppRepo,
    email: &str,
    password: &str,
) -> anyhow::Result<models::user_app::User> {
    let email = normalize_email(email);

    if !is_valid_email(&email) {
        return Err(AuthError::InvalidEmail.into());
    }

    if password.chars().count() < consts::PASSWORD_MIN_LEN {
        return Err(AuthError::WeakPassword.into());
    }

    if repo.get_user_app_by_email(&email).await?.is_some() {
        return Err(AuthError::EmailAlreadyInUse.into());
    }

    let mut user =
        models::user_app::User::create_with_password(&email, utils::hash_password(password)?);
    user.id = repo.insert_user_app(&user).await?;

    metric::incr_user_action_statds("sign_up");
    Ok(user)
}

/// Signs in a password account.
///
/// Unknown emails, federated accounts without password, disabled accounts
/// and wrong passwords are all reported as [AuthError::InvalidCredentials].
pub async fn sign_in(
    repo: &repo::ImplAppRepo,
    email: &str,
    password: &str,
) -> anyhow::Result<models::user_app::User> {
    let user = repo
        .get_user_app_by_email(&normalize_email(email))
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let is_valid = user
        .password_hash
        .as_deref()
        .is_some_and(|hash| utils::verify_password(password, hash));

    if !is_valid || !user.is_enabled {
        metric::incr_user_action_statds("sign_in_failed");
        return Err(AuthError::InvalidCredentials.into());
    }

    metric::incr_user_action_statds("sign_in");
    Ok(user)
}

/// Gets the account of a federated identity or creates it on first sign in.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `email` - Email verified by the identity provider
/// * `auth_provider` - Provider the identity comes from
pub async fn get_or_create_federated_user(
    repo: &repo::ImplAppRepo,
    email: &str,
    auth_provider: models::user_app::AuthProvider,
) -> anyhow::Result<models::user_app::User> {
    let email = normalize_email(email);

    if let Some(user) = repo.get_user_app_by_email(&email).await? {
        if !user.is_enabled {
            return Err(AuthError::InvalidCredentials.into());
        }
        metric::incr_user_action_statds("sign_in");
        return Ok(user);
    }

    let mut user = models::user_app::User::create_federated(&email, auth_provider);
    user.id = repo.insert_user_app(&user).await?;

    metric::incr_user_action_statds("sign_up");
    Ok(user)
}

/// Deleting an account needs a sign in newer than [consts::RECENT_LOGIN_MAX_AGE]
pub fn is_recent_login(authenticated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - authenticated_at < consts::RECENT_LOGIN_MAX_AGE
}

/// Deletes the account, its pets, every record and the stored files.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `storage_service` - Storage holding the user avatars and memories
/// * `user_id` - Account to delete
/// * `authenticated_at` - When the current session signed in
///
/// # Errors
/// [AuthError::RequiresRecentLogin] when the session is too old.
///
/// # Warning
/// This operation is irreversible.
pub async fn delete_account(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    user_id: i64,
    authenticated_at: DateTime<Utc>,
) -> anyhow::Result<()> {
    let _span = logfire::span!("delete_account").entered();

    if !is_recent_login(authenticated_at, Utc::now()) {
        return Err(AuthError::RequiresRecentLogin.into());
    }

    storage_service.delete_user_files(user_id).await?;
    repo.delete_user_app(user_id).await?;

    metric::incr_user_action_statds("delete_account");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use crate::services::MockStorageService;
    use chrono::TimeDelta;
    use mockall::predicate::*;

    fn create_test_user(id: i64, email: &str, password: Option<&str>) -> models::user_app::User {
        models::user_app::User {
            id,
            email: email.to_string(),
            password_hash: password.map(|p| utils::hash_password(p).unwrap()),
            auth_provider: if password.is_some() {
                models::user_app::AuthProvider::Password
            } else {
                models::user_app::AuthProvider::Google
            },
            is_enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn auth_error(result: anyhow::Result<models::user_app::User>) -> Option<AuthError> {
        result.err().and_then(|e| e.downcast_ref::<AuthError>().copied())
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ana@barkive.app"));
        assert!(!is_valid_email("ana.barkive.app"));
        assert!(!is_valid_email("@barkive.app"));
        assert!(!is_valid_email("ana@barkive"));
        assert!(!is_valid_email("ana@.app"));
        assert!(!is_valid_email("ana @barkive.app"));
    }

    #[ntex::test]
    async fn test_sign_up_creates_password_user() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_email()
            .with(eq("ana@barkive.app"))
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert_user_app()
            .withf(|user| {
                user.email == "ana@barkive.app"
                    && user
                        .password_hash
                        .as_deref()
                        .is_some_and(|hash| utils::verify_password("secret1", hash))
            })
            .times(1)
            .returning(|_| Ok(42));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let user = sign_up(&mock_repo, " Ana@Barkive.app ", "secret1")
            .await
            .unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.auth_provider, models::user_app::AuthProvider::Password);
    }

    #[ntex::test]
    async fn test_sign_up_rejections() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_email()
            .returning(|email| Ok(Some(create_test_user(1, email, Some("secret1")))));
        mock_repo.expect_insert_user_app().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        assert_eq!(
            auth_error(sign_up(&mock_repo, "not-an-email", "secret1").await),
            Some(AuthError::InvalidEmail)
        );
        assert_eq!(
            auth_error(sign_up(&mock_repo, "ana@barkive.app", "12345").await),
            Some(AuthError::WeakPassword)
        );
        assert_eq!(
            auth_error(sign_up(&mock_repo, "ana@barkive.app", "123456").await),
            Some(AuthError::EmailAlreadyInUse)
        );
    }

    #[ntex::test]
    async fn test_sign_in() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_email()
            .returning(|email| match email {
                "ana@barkive.app" => Ok(Some(create_test_user(1, email, Some("secret1")))),
                "leo@barkive.app" => Ok(Some(create_test_user(2, email, None))),
                _ => Ok(None),
            });
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        assert!(
            sign_in(&mock_repo, "ana@barkive.app", "secret1")
                .await
                .is_ok_and(|user| user.id == 1)
        );
        assert_eq!(
            auth_error(sign_in(&mock_repo, "ana@barkive.app", "wrong-pass").await),
            Some(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth_error(sign_in(&mock_repo, "leo@barkive.app", "secret1").await),
            Some(AuthError::InvalidCredentials)
        );
        assert_eq!(
            auth_error(sign_in(&mock_repo, "nobody@barkive.app", "secret1").await),
            Some(AuthError::InvalidCredentials)
        );
    }

    #[ntex::test]
    async fn test_get_or_create_federated_user_existing_user() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_email()
            .with(eq("ana@barkive.app"))
            .times(1)
            .returning(|email| Ok(Some(create_test_user(7, email, Some("secret1")))));
        mock_repo.expect_insert_user_app().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = get_or_create_federated_user(
            &mock_repo,
            "ana@barkive.app",
            models::user_app::AuthProvider::Google,
        )
        .await;

        assert!(result.is_ok_and(|user| user.id == 7));
    }

    #[ntex::test]
    async fn test_get_or_create_federated_user_new_user() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_app_by_email()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert_user_app()
            .withf(|user| user.password_hash.is_none())
            .times(1)
            .returning(|_| Ok(9));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);

        let user = get_or_create_federated_user(
            &mock_repo,
            "new@barkive.app",
            models::user_app::AuthProvider::Google,
        )
        .await
        .unwrap();

        assert_eq!(user.id, 9);
        assert_eq!(user.auth_provider, models::user_app::AuthProvider::Google);
        assert!(user.is_enabled);
    }

    #[test]
    fn test_is_recent_login() {
        let now = Utc::now();

        assert!(is_recent_login(now - TimeDelta::minutes(4), now));
        assert!(!is_recent_login(now - TimeDelta::minutes(5), now));
    }

    #[ntex::test]
    async fn test_delete_account_removes_files_and_user() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_user_app()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));
        let mut mock_storage = MockStorageService::new();
        mock_storage
            .expect_delete_user_files()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let mock_storage: services::ImplStorageService = Box::new(mock_storage);

        let result = delete_account(&mock_repo, &mock_storage, 3, Utc::now()).await;

        assert!(result.is_ok());
    }

    #[ntex::test]
    async fn test_delete_account_requires_recent_login() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_delete_user_app().never();
        let mut mock_storage = MockStorageService::new();
        mock_storage.expect_delete_user_files().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let mock_storage: services::ImplStorageService = Box::new(mock_storage);

        let result = delete_account(
            &mock_repo,
            &mock_storage,
            3,
            Utc::now() - TimeDelta::minutes(30),
        )
        .await;

        assert_eq!(
            result
                .err()
                .and_then(|e| e.downcast_ref::<AuthError>().copied()),
            Some(AuthError::RequiresRecentLogin)
        );
    }
}
