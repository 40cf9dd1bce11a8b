pub mod csrf_token;
pub mod logged_user;
pub mod user_clock;
