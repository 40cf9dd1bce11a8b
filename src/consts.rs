pub const CSRF_TOKEN_COOKIE_NAME: &str = "csrf_token";
pub const CSRF_STATE_COOKIE_NAME: &str = "csrf_state";
/// Request header htmx sends the page token in
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";
pub const ONBOARDING_DRAFT_COOKIE_NAME: &str = "onboarding_draft";
pub const GOOGLE_ENDPOINT_USER_INFO: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const GOOGLE_ENDPOINT_REVOKE_TOKEN: &str = "https://oauth2.googleapis.com/revoke";

pub const PIC_MAX_SIZE_BYTES: usize = 6_000_000;
/// Largest text field accepted in a multipart form
pub const MULTIPART_TEXT_MAX_BYTES: usize = 64 * 1024;
pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpeg", "jpg", "heic"];
pub const DEFAULT_AVATAR_URL: &str = "https://placehold.co/128x128.png";

pub const PASSWORD_MIN_LEN: usize = 6;

/// Longest single activity that can be logged, one full day
pub const MAX_ACTIVITY_MINUTES: i64 = 1440;
/// Minutes of activity per week the weekly goal ring is measured against
pub const WEEKLY_ACTIVITY_GOAL_MINUTES: i64 = 300;
/// Active days in a week needed to earn the streak badge
pub const WEEKLY_STREAK_BADGE_DAYS: usize = 5;
/// Health score from which the encouragement card is shown
pub const HEALTH_SCORE_ENCOURAGEMENT: u8 = 80;

/// Activities from this long unlock the Marathoner badge
pub const MARATHONER_MINUTES: i64 = 60;
/// Walks started before this local hour unlock the Early Riser badge
pub const EARLY_RISER_HOUR: u32 = 7;

pub const LIVE_FEED_CAPACITY: usize = 256;

pub const MAX_AGE_COOKIES: i64 = chrono::TimeDelta::hours(4).num_seconds();
/// Deleting the account needs a sign in newer than this
pub const RECENT_LOGIN_MAX_AGE: chrono::TimeDelta = chrono::TimeDelta::minutes(5);
