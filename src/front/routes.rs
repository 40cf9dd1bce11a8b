//! Frontend route configuration module.
//!
//! Routes are grouped by pet collection into scopes. Every route here needs a
//! signed in user; the ones under a collection also need an active pet.

use super::{activity, feeding, health, memories, onboarding, pet};
use ntex::web;

/// Configures the pet creation wizard.
///
/// # Routes
/// - `GET /onboarding` - Wizard page at the saved step
/// - `POST /onboarding/next` - Next step
/// - `POST /onboarding/prev` - Previous step
/// - `POST /onboarding/step` - Save the fields of the step and continue
/// - `POST /onboarding/avatar` - Upload the pet photo
/// - `POST /onboarding/submit` - Create the pet
pub fn onboarding(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/onboarding").service((
        onboarding::get_onboarding_view,
        onboarding::next_step,
        onboarding::prev_step,
        onboarding::save_step,
        onboarding::upload_avatar,
        onboarding::submit,
    )));
}

/// Configures pet switching and the pet profile.
///
/// # Routes
/// - `GET /pet/list` - Pet switcher widget
/// - `POST /pet/select/{pet_id}` - Change the active pet
/// - `GET /pet/profile` - Profile and settings page
/// - `POST /pet/profile` - Save the profile
pub fn pet(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/pet").service((
        pet::user_pets_list,
        pet::select_pet,
        pet::get_pet_profile_view,
        pet::update_pet_profile,
        pet::update_pet_avatar,
    )));
}

/// # Routes
/// - `GET /activity` - Activity page
/// - `GET /activity/list` - Logged activities
/// - `GET /activity/stats` - Weekly minutes, goal and streak
/// - `POST /activity` - Log an activity
pub fn activity(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/activity").service((
        activity::get_activity_view,
        activity::get_activity_logs,
        activity::get_activity_stats,
        activity::add_activity_log,
    )));
}

/// # Routes
/// - `GET /feeding` - Feeding page
/// - `GET /feeding/list` - Logged meals
/// - `POST /feeding` - Log a meal
pub fn feeding(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/feeding").service((
        feeding::get_feeding_view,
        feeding::get_feeding_logs,
        feeding::add_feeding_log,
    )));
}

/// Configures health logs and reminders.
///
/// # Main Routes
/// - `GET /health` - Health page
/// - `GET /health/overview` - Score, last vet visit and weight chart
/// - `GET /health/timeline` - Health logs
/// - `GET /health/reminders` - Reminders
///
/// # Health log Sub-routes (/health/log)
/// - `GET /health/log/new`, `GET /health/log/{log_id}/edit` - Form widget
/// - `POST /health/log` - Add
/// - `POST /health/log/{log_id}` - Update
/// - `GET /health/log/{log_id}/confirm-delete` - Delete dialog
/// - `DELETE /health/log/{log_id}` - Delete
///
/// # Reminder Sub-routes (/health/reminder)
/// Same shape as the health log ones.
pub fn health(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").service((
        health::get_health_view,
        health::get_health_overview,
        health::get_health_timeline,
        health::get_reminders,
        health::new_health_log_form,
        health::add_health_log,
        health::edit_health_log_form,
        health::update_health_log,
        health::confirm_delete_health_log,
        health::delete_health_log,
        health::new_reminder_form,
        health::add_reminder,
        health::edit_reminder_form,
        health::update_reminder,
        health::confirm_delete_reminder,
        health::delete_reminder,
    )));
}

/// # Routes
/// - `GET /memories` - Memories page
/// - `GET /memories/gallery` - Featured memory and grid
/// - `POST /memories` - Upload a memory
pub fn memories(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/memories").service((
        memories::get_memories_view,
        memories::get_memory_gallery,
        memories::add_memory,
    )));
}
