use std::{collections::HashMap, sync::LazyLock};

use tera::Tera;

use crate::models;

static VALUE_LABELS: LazyLock<HashMap<String, String>> =
    LazyLock::new(|| models::all_value_labels().into_iter().collect());

pub static WEB_TEMPLATES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::new("web/templates/**/*.html").unwrap_or_else(|e| {
        log::error!("web templates could not be parsed: {e}");
        Tera::default()
    });
    tera.register_filter("label", label);
    tera
});

/// `{{ log.food_type | label }}` renders `Wet Food` out of `wet_food`
fn label(value: &tera::Value, _: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
    let stored = tera::from_value::<String>(value.clone())?;

    Ok(tera::to_value(
        VALUE_LABELS.get(&stored).cloned().unwrap_or(stored),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_filter() {
        let args = HashMap::new();

        assert_eq!(label(&json!("wet_food"), &args).unwrap(), json!("Wet Food"));
        assert_eq!(label(&json!("vet-visit"), &args).unwrap(), json!("Vet Visit"));
        assert_eq!(label(&json!("unknown"), &args).unwrap(), json!("unknown"));
        assert!(label(&json!(3), &args).is_err());
    }

    #[test]
    fn test_templates_are_loaded() {
        let names = WEB_TEMPLATES.get_template_names().collect::<Vec<&str>>();

        for name in [
            "base.html",
            "login.html",
            "dashboard.html",
            "onboarding.html",
            "widgets/toast.html",
            "errors/need_login.html",
        ] {
            assert!(names.contains(&name), "{name} is missing");
        }
    }

    #[test]
    fn test_render_confirm_delete() {
        let context = tera::Context::from_value(json!({
            "title": "Delete this health log?",
            "description": "Vet Visit on 2024-05-02",
            "delete_url": "/health/log/4",
            "event": "healthLogs",
        }))
        .unwrap();

        let content = WEB_TEMPLATES
            .render("widgets/confirm_delete.html", &context)
            .unwrap();

        assert!(content.contains(r#"hx-delete="/health/log/4""#));
        assert!(content.contains("Delete this health log?"));
    }

    #[test]
    fn test_render_activity_stats_badges() {
        let day = |name| json!({"day": name, "minutes": 30});
        let context = |badges| {
            tera::Context::from_value(json!({
                "pet": {"pet_name": "Luna"},
                "weekly_minutes": [day("Mon"), day("Tue")],
                "max_minutes": 30,
                "weekly_goal": {"total_minutes": 60, "goal_minutes": 300, "percentage": 20},
                "weekly_activity": {"active_days": 2, "streak_completed": false, "days": []},
                "streak": 2,
                "badges": badges,
            }))
            .unwrap()
        };

        let content = WEB_TEMPLATES
            .render(
                "widgets/activity_stats.html",
                &context(json!([{"name": "Early Riser", "description": "A walk before 07:00."}])),
            )
            .unwrap();
        assert!(content.contains("Unlocked badges"));
        assert!(content.contains("Early Riser"));

        let content = WEB_TEMPLATES
            .render("widgets/activity_stats.html", &context(json!([])))
            .unwrap();
        assert!(!content.contains("Unlocked badges"));
    }

    #[test]
    fn test_pages_send_csrf_header() {
        let context = tera::Context::from_value(json!({
            "pet": {"pet_name": "Luna", "id": 1},
            "csrf_token": "c2Vzc2lvbi10b2tlbg==",
        }))
        .unwrap();

        let content = WEB_TEMPLATES.render("health.html", &context).unwrap();

        assert!(content.contains(r#"hx-headers='{"x-csrf-token": "c2Vzc2lvbi10b2tlbg=="}'"#));
    }
}
