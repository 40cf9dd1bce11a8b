pub mod activity;
pub mod feeding;
pub mod health;
pub mod memory;
pub mod pet;
pub mod reminder;
pub mod user_app;

use serde::Serialize;
use std::fmt::Display;

/// Image received from a multipart form
#[derive(Debug, Clone, Default)]
pub struct Pic {
    pub body: Vec<u8>,
    pub filename_extension: String,
}

impl Pic {
    pub fn content_type(&self) -> String {
        match self.filename_extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg".into(),
            ext => format!("image/{ext}"),
        }
    }
}

/// `(value, label)` pairs used to render the `<select>` of an enum field
pub fn select_options<T: Serialize + Display>(all: &[T]) -> Vec<(String, String)> {
    all.iter()
        .filter_map(|item| {
            serde_json::to_value(item)
                .ok()
                .and_then(|value| value.as_str().map(str::to_string))
                .map(|value| (value, item.to_string()))
        })
        .collect()
}

/// Every stored enum value with its human label
pub fn all_value_labels() -> Vec<(String, String)> {
    [
        select_options(&pet::Species::ALL),
        select_options(&pet::ActivityLevel::ALL),
        select_options(&pet::UnitPreference::ALL),
        select_options(&activity::ActivityType::ALL),
        select_options(&feeding::FoodType::ALL),
        select_options(&feeding::FoodReaction::ALL),
        select_options(&health::HealthLogType::ALL),
        select_options(&reminder::ReminderType::ALL),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_options_use_stored_value_and_label() {
        let options = select_options(&health::HealthLogType::ALL);

        assert_eq!(options.len(), 6);
        assert_eq!(options[0], ("vet-visit".to_string(), "Vet Visit".to_string()));
    }

    #[test]
    fn test_pic_content_type() {
        let pic = Pic {
            body: vec![],
            filename_extension: "jpg".into(),
        };
        assert_eq!(pic.content_type(), "image/jpeg");

        let pic = Pic {
            body: vec![],
            filename_extension: "png".into(),
        };
        assert_eq!(pic.content_type(), "image/png");
    }
}
