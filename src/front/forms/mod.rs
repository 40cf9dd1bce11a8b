pub mod logs;
pub mod pet;
pub mod user;

use std::collections::HashSet;

use serde::de::DeserializeOwned;

/// Optional `<select>` value, an empty choice is `None`
pub fn parse_choice<T: DeserializeOwned>(value: &str) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
}

/// Text with every tag removed. Entities are decoded back since templates
/// escape on render.
pub fn clean_text(value: &str) -> String {
    ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(value)
        .to_string()
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Sanitised optional text field
pub fn clean_optional(value: &str) -> Option<String> {
    crate::api::non_blank(Some(&clean_text(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feeding::FoodReaction;

    #[test]
    fn test_parse_choice() {
        assert_eq!(
            parse_choice::<FoodReaction>("ate_some"),
            Some(FoodReaction::AteSome)
        );
        assert_eq!(parse_choice::<FoodReaction>(""), None);
        assert_eq!(parse_choice::<FoodReaction>("hungry"), None);
    }

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional("  "), None);
        assert_eq!(
            clean_optional("chicken<script>alert(1)</script>"),
            Some("chicken".to_string())
        );
    }

    #[test]
    fn test_clean_text_keeps_plain_characters() {
        assert_eq!(clean_text("1 & 1/2 cups"), "1 & 1/2 cups");
        assert_eq!(clean_text("Tom \"Buddy\" O'Neil"), "Tom \"Buddy\" O'Neil");
        assert_eq!(clean_text("weight < 30 & > 20"), "weight < 30 & > 20");
        assert_eq!(clean_text("<b>Luna</b>"), "Luna");
        assert_eq!(clean_text("<img src=x onerror=alert(1)>Max"), "Max");
    }
}
