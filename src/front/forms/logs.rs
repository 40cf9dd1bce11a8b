use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::{api, models};

use super::{clean_optional, clean_text, parse_choice};

#[derive(Debug, Deserialize)]
pub struct ActivityLogForm {
    pub activity_type: models::activity::ActivityType,
    pub duration_minutes: i64,
    #[serde(default)]
    pub notes: String,
}

impl From<ActivityLogForm> for models::activity::NewActivityLog {
    fn from(val: ActivityLogForm) -> Self {
        models::activity::NewActivityLog {
            activity_type: val.activity_type,
            duration_minutes: val.duration_minutes,
            notes: clean_optional(&val.notes),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedingLogForm {
    pub food_type: models::feeding::FoodType,
    pub quantity: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub reaction: String,
}

impl From<FeedingLogForm> for models::feeding::NewFeedingLog {
    fn from(val: FeedingLogForm) -> Self {
        models::feeding::NewFeedingLog {
            food_type: val.food_type,
            quantity: clean_text(&val.quantity),
            notes: clean_optional(&val.notes),
            reaction: parse_choice(&val.reaction),
        }
    }
}

/// Event dates are stored at noon of the user day so they read back as the same date
fn local_noon_to_utc(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));

    tz.from_local_datetime(&noon)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| noon.and_utc())
}

#[derive(Debug, Deserialize)]
pub struct HealthLogForm {
    pub log_type: models::health::HealthLogType,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub value: String,
    pub logged_at: NaiveDate,
}

impl HealthLogForm {
    pub fn into_input(self, tz: &Tz) -> anyhow::Result<models::health::HealthLogInput> {
        let value = match self.value.trim() {
            "" => None,
            value => Some(
                value
                    .parse::<f64>()
                    .map_err(|_| api::invalid_input("Value must be a number."))?,
            ),
        };

        Ok(models::health::HealthLogInput {
            log_type: self.log_type,
            title: clean_text(&self.title),
            notes: clean_text(&self.notes),
            value,
            logged_at: local_noon_to_utc(self.logged_at, tz),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ReminderForm {
    pub reminder_type: models::reminder::ReminderType,
    pub name: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl From<ReminderForm> for models::reminder::ReminderInput {
    fn from(val: ReminderForm) -> Self {
        models::reminder::ReminderInput {
            reminder_type: val.reminder_type,
            name: clean_text(&val.name),
            due_date: val.due_date,
            notes: clean_text(&val.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health_form(value: &str) -> HealthLogForm {
        HealthLogForm {
            log_type: models::health::HealthLogType::Weight,
            title: "Monthly weigh-in".into(),
            notes: String::new(),
            value: value.into(),
            logged_at: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        }
    }

    #[test]
    fn test_health_form_value() {
        let tz = chrono_tz::America::Mexico_City;

        assert_eq!(health_form("").into_input(&tz).unwrap().value, None);
        assert_eq!(health_form(" 29.5 ").into_input(&tz).unwrap().value, Some(29.5));

        let err = health_form("heavy").into_input(&tz).unwrap_err();
        assert!(err.downcast_ref::<api::InvalidInput>().is_some());
    }

    #[test]
    fn test_health_form_keeps_user_date() {
        for tz in [
            chrono_tz::America::Mexico_City,
            chrono_tz::Asia::Tokyo,
            chrono_tz::UTC,
        ] {
            let input = health_form("30").into_input(&tz).unwrap();
            assert_eq!(
                input.logged_at.with_timezone(&tz).date_naive(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
            );
            assert_eq!(
                input.logged_at.date_naive(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
            );
        }
    }

    #[test]
    fn test_feeding_form_optional_reaction() {
        let log = models::feeding::NewFeedingLog::from(FeedingLogForm {
            food_type: models::feeding::FoodType::WetFood,
            quantity: "1 can".into(),
            notes: String::new(),
            reaction: String::new(),
        });

        assert_eq!(log.reaction, None);
        assert_eq!(log.notes, None);
    }
}
