//! # Insights API Module
//!
//! Derived values shown on the dashboard, activity and health pages. Every
//! function is pure: it receives the records and the reference instant in the
//! user's time zone, and day boundaries are the local days of that zone.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;
use derive_more::Display;
use serde::Serialize;

use crate::{consts, models};

/// Days counted for a record that was never logged
const MISSING_RECORD_DAYS: i64 = 999;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn local_date(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Monday of the week containing `now`
pub fn start_of_week(now: &DateTime<Tz>) -> NaiveDate {
    let today = now.date_naive();
    today - TimeDelta::days(i64::from(today.weekday().num_days_from_monday()))
}

fn week_index(date: NaiveDate, week_start: NaiveDate) -> Option<usize> {
    let offset = (date - week_start).num_days();
    (0..7).contains(&offset).then_some(offset as usize)
}

/// Number of consecutive local days with activity.
///
/// The streak is alive only when the newest active day is today or
/// yesterday, it then counts every immediately preceding active day.
pub fn activity_streak(logs: &[models::activity::ActivityLog], now: &DateTime<Tz>) -> u32 {
    let tz = now.timezone();
    let mut days: Vec<NaiveDate> = logs
        .iter()
        .map(|log| local_date(&log.created_at, &tz))
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let today = now.date_naive();
    let Some(newest) = days.first() else {
        return 0;
    };

    if *newest != today && Some(*newest) != today.pred_opt() {
        return 0;
    }

    let mut streak = 1;
    for pair in days.windows(2) {
        if pair[0].pred_opt() != Some(pair[1]) {
            break;
        }
        streak += 1;
    }

    streak
}

/// Days of the current Monday-first week having at least one activity
pub fn weekly_active_days(
    logs: &[models::activity::ActivityLog],
    now: &DateTime<Tz>,
) -> [bool; 7] {
    let tz = now.timezone();
    let week_start = start_of_week(now);
    let mut active = [false; 7];

    for log in logs {
        if let Some(index) = week_index(local_date(&log.created_at, &tz), week_start) {
            active[index] = true;
        }
    }

    active
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyActivity {
    pub days: Vec<WeekDay>,
    pub active_days: usize,
    pub streak_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDay {
    pub label: &'static str,
    pub active: bool,
    pub is_today: bool,
}

pub fn weekly_activity(
    logs: &[models::activity::ActivityLog],
    now: &DateTime<Tz>,
) -> WeeklyActivity {
    let active = weekly_active_days(logs, now);
    let today_index = now.weekday().num_days_from_monday() as usize;
    let active_days = active.iter().filter(|day| **day).count();

    WeeklyActivity {
        days: active
            .iter()
            .enumerate()
            .map(|(index, active)| WeekDay {
                label: WEEKDAY_LABELS[index],
                active: *active,
                is_today: index == today_index,
            })
            .collect(),
        active_days,
        streak_completed: active_days >= consts::WEEKLY_STREAK_BADGE_DAYS,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMinutes {
    pub day: &'static str,
    pub minutes: i64,
}

/// Minutes of activity per day of the current Monday-first week
pub fn weekly_minutes(
    logs: &[models::activity::ActivityLog],
    now: &DateTime<Tz>,
) -> [DailyMinutes; 7] {
    let tz = now.timezone();
    let week_start = start_of_week(now);
    let mut minutes = [0i64; 7];

    for log in logs {
        if let Some(index) = week_index(local_date(&log.created_at, &tz), week_start) {
            minutes[index] = minutes[index].saturating_add(log.duration_minutes);
        }
    }

    std::array::from_fn(|index| DailyMinutes {
        day: WEEKDAY_LABELS[index],
        minutes: minutes[index],
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyGoal {
    pub total_minutes: i64,
    pub goal_minutes: i64,
    pub percentage: u8,
}

/// Minutes logged since the start of the week against the weekly goal
pub fn weekly_goal(logs: &[models::activity::ActivityLog], now: &DateTime<Tz>) -> WeeklyGoal {
    let total_minutes = weekly_minutes(logs, now)
        .iter()
        .fold(0i64, |total, day| total.saturating_add(day.minutes));

    let percentage = (total_minutes as f64 / consts::WEEKLY_ACTIVITY_GOAL_MINUTES as f64 * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    WeeklyGoal {
        total_minutes,
        goal_minutes: consts::WEEKLY_ACTIVITY_GOAL_MINUTES,
        percentage,
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    #[display("Marathoner")]
    Marathoner,
    #[display("Early Riser")]
    EarlyRiser,
}

impl Badge {
    pub fn description(&self) -> String {
        match self {
            Badge::Marathoner => format!(
                "An activity of {} minutes or more.",
                consts::MARATHONER_MINUTES
            ),
            Badge::EarlyRiser => format!(
                "A walk before {:02}:00.",
                consts::EARLY_RISER_HOUR
            ),
        }
    }
}

/// Badges unlocked by any log of the pet, hours are read in the zone of `now`
pub fn activity_badges(logs: &[models::activity::ActivityLog], now: &DateTime<Tz>) -> Vec<Badge> {
    let tz = now.timezone();
    let mut badges = Vec::new();

    if logs
        .iter()
        .any(|log| log.duration_minutes >= consts::MARATHONER_MINUTES)
    {
        badges.push(Badge::Marathoner);
    }

    if logs.iter().any(|log| {
        log.activity_type == models::activity::ActivityType::Walk
            && log.created_at.with_timezone(&tz).hour() < consts::EARLY_RISER_HOUR
    }) {
        badges.push(Badge::EarlyRiser);
    }

    badges
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    #[display("Happy")]
    Happy,
    #[display("Neutral")]
    Neutral,
    #[display("Grumpy")]
    Grumpy,
}

impl Mood {
    pub fn message(&self, pet_name: &str) -> String {
        match self {
            Mood::Happy => format!("{pet_name} is feeling great today!"),
            Mood::Neutral => format!("{pet_name} is doing okay."),
            Mood::Grumpy => format!("{pet_name} could use a walk and a meal."),
        }
    }
}

/// Mood out of today's activities and meals
pub fn pet_mood(
    activity: &[models::activity::ActivityLog],
    feeding: &[models::feeding::FeedingLog],
    now: &DateTime<Tz>,
) -> Mood {
    let tz = now.timezone();
    let today = now.date_naive();

    let activities_today = activity
        .iter()
        .filter(|log| local_date(&log.created_at, &tz) == today)
        .count();
    let meals_today = feeding
        .iter()
        .filter(|log| local_date(&log.created_at, &tz) == today)
        .count();

    match (activities_today, meals_today) {
        (a, m) if a > 0 && m >= 2 => Mood::Happy,
        (0, m) if m < 2 => Mood::Grumpy,
        _ => Mood::Neutral,
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Meal {
    #[display("Breakfast")]
    Breakfast,
    #[display("Lunch")]
    Lunch,
    #[display("Dinner")]
    Dinner,
}

impl Meal {
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Local hours `[from, to)` a meal is matched in
    pub fn hours(&self) -> (u32, u32) {
        match self {
            Meal::Breakfast => (4, 11),
            Meal::Lunch => (11, 16),
            Meal::Dinner => (16, 22),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealSlot {
    pub meal: Meal,
    /// `HH:MM` of the matching meal, `None` means not eaten
    pub eaten_at: Option<String>,
}

/// Breakfast, lunch and dinner of today.
///
/// `feeding` is expected newest first, the first log in that order matching
/// a slot is the one shown.
pub fn meal_slots(feeding: &[models::feeding::FeedingLog], now: &DateTime<Tz>) -> [MealSlot; 3] {
    let tz = now.timezone();
    let today = now.date_naive();

    let todays_meals: Vec<DateTime<Tz>> = feeding
        .iter()
        .map(|log| log.created_at.with_timezone(&tz))
        .filter(|local| local.date_naive() == today)
        .collect();

    Meal::ALL.map(|meal| {
        let (from, to) = meal.hours();
        MealSlot {
            meal,
            eaten_at: todays_meals
                .iter()
                .find(|local| (from..to).contains(&local.hour()))
                .map(|local| local.format("%H:%M").to_string()),
        }
    })
}

fn days_since_newest(
    logs: &[models::health::HealthLog],
    log_type: models::health::HealthLogType,
    now: &DateTime<Tz>,
) -> i64 {
    logs.iter()
        .filter(|log| log.log_type == log_type)
        .map(|log| log.logged_at)
        .max()
        .map(|newest| (now.with_timezone(&Utc) - newest).num_days())
        .unwrap_or(MISSING_RECORD_DAYS)
}

/// Score out of 100 rewarding recent vet visits and weigh-ins
pub fn health_score(logs: &[models::health::HealthLog], now: &DateTime<Tz>) -> u8 {
    let days_since_vet = days_since_newest(logs, models::health::HealthLogType::VetVisit, now);
    let days_since_weight = days_since_newest(logs, models::health::HealthLogType::Weight, now);

    let vet_points = match days_since_vet {
        d if d < 180 => 50,
        d if d < 365 => 25,
        _ => 0,
    };
    let weight_points = match days_since_weight {
        d if d < 30 => 50,
        d if d < 90 => 25,
        _ => 0,
    };

    (vet_points + weight_points).min(100)
}

pub fn shows_health_encouragement(score: u8) -> bool {
    score >= consts::HEALTH_SCORE_ENCOURAGEMENT
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPoint {
    pub logged_at: DateTime<Utc>,
    pub value: f64,
}

/// Weight logs carrying a value, oldest first
pub fn weight_trend(logs: &[models::health::HealthLog]) -> Vec<WeightPoint> {
    let mut points: Vec<WeightPoint> = logs
        .iter()
        .filter(|log| log.log_type == models::health::HealthLogType::Weight)
        .filter_map(|log| {
            log.value.map(|value| WeightPoint {
                logged_at: log.logged_at,
                value,
            })
        })
        .collect();
    points.sort_by_key(|point| point.logged_at);

    points
}

/// A trend line needs at least two points
pub fn can_chart_weight(points: &[WeightPoint]) -> bool {
    points.len() >= 2
}

/// A reminder is overdue from the start of its due day
pub fn is_reminder_overdue(reminder: &models::reminder::Reminder, now: &DateTime<Tz>) -> bool {
    reminder.due_date <= now.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // Friday
    fn friday_noon() -> DateTime<Tz> {
        chrono_tz::UTC
            .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .unwrap()
    }

    fn activity_at(created_at: DateTime<Utc>, duration_minutes: i64) -> models::activity::ActivityLog {
        models::activity::ActivityLog {
            id: 0,
            pet_id: 1,
            activity_type: models::activity::ActivityType::Walk,
            duration_minutes,
            notes: None,
            created_at,
        }
    }

    fn meal_at(created_at: DateTime<Utc>) -> models::feeding::FeedingLog {
        models::feeding::FeedingLog {
            id: 0,
            pet_id: 1,
            food_type: models::feeding::FoodType::Kibble,
            quantity: "1 cup".into(),
            notes: None,
            reaction: None,
            created_at,
        }
    }

    fn health_at(
        log_type: models::health::HealthLogType,
        logged_at: DateTime<Utc>,
        value: Option<f64>,
    ) -> models::health::HealthLog {
        models::health::HealthLog {
            id: 0,
            pet_id: 1,
            log_type,
            title: "event".into(),
            notes: String::new(),
            value,
            logged_at,
            created_at: logged_at,
            updated_at: logged_at,
        }
    }

    fn utc(now: &DateTime<Tz>) -> DateTime<Utc> {
        now.with_timezone(&Utc)
    }

    #[test]
    fn test_streak_of_five_days_ending_today() {
        let now = friday_noon();
        let logs: Vec<_> = (0..5)
            .map(|days_ago| activity_at(utc(&now) - TimeDelta::days(days_ago), 20))
            .collect();

        assert_eq!(activity_streak(&logs, &now), 5);
    }

    #[test]
    fn test_streak_of_five_days_ending_yesterday() {
        let now = friday_noon();
        let logs: Vec<_> = (1..6)
            .map(|days_ago| activity_at(utc(&now) - TimeDelta::days(days_ago), 20))
            .collect();

        assert_eq!(activity_streak(&logs, &now), 5);
    }

    #[test]
    fn test_streak_is_broken_two_days_ago() {
        let now = friday_noon();
        let logs: Vec<_> = (2..6)
            .map(|days_ago| activity_at(utc(&now) - TimeDelta::days(days_ago), 20))
            .collect();

        assert_eq!(activity_streak(&logs, &now), 0);
        assert_eq!(activity_streak(&[], &now), 0);
    }

    #[test]
    fn test_streak_counts_days_not_logs_and_stops_at_gap() {
        let now = friday_noon();
        let logs = vec![
            activity_at(utc(&now), 10),
            activity_at(utc(&now) - TimeDelta::hours(1), 10),
            activity_at(utc(&now) - TimeDelta::days(1), 10),
            activity_at(utc(&now) - TimeDelta::days(3), 10),
        ];

        assert_eq!(activity_streak(&logs, &now), 2);
    }

    #[test]
    fn test_streak_uses_local_days() {
        let tz: Tz = "America/Mexico_City".parse().unwrap();
        // 2026-10-16 09:00 local
        let now = tz.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        // 02:00 UTC on the 16th is still the 15th in Mexico City
        let late_yesterday = Utc.with_ymd_and_hms(2026, 10, 16, 2, 0, 0).unwrap();
        let logs = vec![activity_at(late_yesterday, 30)];

        assert_eq!(activity_streak(&logs, &now), 1);
        assert_eq!(
            weekly_active_days(&logs, &now),
            [false, false, false, true, false, false, false]
        );
    }

    #[test]
    fn test_weekly_activity_badge_after_five_days() {
        let now = friday_noon();
        let mut logs: Vec<_> = (0..5)
            .map(|days_ago| activity_at(utc(&now) - TimeDelta::days(days_ago), 20))
            .collect();
        // previous Sunday belongs to last week
        logs.push(activity_at(utc(&now) - TimeDelta::days(5), 20));

        let weekly = weekly_activity(&logs, &now);

        assert_eq!(weekly.active_days, 5);
        assert!(weekly.streak_completed);
        assert!(weekly.days[4].is_today);
        assert!(!weekly.days[5].active && !weekly.days[6].active);
    }

    #[test]
    fn test_weekly_minutes_and_goal() {
        let now = friday_noon();
        let logs = vec![
            activity_at(utc(&now), 45),
            activity_at(utc(&now) - TimeDelta::hours(2), 15),
            activity_at(utc(&now) - TimeDelta::days(4), 30),
            activity_at(utc(&now) - TimeDelta::days(8), 500),
        ];

        let minutes = weekly_minutes(&logs, &now);
        assert_eq!(minutes[0].day, "Mon");
        assert_eq!(minutes[0].minutes, 30);
        assert_eq!(minutes[4].minutes, 60);

        let goal = weekly_goal(&logs, &now);
        assert_eq!(goal.total_minutes, 90);
        assert_eq!(goal.goal_minutes, 300);
        assert_eq!(goal.percentage, 30);
    }

    #[test]
    fn test_weekly_goal_is_capped() {
        let now = friday_noon();
        let logs = vec![activity_at(utc(&now), 400)];

        assert_eq!(weekly_goal(&logs, &now).percentage, 100);
        assert_eq!(weekly_goal(&[], &now).percentage, 0);
    }

    #[test]
    fn test_weekly_goal_rounds_percentage() {
        let now = friday_noon();
        // 100 / 300 = 33.33%
        let logs = vec![activity_at(utc(&now), 100)];
        assert_eq!(weekly_goal(&logs, &now).percentage, 33);

        // 5 / 300 = 1.67%
        let logs = vec![activity_at(utc(&now), 5)];
        assert_eq!(weekly_goal(&logs, &now).percentage, 2);
    }

    #[test]
    fn test_weekly_totals_saturate() {
        let now = friday_noon();
        let logs = vec![
            activity_at(utc(&now), i64::MAX),
            activity_at(utc(&now) - TimeDelta::hours(1), i64::MAX),
            activity_at(utc(&now) - TimeDelta::days(1), i64::MAX),
        ];

        assert_eq!(weekly_minutes(&logs, &now)[4].minutes, i64::MAX);

        let goal = weekly_goal(&logs, &now);
        assert_eq!(goal.total_minutes, i64::MAX);
        assert_eq!(goal.percentage, 100);
    }

    #[test]
    fn test_no_badges_without_qualifying_logs() {
        let now = friday_noon();
        let mut short_training = activity_at(utc(&now) - TimeDelta::hours(8), 59);
        short_training.activity_type = models::activity::ActivityType::Training;

        assert!(activity_badges(&[], &now).is_empty());
        assert!(activity_badges(&[short_training, activity_at(utc(&now), 30)], &now).is_empty());
    }

    #[test]
    fn test_marathoner_badge() {
        let now = friday_noon();
        let mut long_play = activity_at(utc(&now), 60);
        long_play.activity_type = models::activity::ActivityType::Play;

        assert_eq!(activity_badges(&[long_play], &now), vec![Badge::Marathoner]);
        assert_eq!(Badge::Marathoner.to_string(), "Marathoner");
    }

    #[test]
    fn test_early_riser_badge_uses_local_hour() {
        let tz: Tz = "America/Mexico_City".parse().unwrap();
        let now = tz.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        // 11:30 UTC is 05:30 in Mexico City
        let dawn_walk = activity_at(Utc.with_ymd_and_hms(2026, 10, 16, 11, 30, 0).unwrap(), 20);
        // 13:00 UTC is 07:00 in Mexico City
        let seven_walk = activity_at(Utc.with_ymd_and_hms(2026, 10, 16, 13, 0, 0).unwrap(), 20);
        let mut dawn_training = dawn_walk.clone();
        dawn_training.activity_type = models::activity::ActivityType::Training;

        assert_eq!(
            activity_badges(&[dawn_walk.clone()], &now),
            vec![Badge::EarlyRiser]
        );
        assert!(activity_badges(&[seven_walk], &now).is_empty());
        assert!(activity_badges(&[dawn_training], &now).is_empty());
        // same instant read in UTC is not early
        assert!(activity_badges(&[dawn_walk], &friday_noon()).is_empty());
    }

    #[test]
    fn test_pet_mood() {
        let now = friday_noon();
        let walk = vec![activity_at(utc(&now), 20)];
        let one_meal = vec![meal_at(utc(&now))];
        let two_meals = vec![meal_at(utc(&now)), meal_at(utc(&now) - TimeDelta::hours(3))];
        let yesterday_meals = vec![
            meal_at(utc(&now) - TimeDelta::days(1)),
            meal_at(utc(&now) - TimeDelta::days(1)),
        ];

        assert_eq!(pet_mood(&walk, &two_meals, &now), Mood::Happy);
        assert_eq!(pet_mood(&walk, &one_meal, &now), Mood::Neutral);
        assert_eq!(pet_mood(&[], &two_meals, &now), Mood::Neutral);
        assert_eq!(pet_mood(&[], &one_meal, &now), Mood::Grumpy);
        assert_eq!(pet_mood(&walk, &yesterday_meals, &now), Mood::Neutral);
    }

    #[test]
    fn test_meal_slots_without_logs_today() {
        let now = friday_noon();
        let yesterday = vec![meal_at(utc(&now) - TimeDelta::days(1))];

        for slots in [meal_slots(&[], &now), meal_slots(&yesterday, &now)] {
            assert!(slots.iter().all(|slot| slot.eaten_at.is_none()));
            assert_eq!(
                slots.iter().map(|slot| slot.meal).collect::<Vec<_>>(),
                Meal::ALL.to_vec()
            );
        }
    }

    #[test]
    fn test_meal_slots_match_local_hours() {
        let now = chrono_tz::UTC
            .with_ymd_and_hms(2026, 10, 16, 23, 30, 0)
            .unwrap();
        let at = |hour, minute| {
            Utc.with_ymd_and_hms(2026, 10, 16, hour, minute, 0)
                .unwrap()
        };
        // newest first
        let logs = vec![
            meal_at(at(22, 5)),
            meal_at(at(10, 40)),
            meal_at(at(8, 15)),
            meal_at(at(3, 50)),
        ];

        let slots = meal_slots(&logs, &now);

        assert_eq!(slots[0].eaten_at.as_deref(), Some("10:40"));
        assert_eq!(slots[1].eaten_at, None);
        assert_eq!(slots[2].eaten_at, None);
    }

    #[test]
    fn test_meal_slot_boundaries() {
        let now = chrono_tz::UTC
            .with_ymd_and_hms(2026, 10, 16, 23, 0, 0)
            .unwrap();
        let at = |hour| Utc.with_ymd_and_hms(2026, 10, 16, hour, 0, 0).unwrap();
        let logs = vec![meal_at(at(16)), meal_at(at(11)), meal_at(at(4))];

        let slots = meal_slots(&logs, &now);

        assert_eq!(slots[0].eaten_at.as_deref(), Some("04:00"));
        assert_eq!(slots[1].eaten_at.as_deref(), Some("11:00"));
        assert_eq!(slots[2].eaten_at.as_deref(), Some("16:00"));
    }

    #[test]
    fn test_health_score() {
        use models::health::HealthLogType::{Grooming, VetVisit, Weight};
        let now = friday_noon();
        let days_ago = |days| utc(&now) - TimeDelta::days(days);

        let recent = vec![
            health_at(VetVisit, days_ago(10), None),
            health_at(Weight, days_ago(5), Some(30.0)),
        ];
        assert_eq!(health_score(&recent, &now), 100);
        assert!(shows_health_encouragement(health_score(&recent, &now)));

        let aging = vec![
            health_at(VetVisit, days_ago(200), None),
            health_at(Weight, days_ago(60), Some(30.0)),
        ];
        assert_eq!(health_score(&aging, &now), 50);
        assert!(!shows_health_encouragement(50));

        let old = vec![
            health_at(VetVisit, days_ago(400), None),
            health_at(Grooming, days_ago(1), None),
        ];
        assert_eq!(health_score(&old, &now), 0);
        assert_eq!(health_score(&[], &now), 0);
    }

    #[test]
    fn test_health_score_uses_newest_record() {
        use models::health::HealthLogType::VetVisit;
        let now = friday_noon();
        let logs = vec![
            health_at(VetVisit, utc(&now) - TimeDelta::days(300), None),
            health_at(VetVisit, utc(&now) - TimeDelta::days(20), None),
        ];

        assert_eq!(health_score(&logs, &now), 50);
    }

    #[test]
    fn test_weight_trend_is_chronological() {
        use models::health::HealthLogType::{VetVisit, Weight};
        let now = friday_noon();
        let days_ago = |days| utc(&now) - TimeDelta::days(days);
        // newest first, as listed by the timeline
        let logs = vec![
            health_at(Weight, days_ago(1), Some(30.0)),
            health_at(VetVisit, days_ago(2), Some(38.5)),
            health_at(Weight, days_ago(3), None),
            health_at(Weight, days_ago(10), Some(29.0)),
        ];

        let trend = weight_trend(&logs);

        assert_eq!(
            trend.iter().map(|point| point.value).collect::<Vec<_>>(),
            vec![29.0, 30.0]
        );
        assert!(can_chart_weight(&trend));
        assert!(!can_chart_weight(&trend[..1]));
    }

    #[test]
    fn test_reminder_overdue_from_due_day() {
        let now = friday_noon();
        let reminder = |due_date| models::reminder::Reminder {
            id: 1,
            pet_id: 1,
            reminder_type: models::reminder::ReminderType::Vaccination,
            name: "Rabies".into(),
            due_date,
            notes: String::new(),
            created_at: utc(&now),
            updated_at: utc(&now),
        };
        let today = now.date_naive();

        assert!(is_reminder_overdue(&reminder(today), &now));
        assert!(is_reminder_overdue(
            &reminder(today - TimeDelta::days(1)),
            &now
        ));
        assert!(!is_reminder_overdue(
            &reminder(today + TimeDelta::days(1)),
            &now
        ));
    }
}
