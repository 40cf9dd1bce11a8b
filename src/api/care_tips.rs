//! # Care Tips API Module
//!
//! Personalized care tips written by the generative text service out of the
//! pet breed, age and weight.

use serde::{Deserialize, Serialize};

use crate::{api, metric, models, services};

pub const CARE_TIPS_ERROR_MESSAGE: &str = "Could not fetch care tips. Please try again later.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareTipsInput {
    pub breed: String,
    /// years
    pub age: i64,
    /// kilograms
    pub weight: f64,
}

impl From<&models::pet::Pet> for CareTipsInput {
    fn from(pet: &models::pet::Pet) -> Self {
        Self {
            breed: pet.breed.clone(),
            age: pet.age,
            weight: pet.weight,
        }
    }
}

impl CareTipsInput {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.breed.trim().is_empty() {
            return Err(api::invalid_input("Breed is required."));
        }

        if self.age < 0 {
            return Err(api::invalid_input("Age can not be negative."));
        }

        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(api::invalid_input("Weight must be greater than 0."));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareTips {
    #[serde(rename = "careTips")]
    pub care_tips: String,
}

/// Asks the care tips service for a paragraph of tips.
///
/// # Arguments
/// * `care_tips_service` - Generative text service
/// * `input` - Breed, age and weight of the pet
///
/// # Returns
/// * `anyhow::Result<CareTips>` - The tips paragraph
pub async fn get_care_tips(
    care_tips_service: &services::ImplCareTipsService,
    input: &CareTipsInput,
) -> anyhow::Result<CareTips> {
    let _span = logfire::span!("get_care_tips").entered();

    input.validate()?;

    match care_tips_service.get_care_tips(input).await {
        Ok(tips) if !tips.care_tips.trim().is_empty() => {
            metric::incr_care_tips_statds("ok");
            Ok(tips)
        }
        Ok(_) => {
            metric::incr_care_tips_statds("empty");
            anyhow::bail!("care tips service returned an empty paragraph")
        }
        Err(e) => {
            metric::incr_care_tips_statds("error");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockCareTipsService;

    fn input() -> CareTipsInput {
        CareTipsInput {
            breed: "Golden Retriever".into(),
            age: 5,
            weight: 30.0,
        }
    }

    #[test]
    fn test_care_tips_wire_name() {
        let tips: CareTips = serde_json::from_str(r#"{"careTips": "Brush weekly."}"#).unwrap();
        assert_eq!(tips.care_tips, "Brush weekly.");
    }

    #[test]
    fn test_input_validation() {
        assert!(input().validate().is_ok());
        assert!(
            CareTipsInput {
                breed: " ".into(),
                ..input()
            }
            .validate()
            .is_err()
        );
        assert!(CareTipsInput { age: -1, ..input() }.validate().is_err());
        assert!(
            CareTipsInput {
                weight: 0.0,
                ..input()
            }
            .validate()
            .is_err()
        );
    }

    #[ntex::test]
    async fn test_get_care_tips() {
        let mut mock_service = MockCareTipsService::new();
        mock_service
            .expect_get_care_tips()
            .withf(|input| input.breed == "Golden Retriever")
            .times(1)
            .returning(|_| {
                Ok(CareTips {
                    care_tips: "Daily walks keep a Golden happy.".into(),
                })
            });
        let mock_service: services::ImplCareTipsService = Box::new(mock_service);

        let tips = get_care_tips(&mock_service, &input()).await.unwrap();

        assert_eq!(tips.care_tips, "Daily walks keep a Golden happy.");
    }

    #[ntex::test]
    async fn test_get_care_tips_failures() {
        let mut mock_service = MockCareTipsService::new();
        mock_service
            .expect_get_care_tips()
            .times(2)
            .returning(|input| {
                if input.age > 10 {
                    anyhow::bail!("endpoint down")
                }
                Ok(CareTips {
                    care_tips: "  ".into(),
                })
            });
        let mock_service: services::ImplCareTipsService = Box::new(mock_service);

        assert!(get_care_tips(&mock_service, &input()).await.is_err());
        assert!(
            get_care_tips(&mock_service, &CareTipsInput { age: 12, ..input() })
                .await
                .is_err()
        );
    }

    #[ntex::test]
    async fn test_invalid_input_skips_service() {
        let mut mock_service = MockCareTipsService::new();
        mock_service.expect_get_care_tips().never();
        let mock_service: services::ImplCareTipsService = Box::new(mock_service);

        let err = get_care_tips(&mock_service, &CareTipsInput { age: -2, ..input() })
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<api::InvalidInput>().is_some());
    }
}
