use anyhow::{Context, bail};
use async_trait::async_trait;
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::{api, utils};

/// Care tips written by a Gemini style `generateContent` endpoint
#[derive(Clone)]
pub struct CareTipsHandler {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

pub fn build_care_tips_prompt(input: &api::care_tips::CareTipsInput) -> String {
    format!(
        "You are an expert pet care advisor.\n\n\
        Based on the following information about the pet, provide personalized care tips.\n\n\
        Breed: {breed}\n\
        Age: {age} years\n\
        Weight: {weight} kg\n\n\
        Provide care tips related to diet, exercise, grooming, and health.\n\
        Format your response as a paragraph.\n",
        breed = input.breed,
        age = input.age,
        weight = input.weight,
    )
}

/// Reads the `{"careTips": ...}` document the model wrote in its first candidate
fn parse_generate_content_response(body: &str) -> anyhow::Result<api::care_tips::CareTips> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let text = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.first())
        .map(|part| part.text.as_str())
        .context("care tips response without candidates")?;

    Ok(serde_json::from_str::<api::care_tips::CareTips>(text)?)
}

#[async_trait]
impl crate::services::CareTipsService for CareTipsHandler {
    async fn get_care_tips(
        &self,
        input: &api::care_tips::CareTipsInput,
    ) -> anyhow::Result<api::care_tips::CareTips> {
        let payload = json!({
            "contents": [{
                "parts": [{"text": build_care_tips_prompt(input)}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "careTips": {"type": "STRING"}
                    },
                    "required": ["careTips"]
                }
            }
        });

        let response = utils::REQUEST_CLIENT
            .post(&self.endpoint)
            .header("accept", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "care tips endpoint answered {}: {:#?}",
                status,
                response.text().await
            );
            bail!("care tips endpoint is returning an error");
        }

        parse_generate_content_response(&response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_pet_profile() {
        let prompt = build_care_tips_prompt(&api::care_tips::CareTipsInput {
            breed: "Golden Retriever".into(),
            age: 5,
            weight: 30.0,
        });

        assert!(prompt.contains("Breed: Golden Retriever"));
        assert!(prompt.contains("Age: 5 years"));
        assert!(prompt.contains("Weight: 30 kg"));
        assert!(prompt.contains("diet, exercise, grooming, and health"));
    }

    #[test]
    fn test_parse_generate_content_response() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"careTips\": \"Walk twice a day.\"}"}],
                    "role": "model"
                }
            }]
        })
        .to_string();

        let tips = parse_generate_content_response(&body).unwrap();

        assert_eq!(tips.care_tips, "Walk twice a day.");
    }

    #[test]
    fn test_parse_response_without_candidates_fails() {
        assert!(parse_generate_content_response(r#"{"candidates": []}"#).is_err());
        assert!(parse_generate_content_response("not json").is_err());
    }
}
