// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde_json::Value;

use super::{ChatMessage, CompletionClient, CompletionError, CompletionRequest, ResponseFormat};

const CROP_SYSTEM_PROMPT: &str =
    "You are an agricultural expert AI that provides crop recommendations based on local \
     conditions.";
const ADVICE_SYSTEM_PROMPT: &str =
    "You are an agricultural expert AI that provides personalized farming advice.";
const WEATHER_SYSTEM_PROMPT: &str =
    "You are an agricultural expert AI specializing in weather impacts on farming.";
const VOICE_SYSTEM_PROMPT: &str =
    "You are AgroSakhi, a voice assistant for farmers. You provide helpful information and \
     advice about farming in a simple, conversational manner.";

const NO_ADVICE: &str = "No advice available at this time.";
const NO_ANALYSIS: &str = "No analysis available at this time.";
const NO_ANSWER: &str = "I'm sorry, I couldn't process your question.";

/// What is known about a plot of land when asking which crops to grow on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CropConditions {
    pub location: String,
    pub soil_type: Option<String>,
    pub soil_ph: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub season: Option<String>,
}

/// One crop proposed by the model.
#[derive(Clone, Debug, PartialEq)]
pub struct CropSuggestion {
    pub crop_name: String,
    pub variety: Option<String>,
    pub reason: Option<String>,
    pub match_percentage: Option<i32>,
}

impl CropSuggestion {
    fn from_value(value: &Value) -> Option<Self> {
        let text = |field: &str| value.get(field).and_then(Value::as_str).map(String::from);

        Some(Self {
            crop_name: text("cropName")?,
            variety: text("variety"),
            reason: text("reason"),
            match_percentage: value
                .get("matchPercentage")
                .and_then(Value::as_f64)
                .map(|percentage| percentage.round().max(0.0).min(100.0) as i32),
        })
    }
}

/// Builds farming prompts and sends them through a `CompletionClient`.
#[derive(Clone)]
pub struct Advisor {
    client: Box<dyn CompletionClient>,
    model: String,
}

impl Advisor {
    pub fn new(client: Box<dyn CompletionClient>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    async fn ask(
        &self,
        system: &str,
        prompt: &str,
        response_format: Option<ResponseFormat>,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            response_format,
        };
        self.client.complete(request).await
    }

    /// Asks for three crops suited to `conditions`.
    ///
    /// The model answers in JSON; either an array of suggestions or an object holding one is
    /// accepted. Entries without a crop name are dropped.
    pub async fn generate_crop_recommendations(
        &self,
        conditions: &CropConditions,
    ) -> Result<Vec<CropSuggestion>, CompletionError> {
        let content = self
            .ask(
                CROP_SYSTEM_PROMPT,
                &crop_prompt(conditions),
                Some(ResponseFormat::json_object()),
            )
            .await?;
        if content.trim().is_empty() {
            return Err(CompletionError::new(502, "No content returned from completion API"));
        }

        let parsed: Value = serde_json::from_str(&content).map_err(|err| {
            CompletionError::new(502, &format!("Completion was not valid JSON: {}", err))
        })?;

        Ok(suggestion_list(&parsed)
            .map(|items| items.iter().filter_map(CropSuggestion::from_value).collect())
            .unwrap_or_default())
    }

    pub async fn generate_farming_advice(
        &self,
        crop_name: &str,
        growth_stage: &str,
        issues: &[String],
    ) -> Result<String, CompletionError> {
        let mut prompt = format!(
            "Provide personalized farming advice for the following crop:\n\n\
             Crop: {}\nGrowth Stage: {}\n",
            crop_name, growth_stage
        );
        if !issues.is_empty() {
            prompt.push_str(&format!("Current Issues: {}\n", issues.join(", ")));
        }
        prompt.push_str(
            "\nGive practical, actionable advice that a farmer can implement immediately. \
             Include information about watering, fertilization, pest control, and any special \
             considerations for the current growth stage.",
        );

        let advice = self.ask(ADVICE_SYSTEM_PROMPT, &prompt, None).await?;
        Ok(or_fallback(advice, NO_ADVICE))
    }

    pub async fn analyze_weather_impact(
        &self,
        crop_name: &str,
        weather_forecast: &Value,
    ) -> Result<String, CompletionError> {
        let prompt = format!(
            "Analyze how the following weather forecast might impact the cultivation of {}:\n\n\
             Weather Forecast:\n{}\n\n\
             Provide insights on:\n\
             1. How the forecasted weather might affect the crop\n\
             2. Any risks or challenges the farmer should be aware of\n\
             3. Specific actions the farmer should take based on the forecast",
            crop_name,
            pretty(weather_forecast)
        );

        let analysis = self.ask(WEATHER_SYSTEM_PROMPT, &prompt, None).await?;
        Ok(or_fallback(analysis, NO_ANALYSIS))
    }

    pub async fn process_voice_query(
        &self,
        query: &str,
        user_context: &Value,
    ) -> Result<String, CompletionError> {
        let prompt = format!(
            "The farmer asks: \"{}\"\n\n\
             Farmer context:\n{}\n\n\
             Provide a helpful, natural-sounding response that addresses the farmer's query. \
             Use simple language and provide practical advice when appropriate.",
            query,
            pretty(user_context)
        );

        let answer = self.ask(VOICE_SYSTEM_PROMPT, &prompt, None).await?;
        Ok(or_fallback(answer, NO_ANSWER))
    }
}

fn crop_prompt(conditions: &CropConditions) -> String {
    let mut prompt = format!(
        "Based on the following farm conditions, recommend suitable crops to grow:\n\n\
         Location: {}\n",
        conditions.location
    );
    if let Some(soil_type) = &conditions.soil_type {
        prompt.push_str(&format!("Soil Type: {}\n", soil_type));
    }
    if let Some(soil_ph) = conditions.soil_ph {
        prompt.push_str(&format!("Soil pH: {}\n", soil_ph));
    }
    if let Some(soil_moisture) = conditions.soil_moisture {
        prompt.push_str(&format!("Soil Moisture: {}%\n", soil_moisture));
    }
    if let Some(temperature) = conditions.temperature {
        prompt.push_str(&format!("Average Temperature: {}°C\n", temperature));
    }
    if let Some(season) = &conditions.season {
        prompt.push_str(&format!("Current Season: {}\n", season));
    }
    prompt.push_str(
        "\nProvide recommendations for 3 crops that would grow well in these conditions. For \
         each crop, include the crop name, a recommended variety, a brief reason why it's \
         suitable, and a match percentage (between 70-100).\n\
         Format your response as JSON with this structure:\n\
         [\n  {\n    \"cropName\": \"crop name\",\n    \"variety\": \"specific variety\",\n    \
         \"reason\": \"brief explanation of why this crop is a good fit\",\n    \
         \"matchPercentage\": match percentage as a number\n  }\n]",
    );
    prompt
}

/// The suggestion array: the value itself, or the first array-valued field of an object.
fn suggestion_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(fields) => fields.values().find_map(Value::as_array),
        _ => None,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn or_fallback(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use futures::future;
    use futures::FutureExt;
    use serde_json::json;

    use crate::advisor::CompletionFuture;

    /// Answers every request with a fixed reply and keeps the requests it saw.
    #[derive(Clone)]
    struct CannedClient {
        reply: Result<String, CompletionError>,
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl CannedClient {
        fn new(reply: Result<&str, CompletionError>) -> Self {
            Self {
                reply: reply.map(String::from),
                requests: Arc::new(Mutex::new(vec![])),
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().expect("poisoned").clone()
        }
    }

    impl CompletionClient for CannedClient {
        fn complete(&self, request: CompletionRequest) -> CompletionFuture {
            self.requests.lock().expect("poisoned").push(request);
            future::ready(self.reply.clone()).boxed()
        }

        fn cloned_box(&self) -> Box<dyn CompletionClient> {
            Box::new(self.clone())
        }
    }

    fn conditions() -> CropConditions {
        CropConditions {
            location: "Barabanki".to_string(),
            soil_type: Some("loamy".to_string()),
            soil_ph: Some(6.5),
            season: Some("kharif".to_string()),
            ..Default::default()
        }
    }

    #[actix_rt::test]
    async fn test_crop_recommendations_from_wrapped_array() {
        let client = CannedClient::new(Ok(r#"{"recommendations": [
            {"cropName": "Rice", "variety": "Pusa Basmati 1121", "reason": "Monsoon rains",
             "matchPercentage": 92},
            {"variety": "nameless"},
            {"cropName": "Maize", "matchPercentage": 84.6}
        ]}"#));
        let advisor = Advisor::new(Box::new(client.clone()), "gpt-4o");

        let suggestions = advisor
            .generate_crop_recommendations(&conditions())
            .await
            .expect("Failed to generate recommendations");

        assert_eq!(
            suggestions,
            vec![
                CropSuggestion {
                    crop_name: "Rice".to_string(),
                    variety: Some("Pusa Basmati 1121".to_string()),
                    reason: Some("Monsoon rains".to_string()),
                    match_percentage: Some(92),
                },
                CropSuggestion {
                    crop_name: "Maize".to_string(),
                    variety: None,
                    reason: None,
                    match_percentage: Some(85),
                },
            ]
        );

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].response_format, Some(ResponseFormat::json_object()));
        assert_eq!(requests[0].messages[0].content, CROP_SYSTEM_PROMPT);
        let prompt = &requests[0].messages[1].content;
        assert!(prompt.contains("Location: Barabanki\n"));
        assert!(prompt.contains("Soil pH: 6.5\n"));
        assert!(!prompt.contains("Soil Moisture"));
    }

    #[actix_rt::test]
    async fn test_crop_recommendations_without_list_is_empty() {
        let advisor = Advisor::new(Box::new(CannedClient::new(Ok(r#"{"note": "none"}"#))), "m");
        let suggestions = advisor
            .generate_crop_recommendations(&conditions())
            .await
            .expect("Failed to generate recommendations");
        assert!(suggestions.is_empty());

        let advisor = Advisor::new(Box::new(CannedClient::new(Ok(""))), "m");
        assert!(advisor
            .generate_crop_recommendations(&conditions())
            .await
            .is_err());
    }

    #[actix_rt::test]
    async fn test_text_answers_fall_back_when_empty() {
        let advisor = Advisor::new(Box::new(CannedClient::new(Ok("  "))), "m");

        assert_eq!(
            advisor
                .generate_farming_advice("Wheat", "tillering", &[])
                .await,
            Ok(NO_ADVICE.to_string())
        );
        assert_eq!(
            advisor
                .analyze_weather_impact("Wheat", &json!({ "rainfall": 12 }))
                .await,
            Ok(NO_ANALYSIS.to_string())
        );
        assert_eq!(
            advisor.process_voice_query("When to sow?", &json!({})).await,
            Ok(NO_ANSWER.to_string())
        );
    }

    #[actix_rt::test]
    async fn test_provider_error_propagates() {
        let error = CompletionError::new(401, "Incorrect API key provided");
        let advisor = Advisor::new(Box::new(CannedClient::new(Err(error.clone()))), "m");

        assert_eq!(
            advisor
                .generate_farming_advice("Wheat", "tillering", &["aphids".to_string()])
                .await,
            Err(error)
        );
    }
}
