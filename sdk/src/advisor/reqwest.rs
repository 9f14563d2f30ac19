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

use futures::FutureExt;
use reqwest::Client;
use url::Url;

use super::{CompletionClient, CompletionError, CompletionFuture, CompletionRequest};

const COMPLETIONS_PATH: &str = "v1/chat/completions";

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorResponse {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

/// A `CompletionClient` for OpenAI-compatible chat completion APIs.
///
/// Clones share one connection pool.
#[derive(Clone)]
pub struct ReqwestCompletionClient {
    client: Client,
    completions_url: Url,
    api_key: String,
}

impl ReqwestCompletionClient {
    /// Constructs a client for the API rooted at `base_url`, e.g. `https://api.openai.com`.
    pub fn new(base_url: &str, api_key: String) -> Result<Self, CompletionError> {
        let mut base = Url::parse(base_url).map_err(|err| {
            CompletionError::new(500, &format!("Invalid completion API URL: {}", err))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let completions_url = base.join(COMPLETIONS_PATH).map_err(|err| {
            CompletionError::new(500, &format!("Invalid completion API URL: {}", err))
        })?;

        Ok(Self {
            client: Client::new(),
            completions_url,
            api_key,
        })
    }
}

impl CompletionClient for ReqwestCompletionClient {
    fn complete(&self, request: CompletionRequest) -> CompletionFuture {
        let client = self.client.clone();
        let url = self.completions_url.clone();
        let api_key = self.api_key.clone();

        async move {
            let response = client
                .post(url)
                .bearer_auth(api_key)
                .json(&request)
                .send()
                .await
                .map_err(|err| {
                    CompletionError::new(502, &format!("Unable to reach completion API: {}", err))
                })?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(|err| {
                CompletionError::new(502, &format!("Failed to read completion response: {}", err))
            })?;

            if !status.is_success() {
                let message = serde_json::from_slice::<ProviderErrorResponse>(&bytes)
                    .map(|body| body.error.message)
                    .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
                return Err(CompletionError::new(status.as_u16(), &message));
            }

            let body: CompletionResponse = serde_json::from_slice(&bytes).map_err(|err| {
                CompletionError::new(502, &format!("Malformed completion response: {}", err))
            })?;

            Ok(body
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default())
        }
        .boxed()
    }

    fn cloned_box(&self) -> Box<dyn CompletionClient> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::{self, mock, Matcher};
    use serde_json::json;

    use crate::advisor::{ChatMessage, ResponseFormat};

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::user("Will it rain in Barabanki?")],
            response_format: None,
        }
    }

    fn client() -> ReqwestCompletionClient {
        ReqwestCompletionClient::new(&mockito::server_url(), "test-key".to_string())
            .expect("Unable to build client")
    }

    #[test]
    fn test_completions_url() {
        let client = ReqwestCompletionClient::new("http://localhost:9000/proxy", "".to_string())
            .expect("Unable to build client");
        assert_eq!(
            client.completions_url.as_str(),
            "http://localhost:9000/proxy/v1/chat/completions"
        );

        assert!(ReqwestCompletionClient::new("not a url", "".to_string()).is_err());
    }

    #[actix_rt::test]
    /// Validate that the client sends the request with the bearer token and returns the content
    /// of the first choice
    async fn reqwest_completion_client_success() {
        let endpoint = mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o",
                "response_format": { "type": "json_object" },
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "Light showers." } }
                    ]
                })
                .to_string(),
            )
            .create();

        let mut request = request();
        request.response_format = Some(ResponseFormat::json_object());
        let response = client().complete(request).await;

        endpoint.assert();
        assert_eq!(response, Ok("Light showers.".to_string()));
    }

    #[actix_rt::test]
    /// Validate that one client, and its boxed clones, can serve several completions in turn
    async fn reqwest_completion_client_serves_sequential_requests() {
        let endpoint = mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({ "choices": [{ "message": { "content": "Sow after the rain." } }] })
                    .to_string(),
            )
            .expect(3)
            .create();

        let client = client();
        let first = client.complete(request()).await;
        let second = client.complete(request()).await;
        let third = client.cloned_box().complete(request()).await;

        endpoint.assert();
        assert_eq!(first, Ok("Sow after the rain.".to_string()));
        assert_eq!(second, first);
        assert_eq!(third, first);
    }

    #[actix_rt::test]
    /// Validate that a provider error keeps its status and message
    async fn reqwest_completion_client_error() {
        let endpoint = mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(json!({ "error": { "message": "Rate limit reached" } }).to_string())
            .create();

        let response = client().complete(request()).await;

        endpoint.assert();
        assert_eq!(
            response,
            Err(CompletionError::new(429, "Rate limit reached"))
        );
    }
}
