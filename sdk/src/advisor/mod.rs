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

//! Crop advice from a hosted chat-completion model.
//!
//! A [`CompletionClient`] sends one chat exchange to a completion API and returns the text of
//! the first choice. An [`Advisor`] owns a client and the model name, and turns farm
//! conditions, questions and forecasts into prompts.

mod error;
mod prompts;
mod reqwest;

use std::future::Future;
use std::pin::Pin;

pub use self::error::CompletionError;
pub use self::prompts::{Advisor, CropConditions, CropSuggestion};
pub use self::reqwest::ReqwestCompletionClient;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Future which results in the text of a completion
pub type CompletionFuture =
    Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send>>;

/// Sends chat exchanges to a completion API.
pub trait CompletionClient: Send + Sync + 'static {
    /// Returns the content of the first choice, which may be empty.
    fn complete(&self, request: CompletionRequest) -> CompletionFuture;

    fn cloned_box(&self) -> Box<dyn CompletionClient>;
}

impl Clone for Box<dyn CompletionClient> {
    fn clone(&self) -> Box<dyn CompletionClient> {
        self.cloned_box()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Asks the model to answer with a single JSON object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// The body of a chat completion request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}
