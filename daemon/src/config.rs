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

use std::env;

use log::LevelFilter;

use crate::error::ConfigurationError;

const DEFAULT_BIND: &str = "localhost:8080";
const DEFAULT_DATABASE_URL: &str = "memory";
const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct DaemonConfig {
    rest_api_endpoint: String,
    database_url: String,
    seed_demo_data: bool,
    ai_api_key: Option<String>,
    ai_base_url: String,
    ai_model: String,
    log_level: LevelFilter,
}

impl DaemonConfig {
    pub fn rest_api_endpoint(&self) -> &str {
        &self.rest_api_endpoint
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }

    /// The completion API key; the AI routes are disabled when this is `None`.
    pub fn ai_api_key(&self) -> Option<&str> {
        self.ai_api_key.as_deref()
    }

    pub fn ai_base_url(&self) -> &str {
        &self.ai_base_url
    }

    pub fn ai_model(&self) -> &str {
        &self.ai_model
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

pub struct DaemonConfigBuilder {
    rest_api_endpoint: Option<String>,
    database_url: Option<String>,
    seed_demo_data: bool,
    ai_api_key: Option<String>,
    ai_base_url: Option<String>,
    ai_model: Option<String>,
    log_level: Option<LevelFilter>,
}

impl Default for DaemonConfigBuilder {
    fn default() -> Self {
        Self {
            rest_api_endpoint: Some(DEFAULT_BIND.to_owned()),
            database_url: Some(DEFAULT_DATABASE_URL.to_owned()),
            seed_demo_data: false,
            ai_api_key: None,
            ai_base_url: Some(agrosakhi_sdk::advisor::DEFAULT_BASE_URL.to_owned()),
            ai_model: Some(agrosakhi_sdk::advisor::DEFAULT_MODEL.to_owned()),
            log_level: Some(LevelFilter::Warn),
        }
    }
}

impl DaemonConfigBuilder {
    /// Picks the API key up from `OPENAI_API_KEY` unless one is already set.
    pub fn with_env(mut self) -> Self {
        if self.ai_api_key.is_none() {
            self.ai_api_key = env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
        }
        self
    }

    pub fn with_cli_args(&mut self, matches: &clap::ArgMatches<'_>) -> Self {
        Self {
            rest_api_endpoint: matches
                .value_of("bind")
                .map(ToOwned::to_owned)
                .or_else(|| self.rest_api_endpoint.take()),
            database_url: matches
                .value_of("connect")
                .map(ToOwned::to_owned)
                .or_else(|| self.database_url.take()),
            seed_demo_data: matches.is_present("seed_demo_data") || self.seed_demo_data,
            ai_api_key: matches
                .value_of("ai_api_key")
                .map(ToOwned::to_owned)
                .or_else(|| self.ai_api_key.take()),
            ai_base_url: matches
                .value_of("ai_base_url")
                .map(ToOwned::to_owned)
                .or_else(|| self.ai_base_url.take()),
            ai_model: matches
                .value_of("ai_model")
                .map(ToOwned::to_owned)
                .or_else(|| self.ai_model.take()),
            log_level: (match matches.occurrences_of("verbose") {
                0 => None,
                1 => Some(LevelFilter::Info),
                2 => Some(LevelFilter::Debug),
                _ => Some(LevelFilter::Trace),
            })
            .or_else(|| self.log_level.take()),
        }
    }

    pub fn build(mut self) -> Result<DaemonConfig, ConfigurationError> {
        Ok(DaemonConfig {
            rest_api_endpoint: self
                .rest_api_endpoint
                .take()
                .ok_or_else(|| ConfigurationError::MissingValue("rest_api_endpoint".to_owned()))?,
            database_url: self
                .database_url
                .take()
                .ok_or_else(|| ConfigurationError::MissingValue("database_url".to_owned()))?,
            seed_demo_data: self.seed_demo_data,
            ai_api_key: self.ai_api_key.take(),
            ai_base_url: self
                .ai_base_url
                .take()
                .ok_or_else(|| ConfigurationError::MissingValue("ai_base_url".to_owned()))?,
            ai_model: self
                .ai_model
                .take()
                .ok_or_else(|| ConfigurationError::MissingValue("ai_model".to_owned()))?,
            log_level: self
                .log_level
                .take()
                .ok_or_else(|| ConfigurationError::MissingValue("log_level".to_owned()))?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_app() -> clap::App<'static, 'static> {
        clap::App::new("testapp")
            .arg(clap::Arg::with_name("bind").short("b").takes_value(true))
            .arg(clap::Arg::with_name("connect").short("C").takes_value(true))
            .arg(clap::Arg::with_name("verbose").short("v").multiple(true))
            .arg(clap::Arg::with_name("seed_demo_data").long("seed-demo-data"))
            .arg(
                clap::Arg::with_name("ai_api_key")
                    .long("ai-api-key")
                    .takes_value(true),
            )
    }

    #[test]
    fn build_with_args() {
        let matches = test_app().get_matches_from(vec![
            "testapp",
            "-b",
            "0.0.0.0:9000",
            "-C",
            "agrosakhi.db",
            "-vv",
            "--seed-demo-data",
            "--ai-api-key",
            "sk-test",
        ]);

        let config = DaemonConfigBuilder::default()
            .with_cli_args(&matches)
            .build()
            .expect("Unable to build configuration");

        assert_eq!("0.0.0.0:9000", config.rest_api_endpoint());
        assert_eq!("agrosakhi.db", config.database_url());
        assert!(config.seed_demo_data());
        assert_eq!(Some("sk-test"), config.ai_api_key());
        assert_eq!(LevelFilter::Debug, config.log_level());
    }

    #[test]
    fn build_with_missing_args() {
        let matches = test_app().get_matches_from(vec!["testapp"]);

        let config = DaemonConfigBuilder::default()
            .with_cli_args(&matches)
            .build()
            .expect("Unable to build configuration");

        assert_eq!("localhost:8080", config.rest_api_endpoint());
        assert_eq!("memory", config.database_url());
        assert!(!config.seed_demo_data());
        assert_eq!("gpt-4o", config.ai_model());
        assert_eq!(LevelFilter::Warn, config.log_level());
    }

    #[test]
    fn build_without_bind_address() {
        let matches = test_app().get_matches_from(vec!["testapp"]);

        let mut builder = DaemonConfigBuilder::default();
        builder.rest_api_endpoint = None;

        let result = builder.with_cli_args(&matches).build();
        assert_eq!(
            result.err(),
            Some(ConfigurationError::MissingValue(
                "rest_api_endpoint".to_owned()
            ))
        );
    }
}
