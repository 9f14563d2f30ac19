/*
 * Copyright 2019 Bitwise IO, Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

mod config;
mod error;

use std::sync::Arc;

use agrosakhi_sdk::advisor::{Advisor, ReqwestCompletionClient};
use agrosakhi_sdk::rest_api::actix_web_4::{self, AdvisorState, StoreState};
use agrosakhi_sdk::seed::{seed_demo_data, SeedError};
use agrosakhi_sdk::store::{create_store_factory, ConnectionUri};
use flexi_logger::{LogSpecBuilder, Logger};

use crate::config::{DaemonConfig, DaemonConfigBuilder};
use crate::error::DaemonError;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn run() -> Result<(), DaemonError> {
    let matches = clap_app!(myapp =>
        (name: APP_NAME)
        (version: VERSION)
        (author: "Contributors to AgroSakhi")
        (about: "Daemon Package for the AgroSakhi farm-management service")
        (@arg connect: -C --connect +takes_value
         "database URL: memory, a SQLite file path or a postgres:// URL")
        (@arg verbose: -v +multiple "Log verbosely")
        (@arg bind: -b --bind +takes_value "connection endpoint for rest API")
        (@arg seed_demo_data: --("seed-demo-data") "populate the database with demo data")
        (@arg ai_api_key: --("ai-api-key") +takes_value
         "API key for the completion service; defaults to OPENAI_API_KEY")
        (@arg ai_base_url: --("ai-base-url") +takes_value "base URL of the completion service")
        (@arg ai_model: --("ai-model") +takes_value "model used for completions"))
    .get_matches();

    let config = DaemonConfigBuilder::default()
        .with_cli_args(&matches)
        .with_env()
        .build()?;

    let mut log_spec_builder = LogSpecBuilder::new();
    log_spec_builder.default(config.log_level());
    log_spec_builder.module("hyper", log::LevelFilter::Warn);
    log_spec_builder.module("tokio", log::LevelFilter::Warn);
    log_spec_builder.module("mio", log::LevelFilter::Warn);

    Logger::with(log_spec_builder.build()).start()?;

    let connection_uri: ConnectionUri = config
        .database_url()
        .parse()
        .map_err(|err| DaemonError::StartUpError(Box::new(err)))?;

    let store_factory = create_store_factory(&connection_uri)
        .map_err(|err| DaemonError::StartUpError(Box::new(err)))?;

    if config.seed_demo_data() {
        match seed_demo_data(&*store_factory) {
            Err(SeedError::AlreadySeeded) => {
                warn!("Demo data is already present; skipping seeding")
            }
            res => res?,
        }
    }

    let store_state = StoreState::new(Arc::from(store_factory));
    let advisor_state = AdvisorState::new(build_advisor(&config)?);

    actix_rt::System::new().block_on(actix_web_4::run(
        config.rest_api_endpoint(),
        store_state,
        advisor_state,
    ))?;

    Ok(())
}

fn build_advisor(config: &DaemonConfig) -> Result<Option<Advisor>, DaemonError> {
    match config.ai_api_key() {
        Some(api_key) => {
            let client = ReqwestCompletionClient::new(config.ai_base_url(), api_key.to_string())
                .map_err(|err| DaemonError::StartUpError(Box::new(err)))?;
            Ok(Some(Advisor::new(Box::new(client), config.ai_model())))
        }
        None => {
            warn!("No completion API key configured; AI routes will answer 503");
            Ok(None)
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
