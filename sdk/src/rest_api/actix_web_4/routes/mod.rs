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

pub(in crate::rest_api) mod advisor;
pub(in crate::rest_api) mod crops;
pub(in crate::rest_api) mod devices;
pub(in crate::rest_api) mod farms;
pub(in crate::rest_api) mod learning;
pub(in crate::rest_api) mod marketplace;
pub(in crate::rest_api) mod recommendations;
pub(in crate::rest_api) mod tasks;
pub(in crate::rest_api) mod users;
pub(in crate::rest_api) mod weather;

use actix_web_4::{http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::rest_api::resources::error::ErrorResponse;

/// Renders a handler result, answering `success` with the serialized value or the error's own
/// status with the error body.
pub(in crate::rest_api) fn respond<T: Serialize>(
    success: StatusCode,
    result: Result<T, ErrorResponse>,
) -> HttpResponse {
    match result {
        Ok(res) => HttpResponse::build(success).json(res),
        Err(err) => error_response(err),
    }
}

pub(in crate::rest_api) fn error_response(err: ErrorResponse) -> HttpResponse {
    HttpResponse::build(
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .json(err)
}
