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

//! Field-by-field validation of JSON request bodies.
//!
//! A [`PayloadValidator`] reads fields out of a JSON object and records a [`FieldError`] for
//! every field that is missing or has the wrong shape, so a client learns about all of its
//! mistakes at once. Required accessors hand back a placeholder for a bad field; the values
//! read are only meaningful once [`PayloadValidator::finish`] has returned `Ok`.

use std::error;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde_json::{Map, Value};

use crate::error::InvalidArgumentError;

const BODY_FIELD: &str = "body";

/// Implemented by request payloads that are read out of a JSON body.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self, ValidationError>;
}

/// A problem with one field of a request body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Returned when a request body fails validation; carries every field error found.
#[derive(Debug, PartialEq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_field_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Invalid request body")
    }
}

pub struct PayloadValidator<'a> {
    fields: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

impl<'a> PayloadValidator<'a> {
    pub fn new(value: &'a Value) -> Self {
        let mut errors = vec![];
        let fields = value.as_object();
        if fields.is_none() {
            errors.push(FieldError::new(BODY_FIELD, "must be a JSON object"));
        }

        Self { fields, errors }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }

    pub fn required_string(&mut self, field: &str) -> String {
        self.string(field, true).unwrap_or_default()
    }

    /// Like `required_string`, but a blank string is also rejected.
    pub fn required_non_empty(&mut self, field: &str) -> String {
        let value = self.required_string(field);
        if self.fields.is_some() && !self.has_error(field) && value.trim().is_empty() {
            self.reject(field, "must not be empty");
        }
        value
    }

    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        self.string(field, false)
    }

    pub fn required_integer(&mut self, field: &str) -> i64 {
        self.integer(field, true).unwrap_or_default()
    }

    pub fn optional_integer(&mut self, field: &str) -> Option<i64> {
        self.integer(field, false)
    }

    /// Reads an optional integer that must fit in 32 bits.
    pub fn optional_i32(&mut self, field: &str) -> Option<i32> {
        self.bounded(field, false, i64::from(i32::MIN), i64::from(i32::MAX))
    }

    /// Reads a required integer in `min..=max`.
    pub fn required_in_range(&mut self, field: &str, min: i32, max: i32) -> i32 {
        self.bounded(field, true, i64::from(min), i64::from(max))
            .unwrap_or_default()
    }

    /// Reads an optional integer in `min..=max`.
    pub fn optional_in_range(&mut self, field: &str, min: i32, max: i32) -> Option<i32> {
        self.bounded(field, false, i64::from(min), i64::from(max))
    }

    pub fn required_number(&mut self, field: &str) -> f64 {
        self.number(field, true).unwrap_or_default()
    }

    pub fn optional_number(&mut self, field: &str) -> Option<f64> {
        self.number(field, false)
    }

    pub fn required_bool(&mut self, field: &str) -> bool {
        self.boolean(field, true).unwrap_or_default()
    }

    pub fn optional_bool(&mut self, field: &str) -> Option<bool> {
        self.boolean(field, false)
    }

    pub fn required_enum<T>(&mut self, field: &str) -> T
    where
        T: FromStr<Err = InvalidArgumentError> + Default,
    {
        self.enumeration(field, true).unwrap_or_default()
    }

    pub fn optional_enum<T>(&mut self, field: &str) -> Option<T>
    where
        T: FromStr<Err = InvalidArgumentError>,
    {
        self.enumeration(field, false)
    }

    pub fn optional_timestamp(&mut self, field: &str) -> Option<NaiveDateTime> {
        let raw = self.string_for(field, false, "must be a timestamp")?;
        match parse_timestamp(&raw) {
            Some(timestamp) => Some(timestamp),
            None => {
                self.reject(field, "must be an RFC 3339 timestamp or a YYYY-MM-DD date");
                None
            }
        }
    }

    /// Reads a required date. Timestamps are accepted and their date part kept.
    pub fn required_date(&mut self, field: &str) -> NaiveDate {
        let raw = match self.string_for(field, true, "must be a date") {
            Some(raw) => raw,
            None => return NaiveDate::MIN,
        };
        match parse_date(&raw) {
            Some(date) => date,
            None => {
                self.reject(field, "must be a YYYY-MM-DD date or an RFC 3339 timestamp");
                NaiveDate::MIN
            }
        }
    }

    /// Reads any JSON value. A `null` reads as absent.
    pub fn optional_json(&mut self, field: &str) -> Option<Value> {
        self.lookup(field, false).cloned()
    }

    pub fn required_json(&mut self, field: &str) -> Value {
        self.lookup(field, true).cloned().unwrap_or(Value::Null)
    }

    /// Reads an optional array of strings; an absent field reads as empty.
    pub fn optional_string_list(&mut self, field: &str) -> Vec<String> {
        let value = match self.lookup(field, false) {
            Some(value) => value,
            None => return vec![],
        };
        let items = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
        });
        match items {
            Some(items) => items,
            None => {
                self.reject(field, "must be an array of strings");
                vec![]
            }
        }
    }

    fn lookup(&mut self, field: &str, required: bool) -> Option<&'a Value> {
        let fields = self.fields?;
        match fields.get(field) {
            Some(Value::Null) | None => {
                if required {
                    self.reject(field, "is required");
                }
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &str, required: bool) -> Option<String> {
        self.string_for(field, required, "must be a string")
    }

    fn string_for(&mut self, field: &str, required: bool, message: &str) -> Option<String> {
        match self.lookup(field, required)? {
            Value::String(value) => Some(value.clone()),
            _ => {
                self.reject(field, message);
                None
            }
        }
    }

    fn integer(&mut self, field: &str, required: bool) -> Option<i64> {
        let value = self.lookup(field, required)?;
        match value.as_i64() {
            Some(value) => Some(value),
            None => {
                self.reject(field, "must be an integer");
                None
            }
        }
    }

    fn bounded(&mut self, field: &str, required: bool, min: i64, max: i64) -> Option<i32> {
        let value = self.integer(field, required)?;
        if value < min || value > max {
            self.reject(field, &format!("must be between {} and {}", min, max));
            return None;
        }
        // the range check above keeps the value within i32
        Some(value as i32)
    }

    fn number(&mut self, field: &str, required: bool) -> Option<f64> {
        let value = self.lookup(field, required)?;
        match value.as_f64() {
            Some(value) => Some(value),
            None => {
                self.reject(field, "must be a number");
                None
            }
        }
    }

    fn boolean(&mut self, field: &str, required: bool) -> Option<bool> {
        let value = self.lookup(field, required)?;
        match value.as_bool() {
            Some(value) => Some(value),
            None => {
                self.reject(field, "must be a boolean");
                None
            }
        }
    }

    fn enumeration<T>(&mut self, field: &str, required: bool) -> Option<T>
    where
        T: FromStr<Err = InvalidArgumentError>,
    {
        let raw = self.string(field, required)?;
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                self.reject(field, err.message());
                None
            }
        }
    }

    fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }

    fn reject(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }
}

/// Parses an RFC 3339 timestamp, a zone-less `YYYY-MM-DDTHH:MM:SS[.f]` timestamp (read as UTC)
/// or a `YYYY-MM-DD` date (midnight UTC). The result is truncated to whole microseconds.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let timestamp = DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    timestamp.with_nanosecond(timestamp.nanosecond() / 1_000 * 1_000)
}

/// Parses a `YYYY-MM-DD` date or the date part of any form `parse_timestamp` accepts.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(value).map(|timestamp| timestamp.date()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::devices::store::DeviceStatus;

    #[test]
    fn test_reads_valid_fields() {
        let body = json!({
            "name": "Field 1",
            "userId": 3,
            "size": 2,
            "batteryLevel": 85,
            "isOrganic": true,
            "status": "low_signal",
            "note": null,
        });
        let mut validator = PayloadValidator::new(&body);

        assert_eq!(validator.required_non_empty("name"), "Field 1");
        assert_eq!(validator.required_integer("userId"), 3);
        assert_eq!(validator.optional_number("size"), Some(2.0));
        assert_eq!(validator.optional_in_range("batteryLevel", 0, 100), Some(85));
        assert_eq!(validator.optional_bool("isOrganic"), Some(true));
        assert_eq!(
            validator.required_enum::<DeviceStatus>("status"),
            DeviceStatus::LowSignal
        );
        assert_eq!(validator.optional_string("note"), None);
        assert_eq!(validator.optional_string("missing"), None);
        assert!(validator.finish().is_ok());
    }

    #[test]
    fn test_collects_every_field_error() {
        let body = json!({
            "name": "  ",
            "userId": 1.5,
            "batteryLevel": 101,
            "isOrganic": "yes",
            "status": "asleep",
        });
        let mut validator = PayloadValidator::new(&body);

        validator.required_non_empty("name");
        validator.required_integer("userId");
        validator.optional_in_range("batteryLevel", 0, 100);
        validator.optional_bool("isOrganic");
        validator.required_enum::<DeviceStatus>("status");
        validator.required_string("username");

        let err = validator.finish().unwrap_err();
        assert_eq!(
            err.field_errors(),
            &[
                FieldError::new("name", "must not be empty"),
                FieldError::new("userId", "must be an integer"),
                FieldError::new("batteryLevel", "must be between 0 and 100"),
                FieldError::new("isOrganic", "must be a boolean"),
                FieldError::new("status", "unknown device status 'asleep'"),
                FieldError::new("username", "is required"),
            ][..]
        );
    }

    #[test]
    fn test_rejects_non_object_body() {
        let body = json!([1, 2, 3]);
        let mut validator = PayloadValidator::new(&body);
        validator.required_string("username");

        let err = validator.finish().unwrap_err();
        assert_eq!(
            err.field_errors(),
            &[FieldError::new("body", "must be a JSON object")][..]
        );
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|date| date.and_hms_opt(6, 30, 0))
            .expect("valid timestamp");

        assert_eq!(parse_timestamp("2024-06-01T06:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T12:00:00+05:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-06-01T06:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-06-01"),
            NaiveDate::from_ymd_opt(2024, 6, 1).and_then(|date| date.and_hms_opt(0, 0, 0))
        );
        assert_eq!(parse_timestamp("June 1st"), None);
    }

    #[test]
    fn test_parse_timestamp_truncates_to_microseconds() {
        let timestamp = parse_timestamp("2024-06-01T06:30:00.123456789Z").expect("timestamp");
        assert_eq!(timestamp.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_required_date_keeps_date_of_timestamp() {
        let body = json!({ "forecastDate": "2024-07-01T18:00:00Z", "other": "2024-07-02" });
        let mut validator = PayloadValidator::new(&body);

        assert_eq!(
            Some(validator.required_date("forecastDate")),
            NaiveDate::from_ymd_opt(2024, 7, 1)
        );
        assert_eq!(
            Some(validator.required_date("other")),
            NaiveDate::from_ymd_opt(2024, 7, 2)
        );
        assert!(validator.finish().is_ok());
    }
}
