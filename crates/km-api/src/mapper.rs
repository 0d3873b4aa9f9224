//! Normalisation of raw API records into canonical [`Listing`]s.
//!
//! Upstream revisions disagree on key names and value types, so every field
//! goes through a lenient coercion that substitutes a typed default (`""`,
//! `0`, `false`, [`Status::Unknown`]) for anything absent or unusable. A record
//! that cannot be mapped at all is skipped and logged, never surfaced.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::{
    api_interfaces::listing::Record,
    constants::RECORD_WRAPPER_KEYS,
    error::GetError,
    listing::{Listing, Status},
};

/// Reason a single raw record was dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapSkip {
    #[error("record is {0}, not an object")]
    NotAnObject(&'static str),
    #[error("record has no usable id")]
    MissingId,
    #[error("duplicate id `{0}`")]
    DuplicateId(String),
    #[error("record could not be decoded: {0}")]
    Malformed(String),
}

/// Pull the record array out of a listing payload.
///
/// Accepts a bare array or an object wrapping the array under one of
/// [`RECORD_WRAPPER_KEYS`].
pub fn extract_records(payload: Value) -> Result<Vec<Value>, GetError> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => RECORD_WRAPPER_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .ok_or_else(|| {
                GetError::UnexpectedShape(format!(
                    "object without any of the keys {:?}",
                    RECORD_WRAPPER_KEYS
                ))
            }),
        other => Err(GetError::UnexpectedShape(format!(
            "expected an array or object, got {}",
            kind(&other)
        ))),
    }
}

/// Map a single raw record.
pub fn map_record(value: Value) -> Result<Listing, MapSkip> {
    if !value.is_object() {
        return Err(MapSkip::NotAnObject(kind(&value)));
    }
    let record: Record =
        serde_json::from_value(value).map_err(|e| MapSkip::Malformed(e.to_string()))?;
    let id = coerce_string(&record.id).trim().to_string();
    if id.is_empty() {
        return Err(MapSkip::MissingId);
    }
    Ok(Listing {
        id,
        name: coerce_string(first_present(&[&record.name, &record.title])),
        address: coerce_string(first_present(&[
            &record.address,
            &record.location,
            &record.description,
        ])),
        latitude: coerce_f64(&record.latitude),
        longitude: coerce_f64(&record.longitude),
        status: Status::from_upstream(&coerce_string(&record.status)),
        craft_rating: coerce_bool(first_present(&[
            &record.craft_rating,
            &record.craft_rating_camel,
            &record.craft,
        ])),
        in_chain: coerce_bool(first_present(&[&record.in_chain, &record.in_chain_camel])),
    })
}

static NULL: Value = Value::Null;

/// First candidate that is neither null nor an empty string.
fn first_present<'a>(candidates: &[&'a Value]) -> &'a Value {
    candidates
        .iter()
        .copied()
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
        .unwrap_or(&NULL)
}

/// Map every record, dropping the ones that cannot be mapped.
///
/// The first record with a given id wins; later duplicates are dropped so ids
/// stay unique within a snapshot.
pub fn map_records(records: Vec<Value>) -> Vec<Listing> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let mapped = map_record(value).and_then(|listing| {
                if seen.insert(listing.id.clone()) {
                    Ok(listing)
                } else {
                    Err(MapSkip::DuplicateId(listing.id))
                }
            });
            match mapped {
                Ok(listing) => Some(listing),
                Err(reason) => {
                    warn!(index, %reason, "skipping listing record");
                    None
                }
            }
        })
        .collect()
}

pub(crate) fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn coerce_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|x| x.is_finite()).unwrap_or(0.0)
}

pub(crate) fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "t"
        ),
        _ => false,
    }
}

pub(crate) fn coerce_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|x| x as i64))
            .and_then(|x| i32::try_from(x).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Split a `"a, b, c"` upstream list; empty input gives an empty list.
pub(crate) fn split_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(coerce_string)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => coerce_string(value)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
