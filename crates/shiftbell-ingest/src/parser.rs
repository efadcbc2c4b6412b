// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule document parsing.
//!
//! Walks the JSON value by hand so a failure can name the exact field that
//! broke, e.g. `shifts[2].date`. Fields other than `shifts`, `date` and
//! `shift` are ignored. Dates are validated here, before anything reaches the
//! store.

use serde_json::Value;
use shiftbell_core::date::parse_date;
use shiftbell_core::{ScheduleDocument, ShiftEntry, ShiftbellError};

/// Parse raw bytes into a [`ScheduleDocument`].
pub fn parse_document(bytes: &[u8]) -> Result<ScheduleDocument, ShiftbellError> {
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|e| ShiftbellError::parse("$", format!("invalid JSON: {e}")))?;
    parse_value(&root)
}

/// Parse an already-decoded JSON value into a [`ScheduleDocument`].
pub fn parse_value(root: &Value) -> Result<ScheduleDocument, ShiftbellError> {
    let object = root
        .as_object()
        .ok_or_else(|| {
            ShiftbellError::parse("$", format!("expected an object, found {}", kind(root)))
        })?;

    let shifts = object
        .get("shifts")
        .ok_or_else(|| ShiftbellError::parse("shifts", "missing required key"))?;
    let items = shifts
        .as_array()
        .ok_or_else(|| {
            ShiftbellError::parse("shifts", format!("expected an array, found {}", kind(shifts)))
        })?;

    let shifts = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScheduleDocument { shifts })
}

fn parse_entry(index: usize, item: &Value) -> Result<ShiftEntry, ShiftbellError> {
    let path = format!("shifts[{index}]");
    let object = item
        .as_object()
        .ok_or_else(|| {
            ShiftbellError::parse(&path, format!("expected an object, found {}", kind(item)))
        })?;

    let raw_date = string_field(object, &path, "date")?;
    let date = parse_date(raw_date).map_err(|e| {
        ShiftbellError::parse(
            format!("{path}.date"),
            format!("`{raw_date}` is not a YYYY-MM-DD date: {e}"),
        )
    })?;
    let label = string_field(object, &path, "shift")?;

    Ok(ShiftEntry::new(date, label))
}

fn string_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    parent: &str,
    name: &str,
) -> Result<&'a str, ShiftbellError> {
    let path = format!("{parent}.{name}");
    match object.get(name) {
        None => Err(ShiftbellError::parse(path, "missing required key")),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ShiftbellError::parse(
            path,
            format!("expected a string, found {}", kind(other)),
        )),
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
