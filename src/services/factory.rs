// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout construction from user input.
//!
//! Validation rules, checked in order:
//! 1. distance, duration and the kind-specific value must be finite
//! 2. distance, duration and (running only) cadence must be positive
//!
//! Cycling elevation gain may be zero or negative.

use serde::Deserialize;

use crate::models::{Coords, UnknownKind, Workout, WorkoutKind};

/// Rejected workout input. Shown to the user as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("{0} must be a positive number")]
    NotPositive(&'static str),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
}

impl ValidationError {
    /// Name of the offending input field, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotFinite(field) | ValidationError::NotPositive(field) => Some(*field),
            ValidationError::UnknownKind(_) => None,
        }
    }
}

/// Name of the kind-specific input for `kind`.
pub fn extra_field(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "cadence",
        WorkoutKind::Cycling => "elevation gain",
    }
}

/// Check numeric input against the workout rules without building anything.
///
/// Also applied to restored records, which must satisfy the same rules.
pub fn validate(
    kind: WorkoutKind,
    distance_km: f64,
    duration_min: f64,
    extra: f64,
) -> Result<(), ValidationError> {
    let extra_name = extra_field(kind);

    for (name, value) in [
        ("distance", distance_km),
        ("duration", duration_min),
        (extra_name, extra),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(name));
        }
    }

    let mut must_be_positive = vec![("distance", distance_km), ("duration", duration_min)];
    if kind == WorkoutKind::Running {
        must_be_positive.push((extra_name, extra));
    }
    if let Some((name, _)) = must_be_positive.into_iter().find(|(_, v)| *v <= 0.0) {
        return Err(ValidationError::NotPositive(name));
    }

    Ok(())
}

/// Validate numeric input and build the matching workout.
///
/// Nothing is constructed unless every rule passes.
pub fn build(
    kind: WorkoutKind,
    coords: Coords,
    distance_km: f64,
    duration_min: f64,
    extra: f64,
) -> Result<Workout, ValidationError> {
    validate(kind, distance_km, duration_min, extra)?;
    Ok(Workout::new(kind, coords, distance_km, duration_min, extra))
}

/// A raw form value: either already a number or the text of an input box.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    /// Numeric conversion of a form input: blank text is 0, `0x`/`0o`/`0b`
    /// prefixed text is an unsigned integer in that radix, anything
    /// unparsable is NaN (and so fails the finiteness rule).
    pub fn to_number(&self) -> f64 {
        match self {
            FormValue::Number(n) => *n,
            FormValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else if let Some((radix, digits)) = radix_prefix(text) {
                    parse_radix(digits, radix)
                } else {
                    text.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }
}

fn radix_prefix(text: &str) -> Option<(u32, &str)> {
    let digits = text.get(2..)?;
    match text.get(..2)? {
        "0x" | "0X" => Some((16, digits)),
        "0o" | "0O" => Some((8, digits)),
        "0b" | "0B" => Some((2, digits)),
        _ => None,
    }
}

/// Accumulated in f64 so long literals lose precision instead of overflowing.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Text(String::new())
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

/// The workout form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub distance: FormValue,
    #[serde(default)]
    pub duration: FormValue,
    #[serde(default)]
    pub cadence: FormValue,
    #[serde(default)]
    pub elevation: FormValue,
}

impl RawFields {
    /// The kind-specific input; the other one is ignored.
    pub fn extra_for(&self, kind: WorkoutKind) -> &FormValue {
        match kind {
            WorkoutKind::Running => &self.cadence,
            WorkoutKind::Cycling => &self.elevation,
        }
    }
}

/// Parse the kind string and form fields, then [`build`].
pub fn build_from_form(
    kind: &str,
    coords: Coords,
    fields: &RawFields,
) -> Result<Workout, ValidationError> {
    let kind: WorkoutKind = kind.parse()?;
    build(
        kind,
        coords,
        fields.distance.to_number(),
        fields.duration.to_number(),
        fields.extra_for(kind).to_number(),
    )
}
