//! Typed request schemas for marina operations.
//!
//! These are decoded at the API boundary. Optional fields use
//! [`present`] so that an explicit `null` is a type error rather than
//! "not provided"; unknown fields are ignored.

use crate::model::boat::BoatValidationError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Body of `POST /boats` and `PUT /boats/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBoat {
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub length: Option<f64>,
}

impl NewBoat {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            length: None,
        }
    }
}

/// Body of `PATCH /boats/{id}`; only provided fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BoatPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub length: Option<f64>,
}

/// Body of `POST /slips` and `PUT /slips/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewSlip {
    pub number: i64,
}

/// Body of `PATCH /slips/{id}`; occupancy is not writable here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SlipPatch {
    #[serde(default, deserialize_with = "present")]
    pub number: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub arrival_date: Option<String>,
}

/// Body of `PUT /slips/{id}/boat`.
///
/// Fields are not type-checked at decode time: a missing or wrong-typed
/// field is reported only after the slip itself has been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DockRequest {
    #[serde(default, deserialize_with = "present")]
    pub boat: Option<DockField>,
    #[serde(default, deserialize_with = "present")]
    pub date: Option<DockField>,
}

impl DockRequest {
    pub fn new(boat: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            boat: Some(DockField::Text(boat.into())),
            date: Some(DockField::Text(date.into())),
        }
    }
}

/// A dock field as received: text, or any other JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockField {
    Text(String),
    Mistyped,
}

impl DockField {
    /// Returns the text of a required field named `field`.
    pub fn require(value: Option<Self>, field: &'static str) -> Result<String, ValidationError> {
        match value {
            Some(Self::Text(text)) => Ok(text),
            Some(Self::Mistyped) => Err(ValidationError::WrongType {
                field,
                expected: "string",
            }),
            None => Err(ValidationError::MissingField(field)),
        }
    }
}

impl From<&str> for DockField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DockField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<'de> Deserialize<'de> for DockField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Received {
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Received::deserialize(deserializer)? {
            Received::Text(text) => Self::Text(text),
            Received::Other(_) => Self::Mistyped,
        })
    }
}

/// Request input that cannot be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field absent from the request.
    MissingField(&'static str),
    /// Body is not valid JSON or a field has the wrong type.
    Malformed(String),
    /// A field is present but holds the wrong kind of JSON value.
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    Boat(BoatValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::Malformed(details) => write!(f, "malformed request: {details}"),
            Self::WrongType { field, expected } => {
                write!(f, "field `{field}` must be a {expected}")
            }
            Self::Boat(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Boat(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoatValidationError> for ValidationError {
    fn from(value: BoatValidationError) -> Self {
        Self::Boat(value)
    }
}

/// Deserializes a field that, when present, must hold a non-null `T`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
