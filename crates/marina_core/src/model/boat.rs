//! Boat domain model.
//!
//! # Invariants
//! - `name` is never blank.
//! - `length`, when set, is a finite non-negative number.
//! - `at_sea == false` iff exactly one slip names this boat as occupant.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a boat.
pub type BoatId = Uuid;

/// A boat registered with the marina.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    pub id: BoatId,
    pub name: String,
    /// Serialized as `type` to match the wire schema.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub length: Option<f64>,
    pub at_sea: bool,
}

/// Field-level validation failures for [`Boat`].
#[derive(Debug, Clone, PartialEq)]
pub enum BoatValidationError {
    BlankName,
    InvalidLength(f64),
}

impl Display for BoatValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "boat name must not be blank"),
            Self::InvalidLength(value) => {
                write!(f, "boat length must be a non-negative number, got {value}")
            }
        }
    }
}

impl Error for BoatValidationError {}

impl Boat {
    /// Creates a boat at sea with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a boat at sea with a caller-provided id.
    pub fn with_id(id: BoatId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: None,
            length: None,
            at_sea: true,
        }
    }

    pub fn validate(&self) -> Result<(), BoatValidationError> {
        if self.name.trim().is_empty() {
            return Err(BoatValidationError::BlankName);
        }
        if let Some(length) = self.length {
            if !length.is_finite() || length < 0.0 {
                return Err(BoatValidationError::InvalidLength(length));
            }
        }
        Ok(())
    }

    pub fn is_docked(&self) -> bool {
        !self.at_sea
    }

    /// Marks the boat as tied up in a slip.
    pub fn moor(&mut self) {
        self.at_sea = false;
    }

    /// Marks the boat as back at sea.
    pub fn put_to_sea(&mut self) {
        self.at_sea = true;
    }

    /// Canonical relative path of this boat resource.
    pub fn self_link(&self) -> String {
        format!("/boats/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Boat, BoatValidationError};

    #[test]
    fn new_boat_starts_at_sea_without_optionals() {
        let boat = Boat::new("Orca");
        assert!(boat.at_sea);
        assert!(boat.kind.is_none());
        assert!(boat.length.is_none());
        assert_eq!(boat.self_link(), format!("/boats/{}", boat.id));
    }

    #[test]
    fn validate_rejects_blank_name_and_negative_length() {
        let blank = Boat::new("   ");
        assert_eq!(blank.validate(), Err(BoatValidationError::BlankName));

        let mut short = Boat::new("Dinghy");
        short.length = Some(-1.0);
        assert!(matches!(
            short.validate(),
            Err(BoatValidationError::InvalidLength(_))
        ));

        short.length = Some(f64::NAN);
        assert!(short.validate().is_err());
    }

    #[test]
    fn serializes_kind_as_type_and_keeps_null_optionals() {
        let boat = Boat::new("Orca");
        let json = serde_json::to_value(&boat).unwrap();
        assert_eq!(json["type"], serde_json::Value::Null);
        assert_eq!(json["length"], serde_json::Value::Null);
        assert_eq!(json["at_sea"], true);
        assert!(json.get("kind").is_none());
    }
}
