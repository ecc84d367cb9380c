//! Startup seed data
//!
//! The bundled `data/seed.json` provides the initial catalog and the admin
//! user list. `SEED_PATH` points at a replacement file with the same shape.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::model::{Property, User};

const BUNDLED_SEED: &str = include_str!("../data/seed.json");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid seed property {id}: {reason}")]
    InvalidProperty { id: String, reason: &'static str },
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default)]
    pub users: Vec<User>,
}

impl Seed {
    /// The seed compiled into the binary
    pub fn bundled() -> Result<Self, SeedError> {
        Self::parse(BUNDLED_SEED)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&raw)
    }

    /// Loads `path` when given, the bundled seed otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, SeedError> {
        let seed: Seed = serde_json::from_str(raw)?;
        for property in &seed.properties {
            check_property(property)?;
        }
        Ok(seed)
    }
}

fn check_property(property: &Property) -> Result<(), SeedError> {
    let reason = if property.id.is_empty() {
        Some("empty id")
    } else if property.title.trim().is_empty() {
        Some("empty title")
    } else if !property.price.is_finite() || property.price < 0.0 {
        Some("price must be a finite, non-negative number")
    } else if !property.rating.is_finite() || property.rating < 0.0 {
        Some("rating must be a finite, non-negative number")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SeedError::InvalidProperty {
            id: property.id.clone(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_seed_is_valid() {
        let seed = Seed::bundled().expect("bundled seed parses");

        assert!(!seed.properties.is_empty());
        assert!(!seed.users.is_empty());
        assert!(seed.properties.iter().any(|p| p.featured));
    }

    #[test]
    fn negative_price_is_rejected() {
        let raw = r#"{
            "properties": [{
                "id": "x", "title": "Broken", "location": "Martil",
                "price": -5, "bedrooms": 1, "bathrooms": 1, "capacity": 2
            }]
        }"#;

        let err = Seed::parse(raw).unwrap_err();

        assert!(matches!(err, SeedError::InvalidProperty { ref id, .. } if id == "x"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Seed::from_path(Path::new("/nonexistent/seed.json")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/seed.json"));
    }
}
