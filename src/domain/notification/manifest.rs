#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestDirection {
    Load,
    Unload,
}

impl ManifestDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Unload => "unload",
        }
    }
}

impl fmt::Display for ManifestDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ManifestDirection {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, String> {
        match s {
            "load" => Ok(Self::Load),
            "unload" => Ok(Self::Unload),
            _ => Err(format!("Unknown manifest direction: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestLine {
    pub container_id: String,
    pub source_storage_area: Option<String>,
    pub target_storage_area: Option<String>,
}

impl ManifestLine {
    #[must_use]
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            source_storage_area: None,
            target_storage_area: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoManifest {
    direction: ManifestDirection,
    lines: Vec<ManifestLine>,
}

impl CargoManifest {
    #[must_use]
    pub const fn new(direction: ManifestDirection, lines: Vec<ManifestLine>) -> Self {
        Self { direction, lines }
    }

    #[must_use]
    pub const fn direction(&self) -> ManifestDirection {
        self.direction
    }

    #[must_use]
    pub fn lines(&self) -> &[ManifestLine] {
        &self.lines
    }
}
