//! Output formats negotiated at session start.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Shape used to render every result in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raw structured JSON: columns plus row arrays.
    #[serde(alias = "table")]
    Raw,
    /// JSON array of flattened row objects.
    Objects,
    /// Human-readable tabular text.
    #[default]
    Pretty,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Objects => "objects",
            OutputFormat::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" | "table" => Ok(OutputFormat::Raw),
            "objects" => Ok(OutputFormat::Objects),
            "pretty" => Ok(OutputFormat::Pretty),
            _ => Err(CoreError::UnknownFormat { name: s.to_string() }),
        }
    }
}
