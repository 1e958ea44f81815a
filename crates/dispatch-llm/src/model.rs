//! Model allow-list
//!
//! The models this runner may be pointed at form a closed enumeration.
//! Callers validate against the allow-list before anything is constructed;
//! providers map a selection to their own wire identifier via
//! [`Model::openai_id`], so the command surface never carries raw vendor
//! strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProviderError;

/// Chat model selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    /// The default selection
    #[default]
    #[serde(rename = "gpt-4o")]
    Gpt4o,

    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,

    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
}

impl Model {
    /// Every accepted model name, in display order
    pub const ALLOWED: [&'static str; 3] = ["gpt-4o", "gpt-3.5-turbo", "gpt-4o-mini"];

    /// Canonical name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4oMini => "gpt-4o-mini",
        }
    }

    /// Identifier sent to the OpenAI-compatible endpoint
    ///
    /// Currently identical to the canonical name; a provider with its own
    /// naming scheme would map here.
    pub fn openai_id(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4o" => Ok(Self::Gpt4o),
            "gpt-3.5-turbo" => Ok(Self::Gpt35Turbo),
            "gpt-4o-mini" => Ok(Self::Gpt4oMini),
            other => Err(ProviderError::config(format!(
                "unknown model '{other}' (expected one of: {})",
                Self::ALLOWED.join(", ")
            ))),
        }
    }
}
