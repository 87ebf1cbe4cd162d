//! The models offered by the front end.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A completion model from the fixed selectable set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// `gpt-3.5-turbo` (chat completions).
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    /// `text-davinci-003` (text completions).
    #[serde(rename = "text-davinci-003")]
    TextDavinci003,
    /// `text-davinci-002` (text completions).
    #[serde(rename = "text-davinci-002")]
    TextDavinci002,
    /// `code-davinci-002` (text completions).
    #[serde(rename = "code-davinci-002")]
    CodeDavinci002,
}

impl Model {
    /// Every selectable model, in menu order.
    pub const ALL: [Model; 4] = [
        Model::Gpt35Turbo,
        Model::TextDavinci003,
        Model::TextDavinci002,
        Model::CodeDavinci002,
    ];

    /// The API model identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::TextDavinci003 => "text-davinci-003",
            Model::TextDavinci002 => "text-davinci-002",
            Model::CodeDavinci002 => "code-davinci-002",
        }
    }

    /// Whether the model is served by the chat completions endpoint.
    pub const fn is_chat(self) -> bool {
        matches!(self, Model::Gpt35Turbo)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model name outside the selectable set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model: {0}")]
pub struct UnknownModel(pub String);

impl FromStr for Model {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|model| model.as_str() == s.trim())
            .ok_or_else(|| UnknownModel(s.to_owned()))
    }
}
