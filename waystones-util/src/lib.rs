use std::str::FromStr;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

pub mod math;

#[derive(Debug)]
pub struct ParseGameModeError;

#[derive(Serialize, Deserialize, FromPrimitive, PartialEq, Eq, Clone, Copy, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Survival = 0,
    Creative = 1,
    Adventure = 2,
    Spectator = 3,
}

impl GameMode {
    /// Creative players may manage waystones they do not own.
    pub fn bypasses_ownership(&self) -> bool {
        matches!(self, Self::Creative)
    }
}

impl FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "survival" | "s" | "0" => Ok(Self::Survival),
            "creative" | "c" | "1" => Ok(Self::Creative),
            "adventure" | "a" | "2" => Ok(Self::Adventure),
            "spectator" | "sp" | "3" => Ok(Self::Spectator),
            _ => Err(ParseGameModeError),
        }
    }
}
