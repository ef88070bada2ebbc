use serde::{Deserialize, Serialize};
use std::fmt;

/// Native pointer/integer width of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WordSize {
    Four,
    #[default]
    Eight,
}

impl WordSize {
    pub const fn bytes(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    pub const fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }
}

impl TryFrom<u8> for WordSize {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_bytes(usize::from(value))
            .ok_or_else(|| format!("Unsupported word size: {} (expected 4 or 8)", value))
    }
}

impl From<WordSize> for u8 {
    fn from(value: WordSize) -> Self {
        match value {
            WordSize::Four => 4,
            WordSize::Eight => 8,
        }
    }
}

impl fmt::Display for WordSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-byte", self.bytes())
    }
}
