//! Colour channels.

use crate::CurveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One independently edited curve of a [`CurveSet`](super::CurveSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in display order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Lowercase channel name as used in persisted state and output payloads.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonecurve::Channel;
    ///
    /// assert_eq!(Channel::Green.name(), "green");
    /// ```
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }

    /// Single-letter button label (`R`, `G` or `B`).
    pub fn initial(self) -> char {
        match self {
            Channel::Red => 'R',
            Channel::Green => 'G',
            Channel::Blue => 'B',
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            other => Err(CurveError::MalformedState(format!(
                "unknown channel: {other}"
            ))),
        }
    }
}
