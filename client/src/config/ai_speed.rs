use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use serde::{Deserialize, Serialize};

/// How the computer's reply is paced. The move is always computed right away;
/// these only control how long the client waits before showing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AiSpeed {
    #[default]
    Fast,
    Normal,
    Smooth,
}

impl AiSpeed {
    pub const ALL: [AiSpeed; 3] = [AiSpeed::Fast, AiSpeed::Normal, AiSpeed::Smooth];

    /// Minimum time between the human's move and the computer's reply appearing.
    pub fn move_delay(&self) -> Duration {
        match self {
            AiSpeed::Fast => Duration::from_millis(50),
            AiSpeed::Normal => Duration::from_millis(300),
            AiSpeed::Smooth => Duration::from_millis(600),
        }
    }

    /// Waits longer than this show the "thinking" notice.
    pub fn thinking_threshold(&self) -> Duration {
        match self {
            AiSpeed::Fast => Duration::from_millis(100),
            AiSpeed::Normal | AiSpeed::Smooth => Duration::from_millis(50),
        }
    }
}

impl fmt::Display for AiSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AiSpeed::Fast => "fast",
            AiSpeed::Normal => "normal",
            AiSpeed::Smooth => "smooth",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AiSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(AiSpeed::Fast),
            "normal" => Ok(AiSpeed::Normal),
            "smooth" => Ok(AiSpeed::Smooth),
            other => Err(format!("Unknown AI speed '{}', expected fast, normal or smooth", other)),
        }
    }
}
