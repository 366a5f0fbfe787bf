use std::fmt;

pub const MAX_USERNAME_LENGTH: usize = 20;

/// Display name under which wins are counted. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        let length = trimmed.chars().count();
        if length > MAX_USERNAME_LENGTH {
            return Err(format!(
                "Username must be at most {} characters, got {}",
                MAX_USERNAME_LENGTH, length
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let name = Username::parse("  Alice \n").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(Username::parse("").is_err());
        assert!(Username::parse("   ").is_err());
    }

    #[test]
    fn test_parse_length_limit_counts_characters() {
        assert!(Username::parse(&"a".repeat(MAX_USERNAME_LENGTH)).is_ok());
        assert!(Username::parse(&"a".repeat(MAX_USERNAME_LENGTH + 1)).is_err());
        assert!(Username::parse(&"é".repeat(MAX_USERNAME_LENGTH)).is_ok());
    }
}
