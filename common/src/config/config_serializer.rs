use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_malformed_yaml_reports_deserialize_error() {
        let serializer = YamlConfigSerializer::new();
        let result: Result<BTreeMap<String, u64>, String> = serializer.deserialize("alice: [not a number");
        assert!(result.unwrap_err().starts_with("Failed to deserialize config"));
    }

    #[test]
    fn test_map_keys_come_out_sorted() {
        let serializer = YamlConfigSerializer::new();
        let wins: BTreeMap<String, u64> = [("zed".to_string(), 1), ("amy".to_string(), 4)].into_iter().collect();
        let content = serializer.serialize(&wins).unwrap();
        assert!(content.find("amy").unwrap() < content.find("zed").unwrap());
    }
}
