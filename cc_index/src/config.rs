//! On-disk configuration locating the persisted dictionary store.

use serde::{Serialize, Deserialize};

use crate::error::Error;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IndexConfig {
    pub store_path: String,
}

impl IndexConfig {
    pub fn from_file(filename: &str) -> Result<Self, Error> {
        let serialized = std::fs::read_to_string(filename)?;
        let config: Self = serde_yaml::from_str(&serialized)?;
        Ok(config)
    }

    pub fn to_file(&self, filename: &str) -> Result<(), Error> {
        let serialized = serde_yaml::to_string(&self)?;
        std::fs::write(filename, serialized)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn config_round_trip() {
        let filename = "/tmp/cc_index_config.yaml";

        let config = IndexConfig {
            store_path: "/tmp/cc-dict-store.json".to_string(),
        };
        config.to_file(filename).unwrap();

        let read = IndexConfig::from_file(filename).unwrap();
        assert_eq!(read.store_path, config.store_path);
    }

    #[test]
    fn missing_config_is_an_error() {
        assert!(IndexConfig::from_file("/tmp/does_not_exist_cc_index.yaml").is_err());
    }
}
