//! Static reference data for the model step
//!
//! Supplies the inputs offered to the first model of a policy and the model
//! types the user can pick from.

use super::policy::Field;
use crate::config::Config;

/// Read-only source of reference data
pub trait ReferenceDataSource {
    /// Inputs of the first model when no previous model exists to chain from
    fn default_inputs(&self) -> &[Field];

    /// Model types offered in the draft form
    fn model_types(&self) -> &[String];
}

/// Reference data loaded from the user's config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub default_inputs: Vec<Field>,
    pub model_types: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ReferenceData {
    fn from(config: &Config) -> Self {
        Self {
            default_inputs: config.default_inputs.clone(),
            model_types: config.model_types.clone(),
        }
    }
}

impl ReferenceDataSource for ReferenceData {
    fn default_inputs(&self) -> &[Field] {
        &self.default_inputs
    }

    fn model_types(&self) -> &[String] {
        &self.model_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_data_from_config() {
        let config = Config {
            default_inputs: vec![Field::new("line", "string")],
            model_types: vec!["Morphline".to_string()],
            ..Config::default()
        };

        let reference = ReferenceData::from(&config);
        assert_eq!(reference.default_inputs(), &[Field::new("line", "string")]);
        assert_eq!(reference.model_types(), &["Morphline".to_string()]);
    }

    #[test]
    fn test_default_reference_data_has_raw_input() {
        let reference = ReferenceData::default();
        assert_eq!(reference.default_inputs(), &[Field::new("raw", "string")]);
        assert!(!reference.model_types().is_empty());
    }
}
