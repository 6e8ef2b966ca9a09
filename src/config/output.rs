use super::traits::ConfigSection;
use crate::error::MelogenError;
use crate::scale::{Scale, ScaleType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub scale: ScaleType,
    pub key: String,
    pub tempo: u32,
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scale: ScaleType::MinorBlues,
            key: "C".to_string(),
            tempo: 130,
            path: "untitled.mid".to_string(),
        }
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), MelogenError> {
        if self.tempo == 0 {
            return Err(MelogenError::Configuration(
                "Tempo must be positive".to_string(),
            ));
        }
        if self.path.is_empty() {
            return Err(MelogenError::Configuration(
                "Output path must not be empty".to_string(),
            ));
        }
        // surfaces a bad key name before the run starts
        Scale::new(self.scale, &self.key)?;
        Ok(())
    }
}
