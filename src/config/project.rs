use std::{collections::BTreeMap, io::Read, path::Path, path::PathBuf};

use anyhow::Context;

use crate::{
    config::background::BackgroundConfig,
    config::caption::CaptionConfig,
    config::captions::CaptionMap,
    config::device::DeviceConfig,
    foundation::error::{FrameshotError, FrameshotResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Project-level configuration file.
pub struct ProjectConfig {
    /// Global caption style.
    #[serde(default)]
    pub caption: CaptionConfig,
    /// Global background.
    #[serde(default)]
    pub background: BackgroundConfig,
    /// Device name to device settings.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceConfig>,
    /// Directory holding the frame catalog and bezel images.
    #[serde(default)]
    pub frames_dir: Option<PathBuf>,
    /// Device name to that device's captions.
    #[serde(default)]
    pub captions: BTreeMap<String, CaptionMap>,
}

impl ProjectConfig {
    /// Parse from a JSON reader.
    pub fn from_reader(reader: impl Read) -> FrameshotResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| FrameshotError::serde(format!("parse project config: {e}")))
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> FrameshotResult<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open project config '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Settings for `device`, or defaults when it has none.
    pub fn device(&self, device: &str) -> DeviceConfig {
        self.devices.get(device).cloned().unwrap_or_default()
    }

    /// Caption style with `device`'s overrides applied.
    pub fn caption_for_device(&self, device: &str) -> CaptionConfig {
        self.caption.with_device_overrides(&self.device(device))
    }

    /// Validate every section.
    pub fn validate(&self) -> FrameshotResult<()> {
        self.caption.validate()?;
        self.background.validate()?;
        for (name, device) in &self.devices {
            device
                .validate()
                .map_err(|e| FrameshotError::validation(format!("device '{name}': {e}")))?;
            self.caption
                .with_device_overrides(device)
                .validate()
                .map_err(|e| FrameshotError::validation(format!("device '{name}': {e}")))?;
            if let Some(ov) = &device.background {
                self.background
                    .merged_with(ov)
                    .validate()
                    .map_err(|e| FrameshotError::validation(format!("device '{name}': {e}")))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/project.rs"]
mod tests;
