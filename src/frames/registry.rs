use std::{collections::BTreeMap, io::Read, path::Path};

use anyhow::Context;

use crate::{
    foundation::core::{DeviceCategory, Orientation},
    foundation::error::{FrameshotError, FrameshotResult},
    frames::catalog::{CatalogEntry, DeviceFrame},
};

const VERSION_KEY: &str = "version";

/// Immutable index of device frames by category and orientation.
///
/// Built once from a JSON catalog and shared by reference across compose calls. Entries keep the
/// order in which the catalog lists them.
#[derive(Clone, Debug, Default)]
pub struct FrameRegistry {
    version: Option<String>,
    frames: BTreeMap<(DeviceCategory, Orientation), Vec<DeviceFrame>>,
}

impl FrameRegistry {
    /// Load a catalog file.
    pub fn from_path(path: &Path) -> FrameshotResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read frame catalog '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Load a catalog from any reader.
    pub fn from_reader(mut reader: impl Read) -> FrameshotResult<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .context("read frame catalog")?;
        Self::from_json_str(&text)
    }

    /// Parse catalog JSON.
    ///
    /// Malformed JSON or a non-object root is an error. Unknown category or orientation keys and
    /// individual entries that are malformed or fail the screen-rect check are skipped with a
    /// warning.
    #[tracing::instrument(skip_all)]
    pub fn from_json_str(text: &str) -> FrameshotResult<Self> {
        let root: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| FrameshotError::catalog(format!("invalid catalog json: {e}")))?;
        let serde_json::Value::Object(root) = root else {
            return Err(FrameshotError::catalog("catalog root must be a json object"));
        };

        let mut registry = Self::default();
        for (key, value) in root {
            if key == VERSION_KEY {
                registry.version = match value {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    other => {
                        tracing::warn!(value = %other, "ignoring non-scalar catalog version");
                        None
                    }
                };
                continue;
            }
            let Some(category) = DeviceCategory::from_catalog_key(&key) else {
                tracing::warn!(key = %key, "skipping unknown catalog category");
                continue;
            };
            let serde_json::Value::Object(orientations) = value else {
                tracing::warn!(category = %category, "catalog category is not an object, skipping");
                continue;
            };
            for (okey, entries) in orientations {
                let Some(orientation) = Orientation::from_catalog_key(&okey) else {
                    tracing::warn!(category = %category, key = %okey, "skipping unknown catalog orientation");
                    continue;
                };
                registry.index_entries(category, orientation, entries);
            }
        }

        tracing::debug!(
            frames = registry.len(),
            version = registry.version.as_deref().unwrap_or("-"),
            "frame catalog loaded"
        );
        Ok(registry)
    }

    fn index_entries(
        &mut self,
        category: DeviceCategory,
        orientation: Orientation,
        entries: serde_json::Value,
    ) {
        let serde_json::Value::Array(entries) = entries else {
            tracing::warn!(category = %category, orientation = orientation.catalog_key(), "catalog entry list is not an array, skipping");
            return;
        };
        for (idx, entry) in entries.into_iter().enumerate() {
            let entry = match serde_json::from_value::<CatalogEntry>(entry) {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(category = %category, index = idx, "skipping malformed catalog entry: {err}");
                    continue;
                }
            };
            let frame = entry.into_frame(category, orientation);
            if let Err(reason) = frame.check_screen_rect() {
                tracing::warn!(frame = %frame.name, "rejecting catalog entry: {reason}");
                continue;
            }
            self.frames
                .entry((category, orientation))
                .or_default()
                .push(frame);
        }
    }

    /// Catalog version string, when present.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Frames for a category and orientation, in catalog order.
    pub fn frames(&self, category: DeviceCategory, orientation: Orientation) -> &[DeviceFrame] {
        self.frames
            .get(&(category, orientation))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look a frame up by `name` or `display_name`, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&DeviceFrame> {
        self.iter().find(|f| frame_matches(f, name))
    }

    /// Every indexed frame.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceFrame> {
        self.frames.values().flatten()
    }

    /// Number of indexed frames.
    pub fn len(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    /// True when no frame survived loading.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn frame_matches(frame: &DeviceFrame, name: &str) -> bool {
    let name = name.trim();
    frame.name.eq_ignore_ascii_case(name) || frame.display_name.eq_ignore_ascii_case(name)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/registry.rs"]
mod tests;
