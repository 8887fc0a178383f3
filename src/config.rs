use std::fs;
use std::path::Path;

use egui::Color32;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_HISTORY_DEPTH;
use crate::error::EditorResult;
use crate::font::FontSpec;
use crate::state::{DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::tools::ToolKind;

/// Editor start-up settings, read from a JSON file.
///
/// Every field is optional in the file. Out-of-range values are clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial annotation colour as unmultiplied RGBA
    pub color: [u8; 4],
    pub stroke_width: i32,
    pub font: FontSpec,
    pub history_depth: usize,
    /// Text tool makes shadowed text when set
    pub text_shadow: bool,
    pub default_tool: ToolKind,
    /// Colour behind transparent parts of the source image
    pub background: [u8; 4],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            color: [230, 100, 180, 255],
            stroke_width: DEFAULT_STROKE_WIDTH,
            font: FontSpec::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
            text_shadow: true,
            default_tool: ToolKind::Select,
            background: [255, 255, 255, 255],
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pulls every value into its supported range
    pub fn clamped(mut self) -> Self {
        let width = self.stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
        if width != self.stroke_width {
            warn!("stroke_width {} out of range, using {width}", self.stroke_width);
            self.stroke_width = width;
        }
        if self.history_depth == 0 {
            warn!("history_depth must be at least 1");
            self.history_depth = 1;
        }
        self.font = self.font.clamped();
        self
    }

    pub fn color32(&self) -> Color32 {
        let [r, g, b, a] = self.color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn background32(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}
