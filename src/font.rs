use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// Family name resolving to egui's built-in proportional font
pub const PROPORTIONAL: &str = "proportional";
/// Family name resolving to egui's built-in monospace font
pub const MONOSPACE: &str = "monospace";

pub const MIN_FONT_SIZE: f32 = 4.0;
pub const MAX_FONT_SIZE: f32 = 200.0;

/// Font descriptor handed to text annotations.
///
/// `family` is either one of the built-in names ([`PROPORTIONAL`], [`MONOSPACE`])
/// or a path to a TrueType/OpenType file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::proportional(14.0)
    }
}

impl FontSpec {
    pub fn proportional(size: f32) -> Self {
        Self {
            family: PROPORTIONAL.to_owned(),
            size,
        }
    }

    /// Pulls the size into `MIN_FONT_SIZE..=MAX_FONT_SIZE`. NaN and infinities
    /// fall back to the default size.
    pub fn clamped(mut self) -> Self {
        if !self.size.is_finite() {
            self.size = Self::default().size;
        }
        self.size = self.size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }

    fn is_builtin(&self) -> bool {
        self.family == PROPORTIONAL || self.family == MONOSPACE
    }
}

/// Size of a block of (possibly multi-line) text, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
    pub line_count: usize,
}

/// Glyph source for every text the editor measures or paints.
///
/// The built-in faces come from egui's embedded default fonts, so measuring
/// never depends on what is installed on the machine.
#[derive(Clone)]
pub struct FontBook {
    proportional: FontArc,
    monospace: FontArc,
    files: HashMap<String, FontArc>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("files", &self.files.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl FontBook {
    pub fn with_default_fonts() -> EditorResult<Self> {
        let definitions = egui::FontDefinitions::default();
        Ok(Self {
            proportional: builtin_font(&definitions, &egui::FontFamily::Proportional)?,
            monospace: builtin_font(&definitions, &egui::FontFamily::Monospace)?,
            files: HashMap::new(),
        })
    }

    /// Makes the font named by `spec` available. Built-in families are always loaded.
    pub fn load(&mut self, spec: &FontSpec) -> EditorResult<()> {
        if spec.is_builtin() || self.files.contains_key(&spec.family) {
            return Ok(());
        }

        let path = Path::new(&spec.family);
        let bytes = std::fs::read(path).map_err(|err| EditorError::Font {
            name: spec.family.clone(),
            reason: err.to_string(),
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|err| EditorError::Font {
            name: spec.family.clone(),
            reason: err.to_string(),
        })?;

        debug!("Loaded font file {}", path.display());
        self.files.insert(spec.family.clone(), font);
        Ok(())
    }

    /// Like [`FontBook::load`], but falls back to the built-in font on failure
    pub fn load_or_fallback(&mut self, spec: &FontSpec) {
        if let Err(err) = self.load(spec) {
            warn!("{err}; using the built-in proportional font instead");
        }
    }

    /// The face for `spec`; unknown families fall back to the proportional face
    pub fn font(&self, spec: &FontSpec) -> &FontArc {
        match spec.family.as_str() {
            PROPORTIONAL => &self.proportional,
            MONOSPACE => &self.monospace,
            family => self.files.get(family).unwrap_or(&self.proportional),
        }
    }

    pub fn ascent(&self, spec: &FontSpec) -> f32 {
        self.font(spec).as_scaled(spec.size).ascent()
    }

    /// Distance between consecutive baselines
    pub fn line_height(&self, spec: &FontSpec) -> f32 {
        let scaled = self.font(spec).as_scaled(spec.size);
        scaled.height() + scaled.line_gap()
    }

    /// Glyphs of a single line with their x offsets from the line start, plus the line's advance width
    pub fn layout_line(&self, spec: &FontSpec, line: &str) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font(spec).as_scaled(spec.size);
        let mut glyphs = Vec::with_capacity(line.len());
        let mut cursor_x = 0.0f32;
        let mut last: Option<GlyphId> = None;

        for ch in line.chars().filter(|ch| *ch != '\r') {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = last {
                cursor_x += scaled.kern(prev, id);
            }
            glyphs.push((id, cursor_x));
            cursor_x += scaled.h_advance(id);
            last = Some(id);
        }

        (glyphs, cursor_x)
    }

    /// Measures multi-line text: each line on its own, width is the widest line,
    /// height is the sum of the line heights
    pub fn measure(&self, text: &str, spec: &FontSpec) -> TextMetrics {
        let line_height = self.line_height(spec);
        let mut width = 0.0f32;
        let mut line_count = 0;

        for line in text.split('\n') {
            let (_, line_width) = self.layout_line(spec, line);
            width = width.max(line_width);
            line_count += 1;
        }

        TextMetrics {
            width,
            height: line_height * line_count as f32,
            line_count,
        }
    }
}

fn builtin_font(
    definitions: &egui::FontDefinitions,
    family: &egui::FontFamily,
) -> EditorResult<FontArc> {
    let missing = || EditorError::Font {
        name: format!("{family:?}"),
        reason: "no embedded font for this family".to_owned(),
    };

    let name = definitions
        .families
        .get(family)
        .and_then(|names| names.first())
        .ok_or_else(missing)?;
    let data = definitions.font_data.get(name).ok_or_else(missing)?;

    FontArc::try_from_vec(data.font.to_vec()).map_err(|err| EditorError::Font {
        name: name.clone(),
        reason: err.to_string(),
    })
}
