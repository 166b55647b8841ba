//! Render configuration for the figure presenter.
//!
//! This module provides:
//! - Layout presets (named physical widths of publication layouts)
//! - `RenderConfig`, loadable from JSON, with the legacy short keys as aliases
//! - The JSON schema of `RenderConfig`

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::LazyLock;

use log::warn;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::plotting::error::{PlotError, PlotResult};

/// Height as a fraction of width when no height is given.
pub const DEFAULT_HEIGHT_FACTOR: f64 = 0.75;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

// ============================================================================
// Layout presets
// ============================================================================

/// Named physical widths of common publication layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPreset {
    /// A&A single column
    OneColumn,
    /// A&A full page width (two columns)
    TwoColumn,
    /// Full text width of the thesis template
    FullWidth,
    /// Thesis margin figure
    Margin,
    /// Thesis main text block
    Main,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 5] = [
        LayoutPreset::OneColumn,
        LayoutPreset::TwoColumn,
        LayoutPreset::FullWidth,
        LayoutPreset::Margin,
        LayoutPreset::Main,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            LayoutPreset::OneColumn => "one-column",
            LayoutPreset::TwoColumn => "two-column",
            LayoutPreset::FullWidth => "full-width",
            LayoutPreset::Margin => "margin",
            LayoutPreset::Main => "main",
        }
    }

    /// Alternative names accepted by [`LayoutPreset::from_name`].
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            LayoutPreset::OneColumn => &["a&a", "onecolumn", "one"],
            LayoutPreset::TwoColumn => &["a&afw", "a&afullwidth", "twocolumns", "two", "full"],
            LayoutPreset::FullWidth => &["fullwidth"],
            LayoutPreset::Margin => &[],
            LayoutPreset::Main => &["thesis"],
        }
    }

    /// Width in inches.
    pub fn width_in(self) -> f64 {
        match self {
            LayoutPreset::OneColumn => 3.543311946,
            LayoutPreset::TwoColumn => 7.2712643025,
            LayoutPreset::FullWidth => 6.5046152778,
            LayoutPreset::Margin => 1.952175,
            LayoutPreset::Main => 4.22839541667,
        }
    }

    pub fn height_factor(self) -> f64 {
        DEFAULT_HEIGHT_FACTOR
    }

    /// Default (width, height) in inches.
    pub fn size(self) -> (f64, f64) {
        let width = self.width_in();
        (width, self.height_factor() * width)
    }

    /// Look up a preset by canonical name or alias, ignoring case.
    pub fn from_name(name: &str) -> Option<LayoutPreset> {
        let wanted = name.trim().to_lowercase();
        LayoutPreset::ALL
            .into_iter()
            .find(|p| p.name() == wanted || p.aliases().contains(&wanted.as_str()))
    }

    /// Like [`LayoutPreset::from_name`], falling back to one-column.
    pub fn resolve(name: &str) -> LayoutPreset {
        LayoutPreset::from_name(name).unwrap_or_else(|| {
            warn!("Unknown layout preset '{}', using one-column", name);
            LayoutPreset::OneColumn
        })
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Render configuration
// ============================================================================

/// Explicit figure size: `(width, height)` in inches, or `(None, factor)` to
/// keep the preset width and use `factor * width` as height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SizeOverride(pub Option<f64>, pub f64);

/// Everything that controls sizing, styling and output of one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderConfig {
    /// Layout preset name (see `pubfig presets`)
    #[serde(default = "default_preset", alias = "type")]
    pub layout_preset: String,
    /// Size override, `[width, height]` or `[null, height_factor]`
    #[serde(default, alias = "figsize")]
    pub explicit_size: Option<SizeOverride>,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Spine width in points; ticks get half of it
    #[serde(default = "default_axis_line_width", alias = "axislw")]
    pub axis_line_width: f64,
    #[serde(default = "default_true", alias = "tight")]
    pub apply_tight_layout: bool,
    /// Tight layout padding, in units of the font size
    #[serde(default = "default_tight_padding", alias = "tightpad")]
    pub tight_layout_padding: f64,
    /// Master switch for tick label formatting
    #[serde(default = "default_true", alias = "formataxis")]
    pub format_axis_ticks: bool,
    #[serde(default = "default_true", alias = "formaty")]
    pub format_y_axis: bool,
    #[serde(default = "default_true", alias = "formatx")]
    pub format_x_axis: bool,
    #[serde(default = "default_true", alias = "formatcbar")]
    pub format_colorbar_axis: bool,
    /// Output file; the figure is shown instead when absent
    #[serde(default, alias = "save")]
    pub save_path: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    /// Unrecognized keys, handed to the drawing callback untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_preset() -> String {
    LayoutPreset::OneColumn.name().to_string()
}
fn default_dpi() -> u32 { 100 }
fn default_axis_line_width() -> f64 { 1.0 }
fn default_tight_padding() -> f64 { 0.4 }
fn default_true() -> bool { true }

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            layout_preset: default_preset(),
            explicit_size: None,
            dpi: default_dpi(),
            axis_line_width: default_axis_line_width(),
            apply_tight_layout: true,
            tight_layout_padding: default_tight_padding(),
            format_axis_ticks: true,
            format_y_axis: true,
            format_x_axis: true,
            format_colorbar_axis: true,
            save_path: None,
            verbose: false,
            extra: Map::new(),
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> PlotResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: RenderConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an already parsed JSON value.
    pub fn from_value(value: Value) -> PlotResult<Self> {
        let config: RenderConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.layout_preset = preset.into();
        self
    }

    pub fn with_size(mut self, width: Option<f64>, height: f64) -> Self {
        self.explicit_size = Some(SizeOverride(width, height));
        self
    }

    pub fn with_save_path(mut self, path: impl Into<String>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    /// The preset this configuration names (one-column if unknown).
    pub fn preset(&self) -> LayoutPreset {
        LayoutPreset::resolve(&self.layout_preset)
    }

    /// Reject values that cannot produce a figure.
    pub fn validate(&self) -> PlotResult<()> {
        let invalid = |msg: String| -> PlotResult<()> { Err(PlotError::InvalidConfig(msg)) };
        if self.dpi == 0 {
            return invalid("dpi must be positive".to_string());
        }
        if !(self.axis_line_width.is_finite() && self.axis_line_width > 0.0) {
            return invalid(format!(
                "axis_line_width must be a positive number, got {}",
                self.axis_line_width
            ));
        }
        if !(self.tight_layout_padding.is_finite() && self.tight_layout_padding >= 0.0) {
            return invalid(format!(
                "tight_layout_padding must be non-negative, got {}",
                self.tight_layout_padding
            ));
        }
        if let Some(SizeOverride(width, height)) = self.explicit_size {
            let positive = |v: f64| v.is_finite() && v > 0.0;
            if !positive(height) || width.is_some_and(|w| !positive(w)) {
                return invalid(format!(
                    "explicit_size must be positive, got ({:?}, {})",
                    width, height
                ));
            }
        }
        if self.save_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return invalid("save_path must not be empty".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Cached JSON Schema for RenderConfig.
static SCHEMA: LazyLock<schemars::Schema> = LazyLock::new(|| schema_for!(RenderConfig));

/// Returns the JSON Schema of `RenderConfig` as a pretty-printed JSON string.
pub fn schema_json_pretty() -> PlotResult<String> {
    Ok(serde_json::to_string_pretty(&*SCHEMA)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preset_aliases() {
        assert_eq!(LayoutPreset::from_name("A&A"), Some(LayoutPreset::OneColumn));
        assert_eq!(LayoutPreset::from_name("A&AFullWidth"), Some(LayoutPreset::TwoColumn));
        assert_eq!(LayoutPreset::from_name("full"), Some(LayoutPreset::TwoColumn));
        assert_eq!(LayoutPreset::from_name("fullwidth"), Some(LayoutPreset::FullWidth));
        assert_eq!(LayoutPreset::from_name("Thesis"), Some(LayoutPreset::Main));
        assert_eq!(LayoutPreset::from_name(" margin "), Some(LayoutPreset::Margin));
        assert_eq!(LayoutPreset::from_name("poster"), None);
        assert_eq!(LayoutPreset::resolve("poster"), LayoutPreset::OneColumn);
    }

    #[test]
    fn test_every_preset_resolves_by_its_own_name() {
        for preset in LayoutPreset::ALL {
            assert_eq!(LayoutPreset::from_name(preset.name()), Some(preset));
            for alias in preset.aliases() {
                assert_eq!(LayoutPreset::from_name(alias), Some(preset));
            }
        }
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config = RenderConfig::from_value(json!({})).unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.preset(), LayoutPreset::OneColumn);
        assert_eq!(config.tight_layout_padding, 0.4);
    }

    #[test]
    fn test_legacy_keys_and_extra() {
        let config = RenderConfig::from_value(json!({
            "type": "A&AFullWidth",
            "figsize": [null, 0.4],
            "axislw": 0.4,
            "tight": false,
            "formatcbar": false,
            "save": "out.svg",
            "n_lines": 3
        }))
        .unwrap();
        assert_eq!(config.preset(), LayoutPreset::TwoColumn);
        assert_eq!(config.explicit_size, Some(SizeOverride(None, 0.4)));
        assert_eq!(config.axis_line_width, 0.4);
        assert!(!config.apply_tight_layout);
        assert!(!config.format_colorbar_axis);
        assert_eq!(config.save_path.as_deref(), Some("out.svg"));
        assert_eq!(config.extra.get("n_lines"), Some(&json!(3)));
    }

    #[test]
    fn test_non_text_save_path_rejected() {
        let err = RenderConfig::from_value(json!({ "save_path": 42 })).unwrap_err();
        assert!(matches!(err, PlotError::InvalidConfig(_)));
    }

    #[test]
    fn test_validation() {
        let bad = [
            RenderConfig { dpi: 0, ..RenderConfig::default() },
            RenderConfig { axis_line_width: -1.0, ..RenderConfig::default() },
            RenderConfig { axis_line_width: f64::NAN, ..RenderConfig::default() },
            RenderConfig { tight_layout_padding: -0.1, ..RenderConfig::default() },
            RenderConfig::default().with_size(Some(0.0), 2.0),
            RenderConfig::default().with_size(None, -0.5),
            RenderConfig::default().with_save_path("  "),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(PlotError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
        assert!(RenderConfig::default().with_size(Some(3.0), 2.0).validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, r#"{"layout_preset": "margin", "dpi": 300}"#).unwrap();
        let config = RenderConfig::load(&path).unwrap();
        assert_eq!(config.preset(), LayoutPreset::Margin);
        assert_eq!(config.dpi, 300);

        assert!(matches!(
            RenderConfig::load(dir.path().join("missing.json")),
            Err(PlotError::Io(_))
        ));
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = schema_json_pretty().unwrap();
        assert!(schema.contains("\"RenderConfig\""));
        assert!(schema.contains("layout_preset"));
        assert!(schema.contains("axis_line_width"));
    }
}
