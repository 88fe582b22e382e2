use folio_style::{Margins, PageSize};
use serde::{Deserialize, Serialize};

/// Layout strategy for a whole document build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Content stacks top to bottom with automatic page breaks.
    #[default]
    Flow,
    /// Every item declares its page; no automatic breaking.
    Fixed,
}

/// What to do about content that cannot fit even after page breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Let it happen silently.
    #[default]
    Allow,
    /// Collect human-readable warnings alongside the output.
    Warn,
}

/// Configuration for one document build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    pub mode: LayoutMode,
    pub overflow: OverflowPolicy,
    /// Font family used when a text node declares none.
    pub default_font_family: String,
    /// Font size in points used when a text node declares none.
    pub default_font_size: f32,
    /// Line height as a multiple of font size when no explicit line gap is
    /// given.
    pub line_height_factor: f32,
    /// Height assumed for local images with no resolvable dimensions.
    pub image_fallback_height: f32,
    /// Tolerance in points for overflow detection and measurement/render
    /// height comparisons.
    pub epsilon: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margins: Margins::all(36.0),
            mode: LayoutMode::default(),
            overflow: OverflowPolicy::default(),
            default_font_family: "Helvetica".to_string(),
            default_font_size: 12.0,
            line_height_factor: 1.15,
            image_fallback_height: 100.0,
            epsilon: 0.5,
        }
    }
}

impl LayoutConfig {
    pub fn page_dimensions(&self) -> (f32, f32) {
        self.page_size.dimensions_pt()
    }

    /// Horizontal space available to content between the side margins.
    pub fn content_width(&self) -> f32 {
        (self.page_dimensions().0 - self.margins.horizontal()).max(0.0)
    }

    /// Vertical space available to content between the top and bottom
    /// margins.
    pub fn usable_height(&self) -> f32 {
        (self.page_dimensions().1 - self.margins.vertical()).max(0.0)
    }

    /// The line height for a given font size: `size + gap` when an explicit
    /// line gap is declared, otherwise the default factor applies.
    pub fn line_height(&self, font_size: f32, line_gap: Option<f32>) -> f32 {
        match line_gap {
            Some(gap) => font_size + gap,
            None => font_size * self.line_height_factor,
        }
    }

    /// Default font size for a heading of the given level.
    pub fn heading_size(&self, level: u8) -> f32 {
        let factor = match level {
            1 => 2.0,
            2 => 1.5,
            3 => 1.25,
            4 => 1.1,
            _ => 1.0,
        };
        self.default_font_size * factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_dimensions_subtract_margins() {
        let config = LayoutConfig {
            page_size: PageSize::Custom {
                width: 400.0,
                height: 600.0,
            },
            margins: Margins::all(50.0),
            ..Default::default()
        };
        assert_eq!(config.content_width(), 300.0);
        assert_eq!(config.usable_height(), 500.0);
    }

    #[test]
    fn line_height_prefers_explicit_gap() {
        let config = LayoutConfig::default();
        assert_eq!(config.line_height(10.0, Some(4.0)), 14.0);
        assert!((config.line_height(10.0, None) - 11.5).abs() < 1e-4);
    }

    #[test]
    fn parses_from_json() {
        let config: LayoutConfig = serde_json::from_str(
            r#"{
                "pageSize": {"width": 200, "height": 300},
                "margins": 20,
                "mode": "fixed",
                "overflow": "warn"
            }"#,
        )
        .unwrap();
        assert_eq!(config.mode, LayoutMode::Fixed);
        assert_eq!(config.overflow, OverflowPolicy::Warn);
        assert_eq!(config.content_width(), 160.0);
    }
}
