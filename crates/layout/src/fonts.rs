//! Font registration and real glyph metrics backed by `ttf-parser`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use folio_traits::{FontError, FontMetrics, SharedFontData};
use ttf_parser::Face;

/// A registered font: raw file bytes, validated once at registration.
#[derive(Debug)]
pub struct FontInstance {
    pub family: String,
    pub data: SharedFontData,
}

impl FontInstance {
    /// Re-parses the face on demand. Parsing is cheap (a header walk, no
    /// allocation) so instances stay borrow-free and shareable.
    pub fn as_face(&self) -> Result<Face<'_>, FontError> {
        Face::parse(&self.data, 0).map_err(|_| FontError::Unparsable(self.family.clone()))
    }
}

/// Thread-safe registry of fonts by family name.
///
/// Registration is idempotent: re-registering a family is a no-op and
/// reports `false` rather than replacing the data, so measured documents
/// never change metrics mid-run.
#[derive(Debug, Default)]
pub struct FontCatalog {
    fonts: RwLock<HashMap<String, Arc<FontInstance>>>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers font bytes under a family name, validating that they
    /// parse. Returns `true` if the family was newly added.
    pub fn register(&self, family: &str, data: SharedFontData) -> Result<bool, FontError> {
        {
            let fonts = self.fonts.read().unwrap();
            if fonts.contains_key(family) {
                return Ok(false);
            }
        }
        Face::parse(&data, 0).map_err(|_| FontError::Unparsable(family.to_string()))?;
        let mut fonts = self.fonts.write().unwrap();
        if fonts.contains_key(family) {
            return Ok(false);
        }
        log::debug!("registered font family '{}' ({} bytes)", family, data.len());
        fonts.insert(
            family.to_string(),
            Arc::new(FontInstance {
                family: family.to_string(),
                data,
            }),
        );
        Ok(true)
    }

    pub fn get(&self, family: &str) -> Result<Arc<FontInstance>, FontError> {
        self.fonts
            .read()
            .unwrap()
            .get(family)
            .cloned()
            .ok_or_else(|| FontError::NotRegistered(family.to_string()))
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.read().unwrap().contains_key(family)
    }
}

/// [`FontMetrics`] over a [`FontCatalog`], summing horizontal glyph
/// advances scaled from font units to points.
///
/// Unknown families and glyphs without advances fall back to a half-em
/// estimate so measurement still completes.
#[derive(Debug)]
pub struct FaceMetrics {
    catalog: Arc<FontCatalog>,
}

impl FaceMetrics {
    pub fn new(catalog: Arc<FontCatalog>) -> Self {
        Self { catalog }
    }

    const FALLBACK_FACTOR: f32 = 0.5;

    fn measured_width(&self, text: &str, family: &str, size: f32) -> Option<f32> {
        let instance = self.catalog.get(family).ok()?;
        let face = instance.as_face().ok()?;
        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return None;
        }
        let scale = size / units_per_em;
        let mut width = 0.0f32;
        for ch in text.chars() {
            let advance = face
                .glyph_index(ch)
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|a| a as f32 * scale)
                .unwrap_or(size * Self::FALLBACK_FACTOR);
            width += advance;
        }
        Some(width)
    }
}

impl FontMetrics for FaceMetrics {
    fn text_width(&self, text: &str, family: &str, size: f32) -> f32 {
        self.measured_width(text, family, size)
            .unwrap_or_else(|| text.chars().count() as f32 * size * Self::FALLBACK_FACTOR)
    }

    fn covers(&self, ch: char, family: &str) -> bool {
        let Ok(instance) = self.catalog.get(family) else {
            return true;
        };
        let Ok(face) = instance.as_face() else {
            return true;
        };
        face.glyph_index(ch).is_some()
    }
}

/// Deterministic metrics for tests and headless runs: every glyph
/// advances a fixed fraction of the font size.
#[derive(Debug, Clone, Copy)]
pub struct ScaledMetrics {
    pub advance_factor: f32,
}

impl Default for ScaledMetrics {
    fn default() -> Self {
        Self {
            advance_factor: 0.5,
        }
    }
}

impl FontMetrics for ScaledMetrics {
    fn text_width(&self, text: &str, _family: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_rejects_garbage() {
        let catalog = FontCatalog::new();
        let err = catalog
            .register("Broken", Arc::new(vec![0u8; 16]))
            .unwrap_err();
        assert!(matches!(err, FontError::Unparsable(_)));
        assert!(!catalog.contains("Broken"));
    }

    #[test]
    fn lookup_of_unregistered_family_fails() {
        let catalog = FontCatalog::new();
        assert!(matches!(
            catalog.get("Nope"),
            Err(FontError::NotRegistered(_))
        ));
    }

    #[test]
    fn unknown_family_measures_with_fallback() {
        let metrics = FaceMetrics::new(Arc::new(FontCatalog::new()));
        assert_eq!(metrics.text_width("abcd", "Nope", 10.0), 20.0);
        assert!(metrics.covers('x', "Nope"));
    }

    #[test]
    fn scaled_metrics_are_linear() {
        let metrics = ScaledMetrics::default();
        assert_eq!(metrics.text_width("ab", "any", 12.0), 12.0);
        let wide = ScaledMetrics {
            advance_factor: 1.0,
        };
        assert_eq!(wide.text_width("ab", "any", 12.0), 24.0);
    }
}
