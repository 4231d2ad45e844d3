//! `resolve_font(family, style) -> FontHandle | Fallback`, the small font
//! abstraction the text sketch shape sits on top of.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;

use crate::error::{OpError, OpErrorKind, OpResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regular => write!(f, "regular"),
            Self::Bold => write!(f, "bold"),
            Self::Italic => write!(f, "italic"),
            Self::BoldItalic => write!(f, "bold-italic"),
        }
    }
}

/// A loaded, ready-to-outline font, shared behind `Arc` by `ab_glyph`.
#[derive(Clone)]
pub struct FontHandle {
    pub family: String,
    pub font: FontArc,
}

/// Whether `resolve_font` found the requested family/style or had to fall
/// back to the registry's default.
pub enum FontResolution {
    Found(FontHandle),
    Fallback(FontHandle),
}

impl FontResolution {
    pub fn handle(&self) -> &FontHandle {
        match self {
            FontResolution::Found(h) | FontResolution::Fallback(h) => h,
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, FontResolution::Fallback(_))
    }
}

/// Resolves font families to loaded fonts by searching a list of
/// directories for `{family}-{style}.ttf`/`.otf`, falling back to a
/// configured default sans font when a family isn't found.
pub struct FontRegistry {
    search_dirs: Vec<PathBuf>,
    default_font_path: Option<PathBuf>,
    cache: RefCell<HashMap<(String, FontStyle), FontHandle>>,
}

impl FontRegistry {
    pub fn new(search_dirs: Vec<PathBuf>, default_font_path: Option<PathBuf>) -> Self {
        Self {
            search_dirs,
            default_font_path,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// `resolve_font(family, style) → FontHandle | Fallback`. On fallback,
    /// the caller is expected to emit a diagnostics warning; compilation
    /// continues either way.
    pub fn resolve_font(&self, family: &str, style: FontStyle) -> OpResult<FontResolution> {
        let key = (family.to_string(), style);
        if let Some(handle) = self.cache.borrow().get(&key) {
            return Ok(FontResolution::Found(handle.clone()));
        }

        if let Some(path) = self.find_font_file(family, style) {
            let handle = load_font(family, &path)?;
            self.cache.borrow_mut().insert(key, handle.clone());
            return Ok(FontResolution::Found(handle));
        }

        let default_path = self.default_font_path.as_ref().ok_or_else(|| {
            OpError::new(
                OpErrorKind::InvalidSpec,
                format!(
                    "font family '{family}' ({style}) not found and no default sans font is configured"
                ),
            )
        })?;
        let handle = load_font("default sans", default_path)?;
        Ok(FontResolution::Fallback(handle))
    }

    fn find_font_file(&self, family: &str, style: FontStyle) -> Option<PathBuf> {
        for dir in &self.search_dirs {
            for ext in ["ttf", "otf"] {
                let candidate = dir.join(format!("{family}-{style}.{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

fn load_font(family: &str, path: &Path) -> OpResult<FontHandle> {
    let bytes = fs::read(path)
        .map_err(|e| OpError::new(OpErrorKind::InvalidSpec, format!("reading font '{}': {e}", path.display())))?;
    let font = FontArc::try_from_vec(bytes)
        .map_err(|e| OpError::new(OpErrorKind::InvalidSpec, format!("parsing font '{}': {e:?}", path.display())))?;
    Ok(FontHandle { family: family.to_string(), font })
}
