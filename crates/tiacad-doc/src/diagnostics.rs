//! The non-fatal diagnostic channel a build accumulates warnings on, per
//! §6.4/§7: font fallback, coplanar hull, material key collision with a
//! built-in name. Structural progress (phase entry, operation dispatch)
//! goes through the `log` facade instead; this channel is only for
//! warnings the caller is expected to surface to the document's author.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A `text` sketch shape's requested font family/style fell back to
    /// the registry's default sans font.
    FontFallback { family: String, style: String },
    /// A `hull` operation's inputs were coplanar or nearly degenerate and
    /// the backend fell back to a lower-dimensional hull.
    CoplanarHull { output: String },
    /// A user `materials:` entry reused a built-in catalog name, shadowing
    /// it for the rest of the build.
    MaterialKeyCollision { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::FontFallback { family, style } => {
                write!(f, "font '{family}' ({style}) not found; falling back to default sans")
            }
            Warning::CoplanarHull { output } => {
                write!(f, "hull '{output}' inputs are coplanar or nearly degenerate")
            }
            Warning::MaterialKeyCollision { name } => {
                write!(f, "material '{name}' shadows a built-in catalog entry of the same name")
            }
        }
    }
}

/// Accumulates non-fatal warnings produced over the course of a build.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_warnings_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(Warning::MaterialKeyCollision { name: "gold".into() });
        diagnostics.warn(Warning::CoplanarHull { output: "base_hull".into() });
        assert_eq!(diagnostics.warnings().len(), 2);
        assert!(!diagnostics.is_clean());
    }
}
