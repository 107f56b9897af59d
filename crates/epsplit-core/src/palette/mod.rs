pub mod builtin;
pub mod schema;

use crate::classify::quadrant::{Quadrant, QuadrantLayout};
use crate::error::SplitError;
use crate::model::{ColorTriple, Run};
use crate::scan::parse_path_start;
use schema::PaletteDef;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Immutable mapping from fill color to component name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    entries: BTreeMap<ColorTriple, String>,
}

impl ColorMap {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ColorTriple, String)>,
    {
        ColorMap {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn from_def(def: &PaletteDef) -> Self {
        Self::from_entries(def.colors.iter().map(|e| (e.rgb, e.component.clone())))
    }

    pub fn get(&self, color: ColorTriple) -> Option<&str> {
        self.entries.get(&color).map(String::as_str)
    }

    /// Component name for a color, or its deterministic fallback.
    pub fn name_for(&self, color: ColorTriple) -> Cow<'_, str> {
        match self.get(color) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(fallback_name(color)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColorTriple, &str)> {
        self.entries.iter().map(|(c, n)| (c, n.as_str()))
    }

    /// Extend this palette with `extra_N` names for every color the runs
    /// draw that the palette does not know.
    ///
    /// Colors are numbered by descending path-start count of their runs,
    /// ties kept in document order. Numbers already used as component names
    /// are skipped.
    pub fn with_inferred_extras(&self, runs: &[Run<'_>]) -> ColorMap {
        let mut counted: Vec<(ColorTriple, usize)> = Vec::new();
        for run in runs {
            let starts = run
                .lines
                .iter()
                .filter(|l| parse_path_start(l).is_some())
                .count();
            match counted.iter_mut().find(|(c, _)| *c == run.color) {
                Some((_, total)) => *total += starts,
                None => counted.push((run.color, starts)),
            }
        }
        counted.retain(|&(_, starts)| starts > 0);
        counted.sort_by(|a, b| b.1.cmp(&a.1));

        let used: HashSet<&str> = self.entries.values().map(String::as_str).collect();
        let mut entries = self.entries.clone();
        let mut next = 1;
        for (color, _) in counted {
            if entries.contains_key(&color) {
                continue;
            }
            let mut name = format!("extra_{next}");
            while used.contains(name.as_str()) {
                next += 1;
                name = format!("extra_{next}");
            }
            tracing::debug!(%color, %name, "inferred palette entry");
            entries.insert(color, name);
            next += 1;
        }
        ColorMap { entries }
    }
}

/// Bucket name for a color absent from the palette.
pub fn fallback_name(color: ColorTriple) -> String {
    format!("unknown_{}_{}_{}", color.r, color.g, color.b)
}

/// Load a palette from a JSON file.
pub fn load_palette(path: &Path) -> Result<PaletteDef, SplitError> {
    let content = std::fs::read_to_string(path).map_err(|e| SplitError::PaletteLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_palette(&content, path)
}

/// Parse a palette from a JSON string.
pub fn parse_palette(json: &str, source: &Path) -> Result<PaletteDef, SplitError> {
    let palette: PaletteDef = serde_json::from_str(json).map_err(|e| SplitError::PaletteLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_palette(&palette)?;
    Ok(palette)
}

/// Parse a palette from a JSON string (no file path context).
pub fn parse_palette_str(json: &str) -> Result<PaletteDef, SplitError> {
    let palette: PaletteDef = serde_json::from_str(json)?;
    validate_palette(&palette)?;
    Ok(palette)
}

/// Validate that a palette is well-formed.
pub fn validate_palette(palette: &PaletteDef) -> Result<(), SplitError> {
    if palette.name.trim().is_empty() {
        return Err(SplitError::PaletteInvalid("name must not be empty".into()));
    }

    if palette.colors.is_empty() {
        return Err(SplitError::PaletteInvalid("colors must not be empty".into()));
    }

    let mut seen: BTreeMap<ColorTriple, &str> = BTreeMap::new();
    for entry in &palette.colors {
        if !is_safe_name(&entry.component) {
            return Err(SplitError::PaletteInvalid(format!(
                "component name '{}' for {} must be non-empty and contain no path separators",
                entry.component, entry.rgb
            )));
        }

        if let Some(previous) = seen.insert(entry.rgb, &entry.component) {
            return Err(SplitError::PaletteInvalid(format!(
                "{} is listed twice ('{}' and '{}')",
                entry.rgb, previous, entry.component
            )));
        }
    }

    Ok(())
}

/// Load a quadrant layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<QuadrantLayout, SplitError> {
    let content = std::fs::read_to_string(path).map_err(|e| SplitError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let layout: QuadrantLayout =
        serde_json::from_str(&content).map_err(|e| SplitError::LayoutLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a quadrant layout from a JSON string.
pub fn parse_layout_str(json: &str) -> Result<QuadrantLayout, SplitError> {
    let layout: QuadrantLayout = serde_json::from_str(json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate midlines and quadrant labels.
pub fn validate_layout(layout: &QuadrantLayout) -> Result<(), SplitError> {
    for (axis, value) in [("mid_x", layout.mid_x), ("mid_y", layout.mid_y)] {
        if !value.is_finite() || value < 0.0 {
            return Err(SplitError::LayoutInvalid(format!(
                "{axis} must be a finite, non-negative number (got {value})"
            )));
        }
    }

    let mut seen = HashSet::new();
    for quadrant in Quadrant::ALL {
        let label = layout.label(quadrant);
        if !is_safe_name(label) {
            return Err(SplitError::LayoutInvalid(format!(
                "label '{label}' for {quadrant} must be non-empty and contain no path separators"
            )));
        }
        if !seen.insert(label) {
            return Err(SplitError::LayoutInvalid(format!(
                "label '{label}' is used for more than one quadrant"
            )));
        }
    }

    Ok(())
}

/// Check an asset name before it becomes part of every output path.
pub fn validate_asset_name(name: &str) -> Result<(), SplitError> {
    if is_safe_name(name) {
        Ok(())
    } else {
        Err(SplitError::InvalidAsset(name.to_string()))
    }
}

/// Names end up as path components of output files.
fn is_safe_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed == name
        && !name.contains(|c| c == '/' || c == '\\')
        && name != "."
        && name != ".."
}
