pub mod analyze;
pub mod presets;
pub mod split;

use epsplit_core::classify::quadrant::QuadrantLayout;
use epsplit_core::codec::decode_document;
use epsplit_core::error::SplitError;
use epsplit_core::palette::{self, builtin};
use std::path::Path;

/// Read and decode a source document.
pub fn read_document(path: &Path) -> Result<String, SplitError> {
    let bytes = std::fs::read(path)?;
    Ok(decode_document(&bytes).into_owned())
}

/// Resolve a layout from a preset name or a file, if either is given.
pub fn load_layout(
    preset: Option<&str>,
    file: Option<&Path>,
) -> Result<Option<QuadrantLayout>, SplitError> {
    match (preset, file) {
        (Some(name), _) => Ok(Some(builtin::load_layout_preset(name)?)),
        (None, Some(path)) => Ok(Some(palette::load_layout(path)?)),
        (None, None) => Ok(None),
    }
}
