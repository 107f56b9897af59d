use crate::model::ColorTriple;
use serde::{Deserialize, Serialize};

/// A palette file: fill colors of one asset mapped to component names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub colors: Vec<PaletteEntryDef>,
}

/// A single color entry within a palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEntryDef {
    /// 8-bit channels, as produced by truncating `channel * 255`.
    pub rgb: ColorTriple,
    /// Bucket name, also used as a file and directory name.
    pub component: String,
    #[serde(default)]
    pub note: Option<String>,
}
