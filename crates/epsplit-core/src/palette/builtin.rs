use crate::classify::quadrant::QuadrantLayout;
use crate::error::SplitError;
use crate::palette::schema::PaletteDef;

const LOVE_JSON: &str = include_str!("../../../../palettes/love.json");
const CROWN_JSON: &str = include_str!("../../../../palettes/crown.json");
const BALLOON_JSON: &str = include_str!("../../../../palettes/balloon.json");
const ILL_JSON: &str = include_str!("../../../../palettes/ill.json");
const EXPRESSIONS_JSON: &str = include_str!("../../../../palettes/expressions.json");

const FIRST_SET_JSON: &str = include_str!("../../../../palettes/layout-first-set.json");
const SECOND_SET_JSON: &str = include_str!("../../../../palettes/layout-second-set.json");

/// Available predefined palettes.
pub const PALETTE_PRESETS: &[&str] = &["love", "crown", "balloon", "ill", "expressions"];

/// Available predefined quadrant layouts.
pub const LAYOUT_PRESETS: &[&str] = &["first-set", "second-set"];

/// Load a predefined palette by name.
pub fn load_palette_preset(name: &str) -> Result<PaletteDef, SplitError> {
    let json = match name {
        "love" => LOVE_JSON,
        "crown" => CROWN_JSON,
        "balloon" => BALLOON_JSON,
        "ill" => ILL_JSON,
        "expressions" => EXPRESSIONS_JSON,
        _ => {
            return Err(SplitError::UnknownPreset {
                name: name.to_string(),
                available: PALETTE_PRESETS.join(", "),
            })
        }
    };
    Ok(serde_json::from_str(json)?)
}

/// Load a predefined quadrant layout by name.
pub fn load_layout_preset(name: &str) -> Result<QuadrantLayout, SplitError> {
    let json = match name {
        "first-set" => FIRST_SET_JSON,
        "second-set" => SECOND_SET_JSON,
        _ => {
            return Err(SplitError::UnknownPreset {
                name: name.to_string(),
                available: LAYOUT_PRESETS.join(", "),
            })
        }
    };
    Ok(serde_json::from_str(json)?)
}

/// Whether `name` is a palette preset rather than a layout preset.
pub fn is_palette_preset(name: &str) -> bool {
    PALETTE_PRESETS.contains(&name)
}
