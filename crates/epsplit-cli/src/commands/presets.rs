use epsplit_core::classify::quadrant::Quadrant;
use epsplit_core::error::SplitError;
use epsplit_core::palette::{self, builtin};
use std::path::Path;

pub fn list() -> Result<(), SplitError> {
    println!("Available palettes:\n");
    for name in builtin::PALETTE_PRESETS {
        let p = builtin::load_palette_preset(name)?;
        println!("  {:<12} {} colors (v{})", name, p.colors.len(), p.version);
        if let Some(ref desc) = p.description {
            println!("               {}", desc);
        }
        println!();
    }

    println!("Available layouts:\n");
    for name in builtin::LAYOUT_PRESETS {
        let l = builtin::load_layout_preset(name)?;
        let labels: Vec<&str> = Quadrant::ALL.iter().map(|&q| l.label(q)).collect();
        println!(
            "  {:<12} midlines x={} y={} [{}]",
            name,
            l.mid_x,
            l.mid_y,
            labels.join(", ")
        );
        if let Some(ref desc) = l.description {
            println!("               {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), SplitError> {
    if !builtin::is_palette_preset(preset) {
        return explain_layout(preset);
    }

    let p = builtin::load_palette_preset(preset)?;
    println!("{} (version {})\n", p.name, p.version);
    if let Some(ref desc) = p.description {
        println!("{}\n", desc);
    }

    println!(
        "Shapes drawn in these {} colors become components of the same name.",
        p.colors.len()
    );
    println!("Any other color goes to unknown_R_G_B, or extra_N with --infer-extras.\n");

    let width = p
        .colors
        .iter()
        .map(|c| c.component.len())
        .max()
        .unwrap_or(10)
        .max("Component".len());

    println!("  {:<16}  {:<width$}  Note", "Color", "Component", width = width);
    println!("  {}", "-".repeat(16 + 2 + width + 2 + 20));
    for entry in &p.colors {
        println!(
            "  {:<16}  {:<width$}  {}",
            entry.rgb.to_string(),
            entry.component,
            entry.note.as_deref().unwrap_or(""),
            width = width
        );
    }
    println!();
    Ok(())
}

fn explain_layout(preset: &str) -> Result<(), SplitError> {
    let l = builtin::load_layout_preset(preset)?;
    println!("{}\n", l.name);
    if let Some(ref desc) = l.description {
        println!("{}\n", desc);
    }

    println!(
        "Each shape goes to the quadrant of its first point, split at x={} and y={}.",
        l.mid_x, l.mid_y
    );
    println!("Points on a midline count as upper or right.\n");
    for q in Quadrant::ALL {
        println!("  {:<12} -> {}", q.as_str(), l.label(q));
    }
    println!();
    Ok(())
}

pub fn schema() -> Result<(), SplitError> {
    print!(
        r#"JSON Palette Schema
===================

A palette names the fill colors of one illustration. When you run
`epsplit components` or `epsplit shapes`, every shape is grouped under the
name of its fill color.

Top-level fields:
  name          (string, required)  Name of the palette
  description   (string, optional)  Which illustration it belongs to
  version       (string, required)  Version identifier (e.g., "1.0")
  colors        (array, required)   Color entries (see below)

Each entry in the "colors" array:
  rgb           (array, required)   [r, g, b], integers 0-255. Channels in
                                    the file are scaled by 255 and truncated,
                                    so ".5 .2 .3 rgb" is [127, 51, 76].
  component     (string, required)  Component name, used in file names.
                                    No path separators.
  note          (string, optional)  Free-form description.

Example:
{{
  "name": "love",
  "version": "1.0",
  "colors": [
    {{ "rgb": [163, 5, 52], "component": "body_main", "note": "Main body fill" }},
    {{ "rgb": [255, 255, 255], "component": "eyes_white" }}
  ]
}}

JSON Layout Schema
==================

A layout splits a sheet of four illustrations at two midlines. When you run
`epsplit quadrants`, every shape goes to the quadrant of its first point.

Top-level fields:
  name          (string, required)  Name of the layout
  description   (string, optional)  Which sheet it belongs to
  mid_x         (number, required)  x of the left/right split
  mid_y         (number, required)  y of the upper/lower split
  labels        (object, optional)  upper_left, upper_right, lower_left,
                                    lower_right. Default: the quadrant names.

Example:
{{
  "name": "second-set",
  "mid_x": 451,
  "mid_y": 474,
  "labels": {{
    "upper_left": "confused",
    "upper_right": "angry",
    "lower_left": "happy",
    "lower_right": "sad"
  }}
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), SplitError> {
    let content = std::fs::read_to_string(file)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    if value.get("colors").is_none() {
        let l = palette::parse_layout_str(&content)?;
        println!("Layout '{}' is valid.", l.name);
        println!("  Midlines: x={} y={}", l.mid_x, l.mid_y);
        for q in Quadrant::ALL {
            println!("  {:<12} -> {}", q.as_str(), l.label(q));
        }
        return Ok(());
    }

    let p = palette::parse_palette(&content, file)?;
    println!("Palette '{}' (v{}) is valid.", p.name, p.version);
    println!("  Colors: {}", p.colors.len());

    let mut warnings = Vec::new();
    for (i, entry) in p.colors.iter().enumerate() {
        if let Some(other) = p.colors[..i].iter().find(|e| e.component == entry.component) {
            warnings.push(format!(
                "{} and {} share component '{}' and will be merged",
                other.rgb, entry.rgb, entry.component
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
