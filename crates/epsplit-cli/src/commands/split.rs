use epsplit_core::classify::quadrant::QuadrantLayout;
use epsplit_core::classify::Strategy;
use epsplit_core::error::SplitError;
use epsplit_core::output::write_documents;
use epsplit_core::palette::{self, builtin, validate_asset_name, validate_layout, ColorMap};
use epsplit_core::{infer_palette, split_document, OutputLayout, SplitOptions};
use std::path::Path;

use crate::commands::{load_layout, read_document};
use crate::output;
use crate::{LayoutArgs, PaletteArgs, SplitArgs};

pub fn components(
    input_file: &Path,
    palette: &PaletteArgs,
    infer_extras: bool,
    args: &SplitArgs,
) -> Result<(), SplitError> {
    by_color(input_file, palette, infer_extras, args, OutputLayout::Components)
}

pub fn shapes(
    input_file: &Path,
    palette: &PaletteArgs,
    infer_extras: bool,
    args: &SplitArgs,
) -> Result<(), SplitError> {
    by_color(input_file, palette, infer_extras, args, OutputLayout::Shapes)
}

pub fn quadrants(
    input_file: &Path,
    layout: &LayoutArgs,
    translate: bool,
    args: &SplitArgs,
) -> Result<(), SplitError> {
    let layout = resolve_layout(layout)?;
    let text = read_document(input_file)?;
    let mut options = SplitOptions::new(asset_name(input_file, args)?, OutputLayout::Quadrants);
    options.translate = translate;
    run(&text, &Strategy::ByQuadrant(layout), &options, args)
}

fn by_color(
    input_file: &Path,
    palette: &PaletteArgs,
    infer_extras: bool,
    args: &SplitArgs,
    layout: OutputLayout,
) -> Result<(), SplitError> {
    let base = load_color_map(palette)?;
    let text = read_document(input_file)?;
    let map = if infer_extras {
        infer_palette(&text, &base)
    } else {
        base
    };
    let options = SplitOptions::new(asset_name(input_file, args)?, layout);
    run(&text, &Strategy::ByColor(map), &options, args)
}

fn run(
    text: &str,
    strategy: &Strategy,
    options: &SplitOptions,
    args: &SplitArgs,
) -> Result<(), SplitError> {
    let result = split_document(text, strategy, options);

    if !args.dry_run {
        let written = write_documents(&args.out, &result.documents, args.force)?;
        eprintln!(
            "Wrote {} document(s) under {}",
            written.len(),
            args.out.display()
        );
    }

    match args.output.as_str() {
        "json" => output::json::print_split(&result)?,
        _ => output::table::print_split(&result, args.dry_run),
    }

    Ok(())
}

fn load_color_map(args: &PaletteArgs) -> Result<ColorMap, SplitError> {
    let def = match (&args.palette, &args.palette_file) {
        (Some(name), _) => builtin::load_palette_preset(name)?,
        (None, Some(path)) => palette::load_palette(path)?,
        (None, None) => {
            return Err(SplitError::PaletteInvalid(
                "no palette specified (use --palette or --palette-file)".into(),
            ))
        }
    };
    Ok(ColorMap::from_def(&def))
}

fn resolve_layout(args: &LayoutArgs) -> Result<QuadrantLayout, SplitError> {
    if let (Some(mid_x), Some(mid_y)) = (args.mid_x, args.mid_y) {
        let layout = QuadrantLayout::from_midlines(mid_x, mid_y);
        validate_layout(&layout)?;
        return Ok(layout);
    }
    load_layout(args.layout.as_deref(), args.layout_file.as_deref())?.ok_or_else(|| {
        SplitError::LayoutInvalid(
            "no layout specified (use --layout, --layout-file or --mid-x/--mid-y)".into(),
        )
    })
}

fn asset_name(input_file: &Path, args: &SplitArgs) -> Result<String, SplitError> {
    let name = args.asset.clone().unwrap_or_else(|| {
        input_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "asset".into())
    });
    validate_asset_name(&name)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(asset: Option<&str>) -> SplitArgs {
        SplitArgs {
            asset: asset.map(String::from),
            out: PathBuf::from("."),
            force: false,
            dry_run: true,
            output: "table".into(),
        }
    }

    #[test]
    fn test_asset_defaults_to_file_stem() {
        let name = asset_name(Path::new("art/love.eps"), &args(None)).unwrap();
        assert_eq!(name, "love");
    }

    #[test]
    fn test_asset_escaping_out_dir_rejected() {
        let err = asset_name(Path::new("love.eps"), &args(Some("../x"))).unwrap_err();
        assert!(matches!(err, SplitError::InvalidAsset(ref name) if name == "../x"));
    }
}
