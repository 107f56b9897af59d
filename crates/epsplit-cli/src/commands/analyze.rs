use epsplit_core::error::SplitError;
use epsplit_core::palette::{builtin, ColorMap};
use epsplit_core::{analyze_document, compare_documents};
use std::path::{Path, PathBuf};

use crate::commands::{load_layout, read_document};
use crate::output;

pub fn run(
    input_files: &[PathBuf],
    layout: Option<&str>,
    layout_file: Option<&Path>,
    palette: Option<&str>,
    output_format: &str,
) -> Result<(), SplitError> {
    let layout = load_layout(layout, layout_file)?;
    let palette = match palette {
        Some(name) => Some(ColorMap::from_def(&builtin::load_palette_preset(name)?)),
        None => None,
    };

    let mut reports = Vec::new();
    for path in input_files {
        let text = read_document(path)?;
        let source = path.display().to_string();
        reports.push(analyze_document(
            &source,
            &text,
            layout.as_ref(),
            palette.as_ref(),
        ));
    }

    // Comparing a single document with itself says nothing.
    let comparison = (reports.len() > 1).then(|| compare_documents(&reports));

    match output_format {
        "json" => output::json::print_analysis(&reports, comparison.as_ref())?,
        _ => output::table::print_analysis(&reports, comparison.as_ref()),
    }

    Ok(())
}
