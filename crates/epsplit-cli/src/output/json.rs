use epsplit_core::analyze::{AnalysisReport, ColorComparison};
use epsplit_core::error::SplitError;
use epsplit_core::SplitResult;

pub fn print_split(result: &SplitResult) -> Result<(), SplitError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

pub fn print_analysis(
    reports: &[AnalysisReport],
    comparison: Option<&ColorComparison>,
) -> Result<(), SplitError> {
    let mut doc = serde_json::Map::new();
    doc.insert("documents".into(), serde_json::to_value(reports)?);
    if let Some(cmp) = comparison {
        doc.insert("comparison".into(), serde_json::to_value(cmp)?);
    }
    let json = serde_json::to_string_pretty(&doc)?;
    println!("{json}");
    Ok(())
}
