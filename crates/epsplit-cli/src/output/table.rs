use epsplit_core::analyze::{AnalysisReport, ColorComparison};
use epsplit_core::assemble::bounding_box_declaration;
use epsplit_core::model::ColorTriple;
use epsplit_core::SplitResult;

pub fn print_split(result: &SplitResult, dry_run: bool) {
    println!("=== {} ({} strategy) ===\n", result.asset, result.strategy);
    println!(
        "  Runs: {}   Path starts: {}   Shapes: {}\n",
        result.run_count, result.path_start_count, result.shape_count
    );

    if !result.buckets.is_empty() {
        let width = result
            .buckets
            .iter()
            .map(|b| b.label.len())
            .max()
            .unwrap_or(10);

        for bucket in &result.buckets {
            let colors: Vec<String> = bucket.colors.iter().map(ColorTriple::to_string).collect();
            println!(
                "  {:<width$}  {:>3} shape(s)  {}",
                bucket.label,
                bucket.shapes,
                colors.join(" "),
                width = width
            );
        }
        println!();
    }

    let verb = if dry_run { "Would write" } else { "Documents" };
    println!("  {} ({}):", verb, result.documents.len());
    for doc in &result.documents {
        let bbox = bounding_box_declaration(&doc.bbox);
        let translated = if doc.translated { " (translated)" } else { "" };
        println!("    {}  [{}]{}", doc.relative_path, bbox, translated);
    }

    if !result.warnings.is_empty() {
        println!("\n  Warnings:");
        for w in &result.warnings {
            println!("    - {}", w);
        }
    }
    println!();
}

pub fn print_analysis(reports: &[AnalysisReport], comparison: Option<&ColorComparison>) {
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_report(report);
    }

    if let Some(cmp) = comparison {
        println!("=== Comparison ===\n");
        let common: Vec<String> = cmp.common.iter().map(ColorTriple::to_string).collect();
        println!("  Common to all ({}): {}", common.len(), common.join(" "));
        for unique in &cmp.unique {
            let colors: Vec<String> = unique.colors.iter().map(ColorTriple::to_string).collect();
            println!(
                "  Only in {} ({}): {}",
                unique.source,
                colors.len(),
                colors.join(" ")
            );
        }
        println!();
    }
}

fn print_report(report: &AnalysisReport) {
    println!("=== {} ===\n", report.source);
    println!(
        "  Runs: {}   Shapes: {}   Colors: {}",
        report.run_count,
        report.shape_count,
        report.colors.len()
    );
    if report.orphan_starts > 0 {
        println!("  Path starts before any color: {}", report.orphan_starts);
    }
    println!();

    println!(
        "  {:<18}  {:<16}  {:>4}  {:>6}  {:<20}  Start extent",
        "Color", "Component", "Runs", "Shapes", "Center"
    );
    println!("  {}", "-".repeat(96));
    for stats in &report.colors {
        let center = format!("({:.1}, {:.1})", stats.center.x, stats.center.y);
        let extent = format!(
            "x {:.1}..{:.1}  y {:.1}..{:.1}",
            stats.start_bbox.min_x,
            stats.start_bbox.max_x,
            stats.start_bbox.min_y,
            stats.start_bbox.max_y
        );
        println!(
            "  {:<18}  {:<16}  {:>4}  {:>6}  {:<20}  {}",
            stats.color.to_string(),
            stats.component.as_deref().unwrap_or("-"),
            stats.runs,
            stats.shapes,
            center,
            extent
        );
    }
    println!();

    if let Some(ref quadrants) = report.quadrants {
        println!("  Quadrants:");
        for q in quadrants {
            println!("    {} ({}): {} shape(s)", q.label, q.quadrant, q.shapes);
            for (color, count) in &q.colors {
                println!("      {:<18}  {}", color.to_string(), count);
            }
        }
        println!();
    }
}
