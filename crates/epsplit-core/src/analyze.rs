//! Color and quadrant statistics over a source document.
//!
//! Used to author palettes: it shows which colors a document draws, how
//! often, and where their shapes start.

use crate::classify::quadrant::{Quadrant, QuadrantLayout};
use crate::geometry::BoundingBox;
use crate::model::{ColorTriple, Coordinate, Shape};
use crate::palette::ColorMap;
use crate::scan::runs::{build_runs, split_sections};
use crate::scan::shapes::split_shapes;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Statistics for one fill color.
#[derive(Debug, Clone, Serialize)]
pub struct ColorStats {
    pub color: ColorTriple,
    /// Palette name, when a palette was supplied and knows the color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub runs: usize,
    pub shapes: usize,
    /// Extent of the shapes' first coordinates.
    pub start_bbox: BoundingBox,
    pub center: Coordinate,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuadrantStats {
    pub quadrant: Quadrant,
    pub label: String,
    pub shapes: usize,
    /// Shape count per color, most frequent first.
    pub colors: Vec<(ColorTriple, usize)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub run_count: usize,
    pub shape_count: usize,
    pub orphan_starts: usize,
    /// Ordered by color.
    pub colors: Vec<ColorStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrants: Option<Vec<QuadrantStats>>,
}

impl AnalysisReport {
    pub fn color_set(&self) -> BTreeSet<ColorTriple> {
        self.colors.iter().map(|c| c.color).collect()
    }
}

/// Colors shared by every analyzed document, and the ones only a single
/// document uses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ColorComparison {
    pub common: Vec<ColorTriple>,
    pub unique: Vec<UniqueColors>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UniqueColors {
    pub source: String,
    pub colors: Vec<ColorTriple>,
}

#[derive(Default)]
struct Tally {
    runs: usize,
    starts: Vec<Coordinate>,
}

/// Analyze one decoded document.
pub fn analyze_document(
    source: &str,
    text: &str,
    layout: Option<&QuadrantLayout>,
    palette: Option<&ColorMap>,
) -> AnalysisReport {
    let sections = split_sections(text);
    let scan = build_runs(sections.body);

    let mut tallies: BTreeMap<ColorTriple, Tally> = BTreeMap::new();
    let mut shapes: Vec<Shape> = Vec::new();
    for run in &scan.runs {
        let split = split_shapes(run);
        let tally = tallies.entry(run.color).or_default();
        tally.runs += 1;
        tally.starts.extend(split.iter().map(|s| s.first));
        shapes.extend(split);
    }

    let colors = tallies
        .into_iter()
        .map(|(color, tally)| {
            let start_bbox = BoundingBox::from_points(tally.starts.iter().copied());
            ColorStats {
                color,
                component: palette.and_then(|p| p.get(color)).map(str::to_string),
                runs: tally.runs,
                shapes: tally.starts.len(),
                start_bbox,
                center: start_bbox.center(),
            }
        })
        .collect();

    let quadrants = layout.map(|layout| quadrant_stats(&shapes, layout));

    tracing::info!(
        source,
        runs = scan.runs.len(),
        shapes = shapes.len(),
        "analyzed document"
    );

    AnalysisReport {
        source: source.to_string(),
        run_count: scan.runs.len(),
        shape_count: shapes.len(),
        orphan_starts: scan.orphan_starts.len(),
        colors,
        quadrants,
    }
}

fn quadrant_stats(shapes: &[Shape], layout: &QuadrantLayout) -> Vec<QuadrantStats> {
    Quadrant::ALL
        .iter()
        .map(|&quadrant| {
            let mut counts: BTreeMap<ColorTriple, usize> = BTreeMap::new();
            for shape in shapes {
                if layout.quadrant_of(shape.first) == quadrant {
                    *counts.entry(shape.color).or_default() += 1;
                }
            }
            let mut colors: Vec<(ColorTriple, usize)> = counts.into_iter().collect();
            colors.sort_by(|a, b| b.1.cmp(&a.1));
            QuadrantStats {
                quadrant,
                label: layout.label(quadrant).to_string(),
                shapes: colors.iter().map(|(_, n)| n).sum(),
                colors,
            }
        })
        .collect()
}

/// Compare the color sets of several reports.
pub fn compare_documents(reports: &[AnalysisReport]) -> ColorComparison {
    let sets: Vec<BTreeSet<ColorTriple>> = reports.iter().map(AnalysisReport::color_set).collect();
    let Some((first, rest)) = sets.split_first() else {
        return ColorComparison::default();
    };

    let common: BTreeSet<ColorTriple> = first
        .iter()
        .filter(|c| rest.iter().all(|s| s.contains(c)))
        .copied()
        .collect();

    let unique = reports
        .iter()
        .zip(&sets)
        .enumerate()
        .map(|(i, (report, set))| UniqueColors {
            source: report.source.clone(),
            colors: set
                .iter()
                .filter(|c| {
                    sets.iter()
                        .enumerate()
                        .all(|(j, other)| j == i || !other.contains(c))
                })
                .copied()
                .collect(),
        })
        .collect();

    ColorComparison {
        common: common.into_iter().collect(),
        unique,
    }
}
