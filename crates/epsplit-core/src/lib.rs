pub mod analyze;
pub mod assemble;
pub mod classify;
pub mod codec;
pub mod error;
pub mod geometry;
pub mod model;
pub mod output;
pub mod palette;
pub mod scan;

use assemble::{assemble, bucket_title, shape_title, DocumentSpec};
use classify::quadrant::Quadrant;
use classify::{classify_shapes, Strategy};
use geometry::{translate, BoundingBox};
use model::{Bucket, BucketKey, ColorTriple, Coordinate, OutputDocument, Shape};
use palette::ColorMap;
use scan::runs::{build_runs, split_sections, Sections};
use scan::shapes::split_shapes;
use serde::Serialize;
use std::fmt;

pub use analyze::{analyze_document, compare_documents};

/// How buckets are turned into documents and named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLayout {
    /// One document per bucket: `{asset}_components/{asset}_{bucket}.eps`.
    Components,
    /// One document per shape: `{asset}_parts/{bucket}/{asset}_{bucket}_{NN}.eps`.
    Shapes,
    /// One document per bucket, flat: `{asset}_{bucket}.eps`.
    Quadrants,
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Asset name used in titles and file names.
    pub asset: String,
    pub layout: OutputLayout,
    /// Move every document's payload so its box starts at the origin.
    pub translate: bool,
}

impl SplitOptions {
    pub fn new(asset: impl Into<String>, layout: OutputLayout) -> Self {
        SplitOptions {
            asset: asset.into(),
            layout,
            translate: false,
        }
    }
}

/// Recoverable oddities found while splitting. None of them stop the split.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// No `%%BeginSetup`; the header is a fixed-size prefix of the input.
    HeaderFallback,
    /// No page-content end; the trailer is a bare `%%EOF`.
    TrailerFallback,
    UnmappedColor { color: ColorTriple, bucket: String },
    /// A document has no coordinates or a zero-sized extent. Its box is
    /// declared as found and the payload is not translated.
    EmptyGeometry { document: String },
    OrphanPathStart { at: Coordinate },
    /// A color run that never starts a path.
    PathlessRun { color: ColorTriple },
    /// An expected quadrant received no shapes.
    MissingBucket { bucket: String },
}

impl fmt::Display for SplitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitWarning::HeaderFallback => {
                write!(f, "no %%BeginSetup marker, header is the first characters of the input")
            }
            SplitWarning::TrailerFallback => {
                write!(f, "no page-content end marker, using a bare %%EOF trailer")
            }
            SplitWarning::UnmappedColor { color, bucket } => {
                write!(f, "{color} is not in the palette, shapes go to '{bucket}'")
            }
            SplitWarning::EmptyGeometry { document } => {
                write!(f, "{document} has no usable geometry, payload left untranslated")
            }
            SplitWarning::OrphanPathStart { at } => {
                write!(f, "path start at {at} comes before any color and is ignored")
            }
            SplitWarning::PathlessRun { color } => {
                write!(f, "run drawn in {color} has no path start and yields no shapes")
            }
            SplitWarning::MissingBucket { bucket } => write!(f, "no shapes for '{bucket}'"),
        }
    }
}

/// Per-bucket totals reported alongside the documents.
#[derive(Debug, Clone, Serialize)]
pub struct BucketSummary {
    pub label: String,
    pub key: BucketKey,
    pub shapes: usize,
    pub colors: Vec<ColorTriple>,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitResult {
    pub asset: String,
    pub strategy: &'static str,
    pub layout: OutputLayout,
    pub run_count: usize,
    /// Path starts in the drawing body, including ones before any color.
    pub path_start_count: usize,
    pub shape_count: usize,
    pub buckets: Vec<BucketSummary>,
    pub documents: Vec<OutputDocument>,
    pub warnings: Vec<SplitWarning>,
}

/// Split one decoded document into standalone documents.
///
/// Never fails: malformed structure, unknown colors and missing geometry
/// are reported as warnings on the result.
pub fn split_document(text: &str, strategy: &Strategy, options: &SplitOptions) -> SplitResult {
    let sections = split_sections(text);
    let mut warnings = section_warnings(&sections);

    let scan = build_runs(sections.body);
    for &at in &scan.orphan_starts {
        warnings.push(SplitWarning::OrphanPathStart { at });
    }

    let mut shapes: Vec<Shape> = Vec::new();
    for run in &scan.runs {
        let split = split_shapes(run);
        if split.is_empty() {
            warnings.push(SplitWarning::PathlessRun { color: run.color });
        }
        shapes.extend(split);
    }

    let classification = classify_shapes(shapes, strategy);
    for &color in &classification.unmapped {
        let bucket = palette::fallback_name(color);
        warnings.push(SplitWarning::UnmappedColor { color, bucket });
    }

    let mut documents = Vec::new();
    let mut buckets = Vec::new();
    for bucket in &classification.buckets {
        let found = BoundingBox::scan_lines(bucket.shapes.iter().flat_map(|s| s.lines.iter()));
        let bbox = found.unwrap_or_default();
        match options.layout {
            OutputLayout::Shapes => {
                for shape in &bucket.shapes {
                    let doc = shape_document(&sections, bucket, shape, options, &mut warnings);
                    documents.push(doc);
                }
            }
            OutputLayout::Components | OutputLayout::Quadrants => {
                documents.push(bucket_document(&sections, bucket, found, options, &mut warnings));
            }
        }
        buckets.push(BucketSummary {
            label: bucket.label.clone(),
            key: bucket.key.clone(),
            shapes: bucket.shapes.len(),
            colors: bucket.colors(),
            bbox,
        });
    }

    if let Strategy::ByQuadrant(layout) = strategy {
        for q in Quadrant::ALL {
            let key = BucketKey::Quadrant(q);
            if !classification.buckets.iter().any(|b| b.key == key) {
                warnings.push(SplitWarning::MissingBucket {
                    bucket: layout.label(q).to_string(),
                });
            }
        }
    }

    for warning in &warnings {
        tracing::warn!(asset = %options.asset, "{warning}");
    }
    tracing::info!(
        asset = %options.asset,
        runs = scan.runs.len(),
        shapes = classification.shape_count(),
        buckets = buckets.len(),
        documents = documents.len(),
        "split document"
    );

    SplitResult {
        asset: options.asset.clone(),
        strategy: strategy.kind(),
        layout: options.layout,
        run_count: scan.runs.len(),
        path_start_count: scan.path_starts,
        shape_count: classification.shape_count(),
        buckets,
        documents,
        warnings,
    }
}

/// The base palette extended with `extra_N` names for every color the
/// document draws that the base does not know.
pub fn infer_palette(text: &str, base: &ColorMap) -> ColorMap {
    let sections = split_sections(text);
    let scan = build_runs(sections.body);
    base.with_inferred_extras(&scan.runs)
}

fn section_warnings(sections: &Sections<'_>) -> Vec<SplitWarning> {
    let mut warnings = Vec::new();
    if sections.header_fallback {
        warnings.push(SplitWarning::HeaderFallback);
    }
    if sections.trailer_fallback {
        warnings.push(SplitWarning::TrailerFallback);
    }
    warnings
}

fn bucket_document(
    sections: &Sections<'_>,
    bucket: &Bucket,
    bbox: Option<BoundingBox>,
    options: &SplitOptions,
    warnings: &mut Vec<SplitWarning>,
) -> OutputDocument {
    let asset = &options.asset;
    let label = &bucket.label;
    let relative_path = match options.layout {
        OutputLayout::Quadrants => format!("{asset}_{label}.eps"),
        _ => format!("{asset}_components/{asset}_{label}.eps"),
    };
    let note = match bucket.key {
        BucketKey::Quadrant(_) => format!("Quadrant: {label}"),
        BucketKey::Named(_) => format!("Component: {label}"),
    };
    render(
        sections,
        RenderInput {
            relative_path,
            bucket: label,
            title: bucket_title(asset, label),
            note,
            payload: bucket.payload(),
            bbox,
            shape_index: None,
            shape_count: bucket.shapes.len(),
        },
        options.translate,
        warnings,
    )
}

fn shape_document(
    sections: &Sections<'_>,
    bucket: &Bucket,
    shape: &Shape,
    options: &SplitOptions,
    warnings: &mut Vec<SplitWarning>,
) -> OutputDocument {
    let asset = &options.asset;
    let label = &bucket.label;
    let n = shape.index;
    render(
        sections,
        RenderInput {
            relative_path: format!("{asset}_parts/{label}/{asset}_{label}_{n:02}.eps"),
            bucket: label,
            title: shape_title(asset, label, n),
            note: format!("Shape {n:02} - {}", shape.color),
            payload: shape.payload(),
            bbox: Some(shape.bbox),
            shape_index: Some(n),
            shape_count: 1,
        },
        options.translate,
        warnings,
    )
}

struct RenderInput<'a> {
    relative_path: String,
    bucket: &'a str,
    title: String,
    note: String,
    payload: String,
    /// `None` when the payload holds no coordinate pair at all.
    bbox: Option<BoundingBox>,
    shape_index: Option<usize>,
    shape_count: usize,
}

fn render(
    sections: &Sections<'_>,
    input: RenderInput<'_>,
    translate_payload: bool,
    warnings: &mut Vec<SplitWarning>,
) -> OutputDocument {
    let bbox = input.bbox.unwrap_or_default();
    if input.bbox.is_none() || (translate_payload && bbox.is_empty()) {
        warnings.push(SplitWarning::EmptyGeometry {
            document: input.relative_path.clone(),
        });
    }

    let translated = translate_payload && !bbox.is_empty();
    let (payload, declared) = if translated {
        let shifted = translate(&input.payload, bbox.min_x, bbox.min_y);
        (shifted, bbox.at_origin())
    } else {
        (input.payload, bbox)
    };

    let content = assemble(
        &sections.header,
        &sections.trailer,
        &DocumentSpec {
            title: input.title,
            bbox: declared,
            note: Some(input.note),
            payload: &payload,
        },
    );
    tracing::debug!(path = %input.relative_path, bytes = content.len(), "assembled document");

    OutputDocument {
        relative_path: input.relative_path,
        bucket: input.bucket.to_string(),
        shape_index: input.shape_index,
        shape_count: input.shape_count,
        bbox: declared,
        translated,
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::quadrant::QuadrantLayout;

    const DOC: &str = "%!PS-Adobe-3.0\n%%BeginSetup\nsetup\n%%EndSetup\n\
.5 .2 .3 rgb\n10.0 20.0 mo\n30.0 40.0 li\nf\n\
.1 .9 .9 rgb\n500.0 600.0 mo\n520.0 610.0 li\nf\n\
%ADOBeginClientInjection: EndPageContent\n%%Trailer\n%%EOF\n";

    fn quadrants() -> Strategy {
        Strategy::ByQuadrant(QuadrantLayout::from_midlines(451.0, 474.0))
    }

    #[test]
    fn test_quadrant_split_names_and_warnings() {
        let result = split_document(DOC, &quadrants(), &SplitOptions::new("face", OutputLayout::Quadrants));
        let paths: Vec<&str> = result.documents.iter().map(|d| d.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["face_upper-right.eps", "face_lower-left.eps"]);
        let missing = result
            .warnings
            .iter()
            .filter(|w| matches!(w, SplitWarning::MissingBucket { .. }))
            .count();
        assert_eq!(missing, 2);
        assert!(!result.warnings.contains(&SplitWarning::HeaderFallback));
    }

    #[test]
    fn test_shapes_layout_paths() {
        let map = ColorMap::from_entries([(ColorTriple::new(127, 51, 76), "mouth".to_string())]);
        let result = split_document(
            DOC,
            &Strategy::ByColor(map),
            &SplitOptions::new("love", OutputLayout::Shapes),
        );
        let paths: Vec<&str> = result.documents.iter().map(|d| d.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "love_parts/mouth/love_mouth_01.eps",
                "love_parts/unknown_25_229_229/love_unknown_25_229_229_01.eps",
            ]
        );
        assert_eq!(result.documents[0].shape_index, Some(1));
        assert!(result.documents[0].content.contains("%% Shape 01 - RGB(127, 51, 76)\n"));
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, SplitWarning::UnmappedColor { .. })));
    }

    #[test]
    fn test_translate_declares_origin_box() {
        let mut options = SplitOptions::new("face", OutputLayout::Quadrants);
        options.translate = true;
        let result = split_document(DOC, &quadrants(), &options);
        let happy = &result.documents[1];
        assert!(happy.translated);
        let bbox = happy.bbox;
        assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y), (0.0, 0.0, 20.0, 20.0));
        assert!(happy.content.contains("0.0000 0.0000 mo\n"));
        assert!(happy.content.contains(".5 .2 .3 rgb\n"));
    }

    #[test]
    fn test_pathless_and_orphan_warnings() {
        let text = "%%EndSetup\n5.0 5.0 mo\n1 1 1 rgb\n0 J\n0 0 0 rgb\n1.0 1.0 mo\nf\n";
        let result = split_document(text, &Strategy::ByColor(ColorMap::default()), &SplitOptions::new("x", OutputLayout::Components));
        assert_eq!(result.shape_count, 1);
        assert_eq!(result.path_start_count, 2);
        assert!(result.warnings.contains(&SplitWarning::HeaderFallback));
        assert!(result.warnings.contains(&SplitWarning::TrailerFallback));
        assert!(result.warnings.contains(&SplitWarning::OrphanPathStart {
            at: Coordinate::new(5.0, 5.0)
        }));
        assert!(result.warnings.contains(&SplitWarning::PathlessRun {
            color: ColorTriple::new(255, 255, 255)
        }));
    }

    #[test]
    fn test_single_point_shape_declares_its_point() {
        let text = "%%EndSetup\n1 1 1 rgb\n7.0 8.0 mo\nf\n";
        for layout in [OutputLayout::Components, OutputLayout::Shapes] {
            let result = split_document(text, &Strategy::ByColor(ColorMap::default()), &SplitOptions::new("x", layout));
            let doc = &result.documents[0];
            assert_eq!((doc.bbox.min_x, doc.bbox.min_y, doc.bbox.max_x, doc.bbox.max_y), (7.0, 8.0, 7.0, 8.0));
            assert!(doc.content.contains("%%BoundingBox: 7 8 7 8\n"));
            assert!(doc.content.contains("%%HiResBoundingBox: 7 8 7 8\n"));
            assert!(!result
                .warnings
                .iter()
                .any(|w| matches!(w, SplitWarning::EmptyGeometry { .. })));
        }
    }

    #[test]
    fn test_single_point_shape_is_not_translated() {
        let text = "%%EndSetup\n1 1 1 rgb\n7.0 8.0 mo\nf\n";
        let mut options = SplitOptions::new("x", OutputLayout::Shapes);
        options.translate = true;
        let result = split_document(text, &Strategy::ByColor(ColorMap::default()), &options);
        let doc = &result.documents[0];
        assert!(!doc.translated);
        assert!(doc.content.contains("%%BoundingBox: 7 8 7 8\n"));
        assert!(doc.content.contains("7.0 8.0 mo\n"));
        assert!(result.warnings.contains(&SplitWarning::EmptyGeometry {
            document: "x_parts/unknown_255_255_255/x_unknown_255_255_255_01.eps".into()
        }));
    }

    #[test]
    fn test_infer_palette_from_document() {
        let map = infer_palette(DOC, &ColorMap::default());
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(ColorTriple::new(127, 51, 76)), Some("extra_1"));
        assert_eq!(map.get(ColorTriple::new(25, 229, 229)), Some("extra_2"));
    }
}
