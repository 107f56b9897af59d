use crate::classify::quadrant::Quadrant;
use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB fill color, as derived from an `rgb` declaration.
///
/// This is the join key between a drawing run and a palette entry, so
/// equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct ColorTriple {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorTriple {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        ColorTriple { r, g, b }
    }

    /// Convert three channel values in `[0, 1]` to bytes.
    ///
    /// Each channel is scaled by 255 and truncated, never rounded: palettes
    /// were authored against truncated values, so `0.999999` must map to 254.
    /// Values above 1 saturate at 255.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        ColorTriple {
            r: channel_to_byte(r),
            g: channel_to_byte(g),
            b: channel_to_byte(b),
        }
    }
}

fn channel_to_byte(value: f64) -> u8 {
    let scaled = (value * 255.0).trunc();
    scaled.clamp(0.0, 255.0) as u8
}

impl From<[u8; 3]> for ColorTriple {
    fn from([r, g, b]: [u8; 3]) -> Self {
        ColorTriple { r, g, b }
    }
}

impl From<ColorTriple> for [u8; 3] {
    fn from(c: ColorTriple) -> Self {
        [c.r, c.g, c.b]
    }
}

impl fmt::Display for ColorTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A point in document user-space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Contiguous span of body lines drawn under one fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct Run<'a> {
    pub color: ColorTriple,
    pub lines: Vec<&'a str>,
}

/// One discrete path, from its `mo` marker to its fill (or the next `mo`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub color: ColorTriple,
    /// Raw payload lines, including any color declaration that opened the run.
    pub lines: Vec<String>,
    pub first: Coordinate,
    pub bbox: BoundingBox,
    /// One-based position within its bucket. Zero until classified.
    pub index: usize,
}

impl Shape {
    /// Payload text, one `\n` after every line.
    pub fn payload(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Classification key of a bucket.
///
/// Quadrant keys order before named keys, and quadrants keep their
/// canvas order, so a `BTreeMap` over keys gives stable output ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKey {
    Quadrant(Quadrant),
    Named(String),
}

/// Shapes sharing a classification key, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub key: BucketKey,
    /// Human-readable name used in titles and file names.
    pub label: String,
    pub shapes: Vec<Shape>,
}

impl Bucket {
    pub fn new(key: BucketKey, label: impl Into<String>) -> Self {
        Bucket {
            key,
            label: label.into(),
            shapes: Vec::new(),
        }
    }

    /// Concatenated payload of every shape in the bucket.
    pub fn payload(&self) -> String {
        self.shapes.iter().map(Shape::payload).collect()
    }

    /// Distinct colors drawn in this bucket, in first-seen order.
    pub fn colors(&self) -> Vec<ColorTriple> {
        let mut seen = Vec::new();
        for shape in &self.shapes {
            if !seen.contains(&shape.color) {
                seen.push(shape.color);
            }
        }
        seen
    }
}

/// One assembled standalone document, ready for the driver to write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    /// Path relative to the output directory.
    pub relative_path: String,
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_index: Option<usize>,
    pub shape_count: usize,
    /// Declared extent, after translation when the payload was translated.
    pub bbox: BoundingBox,
    pub translated: bool,
    #[serde(skip)]
    pub content: String,
}
