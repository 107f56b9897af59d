//! Bounding boxes and coordinate translation over raw payload text.
//!
//! Geometry is found by pattern, not by grammar: any two whitespace
//! separated `[.\d]+` tokens on a line count as an `x y` pair, whatever
//! operator follows them. Stray numeric pairs (dash arrays, line widths
//! written as pairs) are therefore scanned and shifted like coordinates.
//! Color declaration lines are the one exception, since their channels would
//! otherwise read as a pair near the origin.

use crate::model::Coordinate;
use crate::scan::{parse_color, parse_number};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static RE_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.\d]+)\s+([.\d]+)").expect("valid pair regex"));

/// Axis-aligned extent. All zeros when no coordinates were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Scan every coordinate pair in `text`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n'))
    }

    /// Scan every coordinate pair in a sequence of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::scan_lines(lines).unwrap_or_default()
    }

    /// Like [`BoundingBox::from_lines`], but `None` when no pair was found.
    pub fn scan_lines<I, S>(lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut points = Vec::new();
        for line in lines {
            let line = line.as_ref();
            if parse_color(line).is_some() {
                continue;
            }
            points.extend(line_pairs(line));
        }
        if points.is_empty() {
            return None;
        }
        Some(Self::from_points(points))
    }

    /// Extent of a set of points.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return BoundingBox::default();
        };
        let seed = BoundingBox {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        points.fold(seed, BoundingBox::include)
    }

    /// Center point of the extent.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    fn include(self, p: Coordinate) -> Self {
        BoundingBox {
            min_x: self.min_x.min(p.x),
            max_x: self.max_x.max(p.x),
            min_y: self.min_y.min(p.y),
            max_y: self.max_y.max(p.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Zero extent on both axes. Such a box is still declared, but there
    /// is nothing to translate.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 && self.height() <= 0.0
    }

    /// The same extent moved so that its lower-left corner sits at the origin.
    pub fn at_origin(&self) -> Self {
        BoundingBox {
            min_x: 0.0,
            max_x: self.width(),
            min_y: 0.0,
            max_y: self.height(),
        }
    }
}

fn line_pairs(line: &str) -> impl Iterator<Item = Coordinate> + '_ {
    RE_PAIR.captures_iter(line).filter_map(|caps| {
        let x = parse_number(&caps[1])?;
        let y = parse_number(&caps[2])?;
        Some(Coordinate::new(x, y))
    })
}

/// Subtract `(offset_x, offset_y)` from every coordinate pair in `text`.
///
/// Shifted pairs are written with four decimals. Color declarations and
/// tokens that do not parse as numbers are left untouched.
pub fn translate(text: &str, offset_x: f64, offset_y: f64) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for segment in text.split_inclusive('\n') {
        if parse_color(segment).is_some() {
            out.push_str(segment);
            continue;
        }
        let shifted = RE_PAIR.replace_all(segment, |caps: &Captures<'_>| {
            match (parse_number(&caps[1]), parse_number(&caps[2])) {
                (Some(x), Some(y)) => format!("{:.4} {:.4}", x - offset_x, y - offset_y),
                _ => caps[0].to_string(),
            }
        });
        out.push_str(&shifted);
    }
    out
}

/// Translate `text` so the lower-left corner of its own box is the origin.
///
/// Returns `None` when the text has no usable geometry.
pub fn translate_to_origin(text: &str) -> Option<(String, BoundingBox)> {
    let bbox = BoundingBox::from_text(text);
    if bbox.is_empty() {
        return None;
    }
    Some((translate(text, bbox.min_x, bbox.min_y), bbox))
}
