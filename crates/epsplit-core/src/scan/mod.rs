pub mod runs;
pub mod shapes;

use crate::model::{ColorTriple, Coordinate};
use regex::Regex;
use std::sync::LazyLock;

/// `r g b rgb` at the start of a line. Channels may omit the leading zero (`.5`).
static RE_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([.\d]+)\s+([.\d]+)\s+([.\d]+)\s+rgb").expect("valid color regex")
});

/// `x y mo` anywhere in a line.
static RE_MOVETO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.\d]+)\s+([.\d]+)\s+mo").expect("valid moveto regex"));

/// What the scanner recognized on one line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineToken {
    pub color: Option<ColorTriple>,
    pub path_start: Option<Coordinate>,
    pub fill: bool,
}

impl LineToken {
    pub fn is_payload_only(&self) -> bool {
        self.color.is_none() && self.path_start.is_none() && !self.fill
    }
}

/// Scan one line for a color declaration, a path start and a fill marker.
pub fn scan_line(line: &str) -> LineToken {
    LineToken {
        color: parse_color(line),
        path_start: parse_path_start(line),
        fill: is_fill(line),
    }
}

/// Parse a color declaration such as `.988235 .839216 .219608 rgb`.
pub fn parse_color(line: &str) -> Option<ColorTriple> {
    let caps = RE_COLOR.captures(line)?;
    let r = parse_number(&caps[1])?;
    let g = parse_number(&caps[2])?;
    let b = parse_number(&caps[3])?;
    Some(ColorTriple::from_channels(r, g, b))
}

/// Parse the first `x y mo` marker on a line.
pub fn parse_path_start(line: &str) -> Option<Coordinate> {
    let caps = RE_MOVETO.captures(line)?;
    let x = parse_number(&caps[1])?;
    let y = parse_number(&caps[2])?;
    Some(Coordinate::new(x, y))
}

/// A fill marker is a line that is exactly `f` once surrounding whitespace is removed.
pub fn is_fill(line: &str) -> bool {
    line.trim() == "f"
}

/// Parse a `[.\d]+` token. Tokens such as `.` or `1.2.3` are not numbers.
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
