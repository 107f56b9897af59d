use crate::model::{Coordinate, Run};
use crate::scan::{parse_color, parse_path_start};

const BEGIN_SETUP: &str = "%%BeginSetup";
const END_SETUP: &str = "%%EndSetup";
const END_PAGE_CONTENT: &str = "%ADOBeginClientInjection: EndPageContent";
const EOF_MARKER: &str = "%%EOF";

/// Characters kept as header when no `%%BeginSetup` marker exists.
pub const HEADER_FALLBACK_CHARS: usize = 5000;

/// Trailer used when the document has no recognizable page-content end.
pub const TRAILER_FALLBACK: &str = "\n%%EOF\n";

/// The three parts of a source document that the splitter cares about.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    /// Everything through `%%BeginSetup`, reused verbatim in every output.
    pub header: String,
    /// Page-content end through `%%EOF`, reused verbatim in every output.
    pub trailer: String,
    /// The drawing commands between `%%EndSetup` and the page-content end.
    pub body: &'a str,
    pub header_fallback: bool,
    pub trailer_fallback: bool,
}

/// Locate header, trailer and drawing body.
///
/// Missing markers never fail: the header falls back to a fixed-size prefix,
/// the trailer to a bare `%%EOF`, and the body to the document boundaries.
pub fn split_sections(text: &str) -> Sections<'_> {
    let (header, header_fallback) = match text.find(BEGIN_SETUP) {
        Some(idx) => (format!("{}\n", &text[..idx + BEGIN_SETUP.len()]), false),
        None => (prefix_chars(text, HEADER_FALLBACK_CHARS).to_string(), true),
    };

    let (trailer, trailer_fallback) = match find_trailer(text) {
        Some(span) => (format!("\n{span}"), false),
        None => (TRAILER_FALLBACK.to_string(), true),
    };

    Sections {
        header,
        trailer,
        body: find_body(text),
        header_fallback,
        trailer_fallback,
    }
}

fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn find_trailer(text: &str) -> Option<&str> {
    let start = text.find(END_PAGE_CONTENT)?;
    let eof = text[start..].find(EOF_MARKER)?;
    Some(&text[start..start + eof + EOF_MARKER.len()])
}

fn find_body(text: &str) -> &str {
    let start = match text.find(END_SETUP) {
        Some(idx) => {
            let after = idx + END_SETUP.len();
            let skipped = text[after..].len() - text[after..].trim_start().len();
            after + skipped
        }
        None => 0,
    };
    let end = text[start..]
        .find(END_PAGE_CONTENT)
        .map(|idx| start + idx)
        .unwrap_or(text.len());
    &text[start..end]
}

/// Output of the run-building pass.
#[derive(Debug, Clone, Default)]
pub struct RunScan<'a> {
    pub runs: Vec<Run<'a>>,
    /// Path starts seen before any color declaration. Informational only.
    pub orphan_starts: Vec<Coordinate>,
    /// Every path start in the body, orphaned or not.
    pub path_starts: usize,
}

/// Group body lines into runs, one per color declaration.
///
/// A run starts at its color declaration line and takes every following
/// line up to the next declaration. Lines before the first declaration
/// have no color and never form a run.
pub fn build_runs(body: &str) -> RunScan<'_> {
    let mut scan = RunScan::default();
    let mut current_color = None;
    let mut current: Vec<&str> = Vec::new();

    for line in body.split_terminator('\n') {
        if let Some(color) = parse_color(line) {
            if let Some(prev) = current_color {
                if !current.is_empty() {
                    scan.runs.push(Run {
                        color: prev,
                        lines: std::mem::take(&mut current),
                    });
                }
            }
            current_color = Some(color);
            current.clear();
        } else if let Some(start) = parse_path_start(line) {
            scan.path_starts += 1;
            if current_color.is_none() {
                tracing::debug!(x = start.x, y = start.y, "path start before any color");
                scan.orphan_starts.push(start);
            }
        }
        current.push(line);
    }

    if let Some(color) = current_color {
        if !current.is_empty() {
            scan.runs.push(Run {
                color,
                lines: current,
            });
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColorTriple;

    const DOC: &str = "%!PS-Adobe-3.0 EPSF-3.0\n\
%%BoundingBox: 0 0 902 948\n\
%%BeginSetup\n\
/mo /moveto load def\n\
%%EndSetup\n\
.5 .2 .3 rgb\n\
10.0 20.0 mo\n\
f\n\
%ADOBeginClientInjection: EndPageContent \"AI11EPS\"\n\
%ADOEndClientInjection: EndPageContent \"AI11EPS\"\n\
%%Trailer\n\
%%EOF\n";

    #[test]
    fn test_split_sections() {
        let s = split_sections(DOC);
        assert!(s.header.starts_with("%!PS-Adobe-3.0"));
        assert!(s.header.ends_with("%%BeginSetup\n"));
        assert!(s.trailer.starts_with("\n%ADOBeginClientInjection: EndPageContent"));
        assert!(s.trailer.ends_with("%%EOF"));
        assert_eq!(s.body, ".5 .2 .3 rgb\n10.0 20.0 mo\nf\n");
        assert!(!s.header_fallback);
        assert!(!s.trailer_fallback);
    }

    #[test]
    fn test_sections_fallback() {
        let text = ".5 .2 .3 rgb\n10.0 20.0 mo\nf\n";
        let s = split_sections(text);
        assert!(s.header_fallback);
        assert!(s.trailer_fallback);
        assert_eq!(s.header, text);
        assert_eq!(s.trailer, TRAILER_FALLBACK);
        assert_eq!(s.body, text);
    }

    #[test]
    fn test_header_fallback_is_bounded() {
        let text = "x".repeat(HEADER_FALLBACK_CHARS + 100);
        let s = split_sections(&text);
        assert_eq!(s.header.len(), HEADER_FALLBACK_CHARS);
    }

    #[test]
    fn test_trailer_needs_eof() {
        let s = split_sections("%ADOBeginClientInjection: EndPageContent\nno end");
        assert!(s.trailer_fallback);
    }

    #[test]
    fn test_build_runs_two_colors() {
        let body = ".5 .2 .3 rgb\n10.0 20.0 mo\n30.0 40.0 li\nf\n.1 .9 .9 rgb\n500.0 600.0 mo\nf\n";
        let scan = build_runs(body);
        assert_eq!(scan.runs.len(), 2);
        assert_eq!(scan.runs[0].color, ColorTriple::new(127, 51, 76));
        assert_eq!(scan.runs[0].lines, vec![".5 .2 .3 rgb", "10.0 20.0 mo", "30.0 40.0 li", "f"]);
        assert_eq!(scan.runs[1].color, ColorTriple::new(25, 229, 229));
        assert_eq!(scan.runs[1].lines[0], ".1 .9 .9 rgb");
    }

    #[test]
    fn test_leading_path_is_orphaned() {
        let body = "1.0 2.0 mo\n3.0 4.0 li\nf\n.5 .5 .5 rgb\n10.0 20.0 mo\nf\n";
        let scan = build_runs(body);
        assert_eq!(scan.runs.len(), 1);
        assert_eq!(scan.orphan_starts, vec![Coordinate::new(1.0, 2.0)]);
        assert_eq!(scan.runs[0].lines[0], ".5 .5 .5 rgb");
    }

    #[test]
    fn test_counts_every_path_start() {
        let body = "1.0 2.0 mo\nf\n.5 .5 .5 rgb\n10.0 20.0 mo\n11.0 21.0 mo\nf\n0 J\n";
        let scan = build_runs(body);
        assert_eq!(scan.path_starts, 3);
        assert_eq!(scan.orphan_starts.len(), 1);
    }

    #[test]
    fn test_no_color_no_runs() {
        let scan = build_runs("1.0 2.0 mo\nf\n");
        assert!(scan.runs.is_empty());
        assert_eq!(scan.orphan_starts.len(), 1);
    }

    #[test]
    fn test_consecutive_colors_keep_last() {
        let body = "1 0 0 rgb\n0 1 0 rgb\n5.0 5.0 mo\nf\n";
        let scan = build_runs(body);
        assert_eq!(scan.runs.len(), 2);
        assert_eq!(scan.runs[0].lines, vec!["1 0 0 rgb"]);
        assert_eq!(scan.runs[1].color, ColorTriple::new(0, 255, 0));
    }
}
