use crate::geometry::BoundingBox;

pub const CREATOR: &str = "epsplit";

/// Everything that varies between two assembled documents.
#[derive(Debug, Clone)]
pub struct DocumentSpec<'a> {
    pub title: String,
    /// Declared extent. All zeros when the payload has no coordinates.
    pub bbox: BoundingBox,
    /// Single comment line placed right above the payload.
    pub note: Option<String>,
    pub payload: &'a str,
}

/// Build a standalone EPS document around a payload.
///
/// The header and trailer are copied verbatim. Output depends only on the
/// inputs, so assembling twice gives identical bytes.
pub fn assemble(header: &str, trailer: &str, doc: &DocumentSpec<'_>) -> String {
    let mut out = String::with_capacity(header.len() + trailer.len() + doc.payload.len() + 256);

    out.push_str("%!PS-Adobe-3.0 EPSF-3.0\n");
    out.push_str(&format!("%%Title: {}\n", doc.title));
    out.push_str(&format!("%%Creator: {CREATOR}\n"));
    out.push_str(&format!(
        "%%BoundingBox: {}\n",
        bounding_box_declaration(&doc.bbox)
    ));
    out.push_str(&format!(
        "%%HiResBoundingBox: {}\n",
        hires_declaration(&doc.bbox)
    ));
    out.push_str("%%EndComments\n\n");

    out.push_str(header);
    out.push_str("\n%%EndSetup\n\n");

    if let Some(note) = &doc.note {
        out.push_str(&format!("%% {note}\n"));
    }
    out.push_str(doc.payload);
    out.push_str("\n\n");

    out.push_str(trailer);
    out.push('\n');
    out
}

/// `llx lly urx ury`, each truncated toward zero.
pub fn bounding_box_declaration(bbox: &BoundingBox) -> String {
    format!(
        "{} {} {} {}",
        bbox.min_x as i64, bbox.min_y as i64, bbox.max_x as i64, bbox.max_y as i64
    )
}

/// `llx lly urx ury` at full precision, never in exponent form.
pub fn hires_declaration(bbox: &BoundingBox) -> String {
    format!(
        "{} {} {} {}",
        bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
    )
}

/// Title of a bucket-level document.
pub fn bucket_title(asset: &str, bucket: &str) -> String {
    format!("{asset} - {bucket}")
}

/// Title of a single-shape document.
pub fn shape_title(asset: &str, bucket: &str, index: usize) -> String {
    format!("{asset} - {bucket} - shape_{index:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox() -> BoundingBox {
        BoundingBox {
            min_x: 10.0,
            max_x: 30.75,
            min_y: 20.5,
            max_y: 40.0,
        }
    }

    #[test]
    fn test_declarations() {
        assert_eq!(bounding_box_declaration(&bbox()), "10 20 30 40");
        assert_eq!(hires_declaration(&bbox()), "10 20.5 30.75 40");
    }

    #[test]
    fn test_assemble_layout() {
        let doc = DocumentSpec {
            title: shape_title("love", "eyes_white", 2),
            bbox: bbox(),
            note: Some("Shape 02 - RGB(255, 255, 255)".into()),
            payload: "1 1 1 rgb\n10.0 20.5 mo\nf\n",
        };
        let out = assemble("%!PS-Adobe-3.0\n%%BeginSetup\n", "\n%%EOF", &doc);
        let expected = "%!PS-Adobe-3.0 EPSF-3.0\n\
%%Title: love - eyes_white - shape_02\n\
%%Creator: epsplit\n\
%%BoundingBox: 10 20 30 40\n\
%%HiResBoundingBox: 10 20.5 30.75 40\n\
%%EndComments\n\
\n\
%!PS-Adobe-3.0\n\
%%BeginSetup\n\
\n\
%%EndSetup\n\
\n\
%% Shape 02 - RGB(255, 255, 255)\n\
1 1 1 rgb\n\
10.0 20.5 mo\n\
f\n\
\n\
\n\
\n\
%%EOF\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_zero_box_is_still_declared() {
        let doc = DocumentSpec {
            title: bucket_title("love", "mouth"),
            bbox: BoundingBox::default(),
            note: None,
            payload: "f\n",
        };
        let out = assemble("H\n", "\n%%EOF\n", &doc);
        assert!(out.contains("%%BoundingBox: 0 0 0 0\n"));
        assert!(out.contains("%%HiResBoundingBox: 0 0 0 0\n"));
        assert!(out.contains("%%Title: love - mouth\n"));
    }

    #[test]
    fn test_hires_has_no_exponent() {
        let b = BoundingBox {
            min_x: 0.00001,
            max_x: 1e21,
            min_y: 0.5,
            max_y: 2.0,
        };
        let decl = hires_declaration(&b);
        assert_eq!(decl, "0.00001 0.5 1000000000000000000000 2");
        assert!(!decl.contains('e'));
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let doc = DocumentSpec {
            title: "a - b".into(),
            bbox: bbox(),
            note: None,
            payload: "10.0 20.5 mo\nf\n",
        };
        assert_eq!(assemble("H\n", "T", &doc), assemble("H\n", "T", &doc));
    }

    #[test]
    fn test_negative_bbox_truncates_toward_zero() {
        let b = BoundingBox {
            min_x: -1.5,
            max_x: 2.9,
            min_y: 0.0,
            max_y: 0.5,
        };
        assert_eq!(bounding_box_declaration(&b), "-1 0 2 0");
    }
}
