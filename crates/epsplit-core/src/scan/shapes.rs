use crate::geometry::BoundingBox;
use crate::model::{Coordinate, Run, Shape};
use crate::scan::{is_fill, parse_path_start};

/// Split a run into its individual shapes.
///
/// Every path start opens a new shape. A shape ends at a fill line
/// (inclusive) or right before the next path start. Lines of the run that
/// precede the first path start, normally just the color declaration, lead
/// the first shape; lines between a fill and the next path start lead the
/// next shape. Lines trailing the last fill stay with the last shape so no
/// payload is lost. A run without any path start yields no shapes.
pub fn split_shapes(run: &Run<'_>) -> Vec<Shape> {
    let mut shapes: Vec<Shape> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut start: Option<Coordinate> = None;

    for &line in &run.lines {
        if let Some(coord) = parse_path_start(line) {
            if let Some(open) = start {
                shapes.push(make_shape(run, &current, open));
                current.clear();
            }
            start = Some(coord);
        }

        current.push(line);

        if is_fill(line) {
            if let Some(open) = start.take() {
                shapes.push(make_shape(run, &current, open));
                current.clear();
            }
        }
    }

    match start {
        Some(open) => shapes.push(make_shape(run, &current, open)),
        None => {
            if let Some(last) = shapes.last_mut() {
                if !current.is_empty() {
                    last.lines.extend(current.iter().map(|s| s.to_string()));
                    last.bbox = BoundingBox::from_lines(&last.lines);
                }
            }
        }
    }

    tracing::debug!(color = %run.color, shapes = shapes.len(), "split run");
    shapes
}

fn make_shape(run: &Run<'_>, lines: &[&str], first: Coordinate) -> Shape {
    let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
    let bbox = BoundingBox::from_lines(&lines);
    Shape {
        color: run.color,
        lines,
        first,
        bbox,
        index: 0,
    }
}
