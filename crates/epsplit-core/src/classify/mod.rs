pub mod quadrant;

use crate::model::{Bucket, BucketKey, ColorTriple, Shape};
use crate::palette::ColorMap;
use quadrant::QuadrantLayout;
use std::collections::BTreeMap;

/// How shapes are assigned to buckets. One strategy per invocation.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Bucket by palette name of the fill color.
    ByColor(ColorMap),
    /// Bucket by the canvas quadrant of the shape's first coordinate.
    ByQuadrant(QuadrantLayout),
}

impl Strategy {
    /// Bucket key for a shape. Pure function of the shape's color or first point.
    pub fn classify(&self, shape: &Shape) -> BucketKey {
        match self {
            Strategy::ByColor(map) => BucketKey::Named(map.name_for(shape.color).into_owned()),
            Strategy::ByQuadrant(layout) => BucketKey::Quadrant(layout.quadrant_of(shape.first)),
        }
    }

    /// Display name of a bucket key under this strategy.
    pub fn label(&self, key: &BucketKey) -> String {
        match (self, key) {
            (Strategy::ByQuadrant(layout), BucketKey::Quadrant(q)) => layout.label(*q).to_string(),
            (_, BucketKey::Quadrant(q)) => q.to_string(),
            (_, BucketKey::Named(name)) => name.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Strategy::ByColor(_) => "color",
            Strategy::ByQuadrant(_) => "quadrant",
        }
    }
}

/// Shapes grouped into buckets.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Non-empty buckets in key order.
    pub buckets: Vec<Bucket>,
    /// Colors that fell back to an `unknown_*` bucket, in first-seen order.
    pub unmapped: Vec<ColorTriple>,
}

impl Classification {
    pub fn shape_count(&self) -> usize {
        self.buckets.iter().map(|b| b.shapes.len()).sum()
    }

    pub fn bucket(&self, label: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.label == label)
    }
}

/// Assign every shape to exactly one bucket, numbering shapes within each
/// bucket from 1 in document order.
pub fn classify_shapes(shapes: Vec<Shape>, strategy: &Strategy) -> Classification {
    let mut buckets: BTreeMap<BucketKey, Bucket> = BTreeMap::new();
    let mut unmapped = Vec::new();

    for mut shape in shapes {
        if let Strategy::ByColor(map) = strategy {
            if map.get(shape.color).is_none() && !unmapped.contains(&shape.color) {
                tracing::warn!(color = %shape.color, "color not in palette, using fallback bucket");
                unmapped.push(shape.color);
            }
        }

        let key = strategy.classify(&shape);
        let bucket = buckets
            .entry(key.clone())
            .or_insert_with(|| Bucket::new(key.clone(), strategy.label(&key)));
        shape.index = bucket.shapes.len() + 1;
        tracing::debug!(
            bucket = %bucket.label,
            index = shape.index,
            x = shape.first.x,
            y = shape.first.y,
            "classified shape"
        );
        bucket.shapes.push(shape);
    }

    Classification {
        buckets: buckets.into_values().collect(),
        unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::quadrant::{Quadrant, QuadrantLabels};
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::model::Coordinate;

    fn shape(color: ColorTriple, x: f64, y: f64) -> Shape {
        Shape {
            color,
            lines: vec![format!("{x} {y} mo"), "f".into()],
            first: Coordinate::new(x, y),
            bbox: BoundingBox::default(),
            index: 0,
        }
    }

    fn white() -> ColorTriple {
        ColorTriple::new(255, 255, 255)
    }

    fn second_set() -> QuadrantLayout {
        QuadrantLayout {
            name: "second-set".into(),
            description: None,
            mid_x: 451.0,
            mid_y: 474.0,
            labels: QuadrantLabels {
                upper_left: "confused".into(),
                upper_right: "angry".into(),
                lower_left: "happy".into(),
                lower_right: "sad".into(),
            },
        }
    }

    #[test]
    fn test_color_strategy_numbers_within_bucket() {
        let map = ColorMap::from_entries([(white(), "eyes_white".to_string())]);
        let shapes = vec![
            shape(white(), 1.0, 1.0),
            shape(ColorTriple::new(1, 2, 3), 2.0, 2.0),
            shape(white(), 3.0, 3.0),
        ];
        let c = classify_shapes(shapes, &Strategy::ByColor(map));
        assert_eq!(c.shape_count(), 3);
        let eyes = c.bucket("eyes_white").unwrap();
        assert_eq!(eyes.shapes.len(), 2);
        assert_eq!(eyes.shapes[0].index, 1);
        assert_eq!(eyes.shapes[1].index, 2);
        assert_eq!(eyes.shapes[1].first.x, 3.0);
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let map = ColorMap::default();
        let c = classify_shapes(
            vec![shape(ColorTriple::new(1, 2, 3), 0.0, 0.0)],
            &Strategy::ByColor(map),
        );
        assert!(c.bucket("unknown_1_2_3").is_some());
        assert_eq!(c.unmapped, vec![ColorTriple::new(1, 2, 3)]);
    }

    #[test]
    fn test_color_buckets_sorted_by_name() {
        let map = ColorMap::from_entries([
            (white(), "mouth".to_string()),
            (ColorTriple::new(0, 0, 0), "body_main".to_string()),
        ]);
        let shapes = vec![shape(white(), 0.0, 0.0), shape(ColorTriple::new(0, 0, 0), 0.0, 0.0)];
        let c = classify_shapes(shapes, &Strategy::ByColor(map));
        let labels: Vec<&str> = c.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["body_main", "mouth"]);
    }

    #[test]
    fn test_quadrant_strategy_labels() {
        let shapes = vec![
            shape(white(), 10.0, 20.0),
            shape(white(), 500.0, 600.0),
            shape(white(), 451.0, 474.0),
        ];
        let c = classify_shapes(shapes, &Strategy::ByQuadrant(second_set()));
        assert_eq!(c.buckets.len(), 2);
        assert_eq!(c.buckets[0].key, BucketKey::Quadrant(Quadrant::UpperRight));
        assert_eq!(c.buckets[0].label, "angry");
        assert_eq!(c.buckets[0].shapes.len(), 2);
        assert_eq!(c.bucket("happy").unwrap().shapes.len(), 1);
        assert!(c.unmapped.is_empty());
    }

    #[test]
    fn test_quadrant_is_independent_of_order() {
        let strategy = Strategy::ByQuadrant(second_set());
        let a = strategy.classify(&shape(white(), 100.0, 100.0));
        let b = strategy.classify(&shape(ColorTriple::new(9, 9, 9), 200.0, 300.0));
        assert_eq!(a, b);
    }
}
