use crate::model::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of four canvas regions split by fixed midlines.
///
/// Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
    ];

    /// Classify a point. Points on a midline go to the upper/right side.
    pub fn of(point: Coordinate, mid_x: f64, mid_y: f64) -> Quadrant {
        let left = point.x < mid_x;
        let upper = point.y >= mid_y;
        match (left, upper) {
            (true, true) => Quadrant::UpperLeft,
            (false, true) => Quadrant::UpperRight,
            (true, false) => Quadrant::LowerLeft,
            (false, false) => Quadrant::LowerRight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::UpperLeft => "upper-left",
            Quadrant::UpperRight => "upper-right",
            Quadrant::LowerLeft => "lower-left",
            Quadrant::LowerRight => "lower-right",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket names for the four quadrants of one asset sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantLabels {
    pub upper_left: String,
    pub upper_right: String,
    pub lower_left: String,
    pub lower_right: String,
}

impl QuadrantLabels {
    pub fn get(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::UpperLeft => &self.upper_left,
            Quadrant::UpperRight => &self.upper_right,
            Quadrant::LowerLeft => &self.lower_left,
            Quadrant::LowerRight => &self.lower_right,
        }
    }
}

impl Default for QuadrantLabels {
    fn default() -> Self {
        QuadrantLabels {
            upper_left: Quadrant::UpperLeft.as_str().to_string(),
            upper_right: Quadrant::UpperRight.as_str().to_string(),
            lower_left: Quadrant::LowerLeft.as_str().to_string(),
            lower_right: Quadrant::LowerRight.as_str().to_string(),
        }
    }
}

/// Midlines of a known canvas plus the names of its four characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantLayout {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub mid_x: f64,
    pub mid_y: f64,
    #[serde(default)]
    pub labels: QuadrantLabels,
}

impl QuadrantLayout {
    /// A layout with generic quadrant names.
    pub fn from_midlines(mid_x: f64, mid_y: f64) -> Self {
        QuadrantLayout {
            name: "custom".into(),
            description: None,
            mid_x,
            mid_y,
            labels: QuadrantLabels::default(),
        }
    }

    pub fn quadrant_of(&self, point: Coordinate) -> Quadrant {
        Quadrant::of(point, self.mid_x, self.mid_y)
    }

    pub fn label(&self, quadrant: Quadrant) -> &str {
        self.labels.get(quadrant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(x: f64, y: f64) -> Quadrant {
        Quadrant::of(Coordinate::new(x, y), 451.0, 474.0)
    }

    #[test]
    fn test_four_quadrants() {
        assert_eq!(q(10.0, 900.0), Quadrant::UpperLeft);
        assert_eq!(q(800.0, 900.0), Quadrant::UpperRight);
        assert_eq!(q(10.0, 20.0), Quadrant::LowerLeft);
        assert_eq!(q(800.0, 20.0), Quadrant::LowerRight);
    }

    #[test]
    fn test_midline_ties_go_upper_right() {
        assert_eq!(q(451.0, 474.0), Quadrant::UpperRight);
        assert_eq!(q(451.0, 10.0), Quadrant::LowerRight);
        assert_eq!(q(10.0, 474.0), Quadrant::UpperLeft);
    }

    #[test]
    fn test_default_labels() {
        let layout = QuadrantLayout::from_midlines(1.0, 1.0);
        assert_eq!(layout.label(Quadrant::LowerLeft), "lower-left");
    }

    #[test]
    fn test_layout_json() {
        let json = r#"{
            "name": "second-set",
            "mid_x": 451,
            "mid_y": 474,
            "labels": {
                "upper_left": "confused",
                "upper_right": "angry",
                "lower_left": "happy",
                "lower_right": "sad"
            }
        }"#;
        let layout: QuadrantLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.label(Quadrant::UpperRight), "angry");
        assert_eq!(layout.quadrant_of(Coordinate::new(10.0, 20.0)), Quadrant::LowerLeft);
    }
}
