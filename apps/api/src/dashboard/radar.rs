//! Radar chart geometry for the criteria breakdown.
//!
//! Axes start at 12 o'clock and run clockwise. The radial domain is fixed at
//! 0–100; scores outside it are drawn clamped.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use crate::models::grading::Criterion;

pub const DOMAIN_MAX: i32 = 100;
pub const VIEWBOX: f64 = 300.0;
const CENTER: f64 = VIEWBOX / 2.0;
/// Leaves room around the outer ring for axis labels.
const RADIUS: f64 = VIEWBOX * 0.4;
const LABEL_RADIUS: f64 = RADIUS + 18.0;
const GRID_LEVELS: [i32; 4] = [25, 50, 75, 100];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub subject: String,
    pub value: i32,
    pub full_mark: i32,
    /// Outer end of the spoke.
    pub spoke_end: Point,
    pub label: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub axes: Vec<RadarAxis>,
    /// Score polygon, one vertex per axis.
    pub polygon: Vec<Point>,
    /// Concentric grid polygons, innermost first.
    pub grid: Vec<Vec<Point>>,
}

impl RadarChart {
    pub fn from_criteria(criteria: &[Criterion]) -> Self {
        let n = criteria.len();
        if n == 0 {
            return Self {
                axes: vec![],
                polygon: vec![],
                grid: vec![],
            };
        }

        let axes = criteria
            .iter()
            .enumerate()
            .map(|(i, c)| RadarAxis {
                subject: c.name.clone(),
                value: c.score,
                full_mark: DOMAIN_MAX,
                spoke_end: vertex(i, n, RADIUS),
                label: vertex(i, n, LABEL_RADIUS),
            })
            .collect();

        let polygon = criteria
            .iter()
            .enumerate()
            .map(|(i, c)| vertex(i, n, scaled_radius(c.score)))
            .collect();

        let grid = GRID_LEVELS
            .iter()
            .map(|&level| (0..n).map(|i| vertex(i, n, scaled_radius(level))).collect())
            .collect();

        Self {
            axes,
            polygon,
            grid,
        }
    }
}

fn scaled_radius(score: i32) -> f64 {
    let clamped = score.clamp(0, DOMAIN_MAX);
    RADIUS * f64::from(clamped) / f64::from(DOMAIN_MAX)
}

fn vertex(index: usize, count: usize, radius: f64) -> Point {
    let angle = TAU * index as f64 / count as f64 - FRAC_PI_2;
    Point {
        x: CENTER + radius * angle.cos(),
        y: CENTER + radius * angle.sin(),
    }
}

/// Formats points as an SVG `points` attribute.
pub fn svg_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
