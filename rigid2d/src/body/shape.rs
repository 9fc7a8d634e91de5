// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Polygon shapes in body-local space

use crate::math::{Aabb, Vec2};

/// Closed polygon in body-local coordinates
///
/// The polygon is centred on the local origin, which is the point the body's
/// position translates. Vertices are immutable after construction and the
/// local bounding box is computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    local_bounds: Aabb,
}

impl Polygon {
    /// Minimum number of vertices of a polygon
    pub const MIN_POINTS: usize = 3;

    /// Create a polygon from its vertices in order
    ///
    /// Returns an error if fewer than three vertices are given or any
    /// coordinate is NaN or infinite.
    pub fn new(points: Vec<Vec2>) -> Result<Self, String> {
        if points.len() < Self::MIN_POINTS {
            return Err(format!(
                "Polygon needs at least {} points, got {}",
                Self::MIN_POINTS,
                points.len()
            ));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_valid()) {
            return Err(format!("Polygon point {:?} is not finite", bad));
        }

        let local_bounds = Aabb::from_points(points.iter().copied())
            .ok_or_else(|| "Polygon has no points".to_string())?;

        Ok(Polygon {
            points,
            local_bounds,
        })
    }

    /// Axis-aligned rectangle centred on the origin
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive and finite.
    pub fn rectangle(width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite(),
            "Rectangle dimensions must be positive and finite"
        );
        let x = width / 2.0;
        let y = height / 2.0;
        let points = vec![
            Vec2::new(x, y),
            Vec2::new(x, -y),
            Vec2::new(-x, -y),
            Vec2::new(-x, y),
        ];
        Polygon {
            local_bounds: Aabb::new(Vec2::new(-x, -y), Vec2::new(x, y)),
            points,
        }
    }

    /// Vertices in order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; polygons have at least three vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Local bounding box
    pub fn bounds(&self) -> Aabb {
        self.local_bounds
    }

    /// Radius of the circle around the bounding box centre that passes
    /// through its corners
    pub fn bounding_radius(&self) -> f64 {
        (self.local_bounds.min - self.local_bounds.center()).length()
    }

    /// Edges as `(start, end)` pairs, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Odd-even fill containment test for a point in local coordinates
    pub fn contains_point(&self, point: Vec2) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let cross_x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < cross_x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::new(vec![
            Vec2::new(0.0, 2.0),
            Vec2::new(-2.0, -1.0),
            Vec2::new(2.0, -1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_requires_three_points() {
        let err = Polygon::new(vec![Vec2::zero(), Vec2::new(1.0, 0.0)]).unwrap_err();
        assert!(err.contains("at least 3"));
    }

    #[test]
    fn test_polygon_rejects_non_finite() {
        let result = Polygon::new(vec![
            Vec2::zero(),
            Vec2::new(f64::NAN, 1.0),
            Vec2::new(1.0, 0.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rectangle_bounds() {
        let rect = Polygon::rectangle(50.0, 20.0);
        assert_eq!(rect.len(), 4);
        assert_eq!(rect.bounds().min, Vec2::new(-25.0, -10.0));
        assert_eq!(rect.bounds().max, Vec2::new(25.0, 10.0));
    }

    #[test]
    #[should_panic(expected = "Rectangle dimensions must be positive and finite")]
    fn test_rectangle_zero_width_panics() {
        Polygon::rectangle(0.0, 1.0);
    }

    #[test]
    fn test_bounding_radius_is_half_diagonal() {
        let rect = Polygon::rectangle(6.0, 8.0);
        assert!((rect.bounding_radius() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_radius_uses_box_centre() {
        let tri = triangle();
        // box is [-2, 2] x [-1, 2], centre (0, 0.5)
        let expected = (4.0_f64 + 2.25).sqrt();
        assert!((tri.bounding_radius() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_edges_close_the_loop() {
        let tri = triangle();
        let edges: Vec<_> = tri.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2].1, tri.points()[0]);
    }

    #[test]
    fn test_contains_point() {
        let tri = triangle();
        assert!(tri.contains_point(Vec2::new(0.0, 0.0)));
        assert!(!tri.contains_point(Vec2::new(1.8, 1.8)));
        assert!(!tri.contains_point(Vec2::new(0.0, -3.0)));
    }

    #[test]
    fn test_contains_point_concave() {
        // U shape opening upwards
        let u = Polygon::new(vec![
            Vec2::new(-3.0, -3.0),
            Vec2::new(3.0, -3.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(1.0, 3.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(-1.0, 3.0),
            Vec2::new(-3.0, 3.0),
        ])
        .unwrap();
        assert!(u.contains_point(Vec2::new(2.0, 2.0)));
        assert!(!u.contains_point(Vec2::new(0.0, 2.0)));
        assert!(u.contains_point(Vec2::new(0.0, -2.0)));
    }
}
