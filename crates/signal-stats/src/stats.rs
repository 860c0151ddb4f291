//! Statistical Features Computation

use serde::{Deserialize, Serialize};

/// Statistical summary of a signal window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowStats {
    /// Mean value
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl WindowStats {
    /// Compute statistics from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        let mut m2 = 0.0;
        for &v in values {
            let d = v - mean;
            m2 += d * d;
        }
        let variance = m2 / n;

        Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Mean of a slice, 0.0 when empty
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Clamp a value into [0, 1]
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Axis-aligned extent of a set of 2D points
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Extent2D {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent2D {
    /// Bounding box over all points, `None` when the set is empty
    pub fn of_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let mut extent = Self {
            x_min: x0,
            x_max: x0,
            y_min: y0,
            y_max: y0,
        };
        for (x, y) in iter {
            extent.x_min = extent.x_min.min(x);
            extent.x_max = extent.x_max.max(x);
            extent.y_min = extent.y_min.min(y);
            extent.y_max = extent.y_max.max(y);
        }
        Some(extent)
    }

    /// Area spanned by the extent
    pub fn area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = WindowStats::compute(&values);
        assert!((stats.mean - 3.0).abs() < 0.001);
        assert!((mean(&values) - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_std_dev_computation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = WindowStats::compute(&values);
        // Population std dev for this dataset is exactly 2.0
        assert!((stats.std_dev - 2.0).abs() < 0.001);
        assert!((stats.variance - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_min_max() {
        let values = vec![3.0, -1.0, 7.5, 0.0];
        let stats = WindowStats::compute(&values);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 7.5);
    }

    #[test]
    fn test_empty_values() {
        let stats = WindowStats::compute(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.3), 0.3);
        assert_eq!(clamp01(1.7), 1.0);
    }

    #[test]
    fn test_extent_area() {
        let points = vec![(0.1, 0.2), (0.4, 0.2), (0.1, 0.6)];
        let extent = Extent2D::of_points(points).unwrap();
        assert!((extent.area() - 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_extent_single_point_has_zero_area() {
        let extent = Extent2D::of_points(vec![(0.5, 0.5)]).unwrap();
        assert_eq!(extent.area(), 0.0);
    }

    #[test]
    fn test_extent_empty() {
        assert!(Extent2D::of_points(Vec::new()).is_none());
    }

    proptest::proptest! {
        #[test]
        fn clamp01_stays_in_unit_interval(v in -1e6f64..1e6) {
            let c = clamp01(v);
            proptest::prop_assert!((0.0..=1.0).contains(&c));
        }

        #[test]
        fn extent_area_is_non_negative(
            points in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..64)
        ) {
            let extent = Extent2D::of_points(points).unwrap();
            proptest::prop_assert!(extent.area() >= 0.0);
        }
    }
}
