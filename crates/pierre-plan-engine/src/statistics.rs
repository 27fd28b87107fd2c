// ABOUTME: Order statistics for activity metrics: quartiles, interquartile range and Tukey fences
// ABOUTME: Quartiles use linear interpolation between closest ranks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// First quartile, median and third quartile of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile
    pub q1: f64,
    /// 50th percentile
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
}

impl Quartiles {
    /// Quartiles of the finite values, `None` when there are none
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            q1: percentile_of_sorted(&sorted, 0.25),
            median: percentile_of_sorted(&sorted, 0.5),
            q3: percentile_of_sorted(&sorted, 0.75),
        })
    }

    /// Interquartile range
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Tukey fences `(Q1 - k * IQR, Q3 + k * IQR)`
    #[must_use]
    pub fn fences(&self, multiplier: f64) -> TukeyFence {
        let spread = self.iqr() * multiplier;
        TukeyFence {
            lower: self.q1 - spread,
            upper: self.q3 + spread,
        }
    }
}

/// Inclusive acceptance interval for outlier rejection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TukeyFence {
    /// Smallest accepted value
    pub lower: f64,
    /// Largest accepted value
    pub upper: f64,
}

impl TukeyFence {
    /// Whether `value` lies inside the fence
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Percentile `q` (0..=1) of an ascending slice by linear interpolation
///
/// Returns 0 for an empty slice.
#[must_use]
pub fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        len => {
            let rank = q.clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(len - 1);
            let weight = rank - rank.floor();
            sorted[lower].mul_add(1.0 - weight, sorted[upper] * weight)
        }
    }
}

/// Arithmetic mean of the finite values, `None` when there are none
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_interpolate_between_ranks() {
        let quartiles = Quartiles::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((quartiles.q1 - 1.75).abs() < 1e-12);
        assert!((quartiles.median - 2.5).abs() < 1e-12);
        assert!((quartiles.q3 - 3.25).abs() < 1e-12);
        assert!((quartiles.iqr() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_fence_rejects_far_values() {
        let fence = Quartiles::from_values(&[5.0, 5.2, 5.4, 5.6, 5.8, 20.0])
            .unwrap()
            .fences(1.5);
        assert!(fence.contains(5.0));
        assert!(fence.contains(5.8));
        assert!(!fence.contains(20.0));
    }

    #[test]
    fn test_single_value_fence_contains_itself() {
        let fence = Quartiles::from_values(&[6.0]).unwrap().fences(1.5);
        assert!(fence.contains(6.0));
    }

    #[test]
    fn test_empty_and_non_finite_samples() {
        assert!(Quartiles::from_values(&[]).is_none());
        assert!(Quartiles::from_values(&[f64::NAN]).is_none());
        assert!(mean(Vec::new()).is_none());
        assert_eq!(mean([2.0, f64::INFINITY, 4.0]), Some(3.0));
    }
}
