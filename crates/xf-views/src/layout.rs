//! Ordinal position scales for placing bars and axes

/// Evenly spaced bands over an ordinal domain of `count` entries.
///
/// Inner and outer padding are both `padding`, with bands centered in the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    pub fn new(count: usize, range: (f32, f32), padding: f32) -> Self {
        let padding = padding.clamp(0.0, 1.0);
        let (r0, r1) = range;
        let n = count as f32;
        let step = (r1 - r0) / (n - padding + 2.0 * padding).max(1.0);
        let start = r0 + ((r1 - r0) - step * (n - padding)) / 2.0;
        Self {
            count,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of band `index`
    pub fn position(&self, index: usize) -> f32 {
        self.start + self.step * index as f32
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// Band under the horizontal coordinate `x`, if any
    pub fn index_at(&self, x: f32) -> Option<usize> {
        (0..self.count).find(|&i| {
            let left = self.position(i);
            x >= left && x <= left + self.bandwidth
        })
    }
}

/// Points spread over a range with `padding` steps of space at each end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    count: usize,
    start: f32,
    step: f32,
}

impl PointScale {
    pub fn new(count: usize, range: (f32, f32), padding: f32) -> Self {
        let (r0, r1) = range;
        let n = count as f32;
        let step = (r1 - r0) / (n - 1.0 + 2.0 * padding).max(1.0);
        let start = r0 + ((r1 - r0) - step * (n - 1.0)) / 2.0;
        Self { count, start, step }
    }

    pub fn position(&self, index: usize) -> f32 {
        self.start + self.step * index as f32
    }

    /// Point within `tolerance` of `x`, if any
    pub fn index_near(&self, x: f32, tolerance: f32) -> Option<usize> {
        (0..self.count).find(|&i| (self.position(i) - x).abs() <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_layout() {
        let close = |a: f32, b: f32| (a - b).abs() < 1e-3;
        let bands = BandScale::new(4, (0.0, 420.0), 0.2);
        assert!(close(bands.bandwidth(), 80.0));
        assert!(close(bands.position(0), 20.0));
        assert!(close(bands.position(3), 320.0));

        assert_eq!(bands.index_at(25.0), Some(0));
        assert_eq!(bands.index_at(110.0), None);
        assert_eq!(bands.index_at(399.0), Some(3));
        assert_eq!(bands.index_at(410.0), None);
    }

    #[test]
    fn test_point_layout() {
        let points = PointScale::new(3, (0.0, 400.0), 1.0);
        assert_eq!(points.position(0), 100.0);
        assert_eq!(points.position(1), 200.0);
        assert_eq!(points.position(2), 300.0);
        assert_eq!(points.index_near(205.0, 10.0), Some(1));
        assert_eq!(points.index_near(150.0, 10.0), None);
    }
}
