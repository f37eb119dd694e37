//! Linear axis scales and the per-dimension scale set owned by the engine

use serde::Serialize;

use crate::config::EngineConfig;
use crate::dimension::Dimension;
use crate::record::RecordStore;

/// Continuous linear mapping from a data domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a data value into the range
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 != d0 { (value - d0) / (d1 - d0) } else { 0.5 };
        r0 + t * (r1 - r0)
    }

    /// Map a range value back into the domain
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if r1 != r0 { (pixel - r0) / (r1 - r0) } else { 0.5 };
        d0 + t * (d1 - d0)
    }

    /// Whether the value lies inside the domain, bounds included
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        value >= lo && value <= hi
    }

    /// Extend the domain outward to round tick boundaries
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                break;
            }
            if !step.is_finite() || step == 0.0 {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            previous = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }
}

/// Tick spacing for roughly `count` ticks over `[start, stop]`.
///
/// Positive results are the step itself; negative results are the negated
/// inverse of a fractional step, which keeps the arithmetic exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// One vertical scale per dimension, range `[axis_height, 0]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisScales {
    scales: [LinearScale; 3],
}

impl AxisScales {
    /// Build the axis domains from the dataset
    pub fn from_store(store: &RecordStore, config: &EngineConfig) -> Self {
        let range = (config.axis_height, 0.0);

        let scales = Dimension::ALL.map(|dimension| {
            let extent = store.extent(dimension);
            match dimension {
                Dimension::SalaryInUsd => {
                    let (lo, hi) = extent.unwrap_or((0.0, 1.0));
                    let padding = (hi - lo) * config.salary_padding_ratio;
                    let min = if lo <= 0.0 { lo } else { lo - padding };
                    LinearScale::new((min.max(0.0), hi + padding), range).nice(config.salary_ticks)
                }
                Dimension::RemoteRatio => LinearScale::new((0.0, 100.0), range),
                Dimension::WorkYear => {
                    let (lo, hi) = extent.unwrap_or((0.0, 1.0));
                    let domain = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
                    let ticks = if store.len() > 1 { config.year_ticks } else { 1 };
                    LinearScale::new(domain, range).nice(ticks)
                }
            }
        });

        Self { scales }
    }

    pub fn scale(&self, dimension: Dimension) -> &LinearScale {
        &self.scales[dimension.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &LinearScale)> + '_ {
        Dimension::ALL.iter().map(move |&d| (d, &self.scales[d.index()]))
    }
}
