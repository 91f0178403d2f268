#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_RANGE: f64 = 0.9;
pub const DEFAULT_MAX_RANGE: f64 = 130.0;
pub const DEFAULT_VIEW_DIRECTION: f64 = 0.0;
pub const DEFAULT_VIEW_WIDTH: f64 = 2.0 * std::f64::consts::PI;
pub const DEFAULT_SCAN_PHASE: f64 = 0.0;
pub const DEFAULT_NUM_POINTS_THRESHOLD: usize = 300;

/// Range and field of view forwarded to the point decoder.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeView {
    pub min_range: f64,
    pub max_range: f64,
    /// Center of the field of view, in radians.
    pub view_direction: f64,
    /// Width of the field of view, in radians.
    pub view_width: f64,
}

/// Complete set of conversion parameters.
///
/// A record is never edited once it is shared; reconfiguration produces a
/// new record with a higher `revision`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Configuration {
    pub min_range: f64,
    pub max_range: f64,
    pub view_direction: f64,
    pub view_width: f64,
    /// Start/end phase of a scan, in degrees.
    pub scan_phase: f64,
    /// Minimum run length for invalid near points to be reported.
    pub num_points_threshold: usize,
    /// Per-ring intensity ceiling for invalid near points.
    pub invalid_intensity: Vec<f32>,
    pub revision: u64,
}

impl Configuration {
    /// Default parameters for a sensor with `num_lasers` rings.
    pub fn new(num_lasers: usize) -> Self {
        Configuration {
            min_range: DEFAULT_MIN_RANGE,
            max_range: DEFAULT_MAX_RANGE,
            view_direction: DEFAULT_VIEW_DIRECTION,
            view_width: DEFAULT_VIEW_WIDTH,
            scan_phase: DEFAULT_SCAN_PHASE,
            num_points_threshold: DEFAULT_NUM_POINTS_THRESHOLD,
            invalid_intensity: vec![0.0; num_lasers],
            revision: 0,
        }
    }

    pub fn range_view(&self) -> RangeView {
        RangeView {
            min_range: self.min_range,
            max_range: self.max_range,
            view_direction: self.view_direction,
            view_width: self.view_width,
        }
    }
}

/// Partial configuration. Absent fields keep their previous values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ConfigUpdate {
    pub min_range: Option<f64>,
    pub max_range: Option<f64>,
    pub view_direction: Option<f64>,
    pub view_width: Option<f64>,
    pub scan_phase: Option<f64>,
    pub num_points_threshold: Option<usize>,
    pub invalid_intensity: Option<Vec<f64>>,
}
