use crate::return_type::ReturnType;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One decoded laser return with its full metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRecord {
    /// Position in the sensor frame, in meters.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Return strength of the laser pulse.
    pub intensity: f32,
    pub return_type: ReturnType,
    /// Laser channel, `0..num_lasers`.
    pub ring: u16,
    /// Horizontal angle in hundredths of a degree, `0..36000`.
    pub azimuth: u16,
    /// Distance to the target, in meters.
    pub distance: f32,
    /// Acquisition time in seconds.
    pub time_stamp: f64,
}

/// Reduced point carried by the plain `valid` output.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointXYZIR {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
    pub ring: u16,
}

impl From<&PointRecord> for PointXYZIR {
    fn from(p: &PointRecord) -> Self {
        PointXYZIR {
            x: p.x,
            y: p.y,
            z: p.z,
            intensity: p.intensity,
            ring: p.ring,
        }
    }
}
