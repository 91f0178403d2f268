use crate::constants::{AZIMUTH_FULL_TURN, NANOS_PER_SECOND};

/// Converts a phase in degrees to hundredths of a degree in `0..36000`.
pub(crate) fn phase_to_azimuth(phase_degree: f64) -> u32 {
    let hundredths = (phase_degree * 100.).round() as i64;
    hundredths.rem_euclid(AZIMUTH_FULL_TURN as i64) as u32
}

/// Clockwise angular distance from `phase` to `azimuth`, both in hundredths
/// of a degree.
pub(crate) fn phase_diff(azimuth: u16, phase: u32) -> u32 {
    let azimuth = u32::from(azimuth) % AZIMUTH_FULL_TURN;
    (AZIMUTH_FULL_TURN + azimuth - phase) % AZIMUTH_FULL_TURN
}

pub(crate) fn seconds_to_nanos(seconds: f64) -> i64 {
    (seconds * NANOS_PER_SECOND).round() as i64
}
