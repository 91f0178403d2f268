use crate::constants::AZIMUTH_HALF_TURN;
use crate::numeric::{phase_diff, phase_to_azimuth};
use velodyne_data::PointRecord;

/// Moves trailing points lying within the half turn after `phase` from
/// `points` to `overflow`. `overflow` receives them most recent first.
pub(crate) fn split_overflow(
    points: &mut Vec<PointRecord>,
    phase: u32,
    overflow: &mut Vec<PointRecord>,
) {
    while points
        .last()
        .is_some_and(|p| phase_diff(p.azimuth, phase) < AZIMUTH_HALF_TURN)
    {
        overflow.extend(points.pop());
    }
}

/// Splits `raw` into the scan closed at `phase_degree` and the points that
/// belong to the next scan. Both halves keep chronological order.
pub fn segment_points(
    mut raw: Vec<PointRecord>,
    phase_degree: f64,
) -> (Vec<PointRecord>, Vec<PointRecord>) {
    let mut carry_over = Vec::new();
    split_overflow(&mut raw, phase_to_azimuth(phase_degree), &mut carry_over);
    carry_over.reverse();
    (raw, carry_over)
}

/// Regroups decoded batches into scans that start and end at the configured
/// phase, holding back the residual of the next scan between calls.
#[derive(Debug, Default)]
pub struct ScanSegmenter {
    // Most recent point first.
    overflow: Vec<PointRecord>,
}

impl ScanSegmenter {
    pub fn new() -> Self {
        ScanSegmenter::default()
    }

    /// Prepends the carry-over to `decoded` and returns the closed scan.
    ///
    /// The result may be empty when every point still lies past the phase;
    /// those points are kept for the next call. An empty `decoded` leaves the
    /// carry-over untouched.
    pub fn segment(&mut self, decoded: Vec<PointRecord>, phase_degree: f64) -> Vec<PointRecord> {
        self.segment_with(decoded.len(), phase_degree, |points| points.extend(decoded))
    }

    /// Like [`segment`](Self::segment), but `decode` appends the new points
    /// straight into the scan buffer, after the carry-over. `n_points` is the
    /// expected number of new points.
    pub fn segment_with<F>(
        &mut self,
        n_points: usize,
        phase_degree: f64,
        decode: F,
    ) -> Vec<PointRecord>
    where
        F: FnOnce(&mut Vec<PointRecord>),
    {
        let n_carried = self.overflow.len();
        let mut points = Vec::with_capacity(n_carried + n_points);
        points.extend(self.overflow.drain(..).rev());
        decode(&mut points);

        if points.len() == n_carried {
            self.overflow.extend(points.drain(..).rev());
            return points;
        }

        split_overflow(&mut points, phase_to_azimuth(phase_degree), &mut self.overflow);
        points
    }

    /// Points held for the next scan, oldest first.
    pub fn carry_over(&self) -> impl Iterator<Item = &PointRecord> + '_ {
        self.overflow.iter().rev()
    }

    pub fn carry_over_len(&self) -> usize {
        self.overflow.len()
    }

    /// Drops the carry-over, e.g. after batches were skipped.
    pub fn reset(&mut self) {
        self.overflow.clear();
    }
}
