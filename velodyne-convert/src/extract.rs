use velodyne_data::{PointCloud, PointRecord};

/// Point classification used to derive the filtered views of a scan.
pub trait PointExtractors {
    /// Points whose distance lies within `[min_range, max_range]`.
    fn filter_valid(
        &self,
        scan: &PointCloud<PointRecord>,
        min_range: f64,
        max_range: f64,
    ) -> PointCloud<PointRecord>;

    /// Stable grouping of the points by ring.
    fn sort_by_ring(&self, scan: &PointCloud<PointRecord>, num_lasers: usize)
        -> PointCloud<PointRecord>;

    /// Invalid near points surviving the per-ring debounce. `sorted` must be
    /// grouped by ring.
    fn filter_invalid_near(
        &self,
        sorted: &PointCloud<PointRecord>,
        invalid_intensity: &[f32],
        num_lasers: usize,
        num_points_threshold: usize,
    ) -> PointCloud<PointRecord>;
}

/// Default classification: range gating for valid points, and runs of
/// no-return points per ring for invalid near points.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeExtractors;

impl PointExtractors for RangeExtractors {
    fn filter_valid(
        &self,
        scan: &PointCloud<PointRecord>,
        min_range: f64,
        max_range: f64,
    ) -> PointCloud<PointRecord> {
        // Compared in the precision of the decoded distances.
        let (min_range, max_range) = (min_range as f32, max_range as f32);
        let points = scan
            .points
            .iter()
            .filter(|p| min_range <= p.distance && p.distance <= max_range)
            .copied()
            .collect();
        PointCloud::from_points(scan.header.clone(), points)
    }

    fn sort_by_ring(
        &self,
        scan: &PointCloud<PointRecord>,
        num_lasers: usize,
    ) -> PointCloud<PointRecord> {
        let mut rings: Vec<Vec<PointRecord>> = vec![Vec::new(); num_lasers];
        for p in &scan.points {
            if let Some(ring) = rings.get_mut(usize::from(p.ring)) {
                ring.push(*p);
            }
        }
        PointCloud::from_points(scan.header.clone(), rings.into_iter().flatten().collect())
    }

    fn filter_invalid_near(
        &self,
        sorted: &PointCloud<PointRecord>,
        invalid_intensity: &[f32],
        num_lasers: usize,
        num_points_threshold: usize,
    ) -> PointCloud<PointRecord> {
        let is_invalid_near = |p: &PointRecord| {
            let ring = usize::from(p.ring);
            ring < num_lasers
                && p.distance == 0.
                && invalid_intensity
                    .get(ring)
                    .is_some_and(|ceiling| p.intensity <= *ceiling)
        };

        let mut output = PointCloud::new(sorted.header.clone());
        for run in sorted
            .points
            .chunk_by(|a, b| a.ring == b.ring && is_invalid_near(a) == is_invalid_near(b))
        {
            if run.len() >= num_points_threshold && run.first().is_some_and(is_invalid_near) {
                output.points.extend_from_slice(run);
            }
        }
        output.fit_dimensions();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velodyne_data::Header;

    fn point(ring: u16, distance: f32, intensity: f32) -> PointRecord {
        PointRecord {
            ring,
            distance,
            intensity,
            ..Default::default()
        }
    }

    fn cloud(points: Vec<PointRecord>) -> PointCloud<PointRecord> {
        PointCloud::from_points(
            Header {
                stamp_ns: 7,
                frame_id: "velodyne".to_string(),
            },
            points,
        )
    }

    #[test]
    fn test_filter_valid() {
        let scan = cloud(vec![
            point(0, 0.5, 1.),
            point(0, 0.9, 1.),
            point(1, 50., 1.),
            point(1, 130., 1.),
            point(2, 131., 1.),
        ]);
        let valid = RangeExtractors.filter_valid(&scan, 0.9, 130.);
        let distances: Vec<_> = valid.points.iter().map(|p| p.distance).collect();
        assert_eq!(distances, vec![0.9, 50., 130.]);
        assert_eq!(valid.width, 3);
        assert_eq!(valid.header, scan.header);
    }

    #[test]
    fn test_sort_by_ring_is_stable() {
        let scan = cloud(vec![
            point(2, 1., 0.),
            point(0, 2., 0.),
            point(1, 3., 0.),
            point(0, 4., 0.),
            point(2, 5., 0.),
        ]);
        let sorted = RangeExtractors.sort_by_ring(&scan, 3);
        let order: Vec<_> = sorted.points.iter().map(|p| (p.ring, p.distance)).collect();
        assert_eq!(order, vec![(0, 2.), (0, 4.), (1, 3.), (2, 1.), (2, 5.)]);
    }

    #[test]
    fn test_sort_by_ring_drops_unknown_rings() {
        let scan = cloud(vec![point(0, 1., 0.), point(16, 2., 0.)]);
        let sorted = RangeExtractors.sort_by_ring(&scan, 16);
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted.width, 1);
    }

    #[test]
    fn test_filter_invalid_near_keeps_long_runs() {
        let mut points = vec![point(0, 0., 1.); 4];
        points.push(point(0, 10., 1.));
        points.extend(vec![point(0, 0., 1.); 2]);
        points.extend(vec![point(1, 0., 1.); 3]);
        let sorted = cloud(points);

        let invalid = RangeExtractors.filter_invalid_near(&sorted, &[2., 2.], 2, 3);
        let rings: Vec<_> = invalid.points.iter().map(|p| p.ring).collect();
        assert_eq!(rings, vec![0, 0, 0, 0, 1, 1, 1]);
        assert_eq!(invalid.width, 7);
    }

    #[test]
    fn test_filter_invalid_near_respects_intensity_ceiling() {
        let sorted = cloud(vec![
            point(0, 0., 5.),
            point(0, 0., 5.),
            point(1, 0., 5.),
            point(1, 0., 5.),
        ]);
        let invalid = RangeExtractors.filter_invalid_near(&sorted, &[10., 1.], 2, 2);
        assert!(invalid.points.iter().all(|p| p.ring == 0));
        assert_eq!(invalid.len(), 2);
    }

    #[test]
    fn test_filter_invalid_near_on_empty_scan() {
        let invalid = RangeExtractors.filter_invalid_near(&cloud(Vec::new()), &[0.], 1, 1);
        assert!(invalid.is_empty());
        assert_eq!(invalid.height, 1);
    }
}
