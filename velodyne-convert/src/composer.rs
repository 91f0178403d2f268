use crate::demand::{ComposedView, SubscriberDemand};
use crate::extract::PointExtractors;
use crate::numeric::seconds_to_nanos;
use velodyne_data::{Configuration, Header, PointCloud, PointRecord, PointXYZIR};

/// Derives the requested views of a closed scan, running each extraction at
/// most once per scan and only when some requested view depends on it.
#[derive(Debug)]
pub struct ViewComposer<E> {
    extractors: E,
    num_lasers: usize,
}

impl<E: PointExtractors> ViewComposer<E> {
    pub fn new(extractors: E, num_lasers: usize) -> Self {
        ViewComposer {
            extractors,
            num_lasers,
        }
    }

    pub fn extractors(&self) -> &E {
        &self.extractors
    }

    /// Views for `points`, in `OutputView::ALL` order.
    ///
    /// An empty scan yields nothing. The scan is stamped with the timestamp
    /// of its first point.
    pub fn compose(
        &self,
        frame_id: &str,
        points: Vec<PointRecord>,
        config: &Configuration,
        demand: &SubscriberDemand,
    ) -> Vec<ComposedView> {
        if !demand.any() {
            return Vec::new();
        }
        let Some(first) = points.first() else {
            log::debug!("Closed scan is empty, nothing to publish");
            return Vec::new();
        };

        let header = Header {
            stamp_ns: seconds_to_nanos(first.time_stamp),
            frame_id: frame_id.to_string(),
        };
        let scan = PointCloud::from_points(header, points);

        let valid = demand
            .needs_valid_points()
            .then(|| self.extract_valid(&scan, config));
        let invalid_near = demand
            .needs_invalid_near_points()
            .then(|| self.extract_invalid_near(&scan, config));

        let combined = match (&valid, &invalid_near) {
            (Some(valid), Some(invalid_near)) if demand.combined => {
                Some(combine(valid, invalid_near))
            }
            _ => None,
        };

        let mut views = Vec::with_capacity(4);
        if let Some(valid) = valid {
            if demand.valid {
                views.push(ComposedView::Valid(valid.map_points(PointXYZIR::from)));
            }
            if demand.valid_extended {
                views.push(ComposedView::ValidExtended(valid));
            }
        }
        if let Some(invalid_near) = invalid_near {
            if demand.invalid_near {
                views.push(ComposedView::InvalidNear(invalid_near));
            }
        }
        views.extend(combined.map(ComposedView::Combined));
        views
    }

    fn extract_valid(
        &self,
        scan: &PointCloud<PointRecord>,
        config: &Configuration,
    ) -> PointCloud<PointRecord> {
        let valid = self
            .extractors
            .filter_valid(scan, config.min_range, config.max_range);
        restamp(valid, &scan.header)
    }

    fn extract_invalid_near(
        &self,
        scan: &PointCloud<PointRecord>,
        config: &Configuration,
    ) -> PointCloud<PointRecord> {
        let sorted = self.extractors.sort_by_ring(scan, self.num_lasers);
        let invalid_near = self.extractors.filter_invalid_near(
            &sorted,
            &config.invalid_intensity,
            self.num_lasers,
            config.num_points_threshold,
        );
        restamp(invalid_near, &scan.header)
    }
}

fn restamp(mut cloud: PointCloud<PointRecord>, header: &Header) -> PointCloud<PointRecord> {
    cloud.header = header.clone();
    cloud.fit_dimensions();
    cloud
}

fn combine(
    valid: &PointCloud<PointRecord>,
    invalid_near: &PointCloud<PointRecord>,
) -> PointCloud<PointRecord> {
    let mut points = Vec::with_capacity(valid.len() + invalid_near.len());
    points.extend_from_slice(&valid.points);
    points.extend_from_slice(&invalid_near.points);
    PointCloud::from_points(valid.header.clone(), points)
}
