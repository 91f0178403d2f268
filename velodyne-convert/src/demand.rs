use velodyne_data::{Header, PointCloud, PointRecord, PointXYZIR};

/// Named outputs of the converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputView {
    /// Range-filtered points, reduced to XYZ, intensity and ring
    Valid,
    /// Range-filtered points with full metadata
    ValidExtended,
    /// Near points without a return, debounced per ring
    InvalidNear,
    /// `ValidExtended` followed by `InvalidNear`
    Combined,
}

impl OutputView {
    pub const ALL: [OutputView; 4] = [
        OutputView::Valid,
        OutputView::ValidExtended,
        OutputView::InvalidNear,
        OutputView::Combined,
    ];

    pub fn topic(self) -> &'static str {
        match self {
            OutputView::Valid => "velodyne_points",
            OutputView::ValidExtended => "velodyne_points_ex",
            OutputView::InvalidNear => "velodyne_points_invalid_near",
            OutputView::Combined => "velodyne_points_combined_ex",
        }
    }
}

/// A cloud ready to be handed to the sink, tagged with its output.
#[derive(Clone, Debug, PartialEq)]
pub enum ComposedView {
    Valid(PointCloud<PointXYZIR>),
    ValidExtended(PointCloud<PointRecord>),
    InvalidNear(PointCloud<PointRecord>),
    Combined(PointCloud<PointRecord>),
}

impl ComposedView {
    pub fn view(&self) -> OutputView {
        match self {
            ComposedView::Valid(_) => OutputView::Valid,
            ComposedView::ValidExtended(_) => OutputView::ValidExtended,
            ComposedView::InvalidNear(_) => OutputView::InvalidNear,
            ComposedView::Combined(_) => OutputView::Combined,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            ComposedView::Valid(cloud) => &cloud.header,
            ComposedView::ValidExtended(cloud)
            | ComposedView::InvalidNear(cloud)
            | ComposedView::Combined(cloud) => &cloud.header,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            ComposedView::Valid(cloud) => cloud.width,
            ComposedView::ValidExtended(cloud)
            | ComposedView::InvalidNear(cloud)
            | ComposedView::Combined(cloud) => cloud.width,
        }
    }
}

/// Destination of composed views.
pub trait PublishSink {
    /// Number of live consumers of `view`.
    fn subscription_count(&self, view: OutputView) -> usize;

    fn publish(&self, message: ComposedView);
}

/// Which outputs have at least one consumer, sampled once per cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubscriberDemand {
    pub valid: bool,
    pub valid_extended: bool,
    pub invalid_near: bool,
    pub combined: bool,
}

impl SubscriberDemand {
    pub fn query<S: PublishSink + ?Sized>(sink: &S) -> Self {
        let wanted = |view| sink.subscription_count(view) > 0;
        SubscriberDemand {
            valid: wanted(OutputView::Valid),
            valid_extended: wanted(OutputView::ValidExtended),
            invalid_near: wanted(OutputView::InvalidNear),
            combined: wanted(OutputView::Combined),
        }
    }

    pub fn all() -> Self {
        SubscriberDemand {
            valid: true,
            valid_extended: true,
            invalid_near: true,
            combined: true,
        }
    }

    pub fn wants(&self, view: OutputView) -> bool {
        match view {
            OutputView::Valid => self.valid,
            OutputView::ValidExtended => self.valid_extended,
            OutputView::InvalidNear => self.invalid_near,
            OutputView::Combined => self.combined,
        }
    }

    pub fn any(&self) -> bool {
        OutputView::ALL.into_iter().any(|view| self.wants(view))
    }

    pub(crate) fn needs_valid_points(&self) -> bool {
        self.valid || self.valid_extended || self.combined
    }

    pub(crate) fn needs_invalid_near_points(&self) -> bool {
        self.invalid_near || self.combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSink;

    #[test]
    fn test_query_reads_subscription_counts() {
        let sink = FakeSink::with_subscribers(&[OutputView::InvalidNear]);
        let demand = SubscriberDemand::query(&sink);
        assert_eq!(
            demand,
            SubscriberDemand {
                invalid_near: true,
                ..Default::default()
            }
        );
        assert!(demand.any());
        assert!(!demand.needs_valid_points());
        assert!(demand.needs_invalid_near_points());
    }

    #[test]
    fn test_combined_needs_both_extractions() {
        let demand = SubscriberDemand {
            combined: true,
            ..Default::default()
        };
        assert!(demand.needs_valid_points());
        assert!(demand.needs_invalid_near_points());
    }

    #[test]
    fn test_no_demand() {
        let demand = SubscriberDemand::query(&FakeSink::default());
        assert!(!demand.any());
        assert!(!demand.needs_valid_points());
        assert!(!demand.needs_invalid_near_points());
    }

    #[test]
    fn test_topics_are_distinct() {
        let mut topics: Vec<_> = OutputView::ALL.iter().map(|v| v.topic()).collect();
        topics.sort();
        topics.dedup();
        assert_eq!(topics.len(), 4);
        assert_eq!(OutputView::Combined.topic(), "velodyne_points_combined_ex");
    }
}
