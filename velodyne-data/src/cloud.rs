#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stamp and coordinate frame shared by packets and clouds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Timestamp in nanoseconds.
    pub stamp_ns: i64,
    pub frame_id: String,
}

/// Unorganized point cloud: `height` is always 1 and `width` the point count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCloud<P> {
    pub header: Header,
    pub points: Vec<P>,
    pub width: usize,
    pub height: usize,
}

impl<P> PointCloud<P> {
    pub fn new(header: Header) -> Self {
        PointCloud {
            header,
            points: Vec::new(),
            width: 0,
            height: 1,
        }
    }

    /// Builds a cloud whose width matches `points`.
    pub fn from_points(header: Header, points: Vec<P>) -> Self {
        PointCloud {
            header,
            width: points.len(),
            points,
            height: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resets the width/height bookkeeping after the points were edited.
    pub fn fit_dimensions(&mut self) {
        self.width = self.points.len();
        self.height = 1;
    }

    /// Maps every point into another point type, keeping the header.
    pub fn map_points<'a, Q, F>(&'a self, f: F) -> PointCloud<Q>
    where
        F: FnMut(&'a P) -> Q,
    {
        PointCloud::from_points(self.header.clone(), self.points.iter().map(f).collect())
    }
}

impl<P> Default for PointCloud<P> {
    fn default() -> Self {
        PointCloud::new(Header::default())
    }
}
