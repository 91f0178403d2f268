/// Azimuth values are expressed in hundredths of a degree.
pub(crate) const AZIMUTH_FULL_TURN: u32 = 36000;
pub(crate) const AZIMUTH_HALF_TURN: u32 = 18000;
pub(crate) const NANOS_PER_SECOND: f64 = 1e9;
pub(crate) const BATCH_QUEUE_SIZE: usize = 10;
pub(crate) const TERMINATOR_QUEUE_SIZE: usize = 10;
pub(crate) const CONVERTER_THREAD_NAME: &str = "velodyne-convert";
