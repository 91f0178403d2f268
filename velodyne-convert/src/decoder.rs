use velodyne_data::{PacketBatch, PointRecord, RangeView};

/// Turns raw sensor packets into point records.
pub trait PointDecoder {
    /// Appends the points of every packet in `batch` to `points`, in decode
    /// order. Malformed packets yield no points.
    fn unpack_all(&mut self, batch: &PacketBatch, points: &mut Vec<PointRecord>);

    /// Range limits and field of view used by subsequent decodes.
    fn set_range_and_view(&mut self, range_view: &RangeView);

    fn num_lasers(&self) -> usize;

    /// Upper bound of points decoded from one packet.
    fn points_per_packet(&self) -> usize;
}
