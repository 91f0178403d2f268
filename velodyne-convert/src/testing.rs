use crate::decoder::PointDecoder;
use crate::demand::{ComposedView, OutputView, PublishSink};
use crate::extract::{PointExtractors, RangeExtractors};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use velodyne_data::{
    Header, Packet, PacketBatch, PointCloud, PointRecord, RangeView, ReturnType,
};

pub(crate) const FRAME_ID: &str = "velodyne";

/// Sink with scripted subscriber counts that records every publish.
#[derive(Debug, Default)]
pub(crate) struct FakeSink {
    subscribers: Mutex<HashMap<OutputView, usize>>,
    published: Mutex<Vec<ComposedView>>,
}

impl FakeSink {
    pub(crate) fn with_subscribers(views: &[OutputView]) -> Self {
        let sink = FakeSink::default();
        for view in views {
            sink.set_subscribers(*view, 1);
        }
        sink
    }

    pub(crate) fn set_subscribers(&self, view: OutputView, count: usize) {
        self.subscribers.lock().unwrap().insert(view, count);
    }

    pub(crate) fn take_published(&self) -> Vec<ComposedView> {
        std::mem::take(&mut *self.published.lock().unwrap())
    }
}

impl PublishSink for FakeSink {
    fn subscription_count(&self, view: OutputView) -> usize {
        self.subscribers
            .lock()
            .unwrap()
            .get(&view)
            .copied()
            .unwrap_or(0)
    }

    fn publish(&self, message: ComposedView) {
        self.published.lock().unwrap().push(message);
    }
}

/// `RangeExtractors` with call counters.
#[derive(Debug, Default)]
pub(crate) struct CountingExtractors {
    filter_valid: AtomicUsize,
    sort_by_ring: AtomicUsize,
    filter_invalid_near: AtomicUsize,
}

impl CountingExtractors {
    pub(crate) fn filter_valid_calls(&self) -> usize {
        self.filter_valid.load(Ordering::SeqCst)
    }

    pub(crate) fn sort_by_ring_calls(&self) -> usize {
        self.sort_by_ring.load(Ordering::SeqCst)
    }

    pub(crate) fn filter_invalid_near_calls(&self) -> usize {
        self.filter_invalid_near.load(Ordering::SeqCst)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.filter_valid_calls() + self.sort_by_ring_calls() + self.filter_invalid_near_calls()
    }
}

impl PointExtractors for CountingExtractors {
    fn filter_valid(
        &self,
        scan: &PointCloud<PointRecord>,
        min_range: f64,
        max_range: f64,
    ) -> PointCloud<PointRecord> {
        self.filter_valid.fetch_add(1, Ordering::SeqCst);
        RangeExtractors.filter_valid(scan, min_range, max_range)
    }

    fn sort_by_ring(
        &self,
        scan: &PointCloud<PointRecord>,
        num_lasers: usize,
    ) -> PointCloud<PointRecord> {
        self.sort_by_ring.fetch_add(1, Ordering::SeqCst);
        RangeExtractors.sort_by_ring(scan, num_lasers)
    }

    fn filter_invalid_near(
        &self,
        sorted: &PointCloud<PointRecord>,
        invalid_intensity: &[f32],
        num_lasers: usize,
        num_points_threshold: usize,
    ) -> PointCloud<PointRecord> {
        self.filter_invalid_near.fetch_add(1, Ordering::SeqCst);
        RangeExtractors.filter_invalid_near(
            sorted,
            invalid_intensity,
            num_lasers,
            num_points_threshold,
        )
    }
}

type DecodeHook = Box<dyn FnMut() + Send>;

/// Decodes packets made of `(azimuth, distance in cm)` little endian pairs.
#[derive(Default)]
pub(crate) struct FakeDecoder {
    pub(crate) num_lasers: usize,
    pub(crate) range_views: Vec<RangeView>,
    pub(crate) n_decoded_batches: usize,
    /// Runs once, in the middle of the next decode.
    pub(crate) on_decode: Option<DecodeHook>,
}

impl FakeDecoder {
    pub(crate) fn new(num_lasers: usize) -> Self {
        FakeDecoder {
            num_lasers,
            ..Default::default()
        }
    }
}

impl PointDecoder for FakeDecoder {
    fn unpack_all(&mut self, batch: &PacketBatch, points: &mut Vec<PointRecord>) {
        self.n_decoded_batches += 1;
        if let Some(mut hook) = self.on_decode.take() {
            hook();
        }
        for packet in &batch.packets {
            let t0 = packet.stamp_ns as f64 / 1e9;
            for (i, sample) in packet.data.chunks_exact(4).enumerate() {
                let distance = f32::from(u16::from_le_bytes([sample[2], sample[3]])) / 100.;
                points.push(PointRecord {
                    x: distance,
                    intensity: 1.,
                    return_type: if distance == 0. {
                        ReturnType::Invalid
                    } else {
                        ReturnType::SingleStrongest
                    },
                    ring: (i % self.num_lasers) as u16,
                    azimuth: u16::from_le_bytes([sample[0], sample[1]]),
                    distance,
                    time_stamp: t0 + i as f64 * 1e-6,
                    ..Default::default()
                });
            }
        }
    }

    fn set_range_and_view(&mut self, range_view: &RangeView) {
        self.range_views.push(*range_view);
    }

    fn num_lasers(&self) -> usize {
        self.num_lasers
    }

    fn points_per_packet(&self) -> usize {
        384
    }
}

pub(crate) fn packet(samples: &[(u16, u16)], stamp_ns: i64) -> Packet {
    let data = samples
        .iter()
        .flat_map(|(azimuth, distance_cm)| {
            let [a0, a1] = azimuth.to_le_bytes();
            let [d0, d1] = distance_cm.to_le_bytes();
            [a0, a1, d0, d1]
        })
        .collect();
    Packet { stamp_ns, data }
}

pub(crate) fn batch(packets: Vec<Packet>) -> PacketBatch {
    PacketBatch {
        header: Header {
            stamp_ns: 0,
            frame_id: FRAME_ID.to_string(),
        },
        packets,
    }
}

/// One batch sweeping `azimuths` with a constant distance.
pub(crate) fn sweep_batch(azimuths: &[u16], distance_cm: u16, stamp_ns: i64) -> PacketBatch {
    let samples: Vec<_> = azimuths.iter().map(|a| (*a, distance_cm)).collect();
    batch(vec![packet(&samples, stamp_ns)])
}
