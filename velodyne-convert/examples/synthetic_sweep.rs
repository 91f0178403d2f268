use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use velodyne_convert::{
    load_params, parse_update, run_converter, ChannelSink, ComposedView, Converter, OutputView,
    PointDecoder, RangeExtractors,
};
use velodyne_data::{
    Configuration, Header, Packet, PacketBatch, PointRecord, RangeView, ReturnType,
};

const POINTS_PER_PACKET: usize = 384;
const AZIMUTH_STEP: u32 = 20;

#[derive(Parser, Debug)]
#[command(about = "Feeds synthetic revolutions through the scan converter.")]
struct Args {
    /// JSON parameter file
    #[arg(long)]
    params: Option<PathBuf>,
    /// Number of laser rings of the simulated sensor
    #[arg(long, default_value_t = 16)]
    lasers: usize,
    /// Number of packet batches to send
    #[arg(long, default_value_t = 10)]
    batches: usize,
    /// Azimuth, in degrees, at which the transport cuts revolutions
    #[arg(long, default_value_t = 90.)]
    cut: f64,
    /// JSON parameter update applied halfway through
    #[arg(long)]
    update: Option<String>,
}

/// Samples are a little endian azimuth and distance in cm, then the return
/// type code.
struct SweepDecoder {
    num_lasers: usize,
    range_view: Option<RangeView>,
}

impl PointDecoder for SweepDecoder {
    fn unpack_all(&mut self, batch: &PacketBatch, points: &mut Vec<PointRecord>) {
        let Some(range_view) = self.range_view else {
            return;
        };
        for packet in &batch.packets {
            let t0 = packet.stamp_ns as f64 / 1e9;
            for (i, sample) in packet.data.chunks_exact(5).enumerate() {
                let azimuth = u16::from_le_bytes([sample[0], sample[1]]);
                let distance = f32::from(u16::from_le_bytes([sample[2], sample[3]])) / 100.;
                let angle = (f64::from(azimuth) / 100.).to_radians();
                let valid = f64::from(distance) <= range_view.max_range;
                points.push(PointRecord {
                    x: distance * angle.cos() as f32,
                    y: -distance * angle.sin() as f32,
                    z: 0.,
                    intensity: 20.,
                    return_type: if valid {
                        ReturnType::from_code(sample[4])
                    } else {
                        ReturnType::Invalid
                    },
                    ring: (i % self.num_lasers) as u16,
                    azimuth,
                    distance: if valid { distance } else { 0. },
                    time_stamp: t0 + i as f64 * 1e-6,
                });
            }
        }
    }

    fn set_range_and_view(&mut self, range_view: &RangeView) {
        log::info!("Decoder range set to {:?}", range_view);
        self.range_view = Some(*range_view);
    }

    fn num_lasers(&self) -> usize {
        self.num_lasers
    }

    fn points_per_packet(&self) -> usize {
        POINTS_PER_PACKET
    }
}

fn revolution(cut_degree: f64, index: usize) -> PacketBatch {
    let start = (cut_degree * 100.).round() as u32 % 36000;
    let n_points = (36000 / AZIMUTH_STEP) as usize;
    let stamp_ns = index as i64 * 100_000_000;
    let packets = (0..n_points)
        .collect::<Vec<_>>()
        .chunks(POINTS_PER_PACKET)
        .map(|indices| {
            let data = indices
                .iter()
                .flat_map(|i| {
                    let azimuth = ((start + AZIMUTH_STEP * *i as u32) % 36000) as u16;
                    let distance_cm = 500 + (*i as u16 % 7) * 1000;
                    let [a0, a1] = azimuth.to_le_bytes();
                    let [d0, d1] = distance_cm.to_le_bytes();
                    [a0, a1, d0, d1, ReturnType::SingleStrongest.code()]
                })
                .collect();
            Packet {
                stamp_ns: stamp_ns + indices[0] as i64 * 1000,
                data,
            }
        })
        .collect();
    PacketBatch {
        header: Header {
            stamp_ns,
            frame_id: "velodyne".to_string(),
        },
        packets,
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.params {
        Some(path) => match load_params(path, args.lasers) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load \"{}\". Error: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Configuration::new(args.lasers),
    };
    let update = args.update.as_deref().map(parse_update).transpose().unwrap_or_else(|e| {
        eprintln!("Invalid update. Error: {}", e);
        std::process::exit(1);
    });

    let sink = ChannelSink::new();
    let subscription = sink.subscribe(OutputView::Combined, 4);
    let decoder = SweepDecoder {
        num_lasers: args.lasers,
        range_view: None,
    };
    let converter = Converter::new(decoder, RangeExtractors, sink, config);
    let config = converter.config_handle();
    let (converter_threads, batch_tx) = run_converter(converter).unwrap();

    for index in 0..args.batches {
        if index == args.batches / 2 {
            if let Some(update) = &update {
                config.apply(update);
            }
        }
        if batch_tx.send(revolution(args.cut, index)).is_err() {
            break;
        }
        match subscription.recv_timeout(Duration::from_secs(1)) {
            Ok(ComposedView::Combined(cloud)) => {
                let first = cloud.points.first().map(|p| p.azimuth);
                let last = cloud.points.last().map(|p| p.azimuth);
                println!(
                    "scan {}: {} points, stamp {} ns, azimuth {:?}..{:?}",
                    index, cloud.width, cloud.header.stamp_ns, first, last
                );
            }
            Ok(_) => {}
            Err(_) => println!("scan {}: nothing published", index),
        }
    }

    drop(converter_threads);
}
