mod composer;
mod constants;
mod converter;
mod converter_threads;
mod decoder;
mod demand;
mod error;
mod extract;
mod numeric;
mod params;
mod reconfigure;
mod segmenter;
mod sink;
#[cfg(test)]
mod testing;

use crate::constants::{BATCH_QUEUE_SIZE, CONVERTER_THREAD_NAME, TERMINATOR_QUEUE_SIZE};
use crate::converter_threads::convert_batches;
use crossbeam_channel::bounded;
use velodyne_data::PacketBatch;

pub use crate::composer::ViewComposer;
pub use crate::converter::Converter;
pub use crate::converter_threads::{join, BatchSender, ConverterThreads};
pub use crate::decoder::PointDecoder;
pub use crate::demand::{ComposedView, OutputView, PublishSink, SubscriberDemand};
pub use crate::error::{ConvertError, Result};
pub use crate::extract::{PointExtractors, RangeExtractors};
pub use crate::params::{load_params, parse_params, parse_update};
pub use crate::reconfigure::{apply_update, ConfigHandle};
pub use crate::segmenter::{segment_points, ScanSegmenter};
pub use crate::sink::{ChannelSink, Subscription};

/// Function to launch the converter on its own thread.
///
/// Take a [`ConfigHandle`] from `converter` beforehand to reconfigure it
/// while it runs. The thread stops when the returned [`ConverterThreads`] is
/// dropped or when every [`BatchSender`] is gone.
pub fn run_converter<D, E, S>(
    converter: Converter<D, E, S>,
) -> Result<(ConverterThreads, BatchSender)>
where
    D: PointDecoder + Send + 'static,
    E: PointExtractors + Send + 'static,
    S: PublishSink + Send + 'static,
{
    let (terminator_tx, terminator_rx) = bounded(TERMINATOR_QUEUE_SIZE);
    let (batch_tx, batch_rx) = bounded::<PacketBatch>(BATCH_QUEUE_SIZE);

    let converter_thread = std::thread::Builder::new()
        .name(CONVERTER_THREAD_NAME.to_string())
        .spawn(move || convert_batches(converter, batch_rx, terminator_rx))
        .map_err(ConvertError::ThreadSpawn)?;

    let converter_threads = ConverterThreads {
        terminator_tx,
        converter_thread: Some(converter_thread),
    };

    Ok((converter_threads, BatchSender { batch_tx }))
}
