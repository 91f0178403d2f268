use crate::converter::Converter;
use crate::decoder::PointDecoder;
use crate::demand::PublishSink;
use crate::error::{ConvertError, Result};
use crate::extract::PointExtractors;
use crossbeam_channel::{select, Receiver, Sender};
use std::thread::JoinHandle;
use velodyne_data::PacketBatch;

/// Struct that contains the converter thread.
pub struct ConverterThreads {
    pub(crate) terminator_tx: Sender<bool>,
    pub(crate) converter_thread: Option<JoinHandle<()>>,
}

/// Feeds packet batches to a running converter thread.
#[derive(Clone, Debug)]
pub struct BatchSender {
    pub(crate) batch_tx: Sender<PacketBatch>,
}

impl BatchSender {
    /// Queues `batch`, blocking while the converter is busy and the queue full.
    pub fn send(&self, batch: PacketBatch) -> Result<()> {
        self.batch_tx
            .send(batch)
            .map_err(|_| ConvertError::Disconnected)
    }
}

pub(crate) fn convert_batches<D, E, S>(
    mut converter: Converter<D, E, S>,
    batch_rx: Receiver<PacketBatch>,
    terminator_rx: Receiver<bool>,
) where
    D: PointDecoder,
    E: PointExtractors,
    S: PublishSink,
{
    loop {
        select! {
            recv(terminator_rx) -> _ => break,
            recv(batch_rx) -> batch => match batch {
                Ok(batch) => {
                    converter.process_batch(&batch);
                }
                Err(_) => break,
            },
        }
    }
    log::info!("Converter thread stopped");
}

/// Function to join the converter thread.
/// This function is automatically called when `converter_threads` is dropped.
pub fn join(converter_threads: &mut ConverterThreads) {
    // The thread may already be gone after its batch senders were dropped.
    let _ = converter_threads.terminator_tx.send(true);

    if let Some(thread) = converter_threads.converter_thread.take() {
        if thread.join().is_err() {
            log::warn!("Converter thread panicked");
        }
    }
}

impl Drop for ConverterThreads {
    fn drop(&mut self) {
        join(self);
    }
}
