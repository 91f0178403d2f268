use crate::composer::ViewComposer;
use crate::decoder::PointDecoder;
use crate::demand::{PublishSink, SubscriberDemand};
use crate::extract::PointExtractors;
use crate::reconfigure::ConfigHandle;
use crate::segmenter::ScanSegmenter;
use velodyne_data::{Configuration, PacketBatch, RangeView};

/// One processing pipeline: decoder, segmenter, composer and sink.
///
/// `process_batch` takes `&mut self`, so cycles never overlap. The
/// configuration is shared through a [`ConfigHandle`] and may be updated
/// from any thread; each cycle works on the snapshot taken at its start.
pub struct Converter<D, E, S> {
    decoder: D,
    segmenter: ScanSegmenter,
    composer: ViewComposer<E>,
    sink: S,
    config: ConfigHandle,
    applied_range_view: Option<RangeView>,
}

impl<D, E, S> Converter<D, E, S>
where
    D: PointDecoder,
    E: PointExtractors,
    S: PublishSink,
{
    pub fn new(decoder: D, extractors: E, sink: S, config: Configuration) -> Self {
        let num_lasers = decoder.num_lasers();
        log::info!("Starting converter for a {}-laser sensor", num_lasers);

        let mut converter = Converter {
            decoder,
            segmenter: ScanSegmenter::new(),
            composer: ViewComposer::new(extractors, num_lasers),
            sink,
            config: ConfigHandle::new(config, num_lasers),
            applied_range_view: None,
        };
        let config = converter.config.snapshot();
        converter.refresh_decoder(&config);
        converter
    }

    /// Handle for reconfiguring this converter from other threads.
    pub fn config_handle(&self) -> ConfigHandle {
        self.config.clone()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn composer(&self) -> &ViewComposer<E> {
        &self.composer
    }

    pub fn segmenter(&self) -> &ScanSegmenter {
        &self.segmenter
    }

    /// Runs one cycle and returns the number of published views.
    pub fn process_batch(&mut self, batch: &PacketBatch) -> usize {
        let demand = SubscriberDemand::query(&self.sink);
        if !demand.any() {
            if self.segmenter.carry_over_len() > 0 {
                log::debug!(
                    "No subscribers, discarding {} carried points",
                    self.segmenter.carry_over_len()
                );
                self.segmenter.reset();
            }
            return 0;
        }

        let config = self.config.snapshot();
        self.refresh_decoder(&config);

        let n_points = batch.packets.len() * self.decoder.points_per_packet();
        let decoder = &mut self.decoder;
        let closed = self.segmenter.segment_with(n_points, config.scan_phase, |points| {
            decoder.unpack_all(batch, points)
        });
        let views = self
            .composer
            .compose(&batch.header.frame_id, closed, &config, &demand);

        let n_views = views.len();
        for view in views {
            self.sink.publish(view);
        }
        n_views
    }

    fn refresh_decoder(&mut self, config: &Configuration) {
        let range_view = config.range_view();
        if self.applied_range_view != Some(range_view) {
            self.decoder.set_range_and_view(&range_view);
            self.applied_range_view = Some(range_view);
        }
    }
}
