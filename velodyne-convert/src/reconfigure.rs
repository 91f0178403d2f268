use crossbeam_utils::sync::ShardedLock;
use std::sync::{Arc, PoisonError};
use velodyne_data::{ConfigUpdate, Configuration};

/// Per-ring intensity ceilings sized to `num_lasers`. Rings without a value
/// get zero; surplus values are dropped.
pub(crate) fn pad_invalid_intensity(values: &[f64], num_lasers: usize) -> Vec<f32> {
    if values.len() > num_lasers {
        log::warn!(
            "invalid_intensity has {} entries but the sensor has {} lasers, ignoring the rest",
            values.len(),
            num_lasers
        );
    }
    let mut intensity = vec![0.0; num_lasers];
    for (slot, value) in intensity.iter_mut().zip(values) {
        *slot = *value as f32;
    }
    intensity
}

/// Copies the fields present in `update` into `config`.
pub fn apply_update(config: &mut Configuration, update: &ConfigUpdate, num_lasers: usize) {
    if let Some(min_range) = update.min_range {
        config.min_range = min_range;
    }
    if let Some(max_range) = update.max_range {
        config.max_range = max_range;
    }
    if let Some(view_direction) = update.view_direction {
        config.view_direction = view_direction;
    }
    if let Some(view_width) = update.view_width {
        config.view_width = view_width;
    }
    if let Some(scan_phase) = update.scan_phase {
        config.scan_phase = scan_phase;
    }
    if let Some(num_points_threshold) = update.num_points_threshold {
        config.num_points_threshold = num_points_threshold;
    }
    if let Some(invalid_intensity) = &update.invalid_intensity {
        config.invalid_intensity = pad_invalid_intensity(invalid_intensity, num_lasers);
    }
}

/// Shared handle to the current configuration.
///
/// Readers get an immutable snapshot; writers publish a whole new record, so
/// a snapshot never mixes fields of two updates.
#[derive(Clone)]
pub struct ConfigHandle {
    current: Arc<ShardedLock<Arc<Configuration>>>,
    num_lasers: usize,
}

impl ConfigHandle {
    pub fn new(mut config: Configuration, num_lasers: usize) -> Self {
        config.invalid_intensity.resize(num_lasers, 0.0);
        ConfigHandle {
            current: Arc::new(ShardedLock::new(Arc::new(config))),
            num_lasers,
        }
    }

    pub fn snapshot(&self) -> Arc<Configuration> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Applies `update` on top of the current configuration. Values are
    /// validated where they are declared, so every update is accepted.
    pub fn apply(&self, update: &ConfigUpdate) -> bool {
        log::info!("Reconfigure request: {:?}", update);

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Configuration::clone(&current);
        apply_update(&mut next, update, self.num_lasers);
        next.revision += 1;
        *current = Arc::new(next);
        true
    }

    pub fn num_lasers(&self) -> usize {
        self.num_lasers
    }
}
