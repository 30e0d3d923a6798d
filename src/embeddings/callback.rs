//! Training callbacks

use std::time::Duration;

use super::loss::LossHistory;

/// Snapshot handed to callbacks at the end of an epoch
#[derive(Debug, Clone)]
pub struct EpochReport {
    /// Zero-based epoch index
    pub epoch: usize,
    pub epochs: usize,
    /// Cumulative loss since training started, 0 unless loss is computed
    pub latest_training_loss: f64,
    /// Raw words streamed in this epoch
    pub words_processed: u64,
    /// Words left after pruning and downsampling
    pub effective_words: u64,
    /// Learning rate at the end of the epoch
    pub alpha: f32,
    pub elapsed: Duration,
}

/// Hooks the trainer invokes on the driver thread
pub trait EpochCallback {
    fn on_train_begin(&mut self, _epochs: usize) {}

    fn on_epoch_end(&mut self, report: &EpochReport);

    fn on_train_end(&mut self) {}
}

/// Records the cumulative loss after every epoch
#[derive(Debug, Default)]
pub struct LossRecorder {
    history: LossHistory,
}

impl LossRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &LossHistory {
        &self.history
    }

    pub fn into_history(self) -> LossHistory {
        self.history
    }
}

impl EpochCallback for LossRecorder {
    fn on_epoch_end(&mut self, report: &EpochReport) {
        let loss = report.latest_training_loss;
        tracing::info!("Loss after epoch {}: {}", report.epoch, loss);
        self.history.push(loss);
    }
}

/// Logs throughput per epoch
#[derive(Debug, Default)]
pub struct ProgressLogger;

impl EpochCallback for ProgressLogger {
    fn on_train_begin(&mut self, epochs: usize) {
        tracing::info!(epochs, "Training started");
    }

    fn on_epoch_end(&mut self, report: &EpochReport) {
        let secs = report.elapsed.as_secs_f64().max(f64::EPSILON);
        tracing::debug!(
            epoch = report.epoch + 1,
            of = report.epochs,
            words = report.words_processed,
            effective = report.effective_words,
            alpha = report.alpha,
            words_per_sec = (report.effective_words as f64 / secs) as u64,
            "Epoch finished"
        );
    }

    fn on_train_end(&mut self) {
        tracing::info!("Training finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(epoch: usize, loss: f64) -> EpochReport {
        EpochReport {
            epoch,
            epochs: 3,
            latest_training_loss: loss,
            words_processed: 10,
            effective_words: 8,
            alpha: 0.01,
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_recorder_appends_in_order() {
        let mut recorder = LossRecorder::new();
        for (epoch, loss) in [1.5, 2.5, 3.0].into_iter().enumerate() {
            recorder.on_epoch_end(&report(epoch, loss));
        }
        assert_eq!(recorder.history().losses(), &[1.5, 2.5, 3.0]);
        assert_eq!(recorder.into_history().len(), 3);
    }
}
