use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

/// Point-in-time copy of the pipeline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub frames_processed: usize,
    pub peaks_emitted: usize,
    pub errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_frame(&self, peaks: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frames_processed += 1;
            metrics.peaks_emitted += peaks;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_accumulates_frames_and_errors() {
        let recorder = MetricsRecorder::new();
        recorder.record_frame(3);
        recorder.record_frame(2);
        recorder.record_error();
        assert_eq!(
            recorder.snapshot(),
            Metrics {
                frames_processed: 2,
                peaks_emitted: 5,
                errors: 1,
            }
        );
    }
}
