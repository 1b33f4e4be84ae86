//! Pipeline parameters.
use std::time::Duration;

/// default size of both worker pools.
pub const DEFAULT_WORKERS: usize = 5;

/// Worker pool sizes and per-unit timeouts.
///
/// Pool sizes only cap resource usage; timeouts turn a stuck unit into a failure entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub extract_workers: usize,
    pub export_workers: usize,
    pub extract_timeout: Option<Duration>,
    pub export_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extract_workers: DEFAULT_WORKERS,
            export_workers: DEFAULT_WORKERS,
            extract_timeout: None,
            export_timeout: None,
        }
    }
}

impl PipelineConfig {
    pub fn new(
        extract_workers: usize,
        export_workers: usize,
        extract_timeout: Option<Duration>,
        export_timeout: Option<Duration>,
    ) -> Self {
        Self {
            extract_workers: extract_workers.max(1),
            export_workers: export_workers.max(1),
            extract_timeout,
            export_timeout,
        }
    }

    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.extract_timeout = Some(timeout);
        self
    }

    pub fn with_export_timeout(mut self, timeout: Duration) -> Self {
        self.export_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PipelineConfig::default();
        assert_eq!((c.extract_workers, c.export_workers), (5, 5));
        assert_eq!(c.extract_timeout, None);
    }

    #[test]
    fn zero_workers_clamped() {
        let c = PipelineConfig::new(0, 0, None, Some(Duration::from_secs(1)));
        assert_eq!((c.extract_workers, c.export_workers), (1, 1));
        assert_eq!(c.export_timeout, Some(Duration::from_secs(1)));
    }
}
