//! Batch resolution driver
//!
//! Resolves many place names one at a time, in input order, pausing between
//! requests to stay under the provider's per-second quota. A failure never
//! aborts the batch; every input yields exactly one [`GeocodingResult`].
//!
//! ```ignore
//! let batch = BatchResolver::new(BatchConfig::default());
//! let report = batch
//!     .resolve_all(&gateway.by_place_search(Some("杭州")), &["西湖", "灵隐寺"])
//!     .await;
//! assert_eq!(report.results.len(), 2);
//! ```

use std::time::Instant;

use tracing::{debug, info};

use crate::config::BatchConfig;
use crate::coord::Location;
use crate::gateway::{GeocodingResult, Resolver};

/// Reason attached to blank batch entries.
pub const EMPTY_NAME_REASON: &str = "empty place name";

/// Outcome of one batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// One result per input, in input order
    pub results: Vec<GeocodingResult>,
    pub succeeded: usize,
    /// Issued lookups that failed (skipped entries not included)
    pub failed: usize,
    /// Blank entries answered without a request
    pub skipped: usize,
}

impl BatchReport {
    /// Successfully resolved locations, in input order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.results.iter().filter_map(GeocodingResult::location)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Sequential, rate-limited driver over any [`Resolver`].
#[derive(Debug, Clone, Default)]
pub struct BatchResolver {
    config: BatchConfig,
}

impl BatchResolver {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Resolves every name through `resolver`.
    ///
    /// The configured delay precedes every issued lookup except the first.
    /// Blank names fail immediately with [`EMPTY_NAME_REASON`] and consume
    /// neither a request nor a delay.
    pub async fn resolve_all<R, S>(&self, resolver: &R, names: &[S]) -> BatchReport
    where
        R: Resolver,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut results = Vec::with_capacity(names.len());
        let mut succeeded = 0;
        let mut failed = 0;
        let mut skipped = 0;
        let mut issued = 0usize;

        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref().trim();

            if name.is_empty() {
                debug!(index, "Skipping blank batch entry");
                skipped += 1;
                results.push(GeocodingResult::failure(EMPTY_NAME_REASON));
                continue;
            }

            if issued > 0 && !self.config.delay().is_zero() {
                tokio::time::sleep(self.config.delay()).await;
            }
            issued += 1;

            let result = resolver.resolve(name).await;
            match &result {
                GeocodingResult::Success { location } => {
                    succeeded += 1;
                    let position = location.position();
                    debug!(index, name, %position, "Batch entry resolved");
                }
                GeocodingResult::Failure { reason } => {
                    failed += 1;
                    debug!(index, name, reason = %reason, "Batch entry failed");
                }
            }
            results.push(result);
        }

        info!(
            total = names.len(),
            succeeded,
            failed,
            skipped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Batch resolution complete"
        );

        BatchReport {
            results,
            succeeded,
            failed,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LngLat;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records call order and timing; names starting with '?' fail.
    #[derive(Default)]
    struct ScriptedResolver {
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl ScriptedResolver {
        fn names(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(n, _)| n.clone())
                .collect()
        }
    }

    impl Resolver for ScriptedResolver {
        async fn resolve(&self, name: &str) -> GeocodingResult {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), Instant::now()));
            if name.starts_with('?') {
                GeocodingResult::failure(format!("no place found for '{}'", name))
            } else {
                GeocodingResult::success(Location::new(name, LngLat::new(120.0, 30.0).unwrap()))
            }
        }
    }

    fn quick() -> BatchResolver {
        BatchResolver::new(BatchConfig::new().with_delay(Duration::from_millis(20)))
    }

    #[tokio::test]
    async fn test_results_in_input_order() {
        let resolver = ScriptedResolver::default();
        let report = quick().resolve_all(&resolver, &["A", "B", "C"]).await;

        assert_eq!(resolver.names(), vec!["A", "B", "C"]);
        let names: Vec<_> = report.locations().map(|l| l.name().to_string()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(report.succeeded, 3);
    }

    #[tokio::test]
    async fn test_delay_between_consecutive_calls() {
        let resolver = ScriptedResolver::default();
        quick().resolve_all(&resolver, &["A", "B", "C"]).await;

        let calls = resolver.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            let gap = pair[1].1.duration_since(pair[0].1);
            assert!(gap >= Duration::from_millis(20), "gap was {:?}", gap);
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_abort() {
        let resolver = ScriptedResolver::default();
        let report = quick().resolve_all(&resolver, &["A", "?B", "C"]).await;

        assert_eq!(report.results.len(), 3);
        assert!(report.results[0].is_success());
        assert!(!report.results[1].is_success());
        assert!(report.results[2].is_success());
        assert_eq!((report.succeeded, report.failed), (2, 1));
    }

    #[tokio::test]
    async fn test_blank_entries_skipped_without_request() {
        let resolver = ScriptedResolver::default();
        let names = vec!["A".to_string(), "  ".to_string(), String::new(), "B".to_string()];
        let report = quick().resolve_all(&resolver, &names).await;

        assert_eq!(resolver.names(), vec!["A", "B"]);
        assert_eq!(report.results.len(), 4);
        assert_eq!(report.results[1].reason(), Some(EMPTY_NAME_REASON));
        assert_eq!(report.results[2].reason(), Some(EMPTY_NAME_REASON));
        assert_eq!(report.skipped, 2);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_first_call_not_delayed() {
        let resolver = ScriptedResolver::default();
        let batch = BatchResolver::new(BatchConfig::new().with_delay(Duration::from_secs(5)));

        let start = Instant::now();
        batch.resolve_all(&resolver, &["", "A"]).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let resolver = ScriptedResolver::default();
        let names: [&str; 0] = [];
        let report = quick().resolve_all(&resolver, &names).await;
        assert!(report.is_empty());
    }
}
