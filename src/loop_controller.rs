use std::sync::Arc;
use tracing::{debug, error};

use crate::alert::Alert;
use crate::config::Config;
use crate::error::{MonitorError, Result};
use crate::listing::Listing;
use crate::risk_log::RiskLog;
use crate::shutdown::ShutdownListener;
use crate::source::ListingSource;
use crate::stats::MonitorStats;

/// Result of the loop execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopResult {
    /// Shutdown was requested
    Shutdown {
        /// Number of cycles started before shutdown
        cycles: u32,
        /// Number of alerts raised over the whole run
        alerts: u64,
        /// Cycles cut short by a read or log-append failure
        failed_cycles: u64,
    },
}

/// What a single cycle did with one read of the listing
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Alerts raised, in listing order
    pub alerts: Vec<Alert>,
    /// Data lines examined (header excluded)
    pub lines_scanned: usize,
    /// Shutdown arrived before every flagged line was handled
    pub interrupted: bool,
}

/// Outcome of one poll cycle
#[derive(Debug)]
pub enum CycleOutcome {
    /// The listing was read and scanned
    Scanned(CycleReport),
    /// The listing could not be read or a flagged line could not be logged;
    /// the rest of the cycle is dropped and the loop retries after the interval
    Failed(MonitorError),
    /// Shutdown arrived while waiting on the source
    Interrupted,
}

/// Main loop controller that polls the listing source
pub struct LoopController<S: ListingSource> {
    config: Arc<Config>,
    source: S,
    risk_log: RiskLog,
    stats: Arc<MonitorStats>,
}

impl<S: ListingSource> LoopController<S> {
    /// Create a new LoopController
    pub fn new(config: Config, source: S) -> Self {
        let risk_log = RiskLog::new(config.log_path.clone());
        Self {
            config: Arc::new(config),
            source,
            risk_log,
            stats: MonitorStats::new_shared(),
        }
    }

    pub fn stats(&self) -> &Arc<MonitorStats> {
        &self.stats
    }

    /// Poll until shutdown is requested
    ///
    /// Neither an unreadable source nor an unwritable log stops the loop:
    /// both are reported and retried at the next interval, forever.
    pub async fn run(&self, mut shutdown: ShutdownListener) -> Result<LoopResult> {
        let interval = self.config.poll_interval();

        loop {
            if shutdown.is_triggered() {
                return Ok(self.shutdown_result().await);
            }

            let cycle = self.stats.increment_cycle().await;
            debug!("Starting cycle {} on {}", cycle, self.source.describe());

            match self.run_cycle(&mut shutdown).await? {
                CycleOutcome::Scanned(report) => {
                    if report.interrupted {
                        return Ok(self.shutdown_result().await);
                    }
                    debug!(
                        "Cycle {} scanned {} line(s), {} alert(s)",
                        cycle,
                        report.lines_scanned,
                        report.alerts.len()
                    );
                }
                CycleOutcome::Failed(e) => {
                    error!("{}", e);
                }
                CycleOutcome::Interrupted => {
                    return Ok(self.shutdown_result().await);
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.recv() => {
                    return Ok(self.shutdown_result().await);
                }
            }
        }
    }

    /// Read the listing once and handle every flagged line
    pub async fn run_cycle(&self, shutdown: &mut ShutdownListener) -> Result<CycleOutcome> {
        let read = tokio::select! {
            read = self.source.read_listing() => read,
            _ = shutdown.recv() => return Ok(CycleOutcome::Interrupted),
        };

        let scanned = match read {
            Ok(text) => self.process_listing(&text, shutdown).await,
            Err(e) => Err(e),
        };

        match scanned {
            Ok(report) => Ok(CycleOutcome::Scanned(report)),
            Err(e) if e.is_transient() => {
                self.stats.record_failed_cycle().await;
                Ok(CycleOutcome::Failed(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Alert on and log every data line of `text` that carries the risk marker
    ///
    /// Stops at the first failed append; lines after it wait for the next cycle.
    pub async fn process_listing(
        &self,
        text: &str,
        shutdown: &mut ShutdownListener,
    ) -> Result<CycleReport> {
        let marker = self.config.risk_marker.as_str();
        let mut report = CycleReport::default();

        for record in Listing::new(text).records() {
            report.lines_scanned += 1;
            if !record.matches(marker) {
                continue;
            }

            if shutdown.is_triggered() {
                report.interrupted = true;
                break;
            }

            let alert = Alert::from_record(&record);
            debug!(
                pid = %alert.pid,
                risk = ?record.risk_level(),
                score = ?record.score(),
                "Risk marker matched"
            );
            alert.print();
            self.risk_log.append(record.raw()).await?;
            self.stats.record_alert().await;
            report.alerts.push(alert);
        }

        Ok(report)
    }

    async fn shutdown_result(&self) -> LoopResult {
        let cycles = self.stats.get_cycles().await;
        let alerts = self.stats.get_alerts().await;
        let failed_cycles = self.stats.get_failed_cycles().await;
        debug!("Loop stopped after {} cycle(s), {} alert(s)", cycles, alerts);
        LoopResult::Shutdown {
            cycles,
            alerts,
            failed_cycles,
        }
    }
}
