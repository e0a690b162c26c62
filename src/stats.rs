use std::sync::Arc;
use tokio::sync::RwLock;

/// Counters shared between the loop and whoever reports on it
#[derive(Debug, Default)]
pub struct MonitorStats {
    /// Poll cycles started
    pub cycles: RwLock<u32>,
    /// Alerts raised (one per flagged line)
    pub alerts: RwLock<u64>,
    /// Cycles cut short by a read or log-append failure
    pub failed_cycles: RwLock<u64>,
}

impl MonitorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an Arc-wrapped MonitorStats for sharing between tasks
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Increment the cycle counter
    pub async fn increment_cycle(&self) -> u32 {
        let mut cycles = self.cycles.write().await;
        *cycles += 1;
        *cycles
    }

    pub async fn record_alert(&self) {
        *self.alerts.write().await += 1;
    }

    pub async fn record_failed_cycle(&self) {
        *self.failed_cycles.write().await += 1;
    }

    pub async fn get_cycles(&self) -> u32 {
        *self.cycles.read().await
    }

    pub async fn get_alerts(&self) -> u64 {
        *self.alerts.read().await
    }

    pub async fn get_failed_cycles(&self) -> u64 {
        *self.failed_cycles.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counters() {
        let stats = MonitorStats::new_shared();
        assert_eq!(stats.increment_cycle().await, 1);
        assert_eq!(stats.increment_cycle().await, 2);
        stats.record_alert().await;
        stats.record_failed_cycle().await;

        assert_eq!(stats.get_cycles().await, 2);
        assert_eq!(stats.get_alerts().await, 1);
        assert_eq!(stats.get_failed_cycles().await, 1);
    }
}
