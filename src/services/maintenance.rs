use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

/// Body the probe endpoint answers with when the service is healthy.
pub const MAINTENANCE_PROBE_GREETING: &str = "Hello from Campusmate";

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes the server's maintenance endpoint. A 2xx response carrying
/// the fixed greeting means "not under maintenance"; any other status
/// or body is treated as under maintenance, while a transport failure
/// is fail-open (not under maintenance) so an unreachable probe never
/// locks users out.
///
/// The guard flag lives on the instance, not in a process-global: a
/// second check while one is outstanding is dropped, not queued.
pub struct MaintenanceChecker {
    probe_url: String,
    in_flight: AtomicBool,
}

impl MaintenanceChecker {
    pub fn new(probe_url: impl Into<String>) -> Self {
        Self {
            probe_url: probe_url.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns `Some(under_maintenance)`, or `None` when another check
    /// was already in flight and this one was dropped.
    pub async fn check(&self) -> Option<bool> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("maintenance check already in flight, dropping");
            return None;
        }

        let under_maintenance = self.probe().await;
        self.in_flight.store(false, Ordering::SeqCst);
        Some(under_maintenance)
    }

    async fn probe(&self) -> bool {
        // A fresh client per check with bounded timeouts; never reused.
        let client = match reqwest::Client::builder()
            .connect_timeout(PROBE_TIMEOUT)
            .timeout(PROBE_TIMEOUT)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("failed to build probe client: {}", e);
                return false;
            }
        };

        let response = match client.get(&self.probe_url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("maintenance probe unreachable: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            return true;
        }

        match response.text().await {
            // Exact match only; a trailing newline from the server
            // counts as an unexpected body.
            Ok(body) => body != MAINTENANCE_PROBE_GREETING,
            Err(_) => true,
        }
    }
}
