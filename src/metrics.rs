use std::time::Duration;

use axum::{routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tokio::task::JoinHandle;

/// A process can hold only one global recorder; routers built later reuse this handle.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Histogram samples are drained on upkeep; without it they grow until the next scrape.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process) and return its handle.
    /// The first call inside a Tokio runtime also starts the upkeep task.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                // Use default buckets to avoid API differences across crate versions.
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
                if tokio::runtime::Handle::try_current().is_ok() {
                    spawn_upkeep(handle.clone(), UPKEEP_INTERVAL);
                }
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Periodically run recorder upkeep. Must be called from within a Tokio runtime.
pub fn spawn_upkeep(handle: PrometheusHandle, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        loop {
            tick.tick().await;
            handle.run_upkeep();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upkeep_task_keeps_running() {
        // Recorder-less handle: upkeep must not need the global recorder.
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let task = spawn_upkeep(handle, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!task.is_finished());
        task.abort();
    }
}
