use reqwest::Client;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for model calls. Requests run to completion unless a
/// request timeout is configured; connecting is always bounded.
pub fn build_model_client(request_timeout_secs: Option<u64>) -> Client {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60));

    if let Some(secs) = request_timeout_secs.filter(|secs| *secs > 0) {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("falling back to default HTTP client: {err}");
        Client::new()
    })
}
