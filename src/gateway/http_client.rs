use reqwest::Client;
use std::time::Duration;

/// Pooled HTTP client for gateway calls. Poster synthesis can take a while,
/// so the request timeout is configurable; connection setup is not.
pub fn build_gateway_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
