// crates/seclens-server/src/http.rs
// Shared HTTP client for outbound calls

use std::time::Duration;

/// Connect timeout. Requests themselves are unbounded: a slow model reply
/// is waited for, a refused connection fails fast.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Idle connections kept per upstream host
pub const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Create the shared HTTP client.
///
/// Built once at startup and handed to the LLM client; reqwest pools
/// connections internally.
pub fn create_shared_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .user_agent(concat!("seclens/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
