use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

pub const USER_AGENT: &str = concat!("memory-bot/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for every storage request.
///
/// `Client::clone()` is an `Arc` increment, so stores hold their own clone.
/// Holds the builder error text when the TLS backend cannot be initialised.
static SHARED_CLIENT: Lazy<Result<Client, String>> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| format!("Failed to create shared HTTP client: {}", e))
});

/// Returns the shared client, or the builder error when it could not be created.
pub fn shared_client() -> Result<Client, String> {
    SHARED_CLIENT.clone()
}
