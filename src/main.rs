use bikehero::config::{self, ApiConfig, DEFAULT_API_URL};
use std::env;

/// Bundled config for builds without a `.env` file (web, mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    for (key, value) in config::env_pairs(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

// The browser has no process environment; settings are read straight from
// the bundled document instead.
#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing(level: tracing::Level) {
    // dioxus may already have installed a subscriber
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
fn init_tracing(_level: tracing::Level) {}

fn main() {
    load_dotenv();
    let settings = config::with_bundled(|key| env::var(key).ok(), BUNDLED_CONFIG);
    init_tracing(config::log_level(&settings));

    let api_config = ApiConfig::from_lookup(&settings).unwrap_or_else(|err| {
        tracing::warn!("{err:#}; falling back to {DEFAULT_API_URL}");
        ApiConfig::default()
    });
    tracing::info!(base_url = %api_config.base_url(), "starting BikeHero agent console");
    config::install(api_config);

    dioxus::launch(bikehero::ui::App);
}
