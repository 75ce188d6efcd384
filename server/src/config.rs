use std::time::Duration;

use anyhow::Result;

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub heartbeat_interval: Duration,
    pub heartbeat_schedule: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let heartbeat_interval = std::env::var("HEARTBEAT_INTERVAL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(platform_tasks::DEFAULT_HEARTBEAT_INTERVAL);

        let heartbeat_schedule = std::env::var("HEARTBEAT_SCHEDULE")
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        Ok(Self {
            cors_allowed_origins,
            heartbeat_interval,
            heartbeat_schedule,
        })
    }
}
