/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON market snapshot replayed by the CLI.
    pub snapshot_path: String,

    // Account
    pub account_balance: f64,
    pub risk_percent: f64,
    pub account_currency: String,
    pub target_profit: f64,

    /// Detector parameter file path.
    pub detector_config_path: String,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            snapshot_path: required_env("SNAPSHOT_PATH"),
            account_balance: parsed_env("ACCOUNT_BALANCE", 1_000.0),
            risk_percent: parsed_env("RISK_PERCENT", 2.0),
            account_currency: optional_env("ACCOUNT_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(|| "GBP".to_string()),
            target_profit: parsed_env("TARGET_PROFIT", 50.0),
            detector_config_path: optional_env("DETECTOR_CONFIG_PATH")
                .unwrap_or_else(|| "config/detector.toml".to_string()),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parsed_env(key: &str, default: f64) -> f64 {
    match optional_env(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            panic!("Environment variable '{key}' must be a number, got: '{raw}'")
        }),
        None => default,
    }
}
