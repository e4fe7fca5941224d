use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub bind_port: u16,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_address = env::var("HMS_BIND_ADDRESS")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let bind_port = env::var("HMS_BIND_PORT")
            .ok()
            .and_then(|port| match port.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("HMS_BIND_PORT is not a valid port, using default");
                    None
                }
            })
            .unwrap_or(3000);

        let seed_demo_data = env::var("HMS_SEED_DEMO_DATA")
            .map(|value| !matches!(value.as_str(), "0" | "false"))
            .unwrap_or(true);

        Self {
            bind_address,
            bind_port,
            seed_demo_data,
        }
    }
}
