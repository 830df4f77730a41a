//! API-level settings; lending settings live in `nxlend_sdk::NxlendConfig`.

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_ACTION_ICON: &str =
    "https://img.picgo.net/2024/07/01/nxaction6e1546b1b6a2a647.png";

/// Path under which the supply action routes are mounted.
pub const SUPPLY_ROUTE_PREFIX: &str = "/api/nxlending/supply";

/// Amounts offered as one-click buttons on the action card.
pub const PRESET_AMOUNTS: [&str; 3] = ["0.1", "1", "10"];

/// Amount used by a POST that carries no amount in its path.
pub const DEFAULT_SUPPLY_AMOUNT: &str = "1";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    /// Image shown on every action card
    pub icon_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            icon_url: DEFAULT_ACTION_ICON.to_string(),
        }
    }
}

impl ApiConfig {
    /// Reads `PORT` and `NXFI_ACTION_ICON`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(port) = dotenvy::var("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {port}"))?;
        }
        if let Ok(icon_url) = dotenvy::var("NXFI_ACTION_ICON") {
            config.icon_url = icon_url;
        }
        Ok(config)
    }
}
