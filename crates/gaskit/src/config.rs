//! Configuration, layered from defaults, `gaskit.toml`, and the environment.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use gaskit_fees::GasSpeed;
use serde::{Deserialize, Serialize};

/// Default speed bump: no bump.
pub const DEFAULT_SPEED_BUMP_PERCENT: u64 = 100;

/// Default port of the gas estimation server.
pub const DEFAULT_PORT: u16 = 4337;

/// The `gaskit` configuration.
///
/// Carries the persisted user preferences (selected speed tier, speed bump)
/// alongside the node and server settings. Values are layered in this order,
/// later sources winning: built-in defaults, `gaskit.toml` in the working
/// directory, `GASKIT_`-prefixed environment variables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// URL of the node used for fee sources and fee-history estimation.
    pub rpc_url: String,
    /// Speed tier to target.
    pub gas_speed: GasSpeed,
    /// Percentage multiplier applied to wallet-side estimates; 100 = no bump.
    pub speed_bump_percent: u64,
    /// Host the gas estimation server binds to.
    pub host: String,
    /// Port the gas estimation server binds to.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            gas_speed: GasSpeed::default(),
            speed_bump_percent: DEFAULT_SPEED_BUMP_PERCENT,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// File name of the config file.
    pub const FILE_NAME: &'static str = "gaskit.toml";

    /// Returns the figment for the layered configuration.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(Self::FILE_NAME))
            .merge(Env::prefixed("GASKIT_"))
    }

    /// Extracts the configuration from all layers.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn default_config() {
        figment::Jail::expect_with(|_| {
            let config = Config::load().unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.gas_speed, GasSpeed::Medium);
            Ok(())
        });
    }

    #[test]
    fn file_and_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                Config::FILE_NAME,
                r#"
                    rpc_url = "http://localhost:9545"
                    gas_speed = "high"
                "#,
            )?;
            jail.set_env("GASKIT_SPEED_BUMP_PERCENT", "150");

            let config = Config::load().unwrap();
            assert_eq!(config.rpc_url, "http://localhost:9545");
            assert_eq!(config.gas_speed, GasSpeed::High);
            // env overrides the file and defaults
            assert_eq!(config.speed_bump_percent, 150);
            assert_eq!(config.port, DEFAULT_PORT);
            Ok(())
        });
    }
}
