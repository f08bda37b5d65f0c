// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, ProviderConfig, ServerConfig, StatisticsConfig, TrackerConfig};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers `COINWATCH__`-prefixed environment variables on
/// top (so secrets like the provider API key never need to live in the file),
/// deserializes the result into our strongly-typed `Config` struct, and
/// validates it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Environment overrides, e.g. COINWATCH__PROVIDER__API_KEY.
        .add_source(
            config::Environment::with_prefix("COINWATCH")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
