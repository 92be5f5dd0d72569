use super::{types::Config, ConfigError, StorageBackend};

/// Validate a loaded configuration before the server starts
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }

    if config.storage.backend == StorageBackend::File
        && config.storage.path.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "storage.path must not be empty for the file backend".to_string(),
        ));
    }

    Ok(())
}
