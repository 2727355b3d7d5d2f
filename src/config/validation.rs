use crate::config::types::{Config, GitHubConfig, LocalConfig, SourceConfig, SyncConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    match &config.source {
        SourceConfig::Github(github) => validate_github_config(github)?,
        SourceConfig::Local(local) => validate_local_config(local)?,
    }
    validate_sync_config(&config.sync)?;
    Ok(())
}

/// Validates GitHub source configuration
fn validate_github_config(config: &GitHubConfig) -> Result<(), ConfigError> {
    validate_repo_segment("owner", &config.owner)?;
    validate_repo_segment("repo", &config.repo)?;

    let url = Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-base: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "api-base '{}' must use http or https",
            config.api_base
        )));
    }

    if config.token_env.is_empty() {
        return Err(ConfigError::Validation(
            "token-env cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates an owner or repository name
fn validate_repo_segment(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ConfigError::Validation(format!(
            "{} must contain only alphanumerics, '-', '_' or '.', got '{}'",
            field, value
        )));
    }

    Ok(())
}

/// Validates local source configuration
fn validate_local_config(config: &LocalConfig) -> Result<(), ConfigError> {
    if config.root.is_empty() {
        return Err(ConfigError::Validation("root cannot be empty".to_string()));
    }
    Ok(())
}

/// Validates synchronization settings
fn validate_sync_config(config: &SyncConfig) -> Result<(), ConfigError> {
    if !config.extension.starts_with('.') || config.extension.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "extension must look like '.md', got '{}'",
            config.extension
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.refresh_interval_secs < 5 {
        return Err(ConfigError::Validation(format!(
            "refresh-interval-secs must be >= 5, got {}",
            config.refresh_interval_secs
        )));
    }

    Ok(())
}

/// Checks an access token read from `var`
///
/// Rejects blank values and unfilled `xx...` placeholders left over from a
/// template env file.
pub fn validate_token(var: &str, token: &str) -> Result<(), ConfigError> {
    let token = token.trim();

    if token.is_empty() {
        return Err(ConfigError::Credential {
            var: var.to_string(),
            reason: "token is empty".to_string(),
        });
    }

    if token.starts_with("xx") {
        return Err(ConfigError::Credential {
            var: var.to_string(),
            reason: "token is still a placeholder".to_string(),
        });
    }

    if token.chars().any(char::is_whitespace) {
        return Err(ConfigError::Credential {
            var: var.to_string(),
            reason: "token contains whitespace".to_string(),
        });
    }

    Ok(())
}
