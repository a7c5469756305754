//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, capacities > 0)
//! - Check cross-field constraints (replay fits in history)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::RelayConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub struct ValidationError {
    /// Config field the error refers to (e.g., "listener.bind_address").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".into(),
            message: format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        });
    }

    if config.auth.jwt_secret.is_empty() {
        errors.push(ValidationError {
            field: "auth.jwt_secret".into(),
            message: "must not be empty".into(),
        });
    }

    if config.auth.token_ttl_minutes == 0 {
        errors.push(ValidationError {
            field: "auth.token_ttl_minutes".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.chat.history_capacity == 0 {
        errors.push(ValidationError {
            field: "chat.history_capacity".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.chat.replay_count > config.chat.history_capacity {
        errors.push(ValidationError {
            field: "chat.replay_count".into(),
            message: format!(
                "replay_count ({}) exceeds history_capacity ({})",
                config.chat.replay_count, config.chat.history_capacity
            ),
        });
    }

    if config.chat.default_room.is_empty() {
        errors.push(ValidationError {
            field: "chat.default_room".into(),
            message: "must not be empty".into(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.rate_limit.enabled {
        if config.rate_limit.requests_per_second == 0 {
            errors.push(ValidationError {
                field: "rate_limit.requests_per_second".into(),
                message: "must be greater than zero when rate limiting is enabled".into(),
            });
        }
        if config.rate_limit.burst_size == 0 {
            errors.push(ValidationError {
                field: "rate_limit.burst_size".into(),
                message: "must be greater than zero when rate limiting is enabled".into(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_bind_address() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "listener.bind_address"));
    }

    #[test]
    fn rejects_replay_larger_than_history() {
        let mut config = RelayConfig::default();
        config.chat.history_capacity = 10;
        config.chat.replay_count = 20;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "chat.replay_count"));
    }

    #[test]
    fn rejects_empty_secret() {
        let mut config = RelayConfig::default();
        config.auth.jwt_secret = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "auth.jwt_secret"));
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "nope".into();
        config.auth.token_ttl_minutes = 0;
        config.chat.history_capacity = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn disabled_rate_limit_skips_rate_checks() {
        let mut config = RelayConfig::default();
        config.rate_limit.enabled = false;
        config.rate_limit.requests_per_second = 0;
        assert!(validate_config(&config).is_ok());
    }
}
