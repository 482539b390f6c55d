use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use crate::models::{Identity, ValidityLists};
use crate::models::profile::{DEFAULT_CONCERNS, DEFAULT_GOALS, DEFAULT_SKIN_TYPES};
use crate::registry::{MatchingStrategy, RegistryOptions, DEFAULT_FIXED_ROUTINE_ID};

/// Configuration for the routine registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry behavior
    pub registry: RegistrySettings,
    /// Allowed profile attributes
    pub validity: ValidityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Identity that deploys the registry and becomes its first admin
    pub admin: String,
    /// Reject profile attributes that are not in the validity lists
    pub enforce_validity_lists: bool,
    /// Routine selection: "fixed" or "weather-profile"
    pub matching: String,
    /// Routine every request resolves to under fixed matching
    pub fixed_routine_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidityConfig {
    pub skin_types: Vec<String>,
    pub concerns: Vec<String>,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Emit span open/close events around operations
    pub log_operations: bool,
}

impl Default for ValidityConfig {
    fn default() -> Self {
        Self {
            skin_types: DEFAULT_SKIN_TYPES.iter().map(|s| s.to_string()).collect(),
            concerns: DEFAULT_CONCERNS.iter().map(|s| s.to_string()).collect(),
            goals: DEFAULT_GOALS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_operations: false,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registry: RegistrySettings {
                admin: String::new(), // MUST be configured
                enforce_validity_lists: true,
                matching: "fixed".to_string(),
                fixed_routine_id: DEFAULT_FIXED_ROUTINE_ID,
            },
            validity: ValidityConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables and validate it
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.registry.admin = env::var("SKINREG_ADMIN")
            .context("SKINREG_ADMIN environment variable is required")?;

        if let Ok(enforce) = env::var("SKINREG_ENFORCE_VALIDITY_LISTS") {
            config.registry.enforce_validity_lists = enforce
                .parse()
                .context("Invalid SKINREG_ENFORCE_VALIDITY_LISTS value")?;
        }

        if let Ok(matching) = env::var("SKINREG_MATCHING") {
            config.registry.matching = matching;
        }

        if let Ok(id) = env::var("SKINREG_FIXED_ROUTINE_ID") {
            config.registry.fixed_routine_id = id
                .parse()
                .context("Invalid SKINREG_FIXED_ROUTINE_ID value")?;
        }

        // Validity lists
        if let Ok(list) = env::var("SKINREG_SKIN_TYPES") {
            config.validity.skin_types = split_list(&list);
        }

        if let Ok(list) = env::var("SKINREG_CONCERNS") {
            config.validity.concerns = split_list(&list);
        }

        if let Ok(list) = env::var("SKINREG_GOALS") {
            config.validity.goals = split_list(&list);
        }

        if !config.registry.enforce_validity_lists {
            warn!("Validity lists are not enforced; profiles accept any attribute");
        }

        // Logging configuration
        if let Ok(log_level) = env::var("SKINREG_LOG_LEVEL") {
            config.logging.level = log_level;
        }

        if let Ok(log_operations) = env::var("SKINREG_LOG_OPERATIONS") {
            config.logging.log_operations = log_operations
                .parse()
                .context("Invalid SKINREG_LOG_OPERATIONS value")?;
        }

        config.validate()?;

        info!(
            "Loaded registry configuration (matching: {}, validity lists: {}/{}/{})",
            config.registry.matching,
            config.validity.skin_types.len(),
            config.validity.concerns.len(),
            config.validity.goals.len()
        );

        Ok(config)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.registry.admin.trim().is_empty() {
            return Err(anyhow::anyhow!("Registry admin identity cannot be empty"));
        }

        self.matching_strategy()?;

        if self.registry.fixed_routine_id == 0 {
            return Err(anyhow::anyhow!(
                "Fixed routine ID must be at least 1 (routine IDs start at 1)"
            ));
        }

        for (name, list) in [
            ("skin types", &self.validity.skin_types),
            ("concerns", &self.validity.concerns),
            ("goals", &self.validity.goals),
        ] {
            if list.is_empty() {
                return Err(anyhow::anyhow!("Validity list for {} cannot be empty", name));
            }
        }

        self.validity_lists()?;

        Ok(())
    }

    pub fn admin_identity(&self) -> Identity {
        Identity::new(self.registry.admin.trim())
    }

    pub fn matching_strategy(&self) -> Result<MatchingStrategy> {
        let strategy: MatchingStrategy = self
            .registry
            .matching
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Invalid SKINREG_MATCHING value")?;

        Ok(match strategy {
            MatchingStrategy::FixedRoutine(_) => {
                MatchingStrategy::FixedRoutine(self.registry.fixed_routine_id)
            }
            other => other,
        })
    }

    /// Bounded validity lists; each list holds at most ten labels of up to 20 characters
    pub fn validity_lists(&self) -> Result<ValidityLists> {
        ValidityLists::from_strs(
            &self.validity.skin_types,
            &self.validity.concerns,
            &self.validity.goals,
        )
        .context("Invalid validity list")
    }

    /// Convert to RegistryOptions for use by Registry
    pub fn to_options(&self) -> Result<RegistryOptions> {
        Ok(RegistryOptions {
            enforce_validity_lists: self.registry.enforce_validity_lists,
            matching: self.matching_strategy()?,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}
