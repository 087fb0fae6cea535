//! Naming options for emitted DDL definitions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ddlift_grammar::{Production, ProductionId};
use ddlift_smt::index_vars::DEFAULT_INDEX_VAR_PREFIX;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How definitions and fresh variables are named.
///
/// The defaults reproduce the reference output: the entry production is
/// `Main`, every other production `L<id>`, fresh index variables `ii<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoweringConfig {
    pub entry_name: String,
    pub rule_prefix: String,
    pub index_var_prefix: String,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self {
            entry_name: "Main".into(),
            rule_prefix: "L".into(),
            index_var_prefix: DEFAULT_INDEX_VAR_PREFIX.into(),
        }
    }
}

impl LoweringConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: LoweringConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// Every configured name must be a non-empty ASCII identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("entry_name", &self.entry_name),
            ("rule_prefix", &self.rule_prefix),
            ("index_var_prefix", &self.index_var_prefix),
        ] {
            if !is_identifier(value) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be a non-empty ASCII identifier, got '{value}'"
                )));
            }
        }
        let shadows_rule = self
            .entry_name
            .strip_prefix(&self.rule_prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()));
        if shadows_rule {
            return Err(ConfigError::Invalid(format!(
                "entry_name '{}' collides with rule names '{}<id>'",
                self.entry_name, self.rule_prefix
            )));
        }
        Ok(())
    }

    /// Name of the definition emitted for `production`.
    pub fn definition_name(&self, production: &Production) -> String {
        if production.is_entry() {
            self.entry_name.clone()
        } else {
            self.rule_name(production.id)
        }
    }

    /// Name used when production `id` is referenced from an alternative.
    pub fn rule_name(&self, id: ProductionId) -> String {
        format!("{}{id}", self.rule_prefix)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
