//! Built-in datasets
//!
//! Sample data of the governance dashboard, one store per domain. These are
//! what the CLI serves for `--domain` and what the tests use as the
//! reference scenarios.

pub mod audit;
pub mod bias;
pub mod policy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{GovLensError, Result};
use crate::store::RecordStore;

pub use audit::{audit_schema, audit_store};
pub use bias::{bias_metric_store, metric_samples, model_catalog, model_schema};
pub use policy::{policy_schema, policy_store};

/// Built-in dataset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Audit,
    Policy,
    Bias,
    Models,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Audit, Domain::Policy, Domain::Bias, Domain::Models];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Audit => "audit",
            Domain::Policy => "policy",
            Domain::Bias => "bias",
            Domain::Models => "models",
        }
    }

    /// Build the store for this domain
    ///
    /// # Errors
    ///
    /// Propagates store validation errors; the built-in data is expected
    /// to always validate.
    pub fn store(&self) -> Result<RecordStore> {
        match self {
            Domain::Audit => audit_store(),
            Domain::Policy => policy_store(),
            Domain::Bias => bias_metric_store(),
            Domain::Models => model_catalog(),
        }
    }
}

impl FromStr for Domain {
    type Err = GovLensError;

    fn from_str(s: &str) -> Result<Self> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| GovLensError::UnknownDomain {
                domain: s.to_string(),
            })
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_domain_builds() {
        for domain in Domain::ALL {
            let store = domain.store().unwrap();
            assert!(!store.is_empty(), "{} fixture is empty", domain);
            assert_eq!(store.schema().domain(), domain.as_str());
        }
    }

    #[test]
    fn test_domain_parse() {
        assert_eq!("policy".parse::<Domain>().unwrap(), Domain::Policy);
        assert!(matches!(
            "finance".parse::<Domain>(),
            Err(GovLensError::UnknownDomain { .. })
        ));
    }
}
