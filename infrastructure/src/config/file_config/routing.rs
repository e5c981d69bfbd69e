//! Routing configuration from TOML (`[routing]` section)
//!
//! ```toml
//! [routing]
//! unread_file = "unread_messages.json"
//! session_file = "session.json"
//! fallback_domain = "Student Affairs"
//!
//! [routing.responders]
//! admission = "Dr Gohar"
//! "student affairs" = "Sir Sibtual Hassan"
//! ```
//!
//! Domains missing from `[routing.responders]` keep their default responder.

use guidance_domain::{
    ConfigIssue, ConfigIssueCode, Domain, DomainClassifier, DomainError, ResponderDirectory,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Raw routing configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    /// Path to the persisted unread counts
    pub unread_file: String,
    /// Path to the session carried between CLI runs
    pub session_file: String,
    /// Domain for questions that match no keyword
    pub fallback_domain: String,
    /// Domain name → responder name overrides
    pub responders: BTreeMap<String, String>,
}

impl Default for FileRoutingConfig {
    fn default() -> Self {
        Self {
            unread_file: "unread_messages.json".to_string(),
            session_file: "session.json".to_string(),
            fallback_domain: Domain::default().to_string(),
            responders: BTreeMap::new(),
        }
    }
}

impl FileRoutingConfig {
    /// Parse fallback_domain, falling back to Student Affairs with a warning.
    pub fn parse_fallback_domain(&self) -> (Domain, Vec<ConfigIssue>) {
        match self.fallback_domain.parse::<Domain>() {
            Ok(domain) => (domain, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::UnknownDomain {
                        field: "routing.fallback_domain".to_string(),
                        value: self.fallback_domain.clone(),
                    },
                    format!(
                        "routing.fallback_domain: unknown domain '{}', falling back to '{}'",
                        self.fallback_domain,
                        Domain::default()
                    ),
                );
                (Domain::default(), vec![issue])
            }
        }
    }

    /// Parse responder overrides keyed by domain.
    ///
    /// Unknown domains are ignored with a warning. Blank names and
    /// responders shared by two domains are errors.
    pub fn parse_responders(&self) -> (BTreeMap<Domain, String>, Vec<ConfigIssue>) {
        let mut overrides = BTreeMap::new();
        let mut issues = Vec::new();

        for (key, name) in &self.responders {
            let Ok(domain) = key.parse::<Domain>() else {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownDomain {
                        field: "routing.responders".to_string(),
                        value: key.clone(),
                    },
                    format!("routing.responders: unknown domain '{}', ignored", key),
                ));
                continue;
            };
            if name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyResponder {
                        domain: domain.to_string(),
                    },
                    format!("routing.responders: responder for {} is empty", domain),
                ));
                continue;
            }
            overrides.insert(domain, name.trim().to_string());
        }

        let mut seen = HashSet::new();
        for domain in Domain::ALL {
            let name = overrides
                .get(&domain)
                .map(String::as_str)
                .unwrap_or_else(|| domain.default_responder());
            if !seen.insert(name) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateResponder {
                        name: name.to_string(),
                    },
                    format!(
                        "routing.responders: '{}' is assigned to more than one domain",
                        name
                    ),
                ));
            }
        }

        (overrides, issues)
    }

    /// Build the responder directory from the overrides.
    pub fn to_directory(&self) -> Result<ResponderDirectory, DomainError> {
        ResponderDirectory::with_overrides(&self.parse_responders().0)
    }

    /// Build the classifier: directory plus fallback domain.
    pub fn to_classifier(&self) -> Result<DomainClassifier, DomainError> {
        let directory = self.to_directory()?;
        Ok(DomainClassifier::new(directory).with_fallback(self.parse_fallback_domain().0))
    }
}
