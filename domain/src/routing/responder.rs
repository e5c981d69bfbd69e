//! Responders and the static domain → responder directory.

use super::domain::Domain;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A human who answers questions routed to one domain, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responder(String);

impl Responder {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Responder {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One-to-one mapping from every [`Domain`] to its [`Responder`].
///
/// Built once at startup and never mutated. Every domain always has a
/// responder and no two domains share one, so a responder name also
/// identifies its domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderDirectory {
    responders: [Responder; 5],
}

impl ResponderDirectory {
    /// Build a directory from the defaults with per-domain overrides applied.
    ///
    /// Names are trimmed. Fails if a name is blank or two domains end up
    /// with the same responder.
    pub fn with_overrides(
        overrides: &BTreeMap<Domain, String>,
    ) -> Result<Self, DomainError> {
        let responders = Domain::ALL.map(|domain| {
            let name = overrides
                .get(&domain)
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| domain.default_responder().to_string());
            Responder::new(name)
        });

        let mut seen = HashSet::new();
        for (domain, responder) in Domain::ALL.iter().zip(responders.iter()) {
            if responder.name().is_empty() {
                return Err(DomainError::InvalidDirectory(format!(
                    "responder for {} is empty",
                    domain
                )));
            }
            if !seen.insert(responder.name()) {
                return Err(DomainError::InvalidDirectory(format!(
                    "responder '{}' is assigned to more than one domain",
                    responder
                )));
            }
        }

        Ok(Self { responders })
    }

    /// Responder assigned to `domain`
    pub fn responder_for(&self, domain: Domain) -> &Responder {
        &self.responders[domain.priority()]
    }

    /// Domain owned by the responder called `name`, if any
    pub fn domain_of(&self, name: &str) -> Option<Domain> {
        let name = name.trim();
        Domain::ALL
            .into_iter()
            .find(|d| self.responder_for(*d).name() == name)
    }

    /// Look up a responder by exact (trimmed) name
    pub fn find(&self, name: &str) -> Option<&Responder> {
        self.domain_of(name).map(|d| self.responder_for(d))
    }

    /// All (domain, responder) pairs in domain priority order
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &Responder)> {
        Domain::ALL.into_iter().zip(self.responders.iter())
    }
}

impl Default for ResponderDirectory {
    fn default() -> Self {
        Self {
            responders: Domain::ALL.map(|d| Responder::new(d.default_responder())),
        }
    }
}
