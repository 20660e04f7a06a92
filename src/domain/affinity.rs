//! Client affinity: which mechanic a client's work tends to go to.
//!
//! The scheduler only ever fills gaps ([`ClientAffinity::remember`]); overwriting
//! an entry is reserved for manual reassignment ([`ClientAffinity::assign`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from client key to preferred mechanic id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientAffinity(BTreeMap<String, String>);

impl ClientAffinity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferred mechanic for a client, if any.
    pub fn preferred(&self, client: &str) -> Option<&str> {
        self.0.get(client).map(String::as_str).filter(|id| !id.is_empty())
    }

    /// Record `worker_id` for `client` unless a preference already exists.
    ///
    /// Returns true when the map changed.
    pub fn remember(&mut self, client: &str, worker_id: &str) -> bool {
        if self.preferred(client).is_some() {
            return false;
        }
        self.0.insert(client.to_string(), worker_id.to_string());
        true
    }

    /// Overwrite the preference for `client`.
    pub fn assign(&mut self, client: &str, worker_id: &str) {
        self.0.insert(client.to_string(), worker_id.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in client order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ClientAffinity {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
