//! Web UI permissions decoding.
//!
//! sophomorix stores the computed permissions of a user in
//! `sophomorixWebuiPermissionsCalculated`, one `module: value` string per
//! module, e.g. `["webui.dashboard.*: true", "webui.cloud.*: false"]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const SEPARATOR: &str = ": ";
const ALLOWED: &str = "true";

/// Permission of each module listed for a user.
///
/// Modules missing from the source list are missing here too; they are
/// **not** denied by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(BTreeMap<String, bool>);

impl Permissions {
    /// Decode a list of `module: value` entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPermission`] as soon as an entry has no
    /// `": "` separator. Nothing is decoded in that case.
    pub fn decode<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        entries
            .iter()
            .map(|entry| parse_entry(entry.as_ref()))
            .collect::<Result<BTreeMap<_, _>>>()
            .map(Self)
    }

    /// Permission for `module`, `None` if the module is not listed.
    pub fn get(&self, module: &str) -> Option<bool> {
        self.0.get(module).copied()
    }

    /// Whether `module` is listed and allowed.
    pub fn is_allowed(&self, module: &str) -> bool {
        self.get(module).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(module, allowed)` pairs, ordered by module name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(module, allowed)| (module.as_str(), *allowed))
    }
}

fn parse_entry(entry: &str) -> Result<(String, bool)> {
    let Some((module, value)) = entry.split_once(SEPARATOR) else {
        tracing::error!(%entry, "permission entry without separator");
        metrics::counter!("lmnuser_permission_decode_failures_total")
            .increment(1);
        return Err(Error::MalformedPermission {
            entry: entry.to_owned(),
        });
    };

    Ok((module.to_owned(), value == ALLOWED))
}
