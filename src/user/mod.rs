mod raw;

pub use raw::*;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::groups::Classification;
use crate::management::{Capabilities, Capability};
use crate::permissions::Permissions;

/// linuxmuster.net user, with the facts derived from its raw attributes.
///
/// Built once with [`LmnUser::new`] and read-only afterwards. A refreshed
/// view of the user means a new [`LmnUser`] from a new [`RawUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LmnUser {
    #[serde(flatten)]
    raw: RawUser,
    #[serde(rename = "schoolclasses")]
    school_classes: Vec<String>,
    projects: Vec<String>,
    dn: String,
    #[serde(flatten)]
    capabilities: Capabilities,
    permissions: Permissions,
}

impl LmnUser {
    /// Derive school classes, projects, capabilities and permissions from
    /// `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPermission`] if an entry of
    /// `sophomorixWebuiPermissionsCalculated` is not `module: value`.
    pub fn new(raw: RawUser) -> Result<Self> {
        let dn = raw.distinguished_name.clone();
        let Classification {
            school_classes,
            projects,
        } = Classification::new(&raw.member_of);
        let capabilities = Capabilities::new(&raw.member_of);
        let permissions =
            Permissions::decode(&raw.sophomorix_webui_permissions_calculated)
                .inspect_err(|_| {
                    tracing::error!(%dn, "cannot decode user permissions")
                })?;

        tracing::debug!(
            %dn,
            school_classes = school_classes.len(),
            projects = projects.len(),
            permissions = permissions.len(),
            "user built"
        );
        metrics::counter!(
            "lmnuser_records_built_total",
            "role" => raw.sophomorix_role.clone()
        )
        .increment(1);

        Ok(Self {
            raw,
            school_classes,
            projects,
            dn,
            capabilities,
            permissions,
        })
    }

    /// Raw directory attributes.
    pub fn raw(&self) -> &RawUser {
        &self.raw
    }

    /// Give back the raw directory attributes.
    pub fn into_raw(self) -> RawUser {
        self.raw
    }

    /// Distinguished name of the user.
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// School classes the user is member of, in grade order.
    pub fn school_classes(&self) -> &[String] {
        &self.school_classes
    }

    /// Projects the user is member of, sorted by name.
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.has(capability)
    }

    pub fn internet(&self) -> bool {
        self.capabilities.internet
    }

    pub fn intranet(&self) -> bool {
        self.capabilities.intranet
    }

    pub fn printing(&self) -> bool {
        self.capabilities.printing
    }

    pub fn webfilter(&self) -> bool {
        self.capabilities.webfilter
    }

    pub fn wifi(&self) -> bool {
        self.capabilities.wifi
    }

    /// Web UI permissions of the user.
    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }
}

impl TryFrom<RawUser> for LmnUser {
    type Error = Error;

    fn try_from(raw: RawUser) -> Result<Self> {
        Self::new(raw)
    }
}
