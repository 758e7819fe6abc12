//! Capabilities granted through management groups.
//!
//! sophomorix grants internet, intranet, printing, webfilter and wifi access
//! by adding the user to a group of that name under the `Management`
//! branch, e.g. `CN=wifi,OU=Management,OU=default-school,...`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker of the branch holding management groups.
pub const MANAGEMENT_BRANCH: &str = "OU=Management";

/// Capability granted by a management group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Internet,
    Intranet,
    Printing,
    Webfilter,
    Wifi,
}

impl Capability {
    /// Every capability, in group name order.
    pub const ALL: [Capability; 5] = [
        Capability::Internet,
        Capability::Intranet,
        Capability::Printing,
        Capability::Webfilter,
        Capability::Wifi,
    ];

    /// Name of the management group granting this capability.
    pub fn group_name(&self) -> &'static str {
        match self {
            Capability::Internet => "internet",
            Capability::Intranet => "intranet",
            Capability::Printing => "printing",
            Capability::Webfilter => "webfilter",
            Capability::Wifi => "wifi",
        }
    }

    /// Whether one of `memberships` is the management group of this
    /// capability. The DN must start with `CN=<name>,OU=Management`.
    pub fn granted_by<S: AsRef<str>>(&self, memberships: &[S]) -> bool {
        let prefix = format!("CN={},{MANAGEMENT_BRANCH}", self.group_name());
        memberships
            .iter()
            .any(|dn| dn.as_ref().starts_with(prefix.as_str()))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group_name())
    }
}

/// Capability flags of a user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct Capabilities {
    pub internet: bool,
    pub intranet: bool,
    pub printing: bool,
    pub webfilter: bool,
    pub wifi: bool,
}

impl Capabilities {
    /// Read capability flags from group `memberships`.
    pub fn new<S: AsRef<str>>(memberships: &[S]) -> Self {
        Self {
            internet: Capability::Internet.granted_by(memberships),
            intranet: Capability::Intranet.granted_by(memberships),
            printing: Capability::Printing.granted_by(memberships),
            webfilter: Capability::Webfilter.granted_by(memberships),
            wifi: Capability::Wifi.granted_by(memberships),
        }
    }

    /// Check a single capability.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Internet => self.internet,
            Capability::Intranet => self.intranet,
            Capability::Printing => self.printing,
            Capability::Webfilter => self.webfilter,
            Capability::Wifi => self.wifi,
        }
    }

    /// Iterate over granted capabilities.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.has(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_capability() {
        let memberships =
            ["CN=internet,OU=Management,OU=default-school,OU=SCHOOLS"];
        let capabilities = Capabilities::new(&memberships);

        assert_eq!(
            capabilities,
            Capabilities {
                internet: true,
                ..Default::default()
            }
        );
        assert_eq!(
            capabilities.granted().collect::<Vec<_>>(),
            vec![Capability::Internet]
        );
    }

    #[test]
    fn test_prefix_is_anchored() {
        let memberships = [
            "CN=internet,OU=NotManagement,OU=default-school",
            "CN=p_internet,OU=Management,OU=default-school",
            "CN=Wifi,OU=Management,OU=default-school",
            "CN=7a,OU=7a,OU=Students,CN=printing,OU=Management",
        ];

        assert_eq!(Capabilities::new(&memberships), Capabilities::default());
    }

    #[test]
    fn test_all_capabilities() {
        let memberships: Vec<String> = Capability::ALL
            .iter()
            .map(|c| format!("CN={c},OU=Management,OU=default-school"))
            .collect();
        let capabilities = Capabilities::new(&memberships);

        for capability in Capability::ALL {
            assert!(capabilities.has(capability), "{capability} not granted");
        }
        assert_eq!(capabilities.granted().count(), 5);
    }

    #[test]
    fn test_independent_flags() {
        let memberships = [
            "CN=printing,OU=Management,OU=default-school",
            "CN=wifi,OU=Management,OU=default-school",
        ];
        let capabilities = Capabilities::new(&memberships);

        assert_eq!(
            capabilities.granted().collect::<Vec<_>>(),
            vec![Capability::Printing, Capability::Wifi]
        );
        assert!(!capabilities.internet);
    }

    #[test]
    fn test_no_memberships() {
        let memberships: Vec<String> = Vec::new();
        assert_eq!(Capabilities::new(&memberships), Capabilities::default());
    }

    #[test]
    fn test_capability_serde() {
        assert_eq!(
            serde_json::to_string(&Capability::Webfilter).unwrap(),
            "\"webfilter\""
        );
    }
}
