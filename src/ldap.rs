//! LDAP support.
//!
//! Helpers for the code searching users on the directory: search base,
//! filter, requested attributes and conversion of a [`SearchEntry`] into a
//! [`RawUser`]. No connection is opened here.

use std::collections::HashMap;

use ldap3::SearchEntry;

use crate::config::Ldap as LdapConfig;
use crate::error::{Error, Result};
use crate::user::RawUser;

const DEFAULT_USERS_FILTER: &str = "(&(objectClass=user)(sAMAccountName={uid}))";

/// Attributes to request for a [`RawUser`].
pub const ATTRIBUTES: &[&str] = &[
    "cn",
    "displayName",
    "distinguishedName",
    "givenName",
    "homeDirectory",
    "homeDrive",
    "mail",
    "memberOf",
    "name",
    "proxyAddresses",
    "sAMAccountName",
    "sAMAccountType",
    "sn",
    "sophomorixAdminClass",
    "sophomorixAdminFile",
    "sophomorixBirthdate",
    "sophomorixCloudQuotaCalculated",
    "sophomorixComment",
    "sophomorixCreationDate",
    "sophomorixCustom1",
    "sophomorixCustom2",
    "sophomorixCustom3",
    "sophomorixCustom4",
    "sophomorixCustom5",
    "sophomorixCustomMulti1",
    "sophomorixCustomMulti2",
    "sophomorixCustomMulti3",
    "sophomorixCustomMulti4",
    "sophomorixCustomMulti5",
    "sophomorixDeactivationDate",
    "sophomorixExamMode",
    "sophomorixExitAdminClass",
    "sophomorixFirstnameASCII",
    "sophomorixFirstnameInitial",
    "sophomorixFirstPassword",
    "sophomorixIntrinsic2",
    "sophomorixMailQuotaCalculated",
    "sophomorixMailQuota",
    "sophomorixQuota",
    "sophomorixRole",
    "sophomorixSchoolname",
    "sophomorixSchoolPrefix",
    "sophomorixSessions",
    "sophomorixStatus",
    "sophomorixSurnameASCII",
    "sophomorixSurnameInitial",
    "sophomorixTolerationDate",
    "sophomorixUnid",
    "sophomorixUserToken",
    "sophomorixWebuiDashboard",
    "sophomorixWebuiPermissionsCalculated",
    "unixHomeDirectory",
];

/// Search parameters for users of one school.
#[derive(Debug, Clone)]
pub struct UserQuery {
    base: String,
    filter_template: String,
}

impl UserQuery {
    /// Create a new [`UserQuery`].
    pub fn new(config: &LdapConfig) -> Result<Self> {
        let template = config
            .users_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_USERS_FILTER.to_owned());

        if !template.contains("{uid}") {
            return Err(Error::InvalidFilter(template));
        }

        Ok(Self {
            base: format!("OU={},OU=SCHOOLS,{}", config.school, config.base_dn),
            filter_template: template,
        })
    }

    /// Search base, e.g. `OU=default-school,OU=SCHOOLS,DC=linuxmuster,DC=lan`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Filter matching the user with login `uid`.
    pub fn filter(&self, uid: &str) -> String {
        self.filter_template.replace("{uid}", &escape_ldap(uid))
    }

    pub fn attributes(&self) -> Vec<&'static str> {
        ATTRIBUTES.to_vec()
    }
}

impl TryFrom<SearchEntry> for RawUser {
    type Error = Error;

    fn try_from(entry: SearchEntry) -> Result<Self> {
        let mut attrs = Attributes::new(entry.attrs);
        let distinguished_name = attrs
            .single("distinguishedName")
            .unwrap_or_else(|_| entry.dn.clone());

        Ok(RawUser {
            cn: attrs.single("cn")?,
            display_name: attrs.single("displayName")?,
            distinguished_name,
            given_name: attrs.single("givenName")?,
            home_directory: attrs.single("homeDirectory")?,
            home_drive: attrs.single("homeDrive")?,
            mail: attrs.multi("mail"),
            member_of: attrs.multi("memberOf"),
            name: attrs.single("name")?,
            proxy_addresses: attrs.multi("proxyAddresses"),
            sam_account_name: attrs.single("sAMAccountName")?,
            sam_account_type: attrs.single("sAMAccountType")?,
            sn: attrs.single("sn")?,
            sophomorix_admin_class: attrs.single("sophomorixAdminClass")?,
            sophomorix_admin_file: attrs.single("sophomorixAdminFile")?,
            sophomorix_birthdate: attrs.single("sophomorixBirthdate")?,
            sophomorix_cloud_quota_calculated: attrs
                .multi("sophomorixCloudQuotaCalculated"),
            sophomorix_comment: attrs.single("sophomorixComment")?,
            sophomorix_creation_date: attrs.single("sophomorixCreationDate")?,
            sophomorix_custom1: attrs.single("sophomorixCustom1")?,
            sophomorix_custom2: attrs.single("sophomorixCustom2")?,
            sophomorix_custom3: attrs.single("sophomorixCustom3")?,
            sophomorix_custom4: attrs.single("sophomorixCustom4")?,
            sophomorix_custom5: attrs.single("sophomorixCustom5")?,
            sophomorix_custom_multi1: attrs.multi("sophomorixCustomMulti1"),
            sophomorix_custom_multi2: attrs.multi("sophomorixCustomMulti2"),
            sophomorix_custom_multi3: attrs.multi("sophomorixCustomMulti3"),
            sophomorix_custom_multi4: attrs.multi("sophomorixCustomMulti4"),
            sophomorix_custom_multi5: attrs.multi("sophomorixCustomMulti5"),
            sophomorix_deactivation_date: attrs
                .single("sophomorixDeactivationDate")?,
            sophomorix_exam_mode: attrs.multi("sophomorixExamMode"),
            sophomorix_exit_admin_class: attrs
                .single("sophomorixExitAdminClass")?,
            sophomorix_firstname_ascii: attrs
                .single("sophomorixFirstnameASCII")?,
            sophomorix_firstname_initial: attrs
                .single("sophomorixFirstnameInitial")?,
            sophomorix_first_password: attrs
                .single("sophomorixFirstPassword")?,
            sophomorix_intrinsic2: attrs.multi("sophomorixIntrinsic2"),
            sophomorix_mail_quota_calculated: attrs
                .multi("sophomorixMailQuotaCalculated"),
            sophomorix_mail_quota: attrs.multi("sophomorixMailQuota"),
            sophomorix_quota: attrs.multi("sophomorixQuota"),
            sophomorix_role: attrs.single("sophomorixRole")?,
            sophomorix_schoolname: attrs.single("sophomorixSchoolname")?,
            sophomorix_school_prefix: attrs.single("sophomorixSchoolPrefix")?,
            sophomorix_sessions: attrs.multi("sophomorixSessions"),
            sophomorix_status: attrs.single("sophomorixStatus")?,
            sophomorix_surname_ascii: attrs.single("sophomorixSurnameASCII")?,
            sophomorix_surname_initial: attrs
                .single("sophomorixSurnameInitial")?,
            sophomorix_toleration_date: attrs
                .single("sophomorixTolerationDate")?,
            sophomorix_unid: attrs.single("sophomorixUnid")?,
            sophomorix_user_token: attrs.single("sophomorixUserToken")?,
            sophomorix_webui_dashboard: attrs.multi("sophomorixWebuiDashboard"),
            sophomorix_webui_permissions_calculated: attrs
                .multi("sophomorixWebuiPermissionsCalculated"),
            unix_home_directory: attrs.single("unixHomeDirectory")?,
        })
    }
}

/// Attribute values of an entry, looked up case-insensitively.
struct Attributes(HashMap<String, Vec<String>>);

impl Attributes {
    fn new(attrs: HashMap<String, Vec<String>>) -> Self {
        Self(
            attrs
                .into_iter()
                .map(|(name, values)| (name.to_lowercase(), values))
                .collect(),
        )
    }

    fn take(&mut self, name: &str) -> Option<Vec<String>> {
        self.0.remove(&name.to_lowercase())
    }

    fn single(&mut self, name: &str) -> Result<String> {
        self.take(name)
            .and_then(|values| values.into_iter().next())
            .ok_or_else(|| Error::MissingAttribute(name.to_owned()))
    }

    fn multi(&mut self, name: &str) -> Vec<String> {
        self.take(name).unwrap_or_default()
    }
}

fn escape_ldap(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '*' => out.push_str(r"\2a"),
            '(' => out.push_str(r"\28"),
            ')' => out.push_str(r"\29"),
            '\\' => out.push_str(r"\5c"),
            '\0' => out.push_str(r"\00"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::LmnUser;

    fn entry(attrs: &[(&str, &[&str])]) -> SearchEntry {
        SearchEntry {
            dn: "CN=doe,OU=10a,OU=Students,OU=default-school".into(),
            attrs: attrs
                .iter()
                .map(|(name, values)| {
                    (
                        name.to_string(),
                        values.iter().map(|v| v.to_string()).collect(),
                    )
                })
                .collect(),
            bin_attrs: HashMap::new(),
        }
    }

    fn full_entry() -> Vec<(&'static str, &'static [&'static str])> {
        ATTRIBUTES
            .iter()
            .map(|name| match *name {
                "memberOf" => (
                    *name,
                    &[
                        "CN=10a,OU=10a,OU=Students,OU=default-school",
                        "CN=wifi,OU=Management,OU=default-school",
                    ] as &[&str],
                ),
                "sophomorixWebuiPermissionsCalculated" => {
                    (*name, &["webui.cloud.*: true"] as &[&str])
                },
                "mail" | "proxyAddresses" => (*name, &[] as &[&str]),
                _ => (*name, &["---"] as &[&str]),
            })
            .collect()
    }

    #[test]
    fn test_query() {
        let query = UserQuery::new(&LdapConfig::default()).unwrap();

        assert_eq!(
            query.base(),
            "OU=default-school,OU=SCHOOLS,DC=linuxmuster,DC=lan"
        );
        assert_eq!(
            query.filter("doe"),
            "(&(objectClass=user)(sAMAccountName=doe))"
        );
        assert_eq!(
            query.filter("*)(cn=*"),
            r"(&(objectClass=user)(sAMAccountName=\2a\29\28cn=\2a))"
        );
        assert_eq!(query.attributes().len(), ATTRIBUTES.len());
    }

    #[test]
    fn test_query_custom_filter() {
        let config = LdapConfig {
            users_filter: Some("(uid={uid})".into()),
            ..Default::default()
        };
        assert_eq!(UserQuery::new(&config).unwrap().filter("doe"), "(uid=doe)");

        let config = LdapConfig {
            users_filter: Some("(uid=*)".into()),
            ..Default::default()
        };
        assert!(matches!(
            UserQuery::new(&config),
            Err(Error::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_entry_to_user() {
        let raw = RawUser::try_from(entry(&full_entry())).unwrap();
        assert_eq!(raw.cn, "---");
        assert!(raw.mail.is_empty());

        let user = LmnUser::new(raw).unwrap();
        assert_eq!(user.school_classes(), ["10a"]);
        assert!(user.wifi());
        assert_eq!(user.permissions().get("webui.cloud.*"), Some(true));
    }

    #[test]
    fn test_entry_case_insensitive() {
        let attrs: Vec<_> = full_entry()
            .into_iter()
            .map(|(name, values)| {
                (if name == "sAMAccountName" { "samaccountname" } else { name }, values)
            })
            .collect();

        let raw = RawUser::try_from(entry(&attrs)).unwrap();
        assert_eq!(raw.sam_account_name, "---");
    }

    #[test]
    fn test_entry_dn_fallback() {
        let attrs: Vec<_> = full_entry()
            .into_iter()
            .filter(|(name, _)| *name != "distinguishedName")
            .collect();

        let raw = RawUser::try_from(entry(&attrs)).unwrap();
        assert_eq!(
            raw.distinguished_name,
            "CN=doe,OU=10a,OU=Students,OU=default-school"
        );
    }

    #[test]
    fn test_entry_missing_attribute() {
        let attrs: Vec<_> = full_entry()
            .into_iter()
            .filter(|(name, _)| *name != "sophomorixRole")
            .collect();

        assert!(matches!(
            RawUser::try_from(entry(&attrs)),
            Err(Error::MissingAttribute(name)) if name == "sophomorixRole"
        ));
    }

    #[test]
    fn test_entry_missing_memberships() {
        let attrs: Vec<_> = full_entry()
            .into_iter()
            .filter(|(name, _)| *name != "memberOf")
            .collect();

        let user = LmnUser::new(RawUser::try_from(entry(&attrs)).unwrap())
            .unwrap();
        assert!(user.school_classes().is_empty());
        assert!(!user.wifi());
    }
}
