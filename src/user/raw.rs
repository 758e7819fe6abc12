//! Raw attributes of a linuxmuster.net user entry.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// LDAP generalized time as written by sophomorix, e.g. `20230905120312.0Z`.
const GENERALIZED_TIME: &str = "%Y%m%d%H%M%S%.f";
/// Birthdate as written by sophomorix, e.g. `24.12.2010`.
const BIRTHDATE: &str = "%d.%m.%Y";

/// User attributes as returned by the directory, verbatim.
///
/// Every field is required. Multi-valued attributes keep the order and
/// duplicates of the directory answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub cn: String,
    pub display_name: String,
    pub distinguished_name: String,
    pub given_name: String,
    pub home_directory: String,
    pub home_drive: String,
    pub mail: Vec<String>,
    pub member_of: Vec<String>,
    pub name: String,
    pub proxy_addresses: Vec<String>,
    #[serde(rename = "sAMAccountName")]
    pub sam_account_name: String,
    #[serde(rename = "sAMAccountType")]
    pub sam_account_type: String,
    pub sn: String,
    pub sophomorix_admin_class: String,
    pub sophomorix_admin_file: String,
    pub sophomorix_birthdate: String,
    pub sophomorix_cloud_quota_calculated: Vec<String>,
    pub sophomorix_comment: String,
    pub sophomorix_creation_date: String,
    pub sophomorix_custom1: String,
    pub sophomorix_custom2: String,
    pub sophomorix_custom3: String,
    pub sophomorix_custom4: String,
    pub sophomorix_custom5: String,
    pub sophomorix_custom_multi1: Vec<String>,
    pub sophomorix_custom_multi2: Vec<String>,
    pub sophomorix_custom_multi3: Vec<String>,
    pub sophomorix_custom_multi4: Vec<String>,
    pub sophomorix_custom_multi5: Vec<String>,
    pub sophomorix_deactivation_date: String,
    pub sophomorix_exam_mode: Vec<String>,
    pub sophomorix_exit_admin_class: String,
    #[serde(rename = "sophomorixFirstnameASCII")]
    pub sophomorix_firstname_ascii: String,
    pub sophomorix_firstname_initial: String,
    pub sophomorix_first_password: String,
    pub sophomorix_intrinsic2: Vec<String>,
    pub sophomorix_mail_quota_calculated: Vec<String>,
    pub sophomorix_mail_quota: Vec<String>,
    pub sophomorix_quota: Vec<String>,
    pub sophomorix_role: String,
    pub sophomorix_schoolname: String,
    pub sophomorix_school_prefix: String,
    pub sophomorix_sessions: Vec<String>,
    pub sophomorix_status: String,
    #[serde(rename = "sophomorixSurnameASCII")]
    pub sophomorix_surname_ascii: String,
    pub sophomorix_surname_initial: String,
    pub sophomorix_toleration_date: String,
    pub sophomorix_unid: String,
    pub sophomorix_user_token: String,
    pub sophomorix_webui_dashboard: Vec<String>,
    pub sophomorix_webui_permissions_calculated: Vec<String>,
    pub unix_home_directory: String,
}

impl RawUser {
    /// Date the account was created by sophomorix.
    pub fn creation_date(&self) -> Option<NaiveDateTime> {
        parse_generalized_time(&self.sophomorix_creation_date)
    }

    /// Date the account is (or was) deactivated.
    pub fn deactivation_date(&self) -> Option<NaiveDateTime> {
        parse_generalized_time(&self.sophomorix_deactivation_date)
    }

    /// Date until which a removed user is tolerated.
    pub fn toleration_date(&self) -> Option<NaiveDateTime> {
        parse_generalized_time(&self.sophomorix_toleration_date)
    }

    /// Birthdate of the user.
    pub fn birthdate(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.sophomorix_birthdate, BIRTHDATE).ok()
    }
}

/// Parse an LDAP generalized time such as `20230905120312.0Z`.
///
/// Only UTC values (trailing `Z`) are accepted.
pub fn parse_generalized_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.strip_suffix('Z')?;
    NaiveDateTime::parse_from_str(value, GENERALIZED_TIME).ok()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_generalized_time() {
        let date = parse_generalized_time("20230905120312.0Z").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 9, 5));
        assert_eq!((date.hour(), date.minute(), date.second()), (12, 3, 12));

        assert!(parse_generalized_time("20230905120312.0").is_none());
        assert!(parse_generalized_time("---").is_none());
        assert!(parse_generalized_time("").is_none());
    }

    #[test]
    fn test_ldap_attribute_names() {
        let value = serde_json::to_value(crate::user::tests::raw_user())
            .unwrap();
        let object = value.as_object().unwrap();

        for attribute in crate::ldap::ATTRIBUTES {
            assert!(object.contains_key(*attribute), "{attribute} missing");
        }
        assert_eq!(object.len(), crate::ldap::ATTRIBUTES.len());
    }
}
