//! Distinguished name parsing.
//!
//! A DN such as `CN=11c,OU=11c,OU=Students,OU=default-school,OU=SCHOOLS`
//! is read from leaf to root. Components are split on literal `,` and `=`
//! only: escaped separators inside values (`\,`, `\=`) are **not** handled,
//! which matches how sophomorix names its groups.

/// One `type=value` component of a distinguished name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rdn<'a> {
    /// Attribute type, e.g. `CN` or `OU`.
    pub kind: &'a str,
    /// Attribute value, `None` when the component has no `=`.
    pub value: Option<&'a str>,
}

/// Split a DN into its ordered components.
///
/// ```
/// use lmnuser::dn::{Rdn, split_dn};
///
/// let rdns = split_dn("CN=11c,OU=Students");
/// assert_eq!(rdns[0], Rdn { kind: "CN", value: Some("11c") });
/// assert_eq!(rdns[1], Rdn { kind: "OU", value: Some("Students") });
/// ```
pub fn split_dn(dn: &str) -> Vec<Rdn<'_>> {
    dn.split(',')
        .map(|node| {
            let mut parts = node.split('=');
            Rdn {
                kind: parts.next().unwrap_or_default(),
                value: parts.next(),
            }
        })
        .collect()
}

/// Value of the first component of `dn`, usually the group short name.
///
/// Returns an empty string if the DN is empty or its first component has
/// no value.
pub fn common_name(dn: &str) -> &str {
    split_dn(dn)
        .first()
        .and_then(|rdn| rdn.value)
        .unwrap_or_default()
}
