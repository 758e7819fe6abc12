//! Group membership classification into school classes and projects.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::dn::common_name;

/// Marker of the branch holding school class groups.
pub const STUDENTS_BRANCH: &str = "OU=Students";
/// Marker of the branch holding project groups.
pub const PROJECTS_BRANCH: &str = "OU=Projects";

/// Sort position of class names without any digit, after every real grade.
const NO_GRADE: u128 = 10_u128.pow(10);

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// School classes and projects of a user, both sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub school_classes: Vec<String>,
    pub projects: Vec<String>,
}

impl Classification {
    /// Classify `memberships` (usually the `memberOf` attribute).
    pub fn new<S: AsRef<str>>(memberships: &[S]) -> Self {
        Self {
            school_classes: school_classes(memberships),
            projects: projects(memberships),
        }
    }
}

/// Grade number of a class name: the first run of digits, e.g. `10` for
/// `10a`. Names without digits get a number larger than any grade.
pub fn grade(name: &str) -> u128 {
    match DIGITS.find(name) {
        // Runs too long for `u128` still sort after the sentinel.
        Some(m) => m.as_str().parse().unwrap_or(u128::MAX),
        None => NO_GRADE,
    }
}

/// Sort class names by grade number, then by name.
pub fn sort_school_classes(classes: &mut [String]) {
    classes.sort_by_cached_key(|name| (grade(name), name.clone()));
}

/// Names of the school classes among `memberships`, in grade order.
pub fn school_classes<S: AsRef<str>>(memberships: &[S]) -> Vec<String> {
    let mut classes = leaf_names(memberships, STUDENTS_BRANCH);
    sort_school_classes(&mut classes);
    classes
}

/// Names of the projects among `memberships`, sorted.
pub fn projects<S: AsRef<str>>(memberships: &[S]) -> Vec<String> {
    let mut projects = leaf_names(memberships, PROJECTS_BRANCH);
    projects.sort();
    projects
}

fn leaf_names<S: AsRef<str>>(memberships: &[S], branch: &str) -> Vec<String> {
    memberships
        .iter()
        .map(|dn| -> &str { dn.as_ref() })
        .filter(|dn| dn.contains(branch))
        .filter_map(|dn| {
            let name = common_name(dn);
            if name.is_empty() {
                tracing::warn!(%dn, branch, "membership without group name skipped");
                None
            } else {
                Some(name.to_owned())
            }
        })
        .collect()
}
