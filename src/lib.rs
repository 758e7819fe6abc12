//! lmnuser models a linuxmuster.net directory user.
//!
//! A [`RawUser`] holds the attributes returned by the directory. Building an
//! [`LmnUser`] from it derives the school classes and projects the user is
//! member of, the capabilities granted by management groups, and the web UI
//! permissions.
//!
//! ```
//! # fn run(raw: lmnuser::RawUser) -> lmnuser::error::Result<()> {
//! let user = lmnuser::LmnUser::new(raw)?;
//! for class in user.school_classes() {
//!     println!("{class}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(unused_mut)]

pub mod config;
pub mod dn;
pub mod error;
pub mod groups;
pub mod ldap;
pub mod management;
pub mod permissions;
pub mod telemetry;
pub mod user;

pub use management::{Capabilities, Capability};
pub use permissions::Permissions;
pub use user::{LmnUser, RawUser};
