//! Cached lookups over the organization, Identity Center and identity store
//!
//! Every directory loads lazily on first use and keeps what it loaded for its
//! whole lifetime, so one report is built from a single snapshot.

mod accounts;
mod assignments;
mod identity;

pub use accounts::AccountDirectory;
pub use assignments::AssignmentDirectory;
pub use identity::IdentityDirectory;
