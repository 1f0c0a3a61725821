//! Release-note contributor handling.
//!
//! # Responsibility
//! - Model contributors credited in release notes.
//! - Decide which contributors are left out of the credits.
//!
//! # Invariants
//! - Ignore checks use exact, case-sensitive string equality.
//! - A contributor without a name or login never matches on that field.

pub mod contributor;
pub mod ignored;
pub mod predicate;

pub use contributor::{release_contributors, Contributor};
pub use ignored::IgnoredContributor;
pub use predicate::Predicate;
