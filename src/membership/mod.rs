// Public API - what other modules can use
pub use provider::{ConnectionMembership, MembershipProvider};
pub use tracker::MembershipTracker;

// Internal modules
mod provider;
mod tracker;
