//! Scroll progress: the ratio source and the observer plumbing that fans it out.

/// Scroll track geometry and snapshot publishing.
pub mod source;
/// Bounded observer list and latest-value mailbox.
pub mod subject;

pub use source::{ScrollProgressSource, ScrollSnapshot};
pub use subject::{LatestSlot, Subject, SubscriptionId};
