//! Pure aggregation over fetched raw data
//!
//! - `timeline` - day bucketing, velocity, timeline-wide averages
//! - `roster` - reach potential totals over follower/friend lists
//!
//! Nothing in here performs I/O or fails; malformed input is a caller
//! contract violation, not a runtime error handled here.

pub mod roster;
pub mod timeline;

pub use roster::{aggregate_roster, RosterStats};
pub use timeline::{aggregate_timeline, DayBucket, TimelineStats};
