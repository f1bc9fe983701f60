//! Live train positions from a static timetable and a realtime delay feed.
//!
//! Every trip named by the feed has its delays forward-filled along its stops, then the
//! vehicle is placed either between two stops (interpolated) or at a stop (dwelling).

pub mod clock;
pub mod config;
pub mod data;
pub mod delay;
pub mod error;
pub mod estimator;
pub mod feed;
pub mod gtfs;
pub mod logger;
pub mod pass;
pub mod stats;
pub mod timetable;
pub mod translate;

pub use estimator::PositionEstimate;
pub use feed::{DelayUpdate, Feed, FeedEntity};
pub use pass::EstimationPass;
pub use timetable::{Timetable, TimetableSnapshot, TimetableStore};
pub use translate::{Identity, LabelTable, Translator};
