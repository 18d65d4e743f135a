//! Solo arena events and their publishers

pub mod messages;
pub mod publisher;

pub use messages::{
    ArenaAborted, ArenaEvent, RatingPenaltyApplied, SoloTeamsAssembled, SystemMessage,
    TempTeamsReleased,
};
pub use publisher::{EventPublisher, RecordingEventPublisher, TracingEventPublisher};
