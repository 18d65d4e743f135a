//! Solo 3v3 queue management
//!
//! This module ties queue assembly, temporary teams, start checks and leave
//! penalties together behind the [`SoloQueueManager`].

pub mod manager;

pub use manager::{
    HostServices, SoloQueueManager, SoloQueueStats, StartCheck, FORBIDDEN_TALENTS_MESSAGE,
};
