//! Rating helpers built on the skillratings crate

pub mod quality;

pub use quality::MatchQuality;
