//! Metrics for the solo arena
//!
//! Prometheus counters and histograms covering queue checks, team assembly,
//! leave penalties and arena lifecycle.

pub mod collector;

pub use collector::{ArenaMetrics, MetricsCollector, MetricsTimer, PenaltyMetrics, QueueMetrics};
