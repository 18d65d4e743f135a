//! Metrics collection using Prometheus
//!
//! This module provides counters and histograms for queue checks, team
//! assembly, leave penalties and arena lifecycle events.

use crate::team::LeavePhase;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the solo arena
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Queue and assembly metrics
    queue_metrics: QueueMetrics,

    /// Rating penalty metrics
    penalty_metrics: PenaltyMetrics,

    /// Arena lifecycle metrics
    arena_metrics: ArenaMetrics,
}

/// Queue and assembly metrics
#[derive(Clone)]
pub struct QueueMetrics {
    /// Queue checks by result (matched, insufficient)
    pub queue_checks_total: IntCounterVec,

    /// Matches assembled
    pub teams_assembled_total: IntCounter,

    /// Candidates found per role in the last check
    pub role_candidates: IntGaugeVec,

    /// Time spent in a queue check
    pub assembly_duration: Histogram,

    /// Players refused for forbidden talents
    pub talent_rejections_total: IntCounter,
}

/// Rating penalty metrics
#[derive(Clone)]
pub struct PenaltyMetrics {
    /// Penalties applied by leave phase
    pub penalties_total: IntCounterVec,

    /// Rating points removed by leave phase
    pub penalty_points_total: IntCounterVec,
}

/// Arena lifecycle metrics
#[derive(Clone)]
pub struct ArenaMetrics {
    /// Arenas ended unrated for missing players
    pub arenas_aborted_total: IntCounter,

    /// Temporary teams created
    pub temp_teams_created_total: IntCounter,

    /// Temporary teams removed after a match
    pub temp_teams_removed_total: IntCounter,

    /// Temporary teams currently registered
    pub temp_teams_active: IntGauge,
}

impl MetricsCollector {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let queue_metrics = QueueMetrics::new(&registry)?;
        let penalty_metrics = PenaltyMetrics::new(&registry)?;
        let arena_metrics = ArenaMetrics::new(&registry)?;

        Ok(Self {
            registry,
            queue_metrics,
            penalty_metrics,
            arena_metrics,
        })
    }

    pub fn queue(&self) -> &QueueMetrics {
        &self.queue_metrics
    }

    pub fn penalty(&self) -> &PenaltyMetrics {
        &self.penalty_metrics
    }

    pub fn arena(&self) -> &ArenaMetrics {
        &self.arena_metrics
    }

    /// Record the outcome of a queue check
    pub fn record_queue_check(&self, matched: bool, dps: usize, healers: usize, duration: Duration) {
        let result = if matched { "matched" } else { "insufficient" };

        self.queue_metrics
            .queue_checks_total
            .with_label_values(&[result])
            .inc();

        if matched {
            self.queue_metrics.teams_assembled_total.inc();
        }

        self.queue_metrics
            .role_candidates
            .with_label_values(&["dps"])
            .set(dps as i64);
        self.queue_metrics
            .role_candidates
            .with_label_values(&["healer"])
            .set(healers as i64);

        self.queue_metrics
            .assembly_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a leave penalty
    pub fn record_penalty(&self, phase: LeavePhase, rating_loss: i32) {
        self.penalty_metrics
            .penalties_total
            .with_label_values(&[phase.as_str()])
            .inc();

        if rating_loss > 0 {
            self.penalty_metrics
                .penalty_points_total
                .with_label_values(&[phase.as_str()])
                .inc_by(rating_loss as u64);
        }
    }

    pub fn record_talent_rejection(&self) {
        self.queue_metrics.talent_rejections_total.inc();
    }

    pub fn record_arena_aborted(&self) {
        self.arena_metrics.arenas_aborted_total.inc();
    }

    pub fn record_temp_teams_created(&self, count: usize) {
        self.arena_metrics
            .temp_teams_created_total
            .inc_by(count as u64);
        self.arena_metrics.temp_teams_active.add(count as i64);
    }

    pub fn record_temp_teams_removed(&self, count: usize) {
        self.arena_metrics
            .temp_teams_removed_total
            .inc_by(count as u64);
        self.arena_metrics.temp_teams_active.sub(count as i64);
    }

    /// Render all metrics in the Prometheus text format
    pub fn gather_text(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl QueueMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let queue_checks_total = IntCounterVec::new(
            Opts::new("solo_arena_queue_checks_total", "Solo queue checks by result"),
            &["result"],
        )?;
        registry.register(Box::new(queue_checks_total.clone()))?;

        let teams_assembled_total = IntCounter::new(
            "solo_arena_teams_assembled_total",
            "Solo matches assembled from the queue",
        )?;
        registry.register(Box::new(teams_assembled_total.clone()))?;

        let role_candidates = IntGaugeVec::new(
            Opts::new(
                "solo_arena_role_candidates",
                "Candidates found per role in the last queue check",
            ),
            &["role"],
        )?;
        registry.register(Box::new(role_candidates.clone()))?;

        let assembly_duration = Histogram::with_opts(
            HistogramOpts::new(
                "solo_arena_assembly_duration_seconds",
                "Time spent checking the queue for a solo match",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1]),
        )?;
        registry.register(Box::new(assembly_duration.clone()))?;

        let talent_rejections_total = IntCounter::new(
            "solo_arena_talent_rejections_total",
            "Players refused for forbidden talents",
        )?;
        registry.register(Box::new(talent_rejections_total.clone()))?;

        Ok(Self {
            queue_checks_total,
            teams_assembled_total,
            role_candidates,
            assembly_duration,
            talent_rejections_total,
        })
    }
}

impl PenaltyMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let penalties_total = IntCounterVec::new(
            Opts::new("solo_arena_penalties_total", "Leave penalties applied"),
            &["phase"],
        )?;
        registry.register(Box::new(penalties_total.clone()))?;

        let penalty_points_total = IntCounterVec::new(
            Opts::new(
                "solo_arena_penalty_points_total",
                "Rating points removed by leave penalties",
            ),
            &["phase"],
        )?;
        registry.register(Box::new(penalty_points_total.clone()))?;

        Ok(Self {
            penalties_total,
            penalty_points_total,
        })
    }
}

impl ArenaMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let arenas_aborted_total = IntCounter::new(
            "solo_arena_arenas_aborted_total",
            "Arenas ended unrated because players were missing",
        )?;
        registry.register(Box::new(arenas_aborted_total.clone()))?;

        let temp_teams_created_total = IntCounter::new(
            "solo_arena_temp_teams_created_total",
            "Temporary arena teams created",
        )?;
        registry.register(Box::new(temp_teams_created_total.clone()))?;

        let temp_teams_removed_total = IntCounter::new(
            "solo_arena_temp_teams_removed_total",
            "Temporary arena teams removed",
        )?;
        registry.register(Box::new(temp_teams_removed_total.clone()))?;

        let temp_teams_active = IntGauge::new(
            "solo_arena_temp_teams_active",
            "Temporary arena teams currently registered",
        )?;
        registry.register(Box::new(temp_teams_active.clone()))?;

        Ok(Self {
            arenas_aborted_total,
            temp_teams_created_total,
            temp_teams_removed_total,
            temp_teams_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_check_metrics() {
        let collector = MetricsCollector::new().unwrap();
        collector.record_queue_check(false, 3, 1, Duration::from_micros(20));
        collector.record_queue_check(true, 4, 2, Duration::from_micros(30));

        let queue = collector.queue();
        assert_eq!(
            queue
                .queue_checks_total
                .with_label_values(&["matched"])
                .get(),
            1
        );
        assert_eq!(
            queue
                .queue_checks_total
                .with_label_values(&["insufficient"])
                .get(),
            1
        );
        assert_eq!(queue.teams_assembled_total.get(), 1);
        assert_eq!(queue.role_candidates.with_label_values(&["dps"]).get(), 4);
        assert_eq!(
            queue.role_candidates.with_label_values(&["healer"]).get(),
            2
        );
    }

    #[test]
    fn test_penalty_metrics() {
        let collector = MetricsCollector::new().unwrap();
        collector.record_penalty(LeavePhase::InProgress, 24);
        collector.record_penalty(LeavePhase::InProgress, 24);
        collector.record_penalty(LeavePhase::BeforeStart, 50);

        let penalty = collector.penalty();
        assert_eq!(
            penalty
                .penalties_total
                .with_label_values(&["in_progress"])
                .get(),
            2
        );
        assert_eq!(
            penalty
                .penalty_points_total
                .with_label_values(&["in_progress"])
                .get(),
            48
        );
        assert_eq!(
            penalty
                .penalty_points_total
                .with_label_values(&["before_start"])
                .get(),
            50
        );
    }

    #[test]
    fn test_temp_team_gauge() {
        let collector = MetricsCollector::new().unwrap();
        collector.record_temp_teams_created(2);
        collector.record_temp_teams_removed(1);

        assert_eq!(collector.arena().temp_teams_active.get(), 1);
        assert_eq!(collector.arena().temp_teams_created_total.get(), 2);
    }

    #[test]
    fn test_gather_text() {
        let collector = MetricsCollector::new().unwrap();
        collector.record_arena_aborted();

        let text = collector.gather_text().unwrap();
        assert!(text.contains("solo_arena_arenas_aborted_total 1"));
    }
}
