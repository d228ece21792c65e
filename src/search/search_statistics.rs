//! Per-search counters returned alongside the chosen move.
//!
//! Nothing here is global: each search builds its own value and parallel
//! workers hand theirs back to the driver to be merged.

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    pub positions_evaluated: u64,
    pub alpha_beta_cutoffs: u64,
    pub moves_considered: u64,
    pub max_depth_reached: u8,
    pub worker_count: usize,
    /// Wall clock time of the whole search.
    pub elapsed: Duration,
    /// Time spent searching, summed over every worker.
    pub busy: Duration,
}

impl SearchStatistics {
    /// Folds a worker's counters into this one. Elapsed time is wall clock,
    /// so the longer of the two is kept; busy time adds up.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.positions_evaluated += other.positions_evaluated;
        self.alpha_beta_cutoffs += other.alpha_beta_cutoffs;
        self.moves_considered += other.moves_considered;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
        self.elapsed = self.elapsed.max(other.elapsed);
        self.busy += other.busy;
    }

    /// Fraction of generated moves that were never searched.
    pub fn pruning_ratio(&self) -> f64 {
        let total = self.moves_considered + self.alpha_beta_cutoffs;
        if total == 0 {
            return 0.0;
        }
        self.alpha_beta_cutoffs as f64 / total as f64
    }

    pub fn positions_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.positions_evaluated as f64 / secs
    }

    /// How many times faster than one thread doing all the work, taking the
    /// summed busy time as the sequential estimate.
    pub fn parallel_speedup(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.busy.as_secs_f64() / secs
    }

    /// Speedup per worker; 1.0 means no thread sat idle.
    pub fn parallel_efficiency(&self) -> f64 {
        if self.worker_count == 0 {
            return 0.0;
        }
        self.parallel_speedup() / self.worker_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_counters_and_keeps_extremes() {
        let mut total = SearchStatistics {
            positions_evaluated: 10,
            alpha_beta_cutoffs: 2,
            moves_considered: 12,
            max_depth_reached: 3,
            worker_count: 0,
            elapsed: Duration::from_millis(40),
            busy: Duration::from_millis(40),
        };
        total.merge(&SearchStatistics {
            positions_evaluated: 5,
            alpha_beta_cutoffs: 1,
            moves_considered: 6,
            max_depth_reached: 4,
            worker_count: 0,
            elapsed: Duration::from_millis(25),
            busy: Duration::from_millis(25),
        });

        assert_eq!(total.positions_evaluated, 15);
        assert_eq!(total.alpha_beta_cutoffs, 3);
        assert_eq!(total.moves_considered, 18);
        assert_eq!(total.max_depth_reached, 4);
        assert_eq!(total.elapsed, Duration::from_millis(40));
        assert_eq!(total.busy, Duration::from_millis(65));
    }

    #[test]
    fn ratios_handle_empty_searches() {
        let stats = SearchStatistics::default();
        assert_eq!(stats.pruning_ratio(), 0.0);
        assert_eq!(stats.positions_per_second(), 0.0);
        assert_eq!(stats.parallel_speedup(), 0.0);
        assert_eq!(stats.parallel_efficiency(), 0.0);
    }

    #[test]
    fn pruning_ratio_and_throughput() {
        let stats = SearchStatistics {
            positions_evaluated: 500,
            alpha_beta_cutoffs: 1,
            moves_considered: 3,
            elapsed: Duration::from_millis(500),
            ..SearchStatistics::default()
        };
        assert_eq!(stats.pruning_ratio(), 0.25);
        assert_eq!(stats.positions_per_second(), 1000.0);
    }

    #[test]
    fn speedup_and_efficiency_from_busy_time() {
        let stats = SearchStatistics {
            worker_count: 4,
            elapsed: Duration::from_secs(2),
            busy: Duration::from_secs(6),
            ..SearchStatistics::default()
        };
        assert_eq!(stats.parallel_speedup(), 3.0);
        assert_eq!(stats.parallel_efficiency(), 0.75);
    }
}
