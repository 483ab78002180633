use std::time::Instant;

use crate::error::{Error, Result};
use crate::metricdata::PointSet;
use crate::partition::{PartitionReducer, PartitionStrategy};
use crate::reduce::{reduce, FinalResult};

/// Number of workers the machine can run in parallel, or 1 if it cannot be
/// determined.
pub fn available_workers() -> usize {
    match std::thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(e) => {
            log::warn!("cannot detect available parallelism, using 1 worker: {}", e);
            1
        }
    }
}

pub fn compute_metric_center(points: &PointSet, workers: usize) -> Result<FinalResult> {
    MetricCenter::new().with_workers(workers)?.fit(points)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MetricCenter {
    workers: Option<usize>,
    strategy: PartitionStrategy,
    no_pruning: bool,
}

impl MetricCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workers(self, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidWorkers);
        }
        Ok(Self {
            workers: Some(workers),
            ..self
        })
    }

    pub fn with_strategy(self, strategy: PartitionStrategy) -> Self {
        Self { strategy, ..self }
    }

    /// Pruning stops evaluating a candidate once it cannot beat the worker's
    /// best. It never changes the result.
    pub fn with_pruning(self, pruning: bool) -> Self {
        Self {
            no_pruning: !pruning,
            ..self
        }
    }

    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(available_workers)
    }

    /// Workers beyond the number of points would only report empty
    /// partitions, so at most one worker per point is used.
    pub fn fit(&self, points: &PointSet) -> Result<FinalResult> {
        let reducer = PartitionReducer::with_workers(self.workers().min(points.size()))
            .with_strategy(self.strategy)
            .with_pruning(!self.no_pruning);
        log::info!(
            "computing the metric center of {} points with {} workers ({:?} partitions)",
            points.size(),
            reducer.workers(),
            self.strategy
        );
        let start = Instant::now();
        let results = reducer.run(points);
        log::debug!(
            "{} of {} workers had no candidates",
            results.iter().filter(|r| r.is_sentinel()).count(),
            results.len()
        );
        let result = reduce(&results)?;
        log::info!(
            "metric center is point {} with radius {} ({:?})",
            result.index,
            result.radius,
            start.elapsed()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use ndarray::prelude::*;

    use super::{available_workers, compute_metric_center, MetricCenter};
    use crate::error::Error;
    use crate::metricdata::PointSet;
    use crate::partition::PartitionStrategy;
    use crate::test::{brute_force_center, make_blobs};

    #[test]
    fn test_single_point() {
        let points = PointSet::new(array![[3.0, 4.0]]).unwrap();
        for workers in [1, 2, 8] {
            let res = compute_metric_center(&points, workers).unwrap();
            assert_eq!(res.index, 0);
            assert_eq!(res.radius, 0.0);
        }
    }

    #[test]
    fn test_square() {
        let points =
            PointSet::new(array![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]).unwrap();
        for workers in 1..=6 {
            let res = compute_metric_center(&points, workers).unwrap();
            assert_eq!(res.index, 0);
            assert!((res.radius - 2.0 * 2f64.sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_duplicates() {
        let points = PointSet::new(array![[0.0, 0.0], [0.0, 0.0], [10.0, 0.0]]).unwrap();
        for workers in 1..=4 {
            let res = compute_metric_center(&points, workers).unwrap();
            assert_eq!(res.index, 0);
            assert_eq!(res.radius, 10.0);
        }
    }

    #[test]
    fn test_middle_point_wins() {
        let points = PointSet::new(array![[0.0, 0.0], [10.0, 0.0], [4.0, 1.0], [6.0, 0.0]])
            .unwrap();
        let res = compute_metric_center(&points, 3).unwrap();
        assert_eq!(res.index, 3);
        assert_eq!(res.radius, 6.0);
    }

    /// the result does not depend on how the work is split
    #[test]
    fn test_invariant_to_configuration() {
        let points = PointSet::new(make_blobs(60, 5, 2.0, 20.0)).unwrap();
        let expected = brute_force_center(&points);
        let n = points.size();
        for workers in [1, 2, 3, 7, n, n + 5] {
            for strategy in [PartitionStrategy::Contiguous, PartitionStrategy::Strided] {
                for pruning in [true, false] {
                    let res = MetricCenter::new()
                        .with_workers(workers)
                        .unwrap()
                        .with_strategy(strategy)
                        .with_pruning(pruning)
                        .fit(&points)
                        .unwrap();
                    assert_eq!(res, expected);
                }
            }
        }
    }

    #[test]
    fn test_repeatable() {
        let points = PointSet::new(make_blobs(100, 3, 1.0, 5.0)).unwrap();
        let first = compute_metric_center(&points, 4).unwrap();
        for _ in 0..5 {
            let again = compute_metric_center(&points, 4).unwrap();
            assert_eq!(again.index, first.index);
            assert_eq!(again.radius.to_bits(), first.radius.to_bits());
        }
    }

    #[test]
    fn test_far_apart_points() {
        let points = PointSet::new(array![[0.0, 0.0], [1e160, 0.0], [3e160, 0.0]]).unwrap();
        for workers in 1..=3 {
            let res = compute_metric_center(&points, workers).unwrap();
            assert_eq!(res.index, 1);
            assert_eq!(res.radius, 3e160 - 1e160);
        }
        let points = PointSet::new(array![[0.0, 0.0], [1e-200, 0.0], [3e-200, 0.0]]).unwrap();
        let res = compute_metric_center(&points, 2).unwrap();
        assert_eq!(res.index, 1);
        assert!(res.radius > 0.0);
    }

    #[test]
    fn test_huge_worker_count() {
        let points = PointSet::new(array![[0.0, 0.0], [1.0, 0.0], [5.0, 0.0]]).unwrap();
        let res = compute_metric_center(&points, usize::MAX).unwrap();
        assert_eq!(res, brute_force_center(&points));
        let center = MetricCenter::new().with_workers(1_000_000_000).unwrap();
        assert_eq!(center.workers(), 1_000_000_000);
        assert_eq!(center.fit(&points).unwrap(), res);
    }

    #[test]
    fn test_zero_workers() {
        let points = PointSet::new(array![[0.0, 0.0]]).unwrap();
        assert!(matches!(
            compute_metric_center(&points, 0),
            Err(Error::InvalidWorkers)
        ));
    }

    #[test]
    fn test_default_workers() {
        assert!(available_workers() >= 1);
        assert_eq!(MetricCenter::new().workers(), available_workers());
        let points = PointSet::new(make_blobs(10, 2, 1.0, 5.0)).unwrap();
        let res = MetricCenter::new().fit(&points).unwrap();
        assert_eq!(res, brute_force_center(&points));
    }
}
