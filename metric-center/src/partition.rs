use std::str::FromStr;
use std::time::Instant;

use crate::error::Error;
use crate::evaluate::{evaluate, evaluate_bounded, CandidateResult};
use crate::metricdata::MetricData;

/// How the candidate indices are split among workers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// Equal contiguous ranges, the last one also takes the remainder.
    #[default]
    Contiguous,
    /// Worker `w` takes `w, w + W, w + 2W, ...`
    Strided,
}

impl PartitionStrategy {
    /// Splits `0..n` into exactly `workers` disjoint partitions, ordered by worker.
    pub fn partition(&self, n: usize, workers: usize) -> Vec<Partition> {
        assert!(workers >= 1);
        match self {
            Self::Contiguous => {
                let size = n / workers;
                (0..workers)
                    .map(|worker| {
                        let start = worker * size;
                        let end = if worker == workers - 1 { n } else { start + size };
                        Partition {
                            worker,
                            start,
                            end,
                            step: 1,
                        }
                    })
                    .collect()
            }
            Self::Strided => (0..workers)
                .map(|worker| Partition {
                    worker,
                    start: worker.min(n),
                    end: n,
                    step: workers,
                })
                .collect(),
        }
    }
}

impl FromStr for PartitionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contiguous" => Ok(Self::Contiguous),
            "strided" => Ok(Self::Strided),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

/// The candidates assigned to one worker, visited in increasing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    pub worker: usize,
    start: usize,
    end: usize,
    step: usize,
}

impl Partition {
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (self.start..self.end).step_by(self.step)
    }

    pub fn len(&self) -> usize {
        if self.start >= self.end {
            0
        } else {
            (self.end - self.start + self.step - 1) / self.step
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `best` is `None` when the worker had nothing to evaluate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkerResult {
    pub worker: usize,
    pub best: Option<CandidateResult>,
    pub candidates: usize,
}

impl WorkerResult {
    pub fn sentinel(worker: usize) -> Self {
        Self {
            worker,
            best: None,
            candidates: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.best.is_none()
    }
}

/// Scans the partition, keeping the first candidate with the smallest radius.
fn scan<D: MetricData>(data: &D, partition: &Partition, pruning: bool) -> WorkerResult {
    let start = Instant::now();
    let mut result = WorkerResult::sentinel(partition.worker);
    for candidate in partition.indices() {
        result.candidates += 1;
        match result.best {
            Some(best) if pruning => {
                if let Some(res) = evaluate_bounded(data, candidate, &best) {
                    result.best.replace(res);
                }
            }
            best => {
                let res = evaluate(data, candidate);
                if best.map_or(true, |b| res.improves_on(&b)) {
                    result.best.replace(res);
                }
            }
        }
    }
    log::debug!(
        "worker {} scanned {} candidates in {:?}, best {:?}",
        partition.worker,
        result.candidates,
        start.elapsed(),
        result.best
    );
    result
}

#[derive(Clone, Copy, Debug)]
pub struct PartitionReducer {
    workers: usize,
    strategy: PartitionStrategy,
    pruning: bool,
}

impl PartitionReducer {
    pub fn with_workers(workers: usize) -> Self {
        assert!(workers >= 1);
        Self {
            workers,
            strategy: PartitionStrategy::default(),
            pruning: true,
        }
    }

    pub fn with_strategy(self, strategy: PartitionStrategy) -> Self {
        Self { strategy, ..self }
    }

    pub fn with_pruning(self, pruning: bool) -> Self {
        Self { pruning, ..self }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns one result per worker, in worker order.
    pub fn run<D: MetricData + Sync>(&self, data: &D) -> Vec<WorkerResult> {
        let partitions = self.strategy.partition(data.num_points(), self.workers);
        if self.workers == 1 {
            self.run_sequential(data, &partitions)
        } else {
            self.run_parallel(data, &partitions)
        }
    }

    fn run_sequential<D: MetricData>(
        &self,
        data: &D,
        partitions: &[Partition],
    ) -> Vec<WorkerResult> {
        partitions
            .iter()
            .map(|partition| scan(data, partition, self.pruning))
            .collect()
    }

    fn run_parallel<D: MetricData + Sync>(
        &self,
        data: &D,
        partitions: &[Partition],
    ) -> Vec<WorkerResult> {
        let pruning = self.pruning;
        let mut out = vec![None; partitions.len()];
        std::thread::scope(|scope| {
            let mut handles = Vec::new();
            for (out, partition) in out.iter_mut().zip(partitions) {
                if partition.is_empty() {
                    out.replace(WorkerResult::sentinel(partition.worker));
                    continue;
                }
                let h = scope.spawn(move || {
                    out.replace(scan(data, partition, pruning));
                });
                handles.push(h);
            }

            for h in handles {
                if let Err(e) = h.join() {
                    std::panic::resume_unwind(e);
                }
            }
        });

        out.into_iter().flatten().collect()
    }
}
