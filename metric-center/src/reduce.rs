use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::evaluate::{radius_cmp, CandidateResult};
use crate::partition::WorkerResult;

/// The metric center of a point set: the index of the winning point and its radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinalResult {
    pub index: usize,
    pub radius: f64,
}

impl From<CandidateResult> for FinalResult {
    fn from(value: CandidateResult) -> Self {
        Self {
            index: value.index,
            radius: value.radius,
        }
    }
}

/// Combines the per-worker results, given in worker order, into the global
/// minimum. On equal radii the smaller point index wins, so the outcome does
/// not depend on how candidates were spread over the workers.
pub fn reduce(results: &[WorkerResult]) -> Result<FinalResult> {
    let mut best: Option<CandidateResult> = None;
    for res in results {
        let Some(candidate) = res.best else {
            continue;
        };
        let better = match best {
            None => true,
            Some(b) => match radius_cmp(candidate.radius, b.radius) {
                Ordering::Less => true,
                Ordering::Equal => candidate.index < b.index,
                Ordering::Greater => false,
            },
        };
        if better {
            best.replace(candidate);
        }
    }
    best.map(FinalResult::from).ok_or(Error::NoCandidates)
}

#[cfg(test)]
mod test {
    use super::{reduce, FinalResult};
    use crate::error::Error;
    use crate::evaluate::CandidateResult;
    use crate::partition::WorkerResult;

    fn found(worker: usize, index: usize, radius: f64) -> WorkerResult {
        WorkerResult {
            worker,
            best: Some(CandidateResult { radius, index }),
            candidates: 1,
        }
    }

    #[test]
    fn test_minimum() {
        let results = [found(0, 1, 5.0), found(1, 7, 3.0), found(2, 9, 4.0)];
        assert_eq!(
            reduce(&results).unwrap(),
            FinalResult {
                index: 7,
                radius: 3.0
            }
        );
    }

    #[test]
    fn test_tie_prefers_smaller_index() {
        let results = [found(0, 4, 2.0), found(1, 1, 2.0), found(2, 3, 2.0)];
        assert_eq!(reduce(&results).unwrap().index, 1);
        let results = [found(0, 0, 2.0), found(1, 5, 2.0)];
        assert_eq!(reduce(&results).unwrap().index, 0);
    }

    #[test]
    fn test_skips_sentinels() {
        let results = [
            WorkerResult::sentinel(0),
            found(1, 2, 8.0),
            WorkerResult::sentinel(2),
        ];
        assert_eq!(reduce(&results).unwrap().index, 2);
    }

    #[test]
    fn test_nan_loses() {
        let results = [found(0, 0, f64::NAN), found(1, 1, f64::INFINITY)];
        assert_eq!(reduce(&results).unwrap().index, 1);
        let results = [found(0, 0, f64::NAN)];
        assert!(reduce(&results).unwrap().radius.is_nan());
    }

    #[test]
    fn test_no_candidates() {
        assert!(matches!(reduce(&[]), Err(Error::NoCandidates)));
        let results = [WorkerResult::sentinel(0), WorkerResult::sentinel(1)];
        assert!(matches!(reduce(&results), Err(Error::NoCandidates)));
    }
}
