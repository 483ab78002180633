use std::cmp::Ordering;

use crate::metricdata::MetricData;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateResult {
    pub radius: f64,
    pub index: usize,
}

impl CandidateResult {
    pub fn improves_on(&self, other: &CandidateResult) -> bool {
        radius_cmp(self.radius, other.radius) == Ordering::Less
    }
}

/// Total order on radii where NaN sorts after every number, +inf included.
pub(crate) fn radius_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

/// Largest distance between `candidate` and the other points, or `None` as
/// soon as it reaches `bound`. A NaN distance makes the whole result NaN.
fn max_distance<D: MetricData>(data: &D, candidate: usize, bound: Option<f64>) -> Option<f64> {
    let n = data.num_points();
    assert!(
        candidate < n,
        "candidate {} out of range for {} points",
        candidate,
        n
    );
    let mut max = 0.0;
    for j in 0..n {
        if j == candidate {
            continue;
        }
        let d = data.distance(candidate, j);
        if d.is_nan() {
            return Some(f64::NAN);
        }
        if d > max {
            max = d;
            if let Some(bound) = bound {
                if max >= bound {
                    return None;
                }
            }
        }
    }
    Some(max)
}

/// Computes the radius of `candidate`. A lone point has radius 0.
pub fn evaluate<D: MetricData>(data: &D, candidate: usize) -> CandidateResult {
    CandidateResult {
        radius: max_distance(data, candidate, None).unwrap_or(f64::NAN),
        index: candidate,
    }
}

/// Like [`evaluate`], but only returns the candidate if it strictly improves on
/// `best`, giving up as soon as its running maximum reaches the radius of `best`.
pub fn evaluate_bounded<D: MetricData>(
    data: &D,
    candidate: usize,
    best: &CandidateResult,
) -> Option<CandidateResult> {
    let res = CandidateResult {
        radius: max_distance(data, candidate, Some(best.radius))?,
        index: candidate,
    };
    if res.improves_on(best) {
        Some(res)
    } else {
        None
    }
}
