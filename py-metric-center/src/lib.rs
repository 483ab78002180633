use metric_center::{MetricCenter, PartitionStrategy, PointSet};
use numpy::*;
use pyo3::prelude::*;

/// Returns `(index, radius)` of the metric center of an `(n, 2)` array of points.
#[pyfunction]
#[pyo3(name = "metric_center")]
#[pyo3(signature = (points, workers=None, strategy="contiguous", pruning=true))]
fn compute<'py>(
    py: Python<'py>,
    points: PyReadonlyArray2<'py, f64>,
    workers: Option<usize>,
    strategy: &str,
    pruning: bool,
) -> PyResult<(usize, f64)> {
    let points = PointSet::new(points.as_array())?;
    let strategy: PartitionStrategy = strategy.parse()?;
    let mut center = MetricCenter::new()
        .with_strategy(strategy)
        .with_pruning(pruning);
    if let Some(workers) = workers {
        center = center.with_workers(workers)?;
    }
    let result = py.allow_threads(|| center.fit(&points))?;
    Ok((result.index, result.radius))
}

#[pymodule]
#[pyo3(name = "metric_center")]
fn py_metric_center(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();
    m.add_function(wrap_pyfunction!(compute, m)?)?;
    Ok(())
}
