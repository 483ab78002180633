pub mod pointset;

pub trait MetricData {
    fn distance(&self, i: usize, j: usize) -> f64;
    fn num_points(&self) -> usize;
    fn dimensions(&self) -> usize;
}

pub use self::pointset::{Point, PointSet};
