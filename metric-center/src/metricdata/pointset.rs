use std::io::BufRead;
use std::str::FromStr;

use ndarray::{prelude::*, Data};

use crate::error::{Error, Result};
use crate::metricdata::MetricData;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance, exact also where squaring the offsets would
    /// overflow or underflow.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let sq = dx * dx + dy * dy;
        if sq.is_normal() {
            sq.sqrt()
        } else if sq.is_nan() {
            f64::NAN
        } else {
            dx.hypot(dy)
        }
    }
}

/// An immutable, non-empty sequence of points in the plane.
#[derive(Clone, Debug)]
pub struct PointSet {
    data: Array2<f64>,
}

impl PointSet {
    pub const DIMENSIONS: usize = 2;

    pub fn new<S: Data<Elem = f64>>(data: ArrayBase<S, Ix2>) -> Result<Self> {
        if data.ncols() != Self::DIMENSIONS {
            return Err(Error::Dimensions {
                expected: Self::DIMENSIONS,
                found: data.ncols(),
            });
        }
        if data.nrows() == 0 {
            return Err(Error::EmptyInput);
        }
        Ok(Self {
            data: data.to_owned(),
        })
    }

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Result<Self> {
        let points: Vec<Point> = points.into_iter().collect();
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let data = Array2::from_shape_fn((points.len(), Self::DIMENSIONS), |(i, c)| {
            if c == 0 {
                points[i].x
            } else {
                points[i].y
            }
        });
        Ok(Self { data })
    }

    /// Reads one point per line, each line holding exactly two
    /// whitespace separated numbers.
    pub fn load<R: BufRead>(source: R) -> Result<Self> {
        let mut points = Vec::new();
        for (i, line) in source.lines().enumerate() {
            let line = line?;
            let (x, y) = parse_line(&line).map_err(|reason| Error::Parse {
                line: i + 1,
                content: line.clone(),
                reason,
            })?;
            points.push(Point::new(x, y));
        }
        log::debug!("loaded {} points", points.len());
        Self::from_points(points)
    }

    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, index: usize) -> Result<Point> {
        if index >= self.size() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.size(),
            });
        }
        Ok(self.point(index))
    }

    fn point(&self, index: usize) -> Point {
        Point::new(self.data[[index, 0]], self.data[[index, 1]])
    }
}

fn parse_line(line: &str) -> std::result::Result<(f64, f64), String> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(x), Some(y), None) => Ok((parse_coordinate(x)?, parse_coordinate(y)?)),
        _ => Err(format!(
            "expected 2 values, found {}",
            line.split_whitespace().count()
        )),
    }
}

fn parse_coordinate(token: &str) -> std::result::Result<f64, String> {
    token
        .parse::<f64>()
        .map_err(|e| format!("invalid number {:?}: {}", token, e))
}

impl FromStr for PointSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::load(s.as_bytes())
    }
}

impl MetricData for PointSet {
    fn distance(&self, i: usize, j: usize) -> f64 {
        self.point(i).distance(&self.point(j))
    }

    fn num_points(&self) -> usize {
        self.data.nrows()
    }

    fn dimensions(&self) -> usize {
        self.data.ncols()
    }
}
