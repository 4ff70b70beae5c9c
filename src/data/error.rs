/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::node::Dims;

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// The operation whose shape requirements were violated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Op {
    Sum,
    Product,
    Diagonal,
    DiagonalMatrix,
    /// Building a node from a buffer of the wrong length.
    FromData,
    /// Wrapping a node in a fixed-dimension type that does not match it.
    FixedSize,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Op::Sum => "sum",
            Op::Product => "product",
            Op::Diagonal => "diagonal (requires a square matrix)",
            Op::DiagonalMatrix => "diagonal matrix (requires a single column)",
            Op::FromData => "construction from data",
            Op::FixedSize => "fixed-size matrix",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A cell, or a rectangular region starting at `index`, does not fit.
    #[error("{} is out of bounds for a {}x{} matrix", ShowPlace(.index, .region), .dims.0, .dims.1)]
    OutOfBounds { index: (usize, usize), region: Option<Dims>, dims: Dims },

    #[error("{op}: incompatible shapes {}", ShowShapes(.shapes))]
    ShapeMismatch { op: Op, shapes: Vec<Dims> },

    #[error("{op} of zero matrices")]
    NoOperands { op: Op },
}

struct ShowPlace<'a>(&'a (usize, usize), &'a Option<Dims>);

impl<'a> fmt::Display for ShowPlace<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (row, col) = *self.0;
        match *self.1 {
            None => write!(f, "index ({}, {})", row, col),
            Some((rows, cols)) => write!(f, "region of size {}x{} at ({}, {})", rows, cols, row, col),
        }
    }
}

struct ShowShapes<'a>(&'a [Dims]);

impl<'a> fmt::Display for ShowShapes<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, &(rows, cols)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}x{}", rows, cols)?;
        }
        Ok(())
    }
}

pub(crate) fn check_index(dims: Dims, index: (usize, usize)) -> Result<()> {
    if index.0 < dims.0 && index.1 < dims.1 {
        Ok(())
    } else {
        Err(Error::OutOfBounds { index, region: None, dims })
    }
}

pub(crate) fn check_region(dims: Dims, origin: (usize, usize), region: Dims) -> Result<()> {
    // written to avoid overflow on absurd offsets
    let fits = |offset: usize, len: usize, total: usize| offset <= total && len <= total - offset;
    if fits(origin.0, region.0, dims.0) && fits(origin.1, region.1, dims.1) {
        Ok(())
    } else {
        Err(Error::OutOfBounds { index: origin, region: Some(region), dims })
    }
}

pub(crate) fn shape_mismatch(op: Op, shapes: Vec<Dims>) -> Error {
    Error::ShapeMismatch { op, shapes }
}
