/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::dense::Dense;
use crate::error::{self, Result};
use crate::iter::{Cells, Order};

use num_traits::Zero;
use std::fmt;
use std::ops::{Add, Mul};

/// `(rows, columns)`
pub type Dims = (usize, usize);

/// Element types that can live in a matrix.
///
/// Anything with an additive identity and the two ring operations will do.
pub trait Scalar
    : Copy + Zero + Add<Output = Self> + Mul<Output = Self>
    + PartialEq + fmt::Debug + Send + Sync + 'static
{ }

impl<T> Scalar for T
where T: Copy + Zero + Add<Output = T> + Mul<Output = T>
       + PartialEq + fmt::Debug + Send + Sync + 'static,
{ }

/// The part of the node contract that does not care about the element type.
///
/// This is what gets walked when propagating optimization requests, since the
/// source of a cast has a different element type from the cast itself.
pub trait Node: Send + Sync {
    fn dims(&self) -> Dims;

    /// The nodes this node reads from. Empty for leaves.
    fn children(&self) -> Vec<&dyn Node>;

    /// Number of matrices multiplied together to produce this node.
    fn chain_len(&self) -> usize { 1 }

    /// Ask for background materialization of whatever in this subtree supports it.
    ///
    /// Returns `true` if this call launched a task.  Never blocks.
    fn optimize(&self) -> bool {
        let mut launched = false;
        for child in self.children() {
            launched |= child.optimize();
        }
        launched
    }

    /// Block until every background task in this subtree has finished.
    fn wait_optimized(&self) {
        for child in self.children() {
            child.wait_optimized();
        }
    }
}

/// A rectangular grid of scalars, possibly computed on demand from other nodes.
///
/// Cloning a node is cheap and shares any leaf storage, so a clone is an alias
/// of the original.  Use [`MatrixData::detach`] or [`MatrixData::to_dense`]
/// to get something independent.
pub trait MatrixData: Node + Clone + 'static {
    type Elem: Scalar;

    /// Read a cell.
    ///
    /// The caller must have validated the coordinates against `dims()`;
    /// implementations may panic otherwise.
    fn at(&self, row: usize, col: usize) -> Self::Elem;

    /// Deep clone that keeps the structure of the expression,
    /// but shares no storage with `self`.
    fn detach(&self) -> Self;

    fn rows(&self) -> usize { self.dims().0 }
    fn cols(&self) -> usize { self.dims().1 }

    /// Read a cell, with bounds checking.
    fn get(&self, row: usize, col: usize) -> Result<Self::Elem> {
        error::check_index(self.dims(), (row, col))?;
        Ok(self.at(row, col))
    }

    /// Eagerly evaluate a rectangular region into fresh storage.
    fn materialize(&self, origin: (usize, usize), dims: Dims) -> Result<Dense<Self::Elem>> {
        error::check_region(self.dims(), origin, dims)?;
        Ok(Dense::from_fn(dims, |r, c| self.at(origin.0 + r, origin.1 + c)))
    }

    /// Flatten into an independent dense leaf with the same visible contents.
    fn to_dense(&self) -> Dense<Self::Elem> {
        Dense::from_fn(self.dims(), |r, c| self.at(r, c))
    }

    /// Left to right, then top to bottom.
    fn row_major(&self) -> Cells<'_, Self> { Cells::new(self, Order::RowMajor) }

    /// Top to bottom, then left to right.
    fn column_major(&self) -> Cells<'_, Self> { Cells::new(self, Order::ColumnMajor) }
}

/// Nodes that can be written through.
///
/// Writes go all the way down to the dense leaf at the bottom, and are therefore
/// visible through every other node that shares that leaf.
pub trait MatrixDataMut: MatrixData {
    /// Write a cell. Same contract on the coordinates as [`MatrixData::at`].
    fn put(&self, row: usize, col: usize, value: Self::Elem);

    fn set(&self, row: usize, col: usize, value: Self::Elem) -> Result<()> {
        error::check_index(self.dims(), (row, col))?;
        self.put(row, col, value);
        Ok(())
    }
}
