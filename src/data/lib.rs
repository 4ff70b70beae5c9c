/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Lazily evaluated matrix nodes.
//!
//! Every operation (transpose, submatrix, sum, product, ...) builds a new node
//! that owns its sources by value and computes cells on demand.  Nothing is
//! evaluated eagerly except by [`MatrixData::to_dense`], [`MatrixData::materialize`],
//! and the background tasks of [`Optimized`] nodes.

mod compose;
mod dense;
mod error;
mod iter;
mod node;
mod optimize;
mod view;

pub use crate::compose::{MultiSum, Product, Sum};
pub use crate::dense::Dense;
pub use crate::error::{Error, Op, Result};
pub use crate::iter::{Cells, Order};
pub use crate::node::{Dims, MatrixData, MatrixDataMut, Node, Scalar};
pub use crate::optimize::{global_policy, set_global_policy};
pub use crate::optimize::{CacheState, OptimizePolicy, Optimized};
pub use crate::view::{Cast, Diagonal, DiagonalMatrix, Submatrix, Transposed};
