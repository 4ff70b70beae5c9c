/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Views that remap the coordinates of a single source node.
//!
//! None of these own any storage.  The ones that expose writes forward them to
//! the source, so they are aliases of it rather than copies.

use crate::dense::Dense;
use crate::error::{self, Op, Result};
use crate::node::{Dims, MatrixData, MatrixDataMut, Node, Scalar};

use num_traits::{AsPrimitive, Zero};
use std::marker::PhantomData;

//--------------------------------------------------

/// A rectangular window into another node.
#[derive(Debug, Clone)]
pub struct Submatrix<M> {
    source: M,
    origin: (usize, usize),
    dims: Dims,
}

impl<M: MatrixData> Submatrix<M> {
    pub fn new(source: M, origin: (usize, usize), dims: Dims) -> Result<Self> {
        error::check_region(source.dims(), origin, dims)?;
        Ok(Submatrix { source, origin, dims })
    }

    pub fn origin(&self) -> (usize, usize) { self.origin }
    pub fn source(&self) -> &M { &self.source }
}

impl<M: MatrixData> Node for Submatrix<M> {
    fn dims(&self) -> Dims { self.dims }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.source as &dyn Node] }
}

impl<M: MatrixData> MatrixData for Submatrix<M> {
    type Elem = M::Elem;

    #[inline]
    fn at(&self, row: usize, col: usize) -> M::Elem {
        self.source.at(row + self.origin.0, col + self.origin.1)
    }

    fn detach(&self) -> Self {
        Submatrix { source: self.source.detach(), ..*self }
    }

    fn materialize(&self, origin: (usize, usize), dims: Dims) -> Result<Dense<M::Elem>> {
        error::check_region(self.dims, origin, dims)?;
        self.source.materialize((origin.0 + self.origin.0, origin.1 + self.origin.1), dims)
    }
}

impl<M: MatrixDataMut> MatrixDataMut for Submatrix<M> {
    #[inline]
    fn put(&self, row: usize, col: usize, value: M::Elem) {
        self.source.put(row + self.origin.0, col + self.origin.1, value)
    }
}

//--------------------------------------------------

#[derive(Debug, Clone)]
pub struct Transposed<M> {
    source: M,
}

impl<M: MatrixData> Transposed<M> {
    pub fn new(source: M) -> Self { Transposed { source } }
    pub fn source(&self) -> &M { &self.source }
}

impl<M: MatrixData> Node for Transposed<M> {
    fn dims(&self) -> Dims {
        let (rows, cols) = self.source.dims();
        (cols, rows)
    }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.source as &dyn Node] }
}

impl<M: MatrixData> MatrixData for Transposed<M> {
    type Elem = M::Elem;

    #[inline]
    fn at(&self, row: usize, col: usize) -> M::Elem { self.source.at(col, row) }

    fn detach(&self) -> Self { Transposed { source: self.source.detach() } }
}

impl<M: MatrixDataMut> MatrixDataMut for Transposed<M> {
    #[inline]
    fn put(&self, row: usize, col: usize, value: M::Elem) { self.source.put(col, row, value) }
}

//--------------------------------------------------

/// The diagonal of a square node, as a column vector.
#[derive(Debug, Clone)]
pub struct Diagonal<M> {
    source: M,
}

impl<M: MatrixData> Diagonal<M> {
    pub fn new(source: M) -> Result<Self> {
        let (rows, cols) = source.dims();
        if rows != cols {
            return Err(error::shape_mismatch(Op::Diagonal, vec![(rows, cols)]));
        }
        Ok(Diagonal { source })
    }

    pub fn source(&self) -> &M { &self.source }
}

impl<M: MatrixData> Node for Diagonal<M> {
    fn dims(&self) -> Dims { (self.source.rows(), 1) }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.source as &dyn Node] }
}

impl<M: MatrixData> MatrixData for Diagonal<M> {
    type Elem = M::Elem;

    #[inline]
    fn at(&self, row: usize, _col: usize) -> M::Elem { self.source.at(row, row) }

    fn detach(&self) -> Self { Diagonal { source: self.source.detach() } }
}

impl<M: MatrixDataMut> MatrixDataMut for Diagonal<M> {
    #[inline]
    fn put(&self, row: usize, _col: usize, value: M::Elem) { self.source.put(row, row, value) }
}

//--------------------------------------------------

/// A square matrix with a column vector on its diagonal and zeros elsewhere.
///
/// Read-only; there is nowhere to write the off-diagonal cells.
#[derive(Debug, Clone)]
pub struct DiagonalMatrix<M> {
    source: M,
}

impl<M: MatrixData> DiagonalMatrix<M> {
    pub fn new(source: M) -> Result<Self> {
        if source.cols() != 1 {
            return Err(error::shape_mismatch(Op::DiagonalMatrix, vec![source.dims()]));
        }
        Ok(DiagonalMatrix { source })
    }

    pub fn source(&self) -> &M { &self.source }
}

impl<M: MatrixData> Node for DiagonalMatrix<M> {
    fn dims(&self) -> Dims { (self.source.rows(), self.source.rows()) }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.source as &dyn Node] }
}

impl<M: MatrixData> MatrixData for DiagonalMatrix<M> {
    type Elem = M::Elem;

    #[inline]
    fn at(&self, row: usize, col: usize) -> M::Elem {
        match row == col {
            true => self.source.at(row, 0),
            false => Zero::zero(),
        }
    }

    fn detach(&self) -> Self { DiagonalMatrix { source: self.source.detach() } }
}

//--------------------------------------------------

/// Element-wise `as` conversion to another scalar type.
pub struct Cast<U, M> {
    source: M,
    // fn() -> U so that Cast is Send + Sync no matter what U is
    _target: PhantomData<fn() -> U>,
}

impl<U, M: MatrixData> Cast<U, M>
where
    U: Scalar,
    M::Elem: AsPrimitive<U>,
{
    pub fn new(source: M) -> Self { Cast { source, _target: PhantomData } }
    pub fn source(&self) -> &M { &self.source }
}

// (derive would put needless bounds on U)
impl<U, M: Clone> Clone for Cast<U, M> {
    fn clone(&self) -> Self { Cast { source: self.source.clone(), _target: PhantomData } }
}

impl<U, M: std::fmt::Debug> std::fmt::Debug for Cast<U, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Cast")
            .field("target", &std::any::type_name::<U>())
            .field("source", &self.source)
            .finish()
    }
}

impl<U, M: MatrixData> Node for Cast<U, M>
where
    U: Scalar,
    M::Elem: AsPrimitive<U>,
{
    fn dims(&self) -> Dims { self.source.dims() }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.source as &dyn Node] }
}

impl<U, M: MatrixData> MatrixData for Cast<U, M>
where
    U: Scalar,
    M::Elem: AsPrimitive<U>,
{
    type Elem = U;

    #[inline]
    fn at(&self, row: usize, col: usize) -> U { self.source.at(row, col).as_() }

    fn detach(&self) -> Self { Cast::new(self.source.detach()) }
}

//--------------------------------------------------
