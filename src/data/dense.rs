/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::error::{self, Op, Result};
use crate::node::{Dims, MatrixData, MatrixDataMut, Node, Scalar};

use itertools::iproduct;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Owned matrix storage with C layout.
///
/// The buffer is reference-counted; clones of a `Dense` are aliases of
/// each other.  [`Dense::deep_copy`] duplicates the buffer.
#[derive(Debug, Clone)]
pub struct Dense<T> {
    // c-contiguous, row-contiguous data
    // invariant: dims.0 * dims.1 == data.len()
    data: Arc<RwLock<Vec<T>>>,
    dims: Dims,
}

impl<T: Scalar> Dense<T> {
    /// A matrix full of zeros.
    pub fn zeros(dims: Dims) -> Self {
        Self::from_row_major_unchecked(dims, vec![T::zero(); dims.0 * dims.1])
    }

    pub fn from_fn<F>(dims: Dims, mut f: F) -> Self
    where F: FnMut(usize, usize) -> T,
    {
        let data = iproduct!(0..dims.0, 0..dims.1).map(|(r, c)| f(r, c)).collect();
        Self::from_row_major_unchecked(dims, data)
    }

    pub fn from_row_major(dims: Dims, data: Vec<T>) -> Result<Self> {
        if data.len() != dims.0 * dims.1 {
            return Err(error::shape_mismatch(Op::FromData, vec![dims, (data.len(), 1)]));
        }
        Ok(Self::from_row_major_unchecked(dims, data))
    }

    fn from_row_major_unchecked(dims: Dims, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), dims.0 * dims.1);
        Dense { data: Arc::new(RwLock::new(data)), dims }
    }

    /// Duplicate the buffer.
    pub fn deep_copy(&self) -> Self {
        Self::from_row_major_unchecked(self.dims, self.read().clone())
    }

    /// A copy of the row-major buffer.
    pub fn to_row_major_vec(&self) -> Vec<T> { self.read().clone() }

    /// Whether two leaves share a buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.data, &other.data) }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.dims.0 && col < self.dims.1);
        row * self.dims.1 + col
    }

    // (the column may equal the width when a region of width zero sits at the right edge)
    #[inline]
    fn index_unchecked(&self, row: usize, col: usize) -> usize { row * self.dims.1 + col }

    // A panic while the lock is held can only come from a bad index, which
    // never leaves the buffer half-written; so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Scalar> Node for Dense<T> {
    fn dims(&self) -> Dims { self.dims }
    fn children(&self) -> Vec<&dyn Node> { vec![] }
}

impl<T: Scalar> MatrixData for Dense<T> {
    type Elem = T;

    #[inline]
    fn at(&self, row: usize, col: usize) -> T {
        self.read()[self.index(row, col)]
    }

    fn detach(&self) -> Self { self.deep_copy() }

    fn materialize(&self, origin: (usize, usize), dims: Dims) -> Result<Dense<T>> {
        error::check_region(self.dims, origin, dims)?;

        let buf = self.read();
        let mut data = Vec::with_capacity(dims.0 * dims.1);
        for r in origin.0..origin.0 + dims.0 {
            let start = self.index_unchecked(r, origin.1);
            data.extend_from_slice(&buf[start..start + dims.1]);
        }
        Ok(Self::from_row_major_unchecked(dims, data))
    }

    fn to_dense(&self) -> Dense<T> { self.deep_copy() }
}

impl<T: Scalar> MatrixDataMut for Dense<T> {
    #[inline]
    fn put(&self, row: usize, col: usize, value: T) {
        let index = self.index(row, col);
        self.write()[index] = value;
    }
}
