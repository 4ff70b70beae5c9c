/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Matrices whose dimensions are part of their type.

use crate::cell::CellMut;
use crate::matrix::Matrix;

use lazymat_data::{Cast, Diagonal, DiagonalMatrix, Product, Submatrix, Sum, Transposed};
use lazymat_data::{Dense, Error, MatrixData, MatrixDataMut, Op, Optimized, Result, Scalar};

use num_traits::AsPrimitive;
use std::fmt;

// Post-monomorphization checks.  Referencing `OK` from a function body makes
// instantiating that function with bad parameters a compile error.
struct Below<const I: usize, const N: usize>;
impl<const I: usize, const N: usize> Below<I, N> {
    const OK: () = assert!(I < N, "index out of bounds");
}

struct Fits<const START: usize, const LEN: usize, const N: usize>;
impl<const START: usize, const LEN: usize, const N: usize> Fits<START, LEN, N> {
    const OK: () = assert!(START + LEN <= N, "region out of bounds");
}

struct Same<const A: usize, const B: usize>;
impl<const A: usize, const B: usize> Same<A, B> {
    const OK: () = assert!(A == B, "dimensions differ");
}

/// A [`Matrix`] known to be `R x C`.
///
/// Cell access with constant coordinates, and every shape requirement of the
/// operations below, are checked when the program is compiled.
pub struct Fixed<M, const R: usize, const C: usize> {
    // invariant: matrix.dims() == (R, C)
    matrix: Matrix<M>,
}

impl<T: Scalar, const R: usize, const C: usize> Fixed<Dense<T>, R, C> {
    pub fn zeros() -> Self {
        Fixed { matrix: Matrix::new(R, C) }
    }

    pub fn from_fn<F>(f: F) -> Self
    where F: FnMut(usize, usize) -> T,
    { Fixed { matrix: Matrix::from_fn((R, C), f) } }

    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self::from_fn(|r, c| rows[r][c])
    }
}

impl<M: MatrixData, const R: usize, const C: usize> Fixed<M, R, C> {
    /// Fails with a shape mismatch unless the matrix is `R x C`.
    pub fn new(matrix: Matrix<M>) -> Result<Self> {
        if matrix.dims() != (R, C) {
            return Err(Error::ShapeMismatch { op: Op::FixedSize, shapes: vec![(R, C), matrix.dims()] });
        }
        Ok(Fixed { matrix })
    }

    // for results whose shape is guaranteed by the type parameters
    fn wrap<N: MatrixData, const R2: usize, const C2: usize>(matrix: Matrix<N>) -> Fixed<N, R2, C2> {
        debug_assert_eq!(matrix.dims(), (R2, C2));
        Fixed { matrix }
    }

    pub fn matrix(&self) -> &Matrix<M> { &self.matrix }
    pub fn into_matrix(self) -> Matrix<M> { self.matrix }

    pub fn rows(&self) -> usize { R }
    pub fn cols(&self) -> usize { C }

    pub fn at<const I: usize, const J: usize>(&self) -> M::Elem {
        let () = Below::<I, R>::OK;
        let () = Below::<J, C>::OK;
        self.matrix.data().at(I, J)
    }

    /// Runtime-checked access, for coordinates that aren't constants.
    pub fn get(&self, row: usize, col: usize) -> Result<M::Elem> { self.matrix.get(row, col) }

    pub fn submatrix<const I: usize, const J: usize, const H: usize, const W: usize>(
        &self,
    ) -> Fixed<Submatrix<M>, H, W> {
        let () = Fits::<I, H, R>::OK;
        let () = Fits::<J, W, C>::OK;
        let sub = self.matrix.submatrix((I, J), (H, W)).expect("(BUG) region was checked at compile time");
        Self::wrap(sub)
    }

    pub fn transpose(&self) -> Fixed<Transposed<M>, C, R> { Self::wrap(self.matrix.transpose()) }

    pub fn diagonal(&self) -> Fixed<Diagonal<M>, R, 1> {
        let () = Same::<R, C>::OK;
        Self::wrap(self.matrix.diagonal().expect("(BUG) squareness was checked at compile time"))
    }

    pub fn diagonal_matrix(&self) -> Fixed<DiagonalMatrix<M>, R, R> {
        let () = Same::<C, 1>::OK;
        Self::wrap(self.matrix.diagonal_matrix().expect("(BUG) shape was checked at compile time"))
    }

    pub fn cast<U: Scalar>(&self) -> Fixed<Cast<U, M>, R, C>
    where M::Elem: AsPrimitive<U>,
    { Self::wrap(self.matrix.cast()) }

    pub fn copy(&self) -> Fixed<Dense<M::Elem>, R, C> { Self::wrap(self.matrix.copy()) }

    pub fn add<N>(&self, other: &Fixed<N, R, C>) -> Fixed<Sum<M, N>, R, C>
    where N: MatrixData<Elem = M::Elem>,
    { Self::wrap(self.matrix.try_add(&other.matrix).expect("(BUG) shapes are equal by type")) }

    pub fn mul<N, const K: usize>(&self, other: &Fixed<N, C, K>) -> Fixed<Optimized<Product<M, N>>, R, K>
    where N: MatrixData<Elem = M::Elem>,
    { Self::wrap(self.matrix.try_mul(&other.matrix).expect("(BUG) inner dimensions are equal by type")) }
}

impl<M: MatrixDataMut, const R: usize, const C: usize> Fixed<M, R, C> {
    pub fn put<const I: usize, const J: usize>(&mut self, value: M::Elem) {
        let () = Below::<I, R>::OK;
        let () = Below::<J, C>::OK;
        self.matrix.data().put(I, J, value)
    }

    pub fn cell_mut<const I: usize, const J: usize>(&mut self) -> CellMut<'_, M> {
        let () = Below::<I, R>::OK;
        let () = Below::<J, C>::OK;
        self.matrix.cell_mut(I, J).expect("(BUG) position was checked at compile time")
    }
}

impl<M: MatrixData, const R: usize, const C: usize> Clone for Fixed<M, R, C> {
    fn clone(&self) -> Self { Fixed { matrix: self.matrix.clone() } }
}

impl<M: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Fixed<M, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fixed<{}, {}>(", R, C)?;
        fmt::Debug::fmt(&self.matrix, f)?;
        write!(f, ")")
    }
}

impl<M: MatrixData, const R: usize, const C: usize> fmt::Display for Fixed<M, R, C>
where M::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.matrix, f) }
}

impl<M: MatrixData, const R: usize, const C: usize> PartialEq for Fixed<M, R, C> {
    fn eq(&self, other: &Self) -> bool { self.matrix == other.matrix }
}

impl<M: MatrixData, const R: usize, const C: usize> From<Fixed<M, R, C>> for Matrix<M> {
    fn from(fixed: Fixed<M, R, C>) -> Self { fixed.matrix }
}
