/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::cell::CellMut;

use lazymat_data::{Cast, Diagonal, DiagonalMatrix, MultiSum, Product, Submatrix, Sum, Transposed};
use lazymat_data::{Cells, Dense, Dims, MatrixData, MatrixDataMut, Optimized, Result, Scalar};
use lazymat_data::{global_policy, Node, OptimizePolicy};

use num_traits::AsPrimitive;
use std::ops::{Add, Mul};

/// A matrix, backed by some node of the lazy expression graph.
///
/// Operations are cheap: they build a new node around (an alias of) this one.
/// Views returned by `submatrix`, `transpose` and `diagonal` write through to
/// the storage of the matrix they came from.
///
/// `clone()` is deep: the clone keeps the same expression structure, but
/// shares no storage with the original.  Use [`Matrix::copy`] to flatten
/// an expression into plain storage instead.
#[derive(Debug)]
pub struct Matrix<M> {
    data: M,
}

impl<T: Scalar> Matrix<Dense<T>> {
    /// A matrix full of zeros.
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix { data: Dense::zeros((rows, cols)) }
    }

    pub fn from_fn<F>(dims: Dims, f: F) -> Self
    where F: FnMut(usize, usize) -> T,
    { Matrix { data: Dense::from_fn(dims, f) } }

    pub fn from_row_major(dims: Dims, data: Vec<T>) -> Result<Self>
    { Ok(Matrix { data: Dense::from_row_major(dims, data)? }) }
}

impl<M: MatrixData> Matrix<M> {
    pub fn from_data(data: M) -> Self { Matrix { data } }

    pub fn data(&self) -> &M { &self.data }
    pub fn into_data(self) -> M { self.data }

    pub fn dims(&self) -> Dims { self.data.dims() }
    pub fn rows(&self) -> usize { self.data.rows() }
    pub fn cols(&self) -> usize { self.data.cols() }
    /// Total number of cells.
    pub fn size(&self) -> usize { self.rows() * self.cols() }

    pub fn is_square(&self) -> bool { self.rows() == self.cols() }
    /// Whether this has exactly one column.
    pub fn is_vector(&self) -> bool { self.cols() == 1 }
    /// Whether this has exactly one row.
    pub fn is_covector(&self) -> bool { self.rows() == 1 }

    pub fn get(&self, row: usize, col: usize) -> Result<M::Elem> { self.data.get(row, col) }

    pub fn submatrix(&self, origin: (usize, usize), dims: Dims) -> Result<Matrix<Submatrix<M>>>
    { Ok(Matrix::from_data(Submatrix::new(self.data.clone(), origin, dims)?)) }

    pub fn transpose(&self) -> Matrix<Transposed<M>>
    { Matrix::from_data(Transposed::new(self.data.clone())) }

    /// The diagonal of a square matrix, as a column vector.
    pub fn diagonal(&self) -> Result<Matrix<Diagonal<M>>>
    { Ok(Matrix::from_data(Diagonal::new(self.data.clone())?)) }

    /// An immutable square matrix with this vector on its diagonal and zeros elsewhere.
    pub fn diagonal_matrix(&self) -> Result<Matrix<DiagonalMatrix<M>>>
    { Ok(Matrix::from_data(DiagonalMatrix::new(self.data.clone())?)) }

    pub fn cast<U: Scalar>(&self) -> Matrix<Cast<U, M>>
    where M::Elem: AsPrimitive<U>,
    { Matrix::from_data(Cast::new(self.data.clone())) }

    /// Evaluate into fresh storage, independent of everything this was built from.
    pub fn copy(&self) -> Matrix<Dense<M::Elem>> { Matrix::from_data(self.data.to_dense()) }

    pub fn try_add<B>(&self, other: &Matrix<B>) -> Result<Matrix<Sum<M, B>>>
    where B: MatrixData<Elem = M::Elem>,
    { Ok(Matrix::from_data(Sum::new(self.data.clone(), other.data.clone())?)) }

    /// Matrix product.
    ///
    /// Long enough multiplication chains (as judged by the global [`OptimizePolicy`])
    /// start materializing in the background right away.
    pub fn try_mul<B>(&self, other: &Matrix<B>) -> Result<Matrix<Optimized<Product<M, B>>>>
    where B: MatrixData<Elem = M::Elem>,
    { self.try_mul_with_policy(other, &global_policy()) }

    pub fn try_mul_with_policy<B>(
        &self,
        other: &Matrix<B>,
        policy: &OptimizePolicy,
    ) -> Result<Matrix<Optimized<Product<M, B>>>>
    where B: MatrixData<Elem = M::Elem>,
    {
        let product = Product::new(self.data.clone(), other.data.clone())?;
        Ok(Matrix::from_data(Optimized::with_policy(product, policy)))
    }

    /// Element-wise sum of any number of matrices of the same type.
    pub fn sum_of<I>(terms: I) -> Result<Matrix<MultiSum<M>>>
    where I: IntoIterator<Item = Matrix<M>>,
    {
        let terms = terms.into_iter().map(Matrix::into_data).collect();
        Ok(Matrix::from_data(MultiSum::new(terms)?))
    }

    /// Wrap in an [`Optimized`] node and start materializing it in the background.
    pub fn optimized(&self) -> Matrix<Optimized<M>> {
        let out = Optimized::new(self.data.clone());
        out.optimize();
        Matrix::from_data(out)
    }

    /// Block until all background work under this matrix is done.
    pub fn wait_optimized(&self) { self.data.wait_optimized() }

    pub fn row_major(&self) -> Cells<'_, M> { self.data.row_major() }
    pub fn column_major(&self) -> Cells<'_, M> { self.data.column_major() }
}

impl<M: MatrixDataMut> Matrix<M> {
    pub fn set(&mut self, row: usize, col: usize, value: M::Elem) -> Result<()>
    { self.data.set(row, col, value) }

    /// A proxy for a single cell, for reading and writing.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<CellMut<'_, M>>
    { CellMut::new(&self.data, row, col) }
}

impl<M: MatrixData> Matrix<MultiSum<M>> {
    /// Extend an n-ary sum with one more term, instead of nesting it.
    pub fn plus(&self, term: &Matrix<M>) -> Result<Self> {
        let mut sum = self.data.clone();
        sum.push(term.data.clone())?;
        Ok(Matrix::from_data(sum))
    }
}

impl<M: MatrixData> Clone for Matrix<M> {
    fn clone(&self) -> Self { Matrix { data: self.data.detach() } }
}

impl<M: MatrixData> PartialEq for Matrix<M> {
    fn eq(&self, other: &Self) -> bool {
        self.dims() == other.dims() && self.row_major().eq(other.row_major())
    }
}

impl<M: MatrixData> From<M> for Matrix<M> {
    fn from(data: M) -> Self { Matrix::from_data(data) }
}

// Operators panic on incompatible shapes, like indexing does out of bounds.
// The try_* methods are the fallible versions.

impl<'a, 'b, A, B> Add<&'b Matrix<B>> for &'a Matrix<A>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    type Output = Matrix<Sum<A, B>>;

    fn add(self, rhs: &'b Matrix<B>) -> Self::Output {
        self.try_add(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl<'a, 'b, A, B> Mul<&'b Matrix<B>> for &'a Matrix<A>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    type Output = Matrix<Optimized<Product<A, B>>>;

    fn mul(self, rhs: &'b Matrix<B>) -> Self::Output {
        self.try_mul(rhs).unwrap_or_else(|e| panic!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazymat_data::{CacheState, Error};

    fn tens() -> Matrix<Dense<i32>> {
        Matrix::from_fn((3, 3), |r, c| (r * 10 + c) as i32)
    }

    #[test]
    fn scenario() {
        let m = tens();
        assert_eq!(m.transpose().get(1, 0).unwrap(), 1);
        assert_eq!(m.diagonal().unwrap().get(1, 0).unwrap(), 11);
        assert_eq!(m.submatrix((1, 1), (2, 2)).unwrap().get(0, 0).unwrap(), 11);
    }

    #[test]
    fn shape_predicates() {
        let m = Matrix::<Dense<f64>>::new(4, 1);
        assert!(m.is_vector());
        assert!(!m.is_covector());
        assert!(!m.is_square());
        assert_eq!(m.size(), 4);
        assert!(m.transpose().is_covector());
    }

    #[test]
    fn clone_is_deep_but_views_alias() {
        let mut m = tens();
        let snapshot = m.clone();
        let mut view = m.submatrix((0, 0), (2, 2)).unwrap();
        view.set(1, 1, 0).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 0);
        assert_eq!(snapshot.get(1, 1).unwrap(), 11);

        m.set(0, 0, 7).unwrap();
        assert_eq!(view.get(0, 0).unwrap(), 7);
        assert_eq!(snapshot.get(0, 0).unwrap(), 0);
    }

    #[test]
    fn errors_surface() {
        let m = tens();
        let rect = Matrix::<Dense<i32>>::new(2, 3);
        match m.try_add(&rect) {
            Err(Error::ShapeMismatch { .. }) => {},
            r => panic!("unexpected: {:?}", r.map(|_| ())),
        }
        assert!(rect.try_mul(&rect).is_err());
        assert!(rect.try_mul(&rect.transpose()).is_ok());
        assert!(rect.diagonal().is_err());
        assert!(rect.diagonal_matrix().is_err());
        assert!(m.submatrix((2, 2), (2, 2)).is_err());
        assert!(m.get(0, 3).is_err());
    }

    #[test]
    #[should_panic(expected = "incompatible shapes")]
    fn operator_panics() {
        let a = Matrix::<Dense<i32>>::new(2, 3);
        let _ = &a * &a;
    }

    #[test]
    fn operators() {
        let a = Matrix::from_row_major((2, 2), vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_row_major((2, 2), vec![5, 6, 7, 8]).unwrap();
        assert_eq!((&a * &b).copy().data().to_row_major_vec(), vec![19, 22, 43, 50]);
        assert_eq!((&a + &b).copy().data().to_row_major_vec(), vec![6, 8, 10, 12]);
    }

    #[test]
    fn n_ary_sum() {
        let a = Matrix::from_fn((2, 2), |r, c| (r + c) as i32);
        let s = Matrix::sum_of(vec![a.clone(), a.clone()]).unwrap();
        let s = s.plus(&a).unwrap();
        assert_eq!(s.copy().data().to_row_major_vec(), vec![0, 3, 3, 6]);
        assert!(s.plus(&Matrix::new(1, 1)).is_err());
        assert!(Matrix::<Dense<i32>>::sum_of(vec![]).is_err());
    }

    #[test]
    fn explicit_optimization() {
        let a = Matrix::from_fn((3, 3), |r, c| (r + 2 * c) as i64);
        let p = a.try_mul_with_policy(&a, &OptimizePolicy::disabled()).unwrap();
        assert_eq!(p.data().state(), CacheState::NotStarted);

        let o = p.optimized();
        o.wait_optimized();
        assert_eq!(o.data().state(), CacheState::Ready);
        assert_eq!(o, o.clone());
        assert!(o.copy() == p.copy());
    }
}
