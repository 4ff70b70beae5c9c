/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Nodes computed from two or more sources.

use crate::error::{self, Error, Op, Result};
use crate::node::{Dims, MatrixData, Node};

use num_traits::Zero;

//--------------------------------------------------

/// Element-wise sum of two nodes of the same shape.
#[derive(Debug, Clone)]
pub struct Sum<A, B> {
    left: A,
    right: B,
}

impl<A, B> Sum<A, B>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    pub fn new(left: A, right: B) -> Result<Self> {
        if left.dims() != right.dims() {
            return Err(error::shape_mismatch(Op::Sum, vec![left.dims(), right.dims()]));
        }
        Ok(Sum { left, right })
    }

    pub fn left(&self) -> &A { &self.left }
    pub fn right(&self) -> &B { &self.right }
}

impl<A, B> Node for Sum<A, B>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    fn dims(&self) -> Dims { self.left.dims() }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.left as &dyn Node, &self.right] }
}

impl<A, B> MatrixData for Sum<A, B>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn at(&self, row: usize, col: usize) -> A::Elem {
        self.left.at(row, col) + self.right.at(row, col)
    }

    fn detach(&self) -> Self {
        Sum { left: self.left.detach(), right: self.right.detach() }
    }
}

//--------------------------------------------------

/// Element-wise sum of any number of nodes of the same type and shape.
#[derive(Debug, Clone)]
pub struct MultiSum<M> {
    // invariant: nonempty, all of the same dims
    terms: Vec<M>,
}

impl<M: MatrixData> MultiSum<M> {
    pub fn new(terms: Vec<M>) -> Result<Self> {
        let dims = match terms.first() {
            Some(first) => first.dims(),
            None => return Err(Error::NoOperands { op: Op::Sum }),
        };
        if terms.iter().any(|m| m.dims() != dims) {
            let shapes = terms.iter().map(|m| m.dims()).collect();
            return Err(error::shape_mismatch(Op::Sum, shapes));
        }
        Ok(MultiSum { terms })
    }

    /// Add one more term to the sum.
    pub fn push(&mut self, term: M) -> Result<()> {
        if term.dims() != self.dims() {
            return Err(error::shape_mismatch(Op::Sum, vec![self.dims(), term.dims()]));
        }
        self.terms.push(term);
        Ok(())
    }

    pub fn terms(&self) -> &[M] { &self.terms }
}

impl<M: MatrixData> Node for MultiSum<M> {
    fn dims(&self) -> Dims { self.terms[0].dims() }
    fn children(&self) -> Vec<&dyn Node> {
        self.terms.iter().map(|m| m as &dyn Node).collect()
    }
}

impl<M: MatrixData> MatrixData for MultiSum<M> {
    type Elem = M::Elem;

    #[inline]
    fn at(&self, row: usize, col: usize) -> M::Elem {
        self.terms.iter().fold(Zero::zero(), |acc, m| acc + m.at(row, col))
    }

    fn detach(&self) -> Self {
        MultiSum { terms: self.terms.iter().map(|m| m.detach()).collect() }
    }
}

//--------------------------------------------------

/// Matrix product.
///
/// Every cell costs a full dot product, so reading a whole nested chain of
/// these recomputes the inner products over and over.  Wrap long chains in
/// an [`Optimized`](crate::Optimized) to avoid that.
#[derive(Debug, Clone)]
pub struct Product<A, B> {
    left: A,
    right: B,
    // number of factors in the multiplication chain that produced this
    chain_len: usize,
}

impl<A, B> Product<A, B>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    pub fn new(left: A, right: B) -> Result<Self> {
        if left.cols() != right.rows() {
            return Err(error::shape_mismatch(Op::Product, vec![left.dims(), right.dims()]));
        }
        let chain_len = left.chain_len() + right.chain_len();
        Ok(Product { left, right, chain_len })
    }

    pub fn left(&self) -> &A { &self.left }
    pub fn right(&self) -> &B { &self.right }
}

impl<A, B> Node for Product<A, B>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    fn dims(&self) -> Dims { (self.left.rows(), self.right.cols()) }
    fn children(&self) -> Vec<&dyn Node> { vec![&self.left as &dyn Node, &self.right] }
    fn chain_len(&self) -> usize { self.chain_len }
}

impl<A, B> MatrixData for Product<A, B>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    type Elem = A::Elem;

    fn at(&self, row: usize, col: usize) -> A::Elem {
        (0..self.left.cols()).fold(Zero::zero(), |acc, k| {
            acc + self.left.at(row, k) * self.right.at(k, col)
        })
    }

    fn detach(&self) -> Self {
        Product {
            left: self.left.detach(),
            right: self.right.detach(),
            chain_len: self.chain_len,
        }
    }
}

//--------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dense, Transposed};

    use rand::Rng;

    fn random(dims: Dims) -> Dense<i64> {
        let mut rng = rand::thread_rng();
        Dense::from_fn(dims, |_, _| rng.gen_range(-10, 10))
    }

    #[test]
    fn sum() {
        let a = Dense::from_fn((2, 3), |r, c| (r * 10 + c) as i32);
        let b = Dense::from_fn((2, 3), |r, c| (r + c * 100) as i32);
        let s = Sum::new(a, b).unwrap();
        assert_eq!(s.to_dense().to_row_major_vec(), vec![0, 101, 202, 11, 112, 213]);
    }

    #[test]
    fn sum_shape_mismatch() {
        let a = Dense::<i32>::zeros((2, 3));
        let b = Dense::<i32>::zeros((3, 2));
        assert!(Sum::new(a.clone(), b.clone()).is_err());
        // same number of cells is not good enough
        assert!(Sum::new(a.clone(), Transposed::new(b.clone())).is_ok());
        assert!(MultiSum::new(vec![a.clone(), a.clone(), b]).is_err());
    }

    #[test]
    fn multi_sum() {
        let a = Dense::from_fn((2, 2), |r, c| (r + c) as i32);
        let mut s = MultiSum::new(vec![a.clone(), a.clone()]).unwrap();
        s.push(a.clone()).unwrap();
        assert_eq!(s.to_dense().to_row_major_vec(), vec![0, 3, 3, 6]);
        assert!(s.push(Dense::zeros((1, 2))).is_err());
        assert_eq!(s.terms().len(), 3);

        match MultiSum::<Dense<i32>>::new(vec![]) {
            Err(Error::NoOperands { .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }
    }

    #[test]
    fn product() {
        // [1 2]   [5 6]   [19 22]
        // [3 4] x [7 8] = [43 50]
        let a = Dense::from_row_major((2, 2), vec![1, 2, 3, 4]).unwrap();
        let b = Dense::from_row_major((2, 2), vec![5, 6, 7, 8]).unwrap();
        let p = Product::new(a, b).unwrap();
        assert_eq!(p.to_dense().to_row_major_vec(), vec![19, 22, 43, 50]);
        assert_eq!(p.chain_len(), 2);

        assert!(Product::new(Dense::<i32>::zeros((2, 3)), Dense::zeros((2, 3))).is_err());
    }

    #[test]
    fn product_is_associative() {
        let (a, b, c) = (random((3, 4)), random((4, 5)), random((5, 2)));
        let ab_c = Product::new(Product::new(a.clone(), b.clone()).unwrap(), c.clone()).unwrap();
        let a_bc = Product::new(a, Product::new(b, c).unwrap()).unwrap();
        assert_eq!(ab_c.dims(), (3, 2));
        assert_eq!(ab_c.to_dense().to_row_major_vec(), a_bc.to_dense().to_row_major_vec());
        assert_eq!(ab_c.chain_len(), 3);
        assert_eq!(a_bc.chain_len(), 3);
    }

    #[test]
    fn empty_inner_dimension() {
        let p = Product::new(Dense::<i32>::zeros((2, 0)), Dense::zeros((0, 3))).unwrap();
        assert_eq!(p.to_dense().to_row_major_vec(), vec![0; 6]);
    }
}
