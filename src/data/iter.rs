/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Read-only traversal of any node.

use crate::node::{Dims, MatrixData};

use std::iter::FusedIterator;
use std::ops::Range;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Order {
    /// `(0, 0), (0, 1), ..., (1, 0), ...`
    RowMajor,
    /// `(0, 0), (1, 0), ..., (0, 1), ...`
    ColumnMajor,
}

impl Order {
    /// Position of the `index`-th cell visited in this order.
    #[inline]
    pub fn position(self, (rows, cols): Dims, index: usize) -> (usize, usize) {
        match self {
            Order::RowMajor => (index / cols, index % cols),
            Order::ColumnMajor => (index % rows, index / rows),
        }
    }
}

/// Iterator over the values of a node in a given [`Order`].
///
/// Double-ended, so it can also be walked from the end back to the beginning.
#[derive(Debug, Clone)]
pub struct Cells<'a, M> {
    data: &'a M,
    dims: Dims,
    order: Order,
    range: Range<usize>,
}

impl<'a, M: MatrixData> Cells<'a, M> {
    pub fn new(data: &'a M, order: Order) -> Self {
        let dims = data.dims();
        Cells { data, dims, order, range: 0..dims.0 * dims.1 }
    }

    pub fn order(&self) -> Order { self.order }

    /// Also yield the position of each value.
    pub fn indexed(self) -> impl DoubleEndedIterator<Item = ((usize, usize), M::Elem)> + ExactSizeIterator + 'a {
        let Cells { data, dims, order, range } = self;
        range.map(move |index| {
            let (r, c) = order.position(dims, index);
            ((r, c), data.at(r, c))
        })
    }

    #[inline]
    fn read(&self, index: usize) -> M::Elem {
        let (r, c) = self.order.position(self.dims, index);
        self.data.at(r, c)
    }
}

impl<'a, M: MatrixData> Iterator for Cells<'a, M> {
    type Item = M::Elem;

    #[inline]
    fn next(&mut self) -> Option<M::Elem> {
        self.range.next().map(|index| self.read(index))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) { self.range.size_hint() }
}

impl<'a, M: MatrixData> ExactSizeIterator for Cells<'a, M> {
    #[inline]
    fn len(&self) -> usize { self.range.len() }
}

impl<'a, M: MatrixData> DoubleEndedIterator for Cells<'a, M> {
    #[inline]
    fn next_back(&mut self) -> Option<M::Elem> {
        self.range.next_back().map(|index| self.read(index))
    }
}

impl<'a, M: MatrixData> FusedIterator for Cells<'a, M> { }

#[cfg(test)]
mod tests {
    use crate::{Dense, MatrixData};

    fn sample() -> Dense<i32> {
        // 1 2 3
        // 4 5 6
        Dense::from_row_major((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn orders() {
        let m = sample();
        assert_eq!(m.row_major().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m.column_major().collect::<Vec<_>>(), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn reverse() {
        let m = sample();
        assert_eq!(m.row_major().rev().collect::<Vec<_>>(), vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(m.column_major().rev().collect::<Vec<_>>(), vec![6, 3, 5, 2, 4, 1]);
    }

    #[test]
    fn meet_in_the_middle() {
        let m = sample();
        let mut it = m.row_major();
        assert_eq!(it.len(), 6);
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(6));
        assert_eq!(it.next_back(), Some(5));
        assert_eq!(it.len(), 3);
        assert_eq!(it.by_ref().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn positions() {
        let m = sample();
        let visited = m.column_major().indexed().map(|(pos, _)| pos).collect::<Vec<_>>();
        assert_eq!(visited, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn empty() {
        let m = Dense::<i32>::zeros((0, 4));
        assert_eq!(m.row_major().count(), 0);
        assert_eq!(m.column_major().next_back(), None);
    }
}
