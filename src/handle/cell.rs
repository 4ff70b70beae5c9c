/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use lazymat_data::{MatrixDataMut, Result};

use std::fmt;

/// A single, already bounds-checked cell of a writable matrix.
///
/// Cells of a lazy matrix don't exist in memory anywhere, so this stands in
/// for the `&mut T` that an ordinary container would hand out.
pub struct CellMut<'a, M> {
    data: &'a M,
    row: usize,
    col: usize,
}

impl<'a, M: MatrixDataMut> CellMut<'a, M> {
    pub(crate) fn new(data: &'a M, row: usize, col: usize) -> Result<Self> {
        // validate once, so that get and set can't fail
        data.get(row, col)?;
        Ok(CellMut { data, row, col })
    }

    pub fn position(&self) -> (usize, usize) { (self.row, self.col) }

    pub fn get(&self) -> M::Elem { self.data.at(self.row, self.col) }

    pub fn set(&mut self, value: M::Elem) { self.data.put(self.row, self.col, value) }

    /// Read-modify-write.
    pub fn update(&mut self, f: impl FnOnce(M::Elem) -> M::Elem) {
        let value = f(self.get());
        self.set(value);
    }
}

impl<'a, M: MatrixDataMut> fmt::Debug for CellMut<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CellMut")
            .field("position", &self.position())
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::Matrix;
    use lazymat_data::Dense;

    #[test]
    fn reads_and_writes_through() {
        let mut m = Matrix::from_fn((2, 3), |r, c| (r * 3 + c) as i32);
        {
            let mut cell = m.cell_mut(1, 2).unwrap();
            assert_eq!(cell.get(), 5);
            cell.set(50);
            cell.update(|x| x + 1);
            assert_eq!(cell.position(), (1, 2));
        }
        assert_eq!(m.get(1, 2).unwrap(), 51);
    }

    #[test]
    fn through_a_view() {
        let m = Matrix::from_fn((3, 3), |r, c| (r * 10 + c) as i32);
        let mut t = m.transpose();
        t.cell_mut(2, 0).unwrap().set(-1);
        assert_eq!(m.get(0, 2).unwrap(), -1);
    }

    #[test]
    fn out_of_bounds() {
        let mut m = Matrix::<Dense<i32>>::new(2, 2);
        assert!(m.cell_mut(2, 0).is_err());
        assert!(m.cell_mut(0, 2).is_err());
    }
}
