/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::matrix::Matrix;

use lazymat_data::MatrixData;

use std::fmt;

/// One line per row, two spaces between cells.
///
/// Width, precision and the other formatter flags apply to each cell,
/// so `{:8.3}` lines up columns of floats.
impl<M: MatrixData> fmt::Display for Matrix<M>
where M::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data();
        for r in 0..self.rows() {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.cols() {
                if c > 0 {
                    f.write_str("  ")?;
                }
                fmt::Display::fmt(&data.at(r, c), f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Matrix;
    use lazymat_data::Dense;

    #[test]
    fn layout() {
        let m = Matrix::from_row_major((2, 3), vec![1, 2, 3, 4, 5, 60]).unwrap();
        assert_eq!(m.to_string(), "1  2  3\n4  5  60");
        assert_eq!(format!("{:>2}", m), " 1   2   3\n 4   5  60");
    }

    #[test]
    fn precision() {
        let m = Matrix::from_row_major((1, 2), vec![0.5, 1.0 / 3.0]).unwrap();
        assert_eq!(format!("{:.2}", m), "0.50  0.33");
        assert_eq!(format!("{:.1}", m.transpose()), "0.5\n0.3");
    }

    #[test]
    fn empty() {
        assert_eq!(Matrix::<Dense<i32>>::new(0, 3).to_string(), "");
        assert_eq!(Matrix::<Dense<i32>>::new(2, 0).to_string(), "\n");
    }
}
