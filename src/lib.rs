/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Lazily evaluated matrices.
//!
//! ```
//! use lazymat::{Dense, Matrix};
//!
//! let a = Matrix::from_fn((2, 3), |r, c| (r * 10 + c) as i64);
//! let b = a.transpose();
//! let product = &a * &b;
//! assert_eq!(product.dims(), (2, 2));
//! assert_eq!(product.get(1, 1).unwrap(), 100 + 121 + 144);
//!
//! let snapshot: Matrix<Dense<i64>> = product.copy();
//! assert!(snapshot == product.copy());
//! ```

pub use lazymat_data as data;
pub use lazymat_data::{global_policy, set_global_policy};
pub use lazymat_data::{CacheState, Dense, Dims, Error, MatrixData, MatrixDataMut, Node, OptimizePolicy, Result, Scalar};
pub use lazymat_handle::{CellMut, Fixed, Matrix};
