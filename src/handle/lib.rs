/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The user-facing side of lazymat: a [`Matrix`] handle with operators and
//! printing, a fixed-size variant, and a proxy for single cells.

mod cell;
mod display;
mod fixed;
mod matrix;

pub use crate::cell::CellMut;
pub use crate::fixed::Fixed;
pub use crate::matrix::Matrix;

pub use lazymat_data::{CacheState, Dense, Dims, Error, OptimizePolicy, Result};
