/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Cell-by-cell comparison of matrices, for tests.
//!
//! The macros take matrix handles (anything with a `data()` method that
//! returns a node), by value or by reference.

use lazymat_data::{Dims, MatrixData};

use std::fmt;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

/// ```text
/// assert_matrix_close!(a, b);
/// assert_matrix_close!(rel=1e-6, abs=1e-12, a, b);
/// assert_matrix_close!(abs=1e-12, a, b, "after {} steps", n);
/// ```
#[macro_export]
macro_rules! assert_matrix_close {
    ($($t:tt)*) => {
        $crate::assert_matrix_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_NONZERO_TOL] [@abs 0.0]]}
    };
}

/// Exact comparison.  Shapes must match too.
#[macro_export]
macro_rules! assert_matrix_eq {
    ($($t:tt)*) => {
        $crate::assert_matrix_close_impl!{@parsing [$($t)*] [[@rel 0.0] [@abs 0.0]]}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! assert_matrix_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_matrix_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        $crate::assert_matrix_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        $crate::assert_matrix_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "matrices differ!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        $crate::assert_matrix_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$($assignment:tt)*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+] ) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let a = &$a;
            let b = &$b;

            let mut abs;
            let mut rel;
            $(
                $crate::assert_matrix_close_impl!{@stmt::assign [abs, rel] $assignment}
            )*

            if let Err(e) = $crate::check_close(a.data(), b.data(), $crate::Tolerances { abs, rel }) {
                panic!(
                    "{} (tolerances: rel={}, abs={})\n{}\n left: {}\nright: {}",
                    format!($($fmt)*), rel, abs, e,
                    $crate::ShowCells(a.data()), $crate::ShowCells(b.data()),
                );
            }
        }
    };
    (@stmt::assign [$abs:ident, $rel:ident] [@abs $tol:expr]) => { $abs = $tol; };
    (@stmt::assign [$abs:ident, $rel:ident] [@rel $tol:expr]) => { $rel = $tol; };
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

/// Python's `math.isclose`.
pub fn is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // catch infinities of same sign
    if a == b { return true; }

    // catch infinities of opposite sign, avoiding infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    // case for general values and NaN.
    (a - b).abs() < abs.max(rel * a.abs()).max(rel * b.abs())
}

/// Scalars that can be compared by [`check_close`].
///
/// Floats use the tolerances; integers ignore them and compare exactly.
pub trait CheckClose: Copy + fmt::Debug {
    fn is_close(self, other: Self, tol: Tolerances) -> bool;
}

impl CheckClose for f64 {
    #[inline]
    fn is_close(self, other: Self, tol: Tolerances) -> bool { is_close(self, other, tol) }
}

impl CheckClose for f32 {
    #[inline]
    fn is_close(self, other: Self, tol: Tolerances) -> bool { is_close(self.into(), other.into(), tol) }
}

macro_rules! exact_impls {
    ($($T:ty)*) => {$(
        impl CheckClose for $T {
            #[inline]
            fn is_close(self, other: Self, _: Tolerances) -> bool { self == other }
        }
    )*};
}

exact_impls! { i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize }

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CheckCloseError<T: fmt::Debug> {
    #[error("shapes differ: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    Shape { left: Dims, right: Dims },

    #[error("first difference at ({}, {}):\n  left: {:?}\n right: {:?}", .index.0, .index.1, .left, .right)]
    Cell { index: (usize, usize), left: T, right: T },
}

/// Compare two nodes cell by cell, in row-major order.
pub fn check_close<A, B>(a: &A, b: &B, tol: Tolerances) -> Result<(), CheckCloseError<A::Elem>>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
    A::Elem: CheckClose,
{
    if a.dims() != b.dims() {
        return Err(CheckCloseError::Shape { left: a.dims(), right: b.dims() });
    }
    for ((index, left), right) in a.row_major().indexed().zip(b.row_major()) {
        if !left.is_close(right, tol) {
            return Err(CheckCloseError::Cell { index, left, right });
        }
    }
    Ok(())
}

/// Row-major dump of a node for failure messages.
#[doc(hidden)]
pub struct ShowCells<'a, M>(pub &'a M);

impl<'a, M: MatrixData> fmt::Display for ShowCells<'a, M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (rows, cols) = self.0.dims();
        write!(f, "{}x{} ", rows, cols)?;
        f.debug_list().entries(self.0.row_major()).finish()
    }
}
