/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::config::Settings;
use crate::errors::{Error, Result};

use lazymat_data::{Dense, Dims, MatrixData, Scalar};
use lazymat_handle::Matrix;

use log::{debug, info};
use num_traits::AsPrimitive;
use std::fmt;
use std::time::Instant;

/// `m[r][c] = r * row_mult + c * col_mult`
pub fn linear_ramp<T>(dims: Dims, row_mult: T, col_mult: T) -> Matrix<Dense<T>>
where
    T: Scalar,
    usize: AsPrimitive<T>,
{
    Matrix::from_fn(dims, |r, c| AsPrimitive::<T>::as_(r) * row_mult + AsPrimitive::<T>::as_(c) * col_mult)
}

/// Everything computed by [`run_chain_demo`].
#[derive(Debug, Clone)]
pub struct ChainReport {
    pub abc: Matrix<Dense<i64>>,
    /// `(A * B) * (C * D)`
    pub abcd: Matrix<Dense<i64>>,
    /// `((A * B) * C) * D`
    pub abcd_from_scratch: Matrix<Dense<i64>>,
    /// `A + cast(A')`, where `A'` holds the same values as `A` in floating point.
    pub sum: Matrix<Dense<i64>>,
}

/// Multiply a chain of four matrices two different ways, and check that they agree.
pub fn run_chain_demo(settings: &Settings) -> Result<ChainReport> {
    let policy = settings.optimize.policy();
    debug!("chain demo with {:?}", policy);
    let start = Instant::now();

    let a = linear_ramp::<i64>((4, 9), 12, 5);
    let a_double = linear_ramp::<f64>((4, 9), 12.0, 5.0);
    let b = linear_ramp::<i64>((9, 7), 7, 13);
    let c = linear_ramp::<i64>((7, 8), 3, 8);
    let d = linear_ramp::<i64>((8, 2), 2, 4);

    if settings.demo.print {
        show("A", &a, 2);
        show("B", &b, 2);
        show("C", &c, 2);
        show("D", &d, 2);
    }

    let ab = a.try_mul_with_policy(&b, &policy)?;
    let cd = c.try_mul_with_policy(&d, &policy)?;
    let abc = ab.try_mul_with_policy(&c, &policy)?;
    let abcd = ab.try_mul_with_policy(&cd, &policy)?;
    let abcd_from_scratch = a
        .try_mul_with_policy(&b, &policy)?
        .try_mul_with_policy(&c, &policy)?
        .try_mul_with_policy(&d, &policy)?;

    let sum = a.try_add(&a_double.cast::<i64>())?;

    if settings.demo.print {
        show("AxBxC", &abc, 2);
        show("AxB", &ab, 2);
        show("AxBxCxD", &abcd, 4);
        show("AxBxCxD computed from scratch", &abcd_from_scratch, 4);
        show("A + A", &sum, 4);
    }

    abcd.wait_optimized();
    abcd_from_scratch.wait_optimized();
    check_agreement("four-factor products", &abcd, &abcd_from_scratch)?;
    info!("all products agree ({:.3}s)", start.elapsed().as_secs_f64());

    Ok(ChainReport {
        abc: abc.copy(),
        abcd: abcd.copy(),
        abcd_from_scratch: abcd_from_scratch.copy(),
        sum: sum.copy(),
    })
}

fn show<M: MatrixData>(name: &str, m: &Matrix<M>, width: usize)
where M::Elem: fmt::Display,
{
    println!("Matrix {}", name);
    println!("{:width$}", m, width = width);
    println!("-------------------------");
    println!();
}

fn check_agreement<A, B>(what: &'static str, a: &Matrix<A>, b: &Matrix<B>) -> Result<()>
where
    A: MatrixData,
    B: MatrixData<Elem = A::Elem>,
{
    if a.dims() != b.dims() {
        return Err(Error::ShapesDiffer { what, left: a.dims(), right: b.dims() });
    }
    let mismatch = a.row_major().indexed().zip(b.row_major()).find(|((_, x), y)| x != y);
    match mismatch {
        None => Ok(()),
        Some(((index, left), right)) => Err(Error::Disagreement {
            what,
            index,
            left: format!("{:?}", left),
            right: format!("{:?}", right),
        }),
    }
}
