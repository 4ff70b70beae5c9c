#![allow(dead_code)]

use lazymat::{Dense, Dims, Matrix};
use rand::Rng;

pub fn init_logger() {
    let _ = env_logger::try_init();
}

/// `get(r, c) == r * 10 + c`
pub fn tens(dims: Dims) -> Matrix<Dense<i32>> {
    Matrix::from_fn(dims, |r, c| (r * 10 + c) as i32)
}

pub fn random_i64(dims: Dims) -> Matrix<Dense<i64>> {
    let mut rng = rand::thread_rng();
    Matrix::from_fn(dims, |_, _| rng.gen_range(-20, 20))
}

pub fn random_f64(dims: Dims) -> Matrix<Dense<f64>> {
    let mut rng = rand::thread_rng();
    Matrix::from_fn(dims, |_, _| rng.gen_range(-1.0, 1.0))
}
