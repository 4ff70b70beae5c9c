#[macro_use] extern crate lazymat_assert_close;

use lazymat::{CacheState, Dense, Matrix, Node, OptimizePolicy};

use std::sync::Arc;
use std::thread;

mod shared;
use shared::{init_logger, random_i64};

fn chain() -> [Matrix<Dense<i64>>; 4] {
    [random_i64((6, 9)), random_i64((9, 7)), random_i64((7, 8)), random_i64((8, 3))]
}

#[test]
fn long_chains_opt_in() {
    init_logger();
    let [a, b, c, d] = chain();

    let abc = &(&a * &b) * &c;
    assert_eq!(abc.data().chain_len(), 3);
    assert_eq!(abc.data().state(), CacheState::NotStarted);

    let abcd = &abc * &d;
    assert_eq!(abcd.data().chain_len(), 4);
    assert_ne!(abcd.data().state(), CacheState::NotStarted);

    abcd.wait_optimized();
    assert_eq!(abcd.data().state(), CacheState::Ready);
    // the background task resolves the nested chain first
    assert_eq!(abc.data().state(), CacheState::Ready);
}

#[test]
fn cache_is_transparent() {
    init_logger();
    let [a, b, c, d] = chain();
    let policy = OptimizePolicy::disabled();

    let lazy = a.try_mul_with_policy(&b, &policy).unwrap()
        .try_mul_with_policy(&c, &policy).unwrap()
        .try_mul_with_policy(&d, &policy).unwrap();
    let before = lazy.copy();

    let optimized = lazy.optimized();
    let during = optimized.copy();
    optimized.wait_optimized();
    let after = optimized.copy();

    assert_matrix_eq!(before, during);
    assert_matrix_eq!(before, after);
    assert_matrix_eq!(optimized, lazy);
}

#[test]
fn associations_agree() {
    init_logger();
    let [a, b, c, d] = chain();
    let ab = &a * &b;
    let cd = &c * &d;
    let paired = &ab * &cd;
    let left_to_right = &(&(&a * &b) * &c) * &d;

    assert_eq!(paired.data().chain_len(), 4);
    paired.wait_optimized();
    left_to_right.wait_optimized();
    assert_matrix_eq!(paired, left_to_right);
    assert_eq!(ab.data().state(), CacheState::Ready);
    assert_eq!(cd.data().state(), CacheState::Ready);
}

#[test]
fn concurrent_readers() {
    init_logger();
    let [a, b, c, d] = chain();
    let expected = Arc::new((&(&(&a * &b) * &c) * &d).copy());

    let policy = OptimizePolicy::disabled();
    let product = a.try_mul_with_policy(&b, &policy).unwrap()
        .try_mul_with_policy(&c, &policy).unwrap()
        .try_mul_with_policy(&d, &policy).unwrap();
    let product = Arc::new(product.optimized());

    let readers = (0..4).map(|_| {
        let product = product.clone();
        let expected = expected.clone();
        thread::spawn(move || {
            for _ in 0..3 {
                assert_matrix_eq!(*product, *expected);
            }
        })
    }).collect::<Vec<_>>();

    for reader in readers {
        reader.join().unwrap();
    }
    product.wait_optimized();
    assert_eq!(product.data().state(), CacheState::Ready);
}

#[test]
fn dropping_mid_flight_is_clean() {
    init_logger();
    for _ in 0..5 {
        let [a, b, c, d] = chain();
        let product = &(&(&a * &b) * &c) * &d;
        assert!(!product.data().optimize());
        drop(product);
    }
}

#[test]
fn clones_get_their_own_cache() {
    init_logger();
    let [a, b, c, d] = chain();
    let policy = OptimizePolicy::disabled();
    let product = a.try_mul_with_policy(&b, &policy).unwrap()
        .try_mul_with_policy(&c, &policy).unwrap()
        .try_mul_with_policy(&d, &policy).unwrap();

    let optimized = product.optimized();
    optimized.wait_optimized();
    let cloned = optimized.clone();
    assert_eq!(cloned.data().state(), CacheState::NotStarted);
    assert_matrix_eq!(cloned, optimized);
}
