//! Runs the same battery of reads and writes against every kind of writable matrix.

#[macro_use] extern crate lazymat_assert_close;

use lazymat::{Dense, Fixed, Matrix, MatrixDataMut};

mod shared;

fn assert_all<M: MatrixDataMut<Elem = i32>>(expected: i32, m: &Matrix<M>) {
    for ((r, c), x) in m.row_major().indexed() {
        assert_eq!(x, expected, "at ({}, {})", r, c);
    }
}

fn fill<M: MatrixDataMut<Elem = i32>>(m: &mut Matrix<M>, value: i32) {
    for r in 0..m.rows() {
        for c in 0..m.cols() {
            m.set(r, c, value).unwrap();
        }
    }
}

// takes a clone, which must not write through to the original
fn dirty_clone<M: MatrixDataMut<Elem = i32>>(mut m: Matrix<M>) { fill(&mut m, 18) }

fn check_walk<I>(cells: I, size: usize)
where I: DoubleEndedIterator<Item = i32> + ExactSizeIterator + Clone,
{
    assert_eq!(cells.len(), size);
    assert_eq!(cells.clone().collect::<Vec<_>>(), (1..=size as i32).collect::<Vec<_>>());
    assert_eq!(cells.rev().collect::<Vec<_>>(), (1..=size as i32).rev().collect::<Vec<_>>());
}

fn exercise<M: MatrixDataMut<Elem = i32>>(m: &mut Matrix<M>) {
    assert_all(0, m);
    dirty_clone(m.clone());
    assert_all(0, m);
    fill(m, 18);
    assert_all(18, m);

    for k in 0..10 {
        for r in 0..m.rows() {
            for c in 0..m.cols() {
                m.set(r, c, k).unwrap();
                assert_eq!(m.get(r, c).unwrap(), k);
            }
        }
    }

    let mut k = 0;
    for r in 0..m.rows() {
        for c in 0..m.cols() {
            k += 1;
            m.cell_mut(r, c).unwrap().set(k);
            assert_eq!(m.get(r, c).unwrap(), k);
        }
    }
    check_walk(m.row_major(), m.size());

    let mut k = 0;
    for c in 0..m.cols() {
        for r in 0..m.rows() {
            k += 1;
            m.set(r, c, k).unwrap();
        }
    }
    check_walk(m.column_major(), m.size());

    if m.rows() >= 4 && m.cols() >= 3 {
        m.transpose().set(2, 3, 76).unwrap();
        assert_eq!(m.get(3, 2).unwrap(), 76);
    }
    assert_matrix_eq!(m, m.transpose().transpose());

    if m.is_square() && m.rows() >= 3 {
        m.diagonal().unwrap().set(2, 0, 54).unwrap();
        assert_eq!(m.get(2, 2).unwrap(), 54);

        let diag = m.diagonal().unwrap();
        assert_matrix_eq!(diag, diag.diagonal_matrix().unwrap().diagonal().unwrap());
    }

    if m.is_vector() {
        let d = m.diagonal_matrix().unwrap();
        assert_eq!(d.dims(), (m.rows(), m.rows()));
        for ((r, c), x) in d.row_major().indexed() {
            match r == c {
                true => assert_eq!(x, m.get(r, 0).unwrap()),
                false => assert_eq!(x, 0),
            }
        }
    }

    if m.rows() >= 4 && m.cols() >= 4 {
        let mut sub = m.submatrix((2, 3), (2, 1)).unwrap();
        assert_eq!(sub.get(0, 0).unwrap(), m.get(2, 3).unwrap());
        assert_eq!(sub.get(1, 0).unwrap(), m.get(3, 3).unwrap());

        sub.set(0, 0, 123).unwrap();
        assert_eq!(m.get(2, 3).unwrap(), 123);
    }
    assert_matrix_eq!(m, m.submatrix((0, 0), m.dims()).unwrap());

    fill(m, 0);
}

#[test]
fn every_kind_of_matrix() {
    shared::init_logger();

    let mut sq = Matrix::<Dense<i32>>::new(10, 10);
    let sq_fixed = Fixed::<Dense<i32>, 10, 10>::zeros();
    let mut fixed1 = Fixed::<Dense<i32>, 15, 20>::zeros();
    let mut rect = Matrix::<Dense<i32>>::new(5, 10);
    let mut vector = Matrix::<Dense<i32>>::new(10, 1);

    let mut product = (&sq * &sq.transpose()).copy();
    let mut fixed_product = sq_fixed.mul(&sq_fixed.transpose())
        .diagonal()
        .diagonal_matrix()
        .submatrix::<1, 1, 5, 5>()
        .copy();
    assert_eq!(fixed_product.rows(), 5);

    let mut transposed: Matrix<_> = fixed1.transpose().into();
    let mut fixed_sub: Matrix<_> = fixed1.submatrix::<4, 5, 6, 7>().into();
    let mut rect_sub = rect.submatrix((1, 4), (4, 5)).unwrap();

    let read = fixed1.at::<7, 0>();
    fixed1.put::<1, 0>(read);

    exercise(&mut fixed_sub);
    exercise(&mut rect_sub);
    exercise(&mut sq);
    exercise(&mut fixed1.clone().into_matrix());
    exercise(&mut transposed);
    exercise(&mut product);
    exercise(&mut Matrix::from(fixed_product.clone()));
    exercise(&mut rect);
    exercise(&mut vector);

    fixed_product.put::<4, 4>(1);
    assert_eq!(fixed_product.get(4, 4).unwrap(), 1);
}

#[test]
fn writes_through_views_land_in_the_source() {
    let m = shared::tens((3, 3));
    let mut t = m.transpose();
    t.set(0, 2, -1).unwrap();
    assert_eq!(m.get(2, 0).unwrap(), -1);

    let mut diag = m.diagonal().unwrap();
    diag.cell_mut(1, 0).unwrap().update(|x| x * 2);
    assert_eq!(m.get(1, 1).unwrap(), 22);

    // a view of a view
    let mut inner = m.submatrix((1, 1), (2, 2)).unwrap().transpose();
    inner.set(1, 0, 99).unwrap();
    assert_eq!(m.get(1, 2).unwrap(), 99);
}

#[test]
fn clones_are_deep_copies_are_flat() {
    let mut m = shared::tens((3, 3));
    let view = m.submatrix((1, 1), (2, 2)).unwrap();
    let cloned_view = view.clone();
    let copied_view = view.copy();

    m.set(1, 1, 0).unwrap();
    assert_eq!(view.get(0, 0).unwrap(), 0);
    assert_eq!(cloned_view.get(0, 0).unwrap(), 11);
    assert_eq!(copied_view.get(0, 0).unwrap(), 11);

    // a cloned view keeps its structure, and stays writable
    let mut cloned_view = cloned_view;
    cloned_view.set(1, 1, 5).unwrap();
    assert_eq!(cloned_view.get(1, 1).unwrap(), 5);
    assert_eq!(m.get(2, 2).unwrap(), 22);
}
