//! Integration tests for permutation selection

use matr::alloc::system;
use matr::error::Error;
use matr::matrix::{Matrix, StorageOrder};
use matr::ops;

fn sample() -> Matrix {
    Matrix::from_slice(&system(), &[1i32, 2, 3, 4], 2, 2, StorageOrder::RowMajor).unwrap()
}

#[test]
fn test_identity_selection_copies() {
    let alloc = system();
    let a = sample();
    let out = ops::select(&alloc, &a, None, None).unwrap();
    assert_eq!(out, a);

    // The output is a fresh copy, not a view.
    let mut out = out;
    out.set(99i32, 0, 0).unwrap();
    assert_eq!(a.get::<i32>(0, 0).unwrap(), 1);
}

#[test]
fn test_row_permutation() {
    let alloc = system();
    let a = sample();
    let p = Matrix::from_slice(&alloc, &[1i32, 0], 1, 2, StorageOrder::RowMajor).unwrap();
    let out = ops::select(&alloc, &a, Some(&p), None).unwrap();
    let want = Matrix::from_slice(&alloc, &[3i32, 4, 1, 2], 2, 2, StorageOrder::RowMajor).unwrap();
    assert_eq!(out, want);
}

#[test]
fn test_column_permutation() {
    let alloc = system();
    let a = sample();
    let q = Matrix::from_slice(&alloc, &[1i32, 0], 2, 1, StorageOrder::RowMajor).unwrap();
    let out = ops::select(&alloc, &a, None, Some(&q)).unwrap();
    let want = Matrix::from_slice(&alloc, &[2i32, 1, 4, 3], 2, 2, StorageOrder::RowMajor).unwrap();
    assert_eq!(out, want);
}

#[test]
fn test_row_and_column_together() {
    let alloc = system();
    let a = Matrix::from_slice(
        &alloc,
        &[1i32, 2, 3, 4, 5, 6, 7, 8, 9],
        3,
        3,
        StorageOrder::ColMajor,
    )
    .unwrap();
    let p = Matrix::from_slice(&alloc, &[2i32, 0], 1, 2, StorageOrder::RowMajor).unwrap();
    let q = Matrix::from_slice(&alloc, &[1i32], 1, 1, StorageOrder::RowMajor).unwrap();

    let out = ops::select(&alloc, &a, Some(&p), Some(&q)).unwrap();
    assert_eq!(out.shape(), (2, 1));
    assert_eq!(out.get::<i32>(0, 0).unwrap(), 8);
    assert_eq!(out.get::<i32>(1, 0).unwrap(), 2);
}

#[test]
fn test_float_permutation_vector() {
    let alloc = system();
    let a = sample();
    let p = Matrix::from_slice(&alloc, &[1.0f64, 0.0], 1, 2, StorageOrder::RowMajor).unwrap();
    let out = ops::select(&alloc, &a, Some(&p), None).unwrap();
    assert_eq!(out.get::<i32>(0, 0).unwrap(), 3);
    assert_eq!(out.get::<i32>(1, 0).unwrap(), 1);
}

#[test]
fn test_expected_vector_error() {
    let alloc = system();
    let a = sample();
    let p = Matrix::from_slice(&alloc, &[0i32, 1, 1, 0], 2, 2, StorageOrder::RowMajor).unwrap();
    assert!(matches!(
        ops::select(&alloc, &a, Some(&p), None).unwrap_err(),
        Error::ExpectedVector { rows: 2, cols: 2 }
    ));
}

#[test]
fn test_invalid_permutation_errors() {
    let alloc = system();
    let a = sample();

    // Out of range.
    let p = Matrix::from_slice(&alloc, &[0i32, 2], 1, 2, StorageOrder::RowMajor).unwrap();
    assert!(matches!(
        ops::select(&alloc, &a, Some(&p), None).unwrap_err(),
        Error::InvalidPermutation { bound: 2, .. }
    ));

    // Negative.
    let p = Matrix::from_slice(&alloc, &[-1i32, 0], 1, 2, StorageOrder::RowMajor).unwrap();
    assert!(matches!(
        ops::select(&alloc, &a, Some(&p), None).unwrap_err(),
        Error::InvalidPermutation { .. }
    ));

    // Fractional.
    let p = Matrix::from_slice(&alloc, &[0.5f32, 0.0], 1, 2, StorageOrder::RowMajor).unwrap();
    assert!(matches!(
        ops::select(&alloc, &a, Some(&p), None).unwrap_err(),
        Error::InvalidPermutation { .. }
    ));
}

#[test]
fn test_validation_happens_before_output_allocation() {
    let alloc = system();
    let a = sample();
    // A bad column vector must fail even when the row vector is valid.
    let p = Matrix::from_slice(&alloc, &[0i32], 1, 1, StorageOrder::RowMajor).unwrap();
    let q = Matrix::from_slice(&alloc, &[7i32], 1, 1, StorageOrder::RowMajor).unwrap();
    assert!(matches!(
        ops::select(&alloc, &a, Some(&p), Some(&q)).unwrap_err(),
        Error::InvalidPermutation { bound: 2, .. }
    ));
}
