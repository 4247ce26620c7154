//! Integration tests for the owning composite kinds
//!
//! Covers arbitrary-precision integers and rationals, symbolic expressions,
//! nested matrices, and the construction-rollback guarantee on allocation
//! failure.

use matr::alloc::{system, AllocRef, Allocator, SystemAllocator};
use matr::error::Error;
use matr::kind::NumericKind;
use matr::matrix::{Matrix, StorageOrder};
use matr::ops;
use matr::value::{Expr, Value};
use num_bigint::BigInt;
use num_rational::BigRational;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn big(v: i64) -> Value {
    Value::BigInt(BigInt::from(v))
}

fn rat(n: i64, d: i64) -> Value {
    Value::Rational(BigRational::new(BigInt::from(n), BigInt::from(d)))
}

fn bigint_matrix(alloc: &AllocRef, data: &[i64], rows: usize, cols: usize) -> Matrix {
    let values = data.iter().map(|&v| big(v)).collect();
    Matrix::from_values(alloc, values, rows, cols, NumericKind::BigInt, StorageOrder::RowMajor)
        .unwrap()
}

#[test]
fn test_new_zeros_every_owning_kind() {
    let alloc = system();
    for kind in NumericKind::OWNING {
        let m = Matrix::new(&alloc, 2, 3, kind, StorageOrder::ColMajor).unwrap();
        let zero = Value::zero(kind, &alloc).unwrap();
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(m.get_value(r, c).unwrap(), zero);
            }
        }
    }
}

#[test]
fn test_bigint_arithmetic_is_exact() {
    let alloc = system();
    // Larger than any u64, so exactness means real bignum arithmetic.
    let huge = BigInt::from(u64::MAX) * BigInt::from(u64::MAX);
    let mut a = Matrix::new(&alloc, 1, 2, NumericKind::BigInt, StorageOrder::RowMajor).unwrap();
    a.set_value(Value::BigInt(huge.clone()), 0, 0).unwrap();
    a.set_value(big(1), 0, 1).unwrap();

    let sum = ops::add(&alloc, &a, &a).unwrap();
    assert_eq!(
        sum.get_value(0, 0).unwrap(),
        Value::BigInt(huge * BigInt::from(2))
    );
    assert_eq!(sum.get_value(0, 1).unwrap(), big(2));
}

#[test]
fn test_bigint_matmul() {
    let alloc = system();
    let a = bigint_matrix(&alloc, &[2, 3, 4, 5], 2, 2);
    let c = ops::matmul(&alloc, &a, &a).unwrap();
    assert_eq!(c.get_value(0, 0).unwrap(), big(16));
    assert_eq!(c.get_value(0, 1).unwrap(), big(21));
    assert_eq!(c.get_value(1, 0).unwrap(), big(28));
    assert_eq!(c.get_value(1, 1).unwrap(), big(37));
}

#[test]
fn test_bigint_scalar_broadcast() {
    let alloc = system();
    let a = bigint_matrix(&alloc, &[10, 20, 30, 40], 2, 2);
    let s = bigint_matrix(&alloc, &[3], 1, 1);

    let prod = ops::mul(&alloc, &a, &s).unwrap();
    assert_eq!(prod.get_value(1, 1).unwrap(), big(120));

    // Side-keeping subtraction under broadcast.
    let left = ops::sub(&alloc, &s, &a).unwrap();
    assert_eq!(left.get_value(0, 0).unwrap(), big(-7));
    let right = ops::sub(&alloc, &a, &s).unwrap();
    assert_eq!(right.get_value(0, 0).unwrap(), big(7));
}

#[test]
fn test_rational_division_stays_exact() {
    let alloc = system();
    let a = Matrix::from_values(
        &alloc,
        vec![rat(1, 1), rat(2, 1)],
        1,
        2,
        NumericKind::Rational,
        StorageOrder::RowMajor,
    )
    .unwrap();
    let b = Matrix::from_values(
        &alloc,
        vec![rat(3, 1), rat(3, 1)],
        1,
        2,
        NumericKind::Rational,
        StorageOrder::RowMajor,
    )
    .unwrap();

    let q = ops::div(&alloc, &a, &b).unwrap();
    assert_eq!(q.get_value(0, 0).unwrap(), rat(1, 3));
    assert_eq!(q.get_value(0, 1).unwrap(), rat(2, 3));
}

#[test]
fn test_symbolic_matrix_arithmetic() {
    let alloc = system();
    let a = Matrix::from_values(
        &alloc,
        vec![Value::Expr(Expr::symbol("x")), Value::Expr(Expr::integer(2))],
        1,
        2,
        NumericKind::Expr,
        StorageOrder::RowMajor,
    )
    .unwrap();
    let b = Matrix::from_values(
        &alloc,
        vec![Value::Expr(Expr::integer(1)), Value::Expr(Expr::integer(3))],
        1,
        2,
        NumericKind::Expr,
        StorageOrder::RowMajor,
    )
    .unwrap();

    let sum = ops::add(&alloc, &a, &b).unwrap();
    assert_eq!(
        sum.get_value(0, 0).unwrap(),
        Value::Expr(Expr::symbol("x") + Expr::integer(1))
    );
    // Integer-integer pairs fold.
    assert_eq!(sum.get_value(0, 1).unwrap(), Value::Expr(Expr::integer(5)));
}

#[test]
fn test_nested_matrix_elements() {
    let alloc = system();
    let inner = |v: f64| {
        Matrix::from_slice(&alloc, &[v, v], 1, 2, StorageOrder::RowMajor).unwrap()
    };

    let a = Matrix::from_values(
        &alloc,
        vec![Value::Nested(inner(1.0)), Value::Nested(inner(2.0))],
        2,
        1,
        NumericKind::Nested,
        StorageOrder::RowMajor,
    )
    .unwrap();
    let b = Matrix::from_values(
        &alloc,
        vec![Value::Nested(inner(10.0)), Value::Nested(inner(20.0))],
        2,
        1,
        NumericKind::Nested,
        StorageOrder::RowMajor,
    )
    .unwrap();

    let sum = ops::add(&alloc, &a, &b).unwrap();
    assert_eq!(sum.get_value(0, 0).unwrap(), Value::Nested(inner(11.0)));
    assert_eq!(sum.get_value(1, 0).unwrap(), Value::Nested(inner(22.0)));
}

#[test]
fn test_owning_clone_and_equality_are_deep() {
    let alloc = system();
    let a = bigint_matrix(&alloc, &[1, 2, 3, 4], 2, 2);
    let mut b = a.try_clone().unwrap();
    assert_eq!(a, b);

    b.set_value(big(99), 1, 1).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.get_value(1, 1).unwrap(), big(4));
}

#[test]
fn test_select_copies_composite_elements() {
    let alloc = system();
    let a = bigint_matrix(&alloc, &[1, 2, 3, 4], 2, 2);
    let p = Matrix::from_slice(&alloc, &[1i32, 0], 1, 2, StorageOrder::RowMajor).unwrap();

    let mut out = ops::select(&alloc, &a, Some(&p), None).unwrap();
    assert_eq!(out.get_value(0, 0).unwrap(), big(3));

    out.set_value(big(77), 0, 0).unwrap();
    assert_eq!(a.get_value(1, 0).unwrap(), big(3));
}

#[test]
fn test_in_place_on_owning_kind() {
    let alloc = system();
    let mut a = bigint_matrix(&alloc, &[5, 10], 1, 2);
    let s = bigint_matrix(&alloc, &[5], 1, 1);
    ops::div_assign(&mut a, &s).unwrap();
    assert_eq!(a.get_value(0, 0).unwrap(), big(1));
    assert_eq!(a.get_value(0, 1).unwrap(), big(2));
}

// Allocator that fails its nth zeroed allocation and counts everything,
// for exercising the construction rollback path.
struct FailingAllocator {
    inner: SystemAllocator,
    fail_at: usize,
    zero_allocs: AtomicUsize,
    deallocs: AtomicUsize,
}

impl FailingAllocator {
    fn new(fail_at: usize) -> Self {
        Self {
            inner: SystemAllocator,
            fail_at,
            zero_allocs: AtomicUsize::new(0),
            deallocs: AtomicUsize::new(0),
        }
    }
}

impl Allocator for FailingAllocator {
    fn allocate(&self, size: usize, align: usize) -> Option<NonNull<u8>> {
        self.inner.allocate(size, align)
    }

    fn zero_allocate(&self, count: usize, stride: usize, align: usize) -> Option<NonNull<u8>> {
        let n = self.zero_allocs.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_at {
            return None;
        }
        self.inner.zero_allocate(count, stride, align)
    }

    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        old_size: usize,
        align: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        self.inner.resize(ptr, old_size, align, new_size)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, size: usize, align: usize) {
        self.deallocs.fetch_add(1, Ordering::SeqCst);
        self.inner.deallocate(ptr, size, align);
    }
}

#[test]
fn test_construction_rollback_on_allocation_failure() {
    // A 2x2 nested matrix needs 5 zeroed allocations: the outer buffer and
    // one inner matrix per slot. Failing the 4th leaves two constructed
    // slots and two untouched ones.
    let fa = Arc::new(FailingAllocator::new(4));
    let alloc: AllocRef = fa.clone();

    let err = Matrix::new(&alloc, 2, 2, NumericKind::Nested, StorageOrder::RowMajor).unwrap_err();
    assert!(matches!(err, Error::AllocationFailed { .. }));

    // Everything that was successfully allocated came back: the two inner
    // matrices and the outer buffer.
    assert_eq!(fa.zero_allocs.load(Ordering::SeqCst), 4);
    assert_eq!(fa.deallocs.load(Ordering::SeqCst), 3);
}

#[test]
fn test_drop_releases_every_allocation() {
    let fa = Arc::new(FailingAllocator::new(usize::MAX));
    let alloc: AllocRef = fa.clone();

    let m = Matrix::new(&alloc, 2, 2, NumericKind::Nested, StorageOrder::RowMajor).unwrap();
    assert_eq!(fa.zero_allocs.load(Ordering::SeqCst), 5);
    drop(m);
    assert_eq!(fa.deallocs.load(Ordering::SeqCst), 5);
}
