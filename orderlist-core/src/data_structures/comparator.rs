//! Key comparators.
//!
//! An `OrderedList` is ordered by a comparator chosen once at construction.
//! The comparator must be a strict total order and must answer the same way
//! for the same pair every time it is asked; the list never re-sorts.
//!
//! ```text
//! OrderedList<u32, NaturalOrder>                 - Ord::cmp
//! OrderedList<u32, Reversed<NaturalOrder>>       - descending
//! OrderedList<u32, ThreeWay<fn(&u32,&u32)->i32>> - negative / zero / positive
//! OrderedList<S, impl Fn(&S, &S) -> Ordering>    - any closure
//! ```

use std::cmp::Ordering;

/// Three-way ordering over keys of type `T`.
///
/// Implemented for every `Fn(&T, &T) -> Ordering`, so closures work directly.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Adapts a C-style comparator returning negative, zero or positive.
///
/// ```
/// use orderlist_core::data_structures::{Comparator, ThreeWay};
/// use std::cmp::Ordering;
///
/// let by_value = ThreeWay(|a: &u32, b: &u32| if a < b { -1 } else { (a != b) as i32 });
/// assert_eq!(by_value.compare(&1, &2), Ordering::Less);
/// assert_eq!(by_value.compare(&2, &2), Ordering::Equal);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThreeWay<F>(pub F);

impl<T, F> Comparator<T> for ThreeWay<F>
where
    F: Fn(&T, &T) -> i32,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b).cmp(&0)
    }
}
