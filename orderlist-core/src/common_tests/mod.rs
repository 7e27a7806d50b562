//! Reusable test bodies.
//!
//! Each function drives one property against an `OrderedList` built with any
//! comparator. Integration tests in `tests/` parametrize them with `rstest`.
