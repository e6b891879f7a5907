//! Override-merging of configuration values
//!
//! `overlay.merge_over(base)` produces a value where everything the overlay
//! specifies wins and everything it leaves unset falls back to `base`. Each
//! implementation documents whether a field is replaced wholesale or merged
//! recursively.

/// Combine a caller-supplied value with a set of defaults.
pub trait Merge: Sized {
    /// Merge `self` over `base`; `self` wins on conflicts.
    #[must_use]
    fn merge_over(self, base: Self) -> Self;
}

/// Scalars: the overlay replaces the base when set.
impl<T> Merge for Option<T> {
    fn merge_over(self, base: Self) -> Self {
        self.or(base)
    }
}
