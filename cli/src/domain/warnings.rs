//! Warning accumulation shared by every backend call.
//!
//! Warnings are non-fatal messages returned by the control plane alongside
//! both successful and failed calls. One logical operation may issue several
//! calls; their warnings are appended in call order and always travel with
//! the final result, including on the error path.

use std::fmt;

/// Append-only, ordered sequence of warning messages.
///
/// Order reflects call sequence and is kept for logging. Callers comparing
/// warnings from multi-call operations should treat them as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    /// Create an empty warning list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single warning.
    pub fn push(&mut self, warning: impl Into<String>) {
        self.0.push(warning.into());
    }

    /// Append every warning from `other`, keeping its order.
    pub fn append(&mut self, other: Warnings) {
        self.0.extend(other.0);
    }

    /// Fold a call's warnings into this list and hand back its result.
    ///
    /// This is the single point where orchestration code consumes an
    /// [`Outcome`]: warnings are kept whether the call failed or not, and the
    /// caller can use `?` on the returned result.
    ///
    /// # Examples
    /// ```
    /// use cfctl::domain::{Outcome, Warnings};
    ///
    /// let mut warnings = Warnings::new();
    /// let failed: Outcome<(), &str> = Outcome::err("boom", Warnings::from_iter(["w1"]));
    /// assert_eq!(warnings.absorb(failed), Err("boom"));
    /// assert_eq!(warnings.as_slice(), ["w1"]);
    /// ```
    pub fn absorb<T, E>(&mut self, outcome: Outcome<T, E>) -> Result<T, E> {
        let (result, warnings) = outcome.into_parts();
        self.append(warnings);
        result
    }

    /// Number of warnings collected.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no warnings were collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the warnings in call order.
    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }

    /// Warnings sorted lexicographically, for order-independent comparison.
    pub fn sorted(&self) -> Vec<String> {
        let mut sorted = self.0.clone();
        sorted.sort();
        sorted
    }

    /// Consume the list and return the underlying vector.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Warnings {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for Warnings {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for Warnings {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("\n"))
    }
}

/// Result of one backend call or one orchestrated operation, together with
/// every warning collected while producing it.
#[must_use = "an outcome carries warnings that must be surfaced"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T, E> {
    /// Value on success, error on failure.
    pub result: Result<T, E>,
    /// Warnings collected on either branch.
    pub warnings: Warnings,
}

impl<T, E> Outcome<T, E> {
    /// Pair a result with its warnings.
    pub fn new(result: Result<T, E>, warnings: Warnings) -> Self {
        Self { result, warnings }
    }

    /// Successful outcome.
    pub fn ok(value: T, warnings: Warnings) -> Self {
        Self::new(Ok(value), warnings)
    }

    /// Failed outcome.
    pub fn err(error: E, warnings: Warnings) -> Self {
        Self::new(Err(error), warnings)
    }

    /// Whether the outcome is a failure.
    pub fn is_err(&self) -> bool {
        self.result.is_err()
    }

    /// Split into result and warnings.
    pub fn into_parts(self) -> (Result<T, E>, Warnings) {
        (self.result, self.warnings)
    }

    /// Map the success value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
        Outcome::new(self.result.map(f), self.warnings)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for warning accumulation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn absorb_keeps_warnings_from_successful_calls() {
        let mut warnings = Warnings::from_iter(["first"]);
        let value = warnings.absorb(Outcome::<u8, String>::ok(7, Warnings::from_iter(["second"])));
        assert_eq!(value, Ok(7));
        assert_eq!(warnings.as_slice(), ["first", "second"]);
    }

    #[rstest]
    fn absorb_keeps_warnings_from_failed_calls() {
        let mut warnings = Warnings::new();
        let value = warnings.absorb(Outcome::<(), String>::err(
            "boom".to_owned(),
            Warnings::from_iter(["w1", "w2"]),
        ));
        assert_eq!(value, Err("boom".to_owned()));
        assert_eq!(warnings.len(), 2);
    }

    #[rstest]
    fn sorted_supports_order_independent_comparison() {
        let warnings = Warnings::from_iter(["b", "c", "a"]);
        assert_eq!(warnings.sorted(), ["a", "b", "c"]);
        assert_eq!(warnings.as_slice(), ["b", "c", "a"]);
    }

    #[rstest]
    fn map_preserves_warnings() {
        let outcome: Outcome<u8, ()> = Outcome::ok(2, Warnings::from_iter(["w"]));
        let mapped = outcome.map(|value| value * 2);
        assert_eq!(mapped, Outcome::ok(4, Warnings::from_iter(["w"])));
    }
}
