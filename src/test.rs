//! Helper class for testing.

use crate::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_per_tag() {
        let fix = Fixture::default();
        fix.record("a");
        fix.record("a");
        fix.record("b");

        fix.assert_calls("a", 2);
        fix.assert_calls("b", 1);
        fix.assert_calls("never", 0);
    }

    #[test]
    fn wrapped_chain_has_requested_depth() {
        let result: Result<u8> = Fixture::wrapped_chain(Error::not_found(), 3);

        let mut depth = 0;
        let mut error = result.error().cloned();
        let mut inner = result.inner().cloned();
        while error == Some(Error::Wrapped) {
            depth += 1;
            let next = inner.expect("wrapped layer without inner");
            error = next.error().cloned();
            inner = next.inner().cloned();
        }

        assert_eq!(depth, 3);
        assert_eq!(error, Some(Error::not_found()));
    }
}

/// Counts how many times tagged closures run, so tests can observe that a
/// branch was or was not taken.
#[allow(dead_code)]
#[derive(Default)]
pub struct Fixture {
    calls: RefCell<HashMap<&'static str, usize>>,
}

#[allow(dead_code)]
impl Fixture {
    pub fn record(&self, tag: &'static str) {
        *self.calls.borrow_mut().entry(tag).or_default() += 1;
    }

    pub fn calls(&self, tag: &'static str) -> usize {
        self.calls.borrow().get(tag).copied().unwrap_or(0)
    }

    pub fn assert_calls(&self, tag: &'static str, expected: usize) {
        assert_eq!(self.calls(tag), expected, "calls tagged {:?}", tag);
    }

    /// Builds `error` wrapped in `depth` layers of [`Result::from_failed`].
    pub fn wrapped_chain<T>(error: Error, depth: usize) -> Result<T> {
        if depth == 0 {
            return Result::from_error(error);
        }

        let mut result: Result = Result::from_error(error);
        for _ in 1..depth {
            result = Result::from_failed(result);
        }
        Result::from_failed(result)
    }
}
