//! Combines the outcomes of several independent operations.

use crate::error::Error;
use crate::result::{Outcome, Result};

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

const DEFAULT_MESSAGE: &str = "One or more errors occurred.";

/*     _                                           _         _____
 *    / \    __ _   __ _  _ __  ___   __ _   __ _ | |_  ___ | ____| _ __  _ __  ___   _ __
 *   / _ \  / _` | / _` || '__|/ _ \ / _` | / _` || __|/ _ \|  _|  | '__|| '__|/ _ \ | '__|
 *  / ___ \| (_| || (_| || |  |  __/| (_| || (_| || |_|  __/| |___ | |   | |  | (_) || |
 * /_/   \_\\__, | \__, ||_|   \___| \__, | \__,_| \__|\___||_____||_|   |_|   \___/ |_|
 *          |___/  |___/             |___/
 *  FIGLET: AggregateError
 */

/// A set of failures produced by one logical operation.
///
/// Renders as the header message followed by one indented block per failed
/// member, numbered from zero:
///
/// ```text
/// AggregateError: One or more errors occurred.
/// [0]: 	NotFoundError: The searched-for entity was not found.
/// [1]: 	GenericError: oops
/// ```
///
/// Successful members are skipped when rendering and do not consume an index.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateError {
    pub(crate) message: String,
    errors: Vec<Result>,
}

impl AggregateError {
    /// Constructs a new [`AggregateError`] with the default message.
    pub fn new(errors: impl IntoIterator<Item = Result>) -> Self {
        Self::with_message(DEFAULT_MESSAGE, errors)
    }

    /// Constructs a new [`AggregateError`] with a custom message.
    pub fn with_message(
        message: impl Into<String>,
        errors: impl IntoIterator<Item = Result>,
    ) -> Self {
        Self {
            message: message.into(),
            errors: errors.into_iter().collect(),
        }
    }

    /// Returns the header message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the contained results, in insertion order.
    pub fn errors(&self) -> &[Result] {
        &self.errors
    }

    fn failures(&self) -> impl Iterator<Item = &Result> {
        self.errors.iter().filter(|result| !result.is_success())
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AggregateError: {}", self.message)?;

        for (index, failure) in self.failures().enumerate() {
            write!(f, "[{}]: ", index)?;
            for line in failure.to_string().lines() {
                writeln!(f, "\t{}", line)?;
            }
        }

        Ok(())
    }
}

impl StdError for AggregateError {}

/*     _                                           _         ____                    _  _
 *    / \    __ _   __ _  _ __  ___   __ _   __ _ | |_  ___ |  _ \  ___  ___  _   _ | || |_
 *   / _ \  / _` | / _` || '__|/ _ \ / _` | / _` || __|/ _ \| |_) |/ _ \/ __|| | | || || __|
 *  / ___ \| (_| || (_| || |  |  __/| (_| || (_| || |_|  __/|  _ <|  __/\__ \| |_| || || |_
 * /_/   \_\\__, | \__, ||_|   \___| \__, | \__,_| \__|\___||_| \_\\___||___/ \__,_||_| \__|
 *          |___/  |___/             |___/
 *  FIGLET: AggregateResult
 */

/// The combined outcome of several operations that must all succeed.
///
/// Keeps every member, successful or not. On failure, [`AggregateResult::error`]
/// is an [`Error::Aggregate`] over the failed members.
#[must_use = "this `AggregateResult` may be a failure, which should be handled"]
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    results: Vec<Result>,
    error: Option<Error>,
}

impl AggregateResult {
    /// Combines `results`. The aggregate succeeds iff every member succeeded.
    pub fn new(results: impl IntoIterator<Item = Result>) -> Self {
        let results: Vec<Result> = results.into_iter().collect();
        let all_successful = results.iter().all(|result| result.is_success());
        Self::from_parts(all_successful, results)
    }

    pub(crate) fn from_parts(all_successful: bool, results: Vec<Result>) -> Self {
        let error = if all_successful {
            None
        } else {
            let failed = results.iter().filter(|result| !result.is_success()).cloned();
            Some(Error::Aggregate(AggregateError::new(failed)))
        };

        Self { results, error }
    }

    /// Returns `true` if every member succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the [`Error::Aggregate`] over the failed members, or `None` on
    /// success.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Always `None`: the members are not a causal chain.
    pub fn inner(&self) -> Option<&Arc<Result>> {
        None
    }

    /// Returns every member, in insertion order.
    pub fn results(&self) -> &[Result] {
        &self.results
    }

    /// Returns the successful members, in insertion order.
    pub fn successful_results(&self) -> impl Iterator<Item = &Result> {
        self.results.iter().filter(|result| result.is_success())
    }

    /// Returns the failed members, in insertion order.
    pub fn failed_results(&self) -> impl Iterator<Item = &Result> {
        self.results.iter().filter(|result| !result.is_success())
    }

    /// Collapses `self` into a single valueless [`Result`].
    pub fn into_result(self) -> Result {
        match self.error {
            None => Result::success(),
            Some(error) => Result::from_error(error),
        }
    }
}

impl Outcome for AggregateResult {
    fn is_success(&self) -> bool {
        AggregateResult::is_success(self)
    }

    fn error(&self) -> Option<&Error> {
        AggregateResult::error(self)
    }

    fn inner(&self) -> Option<&Arc<Result>> {
        AggregateResult::inner(self)
    }

    fn narrow(self) -> Result {
        self.into_result()
    }
}

impl FromIterator<Result> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = Result>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "Success"),
            Some(error) => fmt::Display::fmt(error, f),
        }
    }
}

/*  ____          _  _      _
 * | __ )  _   _ (_)| |  __| |  ___  _ __
 * |  _ \ | | | || || | / _` | / _ \| '__|
 * | |_) || |_| || || || (_| ||  __/| |
 * |____/  \__,_||_||_| \__,_| \___||_|
 *  FIGLET: Builder
 */

/// Accumulates outcomes one at a time into an [`AggregateResult`].
///
/// Meant for loops where results arrive one by one. If all of them are
/// available at once, use [`AggregateResult::new`] or `collect()` instead.
///
/// ```
/// let mut builder = AggregateResultBuilder::new();
/// for id in ids {
///     builder.add(delete_user(id));
/// }
/// let result = builder.build();
/// ```
///
/// `add` takes `&mut self`, so a builder has a single writer at a time.
#[derive(Debug, Clone)]
pub struct AggregateResultBuilder {
    results: Vec<Result>,
    all_successful: bool,
}

impl AggregateResultBuilder {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            all_successful: true,
        }
    }

    /// Appends `result`. The first failure marks the whole aggregate as failed
    /// for good.
    pub fn add(&mut self, result: impl Outcome) {
        if !result.is_success() {
            self.all_successful = false;
        }

        self.results.push(result.narrow());
    }

    /// Returns `true` if no failure has been added so far.
    pub fn all_successful(&self) -> bool {
        self.all_successful
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Builds the [`AggregateResult`] from everything added so far. The builder
    /// is left untouched.
    pub fn build(&self) -> AggregateResult {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            results = self.results.len(),
            all_successful = self.all_successful,
            "building aggregate result"
        );

        AggregateResult::from_parts(self.all_successful, self.results.clone())
    }
}

impl Default for AggregateResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Outcome> Extend<R> for AggregateResultBuilder {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for result in iter {
            self.add(result);
        }
    }
}

/*  _            _
 * | |_ ___  ___| |_
 * | __/ _ \/ __| __|
 * | ||  __/\__ \ |_
 *  \__\___||___/\__|
 *  FIGLET: test
 */

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::Fixture;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_all_failed_members_in_order() {
        let aggregate = AggregateError::new(vec![
            Result::from_error(Error::invalid_operation()),
            Result::from_error(Error::argument_invalid(
                "myArgument",
                "You can't cut back on errors! You'll regret this!",
            )),
            Result::from_error(Error::not_found()),
        ]);

        assert_eq!(
            aggregate.to_string(),
            "AggregateError: One or more errors occurred.\n\
             [0]: \tInvalidOperationError: The requested operation is invalid.\n\
             [1]: \tArgumentInvalidError: Error in argument myArgument: You can't cut back on errors! You'll regret this!\n\
             [2]: \tNotFoundError: The searched-for entity was not found.\n"
        );
    }

    #[test]
    fn renders_custom_message() {
        let aggregate =
            AggregateError::with_message("Could not sync.", vec![Result::from_error("timeout")]);

        assert_eq!(
            aggregate.to_string(),
            "AggregateError: Could not sync.\n[0]: \tGenericError: timeout\n"
        );
        assert_eq!(Error::from(aggregate).message(), "Could not sync.");
    }

    #[test]
    fn skips_successful_members_without_consuming_an_index() {
        let aggregate = AggregateError::new(vec![
            Result::from_error("first"),
            Result::success(),
            Result::from_error("second"),
        ]);

        assert_eq!(aggregate.errors().len(), 3);
        assert_eq!(
            aggregate.to_string(),
            "AggregateError: One or more errors occurred.\n\
             [0]: \tGenericError: first\n\
             [1]: \tGenericError: second\n"
        );
    }

    #[test]
    fn renders_header_only_when_empty() {
        let aggregate = AggregateError::new(Vec::new());
        assert_eq!(
            aggregate.to_string(),
            "AggregateError: One or more errors occurred.\n"
        );
    }

    #[test]
    fn nested_aggregates_nest_indentation() {
        let nested = AggregateError::with_message("inner", vec![Result::from_error("x")]);
        let outer = AggregateError::with_message(
            "outer",
            vec![Result::from_error(Error::from(nested)), Result::from_error("y")],
        );

        assert_eq!(
            outer.to_string(),
            "AggregateError: outer\n\
             [0]: \tAggregateError: inner\n\
             \t[0]: \tGenericError: x\n\
             [1]: \tGenericError: y\n"
        );
    }

    #[test]
    fn wrapped_members_render_their_inner_error() {
        let wrapped: Result<u32> = Fixture::wrapped_chain(Error::not_found(), 1);
        let aggregate = AggregateError::new(vec![wrapped.narrow()]);

        assert_eq!(
            aggregate.to_string(),
            "AggregateError: One or more errors occurred.\n\
             [0]: \tNotFoundError: The searched-for entity was not found.\n"
        );
    }

    #[test]
    fn aggregate_result_partitions_members() {
        let result: AggregateResult = vec![
            Result::success(),
            Result::from_error(Error::not_found()),
            Result::success(),
        ]
        .into_iter()
        .collect();

        assert!(!result.is_success());
        assert!(result.inner().is_none());
        assert_eq!(result.results().len(), 3);
        assert_eq!(result.successful_results().count(), 2);
        assert_eq!(
            result.failed_results().cloned().collect::<Vec<_>>(),
            vec![Result::<()>::from_error(Error::not_found())]
        );
    }

    #[test]
    fn aggregate_result_unwraps_to_its_aggregate_error() {
        let result = AggregateResult::new(vec![Result::from_error("x")]);
        let error = Outcome::unwrap_error(&result);
        assert_eq!(error.kind(), crate::ErrorKind::Aggregate);
        assert_eq!(Some(error), result.error());
    }

    #[test]
    fn aggregate_result_over_successes_has_no_error() {
        let result = AggregateResult::new(vec![Result::success(), Result::success()]);
        assert!(result.is_success());
        assert!(result.error().is_none());
        assert_eq!(result.into_result(), Result::success());
    }

    #[test]
    fn builder_collects_failures_in_insertion_order() {
        let mut builder = AggregateResultBuilder::new();
        builder.add(Result::from_success(1));
        builder.add(Result::<String>::from_error(Error::not_found()));
        builder.add(Result::success());

        let result = builder.build();
        assert!(!result.is_success());
        assert_eq!(result.results().len(), 3);

        let Some(Error::Aggregate(aggregate)) = result.error() else {
            panic!("expected an aggregate error, got {:?}", result.error());
        };
        assert_eq!(
            aggregate.errors().to_vec(),
            vec![Result::<()>::from_error(Error::not_found())]
        );
    }

    #[test]
    fn builder_failure_flag_never_reverts() {
        let mut builder = AggregateResultBuilder::default();
        assert!(builder.all_successful());
        assert!(builder.build().is_success());

        builder.add(Result::<()>::from_error(Error::not_supported()));
        assert!(!builder.all_successful());

        builder.extend(vec![Result::success(), Result::success()]);
        assert!(!builder.all_successful());
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn build_does_not_reset_builder() {
        let mut builder = AggregateResultBuilder::new();
        builder.add(Result::<()>::from_error("first"));

        let first = builder.build();
        builder.add(Result::<()>::from_error("second"));
        let second = builder.build();

        assert_eq!(first.failed_results().count(), 1);
        assert_eq!(second.failed_results().count(), 2);
    }

    #[test]
    fn builder_accepts_aggregate_results() {
        let nested = AggregateResult::new(vec![Result::from_error("x")]);

        let mut builder = AggregateResultBuilder::new();
        builder.add(nested);
        let result = builder.build();

        assert_eq!(
            result.into_result().to_string(),
            "AggregateError: One or more errors occurred.\n\
             [0]: \tAggregateError: One or more errors occurred.\n\
             \t[0]: \tGenericError: x\n"
        );
    }
}
