//! Defines the error values carried by failed results.

use crate::aggregate::AggregateError;
use crate::kind::ErrorKind;
use crate::result::Result;

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::Arc;

/// A native error captured by [`Error::Exception`].
pub type Exception = Arc<dyn StdError + Send + Sync + 'static>;

const NOT_FOUND: &str = "The searched-for entity was not found.";
const INVALID_OPERATION: &str = "The requested operation is invalid.";
const NOT_SUPPORTED: &str = "The requested action is not supported.";
const WRAPPED: &str = "The error is contained in an inner result.";

/*  _____
 * | ____| _ __  _ __  ___   _ __
 * |  _|  | '__|| '__|/ _ \ | '__|
 * | |___ | |   | |  | (_) || |
 * |_____||_|   |_|   \___/ |_|
 *  FIGLET: Error
 */

/// The payload of a failed [`Result`].
///
/// Each variant renders as `"{kind}: {message}"`, where `kind` is the
/// [`ErrorKind`] name of the variant:
///
/// ```
/// use chained_result::Error;
///
/// let error = Error::not_found();
/// assert_eq!(
///     error.to_string(),
///     "NotFoundError: The searched-for entity was not found."
/// );
/// ```
///
/// [`Error::Wrapped`] is special: it carries no description of its own and
/// only means "look at the inner result". It may only appear on a result that
/// has an inner result; see [`Result::from_error_with_inner`].
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    #[error("GenericError: {message}")]
    Generic { message: String },

    #[error("ExceptionError: {message}")]
    Exception {
        message: String,
        #[source]
        exception: Exception,
    },

    #[error("NotFoundError: {message}")]
    NotFound { message: String },

    #[error("InvalidOperationError: {message}")]
    InvalidOperation { message: String },

    #[error("ArgumentInvalidError: {message}")]
    ArgumentInvalid { name: String, message: String },

    #[error("NotSupportedError: {message}")]
    NotSupported { message: String },

    #[error("WrappedError: {}", WRAPPED)]
    Wrapped,

    #[error(transparent)]
    Aggregate(AggregateError),
}

impl Error {
    /// Constructs a free-form error.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Captures a native error. The message is the native error's own
    /// `Display` output.
    pub fn from_exception<E>(exception: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Exception {
            message: exception.to_string(),
            exception: Arc::new(exception),
        }
    }

    /// Constructs a [`Error::NotFound`] with the default message.
    pub fn not_found() -> Self {
        Self::NotFound {
            message: NOT_FOUND.to_string(),
        }
    }

    /// Constructs a [`Error::InvalidOperation`] with the default message.
    pub fn invalid_operation() -> Self {
        Self::InvalidOperation {
            message: INVALID_OPERATION.to_string(),
        }
    }

    /// Constructs a [`Error::ArgumentInvalid`] naming the rejected argument.
    pub fn argument_invalid(name: impl Into<String>, reason: impl fmt::Display) -> Self {
        let name = name.into();
        Self::ArgumentInvalid {
            message: format!("Error in argument {}: {}", name, reason),
            name,
        }
    }

    /// Constructs a [`Error::NotSupported`] with the default message.
    pub fn not_supported() -> Self {
        Self::NotSupported {
            message: NOT_SUPPORTED.to_string(),
        }
    }

    /// Replaces the message of `self`, consuming `self`.
    ///
    /// [`Error::Wrapped`] has no message and is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// let error = Error::not_found().with_message("no user with id 42");
    /// assert_eq!(error.message(), "no user with id 42");
    /// ```
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Some(slot) = self.message_mut() {
            *slot = message.into();
        }
        self
    }

    /// Returns the kind of `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Generic { .. } => ErrorKind::Generic,
            Self::Exception { .. } => ErrorKind::Exception,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            Self::ArgumentInvalid { .. } => ErrorKind::ArgumentInvalid,
            Self::NotSupported { .. } => ErrorKind::NotSupported,
            Self::Wrapped => ErrorKind::Wrapped,
            Self::Aggregate(_) => ErrorKind::Aggregate,
        }
    }

    /// Returns the human-readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Generic { message }
            | Self::Exception { message, .. }
            | Self::NotFound { message }
            | Self::InvalidOperation { message }
            | Self::ArgumentInvalid { message, .. }
            | Self::NotSupported { message } => message,
            Self::Wrapped => WRAPPED,
            Self::Aggregate(aggregate) => aggregate.message(),
        }
    }

    /// Returns the captured native error, if `self` is an [`Error::Exception`].
    pub fn exception(&self) -> Option<&Exception> {
        match self {
            Self::Exception { exception, .. } => Some(exception),
            _ => None,
        }
    }

    /// Returns `true` if `self` is the [`Error::Wrapped`] marker.
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped)
    }

    fn message_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Generic { message }
            | Self::Exception { message, .. }
            | Self::NotFound { message }
            | Self::InvalidOperation { message }
            | Self::ArgumentInvalid { message, .. }
            | Self::NotSupported { message } => Some(message),
            Self::Wrapped => None,
            Self::Aggregate(aggregate) => Some(&mut aggregate.message),
        }
    }
}

/// Exceptions compare by identity, everything else by value.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Generic { message: a }, Self::Generic { message: b })
            | (Self::NotFound { message: a }, Self::NotFound { message: b })
            | (Self::InvalidOperation { message: a }, Self::InvalidOperation { message: b })
            | (Self::NotSupported { message: a }, Self::NotSupported { message: b }) => a == b,
            (
                Self::Exception {
                    message: a,
                    exception: x,
                },
                Self::Exception {
                    message: b,
                    exception: y,
                },
            ) => a == b && Arc::ptr_eq(x, y),
            (
                Self::ArgumentInvalid {
                    name: n,
                    message: a,
                },
                Self::ArgumentInvalid {
                    name: m,
                    message: b,
                },
            ) => n == m && a == b,
            (Self::Wrapped, Self::Wrapped) => true,
            (Self::Aggregate(a), Self::Aggregate(b)) => a == b,
            _ => false,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::from_exception(err)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::generic(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::generic(message)
    }
}

impl From<AggregateError> for Error {
    fn from(aggregate: AggregateError) -> Self {
        Error::Aggregate(aggregate)
    }
}

/*  _____       _  _
 * |  ___|__ _ (_)| | _   _  _ __  ___
 * | |_  / _` || || || | | || '__|/ _ \
 * |  _|| (_| || || || |_| || |  |  __/
 * |_|   \__,_||_||_| \__,_||_|   \___|
 *  FIGLET: Failure
 */

/// The failed half of a [`Result`]: an error plus the result that caused it.
///
/// The inner result is shared, never owned exclusively, so wrapping the same
/// cause in several places is cheap and the chain stays acyclic.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub(crate) error: Error,
    pub(crate) inner: Option<Arc<Result>>,
}

impl Failure {
    /// Constructs a new [`Failure`].
    ///
    /// # Panics
    ///
    /// Panics if `error` is [`Error::Wrapped`] and there is no `inner` result
    /// for it to refer to.
    #[inline]
    #[track_caller]
    pub fn new(error: Error, inner: Option<Arc<Result>>) -> Self {
        if error.is_wrapped() && inner.is_none() {
            invariant_violation("wrapped errors must actually wrap an inner result");
        }
        Self { error, inner }
    }

    /// Returns the error stored on this failure, which may be the
    /// [`Error::Wrapped`] marker.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Returns the result that caused this failure, if any.
    pub fn inner(&self) -> Option<&Arc<Result>> {
        self.inner.as_ref()
    }

    /// Returns the innermost concrete error, skipping any number of
    /// [`Error::Wrapped`] layers.
    ///
    /// # Panics
    ///
    /// Panics if a wrapped layer has no inner result, or if the chain ends in a
    /// successful result.
    #[track_caller]
    pub fn root(&self) -> &Error {
        let mut failure = self;
        loop {
            if !failure.error.is_wrapped() {
                return &failure.error;
            }

            let Some(inner) = &failure.inner else {
                invariant_violation(
                    "wrapped errors may not exist on results without an inner result",
                );
            };

            match inner.failure() {
                Some(next) => failure = next,
                None => invariant_violation("unwrapping a successful result makes no sense"),
            }
        }
    }

    /// Splits the failure into its error and inner result.
    pub fn into_parts(mut self) -> (Error, Option<Arc<Result>>) {
        let inner = self.inner.take();
        let error = std::mem::replace(&mut self.error, Error::Wrapped);
        (error, inner)
    }
}

/// Unlinks uniquely owned inner results one at a time, so dropping a long
/// chain takes constant stack. A link that is still shared elsewhere stops the
/// walk and stays alive.
impl Drop for Failure {
    fn drop(&mut self) {
        let mut next = self.inner.take();
        while let Some(link) = next {
            next = match Arc::try_unwrap(link) {
                Ok(mut result) => result.failure_mut().and_then(|failure| failure.inner.take()),
                Err(_) => None,
            };
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

/// The source of a failure is the failure of its inner result, so the
/// standard error chain follows the result chain.
impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .as_deref()
            .and_then(Result::failure)
            .map(|failure| failure as &(dyn StdError + 'static))
    }
}

/// Reports a broken invariant. These are programming defects, never domain
/// failures, so they abort the current thread.
#[cold]
#[track_caller]
pub(crate) fn invariant_violation(message: &'static str) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!(location = %std::panic::Location::caller(), "{}", message);

    panic!("{}", message)
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

    #[test]
    fn variants_render_kind_then_message() {
        assert_eq!(
            Error::invalid_operation().to_string(),
            "InvalidOperationError: The requested operation is invalid."
        );
        assert_eq!(
            Error::not_supported().to_string(),
            "NotSupportedError: The requested action is not supported."
        );
        assert_eq!(Error::generic("oops").to_string(), "GenericError: oops");
        assert_eq!(
            Error::Wrapped.to_string(),
            "WrappedError: The error is contained in an inner result."
        );
    }

    #[test]
    fn argument_invalid_names_the_argument() {
        let error = Error::argument_invalid("count", "must be positive");
        assert_eq!(error.kind(), ErrorKind::ArgumentInvalid);
        assert_eq!(error.message(), "Error in argument count: must be positive");
        assert!(matches!(&error, Error::ArgumentInvalid { name, .. } if name == "count"));
    }

    #[test]
    fn with_message_replaces_message_but_not_kind() {
        let error = Error::not_found().with_message("no such user");
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.to_string(), "NotFoundError: no such user");

        assert_eq!(Error::Wrapped.with_message("ignored"), Error::Wrapped);
    }

    #[test]
    fn io_errors_become_exceptions_with_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "config.toml is missing");
        let error = Error::from(io_err);

        assert_eq!(error.kind(), ErrorKind::Exception);
        assert_eq!(error.message(), "config.toml is missing");

        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "config.toml is missing");
    }

    #[test]
    fn exceptions_compare_by_identity() {
        let a = Error::from_exception(io::Error::new(io::ErrorKind::Other, "boom"));
        let b = Error::from_exception(io::Error::new(io::ErrorKind::Other, "boom"));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    #[should_panic(expected = "wrapped errors must actually wrap an inner result")]
    fn wrapped_failure_without_inner_panics() {
        let _ = Failure::new(Error::Wrapped, None);
    }

    #[test]
    fn failure_source_follows_inner_chain() {
        let root = Result::<()>::from_error(Error::not_found());
        let failure = Failure::new(Error::generic("lookup failed"), Some(Arc::new(root)));

        let source = failure.source().unwrap();
        assert_eq!(
            source.to_string(),
            "NotFoundError: The searched-for entity was not found."
        );
        assert!(source.source().is_none());
    }

    #[test]
    fn dropping_a_deep_chain_does_not_overflow() {
        let result: Result = Fixture::wrapped_chain(Error::not_found(), 100_000);
        assert_eq!(result.unwrap_error(), &Error::not_found());

        let copy = result.clone();
        drop(result);
        assert_eq!(copy.unwrap_error(), &Error::not_found());
        drop(copy);
    }

    #[test]
    fn dropping_a_failure_keeps_shared_causes_alive() {
        let root = Result::<u8>::from_error(Error::not_found());
        let cause = Arc::new(Result::<()>::from_failed(root));
        let failure = Failure::new(Error::Wrapped, Some(Arc::clone(&cause)));

        drop(failure);
        assert_eq!(Arc::strong_count(&cause), 1);
        assert_eq!(cause.unwrap_error(), &Error::not_found());
    }

    #[test]
    fn into_parts_hands_out_error_and_inner() {
        let cause = Arc::new(Result::<()>::from_error(Error::not_found()));
        let failure = Failure::new(Error::generic("outer"), Some(Arc::clone(&cause)));

        let (error, inner) = failure.into_parts();
        assert_eq!(error, Error::generic("outer"));
        assert!(Arc::ptr_eq(&inner.unwrap(), &cause));
    }
}
