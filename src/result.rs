//! Defines a new result type.

use crate::error::{invariant_violation, Error, Failure};

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// The public shape shared by every outcome: [`Result<T>`] for any `T`, and
/// [`AggregateResult`][crate::AggregateResult].
///
/// This is the seam through which outcomes of different value types are
/// collected together, e.g. by
/// [`AggregateResultBuilder::add`][crate::AggregateResultBuilder::add].
pub trait Outcome {
    /// Returns `true` if the operation succeeded.
    fn is_success(&self) -> bool;

    /// Returns the error stored on this outcome, or `None` on success.
    fn error(&self) -> Option<&Error>;

    /// Returns the outcome that caused this one to fail, if any.
    fn inner(&self) -> Option<&Arc<Result>>;

    /// Discards any produced value, leaving a valueless [`Result`].
    fn narrow(self) -> Result
    where
        Self: Sized;

    /// Returns the innermost concrete error of the chain.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success, or if a wrapped layer has no inner
    /// result.
    #[track_caller]
    fn unwrap_error(&self) -> &Error {
        match self.error() {
            None => invariant_violation("unwrapping a successful result makes no sense"),
            Some(error) if !error.is_wrapped() => error,
            Some(_) => match self.inner() {
                Some(inner) => inner.unwrap_error(),
                None => invariant_violation(
                    "wrapped errors may not exist on results without an inner result",
                ),
            },
        }
    }
}

/*  ____                    _  _     __ _____ __
 * |  _ \  ___  ___  _   _ | || |_  / /|_   _|\ \
 * | |_) |/ _ \/ __|| | | || || __|/ /   | |   \ \
 * |  _ <|  __/\__ \| |_| || || |_ \ \   | |   / /
 * |_| \_\\___||___/ \__,_||_| \__| \_\  |_|  /_/
 *  FIGLET: Result<T>
 */

/// The outcome of an operation: either a produced value or a [`Failure`].
///
/// `Result` on its own (i.e. `Result<()>`) is the valueless shape; `Result<T>`
/// carries a `T` on success.
///
/// # Creating Results
///
/// ```
/// use chained_result::{Error, Result};
///
/// let found: Result<u32> = Result::from_success(42);
/// let missing: Result<u32> = Result::from_error(Error::not_found());
///
/// // Plain errors convert directly into failed results.
/// let missing: Result<u32> = Error::not_found().into();
///
/// // Native errors are captured at the boundary where they are caught.
/// let io: Result<u32> = Result::from_exception(std::io::Error::from(std::io::ErrorKind::Other));
/// ```
///
/// # Chaining Failures
///
/// A failure can be re-used as the cause of a new, higher-level failure. The
/// resulting outcomes form a chain through [`Result::inner`]:
///
/// ```
/// use chained_result::{Error, Outcome, Result};
///
/// fn load_user(id: u32) -> Result<String> {
///     Result::from_error(Error::not_found())
/// }
///
/// fn user_name_length(id: u32) -> Result<usize> {
///     let user = load_user(id);
///     if !user.is_success() {
///         // Converts a `Result<String>` failure into a `Result<usize>` one,
///         // keeping the original cause.
///         return Result::from_failed(user);
///     }
///     user.map(|name| name.len())
/// }
///
/// let result = user_name_length(7);
/// assert!(result.error().unwrap().is_wrapped());
/// assert_eq!(result.unwrap_error(), &Error::not_found());
/// ```
///
/// # Working with `std::result::Result`
///
/// [`Result::into_std`] turns a `Result<T>` into a
/// `std::result::Result<T, Failure>`, so the `?` operator can be used on it in
/// functions returning `std::result::Result`. In the other direction, any
/// `std::result::Result<T, E>` whose error converts into [`Error`] converts
/// into a `Result<T>`.
#[must_use = "this `Result` may be a failure, which should be handled"]
#[derive(Debug, Clone, PartialEq)]
pub struct Result<T = ()>(std::result::Result<T, Failure>);

/*  _                    _  ____                    _  _
 * (_) _ __ ___   _ __  | ||  _ \  ___  ___  _   _ | || |_
 * | || '_ ` _ \ | '_ \ | || |_) |/ _ \/ __|| | | || || __|
 * | || | | | | || |_) || ||  _ <|  __/\__ \| |_| || || |_
 * |_||_| |_| |_|| .__/ |_||_| \_\\___||___/ \__,_||_| \__|
 *               |_|
 *  FIGLET: impl Result
 */

impl<T> Result<T> {
    /// Constructs a successful result holding `entity`.
    #[inline]
    pub fn from_success(entity: T) -> Self {
        Self(Ok(entity))
    }

    /// Constructs a failed result with no inner result.
    ///
    /// # Panics
    ///
    /// Panics if `error` is [`Error::Wrapped`].
    #[inline]
    #[track_caller]
    pub fn from_error(error: impl Into<Error>) -> Self {
        Self(Err(Failure::new(error.into(), None)))
    }

    /// Constructs a failed result caused by `inner`.
    ///
    /// # Panics
    ///
    /// Panics if `error` is [`Error::Wrapped`] and `inner` is `None`.
    #[inline]
    #[track_caller]
    pub fn from_error_with_inner(error: impl Into<Error>, inner: Option<Arc<Result>>) -> Self {
        Self(Err(Failure::new(error.into(), inner)))
    }

    /// Wraps the failure of `other`, which may have a different value type.
    ///
    /// The new result stores [`Error::Wrapped`] as its error and `other` as its
    /// inner result; [`Result::unwrap_error`] still finds the original cause.
    #[inline]
    #[track_caller]
    pub fn from_failed<U>(other: Result<U>) -> Self {
        Self::from_error_with_inner(Error::Wrapped, Some(Arc::new(other.narrow())))
    }

    /// Constructs a failed result from a native error.
    #[inline]
    pub fn from_exception<E>(exception: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Err(Failure::new(Error::from_exception(exception), None)))
    }

    /// Returns `true` if the operation succeeded.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.0.is_ok()
    }

    /// Returns the produced value, or `None` on failure.
    #[inline]
    pub fn entity(&self) -> Option<&T> {
        self.0.as_ref().ok()
    }

    /// Converts `self` into its produced value, discarding any failure.
    #[inline]
    pub fn into_entity(self) -> Option<T> {
        self.0.ok()
    }

    /// Returns the failure, or `None` on success.
    #[inline]
    pub fn failure(&self) -> Option<&Failure> {
        self.0.as_ref().err()
    }

    pub(crate) fn failure_mut(&mut self) -> Option<&mut Failure> {
        self.0.as_mut().err()
    }

    /// Returns the error stored on `self`, or `None` on success.
    ///
    /// For a result built with [`Result::from_failed`] this is the
    /// [`Error::Wrapped`] marker. Use [`Result::nearest_error`] for a
    /// displayable error, or [`Result::unwrap_error`] for the root cause.
    #[inline]
    pub fn error(&self) -> Option<&Error> {
        self.failure().map(Failure::error)
    }

    /// Returns the result that caused `self` to fail, if any.
    #[inline]
    pub fn inner(&self) -> Option<&Arc<Result>> {
        self.failure().and_then(Failure::inner)
    }

    /// Returns the error stored on `self`, looking through one
    /// [`Error::Wrapped`] layer into the inner result.
    ///
    /// Only one level is resolved: on a result wrapped twice this still returns
    /// the marker. [`Result::unwrap_error`] resolves the whole chain.
    pub fn nearest_error(&self) -> Option<&Error> {
        let failure = self.failure()?;
        if failure.error.is_wrapped() {
            if let Some(error) = failure.inner.as_deref().and_then(Result::error) {
                return Some(error);
            }
        }
        Some(&failure.error)
    }

    /// Returns the innermost concrete error, following the inner chain through
    /// any number of [`Error::Wrapped`] layers.
    ///
    /// # Panics
    ///
    /// Panics if `self` is a success, or if a wrapped layer has no inner result.
    #[doc(alias = "unwrap")]
    #[track_caller]
    pub fn unwrap_error(&self) -> &Error {
        match &self.0 {
            Ok(_) => invariant_violation("unwrapping a successful result makes no sense"),
            Err(failure) => failure.root(),
        }
    }

    /// Maps a `Result<T>` to a `Result<U>` by applying `f` to the produced
    /// value. A failure is carried over as-is and `f` is not called.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Result<U>
    where
        F: FnOnce(T) -> U,
    {
        Result(self.0.map(f))
    }

    /// Applies `f` to the produced value, or returns `default` on failure.
    #[inline]
    pub fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(T) -> U,
    {
        match self.0 {
            Ok(entity) => f(entity),
            Err(_) => default,
        }
    }

    /// Applies `f` to the produced value, or `fallback` to the error and inner
    /// result on failure. Exactly one of the two closures is called.
    #[inline]
    pub fn map_or_else<U, D, F>(self, fallback: D, f: F) -> U
    where
        D: FnOnce(Error, Option<Arc<Result>>) -> U,
        F: FnOnce(T) -> U,
    {
        match self.0 {
            Ok(entity) => f(entity),
            Err(failure) => {
                let (error, inner) = failure.into_parts();
                fallback(error, inner)
            }
        }
    }

    /// Replaces the error of a failure, keeping its inner result. A success is
    /// returned unchanged and `conversion` is not called.
    ///
    /// # Panics
    ///
    /// Panics if `conversion` returns [`Error::Wrapped`] for a failure without
    /// an inner result.
    #[track_caller]
    pub fn map_error<F>(self, conversion: F) -> Self
    where
        F: FnOnce(Error, Option<&Arc<Result>>) -> Error,
    {
        match self.0 {
            Ok(entity) => Self(Ok(entity)),
            Err(failure) => {
                let (error, inner) = failure.into_parts();
                let error = conversion(error, inner.as_ref());
                Self(Err(Failure::new(error, inner)))
            }
        }
    }

    /// Replaces both the error and the inner result of a failure. A success is
    /// returned unchanged and `conversion` is not called.
    ///
    /// # Panics
    ///
    /// Panics if `conversion` returns [`Error::Wrapped`] without an inner
    /// result.
    #[track_caller]
    pub fn map_error_with_inner<F>(self, conversion: F) -> Self
    where
        F: FnOnce(Error, Option<Arc<Result>>) -> (Error, Option<Arc<Result>>),
    {
        match self.0 {
            Ok(entity) => Self(Ok(entity)),
            Err(failure) => {
                let (error, inner) = failure.into_parts();
                let (error, inner) = conversion(error, inner);
                Self(Err(Failure::new(error, inner)))
            }
        }
    }

    /// Discards the produced value, leaving a valueless [`Result`] with the same
    /// error and inner result.
    #[inline]
    pub fn narrow(self) -> Result {
        Result(self.0.map(|_| ()))
    }

    /// Converts `self` into a [`std::result::Result`], so that it can be
    /// propagated with the `?` operator.
    #[inline]
    pub fn into_std(self) -> std::result::Result<T, Failure> {
        self.0
    }

    /// Splits `self` into a [`std::result::Result`] and the inner result, if
    /// any.
    ///
    /// # Example
    ///
    /// ```
    /// let x: Result<u32> = Result::from_error(Error::not_found());
    /// let (result, inner) = x.unpack();
    /// assert!(matches!(result, Err(Error::NotFound { .. })));
    /// assert!(inner.is_none());
    /// ```
    pub fn unpack(self) -> (std::result::Result<T, Error>, Option<Arc<Result>>) {
        match self.0 {
            Ok(entity) => (Ok(entity), None),
            Err(failure) => {
                let (error, inner) = failure.into_parts();
                (Err(error), inner)
            }
        }
    }
}

impl Result {
    /// Constructs a successful valueless result.
    #[inline]
    pub fn success() -> Self {
        Self(Ok(()))
    }

    /// Attaches `entity` to a successful valueless result. A failure is carried
    /// over as-is.
    #[inline]
    pub fn map_to<U>(self, entity: U) -> Result<U> {
        self.map(|()| entity)
    }
}

impl<T> Result<Option<T>> {
    /// Returns `true` if the operation succeeded and produced `Some` value.
    ///
    /// A success holding `None` is not defined.
    #[inline]
    pub fn is_defined(&self) -> bool {
        matches!(self.0, Ok(Some(_)))
    }

    /// Returns the produced value if the result [is defined][Self::is_defined].
    #[inline]
    pub fn defined(&self) -> Option<&T> {
        self.0.as_ref().ok().and_then(Option::as_ref)
    }
}

/*  _                    _   ___          _
 * (_) _ __ ___   _ __  | | / _ \  _   _ | |_  ___  ___   _ __ ___    ___
 * | || '_ ` _ \ | '_ \ | || | | || | | || __|/ __|/ _ \ | '_ ` _ \  / _ \
 * | || | | | | || |_) || || |_| || |_| || |_| (__| (_) || | | | | ||  __/
 * |_||_| |_| |_|| .__/ |_| \___/  \__,_| \__|\___|\___/ |_| |_| |_| \___|
 *               |_|
 *  FIGLET: impl Outcome
 */

impl<T> Outcome for Result<T> {
    fn is_success(&self) -> bool {
        Result::<T>::is_success(self)
    }

    fn error(&self) -> Option<&Error> {
        Result::<T>::error(self)
    }

    fn inner(&self) -> Option<&Arc<Result>> {
        Result::<T>::inner(self)
    }

    fn narrow(self) -> Result {
        Result::<T>::narrow(self)
    }

    #[track_caller]
    fn unwrap_error(&self) -> &Error {
        Result::<T>::unwrap_error(self)
    }
}

impl<T> From<Error> for Result<T> {
    #[track_caller]
    fn from(error: Error) -> Self {
        Self::from_error(error)
    }
}

impl<T> From<Failure> for Result<T> {
    fn from(failure: Failure) -> Self {
        Self(Err(failure))
    }
}

/// Converts a standard result, starting a new chain on failure.
impl<T, E> From<std::result::Result<T, E>> for Result<T>
where
    E: Into<Error>,
{
    #[track_caller]
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(entity) => Self::from_success(entity),
            Err(error) => Self::from_error(error),
        }
    }
}

/// A success renders as `Success`; a failure renders its
/// [nearest error][Result::nearest_error].
impl<T> fmt::Display for Result<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nearest_error() {
            None => write!(f, "Success"),
            Some(error) => fmt::Display::fmt(error, f),
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
