//! Exception-free results with causal error chains in Rust.
//!
//! This crate provides [`chained_result::Result<T>`][crate::Result], an
//! outcome type that is either a produced value or a structured [`Failure`].
//! A failure can be re-used as the cause of a new, higher-level failure, so
//! that every failed result keeps a chain back to the original fault.
//!
//!
//! # Results and Errors
//!
//! A failed [`Result`] holds an [`Error`] plus, optionally, the result that
//! caused it. [`Error`] is a closed set of variants: generic failures,
//! captured native errors, "not found", "invalid operation", invalid
//! arguments, "not supported", aggregates of several failures, and the
//! [`Error::Wrapped`] marker.
//!
//! `Result` without a type argument is the valueless shape, for operations
//! that only succeed or fail. `Result<T>` additionally produces a `T`.
//!
//!
//! # Example
//!
//! ```
//! use chained_result::{Error, Result};
//!
//! fn parse_port(text: &str) -> Result<u16> {
//!     match text.parse::<u16>() {
//!         Ok(port) => Result::from_success(port),
//!         Err(e) => Result::from_error(Error::argument_invalid("port", e)),
//!     }
//! }
//!
//! fn connect(text: &str) -> Result {
//!     let port = parse_port(text);
//!     if !port.is_success() {
//!         // Keep the parse failure as the cause of the connection failure.
//!         return Result::from_failed(port);
//!     }
//!     Result::success()
//! }
//!
//! fn main() {
//!     let result = connect("http");
//!     if !result.is_success() {
//!         println!("Connection failed: {}", result);
//!         println!("Root cause: {}", result.unwrap_error());
//!     }
//! }
//! ```
//!
//!
//! # The Error Chain
//!
//! There are three ways to look at the error of a failed result:
//!
//! - [`Result::error`] is the error stored on the result itself. For results
//!   built with [`Result::from_failed`] this is [`Error::Wrapped`].
//! - [`Result::nearest_error`] looks through one wrapped layer. It is what a
//!   result shows when displayed.
//! - [`Result::unwrap_error`] follows the chain through any number of wrapped
//!   layers to the root cause.
//!
//! ```
//! let root: Result<String> = Result::from_error(Error::not_found());
//! let once: Result<u32> = Result::from_failed(root);
//! let twice: Result = Result::from_failed(once);
//!
//! assert!(twice.error().unwrap().is_wrapped());
//! assert!(twice.nearest_error().unwrap().is_wrapped());
//! assert_eq!(twice.unwrap_error(), &Error::not_found());
//! ```
//!
//!
//! # Invariant Violations
//!
//! Domain failures always travel through return values. Misusing the chain is
//! a programming defect instead, and panics:
//!
//! - constructing a result whose error is [`Error::Wrapped`] without an inner
//!   result;
//! - calling [`Result::unwrap_error`] on a success.
//!
//!
//! # Aggregates
//!
//! When an operation is made of several independent operations that must all
//! succeed, their outcomes are combined into an [`AggregateResult`], either
//! all at once or incrementally with an [`AggregateResultBuilder`]. A failed
//! aggregate carries an [`AggregateError`] listing every failed member:
//!
//! ```
//! let mut builder = AggregateResultBuilder::new();
//! builder.add(Result::from_success(1));
//! builder.add(Result::<u32>::from_error(Error::not_found()));
//!
//! let result = builder.build();
//! assert!(!result.is_success());
//! println!("{}", result);
//! // AggregateError: One or more errors occurred.
//! // [0]: 	NotFoundError: The searched-for entity was not found.
//! ```
//!
//!
//! # Cargo Features
//!
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events when an
//!   invariant is violated and when an aggregate is built. Off by default.

pub mod aggregate;
pub mod error;
pub mod kind;
pub mod result;

#[doc(inline)]
pub use self::{
    aggregate::{AggregateError, AggregateResult, AggregateResultBuilder},
    error::{Error, Exception, Failure},
    kind::ErrorKind,
    result::{Outcome, Result},
};

pub mod prelude {
    pub use crate::error::Error;
    pub use crate::result::{Outcome, Result};
}

#[cfg(test)]
mod test;
