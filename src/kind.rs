//! Defines the kinds of errors a [`Result`][crate::Result] can carry.

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The kind of an [`Error`][crate::Error].
///
/// Every [`Error`][crate::Error] variant has exactly one kind. The kind's
/// name is the first thing printed when an error is rendered, e.g.
/// `NotFoundError: The searched-for entity was not found.`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A free-form error with a custom message.
    #[strum(serialize = "GenericError")]
    Generic,

    /// A native error caught at a boundary and turned into a domain failure.
    #[strum(serialize = "ExceptionError")]
    Exception,

    /// The searched-for entity does not exist.
    #[strum(serialize = "NotFoundError")]
    NotFound,

    /// The operation is not valid in the current state.
    #[strum(serialize = "InvalidOperationError")]
    InvalidOperation,

    /// An argument passed to the operation was rejected.
    #[strum(serialize = "ArgumentInvalidError")]
    ArgumentInvalid,

    /// The requested action is not supported.
    #[strum(serialize = "NotSupportedError")]
    NotSupported,

    /// Marker: the substantive error lives in the inner result.
    #[strum(serialize = "WrappedError")]
    Wrapped,

    /// Several independent failures bundled together.
    #[strum(serialize = "AggregateError")]
    Aggregate,
}

impl ErrorKind {
    /// Returns the kind's rendered name as a static string.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn kind_names_carry_error_suffix() {
        assert_eq!(ErrorKind::NotFound.to_string(), "NotFoundError");
        assert_eq!(ErrorKind::Aggregate.as_str(), "AggregateError");

        for kind in ErrorKind::iter() {
            assert!(kind.as_str().ends_with("Error"), "{:?}", kind);
        }
    }
}
