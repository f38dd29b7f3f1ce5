//! Single-level JSON accessors and mutators for host-embedded functions.
//!
//! A host (typically a database calling user-defined functions) passes each
//! argument as a tagged scalar: length-delimited text, an integer, a real, or
//! a decimal in textual form. [`Context`] turns those arguments into five
//! operations on the JSON document held in argument 0: `size`, `get`, `set`,
//! `unset` and `append`, plus a `config` operation for session options.
//!
//! Every call loads its document, works on one level of it, renders the
//! result as flat host text and drops everything it allocated.

mod error;
mod map;
mod options;
mod segment;
mod value;

pub mod accessor;
pub mod context;
pub mod host;
pub mod loader;
pub mod mutator;
pub mod operation;

#[cfg(test)]
mod tests;

pub use context::{Context, NOT_SIZED};
pub use error::{Error, ParseError, SyntaxError};
pub use host::{Coercion, HostArg, HostArgFrom, HostValue};
pub use operation::{ArityError, Operation};
pub use options::{Options, RealFormat};
pub use segment::Segment;
pub use value::{Array, Map, Value};

#[doc(hidden)]
pub use std::vec;

/// Macro to build a `Vec<HostArg>` from a heterogeneous list of text,
/// integers, reals and explicit [`HostArg`]s.
///
/// ```rust
/// use jsonedit::{HostArg, HostValue, args};
///
/// let none: HostArg = None;
/// let a = args![r#"{"a":1}"#, 2, 1.5, none];
/// assert_eq!(
///     a,
///     vec![
///         Some(HostValue::Text(br#"{"a":1}"#)),
///         Some(HostValue::Integer(2)),
///         Some(HostValue::Real(1.5)),
///         None,
///     ]
/// );
/// ```
#[macro_export]
macro_rules! args {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::HostArgFrom;
        $crate::vec![$(<$crate::HostArg<'_> as HostArgFrom<_>>::from_host_arg($elem)),*]
    }};
}
