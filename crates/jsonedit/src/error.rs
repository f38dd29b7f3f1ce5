//! Error types.

use std::collections::TryReserveError;

use thiserror::Error;

/// A malformed JSON document, located by 1-based line and column.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParseError {
    pub(crate) source: SyntaxError,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based column (in characters) of the offending byte.
    pub column: usize,
    /// Byte offset of the offending byte.
    pub offset: usize,
}

impl ParseError {
    /// The syntax error that stopped the loader.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxError {
        &self.source
    }
}

/// Why the loader rejected a document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntaxError {
    /// A character that cannot start or continue the current token.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A byte that does not begin a UTF-8 character.
    #[error("invalid byte 0x{0:02X}")]
    InvalidByte(u8),
    /// A backslash followed by something other than a JSON escape.
    #[error("invalid escape '\\{0}'")]
    InvalidEscape(char),
    /// A `\u` escape naming a lone or mismatched surrogate.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// A raw byte below 0x20 inside a string literal.
    #[error("control character 0x{0:02X} in string")]
    ControlCharacterInString(u8),
    /// Malformed UTF-8 inside a string literal.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// An integer outside the `i64` range.
    #[error("too big integer")]
    IntegerOverflow,
    /// A real too large to be finite.
    #[error("real number overflow")]
    RealOverflow,
    /// Arrays and objects nested deeper than the configured limit.
    #[error("maximum nesting depth of {0} exceeded")]
    DepthLimitExceeded(usize),
    /// Non-whitespace after the value where none is allowed.
    #[error("trailing characters after JSON value")]
    TrailingCharacters,
    /// The input ended inside a value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// Everything that can go wrong while running one operation.
///
/// Absent keys and out-of-range indices are not errors for `get`; the
/// operations report them as "no value" instead. `Range` only escapes from
/// `set`.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument or document has the wrong kind for the operation.
    #[error("{0}")]
    TypeMismatch(String),
    /// Argument 0 is not valid JSON.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// An array position outside the array.
    #[error("index {index} out of range for array of length {len}")]
    Range {
        /// The requested position.
        index: i64,
        /// Length of the array it was applied to.
        len: usize,
    },
    /// A segment that cannot address this container.
    #[error("unsupported <key|position> value: {0}")]
    UnsupportedSegment(&'static str),
    /// A buffer could not grow.
    #[error("not enough memory: {0}")]
    Allocation(#[from] TryReserveError),
    /// A key or text argument that is not UTF-8.
    #[error("argument is not valid UTF-8: {0}")]
    InvalidText(#[from] bstr::Utf8Error),
    /// A host value with no JSON form.
    #[error("could not convert {0} to a JSON value")]
    Unconvertible(&'static str),
}
