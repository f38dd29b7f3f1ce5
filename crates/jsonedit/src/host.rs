//! Conversions between host argument slots and JSON values.
//!
//! A host hands every argument over as one of four scalar kinds. Text and
//! decimal arguments arrive as length-delimited byte slices which are never
//! assumed to be null terminated; the slice length is the whole truth.

use bstr::ByteSlice;

use crate::{Error, Value, loader, options::RealFormat, value::write_real};

/// A present host argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostValue<'a> {
    /// Character data, exactly as many bytes as the host declared.
    Text(&'a [u8]),
    /// A 64-bit integer.
    Integer(i64),
    /// A double-precision real.
    Real(f64),
    /// A fixed-point decimal in its textual form, e.g. `12.3400`.
    Decimal(&'a [u8]),
}

/// One argument slot; `None` is the host's null.
pub type HostArg<'a> = Option<HostValue<'a>>;

impl HostValue<'_> {
    /// Name of the argument kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HostValue::Text(_) => "text",
            HostValue::Integer(_) => "integer",
            HostValue::Real(_) => "real",
            HostValue::Decimal(_) => "decimal",
        }
    }
}

impl core::fmt::Display for HostValue<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HostValue::Text(bytes) | HostValue::Decimal(bytes) => write!(f, "{}", bytes.as_bstr()),
            HostValue::Integer(n) => write!(f, "{n}"),
            HostValue::Real(n) => write!(f, "{n}"),
        }
    }
}

/// How text arguments become JSON values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Coercion {
    /// Text holding a JSON object or array is embedded as that structure;
    /// any other text becomes a JSON string.
    #[default]
    Structured,
    /// Text always becomes a JSON string.
    PrimitiveOnly,
}

/// Copies `text` into a freshly allocated string, reporting allocation
/// failure instead of aborting.
pub(crate) fn owned(text: &str) -> Result<String, Error> {
    let mut out = String::new();
    out.try_reserve_exact(text.len())?;
    out.push_str(text);
    Ok(out)
}

/// Materializes a text argument as an owned string of exactly its declared
/// length.
///
/// An empty slice counts as "no argument" and yields `Ok(None)`, not an
/// empty string.
///
/// ```
/// use jsonedit::host::materialize_text;
///
/// let buffer = b"key\0garbage";
/// assert_eq!(materialize_text(&buffer[..3]).unwrap().as_deref(), Some("key"));
/// assert_eq!(materialize_text(b"").unwrap(), None);
/// ```
pub fn materialize_text(bytes: &[u8]) -> Result<Option<String>, Error> {
    if bytes.is_empty() {
        return Ok(None);
    }
    owned(bytes.to_str()?).map(Some)
}

/// Converts a host scalar into a JSON value.
///
/// Text is first offered to the loader when `coercion` is
/// [`Coercion::Structured`]; only an object or array spanning the whole
/// argument is kept as structure. Decimals are read as their longest leading
/// floating-point prefix, independent of any locale.
pub fn host_scalar_to_json(
    value: HostValue<'_>,
    coercion: Coercion,
    max_depth: usize,
) -> Result<Value, Error> {
    match value {
        HostValue::Text(bytes) => {
            if coercion == Coercion::Structured {
                if let Ok(v @ (Value::Object(_) | Value::Array(_))) =
                    loader::load_exact(bytes, max_depth)
                {
                    return Ok(v);
                }
            }
            Ok(Value::String(owned(bytes.to_str()?)?))
        }
        HostValue::Integer(n) => Ok(Value::Integer(n)),
        HostValue::Real(n) => finite(n),
        HostValue::Decimal(bytes) => finite(parse_decimal(bytes)),
    }
}

fn finite(n: f64) -> Result<Value, Error> {
    if n.is_finite() {
        Ok(Value::Real(n))
    } else {
        Err(Error::Unconvertible("a non-finite real"))
    }
}

/// Reads the longest leading `[+-]digits[.digits][e[+-]digits]` prefix of
/// `bytes`, skipping leading whitespace. Yields `0.0` when there is none.
#[must_use]
pub fn parse_decimal(bytes: &[u8]) -> f64 {
    let bytes = bytes.trim_ascii_start();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut seen_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        seen_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !seen_digits {
        return 0.0;
    }
    if let Some(b'e' | b'E') = bytes.get(end) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    bytes[..end]
        .to_str()
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

/// Renders a JSON value as flat host text.
///
/// Objects and arrays become compact JSON, strings their raw content,
/// booleans `1`/`0`, reals per `real_format`. JSON null has no text form and
/// yields `None`, which the host sees as a null result.
///
/// ```
/// use jsonedit::{Value, host::json_to_host_text, RealFormat};
///
/// let text = |v: &Value| json_to_host_text(v, RealFormat::Fixed);
/// assert_eq!(text(&Value::String("hi".into())).as_deref(), Some("hi"));
/// assert_eq!(text(&Value::Real(1.5)).as_deref(), Some("1.500000"));
/// assert_eq!(text(&Value::Boolean(true)).as_deref(), Some("1"));
/// assert_eq!(text(&Value::Null), None);
/// ```
#[must_use]
pub fn json_to_host_text(value: &Value, real_format: RealFormat) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Integer(n) => Some(n.to_string()),
        Value::Real(n) => Some(format_real(*n, real_format)),
        Value::Boolean(b) => Some(if *b { "1" } else { "0" }.to_owned()),
        Value::Null => None,
    }
}

fn format_real(n: f64, real_format: RealFormat) -> String {
    match real_format {
        RealFormat::Fixed => format!("{n:.6}"),
        RealFormat::RoundTrip => {
            let mut out = String::new();
            // Writing into a String cannot fail.
            let _ = write_real(n, &mut out);
            out
        }
    }
}

#[doc(hidden)]
pub trait HostArgFrom<T> {
    /// Wraps `value` as a host argument.
    fn from_host_arg(value: T) -> Self;
}

macro_rules! impl_integer_as_host_arg {
    ($($t:ty),+) => {
        $(
            impl HostArgFrom<$t> for HostArg<'_> {
                fn from_host_arg(value: $t) -> Self {
                    Some(HostValue::Integer(i64::from(value)))
                }
            }
        )+
    };
}
impl_integer_as_host_arg!(i8, i16, i32, i64, u8, u16, u32);

impl HostArgFrom<f64> for HostArg<'_> {
    fn from_host_arg(value: f64) -> Self {
        Some(HostValue::Real(value))
    }
}

impl HostArgFrom<f32> for HostArg<'_> {
    fn from_host_arg(value: f32) -> Self {
        Some(HostValue::Real(f64::from(value)))
    }
}

impl<'a> HostArgFrom<&'a str> for HostArg<'a> {
    fn from_host_arg(value: &'a str) -> Self {
        Some(HostValue::Text(value.as_bytes()))
    }
}

impl<'a> HostArgFrom<&'a [u8]> for HostArg<'a> {
    fn from_host_arg(value: &'a [u8]) -> Self {
        Some(HostValue::Text(value))
    }
}

impl<'a> HostArgFrom<&'a String> for HostArg<'a> {
    fn from_host_arg(value: &'a String) -> Self {
        Some(HostValue::Text(value.as_bytes()))
    }
}

impl<'a> HostArgFrom<HostValue<'a>> for HostArg<'a> {
    fn from_host_arg(value: HostValue<'a>) -> Self {
        Some(value)
    }
}

impl<'a> HostArgFrom<HostArg<'a>> for HostArg<'a> {
    fn from_host_arg(value: HostArg<'a>) -> Self {
        value
    }
}
