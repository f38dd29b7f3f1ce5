//! Addressing a single entry of an object or array.

use bstr::ByteSlice;

use crate::{Error, HostValue};

/// One step into a container: a key for objects, a position for arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// An object key.
    Key(&'a str),
    /// An array position.
    ///
    /// May be negative; negative positions never address an element.
    Index(i64),
}

impl<'a> Segment<'a> {
    /// Derives a segment from a host argument.
    ///
    /// Empty text addresses nothing and yields `Ok(None)`. Reals and
    /// decimals are not segments.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedSegment`] for reals and decimals,
    /// [`Error::InvalidText`] for text that is not UTF-8.
    pub fn from_host(value: HostValue<'a>) -> Result<Option<Self>, Error> {
        match value {
            HostValue::Text([]) => Ok(None),
            HostValue::Text(bytes) => Ok(Some(Segment::Key(bytes.to_str()?))),
            HostValue::Integer(n) => Ok(Some(Segment::Index(n))),
            HostValue::Real(_) | HostValue::Decimal(_) => {
                Err(Error::UnsupportedSegment(value.kind()))
            }
        }
    }

    /// The position as an array offset, if it can be one.
    pub(crate) fn offset(index: i64) -> Option<usize> {
        usize::try_from(index).ok()
    }
}

impl core::fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "key={k}"),
            Segment::Index(i) => write!(f, "position={i}"),
        }
    }
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(key: &'a str) -> Self {
        Segment::Key(key)
    }
}

impl From<i64> for Segment<'_> {
    fn from(index: i64) -> Self {
        Segment::Index(index)
    }
}
