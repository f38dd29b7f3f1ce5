//! Read access to one container level.

use crate::{Error, Segment, Value};

/// Resolves one segment against `container`.
///
/// A missing key or an index outside `0..len` is `Ok(None)`. Addressing an
/// object by position, or anything other than an object by key, is a
/// [`Error::TypeMismatch`].
///
/// ```
/// use jsonedit::{Segment, Value, accessor, loader};
///
/// let doc = loader::load(br#"{"a":[10,20]}"#).unwrap();
/// let a = accessor::get(&doc, &Segment::Key("a")).unwrap().unwrap();
/// assert_eq!(accessor::get(a, &Segment::Index(1)).unwrap(), Some(&Value::Integer(20)));
/// assert_eq!(accessor::get(a, &Segment::Index(-1)).unwrap(), None);
/// ```
pub fn get<'v>(
    container: &'v Value,
    segment: &Segment<'_>,
) -> Result<Option<&'v Value>, Error> {
    match (container, segment) {
        (Value::Object(map), Segment::Key(key)) => Ok(map.get(key)),
        (Value::Array(items), Segment::Index(index)) => {
            Ok(Segment::offset(*index).and_then(|i| items.get(i)))
        }
        (other, segment) => Err(mismatch(segment, other)),
    }
}

pub(crate) fn mismatch(segment: &Segment<'_>, container: &Value) -> Error {
    Error::TypeMismatch(format!(
        "received {segment}, but json is {}",
        with_article(container.kind())
    ))
}

fn with_article(kind: &str) -> String {
    match kind.as_bytes().first() {
        Some(b'a' | b'e' | b'i' | b'o' | b'u') => format!("an {kind}"),
        _ => format!("a {kind}"),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::loader::load;

    fn doc(text: &str) -> Value {
        load(text.as_bytes()).unwrap()
    }

    #[rstest]
    #[case(r#"{"a":1,"b":2}"#, Segment::Key("b"), Some(Value::Integer(2)))]
    #[case(r#"{"a":1}"#, Segment::Key("z"), None)]
    #[case(r#"{"a":null}"#, Segment::Key("a"), Some(Value::Null))]
    #[case("[1,2,3]", Segment::Index(0), Some(Value::Integer(1)))]
    #[case("[1,2,3]", Segment::Index(2), Some(Value::Integer(3)))]
    #[case("[1,2,3]", Segment::Index(3), None)]
    #[case("[1,2,3]", Segment::Index(5), None)]
    #[case("[1,2,3]", Segment::Index(-1), None)]
    #[case("[]", Segment::Index(0), None)]
    fn resolves(#[case] text: &str, #[case] segment: Segment<'_>, #[case] expected: Option<Value>) {
        assert_eq!(get(&doc(text), &segment).unwrap(), expected.as_ref());
    }

    #[rstest]
    #[case("[1]", Segment::Key("a"), "received key=a, but json is an array")]
    #[case(r#"{"a":1}"#, Segment::Index(0), "received position=0, but json is an object")]
    #[case("5", Segment::Key("a"), "received key=a, but json is an integer")]
    #[case(r#""s""#, Segment::Index(0), "received position=0, but json is a string")]
    fn mismatches(#[case] text: &str, #[case] segment: Segment<'_>, #[case] message: &str) {
        let err = get(&doc(text), &segment).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
        assert_eq!(err.to_string(), message);
    }
}
