//! In-place edits of one container level.
//!
//! Every function either applies completely or leaves the container as it
//! found it.

use crate::{Error, Segment, Value, accessor::mismatch, host::owned};

/// Stores `value` at `segment`.
///
/// Objects: an existing key is replaced where it stands, a new key is added
/// last. Arrays: the index must already exist; arrays never grow here.
pub fn set(container: &mut Value, segment: &Segment<'_>, value: Value) -> Result<(), Error> {
    match (container, segment) {
        (Value::Object(map), Segment::Key(key)) => {
            if let Some(slot) = map.get_mut(key) {
                *slot = value;
            } else {
                map.insert(owned(key)?, value);
            }
            Ok(())
        }
        (Value::Array(items), Segment::Index(index)) => {
            let len = items.len();
            let slot = Segment::offset(*index)
                .and_then(|i| items.get_mut(i))
                .ok_or(Error::Range { index: *index, len })?;
            *slot = value;
            Ok(())
        }
        (other, segment) => Err(mismatch(segment, other)),
    }
}

/// Removes the entry at `segment` and returns it.
///
/// Removing a key an object does not have is a successful no-op
/// (`Ok(None)`). Array elements after the removed one shift down by one; an
/// index outside the array is [`Error::Range`]. A key cannot select array
/// elements and is [`Error::UnsupportedSegment`].
pub fn unset(container: &mut Value, segment: &Segment<'_>) -> Result<Option<Value>, Error> {
    match (container, segment) {
        (Value::Object(map), Segment::Key(key)) => Ok(map.remove(key)),
        (Value::Array(items), Segment::Index(index)) => match Segment::offset(*index) {
            Some(i) if i < items.len() => Ok(Some(items.remove(i))),
            _ => Err(Error::Range {
                index: *index,
                len: items.len(),
            }),
        },
        (Value::Array(_), Segment::Key(_)) => {
            Err(Error::UnsupportedSegment("key against an array"))
        }
        (other, segment) => Err(mismatch(segment, other)),
    }
}

/// Pushes `value` as the new last element of an array.
pub fn append(container: &mut Value, value: Value) -> Result<(), Error> {
    match container {
        Value::Array(items) => {
            items.try_reserve(1)?;
            items.push(value);
            Ok(())
        }
        other => Err(Error::TypeMismatch(format!("'{other}' is not a JSON array"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load;

    fn doc(text: &str) -> Value {
        load(text.as_bytes()).unwrap()
    }

    #[test]
    fn set_replaces_key_in_place() {
        let mut v = doc(r#"{"a":1,"b":2,"c":3}"#);
        set(&mut v, &Segment::Key("b"), Value::from("x")).unwrap();
        assert_eq!(v.to_string(), r#"{"a":1,"b":"x","c":3}"#);
    }

    #[test]
    fn set_appends_new_key() {
        let mut v = doc(r#"{"b":1,"a":2}"#);
        set(&mut v, &Segment::Key("0"), Value::Integer(3)).unwrap();
        assert_eq!(v.to_string(), r#"{"b":1,"a":2,"0":3}"#);
    }

    #[test]
    fn set_array_index() {
        let mut v = doc("[1,2,3]");
        set(&mut v, &Segment::Index(1), Value::Null).unwrap();
        assert_eq!(v.to_string(), "[1,null,3]");
    }

    #[test]
    fn set_out_of_range_leaves_array_unchanged() {
        let mut v = doc("[1,2,3]");
        for index in [3, 10, -1] {
            let err = set(&mut v, &Segment::Index(index), Value::Null).unwrap_err();
            assert!(matches!(err, Error::Range { len: 3, .. }));
        }
        assert_eq!(v.to_string(), "[1,2,3]");
    }

    #[test]
    fn set_mismatch() {
        let mut v = doc("[1]");
        assert!(matches!(
            set(&mut v, &Segment::Key("a"), Value::Null),
            Err(Error::TypeMismatch(_))
        ));
        let mut v = doc("{}");
        assert!(matches!(
            set(&mut v, &Segment::Index(0), Value::Null),
            Err(Error::TypeMismatch(_))
        ));
    }

    #[test]
    fn unset_object_keys() {
        let mut v = doc(r#"{"a":1,"b":2,"c":3}"#);
        assert_eq!(unset(&mut v, &Segment::Key("b")).unwrap(), Some(Value::Integer(2)));
        assert_eq!(unset(&mut v, &Segment::Key("b")).unwrap(), None);
        assert_eq!(v.to_string(), r#"{"a":1,"c":3}"#);
    }

    #[test]
    fn unset_array_shifts_left() {
        let mut v = doc("[1,2,3]");
        assert_eq!(unset(&mut v, &Segment::Index(0)).unwrap(), Some(Value::Integer(1)));
        assert_eq!(v.to_string(), "[2,3]");
        assert!(matches!(
            unset(&mut v, &Segment::Index(2)),
            Err(Error::Range { index: 2, len: 2 })
        ));
        assert!(matches!(unset(&mut v, &Segment::Index(-1)), Err(Error::Range { .. })));
        assert_eq!(v.to_string(), "[2,3]");
    }

    #[test]
    fn unset_key_on_array_is_unsupported() {
        let mut v = doc(r#"["a","b"]"#);
        assert!(matches!(
            unset(&mut v, &Segment::Key("a")),
            Err(Error::UnsupportedSegment(_))
        ));
        assert_eq!(v.to_string(), r#"["a","b"]"#);
    }

    #[test]
    fn append_grows_by_one() {
        let mut v = doc("[1,2]");
        append(&mut v, Value::from("x")).unwrap();
        assert_eq!(v.to_string(), r#"[1,2,"x"]"#);
    }

    #[test]
    fn append_requires_an_array() {
        let mut v = doc(r#"{"a":1}"#);
        let err = append(&mut v, Value::Integer(1)).unwrap_err();
        assert_eq!(err.to_string(), r#"'{"a":1}' is not a JSON array"#);
    }
}
