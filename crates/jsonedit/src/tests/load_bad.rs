use rstest::rstest;

use crate::{ParseError, SyntaxError, loader::load};

fn assert_err_contains(err: &ParseError, expected_sub: &str, line: usize, col: usize) {
    let s = err.to_string();
    assert!(s.contains(expected_sub), "expected substring {expected_sub:?} in {s:?}");
    assert_eq!(err.line, line, "line of {s:?}");
    assert_eq!(err.column, col, "column of {s:?}");
}

#[rstest]
#[case::empty("", "unexpected end of input", 1, 1)]
#[case::only_whitespace("  \n ", "unexpected end of input", 2, 2)]
#[case::bare_word("bad", "invalid character 'b'", 1, 1)]
#[case::unquoted_key("{bad", "invalid character 'b'", 1, 2)]
#[case::missing_colon(r#"{"a" 1}"#, "invalid character '1'", 1, 6)]
#[case::trailing_comma_object(r#"{"a":1,}"#, "invalid character '}'", 1, 8)]
#[case::trailing_comma_array("[1,]", "invalid character ']'", 1, 4)]
#[case::unclosed_array("[1,2", "unexpected end of input", 1, 5)]
#[case::unclosed_string(r#"["abc"#, "unexpected end of input", 1, 6)]
#[case::bad_literal("[tru]", "invalid character ']'", 1, 5)]
#[case::second_line("[1,\n 2,\n x]", "invalid character 'x'", 3, 2)]
#[case::comment("/", "invalid character '/'", 1, 1)]
#[case::sign_without_digits("-a", "invalid character 'a'", 1, 2)]
#[case::fraction_without_digits("1.x", "invalid character 'x'", 1, 3)]
#[case::exponent_without_digits("1e-a", "invalid character 'a'", 1, 4)]
#[case::leading_plus("+1", "invalid character '+'", 1, 1)]
#[case::single_quotes("['a']", "invalid character '''", 1, 2)]
#[case::raw_newline_in_string("\"a\nb\"", "control character 0x0A in string", 1, 3)]
#[case::bad_escape(r#""\x""#, "invalid escape '\\x'", 1, 3)]
#[case::short_unicode_escape(r#""\u12""#, "invalid character '\"'", 1, 6)]
#[case::lone_low_surrogate(r#""\udc00""#, "invalid unicode escape sequence \\uDC00", 1, 2)]
#[case::unpaired_high_surrogate(r#""\ud800x""#, "invalid unicode escape sequence \\uD800", 1, 2)]
#[case::integer_overflow("[9223372036854775808]", "too big integer", 1, 2)]
#[case::real_overflow("1e400", "real number overflow", 1, 1)]
#[case::non_ascii_outside_string("[é]", "invalid character 'é'", 1, 2)]
fn reports_position(
    #[case] text: &str,
    #[case] message: &str,
    #[case] line: usize,
    #[case] col: usize,
) {
    let err = load(text.as_bytes()).unwrap_err();
    assert_err_contains(&err, message, line, col);
}

#[test]
fn invalid_utf8_in_string() {
    let err = load(b"[\"ab\xFF\"]").unwrap_err();
    assert_eq!(err.syntax(), &SyntaxError::InvalidUtf8);
    assert_eq!((err.line, err.column, err.offset), (1, 5, 4));
}

#[test]
fn invalid_byte_outside_string() {
    let err = load(b"\xFE").unwrap_err();
    assert_eq!(err.syntax(), &SyntaxError::InvalidByte(0xFE));
}

#[test]
fn message_format() {
    let err = load(b"{\n  \"a\": tru }").unwrap_err();
    insta::assert_snapshot!(err, @"invalid character ' ' at 2:11");
}
