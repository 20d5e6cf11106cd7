use pretty_assertions::assert_eq;

use super::{Cursor, SENTINEL};

// === Peeking ===

#[test]
fn peek_returns_first_byte() {
    let cursor = Cursor::new("_T");
    assert_eq!(cursor.peek(), b'_');
    assert_eq!(cursor.pos(), 0);
}

#[test]
fn peek_on_empty_returns_sentinel() {
    let cursor = Cursor::new("");
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), SENTINEL);
}

#[test]
fn peek_at_reads_ahead_without_consuming() {
    let cursor = Cursor::new("abc");
    assert_eq!(cursor.peek_at(1), b'b');
    assert_eq!(cursor.peek_at(2), b'c');
    assert_eq!(cursor.peek_at(3), SENTINEL);
    assert_eq!(cursor.peek_at(usize::MAX), SENTINEL);
    assert_eq!(cursor.remaining(), 3);
}

#[test]
fn at_digit_checks_next_byte() {
    assert!(Cursor::new("7x").at_digit());
    assert!(!Cursor::new("x7").at_digit());
    assert!(!Cursor::new("").at_digit());
}

// === Consuming single bytes ===

#[test]
fn next_byte_advances() {
    let mut cursor = Cursor::new("ab");
    assert_eq!(cursor.next_byte(), b'a');
    assert_eq!(cursor.next_byte(), b'b');
    assert!(cursor.is_eof());
}

#[test]
fn next_byte_at_eof_does_not_advance() {
    let mut cursor = Cursor::new("a");
    cursor.next_byte();
    assert_eq!(cursor.next_byte(), SENTINEL);
    assert_eq!(cursor.pos(), 1);
}

#[test]
fn eat_consumes_only_on_match() {
    let mut cursor = Cursor::new("Sa");
    assert!(!cursor.eat(b'a'));
    assert_eq!(cursor.pos(), 0);
    assert!(cursor.eat(b'S'));
    assert!(cursor.eat(b'a'));
    assert!(cursor.is_eof());
}

#[test]
fn eat_sentinel_never_matches_at_eof() {
    let mut cursor = Cursor::new("");
    assert!(!cursor.eat(SENTINEL));
}

// === Literals ===

#[test]
fn eat_str_matches_whole_literal() {
    let mut cursor = Cursor::new("_TTSg5");
    assert!(cursor.eat_str("_TTS"));
    assert_eq!(cursor.rest(), b"g5");
}

#[test]
fn eat_str_partial_match_consumes_nothing() {
    let mut cursor = Cursor::new("_TX");
    assert!(!cursor.eat_str("_TTS"));
    assert_eq!(cursor.pos(), 0);
}

#[test]
fn eat_str_longer_than_input_fails() {
    let mut cursor = Cursor::new("_");
    assert!(!cursor.eat_str("_T"));
    assert_eq!(cursor.remaining(), 1);
}

// === Fixed-length and remainder ===

#[test]
fn take_returns_exact_bytes() {
    let mut cursor = Cursor::new("3foo_");
    cursor.next_byte();
    assert_eq!(cursor.take(3), Some(&b"foo"[..]));
    assert_eq!(cursor.peek(), b'_');
}

#[test]
fn take_too_many_consumes_nothing() {
    let mut cursor = Cursor::new("ab");
    assert_eq!(cursor.take(3), None);
    assert_eq!(cursor.pos(), 0);
    assert_eq!(cursor.take(2), Some(&b"ab"[..]));
    assert_eq!(cursor.take(0), Some(&b""[..]));
}

#[test]
fn take_rest_drains_input() {
    let mut cursor = Cursor::new("tail");
    cursor.next_byte();
    assert_eq!(cursor.take_rest(), b"ail");
    assert!(cursor.is_eof());
    assert_eq!(cursor.take_rest(), b"");
}

// === read_until ===

#[test]
fn read_until_stops_before_delimiter() {
    let mut cursor = Cursor::new("1234_rest");
    let (bytes, found) = cursor.read_until(b'_');
    assert_eq!(bytes, b"1234");
    assert!(found);
    assert_eq!(cursor.peek(), b'_');
}

#[test]
fn read_until_without_delimiter_drains() {
    let mut cursor = Cursor::new("1234");
    let (bytes, found) = cursor.read_until(b'_');
    assert_eq!(bytes, b"1234");
    assert!(!found);
    assert!(cursor.is_eof());
}

#[test]
fn read_until_immediate_delimiter_is_empty() {
    let mut cursor = Cursor::new("_x");
    let (bytes, found) = cursor.read_until(b'_');
    assert!(bytes.is_empty());
    assert!(found);
    assert_eq!(cursor.pos(), 0);
}

// === Non-UTF-8 input ===

#[test]
fn from_bytes_handles_invalid_utf8() {
    let mut cursor = Cursor::from_bytes(&[0xFF, 0x00, b'a']);
    assert_eq!(cursor.next_byte(), 0xFF);
    // Interior null peeks like the sentinel but is not EOF.
    assert_eq!(cursor.peek(), SENTINEL);
    assert!(!cursor.is_eof());
    assert!(cursor.eat(0x00));
    assert_eq!(cursor.next_byte(), b'a');
    assert!(cursor.is_eof());
}

mod proptest_cursor {
    use super::Cursor;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn consuming_never_moves_backwards(
            bytes in proptest::collection::vec(any::<u8>(), 0..64),
            ops in proptest::collection::vec(0u8..5, 0..32),
        ) {
            let mut cursor = Cursor::from_bytes(&bytes);
            for op in ops {
                let before = cursor.pos();
                match op {
                    0 => { cursor.next_byte(); }
                    1 => { cursor.eat(b'_'); }
                    2 => { cursor.take(3); }
                    3 => { cursor.read_until(b'_'); }
                    _ => { cursor.eat_str("_T"); }
                }
                prop_assert!(cursor.pos() >= before);
                prop_assert!(cursor.pos() <= bytes.len());
            }
        }
    }
}
