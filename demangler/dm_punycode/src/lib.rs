//! Punycode decoding for mangled identifiers.
//!
//! Identifiers containing non-ASCII characters are mangled as punycode
//! (RFC 3492) with two deviations from the IDNA flavour:
//!
//! - the delimiter between basic and encoded code points is `_`, not `-`;
//! - digit values 0..=25 are `a`..=`z` and 26..=35 are `A`..=`J`, so the
//!   encoded form stays a valid identifier.
//!
//! Only decoding is provided; the demangler never produces punycode.

use thiserror::Error;

const BASE: u32 = 36;
const TMIN: u32 = 1;
const TMAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 128;
const DELIMITER: u8 = b'_';

/// Reasons a punycode payload cannot be decoded.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PunycodeError {
    /// The basic (pre-delimiter) section contains a non-ASCII byte.
    #[error("non-ASCII byte {0:#04x} in basic code points")]
    NonBasicPrefix(u8),
    /// A byte outside `a-z` / `A-J` in the encoded section.
    #[error("invalid punycode digit {0:#04x}")]
    InvalidDigit(u8),
    /// The input ended in the middle of a variable-length integer.
    #[error("punycode input ends inside a delta")]
    Truncated,
    /// A delta or code point does not fit in 32 bits.
    #[error("punycode delta overflows")]
    Overflow,
    /// A decoded value is a basic code point, a surrogate, or past U+10FFFF.
    #[error("decoded code point {0:#x} is not a valid non-basic scalar")]
    InvalidCodePoint(u32),
}

/// Maps a byte to its digit value in the mangling alphabet.
fn digit_value(byte: u8) -> Option<u32> {
    match byte {
        b'a'..=b'z' => Some(u32::from(byte - b'a')),
        b'A'..=b'J' => Some(u32::from(byte - b'A') + 26),
        _ => None,
    }
}

/// Bias adaptation function (RFC 3492 section 6.1).
fn adapt(delta: u32, num_points: u32, first_time: bool) -> u32 {
    let mut delta = if first_time { delta / DAMP } else { delta / 2 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - TMIN) * TMAX) / 2 {
        delta /= BASE - TMIN;
        k += BASE;
    }
    k + ((BASE - TMIN + 1) * delta) / (delta + SKEW)
}

/// Decode a punycode payload into its code points.
pub fn decode(input: &[u8]) -> Result<Vec<char>, PunycodeError> {
    let mut output: Vec<char> = Vec::with_capacity(input.len());

    // Everything before the last delimiter is literal ASCII.
    let encoded = match input.iter().rposition(|&b| b == DELIMITER) {
        Some(split) => {
            for &b in &input[..split] {
                if !b.is_ascii() {
                    return Err(PunycodeError::NonBasicPrefix(b));
                }
                output.push(char::from(b));
            }
            &input[split + 1..]
        }
        None => input,
    };

    let mut n = INITIAL_N;
    let mut i: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut rest = encoded.iter();

    while !rest.as_slice().is_empty() {
        let old_i = i;
        let mut w: u32 = 1;
        let mut k = BASE;
        loop {
            let &byte = rest.next().ok_or(PunycodeError::Truncated)?;
            let digit = digit_value(byte).ok_or(PunycodeError::InvalidDigit(byte))?;
            i = digit
                .checked_mul(w)
                .and_then(|step| i.checked_add(step))
                .ok_or(PunycodeError::Overflow)?;
            let t = if k <= bias {
                TMIN
            } else if k >= bias + TMAX {
                TMAX
            } else {
                k - bias
            };
            if digit < t {
                break;
            }
            w = w.checked_mul(BASE - t).ok_or(PunycodeError::Overflow)?;
            k += BASE;
        }

        let len = u32::try_from(output.len() + 1).map_err(|_| PunycodeError::Overflow)?;
        bias = adapt(i - old_i, len, old_i == 0);
        n = n.checked_add(i / len).ok_or(PunycodeError::Overflow)?;
        i %= len;

        if n < INITIAL_N {
            return Err(PunycodeError::InvalidCodePoint(n));
        }
        let ch = char::from_u32(n).ok_or(PunycodeError::InvalidCodePoint(n))?;
        output.insert(i as usize, ch);
        i += 1;
    }

    Ok(output)
}

/// Decode a punycode payload into a UTF-8 string.
pub fn decode_utf8(input: &[u8]) -> Result<String, PunycodeError> {
    decode(input).map(|chars| chars.into_iter().collect())
}
