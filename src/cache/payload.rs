//! Payload Module
//!
//! The tagged value type accepted by `store` and the converters applied on
//! the way back out.

use std::fmt;

use crate::error::Result;

// == Payload ==
/// A value handed to the cache.
///
/// Everything is written to the store as bytes: text as UTF-8, integers as
/// base-10 ASCII digits, bytes as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
}

impl Payload {
    /// Returns the wire encoding of the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Payload::Text(text) => text.as_bytes().to_vec(),
            Payload::Bytes(bytes) => bytes.clone(),
            Payload::Integer(n) => n.to_string().into_bytes(),
        }
    }

    /// Consumes the payload, returning its wire encoding.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text(text) => text.into_bytes(),
            Payload::Bytes(bytes) => bytes,
            Payload::Integer(n) => n.to_string().into_bytes(),
        }
    }
}

/// Literal form used in call-history records: `"text"`, `b"bytes"`, `42`.
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => write!(f, "{:?}", text),
            Payload::Bytes(bytes) => write!(f, "b\"{}\"", bytes.escape_ascii()),
            Payload::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Bytes(value)
    }
}

impl From<&[u8]> for Payload {
    fn from(value: &[u8]) -> Self {
        Payload::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Payload {
    fn from(value: &[u8; N]) -> Self {
        Payload::Bytes(value.to_vec())
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Integer(value)
    }
}

// == Converter ==
/// How a raw value read from the store is turned into a `Payload`.
#[derive(Debug, Clone, Copy, Default)]
pub enum Converter {
    /// Return the stored bytes unmodified.
    #[default]
    Raw,
    /// Decode the bytes as UTF-8 text.
    Text,
    /// Parse the bytes as a base-10 integer.
    Integer,
    /// Apply a caller-supplied conversion.
    Custom(fn(Vec<u8>) -> Result<Payload>),
}

impl Converter {
    /// Applies the conversion to a raw value.
    pub fn apply(self, raw: Vec<u8>) -> Result<Payload> {
        match self {
            Converter::Raw => Ok(Payload::Bytes(raw)),
            Converter::Text => decode_text(raw).map(Payload::Text),
            Converter::Integer => parse_integer(raw).map(Payload::Integer),
            Converter::Custom(f) => f(raw),
        }
    }
}

/// Decodes a raw value as UTF-8 text.
pub fn decode_text(raw: Vec<u8>) -> Result<String> {
    Ok(String::from_utf8(raw)?)
}

/// Parses a raw value as a base-10 integer, ignoring surrounding whitespace.
///
/// Values outside the `i64` range are rejected as `InvalidInteger`.
pub fn parse_integer(raw: Vec<u8>) -> Result<i64> {
    let text = decode_text(raw)?;
    Ok(text.trim().parse::<i64>()?)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_wire_encoding() {
        assert_eq!(Payload::from("hello").to_bytes(), b"hello");
        assert_eq!(Payload::from(b"\x00\xff").to_bytes(), vec![0x00, 0xff]);
        assert_eq!(Payload::from(-42i64).to_bytes(), b"-42");
        assert_eq!(Payload::from(7i64).into_bytes(), b"7");
    }

    #[test]
    fn test_display_literal_form() {
        assert_eq!(Payload::from("foo").to_string(), "\"foo\"");
        assert_eq!(Payload::from("say \"hi\"").to_string(), "\"say \\\"hi\\\"\"");
        assert_eq!(Payload::from(b"bar").to_string(), "b\"bar\"");
        assert_eq!(Payload::from(b"\x00\xff").to_string(), "b\"\\x00\\xff\"");
        assert_eq!(Payload::from(42i64).to_string(), "42");
    }

    #[test]
    fn test_converter_raw() {
        let result = Converter::Raw.apply(b"hello".to_vec()).unwrap();
        assert_eq!(result, Payload::Bytes(b"hello".to_vec()));
    }

    #[test]
    fn test_converter_text() {
        let result = Converter::Text.apply(b"hello".to_vec()).unwrap();
        assert_eq!(result, Payload::Text("hello".to_string()));

        let result = Converter::Text.apply(vec![0xff, 0xfe]);
        assert!(matches!(result, Err(CacheError::InvalidUtf8(_))));
    }

    #[test]
    fn test_converter_integer() {
        assert_eq!(Converter::Integer.apply(b"42".to_vec()).unwrap(), Payload::Integer(42));
        assert_eq!(Converter::Integer.apply(b" -7\n".to_vec()).unwrap(), Payload::Integer(-7));

        let result = Converter::Integer.apply(b"forty-two".to_vec());
        assert!(matches!(result, Err(CacheError::InvalidInteger(_))));

        let result = parse_integer(b"9223372036854775808".to_vec());
        assert!(matches!(result, Err(CacheError::InvalidInteger(_))));
    }

    #[test]
    fn test_converter_custom() {
        fn byte_len(raw: Vec<u8>) -> Result<Payload> {
            Ok(Payload::Integer(raw.len() as i64))
        }

        let result = Converter::Custom(byte_len).apply(b"four".to_vec()).unwrap();
        assert_eq!(result, Payload::Integer(4));
    }

    #[test]
    fn test_converter_custom_error() {
        fn reject(_: Vec<u8>) -> Result<Payload> {
            Err(CacheError::Conversion("rejected".to_string()))
        }

        let result = Converter::Custom(reject).apply(b"x".to_vec());
        assert!(matches!(result, Err(CacheError::Conversion(_))));
    }
}
