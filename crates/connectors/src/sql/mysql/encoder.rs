use crate::sql::encoder::ValueEncoder;
use model::core::value::Value;
use std::fmt::Write;

/// Encodes values as MySQL literals.
pub struct MySqlLiteralEncoder;

impl MySqlLiteralEncoder {
    pub fn new() -> Self {
        Self
    }

    fn encode_string(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for ch in value.chars() {
            match ch {
                '\'' => out.push_str("\\'"),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\0' => out.push_str("\\0"),
                '\x1a' => out.push_str("\\Z"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
        out
    }

    fn encode_bytes(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(2 + bytes.len() * 2);
        out.push_str("0x");
        for byte in bytes {
            write!(&mut out, "{:02x}", byte).expect("failed to format hex byte");
        }
        out
    }
}

impl ValueEncoder for MySqlLiteralEncoder {
    fn encode_value(&self, value: &Value) -> String {
        match value {
            Value::Int(v) => v.to_string(),
            Value::Uint(v) => v.to_string(),
            Value::Float(v) => ryu::Buffer::new().format(*v).to_string(),
            Value::String(v) => self.encode_string(v),
            Value::Boolean(v) => (if *v { "1" } else { "0" }).to_string(),
            Value::Bytes(v) => self.encode_bytes(v),
            Value::Date(v) => format!("'{}'", v.format("%Y-%m-%d")),
            Value::Timestamp(v) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S%.6f")),
            Value::Null => self.encode_null(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    #[test]
    fn test_encode_numbers() {
        let encoder = MySqlLiteralEncoder::new();
        assert_eq!(encoder.encode(&Value::Int(-42)), "-42");
        assert_eq!(encoder.encode(&Value::Uint(42)), "42");
        assert_eq!(encoder.encode(&Value::Float(1.5)), "1.5");
    }

    #[test]
    fn test_encode_string_escapes() {
        let encoder = MySqlLiteralEncoder::new();
        assert_eq!(
            encoder.encode(&Value::String("it's a \\ test\n".to_string())),
            "'it\\'s a \\\\ test\\n'"
        );
    }

    #[test]
    fn test_encode_boolean_as_tinyint() {
        let encoder = MySqlLiteralEncoder::new();
        assert_eq!(encoder.encode(&Value::Boolean(true)), "1");
        assert_eq!(encoder.encode(&Value::Boolean(false)), "0");
    }

    #[test]
    fn test_encode_bytes_as_hex() {
        let encoder = MySqlLiteralEncoder::new();
        assert_eq!(
            encoder.encode(&Value::Bytes(vec![0x00, 0xff, 0x10])),
            "0x00ff10"
        );
    }

    #[test]
    fn test_encode_temporals() {
        let encoder = MySqlLiteralEncoder::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(encoder.encode(&Value::Date(date)), "'2024-03-09'");

        let ts = NaiveDateTime::new(
            date,
            chrono::NaiveTime::from_hms_micro_opt(13, 5, 2, 250).unwrap(),
        );
        assert_eq!(
            encoder.encode(&Value::Timestamp(ts)),
            "'2024-03-09 13:05:02.000250'"
        );
    }

    #[test]
    fn test_encode_routes_null() {
        let encoder = MySqlLiteralEncoder::new();
        assert_eq!(encoder.encode(&Value::Null), "NULL");
    }
}
