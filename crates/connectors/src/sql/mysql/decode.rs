use model::core::value::Value;
use model::records::row::Row;

/// Converts a driver row into positional values.
pub fn to_row(row: mysql_async::Row) -> Row {
    // Row::unwrap hands over every value; it only panics after a take(),
    // which never happens here.
    Row::new(row.unwrap().into_iter().map(to_value).collect())
}

/// Maps a driver value onto the model's value space.
///
/// Text-like columns arrive as `Bytes`; anything that is valid UTF-8 becomes
/// a string, the rest stays raw and is re-encoded as a hex literal on write.
pub fn to_value(raw: mysql_async::Value) -> Value {
    match raw {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Int(v) => Value::Int(v),
        mysql_async::Value::UInt(v) => Value::Uint(v),
        mysql_async::Value::Float(v) => Value::Float(f64::from(v)),
        mysql_async::Value::Double(v) => Value::Float(v),
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Value::String(text),
            Err(err) => Value::Bytes(err.into_bytes()),
        },
        mysql_async::Value::Date(year, month, day, hour, minute, second, micros) => {
            date_value(year, month, day, hour, minute, second, micros)
        }
        mysql_async::Value::Time(negative, days, hours, minutes, seconds, micros) => {
            Value::String(time_literal(negative, days, hours, minutes, seconds, micros))
        }
    }
}

fn date_value(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    micros: u32,
) -> Value {
    let date =
        match chrono::NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day)) {
            Some(date) => date,
            // Zero dates and the like survive as literals MySQL will accept back.
            None => {
                return Value::String(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}"
                ));
            }
        };

    if hour == 0 && minute == 0 && second == 0 && micros == 0 {
        return Value::Date(date);
    }

    match chrono::NaiveTime::from_hms_micro_opt(
        u32::from(hour),
        u32::from(minute),
        u32::from(second),
        micros,
    ) {
        Some(time) => Value::Timestamp(chrono::NaiveDateTime::new(date, time)),
        None => Value::String(format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}"
        )),
    }
}

fn time_literal(
    negative: bool,
    days: u32,
    hours: u8,
    minutes: u8,
    seconds: u8,
    micros: u32,
) -> String {
    let sign = if negative { "-" } else { "" };
    // MySQL TIME spans more than a day; fold days into the hour field.
    let total_hours = days * 24 + u32::from(hours);
    if micros == 0 {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    #[test]
    fn test_numeric_variants() {
        assert_eq!(to_value(mysql_async::Value::Int(-5)), Value::Int(-5));
        assert_eq!(to_value(mysql_async::Value::UInt(5)), Value::Uint(5));
        assert_eq!(to_value(mysql_async::Value::Double(2.5)), Value::Float(2.5));
        assert_eq!(to_value(mysql_async::Value::NULL), Value::Null);
    }

    #[test]
    fn test_utf8_bytes_become_string() {
        let raw = mysql_async::Value::Bytes(b"hello".to_vec());
        assert_eq!(to_value(raw), Value::String("hello".to_string()));
    }

    #[test]
    fn test_non_utf8_bytes_stay_raw() {
        let raw = mysql_async::Value::Bytes(vec![0xff, 0xfe]);
        assert_eq!(to_value(raw), Value::Bytes(vec![0xff, 0xfe]));
    }

    #[test]
    fn test_midnight_date_decodes_as_date() {
        let raw = mysql_async::Value::Date(2024, 3, 9, 0, 0, 0, 0);
        assert_eq!(
            to_value(raw),
            Value::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
        );
    }

    #[test]
    fn test_date_with_time_decodes_as_timestamp() {
        let raw = mysql_async::Value::Date(2024, 3, 9, 13, 5, 2, 250);
        let expected = NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            NaiveTime::from_hms_micro_opt(13, 5, 2, 250).unwrap(),
        );
        assert_eq!(to_value(raw), Value::Timestamp(expected));
    }

    #[test]
    fn test_invalid_date_falls_back_to_literal() {
        let raw = mysql_async::Value::Date(0, 0, 0, 0, 0, 0, 0);
        assert_eq!(
            to_value(raw),
            Value::String("0000-00-00 00:00:00.000000".to_string())
        );
    }

    #[test]
    fn test_time_folds_days_into_hours() {
        let raw = mysql_async::Value::Time(false, 1, 2, 30, 0, 0);
        assert_eq!(to_value(raw), Value::String("26:30:00".to_string()));

        let raw = mysql_async::Value::Time(true, 0, 5, 0, 1, 500);
        assert_eq!(to_value(raw), Value::String("-05:00:01.000500".to_string()));
    }

}
