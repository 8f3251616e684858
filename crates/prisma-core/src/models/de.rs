//! Lenient deserializers
//!
//! Rows exported from the reservation spreadsheet carry numbers and numeric
//! strings interchangeably (`"20"` vs `20`); these visitors accept both.

use serde::de::{self, Visitor};
use serde::Deserializer;
use std::fmt;

/// Deserialize an integer from either a number or a string
pub fn i64_from_any<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct I64OrStringVisitor;

    impl<'de> Visitor<'de> for I64OrStringVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(de::Error::custom)
        }

        fn visit_f64<E>(self, value: f64) -> Result<i64, E>
        where
            E: de::Error,
        {
            if value.fract() == 0.0 {
                Ok(value as i64)
            } else {
                Err(de::Error::custom(format!("expected a whole number, got {}", value)))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            value.trim().parse::<i64>().map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(I64OrStringVisitor)
}

/// Deserialize an identifier that may arrive as a number or a string
pub fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.trim().to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "i64_from_any")]
        n: i64,
        #[serde(deserialize_with = "id_from_any")]
        id: String,
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let row: Row = serde_json::from_str(r#"{"n": "40", "id": 7}"#).unwrap();
        assert_eq!(row.n, 40);
        assert_eq!(row.id, "7");

        let row: Row = serde_json::from_str(r#"{"n": 60, "id": " P-3 "}"#).unwrap();
        assert_eq!(row.n, 60);
        assert_eq!(row.id, "P-3");
    }

    #[test]
    fn test_rejects_fractional_integers() {
        assert!(serde_json::from_str::<Row>(r#"{"n": 20.5, "id": "x"}"#).is_err());
    }
}
