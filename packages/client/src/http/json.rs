//! JSON decoding of buffered bodies
//!
//! Bodies decode into `serde_json::Value`, which is plain data: object keys
//! such as `__proto__`, `constructor` or `prototype` are ordinary map entries
//! and can never change how the resulting value behaves.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{self, Result};

/// Parse `text` as one JSON document.
///
/// # Errors
///
/// Returns a decode error for malformed JSON or trailing data.
pub fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(error::decode)
}

/// Parse `text` straight into `T`.
///
/// # Errors
///
/// Returns a decode error if `text` is not JSON or does not match `T`.
pub fn parse_as<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(error::decode)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[test]
    fn matches_direct_parse() {
        let text = r#"{"a":1,"b":[true,null,"x"],"c":{"d":2.5}}"#;
        let direct: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parse(text).unwrap(), direct);
    }

    #[test]
    fn proto_key_is_an_ordinary_entry() {
        let value = parse(r#"{"a":1,"__proto__":{"polluted":true}}"#).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(object["__proto__"], json!({"polluted": true}));
        assert!(object.get("polluted").is_none());
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn constructor_key_stays_data() {
        let value = parse(r#"{"constructor":{"prototype":{"isAdmin":true}}}"#).unwrap();
        assert_eq!(value["constructor"]["prototype"]["isAdmin"], true);
        assert!(value.get("isAdmin").is_none());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(parse("{\"a\":").unwrap_err().is_decode());
        assert!(parse("{} trailing").unwrap_err().is_decode());
    }

    #[test]
    fn typed_parse() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Item {
            a: u32,
        }

        assert_eq!(parse_as::<Item>(r#"{"a":1}"#).unwrap(), Item { a: 1 });
        assert!(parse_as::<Item>(r#"{"a":"x"}"#).unwrap_err().is_decode());
    }
}
