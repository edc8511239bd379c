//! Response body decoding by content type.

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

use crate::error::{DecodeError, RequestError, Result};

// == Response Body ==
/// A decoded response payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// `application/json*`
    Json(Value),
    /// `text/*`
    Text(String),
    /// Anything else, unmodified
    Bytes(#[serde(serialize_with = "serialize_len")] Bytes),
}

impl ResponseBody {
    // == Decode ==
    /// Decodes `raw` according to the MIME type in `content_type`.
    ///
    /// Matching is case-insensitive on the media type and ignores parameters
    /// such as `charset`. A missing content type yields raw bytes.
    pub fn decode(content_type: Option<&str>, raw: Bytes) -> Result<Self> {
        let mime = content_type
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let decoded = if mime.starts_with("application/json") {
            serde_json::from_slice(&raw)
                .map(ResponseBody::Json)
                .map_err(DecodeError::from)
        } else if mime.starts_with("text/") {
            String::from_utf8(raw.to_vec())
                .map(ResponseBody::Text)
                .map_err(DecodeError::from)
        } else {
            return Ok(ResponseBody::Bytes(raw));
        };

        decoded.map_err(|source| RequestError::Decode {
            content_type: mime,
            source,
        })
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

fn serialize_len<S>(bytes: &Bytes, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("<{} bytes>", bytes.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json() {
        let body = ResponseBody::decode(
            Some("application/json; charset=utf-8"),
            Bytes::from_static(br#"{"v":1}"#),
        )
        .unwrap();

        assert_eq!(body.as_json(), Some(&json!({"v": 1})));
    }

    #[test]
    fn test_decode_text_case_insensitive() {
        let body = ResponseBody::decode(Some("Text/HTML"), Bytes::from_static(b"<p>hi</p>")).unwrap();

        assert_eq!(body.as_text(), Some("<p>hi</p>"));
    }

    #[test]
    fn test_decode_binary_passthrough() {
        let raw = Bytes::from_static(&[0x89, b'P', b'N', b'G']);

        let png = ResponseBody::decode(Some("image/png"), raw.clone()).unwrap();
        let unknown = ResponseBody::decode(None, raw.clone()).unwrap();

        assert_eq!(png.as_bytes(), Some(&raw));
        assert_eq!(unknown, ResponseBody::Bytes(raw));
    }

    #[test]
    fn test_decode_invalid_json_fails() {
        let err = ResponseBody::decode(Some("application/json"), Bytes::from_static(b"{not json"))
            .unwrap_err();

        assert!(matches!(
            err,
            RequestError::Decode { source: DecodeError::Json(_), ref content_type } if content_type == "application/json"
        ));
    }

    #[test]
    fn test_decode_invalid_utf8_fails() {
        let err = ResponseBody::decode(Some("text/plain"), Bytes::from_static(&[0xff, 0xfe])).unwrap_err();

        assert!(matches!(
            err,
            RequestError::Decode { source: DecodeError::Utf8(_), .. }
        ));
    }

    #[test]
    fn test_serialize_body() {
        assert_eq!(
            serde_json::to_value(ResponseBody::Json(json!([1, 2]))).unwrap(),
            json!([1, 2])
        );
        assert_eq!(
            serde_json::to_value(ResponseBody::Bytes(Bytes::from_static(b"abc"))).unwrap(),
            json!("<3 bytes>")
        );
    }
}
