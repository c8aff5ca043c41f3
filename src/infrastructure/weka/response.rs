// Copyright 2025 Envoi Storage Team.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use encoding_rs::{Encoding, UTF_8};
use serde_json::Value;

/// Decoded HTTP response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    /// `None` for an empty JSON body.
    Json(Option<Value>),
    Raw(Vec<u8>),
}

/// Media type and charset parsed from a `Content-Type` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub mime: String,
    pub charset: Option<String>,
}

impl ContentType {
    pub fn parse(header: &str) -> Self {
        let mut parts = header.split(';');
        let mime = parts
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let charset = parts.find_map(|part| {
            let (name, value) = part.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"').to_ascii_lowercase())
            } else {
                None
            }
        });
        Self { mime, charset }
    }

    /// Declared charset, UTF-8 when absent. `None` for an unknown label.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self.charset.as_deref() {
            None => Some(UTF_8),
            Some(label) => Encoding::for_label(label.as_bytes()),
        }
    }
}

impl ResponseBody {
    pub fn decode(content_type: Option<&str>, bytes: &[u8]) -> Self {
        let Some(content_type) = content_type.map(ContentType::parse) else {
            return ResponseBody::Raw(bytes.to_vec());
        };
        if !matches!(content_type.mime.as_str(), "text/plain" | "application/json") {
            return ResponseBody::Raw(bytes.to_vec());
        }

        let Some(encoding) = content_type.encoding() else {
            tracing::warn!(
                "Unsupported response charset '{}', keeping raw body",
                content_type.charset.as_deref().unwrap_or_default()
            );
            return ResponseBody::Raw(bytes.to_vec());
        };
        let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes)
        else {
            tracing::warn!("Response body is not valid {}", encoding.name());
            return ResponseBody::Raw(bytes.to_vec());
        };

        if content_type.mime == "text/plain" {
            return ResponseBody::Text(text.into_owned());
        }

        if text.trim().is_empty() {
            return ResponseBody::Json(None);
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(Some(value)),
            Err(e) => {
                tracing::error!("Failed to parse JSON response body: {}", e);
                ResponseBody::Raw(bytes.to_vec())
            }
        }
    }

    /// Human readable rendering, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            ResponseBody::Text(text) => text.clone(),
            ResponseBody::Json(Some(value)) => value.to_string(),
            ResponseBody::Json(None) => String::new(),
            ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn decode_with_logs(content_type: &str, bytes: &[u8]) -> (ResponseBody, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        let body = tracing::subscriber::with_default(subscriber, || {
            ResponseBody::decode(Some(content_type), bytes)
        });
        (body, logs.contents())
    }

    #[test]
    fn test_content_type_parse() {
        let ct = ContentType::parse("application/json; charset=UTF-8");
        assert_eq!(ct.mime, "application/json");
        assert_eq!(ct.charset.as_deref(), Some("utf-8"));

        let ct = ContentType::parse("text/plain");
        assert_eq!(ct.charset, None);
        assert_eq!(ct.encoding(), Some(UTF_8));
    }

    #[test]
    fn test_decode_variants() {
        assert_eq!(
            ResponseBody::decode(Some("text/plain; charset=utf-8"), b"ok"),
            ResponseBody::Text("ok".to_string())
        );
        assert_eq!(
            ResponseBody::decode(Some("application/json"), br#"{"url":"u"}"#),
            ResponseBody::Json(Some(serde_json::json!({"url": "u"})))
        );
        assert_eq!(
            ResponseBody::decode(Some("application/json"), b"  "),
            ResponseBody::Json(None)
        );
        assert_eq!(
            ResponseBody::decode(None, b"abc"),
            ResponseBody::Raw(b"abc".to_vec())
        );
        assert_eq!(
            ResponseBody::decode(Some("application/octet-stream"), b"abc"),
            ResponseBody::Raw(b"abc".to_vec())
        );
    }

    #[test]
    fn test_latin1_text_is_decoded() {
        assert_eq!(
            ResponseBody::decode(Some("text/plain; charset=iso-8859-1"), b"caf\xe9"),
            ResponseBody::Text("café".to_string())
        );
        assert_eq!(
            ResponseBody::decode(Some("application/json; charset=latin1"), b"{\"name\":\"caf\xe9\"}"),
            ResponseBody::Json(Some(serde_json::json!({"name": "café"})))
        );
    }

    #[test]
    fn test_unknown_charset_is_raw() {
        let (body, logs) = decode_with_logs("text/plain; charset=x-klingon", b"ok");
        assert_eq!(body, ResponseBody::Raw(b"ok".to_vec()));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("x-klingon"));
    }

    #[test]
    fn test_invalid_json_is_logged_and_raw() {
        let (body, logs) = decode_with_logs("application/json", b"{not json");
        assert_eq!(body, ResponseBody::Raw(b"{not json".to_vec()));
        assert_eq!(body.describe(), "{not json");
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("Failed to parse JSON response body"));
    }

    #[test]
    fn test_invalid_utf8_text_is_raw() {
        let body = ResponseBody::decode(Some("text/plain"), &[0xff, 0xfe]);
        assert_eq!(body, ResponseBody::Raw(vec![0xff, 0xfe]));
    }
}
