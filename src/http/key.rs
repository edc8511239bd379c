//! Cache key derivation.
//!
//! Keys look like `GET:https://host/path:<a=1 b=2>` with the query parameters
//! sorted, so equivalent parameter sets share one entry regardless of the
//! order the caller supplied them in. Headers and bodies are appended when
//! present because they can change what the upstream returns.
//!
//! Names, values and bodies are form-urlencoded, so the separators ` `, `=`
//! and `>` only ever appear as delimiters.

use reqwest::Method;

use crate::http::{RequestBody, RequestParams};

/// Builds the cache key for a request.
pub fn cache_key(method: &Method, url: &str, params: &RequestParams) -> String {
    let mut query = params.query_pairs();
    query.sort();

    let mut key = format!("{method}:{url}:<");
    push_pairs(&mut key, &query);
    key.push('>');

    let mut headers: Vec<(String, String)> = params
        .options
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    if !headers.is_empty() {
        headers.sort();
        key.push_str(":headers<");
        push_pairs(&mut key, &headers);
        key.push('>');
    }

    if let Some(body) = &params.options.body {
        key.push_str(":body<");
        match body {
            RequestBody::Json(value) => key.push_str(&encode(value.to_string().as_bytes())),
            RequestBody::Form(fields) => {
                let mut fields = fields.clone();
                fields.sort();
                push_pairs(&mut key, &fields);
            }
            RequestBody::Text(text) => key.push_str(&encode(text.as_bytes())),
            RequestBody::Bytes(bytes) => key.push_str(&encode(bytes)),
        }
        key.push('>');
    }

    key
}

fn push_pairs(key: &mut String, pairs: &[(String, String)]) {
    for (i, (name, value)) in pairs.iter().enumerate() {
        if i > 0 {
            key.push(' ');
        }
        key.push_str(&encode(name.as_bytes()));
        key.push('=');
        key.push_str(&encode(value.as_bytes()));
    }
}

fn encode(raw: &[u8]) -> String {
    form_urlencoded::byte_serialize(raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, AUTHORIZATION};
    use serde_json::json;

    const URL: &str = "https://api.example.com/x";

    #[test]
    fn test_key_without_params() {
        assert_eq!(
            cache_key(&Method::GET, URL, &RequestParams::new()),
            "GET:https://api.example.com/x:<>"
        );
    }

    #[test]
    fn test_key_sorts_query_parameters() {
        let forward = RequestParams::new().query("q", "Paris").query("format", "j1");
        let reversed = RequestParams::new().query("format", "j1").query("q", "Paris");

        let key = cache_key(&Method::GET, URL, &forward);
        assert_eq!(key, "GET:https://api.example.com/x:<format=j1 q=Paris>");
        assert_eq!(key, cache_key(&Method::GET, URL, &reversed));
    }

    #[test]
    fn test_key_distinguishes_method_url_and_values() {
        let params = RequestParams::new().query("term", "aloof");

        let base = cache_key(&Method::GET, URL, &params);
        assert_ne!(base, cache_key(&Method::POST, URL, &params));
        assert_ne!(base, cache_key(&Method::GET, "https://api.example.com/y", &params));
        assert_ne!(
            base,
            cache_key(&Method::GET, URL, &RequestParams::new().query("term", "aloft"))
        );
    }

    #[test]
    fn test_key_includes_headers_and_body() {
        let plain = RequestParams::new();
        let authed = RequestParams::new().header(AUTHORIZATION, HeaderValue::from_static("Bearer t"));
        let with_body = RequestParams::new().json(json!({"a": 1}));

        assert_eq!(
            cache_key(&Method::POST, URL, &authed),
            "POST:https://api.example.com/x:<>:headers<authorization=Bearer+t>"
        );
        assert_eq!(
            cache_key(&Method::POST, URL, &with_body),
            "POST:https://api.example.com/x:<>:body<%7B%22a%22%3A1%7D>"
        );
        assert_ne!(
            cache_key(&Method::POST, URL, &plain),
            cache_key(&Method::POST, URL, &with_body)
        );
    }

    #[test]
    fn test_key_sorts_form_fields() {
        let a = RequestParams::new().form(vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);
        let b = RequestParams::new().form(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);

        assert_eq!(cache_key(&Method::POST, URL, &a), cache_key(&Method::POST, URL, &b));
    }

    #[test]
    fn test_key_escapes_separators_in_values() {
        let two = RequestParams::new().query("term", "cat").query("limit", "5");
        let one = RequestParams::new().query("limit", "5 term=cat");

        let key = cache_key(&Method::GET, URL, &one);
        assert_eq!(key, "GET:https://api.example.com/x:<limit=5+term%3Dcat>");
        assert_ne!(key, cache_key(&Method::GET, URL, &two));

        let split = RequestParams::new().form(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);
        let joined = RequestParams::new().form(vec![("a".to_string(), "1 b=2".to_string())]);
        assert_ne!(
            cache_key(&Method::POST, URL, &split),
            cache_key(&Method::POST, URL, &joined)
        );

        let closing = RequestParams::new().text("x>:body<y");
        assert_eq!(
            cache_key(&Method::POST, URL, &closing),
            "POST:https://api.example.com/x:<>:body<x%3E%3Abody%3Cy>"
        );
    }
}
