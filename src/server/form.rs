//! `application/x-www-form-urlencoded` decoding for query strings and form bodies

/// Decode `a=1&b=two+words` into ordered pairs
///
/// `+` becomes a space and `%XX` escapes are decoded. A malformed escape
/// leaves that component as it was; decoding never fails.
pub fn decode_urlencoded(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

/// First value of `name` in a query string
pub fn query_param(query: &str, name: &str) -> Option<String> {
    decode_urlencoded(query)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Decode one percent-encoded component
pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
