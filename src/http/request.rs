use std::collections::HashMap;

/// One inbound call as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    uri: String,
    path: String,
    params: HashMap<String, String>,
}

impl Request {
    /// Builds a request from a request-target such as `/app/hello?name=Ana`.
    ///
    /// The path is percent-decoded; escapes that do not form valid UTF-8
    /// become U+FFFD. Query values are kept as sent: pairs are split on `&`
    /// and then on the first `=`, pairs without a value are dropped and a
    /// repeated name keeps its last value.
    pub fn from_uri(uri: &str) -> Request {
        let without_fragment = uri.split_once('#').map_or(uri, |(before, _)| before);
        let (raw_path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_fragment, None),
        };

        let decoded = urlencoding::decode_binary(raw_path.as_bytes());
        let path = String::from_utf8_lossy(&decoded).into_owned();

        let params = query.map(parse_query).unwrap_or_default();

        Request {
            uri: uri.to_string(),
            path,
            params,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
