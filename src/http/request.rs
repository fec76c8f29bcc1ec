use std::collections::HashMap;

/// Inbound request: method, path and parsed query string.
///
/// ```rust
/// use mika::Request;
///
/// let request = Request::get("/foo/bar/baz?key=val&foo2");
/// assert_eq!(request.method(), "GET");
/// assert_eq!(request.path(), "/foo/bar/baz");
/// assert_eq!(request.query_params()["key"], "val");
/// assert_eq!(request.query_params()["foo2"], "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    query: HashMap<String, String>,
}

impl Request {
    /// Builds a request from a method and a request target
    /// (`/path?query#fragment`).
    pub fn new(method: impl Into<String>, target: &str) -> Self {
        let target = target.split_once('#').map_or(target, |(before, _)| before);
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, HashMap::new()),
        };

        Self {
            method: method.into().to_ascii_uppercase(),
            path: path.to_string(),
            query,
        }
    }

    /// `GET` request for `target`.
    pub fn get(target: &str) -> Self {
        Self::new("GET", target)
    }

    /// `POST` request for `target`.
    pub fn post(target: &str) -> Self {
        Self::new("POST", target)
    }

    /// Uppercased request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path without query or fragment.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded query parameters.
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query
    }

    /// Copy with another method.
    pub fn with_method(&self, method: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.method = method.into().to_ascii_uppercase();
        next
    }

    /// Copy with `name` set to `value`.
    pub fn with_query_param(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.query.insert(name.into(), value.into());
        next
    }

    /// Copy with the whole query replaced.
    pub fn with_query_params(&self, params: HashMap<String, String>) -> Self {
        let mut next = self.clone();
        next.query = params;
        next
    }
}

/// Repeated keys keep the last value.
fn parse_query(query: &str) -> HashMap<String, String> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .map(|pairs| pairs.into_iter().collect())
        .unwrap_or_default()
}
