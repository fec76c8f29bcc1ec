use std::collections::BTreeMap;

use bytes::Bytes;

/// Outbound response: status, headers and body bytes.
///
/// Header names keep the case they were set with; lookups ignore case.
///
/// ```rust
/// use mika::Response;
///
/// let response = Response::new("Hello")
///     .with_header("Content-Type", "text/plain")
///     .with_added_header("X-Tag", "a")
///     .with_added_header("x-tag", "b");
///
/// assert_eq!(response.status(), 200);
/// assert_eq!(response.header_line("content-type"), "text/plain");
/// assert_eq!(response.header_line("X-Tag"), "a, b");
/// assert_eq!(response.body_text(), "Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: BTreeMap<String, Vec<String>>,
    body: Bytes,
}

impl Response {
    /// `200` response with `body` and no headers.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// `200` response without a body.
    pub fn empty() -> Self {
        Self::new(Bytes::new())
    }

    /// Status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// All headers, keyed by name as set.
    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    /// Values of `name`, ignoring case.
    pub fn header(&self, name: &str) -> &[String] {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// True if `name` has at least one value.
    pub fn has_header(&self, name: &str) -> bool {
        !self.header(name).is_empty()
    }

    /// Values of `name` joined with `", "`.
    pub fn header_line(&self, name: &str) -> String {
        self.header(name).join(", ")
    }

    /// Raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Copy with another status code.
    pub fn with_status(&self, status: u16) -> Self {
        let mut next = self.clone();
        next.status = status;
        next
    }

    /// Replaces every value of `name`.
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let mut next = self.without_header(&name);
        next.headers.insert(name, vec![value.into()]);
        next
    }

    /// Appends a value to `name`, keeping earlier ones.
    pub fn with_added_header(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let mut next = self.clone();
        let existing = next
            .headers
            .keys()
            .find(|key| key.eq_ignore_ascii_case(&name))
            .cloned();
        next.headers
            .entry(existing.unwrap_or(name))
            .or_default()
            .push(value.into());
        next
    }

    /// Copy without any value of `name`.
    pub fn without_header(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
        next
    }

    /// Copy with another body.
    pub fn with_body(&self, body: impl Into<Bytes>) -> Self {
        let mut next = self.clone();
        next.body = body.into();
        next
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header_replaces_case_insensitively() {
        let response = Response::empty()
            .with_header("X-Mode", "one")
            .with_header("x-mode", "two");

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.header("X-MODE"), ["two".to_string()]);
    }

    #[test]
    fn test_with_body_is_clone_on_write() {
        let original = Response::new("before");
        let changed = original.with_body("after").with_status(201);

        assert_eq!(original.body_text(), "before");
        assert_eq!(original.status(), 200);
        assert_eq!(changed.body_text(), "after");
        assert_eq!(changed.status(), 201);
    }

    #[test]
    fn test_missing_header_is_empty() {
        let response = Response::empty();
        assert!(!response.has_header("Content-Type"));
        assert_eq!(response.header_line("Content-Type"), "");
    }
}
