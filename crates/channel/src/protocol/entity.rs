use crate::protocol::header::{HeaderName, HeaderValue};

/// The headers and body text of an HTTP message.
///
/// Headers keep their insertion order. A header may collect several values here,
/// but only single valued headers can be written into a JSON response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    headers: Vec<(HeaderName, Vec<HeaderValue>)>,
    body_text: String,
}

impl Entity {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends `value` to the values of `name`, adding the header if it is new.
    ///
    /// The value is checked against the header's kind only when the entity is written
    /// into a [`Response`](crate::protocol::Response).
    #[must_use]
    pub fn add_header(mut self, name: HeaderName, value: impl Into<HeaderValue>) -> Self {
        let value = value.into();
        match self.headers.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value),
            None => self.headers.push((name, vec![value])),
        }
        self
    }

    /// Replaces every value of `name`, an empty list keeps the header without a value.
    #[must_use]
    pub fn set_header(mut self, name: HeaderName, values: Vec<HeaderValue>) -> Self {
        match self.headers.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = values,
            None => self.headers.push((name, values)),
        }
        self
    }

    #[must_use]
    pub fn set_body_text(mut self, body_text: impl Into<String>) -> Self {
        self.body_text = body_text.into();
        self
    }

    pub fn headers(&self) -> impl Iterator<Item = (&HeaderName, &[HeaderValue])> {
        self.headers.iter().map(|(name, values)| (name, values.as_slice()))
    }

    pub fn header(&self, name: &HeaderName) -> Option<&[HeaderValue]> {
        self.headers().find(|(existing, _)| *existing == name).map(|(_, values)| values)
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    /// True when there is no header and the body text is empty.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.body_text.is_empty()
    }
}
