use crate::protocol::{Response, SendError};

/// Serializes a [`Response`] into the compact JSON text posted back on the channel.
///
/// Properties appear in the order kept by the response builder.
#[derive(Debug, Default, Copy, Clone)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn encode(&self, response: &Response) -> Result<String, SendError> {
        Ok(serde_json::to_string(response.as_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Entity;
    use crate::protocol::header::CONTENT_TYPE;
    use http::{StatusCode, Version};

    #[test]
    fn encode_empty() {
        assert_eq!(ResponseEncoder::new().encode(&Response::empty()).unwrap(), "{}");
    }

    #[test]
    fn encode_full() {
        let mut response = Response::empty();
        response.set_version(Version::HTTP_10);
        response.set_status(StatusCode::CREATED, "Created");
        response.set_entity(Entity::empty().add_header(CONTENT_TYPE, mime::TEXT_PLAIN).set_body_text("a\"b")).unwrap();

        assert_eq!(
            ResponseEncoder::new().encode(&response).unwrap(),
            r#"{"version":"HTTP/1.0","status-code":201,"status-message":"Created","headers":{"Content-Type":"text/plain"},"body":"a\"b"}"#
        );
    }
}
