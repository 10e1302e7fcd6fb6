use std::collections::{BTreeMap, HashMap};

use base64::{DecodeError, Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use user_delivery::Reply;

/// The parts of an API gateway proxy event the handler reads. Everything
/// else in the event is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyRequest {
    pub http_method: String,
    pub path_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

impl ProxyRequest {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert("id".to_string(), id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get("id"))
            .map(String::as_str)
    }

    /// Raw body bytes, base64-decoded when the event says so.
    pub fn decoded_body(&self) -> Result<Option<Vec<u8>>, DecodeError> {
        match &self.body {
            Some(body) if self.is_base64_encoded => {
                STANDARD.decode(body).map(Some)
            }
            Some(body) => Ok(Some(body.clone().into_bytes())),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl From<Reply> for ProxyResponse {
    fn from(reply: Reply) -> Self {
        let headers = BTreeMap::from([(
            "content-type".to_string(),
            "application/json".to_string(),
        )]);

        Self {
            status_code: reply.status.as_u16(),
            headers,
            body: String::from_utf8_lossy(&reply.body).into_owned(),
            is_base64_encoded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_reads_gateway_event_fields() {
        let event = json!({
            "resource": "/users/{id}",
            "httpMethod": "PUT",
            "pathParameters": { "id": "abc123" },
            "headers": { "Accept": "application/json" },
            "body": "{\"age\":31}",
            "isBase64Encoded": false
        });

        let request: ProxyRequest = serde_json::from_value(event).unwrap();

        assert_eq!(request.http_method, "PUT");
        assert_eq!(request.id(), Some("abc123"));
        assert_eq!(
            request.decoded_body().unwrap().as_deref(),
            Some(br#"{"age":31}"#.as_slice())
        );
    }

    #[test]
    fn test_null_and_missing_fields_default() {
        let request: ProxyRequest = serde_json::from_value(json!({
            "httpMethod": "GET",
            "pathParameters": null,
            "body": null
        }))
        .unwrap();

        assert_eq!(request, ProxyRequest::new("GET"));
        assert_eq!(request.id(), None);
        assert_eq!(request.decoded_body().unwrap(), None);
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let request = ProxyRequest {
            is_base64_encoded: true,
            ..ProxyRequest::new("POST").with_body("eyJhZ2UiOjMxfQ==")
        };

        assert_eq!(
            request.decoded_body().unwrap().as_deref(),
            Some(br#"{"age":31}"#.as_slice())
        );

        let broken = ProxyRequest {
            is_base64_encoded: true,
            ..ProxyRequest::new("POST").with_body("not base64!")
        };
        assert!(broken.decoded_body().is_err());
    }
}
