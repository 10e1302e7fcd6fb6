use bytes::Bytes;
use http::{Method, StatusCode};
use serde::Serialize;
use serde_json::json;
use user_usecase::UserService;

use crate::dispatcher::{DispatchError, Dispatched, RoutingError, dispatch};

/// Status and JSON body handed back to the invocation platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl Reply {
    pub fn success(dispatched: Dispatched) -> Self {
        let status = dispatched.status();
        match dispatched {
            Dispatched::Fetched(user) | Dispatched::Created(user) => {
                Self::json(&user, status)
            }
            Dispatched::Listed(users) => Self::json(&users, status),
            Dispatched::Updated | Dispatched::Deleted => {
                Self::json(&json!({ "success": true }), status)
            }
        }
    }

    /// Every failure is reported as a 500 carrying `{"message": ...}`,
    /// validation errors included.
    pub fn failure(err: &dyn std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Bytes::from(json!({ "message": err.to_string() }).to_string()),
        }
    }

    fn json<T>(data: &T, status: StatusCode) -> Self
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_vec(data) {
            Ok(body) => Self {
                status,
                body: Bytes::from(body),
            },
            Err(err) => Self::failure(&err),
        }
    }
}

/// Dispatches and shapes the outcome as a JSON [`Reply`]. Routing errors are
/// returned as-is so the platform reports a failed invocation.
pub async fn dispatch_envelope<S>(
    service: &S, method: &Method, id: Option<&str>, body: Option<&[u8]>,
) -> Result<Reply, RoutingError>
where
    S: UserService + ?Sized,
{
    match dispatch(service, method, id, body).await {
        Ok(dispatched) => Ok(Reply::success(dispatched)),
        Err(DispatchError::Routing(err)) => Err(err),
        Err(err) => Ok(Reply::failure(&err)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use test_utils::{create_user_body, stored_user};
    use user_dao::InMemoryUserDao;
    use user_usecase::{ServiceMode, UserRepository, build_service};

    use super::*;

    fn body_json(reply: &Reply) -> Value {
        serde_json::from_slice(&reply.body).unwrap()
    }

    #[tokio::test]
    async fn test_create_scenario() {
        let service = build_service(InMemoryUserDao::new(), ServiceMode::Plain);
        let body = create_user_body().to_string();

        let reply = dispatch_envelope(
            &*service,
            &Method::POST,
            None,
            Some(body.as_bytes()),
        )
        .await
        .unwrap();

        assert_eq!(reply.status, StatusCode::CREATED);
        let created = body_json(&reply);
        assert!(!created["id"].as_str().unwrap().is_empty());
        assert_eq!(created["name"], "Test User");
        assert_eq!(created["email"], "test@test.com");
        assert_eq!(created["age"], 30);
    }

    #[tokio::test]
    async fn test_list_is_a_json_array() {
        let dao = InMemoryUserDao::new();
        dao.create(&stored_user("abc123")).await.unwrap();
        let service = build_service(dao, ServiceMode::Plain);

        let reply = dispatch_envelope(&*service, &Method::GET, None, None)
            .await
            .unwrap();

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(body_json(&reply)[0]["id"], "abc123");
    }

    #[tokio::test]
    async fn test_delete_reports_success_flag() {
        let dao = InMemoryUserDao::new();
        dao.create(&stored_user("abc123")).await.unwrap();
        let service = build_service(dao, ServiceMode::Plain);

        let reply =
            dispatch_envelope(&*service, &Method::DELETE, Some("abc123"), None)
                .await
                .unwrap();

        assert_eq!(reply.status, StatusCode::NO_CONTENT);
        assert_eq!(body_json(&reply), json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_failures_are_message_envelopes() {
        let service = build_service(InMemoryUserDao::new(), ServiceMode::Plain);

        let missing =
            dispatch_envelope(&*service, &Method::GET, Some("missing"), None)
                .await
                .unwrap();
        assert_eq!(missing.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(&missing),
            json!({ "message": "error fetching a single user: user not found: missing" })
        );

        let invalid = dispatch_envelope(
            &*service,
            &Method::POST,
            None,
            Some(br#"{"name":"","email":"test@test.com","age":30}"#.as_slice()),
        )
        .await
        .unwrap();
        assert_eq!(invalid.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body_json(&invalid)["message"]
                .as_str()
                .unwrap()
                .starts_with("validation failed: ")
        );
    }

    #[tokio::test]
    async fn test_routing_errors_are_returned() {
        let service = build_service(InMemoryUserDao::new(), ServiceMode::Plain);

        let err = dispatch_envelope(&*service, &Method::PATCH, None, None)
            .await
            .unwrap_err();

        assert_eq!(err, RoutingError::InvalidMethod);
    }
}
