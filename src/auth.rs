//! Identity resolution across auth API generations.
//!
//! Older gRPC servers expose `GetAuthStatus`, which answers with the user
//! directly; newer ones expose `GetCurrentSession`, which wraps the user in
//! a session record. Both unwrap to the same [`User`] shape; a session with
//! no embedded user is a valid anonymous identity, not an error.

use crate::error::Result;
use crate::proto;
use crate::transport::GrpcWebChannel;
use crate::types::User;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Uniform identity lookup over whatever auth call the server generation has.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn get_identity(&self) -> Result<User>;
}

/// `AuthService/GetAuthStatus` — the response body is the user itself.
pub(crate) struct AuthStatusClient {
    channel: Arc<GrpcWebChannel>,
}

impl AuthStatusClient {
    pub(crate) fn new(channel: Arc<GrpcWebChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl AuthClient for AuthStatusClient {
    async fn get_identity(&self) -> Result<User> {
        let user: proto::User = self
            .channel
            .unary("AuthService", "GetAuthStatus", &proto::GetAuthStatusRequest {})
            .await?;
        Ok(User { name: user.name })
    }
}

/// `AuthService/GetCurrentSession` — the user is nested in a session record
/// next to a last-accessed timestamp.
pub(crate) struct CurrentSessionClient {
    channel: Arc<GrpcWebChannel>,
}

impl CurrentSessionClient {
    pub(crate) fn new(channel: Arc<GrpcWebChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl AuthClient for CurrentSessionClient {
    async fn get_identity(&self) -> Result<User> {
        let session: proto::GetCurrentSessionResponse = self
            .channel
            .unary(
                "AuthService",
                "GetCurrentSession",
                &proto::GetCurrentSessionRequest {},
            )
            .await?;
        let user = match session.user {
            Some(user) => User { name: user.name },
            None => {
                debug!("session response carried no user, treating as anonymous");
                User::default()
            }
        };
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::grpc_web::encode_frame;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn channel_for(server: &MockServer) -> Arc<GrpcWebChannel> {
        Arc::new(GrpcWebChannel::new(&server.uri(), "token", "memos.api.v1").unwrap())
    }

    #[tokio::test]
    async fn auth_status_answers_with_the_user_directly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/memos.api.v1.AuthService/GetAuthStatus"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                encode_frame(&proto::User {
                    name: "users/3".to_string(),
                }),
                "application/grpc-web+proto",
            ))
            .mount(&server)
            .await;

        let client = AuthStatusClient::new(channel_for(&server).await);
        assert_eq!(client.get_identity().await.unwrap(), User::named("users/3"));
    }

    #[tokio::test]
    async fn session_unwraps_the_nested_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/memos.api.v1.AuthService/GetCurrentSession"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                encode_frame(&proto::GetCurrentSessionResponse {
                    user: Some(proto::User {
                        name: "users/9".to_string(),
                    }),
                    last_accessed_at: Some(::prost_types::Timestamp {
                        seconds: 1_700_000_000,
                        nanos: 0,
                    }),
                }),
                "application/grpc-web+proto",
            ))
            .mount(&server)
            .await;

        let client = CurrentSessionClient::new(channel_for(&server).await);
        assert_eq!(client.get_identity().await.unwrap(), User::named("users/9"));
    }

    #[tokio::test]
    async fn session_without_user_is_anonymous_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/memos.api.v1.AuthService/GetCurrentSession"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                encode_frame(&proto::GetCurrentSessionResponse {
                    user: None,
                    last_accessed_at: None,
                }),
                "application/grpc-web+proto",
            ))
            .mount(&server)
            .await;

        let client = CurrentSessionClient::new(channel_for(&server).await);
        assert_eq!(client.get_identity().await.unwrap(), User::default());
    }
}
