//! gRPC handler tests: validation and status mapping.

mod support;

use std::sync::Arc;

use tonic::{Code, Request};

use proto::auth::{LoginRequest, RegisterRequest};
use proto::AuthService as _;
use sso_service_lib::grpc::AuthGrpcService;
use sso_service_lib::token::decode_token;
use support::{authenticator, InMemoryStore};

fn grpc() -> AuthGrpcService {
    let store = Arc::new(InMemoryStore::new().with_app(1, "test-app", "S"));
    AuthGrpcService::new(Arc::new(authenticator(store)))
}

fn register_request(email: &str, password: &str) -> Request<RegisterRequest> {
    Request::new(RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn login_request(email: &str, password: &str, app_id: i32) -> Request<LoginRequest> {
    Request::new(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        app_id,
    })
}

#[tokio::test]
async fn test_register_then_login() {
    let svc = grpc();

    let registered = svc
        .register(register_request("a@x.com", "pw1"))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(registered.user_id, 1);

    let token = svc
        .login(login_request("a@x.com", "pw1", 1))
        .await
        .unwrap()
        .into_inner()
        .token;
    assert_eq!(decode_token(&token, b"S").unwrap().uid, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let svc = grpc();

    for (email, password) in [("", "pw1"), ("not-an-email", "pw1"), ("a@x.com", "")] {
        let status = svc
            .register(register_request(email, password))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument, "{email:?}/{password:?}");
    }
}

#[tokio::test]
async fn test_login_requires_app_id() {
    let svc = grpc();

    let status = svc.login(login_request("a@x.com", "pw1", 0)).await.unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_domain_errors_map_to_status_codes() {
    let svc = grpc();
    svc.register(register_request("a@x.com", "pw1")).await.unwrap();

    let exists = svc
        .register(register_request("a@x.com", "pw2"))
        .await
        .unwrap_err();
    assert_eq!(exists.code(), Code::AlreadyExists);

    let wrong = svc.login(login_request("a@x.com", "bad", 1)).await.unwrap_err();
    assert_eq!(wrong.code(), Code::Unauthenticated);

    let unknown = svc
        .login(login_request("ghost@x.com", "pw1", 1))
        .await
        .unwrap_err();
    assert_eq!(unknown.code(), Code::Unauthenticated);
    assert_eq!(unknown.message(), wrong.message());

    let no_app = svc.login(login_request("a@x.com", "pw1", 99)).await.unwrap_err();
    assert_eq!(no_app.code(), Code::NotFound);
}
