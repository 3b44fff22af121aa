//! gRPC implementation for AuthService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use validator::{Validate, ValidationErrors};

use crate::service::AuthService;
use common::AppError;
use proto::auth::{
    auth_service_server::AuthService as AuthServiceProto, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse,
};

#[derive(Validate)]
struct RegisterInput {
    #[validate(length(min = 1, message = "email is required"), email(message = "email is invalid"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
}

#[derive(Validate)]
struct LoginInput {
    #[validate(length(min = 1, message = "email is required"), email(message = "email is invalid"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
    #[validate(range(min = 1, message = "app_id is required"))]
    app_id: i32,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            app_id: req.app_id,
        }
    }
}

fn invalid_argument(errors: ValidationErrors) -> Status {
    Status::from(AppError::validation(errors.to_string()))
}

/// gRPC service wrapper for AuthService.
pub struct AuthGrpcService {
    service: Arc<dyn AuthService>,
}

impl AuthGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let input = RegisterInput::from(request.into_inner());
        input.validate().map_err(invalid_argument)?;

        let user_id = self
            .service
            .register(&input.email, &input.password)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let input = LoginInput::from(request.into_inner());
        input.validate().map_err(invalid_argument)?;

        let token = self
            .service
            .login(&input.email, &input.password, input.app_id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(LoginResponse { token }))
    }
}
