//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the Bearer token from the Authorization header,
//! verifies it with the shared [`JwtCodec`] and injects the caller's
//! identity into the request extensions.
//!
//! The middleware works in two modes:
//! 1. Enforcing: requests without a valid access token are rejected with 401
//! 2. Permissive: anonymous requests pass through, invalid tokens are ignored

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use bg_core::{domain::entities::token::Claims, domain::entities::user::Role, services::JwtCodec};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::authentication_failed;

/// User authentication context injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Email taken from the `name` claim
    pub email: String,
    pub role: Role,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.name,
            role: claims.role,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    codec: Arc<JwtCodec>,
    enforce: bool,
}

impl JwtAuth {
    /// Creates a middleware that rejects unauthenticated requests when
    /// `enforce` is set
    pub fn new(codec: Arc<JwtCodec>, enforce: bool) -> Self {
        Self { codec, enforce }
    }

    /// Creates a middleware that always requires a valid access token
    pub fn required(codec: Arc<JwtCodec>) -> Self {
        Self::new(codec, true)
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            codec: Arc::clone(&self.codec),
            enforce: self.enforce,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    codec: Arc<JwtCodec>,
    enforce: bool,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let verified = extract_bearer_token(&req).map(|token| self.codec.decode(&token));

        let auth_context = match verified {
            Some(Ok(claims)) => Some(AuthContext::from(claims)),
            Some(Err(e)) if self.enforce => {
                tracing::debug!(error = %e, path = %req.path(), "Rejected access token");
                return Box::pin(async move { Ok(reject(req)) });
            }
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Ignoring invalid access token");
                None
            }
            None if self.enforce => {
                tracing::debug!(path = %req.path(), "Missing Authorization header");
                return Box::pin(async move { Ok(reject(req)) });
            }
            None => None,
        };

        if let Some(context) = auth_context {
            req.extensions_mut().insert(context);
        }

        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(authentication_failed()).map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                InternalError::from_response("Authentication required", authentication_failed())
                    .into()
            });

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_auth_context_from_claims() {
        let claims = Claims::new_access_token(
            "curator@garden.org",
            Role::Admin,
            "botgarden",
            "botgarden-api",
            chrono::Duration::minutes(5),
        );
        let context = AuthContext::from(claims);
        assert_eq!(context.email, "curator@garden.org");
        assert_eq!(context.role, Role::Admin);
    }
}
