//! Bearer-token middleware.
//!
//! Wraps the authenticated scope. Every request must carry `Authorization: Bearer <jwt>`; the
//! decoded [`JwtClaims`] are stored in the request extensions for the handlers (and the ACL
//! middleware) downstream. Requests without a valid token never reach the inner service, they are
//! answered with a 401 right here.

use std::rc::Rc;

use actix_web::{
    body::BoxBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error,
    HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::trace;

use crate::{
    auth::TokenVerifier,
    errors::{AuthError, ServerError},
};

pub struct JwtMiddlewareFactory {
    verifier: TokenVerifier,
}

impl JwtMiddlewareFactory {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }
}

impl<S> Transform<S, ServiceRequest> for JwtMiddlewareFactory
where S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<BoxBody>;
    type Transform = JwtMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtMiddleware { service: Rc::new(service), verifier: self.verifier.clone() })
    }
}

pub struct JwtMiddleware<S> {
    service: Rc<S>,
    verifier: TokenVerifier,
}

impl<S> Service<ServiceRequest> for JwtMiddleware<S>
where S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<BoxBody>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone();
        Box::pin(async move {
            let claims = match bearer_token(&req).and_then(|token| verifier.decode(&token)) {
                Ok(claims) => claims,
                Err(e) => return Ok(req.error_response(ServerError::AuthenticationError(e))),
            };
            trace!("🔑️ Request from {} {} (#{})", claims.role, claims.name, claims.sub);
            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Result<String, AuthError> {
    let header_value =
        req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).ok_or(AuthError::MissingToken)?;
    let token = header_value.strip_prefix("Bearer ").ok_or(AuthError::MissingToken)?;
    Ok(token.trim().to_string())
}
