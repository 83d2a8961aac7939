//! Role-based access control.
//!
//! A thin layer over the JWT middleware: the route declares which roles may call it, and anyone
//! else gets a 403. Runs after the JWT middleware, so the claims are already in the request
//! extensions; a request that somehow arrives without them is treated as unauthenticated.

use std::rc::Rc;

use actix_web::{
    body::BoxBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::debug;
use pizza_delivery_engine::db_types::Role;

use crate::{
    auth::JwtClaims,
    errors::{AuthError, ServerError},
};

pub struct AclMiddlewareFactory {
    allowed_roles: Vec<Role>,
}

impl AclMiddlewareFactory {
    pub fn new(allowed_roles: &[Role]) -> Self {
        Self { allowed_roles: allowed_roles.to_vec() }
    }
}

impl<S> Transform<S, ServiceRequest> for AclMiddlewareFactory
where S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<BoxBody>;
    type Transform = AclMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AclMiddleware { service: Rc::new(service), allowed_roles: self.allowed_roles.clone() })
    }
}

pub struct AclMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<Role>,
}

impl<S> Service<ServiceRequest> for AclMiddleware<S>
where S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<BoxBody>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allowed_roles = self.allowed_roles.clone();
        Box::pin(async move {
            let role = req.extensions().get::<JwtClaims>().map(|claims| claims.role);
            match role {
                Some(role) if allowed_roles.contains(&role) => service.call(req).await,
                Some(role) => {
                    debug!("🔑️ A {role} tried to access {} and was denied", req.path());
                    Ok(req.error_response(ServerError::AuthenticationError(AuthError::InsufficientPermissions)))
                },
                None => Ok(req.error_response(ServerError::AuthenticationError(AuthError::MissingToken))),
            }
        })
    }
}
