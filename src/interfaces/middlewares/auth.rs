use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, repositories::token::TokenServiceRepository, AppState};

const API_PREFIX: &str = "/api/v1";
const ADMIN_PREFIX: &str = "/api/v1/admin";

/// How much authentication a route needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// A valid token is used when present; anonymous callers pass through.
    OptionalAuth,
    Protected,
}

pub fn route_access(path: &str, method: &str) -> RouteAccess {
    if method == "OPTIONS" || path == "/" {
        return RouteAccess::Public;
    }

    let Some(rest) = path.strip_prefix(API_PREFIX) else {
        return RouteAccess::Protected;
    };

    match (method, rest) {
        ("POST", "/auth/register" | "/auth/login" | "/auth/refresh" | "/chatbot") => RouteAccess::Public,
        ("POST", "/submissions") => RouteAccess::OptionalAuth,
        ("GET", "/search" | "/submissions") => RouteAccess::Public,
        ("GET", rest) if is_catalog_read(rest) => RouteAccess::Public,
        _ => RouteAccess::Protected,
    }
}

fn is_catalog_read(rest: &str) -> bool {
    ["/categories", "/artists", "/products"].iter().any(|root| {
        rest == *root || rest.strip_prefix(root).is_some_and(|tail| tail.starts_with('/'))
    })
}

pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let access = route_access(req.path(), req.method().as_str());

            if access == RouteAccess::Public {
                return service.call(req).await;
            }

            let token = extract_token(&req);
            if token.is_none() && access == RouteAccess::OptionalAuth {
                return service.call(req).await;
            }

            let claims = match token.ok_or(AuthError::MissingCredentials).and_then(|t| decode_claims(&req, &t)) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::warn!(path = %req.path(), "Rejected request: {}", e);
                    return Ok(custom_error_response(req, e.error_response()));
                }
            };

            if let Err(forbidden_response) = enforce_admin_access(req.path(), &claims) {
                return Ok(custom_error_response(req, forbidden_response));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn decode_claims(req: &ServiceRequest, token: &str) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or_else(|| {
            tracing::error!("AppState missing in middleware");
            AuthError::MissingJwtService
        })?;

    let decoded = state.auth_handler.token_service.decode_jwt(token)?;
    Ok(decoded.claims)
}

fn enforce_admin_access(path: &str, claims: &Claims) -> Result<(), HttpResponse> {
    if path.starts_with(ADMIN_PREFIX) && !claims.admin {
        tracing::warn!(sub = %claims.sub, "Admin access required for path: {}", path);
        return Err(
            HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Admin access required"
            }))
        );
    }
    Ok(())
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}
