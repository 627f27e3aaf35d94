use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{errors::AppError, utils::get_client_ip::get_client_ip, AppState};

/// Applies the general API cap to every request in the wrapped scope.
pub struct ApiRateLimit;

impl<S> Transform<S, ServiceRequest> for ApiRateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiRateLimitService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiRateLimitService {
            service: Rc::new(service),
        })
    }
}

pub struct ApiRateLimitService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for ApiRateLimitService<S>
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
            if req.method().as_str() == "OPTIONS" {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState missing in rate limit middleware");
                return Ok(req.into_response(
                    AppError::InternalError("application state missing".into()).to_http_response(),
                ));
            };

            let client_ip = get_client_ip(req.request(), state.trust_x_forwarded_for);
            let decision = state.api_limiter.check(&client_ip);

            if !decision.allowed {
                tracing::warn!(client_ip = %client_ip, path = %req.path(), "API rate limit exceeded");
                let response = AppError::RateLimitExceeded {
                    retry_after: decision.retry_after,
                }
                .to_http_response();
                return Ok(req.into_response(response));
            }

            service.call(req).await
        })
    }
}
