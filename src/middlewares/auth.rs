use crate::entities::admins::AdminRole;
use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 인증된 관리자. 요청 extensions 에 들어간다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentAdmin {
    pub id: i64,
    pub role: AdminRole,
}

// 공개 경로 설정
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/health",
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
                "/api/v1/auth/login",
                "/api/v1/auth/refresh",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        self.exact_paths.contains(&path)
            || self
                .prefix_paths
                .iter()
                .any(|&prefix| path.starts_with(prefix))
    }
}

/// 읽기 전용 요청
fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S> AuthMiddlewareService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<CurrentAdmin, AppError> {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))?;

        let claims = self
            .jwt_service
            .verify_access_token(token)
            .map_err(|_| AppError::AuthError("Invalid access token".to_string()))?;

        Ok(CurrentAdmin {
            id: claims.admin_id()?,
            role: claims.admin_role()?,
        })
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS 프리플라이트는 통과
        if req.method() == Method::OPTIONS || self.public_paths.is_public_path(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let admin = match self.authenticate(&req) {
            Ok(admin) => admin,
            Err(error) => return Box::pin(async move { Err(error.into()) }),
        };

        // viewer 는 조회만 가능
        if !admin.role.can_write() && !is_read_only(req.method()) {
            log::warn!(
                "Viewer {} attempted {} {}",
                admin.id,
                req.method(),
                req.path()
            );
            return Box::pin(async move { Err(AppError::Forbidden.into()) });
        }

        req.extensions_mut().insert(admin);
        Box::pin(self.service.call(req))
    }
}

/// 핸들러에서 현재 관리자 조회
pub fn current_admin(req: &HttpRequest) -> Option<CurrentAdmin> {
    req.extensions().get::<CurrentAdmin>().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn jwt() -> JwtService {
        JwtService::new("test-secret", 3600, 7200)
    }

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match current_admin(&req) {
            Some(admin) => HttpResponse::Ok().body(admin.id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .wrap(AuthMiddleware::new(jwt()))
                    .route("/health", web::get().to(|| async { HttpResponse::Ok().finish() }))
                    .route("/api/v1/sellers", web::get().to(whoami))
                    .route("/api/v1/sellers", web::post().to(whoami)),
            )
            .await
        };
    }

    fn status_of(result: Result<ServiceResponse, Error>) -> StatusCode {
        match result {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        }
    }

    #[actix_web::test]
    async fn test_public_path_needs_no_token() {
        let app = app!();
        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(status_of(test::try_call_service(&app, req).await), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_token_is_401() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/v1/sellers").to_request();
        assert_eq!(
            status_of(test::try_call_service(&app, req).await),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let app = app!();
        let token = jwt().generate_refresh_token(1, AdminRole::Admin).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/v1/sellers")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(
            status_of(test::try_call_service(&app, req).await),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_valid_token_exposes_current_admin() {
        let app = app!();
        let token = jwt().generate_access_token(42, AdminRole::Admin).unwrap();
        let req = test::TestRequest::get()
            .uri("/api/v1/sellers")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "42");
    }

    #[actix_web::test]
    async fn test_viewer_cannot_write() {
        let app = app!();
        let token = jwt().generate_access_token(7, AdminRole::Viewer).unwrap();

        let read = test::TestRequest::get()
            .uri("/api/v1/sellers")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(status_of(test::try_call_service(&app, read).await), StatusCode::OK);

        let write = test::TestRequest::post()
            .uri("/api/v1/sellers")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        assert_eq!(
            status_of(test::try_call_service(&app, write).await),
            StatusCode::FORBIDDEN
        );
    }
}
