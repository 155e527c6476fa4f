use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // 관리자 콘솔 도메인은 배포 환경에서 프록시가 제한한다
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
