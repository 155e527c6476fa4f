use crate::models::*;
use crate::services::BannerService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/banners",
    tag = "banners",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("position" = Option<String>, Query, description = "노출 위치"),
        ("active_only" = Option<bool>, Query, description = "현재 노출 중인 배너만")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "배너 목록")
    )
)]
pub async fn list_banners(
    banner_service: web::Data<BannerService>,
    query: web::Query<BannerQuery>,
) -> Result<HttpResponse> {
    match banner_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/banners/{id}",
    tag = "banners",
    params(("id" = i64, Path, description = "배너 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "배너 상세", body = BannerResponse),
        (status = 404, description = "배너 없음")
    )
)]
pub async fn get_banner(
    banner_service: web::Data<BannerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match banner_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/banners",
    tag = "banners",
    request_body = CreateBannerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "배너 등록", body = BannerResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_banner(
    banner_service: web::Data<BannerService>,
    request: web::Json<CreateBannerRequest>,
) -> Result<HttpResponse> {
    match banner_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/banners/{id}",
    tag = "banners",
    params(("id" = i64, Path, description = "배너 ID")),
    request_body = UpdateBannerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "배너 수정", body = BannerResponse),
        (status = 404, description = "배너 없음")
    )
)]
pub async fn update_banner(
    banner_service: web::Data<BannerService>,
    path: web::Path<i64>,
    request: web::Json<UpdateBannerRequest>,
) -> Result<HttpResponse> {
    match banner_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/banners/{id}",
    tag = "banners",
    params(("id" = i64, Path, description = "배너 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "배너 삭제", body = DeletedResponse),
        (status = 404, description = "배너 없음")
    )
)]
pub async fn delete_banner(
    banner_service: web::Data<BannerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match banner_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn banner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/banners")
            .route("", web::get().to(list_banners))
            .route("", web::post().to(create_banner))
            .route("/{id}", web::get().to(get_banner))
            .route("/{id}", web::put().to(update_banner))
            .route("/{id}", web::delete().to(delete_banner)),
    );
}
