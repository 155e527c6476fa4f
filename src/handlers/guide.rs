use crate::models::*;
use crate::services::GuideService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/guides",
    tag = "guides",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("category" = Option<String>, Query, description = "분류"),
        ("is_published" = Option<bool>, Query, description = "게시 여부")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "가이드 목록")
    )
)]
pub async fn list_guides(
    guide_service: web::Data<GuideService>,
    query: web::Query<CategoryQuery>,
) -> Result<HttpResponse> {
    match guide_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/guides/{id}",
    tag = "guides",
    params(("id" = i64, Path, description = "가이드 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "가이드 상세", body = GuideResponse),
        (status = 404, description = "가이드 없음")
    )
)]
pub async fn get_guide(
    guide_service: web::Data<GuideService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match guide_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/guides",
    tag = "guides",
    request_body = CreateGuideRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "가이드 등록", body = GuideResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_guide(
    guide_service: web::Data<GuideService>,
    request: web::Json<CreateGuideRequest>,
) -> Result<HttpResponse> {
    match guide_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/guides/{id}",
    tag = "guides",
    params(("id" = i64, Path, description = "가이드 ID")),
    request_body = UpdateGuideRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "가이드 수정", body = GuideResponse),
        (status = 404, description = "가이드 없음")
    )
)]
pub async fn update_guide(
    guide_service: web::Data<GuideService>,
    path: web::Path<i64>,
    request: web::Json<UpdateGuideRequest>,
) -> Result<HttpResponse> {
    match guide_service
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
    path = "/guides/{id}",
    tag = "guides",
    params(("id" = i64, Path, description = "가이드 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "가이드 삭제", body = DeletedResponse),
        (status = 404, description = "가이드 없음")
    )
)]
pub async fn delete_guide(
    guide_service: web::Data<GuideService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match guide_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn guide_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/guides")
            .route("", web::get().to(list_guides))
            .route("", web::post().to(create_guide))
            .route("/{id}", web::get().to(get_guide))
            .route("/{id}", web::put().to(update_guide))
            .route("/{id}", web::delete().to(delete_guide)),
    );
}
