use crate::models::*;
use crate::services::NoticeService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/notices",
    tag = "notices",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("is_published" = Option<bool>, Query, description = "게시 여부"),
        ("keyword" = Option<String>, Query, description = "제목")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "공지 목록")
    )
)]
pub async fn list_notices(
    notice_service: web::Data<NoticeService>,
    query: web::Query<NoticeQuery>,
) -> Result<HttpResponse> {
    match notice_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/notices/{id}",
    tag = "notices",
    params(("id" = i64, Path, description = "공지 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "공지 상세", body = NoticeResponse),
        (status = 404, description = "공지 없음")
    )
)]
pub async fn get_notice(
    notice_service: web::Data<NoticeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match notice_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/notices",
    tag = "notices",
    request_body = CreateNoticeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "공지 등록", body = NoticeResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_notice(
    notice_service: web::Data<NoticeService>,
    request: web::Json<CreateNoticeRequest>,
) -> Result<HttpResponse> {
    match notice_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/notices/{id}",
    tag = "notices",
    params(("id" = i64, Path, description = "공지 ID")),
    request_body = UpdateNoticeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "공지 수정", body = NoticeResponse),
        (status = 404, description = "공지 없음")
    )
)]
pub async fn update_notice(
    notice_service: web::Data<NoticeService>,
    path: web::Path<i64>,
    request: web::Json<UpdateNoticeRequest>,
) -> Result<HttpResponse> {
    match notice_service
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
    path = "/notices/{id}",
    tag = "notices",
    params(("id" = i64, Path, description = "공지 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "공지 삭제", body = DeletedResponse),
        (status = 404, description = "공지 없음")
    )
)]
pub async fn delete_notice(
    notice_service: web::Data<NoticeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match notice_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn notice_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notices")
            .route("", web::get().to(list_notices))
            .route("", web::post().to(create_notice))
            .route("/{id}", web::get().to(get_notice))
            .route("/{id}", web::put().to(update_notice))
            .route("/{id}", web::delete().to(delete_notice)),
    );
}
