use crate::models::*;
use crate::services::TermService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/terms",
    tag = "terms",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("term_type" = Option<String>, Query, description = "약관 유형"),
        ("is_active" = Option<bool>, Query, description = "활성 여부")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "약관 목록")
    )
)]
pub async fn list_terms(
    term_service: web::Data<TermService>,
    query: web::Query<TermQuery>,
) -> Result<HttpResponse> {
    match term_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/terms/{id}",
    tag = "terms",
    params(("id" = i64, Path, description = "약관 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "약관 상세", body = TermResponse),
        (status = 404, description = "약관 없음")
    )
)]
pub async fn get_term(
    term_service: web::Data<TermService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match term_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/terms",
    tag = "terms",
    request_body = CreateTermRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "약관 등록", body = TermResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_term(
    term_service: web::Data<TermService>,
    request: web::Json<CreateTermRequest>,
) -> Result<HttpResponse> {
    match term_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/terms/{id}",
    tag = "terms",
    params(("id" = i64, Path, description = "약관 ID")),
    request_body = UpdateTermRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "약관 수정", body = TermResponse),
        (status = 404, description = "약관 없음")
    )
)]
pub async fn update_term(
    term_service: web::Data<TermService>,
    path: web::Path<i64>,
    request: web::Json<UpdateTermRequest>,
) -> Result<HttpResponse> {
    match term_service
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
    path = "/terms/{id}",
    tag = "terms",
    params(("id" = i64, Path, description = "약관 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "약관 삭제", body = DeletedResponse),
        (status = 404, description = "약관 없음")
    )
)]
pub async fn delete_term(
    term_service: web::Data<TermService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match term_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 같은 유형의 다른 버전은 비활성화된다
#[utoipa::path(
    post,
    path = "/terms/{id}/activate",
    tag = "terms",
    params(("id" = i64, Path, description = "약관 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "약관 활성화", body = TermResponse),
        (status = 404, description = "약관 없음")
    )
)]
pub async fn activate_term(
    term_service: web::Data<TermService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match term_service.activate(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn term_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/terms")
            .route("", web::get().to(list_terms))
            .route("", web::post().to(create_term))
            .route("/{id}", web::get().to(get_term))
            .route("/{id}", web::put().to(update_term))
            .route("/{id}", web::delete().to(delete_term))
            .route("/{id}/activate", web::post().to(activate_term)),
    );
}
