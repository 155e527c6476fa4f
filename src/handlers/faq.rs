use crate::models::*;
use crate::services::FaqService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/faq",
    tag = "faq",
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
        (status = 200, description = "FAQ 목록")
    )
)]
pub async fn list_faqs(
    faq_service: web::Data<FaqService>,
    query: web::Query<CategoryQuery>,
) -> Result<HttpResponse> {
    match faq_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/faq/{id}",
    tag = "faq",
    params(("id" = i64, Path, description = "FAQ ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "FAQ 상세", body = FaqResponse),
        (status = 404, description = "FAQ 없음")
    )
)]
pub async fn get_faq(
    faq_service: web::Data<FaqService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match faq_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/faq",
    tag = "faq",
    request_body = CreateFaqRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "FAQ 등록", body = FaqResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_faq(
    faq_service: web::Data<FaqService>,
    request: web::Json<CreateFaqRequest>,
) -> Result<HttpResponse> {
    match faq_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/faq/{id}",
    tag = "faq",
    params(("id" = i64, Path, description = "FAQ ID")),
    request_body = UpdateFaqRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "FAQ 수정", body = FaqResponse),
        (status = 404, description = "FAQ 없음")
    )
)]
pub async fn update_faq(
    faq_service: web::Data<FaqService>,
    path: web::Path<i64>,
    request: web::Json<UpdateFaqRequest>,
) -> Result<HttpResponse> {
    match faq_service
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
    path = "/faq/{id}",
    tag = "faq",
    params(("id" = i64, Path, description = "FAQ ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "FAQ 삭제", body = DeletedResponse),
        (status = 404, description = "FAQ 없음")
    )
)]
pub async fn delete_faq(
    faq_service: web::Data<FaqService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match faq_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn faq_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/faq")
            .route("", web::get().to(list_faqs))
            .route("", web::post().to(create_faq))
            .route("/{id}", web::get().to(get_faq))
            .route("/{id}", web::put().to(update_faq))
            .route("/{id}", web::delete().to(delete_faq)),
    );
}
