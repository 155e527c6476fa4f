use crate::models::*;
use crate::services::ReviewService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "reviews",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("product_id" = Option<i64>, Query, description = "상품 ID"),
        ("is_hidden" = Option<bool>, Query, description = "숨김 여부")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "리뷰 목록")
    )
)]
pub async fn list_reviews(
    review_service: web::Data<ReviewService>,
    query: web::Query<ReviewQuery>,
) -> Result<HttpResponse> {
    match review_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/reviews/{id}/visibility",
    tag = "reviews",
    params(("id" = i64, Path, description = "리뷰 ID")),
    request_body = UpdateReviewVisibilityRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "숨김/노출 변경", body = ReviewResponse),
        (status = 404, description = "리뷰 없음")
    )
)]
pub async fn update_review_visibility(
    review_service: web::Data<ReviewService>,
    path: web::Path<i64>,
    request: web::Json<UpdateReviewVisibilityRequest>,
) -> Result<HttpResponse> {
    match review_service
        .set_hidden(path.into_inner(), request.is_hidden)
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
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "리뷰 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "리뷰 삭제", body = DeletedResponse),
        (status = 404, description = "리뷰 없음")
    )
)]
pub async fn delete_review(
    review_service: web::Data<ReviewService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match review_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn review_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::get().to(list_reviews))
            .route("/{id}", web::delete().to(delete_review))
            .route("/{id}/visibility", web::patch().to(update_review_visibility)),
    );
}
