use crate::models::*;
use crate::services::InquiryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/inquiries",
    tag = "inquiries",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("status" = Option<String>, Query, description = "pending/answered/closed"),
        ("category" = Option<String>, Query, description = "분류"),
        ("seller_id" = Option<i64>, Query, description = "판매자 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "문의 목록")
    )
)]
pub async fn list_inquiries(
    inquiry_service: web::Data<InquiryService>,
    query: web::Query<InquiryQuery>,
) -> Result<HttpResponse> {
    match inquiry_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/inquiries/{id}",
    tag = "inquiries",
    params(("id" = i64, Path, description = "문의 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "문의 상세", body = InquiryResponse),
        (status = 404, description = "문의 없음")
    )
)]
pub async fn get_inquiry(
    inquiry_service: web::Data<InquiryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match inquiry_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/inquiries",
    tag = "inquiries",
    request_body = CreateInquiryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "문의 등록", body = InquiryResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_inquiry(
    inquiry_service: web::Data<InquiryService>,
    request: web::Json<CreateInquiryRequest>,
) -> Result<HttpResponse> {
    match inquiry_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/inquiries/{id}",
    tag = "inquiries",
    params(("id" = i64, Path, description = "문의 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "문의 삭제", body = DeletedResponse),
        (status = 404, description = "문의 없음")
    )
)]
pub async fn delete_inquiry(
    inquiry_service: web::Data<InquiryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match inquiry_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/inquiries/{id}/answer",
    tag = "inquiries",
    params(("id" = i64, Path, description = "문의 ID")),
    request_body = AnswerInquiryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "답변 등록", body = InquiryResponse),
        (status = 409, description = "종료된 문의")
    )
)]
pub async fn answer_inquiry(
    inquiry_service: web::Data<InquiryService>,
    path: web::Path<i64>,
    request: web::Json<AnswerInquiryRequest>,
) -> Result<HttpResponse> {
    match inquiry_service
        .answer(path.into_inner(), request.into_inner())
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
    post,
    path = "/inquiries/{id}/close",
    tag = "inquiries",
    params(("id" = i64, Path, description = "문의 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "문의 종료", body = InquiryResponse),
        (status = 409, description = "이미 종료됨")
    )
)]
pub async fn close_inquiry(
    inquiry_service: web::Data<InquiryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match inquiry_service.close(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn inquiry_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/inquiries")
            .route("", web::get().to(list_inquiries))
            .route("", web::post().to(create_inquiry))
            .route("/{id}", web::get().to(get_inquiry))
            .route("/{id}", web::delete().to(delete_inquiry))
            .route("/{id}/answer", web::post().to(answer_inquiry))
            .route("/{id}/close", web::post().to(close_inquiry)),
    );
}
