use crate::models::*;
use crate::services::ErrorReportService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/errorReport",
    tag = "error-reports",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("status" = Option<String>, Query, description = "received/in_progress/resolved"),
        ("seller_id" = Option<i64>, Query, description = "판매자 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오류 신고 목록")
    )
)]
pub async fn list_error_reports(
    error_report_service: web::Data<ErrorReportService>,
    query: web::Query<ErrorReportQuery>,
) -> Result<HttpResponse> {
    match error_report_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/errorReport/{id}",
    tag = "error-reports",
    params(("id" = i64, Path, description = "오류 신고 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오류 신고 상세", body = ErrorReportResponse),
        (status = 404, description = "오류 신고 없음")
    )
)]
pub async fn get_error_report(
    error_report_service: web::Data<ErrorReportService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match error_report_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/errorReport",
    tag = "error-reports",
    request_body = CreateErrorReportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오류 신고 등록", body = ErrorReportResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_error_report(
    error_report_service: web::Data<ErrorReportService>,
    request: web::Json<CreateErrorReportRequest>,
) -> Result<HttpResponse> {
    match error_report_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/errorReport/{id}",
    tag = "error-reports",
    params(("id" = i64, Path, description = "오류 신고 ID")),
    request_body = UpdateErrorReportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오류 신고 수정", body = ErrorReportResponse),
        (status = 404, description = "오류 신고 없음")
    )
)]
pub async fn update_error_report(
    error_report_service: web::Data<ErrorReportService>,
    path: web::Path<i64>,
    request: web::Json<UpdateErrorReportRequest>,
) -> Result<HttpResponse> {
    match error_report_service
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
    path = "/errorReport/{id}",
    tag = "error-reports",
    params(("id" = i64, Path, description = "오류 신고 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "오류 신고 삭제", body = DeletedResponse),
        (status = 404, description = "오류 신고 없음")
    )
)]
pub async fn delete_error_report(
    error_report_service: web::Data<ErrorReportService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match error_report_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn error_report_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/errorReport")
            .route("", web::get().to(list_error_reports))
            .route("", web::post().to(create_error_report))
            .route("/{id}", web::get().to(get_error_report))
            .route("/{id}", web::put().to(update_error_report))
            .route("/{id}", web::delete().to(delete_error_report)),
    );
}
