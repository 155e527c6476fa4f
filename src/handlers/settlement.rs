use crate::models::*;
use crate::services::SettlementService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/settlements",
    tag = "settlements",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("period_id" = Option<i64>, Query, description = "정산 기간 ID"),
        ("seller_id" = Option<i64>, Query, description = "판매자 ID"),
        ("status" = Option<String>, Query, description = "정산 상태")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 목록")
    )
)]
pub async fn list_settlements(
    settlement_service: web::Data<SettlementService>,
    query: web::Query<SettlementQuery>,
) -> Result<HttpResponse> {
    match settlement_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/settlements/{id}",
    tag = "settlements",
    params(("id" = i64, Path, description = "정산 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 상세 (라인 포함)", body = SettlementDetailResponse),
        (status = 404, description = "정산 없음")
    )
)]
pub async fn get_settlement(
    settlement_service: web::Data<SettlementService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match settlement_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/settlements/{id}/status",
    tag = "settlements",
    params(("id" = i64, Path, description = "정산 ID")),
    request_body = UpdateSettlementStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 상태 변경", body = SettlementResponse),
        (status = 409, description = "허용되지 않는 상태 전이")
    )
)]
pub async fn update_settlement_status(
    settlement_service: web::Data<SettlementService>,
    path: web::Path<i64>,
    request: web::Json<UpdateSettlementStatusRequest>,
) -> Result<HttpResponse> {
    match settlement_service
        .update_status(path.into_inner(), request.into_inner())
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
    path = "/settlements/{id}/adjust",
    tag = "settlements",
    params(("id" = i64, Path, description = "정산 ID")),
    request_body = AdjustSettlementRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "조정 금액 반영", body = SettlementResponse),
        (status = 409, description = "조정할 수 없는 상태")
    )
)]
pub async fn adjust_settlement(
    settlement_service: web::Data<SettlementService>,
    path: web::Path<i64>,
    request: web::Json<AdjustSettlementRequest>,
) -> Result<HttpResponse> {
    match settlement_service
        .adjust(path.into_inner(), request.into_inner())
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
    path = "/settlements/{id}/recalculate",
    tag = "settlements",
    params(("id" = i64, Path, description = "정산 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "재계산 결과", body = SettlementDetailResponse),
        (status = 409, description = "재계산할 수 없는 상태")
    )
)]
pub async fn recalculate_settlement(
    settlement_service: web::Data<SettlementService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match settlement_service.recalculate(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/settlements/periods",
    tag = "settlements",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("period_type" = Option<String>, Query, description = "weekly/monthly"),
        ("status" = Option<String>, Query, description = "preparing/processing/completed")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 기간 목록")
    )
)]
pub async fn list_periods(
    settlement_service: web::Data<SettlementService>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse> {
    match settlement_service.list_periods(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/settlements/periods/{id}",
    tag = "settlements",
    params(("id" = i64, Path, description = "정산 기간 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 기간", body = PeriodResponse),
        (status = 404, description = "정산 기간 없음")
    )
)]
pub async fn get_period(
    settlement_service: web::Data<SettlementService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match settlement_service.get_period(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/settlements/periods",
    tag = "settlements",
    request_body = CreatePeriodRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 기간 생성", body = PeriodResponse),
        (status = 400, description = "기간 형식 오류"),
        (status = 409, description = "같은 유형의 기간과 겹침")
    )
)]
pub async fn create_period(
    settlement_service: web::Data<SettlementService>,
    request: web::Json<CreatePeriodRequest>,
) -> Result<HttpResponse> {
    match settlement_service.create_period(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/settlements/periods/{id}/status",
    tag = "settlements",
    params(("id" = i64, Path, description = "정산 기간 ID")),
    request_body = UpdatePeriodStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "정산 기간 상태 변경", body = PeriodResponse),
        (status = 409, description = "허용되지 않는 상태 전이")
    )
)]
pub async fn update_period_status(
    settlement_service: web::Data<SettlementService>,
    path: web::Path<i64>,
    request: web::Json<UpdatePeriodStatusRequest>,
) -> Result<HttpResponse> {
    match settlement_service
        .update_period_status(path.into_inner(), request.status)
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
    path = "/settlements/periods/{id}/calculate",
    tag = "settlements",
    params(("id" = i64, Path, description = "정산 기간 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "기간 정산 계산 결과", body = CalculatePeriodResponse),
        (status = 409, description = "완료된 기간")
    )
)]
pub async fn calculate_period(
    settlement_service: web::Data<SettlementService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match settlement_service.calculate_period(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn settlement_config(cfg: &mut web::ServiceConfig) {
    // /periods 가 /{id} 보다 먼저 등록되어야 한다
    cfg.service(
        web::scope("/settlements")
            .route("", web::get().to(list_settlements))
            .route("/periods", web::get().to(list_periods))
            .route("/periods", web::post().to(create_period))
            .route("/periods/{id}", web::get().to(get_period))
            .route("/periods/{id}/status", web::patch().to(update_period_status))
            .route("/periods/{id}/calculate", web::post().to(calculate_period))
            .route("/{id}", web::get().to(get_settlement))
            .route("/{id}/status", web::patch().to(update_settlement_status))
            .route("/{id}/adjust", web::post().to(adjust_settlement))
            .route("/{id}/recalculate", web::post().to(recalculate_settlement)),
    );
}
