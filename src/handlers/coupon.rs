use crate::models::*;
use crate::services::CouponService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/coupons",
    tag = "coupons",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("is_active" = Option<bool>, Query, description = "활성 여부"),
        ("seller_id" = Option<i64>, Query, description = "판매자 전용 쿠폰"),
        ("keyword" = Option<String>, Query, description = "코드 또는 이름")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "쿠폰 목록")
    )
)]
pub async fn list_coupons(
    coupon_service: web::Data<CouponService>,
    query: web::Query<CouponQuery>,
) -> Result<HttpResponse> {
    match coupon_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/coupons/{id}",
    tag = "coupons",
    params(("id" = i64, Path, description = "쿠폰 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "쿠폰 상세", body = CouponResponse),
        (status = 404, description = "쿠폰 없음")
    )
)]
pub async fn get_coupon(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match coupon_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/coupons",
    tag = "coupons",
    request_body = CreateCouponRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "쿠폰 생성", body = CouponResponse),
        (status = 400, description = "요청 파라미터 오류"),
        (status = 409, description = "쿠폰 코드 중복")
    )
)]
pub async fn create_coupon(
    coupon_service: web::Data<CouponService>,
    request: web::Json<CreateCouponRequest>,
) -> Result<HttpResponse> {
    match coupon_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/coupons/{id}",
    tag = "coupons",
    params(("id" = i64, Path, description = "쿠폰 ID")),
    request_body = UpdateCouponRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "쿠폰 수정", body = CouponResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn update_coupon(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
    request: web::Json<UpdateCouponRequest>,
) -> Result<HttpResponse> {
    match coupon_service
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
    path = "/coupons/{id}",
    tag = "coupons",
    params(("id" = i64, Path, description = "쿠폰 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "쿠폰 삭제", body = DeletedResponse),
        (status = 409, description = "사용된 쿠폰이 있음")
    )
)]
pub async fn delete_coupon(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match coupon_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/coupons/{id}/issue",
    tag = "coupons",
    params(("id" = i64, Path, description = "쿠폰 ID")),
    request_body = IssueCouponRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "쿠폰 발급 결과", body = IssueCouponResponse),
        (status = 409, description = "발급할 수 없는 쿠폰")
    )
)]
pub async fn issue_coupon(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
    request: web::Json<IssueCouponRequest>,
) -> Result<HttpResponse> {
    match coupon_service
        .issue(path.into_inner(), request.into_inner())
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
    get,
    path = "/coupons/{id}/issued",
    tag = "coupons",
    params(
        ("id" = i64, Path, description = "쿠폰 ID"),
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "발급 내역")
    )
)]
pub async fn list_issued_coupons(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match coupon_service.list_issued(path.into_inner(), &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/coupons/{id}/discount-preview",
    tag = "coupons",
    params(
        ("id" = i64, Path, description = "쿠폰 ID"),
        ("order_amount" = i64, Query, description = "주문 금액")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "할인 금액 미리보기", body = DiscountPreviewResponse)
    )
)]
pub async fn preview_discount(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
    query: web::Query<DiscountPreviewQuery>,
) -> Result<HttpResponse> {
    match coupon_service
        .preview_discount(path.into_inner(), query.order_amount)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn coupon_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/coupons")
            .route("", web::get().to(list_coupons))
            .route("", web::post().to(create_coupon))
            .route("/{id}", web::get().to(get_coupon))
            .route("/{id}", web::put().to(update_coupon))
            .route("/{id}", web::delete().to(delete_coupon))
            .route("/{id}/issue", web::post().to(issue_coupon))
            .route("/{id}/issued", web::get().to(list_issued_coupons))
            .route("/{id}/discount-preview", web::get().to(preview_discount)),
    );
}
