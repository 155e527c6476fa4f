use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("order_status" = Option<String>, Query, description = "주문 상태"),
        ("payment_status" = Option<String>, Query, description = "결제 상태"),
        ("delivery_status" = Option<String>, Query, description = "배송 상태"),
        ("user_id" = Option<i64>, Query, description = "회원 ID"),
        ("seller_id" = Option<i64>, Query, description = "판매자 ID"),
        ("keyword" = Option<String>, Query, description = "주문번호"),
        ("ordered_from" = Option<String>, Query, description = "주문일 시작 (RFC3339)"),
        ("ordered_to" = Option<String>, Query, description = "주문일 끝 (RFC3339)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "주문 목록"),
        (status = 401, description = "인증 필요")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/inconsistencies",
    tag = "orders",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "상태 조합이 맞지 않는 주문 목록", body = [OrderInconsistencyResponse])
    )
)]
pub async fn list_inconsistencies(order_service: web::Data<OrderService>) -> Result<HttpResponse> {
    match order_service.find_inconsistencies().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "주문 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "주문 상세", body = OrderDetailResponse),
        (status = 404, description = "주문 없음")
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    tag = "orders",
    params(("id" = i64, Path, description = "주문 ID")),
    request_body = UpdateOrderStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "주문 상태 변경", body = OrderDetailResponse),
        (status = 409, description = "허용되지 않는 상태 전이")
    )
)]
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse> {
    match order_service
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
    put,
    path = "/orders/{id}/delivery",
    tag = "orders",
    params(("id" = i64, Path, description = "주문 ID")),
    request_body = UpsertDeliveryRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "배송 정보 등록/수정", body = DeliveryResponse),
        (status = 409, description = "배송 정보를 등록할 수 없는 주문 상태")
    )
)]
pub async fn upsert_delivery(
    order_service: web::Data<OrderService>,
    path: web::Path<i64>,
    request: web::Json<UpsertDeliveryRequest>,
) -> Result<HttpResponse> {
    match order_service
        .upsert_delivery(path.into_inner(), request.into_inner())
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
    path = "/orders/{id}/items/{item_id}/refund",
    tag = "orders",
    params(
        ("id" = i64, Path, description = "주문 ID"),
        ("item_id" = i64, Path, description = "주문 상품 ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "주문 상품 환불", body = OrderDetailResponse),
        (status = 409, description = "환불할 수 없는 상태")
    )
)]
pub async fn refund_order_item(
    order_service: web::Data<OrderService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (order_id, item_id) = path.into_inner();
    match order_service.refund_item(order_id, item_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("/inconsistencies", web::get().to(list_inconsistencies))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}/status", web::patch().to(update_order_status))
            .route("/{id}/delivery", web::put().to(upsert_delivery))
            .route("/{id}/items/{item_id}/refund", web::post().to(refund_order_item)),
    );
}
