use crate::models::*;
use crate::services::SellerService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/sellers",
    tag = "sellers",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("status" = Option<String>, Query, description = "pending/active/suspended/withdrawn"),
        ("keyword" = Option<String>, Query, description = "상호명 또는 이메일")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "판매자 목록"),
        (status = 401, description = "인증 필요")
    )
)]
pub async fn list_sellers(
    seller_service: web::Data<SellerService>,
    query: web::Query<SellerQuery>,
) -> Result<HttpResponse> {
    match seller_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/sellers/{id}",
    tag = "sellers",
    params(("id" = i64, Path, description = "판매자 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "판매자 상세", body = SellerResponse),
        (status = 404, description = "판매자 없음")
    )
)]
pub async fn get_seller(
    seller_service: web::Data<SellerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match seller_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/sellers",
    tag = "sellers",
    request_body = CreateSellerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "판매자 등록", body = SellerResponse),
        (status = 400, description = "요청 파라미터 오류"),
        (status = 409, description = "사업자등록번호 중복")
    )
)]
pub async fn create_seller(
    seller_service: web::Data<SellerService>,
    request: web::Json<CreateSellerRequest>,
) -> Result<HttpResponse> {
    match seller_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/sellers/{id}",
    tag = "sellers",
    params(("id" = i64, Path, description = "판매자 ID")),
    request_body = UpdateSellerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "판매자 수정", body = SellerResponse),
        (status = 404, description = "판매자 없음")
    )
)]
pub async fn update_seller(
    seller_service: web::Data<SellerService>,
    path: web::Path<i64>,
    request: web::Json<UpdateSellerRequest>,
) -> Result<HttpResponse> {
    match seller_service
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
    patch,
    path = "/sellers/{id}/status",
    tag = "sellers",
    params(("id" = i64, Path, description = "판매자 ID")),
    request_body = UpdateSellerStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "판매자 상태 변경", body = SellerResponse),
        (status = 404, description = "판매자 없음")
    )
)]
pub async fn update_seller_status(
    seller_service: web::Data<SellerService>,
    path: web::Path<i64>,
    request: web::Json<UpdateSellerStatusRequest>,
) -> Result<HttpResponse> {
    match seller_service
        .update_status(path.into_inner(), request.status)
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
    path = "/sellers/{id}",
    tag = "sellers",
    params(("id" = i64, Path, description = "판매자 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "판매자 삭제", body = DeletedResponse),
        (status = 409, description = "등록된 상품이 있음")
    )
)]
pub async fn delete_seller(
    seller_service: web::Data<SellerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match seller_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn seller_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sellers")
            .route("", web::get().to(list_sellers))
            .route("", web::post().to(create_seller))
            .route("/{id}", web::get().to(get_seller))
            .route("/{id}", web::put().to(update_seller))
            .route("/{id}", web::delete().to(delete_seller))
            .route("/{id}/status", web::patch().to(update_seller_status)),
    );
}
