use crate::models::*;
use crate::services::ProductService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("seller_id" = Option<i64>, Query, description = "판매자 ID"),
        ("status" = Option<String>, Query, description = "draft/on_sale/sold_out/hidden"),
        ("category" = Option<String>, Query, description = "카테고리"),
        ("keyword" = Option<String>, Query, description = "상품명")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "상품 목록"),
        (status = 401, description = "인증 필요")
    )
)]
pub async fn list_products(
    product_service: web::Data<ProductService>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse> {
    match product_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "상품 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "상품 상세 (이미지, 옵션, SKU)", body = ProductDetailResponse),
        (status = 404, description = "상품 없음")
    )
)]
pub async fn get_product(
    product_service: web::Data<ProductService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match product_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "상품 등록", body = ProductDetailResponse),
        (status = 400, description = "요청 파라미터 오류")
    )
)]
pub async fn create_product(
    product_service: web::Data<ProductService>,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    match product_service.create(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "상품 ID")),
    request_body = UpdateProductRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "상품 수정", body = ProductResponse),
        (status = 404, description = "상품 없음")
    )
)]
pub async fn update_product(
    product_service: web::Data<ProductService>,
    path: web::Path<i64>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    match product_service
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
    path = "/products/{id}/status",
    tag = "products",
    params(("id" = i64, Path, description = "상품 ID")),
    request_body = UpdateProductStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "상품 상태 변경", body = ProductResponse),
        (status = 404, description = "상품 없음")
    )
)]
pub async fn update_product_status(
    product_service: web::Data<ProductService>,
    path: web::Path<i64>,
    request: web::Json<UpdateProductStatusRequest>,
) -> Result<HttpResponse> {
    match product_service
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
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "상품 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "상품 삭제", body = DeletedResponse),
        (status = 404, description = "상품 없음")
    )
)]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match product_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product))
            .route("/{id}/status", web::patch().to(update_product_status)),
    );
}
