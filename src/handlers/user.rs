use crate::models::*;
use crate::services::UserService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수"),
        ("status" = Option<String>, Query, description = "active/dormant/withdrawn"),
        ("keyword" = Option<String>, Query, description = "이름 또는 이메일")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "회원 목록"),
        (status = 401, description = "인증 필요")
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    match user_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "회원 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "회원 상세 (배송지, 주문 통계 포함)", body = UserDetailResponse),
        (status = 404, description = "회원 없음")
    )
)]
pub async fn get_user(
    user_service: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match user_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "회원 ID")),
    request_body = UpdateUserRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "회원 수정", body = UserResponse),
        (status = 404, description = "회원 없음")
    )
)]
pub async fn update_user(
    user_service: web::Data<UserService>,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    match user_service
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
    path = "/users/{id}/status",
    tag = "users",
    params(("id" = i64, Path, description = "회원 ID")),
    request_body = UpdateUserStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "회원 상태 변경", body = UserResponse),
        (status = 404, description = "회원 없음")
    )
)]
pub async fn update_user_status(
    user_service: web::Data<UserService>,
    path: web::Path<i64>,
    request: web::Json<UpdateUserStatusRequest>,
) -> Result<HttpResponse> {
    match user_service
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

/// 실제 삭제 대신 탈퇴 처리
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "회원 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "탈퇴 처리", body = UserResponse),
        (status = 404, description = "회원 없음")
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match user_service.delete(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user))
            .route("/{id}/status", web::patch().to(update_user_status)),
    );
}
