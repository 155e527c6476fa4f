use crate::error::AppError;
use crate::models::*;
use crate::services::AttachmentService;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, ResponseError, Result, web};
use futures_util::StreamExt;
use serde_json::json;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// 첫 번째 `file` 필드를 읽는다. 한도를 넘으면 즉시 중단
async fn read_file_field(mut payload: Multipart, max_bytes: usize) -> Result<UploadedFile, AppError> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {e}")))?;

        let Some(disposition) = field.content_disposition() else {
            continue;
        };
        if disposition.get_name() != Some("file") {
            continue;
        }
        let name = disposition
            .get_filename()
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string());
        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {e}")))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::ValidationError(format!(
                    "File exceeds the {max_bytes} byte upload limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile {
            name,
            content_type,
            bytes,
        });
    }

    Err(AppError::ValidationError(
        "Multipart field `file` is required".to_string(),
    ))
}

#[utoipa::path(
    get,
    path = "/attachments",
    tag = "attachments",
    params(
        ("page" = Option<u32>, Query, description = "페이지"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "첨부 파일 목록")
    )
)]
pub async fn list_attachments(
    attachment_service: web::Data<AttachmentService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match attachment_service.list(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/attachments/{id}",
    tag = "attachments",
    params(("id" = i64, Path, description = "첨부 파일 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "첨부 파일 메타데이터", body = AttachmentResponse),
        (status = 404, description = "첨부 파일 없음")
    )
)]
pub async fn get_attachment(
    attachment_service: web::Data<AttachmentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match attachment_service.get(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// multipart/form-data 의 `file` 필드
#[utoipa::path(
    post,
    path = "/attachments",
    tag = "attachments",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "업로드 완료", body = AttachmentResponse),
        (status = 400, description = "파일 없음 또는 용량 초과")
    )
)]
pub async fn upload_attachment(
    attachment_service: web::Data<AttachmentService>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let file = match read_file_field(payload, attachment_service.max_upload_bytes()).await {
        Ok(file) => file,
        Err(e) => return Ok(e.error_response()),
    };

    match attachment_service
        .upload(&file.name, &file.content_type, file.bytes)
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
    path = "/attachments/{id}",
    tag = "attachments",
    params(("id" = i64, Path, description = "첨부 파일 ID")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "첨부 파일 삭제", body = DeletedResponse),
        (status = 404, description = "첨부 파일 없음")
    )
)]
pub async fn delete_attachment(
    attachment_service: web::Data<AttachmentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match attachment_service.delete(id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": DeletedResponse { id, deleted: true }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn attachment_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attachments")
            .route("", web::get().to(list_attachments))
            .route("", web::post().to(upload_attachment))
            .route("/{id}", web::get().to(get_attachment))
            .route("/{id}", web::delete().to(delete_attachment)),
    );
}
