use std::sync::Arc;

use crate::database::SharedPool;
use crate::entities::attachment_entity as attachments;
use crate::error::{AppError, AppResult};
use crate::media::{MediaProcessor, ObjectStore, UploadEvent};
use crate::models::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use tokio::sync::mpsc;

/// 원본 업로드 키 접두사
pub const UPLOAD_PREFIX: &str = "uploads";

#[derive(Clone)]
pub struct AttachmentService {
    pool: SharedPool,
    store: Arc<dyn ObjectStore>,
    media: Arc<MediaProcessor>,
    events: Option<mpsc::Sender<UploadEvent>>,
    max_upload_bytes: usize,
}

/// 원본 파일명에서 저장용 확장자를 뽑는다 (영숫자만, 소문자)
fn extension_of(original_name: &str) -> Option<String> {
    let (_, ext) = original_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

pub fn storage_key_for(original_name: &str) -> String {
    let id = uuid::Uuid::new_v4();
    match extension_of(original_name) {
        Some(ext) => format!("{UPLOAD_PREFIX}/{id}.{ext}"),
        None => format!("{UPLOAD_PREFIX}/{id}"),
    }
}

impl AttachmentService {
    pub fn new(
        pool: impl Into<SharedPool>,
        store: Arc<dyn ObjectStore>,
        media: Arc<MediaProcessor>,
        events: Option<mpsc::Sender<UploadEvent>>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            pool: pool.into(),
            store,
            media,
            events,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub async fn list(&self, params: &PaginationParams) -> AppResult<PaginatedResponse<AttachmentResponse>> {
        let select = attachments::Entity::find();
        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(attachments::Column::CreatedAt)
            .order_by_desc(attachments::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;
        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            params,
            total,
        ))
    }

    async fn find(&self, id: i64) -> AppResult<attachments::Model> {
        attachments::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attachment {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<AttachmentResponse> {
        Ok(self.find(id).await?.into())
    }

    /// 원본 저장, 메타데이터 기록, 업로드 이벤트 발행
    pub async fn upload(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<AttachmentResponse> {
        if bytes.is_empty() {
            return Err(AppError::ValidationError("Uploaded file is empty".to_string()));
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(AppError::ValidationError(format!(
                "File exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }

        let original_name = match original_name.trim() {
            "" => "upload".to_string(),
            name => name.chars().take(255).collect(),
        };
        let content_type = match content_type.trim() {
            "" => "application/octet-stream".to_string(),
            ct => ct.to_string(),
        };
        let key = storage_key_for(&original_name);
        let checksum = format!("{:x}", md5::compute(&bytes));
        let size = bytes.len() as i64;

        self.store.put(&key, bytes, &content_type).await?;

        let inserted = attachments::ActiveModel {
            original_name: Set(original_name),
            storage_key: Set(key.clone()),
            content_type: Set(content_type.clone()),
            size: Set(size),
            checksum: Set(checksum),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await;
        let attachment = match inserted {
            Ok(model) => model,
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&key).await {
                    log::warn!("Failed to remove orphaned object {key}: {cleanup}");
                }
                return Err(e.into());
            }
        };

        if let Some(events) = &self.events {
            let event = UploadEvent {
                key: key.clone(),
                content_type,
            };
            if events.send(event).await.is_err() {
                log::warn!("Media worker is not running; {key} will not be resized");
            }
        }

        log::info!("Attachment {} stored as {key} ({size} bytes)", attachment.id);
        Ok(attachment.into())
    }

    /// 메타데이터, 원본, 리사이즈된 파생 이미지를 함께 지운다
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let attachment = self.find(id).await?;
        attachments::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        self.store.delete(&attachment.storage_key).await?;
        // 이미지가 아니면 파생 키가 없고, 없는 키 삭제는 성공이다
        for key in self.media.output_keys(&attachment.storage_key) {
            self.store.delete(&key).await?;
        }
        log::info!("Attachment {id} deleted ({})", attachment.storage_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaConfig;
    use crate::media::storage::memory::MemoryObjectStore;
    use image::{ImageFormat, RgbImage};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::io::Cursor;

    fn media(store: &Arc<MemoryObjectStore>) -> Arc<MediaProcessor> {
        Arc::new(MediaProcessor::new(store.clone(), &MediaConfig::default()))
    }

    fn attachment(key: &str) -> attachments::Model {
        attachments::Model {
            id: 1,
            original_name: "photo.JPG".to_string(),
            storage_key: key.to_string(),
            content_type: "image/jpeg".to_string(),
            size: 5,
            checksum: "5d41402abc4b2a76b9719d911017c592".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_storage_key_shape() {
        let key = storage_key_for("photo.JPG");
        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".jpg"));
        assert_eq!(key.len(), "uploads/".len() + 36 + ".jpg".len());

        assert!(!storage_key_for("README").contains('.'));
        assert!(!storage_key_for("evil.p/hp").contains("p/hp"));
    }

    #[tokio::test]
    async fn test_upload_stores_object_and_emits_event() {
        let store = Arc::new(MemoryObjectStore::default());
        let (tx, mut rx) = mpsc::channel(4);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![attachment("uploads/placeholder.jpg")]])
            .into_connection();
        let service = AttachmentService::new(db, store.clone(), media(&store), Some(tx), 1024);

        let saved = service
            .upload("photo.JPG", "image/jpeg", b"hello".to_vec())
            .await
            .unwrap();
        assert_eq!(saved.checksum, "5d41402abc4b2a76b9719d911017c592");

        let keys = store.keys();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with("uploads/") && keys[0].ends_with(".jpg"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, keys[0]);
        assert_eq!(event.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let store = Arc::new(MemoryObjectStore::default());
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = AttachmentService::new(db, store.clone(), media(&store), None, 4);
        let err = service
            .upload("big.bin", "application/octet-stream", vec![0; 5])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_object_and_resized_copies() {
        let store = Arc::new(MemoryObjectStore::default());
        let mut jpeg = Cursor::new(Vec::new());
        RgbImage::new(64, 48)
            .write_to(&mut jpeg, ImageFormat::Jpeg)
            .unwrap();
        store
            .put("uploads/a.jpg", jpeg.into_inner(), "image/jpeg")
            .await
            .unwrap();
        let processor = media(&store);
        processor
            .handle(&UploadEvent {
                key: "uploads/a.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(store.keys().len(), 5);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![attachment("uploads/a.jpg")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        AttachmentService::new(db, store.clone(), processor, None, 1024)
            .delete(1)
            .await
            .unwrap();
        assert!(store.keys().is_empty());
    }
}
