use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::config::MediaConfig;
use crate::error::{AppError, AppResult};
use crate::media::{ObjectStore, resize_to};

/// 원본 업로드 완료 알림
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub key: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// 생성한 파생 이미지 키 (크기 순서 그대로)
    Processed(Vec<String>),
    AlreadyProcessed,
    NotAnImage,
}

pub struct MediaProcessor {
    store: Arc<dyn ObjectStore>,
    sizes: Vec<u32>,
    processed_prefix: String,
}

impl MediaProcessor {
    pub fn new(store: Arc<dyn ObjectStore>, config: &MediaConfig) -> Self {
        Self {
            store,
            sizes: config.sizes.clone(),
            processed_prefix: config.processed_prefix.clone(),
        }
    }

    /// 파생 이미지 키면 true. 다시 처리하면 무한 루프가 된다.
    pub fn is_processed_key(&self, key: &str) -> bool {
        key.split('/').any(|segment| segment == self.processed_prefix)
    }

    pub fn output_key(&self, size: u32, key: &str) -> String {
        let file_name = key.rsplit('/').next().unwrap_or(key);
        format!("{}/{size}/{file_name}", self.processed_prefix)
    }

    /// 원본 하나에서 나오는 파생 이미지 키 전부
    pub fn output_keys(&self, key: &str) -> Vec<String> {
        self.sizes
            .iter()
            .map(|&size| self.output_key(size, key))
            .collect()
    }

    /// 모든 크기를 동시에 만들고 전부 저장된 뒤에 끝난다
    pub async fn handle(&self, event: &UploadEvent) -> AppResult<ProcessOutcome> {
        if self.is_processed_key(&event.key) {
            log::debug!("Skipping already processed object {}", event.key);
            return Ok(ProcessOutcome::AlreadyProcessed);
        }
        if !event.content_type.starts_with("image/") {
            log::debug!(
                "Skipping non-image object {} ({})",
                event.key,
                event.content_type
            );
            return Ok(ProcessOutcome::NotAnImage);
        }

        let original = Arc::new(self.store.get(&event.key).await?);
        let jobs = self.sizes.iter().map(|&size| {
            let original = Arc::clone(&original);
            let store = Arc::clone(&self.store);
            let key = self.output_key(size, &event.key);
            let content_type = event.content_type.clone();
            async move {
                let resized = tokio::task::spawn_blocking(move || resize_to(&original, size))
                    .await
                    .map_err(|e| AppError::InternalError(format!("resize task failed: {e}")))??;
                store.put(&key, resized, &content_type).await?;
                Ok::<_, AppError>(key)
            }
        });
        let keys = try_join_all(jobs).await?;

        log::info!("Processed {} into {} sizes", event.key, keys.len());
        Ok(ProcessOutcome::Processed(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::storage::memory::MemoryObjectStore;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();
        buf.into_inner()
    }

    fn processor(store: Arc<MemoryObjectStore>) -> MediaProcessor {
        MediaProcessor::new(store, &MediaConfig::default())
    }

    #[tokio::test]
    async fn test_produces_every_size() {
        let store = Arc::new(MemoryObjectStore::default());
        store
            .put("uploads/abc.jpg", jpeg(1600, 900), "image/jpeg")
            .await
            .unwrap();

        let outcome = processor(store.clone())
            .handle(&UploadEvent {
                key: "uploads/abc.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ProcessOutcome::Processed(vec![
                "processed/1200/abc.jpg".to_string(),
                "processed/800/abc.jpg".to_string(),
                "processed/400/abc.jpg".to_string(),
                "processed/200/abc.jpg".to_string(),
            ])
        );

        let small = store.get("processed/200/abc.jpg").await.unwrap();
        assert_eq!(image::guess_format(&small).unwrap(), ImageFormat::Jpeg);
        let img = image::load_from_memory(&small).unwrap();
        assert_eq!((img.width(), img.height()), (200, 113));
        assert_eq!(
            store.content_type("processed/1200/abc.jpg").as_deref(),
            Some("image/jpeg")
        );
    }

    #[tokio::test]
    async fn test_skips_processed_keys() {
        let store = Arc::new(MemoryObjectStore::default());
        let outcome = processor(store.clone())
            .handle(&UploadEvent {
                key: "processed/800/abc.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(outcome, ProcessOutcome::AlreadyProcessed);
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_skips_non_images() {
        let store = Arc::new(MemoryObjectStore::default());
        store
            .put("uploads/manual.pdf", b"%PDF-1.4".to_vec(), "application/pdf")
            .await
            .unwrap();
        let outcome = processor(store.clone())
            .handle(&UploadEvent {
                key: "uploads/manual.pdf".to_string(),
                content_type: "application/pdf".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(outcome, ProcessOutcome::NotAnImage);
        assert_eq!(store.keys(), vec!["uploads/manual.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_original_fails() {
        let store = Arc::new(MemoryObjectStore::default());
        let err = processor(store)
            .handle(&UploadEvent {
                key: "uploads/gone.png".to_string(),
                content_type: "image/png".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
