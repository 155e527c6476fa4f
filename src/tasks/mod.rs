//! 백그라운드 작업.
//!
//! 업로드 이벤트 큐와 미디어 워커. `spawn_media_worker` 는 시작할 때 한 번 호출하고,
//! 돌려받은 송신 핸들은 첨부파일 서비스에 넘긴다.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};

use crate::media::{MediaProcessor, ProcessOutcome, UploadEvent};

/// 업로드 이벤트 큐 크기
pub const UPLOAD_QUEUE_CAPACITY: usize = 64;

/// 동시에 처리하는 업로드 이벤트 수
pub const MEDIA_WORKER_CONCURRENCY: usize = 4;

/// 미디어 워커를 띄우고 이벤트 송신 핸들을 돌려준다.
///
/// - 이벤트마다 태스크 하나를 띄운다. 재시도는 없고 실패는 로그만 남긴다.
/// - 처리 중인 이벤트가 `MEDIA_WORKER_CONCURRENCY` 개면 큐를 비우지 않으므로,
///   큐가 차면 업로드 쪽 `send` 가 기다린다.
/// - 모든 송신 핸들이 닫히면 워커도 끝난다.
pub fn spawn_media_worker(processor: Arc<MediaProcessor>) -> mpsc::Sender<UploadEvent> {
    spawn_media_worker_with(processor, UPLOAD_QUEUE_CAPACITY, MEDIA_WORKER_CONCURRENCY)
}

pub fn spawn_media_worker_with(
    processor: Arc<MediaProcessor>,
    capacity: usize,
    concurrency: usize,
) -> mpsc::Sender<UploadEvent> {
    let (tx, mut rx) = mpsc::channel::<UploadEvent>(capacity);
    let permits = Arc::new(Semaphore::new(concurrency));

    tokio::spawn(async move {
        loop {
            // 자리가 날 때까지 다음 이벤트를 꺼내지 않는다
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };
            let Some(event) = rx.recv().await else {
                break;
            };
            let processor = Arc::clone(&processor);
            tokio::spawn(async move {
                let _permit = permit;
                match processor.handle(&event).await {
                    Ok(ProcessOutcome::Processed(keys)) => {
                        log::debug!("Upload {} produced {keys:?}", event.key)
                    }
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to process upload {}: {e:?}", event.key),
                }
            });
        }
        log::info!("Media worker stopped");
    });

    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MediaConfig;
    use crate::error::{AppError, AppResult};
    use crate::media::ObjectStore;
    use crate::media::storage::memory::MemoryObjectStore;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;
    use std::time::Duration;

    #[tokio::test]
    async fn test_worker_processes_queued_uploads() {
        let store = Arc::new(MemoryObjectStore::default());
        let mut png = Cursor::new(Vec::new());
        RgbImage::new(300, 300)
            .write_to(&mut png, ImageFormat::Png)
            .unwrap();
        store
            .put("uploads/p.png", png.into_inner(), "image/png")
            .await
            .unwrap();

        let config = MediaConfig {
            sizes: vec![200, 100],
            processed_prefix: "processed".to_string(),
        };
        let tx = spawn_media_worker(Arc::new(MediaProcessor::new(store.clone(), &config)));
        tx.send(UploadEvent {
            key: "uploads/p.png".to_string(),
            content_type: "image/png".to_string(),
        })
        .await
        .unwrap();

        let expected = vec![
            "processed/100/p.png".to_string(),
            "processed/200/p.png".to_string(),
            "uploads/p.png".to_string(),
        ];
        for _ in 0..100 {
            if store.keys() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("worker did not finish: {:?}", store.keys());
    }

    /// 신호를 받기 전까지 원본 읽기를 멈추는 저장소
    struct GatedStore {
        gate: Semaphore,
    }

    #[async_trait::async_trait]
    impl ObjectStore for GatedStore {
        async fn get(&self, key: &str) -> AppResult<Vec<u8>> {
            let _open = self.gate.acquire().await;
            Err(AppError::NotFound(key.to_string()))
        }
        async fn put(&self, _key: &str, _bytes: Vec<u8>, _content_type: &str) -> AppResult<()> {
            Ok(())
        }
        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_busy_worker_applies_backpressure() {
        let store = Arc::new(GatedStore {
            gate: Semaphore::new(0),
        });
        let processor = Arc::new(MediaProcessor::new(store.clone(), &MediaConfig::default()));
        let tx = spawn_media_worker_with(processor, 1, 1);
        let event = |n: u32| UploadEvent {
            key: format!("uploads/{n}.png"),
            content_type: "image/png".to_string(),
        };

        // 1번은 처리 중, 2번은 큐에서 대기
        tx.send(event(1)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(event(2)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matches!(
            tx.try_send(event(3)),
            Err(mpsc::error::TrySendError::Full(_))
        ));

        // 처리가 풀리면 큐가 다시 빈다
        store.gate.add_permits(10);
        tokio::time::timeout(Duration::from_secs(2), tx.send(event(3)))
            .await
            .unwrap()
            .unwrap();
    }
}
