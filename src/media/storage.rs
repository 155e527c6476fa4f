use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

/// 키 기반 오브젝트 저장소
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Vec<u8>>;
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<()>;
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// 키는 `/` 로 구분된 상대 경로만 허용
pub fn validate_key(key: &str) -> AppResult<&Path> {
    let path = Path::new(key);
    let valid = !key.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if valid {
        Ok(path)
    } else {
        Err(AppError::ValidationError(format!("Invalid object key: {key}")))
    }
}

/// 로컬 디렉터리를 저장소로 쓰는 구현
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        Ok(self.root.join(validate_key(key)?))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn get(&self, key: &str) -> AppResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("Object {key} not found")))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        log::debug!("Stored object {key}");
        Ok(())
    }

    /// 없는 키 삭제는 성공으로 본다
    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// 테스트용 메모리 저장소
    #[derive(Default)]
    pub struct MemoryObjectStore {
        objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    }

    impl MemoryObjectStore {
        pub fn keys(&self) -> Vec<String> {
            let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
            keys.sort();
            keys
        }

        pub fn content_type(&self, key: &str) -> Option<String> {
            self.objects.lock().unwrap().get(key).map(|(_, ct)| ct.clone())
        }
    }

    #[async_trait]
    impl ObjectStore for MemoryObjectStore {
        async fn get(&self, key: &str) -> AppResult<Vec<u8>> {
            self.objects
                .lock()
                .unwrap()
                .get(key)
                .map(|(bytes, _)| bytes.clone())
                .ok_or_else(|| AppError::NotFound(format!("Object {key} not found")))
        }

        async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<()> {
            validate_key(key)?;
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), (bytes, content_type.to_string()));
            Ok(())
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.objects.lock().unwrap().remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(validate_key("uploads/a.png").is_ok());
        assert!(validate_key("processed/200/a.png").is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("/abs/path.png").is_err());
        assert!(validate_key("uploads/./a.png").is_ok());
        assert!(validate_key("").is_err());
    }

    #[tokio::test]
    async fn test_local_store_roundtrip_and_delete() {
        let root = std::env::temp_dir().join(format!("market-admin-store-{}", uuid::Uuid::new_v4()));
        let store = LocalObjectStore::new(&root);

        store
            .put("uploads/x.txt", b"hello".to_vec(), "text/plain")
            .await
            .unwrap();
        assert_eq!(store.get("uploads/x.txt").await.unwrap(), b"hello");

        store.delete("uploads/x.txt").await.unwrap();
        assert!(matches!(
            store.get("uploads/x.txt").await,
            Err(AppError::NotFound(_))
        ));
        // 두 번째 삭제도 성공
        store.delete("uploads/x.txt").await.unwrap();

        let _ = std::fs::remove_dir_all(root);
    }
}
