use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::attachment_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentResponse {
    pub id: i64,
    pub original_name: String,
    pub storage_key: String,
    pub content_type: String,
    pub size: i64,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

impl From<attachment_entity::Model> for AttachmentResponse {
    fn from(m: attachment_entity::Model) -> Self {
        Self {
            id: m.id,
            original_name: m.original_name,
            storage_key: m.storage_key,
            content_type: m.content_type,
            size: m.size,
            checksum: m.checksum,
            created_at: m.created_at,
        }
    }
}
