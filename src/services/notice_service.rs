use crate::entities::notice_entity as notices;
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct NoticeService {
    pool: SharedPool,
}

impl NoticeService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    /// 고정 공지 먼저, 그다음 최신순
    pub async fn list(&self, query: &NoticeQuery) -> AppResult<PaginatedResponse<NoticeResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = notices::Entity::find();
        if let Some(published) = query.is_published {
            select = select.filter(notices::Column::IsPublished.eq(published));
        }
        if let Some(keyword) = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(notices::Column::Title.contains(keyword))
                    .add(notices::Column::Content.contains(keyword)),
            );
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(notices::Column::IsPinned)
            .order_by_desc(notices::Column::CreatedAt)
            .order_by_desc(notices::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    /// 조회수를 1 올리고 공지를 돌려준다
    pub async fn get(&self, id: i64) -> AppResult<NoticeResponse> {
        let result = notices::Entity::update_many()
            .col_expr(
                notices::Column::ViewCount,
                Expr::col(notices::Column::ViewCount).add(1),
            )
            .filter(notices::Column::Id.eq(id))
            .exec(self.pool.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Notice {id} not found")));
        }
        let notice = notices::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notice {id} not found")))?;
        Ok(notice.into())
    }

    pub async fn create(&self, request: CreateNoticeRequest) -> AppResult<NoticeResponse> {
        let now = Utc::now();
        let notice = notices::ActiveModel {
            title: Set(require_text("title", &request.title, 200)?),
            content: Set(require_text("content", &request.content, 50_000)?),
            is_pinned: Set(request.is_pinned),
            is_published: Set(request.is_published.unwrap_or(true)),
            view_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;
        log::info!("Notice {} created", notice.id);
        Ok(notice.into())
    }

    pub async fn update(&self, id: i64, request: UpdateNoticeRequest) -> AppResult<NoticeResponse> {
        let notice = notices::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Notice {id} not found")))?;

        let mut am = notice.into_active_model();
        if let Some(title) = request.title {
            am.title = Set(require_text("title", &title, 200)?);
        }
        if let Some(content) = request.content {
            am.content = Set(require_text("content", &content, 50_000)?);
        }
        if let Some(pinned) = request.is_pinned {
            am.is_pinned = Set(pinned);
        }
        if let Some(published) = request.is_published {
            am.is_published = Set(published);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = notices::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Notice {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_get_increments_view_count() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![notices::Model {
                id: 4,
                title: "설 연휴 배송 안내".to_string(),
                content: "연휴 기간 배송이 지연됩니다.".to_string(),
                is_pinned: true,
                is_published: true,
                view_count: 42,
                created_at: now,
                updated_at: now,
            }]])
            .into_connection();
        let notice = NoticeService::new(db).get(4).await.unwrap();
        assert_eq!(notice.view_count, 42);
    }

    #[tokio::test]
    async fn test_get_missing_notice() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let err = NoticeService::new(db).get(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = NoticeService::new(db)
            .create(CreateNoticeRequest {
                title: "   ".to_string(),
                content: "본문".to_string(),
                is_pinned: false,
                is_published: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
