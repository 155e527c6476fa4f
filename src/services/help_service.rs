//! FAQ 와 이용 가이드. 둘 다 카테고리별로 sort_order 순 정렬.

use crate::entities::{faq_entity as faqs, guide_entity as guides};
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct FaqService {
    pool: SharedPool,
}

impl FaqService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &CategoryQuery) -> AppResult<PaginatedResponse<FaqResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = faqs::Entity::find();
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            select = select.filter(faqs::Column::Category.eq(category));
        }
        if let Some(published) = query.is_published {
            select = select.filter(faqs::Column::IsPublished.eq(published));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_asc(faqs::Column::SortOrder)
            .order_by_asc(faqs::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<faqs::Model> {
        faqs::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("FAQ {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<FaqResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateFaqRequest) -> AppResult<FaqResponse> {
        let now = Utc::now();
        let faq = faqs::ActiveModel {
            category: Set(require_text("category", &request.category, 50)?),
            question: Set(require_text("question", &request.question, 500)?),
            answer: Set(require_text("answer", &request.answer, 20_000)?),
            sort_order: Set(request.sort_order),
            is_published: Set(request.is_published.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;
        Ok(faq.into())
    }

    pub async fn update(&self, id: i64, request: UpdateFaqRequest) -> AppResult<FaqResponse> {
        let mut am = self.find(id).await?.into_active_model();
        if let Some(category) = request.category {
            am.category = Set(require_text("category", &category, 50)?);
        }
        if let Some(question) = request.question {
            am.question = Set(require_text("question", &question, 500)?);
        }
        if let Some(answer) = request.answer {
            am.answer = Set(require_text("answer", &answer, 20_000)?);
        }
        if let Some(order) = request.sort_order {
            am.sort_order = Set(order);
        }
        if let Some(published) = request.is_published {
            am.is_published = Set(published);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = faqs::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("FAQ {id} not found")));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct GuideService {
    pool: SharedPool,
}

impl GuideService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &CategoryQuery) -> AppResult<PaginatedResponse<GuideResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = guides::Entity::find();
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            select = select.filter(guides::Column::Category.eq(category));
        }
        if let Some(published) = query.is_published {
            select = select.filter(guides::Column::IsPublished.eq(published));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_asc(guides::Column::SortOrder)
            .order_by_asc(guides::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<guides::Model> {
        guides::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guide {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<GuideResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateGuideRequest) -> AppResult<GuideResponse> {
        let now = Utc::now();
        let guide = guides::ActiveModel {
            category: Set(require_text("category", &request.category, 50)?),
            title: Set(require_text("title", &request.title, 200)?),
            content: Set(require_text("content", &request.content, 50_000)?),
            sort_order: Set(request.sort_order),
            is_published: Set(request.is_published.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;
        Ok(guide.into())
    }

    pub async fn update(&self, id: i64, request: UpdateGuideRequest) -> AppResult<GuideResponse> {
        let mut am = self.find(id).await?.into_active_model();
        if let Some(category) = request.category {
            am.category = Set(require_text("category", &category, 50)?);
        }
        if let Some(title) = request.title {
            am.title = Set(require_text("title", &title, 200)?);
        }
        if let Some(content) = request.content {
            am.content = Set(require_text("content", &content, 50_000)?);
        }
        if let Some(order) = request.sort_order {
            am.sort_order = Set(order);
        }
        if let Some(published) = request.is_published {
            am.is_published = Set(published);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = guides::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Guide {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_faq_list_pages() {
        let now = Utc::now();
        let faq = |id: i64, order: i32| faqs::Model {
            id,
            category: "결제".to_string(),
            question: format!("질문 {id}"),
            answer: "답변".to_string(),
            sort_order: order,
            is_published: true,
            created_at: now,
            updated_at: now,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(3)),
            )])]])
            .append_query_results([vec![faq(1, 0), faq(2, 1)]])
            .into_connection();
        let page = FaqService::new(db)
            .list(&CategoryQuery {
                page: Some(1),
                per_page: Some(2),
                category: Some("결제".to_string()),
                is_published: None,
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_guide() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let err = GuideService::new(db).delete(5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
