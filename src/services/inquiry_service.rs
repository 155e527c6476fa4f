use crate::entities::inquiries::InquiryStatus;
use crate::entities::inquiry_entity as inquiries;
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
pub struct InquiryService {
    pool: SharedPool,
}

impl InquiryService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &InquiryQuery) -> AppResult<PaginatedResponse<InquiryResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = inquiries::Entity::find();
        if let Some(status) = query.status {
            select = select.filter(inquiries::Column::Status.eq(status));
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            select = select.filter(inquiries::Column::Category.eq(category));
        }
        if let Some(seller_id) = query.seller_id {
            select = select.filter(inquiries::Column::SellerId.eq(seller_id));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(inquiries::Column::CreatedAt)
            .order_by_desc(inquiries::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<inquiries::Model> {
        inquiries::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inquiry {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<InquiryResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateInquiryRequest) -> AppResult<InquiryResponse> {
        let now = Utc::now();
        let inquiry = inquiries::ActiveModel {
            user_id: Set(request.user_id),
            seller_id: Set(request.seller_id),
            product_id: Set(request.product_id),
            category: Set(require_text("category", &request.category, 50)?),
            title: Set(require_text("title", &request.title, 200)?),
            content: Set(require_text("content", &request.content, 10_000)?),
            status: Set(InquiryStatus::Pending),
            answer: Set(None),
            answered_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;
        Ok(inquiry.into())
    }

    /// 답변 등록. 닫힌 문의에는 답변할 수 없다.
    pub async fn answer(&self, id: i64, request: AnswerInquiryRequest) -> AppResult<InquiryResponse> {
        let answer = require_text("answer", &request.answer, 10_000)?;
        let inquiry = self.find(id).await?;
        if inquiry.status == InquiryStatus::Closed {
            return Err(AppError::InvalidState(format!(
                "Inquiry {id} is closed"
            )));
        }

        let now = Utc::now();
        let mut am = inquiry.into_active_model();
        am.answer = Set(Some(answer));
        am.answered_at = Set(Some(now));
        am.status = Set(InquiryStatus::Answered);
        am.updated_at = Set(now);
        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Inquiry {id} answered");
        Ok(updated.into())
    }

    pub async fn close(&self, id: i64) -> AppResult<InquiryResponse> {
        let inquiry = self.find(id).await?;
        if inquiry.status == InquiryStatus::Closed {
            return Err(AppError::InvalidState(format!(
                "Inquiry {id} is already closed"
            )));
        }
        let mut am = inquiry.into_active_model();
        am.status = Set(InquiryStatus::Closed);
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = inquiries::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Inquiry {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn inquiry(status: InquiryStatus) -> inquiries::Model {
        let now = Utc::now();
        inquiries::Model {
            id: 1,
            user_id: Some(7),
            seller_id: None,
            product_id: Some(3),
            category: "배송".to_string(),
            title: "언제 오나요".to_string(),
            content: "주문한 지 일주일이 지났습니다.".to_string(),
            status,
            answer: None,
            answered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_answer_marks_answered() {
        let mut answered = inquiry(InquiryStatus::Answered);
        answered.answer = Some("내일 도착 예정입니다.".to_string());
        answered.answered_at = Some(Utc::now());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inquiry(InquiryStatus::Pending)]])
            .append_query_results([vec![answered]])
            .into_connection();
        let result = InquiryService::new(db)
            .answer(
                1,
                AnswerInquiryRequest {
                    answer: "내일 도착 예정입니다.".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(result.status, InquiryStatus::Answered);
        assert!(result.answered_at.is_some());
    }

    #[tokio::test]
    async fn test_closed_inquiry_cannot_be_answered() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inquiry(InquiryStatus::Closed)]])
            .into_connection();
        let err = InquiryService::new(db)
            .answer(
                1,
                AnswerInquiryRequest {
                    answer: "답변".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }
}
