use crate::entities::error_report_entity as reports;
use crate::entities::error_reports::ErrorReportStatus;
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
pub struct ErrorReportService {
    pool: SharedPool,
}

impl ErrorReportService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(
        &self,
        query: &ErrorReportQuery,
    ) -> AppResult<PaginatedResponse<ErrorReportResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = reports::Entity::find();
        if let Some(status) = query.status {
            select = select.filter(reports::Column::Status.eq(status));
        }
        if let Some(seller_id) = query.seller_id {
            select = select.filter(reports::Column::SellerId.eq(seller_id));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(reports::Column::CreatedAt)
            .order_by_desc(reports::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<reports::Model> {
        reports::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Error report {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<ErrorReportResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateErrorReportRequest) -> AppResult<ErrorReportResponse> {
        let now = Utc::now();
        let report = reports::ActiveModel {
            seller_id: Set(request.seller_id),
            title: Set(require_text("title", &request.title, 200)?),
            content: Set(require_text("content", &request.content, 20_000)?),
            status: Set(ErrorReportStatus::Received),
            reply: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;
        log::info!("Error report {} received", report.id);
        Ok(report.into())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateErrorReportRequest,
    ) -> AppResult<ErrorReportResponse> {
        if request.status.is_none() && request.reply.is_none() {
            return Err(AppError::ValidationError(
                "status or reply is required".to_string(),
            ));
        }
        let mut am = self.find(id).await?.into_active_model();
        if let Some(status) = request.status {
            am.status = Set(status);
        }
        if let Some(reply) = request.reply {
            am.reply = Set(Some(require_text("reply", &reply, 20_000)?));
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = reports::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Error report {id} not found")));
        }
        Ok(())
    }
}
