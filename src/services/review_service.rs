use crate::entities::review_entity as reviews;
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct ReviewService {
    pool: SharedPool,
}

impl ReviewService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &ReviewQuery) -> AppResult<PaginatedResponse<ReviewResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = reviews::Entity::find();
        if let Some(product_id) = query.product_id {
            select = select.filter(reviews::Column::ProductId.eq(product_id));
        }
        if let Some(hidden) = query.is_hidden {
            select = select.filter(reviews::Column::IsHidden.eq(hidden));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
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

    pub async fn set_hidden(&self, id: i64, is_hidden: bool) -> AppResult<ReviewResponse> {
        let review = reviews::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {id} not found")))?;
        let mut am = review.into_active_model();
        am.is_hidden = Set(is_hidden);
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = reviews::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Review {id} not found")));
        }
        Ok(())
    }
}
