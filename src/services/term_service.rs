use crate::entities::term_entity as terms;
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct TermService {
    pool: SharedPool,
}

impl TermService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &TermQuery) -> AppResult<PaginatedResponse<TermResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = terms::Entity::find();
        if let Some(term_type) = query.term_type.as_deref().filter(|t| !t.is_empty()) {
            select = select.filter(terms::Column::TermType.eq(term_type));
        }
        if let Some(active) = query.is_active {
            select = select.filter(terms::Column::IsActive.eq(active));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_asc(terms::Column::TermType)
            .order_by_desc(terms::Column::EffectiveDate)
            .order_by_desc(terms::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<terms::Model> {
        terms::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Term {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<TermResponse> {
        Ok(self.find(id).await?.into())
    }

    /// 새 버전은 비활성으로 만들어진다
    pub async fn create(&self, request: CreateTermRequest) -> AppResult<TermResponse> {
        let term_type = require_text("term_type", &request.term_type, 50)?;
        let version = require_text("version", &request.version, 20)?;

        let exists = terms::Entity::find()
            .filter(terms::Column::TermType.eq(term_type.as_str()))
            .filter(terms::Column::Version.eq(version.as_str()))
            .count(self.pool.as_ref())
            .await?;
        if exists > 0 {
            return Err(AppError::Conflict(format!(
                "{term_type} version {version} already exists"
            )));
        }

        let now = Utc::now();
        let term = terms::ActiveModel {
            term_type: Set(term_type),
            version: Set(version),
            title: Set(require_text("title", &request.title, 200)?),
            content: Set(require_text("content", &request.content, 200_000)?),
            effective_date: Set(request.effective_date),
            is_active: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;
        Ok(term.into())
    }

    pub async fn update(&self, id: i64, request: UpdateTermRequest) -> AppResult<TermResponse> {
        let mut am = self.find(id).await?.into_active_model();
        if let Some(title) = request.title {
            am.title = Set(require_text("title", &title, 200)?);
        }
        if let Some(content) = request.content {
            am.content = Set(require_text("content", &content, 200_000)?);
        }
        if let Some(date) = request.effective_date {
            am.effective_date = Set(date);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    /// 이 버전을 활성화하고 같은 종류의 다른 버전은 비활성화한다
    pub async fn activate(&self, id: i64) -> AppResult<TermResponse> {
        let term = self.find(id).await?;
        let now = Utc::now();

        let txn = self.pool.begin().await?;
        terms::Entity::update_many()
            .col_expr(terms::Column::IsActive, Expr::value(false))
            .col_expr(terms::Column::UpdatedAt, Expr::value(now))
            .filter(terms::Column::TermType.eq(term.term_type.as_str()))
            .filter(terms::Column::Id.ne(id))
            .filter(terms::Column::IsActive.eq(true))
            .exec(&txn)
            .await?;

        let mut am = term.into_active_model();
        am.is_active = Set(true);
        am.updated_at = Set(now);
        let updated = am.update(&txn).await?;
        txn.commit().await?;

        log::info!(
            "Term {} version {} activated",
            updated.term_type,
            updated.version
        );
        Ok(updated.into())
    }

    /// 활성 버전은 삭제할 수 없다
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let term = self.find(id).await?;
        if term.is_active {
            return Err(AppError::Conflict(format!(
                "Active term {id} cannot be deleted"
            )));
        }
        terms::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn term(id: i64, version: &str, is_active: bool) -> terms::Model {
        let now = Utc::now();
        terms::Model {
            id,
            term_type: "privacy".to_string(),
            version: version.to_string(),
            title: "개인정보 처리방침".to_string(),
            content: "...".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_activate_deactivates_siblings() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![term(2, "1.1", false)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![term(2, "1.1", true)]])
            .into_connection();
        let pool = Arc::new(db);
        let service = TermService::new(Arc::clone(&pool));
        let activated = service.activate(2).await.unwrap();
        assert!(activated.is_active);
        drop(service);

        let statements: Vec<String> = Arc::try_unwrap(pool)
            .ok()
            .unwrap()
            .into_transaction_log()
            .iter()
            .map(|t| format!("{t:?}"))
            .collect();
        assert!(
            statements
                .iter()
                .any(|sql| sql.contains("UPDATE") && sql.contains("<>"))
        );
    }

    #[tokio::test]
    async fn test_active_term_cannot_be_deleted() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![term(1, "1.0", true)]])
            .into_connection();
        let err = TermService::new(db).delete(1).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
