use crate::entities::banner_entity as banners;
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct BannerService {
    pool: SharedPool,
}

fn validate_window(starts_at: Option<DateTime<Utc>>, ends_at: Option<DateTime<Utc>>) -> AppResult<()> {
    if let (Some(s), Some(e)) = (starts_at, ends_at)
        && e <= s
    {
        return Err(AppError::ValidationError(
            "ends_at must be after starts_at".to_string(),
        ));
    }
    Ok(())
}

fn validate_url(field: &str, value: &str) -> AppResult<String> {
    let url = require_text(field, value, 500)?;
    if url.starts_with("https://") || url.starts_with("http://") || url.starts_with('/') {
        Ok(url)
    } else {
        Err(AppError::ValidationError(format!(
            "{field} must be an absolute http(s) URL or a site path"
        )))
    }
}

impl BannerService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &BannerQuery) -> AppResult<PaginatedResponse<BannerResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let now = Utc::now();

        let mut select = banners::Entity::find();
        if let Some(position) = query.position.as_deref().filter(|p| !p.is_empty()) {
            select = select.filter(banners::Column::Position.eq(position));
        }
        if query.active_only.unwrap_or(false) {
            select = select
                .filter(banners::Column::IsActive.eq(true))
                .filter(
                    Condition::any()
                        .add(banners::Column::StartsAt.is_null())
                        .add(banners::Column::StartsAt.lte(now)),
                )
                .filter(
                    Condition::any()
                        .add(banners::Column::EndsAt.is_null())
                        .add(banners::Column::EndsAt.gt(now)),
                );
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let mut items = select
            .order_by_asc(banners::Column::Position)
            .order_by_asc(banners::Column::SortOrder)
            .order_by_asc(banners::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;
        if query.active_only.unwrap_or(false) {
            items.retain(|b| b.is_live_at(now));
        }

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    async fn find(&self, id: i64) -> AppResult<banners::Model> {
        banners::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Banner {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<BannerResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateBannerRequest) -> AppResult<BannerResponse> {
        validate_window(request.starts_at, request.ends_at)?;
        let link_url = request
            .link_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| validate_url("link_url", u))
            .transpose()?;

        let now = Utc::now();
        let banner = banners::ActiveModel {
            title: Set(require_text("title", &request.title, 200)?),
            image_url: Set(validate_url("image_url", &request.image_url)?),
            link_url: Set(link_url),
            position: Set(require_text("position", &request.position, 50)?),
            sort_order: Set(request.sort_order),
            starts_at: Set(request.starts_at),
            ends_at: Set(request.ends_at),
            is_active: Set(request.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;
        log::info!("Banner {} created for {}", banner.id, banner.position);
        Ok(banner.into())
    }

    pub async fn update(&self, id: i64, request: UpdateBannerRequest) -> AppResult<BannerResponse> {
        let banner = self.find(id).await?;
        let starts_at = request.starts_at.or(banner.starts_at);
        let ends_at = request.ends_at.or(banner.ends_at);
        validate_window(starts_at, ends_at)?;

        let mut am = banner.into_active_model();
        if let Some(title) = request.title {
            am.title = Set(require_text("title", &title, 200)?);
        }
        if let Some(image_url) = request.image_url {
            am.image_url = Set(validate_url("image_url", &image_url)?);
        }
        if let Some(link_url) = request.link_url {
            am.link_url = Set(if link_url.trim().is_empty() {
                None
            } else {
                Some(validate_url("link_url", &link_url)?)
            });
        }
        if let Some(position) = request.position {
            am.position = Set(require_text("position", &position, 50)?);
        }
        if let Some(order) = request.sort_order {
            am.sort_order = Set(order);
        }
        am.starts_at = Set(starts_at);
        am.ends_at = Set(ends_at);
        if let Some(active) = request.is_active {
            am.is_active = Set(active);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = banners::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Banner {id} not found")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_window_validation() {
        let now = Utc::now();
        assert!(validate_window(None, None).is_ok());
        assert!(validate_window(Some(now), None).is_ok());
        assert!(validate_window(Some(now), Some(now + Duration::days(1))).is_ok());
        assert!(validate_window(Some(now), Some(now)).is_err());
    }

    #[test]
    fn test_url_validation() {
        assert!(validate_url("image_url", "https://cdn.example.com/a.png").is_ok());
        assert!(validate_url("link_url", "/events/spring").is_ok());
        assert!(validate_url("link_url", "javascript:alert(1)").is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_window() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let now = Utc::now();
        let err = BannerService::new(db)
            .create(CreateBannerRequest {
                title: "봄 세일".to_string(),
                image_url: "https://cdn.example.com/spring.png".to_string(),
                link_url: None,
                position: "main_top".to_string(),
                sort_order: 0,
                starts_at: Some(now),
                ends_at: Some(now - Duration::hours(1)),
                is_active: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
