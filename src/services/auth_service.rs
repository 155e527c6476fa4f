use crate::entities::admin_entity as admins;
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{JwtService, hash_password, validate_email, validate_password, verify_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

#[derive(Clone)]
pub struct AuthService {
    pool: SharedPool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: impl Into<SharedPool>, jwt_service: JwtService) -> Self {
        Self {
            pool: pool.into(),
            jwt_service,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();
        let admin = admins::Entity::find()
            .filter(admins::Column::Email.eq(email.as_str()))
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &admin.password_hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }
        if !admin.is_active {
            return Err(AppError::AuthError("Account is disabled".to_string()));
        }

        let mut am = admin.into_active_model();
        am.last_login_at = Set(Some(Utc::now()));
        let admin = am.update(self.pool.as_ref()).await?;

        log::info!("Admin {} logged in", admin.id);
        self.issue_tokens(admin)
    }

    pub async fn refresh(&self, request: RefreshRequest) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(&request.refresh_token)?;
        let admin = self.find_active(claims.admin_id()?).await?;
        self.issue_tokens(admin)
    }

    pub async fn me(&self, admin_id: i64) -> AppResult<AdminResponse> {
        Ok(self.find_active(admin_id).await?.into())
    }

    /// CLI 에서 관리자 계정을 만들 때 사용
    pub async fn create_admin(&self, request: CreateAdminRequest) -> AppResult<AdminResponse> {
        let email = request.email.trim().to_lowercase();
        validate_email(&email)?;
        validate_password(&request.password)?;

        let exists = admins::Entity::find()
            .filter(admins::Column::Email.eq(email.as_str()))
            .one(self.pool.as_ref())
            .await?;
        if exists.is_some() {
            return Err(AppError::Conflict(format!("Admin {email} already exists")));
        }

        let now = Utc::now();
        let admin = admins::ActiveModel {
            email: Set(email),
            name: Set(request.name.trim().to_string()),
            password_hash: Set(hash_password(&request.password)?),
            role: Set(request.role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(admin.into())
    }

    async fn find_active(&self, admin_id: i64) -> AppResult<admins::Model> {
        let admin = admins::Entity::find_by_id(admin_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::AuthError("Admin not found".to_string()))?;
        if !admin.is_active {
            return Err(AppError::AuthError("Account is disabled".to_string()));
        }
        Ok(admin)
    }

    fn issue_tokens(&self, admin: admins::Model) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(admin.id, admin.role)?;
        let refresh_token = self.jwt_service.generate_refresh_token(admin.id, admin.role)?;
        Ok(AuthResponse {
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
            admin: admin.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::admins::AdminRole;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn admin(password_hash: String, is_active: bool) -> admins::Model {
        let now = Utc::now();
        admins::Model {
            id: 7,
            email: "ops@market.test".to_string(),
            name: "운영자".to_string(),
            password_hash,
            role: AdminRole::Admin,
            is_active,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn jwt() -> JwtService {
        JwtService::new("test-secret", 3600, 7200)
    }

    #[tokio::test]
    async fn test_login_issues_tokens() {
        let hash = hash_password("Password123").unwrap();
        let found = admin(hash.clone(), true);
        let mut updated = found.clone();
        updated.last_login_at = Some(Utc::now());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![found]])
            .append_query_results([vec![updated]])
            .into_connection();
        let service = AuthService::new(db, jwt());

        let resp = service
            .login(LoginRequest {
                email: " OPS@market.test ".to_string(),
                password: "Password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(resp.admin.id, 7);
        assert_eq!(resp.expires_in, 3600);
        let claims = jwt().verify_access_token(&resp.access_token).unwrap();
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let hash = hash_password("Password123").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin(hash, true)]])
            .into_connection();
        let service = AuthService::new(db, jwt());

        let err = service
            .login(LoginRequest {
                email: "ops@market.test".to_string(),
                password: "Wrong12345".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_disabled_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin("x".to_string(), false)]])
            .into_connection();
        let service = AuthService::new(db, jwt());
        let token = jwt().generate_refresh_token(7, AdminRole::Admin).unwrap();

        let err = service
            .refresh(RefreshRequest {
                refresh_token: token,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }
}
