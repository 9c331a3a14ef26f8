use async_trait::async_trait;

use super::{ADMIN_PROFILE_COLUMNS, NEWS_COLUMNS, PostgresRepository};
use crate::{
    error::{AppError, AppResult, is_unique_violation},
    models::{AddNewsRequest, AdminProfile, AdminUpdateProfileRequest, Credentials, FootballNews, NewAdmin},
};

/// AdminRepository
///
/// Persistence contract of the admin slice. A "live" admin is active and not deleted.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Inserts a new admin. Fails `Validation` when a live admin already uses the email.
    async fn register_admin(&self, admin: NewAdmin) -> AppResult<AdminProfile>;

    /// Credentials of the live admin with this email, for login.
    async fn admin_credentials_by_email(&self, email: &str) -> AppResult<Credentials>;

    /// Credentials of a live admin by id, for password changes.
    async fn admin_credentials(&self, admin_id: i64) -> AppResult<Credentials>;

    /// Replaces the password hash only if it still equals `current_hash`.
    async fn update_admin_password(
        &self,
        admin_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()>;

    async fn admin_profile(&self, admin_id: i64) -> AppResult<AdminProfile>;

    /// Partial update. Fails `Conflict` when the aadhar belongs to another live admin.
    async fn update_admin_profile(
        &self,
        admin_id: i64,
        update: AdminUpdateProfileRequest,
    ) -> AppResult<AdminProfile>;

    async fn add_news(&self, admin_id: i64, news: AddNewsRequest) -> AppResult<FootballNews>;
}

#[async_trait]
impl AdminRepository for PostgresRepository {
    async fn register_admin(&self, admin: NewAdmin) -> AppResult<AdminProfile> {
        let sql = format!(
            "INSERT INTO admins (admin_name, admin_email, admin_image, admin_aadhar, admin_mobile, \
                                 admin_address, admin_password) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ADMIN_PROFILE_COLUMNS}"
        );

        let result = sqlx::query_as::<_, AdminProfile>(&sql)
            .bind(&admin.admin_name)
            .bind(&admin.admin_email)
            .bind(&admin.admin_image)
            .bind(&admin.admin_aadhar)
            .bind(&admin.admin_mobile)
            .bind(&admin.admin_address)
            .bind(&admin.password_hash)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(profile) => {
                tracing::info!(admin_id = profile.admin_id, "admin registered");
                Ok(profile)
            }
            Err(e) if is_unique_violation(&e, "admins_live_email") => {
                Err(AppError::invalid_field("adminEmail", "Email already exists"))
            }
            Err(e) if is_unique_violation(&e, "admins_live_aadhar") => {
                Err(AppError::Conflict("Aadhar number already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn admin_credentials_by_email(&self, email: &str) -> AppResult<Credentials> {
        sqlx::query_as::<_, Credentials>(
            "SELECT admin_id AS id, admin_email AS email, admin_password AS password_hash \
             FROM admins WHERE admin_email = $1 AND is_active AND NOT delete_status",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::missing("admin"))
    }

    async fn admin_credentials(&self, admin_id: i64) -> AppResult<Credentials> {
        sqlx::query_as::<_, Credentials>(
            "SELECT admin_id AS id, admin_email AS email, admin_password AS password_hash \
             FROM admins WHERE admin_id = $1 AND is_active AND NOT delete_status",
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::missing("admin"))
    }

    async fn update_admin_password(
        &self,
        admin_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE admins \
             SET admin_password = $3, update_status = TRUE, password_updated_status = TRUE, \
                 updated_date = CURRENT_DATE \
             WHERE admin_id = $1 AND admin_password = $2 AND is_active AND NOT delete_status",
        )
        .bind(admin_id)
        .bind(current_hash)
        .bind(new_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(admin_id, "admin password updated");
            return Ok(());
        }

        self.live_admin(admin_id).await?;
        Err(AppError::Conflict(
            "password was changed by another request".to_string(),
        ))
    }

    async fn admin_profile(&self, admin_id: i64) -> AppResult<AdminProfile> {
        let sql = format!(
            "SELECT {ADMIN_PROFILE_COLUMNS} FROM admins \
             WHERE admin_id = $1 AND is_active AND NOT delete_status"
        );
        sqlx::query_as::<_, AdminProfile>(&sql)
            .bind(admin_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("admin"))
    }

    async fn update_admin_profile(
        &self,
        admin_id: i64,
        update: AdminUpdateProfileRequest,
    ) -> AppResult<AdminProfile> {
        let sql = format!(
            "UPDATE admins \
             SET admin_name = COALESCE($2, admin_name), \
                 admin_aadhar = COALESCE($3, admin_aadhar), \
                 admin_mobile = COALESCE($4, admin_mobile), \
                 admin_address = COALESCE($5, admin_address), \
                 update_status = TRUE, \
                 updated_date = CURRENT_DATE \
             WHERE admin_id = $1 AND is_active AND NOT delete_status \
             RETURNING {ADMIN_PROFILE_COLUMNS}"
        );

        let result = sqlx::query_as::<_, AdminProfile>(&sql)
            .bind(admin_id)
            .bind(&update.admin_name)
            .bind(&update.admin_aadhar)
            .bind(&update.admin_mobile)
            .bind(&update.admin_address)
            .fetch_optional(&self.pool)
            .await;

        match result {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => {
                self.live_admin(admin_id).await?;
                Err(AppError::ineligible("admin"))
            }
            Err(e) if is_unique_violation(&e, "admins_live_aadhar") => {
                Err(AppError::Conflict("Aadhar number already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn add_news(&self, admin_id: i64, news: AddNewsRequest) -> AppResult<FootballNews> {
        let sql = format!(
            "INSERT INTO football_news (admin_id, news_title, news_content, news_image) \
             SELECT $1, $2, $3, $4 \
             WHERE EXISTS (SELECT 1 FROM admins \
                           WHERE admin_id = $1 AND is_active AND NOT delete_status) \
             RETURNING {NEWS_COLUMNS}"
        );

        let inserted = sqlx::query_as::<_, FootballNews>(&sql)
            .bind(admin_id)
            .bind(&news.news_title)
            .bind(&news.news_content)
            .bind(&news.news_image)
            .fetch_optional(&self.pool)
            .await?;

        match inserted {
            Some(item) => {
                tracing::info!(admin_id, football_news_id = item.football_news_id, "news added");
                Ok(item)
            }
            None => {
                self.live_admin(admin_id).await?;
                Err(AppError::ineligible("admin"))
            }
        }
    }
}
