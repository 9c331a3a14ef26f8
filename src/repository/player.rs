use async_trait::async_trait;

use super::{
    LEAVE_REQUEST_COLUMNS, NOTIFICATION_COLUMNS, PLAYER_COLUMNS, PLAYER_LIVE, PostgresRepository,
};
use crate::{
    error::{AppError, AppResult, is_unique_violation},
    models::{
        ClubProfile, Credentials, FootballNews, LeaveRequest, LeaveRequestInput, Match, NewPlayer,
        Player, PlayerNotification, PlayerUpdateProfileRequest,
    },
};

/// PlayerRepository
///
/// Persistence contract of the player slice. Apart from registration, every
/// method requires the player to be approved, active, unsuspended and not deleted.
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Joins a live club as an unapproved, inactive player.
    async fn register_player(&self, player: NewPlayer) -> AppResult<Player>;
    async fn player_credentials_by_email(&self, email: &str) -> AppResult<Credentials>;
    async fn player_credentials(&self, player_id: i64) -> AppResult<Credentials>;
    async fn update_player_password(
        &self,
        player_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()>;
    async fn player_profile(&self, player_id: i64) -> AppResult<Player>;
    async fn update_player_profile(
        &self,
        player_id: i64,
        update: PlayerUpdateProfileRequest,
    ) -> AppResult<Player>;

    async fn player_clubs(&self, player_id: i64) -> AppResult<Vec<ClubProfile>>;

    /// Newest first.
    async fn player_notifications(&self, player_id: i64) -> AppResult<Vec<PlayerNotification>>;
    async fn player_notification(
        &self,
        player_id: i64,
        notification_id: i64,
    ) -> AppResult<PlayerNotification>;

    /// Files a pending request with the player's own club.
    async fn send_leave_request(
        &self,
        player_id: i64,
        request: LeaveRequestInput,
    ) -> AppResult<LeaveRequest>;
    async fn approved_leave_requests(&self, player_id: i64) -> AppResult<Vec<LeaveRequest>>;

    async fn player_matches(&self, player_id: i64) -> AppResult<Vec<Match>>;
    async fn player_match(&self, player_id: i64, match_id: i64) -> AppResult<Match>;
    async fn player_match_points(&self, player_id: i64) -> AppResult<Vec<Match>>;
    async fn player_news(&self, player_id: i64) -> AppResult<Vec<FootballNews>>;
    async fn player_news_item(
        &self,
        player_id: i64,
        football_news_id: i64,
    ) -> AppResult<FootballNews>;
}

#[async_trait]
impl PlayerRepository for PostgresRepository {
    async fn register_player(&self, player: NewPlayer) -> AppResult<Player> {
        let sql = format!(
            "INSERT INTO players (club_id, player_name, player_email, player_mobile, player_image, \
                                  player_age, player_country, player_position, player_address, \
                                  player_password) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10 \
             WHERE EXISTS (SELECT 1 FROM clubs \
                           WHERE club_id = $1 AND is_active AND NOT is_suspended) \
             RETURNING {PLAYER_COLUMNS}"
        );

        let result = sqlx::query_as::<_, Player>(&sql)
            .bind(player.club_id)
            .bind(&player.player_name)
            .bind(&player.player_email)
            .bind(&player.player_mobile)
            .bind(&player.player_image)
            .bind(player.player_age)
            .bind(&player.player_country)
            .bind(&player.player_position)
            .bind(&player.player_address)
            .bind(&player.password_hash)
            .fetch_optional(&self.pool)
            .await;

        match result {
            Ok(Some(created)) => {
                tracing::info!(
                    player_id = created.player_id,
                    club_id = created.club_id,
                    "player registered, awaiting approval"
                );
                Ok(created)
            }
            Ok(None) => {
                self.live_club(player.club_id).await?;
                Err(AppError::ineligible("club"))
            }
            Err(e) if is_unique_violation(&e, "players_live_email") => {
                Err(AppError::invalid_field("playerEmail", "Email already exists"))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn player_credentials_by_email(&self, email: &str) -> AppResult<Credentials> {
        let sql = format!(
            "SELECT player_id AS id, player_email AS email, player_password AS password_hash \
             FROM players WHERE player_email = $1 AND {PLAYER_LIVE}"
        );
        sqlx::query_as::<_, Credentials>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("player"))
    }

    async fn player_credentials(&self, player_id: i64) -> AppResult<Credentials> {
        let sql = format!(
            "SELECT player_id AS id, player_email AS email, player_password AS password_hash \
             FROM players WHERE player_id = $1 AND {PLAYER_LIVE}"
        );
        sqlx::query_as::<_, Credentials>(&sql)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("player"))
    }

    async fn update_player_password(
        &self,
        player_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()> {
        let sql = format!(
            "UPDATE players SET player_password = $3, update_status = TRUE \
             WHERE player_id = $1 AND player_password = $2 AND {PLAYER_LIVE}"
        );
        let result = sqlx::query(&sql)
            .bind(player_id)
            .bind(current_hash)
            .bind(new_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(player_id, "player password updated");
            return Ok(());
        }

        self.live_player(player_id).await?;
        Err(AppError::Conflict(
            "password was changed by another request".to_string(),
        ))
    }

    async fn player_profile(&self, player_id: i64) -> AppResult<Player> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = $1 AND {PLAYER_LIVE}");
        sqlx::query_as::<_, Player>(&sql)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("player"))
    }

    async fn update_player_profile(
        &self,
        player_id: i64,
        update: PlayerUpdateProfileRequest,
    ) -> AppResult<Player> {
        let sql = format!(
            "UPDATE players \
             SET player_name = COALESCE($2, player_name), \
                 player_mobile = COALESCE($3, player_mobile), \
                 player_image = COALESCE($4, player_image), \
                 player_age = COALESCE($5, player_age), \
                 player_country = COALESCE($6, player_country), \
                 player_position = COALESCE($7, player_position), \
                 player_address = COALESCE($8, player_address), \
                 update_status = TRUE \
             WHERE player_id = $1 AND {PLAYER_LIVE} \
             RETURNING {PLAYER_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Player>(&sql)
            .bind(player_id)
            .bind(&update.player_name)
            .bind(&update.player_mobile)
            .bind(&update.player_image)
            .bind(update.player_age)
            .bind(&update.player_country)
            .bind(&update.player_position)
            .bind(&update.player_address)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(player) => Ok(player),
            None => {
                self.live_player(player_id).await?;
                Err(AppError::ineligible("player"))
            }
        }
    }

    async fn player_clubs(&self, player_id: i64) -> AppResult<Vec<ClubProfile>> {
        self.live_player(player_id).await?;
        self.fetch_live_clubs().await
    }

    async fn player_notifications(&self, player_id: i64) -> AppResult<Vec<PlayerNotification>> {
        self.live_player(player_id).await?;
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM player_notifications \
             WHERE player_id = $1 ORDER BY sent_date DESC, notification_id DESC"
        );
        Ok(sqlx::query_as::<_, PlayerNotification>(&sql)
            .bind(player_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn player_notification(
        &self,
        player_id: i64,
        notification_id: i64,
    ) -> AppResult<PlayerNotification> {
        self.live_player(player_id).await?;
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM player_notifications \
             WHERE notification_id = $1 AND player_id = $2"
        );
        sqlx::query_as::<_, PlayerNotification>(&sql)
            .bind(notification_id)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("notification"))
    }

    async fn send_leave_request(
        &self,
        player_id: i64,
        request: LeaveRequestInput,
    ) -> AppResult<LeaveRequest> {
        let sql = format!(
            "INSERT INTO leave_requests (player_id, club_id, leave_reason, leave_from, leave_to) \
             SELECT player_id, club_id, $2, $3, $4 FROM players \
             WHERE player_id = $1 AND {PLAYER_LIVE} \
             RETURNING {LEAVE_REQUEST_COLUMNS}"
        );

        let inserted = sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(player_id)
            .bind(&request.leave_reason)
            .bind(request.leave_from)
            .bind(request.leave_to)
            .fetch_optional(&self.pool)
            .await?;

        match inserted {
            Some(created) => {
                tracing::info!(
                    player_id,
                    club_id = created.club_id,
                    leave_request_id = created.leave_request_id,
                    "leave request sent"
                );
                Ok(created)
            }
            None => {
                self.live_player(player_id).await?;
                Err(AppError::ineligible("player"))
            }
        }
    }

    async fn approved_leave_requests(&self, player_id: i64) -> AppResult<Vec<LeaveRequest>> {
        self.live_player(player_id).await?;
        let sql = format!(
            "SELECT {LEAVE_REQUEST_COLUMNS} FROM leave_requests \
             WHERE player_id = $1 AND is_approved ORDER BY requested_date DESC"
        );
        Ok(sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(player_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn player_matches(&self, player_id: i64) -> AppResult<Vec<Match>> {
        self.live_player(player_id).await?;
        self.fetch_matches().await
    }

    async fn player_match(&self, player_id: i64, match_id: i64) -> AppResult<Match> {
        self.live_player(player_id).await?;
        self.fetch_match(match_id).await
    }

    async fn player_match_points(&self, player_id: i64) -> AppResult<Vec<Match>> {
        self.live_player(player_id).await?;
        self.fetch_match_points().await
    }

    async fn player_news(&self, player_id: i64) -> AppResult<Vec<FootballNews>> {
        self.live_player(player_id).await?;
        self.fetch_news().await
    }

    async fn player_news_item(
        &self,
        player_id: i64,
        football_news_id: i64,
    ) -> AppResult<FootballNews> {
        self.live_player(player_id).await?;
        self.fetch_news_item(football_news_id).await
    }
}
