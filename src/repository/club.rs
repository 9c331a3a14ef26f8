use async_trait::async_trait;

use super::{
    CLUB_PROFILE_COLUMNS, LEAVE_REQUEST_COLUMNS, NOTIFICATION_COLUMNS, PLAYER_COLUMNS,
    PLAYER_LIVE, PLAYER_NOT_DELETED, PLAYER_SUSPENDED, PLAYER_UNAPPROVED, PostgresRepository,
};
use crate::{
    error::{AppError, AppResult, is_unique_violation},
    models::{
        ClubProfile, ClubUpdateProfileRequest, Credentials, FootballNews, Injury, InjuryRequest,
        LeaveRequest, Match, NewClub, Player, PlayerNotification, SendNotificationRequest,
    },
};

const INJURY_COLUMNS: &str = "injury_id, player_id, club_id, player_name, player_image, \
    club_name, club_image, injury_type, average_recovery_time, reported_date";

// Guard for the calling club, correlated on `$2`.
const CLUB_LIVE_EXISTS: &str = "EXISTS (SELECT 1 FROM clubs \
    WHERE club_id = $2 AND is_active AND NOT is_suspended)";

/// Escapes `%`, `_` and `\` so user input only ever matches literally inside `LIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// ClubRepository
///
/// Persistence contract of the club slice. Every method that takes a `club_id`
/// requires that club to be active and unsuspended, and only ever touches
/// players that belong to it.
#[async_trait]
pub trait ClubRepository: Send + Sync {
    // --- Account ---

    /// Fails `Validation` when an active club already uses the email.
    async fn register_club(&self, club: NewClub) -> AppResult<ClubProfile>;
    async fn club_credentials_by_email(&self, email: &str) -> AppResult<Credentials>;
    async fn club_credentials(&self, club_id: i64) -> AppResult<Credentials>;
    /// Compare-and-swap on the stored hash.
    async fn update_club_password(
        &self,
        club_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()>;
    async fn club_profile(&self, club_id: i64) -> AppResult<ClubProfile>;
    async fn update_club_profile(
        &self,
        club_id: i64,
        update: ClubUpdateProfileRequest,
    ) -> AppResult<ClubProfile>;

    // --- Roster ---

    async fn unapproved_players(&self, club_id: i64) -> AppResult<Vec<Player>>;
    async fn unapproved_player(&self, club_id: i64, player_id: i64) -> AppResult<Player>;
    async fn roster_players(&self, club_id: i64) -> AppResult<Vec<Player>>;
    async fn roster_player(&self, club_id: i64, player_id: i64) -> AppResult<Player>;
    async fn suspended_players(&self, club_id: i64) -> AppResult<Vec<Player>>;
    async fn suspended_player(&self, club_id: i64, player_id: i64) -> AppResult<Player>;

    /// Unapproved to approved and active.
    async fn approve_player(&self, club_id: i64, player_id: i64) -> AppResult<i64>;
    /// Soft-deletes any non-deleted player and withdraws its approval.
    async fn delete_player(&self, club_id: i64, player_id: i64) -> AppResult<i64>;
    async fn suspend_player(&self, club_id: i64, player_id: i64) -> AppResult<i64>;
    async fn unsuspend_player(&self, club_id: i64, player_id: i64) -> AppResult<i64>;

    /// Case-insensitive substring search. An empty result is `NotFound`.
    async fn search_players(&self, club_id: i64, term: &str) -> AppResult<Vec<Player>>;

    // --- Player communication ---

    async fn send_notification(
        &self,
        club_id: i64,
        notification: SendNotificationRequest,
    ) -> AppResult<PlayerNotification>;
    async fn add_injury(&self, club_id: i64, injury: InjuryRequest) -> AppResult<Injury>;
    async fn pending_leave_requests(&self, club_id: i64) -> AppResult<Vec<LeaveRequest>>;
    async fn pending_leave_request(
        &self,
        club_id: i64,
        leave_request_id: i64,
    ) -> AppResult<LeaveRequest>;
    async fn approve_leave_request(&self, club_id: i64, leave_request_id: i64) -> AppResult<i64>;

    // --- Browse ---

    async fn club_matches(&self, club_id: i64) -> AppResult<Vec<Match>>;
    async fn club_match(&self, club_id: i64, match_id: i64) -> AppResult<Match>;
    async fn club_match_points(&self, club_id: i64) -> AppResult<Vec<Match>>;
    async fn club_news(&self, club_id: i64) -> AppResult<Vec<FootballNews>>;
    async fn club_news_item(&self, club_id: i64, football_news_id: i64) -> AppResult<FootballNews>;
    async fn club_listing(&self, club_id: i64) -> AppResult<Vec<ClubProfile>>;
}

impl PostgresRepository {
    async fn club_players_where(&self, club_id: i64, predicate: &str) -> AppResult<Vec<Player>> {
        self.live_club(club_id).await?;
        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players \
             WHERE club_id = $1 AND {predicate} ORDER BY player_id"
        );
        Ok(sqlx::query_as::<_, Player>(&sql)
            .bind(club_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn club_player_where(
        &self,
        club_id: i64,
        player_id: i64,
        predicate: &str,
    ) -> AppResult<Player> {
        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players \
             WHERE player_id = $1 AND club_id = $2 AND {predicate} AND {CLUB_LIVE_EXISTS}"
        );
        let player = sqlx::query_as::<_, Player>(&sql)
            .bind(player_id)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await?;

        match player {
            Some(player) => Ok(player),
            None => Err(self.club_player_failure(club_id, player_id, predicate).await),
        }
    }

    /// Applies `assignments` to one of the club's players if `guard` still holds.
    async fn transition_player(
        &self,
        club_id: i64,
        player_id: i64,
        guard: &str,
        assignments: &str,
    ) -> AppResult<i64> {
        let sql = format!(
            "UPDATE players SET {assignments}, update_status = TRUE \
             WHERE player_id = $1 AND club_id = $2 AND {guard} AND {CLUB_LIVE_EXISTS} \
             RETURNING player_id"
        );
        let updated = sqlx::query_scalar::<_, i64>(&sql)
            .bind(player_id)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(id) => {
                tracing::info!(club_id, player_id = id, %assignments, "player transitioned");
                Ok(id)
            }
            None => Err(self.club_player_failure(club_id, player_id, guard).await),
        }
    }
}

#[async_trait]
impl ClubRepository for PostgresRepository {
    async fn register_club(&self, club: NewClub) -> AppResult<ClubProfile> {
        let sql = format!(
            "INSERT INTO clubs (club_name, club_email, club_image, club_address, manager_name, \
                                manager_image, manager_email, manager_mobile, manager_address, \
                                club_password) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {CLUB_PROFILE_COLUMNS}"
        );

        let result = sqlx::query_as::<_, ClubProfile>(&sql)
            .bind(&club.club_name)
            .bind(&club.club_email)
            .bind(&club.club_image)
            .bind(&club.club_address)
            .bind(&club.manager_name)
            .bind(&club.manager_image)
            .bind(&club.manager_email)
            .bind(&club.manager_mobile)
            .bind(&club.manager_address)
            .bind(&club.password_hash)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(profile) => {
                tracing::info!(club_id = profile.club_id, "club registered");
                Ok(profile)
            }
            Err(e) if is_unique_violation(&e, "clubs_live_email") => {
                Err(AppError::invalid_field("clubEmail", "Email already exists"))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn club_credentials_by_email(&self, email: &str) -> AppResult<Credentials> {
        sqlx::query_as::<_, Credentials>(
            "SELECT club_id AS id, club_email AS email, club_password AS password_hash \
             FROM clubs WHERE club_email = $1 AND is_active AND NOT is_suspended",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::missing("club"))
    }

    async fn club_credentials(&self, club_id: i64) -> AppResult<Credentials> {
        sqlx::query_as::<_, Credentials>(
            "SELECT club_id AS id, club_email AS email, club_password AS password_hash \
             FROM clubs WHERE club_id = $1 AND is_active AND NOT is_suspended",
        )
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::missing("club"))
    }

    async fn update_club_password(
        &self,
        club_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE clubs SET club_password = $3, update_status = TRUE \
             WHERE club_id = $1 AND club_password = $2 AND is_active AND NOT is_suspended",
        )
        .bind(club_id)
        .bind(current_hash)
        .bind(new_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!(club_id, "club password updated");
            return Ok(());
        }

        self.live_club(club_id).await?;
        Err(AppError::Conflict(
            "password was changed by another request".to_string(),
        ))
    }

    async fn club_profile(&self, club_id: i64) -> AppResult<ClubProfile> {
        let sql = format!(
            "SELECT {CLUB_PROFILE_COLUMNS} FROM clubs \
             WHERE club_id = $1 AND is_active AND NOT is_suspended"
        );
        sqlx::query_as::<_, ClubProfile>(&sql)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("club"))
    }

    async fn update_club_profile(
        &self,
        club_id: i64,
        update: ClubUpdateProfileRequest,
    ) -> AppResult<ClubProfile> {
        let sql = format!(
            "UPDATE clubs \
             SET club_name = COALESCE($2, club_name), \
                 manager_mobile = COALESCE($3, manager_mobile), \
                 club_address = COALESCE($4, club_address), \
                 manager_name = COALESCE($5, manager_name), \
                 update_status = TRUE \
             WHERE club_id = $1 AND is_active AND NOT is_suspended \
             RETURNING {CLUB_PROFILE_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, ClubProfile>(&sql)
            .bind(club_id)
            .bind(&update.club_name)
            .bind(&update.manager_mobile)
            .bind(&update.club_address)
            .bind(&update.manager_name)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(profile) => Ok(profile),
            None => {
                self.live_club(club_id).await?;
                Err(AppError::ineligible("club"))
            }
        }
    }

    async fn unapproved_players(&self, club_id: i64) -> AppResult<Vec<Player>> {
        self.club_players_where(club_id, PLAYER_UNAPPROVED).await
    }

    async fn unapproved_player(&self, club_id: i64, player_id: i64) -> AppResult<Player> {
        self.club_player_where(club_id, player_id, PLAYER_UNAPPROVED)
            .await
    }

    async fn roster_players(&self, club_id: i64) -> AppResult<Vec<Player>> {
        self.club_players_where(club_id, PLAYER_LIVE).await
    }

    async fn roster_player(&self, club_id: i64, player_id: i64) -> AppResult<Player> {
        self.club_player_where(club_id, player_id, PLAYER_LIVE).await
    }

    async fn suspended_players(&self, club_id: i64) -> AppResult<Vec<Player>> {
        self.club_players_where(club_id, PLAYER_SUSPENDED).await
    }

    async fn suspended_player(&self, club_id: i64, player_id: i64) -> AppResult<Player> {
        self.club_player_where(club_id, player_id, PLAYER_SUSPENDED)
            .await
    }

    async fn approve_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        self.transition_player(
            club_id,
            player_id,
            PLAYER_UNAPPROVED,
            "is_approved = TRUE, is_active = TRUE",
        )
        .await
    }

    async fn delete_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        self.transition_player(
            club_id,
            player_id,
            PLAYER_NOT_DELETED,
            "delete_status = TRUE, is_approved = FALSE",
        )
        .await
    }

    async fn suspend_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        self.transition_player(
            club_id,
            player_id,
            PLAYER_LIVE,
            "is_suspended = TRUE, is_active = FALSE",
        )
        .await
    }

    async fn unsuspend_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        self.transition_player(
            club_id,
            player_id,
            PLAYER_SUSPENDED,
            "is_suspended = FALSE, is_active = TRUE",
        )
        .await
    }

    async fn search_players(&self, club_id: i64, term: &str) -> AppResult<Vec<Player>> {
        self.live_club(club_id).await?;

        let pattern = format!("%{}%", escape_like(term.trim()));
        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players \
             WHERE club_id = $1 AND {PLAYER_NOT_DELETED} \
               AND (CAST(player_id AS TEXT) ILIKE $2 \
                    OR player_name ILIKE $2 \
                    OR player_email ILIKE $2 \
                    OR COALESCE(player_mobile, '') ILIKE $2 \
                    OR COALESCE(player_address, '') ILIKE $2) \
             ORDER BY player_id"
        );
        let players = sqlx::query_as::<_, Player>(&sql)
            .bind(club_id)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        if players.is_empty() {
            return Err(AppError::missing("matching player"));
        }
        Ok(players)
    }

    async fn send_notification(
        &self,
        club_id: i64,
        notification: SendNotificationRequest,
    ) -> AppResult<PlayerNotification> {
        let sql = format!(
            "INSERT INTO player_notifications (club_id, player_id, message) \
             SELECT c.club_id, p.player_id, $3 \
             FROM clubs c JOIN players p ON p.club_id = c.club_id \
             WHERE c.club_id = $1 AND c.is_active AND NOT c.is_suspended \
               AND p.player_id = $2 AND p.is_active AND NOT p.delete_status \
             RETURNING {NOTIFICATION_COLUMNS}"
        );

        let inserted = sqlx::query_as::<_, PlayerNotification>(&sql)
            .bind(club_id)
            .bind(notification.player_id)
            .bind(&notification.message)
            .fetch_optional(&self.pool)
            .await?;

        match inserted {
            Some(sent) => {
                tracing::info!(
                    club_id,
                    player_id = sent.player_id,
                    notification_id = sent.notification_id,
                    "notification sent"
                );
                Ok(sent)
            }
            None => Err(self
                .club_player_failure(
                    club_id,
                    notification.player_id,
                    "is_active AND NOT delete_status",
                )
                .await),
        }
    }

    async fn add_injury(&self, club_id: i64, injury: InjuryRequest) -> AppResult<Injury> {
        let sql = format!(
            "INSERT INTO injuries (player_id, club_id, player_name, player_image, club_name, \
                                   club_image, injury_type, average_recovery_time) \
             SELECT p.player_id, c.club_id, p.player_name, p.player_image, c.club_name, \
                    c.club_image, $3, $4 \
             FROM clubs c JOIN players p ON p.club_id = c.club_id \
             WHERE c.club_id = $1 AND c.is_active AND NOT c.is_suspended \
               AND p.player_id = $2 AND NOT p.delete_status \
             RETURNING {INJURY_COLUMNS}"
        );

        let inserted = sqlx::query_as::<_, Injury>(&sql)
            .bind(club_id)
            .bind(injury.player_id)
            .bind(&injury.injury_type)
            .bind(&injury.average_recovery_time)
            .fetch_optional(&self.pool)
            .await?;

        match inserted {
            Some(record) => {
                tracing::info!(club_id, injury_id = record.injury_id, "injury recorded");
                Ok(record)
            }
            None => Err(self
                .club_player_failure(club_id, injury.player_id, PLAYER_NOT_DELETED)
                .await),
        }
    }

    async fn pending_leave_requests(&self, club_id: i64) -> AppResult<Vec<LeaveRequest>> {
        self.live_club(club_id).await?;
        let sql = format!(
            "SELECT {LEAVE_REQUEST_COLUMNS} FROM leave_requests \
             WHERE club_id = $1 AND is_success AND NOT is_approved \
             ORDER BY requested_date DESC"
        );
        Ok(sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(club_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn pending_leave_request(
        &self,
        club_id: i64,
        leave_request_id: i64,
    ) -> AppResult<LeaveRequest> {
        self.live_club(club_id).await?;
        let sql = format!(
            "SELECT {LEAVE_REQUEST_COLUMNS} FROM leave_requests \
             WHERE leave_request_id = $1 AND club_id = $2 AND is_success AND NOT is_approved"
        );
        sqlx::query_as::<_, LeaveRequest>(&sql)
            .bind(leave_request_id)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("leave request"))
    }

    async fn approve_leave_request(&self, club_id: i64, leave_request_id: i64) -> AppResult<i64> {
        let sql = format!(
            "UPDATE leave_requests SET is_approved = TRUE \
             WHERE leave_request_id = $1 AND club_id = $2 AND is_success AND NOT is_approved \
               AND {CLUB_LIVE_EXISTS} \
             RETURNING leave_request_id"
        );
        let updated = sqlx::query_scalar::<_, i64>(&sql)
            .bind(leave_request_id)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(id) = updated {
            tracing::info!(club_id, leave_request_id = id, "leave request approved");
            return Ok(id);
        }

        self.live_club(club_id).await?;
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT leave_request_id FROM leave_requests WHERE leave_request_id = $1 AND club_id = $2",
        )
        .bind(leave_request_id)
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;

        Err(match exists {
            Some(_) => AppError::ineligible("leave request"),
            None => AppError::missing("leave request"),
        })
    }

    async fn club_matches(&self, club_id: i64) -> AppResult<Vec<Match>> {
        self.live_club(club_id).await?;
        self.fetch_matches().await
    }

    async fn club_match(&self, club_id: i64, match_id: i64) -> AppResult<Match> {
        self.live_club(club_id).await?;
        self.fetch_match(match_id).await
    }

    async fn club_match_points(&self, club_id: i64) -> AppResult<Vec<Match>> {
        self.live_club(club_id).await?;
        self.fetch_match_points().await
    }

    async fn club_news(&self, club_id: i64) -> AppResult<Vec<FootballNews>> {
        self.live_club(club_id).await?;
        self.fetch_news().await
    }

    async fn club_news_item(&self, club_id: i64, football_news_id: i64) -> AppResult<FootballNews> {
        self.live_club(club_id).await?;
        self.fetch_news_item(football_news_id).await
    }

    async fn club_listing(&self, club_id: i64) -> AppResult<Vec<ClubProfile>> {
        self.live_club(club_id).await?;
        self.fetch_live_clubs().await
    }
}
