//! Persistence layer.
//!
//! One trait per API slice, all implemented by [`PostgresRepository`]. Every
//! mutation folds its eligibility guard into the statement that acts
//! (`UPDATE ... WHERE <guard>`, `INSERT ... SELECT ... WHERE <guard>`), so a
//! concurrent status change can never slip between check and write. When such a
//! statement touches no row, a follow-up read classifies the failure as a
//! missing row or an ineligible one.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::{ClubProfile, FootballNews, Match},
};

pub mod admin;
pub mod club;
pub mod player;

pub use admin::AdminRepository;
pub use club::ClubRepository;
pub use player::PlayerRepository;

pub type AdminRepositoryState = Arc<dyn AdminRepository>;
pub type ClubRepositoryState = Arc<dyn ClubRepository>;
pub type PlayerRepositoryState = Arc<dyn PlayerRepository>;

pub(crate) const ADMIN_PROFILE_COLUMNS: &str = "admin_id, admin_name, admin_email, admin_image, \
    admin_aadhar, admin_mobile, admin_address, registered_date";

pub(crate) const CLUB_PROFILE_COLUMNS: &str = "club_id, club_name, club_email, club_image, \
    club_address, manager_name, manager_image, manager_email, manager_mobile, manager_address, \
    registered_date";

pub(crate) const PLAYER_COLUMNS: &str = "player_id, club_id, player_name, player_email, \
    player_mobile, player_image, player_age, player_country, player_position, player_address, \
    registered_date, is_approved, is_active, is_suspended";

pub(crate) const MATCH_COLUMNS: &str =
    "match_id, home_team, away_team, match_venue, match_date, home_points, away_points, end_status";

pub(crate) const NEWS_COLUMNS: &str =
    "football_news_id, admin_id, news_title, news_content, news_image, added_date";

pub(crate) const LEAVE_REQUEST_COLUMNS: &str = "leave_request_id, player_id, club_id, \
    leave_reason, leave_from, leave_to, is_success, is_approved, requested_date";

pub(crate) const NOTIFICATION_COLUMNS: &str =
    "notification_id, club_id, player_id, message, sent_date";

// Player state predicates, evaluated against the `players` table.
pub(crate) const PLAYER_UNAPPROVED: &str = "NOT is_approved AND NOT delete_status";
pub(crate) const PLAYER_LIVE: &str =
    "is_approved AND is_active AND NOT is_suspended AND NOT delete_status";
pub(crate) const PLAYER_SUSPENDED: &str = "is_suspended AND NOT delete_status";
pub(crate) const PLAYER_NOT_DELETED: &str = "NOT delete_status";

/// PostgresRepository
///
/// The concrete implementation of the slice traits, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Maps an optional eligibility flag to the matching outcome.
    fn eligibility(flag: Option<bool>, entity: &'static str) -> AppResult<()> {
        match flag {
            Some(true) => Ok(()),
            Some(false) => Err(AppError::ineligible(entity)),
            None => Err(AppError::missing(entity)),
        }
    }

    /// live_admin
    ///
    /// Guard: the admin exists, is active and is not deleted.
    pub(crate) async fn live_admin(&self, admin_id: i64) -> AppResult<()> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_active AND NOT delete_status FROM admins WHERE admin_id = $1",
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await?;
        Self::eligibility(flag, "admin")
    }

    /// live_club
    ///
    /// Guard: the club exists, is active and is not suspended.
    pub(crate) async fn live_club(&self, club_id: i64) -> AppResult<()> {
        let flag = sqlx::query_scalar::<_, bool>(
            "SELECT is_active AND NOT is_suspended FROM clubs WHERE club_id = $1",
        )
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await?;
        Self::eligibility(flag, "club")
    }

    /// live_player
    ///
    /// Guard: the player is approved, active, not suspended and not deleted.
    pub(crate) async fn live_player(&self, player_id: i64) -> AppResult<()> {
        let sql = format!("SELECT {PLAYER_LIVE} FROM players WHERE player_id = $1");
        let flag = sqlx::query_scalar::<_, bool>(&sql)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;
        Self::eligibility(flag, "player")
    }

    /// club_player_failure
    ///
    /// Explains why a club-scoped player statement matched nothing: the club
    /// guard, a player missing from the club, or a player whose flags do not
    /// satisfy `predicate`.
    pub(crate) async fn club_player_failure(
        &self,
        club_id: i64,
        player_id: i64,
        predicate: &str,
    ) -> AppError {
        if let Err(e) = self.live_club(club_id).await {
            return e;
        }

        let sql = format!("SELECT {predicate} FROM players WHERE player_id = $1 AND club_id = $2");
        let flag = sqlx::query_scalar::<_, bool>(&sql)
            .bind(player_id)
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await;

        match flag {
            Ok(None) => AppError::missing("player"),
            // A row that satisfies the predicate now changed state concurrently.
            Ok(Some(_)) => AppError::ineligible("player"),
            Err(e) => e.into(),
        }
    }

    // --- Shared read models (matches, news, clubs) ---

    /// Upcoming matches: not deleted, not ended, latest first.
    pub(crate) async fn fetch_matches(&self) -> AppResult<Vec<Match>> {
        let sql = format!(
            "SELECT {MATCH_COLUMNS} FROM matches \
             WHERE NOT delete_status AND NOT end_status \
             ORDER BY match_date DESC"
        );
        Ok(sqlx::query_as::<_, Match>(&sql).fetch_all(&self.pool).await?)
    }

    pub(crate) async fn fetch_match(&self, match_id: i64) -> AppResult<Match> {
        let sql = format!(
            "SELECT {MATCH_COLUMNS} FROM matches \
             WHERE match_id = $1 AND NOT delete_status AND NOT end_status"
        );
        sqlx::query_as::<_, Match>(&sql)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("match"))
    }

    /// Points table: every non-deleted match, ended ones included, oldest first.
    pub(crate) async fn fetch_match_points(&self) -> AppResult<Vec<Match>> {
        let sql = format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE NOT delete_status ORDER BY match_date ASC"
        );
        Ok(sqlx::query_as::<_, Match>(&sql).fetch_all(&self.pool).await?)
    }

    pub(crate) async fn fetch_news(&self) -> AppResult<Vec<FootballNews>> {
        let sql = format!(
            "SELECT {NEWS_COLUMNS} FROM football_news WHERE NOT delete_status ORDER BY added_date DESC"
        );
        Ok(sqlx::query_as::<_, FootballNews>(&sql).fetch_all(&self.pool).await?)
    }

    pub(crate) async fn fetch_news_item(&self, football_news_id: i64) -> AppResult<FootballNews> {
        let sql = format!(
            "SELECT {NEWS_COLUMNS} FROM football_news \
             WHERE football_news_id = $1 AND NOT delete_status"
        );
        sqlx::query_as::<_, FootballNews>(&sql)
            .bind(football_news_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::missing("football news"))
    }

    /// Clubs that are active and not suspended.
    pub(crate) async fn fetch_live_clubs(&self) -> AppResult<Vec<ClubProfile>> {
        let sql = format!(
            "SELECT {CLUB_PROFILE_COLUMNS} FROM clubs \
             WHERE is_active AND NOT is_suspended ORDER BY club_id"
        );
        Ok(sqlx::query_as::<_, ClubProfile>(&sql).fetch_all(&self.pool).await?)
    }
}
