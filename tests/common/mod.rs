#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use football_club_api::{
    AdminRepositoryState, AppConfig, AppError, AppResult, AppState, ClubRepositoryState,
    PlayerRepositoryState,
    auth::{Role, hash_password, issue_token},
    create_router,
    models::{
        AddNewsRequest, AdminProfile, AdminUpdateProfileRequest, ClubProfile,
        ClubUpdateProfileRequest, Credentials, FootballNews, Injury, InjuryRequest, LeaveRequest,
        LeaveRequestInput, Match, NewAdmin, NewClub, NewPlayer, Player, PlayerNotification,
        PlayerUpdateProfileRequest, SendNotificationRequest,
    },
    repository::{AdminRepository, ClubRepository, PlayerRepository},
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;

// --- IN-MEMORY REPOSITORY ---

// Mirrors the guard semantics of the Postgres statements closely enough for
// handler-level tests. Each method takes the lock once and never awaits while
// holding it.

struct AdminRow {
    profile: AdminProfile,
    password_hash: String,
    is_active: bool,
    delete_status: bool,
}

struct ClubRow {
    profile: ClubProfile,
    password_hash: String,
    is_active: bool,
    is_suspended: bool,
}

struct PlayerRow {
    player: Player,
    password_hash: String,
    delete_status: bool,
}

impl PlayerRow {
    fn unapproved(&self) -> bool {
        !self.player.is_approved && !self.delete_status
    }
    fn live(&self) -> bool {
        self.player.is_approved
            && self.player.is_active
            && !self.player.is_suspended
            && !self.delete_status
    }
    fn suspended(&self) -> bool {
        self.player.is_suspended && !self.delete_status
    }
    fn not_deleted(&self) -> bool {
        !self.delete_status
    }
    fn notifiable(&self) -> bool {
        self.player.is_active && !self.delete_status
    }
}

#[derive(Default)]
struct Store {
    next_id: i64,
    admins: Vec<AdminRow>,
    clubs: Vec<ClubRow>,
    players: Vec<PlayerRow>,
    news: Vec<FootballNews>,
    matches: Vec<(Match, bool)>,
    injuries: Vec<Injury>,
    notifications: Vec<PlayerNotification>,
    leave_requests: Vec<LeaveRequest>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn live_admin(&self, admin_id: i64) -> AppResult<()> {
        match self.admins.iter().find(|a| a.profile.admin_id == admin_id) {
            None => Err(AppError::missing("admin")),
            Some(a) if a.is_active && !a.delete_status => Ok(()),
            Some(_) => Err(AppError::ineligible("admin")),
        }
    }

    fn live_club(&self, club_id: i64) -> AppResult<()> {
        match self.clubs.iter().find(|c| c.profile.club_id == club_id) {
            None => Err(AppError::missing("club")),
            Some(c) if c.is_active && !c.is_suspended => Ok(()),
            Some(_) => Err(AppError::ineligible("club")),
        }
    }

    fn live_player(&self, player_id: i64) -> AppResult<()> {
        match self.players.iter().find(|p| p.player.player_id == player_id) {
            None => Err(AppError::missing("player")),
            Some(p) if p.live() => Ok(()),
            Some(_) => Err(AppError::ineligible("player")),
        }
    }

    fn club_player(
        &mut self,
        club_id: i64,
        player_id: i64,
        guard: fn(&PlayerRow) -> bool,
    ) -> AppResult<&mut PlayerRow> {
        self.live_club(club_id)?;
        let row = self
            .players
            .iter_mut()
            .find(|p| p.player.player_id == player_id && p.player.club_id == club_id)
            .ok_or_else(|| AppError::missing("player"))?;
        if guard(row) {
            Ok(row)
        } else {
            Err(AppError::ineligible("player"))
        }
    }

    fn club_players(&self, club_id: i64, guard: fn(&PlayerRow) -> bool) -> AppResult<Vec<Player>> {
        self.live_club(club_id)?;
        Ok(self
            .players
            .iter()
            .filter(|p| p.player.club_id == club_id && guard(p))
            .map(|p| p.player.clone())
            .collect())
    }

    fn open_matches(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|(m, deleted)| !deleted && !m.end_status)
            .map(|(m, _)| m.clone())
            .collect();
        matches.sort_by(|a, b| b.match_date.cmp(&a.match_date));
        matches
    }

    fn open_match(&self, match_id: i64) -> AppResult<Match> {
        self.open_matches()
            .into_iter()
            .find(|m| m.match_id == match_id)
            .ok_or_else(|| AppError::missing("match"))
    }

    fn match_points(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|(_, deleted)| !deleted)
            .map(|(m, _)| m.clone())
            .collect();
        matches.sort_by(|a, b| a.match_date.cmp(&b.match_date));
        matches
    }

    fn all_news(&self) -> Vec<FootballNews> {
        let mut news = self.news.clone();
        news.sort_by(|a, b| b.added_date.cmp(&a.added_date));
        news
    }

    fn news_item(&self, football_news_id: i64) -> AppResult<FootballNews> {
        self.news
            .iter()
            .find(|n| n.football_news_id == football_news_id)
            .cloned()
            .ok_or_else(|| AppError::missing("football news"))
    }

    fn live_clubs(&self) -> Vec<ClubProfile> {
        self.clubs
            .iter()
            .filter(|c| c.is_active && !c.is_suspended)
            .map(|c| c.profile.clone())
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap()
    }

    // --- Seeding helpers ---

    pub async fn seed_club(&self, email: &str, password: &str) -> i64 {
        let hash = hash_password(password.to_string()).await.unwrap();
        let club = NewClub {
            club_name: Some(format!("{} FC", email)),
            club_email: email.to_string(),
            club_image: None,
            club_address: None,
            manager_name: None,
            manager_image: None,
            manager_email: None,
            manager_mobile: None,
            manager_address: None,
            password_hash: hash,
        };
        self.register_club(club).await.unwrap().club_id
    }

    /// Registers a player with `club_id`; `approved` also activates it.
    pub async fn seed_player(&self, club_id: i64, email: &str, password: &str, approved: bool) -> i64 {
        let hash = hash_password(password.to_string()).await.unwrap();
        let player = NewPlayer {
            club_id,
            player_name: format!("Player {}", email),
            player_email: email.to_string(),
            player_mobile: Some("9876543210".to_string()),
            player_image: None,
            player_age: Some(21),
            player_country: Some("India".to_string()),
            player_position: Some("Forward".to_string()),
            player_address: Some("Kochi".to_string()),
            password_hash: hash,
        };
        let player_id = self.register_player(player).await.unwrap().player_id;
        if approved {
            self.approve_player(club_id, player_id).await.unwrap();
        }
        player_id
    }

    pub fn seed_match(&self, home: &str, away: &str, date: DateTime<Utc>, ended: bool) -> i64 {
        let mut store = self.store();
        let match_id = store.next_id();
        store.matches.push((
            Match {
                match_id,
                home_team: home.to_string(),
                away_team: away.to_string(),
                match_venue: None,
                match_date: date,
                home_points: 0,
                away_points: 0,
                end_status: ended,
            },
            false,
        ));
        match_id
    }

    pub fn suspend_club(&self, club_id: i64) {
        let mut store = self.store();
        if let Some(club) = store.clubs.iter_mut().find(|c| c.profile.club_id == club_id) {
            club.is_suspended = true;
        }
    }

    pub fn player(&self, player_id: i64) -> Option<Player> {
        self.store()
            .players
            .iter()
            .find(|p| p.player.player_id == player_id)
            .map(|p| p.player.clone())
    }

    pub fn player_is_deleted(&self, player_id: i64) -> bool {
        self.store()
            .players
            .iter()
            .any(|p| p.player.player_id == player_id && p.delete_status)
    }

    pub fn club_password_hash(&self, club_id: i64) -> String {
        self.store()
            .clubs
            .iter()
            .find(|c| c.profile.club_id == club_id)
            .map(|c| c.password_hash.clone())
            .unwrap()
    }

    pub fn club_count(&self) -> usize {
        self.store().clubs.len()
    }
}

#[async_trait]
impl AdminRepository for InMemoryRepository {
    async fn register_admin(&self, admin: NewAdmin) -> AppResult<AdminProfile> {
        let mut store = self.store();
        let live = |a: &&AdminRow| a.is_active && !a.delete_status;
        if store
            .admins
            .iter()
            .filter(live)
            .any(|a| a.profile.admin_email == admin.admin_email)
        {
            return Err(AppError::invalid_field("adminEmail", "Email already exists"));
        }
        if admin.admin_aadhar.is_some()
            && store
                .admins
                .iter()
                .filter(live)
                .any(|a| a.profile.admin_aadhar == admin.admin_aadhar)
        {
            return Err(AppError::Conflict("Aadhar number already exists".to_string()));
        }
        let admin_id = store.next_id();
        let profile = AdminProfile {
            admin_id,
            admin_name: admin.admin_name,
            admin_email: admin.admin_email,
            admin_image: admin.admin_image,
            admin_aadhar: admin.admin_aadhar,
            admin_mobile: admin.admin_mobile,
            admin_address: admin.admin_address,
            registered_date: Utc::now().date_naive(),
        };
        store.admins.push(AdminRow {
            profile: profile.clone(),
            password_hash: admin.password_hash,
            is_active: true,
            delete_status: false,
        });
        Ok(profile)
    }

    async fn admin_credentials_by_email(&self, email: &str) -> AppResult<Credentials> {
        self.store()
            .admins
            .iter()
            .find(|a| a.profile.admin_email == email && a.is_active && !a.delete_status)
            .map(|a| Credentials {
                id: a.profile.admin_id,
                email: a.profile.admin_email.clone(),
                password_hash: a.password_hash.clone(),
            })
            .ok_or_else(|| AppError::missing("admin"))
    }

    async fn admin_credentials(&self, admin_id: i64) -> AppResult<Credentials> {
        let store = self.store();
        store.live_admin(admin_id)?;
        store
            .admins
            .iter()
            .find(|a| a.profile.admin_id == admin_id)
            .map(|a| Credentials {
                id: a.profile.admin_id,
                email: a.profile.admin_email.clone(),
                password_hash: a.password_hash.clone(),
            })
            .ok_or_else(|| AppError::missing("admin"))
    }

    async fn update_admin_password(
        &self,
        admin_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()> {
        let mut store = self.store();
        store.live_admin(admin_id)?;
        let row = store
            .admins
            .iter_mut()
            .find(|a| a.profile.admin_id == admin_id)
            .ok_or_else(|| AppError::missing("admin"))?;
        if row.password_hash != current_hash {
            return Err(AppError::Conflict(
                "password was changed by another request".to_string(),
            ));
        }
        row.password_hash = new_hash.to_string();
        Ok(())
    }

    async fn admin_profile(&self, admin_id: i64) -> AppResult<AdminProfile> {
        let store = self.store();
        store.live_admin(admin_id).map_err(|_| AppError::missing("admin"))?;
        store
            .admins
            .iter()
            .find(|a| a.profile.admin_id == admin_id)
            .map(|a| a.profile.clone())
            .ok_or_else(|| AppError::missing("admin"))
    }

    async fn update_admin_profile(
        &self,
        admin_id: i64,
        update: AdminUpdateProfileRequest,
    ) -> AppResult<AdminProfile> {
        let mut store = self.store();
        store.live_admin(admin_id)?;
        if update.admin_aadhar.is_some()
            && store.admins.iter().any(|a| {
                a.profile.admin_id != admin_id
                    && a.is_active
                    && !a.delete_status
                    && a.profile.admin_aadhar == update.admin_aadhar
            })
        {
            return Err(AppError::Conflict("Aadhar number already exists".to_string()));
        }
        let row = store
            .admins
            .iter_mut()
            .find(|a| a.profile.admin_id == admin_id)
            .ok_or_else(|| AppError::missing("admin"))?;
        let profile = &mut row.profile;
        if let Some(name) = update.admin_name {
            profile.admin_name = name;
        }
        if update.admin_aadhar.is_some() {
            profile.admin_aadhar = update.admin_aadhar;
        }
        if update.admin_mobile.is_some() {
            profile.admin_mobile = update.admin_mobile;
        }
        if update.admin_address.is_some() {
            profile.admin_address = update.admin_address;
        }
        Ok(profile.clone())
    }

    async fn add_news(&self, admin_id: i64, news: AddNewsRequest) -> AppResult<FootballNews> {
        let mut store = self.store();
        store.live_admin(admin_id)?;
        let item = FootballNews {
            football_news_id: store.next_id(),
            admin_id,
            news_title: news.news_title,
            news_content: news.news_content,
            news_image: news.news_image,
            added_date: Utc::now(),
        };
        store.news.push(item.clone());
        Ok(item)
    }
}

#[async_trait]
impl ClubRepository for InMemoryRepository {
    async fn register_club(&self, club: NewClub) -> AppResult<ClubProfile> {
        let mut store = self.store();
        if store
            .clubs
            .iter()
            .any(|c| c.is_active && c.profile.club_email == club.club_email)
        {
            return Err(AppError::invalid_field("clubEmail", "Email already exists"));
        }
        let club_id = store.next_id();
        let profile = ClubProfile {
            club_id,
            club_name: club.club_name,
            club_email: club.club_email,
            club_image: club.club_image,
            club_address: club.club_address,
            manager_name: club.manager_name,
            manager_image: club.manager_image,
            manager_email: club.manager_email,
            manager_mobile: club.manager_mobile,
            manager_address: club.manager_address,
            registered_date: Utc::now().date_naive(),
        };
        store.clubs.push(ClubRow {
            profile: profile.clone(),
            password_hash: club.password_hash,
            is_active: true,
            is_suspended: false,
        });
        Ok(profile)
    }

    async fn club_credentials_by_email(&self, email: &str) -> AppResult<Credentials> {
        self.store()
            .clubs
            .iter()
            .find(|c| c.profile.club_email == email && c.is_active && !c.is_suspended)
            .map(|c| Credentials {
                id: c.profile.club_id,
                email: c.profile.club_email.clone(),
                password_hash: c.password_hash.clone(),
            })
            .ok_or_else(|| AppError::missing("club"))
    }

    async fn club_credentials(&self, club_id: i64) -> AppResult<Credentials> {
        let store = self.store();
        store.live_club(club_id)?;
        store
            .clubs
            .iter()
            .find(|c| c.profile.club_id == club_id)
            .map(|c| Credentials {
                id: c.profile.club_id,
                email: c.profile.club_email.clone(),
                password_hash: c.password_hash.clone(),
            })
            .ok_or_else(|| AppError::missing("club"))
    }

    async fn update_club_password(
        &self,
        club_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()> {
        let mut store = self.store();
        store.live_club(club_id)?;
        let row = store
            .clubs
            .iter_mut()
            .find(|c| c.profile.club_id == club_id)
            .ok_or_else(|| AppError::missing("club"))?;
        if row.password_hash != current_hash {
            return Err(AppError::Conflict(
                "password was changed by another request".to_string(),
            ));
        }
        row.password_hash = new_hash.to_string();
        Ok(())
    }

    async fn club_profile(&self, club_id: i64) -> AppResult<ClubProfile> {
        let store = self.store();
        store.live_club(club_id).map_err(|_| AppError::missing("club"))?;
        store
            .clubs
            .iter()
            .find(|c| c.profile.club_id == club_id)
            .map(|c| c.profile.clone())
            .ok_or_else(|| AppError::missing("club"))
    }

    async fn update_club_profile(
        &self,
        club_id: i64,
        update: ClubUpdateProfileRequest,
    ) -> AppResult<ClubProfile> {
        let mut store = self.store();
        store.live_club(club_id)?;
        let row = store
            .clubs
            .iter_mut()
            .find(|c| c.profile.club_id == club_id)
            .ok_or_else(|| AppError::missing("club"))?;
        let profile = &mut row.profile;
        if update.club_name.is_some() {
            profile.club_name = update.club_name;
        }
        if update.manager_mobile.is_some() {
            profile.manager_mobile = update.manager_mobile;
        }
        if update.club_address.is_some() {
            profile.club_address = update.club_address;
        }
        if update.manager_name.is_some() {
            profile.manager_name = update.manager_name;
        }
        Ok(profile.clone())
    }

    async fn unapproved_players(&self, club_id: i64) -> AppResult<Vec<Player>> {
        self.store().club_players(club_id, PlayerRow::unapproved)
    }

    async fn unapproved_player(&self, club_id: i64, player_id: i64) -> AppResult<Player> {
        let mut store = self.store();
        Ok(store
            .club_player(club_id, player_id, PlayerRow::unapproved)?
            .player
            .clone())
    }

    async fn roster_players(&self, club_id: i64) -> AppResult<Vec<Player>> {
        self.store().club_players(club_id, PlayerRow::live)
    }

    async fn roster_player(&self, club_id: i64, player_id: i64) -> AppResult<Player> {
        let mut store = self.store();
        Ok(store
            .club_player(club_id, player_id, PlayerRow::live)?
            .player
            .clone())
    }

    async fn suspended_players(&self, club_id: i64) -> AppResult<Vec<Player>> {
        self.store().club_players(club_id, PlayerRow::suspended)
    }

    async fn suspended_player(&self, club_id: i64, player_id: i64) -> AppResult<Player> {
        let mut store = self.store();
        Ok(store
            .club_player(club_id, player_id, PlayerRow::suspended)?
            .player
            .clone())
    }

    async fn approve_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        let mut store = self.store();
        let row = store.club_player(club_id, player_id, PlayerRow::unapproved)?;
        row.player.is_approved = true;
        row.player.is_active = true;
        Ok(player_id)
    }

    async fn delete_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        let mut store = self.store();
        let row = store.club_player(club_id, player_id, PlayerRow::not_deleted)?;
        row.delete_status = true;
        row.player.is_approved = false;
        Ok(player_id)
    }

    async fn suspend_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        let mut store = self.store();
        let row = store.club_player(club_id, player_id, PlayerRow::live)?;
        row.player.is_suspended = true;
        row.player.is_active = false;
        Ok(player_id)
    }

    async fn unsuspend_player(&self, club_id: i64, player_id: i64) -> AppResult<i64> {
        let mut store = self.store();
        let row = store.club_player(club_id, player_id, PlayerRow::suspended)?;
        row.player.is_suspended = false;
        row.player.is_active = true;
        Ok(player_id)
    }

    async fn search_players(&self, club_id: i64, term: &str) -> AppResult<Vec<Player>> {
        let store = self.store();
        store.live_club(club_id)?;
        let needle = term.trim().to_lowercase();
        let matches = |value: &str| value.to_lowercase().contains(&needle);
        let players: Vec<Player> = store
            .players
            .iter()
            .filter(|p| p.player.club_id == club_id && !p.delete_status)
            .filter(|p| {
                let player = &p.player;
                matches(&player.player_id.to_string())
                    || matches(&player.player_name)
                    || matches(&player.player_email)
                    || matches(player.player_mobile.as_deref().unwrap_or(""))
                    || matches(player.player_address.as_deref().unwrap_or(""))
            })
            .map(|p| p.player.clone())
            .collect();
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
        let mut store = self.store();
        store.club_player(club_id, notification.player_id, PlayerRow::notifiable)?;
        let sent = PlayerNotification {
            notification_id: store.next_id(),
            club_id,
            player_id: notification.player_id,
            message: notification.message,
            sent_date: Utc::now(),
        };
        store.notifications.push(sent.clone());
        Ok(sent)
    }

    async fn add_injury(&self, club_id: i64, injury: InjuryRequest) -> AppResult<Injury> {
        let mut store = self.store();
        let player = store
            .club_player(club_id, injury.player_id, PlayerRow::not_deleted)?
            .player
            .clone();
        let club = store
            .clubs
            .iter()
            .find(|c| c.profile.club_id == club_id)
            .map(|c| c.profile.clone())
            .ok_or_else(|| AppError::missing("club"))?;
        let record = Injury {
            injury_id: store.next_id(),
            player_id: player.player_id,
            club_id,
            player_name: player.player_name,
            player_image: player.player_image,
            club_name: club.club_name,
            club_image: club.club_image,
            injury_type: injury.injury_type,
            average_recovery_time: injury.average_recovery_time,
            reported_date: Utc::now(),
        };
        store.injuries.push(record.clone());
        Ok(record)
    }

    async fn pending_leave_requests(&self, club_id: i64) -> AppResult<Vec<LeaveRequest>> {
        let store = self.store();
        store.live_club(club_id)?;
        Ok(store
            .leave_requests
            .iter()
            .filter(|r| r.club_id == club_id && r.is_success && !r.is_approved)
            .cloned()
            .collect())
    }

    async fn pending_leave_request(
        &self,
        club_id: i64,
        leave_request_id: i64,
    ) -> AppResult<LeaveRequest> {
        let store = self.store();
        store.live_club(club_id)?;
        store
            .leave_requests
            .iter()
            .find(|r| {
                r.leave_request_id == leave_request_id
                    && r.club_id == club_id
                    && r.is_success
                    && !r.is_approved
            })
            .cloned()
            .ok_or_else(|| AppError::missing("leave request"))
    }

    async fn approve_leave_request(&self, club_id: i64, leave_request_id: i64) -> AppResult<i64> {
        let mut store = self.store();
        store.live_club(club_id)?;
        let request = store
            .leave_requests
            .iter_mut()
            .find(|r| r.leave_request_id == leave_request_id && r.club_id == club_id)
            .ok_or_else(|| AppError::missing("leave request"))?;
        if !request.is_success || request.is_approved {
            return Err(AppError::ineligible("leave request"));
        }
        request.is_approved = true;
        Ok(leave_request_id)
    }

    async fn club_matches(&self, club_id: i64) -> AppResult<Vec<Match>> {
        let store = self.store();
        store.live_club(club_id)?;
        Ok(store.open_matches())
    }

    async fn club_match(&self, club_id: i64, match_id: i64) -> AppResult<Match> {
        let store = self.store();
        store.live_club(club_id)?;
        store.open_match(match_id)
    }

    async fn club_match_points(&self, club_id: i64) -> AppResult<Vec<Match>> {
        let store = self.store();
        store.live_club(club_id)?;
        Ok(store.match_points())
    }

    async fn club_news(&self, club_id: i64) -> AppResult<Vec<FootballNews>> {
        let store = self.store();
        store.live_club(club_id)?;
        Ok(store.all_news())
    }

    async fn club_news_item(&self, club_id: i64, football_news_id: i64) -> AppResult<FootballNews> {
        let store = self.store();
        store.live_club(club_id)?;
        store.news_item(football_news_id)
    }

    async fn club_listing(&self, club_id: i64) -> AppResult<Vec<ClubProfile>> {
        let store = self.store();
        store.live_club(club_id)?;
        Ok(store.live_clubs())
    }
}

#[async_trait]
impl PlayerRepository for InMemoryRepository {
    async fn register_player(&self, player: NewPlayer) -> AppResult<Player> {
        let mut store = self.store();
        store.live_club(player.club_id)?;
        if store
            .players
            .iter()
            .any(|p| !p.delete_status && p.player.player_email == player.player_email)
        {
            return Err(AppError::invalid_field("playerEmail", "Email already exists"));
        }
        let created = Player {
            player_id: store.next_id(),
            club_id: player.club_id,
            player_name: player.player_name,
            player_email: player.player_email,
            player_mobile: player.player_mobile,
            player_image: player.player_image,
            player_age: player.player_age,
            player_country: player.player_country,
            player_position: player.player_position,
            player_address: player.player_address,
            registered_date: Utc::now().date_naive(),
            is_approved: false,
            is_active: false,
            is_suspended: false,
        };
        store.players.push(PlayerRow {
            player: created.clone(),
            password_hash: player.password_hash,
            delete_status: false,
        });
        Ok(created)
    }

    async fn player_credentials_by_email(&self, email: &str) -> AppResult<Credentials> {
        self.store()
            .players
            .iter()
            .find(|p| p.player.player_email == email && p.live())
            .map(|p| Credentials {
                id: p.player.player_id,
                email: p.player.player_email.clone(),
                password_hash: p.password_hash.clone(),
            })
            .ok_or_else(|| AppError::missing("player"))
    }

    async fn player_credentials(&self, player_id: i64) -> AppResult<Credentials> {
        self.store()
            .players
            .iter()
            .find(|p| p.player.player_id == player_id && p.live())
            .map(|p| Credentials {
                id: p.player.player_id,
                email: p.player.player_email.clone(),
                password_hash: p.password_hash.clone(),
            })
            .ok_or_else(|| AppError::missing("player"))
    }

    async fn update_player_password(
        &self,
        player_id: i64,
        current_hash: &str,
        new_hash: &str,
    ) -> AppResult<()> {
        let mut store = self.store();
        store.live_player(player_id)?;
        let row = store
            .players
            .iter_mut()
            .find(|p| p.player.player_id == player_id)
            .ok_or_else(|| AppError::missing("player"))?;
        if row.password_hash != current_hash {
            return Err(AppError::Conflict(
                "password was changed by another request".to_string(),
            ));
        }
        row.password_hash = new_hash.to_string();
        Ok(())
    }

    async fn player_profile(&self, player_id: i64) -> AppResult<Player> {
        self.store()
            .players
            .iter()
            .find(|p| p.player.player_id == player_id && p.live())
            .map(|p| p.player.clone())
            .ok_or_else(|| AppError::missing("player"))
    }

    async fn update_player_profile(
        &self,
        player_id: i64,
        update: PlayerUpdateProfileRequest,
    ) -> AppResult<Player> {
        let mut store = self.store();
        store.live_player(player_id)?;
        let row = store
            .players
            .iter_mut()
            .find(|p| p.player.player_id == player_id)
            .ok_or_else(|| AppError::missing("player"))?;
        let player = &mut row.player;
        if let Some(name) = update.player_name {
            player.player_name = name;
        }
        if update.player_mobile.is_some() {
            player.player_mobile = update.player_mobile;
        }
        if update.player_image.is_some() {
            player.player_image = update.player_image;
        }
        if update.player_age.is_some() {
            player.player_age = update.player_age;
        }
        if update.player_country.is_some() {
            player.player_country = update.player_country;
        }
        if update.player_position.is_some() {
            player.player_position = update.player_position;
        }
        if update.player_address.is_some() {
            player.player_address = update.player_address;
        }
        Ok(player.clone())
    }

    async fn player_clubs(&self, player_id: i64) -> AppResult<Vec<ClubProfile>> {
        let store = self.store();
        store.live_player(player_id)?;
        Ok(store.live_clubs())
    }

    async fn player_notifications(&self, player_id: i64) -> AppResult<Vec<PlayerNotification>> {
        let store = self.store();
        store.live_player(player_id)?;
        let mut notifications: Vec<PlayerNotification> = store
            .notifications
            .iter()
            .filter(|n| n.player_id == player_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.notification_id.cmp(&a.notification_id));
        Ok(notifications)
    }

    async fn player_notification(
        &self,
        player_id: i64,
        notification_id: i64,
    ) -> AppResult<PlayerNotification> {
        let store = self.store();
        store.live_player(player_id)?;
        store
            .notifications
            .iter()
            .find(|n| n.notification_id == notification_id && n.player_id == player_id)
            .cloned()
            .ok_or_else(|| AppError::missing("notification"))
    }

    async fn send_leave_request(
        &self,
        player_id: i64,
        request: LeaveRequestInput,
    ) -> AppResult<LeaveRequest> {
        let mut store = self.store();
        store.live_player(player_id)?;
        let club_id = store
            .players
            .iter()
            .find(|p| p.player.player_id == player_id)
            .map(|p| p.player.club_id)
            .ok_or_else(|| AppError::missing("player"))?;
        let created = LeaveRequest {
            leave_request_id: store.next_id(),
            player_id,
            club_id,
            leave_reason: request.leave_reason,
            leave_from: request.leave_from,
            leave_to: request.leave_to,
            is_success: true,
            is_approved: false,
            requested_date: Utc::now(),
        };
        store.leave_requests.push(created.clone());
        Ok(created)
    }

    async fn approved_leave_requests(&self, player_id: i64) -> AppResult<Vec<LeaveRequest>> {
        let store = self.store();
        store.live_player(player_id)?;
        Ok(store
            .leave_requests
            .iter()
            .filter(|r| r.player_id == player_id && r.is_approved)
            .cloned()
            .collect())
    }

    async fn player_matches(&self, player_id: i64) -> AppResult<Vec<Match>> {
        let store = self.store();
        store.live_player(player_id)?;
        Ok(store.open_matches())
    }

    async fn player_match(&self, player_id: i64, match_id: i64) -> AppResult<Match> {
        let store = self.store();
        store.live_player(player_id)?;
        store.open_match(match_id)
    }

    async fn player_match_points(&self, player_id: i64) -> AppResult<Vec<Match>> {
        let store = self.store();
        store.live_player(player_id)?;
        Ok(store.match_points())
    }

    async fn player_news(&self, player_id: i64) -> AppResult<Vec<FootballNews>> {
        let store = self.store();
        store.live_player(player_id)?;
        Ok(store.all_news())
    }

    async fn player_news_item(
        &self,
        player_id: i64,
        football_news_id: i64,
    ) -> AppResult<FootballNews> {
        let store = self.store();
        store.live_player(player_id)?;
        store.news_item(football_news_id)
    }
}

// --- TEST SERVER ---

pub struct TestApp {
    pub address: String,
    pub repo: Arc<InMemoryRepository>,
    pub config: AppConfig,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn token(&self, id: i64, role: Role) -> String {
        issue_token(&self.config, id, role).unwrap()
    }

    /// POSTs `body` to `path` with a bearer token for (`id`, `role`).
    pub async fn post_as(
        &self,
        path: &str,
        id: i64,
        role: Role,
        body: serde_json::Value,
    ) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(self.token(id, role))
            .json(&body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_public(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("request failed")
    }
}

/// Serves the real router over an in-memory repository on an ephemeral port.
pub async fn spawn_app() -> TestApp {
    let repo = Arc::new(InMemoryRepository::new());
    let config = AppConfig::default();

    let state = AppState {
        admins: repo.clone() as AdminRepositoryState,
        clubs: repo.clone() as ClubRepositoryState,
        players: repo.clone() as PlayerRepositoryState,
        config: config.clone(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        address,
        repo,
        config,
        client: reqwest::Client::new(),
    }
}
