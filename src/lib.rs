use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

// One router module per API slice (admin, club, player).
pub mod routes;
use auth::AuthUser;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use repository::{
    AdminRepositoryState, ClubRepositoryState, PlayerRepositoryState, PostgresRepository,
};

/// ApiDoc
///
/// OpenAPI document for every route, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        // Admin
        handlers::admin::admin_registration, handlers::admin::admin_login,
        handlers::admin::admin_change_password, handlers::admin::admin_view_profile,
        handlers::admin::admin_update_profile, handlers::admin::admin_add_news,
        // Club
        handlers::club::club_registration, handlers::club::club_login,
        handlers::club::club_change_password, handlers::club::club_view_profile,
        handlers::club::club_update_profile, handlers::club::club_view_all_unapproved_players,
        handlers::club::club_view_one_unapproved_player, handlers::club::club_approve_one_player,
        handlers::club::club_view_all_players, handlers::club::club_view_one_player,
        handlers::club::club_delete_one_player, handlers::club::club_suspend_one_player,
        handlers::club::club_unsuspend_one_player, handlers::club::club_view_all_suspended_players,
        handlers::club::club_view_one_suspended_player, handlers::club::club_search_players,
        handlers::club::club_send_notification_to_player,
        handlers::club::club_add_one_injury_update, handlers::club::club_view_all_leave_requests,
        handlers::club::club_view_one_leave_request,
        handlers::club::club_approve_one_leave_request, handlers::club::club_view_all_matches,
        handlers::club::club_view_one_match, handlers::club::club_view_all_match_points,
        handlers::club::club_view_all_news, handlers::club::club_view_one_news,
        handlers::club::club_view_all_clubs,
        // Player
        handlers::player::player_registration, handlers::player::player_login,
        handlers::player::player_view_all_clubs, handlers::player::player_change_password,
        handlers::player::player_view_profile, handlers::player::player_update_profile,
        handlers::player::player_view_all_notifications,
        handlers::player::player_view_one_notification,
        handlers::player::player_send_leave_request_to_club,
        handlers::player::player_view_all_approved_leave_requests,
        handlers::player::player_view_all_matches, handlers::player::player_view_one_match,
        handlers::player::player_view_all_match_points, handlers::player::player_view_all_news,
        handlers::player::player_view_one_news,
    ),
    components(
        schemas(
            error::ErrorBody, error::NotFoundReason,
            models::ChangePasswordRequest, models::MessageResponse,
            models::AdminProfile, models::AdminRegistrationRequest, models::AdminLoginRequest,
            models::AdminLoginResponse, models::AdminUpdateProfileRequest,
            models::ClubProfile, models::ClubRegistrationRequest, models::ClubLoginRequest,
            models::ClubLoginResponse, models::ClubUpdateProfileRequest,
            models::SearchPlayersRequest,
            models::Player, models::PlayerRegistrationRequest, models::PlayerLoginRequest,
            models::PlayerLoginResponse, models::PlayerUpdateProfileRequest, models::PlayerRef,
            models::FootballNews, models::AddNewsRequest, models::NewsRef,
            models::Match, models::MatchRef, models::Injury, models::InjuryRequest,
            models::PlayerNotification, models::SendNotificationRequest, models::NotificationRef,
            models::LeaveRequest, models::LeaveRequestInput, models::LeaveRequestRef,
        )
    ),
    tags(
        (name = "admin", description = "Admin accounts and news"),
        (name = "club", description = "Club accounts, roster and player communication"),
        (name = "player", description = "Player accounts, notifications and leave requests")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state cloned into every request: one repository per API
/// slice plus the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub admins: AdminRepositoryState,
    pub clubs: ClubRepositoryState,
    pub players: PlayerRepositoryState,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for AdminRepositoryState {
    fn from_ref(app_state: &AppState) -> AdminRepositoryState {
        app_state.admins.clone()
    }
}

impl FromRef<AppState> for ClubRepositoryState {
    fn from_ref(app_state: &AppState) -> ClubRepositoryState {
        app_state.clubs.clone()
    }
}

impl FromRef<AppState> for PlayerRepositoryState {
    fn from_ref(app_state: &AppState) -> PlayerRepositoryState {
        app_state.players.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Rejects the request with 401 unless it carries a valid session token.
/// Role checks happen in the handlers, which know which role they serve.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// Public routes of a slice merged with its protected routes behind `auth_middleware`.
fn slice_router(
    state: &AppState,
    public: Router<AppState>,
    protected: Router<AppState>,
) -> Router<AppState> {
    public.merge(protected.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    )))
}

/// create_router
///
/// Assembles the three API slices, the docs and the health probe, then applies
/// the request-id, tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .nest(
            "/api/admin",
            slice_router(
                &state,
                routes::admin::public_routes(),
                routes::admin::protected_routes(),
            ),
        )
        .nest(
            "/api/club",
            slice_router(
                &state,
                routes::club::public_routes(),
                routes::club::protected_routes(),
            ),
        )
        .nest(
            "/api/player",
            slice_router(
                &state,
                routes::player::public_routes(),
                routes::player::protected_routes(),
            ),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span, tagged with the `x-request-id` set above so every
/// log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
