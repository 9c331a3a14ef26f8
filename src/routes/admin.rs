use crate::{AppState, handlers::admin};
use axum::{Router, routing::post};

/// Admin account creation and login. No token required.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/adminRegistration", post(admin::admin_registration))
        .route("/adminLogin", post(admin::admin_login))
}

/// Admin Router Module
///
/// Every route here runs behind the authentication layer, and each handler
/// additionally rejects tokens that were not issued to an admin (403).
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/adminChangePassword", post(admin::admin_change_password))
        .route("/adminViewProfile", post(admin::admin_view_profile))
        .route("/adminUpdateProfile", post(admin::admin_update_profile))
        // POST /api/admin/adminAddNews
        // Publishes a news item authored by the calling admin. Read back by clubs
        // and players through their `ViewAllNews` routes.
        .route("/adminAddNews", post(admin::admin_add_news))
}
