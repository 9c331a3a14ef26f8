/// Router Module Index
///
/// One module per API slice. Each exposes a public router (registration and
/// login) and a protected router that `create_router` wraps in the
/// authentication layer before nesting both under `/api/<slice>`.

/// Routes under `/api/admin`.
pub mod admin;

/// Routes under `/api/club`.
pub mod club;

/// Routes under `/api/player`.
pub mod player;
