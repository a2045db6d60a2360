use axum::extract::State;
use axum::Json;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::stats::StatsSnapshot;

/// GET /api/stats
///
/// Counters since process start. Available in degraded mode too.
pub async fn get_stats(State(state): State<AppState>, _user: AuthUser) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}
