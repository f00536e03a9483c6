use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::ClinicProfile;
use crate::state::AppState;

/// Public clinic profile backing the widget's static panels.
pub async fn get_clinic(State(state): State<Arc<AppState>>) -> Json<ClinicProfile> {
    Json(state.clinic.clone())
}
