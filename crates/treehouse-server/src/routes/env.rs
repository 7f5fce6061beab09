use std::collections::BTreeMap;

use axum::Json;
use treehouse_core::config::presence_report;

/// Which configuration variables are set in the server's environment.
pub async fn test_env() -> Json<BTreeMap<&'static str, bool>> {
    Json(presence_report(|key| std::env::var(key).ok()))
}
