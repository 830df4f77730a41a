use axum::response::Json;
use nxfi_types::{ActionRule, ActionsJson};

use crate::config::SUPPLY_ROUTE_PREFIX;

/// Maps the supply action paths onto this API for Actions clients.
pub async fn actions_json() -> Json<ActionsJson> {
    let pattern = format!("{SUPPLY_ROUTE_PREFIX}/**");
    Json(ActionsJson {
        rules: vec![ActionRule::new(pattern.clone(), pattern)],
    })
}
