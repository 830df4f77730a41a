//! Supply action handlers: card metadata on GET, unsigned deposit on POST.

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};
use nxfi_types::{
    ActionGetResponse, ActionParameter, ActionPostRequest, ActionPostResponse, LinkedAction,
};
use tracing::info;

use crate::{
    config::{DEFAULT_SUPPLY_AMOUNT, PRESET_AMOUNTS, SUPPLY_ROUTE_PREFIX},
    error::ApiError,
    types::ApiState,
};

const AMOUNT_PARAMETER: &str = "amount";

const ACCOUNT_FEE_NOTICE: &str = "(If you are using nxfi's service for the first time, there will be a fee of approximately 0.02339 SOL for creating the nxfi account.)";

/// Card for a reserve the registry does not list.
fn not_available(state: &ApiState, reserve: &str) -> Json<ActionGetResponse> {
    let title = format!("Supply {reserve}");
    Json(
        ActionGetResponse::new(&state.config.icon_url, "Not Available", &title, &title)
            .disabled_with("Token metadata not found."),
    )
}

/// `GET /{reserve}`
pub async fn get_supply(
    State(state): State<ApiState>,
    Path(reserve): Path<String>,
) -> Json<ActionGetResponse> {
    info!("Supply metadata requested for {}", reserve);
    let Some(token) = state.client.lookup_token(&reserve).await else {
        return not_available(&state, &reserve);
    };

    let symbol = token.display_symbol();
    let label = format!("Supply {symbol}");
    let description = format!(
        "Supply {symbol}. Choose amount of {symbol} from the options below, or enter a custom amount.{ACCOUNT_FEE_NOTICE}"
    );

    let mut actions: Vec<LinkedAction> = PRESET_AMOUNTS
        .iter()
        .map(|amount| LinkedAction::new(format!("{SUPPLY_ROUTE_PREFIX}/{reserve}/{amount}"), *amount))
        .collect();
    actions.push(
        LinkedAction::new(
            format!("{SUPPLY_ROUTE_PREFIX}/{reserve}/{{{AMOUNT_PARAMETER}}}"),
            &label,
        )
        .with_parameter(ActionParameter::new(AMOUNT_PARAMETER, "Enter a custom amount")),
    );

    Json(
        ActionGetResponse::new(&state.config.icon_url, &label, &label, description)
            .with_actions(actions),
    )
}

/// `GET /{reserve}/{amount}`
pub async fn get_supply_amount(
    State(state): State<ApiState>,
    Path((reserve, amount)): Path<(String, String)>,
) -> Json<ActionGetResponse> {
    info!("Supply metadata requested for {} {}", amount, reserve);
    let Some(token) = state.client.lookup_token(&reserve).await else {
        return not_available(&state, &reserve);
    };

    let label = format!("Supply {amount} {}", token.display_symbol());
    let description = format!("Supply {reserve}{ACCOUNT_FEE_NOTICE}");
    Json(ActionGetResponse::new(
        &state.config.icon_url,
        &label,
        &label,
        description,
    ))
}

/// `POST /{reserve}`, supplying the default amount.
pub async fn post_supply(
    State(state): State<ApiState>,
    Path(reserve): Path<String>,
    body: Bytes,
) -> Result<Json<ActionPostResponse>, ApiError> {
    build_supply(&state, &reserve, DEFAULT_SUPPLY_AMOUNT, &body).await
}

/// `POST /{reserve}/{amount}`
pub async fn post_supply_amount(
    State(state): State<ApiState>,
    Path((reserve, amount)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ActionPostResponse>, ApiError> {
    build_supply(&state, &reserve, &amount, &body).await
}

/// The body is only read once the reserve is known, so an unknown reserve
/// answers 422 whatever was posted.
async fn build_supply(
    state: &ApiState,
    reserve: &str,
    amount: &str,
    body: &[u8],
) -> Result<Json<ActionPostResponse>, ApiError> {
    info!("Building supply of {} {}", amount, reserve);
    let token = state
        .client
        .lookup_token(reserve)
        .await
        .ok_or_else(|| ApiError::TokenNotFound(reserve.to_string()))?;

    let ActionPostRequest { account } =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let unsigned = state.client.deposit(&token, amount, &account).await?;
    info!(
        "Built supply transaction for {} ({} signatures required)",
        account,
        unsigned.transaction.signatures.len()
    );

    Ok(Json(ActionPostResponse {
        transaction: unsigned.base64,
        message: None,
    }))
}
