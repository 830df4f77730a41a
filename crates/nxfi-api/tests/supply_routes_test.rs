//! Drives the router in-process against an in-memory ledger.

mod common;

use axum::http::StatusCode;
use common::{get, post, TestApp};
use nxlend_sdk::{
    amount::wrap_lamports,
    config::default_sol_wrap_factor,
    instructions::{anchor_discriminator, CREATE_USER_ACCOUNT, DEPOSIT_INTO_RESERVE},
    transaction::decode_transaction,
};
use serde_json::json;
use solana_sdk::{message::VersionedMessage, pubkey::Pubkey};

#[tokio::test]
async fn metadata_lists_presets_and_custom_amount() {
    let app = TestApp::new();
    let (status, body) = get(app.router(app.chain()), "/api/nxlending/supply/usdc")
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(body["label"].as_str().unwrap().contains("Supply USDC"));
    assert_eq!(body["title"], json!("Supply USDC"));
    assert!(body.get("disabled").is_none());

    let actions = body["links"]["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 4);
    let labels: Vec<&str> = actions[..3]
        .iter()
        .map(|a| a["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["0.1", "1", "10"]);
    assert_eq!(actions[0]["href"], json!("/api/nxlending/supply/usdc/0.1"));
    assert_eq!(
        actions[3],
        json!({
            "href": "/api/nxlending/supply/usdc/{amount}",
            "label": "Supply USDC",
            "parameters": [{ "name": "amount", "label": "Enter a custom amount" }]
        })
    );
}

#[tokio::test]
async fn unknown_reserve_metadata_is_disabled() {
    let app = TestApp::new();
    let (status, body) = get(app.router(app.chain()), "/api/nxlending/supply/doesnotexist")
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], json!("Not Available"));
    assert_eq!(body["title"], json!("Supply doesnotexist"));
    assert_eq!(body["disabled"], json!(true));
    assert_eq!(body["error"]["message"], json!("Token metadata not found."));
    assert!(body.get("links").is_none());
}

#[tokio::test]
async fn amount_metadata_names_the_amount() {
    let app = TestApp::new();
    let (status, body) = get(app.router(app.chain()), "/api/nxlending/supply/SOL/2.5")
        .await
        .unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], json!("Supply 2.5 SOL"));
    assert_eq!(body["title"], json!("Supply 2.5 SOL"));
    assert!(body["description"].as_str().unwrap().starts_with("Supply SOL"));
    assert!(body.get("links").is_none());

    let (status, body) = get(app.router(app.chain()), "/api/nxlending/supply/nope/1")
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disabled"], json!(true));
}

#[tokio::test]
async fn unknown_reserve_post_is_unprocessable() {
    let app = TestApp::new();
    let (status, body) = post(
        app.router(app.chain()),
        "/api/nxlending/supply/doesnotexist",
        json!({ "account": Pubkey::new_unique().to_string() }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "message": "Token metadata not found." }));
}

#[tokio::test]
async fn post_returns_unsigned_v0_transaction() {
    let app = TestApp::new();
    let depositor = Pubkey::new_unique();
    let (status, body) = post(
        app.router(app.chain()),
        "/api/nxlending/supply/usdc/10",
        json!({ "account": depositor.to_string() }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::OK, "{body}");
    let decoded = decode_transaction(body["transaction"].as_str().unwrap()).unwrap();
    let VersionedMessage::V0(message) = decoded.message else {
        panic!("expected a v0 message");
    };
    assert_eq!(message.account_keys[0], depositor);
    assert_eq!(message.address_table_lookups.len(), 1);
    assert_eq!(
        message.address_table_lookups[0].account_key,
        app.config.lookup_table
    );

    // first deposit: create_user_account then deposit_into_reserve
    assert_eq!(message.instructions.len(), 2);
    assert!(message.instructions[0]
        .data
        .starts_with(&anchor_discriminator("global", CREATE_USER_ACCOUNT)));
    let deposit = &message.instructions[1].data;
    assert!(deposit.starts_with(&anchor_discriminator("global", DEPOSIT_INTO_RESERVE)));
    assert_eq!(deposit[8..16], 10_000_000u64.to_le_bytes());
}

#[tokio::test]
async fn post_without_amount_supplies_one_unit() {
    let app = TestApp::new();
    let (status, body) = post(
        app.router(app.chain()),
        "/api/nxlending/supply/usdc",
        json!({ "account": Pubkey::new_unique().to_string() }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::OK, "{body}");
    let decoded = decode_transaction(body["transaction"].as_str().unwrap()).unwrap();
    let deposit = decoded
        .message
        .instructions()
        .iter()
        .find(|ix| {
            ix.data
                .starts_with(&anchor_discriminator("global", DEPOSIT_INTO_RESERVE))
        })
        .unwrap();
    assert_eq!(deposit.data[8..16], 1_000_000u64.to_le_bytes());
}

#[tokio::test]
async fn first_time_sol_post_wraps_and_unwraps() {
    let app = TestApp::new();
    let depositor = Pubkey::new_unique();
    let (status, body) = post(
        app.router(app.chain()),
        "/api/nxlending/supply/sol",
        json!({ "account": depositor.to_string() }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::OK, "{body}");
    let decoded = decode_transaction(body["transaction"].as_str().unwrap()).unwrap();
    let VersionedMessage::V0(message) = decoded.message else {
        panic!("expected a v0 message");
    };
    let programs: Vec<Pubkey> = message
        .instructions
        .iter()
        .map(|ix| message.account_keys[usize::from(ix.program_id_index)])
        .collect();
    assert_eq!(
        programs,
        vec![
            app.config.program_id,
            spl_associated_token_account::ID,
            solana_system_interface::program::ID,
            spl_token::ID,
            app.config.program_id,
            spl_token::ID,
        ]
    );

    let ixs = &message.instructions;
    assert!(ixs[0]
        .data
        .starts_with(&anchor_discriminator("global", CREATE_USER_ACCOUNT)));
    // system transfer: u32 tag 2, then u64 lamports
    assert_eq!(ixs[2].data[..4], 2u32.to_le_bytes());
    let lamports = u64::from_le_bytes(ixs[2].data[4..12].try_into().unwrap());
    assert_eq!(
        lamports,
        wrap_lamports(1_000_000_000, default_sol_wrap_factor()).unwrap()
    );
    assert_eq!(ixs[3].data, vec![17]); // SyncNative
    assert!(ixs[4]
        .data
        .starts_with(&anchor_discriminator("global", DEPOSIT_INTO_RESERVE)));
    assert_eq!(ixs[4].data[8..16], 1_000_000_000u64.to_le_bytes());
    assert_eq!(ixs[5].data, vec![9]); // CloseAccount
}

#[tokio::test]
async fn unknown_reserve_post_ignores_body() {
    let app = TestApp::new();
    for body in [json!({}), json!({ "account": 42 }), json!("junk")] {
        let (status, reply) = post(
            app.router(app.chain()),
            "/api/nxlending/supply/doesnotexist/1",
            body,
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(reply, json!({ "message": "Token metadata not found." }));
    }
}

#[tokio::test]
async fn missing_account_is_a_bad_request() {
    let app = TestApp::new();
    let (status, body) = post(app.router(app.chain()), "/api/nxlending/supply/usdc", json!({}))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid account provided." }));
}

#[tokio::test]
async fn malformed_inputs_are_bad_requests() {
    let app = TestApp::new();

    let (status, body) = post(
        app.router(app.chain()),
        "/api/nxlending/supply/usdc/1",
        json!({ "account": "not-a-pubkey" }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid account provided." }));

    let (status, body) = post(
        app.router(app.chain()),
        "/api/nxlending/supply/usdc/-3",
        json!({ "account": Pubkey::new_unique().to_string() }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid amount provided." }));
}

#[tokio::test]
async fn blockhash_failure_is_a_server_error() {
    let app = TestApp::new();
    let (status, body) = post(
        app.router(app.chain().without_blockhash()),
        "/api/nxlending/supply/usdc/1",
        json!({ "account": Pubkey::new_unique().to_string() }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Failed to build transaction." }));
}

#[tokio::test]
async fn health_and_actions_json() {
    let app = TestApp::new();

    let (status, body) = get(app.router(app.chain()), "/api/v1/health").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["service"], json!("nxfi-api"));
    assert_eq!(body["programId"], json!(app.config.program_id.to_string()));
    assert_eq!(body["market"], json!(app.config.market.to_string()));
    assert!(body["checkedAt"].is_string());

    let (status, body) = get(app.router(app.chain()), "/actions.json").await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "rules": [{
                "pathPattern": "/api/nxlending/supply/**",
                "apiPath": "/api/nxlending/supply/**"
            }]
        })
    );
}
