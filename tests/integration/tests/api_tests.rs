//! API Integration Tests
//!
//! Each test spawns the router on an ephemeral port with its own in-memory
//! database, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    adjust, assert_error, assert_json, assert_status, fixtures::*, transfer, TestServer,
    TEST_EPOCH_MS,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use warden_core::{GuildId, UserId};
use warden_service::ServicePolicy;

const HOUR_MS: i64 = 3_600_000;

fn ids(guild: &str, user: &str) -> (GuildId, UserId) {
    (GuildId::parse(guild).unwrap(), UserId::parse(user).unwrap())
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Wallet Tests
// ============================================================================

#[tokio::test]
async fn test_new_wallet_is_empty() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/guilds/G1/wallets/U1").await.unwrap();
    let wallet: Balance = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(wallet.guild_id, "G1");
    assert_eq!(wallet.user_id, "U1");
    assert_eq!(wallet.balance, 0);
}

#[tokio::test]
async fn test_adjust_balance_accumulates() {
    let server = TestServer::start().await.unwrap();
    let path = "/api/v1/guilds/G1/wallets/U1/adjust";

    server.post(path, &adjust(100)).await.unwrap();
    let response = server.post(path, &adjust(-30)).await.unwrap();
    let wallet: Balance = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(wallet.balance, 70);

    // Adjustments have no sufficiency check
    let response = server.post(path, &adjust(-100)).await.unwrap();
    let wallet: Balance = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(wallet.balance, -30);
}

#[tokio::test]
async fn test_wallets_are_scoped_per_guild() {
    let server = TestServer::start().await.unwrap();

    server
        .post("/api/v1/guilds/G1/wallets/U1/adjust", &adjust(50))
        .await
        .unwrap();

    let response = server.get("/api/v1/guilds/G2/wallets/U1").await.unwrap();
    let wallet: Balance = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(wallet.balance, 0);
}

#[tokio::test]
async fn test_adjust_rejects_malformed_body() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/guilds/G1/wallets/U1/adjust", &json!({ "delta": "lots" }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_daily_claim_once_per_day() {
    let server = TestServer::start().await.unwrap();
    let path = "/api/v1/guilds/G1/wallets/U1/daily";

    let response = server.post_empty(path).await.unwrap();
    let claim: DailyClaim = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(claim.day, "2024-03-01");
    assert_eq!(claim.reward, 250);
    assert_eq!(claim.balance, 250);

    let response = server.post_empty(path).await.unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error["code"], "DAILY_ALREADY_CLAIMED");

    server.clock.advance(24 * HOUR_MS);
    let response = server.post_empty(path).await.unwrap();
    let claim: DailyClaim = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(claim.day, "2024-03-02");
    assert_eq!(claim.balance, 500);
}

#[tokio::test]
async fn test_daily_reward_from_policy() {
    let policy = ServicePolicy {
        daily_reward: 40,
        ..ServicePolicy::default()
    };
    let server = TestServer::start_with_policy(policy).await.unwrap();

    let response = server
        .post_empty("/api/v1/guilds/G1/wallets/U1/daily")
        .await
        .unwrap();
    let claim: DailyClaim = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(claim.reward, 40);
}

// ============================================================================
// Transfer Tests
// ============================================================================

#[tokio::test]
async fn test_transfer_between_members() {
    let server = TestServer::start().await.unwrap();
    server
        .post("/api/v1/guilds/G1/wallets/A/adjust", &adjust(100))
        .await
        .unwrap();

    let response = server
        .post("/api/v1/guilds/G1/transfers", &transfer("A", "B", 60))
        .await
        .unwrap();
    let result: Transfer = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(result.amount, 60);
    assert_eq!(result.from_balance, 40);
    assert_eq!(result.to_balance, 60);
}

#[tokio::test]
async fn test_transfer_insufficient_funds() {
    let server = TestServer::start().await.unwrap();
    server
        .post("/api/v1/guilds/G1/wallets/A/adjust", &adjust(10))
        .await
        .unwrap();

    let response = server
        .post("/api/v1/guilds/G1/transfers", &transfer("A", "B", 11))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();

    assert_eq!(error["code"], "INSUFFICIENT_FUNDS");
    assert_eq!(error["details"]["balance"], 10);
    assert_eq!(error["details"]["requested"], 11);

    let response = server.get("/api/v1/guilds/G1/wallets/A").await.unwrap();
    let wallet: Balance = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(wallet.balance, 10);
}

#[tokio::test]
async fn test_transfer_validation() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/guilds/G1/transfers", &transfer("A", "B", 0))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["code"], "VALIDATION_ERROR");

    let response = server
        .post("/api/v1/guilds/G1/transfers", &transfer("A", "A", 5))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error["code"], "SELF_TRANSFER");
}

#[tokio::test]
async fn test_leaderboard_order_and_limit() {
    let server = TestServer::start().await.unwrap();
    for (user, amount) in [("A", 10), ("B", 30), ("C", 20), ("D", 30)] {
        server
            .post(&format!("/api/v1/guilds/G1/wallets/{user}/adjust"), &adjust(amount))
            .await
            .unwrap();
    }

    let response = server.get("/api/v1/guilds/G1/leaderboard?limit=3").await.unwrap();
    let board: Leaderboard = assert_json(response, StatusCode::OK).await.unwrap();

    let users: Vec<&str> = board.entries.iter().map(|e| e.user_id.as_str()).collect();
    assert_eq!(users, vec!["B", "D", "C"]);
    assert_eq!(board.entries[0].rank, 1);
    assert_eq!(board.entries[2].balance, 20);

    let response = server.get("/api/v1/guilds/G1/leaderboard").await.unwrap();
    let board: Leaderboard = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.entries.len(), 4);
}

// ============================================================================
// Config Tests
// ============================================================================

#[tokio::test]
async fn test_log_channel_set_get_clear() {
    let server = TestServer::start().await.unwrap();
    let path = "/api/v1/guilds/G1/config/log-channel";

    let response = server.get(path).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["channel_id"].is_null());

    let response = server.put(path, &json!({ "channel_id": "C1" })).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(path).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["channel_id"], "C1");

    let response = server.put(path, &json!({ "channel_id": null })).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(path).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["channel_id"].is_null());
}

#[tokio::test]
async fn test_audit_entries_go_to_log_channel() {
    let server = TestServer::start().await.unwrap();
    server
        .put("/api/v1/guilds/G1/config/log-channel", &json!({ "channel_id": "C1" }))
        .await
        .unwrap();

    server
        .post_empty("/api/v1/guilds/G1/wallets/U1/daily")
        .await
        .unwrap();

    let posts = server.platform.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].channel_id.as_str(), "C1");
    assert_eq!(posts[0].text, "daily 250 to <@U1> (bal=250)");
}

#[tokio::test]
async fn test_dangerous_switch_blocks_bans() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put(
            "/api/v1/guilds/G1/config/dangerous",
            &json!({ "enabled": false, "actor_id": "MOD" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["enabled"], false);
    assert_eq!(body["previous"], true);

    let response = server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::permanent("MOD"))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error["code"], "DANGEROUS_COMMANDS_DISABLED");

    // Other guilds are unaffected
    let response = server.get("/api/v1/guilds/G2/config/dangerous").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["enabled"], true);
    assert!(body.get("previous").is_none());
}

// ============================================================================
// Ban and Punishment Tests
// ============================================================================

#[tokio::test]
async fn test_temporary_ban_is_recorded() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::temporary("MOD", "1h"))
        .await
        .unwrap();
    let ban: Ban = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ban.reason, "No reason given");
    assert_eq!(ban.until_ms, Some(TEST_EPOCH_MS + HOUR_MS));

    let (g, u) = ids("G1", "U2");
    assert!(server.platform.is_banned(&g, &u));

    let response = server.get("/api/v1/guilds/G1/punishments/U2/ban").await.unwrap();
    let record: Punishment = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(record.kind, "ban");
    assert_eq!(record.until_ms, TEST_EPOCH_MS + HOUR_MS);
    assert_eq!(record.reason.as_deref(), Some("No reason given"));
    assert_eq!(record.created_by.as_deref(), Some("MOD"));
    assert_eq!(record.attempts, 0);
}

#[tokio::test]
async fn test_permanent_ban_has_no_record() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::permanent("MOD"))
        .await
        .unwrap();
    let ban: Ban = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ban.until_ms.is_none());

    let response = server.get("/api/v1/guilds/G1/punishments/U2/ban").await.unwrap();
    let error = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error["code"], "UNKNOWN_PUNISHMENT");
}

#[tokio::test]
async fn test_ban_with_bad_duration() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::temporary("MOD", "forever"))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["code"], "INVALID_DURATION");

    let response = server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::temporary("MOD", "30d"))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["code"], "DURATION_TOO_LONG");

    assert!(server.platform.calls().is_empty());
}

#[tokio::test]
async fn test_revoke_ban() {
    let server = TestServer::start().await.unwrap();
    server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::temporary("MOD", "2h"))
        .await
        .unwrap();

    let response = server
        .delete("/api/v1/guilds/G1/bans/U2?actor_id=MOD")
        .await
        .unwrap();
    let revoke: Revoke = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(revoke.lifted);
    assert!(revoke.record_removed);

    // Second revoke: nothing to lift, still succeeds
    let response = server
        .delete("/api/v1/guilds/G1/bans/U2?actor_id=MOD")
        .await
        .unwrap();
    let revoke: Revoke = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!revoke.lifted);
    assert!(!revoke.record_removed);
}

#[tokio::test]
async fn test_revoke_requires_actor() {
    let server = TestServer::start().await.unwrap();
    let response = server.delete("/api/v1/guilds/G1/bans/U2").await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["code"], "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_delete_punishment_is_idempotent() {
    let server = TestServer::start().await.unwrap();
    server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::temporary("MOD", "1h"))
        .await
        .unwrap();

    let path = "/api/v1/guilds/G1/punishments/U2/ban";
    assert_status(server.delete(path).await.unwrap(), StatusCode::NO_CONTENT)
        .await
        .unwrap();
    assert_status(server.delete(path).await.unwrap(), StatusCode::NO_CONTENT)
        .await
        .unwrap();

    // Stored expiry is gone, the platform ban is untouched
    let (g, u) = ids("G1", "U2");
    assert!(server.platform.is_banned(&g, &u));
}

// ============================================================================
// Reconciler Tests
// ============================================================================

#[tokio::test]
async fn test_sweep_lifts_expired_ban() {
    let server = TestServer::start().await.unwrap();
    server
        .put("/api/v1/guilds/G1/bans/U2", &BanRequest::temporary("MOD", "1h"))
        .await
        .unwrap();

    let response = server.post_empty("/api/v1/reconciler/sweep").await.unwrap();
    let report: SweepReport = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.due, 0);

    server.clock.advance(HOUR_MS + 1);
    let response = server.post_empty("/api/v1/reconciler/sweep").await.unwrap();
    let report: SweepReport = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.due, 1);
    assert_eq!(report.lifted, 1);

    let (g, u) = ids("G1", "U2");
    assert!(!server.platform.is_banned(&g, &u));
    assert_eq!(server.platform.lift_requests(), vec![(g, u)]);

    let response = server.get("/api/v1/guilds/G1/punishments/U2/ban").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_sweep_skips_revoked_ban() {
    let server = TestServer::start().await.unwrap();
    server
        .put("/api/v1/guilds/G1/bans/U3", &BanRequest::temporary("MOD", "10m"))
        .await
        .unwrap();
    let response = server
        .delete("/api/v1/guilds/G1/bans/U3?actor_id=MOD")
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    server.clock.advance(HOUR_MS);
    let response = server.post_empty("/api/v1/reconciler/sweep").await.unwrap();
    let report: SweepReport = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report.due, 0);
    assert_eq!(report.not_sanctioned, 0);

    // Only the manual unban reached the platform
    assert_eq!(server.platform.lift_requests().len(), 1);
}
