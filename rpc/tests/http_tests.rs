//! HTTP-level tests driving the router in-process, with scripted randomness
//! and a frozen clock so codes, profiles and timestamps are exact.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use kyc_nullables::{NullClock, NullRandom};
use kyc_rpc::{build_router, AppState, RpcServer, ServerConfig, ShutdownController};
use kyc_store::{IdentityStore, MemoryIdentityStore};
use kyc_types::{ChallengeState, Identifier};
use serde_json::{json, Value};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const FROZEN_SECS: i64 = 1_700_000_000;
const FROZEN_TS: &str = "2023-11-14 22:13:20.000000";

struct Harness {
    app: Router,
    state: AppState,
}

fn harness_with(config: ServerConfig, draws: Vec<u32>) -> Harness {
    let store: Arc<dyn IdentityStore> = Arc::new(MemoryIdentityStore::new());
    let state = AppState::with_sources(
        &config,
        store,
        Arc::new(NullRandom::new(draws)),
        Arc::new(NullClock::from_unix_secs(FROZEN_SECS)),
    )
    .unwrap();
    Harness {
        app: build_router(state.clone(), config.enable_cors),
        state,
    }
}

fn harness(draws: Vec<u32>) -> Harness {
    harness_with(ServerConfig::default(), draws)
}

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Reply {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn post_json(app: &Router, uri: &str, body: Value) -> Reply {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn post_form(app: &Router, uri: &str, form: &str) -> Reply {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
}

fn hinted_code(reply: &Reply) -> String {
    let hint = reply.json()["hint"].as_str().unwrap().to_string();
    hint.strip_prefix("For testing, OTP is: ").unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Liveness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_fixed_payload() {
    let h = harness(vec![]);
    let reply = send(
        &h.app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        json!({"status": "ok", "service": "Mock UIDAI Server"})
    );
}

// ---------------------------------------------------------------------------
// Structured-data adapter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn issue_without_identifier_is_rejected() {
    let h = harness(vec![]);
    let reply = post_json(&h.app, "/api/otp/request", json!({})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.json(),
        json!({"success": false, "error": "Aadhaar number is required", "code": "UID_REQUIRED"})
    );
}

#[tokio::test]
async fn issue_with_garbage_body_is_rejected_as_missing() {
    let h = harness(vec![]);
    let reply = send(
        &h.app,
        Request::builder()
            .method("POST")
            .uri("/api/otp/request")
            .body(Body::from("uid=1"))
            .unwrap(),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["code"], "UID_REQUIRED");
}

#[tokio::test]
async fn new_identifier_issue_and_redeem_scenario() {
    // Draws: name index, birth-year offset, gender index, then the code.
    let h = harness(vec![3, 15, 0, 424_242]);
    let id = "555500001111";

    let issued = post_json(&h.app, "/api/otp/request", json!({"aadhaar": id})).await;
    assert_eq!(issued.status, StatusCode::OK);
    assert_eq!(
        issued.json(),
        json!({
            "success": true,
            "message": "OTP sent to registered mobile number",
            "hint": "For testing, OTP is: 424242"
        })
    );
    let code = hinted_code(&issued);
    assert_eq!(code.len(), 6);

    let verified = post_json(&h.app, "/api/otp/verify", json!({"uid": id, "otp": code})).await;
    assert_eq!(verified.status, StatusCode::OK);
    assert_eq!(
        verified.json(),
        json!({
            "success": true,
            "verified": true,
            "kyc": {
                "name": "Sai Kumar",
                "dob": "1985-01-01",
                "gender": "M",
                "email": "u****5@example.com",
                "mobile": "******1111",
                "aadhaar_masked": "XXXX-XXXX-1111"
            }
        })
    );

    // The code is not consumed by default.
    let again = post_json(&h.app, "/api/otp/verify", json!({"uid": id, "otp": code})).await;
    assert_eq!(again.status, StatusCode::OK);

    let wrong = post_json(&h.app, "/api/otp/verify", json!({"uid": id, "otp": "000001"})).await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        wrong.json(),
        json!({"success": false, "error": "Invalid OTP", "code": "OTP_INVALID"})
    );
}

#[tokio::test]
async fn redeem_without_prior_issue_is_invalid_identifier() {
    let h = harness(vec![]);
    let reply = post_json(
        &h.app,
        "/api/otp/verify",
        json!({"aadhaar": "000000000000", "otp": "123456"}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.json(),
        json!({"success": false, "error": "Invalid Aadhaar number", "code": "UID_INVALID"})
    );
}

#[tokio::test]
async fn redeem_without_identifier_is_invalid_identifier() {
    let h = harness(vec![]);
    let reply = post_json(&h.app, "/api/otp/verify", json!({"otp": "123456"})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["code"], "UID_INVALID");
}

#[tokio::test]
async fn redeem_without_code_is_mismatch() {
    let h = harness(vec![0, 0, 0, 7]);
    post_json(&h.app, "/api/otp/request", json!({"uid": "555500001111"})).await;
    let reply = post_json(&h.app, "/api/otp/verify", json!({"uid": "555500001111"})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json()["code"], "OTP_INVALID");
}

#[tokio::test]
async fn second_issue_invalidates_first_code() {
    let h = harness(vec![0, 0, 0, 111_111, 222_222]);
    let id = json!({"uid": "555500001111"});
    let first = hinted_code(&post_json(&h.app, "/api/otp/request", id.clone()).await);
    let second = hinted_code(&post_json(&h.app, "/api/otp/request", id).await);
    assert_eq!(first, "111111");
    assert_eq!(second, "222222");

    let stale = post_json(
        &h.app,
        "/api/otp/verify",
        json!({"uid": "555500001111", "otp": first}),
    )
    .await;
    assert_eq!(stale.json()["code"], "OTP_INVALID");

    let fresh = post_json(
        &h.app,
        "/api/otp/verify",
        json!({"uid": "555500001111", "otp": second}),
    )
    .await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn hint_can_be_suppressed() {
    let config = ServerConfig {
        expose_code_hint: false,
        ..Default::default()
    };
    let h = harness_with(config, vec![0, 0, 0, 5]);
    let reply = post_json(&h.app, "/api/otp/request", json!({"uid": "555500001111"})).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.json().get("hint").is_none());

    // The code still works even though it was not echoed.
    let verified = post_json(
        &h.app,
        "/api/otp/verify",
        json!({"uid": "555500001111", "otp": "000005"}),
    )
    .await;
    assert_eq!(verified.status, StatusCode::OK);
}

#[tokio::test]
async fn consume_on_success_blocks_replay() {
    let config = ServerConfig {
        consume_on_success: true,
        ..Default::default()
    };
    let h = harness_with(config, vec![0, 0, 0, 654_321]);
    let id = "555500001111";
    post_json(&h.app, "/api/otp/request", json!({"uid": id})).await;

    let body = json!({"uid": id, "otp": "654321"});
    let first = post_json(&h.app, "/api/otp/verify", body.clone()).await;
    assert_eq!(first.status, StatusCode::OK);
    let replay = post_json(&h.app, "/api/otp/verify", body).await;
    assert_eq!(replay.json()["code"], "OTP_INVALID");
}

#[tokio::test]
async fn sandbox_identity_keeps_its_profile() {
    let h = harness(vec![999]);
    let id = "999941057058";
    let issued = post_json(&h.app, "/api/otp/request", json!({"aadhaar": id})).await;
    assert_eq!(hinted_code(&issued), "000999");

    let verified = post_json(
        &h.app,
        "/api/otp/verify",
        json!({"aadhaar": id, "otp": "000999"}),
    )
    .await;
    let kyc = &verified.json()["kyc"];
    assert_eq!(kyc["name"], "Shivshankar Choudhury");
    assert_eq!(kyc["mobile"], "******6979");
    assert_eq!(kyc["aadhaar_masked"], "XXXX-XXXX-7058");
}

// ---------------------------------------------------------------------------
// Legacy-markup adapter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_issue_auto_registers_placeholder() {
    let h = harness(vec![31_337]);
    let reply = post_form(&h.app, "/uidotp/2.5/9/9", "uid=555500001111").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "<OtpRes ret='y'/>");
    assert_eq!(reply.content_type.as_deref(), Some("application/xml"));

    let record = h
        .state
        .store()
        .lookup(&Identifier::new("555500001111"))
        .unwrap()
        .unwrap();
    assert_eq!(record.profile.name, "Dynamic User");
    assert_eq!(record.profile.dob, "1990-01-01");
    assert_eq!(record.profile.mobile, "******1111");
    assert_eq!(record.challenge_state(), ChallengeState::ChallengePending);
}

#[tokio::test]
async fn legacy_issue_reports_success_for_known_identifier() {
    let h = harness(vec![1, 2]);
    let first = post_form(&h.app, "/uidotp/2.5/public/abc", "uid=999941057058").await;
    let second = post_form(&h.app, "/uidotp/2.5/x/y", "uid=999941057058").await;
    assert_eq!(first.body, "<OtpRes ret='y'/>");
    assert_eq!(second.body, "<OtpRes ret='y'/>");

    let record = h
        .state
        .store()
        .lookup(&Identifier::new("999941057058"))
        .unwrap()
        .unwrap();
    assert_eq!(record.profile.name, "Shivshankar Choudhury");
}

#[tokio::test]
async fn legacy_redeem_returns_kyc_document() {
    let h = harness(vec![123_456]);
    post_form(&h.app, "/uidotp/2.5/9/9", "uid=555500001111").await;

    let reply = post_form(
        &h.app,
        "/uidkyc/kyc/2.5/9/9",
        "uid=555500001111&otp=123456",
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("application/xml"));
    assert_eq!(
        reply.body,
        format!(
            "<KycRes ret=\"y\" ts=\"{FROZEN_TS}\">\n  <UidData>\n    \
             <Poi name=\"Dynamic User\" dob=\"1990-01-01\" gender=\"M\"/>\n    \
             <Contact email=\"d****c@example.com\" mobile=\"******1111\"/>\n  \
             </UidData>\n</KycRes>"
        )
    );
}

#[tokio::test]
async fn legacy_redeem_failures_embed_token() {
    let h = harness(vec![123_456]);
    post_form(&h.app, "/uidotp/2.5/9/9", "uid=555500001111").await;

    let mismatch = post_form(
        &h.app,
        "/uidkyc/kyc/2.5/9/9",
        "uid=555500001111&otp=654321",
    )
    .await;
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);
    assert_eq!(mismatch.body, "<KycRes ret='n' err='OTP_INVALID'/>");

    let unknown = post_form(
        &h.app,
        "/uidkyc/kyc/2.5/9/9",
        "uid=000000000000&otp=123456",
    )
    .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.body, "<KycRes ret='n' err='OTP_INVALID'/>");
}

#[tokio::test]
async fn legacy_missing_uid_degrades_to_placeholder_key() {
    let h = harness(vec![42]);
    let issued = post_form(&h.app, "/uidotp/2.5/9/9", "").await;
    assert_eq!(issued.body, "<OtpRes ret='y'/>");

    let record = h
        .state
        .store()
        .lookup(&Identifier::absent())
        .unwrap()
        .unwrap();
    assert_eq!(record.profile.mobile, "******0000");

    let redeemed = post_form(&h.app, "/uidkyc/kyc/2.5/9/9", "otp=000042").await;
    assert_eq!(redeemed.status, StatusCode::OK);
    assert!(redeemed.body.contains("mobile=\"******0000\""));
}

// ---------------------------------------------------------------------------
// Cross-adapter behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn both_adapters_redeem_the_same_code() {
    let h = harness(vec![0, 0, 0, 888_888]);
    let id = "555500001111";
    post_json(&h.app, "/api/otp/request", json!({"uid": id})).await;

    let via_legacy = post_form(
        &h.app,
        "/uidkyc/kyc/2.5/9/9",
        &format!("uid={id}&otp=888888"),
    )
    .await;
    assert_eq!(via_legacy.status, StatusCode::OK);
    assert!(via_legacy.body.contains("name=\"Aarav Patel\""));

    let via_json = post_json(&h.app, "/api/otp/verify", json!({"uid": id, "otp": "888888"})).await;
    assert_eq!(via_json.status, StatusCode::OK);
    assert_eq!(via_json.json()["kyc"]["name"], "Aarav Patel");
}

#[tokio::test]
async fn legacy_issue_then_json_redeem() {
    let h = harness(vec![77]);
    post_form(&h.app, "/uidotp/2.5/9/9", "uid=123412341234").await;
    let reply = post_json(
        &h.app,
        "/api/otp/verify",
        json!({"aadhaar": "123412341234", "otp": "000077"}),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["kyc"]["name"], "Dynamic User");
    assert_eq!(reply.json()["kyc"]["mobile"], "******1234");
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_headers_when_enabled() {
    let h = harness(vec![]);
    let reply = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        reply.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn server_serves_until_shutdown() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let config = ServerConfig::default();
    let state = AppState::from_config(&config).unwrap();
    let server = RpcServer::new(config, state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let controller = ShutdownController::new();
    let rx = controller.subscribe();
    let task = tokio::spawn(async move { server.serve(listener, rx).await });

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("Mock UIDAI Server"));

    controller.shutdown();
    task.await.unwrap().unwrap();
}
