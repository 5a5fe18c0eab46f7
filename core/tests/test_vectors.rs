//! Replay the JSON vectors in `test-vectors/` through the client.
//!
//! Each vector lists the request bodies the client must send and the
//! responses it receives. Bodies are compared as parsed JSON so field order
//! does not matter.

mod common;

use common::ScriptedTransport;
use magnet_core::{MagnetClient, RecipientDetails, RecipientId, SessionState};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/ApiAdapter/Rest";

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn queue(transport: &ScriptedTransport, simulated: &Value) {
    transport.respond(
        simulated["status"].as_u64().unwrap() as u16,
        simulated["body"].as_str().unwrap(),
    );
}

/// Check request `index` against an `expected_request` entry.
fn check_request(name: &str, transport: &ScriptedTransport, index: usize, expected: &Value) {
    let req = &transport.requests()[index];
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );
    let (_, body) = transport.sent(index);
    assert_eq!(body, expected["body"], "{name}: body");
}

/// A client that has already logged in with the session pair the vectors expect.
fn logged_in(transport: &ScriptedTransport) -> MagnetClient<&ScriptedTransport> {
    transport.respond_json(json!({"LoginID": 1, "SessionID": "vec-session", "UserID": "vec-user"}));
    let mut client = MagnetClient::unauthenticated(transport, BASE_URL);
    client.authenticate("vector", "vector");
    assert_eq!(client.state(), SessionState::Enabled);
    client
}

// ---------------------------------------------------------------------------
// Authenticate
// ---------------------------------------------------------------------------

#[test]
fn authenticate_test_vectors() {
    for case in load(include_str!("../../test-vectors/authenticate.json")) {
        let name = case["name"].as_str().unwrap();
        let transport = ScriptedTransport::new();
        queue(&transport, &case["simulated_response"]);

        let mut client = MagnetClient::unauthenticated(&transport, BASE_URL);
        client.authenticate(
            case["input"]["username"].as_str().unwrap(),
            case["input"]["password"].as_str().unwrap(),
        );
        check_request(name, &transport, 0, &case["expected_request"]);

        match case["expected_state"].as_str().unwrap() {
            "Enabled" => {
                assert_eq!(client.state(), SessionState::Enabled, "{name}: state");
                let tokens = client.session_tokens().unwrap();
                let expected = &case["expected_tokens"];
                assert_eq!(tokens.login_id, expected["login_id"].as_i64().unwrap(), "{name}: login id");
                assert_eq!(tokens.session_id.as_deref(), expected["session_id"].as_str(), "{name}: session id");
                assert_eq!(tokens.user_id.as_deref(), expected["user_id"].as_str(), "{name}: user id");
            }
            "Disabled" => assert_eq!(client.state(), SessionState::Disabled, "{name}: state"),
            other => panic!("{name}: unknown expected_state: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchRecipient
// ---------------------------------------------------------------------------

#[test]
fn search_recipient_test_vectors() {
    for case in load(include_str!("../../test-vectors/search_recipient.json")) {
        let name = case["name"].as_str().unwrap();
        let transport = ScriptedTransport::new();
        let client = logged_in(&transport);
        queue(&transport, &case["simulated_response"]);

        let found = client.find_recipient_by_email(case["input_email"].as_str().unwrap());
        check_request(name, &transport, 1, &case["expected_request"]);

        let found = found.map(|r| Value::Object(r.into_fields()));
        let expected = match &case["expected_result"] {
            Value::Null => None,
            value => Some(value.clone()),
        };
        assert_eq!(found, expected, "{name}: result");
    }
}

// ---------------------------------------------------------------------------
// EditRecipientGroups
// ---------------------------------------------------------------------------

#[test]
fn edit_recipient_groups_test_vectors() {
    for case in load(include_str!("../../test-vectors/edit_recipient_groups.json")) {
        let name = case["name"].as_str().unwrap();
        let transport = ScriptedTransport::new();
        let client = logged_in(&transport);
        queue(&transport, &case["simulated_response"]);

        let id = RecipientId::from_value(&case["input_id"]).unwrap();
        let added = client.add_to_group(id, case["input_group"].as_i64().unwrap());
        check_request(name, &transport, 1, &case["expected_request"]);
        assert_eq!(added, case["expected_result"].as_bool().unwrap(), "{name}: result");
    }
}

// ---------------------------------------------------------------------------
// UpsertRecipient
// ---------------------------------------------------------------------------

#[test]
fn upsert_recipient_test_vectors() {
    for case in load(include_str!("../../test-vectors/upsert_recipient.json")) {
        let name = case["name"].as_str().unwrap();
        let transport = ScriptedTransport::new();
        let client = logged_in(&transport);

        let exchanges = case["exchanges"].as_array().unwrap();
        for exchange in exchanges {
            queue(&transport, &exchange["simulated_response"]);
        }

        let details: RecipientDetails = serde_json::from_value(case["input"].clone()).unwrap();
        let id = client.upsert_recipient(details);

        assert_eq!(transport.request_count(), 1 + exchanges.len(), "{name}: call count");
        for (i, exchange) in exchanges.iter().enumerate() {
            check_request(name, &transport, i + 1, &exchange["expected_request"]);
        }

        let expected = RecipientId::from_value(&case["expected_result"]);
        assert_eq!(id, expected, "{name}: result");
    }
}
