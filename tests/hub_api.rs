// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP hub client against a mock cloud API.

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tahoma_bridge::device::DeviceUrl;
use tahoma_bridge::hub::{HubClient, TahomaHttpClient};
use tahoma_bridge::{HubError, RefreshStateCommand};

const SESSION: &str = "JSESSIONID=1A2B3C4D5E6F";

async fn logged_in_client(server: &MockServer) -> TahomaHttpClient {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION}; Path=/; HttpOnly").as_str())
                .set_body_json(json!({"success": true})),
        )
        .mount(server)
        .await;

    let client = TahomaHttpClient::builder()
        .credentials("user@example.com", "secret")
        .base_url(server.uri())
        .build()
        .unwrap();
    client.login().await.unwrap();
    client
}

#[tokio::test]
async fn login_posts_credentials_as_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("userId=user%40example.com"))
        .and(body_string_contains("userPassword=secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION}; Path=/").as_str())
                .set_body_json(json!({"success": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = TahomaHttpClient::builder()
        .credentials("user@example.com", "secret")
        .base_url(server.uri())
        .build()
        .unwrap();

    client.login().await.unwrap();
}

#[tokio::test]
async fn rejected_credentials_are_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = TahomaHttpClient::builder()
        .credentials("user@example.com", "wrong")
        .base_url(server.uri())
        .build()
        .unwrap();

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, HubError::BadCredentials));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn get_devices_sends_session_cookie() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/setup/devices"))
        .and(header("cookie", SESSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "deviceURL": "io://1234-5678-9012/1",
            "label": "Living room",
            "widget": "SomfyThermostat",
            "uiClass": "HeatingSystem",
            "states": [
                {"name": "somfythermostat:DerogationTypeState", "value": "date"},
                {"name": "core:TargetTemperatureState", "value": 19.0}
            ],
            "definition": {"commands": [{"commandName": "refreshState"}]}
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client.get_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].label(), "Living room");
    assert!(devices[0].supports_command("refreshState"));
}

#[tokio::test]
async fn get_states_encodes_device_url() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/setup/devices/io%3A%2F%2F1234-5678-9012%2F1/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "core:TargetTemperatureState", "value": 21.5}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let url = DeviceUrl::new("io://1234-5678-9012/1");
    let states = client.get_states(std::slice::from_ref(&url)).await.unwrap();

    let target = states[&url].get_f32("core:TargetTemperatureState").unwrap();
    assert_eq!(target, 21.5);
}

#[tokio::test]
async fn apply_action_posts_execution_payload() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/exec/apply"))
        .and(body_string_contains("refreshState"))
        .and(body_string_contains("io://1234-5678-9012/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "execId": "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = client
        .apply_action(
            &DeviceUrl::new("io://1234-5678-9012/1"),
            &RefreshStateCommand,
        )
        .await
        .unwrap();

    assert_eq!(
        id.as_uuid().to_string(),
        "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8"
    );
}

#[tokio::test]
async fn execute_scenario_hits_exec_path() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/exec/scenario-oid-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "execId": "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.execute_scenario("scenario-oid-1").await.unwrap();
}

#[tokio::test]
async fn refresh_states_posts_without_body() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/setup/devices/states/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.refresh_states().await.unwrap();
}

#[tokio::test]
async fn rate_limiting_is_retryable() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/setup/devices"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client.get_devices().await.unwrap_err();
    assert!(matches!(err, HubError::TooManyRequests));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn maintenance_is_retryable() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/setup/devices"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.get_devices().await.unwrap_err();
    assert!(matches!(err, HubError::Maintenance));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn client_errors_are_not_retryable() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/setup/devices"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client.get_devices().await.unwrap_err();
    assert!(matches!(err, HubError::UnexpectedStatus { status: 404, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn expired_session_is_reported() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/setup/devices"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.get_devices().await.unwrap_err();
    assert!(matches!(err, HubError::NotAuthenticated));
}

#[tokio::test]
async fn history_and_gateways_deserialize() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/history/executions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "label": "TaHoma app",
            "eventTime": 1_700_000_000_000i64,
            "commands": [{
                "deviceURL": "io://1234-5678-9012/1",
                "command": "setDerogation",
                "parameters": [21.0, "further_notice"]
            }]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/setup/gateways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "gatewayId": "1234-5678-9012",
            "type": "TaHoma",
            "subType": "TaHoma Box",
            "connectivity": {"status": "OK", "protocolVersion": "2025.1"}
        }])))
        .mount(&server)
        .await;

    let history = client.get_execution_history().await.unwrap();
    assert_eq!(history[0].commands[0].command, "setDerogation");
    assert!(history[0].timestamp().is_some());

    let gateways = client.get_gateways().await.unwrap();
    assert_eq!(gateways[0].id, "1234-5678-9012");
    assert_eq!(gateways[0].connectivity.status, "OK");
}
