use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use wifirgb_remote::{
    device::{DeviceApi, DeviceError, Dialect, HttpDevice},
    state::{Color, Effect},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Recorded {
    method: Method,
    path: String,
    body: String,
}

/// Stand-in for the light's HTTP server
struct FakeLight {
    state_body: String,
    write_status: StatusCode,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeLight {
    fn new(state_body: &str) -> Arc<Self> {
        Arc::new(Self {
            state_body: state_body.to_string(),
            write_status: StatusCode::NO_CONTENT,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing_writes() -> Arc<Self> {
        Arc::new(Self {
            state_body: String::new(),
            write_status: StatusCode::INTERNAL_SERVER_ERROR,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(light): State<Arc<FakeLight>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> impl IntoResponse {
    light.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    match (method, uri.path()) {
        (Method::GET, "/state") => (
            StatusCode::OK,
            [("content-type", "application/json")],
            light.state_body.clone(),
        ),
        (Method::GET, "/rgb") => (
            StatusCode::OK,
            [("content-type", "application/json")],
            r#"{"r":1,"g":2,"b":3}"#.to_string(),
        ),
        (Method::GET, "/timer") => (
            StatusCode::OK,
            [("content-type", "application/json")],
            r#"{"seconds":42}"#.to_string(),
        ),
        _ => (
            light.write_status,
            [("content-type", "text/plain")],
            String::new(),
        ),
    }
}

async fn serve(light: Arc<FakeLight>) -> SocketAddr {
    let app = Router::new().fallback(handle).with_state(light);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, dialect: Dialect) -> HttpDevice {
    HttpDevice::new(&format!("http://{}", addr), dialect, Duration::from_secs(2)).unwrap()
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn reads_unified_state() {
    let light = FakeLight::new(r#"{"color":{"r":10,"g":20,"b":30},"effect":"fire","timer":90}"#);
    let device = client(serve(light.clone()).await, Dialect::Unified);

    let snapshot = device.get_state().await.unwrap();
    assert_eq!(snapshot.color, Some(Color::new(10, 20, 30)));
    assert_eq!(snapshot.effect, Some(Effect::Fire));
    assert_eq!(snapshot.timer_seconds, 90);
    assert_eq!(light.requests().len(), 1);
}

#[tokio::test]
async fn reads_legacy_state_from_two_endpoints() {
    let light = FakeLight::new("");
    let device = client(serve(light.clone()).await, Dialect::Legacy);

    let snapshot = device.get_state().await.unwrap();
    assert_eq!(snapshot.color, Some(Color::new(1, 2, 3)));
    assert_eq!(snapshot.effect, None);
    assert_eq!(snapshot.timer_seconds, 42);

    let paths: Vec<String> = light.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/rgb".to_string(), "/timer".to_string()]);
}

#[tokio::test]
async fn each_unified_write_is_one_request() {
    let light = FakeLight::new("");
    let device = client(serve(light.clone()).await, Dialect::Unified);

    device.set_color(Color::new(255, 0, 7)).await.unwrap();
    device.set_effect(Effect::Breathe).await.unwrap();
    device.set_timer(0).await.unwrap();

    let requests = light.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.method == Method::POST));
    assert_eq!(requests[0].path, "/color");
    assert_eq!(json(&requests[0].body), serde_json::json!({"r": 255, "g": 0, "b": 7}));
    assert_eq!(requests[1].path, "/effect");
    assert_eq!(json(&requests[1].body), serde_json::json!({"effect": "breathe"}));
    assert_eq!(requests[2].path, "/timer");
    assert_eq!(json(&requests[2].body), serde_json::json!({"seconds": 0}));
}

#[tokio::test]
async fn legacy_writes_use_original_paths() {
    let light = FakeLight::new("");
    let device = client(serve(light.clone()).await, Dialect::Legacy);

    device.set_effect(Effect::Fire).await.unwrap();
    device.set_color(Color::new(4, 5, 6)).await.unwrap();
    device.set_timer(600).await.unwrap();

    let requests = light.requests();
    assert_eq!(requests[0].path, "/fire");
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[1].path, "/rgb");
    assert_eq!(json(&requests[1].body), serde_json::json!({"r": 4, "g": 5, "b": 6}));
    assert_eq!(requests[2].path, "/timer");
    assert_eq!(json(&requests[2].body), serde_json::json!({"seconds": 600}));
}

#[tokio::test]
async fn missing_fields_are_malformed() {
    let light = FakeLight::new(r#"{"color":{"r":10,"g":20,"b":30}}"#);
    let device = client(serve(light).await, Dialect::Unified);

    let result = device.get_state().await;
    assert!(matches!(result, Err(DeviceError::MalformedResponse(_))));
}

#[tokio::test]
async fn server_errors_are_transport_errors() {
    let light = FakeLight::failing_writes();
    let device = client(serve(light).await, Dialect::Unified);

    let result = device.set_timer(60).await;
    assert!(matches!(result, Err(DeviceError::Transport(_))));
}

#[tokio::test]
async fn unreachable_device_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let device = client(addr, Dialect::Unified);
    let result = device.get_state().await;
    assert!(matches!(result, Err(DeviceError::Transport(_))));
}
