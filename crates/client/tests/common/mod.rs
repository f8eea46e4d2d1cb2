#![allow(dead_code)]

use client::{ClientConfig, MetronomeClient};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

pub const JOB_JSON: &str = r#"{"description":"Example Application","id":"prod.example.app","labels":{"location":"olympus","owner":"zeus"},"run":{"cmd":"nuke --dry --master local","cpus":1.5,"mem":32,"disk":128,"docker":{"image":"foo/bla:test"},"maxLaunchDelay":3600,"restart":{"activeDeadlineSeconds":120,"policy":"NEVER"},"user":"root","volumes":[{"containerPath":"/mnt/test","hostPath":"/etc/guest","mode":"RW"}]}}"#;

pub const RUN_JSON: &str = r#"{"completedAt":null,"createdAt":"2016-12-12T19:27:59.057+0000","id":"20161212192759dliHA","jobId":"prod.example.app","status":"STARTING","tasks":[]}"#;

/// Answers the single job listing a client makes while connecting.
pub async fn mount_liveness(server: &MockServer) {
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/v1/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

pub async fn connect(server: &MockServer) -> MetronomeClient {
    connect_with(server, ClientConfig::new(server.uri())).await
}

pub async fn connect_with(server: &MockServer, config: ClientConfig) -> MetronomeClient {
    mount_liveness(server).await;
    MetronomeClient::connect(config)
        .await
        .expect("client should connect")
}

pub fn json_body(raw: &str) -> ResponseTemplate {
    json_response(200, raw)
}

pub fn json_response(status: u16, raw: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(raw.as_bytes().to_vec(), "application/json")
}
