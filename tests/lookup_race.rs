//! End-to-end tests for the lookup service: racing, timeout, and total
//! failure observed through the HTTP adapter.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cep_lookup::config::{ServiceConfig, UpstreamConfig};
use cep_lookup::upstream::ProviderKind;
use cep_lookup::{HttpServer, LookupService, Shutdown};

mod common;

const VIACEP_BODY: &str = r#"{"cep":"01310-100","logradouro":"Avenida Paulista","bairro":"Bela Vista","localidade":"São Paulo","uf":"SP"}"#;

fn upstream(name: &str, addr: SocketAddr) -> UpstreamConfig {
    UpstreamConfig {
        name: name.into(),
        kind: ProviderKind::ViaCep,
        url_template: format!("http://{}/ws/{{cep}}/json/", addr),
    }
}

fn test_config(proxy_addr: SocketAddr, deadline_ms: u64, upstreams: Vec<UpstreamConfig>) -> ServiceConfig {
    let mut config = ServiceConfig::standard();
    config.listener.bind_address = proxy_addr.to_string();
    config.lookup.deadline_ms = deadline_ms;
    config.upstreams = upstreams;
    config
}

async fn start_service(config: ServiceConfig, proxy_addr: SocketAddr) -> Shutdown {
    let service = Arc::new(LookupService::new(&config).unwrap());
    let server = HttpServer::new(&config, service);
    let listener = tokio::net::TcpListener::bind(proxy_addr).await.unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fast_success_beats_failing_upstream() {
    let good_addr: SocketAddr = "127.0.0.1:28201".parse().unwrap();
    let bad_addr: SocketAddr = "127.0.0.1:28202".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28203".parse().unwrap();

    common::start_json_upstream(good_addr, VIACEP_BODY).await;
    common::start_programmable_upstream(bad_addr, || async {
        (500, Duration::ZERO, "oops".to_string())
    })
    .await;

    let config = test_config(
        proxy_addr,
        1000,
        vec![upstream("good", good_addr), upstream("bad", bad_addr)],
    );
    let _shutdown = start_service(config, proxy_addr).await;

    let res = client()
        .get(format!("http://{}/cep?cep=01310100", proxy_addr))
        .send()
        .await
        .expect("service unreachable");

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["address"]["cep"], "01310-100");
    assert_eq!(body["address"]["uf"], "SP");
    assert_eq!(body["api"], "127.0.0.1");
    assert!(body.get("error").is_none(), "success must not carry an error");
    assert!(body.get("timeout_ms").is_none());
}

#[tokio::test]
async fn test_missing_cep_is_bad_request() {
    let proxy_addr: SocketAddr = "127.0.0.1:28204".parse().unwrap();
    let config = test_config(proxy_addr, 1000, UpstreamConfig::standard_pair());
    let _shutdown = start_service(config, proxy_addr).await;

    let res = client()
        .get(format!("http://{}/cep", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let res = client()
        .get(format!("http://{}/cep?cep=../../etc", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn test_all_upstreams_hanging_times_out() {
    let slow_a: SocketAddr = "127.0.0.1:28205".parse().unwrap();
    let slow_b: SocketAddr = "127.0.0.1:28206".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28207".parse().unwrap();

    for addr in [slow_a, slow_b] {
        common::start_programmable_upstream(addr, || async {
            (200, Duration::from_secs(5), VIACEP_BODY.to_string())
        })
        .await;
    }

    let config = test_config(
        proxy_addr,
        200,
        vec![upstream("slow-a", slow_a), upstream("slow-b", slow_b)],
    );
    let _shutdown = start_service(config, proxy_addr).await;

    let started = Instant::now();
    let res = client()
        .get(format!("http://{}/cep?cep=01310100", proxy_addr))
        .send()
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(res.status(), 200);
    assert!(
        elapsed < Duration::from_secs(2),
        "timeout must resolve near the deadline, took {:?}",
        elapsed
    );

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["address"], serde_json::Value::Null);
    assert_eq!(body["error"], "Timeout - Nenhuma das APIs respondeu");
    assert_eq!(body["timeout_ms"], 200);
}

#[tokio::test]
async fn test_total_failure_resolves_before_deadline() {
    let bad_a: SocketAddr = "127.0.0.1:28208".parse().unwrap();
    let bad_b: SocketAddr = "127.0.0.1:28209".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28210".parse().unwrap();

    for addr in [bad_a, bad_b] {
        common::start_programmable_upstream(addr, || async {
            (503, Duration::ZERO, "unavailable".to_string())
        })
        .await;
    }

    let config = test_config(
        proxy_addr,
        10_000,
        vec![upstream("bad-a", bad_a), upstream("bad-b", bad_b)],
    );
    let _shutdown = start_service(config, proxy_addr).await;

    let started = Instant::now();
    let res = client()
        .get(format!("http://{}/cep?cep=01310100", proxy_addr))
        .send()
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(res.status(), 200);
    assert!(
        elapsed < Duration::from_secs(2),
        "total failure must not wait out the deadline, took {:?}",
        elapsed
    );

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["address"], serde_json::Value::Null);
    assert_eq!(body["api"], "");
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("transport error"), "unexpected error: {}", error);
    assert!(body.get("timeout_ms").is_none());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let proxy_addr: SocketAddr = "127.0.0.1:28211".parse().unwrap();
    let config = test_config(proxy_addr, 1000, UpstreamConfig::standard_pair());
    let _shutdown = start_service(config, proxy_addr).await;

    let res = client()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/cep", proxy_addr),
        )
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
