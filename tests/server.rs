//! End-to-end tests over TCP.

use std::sync::Arc;
use std::time::Duration;

use auto_router::config::{parse_config, RouterConfig};

mod common;
use common::{start_server, T};

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_configured_mounts() {
    let config = parse_config(
        r#"
        [[mounts]]
        prefix = "/"
        mode = "extended"
        style = "simple"

        [[mounts]]
        prefix = "/article"
        mode = "extended"
        style = "rest"
        "#,
    )
    .unwrap();
    let (addr, shutdown) = start_server(config, Arc::new(T::default())).await;
    let client = client();

    let res = client
        .get(format!("http://{}/addint/1/2/3", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "6");

    let res = client
        .delete(format!("http://{}/article/42", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "hello from T.Delete 42");

    let res = client
        .get(format!("http://{}/article/not-a-number", addr))
        .send()
        .await
        .unwrap();
    // GET under the rest mount resolves to Get, which ignores extra segments
    assert_eq!(res.status(), 200);

    let res = client
        .delete(format!("http://{}/article/not-a-number", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "404 page not found\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let (addr, shutdown) = start_server(RouterConfig::default(), Arc::new(T::default())).await;
    let client = client();

    let res = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(format!("http://{}/nope", addr))
        .header("x-request-id", "fixed-id")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.headers()["x-request-id"], "fixed-id");

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let (addr, shutdown) = start_server(RouterConfig::default(), Arc::new(T::default())).await;
    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let result = client()
        .get(format!("http://{}/", addr))
        .timeout(Duration::from_secs(1))
        .send()
        .await;
    assert!(result.is_err());
}
