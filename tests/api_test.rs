//! End-to-end test: serve the API on a local port and talk to it over HTTP

use football_manager::{
    commands::serve::serve_on,
    storage::{FantasyDatabase, NewUser},
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct Server {
    base: String,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<football_manager::Result<()>>,
}

async fn start_server() -> Server {
    let mut db = FantasyDatabase::new_in_memory().unwrap();
    db.seed_reference_data().unwrap();
    db.create_superuser(
        &NewUser::new("admin@example.com", "adminpw")
            .staff(true)
            .superuser(true),
    )
    .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let handle = tokio::spawn(serve_on(listener, db, async move {
        let _ = rx.await;
    }));

    Server {
        base: format!("http://{addr}"),
        shutdown: Some(tx),
        handle,
    }
}

impl Server {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_register_login_and_build_a_team() {
    let server = start_server().await;
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let response = client
        .post(server.url("/register/"))
        .json(&json!({ "email": "fan@example.com", "password": "letmein" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // admin creates the country and league over basic auth
    let country: Value = client
        .post(server.url("/countries/"))
        .basic_auth("admin@example.com", Some("adminpw"))
        .json(&json!({ "name": "Germany" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let league: Value = client
        .post(server.url("/leagues/"))
        .basic_auth("admin@example.com", Some("adminpw"))
        .json(&json!({ "name": "Bundesliga", "country": country["id"], "division": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // the fan logs in with a session cookie
    let response = client
        .post(server.url("/api-auth/login/"))
        .json(&json!({ "email": "fan@example.com", "password": "letmein" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(server.url("/teams/"))
        .json(&json!({
            "name": "Union Berlin",
            "league": league["id"],
            "starting_manager_salary": 2500,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let team: Value = response.json().await.unwrap();
    assert_eq!(team["owner"], 2);

    let response = client
        .post(server.url("/api-auth/logout/"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get(server.url("/teams/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    server.stop().await;
}

#[tokio::test]
async fn test_token_auth_over_http() {
    let server = start_server().await;
    let client = reqwest::Client::new();

    let token: Value = client
        .post(server.url("/api-token-auth/"))
        .json(&json!({ "username": "admin@example.com", "password": "adminpw" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = token["token"].as_str().unwrap().to_string();

    let response = client
        .get(server.url("/contract-types/"))
        .header("Authorization", format!("Token {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let types: Vec<Value> = response.json().await.unwrap();
    assert_eq!(types.len(), 4);

    let health = client.get(server.url("/health/")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    server.stop().await;
}
