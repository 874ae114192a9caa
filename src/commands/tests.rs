//! Unit tests for command handlers

use super::*;
use crate::error::ManagerError;
use crate::storage::DEFAULT_POSITIONS;

#[test]
fn test_open_database_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("fm.db");

    let db = open_database(Some(&path), None).unwrap();
    assert_eq!(db.count_users().unwrap(), 0);
    assert!(path.exists());
}

#[test]
fn test_open_database_reads_settings() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.toml");
    std::fs::write(&settings_path, "default_budget = 7\n").unwrap();

    let db = open_database(Some(&dir.path().join("fm.db")), Some(&settings_path)).unwrap();
    assert_eq!(db.settings().default_budget, 7);
}

#[test]
fn test_seed_twice() {
    let mut db = crate::storage::FantasyDatabase::new_in_memory().unwrap();
    seed::handle_seed(&mut db).unwrap();
    seed::handle_seed(&mut db).unwrap();
    assert_eq!(db.list_positions().unwrap().len(), DEFAULT_POSITIONS.len());
}

#[test]
fn test_create_superuser_command() {
    let mut db = crate::storage::FantasyDatabase::new_in_memory().unwrap();
    let user = create_superuser::handle_create_superuser(
        &mut db,
        create_superuser::SuperuserParams {
            email: "boss@example.com".into(),
            password: "pw".into(),
            first_name: Some("The".into()),
            last_name: Some("Boss".into()),
        },
    )
    .unwrap();
    assert!(user.is_staff && user.is_superuser);
    assert_eq!(db.managers_for_user(user.id).unwrap().len(), 1);

    let again = create_superuser::handle_create_superuser(
        &mut db,
        create_superuser::SuperuserParams {
            email: "boss@example.com".into(),
            password: "pw".into(),
            first_name: None,
            last_name: None,
        },
    );
    assert!(matches!(again, Err(ManagerError::Validation(_))));
}

#[tokio::test]
async fn test_serve_on_stops_on_shutdown() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let db = crate::storage::FantasyDatabase::new_in_memory().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(serve::serve_on(listener, db, async move {
        let _ = rx.await;
    }));
    tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
