//! Unit tests for CLI parsing

use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_valid() {
    FootballManager::command().debug_assert();
}

#[test]
fn test_parse_serve_with_bind() {
    let cli = FootballManager::parse_from(["football-manager", "serve", "--bind", "0.0.0.0:9000"]);
    match cli.command {
        Commands::Serve { bind } => assert_eq!(bind.port(), 9000),
        other => panic!("Expected Serve, got {:?}", other),
    }
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = FootballManager::parse_from([
        "football-manager",
        "seed",
        "--database",
        "/tmp/fm.db",
        "--log-json",
    ]);
    assert!(matches!(cli.command, Commands::Seed));
    assert_eq!(cli.global.database, Some(PathBuf::from("/tmp/fm.db")));
    assert!(cli.global.log_json);
}

#[test]
fn test_parse_create_superuser() {
    let cli = FootballManager::parse_from([
        "football-manager",
        "create-superuser",
        "--email",
        "admin@example.com",
        "--password",
        "hunter2",
        "--first-name",
        "Ada",
    ]);
    match cli.command {
        Commands::CreateSuperuser {
            email,
            password,
            first_name,
            last_name,
        } => {
            assert_eq!(email, "admin@example.com");
            assert_eq!(password, "hunter2");
            assert_eq!(first_name.as_deref(), Some("Ada"));
            assert_eq!(last_name, None);
        }
        other => panic!("Expected CreateSuperuser, got {:?}", other),
    }
}

#[test]
fn test_rejects_bad_bind_address() {
    let result =
        FootballManager::try_parse_from(["football-manager", "serve", "--bind", "not-an-addr"]);
    assert!(result.is_err());
}
