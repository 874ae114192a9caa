//! Integration tests for the storage layer through the public API

use chrono::NaiveDate;
use football_manager::{storage::*, CountryId, ManagerError, PlayerStatus, Settings};

fn create_test_db() -> FantasyDatabase {
    let mut db = FantasyDatabase::new_in_memory().unwrap();
    db.seed_reference_data().unwrap();
    db
}

fn player_draft(db: &FantasyDatabase, country: Option<CountryId>) -> NewPlayer {
    NewPlayer {
        first_name: Some("Martin".to_string()),
        last_name: Some("Ødegaard".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1998, 12, 17).unwrap(),
        country,
        salary: 240_000,
        price: 90_000_000,
        status: None,
        position: Some(db.list_positions().unwrap()[2].id),
        contract_type: db.list_contract_types().unwrap()[1].id,
        join_date: NaiveDate::from_ymd_opt(2021, 8, 20).unwrap(),
    }
}

#[test]
fn test_full_registration_to_team() {
    let mut db = create_test_db();

    let user = db
        .create_user(
            &NewUser::new("coach@example.com", "pw")
                .names(Some("Pep".to_string()), Some("G".to_string())),
        )
        .unwrap();
    let manager = db.managers_for_user(user.id).unwrap().remove(0);
    assert_eq!(manager.to_string(), "Pep G");

    let country = db
        .create_country(&NewCountry {
            name: "Norway".to_string(),
        })
        .unwrap();
    let league = db
        .create_league(&NewLeague {
            name: "Eliteserien".to_string(),
            country: country.id,
            division: 1,
        })
        .unwrap();
    let team = db
        .create_team(
            user.id,
            &NewTeam {
                name: "Bodø/Glimt".to_string(),
                league: league.id,
                manager: Some(manager.id),
                has_manager: true,
                starting_manager_salary: 10_000,
                existing: true,
            },
        )
        .unwrap();
    assert_eq!(team.budget, Settings::default().default_budget);

    let draft = player_draft(&db, Some(country.id));
    let player = db.create_player(&draft).unwrap();
    assert_eq!(player.to_string(), "Martin Ødegaard");
    db.assign_player_team(player.id, Some(team.id)).unwrap();

    let fetched = db.get_team(team.id).unwrap().unwrap();
    assert_eq!(fetched.num_players, 1);
    assert_eq!(db.list_teams().unwrap(), vec![fetched]);
}

#[test]
fn test_max_length_counts_characters() {
    let settings = Settings {
        max_length: 5,
        ..Settings::default()
    };
    let mut db = FantasyDatabase::new_in_memory_with(settings).unwrap();

    // five multi-byte characters fit
    db.create_country(&NewCountry {
        name: "ØØØØØ".to_string(),
    })
    .unwrap();

    let err = db
        .create_country(&NewCountry {
            name: "Sweden".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ManagerError::Validation(_)));
}

#[test]
fn test_player_update_keeps_unset_fields() {
    let mut db = create_test_db();
    let draft = player_draft(&db, None);
    let player = db.create_player(&draft).unwrap();

    let updated = db
        .update_player(
            player.id,
            &PlayerUpdate {
                status: Some(PlayerStatus::ForSale),
                ..PlayerUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.salary, 240_000);
    assert_eq!(updated.price, 90_000_000);
    assert_eq!(updated.status, Some(PlayerStatus::ForSale));
    assert_eq!(updated.position, player.position);
}

#[test]
fn test_amount_above_signed_range_rejected() {
    let mut db = create_test_db();
    let mut draft = player_draft(&db, None);
    draft.price = u64::MAX;

    match db.create_player(&draft).unwrap_err() {
        ManagerError::Validation(errors) => assert!(errors.get("price").is_some()),
        other => panic!("Expected Validation error, got {:?}", other),
    }
    assert!(db.list_players().unwrap().is_empty());
}

#[test]
fn test_on_disk_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manager.db");

    let user_id = {
        let mut db = FantasyDatabase::open(&path, Settings::default()).unwrap();
        db.create_user(&NewUser::new("disk@example.com", "pw"))
            .unwrap()
            .id
    };

    let mut db = FantasyDatabase::open(&path, Settings::default()).unwrap();
    assert_eq!(db.get_user(user_id).unwrap().unwrap().email, "disk@example.com");
    assert!(db.authenticate("disk@example.com", "pw").unwrap().is_some());
}
