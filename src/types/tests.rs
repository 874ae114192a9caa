//! Unit tests for domain types

use super::status::sql_choices;
use super::*;
use crate::error::ManagerError;

#[test]
fn test_id_display_and_parse() {
    let id = TeamId::new(42);
    assert_eq!(id.as_i64(), 42);
    assert_eq!(id.to_string(), "42");
    assert_eq!(" 42 ".parse::<TeamId>().unwrap(), id);
    assert!("forty-two".parse::<TeamId>().is_err());
}

#[test]
fn test_id_serializes_as_bare_integer() {
    let json = serde_json::to_string(&CountryId::new(3)).unwrap();
    assert_eq!(json, "3");
    let parsed: CountryId = serde_json::from_str("7").unwrap();
    assert_eq!(parsed, CountryId::new(7));
}

#[test]
fn test_status_labels() {
    assert_eq!(PlayerStatus::ForSale.to_string(), "FOR SALE");
    assert_eq!(PlayerStatus::NotForSale.to_string(), "NOT FOR SALE");
    assert_eq!(TransferStatus::Open.to_string(), "OPEN");
    assert_eq!(TransferStatus::Closed.to_string(), "CLOSED");
    assert_eq!(OfferStatus::Countered.to_string(), "COUNTERED");
    assert_eq!(OfferType::Loan.to_string(), "LOAN");
}

#[test]
fn test_status_parse_is_case_insensitive() {
    assert_eq!("open".parse::<TransferStatus>().unwrap(), TransferStatus::Open);
    assert_eq!(
        "for sale".parse::<PlayerStatus>().unwrap(),
        PlayerStatus::ForSale
    );
    assert_eq!("Stalled".parse::<OfferStatus>().unwrap(), OfferStatus::Stalled);
}

#[test]
fn test_status_parse_unknown() {
    match "PENDING".parse::<TransferStatus>() {
        Err(ManagerError::InvalidStatus { kind, value }) => {
            assert_eq!(kind, "transfer status");
            assert_eq!(value, "PENDING");
        }
        other => panic!("Expected InvalidStatus error, got {:?}", other),
    }
}

#[test]
fn test_status_serde_uses_labels() {
    let json = serde_json::to_string(&OfferStatus::Accepted).unwrap();
    assert_eq!(json, "\"ACCEPTED\"");
    let parsed: PlayerStatus = serde_json::from_str("\"NOT FOR SALE\"").unwrap();
    assert_eq!(parsed, PlayerStatus::NotForSale);
    assert!(serde_json::from_str::<OfferType>("\"SWAP\"").is_err());
}

#[test]
fn test_all_variants_listed() {
    assert_eq!(OfferStatus::ALL.len(), 4);
    assert_eq!(OfferType::ALL.len(), 2);
    assert_eq!(sql_choices(TransferStatus::ALL), "'OPEN', 'CLOSED'");
}

#[test]
fn test_status_sql_round_trip() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let status: TransferStatus = conn
        .query_row("SELECT ?1", [TransferStatus::Closed], |row| row.get(0))
        .unwrap();
    assert_eq!(status, TransferStatus::Closed);

    let bad: rusqlite::Result<TransferStatus> =
        conn.query_row("SELECT 'BOGUS'", [], |row| row.get(0));
    assert!(bad.is_err());
}
