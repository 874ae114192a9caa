//! Transfers, counter-offers and salary negotiations
//!
//! These are plain records: any status may be written at any time and no
//! outcome is derived from the prices.

use super::{
    models::*,
    schema::{amount, now, read_amount, read_timestamps, FantasyDatabase},
};
use crate::error::{ManagerError, Result};
use crate::types::{CounterOfferId, ManagerId, NegotiationId, PlayerId, TeamId, TransferId};
use crate::validation::{Validate, ValidationErrors};
use rusqlite::{params, Row};

const TRANSFER_COLUMNS: &str =
    "id, asking_price, offered_price, player_id, buyer_id, seller_id, status, created_at, updated_at";

const COUNTER_OFFER_COLUMNS: &str = "id, asking_price, offered_price, player_id, buyer_id, \
     seller_id, status, offer_type, created_at, updated_at";

const NEGOTIATION_COLUMNS: &str =
    "id, asking_salary, offer_salary, team_id, player_id, manager_id, created_at, updated_at";

fn row_to_transfer(row: &Row<'_>) -> rusqlite::Result<Transfer> {
    Ok(Transfer {
        id: row.get(0)?,
        asking_price: read_amount(row, 1)?,
        offered_price: read_amount(row, 2)?,
        player: row.get(3)?,
        buyer: row.get(4)?,
        seller: row.get(5)?,
        status: row.get(6)?,
        timestamps: read_timestamps(row, 7)?,
    })
}

fn row_to_counter_offer(row: &Row<'_>) -> rusqlite::Result<CounterOffer> {
    Ok(CounterOffer {
        id: row.get(0)?,
        asking_price: read_amount(row, 1)?,
        offered_price: read_amount(row, 2)?,
        player: row.get(3)?,
        buyer: row.get(4)?,
        seller: row.get(5)?,
        status: row.get(6)?,
        offer_type: row.get(7)?,
        timestamps: read_timestamps(row, 8)?,
    })
}

fn row_to_negotiation(row: &Row<'_>) -> rusqlite::Result<Negotiation> {
    let player: Option<PlayerId> = row.get(4)?;
    let manager: Option<ManagerId> = row.get(5)?;
    let subject = match (player, manager) {
        (Some(player), None) => NegotiationSubject::Player(player),
        (None, Some(manager)) => NegotiationSubject::Manager(manager),
        _ => {
            return Err(rusqlite::Error::InvalidColumnType(
                4,
                "player_id".to_string(),
                rusqlite::types::Type::Null,
            ))
        }
    };

    Ok(Negotiation {
        id: row.get(0)?,
        asking_salary: read_amount(row, 1)?,
        offer_salary: read_amount(row, 2)?,
        team: row.get(3)?,
        subject,
        timestamps: read_timestamps(row, 6)?,
    })
}

impl FantasyDatabase {
    /// Record a field error for each of player, buyer and seller that is missing
    fn check_offer_parties(
        &self,
        errors: &mut ValidationErrors,
        player: PlayerId,
        buyer: TeamId,
        seller: TeamId,
    ) -> Result<()> {
        self.check_reference(errors, "player", "players", player.as_i64())?;
        self.check_reference(errors, "buyer", "teams", buyer.as_i64())?;
        self.check_reference(errors, "seller", "teams", seller.as_i64())?;
        Ok(())
    }

    pub fn create_transfer(&mut self, draft: &NewTransfer) -> Result<Transfer> {
        draft.validate(&self.settings)?;

        let mut errors = ValidationErrors::default();
        self.check_offer_parties(&mut errors, draft.player, draft.buyer, draft.seller)?;
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO transfers (asking_price, offered_price, player_id, buyer_id, seller_id,
                                    status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                amount(draft.asking_price)?,
                amount(draft.offered_price)?,
                draft.player,
                draft.buyer,
                draft.seller,
                draft.status,
                now,
                now
            ],
        )?;
        let id = TransferId::new(self.conn.last_insert_rowid());
        tracing::debug!(transfer_id = %id, status = %draft.status, "recorded transfer");

        self.get_transfer(id)?.ok_or(ManagerError::NotFound {
            resource: "transfer",
            id: id.as_i64(),
        })
    }

    pub fn get_transfer(&self, id: TransferId) -> Result<Option<Transfer>> {
        self.fetch_one(
            &format!("SELECT {TRANSFER_COLUMNS} FROM transfers WHERE id = ?"),
            [id],
            row_to_transfer,
        )
    }

    pub fn list_transfers(&self) -> Result<Vec<Transfer>> {
        self.collect_rows(
            &format!("SELECT {TRANSFER_COLUMNS} FROM transfers ORDER BY id"),
            [],
            row_to_transfer,
        )
    }

    pub fn update_transfer(&mut self, id: TransferId, update: &TransferUpdate) -> Result<Transfer> {
        update.validate(&self.settings)?;

        let current = self.get_transfer(id)?.ok_or(ManagerError::NotFound {
            resource: "transfer",
            id: id.as_i64(),
        })?;

        self.conn.execute(
            "UPDATE transfers SET asking_price = ?, offered_price = ?, status = ?, updated_at = ?
             WHERE id = ?",
            params![
                amount(update.asking_price.unwrap_or(current.asking_price))?,
                amount(update.offered_price.unwrap_or(current.offered_price))?,
                update.status.unwrap_or(current.status),
                now(),
                id
            ],
        )?;

        self.get_transfer(id)?.ok_or(ManagerError::NotFound {
            resource: "transfer",
            id: id.as_i64(),
        })
    }

    pub fn create_counter_offer(&mut self, draft: &NewCounterOffer) -> Result<CounterOffer> {
        draft.validate(&self.settings)?;

        let mut errors = ValidationErrors::default();
        self.check_offer_parties(&mut errors, draft.player, draft.buyer, draft.seller)?;
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO counter_offers (asking_price, offered_price, player_id, buyer_id,
                                         seller_id, status, offer_type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                amount(draft.asking_price)?,
                amount(draft.offered_price)?,
                draft.player,
                draft.buyer,
                draft.seller,
                draft.status,
                draft.offer_type,
                now,
                now
            ],
        )?;
        let id = CounterOfferId::new(self.conn.last_insert_rowid());

        self.get_counter_offer(id)?.ok_or(ManagerError::NotFound {
            resource: "counter-offer",
            id: id.as_i64(),
        })
    }

    pub fn get_counter_offer(&self, id: CounterOfferId) -> Result<Option<CounterOffer>> {
        self.fetch_one(
            &format!("SELECT {COUNTER_OFFER_COLUMNS} FROM counter_offers WHERE id = ?"),
            [id],
            row_to_counter_offer,
        )
    }

    pub fn list_counter_offers(&self) -> Result<Vec<CounterOffer>> {
        self.collect_rows(
            &format!("SELECT {COUNTER_OFFER_COLUMNS} FROM counter_offers ORDER BY id"),
            [],
            row_to_counter_offer,
        )
    }

    pub fn update_counter_offer(
        &mut self,
        id: CounterOfferId,
        update: &CounterOfferUpdate,
    ) -> Result<CounterOffer> {
        update.validate(&self.settings)?;

        let current = self.get_counter_offer(id)?.ok_or(ManagerError::NotFound {
            resource: "counter-offer",
            id: id.as_i64(),
        })?;

        self.conn.execute(
            "UPDATE counter_offers SET asking_price = ?, offered_price = ?, status = ?,
                                       updated_at = ?
             WHERE id = ?",
            params![
                amount(update.asking_price.unwrap_or(current.asking_price))?,
                amount(update.offered_price.unwrap_or(current.offered_price))?,
                update.status.unwrap_or(current.status),
                now(),
                id
            ],
        )?;

        self.get_counter_offer(id)?.ok_or(ManagerError::NotFound {
            resource: "counter-offer",
            id: id.as_i64(),
        })
    }

    pub fn create_negotiation(&mut self, draft: &NewNegotiation) -> Result<Negotiation> {
        draft.validate(&self.settings)?;

        let mut errors = ValidationErrors::default();
        self.check_reference(&mut errors, "team", "teams", draft.team.as_i64())?;
        if let Some(player) = draft.player {
            self.check_reference(&mut errors, "player", "players", player.as_i64())?;
        }
        if let Some(manager) = draft.manager {
            self.check_reference(&mut errors, "manager", "managers", manager.as_i64())?;
        }
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO negotiations (asking_salary, offer_salary, team_id, player_id,
                                       manager_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                amount(draft.asking_salary)?,
                amount(draft.offer_salary)?,
                draft.team,
                draft.player,
                draft.manager,
                now,
                now
            ],
        )?;
        let id = NegotiationId::new(self.conn.last_insert_rowid());

        self.get_negotiation(id)?.ok_or(ManagerError::NotFound {
            resource: "negotiation",
            id: id.as_i64(),
        })
    }

    pub fn get_negotiation(&self, id: NegotiationId) -> Result<Option<Negotiation>> {
        self.fetch_one(
            &format!("SELECT {NEGOTIATION_COLUMNS} FROM negotiations WHERE id = ?"),
            [id],
            row_to_negotiation,
        )
    }

    pub fn list_negotiations(&self) -> Result<Vec<Negotiation>> {
        self.collect_rows(
            &format!("SELECT {NEGOTIATION_COLUMNS} FROM negotiations ORDER BY id"),
            [],
            row_to_negotiation,
        )
    }
}
