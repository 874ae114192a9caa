//! Data models for the storage layer
//!
//! Records (`Country`, `Team`, ...) are what the database returns and the API
//! serializes. Drafts (`NewCountry`, `NewTeam`, ...) are what clients send;
//! each implements [`Validate`] with the column-level rules of its table.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

use crate::config::Settings;
use crate::error::Result;
use crate::types::*;
use crate::validation::{
    Draft, StandIn, Validate, ValidationErrors, MAX_SMALL_AMOUNT, REQUIRED,
};

/// Creation and last-update times shared by every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// "first last", skipping missing parts
fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Registered account. Email is the username.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Registration payload. Staff flags are never read from clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(skip)]
    pub is_staff: bool,
    #[serde(skip)]
    pub is_superuser: bool,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub fn superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }
}

impl Validate for NewUser {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.email("email", &self.email, settings.max_length);
        if self.password.is_empty() {
            errors.add("password", crate::validation::BLANK);
        }
        errors.optional_text("first_name", self.first_name.as_deref(), settings.max_length);
        errors.optional_text("last_name", self.last_name.as_deref(), settings.max_length);
        errors.into_result()
    }
}

impl Draft for NewUser {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("email", StandIn::Text),
        ("password", StandIn::Text),
    ];
}

/// How an auth key was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Long-lived API token (`Authorization: Token <key>`)
    Token,
    /// Browser session (`sessionid` cookie)
    Session,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Token => "token",
            TokenKind::Session => "session",
        }
    }
}

/// In-game manager profile linked to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manager {
    pub id: ManagerId,
    pub user: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub country: Option<CountryId>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            full_name(self.first_name.as_deref(), self.last_name.as_deref())
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewManager {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub country: Option<CountryId>,
}

impl Validate for NewManager {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.optional_text("first_name", self.first_name.as_deref(), settings.max_length);
        errors.optional_text("last_name", self.last_name.as_deref(), settings.max_length);
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCountry {
    pub name: String,
}

impl Validate for NewCountry {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.required_text("name", &self.name, settings.max_length);
        errors.into_result()
    }
}

impl Draft for NewCountry {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[("name", StandIn::Text)];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPosition {
    pub id: PositionId,
    pub position: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPosition {
    pub position: String,
}

impl Validate for NewPosition {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.required_text("position", &self.position, settings.max_length);
        errors.into_result()
    }
}

impl Draft for NewPosition {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[("position", StandIn::Text)];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractType {
    pub id: ContractTypeId,
    pub service: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.service)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContractType {
    pub service: String,
}

impl Validate for NewContractType {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.required_text("service", &self.service, settings.max_length);
        errors.into_result()
    }
}

impl Draft for NewContractType {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[("service", StandIn::Text)];
}

/// Maps a player attribute name to the category it is displayed under
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeCategory {
    pub id: AttributeCategoryId,
    pub attribute: String,
    pub category: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attribute)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAttributeCategory {
    pub attribute: String,
    pub category: String,
}

impl Validate for NewAttributeCategory {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.required_text("attribute", &self.attribute, settings.max_length);
        errors.required_text("category", &self.category, settings.max_length);
        if errors.is_empty() {
            errors.choice("attribute", &self.attribute, &settings.attributes);
            errors.choice("category", &self.category, &settings.categories);
        }
        errors.into_result()
    }
}

impl Draft for NewAttributeCategory {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("attribute", StandIn::Text),
        ("category", StandIn::Text),
    ];
}

// ---------------------------------------------------------------------------
// Leagues and teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub country: CountryId,
    pub division: i64,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLeague {
    pub name: String,
    pub country: CountryId,
    pub division: i64,
}

impl Validate for NewLeague {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.required_text("name", &self.name, settings.max_length);
        errors.into_result()
    }
}

impl Draft for NewLeague {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("name", StandIn::Text),
        ("country", StandIn::Number),
        ("division", StandIn::Number),
    ];
}

/// Squad owned by a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub owner: UserId,
    pub manager: Option<ManagerId>,
    pub budget: u64,
    pub league: LeagueId,
    pub value: u64,
    pub earning: u64,
    pub has_manager: bool,
    pub starting_manager_salary: u64,
    pub existing: bool,
    pub num_players: u64,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn default_existing() -> bool {
    true
}

/// Team payload. Owner, budget, value and earning are assigned server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub league: LeagueId,
    #[serde(default)]
    pub manager: Option<ManagerId>,
    #[serde(default)]
    pub has_manager: bool,
    pub starting_manager_salary: u64,
    #[serde(default = "default_existing")]
    pub existing: bool,
}

impl Validate for NewTeam {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.required_text("name", &self.name, settings.max_length);
        errors.amount("starting_manager_salary", self.starting_manager_salary);
        errors.into_result()
    }
}

impl Draft for NewTeam {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("name", StandIn::Text),
        ("league", StandIn::Number),
        ("starting_manager_salary", StandIn::Number),
    ];
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub country: Option<CountryId>,
    pub salary: u64,
    pub team: Option<TeamId>,
    pub price: u64,
    pub status: Option<PlayerStatus>,
    pub position: Option<PositionId>,
    pub contract_type: ContractTypeId,
    pub join_date: NaiveDate,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            full_name(self.first_name.as_deref(), self.last_name.as_deref())
        )
    }
}

/// Player payload. The team is only changed through [`assign_player_team`].
///
/// [`assign_player_team`]: super::FantasyDatabase::assign_player_team
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub country: Option<CountryId>,
    pub salary: u64,
    pub price: u64,
    #[serde(default)]
    pub status: Option<PlayerStatus>,
    #[serde(default)]
    pub position: Option<PositionId>,
    pub contract_type: ContractTypeId,
    pub join_date: NaiveDate,
}

impl Validate for NewPlayer {
    fn validate(&self, settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.optional_text("first_name", self.first_name.as_deref(), settings.max_length);
        errors.optional_text("last_name", self.last_name.as_deref(), settings.max_length);
        errors.amount("salary", self.salary);
        errors.amount("price", self.price);
        errors.into_result()
    }
}

impl Draft for NewPlayer {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("date_of_birth", StandIn::Date),
        ("salary", StandIn::Number),
        ("price", StandIn::Number),
        ("contract_type", StandIn::Number),
        ("join_date", StandIn::Date),
    ];
}

/// Partial player update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerUpdate {
    #[serde(default)]
    pub salary: Option<u64>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub status: Option<PlayerStatus>,
}

impl Validate for PlayerUpdate {
    fn validate(&self, _settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        if let Some(salary) = self.salary {
            errors.amount("salary", salary);
        }
        if let Some(price) = self.price {
            errors.amount("price", price);
        }
        errors.into_result()
    }
}

impl Draft for PlayerUpdate {}

/// Rated attribute of a player, filed under an attribute category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAttribute {
    pub id: PlayerAttributeId,
    pub player: PlayerId,
    pub category: Option<AttributeCategoryId>,
    pub value: u16,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayerAttribute {
    pub category: AttributeCategoryId,
    pub value: u16,
}

impl Validate for NewPlayerAttribute {
    fn validate(&self, _settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        if self.value > MAX_SMALL_AMOUNT {
            errors.add(
                "value",
                format!("Ensure this value is less than or equal to {MAX_SMALL_AMOUNT}."),
            );
        }
        errors.into_result()
    }
}

impl Draft for NewPlayerAttribute {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("category", StandIn::Number),
        ("value", StandIn::Number),
    ];
}

// ---------------------------------------------------------------------------
// Transfers, counter-offers and negotiations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub id: TransferId,
    pub asking_price: u64,
    pub offered_price: u64,
    pub player: PlayerId,
    pub buyer: TeamId,
    pub seller: TeamId,
    pub status: TransferStatus,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransfer {
    pub asking_price: u64,
    pub offered_price: u64,
    pub player: PlayerId,
    pub buyer: TeamId,
    pub seller: TeamId,
    pub status: TransferStatus,
}

impl Validate for NewTransfer {
    fn validate(&self, _settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.amount("asking_price", self.asking_price);
        errors.amount("offered_price", self.offered_price);
        errors.into_result()
    }
}

impl Draft for NewTransfer {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("asking_price", StandIn::Number),
        ("offered_price", StandIn::Number),
        ("player", StandIn::Number),
        ("buyer", StandIn::Number),
        ("seller", StandIn::Number),
        ("status", StandIn::Label("OPEN")),
    ];
}

/// Partial update of an offer; absent fields keep their value
#[derive(Debug, Clone, Deserialize)]
pub struct OfferUpdate<S> {
    #[serde(default)]
    pub asking_price: Option<u64>,
    #[serde(default)]
    pub offered_price: Option<u64>,
    #[serde(default = "Option::default")]
    pub status: Option<S>,
}

impl<S> Validate for OfferUpdate<S> {
    fn validate(&self, _settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        if let Some(asking) = self.asking_price {
            errors.amount("asking_price", asking);
        }
        if let Some(offered) = self.offered_price {
            errors.amount("offered_price", offered);
        }
        errors.into_result()
    }
}

impl<S: DeserializeOwned> Draft for OfferUpdate<S> {}

pub type TransferUpdate = OfferUpdate<TransferStatus>;
pub type CounterOfferUpdate = OfferUpdate<OfferStatus>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterOffer {
    pub id: CounterOfferId,
    pub asking_price: u64,
    pub offered_price: u64,
    pub player: PlayerId,
    pub buyer: TeamId,
    pub seller: TeamId,
    pub status: OfferStatus,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCounterOffer {
    pub asking_price: u64,
    pub offered_price: u64,
    pub player: PlayerId,
    pub buyer: TeamId,
    pub seller: TeamId,
    pub status: OfferStatus,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
}

impl Validate for NewCounterOffer {
    fn validate(&self, _settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.amount("asking_price", self.asking_price);
        errors.amount("offered_price", self.offered_price);
        errors.into_result()
    }
}

impl Draft for NewCounterOffer {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("asking_price", StandIn::Number),
        ("offered_price", StandIn::Number),
        ("player", StandIn::Number),
        ("buyer", StandIn::Number),
        ("seller", StandIn::Number),
        ("status", StandIn::Label("ACCEPTED")),
        ("type", StandIn::Label("BUY")),
    ];
}

/// Who a team is negotiating a salary with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationSubject {
    Player(PlayerId),
    Manager(ManagerId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Negotiation {
    pub id: NegotiationId,
    pub asking_salary: u64,
    pub offer_salary: u64,
    pub team: TeamId,
    #[serde(flatten)]
    pub subject: NegotiationSubject,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Negotiation payload: exactly one of `player` or `manager`
#[derive(Debug, Clone, Deserialize)]
pub struct NewNegotiation {
    pub asking_salary: u64,
    pub offer_salary: u64,
    pub team: TeamId,
    #[serde(default)]
    pub player: Option<PlayerId>,
    #[serde(default)]
    pub manager: Option<ManagerId>,
}

impl NewNegotiation {
    pub fn subject(&self) -> Option<NegotiationSubject> {
        match (self.player, self.manager) {
            (Some(player), None) => Some(NegotiationSubject::Player(player)),
            (None, Some(manager)) => Some(NegotiationSubject::Manager(manager)),
            _ => None,
        }
    }
}

impl Validate for NewNegotiation {
    fn validate(&self, _settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.amount("asking_salary", self.asking_salary);
        errors.amount("offer_salary", self.offer_salary);
        match (self.player, self.manager) {
            (None, None) => {
                errors.add("player", REQUIRED);
                errors.add("manager", REQUIRED);
            }
            (Some(_), Some(_)) => {
                errors.add(
                    "non_field_errors",
                    "Provide either a player or a manager, not both.",
                );
            }
            _ => {}
        }
        errors.into_result()
    }
}

impl Draft for NewNegotiation {
    const REQUIRED: &'static [(&'static str, StandIn)] = &[
        ("asking_salary", StandIn::Number),
        ("offer_salary", StandIn::Number),
        ("team", StandIn::Number),
    ];
}
