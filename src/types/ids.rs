//! ID types for Football Manager records.

use crate::error::ManagerError;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declare a type-safe wrapper around a SQLite row id.
///
/// Keeps ids of different tables from being mixed up while serializing as a
/// bare integer, the way foreign keys appear in API payloads.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ManagerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse()
                    .map(Self)
                    .map_err(|_| ManagerError::MalformedBody {
                        message: format!("invalid id: {s}"),
                    })
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

record_id!(
    /// Registered account.
    UserId
);
record_id!(CountryId);
record_id!(
    /// In-game manager profile; one is created per user.
    ManagerId
);
record_id!(PositionId);
record_id!(ContractTypeId);
record_id!(AttributeCategoryId);
record_id!(LeagueId);
record_id!(TeamId);
record_id!(PlayerId);
record_id!(PlayerAttributeId);
record_id!(TransferId);
record_id!(CounterOfferId);
record_id!(NegotiationId);
