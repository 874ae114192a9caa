//! Status enumerations for players, transfers and counter-offers.
//!
//! These are stored records only: any value may replace any other, nothing
//! here governs transitions between them.

use crate::error::ManagerError;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declare an enum whose wire and storage form is an upper-case label.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl FromStr for $name {
            type Err = ManagerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($label => Ok($name::$variant),)+
                    _ => Err(ManagerError::InvalidStatus {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.label()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let label = value.as_str()?;
                label
                    .parse()
                    .map_err(|e: ManagerError| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

labelled_enum!(
    /// Whether a player is on the market.
    PlayerStatus, "player status" {
        ForSale => "FOR SALE",
        NotForSale => "NOT FOR SALE",
    }
);

labelled_enum!(
    /// State of a transfer listing.
    TransferStatus, "transfer status" {
        Open => "OPEN",
        Closed => "CLOSED",
    }
);

labelled_enum!(
    /// Outcome recorded on a counter-offer.
    OfferStatus, "offer status" {
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
        Stalled => "STALLED",
        Countered => "COUNTERED",
    }
);

labelled_enum!(
    OfferType, "offer type" {
        Buy => "BUY",
        Loan => "LOAN",
    }
);

/// SQL `CHECK` list for a labelled enum, e.g. `'OPEN', 'CLOSED'`.
pub fn sql_choices<T: fmt::Display>(all: &[T]) -> String {
    all.iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
