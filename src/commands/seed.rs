//! Seed command implementation

use crate::{storage::FantasyDatabase, Result};

/// Insert default positions and contract types, reporting what was added
pub fn handle_seed(db: &mut FantasyDatabase) -> Result<()> {
    let report = db.seed_reference_data()?;
    tracing::info!(
        positions = report.positions,
        contract_types = report.contract_types,
        "seeded reference data"
    );
    println!(
        "✓ Added {} positions and {} contract types",
        report.positions, report.contract_types
    );
    Ok(())
}
