//! Column reconciliation for database files created by older releases.
//!
//! Legacy files may carry a `designs` table missing later columns. The
//! migration's `CREATE TABLE IF NOT EXISTS` leaves such a table alone, so
//! missing columns are added here with a null default.

use sqlx::SqlitePool;

/// Every column the current code reads or writes, with its declared type.
pub const DESIGN_COLUMNS: &[(&str, &str)] = &[
    ("user_id", "TEXT"),
    ("style", "TEXT"),
    ("materials", "TEXT"),
    ("clothing_type", "TEXT"),
    ("production_method", "TEXT"),
    ("packaging", "TEXT"),
    ("production_location", "TEXT"),
    ("shipping_method", "TEXT"),
    ("base_color", "TEXT"),
    ("custom_design", "TEXT"),
    ("sustainability_score", "INTEGER"),
    ("design_image", "BLOB"),
    ("timestamp", "DATETIME"),
    ("qr_code_id", "TEXT"),
    ("care_instructions", "TEXT"),
];

/// Column names currently present on `designs`.
pub async fn design_table_columns(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('designs')")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Expected columns absent from `designs`, in declaration order.
pub async fn missing_design_columns(
    pool: &SqlitePool,
) -> Result<Vec<(&'static str, &'static str)>, sqlx::Error> {
    let existing = design_table_columns(pool).await?;
    Ok(DESIGN_COLUMNS
        .iter()
        .filter(|(name, _)| !existing.iter().any(|c| c == name))
        .copied()
        .collect())
}

/// Add every expected column missing from `designs`. Returns the added names.
///
/// SQLite cannot add a column with a non-constant default, so a missing
/// `timestamp` column is added without one; inserts always bind it.
pub async fn reconcile_design_columns(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let mut added = Vec::new();

    for (name, sql_type) in missing_design_columns(pool).await? {
        // Identifiers come from the constant list above, never from input.
        let statement = format!("ALTER TABLE designs ADD COLUMN {name} {sql_type}");
        sqlx::query(&statement).execute(pool).await?;
        tracing::info!(column = %name, "Added missing column to designs table");
        added.push(name.to_string());
    }

    Ok(added)
}
