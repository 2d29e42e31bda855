//! One-off: create the local users table and insert the default accounts.
//! Run from project root: cargo run --bin seed_users [-- path/to/users.db]

use regional_prices::users::{self, DEFAULT_DB_PATH, DEFAULT_USERS};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    println!("[1] Opening database {path}...");
    let mut conn = users::open(&path)?;

    println!("[2] Creating table...");
    users::ensure_schema(&conn)?;

    println!("[3] Adding users...");
    let inserted = users::seed_users(&mut conn, &DEFAULT_USERS)?;

    println!(
        "Done: {inserted} new user(s), {} already present, database '{path}'",
        DEFAULT_USERS.len() - inserted
    );
    Ok(())
}
