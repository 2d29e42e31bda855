//! Local credential store seeded by the `seed_users` binary. No request handler reads it.

use std::path::Path;

use rusqlite::{params, Connection};
use sha3::Sha3_256;
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "users.db";
pub const HASH_SCHEME: &str = "pbkdf2:sha3-256";
pub const HASH_ITERATIONS: u32 = 20_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

const INSERT_USER: &str = "INSERT OR IGNORE INTO users (username, password) VALUES (?1, ?2)";

pub const DEFAULT_USERS: [(&str, &str); 3] = [
    ("dominik", "tajnehaslo1"),
    ("jakub", "tajnehaslo2"),
    ("wojciech", "tajnehaslo3"),
];

#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Random source unavailable: {0}")]
    Random(String),
}

pub fn open(path: impl AsRef<Path>) -> Result<Connection, UserStoreError> {
    Ok(Connection::open(path)?)
}

pub fn ensure_schema(conn: &Connection) -> Result<(), UserStoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Inserts users that do not exist yet; returns how many rows were added.
pub fn seed_users(conn: &mut Connection, users: &[(&str, &str)]) -> Result<usize, UserStoreError> {
    let tx = conn.transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(INSERT_USER)?;
        for (username, password) in users {
            let hashed = hash_password(password)?;
            inserted += stmt.execute(params![username, hashed])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

pub fn stored_hash(conn: &Connection, username: &str) -> Result<Option<String>, UserStoreError> {
    let mut stmt = conn.prepare("SELECT password FROM users WHERE username = ?1")?;
    let mut rows = stmt.query(params![username])?;
    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

/// `pbkdf2:sha3-256:<iterations>$<salt hex>$<key hex>` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, UserStoreError> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt).map_err(|err| UserStoreError::Random(err.to_string()))?;
    Ok(hash_with_salt(password, &salt, HASH_ITERATIONS))
}

pub fn hash_with_salt(password: &str, salt: &[u8], iterations: u32) -> String {
    format!(
        "{HASH_SCHEME}:{iterations}${}${}",
        hex::encode(salt),
        hex::encode(derive_key(password, salt, iterations))
    )
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(method), Some(salt), Some(expected), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Some(iterations) = method
        .strip_prefix(HASH_SCHEME)
        .and_then(|rest| rest.strip_prefix(':'))
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|iterations| *iterations > 0)
    else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt), hex::decode(expected)) else {
        return false;
    };
    let actual = derive_key(password, &salt, iterations);
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(&expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha3_256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_idempotent_and_hashes_passwords() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        assert_eq!(seed_users(&mut conn, &DEFAULT_USERS).unwrap(), 3);
        assert_eq!(seed_users(&mut conn, &DEFAULT_USERS).unwrap(), 0);

        let stored = stored_hash(&conn, "jakub").unwrap().unwrap();
        assert!(stored.starts_with("pbkdf2:sha3-256:20000$"));
        assert!(!stored.contains("tajnehaslo2"));
        assert!(verify_password("tajnehaslo2", &stored));
        assert!(!verify_password("tajnehaslo1", &stored));
        assert_eq!(stored_hash(&conn, "nobody").unwrap(), None);
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hash_password("x").unwrap();
        let b = hash_password("x").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "md5:1$00$00"));
        assert!(!verify_password("x", "pbkdf2:sha3-256:0$00$00"));
        assert!(!verify_password("x", "pbkdf2:sha3-256:1$zz$00"));
        let good = hash_with_salt("x", &[1, 2, 3], 2);
        assert!(verify_password("x", &good));
        assert!(!verify_password("y", &good));
        assert!(!verify_password("x", &format!("{good}$extra")));
    }

    #[test]
    fn derived_key_matches_reference_pbkdf2_hmac_sha3() {
        assert_eq!(
            hash_with_salt("tajnehaslo1", b"salt", 1),
            "pbkdf2:sha3-256:1$73616c74$7fba4ec8292bbdfa41b06ca3ae0d2920a4b558ec054a2ff8e13bce41a176951f"
        );
        assert_eq!(
            hash_with_salt("tajnehaslo1", b"salt", 2),
            "pbkdf2:sha3-256:2$73616c74$eaed72f4cdbe5602206bffb2fbac756a6cba9de668592f932b07a069b567545f"
        );
    }
}
