// Dry-run support: build the same summary the backend would return, but
// locally and without touching any account.

use rand::rngs::OsRng;
use rand::Rng;

use crate::api::{BulkGenerationSummary, GeneratedCredential, GenerationStatus};

/// Characters used for passwords. Look-alikes (0/O, 1/l/I) are left out.
pub const PASSWORD_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz23456789";
pub const DEFAULT_PASSWORD_LENGTH: u32 = 12;
pub const MIN_PASSWORD_LENGTH: u32 = 8;

pub fn generate_password(length: u32) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())] as char)
        .collect()
}

/// Pretend every room gets a fresh account.
pub fn preview(rooms: &[String], password_length: Option<u32>) -> BulkGenerationSummary {
    let length = password_length.unwrap_or(DEFAULT_PASSWORD_LENGTH);
    let credentials: Vec<GeneratedCredential> = rooms
        .iter()
        .map(|room| GeneratedCredential {
            room_number: room.clone(),
            password: Some(generate_password(length)),
            status: GenerationStatus::Preview,
        })
        .collect();
    BulkGenerationSummary {
        created: credentials.len() as u64,
        updated: 0,
        skipped: 0,
        credentials,
    }
}
