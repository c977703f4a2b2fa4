//! Record identifiers: 24 lowercase hex characters made of a 4 byte big endian
//! unix timestamp, 5 random bytes fixed for the process and a 3 byte counter.

use chrono::Utc;
use lazy_static::lazy_static;
use rand_core::{OsRng, RngCore};
use std::sync::atomic::{AtomicU32, Ordering};

/// length of a hex encoded id
pub const OBJECT_ID_LEN: usize = 24;

lazy_static! {
    static ref PROCESS_UNIQUE: [u8; 5] = {
        let mut bytes = [0u8; 5];
        OsRng.fill_bytes(&mut bytes);
        bytes
    };
    static ref COUNTER: AtomicU32 = AtomicU32::new(OsRng.next_u32() & 0x00ff_ffff);
}

/// generates a new id, ids generated within the same second by
/// the same process sort by creation order
pub fn new_object_id() -> String {
    let timestamp = Utc::now().timestamp() as u32;
    let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
    bytes[4..9].copy_from_slice(PROCESS_UNIQUE.as_slice());
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

    hex::encode(bytes)
}

/// checks if `id` is shaped like an id generated by `new_object_id`
pub fn is_valid_object_id(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
