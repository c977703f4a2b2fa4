use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, RngCore, SeedableRng};
use std::sync::Arc;
use tokio::sync::Mutex;

/// ChaCha rng seeded from the OS, shared by every service that needs randomness
pub type SharedRng = Arc<Mutex<ChaCha8Rng>>;

pub fn new_shared_rng() -> SharedRng {
    Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(OsRng.next_u64())))
}

pub async fn random_bytes<const N: usize>(rng: &SharedRng) -> [u8; N] {
    let mut bytes = [0u8; N];

    rng.lock().await.fill_bytes(&mut bytes);

    bytes
}
