//! Sloot providers.
//!
//! - `SeededSlootProvider` derives sloot locally from a SHA-256 digest
//! - `SlootApiClient` fetches it from a remote sloot API
//! - `ResilientCharacterProvider` adds retries around either

mod api;
mod resilient;
mod seeded;

pub use api::SlootApiClient;
pub use resilient::{ResilientCharacterProvider, RetryConfig};
pub use seeded::SeededSlootProvider;

use frame_survivor_domain::WalletAddress;

use crate::infrastructure::ports::RandomPort;

/// Generate `count` random wallet addresses.
pub fn random_addresses(random: &dyn RandomPort, count: usize) -> Vec<WalletAddress> {
    (0..count)
        .map(|_| {
            let mut bytes = [0u8; 20];
            for byte in bytes.iter_mut() {
                *byte = random.gen_range(0, 255) as u8;
            }
            WalletAddress::from_bytes(bytes)
        })
        .collect()
}
