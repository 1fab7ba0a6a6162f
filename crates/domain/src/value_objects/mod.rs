//! Value objects - Immutable objects defined by their attributes

mod address;
mod image;
mod win_chance;

pub use address::{StartingSeed, WalletAddress};
pub use image::ImageRef;
pub use win_chance::WinChance;
