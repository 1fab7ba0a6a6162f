//! Direct sloot lookup for `/get_sloot`.

use frame_survivor_domain::{CharacterAttributes, WalletAddress};
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{CharacterProvider, UpstreamError};
use crate::infrastructure::upstream::bounded;

/// Passthrough to the sloot provider. Touches no session state.
pub struct LookupSloot {
    provider: Arc<dyn CharacterProvider>,
    timeout: Duration,
}

impl LookupSloot {
    pub fn new(provider: Arc<dyn CharacterProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn execute(
        &self,
        address: &WalletAddress,
    ) -> Result<CharacterAttributes, UpstreamError> {
        bounded(
            "fetch_character",
            self.timeout,
            self.provider.fetch_character(address.as_str()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCharacterProvider;
    use crate::test_fixtures::character;

    const ADDRESS: &str = "0xd2b1ddc6c88e865a33cb1a565e0058d757042974";

    #[tokio::test]
    async fn returns_provider_attributes() {
        let mut provider = MockCharacterProvider::new();
        provider
            .expect_fetch_character()
            .withf(|seed| seed == ADDRESS)
            .times(1)
            .returning(|seed| Ok(character(seed, 12)));

        let lookup = LookupSloot::new(Arc::new(provider), Duration::from_secs(1));
        let attributes = lookup
            .execute(&WalletAddress::parse(ADDRESS).unwrap())
            .await
            .unwrap();

        assert_eq!(attributes.owner(), ADDRESS);
        assert_eq!(attributes.total_greatness(), 12);
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let mut provider = MockCharacterProvider::new();
        provider
            .expect_fetch_character()
            .returning(|_| Err(UpstreamError::request_failed("sloot", "503 unavailable")));

        let lookup = LookupSloot::new(Arc::new(provider), Duration::from_secs(1));
        let result = lookup.execute(&WalletAddress::parse(ADDRESS).unwrap()).await;

        assert!(matches!(result, Err(UpstreamError::RequestFailed { .. })));
    }
}
