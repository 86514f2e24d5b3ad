#![no_std]
//! Native mock contracts for exercising the protocol in tests: mintable
//! underlying/reward tokens, a minting contract, a configurable flash-loan
//! receiver, an airdrop project, a randomness coordinator, and the smaller
//! collaborators (loan guard, receiver provider, interceptor, delegation
//! registry). Mocks fail with their own error codes so callers can assert
//! that sub-call errors propagate unmodified.

mod airdrop_project;
mod delegation;
mod flash_receiver;
mod fungible;
mod interceptor;
mod loan_guard;
mod minter;
mod multi_token;
mod nft;
mod provider;
mod vrf;

pub use airdrop_project::{MockAirdropProject, MockAirdropProjectClient, MockAirdropProjectError};
pub use delegation::{MockDelegationRegistry, MockDelegationRegistryClient};
pub use flash_receiver::{MockFlashLoanReceiver, MockFlashLoanReceiverClient};
pub use fungible::{MockFungible, MockFungibleClient, MockFungibleError};
pub use interceptor::{MockTokenInterceptor, MockTokenInterceptorClient};
pub use loan_guard::{MockLoanGuard, MockLoanGuardClient};
pub use minter::{MockMinter, MockMinterClient, MockMinterError};
pub use multi_token::{MockMultiToken, MockMultiTokenClient, MockMultiTokenError};
pub use nft::{MockNft, MockNftClient, MockNftError};
pub use provider::{MockReceiverProvider, MockReceiverProviderClient, MockProviderError};
pub use vrf::{MockVrfCoordinator, MockVrfCoordinatorClient, MockVrfError};

#[cfg(test)]
mod test;
