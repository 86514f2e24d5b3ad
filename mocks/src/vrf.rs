use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, Vec,
};

use bound_common::VrfConsumerClient;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockVrfError {
    UnknownSubscription = 1,
    UnknownRequest = 2,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    NextRequestId,
    NextSubscriptionId,
    Subscription(u64),
    Consumer(u64),
}

/// Randomness coordinator with manual fulfillment. Requests are recorded
/// and only delivered when a test calls one of the fulfill entry points;
/// delivery is deliberately repeatable so consumers' idempotency can be
/// exercised.
#[contract]
pub struct MockVrfCoordinator;

#[contractimpl]
impl MockVrfCoordinator {
    pub fn create_subscription(e: Env) -> u64 {
        let id: u64 = e
            .storage()
            .instance()
            .get(&DataKey::NextSubscriptionId)
            .unwrap_or(1);
        e.storage()
            .instance()
            .set(&DataKey::NextSubscriptionId, &(id + 1));
        e.storage()
            .instance()
            .set(&DataKey::Subscription(id), &0i128);
        id
    }

    pub fn fund_subscription(e: Env, subscription_id: u64, amount: i128) {
        let key = DataKey::Subscription(subscription_id);
        let funded: i128 = match e.storage().instance().get(&key) {
            Some(v) => v,
            None => panic_with_error!(&e, MockVrfError::UnknownSubscription),
        };
        e.storage().instance().set(&key, &(funded + amount));
    }

    pub fn request_random_words(e: Env, consumer: Address, subscription_id: u64) -> u64 {
        if !e
            .storage()
            .instance()
            .has(&DataKey::Subscription(subscription_id))
        {
            panic_with_error!(&e, MockVrfError::UnknownSubscription);
        }
        let request_id: u64 = e
            .storage()
            .instance()
            .get(&DataKey::NextRequestId)
            .unwrap_or(1);
        e.storage()
            .instance()
            .set(&DataKey::NextRequestId, &(request_id + 1));
        e.storage()
            .instance()
            .set(&DataKey::Consumer(request_id), &consumer);
        request_id
    }

    /// Deliver pseudo-random words derived from the request id.
    pub fn fulfill_random_words(e: Env, request_id: u64) {
        let mut words = Vec::new(&e);
        words.push_back(request_id.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self::deliver(&e, request_id, words);
    }

    /// Deliver caller-chosen words, for fixed-seed assignment tests.
    pub fn fulfill_words_with_override(e: Env, request_id: u64, words: Vec<u64>) {
        Self::deliver(&e, request_id, words);
    }

    fn deliver(e: &Env, request_id: u64, words: Vec<u64>) {
        let consumer: Address = match e.storage().instance().get(&DataKey::Consumer(request_id)) {
            Some(a) => a,
            None => panic_with_error!(e, MockVrfError::UnknownRequest),
        };
        VrfConsumerClient::new(e, &consumer).fulfill_random_words(&request_id, &words);
    }
}
