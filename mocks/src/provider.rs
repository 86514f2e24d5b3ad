use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, Vec,
};

use bound_common::ReceiverSetupClient;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockProviderError {
    QueueEmpty = 1,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    BoundRegistry,
    Queue,
}

/// Receiver provider backed by a queue of pre-registered receiver
/// instances. Tests push natively registered receivers in; `provision`
/// pops the next one and initializes it for the requesting owner.
#[contract]
pub struct MockReceiverProvider;

#[contractimpl]
impl MockReceiverProvider {
    pub fn init(e: Env, bound_registry: Address) {
        e.storage()
            .instance()
            .set(&DataKey::BoundRegistry, &bound_registry);
    }

    pub fn push_receiver(e: Env, receiver: Address) {
        let mut queue: Vec<Address> = e
            .storage()
            .instance()
            .get(&DataKey::Queue)
            .unwrap_or(Vec::new(&e));
        queue.push_back(receiver);
        e.storage().instance().set(&DataKey::Queue, &queue);
    }

    pub fn provision(e: Env, owner: Address, version: u32) -> Address {
        let mut queue: Vec<Address> = e
            .storage()
            .instance()
            .get(&DataKey::Queue)
            .unwrap_or(Vec::new(&e));
        let receiver = match queue.pop_front() {
            Some(a) => a,
            None => panic_with_error!(&e, MockProviderError::QueueEmpty),
        };
        e.storage().instance().set(&DataKey::Queue, &queue);

        let bound_registry: Address = e
            .storage()
            .instance()
            .get(&DataKey::BoundRegistry)
            .unwrap_or(e.current_contract_address());
        ReceiverSetupClient::new(&e, &receiver).initialize(&owner, &bound_registry, &version);
        receiver
    }
}
