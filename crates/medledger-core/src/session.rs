use alloy::primitives::Address;

use crate::domain::SignerHandle;

/// Outcome of applying an `accountsChanged` payload to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountChange {
    /// Provider reported no accounts; the session was dropped.
    Cleared,
    Switched(Address),
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub address: Option<Address>,
    pub signer: Option<SignerHandle>,
    pub chain_id: Option<u64>,
    pub loading: bool,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.address.is_some() && self.signer.is_some()
    }

    pub fn has_address(&self) -> bool {
        self.address.is_some()
    }

    pub fn establish(&mut self, address: Address, chain_id: u64) {
        self.address = Some(address);
        self.signer = Some(SignerHandle { address, chain_id });
        self.chain_id = Some(chain_id);
    }

    /// Drops every connection field. The loading flag belongs to whatever
    /// operation is in flight and is left alone.
    pub fn clear(&mut self) {
        self.address = None;
        self.signer = None;
        self.chain_id = None;
    }

    pub fn apply_accounts(&mut self, accounts: &[Address]) -> AccountChange {
        let Some(first) = accounts.first().copied() else {
            self.clear();
            return AccountChange::Cleared;
        };
        if self.address == Some(first) {
            return AccountChange::Unchanged;
        }
        self.address = Some(first);
        if let Some(chain_id) = self.chain_id {
            self.signer = Some(SignerHandle {
                address: first,
                chain_id,
            });
        }
        AccountChange::Switched(first)
    }
}
