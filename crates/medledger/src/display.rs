use alloy::primitives::Address;

use medledger_core::Session;

/// `0x1234...7890` form used in the wallet badge.
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

pub fn session_label(session: &Session) -> String {
    match (session.loading, session.address) {
        (true, _) => "Connecting...".to_owned(),
        (false, Some(address)) => format!("Connected {}", short_address(&address)),
        (false, None) => "Connect Wallet".to_owned(),
    }
}
