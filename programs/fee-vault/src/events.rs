use anchor_lang::prelude::*;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub creator: Pubkey,
    pub protocol_authority: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
    pub max_total_supply: u64,
    pub timestamp: i64,
}

/// Emitted by both `deposit` and `mint`
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub owner: Pubkey,
    /// Gross assets pulled from the caller, fees included
    pub assets: u64,
    pub shares: u64,
    pub vault_fee: u64,
    pub protocol_fee: u64,
    pub creator_fee: u64,
    pub timestamp: i64,
}

/// Emitted by both `withdraw` and `redeem`
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    pub owner: Pubkey,
    /// Net assets sent to the receiver, fees excluded
    pub assets: u64,
    pub shares: u64,
    pub vault_fee: u64,
    pub protocol_fee: u64,
    pub creator_fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct VaultFeesUpdated {
    pub vault: Pubkey,
    pub entry_fee_bps: u16,
    pub exit_fee_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolFeesUpdated {
    pub vault: Pubkey,
    pub entry_fee_bps: u16,
    pub exit_fee_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct CreatorFeesUpdated {
    pub vault: Pubkey,
    pub entry_fee_bps: u16,
    pub exit_fee_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolFeeRecipientUpdated {
    pub vault: Pubkey,
    pub recipient: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct CreatorFeeRecipientUpdated {
    pub vault: Pubkey,
    pub recipient: Pubkey,
    pub timestamp: i64,
}
