use anchor_lang::prelude::*;

use crate::{
    accounting::VaultAccounting,
    constants::{MAX_CREATOR_FEE_BPS, MAX_PROTOCOL_FEE_BPS, MAX_VAULT_FEE_BPS},
    errors::VaultError,
};

/// Per-vault configuration and PDA bookkeeping
///
/// Total assets and total shares are not stored: they are read from the
/// vault token account balance and the share mint supply on every call, so
/// a direct donation to the vault is reflected in the exchange rate.
#[account]
pub struct VaultState {
    /// Holds the creator capability: vault fees, creator fees, creator recipient
    pub creator: Pubkey,            // 32 bytes

    /// Holds the protocol capability: protocol fees, protocol recipient
    pub protocol_authority: Pubkey, // 32 bytes

    /// Mint of the underlying asset token
    pub asset_mint: Pubkey,         // 32 bytes

    /// Mint of the vault share token
    pub share_mint: Pubkey,         // 32 bytes

    pub fees: FeeConfig,            // 76 bytes

    /// Cap on total share supply, `UNCAPPED_SUPPLY` for none
    pub max_total_supply: u64,      // 8 bytes

    /// Bump seed for vault state PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for share mint PDA
    pub share_bump: u8,             // 1 byte

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,         // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 64],        // 64 bytes
}

impl VaultState {
    /// Accounting view over this vault at the given balances
    pub fn accounting(&self, total_assets: u64, total_shares: u64) -> VaultAccounting<'_> {
        VaultAccounting::new(&self.fees, self.max_total_supply, total_assets, total_shares)
    }

    pub fn holder(&self, capability: Capability) -> Pubkey {
        match capability {
            Capability::Creator => self.creator,
            Capability::Protocol => self.protocol_authority,
        }
    }

    pub fn authorize(&self, capability: Capability, signer: Pubkey) -> Result<()> {
        require_keys_eq!(signer, self.holder(capability), VaultError::Unauthorized);
        Ok(())
    }

    /// Replaces one category's rates on behalf of `signer`.
    /// The capability is checked before anything is validated or written.
    pub fn update_rates(&mut self, signer: Pubkey, category: FeeCategory, pair: FeePair) -> Result<()> {
        self.authorize(category.capability(), signer)?;
        self.fees.set_rates(category, pair)
    }

    /// Replaces the fee recipient owned by `capability` on behalf of `signer`
    pub fn update_fee_recipient(
        &mut self,
        signer: Pubkey,
        capability: Capability,
        recipient: Pubkey,
    ) -> Result<()> {
        self.authorize(capability, signer)?;
        match capability {
            Capability::Creator => self.fees.set_creator_fee_recipient(recipient),
            Capability::Protocol => self.fees.set_protocol_fee_recipient(recipient),
        }
    }
}

/// Configuration rights. The creator sets vault and creator fees and the
/// creator recipient; the protocol authority sets the protocol side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Creator,
    Protocol,
}

/// Entry and exit rates of one fee category, in basis points
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeePair {
    pub entry_bps: u16,
    pub exit_bps: u16,
}

impl FeePair {
    pub fn new(entry_bps: u16, exit_bps: u16) -> Self {
        Self { entry_bps, exit_bps }
    }
}

/// The three fee categories. Each is capped independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeCategory {
    /// Retained in the vault, accrues to all shareholders
    Vault,
    Protocol,
    Creator,
}

impl FeeCategory {
    /// Capability required to change this category's rates
    pub fn capability(self) -> Capability {
        match self {
            FeeCategory::Vault | FeeCategory::Creator => Capability::Creator,
            FeeCategory::Protocol => Capability::Protocol,
        }
    }

    pub fn max_bps(self) -> u16 {
        match self {
            FeeCategory::Vault => MAX_VAULT_FEE_BPS,
            FeeCategory::Protocol => MAX_PROTOCOL_FEE_BPS,
            FeeCategory::Creator => MAX_CREATOR_FEE_BPS,
        }
    }

    /// Checks both sides of `pair` against this category's cap.
    /// Entry is checked first; the error logs the offending rate and the cap.
    pub fn validate(self, pair: &FeePair) -> Result<()> {
        let cap = self.max_bps();
        require_gte!(cap, pair.entry_bps, VaultError::EntryFeeExceedsLimit);
        require_gte!(cap, pair.exit_bps, VaultError::ExitFeeExceedsLimit);
        Ok(())
    }
}

/// Fee rates and recipients for one vault
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeConfig {
    pub vault: FeePair,
    pub protocol: FeePair,
    pub creator: FeePair,
    pub protocol_fee_recipient: Pubkey,
    pub creator_fee_recipient: Pubkey,
}

impl FeeConfig {
    /// Sum of the three entry rates
    pub fn total_entry_bps(&self) -> u32 {
        self.vault.entry_bps as u32 + self.protocol.entry_bps as u32 + self.creator.entry_bps as u32
    }

    /// Sum of the three exit rates
    pub fn total_exit_bps(&self) -> u32 {
        self.vault.exit_bps as u32 + self.protocol.exit_bps as u32 + self.creator.exit_bps as u32
    }

    pub fn pair(&self, category: FeeCategory) -> FeePair {
        match category {
            FeeCategory::Vault => self.vault,
            FeeCategory::Protocol => self.protocol,
            FeeCategory::Creator => self.creator,
        }
    }

    /// Validates and replaces one category's rates. Leaves state
    /// untouched on failure.
    pub fn set_rates(&mut self, category: FeeCategory, pair: FeePair) -> Result<()> {
        category.validate(&pair)?;
        match category {
            FeeCategory::Vault => self.vault = pair,
            FeeCategory::Protocol => self.protocol = pair,
            FeeCategory::Creator => self.creator = pair,
        }
        Ok(())
    }

    pub fn set_protocol_fee_recipient(&mut self, recipient: Pubkey) -> Result<()> {
        require_keys_neq!(recipient, Pubkey::default(), VaultError::InvalidFeeRecipient);
        self.protocol_fee_recipient = recipient;
        Ok(())
    }

    pub fn set_creator_fee_recipient(&mut self, recipient: Pubkey) -> Result<()> {
        require_keys_neq!(recipient, Pubkey::default(), VaultError::InvalidFeeRecipient);
        self.creator_fee_recipient = recipient;
        Ok(())
    }

    /// Builds a config from initial values, applying the same rules as the setters
    pub fn try_new(
        vault: FeePair,
        protocol: FeePair,
        creator: FeePair,
        protocol_fee_recipient: Pubkey,
        creator_fee_recipient: Pubkey,
    ) -> Result<Self> {
        let mut config = FeeConfig::default();
        config.set_rates(FeeCategory::Vault, vault)?;
        config.set_rates(FeeCategory::Protocol, protocol)?;
        config.set_rates(FeeCategory::Creator, creator)?;
        config.set_protocol_fee_recipient(protocol_fee_recipient)?;
        config.set_creator_fee_recipient(creator_fee_recipient)?;
        Ok(config)
    }
}
