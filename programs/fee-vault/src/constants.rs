// Constants for the Fee Vault program

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for share mint PDA
pub const SHARE_MINT_SEED: &[u8] = b"shares";

/// Seed for the PDA that owns the vault token account and mints shares
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Denominator for all fee rates (10000 bps = 100%)
pub const BASIS_POINT_SCALE: u64 = 10_000;

/// Virtual precision pad applied to every share/asset conversion.
/// Shares carry this many more decimals than the underlying asset.
pub const DECIMALS_OFFSET: u8 = 1;

/// Vault fee cap per side: 50% (bps * 2 <= BASIS_POINT_SCALE)
pub const MAX_VAULT_FEE_BPS: u16 = 5_000;

/// Protocol fee cap per side: 10% (bps * 10 <= BASIS_POINT_SCALE)
pub const MAX_PROTOCOL_FEE_BPS: u16 = 1_000;

/// Creator fee cap per side: 10%
pub const MAX_CREATOR_FEE_BPS: u16 = 1_000;

/// Share supply cap meaning "no cap"
pub const UNCAPPED_SUPPLY: u64 = u64::MAX;

/// Space for VaultState account (8 discriminator + 32 creator +
/// 32 protocol_authority + 32 asset_mint + 32 share_mint +
/// 76 fee config (3 * 4 rate pairs + 2 * 32 recipients) +
/// 8 max_total_supply + 1 bump + 1 share_bump + 1 authority_bump + 64 padding)
pub const VAULT_STATE_SIZE: usize = 8 + 32 + 32 + 32 + 32 + 76 + 8 + 1 + 1 + 1 + 64;
