// Fee Vault - fee-bearing ERC-4626-style vault implementation on Solana
// Entry and exit fees are split between the vault, the protocol and the creator.
// The Solana runtime runs each instruction sequentially and atomically.

use anchor_lang::prelude::*;

pub mod accounting;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod state;

use instructions::*;

declare_id!("FEEVgq4EJ7rVvJZrZ8XRRmW2CLEz8Yx1pKcM1vy3uVQv");

#[program]
pub mod fee_vault {
    use super::*;

    /// Initialize a new vault for a given asset token
    ///
    /// Security considerations:
    /// - Creator is signer and receives the creator capability
    /// - Initial fee rates and recipients pass the same checks as the setters
    /// - Creates share mint with the vault authority PDA as mint authority
    pub fn initialize(ctx: Context<Initialize>, args: InitializeVaultArgs) -> Result<()> {
        instructions::initialize::handler(ctx, args)
    }

    /// Deposit `assets` (fees included) and receive shares
    ///
    /// Security considerations:
    /// - Share price is read before any token moves
    /// - Fees are disbursed only after shares are minted
    /// - Fails if the deposit would exceed the share supply cap
    pub fn deposit(ctx: Context<Deposit>, assets: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, assets)
    }

    /// Mint exactly `shares`, paying their asset cost plus entry fees
    pub fn mint(ctx: Context<Deposit>, shares: u64) -> Result<()> {
        instructions::deposit::handler_mint(ctx, shares)
    }

    /// Withdraw exactly `assets` net of exit fees, burning shares from the owner
    ///
    /// Security considerations:
    /// - Caller must own the shares or be their delegate with enough allowance
    /// - Fees are disbursed only after shares are burned and the receiver is paid
    pub fn withdraw(ctx: Context<Withdraw>, assets: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, assets)
    }

    /// Redeem exactly `shares` for their value net of exit fees
    pub fn redeem(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw::handler_redeem(ctx, shares)
    }

    /// Update vault fee rates (creator only). Each side capped at 50%.
    pub fn set_vault_fees(
        ctx: Context<CreatorConfig>,
        entry_fee_bps: u16,
        exit_fee_bps: u16,
    ) -> Result<()> {
        instructions::set_fees::handler_set_vault_fees(ctx, entry_fee_bps, exit_fee_bps)
    }

    /// Update creator fee rates (creator only). Each side capped at 10%.
    pub fn set_creator_fees(
        ctx: Context<CreatorConfig>,
        entry_fee_bps: u16,
        exit_fee_bps: u16,
    ) -> Result<()> {
        instructions::set_fees::handler_set_creator_fees(ctx, entry_fee_bps, exit_fee_bps)
    }

    /// Update protocol fee rates (protocol authority only). Each side capped at 10%.
    pub fn set_protocol_fees(
        ctx: Context<ProtocolConfig>,
        entry_fee_bps: u16,
        exit_fee_bps: u16,
    ) -> Result<()> {
        instructions::set_fees::handler_set_protocol_fees(ctx, entry_fee_bps, exit_fee_bps)
    }

    pub fn set_creator_fee_recipient(ctx: Context<CreatorConfig>, recipient: Pubkey) -> Result<()> {
        instructions::set_fee_recipients::handler_set_creator_fee_recipient(ctx, recipient)
    }

    pub fn set_protocol_fee_recipient(
        ctx: Context<ProtocolConfig>,
        recipient: Pubkey,
    ) -> Result<()> {
        instructions::set_fee_recipients::handler_set_protocol_fee_recipient(ctx, recipient)
    }

    pub fn total_assets(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::handler_total_assets(ctx)
    }

    pub fn convert_to_shares(ctx: Context<VaultView>, assets: u64) -> Result<u64> {
        instructions::view::handler_convert_to_shares(ctx, assets)
    }

    pub fn convert_to_assets(ctx: Context<VaultView>, shares: u64) -> Result<u64> {
        instructions::view::handler_convert_to_assets(ctx, shares)
    }

    pub fn preview_deposit(ctx: Context<VaultView>, assets: u64) -> Result<u64> {
        instructions::view::handler_preview_deposit(ctx, assets)
    }

    pub fn preview_mint(ctx: Context<VaultView>, shares: u64) -> Result<u64> {
        instructions::view::handler_preview_mint(ctx, shares)
    }

    pub fn preview_withdraw(ctx: Context<VaultView>, assets: u64) -> Result<u64> {
        instructions::view::handler_preview_withdraw(ctx, assets)
    }

    pub fn preview_redeem(ctx: Context<VaultView>, shares: u64) -> Result<u64> {
        instructions::view::handler_preview_redeem(ctx, shares)
    }

    pub fn max_deposit(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::handler_max_deposit(ctx)
    }

    pub fn max_mint(ctx: Context<VaultView>) -> Result<u64> {
        instructions::view::handler_max_mint(ctx)
    }

    pub fn max_withdraw(ctx: Context<OwnerView>) -> Result<u64> {
        instructions::view::handler_max_withdraw(ctx)
    }

    pub fn max_redeem(ctx: Context<OwnerView>) -> Result<u64> {
        instructions::view::handler_max_redeem(ctx)
    }
}
