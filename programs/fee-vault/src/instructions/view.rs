use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::{
    accounting::VaultAccounting, constants::*, errors::*, math::Rounding, state::*,
};

/// Read-only accounts for previews and conversions. Nothing is mutated.
#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref(), vault_state.creator.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    #[account(address = vault_state.asset_mint)]
    pub asset_mint: Account<'info, Mint>,

    #[account(address = vault_state.share_mint)]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: PDA owning the vault token account, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,
}

impl<'info> VaultView<'info> {
    pub fn accounting(&self) -> VaultAccounting<'_> {
        self.vault_state
            .accounting(self.vault_token_account.amount, self.share_mint.supply)
    }
}

/// Vault view plus one share holder's account
#[derive(Accounts)]
pub struct OwnerView<'info> {
    pub view: VaultView<'info>,

    #[account(
        constraint = owner_share_account.mint == view.vault_state.share_mint @ VaultError::InvalidMint,
    )]
    pub owner_share_account: Account<'info, TokenAccount>,
}

pub fn handler_total_assets(ctx: Context<VaultView>) -> Result<u64> {
    Ok(ctx.accounts.vault_token_account.amount)
}

pub fn handler_convert_to_shares(ctx: Context<VaultView>, assets: u64) -> Result<u64> {
    ctx.accounts.accounting().convert_to_shares(assets, Rounding::Floor)
}

pub fn handler_convert_to_assets(ctx: Context<VaultView>, shares: u64) -> Result<u64> {
    ctx.accounts.accounting().convert_to_assets(shares, Rounding::Floor)
}

pub fn handler_preview_deposit(ctx: Context<VaultView>, assets: u64) -> Result<u64> {
    ctx.accounts.accounting().preview_deposit(assets)
}

pub fn handler_preview_mint(ctx: Context<VaultView>, shares: u64) -> Result<u64> {
    ctx.accounts.accounting().preview_mint(shares)
}

pub fn handler_preview_withdraw(ctx: Context<VaultView>, assets: u64) -> Result<u64> {
    ctx.accounts.accounting().preview_withdraw(assets)
}

pub fn handler_preview_redeem(ctx: Context<VaultView>, shares: u64) -> Result<u64> {
    ctx.accounts.accounting().preview_redeem(shares)
}

pub fn handler_max_deposit(ctx: Context<VaultView>) -> Result<u64> {
    ctx.accounts.accounting().max_deposit()
}

pub fn handler_max_mint(ctx: Context<VaultView>) -> Result<u64> {
    Ok(ctx.accounts.accounting().max_mint())
}

pub fn handler_max_withdraw(ctx: Context<OwnerView>) -> Result<u64> {
    let owner_shares = ctx.accounts.owner_share_account.amount;
    ctx.accounts.view.accounting().max_withdraw(owner_shares)
}

pub fn handler_max_redeem(ctx: Context<OwnerView>) -> Result<u64> {
    let owner_shares = ctx.accounts.owner_share_account.amount;
    Ok(ctx.accounts.view.accounting().max_redeem(owner_shares))
}
