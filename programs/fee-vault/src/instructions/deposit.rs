use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    accounting::{EntrySettlement, VaultAccounting},
    constants::*,
    errors::*,
    events::*,
    ledger::{fee_destination, settle_entry, SplLedger},
    state::*,
};

/// Accounts shared by `deposit` and `mint`
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Caller must sign the asset transfer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state and authority PDAs validated with seeds
/// ✅ 6. MATH SAFETY: Checked conversion and fee math
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Mints, owners and fee recipients checked
/// ✅ 8. BUSINESS LOGIC: Shares minted before fees are disbursed
/// ✅ 10. EVENTS: Emits Deposited event
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// Pays the assets
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref(), vault_state.creator.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    #[account(address = vault_state.asset_mint)]
    pub asset_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = vault_state.share_mint,
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Caller's asset token account (source)
    #[account(
        mut,
        constraint = caller_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = caller_asset_account.owner == caller.key() @ VaultError::InvalidOwner,
    )]
    pub caller_asset_account: Account<'info, TokenAccount>,

    /// Receiver's share token account (destination); its owner is the receiver
    #[account(
        mut,
        constraint = receiver_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
    )]
    pub receiver_share_account: Account<'info, TokenAccount>,

    /// Vault's token account. Its balance is the vault's total assets.
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Omitted when the protocol fee recipient is the vault authority
    #[account(
        mut,
        constraint = protocol_fee_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = protocol_fee_account.owner == vault_state.fees.protocol_fee_recipient @ VaultError::FeeAccountMismatch,
    )]
    pub protocol_fee_account: Option<Account<'info, TokenAccount>>,

    /// Omitted when the creator fee recipient is the vault authority
    #[account(
        mut,
        constraint = creator_fee_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = creator_fee_account.owner == vault_state.fees.creator_fee_recipient @ VaultError::FeeAccountMismatch,
    )]
    pub creator_fee_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Deposit<'info> {
    fn accounting(&self) -> VaultAccounting<'_> {
        self.vault_state
            .accounting(self.vault_token_account.amount, self.share_mint.supply)
    }

    fn ledger(&self) -> Result<SplLedger<'info>> {
        let vault_authority = self.vault_authority.key();
        let fees = &self.vault_state.fees;

        Ok(SplLedger {
            token_program: self.token_program.to_account_info(),
            caller: self.caller.to_account_info(),
            vault: self.vault_state.key(),
            authority_bump: self.vault_state.authority_bump,
            vault_authority: self.vault_authority.to_account_info(),
            vault_token_account: self.vault_token_account.to_account_info(),
            share_mint: self.share_mint.to_account_info(),
            share_account: self.receiver_share_account.to_account_info(),
            asset_account: self.caller_asset_account.to_account_info(),
            protocol_fee_account: fee_destination(
                fees.protocol_fee_recipient,
                vault_authority,
                self.protocol_fee_account.as_ref().map(|a| a.to_account_info()),
            )?,
            creator_fee_account: fee_destination(
                fees.creator_fee_recipient,
                vault_authority,
                self.creator_fee_account.as_ref().map(|a| a.to_account_info()),
            )?,
        })
    }

    fn settle(&self, settlement: &EntrySettlement) -> Result<()> {
        require_gte!(
            self.caller_asset_account.amount,
            settlement.assets,
            VaultError::InsufficientFunds
        );

        settle_entry(&mut self.ledger()?, settlement)?;

        msg!(
            "Deposited {} assets for {} shares (fees: vault {}, protocol {}, creator {})",
            settlement.assets,
            settlement.shares,
            settlement.vault_fee,
            settlement.protocol_fee,
            settlement.creator_fee
        );

        emit!(Deposited {
            vault: self.vault_state.key(),
            caller: self.caller.key(),
            owner: self.receiver_share_account.owner,
            assets: settlement.assets,
            shares: settlement.shares,
            vault_fee: settlement.vault_fee,
            protocol_fee: settlement.protocol_fee,
            creator_fee: settlement.creator_fee,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}

/// Deposit exactly `assets` (fees included) and mint the resulting shares
pub fn handler_deposit(ctx: Context<Deposit>, assets: u64) -> Result<()> {
    let settlement = ctx.accounts.accounting().plan_deposit(assets)?;
    ctx.accounts.settle(&settlement)
}

/// Mint exactly `shares`, pulling whatever assets (fees included) they cost
pub fn handler_mint(ctx: Context<Deposit>, shares: u64) -> Result<()> {
    let settlement = ctx.accounts.accounting().plan_mint(shares)?;
    ctx.accounts.settle(&settlement)
}
