use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    accounting::{check_spend, ExitSettlement, VaultAccounting},
    constants::*,
    errors::*,
    events::*,
    ledger::{fee_destination, settle_exit, SplLedger},
    state::*,
};

/// Accounts shared by `withdraw` and `redeem`
///
/// The owner is whoever owns `owner_share_account`. A caller other than
/// the owner must be the account's SPL delegate with enough allowance.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Owner of the shares, or their approved delegate
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

    /// Shares are burned from here
    #[account(
        mut,
        constraint = owner_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
    )]
    pub owner_share_account: Account<'info, TokenAccount>,

    /// Net assets are sent here; its owner is the receiver
    #[account(
        mut,
        constraint = receiver_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub receiver_asset_account: Account<'info, TokenAccount>,

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

impl<'info> Withdraw<'info> {
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
            share_account: self.owner_share_account.to_account_info(),
            asset_account: self.receiver_asset_account.to_account_info(),
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

    fn settle(&self, settlement: &ExitSettlement) -> Result<()> {
        let account = &self.owner_share_account;
        check_spend(
            account.owner,
            self.caller.key(),
            account.amount,
            account.delegate.into(),
            account.delegated_amount,
            settlement.shares,
        )?;

        settle_exit(&mut self.ledger()?, settlement)?;

        msg!(
            "Withdrew {} assets for {} shares (fees: vault {}, protocol {}, creator {})",
            settlement.assets,
            settlement.shares,
            settlement.vault_fee,
            settlement.protocol_fee,
            settlement.creator_fee
        );

        emit!(Withdrawn {
            vault: self.vault_state.key(),
            caller: self.caller.key(),
            receiver: self.receiver_asset_account.owner,
            owner: self.owner_share_account.owner,
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

/// Withdraw exactly `assets` net of exit fees, burning the shares they cost
pub fn handler_withdraw(ctx: Context<Withdraw>, assets: u64) -> Result<()> {
    let settlement = ctx.accounts.accounting().plan_withdraw(assets)?;
    ctx.accounts.settle(&settlement)
}

/// Redeem exactly `shares` for their value net of exit fees
pub fn handler_redeem(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let settlement = ctx.accounts.accounting().plan_redeem(shares)?;
    ctx.accounts.settle(&settlement)
}
