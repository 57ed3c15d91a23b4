use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, events::*, state::*};

/// Initial configuration supplied by the vault creator
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeVaultArgs {
    pub vault_fees: FeePair,
    pub protocol_fees: FeePair,
    pub creator_fees: FeePair,
    pub protocol_fee_recipient: Pubkey,
    pub creator_fee_recipient: Pubkey,
    /// Holder of the protocol capability
    pub protocol_authority: Pubkey,
    /// Share supply cap, `UNCAPPED_SUPPLY` for none
    pub max_total_supply: u64,
}

/// Initialize a new vault for a given asset token
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Vault creator - holds the creator capability
    /// Security: Must be signer, stored in state
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Vault state PDA, one per (asset mint, creator)
    #[account(
        init,
        payer = creator,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_SEED, asset_mint.key().as_ref(), creator.key().as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Asset token mint (the underlying token users deposit)
    pub asset_mint: Account<'info, Mint>,

    /// Share token mint PDA
    /// Shares carry DECIMALS_OFFSET more decimals than the asset
    #[account(
        init,
        payer = creator,
        seeds = [SHARE_MINT_SEED, vault_state.key().as_ref()],
        bump,
        mint::decimals = asset_mint.decimals + DECIMALS_OFFSET,
        mint::authority = vault_authority,
    )]
    pub share_mint: Account<'info, Mint>,

    /// CHECK: PDA used as mint authority and vault token owner, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account for holding assets
    #[account(
        init,
        payer = creator,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, args: InitializeVaultArgs) -> Result<()> {
    // CHECKS: initial rates and recipients follow the setter rules
    let fees = FeeConfig::try_new(
        args.vault_fees,
        args.protocol_fees,
        args.creator_fees,
        args.protocol_fee_recipient,
        args.creator_fee_recipient,
    )?;

    let vault_state = &mut ctx.accounts.vault_state;

    // EFFECTS: Initialize vault state
    vault_state.creator = ctx.accounts.creator.key();
    vault_state.protocol_authority = args.protocol_authority;
    vault_state.asset_mint = ctx.accounts.asset_mint.key();
    vault_state.share_mint = ctx.accounts.share_mint.key();
    vault_state.fees = fees;
    vault_state.max_total_supply = args.max_total_supply;
    vault_state.bump = ctx.bumps.vault_state;
    vault_state.share_bump = ctx.bumps.share_mint;
    vault_state.authority_bump = ctx.bumps.vault_authority;
    vault_state._reserved = [0; 64];

    emit!(VaultInitialized {
        vault: vault_state.key(),
        creator: vault_state.creator,
        protocol_authority: vault_state.protocol_authority,
        asset_mint: vault_state.asset_mint,
        share_mint: vault_state.share_mint,
        max_total_supply: vault_state.max_total_supply,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
