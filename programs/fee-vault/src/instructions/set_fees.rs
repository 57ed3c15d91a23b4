use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Creator capability: vault fees, creator fees and the creator fee recipient
#[derive(Accounts)]
pub struct CreatorConfig<'info> {
    pub creator: Signer<'info>,

    /// Security: has_one constraint validates the creator from state
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref(), vault_state.creator.as_ref()],
        bump = vault_state.bump,
        has_one = creator @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,
}

/// Protocol capability: protocol fees and the protocol fee recipient
#[derive(Accounts)]
pub struct ProtocolConfig<'info> {
    pub protocol_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref(), vault_state.creator.as_ref()],
        bump = vault_state.bump,
        has_one = protocol_authority @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn handler_set_vault_fees(
    ctx: Context<CreatorConfig>,
    entry_fee_bps: u16,
    exit_fee_bps: u16,
) -> Result<()> {
    let signer = ctx.accounts.creator.key();
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.update_rates(
        signer,
        FeeCategory::Vault,
        FeePair::new(entry_fee_bps, exit_fee_bps),
    )?;

    emit!(VaultFeesUpdated {
        vault: vault_state.key(),
        entry_fee_bps,
        exit_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn handler_set_creator_fees(
    ctx: Context<CreatorConfig>,
    entry_fee_bps: u16,
    exit_fee_bps: u16,
) -> Result<()> {
    let signer = ctx.accounts.creator.key();
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.update_rates(
        signer,
        FeeCategory::Creator,
        FeePair::new(entry_fee_bps, exit_fee_bps),
    )?;

    emit!(CreatorFeesUpdated {
        vault: vault_state.key(),
        entry_fee_bps,
        exit_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn handler_set_protocol_fees(
    ctx: Context<ProtocolConfig>,
    entry_fee_bps: u16,
    exit_fee_bps: u16,
) -> Result<()> {
    let signer = ctx.accounts.protocol_authority.key();
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.update_rates(
        signer,
        FeeCategory::Protocol,
        FeePair::new(entry_fee_bps, exit_fee_bps),
    )?;

    emit!(ProtocolFeesUpdated {
        vault: vault_state.key(),
        entry_fee_bps,
        exit_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
