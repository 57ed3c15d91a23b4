use anchor_lang::prelude::*;

use crate::{events::*, instructions::set_fees::*, state::Capability};

pub fn handler_set_creator_fee_recipient(
    ctx: Context<CreatorConfig>,
    recipient: Pubkey,
) -> Result<()> {
    let signer = ctx.accounts.creator.key();
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.update_fee_recipient(signer, Capability::Creator, recipient)?;

    msg!("Creator fee recipient set to {}", recipient);

    emit!(CreatorFeeRecipientUpdated {
        vault: vault_state.key(),
        recipient,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn handler_set_protocol_fee_recipient(
    ctx: Context<ProtocolConfig>,
    recipient: Pubkey,
) -> Result<()> {
    let signer = ctx.accounts.protocol_authority.key();
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.update_fee_recipient(signer, Capability::Protocol, recipient)?;

    msg!("Protocol fee recipient set to {}", recipient);

    emit!(ProtocolFeeRecipientUpdated {
        vault: vault_state.key(),
        recipient,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
