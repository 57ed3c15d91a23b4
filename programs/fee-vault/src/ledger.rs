//! Token movements behind a deposit, mint, withdraw or redeem.
//!
//! The accounting engine never touches token accounts. It hands a
//! settlement to a [`VaultLedger`], which on-chain is [`SplLedger`]
//! (SPL token CPIs signed by the vault authority PDA).
//!
//! Ordering: the caller/vault/share movements settle first and fee
//! disbursement runs last, so anything observing the vault from a fee
//! transfer sees settled balances. Atomicity comes from the runtime:
//! a failed CPI aborts the whole instruction.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, MintTo, Transfer};

use crate::{
    accounting::{EntrySettlement, ExitSettlement},
    constants::VAULT_AUTHORITY_SEED,
    errors::VaultError,
};

/// Destination of assets leaving the vault
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payee {
    Receiver,
    ProtocolFeeRecipient,
    CreatorFeeRecipient,
}

/// Share ledger and reserve asset operations the vault depends on
pub trait VaultLedger {
    /// Moves `amount` reserve assets from the caller into the vault
    fn receive_assets(&mut self, amount: u64) -> Result<()>;

    /// Moves `amount` reserve assets from the vault to `payee`
    fn send_assets(&mut self, payee: Payee, amount: u64) -> Result<()>;

    /// Mints shares to the receiver
    fn mint_shares(&mut self, amount: u64) -> Result<()>;

    /// Burns shares from the owner
    fn burn_shares(&mut self, amount: u64) -> Result<()>;
}

/// Executes a deposit or mint: pull assets, mint shares, then pay fees.
pub fn settle_entry<L: VaultLedger>(ledger: &mut L, settlement: &EntrySettlement) -> Result<()> {
    ledger.receive_assets(settlement.assets)?;
    ledger.mint_shares(settlement.shares)?;
    pay_fees(ledger, settlement.protocol_fee, settlement.creator_fee)
}

/// Executes a withdraw or redeem: burn shares, pay the receiver, then pay fees.
pub fn settle_exit<L: VaultLedger>(ledger: &mut L, settlement: &ExitSettlement) -> Result<()> {
    ledger.burn_shares(settlement.shares)?;
    ledger.send_assets(Payee::Receiver, settlement.assets)?;
    pay_fees(ledger, settlement.protocol_fee, settlement.creator_fee)
}

fn pay_fees<L: VaultLedger>(ledger: &mut L, protocol_fee: u64, creator_fee: u64) -> Result<()> {
    if protocol_fee > 0 {
        ledger.send_assets(Payee::ProtocolFeeRecipient, protocol_fee)?;
    }
    if creator_fee > 0 {
        ledger.send_assets(Payee::CreatorFeeRecipient, creator_fee)?;
    }
    Ok(())
}

/// Where a fee portion is paid. `None` when the recipient is the vault
/// authority itself, so the portion stays in the vault and no account is
/// needed; otherwise the supplied account is required.
pub fn fee_destination<T>(
    recipient: Pubkey,
    vault_authority: Pubkey,
    account: Option<T>,
) -> Result<Option<T>> {
    if recipient == vault_authority {
        return Ok(None);
    }
    account
        .map(Some)
        .ok_or(error!(VaultError::MissingFeeAccount))
}

/// [`VaultLedger`] over SPL token accounts
pub struct SplLedger<'info> {
    pub token_program: AccountInfo<'info>,
    /// Signs asset pulls and share burns
    pub caller: AccountInfo<'info>,
    pub vault: Pubkey,
    pub authority_bump: u8,
    pub vault_authority: AccountInfo<'info>,
    pub vault_token_account: AccountInfo<'info>,
    pub share_mint: AccountInfo<'info>,
    /// Receiver's share account on entry, owner's on exit
    pub share_account: AccountInfo<'info>,
    /// Caller's asset account on entry, receiver's on exit
    pub asset_account: AccountInfo<'info>,
    /// `None` when the recipient is the vault itself; the fee then stays put
    pub protocol_fee_account: Option<AccountInfo<'info>>,
    pub creator_fee_account: Option<AccountInfo<'info>>,
}

impl<'info> VaultLedger for SplLedger<'info> {
    fn receive_assets(&mut self, amount: u64) -> Result<()> {
        let transfer_ctx = CpiContext::new(
            self.token_program.clone(),
            Transfer {
                from: self.asset_account.clone(),
                to: self.vault_token_account.clone(),
                authority: self.caller.clone(),
            },
        );
        token::transfer(transfer_ctx, amount)
    }

    fn send_assets(&mut self, payee: Payee, amount: u64) -> Result<()> {
        let destination = match payee {
            Payee::Receiver => self.asset_account.clone(),
            Payee::ProtocolFeeRecipient => match &self.protocol_fee_account {
                Some(account) => account.clone(),
                None => return Ok(()),
            },
            Payee::CreatorFeeRecipient => match &self.creator_fee_account {
                Some(account) => account.clone(),
                None => return Ok(()),
            },
        };

        let bump = [self.authority_bump];
        let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, self.vault.as_ref(), &bump];
        let signer_seeds = &[authority_seeds];

        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            Transfer {
                from: self.vault_token_account.clone(),
                to: destination,
                authority: self.vault_authority.clone(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, amount)
    }

    fn mint_shares(&mut self, amount: u64) -> Result<()> {
        let bump = [self.authority_bump];
        let authority_seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, self.vault.as_ref(), &bump];
        let signer_seeds = &[authority_seeds];

        let mint_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            MintTo {
                mint: self.share_mint.clone(),
                to: self.share_account.clone(),
                authority: self.vault_authority.clone(),
            },
            signer_seeds,
        );
        token::mint_to(mint_ctx, amount)
    }

    fn burn_shares(&mut self, amount: u64) -> Result<()> {
        // Caller is the owner or an approved delegate of the share account
        let burn_ctx = CpiContext::new(
            self.token_program.clone(),
            Burn {
                mint: self.share_mint.clone(),
                from: self.share_account.clone(),
                authority: self.caller.clone(),
            },
        );
        token::burn(burn_ctx, amount)
    }
}
