//! In-memory share ledger and reserve asset used to drive full
//! deposit/mint/withdraw/redeem flows without a validator.

#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::*;
use fee_vault::{
    accounting::{check_spend, EntrySettlement, ExitSettlement, VaultAccounting},
    constants::UNCAPPED_SUPPLY,
    errors::VaultError,
    ledger::{fee_destination, settle_entry, settle_exit, Payee, VaultLedger},
    state::{FeeCategory, FeeConfig, FeePair},
};

/// Stand-in for the vault authority PDA
pub fn vault_address() -> Pubkey {
    Pubkey::new_from_array([7; 32])
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Receive(u64),
    Send(Payee, u64),
    Mint(u64),
    Burn(u64),
}

#[derive(Default)]
pub struct Bank {
    pub vault_assets: u64,
    pub share_supply: u64,
    pub assets: HashMap<Pubkey, u64>,
    pub shares: HashMap<Pubkey, u64>,
    /// Share account owner -> (delegate, delegated amount)
    pub allowances: HashMap<Pubkey, (Pubkey, u64)>,
    pub log: Vec<Op>,
}

impl Bank {
    pub fn asset_balance(&self, who: &Pubkey) -> u64 {
        self.assets.get(who).copied().unwrap_or(0)
    }

    pub fn share_balance(&self, who: &Pubkey) -> u64 {
        self.shares.get(who).copied().unwrap_or(0)
    }
}

pub struct MemoryLedger<'a> {
    bank: &'a mut Bank,
    /// Asset source on entry, asset destination on exit
    asset_holder: Pubkey,
    /// Share destination on entry, share source on exit
    share_holder: Pubkey,
    protocol_fee_recipient: Option<Pubkey>,
    creator_fee_recipient: Option<Pubkey>,
}

impl VaultLedger for MemoryLedger<'_> {
    fn receive_assets(&mut self, amount: u64) -> Result<()> {
        let balance = self.bank.assets.entry(self.asset_holder).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientFunds)?;
        self.bank.vault_assets += amount;
        self.bank.log.push(Op::Receive(amount));
        Ok(())
    }

    fn send_assets(&mut self, payee: Payee, amount: u64) -> Result<()> {
        let to = match payee {
            Payee::Receiver => Some(self.asset_holder),
            Payee::ProtocolFeeRecipient => self.protocol_fee_recipient,
            Payee::CreatorFeeRecipient => self.creator_fee_recipient,
        };
        let Some(to) = to else {
            return Ok(());
        };
        self.bank.vault_assets = self
            .bank
            .vault_assets
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientFunds)?;
        *self.bank.assets.entry(to).or_default() += amount;
        self.bank.log.push(Op::Send(payee, amount));
        Ok(())
    }

    fn mint_shares(&mut self, amount: u64) -> Result<()> {
        *self.bank.shares.entry(self.share_holder).or_default() += amount;
        self.bank.share_supply += amount;
        self.bank.log.push(Op::Mint(amount));
        Ok(())
    }

    fn burn_shares(&mut self, amount: u64) -> Result<()> {
        let balance = self.bank.shares.entry(self.share_holder).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or(VaultError::InsufficientShares)?;
        self.bank.share_supply -= amount;
        self.bank.log.push(Op::Burn(amount));
        Ok(())
    }
}

/// A vault wired to an in-memory bank, mirroring what the instruction
/// handlers do: snapshot, plan, settle.
pub struct TestVault {
    pub fees: FeeConfig,
    pub max_total_supply: u64,
    pub bank: Bank,
}

impl TestVault {
    pub fn new(vault: FeePair, protocol: FeePair, creator: FeePair) -> Self {
        let fees = FeeConfig::try_new(
            vault,
            protocol,
            creator,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        )
        .unwrap();

        Self {
            fees,
            max_total_supply: UNCAPPED_SUPPLY,
            bank: Bank::default(),
        }
    }

    pub fn without_fees() -> Self {
        Self::new(FeePair::default(), FeePair::default(), FeePair::default())
    }

    pub fn set_rates(&mut self, category: FeeCategory, pair: FeePair) {
        self.fees.set_rates(category, pair).unwrap();
    }

    pub fn accounting(&self) -> VaultAccounting<'_> {
        VaultAccounting::new(
            &self.fees,
            self.max_total_supply,
            self.bank.vault_assets,
            self.bank.share_supply,
        )
    }

    pub fn fund(&mut self, who: Pubkey, amount: u64) {
        *self.bank.assets.entry(who).or_default() += amount;
    }

    /// Sends assets straight to the vault, bypassing deposit
    pub fn donate(&mut self, from: Pubkey, amount: u64) {
        let balance = self.bank.assets.entry(from).or_default();
        *balance -= amount;
        self.bank.vault_assets += amount;
    }

    /// Approves `delegate` to spend `amount` of `owner`'s shares, replacing
    /// any previous approval
    pub fn approve(&mut self, owner: Pubkey, delegate: Pubkey, amount: u64) {
        self.bank.allowances.insert(owner, (delegate, amount));
    }

    pub fn allowance(&self, owner: &Pubkey) -> Option<(Pubkey, u64)> {
        self.bank.allowances.get(owner).copied()
    }

    fn ledger(&mut self, asset_holder: Pubkey, share_holder: Pubkey) -> Result<MemoryLedger<'_>> {
        let vault = vault_address();
        let protocol = self.fees.protocol_fee_recipient;
        let creator = self.fees.creator_fee_recipient;

        Ok(MemoryLedger {
            protocol_fee_recipient: fee_destination(protocol, vault, Some(protocol))?,
            creator_fee_recipient: fee_destination(creator, vault, Some(creator))?,
            bank: &mut self.bank,
            asset_holder,
            share_holder,
        })
    }

    fn check_spend(&self, caller: Pubkey, owner: Pubkey, shares: u64) -> Result<()> {
        let (delegate, delegated_amount) = match self.allowance(&owner) {
            Some((delegate, amount)) => (Some(delegate), amount),
            None => (None, 0),
        };
        check_spend(
            owner,
            caller,
            self.bank.share_balance(&owner),
            delegate,
            delegated_amount,
            shares,
        )
    }

    /// Burning through a delegate consumes its allowance
    fn spend_allowance(&mut self, caller: Pubkey, owner: Pubkey, shares: u64) {
        if caller == owner {
            return;
        }
        if let Some((_, amount)) = self.bank.allowances.get_mut(&owner) {
            *amount -= shares;
        }
    }

    fn settle_exit_as(
        &mut self,
        caller: Pubkey,
        owner: Pubkey,
        receiver: Pubkey,
        settlement: ExitSettlement,
    ) -> Result<ExitSettlement> {
        self.check_spend(caller, owner, settlement.shares)?;
        settle_exit(&mut self.ledger(receiver, owner)?, &settlement)?;
        self.spend_allowance(caller, owner, settlement.shares);
        Ok(settlement)
    }

    pub fn deposit(&mut self, caller: Pubkey, receiver: Pubkey, assets: u64) -> Result<EntrySettlement> {
        let settlement = self.accounting().plan_deposit(assets)?;
        settle_entry(&mut self.ledger(caller, receiver)?, &settlement)?;
        Ok(settlement)
    }

    pub fn mint(&mut self, caller: Pubkey, receiver: Pubkey, shares: u64) -> Result<EntrySettlement> {
        let settlement = self.accounting().plan_mint(shares)?;
        settle_entry(&mut self.ledger(caller, receiver)?, &settlement)?;
        Ok(settlement)
    }

    pub fn withdraw(&mut self, owner: Pubkey, receiver: Pubkey, assets: u64) -> Result<ExitSettlement> {
        self.withdraw_as(owner, owner, receiver, assets)
    }

    pub fn redeem(&mut self, owner: Pubkey, receiver: Pubkey, shares: u64) -> Result<ExitSettlement> {
        self.redeem_as(owner, owner, receiver, shares)
    }

    /// Withdraw signed by `caller`, burning `owner`'s shares
    pub fn withdraw_as(
        &mut self,
        caller: Pubkey,
        owner: Pubkey,
        receiver: Pubkey,
        assets: u64,
    ) -> Result<ExitSettlement> {
        let settlement = self.accounting().plan_withdraw(assets)?;
        self.settle_exit_as(caller, owner, receiver, settlement)
    }

    /// Redeem signed by `caller`, burning `owner`'s shares
    pub fn redeem_as(
        &mut self,
        caller: Pubkey,
        owner: Pubkey,
        receiver: Pubkey,
        shares: u64,
    ) -> Result<ExitSettlement> {
        let settlement = self.accounting().plan_redeem(shares)?;
        self.settle_exit_as(caller, owner, receiver, settlement)
    }

    pub fn protocol_balance(&self) -> u64 {
        self.bank.asset_balance(&self.fees.protocol_fee_recipient)
    }

    pub fn creator_balance(&self) -> u64 {
        self.bank.asset_balance(&self.fees.creator_fee_recipient)
    }
}
