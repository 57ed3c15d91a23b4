//! Share/asset conversion and fee composition.
//!
//! Everything here is a pure function of one snapshot: the fee
//! configuration, the supply cap, the vault's asset balance and the share
//! supply. Instruction handlers take the snapshot before moving any tokens.
//!
//! ## Rounding (always against the user)
//!
//! | Operation | Convert         | Rounding | Fee          |
//! |-----------|-----------------|----------|--------------|
//! | Deposit   | assets → shares | DOWN     | on total     |
//! | Mint      | shares → assets | UP       | on raw       |
//! | Withdraw  | assets → shares | UP       | on raw       |
//! | Redeem    | shares → assets | DOWN     | on total     |

use anchor_lang::prelude::*;

use crate::{
    constants::{DECIMALS_OFFSET, UNCAPPED_SUPPLY},
    errors::VaultError,
    math::{fee_on_raw, fee_on_total, fee_portion_of_total, mul_div, Rounding},
    state::FeeConfig,
};

/// Asset movement and share change for a deposit or mint.
///
/// `assets` is the gross amount pulled from the caller. Only the
/// protocol and creator portions leave the vault. The vault portion stays
/// behind and raises the exchange rate for every shareholder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntrySettlement {
    pub assets: u64,
    pub shares: u64,
    pub vault_fee: u64,
    pub protocol_fee: u64,
    pub creator_fee: u64,
}

/// Asset movement and share change for a withdraw or redeem.
///
/// `assets` is the net amount sent to the receiver. The fee portions are
/// paid on top, out of the value of the burned shares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExitSettlement {
    pub assets: u64,
    pub shares: u64,
    pub vault_fee: u64,
    pub protocol_fee: u64,
    pub creator_fee: u64,
}

/// Conversion and fee engine over a single vault snapshot.
#[derive(Clone, Copy, Debug)]
pub struct VaultAccounting<'a> {
    pub fees: &'a FeeConfig,
    pub max_total_supply: u64,
    pub total_assets: u64,
    pub total_shares: u64,
}

impl<'a> VaultAccounting<'a> {
    pub fn new(
        fees: &'a FeeConfig,
        max_total_supply: u64,
        total_assets: u64,
        total_shares: u64,
    ) -> Self {
        Self {
            fees,
            max_total_supply,
            total_assets,
            total_shares,
        }
    }

    fn virtual_shares(&self) -> u128 {
        self.total_shares as u128 + 10u128.pow(DECIMALS_OFFSET as u32)
    }

    fn virtual_assets(&self) -> u128 {
        self.total_assets as u128 + 1
    }

    /// shares = assets * (totalShares + 10^offset) / (totalAssets + 1)
    pub fn convert_to_shares(&self, assets: u64, rounding: Rounding) -> Result<u64> {
        mul_div(assets, self.virtual_shares(), self.virtual_assets(), rounding)
    }

    /// assets = shares * (totalAssets + 1) / (totalShares + 10^offset)
    pub fn convert_to_assets(&self, shares: u64, rounding: Rounding) -> Result<u64> {
        mul_div(shares, self.virtual_assets(), self.virtual_shares(), rounding)
    }

    /// Shares minted for depositing `assets` (fees included)
    pub fn preview_deposit(&self, assets: u64) -> Result<u64> {
        let fee = fee_on_total(assets, self.fees.total_entry_bps())?;
        let net = assets.checked_sub(fee).ok_or(error!(VaultError::MathOverflow))?;
        self.convert_to_shares(net, Rounding::Floor)
    }

    /// Gross assets required to mint exactly `shares`
    pub fn preview_mint(&self, shares: u64) -> Result<u64> {
        let net = self.convert_to_assets(shares, Rounding::Ceil)?;
        let fee = fee_on_raw(net, self.fees.total_entry_bps())?;
        net.checked_add(fee).ok_or(error!(VaultError::MathOverflow))
    }

    /// Shares burned to withdraw exactly `assets` net of fees
    pub fn preview_withdraw(&self, assets: u64) -> Result<u64> {
        let fee = fee_on_raw(assets, self.fees.total_exit_bps())?;
        let gross = assets.checked_add(fee).ok_or(error!(VaultError::MathOverflow))?;
        self.convert_to_shares(gross, Rounding::Ceil)
    }

    /// Net assets returned for redeeming `shares`
    pub fn preview_redeem(&self, shares: u64) -> Result<u64> {
        let gross = self.convert_to_assets(shares, Rounding::Floor)?;
        let fee = fee_on_total(gross, self.fees.total_exit_bps())?;
        gross.checked_sub(fee).ok_or(error!(VaultError::MathOverflow))
    }

    /// Shares that can still be minted before hitting the supply cap
    pub fn max_mint(&self) -> u64 {
        if self.max_total_supply == UNCAPPED_SUPPLY {
            return u64::MAX;
        }
        self.max_total_supply.saturating_sub(self.total_shares)
    }

    /// Largest gross deposit whose minted shares stay within `max_mint`.
    ///
    /// Saturates at `u64::MAX` when the remaining mint room is worth more
    /// assets than a `u64` holds; every representable deposit then fits.
    pub fn max_deposit(&self) -> Result<u64> {
        if self.max_total_supply == UNCAPPED_SUPPLY {
            return Ok(u64::MAX);
        }
        let Ok(net) = self.convert_to_assets(self.max_mint(), Rounding::Floor) else {
            return Ok(u64::MAX);
        };
        let fee = fee_on_raw(net, self.fees.total_entry_bps())?;
        Ok(net.saturating_add(fee))
    }

    /// Full redeemable value of `owner_shares`, net of exit fees
    pub fn max_withdraw(&self, owner_shares: u64) -> Result<u64> {
        self.preview_redeem(owner_shares)
    }

    pub fn max_redeem(&self, owner_shares: u64) -> u64 {
        owner_shares
    }

    /// Settlement for depositing `assets`
    pub fn plan_deposit(&self, assets: u64) -> Result<EntrySettlement> {
        require!(assets > 0, VaultError::ZeroAmount);
        let max_assets = self.max_deposit()?;
        require_gte!(max_assets, assets, VaultError::DepositExceedsMax);

        let shares = self.preview_deposit(assets)?;
        let fee = fee_on_total(assets, self.fees.total_entry_bps())?;
        self.entry_settlement(assets, shares, fee)
    }

    /// Settlement for minting `shares`
    pub fn plan_mint(&self, shares: u64) -> Result<EntrySettlement> {
        require!(shares > 0, VaultError::ZeroAmount);
        let max_shares = self.max_mint();
        require_gte!(max_shares, shares, VaultError::MintExceedsMax);

        let assets = self.preview_mint(shares)?;
        let net = self.convert_to_assets(shares, Rounding::Ceil)?;
        let fee = assets.checked_sub(net).ok_or(error!(VaultError::MathOverflow))?;
        self.entry_settlement(assets, shares, fee)
    }

    /// Settlement for withdrawing `assets` net of fees
    pub fn plan_withdraw(&self, assets: u64) -> Result<ExitSettlement> {
        require!(assets > 0, VaultError::ZeroAmount);
        let shares = self.preview_withdraw(assets)?;
        let fee = fee_on_raw(assets, self.fees.total_exit_bps())?;
        self.exit_settlement(assets, shares, fee)
    }

    /// Settlement for redeeming `shares`
    pub fn plan_redeem(&self, shares: u64) -> Result<ExitSettlement> {
        require!(shares > 0, VaultError::ZeroAmount);
        let assets = self.preview_redeem(shares)?;
        let gross = self.convert_to_assets(shares, Rounding::Floor)?;
        let fee = gross.checked_sub(assets).ok_or(error!(VaultError::MathOverflow))?;
        self.exit_settlement(assets, shares, fee)
    }

    /// Splits the combined entry fee. Each transferred portion is computed
    /// independently from the gross amount; the vault keeps the remainder.
    ///
    /// Portions are taken over the combined `Σentry + BASIS` denominator,
    /// not each category's own `r_i + BASIS`. The two agree whenever a
    /// single category charges; with several, the per-rate form would sum
    /// past the combined fee.
    fn entry_settlement(&self, assets: u64, shares: u64, fee: u64) -> Result<EntrySettlement> {
        let total_bps = self.fees.total_entry_bps();
        let protocol = fee_portion_of_total(assets, self.fees.protocol.entry_bps as u32, total_bps)?;
        let creator = fee_portion_of_total(assets, self.fees.creator.entry_bps as u32, total_bps)?;
        let (vault_fee, protocol_fee, creator_fee) = apportion(fee, protocol, creator);

        Ok(EntrySettlement {
            assets,
            shares,
            vault_fee,
            protocol_fee,
            creator_fee,
        })
    }

    /// Splits the combined exit fee. Each transferred portion is the fee on
    /// the net assets at that category's own rate.
    fn exit_settlement(&self, assets: u64, shares: u64, fee: u64) -> Result<ExitSettlement> {
        let protocol = fee_on_raw(assets, self.fees.protocol.exit_bps as u32)?;
        let creator = fee_on_raw(assets, self.fees.creator.exit_bps as u32)?;
        let (vault_fee, protocol_fee, creator_fee) = apportion(fee, protocol, creator);

        Ok(ExitSettlement {
            assets,
            shares,
            vault_fee,
            protocol_fee,
            creator_fee,
        })
    }
}

/// Authorizes `caller` to burn `shares` from an account owned by `owner`.
///
/// A caller other than the owner must be the account's delegate with at
/// least `shares` of delegated allowance left.
pub fn check_spend(
    owner: Pubkey,
    caller: Pubkey,
    balance: u64,
    delegate: Option<Pubkey>,
    delegated_amount: u64,
    shares: u64,
) -> Result<()> {
    require_gte!(balance, shares, VaultError::InsufficientShares);

    if owner != caller {
        require!(
            delegate == Some(caller) && delegated_amount >= shares,
            VaultError::InsufficientAllowance
        );
    }
    Ok(())
}

/// Caps the transferred portions at the combined fee so that rounding in
/// the recipients' favor is never paid out of other shareholders' assets.
/// Returns `(vault, protocol, creator)`, summing exactly to `fee`.
fn apportion(fee: u64, protocol: u64, creator: u64) -> (u64, u64, u64) {
    let protocol = protocol.min(fee);
    let creator = creator.min(fee - protocol);
    (fee - protocol - creator, protocol, creator)
}
