use anchor_lang::prelude::*;

/// Custom error codes for the Fee Vault program
///
/// Token-program failures that slip past the pre-checks below are
/// propagated unchanged.
#[error_code]
pub enum VaultError {
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Entry fee exceeds the limit for its fee category")]
    EntryFeeExceedsLimit,

    #[msg("Exit fee exceeds the limit for its fee category")]
    ExitFeeExceedsLimit,

    #[msg("Fee recipient cannot be the zero address")]
    InvalidFeeRecipient,

    #[msg("Fee account is not owned by the configured fee recipient")]
    FeeAccountMismatch,

    #[msg("Fee account is required when the fee recipient is not the vault")]
    MissingFeeAccount,

    #[msg("Unauthorized - signer lacks the capability for this action")]
    Unauthorized,

    #[msg("Deposit exceeds the maximum allowed for the receiver")]
    DepositExceedsMax,

    #[msg("Mint exceeds the maximum allowed for the receiver")]
    MintExceedsMax,

    #[msg("Insufficient reserve asset balance")]
    InsufficientFunds,

    #[msg("Insufficient share balance")]
    InsufficientShares,

    #[msg("Caller is not the owner and has insufficient share allowance")]
    InsufficientAllowance,

    #[msg("Invalid token mint - does not match vault asset or share mint")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,
}
