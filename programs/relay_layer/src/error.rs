use anchor_lang::prelude::*;

#[error_code]
pub enum RelayLayerError {
    // Authorization
    #[msg("Caller is not the admin")]
    NotFromAdmin,
    #[msg("Caller is not the executor derived for this message")]
    NotFromExecutor,
    #[msg("Caller is not the attester")]
    NotFromAttester,
    #[msg("Caller is not the pending admin")]
    NotFromNewAdmin,

    // Lifecycle
    #[msg("New admin address is none")]
    NewAdminAddressIsNone,
    #[msg("Protocol fee supply is zero")]
    ZeroFeeSupply,

    // Resources
    #[msg("Attached value does not cover the required amount")]
    NotEnoughSol,
    #[msg("Relay layer balance does not cover the unlocked amount")]
    InsufficientBalance,
    #[msg("Declared protocol fee is below the configured rates")]
    NotEnoughProtocolFee,

    // Staleness and consistency
    #[msg("Invalid proof")]
    InvalidProof,
    #[msg("Voting is not active")]
    VotingNotActive,
    #[msg("Message collect end time is lower than the current one")]
    MessageCollectEndTimeTooLow,
    #[msg("Response account does not match the response address")]
    InvalidResponseAddress,
    #[msg("Destination accounts do not match the message entries")]
    InvalidDestinationAccounts,
    #[msg("Destination is not the address derived from its state init")]
    InvalidStateInit,
    #[msg("Executor fee accounts do not match the message")]
    InvalidExecutorFeeAccounts,

    // Parameters
    #[msg("Max roots size must be between 1 and the root store capacity")]
    InvalidMaxRootsSize,
    #[msg("Epoch delay must not be negative")]
    InvalidEpochDelay,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
