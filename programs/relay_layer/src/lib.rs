#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use common::{MerkleProof, Message};

pub mod constants;
pub mod error;
pub mod instructions;
pub mod internal;
pub mod state;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{EpochInfo, FeeData, ProcessingCosts, RelayLayer};

declare_id!("CVXw1QkDkSC9QQBHVku8tsvzXmfrZC8GGVvms3CmicBk");

#[program]
pub mod relay_layer {
    use super::*;

    // Common

    /// Initializes the relay layer with its configuration and funds the SOL vault.
    /// Must be called once during deployment.
    ///
    /// # Arguments
    /// * `ctx`              - The context containing all accounts needed for initialization
    /// * `attester`         - The sequencer multisig submitting roots and collecting protocol fees
    /// * `executor_program` - The program Executors are derived from
    /// * `epoch_delay`      - Minimum number of seconds between two root updates
    /// * `max_roots_size`   - Number of epochs a root stays valid for
    /// * `tac_protocol_fee` - Protocol fee for the TAC leg of a message, in lamports
    /// * `sol_protocol_fee` - Protocol fee for the Solana leg of a message, in lamports
    /// * `processing_costs` - Lamports retained by the vault per message, entry and fee deposit
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        ctx: Context<Initialize>,
        attester: Pubkey,
        executor_program: Pubkey,
        epoch_delay: i64,
        max_roots_size: u8,
        tac_protocol_fee: u64,
        sol_protocol_fee: u64,
        processing_costs: ProcessingCosts,
    ) -> Result<()> {
        initialize_handler(
            ctx,
            attester,
            executor_program,
            epoch_delay,
            max_roots_size,
            tac_protocol_fee,
            sol_protocol_fee,
            processing_costs,
        )
    }

    // TAC -> Solana

    /// Stores a new sequencer-attested Merkle root of TAC batches and opens a new epoch.
    ///
    /// # Arguments
    /// * `ctx`                      - The context containing the relay layer and the attester
    /// * `query_id`                 - Identifier echoed in the emitted event
    /// * `merkle_root`              - Root of the batches collected until `message_collect_end_time`
    /// * `message_collect_end_time` - End of the TAC collection window covered by the root
    pub fn update_merkle_root(
        ctx: Context<UpdateMerkleRoot>,
        query_id: u64,
        merkle_root: [u8; 32],
        message_collect_end_time: i64,
    ) -> Result<()> {
        update_merkle_root_handler(ctx, query_id, merkle_root, message_collect_end_time)
    }

    /// Delivers a batch proven against a stored root. Only callable by the Executor
    /// derived for the batch, which signs through the executor program.
    ///
    /// # Arguments
    /// * `ctx`              - The context; remaining accounts carry the entry destinations
    /// * `query_id`         - Identifier echoed in the emitted event
    /// * `message`          - The batch to deliver
    /// * `proof`            - Inclusion proof of the batch hash
    /// * `fee_to`           - Beneficiary of the executor fee
    /// * `response_address` - Receiver of the excess value, if any
    /// * `msg_value`        - Lamports the relayer attaches to the delivery
    #[allow(clippy::too_many_arguments)]
    pub fn executor_forward<'info>(
        ctx: Context<'_, '_, 'info, 'info, ExecutorForward<'info>>,
        query_id: u64,
        message: Message,
        proof: MerkleProof,
        fee_to: Pubkey,
        response_address: Option<Pubkey>,
        msg_value: u64,
    ) -> Result<ForwardOutcome> {
        executor_forward_handler(
            ctx,
            query_id,
            message,
            proof,
            fee_to,
            response_address,
            msg_value,
        )
    }

    /// Records that an Executor could not deliver its batch.
    ///
    /// # Arguments
    /// * `ctx`          - The context containing the Executor and the relay layer
    /// * `query_id`     - Identifier echoed in the emitted event
    /// * `message_hash` - Hash of the undelivered batch
    /// * `error_code`   - Code of the rejection reason
    pub fn error_notification(
        ctx: Context<ErrorNotification>,
        query_id: u64,
        message_hash: [u8; 32],
        error_code: u32,
    ) -> Result<()> {
        error_notification_handler(ctx, query_id, message_hash, error_code)
    }

    // Solana -> TAC

    /// Hands a message to the sequencer, locking its value and fees in the SOL vault.
    ///
    /// # Arguments
    /// * `ctx`                - The context containing the sender and the relay layer
    /// * `query_id`           - Identifier echoed in the emitted event
    /// * `operation_type`     - Kind of cross-chain operation, carried unchanged
    /// * `cross_chain_amount` - Lamports bridged to TAC
    /// * `fee_data`           - Fees paid for the TAC leg and, on round trips, the way back
    /// * `payload`            - Opaque message body for TAC
    /// * `response_address`   - Receiver of the excess value, defaults to the sender
    /// * `msg_value`          - Lamports the sender attaches
    #[allow(clippy::too_many_arguments)]
    pub fn send_message(
        ctx: Context<SendMessage>,
        query_id: u64,
        operation_type: u32,
        cross_chain_amount: u64,
        fee_data: Option<FeeData>,
        payload: Vec<u8>,
        response_address: Option<Pubkey>,
        msg_value: u64,
    ) -> Result<()> {
        send_message_handler(
            ctx,
            query_id,
            operation_type,
            cross_chain_amount,
            fee_data,
            payload,
            response_address,
            msg_value,
        )
    }

    // Fees

    /// Adds to the protocol fee supply. The configured fee deposit is retained.
    ///
    /// # Arguments
    /// * `ctx`      - The context containing the payer and the SOL vault
    /// * `query_id` - Identifier echoed in the emitted event
    /// * `amount`   - Lamports paid into the vault
    pub fn add_protocol_fee(
        ctx: Context<AddProtocolFee>,
        query_id: u64,
        amount: u64,
    ) -> Result<()> {
        add_protocol_fee_handler(ctx, query_id, amount)
    }

    /// Pays the accrued protocol fees out to the attester.
    ///
    /// # Arguments
    /// * `ctx`      - The context containing the attester and the SOL vault
    /// * `query_id` - Identifier echoed in the emitted event
    pub fn collect_protocol_fee(ctx: Context<CollectProtocolFee>, query_id: u64) -> Result<()> {
        collect_protocol_fee_handler(ctx, query_id)
    }

    // Admin

    /// Proposes a new admin, who must confirm with `confirm_changing_admin`.
    pub fn change_admin(ctx: Context<AdminOnly>, new_admin: Option<Pubkey>) -> Result<()> {
        change_admin_handler(ctx, new_admin)
    }

    pub fn cancel_changing_admin(ctx: Context<AdminOnly>) -> Result<()> {
        cancel_changing_admin_handler(ctx)
    }

    pub fn confirm_changing_admin(ctx: Context<ConfirmChangingAdmin>) -> Result<()> {
        confirm_changing_admin_handler(ctx)
    }

    pub fn change_attester(ctx: Context<AdminOnly>, new_attester: Pubkey) -> Result<()> {
        change_attester_handler(ctx, new_attester)
    }

    /// Upgrades this program from a buffer, with the relay layer PDA as upgrade authority.
    pub fn update_code(ctx: Context<UpdateCode>) -> Result<()> {
        update_code_handler(ctx)
    }

    /// Replaces the executor program and drops every stored root.
    pub fn update_executor_code(
        ctx: Context<AdminOnly>,
        new_executor_program: Pubkey,
    ) -> Result<()> {
        update_executor_code_handler(ctx, new_executor_program)
    }

    pub fn update_epoch_delay(ctx: Context<AdminOnly>, epoch_delay: i64) -> Result<()> {
        update_epoch_delay_handler(ctx, epoch_delay)
    }

    pub fn update_tac_protocol_fee(ctx: Context<AdminOnly>, tac_protocol_fee: u64) -> Result<()> {
        update_tac_protocol_fee_handler(ctx, tac_protocol_fee)
    }

    pub fn update_sol_protocol_fee(ctx: Context<AdminOnly>, sol_protocol_fee: u64) -> Result<()> {
        update_sol_protocol_fee_handler(ctx, sol_protocol_fee)
    }

    pub fn set_processing_costs(
        ctx: Context<AdminOnly>,
        processing_costs: ProcessingCosts,
    ) -> Result<()> {
        set_processing_costs_handler(ctx, processing_costs)
    }

    // Views

    pub fn get_full_data(ctx: Context<RelayLayerView>) -> Result<RelayLayer> {
        get_full_data_handler(ctx)
    }

    pub fn get_current_epoch_info(ctx: Context<RelayLayerView>) -> Result<EpochInfo> {
        get_current_epoch_info_handler(ctx)
    }

    /// Address of the Executor a relayer must deploy to deliver `message`.
    pub fn get_executor_address(ctx: Context<RelayLayerView>, message: Message) -> Result<Pubkey> {
        get_executor_address_handler(ctx, message)
    }

    /// Address, bump and seeds of the Executor for `message_hash`. Prefer it to
    /// `get_executor_address` for batches too large for instruction data.
    pub fn get_executor_data(
        ctx: Context<RelayLayerView>,
        message_hash: [u8; 32],
    ) -> Result<ExecutorData> {
        get_executor_data_handler(ctx, message_hash)
    }
}
