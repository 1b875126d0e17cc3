#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use common::{MerkleProof, Message};

pub mod instructions;
pub mod internal;
pub mod state;

use instructions::*;
use state::Executor;

declare_id!("FDABYNYo7zD7jqPjaicRD5tV2DUj4nr88i3V8Wjoq6xh");

#[program]
pub mod executor {
    use super::*;

    /// Creates the Executor holding `message`, at the address the relay layer
    /// derives from the batch hash. Anyone may deploy it.
    ///
    /// # Arguments
    /// * `ctx`          - The context containing the payer and the relay layer
    /// * `message_hash` - Hash of `message`, seeding the Executor address
    /// * `message`      - The attested batch
    pub fn deploy(ctx: Context<Deploy>, message_hash: [u8; 32], message: Message) -> Result<()> {
        deploy_handler(ctx, message_hash, message)
    }

    /// Same as `deploy`, with the batch read from a payload buffer.
    ///
    /// # Arguments
    /// * `ctx`          - The context containing the payer, the relay layer and the buffer
    /// * `message_hash` - Hash of the buffered batch, seeding the Executor address
    pub fn deploy_buffered(ctx: Context<DeployBuffered>, message_hash: [u8; 32]) -> Result<()> {
        deploy_buffered_handler(ctx, message_hash)
    }

    /// Delivers the stored batch through the relay layer, at most once.
    ///
    /// # Arguments
    /// * `ctx`              - The context; remaining accounts are forwarded to the relay layer
    /// * `query_id`         - Identifier echoed in the emitted events
    /// * `proof`            - Inclusion proof of the batch hash under a stored root
    /// * `fee_to`           - Beneficiary of the executor fee
    /// * `response_address` - Receiver of the excess value, if any
    /// * `msg_value`        - Lamports the relayer attaches to the delivery
    pub fn proxy_message<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProxyMessage<'info>>,
        query_id: u64,
        proof: MerkleProof,
        fee_to: Pubkey,
        response_address: Option<Pubkey>,
        msg_value: u64,
    ) -> Result<()> {
        proxy_message_handler(ctx, query_id, proof, fee_to, response_address, msg_value)
    }

    /// Same as `proxy_message`, with the proof read from a payload buffer.
    pub fn proxy_message_buffered<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProxyMessageBuffered<'info>>,
        query_id: u64,
        fee_to: Pubkey,
        response_address: Option<Pubkey>,
        msg_value: u64,
    ) -> Result<()> {
        proxy_message_buffered_handler(ctx, query_id, fee_to, response_address, msg_value)
    }

    // Payload buffers

    /// Creates a buffer for a batch too large for one transaction. Its batch
    /// and proof are then appended over as many transactions as needed.
    ///
    /// # Arguments
    /// * `ctx`           - The context containing the payer, who becomes the owner
    /// * `root`          - Root the buffered proof will prove against
    /// * `max_data_len`  - Capacity for the batch encoding, in bytes
    /// * `max_proof_len` - Capacity for proof siblings
    pub fn initialize_payload_buffer(
        ctx: Context<InitializePayloadBuffer>,
        root: [u8; 32],
        max_data_len: u32,
        max_proof_len: u8,
    ) -> Result<()> {
        initialize_payload_buffer_handler(ctx, root, max_data_len, max_proof_len)
    }

    pub fn append_to_payload_buffer_data(
        ctx: Context<AppendToPayloadBuffer>,
        data: Vec<u8>,
    ) -> Result<()> {
        append_to_payload_buffer_data_handler(ctx, data)
    }

    pub fn append_to_payload_buffer_proof(
        ctx: Context<AppendToPayloadBuffer>,
        siblings: Vec<[u8; 32]>,
    ) -> Result<()> {
        append_to_payload_buffer_proof_handler(ctx, siblings)
    }

    pub fn close_payload_buffer(ctx: Context<ClosePayloadBuffer>) -> Result<()> {
        close_payload_buffer_handler(ctx)
    }

    // Views

    pub fn get_full_data(ctx: Context<ExecutorView>) -> Result<Executor> {
        get_full_data_handler(ctx)
    }

    pub fn check_proof(ctx: Context<ExecutorView>, proof: MerkleProof) -> Result<bool> {
        check_proof_handler(ctx, proof)
    }

    pub fn is_valid_executor(ctx: Context<ExecutorView>, relayer: Pubkey) -> Result<bool> {
        is_valid_executor_handler(ctx, relayer)
    }
}
