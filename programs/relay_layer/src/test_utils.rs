use anchor_lang::{
    prelude::*,
    solana_program::{instruction::Instruction, native_token::LAMPORTS_PER_SOL},
    system_program, InstructionData,
};
use litesvm::{types::TransactionResult, LiteSVM};
use solana_account::Account;
use solana_keypair::Keypair;
use solana_message::Message;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::{
    accounts,
    constants::{RELAY_LAYER_SEED, SOL_VAULT_SEED},
    instruction::Initialize,
    state::{ProcessingCosts, RelayLayer},
    ID,
};

pub const TEST_TIMESTAMP: i64 = 1747440000; // May 16th, 2025
pub const TEST_EPOCH_DELAY: i64 = 60;
pub const TEST_MAX_ROOTS_SIZE: u8 = 3;
pub const TEST_TAC_PROTOCOL_FEE: u64 = 30_000;
pub const TEST_SOL_PROTOCOL_FEE: u64 = 20_000;
pub const TEST_EXECUTOR_PROGRAM: Pubkey = pubkey!("FDABYNYo7zD7jqPjaicRD5tV2DUj4nr88i3V8Wjoq6xh");

impl ProcessingCosts {
    pub fn test_new() -> Self {
        Self {
            message_base: 10_000,
            per_entry: 1_000,
            fee_deposit: 5_000,
        }
    }
}

/// Keys of an initialized relay layer.
pub struct TestEnv {
    pub relay_layer: Pubkey,
    pub admin: Keypair,
    pub attester: Keypair,
}

pub fn setup_relay_layer_and_svm() -> (LiteSVM, Keypair, TestEnv) {
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(ID, "../../target/deploy/relay_layer.so")
        .unwrap();

    // Create test accounts
    let payer = Keypair::new();
    let payer_pk = payer.pubkey();
    svm.airdrop(&payer_pk, LAMPORTS_PER_SOL * 10).unwrap();

    let admin = Keypair::new();
    let attester = Keypair::new();
    svm.airdrop(&attester.pubkey(), LAMPORTS_PER_SOL).unwrap();

    mock_clock(&mut svm, TEST_TIMESTAMP);

    let relay_layer = Pubkey::find_program_address(&[RELAY_LAYER_SEED], &ID).0;
    let accounts = accounts::Initialize {
        payer: payer_pk,
        relay_layer,
        sol_vault: sol_vault_pda(),
        admin: admin.pubkey(),
        system_program: system_program::ID,
    }
    .to_account_metas(None);

    let ix = Instruction {
        program_id: ID,
        accounts,
        data: Initialize {
            attester: attester.pubkey(),
            executor_program: TEST_EXECUTOR_PROGRAM,
            epoch_delay: TEST_EPOCH_DELAY,
            max_roots_size: TEST_MAX_ROOTS_SIZE,
            tac_protocol_fee: TEST_TAC_PROTOCOL_FEE,
            sol_protocol_fee: TEST_SOL_PROTOCOL_FEE,
            processing_costs: ProcessingCosts::test_new(),
        }
        .data(),
    };

    let tx = Transaction::new(
        &[&payer, &admin],
        Message::new(&[ix], Some(&payer_pk)),
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx).unwrap();

    (
        svm,
        payer,
        TestEnv {
            relay_layer,
            admin,
            attester,
        },
    )
}

pub fn sol_vault_pda() -> Pubkey {
    Pubkey::find_program_address(&[SOL_VAULT_SEED], &ID).0
}

pub fn mock_clock(svm: &mut LiteSVM, timestamp: i64) {
    let mut clock = svm.get_sysvar::<Clock>();
    clock.unix_timestamp = timestamp;
    svm.set_sysvar::<Clock>(&clock);
}

pub fn fetch_relay_layer(svm: &LiteSVM, relay_layer: &Pubkey) -> RelayLayer {
    let account = svm.get_account(relay_layer).unwrap();
    RelayLayer::try_deserialize(&mut &account.data[..]).unwrap()
}

/// Overwrites the relay layer account with `state`, keeping its size.
pub fn mock_relay_layer(svm: &mut LiteSVM, relay_layer: &Pubkey, state: &RelayLayer) {
    let account = svm.get_account(relay_layer).unwrap();
    let mut data = Vec::with_capacity(account.data.len());
    state.try_serialize(&mut data).unwrap();
    data.resize(account.data.len(), 0);

    svm.set_account(
        *relay_layer,
        Account {
            lamports: account.lamports,
            data,
            owner: ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();
}

pub fn assert_error(result: TransactionResult, error: &str) {
    let err = result.expect_err("Transaction should fail");
    let expected = format!("Error Code: {error}");
    assert!(
        err.meta.logs.iter().any(|log| log.contains(&expected)),
        "Expected {error}, got logs: {:#?}",
        err.meta.logs
    );
}
