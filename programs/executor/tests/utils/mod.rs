#![allow(dead_code)]

use anchor_lang::{
    prelude::*, solana_program::native_token::LAMPORTS_PER_SOL, Discriminator, InstructionData,
    ToAccountMetas,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use common::{executor_address, MerkleProof, MerkleTree, Message, MsgEntry};
use executor::{state::Executor, ID as EXECUTOR_PROGRAM_ID};
use litesvm::{types::TransactionResult, LiteSVM};
use relay_layer::{
    constants::{RELAY_LAYER_SEED, SOL_VAULT_SEED},
    state::{ProcessingCosts, RelayLayer},
    ID as RELAY_LAYER_PROGRAM_ID,
};
use solana_account::Account;
use solana_instruction::Instruction;
use solana_keypair::Keypair;
use solana_message::Message as TxMessage;
use solana_signer::Signer;
use solana_transaction::Transaction;

pub const QUERY_ID: u64 = 7;
/// Fee of a transaction signed by one keypair.
pub const TX_FEE: u64 = 5_000;
pub const TEST_TIMESTAMP: i64 = 1747440000; // May 16th, 2025
pub const EPOCH_DELAY: i64 = 60;
pub const TAC_PROTOCOL_FEE: u64 = 30_000;
pub const SOL_PROTOCOL_FEE: u64 = 20_000;
pub const PROCESSING_COSTS: ProcessingCosts = ProcessingCosts {
    message_base: 10_000,
    per_entry: 1_000,
    fee_deposit: 5_000,
};

pub struct Harness {
    pub svm: LiteSVM,
    pub relayer: Keypair,
    pub admin: Keypair,
    pub attester: Keypair,
    pub relay_layer: Pubkey,
    pub sol_vault: Pubkey,
}

pub fn setup() -> Harness {
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(RELAY_LAYER_PROGRAM_ID, "../../target/deploy/relay_layer.so")
        .unwrap();
    svm.add_program_from_file(EXECUTOR_PROGRAM_ID, "../../target/deploy/executor.so")
        .unwrap();

    let relayer = Keypair::new();
    svm.airdrop(&relayer.pubkey(), LAMPORTS_PER_SOL * 100)
        .unwrap();
    let admin = Keypair::new();
    let attester = Keypair::new();
    svm.airdrop(&attester.pubkey(), LAMPORTS_PER_SOL).unwrap();

    let mut clock = svm.get_sysvar::<Clock>();
    clock.unix_timestamp = TEST_TIMESTAMP;
    svm.set_sysvar::<Clock>(&clock);

    let relay_layer = Pubkey::find_program_address(&[RELAY_LAYER_SEED], &RELAY_LAYER_PROGRAM_ID).0;
    let sol_vault = Pubkey::find_program_address(&[SOL_VAULT_SEED], &RELAY_LAYER_PROGRAM_ID).0;

    let ix = Instruction {
        program_id: RELAY_LAYER_PROGRAM_ID,
        accounts: relay_layer::accounts::Initialize {
            payer: relayer.pubkey(),
            relay_layer,
            sol_vault,
            admin: admin.pubkey(),
            system_program: solana_sdk_ids::system_program::ID,
        }
        .to_account_metas(None),
        data: relay_layer::instruction::Initialize {
            attester: attester.pubkey(),
            executor_program: EXECUTOR_PROGRAM_ID,
            epoch_delay: EPOCH_DELAY,
            max_roots_size: 3,
            tac_protocol_fee: TAC_PROTOCOL_FEE,
            sol_protocol_fee: SOL_PROTOCOL_FEE,
            processing_costs: PROCESSING_COSTS,
        }
        .data(),
    };

    let mut harness = Harness {
        svm,
        relayer,
        admin,
        attester,
        relay_layer,
        sol_vault,
    };
    let admin = harness.admin.insecure_clone();
    harness.send(&[ix], &[&admin]).unwrap();
    harness
}

impl Harness {
    /// Sends `ixs` paid by the relayer, with a fresh blockhash.
    pub fn send(&mut self, ixs: &[Instruction], signers: &[&Keypair]) -> TransactionResult {
        self.svm.expire_blockhash();
        let mut all_signers = vec![&self.relayer];
        all_signers.extend_from_slice(signers);
        let tx = Transaction::new(
            &all_signers,
            TxMessage::new(ixs, Some(&self.relayer.pubkey())),
            self.svm.latest_blockhash(),
        );
        self.svm.send_transaction(tx)
    }

    pub fn post_root(&mut self, root: [u8; 32]) {
        let ix = Instruction {
            program_id: RELAY_LAYER_PROGRAM_ID,
            accounts: relay_layer::accounts::UpdateMerkleRoot {
                relay_layer: self.relay_layer,
                attester: self.attester.pubkey(),
            }
            .to_account_metas(None),
            data: relay_layer::instruction::UpdateMerkleRoot {
                query_id: 0,
                merkle_root: root,
                message_collect_end_time: TEST_TIMESTAMP,
            }
            .data(),
        };
        let attester = self.attester.insecure_clone();
        self.send(&[ix], &[&attester]).expect("Failed to post root");
    }

    pub fn deploy(&mut self, message: &Message) -> Pubkey {
        let message_hash = message.hash();
        let executor = self.executor_address(message);
        let ix = Instruction {
            program_id: EXECUTOR_PROGRAM_ID,
            accounts: executor::accounts::Deploy {
                payer: self.relayer.pubkey(),
                relay_layer: self.relay_layer,
                executor,
                system_program: solana_sdk_ids::system_program::ID,
            }
            .to_account_metas(None),
            data: executor::instruction::Deploy {
                message_hash,
                message: message.clone(),
            }
            .data(),
        };
        self.send(&[ix], &[]).expect("Failed to deploy executor");
        executor
    }

    pub fn executor_address(&self, message: &Message) -> Pubkey {
        executor_address(&EXECUTOR_PROGRAM_ID, &self.relay_layer, &message.hash()).0
    }

    /// Adds `lamports` to the vault reserve, as if locked by earlier outbound messages.
    pub fn fund_vault(&mut self, lamports: u64) {
        let balance = self.balance(&self.sol_vault);
        self.svm
            .set_account(
                self.sol_vault,
                Account {
                    lamports: balance + lamports,
                    data: Vec::new(),
                    owner: solana_sdk_ids::system_program::ID,
                    executable: false,
                    rent_epoch: 0,
                },
            )
            .unwrap();
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.svm.get_balance(account).unwrap_or(0)
    }

    pub fn fetch_executor(&self, executor: &Pubkey) -> Executor {
        let account = self.svm.get_account(executor).unwrap();
        Executor::try_deserialize(&mut &account.data[..]).unwrap()
    }

    pub fn fetch_relay_layer(&self) -> RelayLayer {
        let account = self.svm.get_account(&self.relay_layer).unwrap();
        RelayLayer::try_deserialize(&mut &account.data[..]).unwrap()
    }
}

/// Accounts and arguments of a `proxy_message` call.
pub struct Proxy {
    pub executor: Pubkey,
    pub proof: MerkleProof,
    pub fee_to: Pubkey,
    pub fee_receiver: Pubkey,
    pub response: Option<Pubkey>,
    pub msg_value: u64,
    pub remaining_accounts: Vec<AccountMeta>,
}

impl Proxy {
    pub fn ix(&self, harness: &Harness) -> Instruction {
        self.ix_with_response_address(harness, self.response)
    }

    /// Same call, naming `response_address` regardless of the response account.
    pub fn ix_with_response_address(
        &self,
        harness: &Harness,
        response_address: Option<Pubkey>,
    ) -> Instruction {
        let mut accounts = self.accounts(harness).to_account_metas(None);
        accounts.extend_from_slice(&self.remaining_accounts);

        Instruction {
            program_id: EXECUTOR_PROGRAM_ID,
            accounts,
            data: executor::instruction::ProxyMessage {
                query_id: QUERY_ID,
                proof: self.proof.clone(),
                fee_to: self.fee_to,
                response_address,
                msg_value: self.msg_value,
            }
            .data(),
        }
    }

    /// Same call through `proxy_message_buffered`, with the proof read from
    /// `payload_buffer` instead of `self.proof`.
    pub fn buffered_ix(&self, harness: &Harness, payload_buffer: Pubkey) -> Instruction {
        let mut accounts = executor::accounts::ProxyMessageBuffered {
            proxy: self.accounts(harness),
            payload_buffer,
        }
        .to_account_metas(None);
        accounts.extend_from_slice(&self.remaining_accounts);

        Instruction {
            program_id: EXECUTOR_PROGRAM_ID,
            accounts,
            data: executor::instruction::ProxyMessageBuffered {
                query_id: QUERY_ID,
                fee_to: self.fee_to,
                response_address: self.response,
                msg_value: self.msg_value,
            }
            .data(),
        }
    }

    fn accounts(&self, harness: &Harness) -> executor::accounts::ProxyMessage {
        executor::accounts::ProxyMessage {
            relayer: harness.relayer.pubkey(),
            executor: self.executor,
            relay_layer: harness.relay_layer,
            sol_vault: harness.sol_vault,
            fee_receiver: self.fee_receiver,
            response: self.response,
            relay_layer_program: RELAY_LAYER_PROGRAM_ID,
            system_program: solana_sdk_ids::system_program::ID,
        }
    }
}

pub fn entry(destination: Pubkey, value: u64, need_to_unlock_sol: bool) -> MsgEntry {
    MsgEntry {
        operation_id: [0xab; 32],
        destination,
        destination_msg_value: value,
        msg_body: b"hello from tac".to_vec(),
        state_init: None,
        need_to_unlock_sol,
        payload_number: 0,
    }
}

/// Builds a tree over `message` and a few unrelated leaves and returns the
/// proof of `message`.
pub fn prove(message: &Message) -> MerkleProof {
    let tree = MerkleTree::new(vec![
        [1u8; 32],
        message.hash(),
        [2u8; 32],
        [3u8; 32],
        [4u8; 32],
    ]);
    tree.proof(1).unwrap()
}

pub fn destination_metas(message: &Message) -> Vec<AccountMeta> {
    message
        .entries
        .iter()
        .map(|entry| AccountMeta::new(entry.destination, false))
        .collect()
}

/// Value a relayer must attach to deliver `message`, without excess.
pub fn required_value(message: &Message) -> u64 {
    message.attached_value().unwrap()
        + SOL_PROTOCOL_FEE
        + PROCESSING_COSTS.message_base
        + PROCESSING_COSTS.per_entry * message.entries.len() as u64
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

pub fn assert_logged(result: &TransactionResult, needle: &str) {
    let logs = match result {
        Ok(meta) => &meta.logs,
        Err(err) => &err.meta.logs,
    };
    assert!(
        logs.iter().any(|log| log.contains(needle)),
        "Expected log containing {needle:?}, got: {logs:#?}"
    );
}

/// Events of type `T` emitted by the transaction, decoded from its
/// `Program data:` logs.
pub fn decode_events<T: AnchorDeserialize + Discriminator>(result: &TransactionResult) -> Vec<T> {
    let logs = match result {
        Ok(meta) => &meta.logs,
        Err(err) => &err.meta.logs,
    };
    logs.iter()
        .filter_map(|log| log.strip_prefix("Program data: "))
        .filter_map(|data| STANDARD.decode(data).ok())
        .filter(|bytes| bytes.starts_with(T::DISCRIMINATOR))
        .map(|bytes| T::try_from_slice(&bytes[T::DISCRIMINATOR.len()..]).unwrap())
        .collect()
}

pub fn advance_clock(svm: &mut LiteSVM, seconds: i64) {
    let mut clock = svm.get_sysvar::<Clock>();
    clock.unix_timestamp += seconds;
    svm.set_sysvar::<Clock>(&clock);
}
