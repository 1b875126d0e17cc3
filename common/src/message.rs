use anchor_lang::{prelude::*, solana_program::keccak};

pub const FLAG_NEED_TO_UNLOCK_SOL: u8 = 1 << 0;
pub const FLAG_HAS_STATE_INIT: u8 = 1 << 1;

/// A single delivery instruction inside an inbound batch.
#[derive(Debug, Clone, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct MsgEntry {
    /// Identifier of the cross-chain operation this entry belongs to.
    pub operation_id: [u8; 32],
    pub destination: Pubkey,
    /// Lamports credited to `destination`.
    pub destination_msg_value: u64,
    /// Opaque payload delivered alongside the value.
    pub msg_body: Vec<u8>,
    /// When present, `destination` is created on delivery with this content.
    pub state_init: Option<Vec<u8>>,
    /// Whether `destination_msg_value` is paid out of the relay layer's locked SOL
    /// instead of the value attached by the relayer.
    pub need_to_unlock_sol: bool,
    /// Salt distinguishing otherwise identical entries.
    pub payload_number: u32,
}

impl MsgEntry {
    pub fn space(&self) -> usize {
        32 + 32
            + 8
            + (4 + self.msg_body.len())
            + 1
            + self.state_init.as_ref().map_or(0, |s| 4 + s.len())
            + 1
            + 4
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.need_to_unlock_sol {
            flags |= FLAG_NEED_TO_UNLOCK_SOL;
        }
        if self.state_init.is_some() {
            flags |= FLAG_HAS_STATE_INIT;
        }
        flags
    }

    fn encode_into(&self, index: u32, out: &mut Vec<u8>) {
        out.extend_from_slice(&index.to_be_bytes());
        out.extend_from_slice(&self.operation_id);
        out.extend_from_slice(self.destination.as_ref());
        out.extend_from_slice(&self.destination_msg_value.to_be_bytes());
        out.push(self.flags());
        out.extend_from_slice(&(self.msg_body.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.msg_body);
        if let Some(state_init) = &self.state_init {
            out.extend_from_slice(&(state_init.len() as u32).to_be_bytes());
            out.extend_from_slice(state_init);
        }
        out.extend_from_slice(&self.payload_number.to_be_bytes());
    }
}

/// A batch of entries attested together under a single Merkle leaf.
#[derive(Debug, Clone, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct Message {
    pub entries: Vec<MsgEntry>,
    /// Relayers allowed to execute this batch. Treated as a set.
    pub valid_executors: Vec<Pubkey>,
    /// Mint of the executor fee, `None` for native SOL.
    pub executor_fee_token: Option<Pubkey>,
    pub executor_fee_value: u64,
}

impl Message {
    /// Borsh-serialized size, used to size the Executor account holding the batch.
    pub fn space(&self) -> usize {
        4 + self.entries.iter().map(MsgEntry::space).sum::<usize>()
            + (4 + 32 * self.valid_executors.len())
            + (1 + 32)
            + 8
    }

    /// Canonical encoding hashed into the Merkle leaf.
    ///
    /// Entries are keyed by their position, the executor set by the keccak hash
    /// of each address (sorted and de-duplicated), so two messages describing the
    /// same set of executors in a different order encode identically.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.space() + 4 * self.entries.len());

        out.extend_from_slice(&(self.entries.len() as u32).to_be_bytes());
        for (index, entry) in self.entries.iter().enumerate() {
            entry.encode_into(index as u32, &mut out);
        }

        let executor_keys = self.executor_keys();
        out.extend_from_slice(&(executor_keys.len() as u32).to_be_bytes());
        for key in executor_keys {
            out.extend_from_slice(&key);
        }

        match &self.executor_fee_token {
            Some(mint) => {
                out.push(1);
                out.extend_from_slice(mint.as_ref());
            }
            None => out.push(0),
        }
        out.extend_from_slice(&self.executor_fee_value.to_be_bytes());

        out
    }

    /// The Merkle leaf of this batch and the seed of its Executor address.
    pub fn hash(&self) -> [u8; 32] {
        keccak::hash(&self.encode()).to_bytes()
    }

    pub fn is_valid_executor(&self, executor: &Pubkey) -> bool {
        self.valid_executors.contains(executor)
    }

    /// Total value paid to destinations out of the relayer's attached value.
    pub fn attached_value(&self) -> Option<u64> {
        self.entries
            .iter()
            .filter(|entry| !entry.need_to_unlock_sol)
            .try_fold(0u64, |acc, entry| {
                acc.checked_add(entry.destination_msg_value)
            })
    }

    /// Total value paid to destinations out of the relay layer's locked SOL.
    pub fn unlocked_value(&self) -> Option<u64> {
        self.entries
            .iter()
            .filter(|entry| entry.need_to_unlock_sol)
            .try_fold(0u64, |acc, entry| {
                acc.checked_add(entry.destination_msg_value)
            })
    }

    fn executor_keys(&self) -> Vec<[u8; 32]> {
        let mut keys = self
            .valid_executors
            .iter()
            .map(|executor| keccak::hash(executor.as_ref()).to_bytes())
            .collect::<Vec<_>>();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}
