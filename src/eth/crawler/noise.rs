//! Deliberately wrong dataset rows used as negative controls by the benchmark.

use anyhow::anyhow;
use ring::rand::SecureRandom;
use ring::rand::SystemRandom;

use crate::eth::primitives::BlockNumber;
use crate::eth::primitives::CrawlRow;

/// Number of fully randomized rows appended after the crawled range.
pub const DEFAULT_NOISE_TRAILING_ROWS: usize = 100;

/// Rows emitted for every transaction that has a sampled storage slot.
pub const NOISE_PATTERN: [NoiseRow; 4] = [
    NoiseRow::new(NoiseAccount::Random, NoiseSlot::Sampled),
    NoiseRow::new(NoiseAccount::Random, NoiseSlot::Empty),
    NoiseRow::new(NoiseAccount::Receiver, NoiseSlot::Random),
    NoiseRow::new(NoiseAccount::Sender, NoiseSlot::Random),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseAccount {
    /// 20 random bytes.
    Random,

    /// Transaction `to` address.
    Receiver,

    /// Transaction `from` address.
    Sender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseSlot {
    /// 32 random bytes.
    Random,

    /// Slot sampled from the receiver storage.
    Sampled,

    /// No slot, account proof only.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseRow {
    pub account: NoiseAccount,
    pub slot: NoiseSlot,
}

impl NoiseRow {
    pub const fn new(account: NoiseAccount, slot: NoiseSlot) -> Self {
        Self { account, slot }
    }
}

/// Generates randomized rows from the operating system CSPRNG.
pub struct NoiseGenerator {
    rng: SystemRandom,
}

impl Default for NoiseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseGenerator {
    pub fn new() -> Self {
        Self { rng: SystemRandom::new() }
    }

    /// Random account address, `0x`-prefixed.
    pub fn random_address(&self) -> anyhow::Result<String> {
        self.random_hex::<20>()
    }

    /// Random storage key, `0x`-prefixed.
    pub fn random_slot_key(&self) -> anyhow::Result<String> {
        self.random_hex::<32>()
    }

    fn random_hex<const N: usize>(&self) -> anyhow::Result<String> {
        let mut bytes = [0u8; N];
        self.rng.fill(&mut bytes).map_err(|_| anyhow!("system random source failed"))?;
        Ok(const_hex::encode_prefixed(bytes))
    }

    /// Applies [`NOISE_PATTERN`] to a transaction with a sampled slot.
    pub fn transaction_noise(&self, number: BlockNumber, from: &str, to: &str, sampled_slot: &str) -> anyhow::Result<Vec<CrawlRow>> {
        let mut rows = Vec::with_capacity(NOISE_PATTERN.len());
        for noise in NOISE_PATTERN {
            let address = match noise.account {
                NoiseAccount::Random => self.random_address()?,
                NoiseAccount::Receiver => to.to_owned(),
                NoiseAccount::Sender => from.to_owned(),
            };
            let storage_slot = match noise.slot {
                NoiseSlot::Random => Some(self.random_slot_key()?),
                NoiseSlot::Sampled => Some(sampled_slot.to_owned()),
                NoiseSlot::Empty => None,
            };
            rows.push(CrawlRow {
                block_number: Some(number),
                address,
                storage_slot,
                randomized_account: noise.account == NoiseAccount::Random,
                randomized_slot: noise.slot == NoiseSlot::Random,
            });
        }
        Ok(rows)
    }

    /// Row without block number, random account and random slot.
    pub fn trailing_row(&self) -> anyhow::Result<CrawlRow> {
        Ok(CrawlRow {
            block_number: None,
            address: self.random_address()?,
            storage_slot: Some(self.random_slot_key()?),
            randomized_account: true,
            randomized_slot: true,
        })
    }
}
