use super::field::Field;
use super::{MetricKey, MetricRecord};
use serde_json::Value;

const NATIVE_BALANCE: Field = Field::at(&["Native Balance Result"]);
const TOKEN_BALANCES: Field = Field::at(&["Token Balances Result"]);
const ACTIVE_CHAINS: Field = Field::at(&["Active Chains Result", "activeChains"]);
const DEFI_POSITIONS: Field = Field::at(&["DeFi Positions Summary Result"]);
const RESOLVED_ADDRESS: Field = Field::at(&["Resolved Address Result"]);
const WALLET_NFTS: Field = Field::at(&["Wallet NFTs Result"]);
const TRANSACTION_COUNT: Field = Field::at(&["Transaction Count"]);
const UNIQUE_TOKEN_INTERACTIONS: Field = Field::at(&["Unique Token Interactions"]);
const GAS_SPENT: Field = Field::at(&["Gas Spent"]);
const STAKING_POSITIONS: Field = Field::at(&["Staking Positions"]);
const AIRDROPS: Field = Field::at(&["Airdrops"]);
const DAO_VOTES: Field = Field::at(&["DAO Votes"]);

/// Normalize a wallet summary keyed by provider result buckets.
pub fn extract_wallet(payload: &Value) -> MetricRecord {
    let mut record = MetricRecord::new();
    record.insert(MetricKey::ActiveChains, ACTIVE_CHAINS.len(payload));
    record.insert(MetricKey::NativeBalance, NATIVE_BALANCE.number(payload));
    record.insert(MetricKey::TokenHoldings, TOKEN_BALANCES.len(payload));
    record.insert(MetricKey::NftHoldings, WALLET_NFTS.len(payload));
    record.insert(MetricKey::DefiPositions, DEFI_POSITIONS.len(payload));
    record.insert(MetricKey::Web3Domains, RESOLVED_ADDRESS.present(payload));
    record.insert(MetricKey::TransactionCount, TRANSACTION_COUNT.number(payload));
    record.insert(
        MetricKey::UniqueTokenInteractions,
        UNIQUE_TOKEN_INTERACTIONS.number(payload),
    );
    record.insert(MetricKey::GasSpent, GAS_SPENT.number(payload));
    record.insert(MetricKey::StakingPositions, STAKING_POSITIONS.number(payload));
    record.insert(MetricKey::Airdrops, AIRDROPS.number(payload));
    record.insert(MetricKey::DaoVotes, DAO_VOTES.number(payload));
    record
}
