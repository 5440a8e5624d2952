mod common;

use common::BLOCK_HASH;
use common::CONTRACT;
use common::SENDER;
use common::client;
use common::key;
use common::method;
use common::method_with_params;
use common::rpc_result;
use common::storage_range;
use eth_proof_bench::alias::JsonValue;
use eth_proof_bench::eth::ConfigurationError;
use eth_proof_bench::eth::crawler::BlockCrawler;
use eth_proof_bench::eth::crawler::CrawlOptions;
use eth_proof_bench::eth::crawler::STORAGE_RANGE_MAX_RESULTS;
use eth_proof_bench::eth::crawler::STORAGE_RANGE_START_KEY;
use eth_proof_bench::eth::primitives::BlockNumber;
use eth_proof_bench::eth::primitives::CrawlRow;
use httpmock::Mock;
use httpmock::prelude::*;
use serde_json::json;

fn block(transactions: JsonValue) -> JsonValue {
    json!({ "number": "0x64", "hash": BLOCK_HASH, "transactions": transactions })
}

fn transfer_to_contract() -> JsonValue {
    json!([{ "hash": "0x2222", "from": SENDER, "to": CONTRACT, "transactionIndex": "0x0" }])
}

async fn mock_head(server: &MockServer, head: &str) {
    server
        .mock_async(|when, then| {
            when.method(POST).json_body_partial(method("eth_blockNumber"));
            then.status(200).json_body(rpc_result(json!(head)));
        })
        .await;
}

async fn mock_block<'a>(server: &'a MockServer, number: &str, block: JsonValue) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(POST).json_body_partial(method_with_params("eth_getBlockByNumber", json!([number, true])));
            then.status(200).json_body(rpc_result(block));
        })
        .await
}

async fn mock_nonce<'a>(server: &'a MockServer, nonce: &str) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(POST).json_body_partial(method_with_params("eth_getTransactionCount", json!([CONTRACT, "0x64"])));
            then.status(200).json_body(rpc_result(json!(nonce)));
        })
        .await
}

async fn mock_storage_range(server: &MockServer) -> Mock<'_> {
    let keys = [key(6), key(2), key(4), key(1), key(5), key(3)];
    let keys = keys.iter().map(String::as_str).collect::<Vec<_>>();
    let range = storage_range(&keys);
    server
        .mock_async(|when, then| {
            when.method(POST).json_body_partial(method_with_params(
                "debug_storageRangeAt",
                json!([BLOCK_HASH, 0, CONTRACT, STORAGE_RANGE_START_KEY, STORAGE_RANGE_MAX_RESULTS]),
            ));
            then.status(200).json_body(rpc_result(range));
        })
        .await
}

#[tokio::test]
async fn test_crawl_samples_fourth_slot_of_contract() {
    let server = MockServer::start_async().await;
    mock_head(&server, "0x64").await;
    mock_block(&server, "0x64", block(transfer_to_contract())).await;
    mock_nonce(&server, "0x1").await;
    mock_storage_range(&server).await;

    let crawler = BlockCrawler::new(client(&server), CrawlOptions::default());
    let mut rows: Vec<CrawlRow> = Vec::new();
    let report = crawler.crawl(BlockNumber::from(100u64), BlockNumber::from(100u64), &mut rows).await.unwrap();

    assert_eq!(
        rows,
        vec![
            CrawlRow::baseline(BlockNumber::from(100u64), CONTRACT, Some(key(4))),
            CrawlRow::baseline(BlockNumber::from(100u64), SENDER, None),
        ]
    );
    assert_eq!(report.blocks_processed, 1);
    assert_eq!(report.transactions, 1);
    assert_eq!(report.contracts, 1);
    assert_eq!(report.rows, 2);
}

#[tokio::test]
async fn test_crawl_clamps_end_to_head() {
    let server = MockServer::start_async().await;
    mock_head(&server, "0x64").await;
    let block_mock = mock_block(&server, "0x64", block(json!([]))).await;

    let crawler = BlockCrawler::new(client(&server), CrawlOptions::default());
    let mut rows: Vec<CrawlRow> = Vec::new();
    let report = crawler.crawl(BlockNumber::from(100u64), BlockNumber::from(105u64), &mut rows).await.unwrap();

    assert_eq!(report.blocks_processed, 1);
    assert_eq!(report.blocks_skipped, 0);
    assert_eq!(block_mock.hits_async().await, 1);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_crawl_ignores_accounts_that_are_not_of_interest() {
    let server = MockServer::start_async().await;
    mock_head(&server, "0x64").await;
    mock_block(&server, "0x64", block(transfer_to_contract())).await;
    mock_nonce(&server, "0x5").await;
    let range_mock = mock_storage_range(&server).await;

    let crawler = BlockCrawler::new(client(&server), CrawlOptions::default());
    let mut rows: Vec<CrawlRow> = Vec::new();
    let report = crawler.crawl(BlockNumber::from(100u64), BlockNumber::from(100u64), &mut rows).await.unwrap();

    assert_eq!(range_mock.hits_async().await, 0);
    assert_eq!(report.contracts, 0);
    assert_eq!(rows[0], CrawlRow::baseline(BlockNumber::from(100u64), CONTRACT, None));
}

#[tokio::test]
async fn test_crawl_contract_creation_yields_sender_only() {
    let server = MockServer::start_async().await;
    mock_head(&server, "0x64").await;
    mock_block(&server, "0x64", block(json!([{ "from": SENDER, "to": null, "transactionIndex": "0x0" }]))).await;
    let nonce_mock = mock_nonce(&server, "0x1").await;

    let crawler = BlockCrawler::new(client(&server), CrawlOptions::default());
    let mut rows: Vec<CrawlRow> = Vec::new();
    crawler.crawl(BlockNumber::from(100u64), BlockNumber::from(100u64), &mut rows).await.unwrap();

    assert_eq!(rows, vec![CrawlRow::baseline(BlockNumber::from(100u64), SENDER, None)]);
    assert_eq!(nonce_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_crawl_skips_missing_and_failing_blocks() {
    let server = MockServer::start_async().await;
    mock_head(&server, "0x65").await;
    server
        .mock_async(|when, then| {
            when.method(POST).json_body_partial(method_with_params("eth_getBlockByNumber", json!(["0x64", true])));
            then.status(200).json_body(rpc_result(json!(null)));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).json_body_partial(method_with_params("eth_getBlockByNumber", json!(["0x65", true])));
            then.status(500).body("internal error");
        })
        .await;

    let crawler = BlockCrawler::new(client(&server), CrawlOptions::default());
    let mut rows: Vec<CrawlRow> = Vec::new();
    let report = crawler.crawl(BlockNumber::from(100u64), BlockNumber::from(101u64), &mut rows).await.unwrap();

    assert_eq!(report.blocks_skipped, 2);
    assert_eq!(report.blocks_processed, 0);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_noisy_crawl_appends_randomized_rows() {
    let server = MockServer::start_async().await;
    mock_head(&server, "0x64").await;
    mock_block(&server, "0x64", block(transfer_to_contract())).await;
    mock_nonce(&server, "0x1").await;
    mock_storage_range(&server).await;

    let options = CrawlOptions {
        noisy: true,
        noise_trailing_rows: 3,
        ..CrawlOptions::default()
    };
    let crawler = BlockCrawler::new(client(&server), options);
    let mut rows: Vec<CrawlRow> = Vec::new();
    let report = crawler.crawl(BlockNumber::from(100u64), BlockNumber::from(100u64), &mut rows).await.unwrap();

    // 2 baseline + 4 per slotted transaction + 3 trailing
    assert_eq!(rows.len(), 9);
    assert_eq!(report.rows, 9);
    assert!(rows[..2].iter().all(|row| !row.is_noise()));
    assert!(rows[2..6].iter().all(|row| row.is_noise() && row.block_number == Some(BlockNumber::from(100u64))));
    assert!(rows[6..].iter().all(|row| row.block_number.is_none() && row.randomized_account && row.randomized_slot));
}

#[tokio::test]
async fn test_inverted_range_issues_no_request() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(rpc_result(json!("0x64")));
        })
        .await;

    let crawler = BlockCrawler::new(client(&server), CrawlOptions::default());
    let mut rows: Vec<CrawlRow> = Vec::new();
    let error = crawler.crawl(BlockNumber::from(10u64), BlockNumber::from(9u64), &mut rows).await.unwrap_err();

    assert!(error.downcast_ref::<ConfigurationError>().is_some());
    assert_eq!(any.hits_async().await, 0);
}
