//! End-to-end tests of the composed service stack.
//!
//! The stack is wired exactly as `compose` does it in production, with
//! only the HTTP transport stubbed: remote hits serve fresh records and
//! refresh the snapshot, remote failures fall back to it, and
//! completion-style loads land on the dispatcher's loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use tempfile::{tempdir, TempDir};
use tokio::sync::mpsc;

use datausage_core::api::{HttpClient, HttpResponse};
use datausage_core::cache::{FileStore, LocalSource, SnapshotStore, StoredRecord};
use datausage_core::dispatch::LoopDispatcher;
use datausage_core::{
    usage_service_with_client, Config, DataSource, RecordCache, ServiceError, StoreError,
    UsageRecord,
};

/// Two-quarter payload in the datastore envelope.
const PAYLOAD: &str = r#"{
    "help": "https://data.gov.sg/api/3/action/help_show?name=datastore_search",
    "success": true,
    "result": {
        "records": [
            { "_id": 1, "volume_of_mobile_data": "10.5", "quarter": "2019-Q1" },
            { "_id": 2, "volume_of_mobile_data": "11.25", "quarter": "2019-Q2" }
        ]
    }
}"#;

/// Tracing output is opt-in via `RUST_LOG`, as in the library's
/// consumers.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

struct StubClient {
    response: Option<(u16, &'static str)>,
}

impl StubClient {
    fn serving(body: &'static str) -> Self {
        Self {
            response: Some((200, body)),
        }
    }

    fn unreachable() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl HttpClient for StubClient {
    async fn get(&self, _url: &str) -> anyhow::Result<HttpResponse> {
        match self.response {
            Some((status, body)) => Ok(HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            None => Err(anyhow!("connection refused")),
        }
    }
}

fn config_in(dir: &TempDir) -> Config {
    Config {
        endpoint: "https://example.test/datastore".to_string(),
        cache_dir: Some(dir.path().to_path_buf()),
    }
}

fn expected_records() -> Vec<UsageRecord> {
    vec![
        UsageRecord::new(1, 10.5, "2019-Q1"),
        UsageRecord::new(2, 11.25, "2019-Q2"),
    ]
}

/// The snapshot refresh is fire-and-forget, so poll until it lands.
async fn wait_for_snapshot(store: &FileStore) -> Vec<StoredRecord> {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(Some(snapshot)) = store.retrieve().await {
                return snapshot.records;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("snapshot was never written")
}

#[tokio::test]
async fn test_remote_success_serves_records_and_refreshes_snapshot() {
    init_tracing();
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    let (dispatcher, _jobs) = LoopDispatcher::new();
    let service = usage_service_with_client(
        &config,
        Arc::new(StubClient::serving(PAYLOAD)),
        Arc::new(dispatcher),
    )
    .unwrap();

    let records = service.load().await.unwrap();
    assert_eq!(records, expected_records());

    let store = FileStore::new(config.snapshot_path().unwrap()).unwrap();
    let cached: Vec<UsageRecord> = wait_for_snapshot(&store)
        .await
        .into_iter()
        .map(StoredRecord::into_record)
        .collect();
    assert_eq!(cached, expected_records());
}

#[tokio::test]
async fn test_remote_failure_serves_the_snapshot() {
    init_tracing();
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    let seeded = vec![UsageRecord::new(7, 3.25, "2021-Q3")];
    let store = Arc::new(FileStore::new(config.snapshot_path().unwrap()).unwrap());
    LocalSource::new(store).save(&seeded).await.unwrap();

    let (dispatcher, _jobs) = LoopDispatcher::new();
    let service = usage_service_with_client(
        &config,
        Arc::new(StubClient::unreachable()),
        Arc::new(dispatcher),
    )
    .unwrap();

    let records = service.load().await.unwrap();

    assert_eq!(records, seeded);
}

#[tokio::test]
async fn test_remote_failure_with_empty_cache_yields_an_empty_list() {
    init_tracing();
    let dir = tempdir().unwrap();
    let (dispatcher, _jobs) = LoopDispatcher::new();
    let service = usage_service_with_client(
        &config_in(&dir),
        Arc::new(StubClient::unreachable()),
        Arc::new(dispatcher),
    )
    .unwrap();

    let records = service.load().await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_remote_failure_with_corrupt_snapshot_surfaces_the_store_error() {
    init_tracing();
    let dir = tempdir().unwrap();
    let config = config_in(&dir);
    std::fs::write(config.snapshot_path().unwrap(), "not json").unwrap();

    let (dispatcher, _jobs) = LoopDispatcher::new();
    let service = usage_service_with_client(
        &config,
        Arc::new(StubClient::unreachable()),
        Arc::new(dispatcher),
    )
    .unwrap();

    let err = service.load().await.unwrap_err();

    assert!(matches!(err, ServiceError::Store(StoreError::Decode(_))));
}

#[tokio::test]
async fn test_completion_load_delivers_through_the_owning_loop() {
    init_tracing();
    let dir = tempdir().unwrap();
    // Home the dispatcher on a thread that is gone by the time the load
    // completes, so delivery must go through the queue.
    let (dispatcher, mut jobs) = std::thread::spawn(LoopDispatcher::new).join().unwrap();
    let service = usage_service_with_client(
        &config_in(&dir),
        Arc::new(StubClient::serving(PAYLOAD)),
        Arc::new(dispatcher),
    )
    .unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    service.load_with(move |result| {
        let _ = tx.send(result);
    });

    let job = jobs.next_job().await.expect("completion job was queued");
    job();

    let records = rx.try_recv().unwrap().unwrap();
    assert_eq!(records, expected_records());
}
