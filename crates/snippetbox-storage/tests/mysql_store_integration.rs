use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use snippetbox_core::{
    ExpiryDays, NewSnippet, SnippetId, StorageError, LATEST_LIMIT, MAX_EXPIRY_DAYS,
};
use snippetbox_storage::{MySqlSnippetStore, MySqlStoreOptions, ReadSnippetStore, SnippetStore};
use snippetbox_test_infra::mysql::{MySqlServer, MysqlConfig};
use sqlx::mysql::MySqlPoolOptions;

struct Fixture {
    mysql: MySqlServer,
    store: MySqlSnippetStore,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MysqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let pool = connect_with_retry(&url).await;

        sqlx::query(include_str!("../ddl/mysql/snippets.sql"))
            .execute(&pool)
            .await
            .expect("create schema");
        sqlx::query(include_str!("../ddl/mysql/snippets_created_idx.sql"))
            .execute(&pool)
            .await
            .expect("create index");

        Self {
            mysql,
            store: MySqlSnippetStore::new(pool),
        }
    }

    /// Inserts a row with explicit offsets from the engine clock.
    async fn insert_raw(&self, title: &str, created_minutes_ago: i64, expires_in_minutes: i64) {
        sqlx::query(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES (
                ?, 'raw',
                DATE_SUB(UTC_TIMESTAMP(), INTERVAL ? MINUTE),
                DATE_ADD(UTC_TIMESTAMP(), INTERVAL ? MINUTE)
            )
            "#,
        )
        .bind(title)
        .bind(created_minutes_ago)
        .bind(expires_in_minutes)
        .execute(self.store.pool())
        .await
        .expect("insert raw snippet");
    }
}

async fn connect_with_retry(url: &str) -> sqlx::MySqlPool {
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
        {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

fn new_snippet(title: &str, content: &str, days: i64) -> NewSnippet {
    NewSnippet::new(title, content, ExpiryDays::new(days).unwrap())
}

#[tokio::test]
async fn create_then_get_first_post() {
    let fixture = Fixture::start().await;

    let id = fixture
        .store
        .create(new_snippet("First post", "Hello, world!", 7))
        .await
        .unwrap();
    assert_eq!(id, SnippetId::new(1));

    let got = fixture.store.get(id).await.unwrap().unwrap();
    assert_eq!(got.id, id);
    assert_eq!(got.title, "First post");
    assert_eq!(got.content, "Hello, world!");
    assert_eq!(got.lifetime(), SignedDuration::from_hours(7 * 24));

    let now = Timestamp::now();
    assert!(got.created <= now + SignedDuration::from_secs(60));
    assert!(got.created >= now - SignedDuration::from_secs(60));
}

#[tokio::test]
async fn create_keeps_long_content() {
    let fixture = Fixture::start().await;
    let content = "lorem ipsum ".repeat(2_000);

    let id = fixture
        .store
        .create(new_snippet("long", &content, 1))
        .await
        .unwrap();

    let got = fixture.store.get(id).await.unwrap().unwrap();
    assert_eq!(got.content, content);
}

#[tokio::test]
async fn create_accepts_longest_expiry() {
    let fixture = Fixture::start().await;
    let days = i64::from(MAX_EXPIRY_DAYS);

    let id = fixture
        .store
        .create(new_snippet("far", "future", days))
        .await
        .unwrap();

    let got = fixture.store.get(id).await.unwrap().unwrap();
    assert_eq!(got.lifetime(), SignedDuration::from_hours(days * 24));
}

#[tokio::test]
async fn get_returns_none_for_unknown_id() {
    let fixture = Fixture::start().await;

    let got = fixture.store.get(SnippetId::new(999)).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn get_returns_none_for_expired_snippet() {
    let fixture = Fixture::start().await;
    fixture.insert_raw("expired", 60, -1).await;

    let got = fixture.store.get(SnippetId::new(1)).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn zero_day_expiry_is_never_visible() {
    let fixture = Fixture::start().await;

    let id = fixture
        .store
        .create(new_snippet("instant", "gone", 0))
        .await
        .unwrap();

    assert!(fixture.store.get(id).await.unwrap().is_none());
    assert!(fixture.store.latest().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_is_idempotent() {
    let fixture = Fixture::start().await;
    let id = fixture
        .store
        .create(new_snippet("same", "same", 7))
        .await
        .unwrap();

    let first = fixture.store.get(id).await.unwrap();
    let second = fixture.store.get(id).await.unwrap();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn latest_returns_ten_most_recent_first() {
    let fixture = Fixture::start().await;

    // snippet-0 is the oldest, snippet-10 the newest.
    for i in 0..11i64 {
        fixture
            .insert_raw(&format!("snippet-{i}"), 11 - i, 7 * 24 * 60)
            .await;
    }

    let latest = fixture.store.latest().await.unwrap();
    assert_eq!(latest.len(), LATEST_LIMIT);

    let titles: Vec<&str> = latest.iter().map(|s| s.title.as_str()).collect();
    let expected: Vec<String> = (1..11).rev().map(|i| format!("snippet-{i}")).collect();
    assert_eq!(titles, expected);

    assert!(latest.windows(2).all(|pair| pair[0].created > pair[1].created));
}

#[tokio::test]
async fn latest_only_returns_live_snippets() {
    let fixture = Fixture::start().await;
    fixture.insert_raw("expired", 30, -5).await;
    fixture.insert_raw("live", 20, 60).await;

    let latest = fixture.store.latest().await.unwrap();
    let now = Timestamp::now();

    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].title, "live");
    assert!(latest.iter().all(|s| s.expires > now));
}

#[tokio::test]
async fn latest_on_empty_table() {
    let fixture = Fixture::start().await;

    assert!(fixture.store.latest().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_fails_with_write_error_when_title_too_long() {
    let fixture = Fixture::start().await;

    let err = fixture
        .store
        .create(new_snippet(&"t".repeat(101), "content", 7))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Write(_)));
}

#[tokio::test]
async fn reads_fail_with_read_error_when_table_is_missing() {
    let fixture = Fixture::start().await;
    sqlx::query("DROP TABLE snippets")
        .execute(fixture.store.pool())
        .await
        .unwrap();

    let err = fixture.store.get(SnippetId::new(1)).await.unwrap_err();
    assert!(matches!(err, StorageError::Read(_)));

    let err = fixture.store.latest().await.unwrap_err();
    assert!(matches!(err, StorageError::Read(_)));
}

#[tokio::test]
async fn connect_pings_the_server() {
    let fixture = Fixture::start().await;
    let url = fixture.mysql.database_url().await.unwrap();

    let store = MySqlSnippetStore::connect_with(
        &url,
        MySqlStoreOptions::builder().max_connections(2).build(),
    )
    .await
    .unwrap();

    store.ping().await.unwrap();
}

#[test]
fn out_of_range_expiry_never_reaches_the_store() {
    assert!(ExpiryDays::new(-1).is_err());
    assert!(ExpiryDays::new(4_000_000).is_err());
}
