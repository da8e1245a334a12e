//! End-to-end scraping against a mock HTTP server.

use ebay_crawler::commands::{ScrapeCommand, Scraped};
use ebay_crawler::ebay::EbayClient;
use ebay_crawler::{store, Config};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEM_FIXTURE: &str = include_str!("fixtures/item_page.html");
const NOT_SHIPPED_FIXTURE: &str = include_str!("fixtures/not_shipped_page.html");

fn make_test_config(dir: &TempDir) -> Config {
    Config { output: dir.path().join("data.json"), retry_delay_ms: 0, ..Config::default() }
}

async fn mount_page(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_batch_skips_failed_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, "/itm/1", 200, ITEM_FIXTURE).await;
    mount_page(&server, "/itm/2", 404, "").await;
    mount_page(&server, "/itm/3", 200, NOT_SHIPPED_FIXTURE).await;

    let dir = TempDir::new().unwrap();
    let config = make_test_config(&dir);
    let client = EbayClient::new(&config).await.unwrap();
    let cmd = ScrapeCommand::new(config);

    let urls: Vec<String> =
        ["/itm/1", "/itm/2", "/itm/3"].iter().map(|p| format!("{}{}", server.uri(), p)).collect();

    let scraped = cmd.execute_with_client(&client, &urls).await.unwrap();
    let Scraped::Batch(records) = scraped else {
        panic!("expected batch result");
    };

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].url, urls[0]);
    assert_eq!(records[1].url, urls[2]);
    assert!(records[1].is_not_shipped());

    let saved = store::load(dir.path().join("data.json")).unwrap();
    let saved = saved.as_array().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0]["price_GBP"], 1249.99);
    assert_eq!(saved[1]["ship_price"], "N/A");
}

#[tokio::test]
async fn test_single_failed_fetch_is_error() {
    let server = MockServer::start().await;
    mount_page(&server, "/itm/gone", 404, "").await;

    let dir = TempDir::new().unwrap();
    let config = make_test_config(&dir);
    let client = EbayClient::new(&config).await.unwrap();
    let cmd = ScrapeCommand::new(config);

    let url = format!("{}/itm/gone", server.uri());
    let result = cmd.execute_with_client(&client, &[url]).await;

    assert!(result.unwrap_err().to_string().contains("No content returned"));
    assert!(!dir.path().join("data.json").exists());
}

#[tokio::test]
async fn test_single_writes_object() {
    let server = MockServer::start().await;
    mount_page(&server, "/itm/1", 200, ITEM_FIXTURE).await;

    let dir = TempDir::new().unwrap();
    let config = make_test_config(&dir);
    let client = EbayClient::new(&config).await.unwrap();
    let cmd = ScrapeCommand::new(config);

    let url = format!("{}/itm/1", server.uri());
    let scraped = cmd.execute_with_client(&client, &[url.clone()]).await.unwrap();
    assert!(matches!(scraped, Scraped::Single(_)));

    let saved = store::load(dir.path().join("data.json")).unwrap();
    assert!(saved.is_object());
    assert_eq!(saved["url"], url.as_str());
    assert_eq!(saved["options"].as_array().unwrap().len(), 3);
}
