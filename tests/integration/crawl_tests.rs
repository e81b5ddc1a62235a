//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end through the real HTTP fetcher.

use sumi_frontier::config::{Config, FetchConfig, UserAgentConfig};
use sumi_frontier::crawler::{run_crawl, Coordinator, HtmlLinkExtractor, HttpFetcher};
use sumi_frontier::output::RecordingReporter;
use sumi_frontier::{CrawlSession, FetchFailure, Location, Termination};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestCoordinator = Coordinator<HttpFetcher, HtmlLinkExtractor, RecordingReporter>;

fn create_coordinator() -> TestCoordinator {
    let fetcher = HttpFetcher::new(&UserAgentConfig::default(), &FetchConfig::default())
        .expect("Failed to build HTTP client");
    Coordinator::new(fetcher, HtmlLinkExtractor::new(), RecordingReporter::new())
}

fn loc(url: &str) -> Location {
    Location::parse(url).expect("Failed to parse test URL")
}

/// Mounts an HTML page at the given path
async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_exhausts_small_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <a href="/page1">Page 1</a>
        <a href="page2">Page 2</a>
        <a href="/page1#section">Page 1 again</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        r#"<html><body><a href="/page2">Page 2</a><a href="/page3">Page 3</a></body></html>"#,
    )
    .await;
    mount_page(&mock_server, "/page2", "<html><body>Leaf</body></html>").await;
    mount_page(
        &mock_server,
        "/page3",
        r#"<html><body><a href="/page1">Back</a></body></html>"#,
    )
    .await;

    let mut session = CrawlSession::new(loc(&base_url), 50);
    let mut coordinator = create_coordinator();

    let summary = coordinator.run(&mut session).await;

    let visited: Vec<String> = session
        .visit_order()
        .iter()
        .map(|location| location.to_string())
        .collect();
    assert_eq!(
        visited,
        vec![
            base_url.clone(),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
            format!("{}/page3", base_url),
        ]
    );
    assert_eq!(summary.termination, Termination::ExhaustedFrontier);
    assert_eq!(summary.pages_visited, 4);
    assert_eq!(summary.failures, 0);
    assert!(coordinator.reporter().failures().is_empty());
}

#[tokio::test]
async fn test_error_statuses_do_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/missing">Missing</a>
        <a href="/broken">Broken</a>
        <a href="/fine">Fine</a>
        </body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"<a href="/never">Never</a>"#),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fine", "<html><body>Fine</body></html>").await;
    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut session = CrawlSession::new(loc(&base_url), 50);
    let mut coordinator = create_coordinator();

    let summary = coordinator.run(&mut session).await;

    assert_eq!(summary.pages_visited, 4);
    assert_eq!(summary.failures, 2);
    assert!(session.is_visited(&loc(&format!("{}/fine", base_url))));
    assert!(!session.is_visited(&loc(&format!("{}/never", base_url))));

    let missing = loc(&format!("{}/missing", base_url));
    let broken = loc(&format!("{}/broken", base_url));
    assert_eq!(
        coordinator.reporter().failures(),
        vec![
            (&missing, &FetchFailure::Status(404)),
            (&broken, &FetchFailure::Status(500)),
        ]
    );
}

#[tokio::test]
async fn test_budget_limits_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/page1">1</a>"#).await;
    mount_page(&mock_server, "/page1", r#"<a href="/page2">2</a>"#).await;
    mount_page(&mock_server, "/page2", r#"<a href="/page3">3</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/page3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut session = CrawlSession::new(loc(&base_url), 3);
    let mut coordinator = create_coordinator();

    let summary = coordinator.run(&mut session).await;

    assert_eq!(summary.termination, Termination::BudgetReached);
    assert_eq!(summary.pages_visited, 3);
    assert_eq!(summary.pending_remaining, 1);
    assert!(session.is_pending(&loc(&format!("{}/page3", base_url))));
    assert_eq!(coordinator.reporter().fetched().len(), 3);
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/old">Old</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/new", r#"<a href="/after">After</a>"#).await;
    mount_page(&mock_server, "/after", "<html><body>Done</body></html>").await;

    let mut session = CrawlSession::new(loc(&base_url), 50);
    let mut coordinator = create_coordinator();

    let summary = coordinator.run(&mut session).await;

    assert_eq!(summary.failures, 0);
    assert!(session.is_visited(&loc(&format!("{}/old", base_url))));
    assert!(session.is_visited(&loc(&format!("{}/after", base_url))));
    // The redirect target is not recorded under its own Location
    assert!(!session.is_visited(&loc(&format!("{}/new", base_url))));
    assert_eq!(summary.pages_visited, 3);
}

#[tokio::test]
async fn test_run_crawl_writes_summary() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_page(&mock_server, "/a", "A").await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let summary_path = dir.path().join("summary.md");

    let mut config = Config::for_seed(base_url.clone());
    config.crawler.max_pages = 10;
    config.output.summary_path = Some(summary_path.to_string_lossy().into_owned());

    let summary = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(summary.pages_visited, 3);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.termination, Termination::ExhaustedFrontier);

    let markdown = std::fs::read_to_string(&summary_path).expect("Summary not written");
    assert!(markdown.contains(&format!("{}/a", base_url)));
    assert!(markdown.contains(&format!("{}/b", base_url)));
}

#[tokio::test]
async fn test_unreachable_seed_ends_crawl() {
    // Nothing listens on the discard port
    let mut session = CrawlSession::new(loc("http://127.0.0.1:9/"), 5);
    let mut coordinator = create_coordinator();

    let summary = coordinator.run(&mut session).await;

    assert_eq!(summary.pages_visited, 1);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.termination, Termination::ExhaustedFrontier);
    assert!(matches!(
        coordinator.reporter().failures()[0].1,
        FetchFailure::Transport(_)
    ));
}
