//! Documentation cache behavior against a mock inventory server.

mod common;

use assert_matches::assert_matches;
use melody::utils::docs::{resolve_alias, DocStore, DocsError};
use melody::utils::fuzzy::finder;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> DocStore {
    DocStore::with_base_url(reqwest::Client::new(), server.uri())
}

async fn mount_inventory(server: &MockServer, target_key: &str, records: &str, expect: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{target_key}/objects.inv")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(common::build_inventory(records)))
        .expect(expect)
        .mount(server)
        .await;
}

#[tokio::test]
async fn sequential_resolves_fetch_the_inventory_once() {
    common::init();
    let server = MockServer::start().await;
    mount_inventory(
        &server,
        "python",
        "json.dumps py:function 1 library/json.html#$ -\n",
        1,
    )
    .await;

    let store = store_for(&server);
    let target = resolve_alias("python").unwrap();

    let first = store.resolve(target).await.unwrap();
    let second = store.resolve(target).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn concurrent_resolves_are_deduplicated() {
    common::init();
    let server = MockServer::start().await;
    mount_inventory(
        &server,
        "numpy",
        "numpy.array py:function 1 reference/generated/numpy.array.html -\n",
        1,
    )
    .await;

    let store = store_for(&server);
    let target = resolve_alias("numpy").unwrap();

    let (a, b) = tokio::join!(store.resolve(target), store.resolve(target));
    assert_eq!(a.unwrap(), b.unwrap());
}

#[tokio::test]
async fn non_success_status_fails_and_is_not_cached() {
    common::init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flask/objects.inv"))
        .respond_with(ResponseTemplate::new(500))
        // One fetch per attempt proves the failure was not memoized.
        .expect(2)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let target = resolve_alias("flask").unwrap();

    assert_matches!(store.resolve(target).await, Err(DocsError::Status(_)));
    assert_matches!(store.resolve(target).await, Err(DocsError::Status(_)));
}

#[tokio::test]
async fn garbage_payloads_surface_as_inventory_errors() {
    common::init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/requests/objects.inv"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not an inventory".to_vec()))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let target = resolve_alias("requests").unwrap();

    assert_matches!(store.resolve(target).await, Err(DocsError::Inventory(_)));
}

#[tokio::test]
async fn resolved_index_feeds_the_fuzzy_finder() {
    common::init();
    let server = MockServer::start().await;
    mount_inventory(
        &server,
        "simplejson",
        "json.dumps py:function 1 library/json.html#$ -\n\
         json.loads py:function 1 library/json.html#$ -\n\
         os.path py:module 0 library/os.path.html -\n",
        1,
    )
    .await;

    let store = store_for(&server);
    let target = resolve_alias("json").unwrap();
    let index = store.resolve(target).await.unwrap();

    let results = finder("json", &index, 10);
    let names: Vec<_> = results.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["json.dumps", "json.loads"]);
}
