use axum::http::StatusCode;
use hypeburn::api::{self, AppState};
use hypeburn::config::PollIntervals;
use hypeburn::datasource::MockDataSource;
use hypeburn::domain::{
    Address, Coin, Decimal, MarketContext, NonCirculatingBalance, TokenSupplyInfo,
};
use hypeburn::engine::accountant::{
    ASSISTANCE_FUND_ADDRESS, EVM_BRIDGE_ADDRESS, FOUNDATION_ADDRESSES,
};
use hypeburn::engine::SupplyAccountant;
use hypeburn::orchestration::{Poller, SnapshotStore};
use std::sync::Arc;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    poller: Poller,
}

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn reference_datasource() -> MockDataSource {
    let token = TokenSupplyInfo::new(d("999797691.23"), d("334340095.17"))
        .with_future_emissions(d("421000000"))
        .with_non_circulating(NonCirculatingBalance::new(FOUNDATION_ADDRESSES[0], "200000000"));

    MockDataSource::new()
        .with_token_info(token)
        .with_staked_balance(d("377323774.95"))
        .with_delegation(&Address::new(FOUNDATION_ADDRESSES[0]), d("200000000"))
        .with_delegation(&Address::new(FOUNDATION_ADDRESSES[1]), d("100900053.55"))
        .with_perp_dex_deployers(0)
        .with_spot_balance(&Address::new(EVM_BRIDGE_ADDRESS), &Coin::hype(), d("30000000"))
        .with_spot_balance(
            &Address::new(ASSISTANCE_FUND_ADDRESS),
            &Coin::hype(),
            d("2701228.54"),
        )
        .with_spot_balance(
            &Address::new(ASSISTANCE_FUND_ADDRESS),
            &Coin::usdc(),
            d("1250000.5"),
        )
        .with_burnt_evm_total(d("40000"))
        .with_market(MarketContext {
            mark_px: d("40"),
            prev_day_px: d("50"),
            day_ntl_vlm: d("1000000"),
        })
}

fn setup_test_app(datasource: MockDataSource) -> TestApp {
    let datasource = Arc::new(datasource);
    let store = SnapshotStore::new();
    let accountant = Arc::new(SupplyAccountant::default());
    let poller = Poller::new(
        datasource.clone(),
        store.clone(),
        accountant.clone(),
        PollIntervals::default(),
    );
    let app = api::create_router(AppState::new(store, accountant, datasource));
    TestApp { app, poller }
}

async fn request(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, value)
}

fn assert_close(value: &serde_json::Value, expected: f64) {
    let actual = value.as_f64().unwrap();
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[tokio::test]
async fn test_supply_unavailable_before_first_poll() {
    let test_app = setup_test_app(reference_datasource());

    let (status, body) = request(test_app.app.clone(), "/v1/supply").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("token info"));
}

#[tokio::test]
async fn test_supply_breakdown_reference_snapshot() {
    let test_app = setup_test_app(reference_datasource());
    test_app.poller.refresh_all().await;

    let (status, v) = request(test_app.app.clone(), "/v1/supply").await;
    assert_eq!(status, StatusCode::OK);

    assert_close(&v["burnedTradingFees"], 202308.77);
    assert_close(&v["burnedEvm"], 40000.0);
    assert_close(&v["stakedCirculating"], 76423721.40);
    assert_close(&v["assistanceCirculating"], 2701228.54);
    assert_close(&v["evmCirculating"], 29960000.0);
    assert_close(&v["perpDexCirculating"], 0.0);
    assert_close(&v["nonCirculatingOther"], 200000000.0);
    assert_close(&v["nonCirculatingFutureEmissions"], 421000000.0);
    assert_close(&v["readyForSaleSupply"], 255215145.23);

    let segments_total = v["otherCirculating"].as_f64().unwrap()
        + v["stakedCirculating"].as_f64().unwrap()
        + v["perpDexCirculating"].as_f64().unwrap()
        + v["assistanceCirculating"].as_f64().unwrap()
        + v["evmCirculating"].as_f64().unwrap();
    assert!((segments_total - 334340095.17).abs() < 1e-4);
}

#[tokio::test]
async fn test_supply_exclusion_toggles() {
    let test_app = setup_test_app(reference_datasource().with_perp_dex_deployers(2));
    test_app.poller.refresh_all().await;

    let (_, base) = request(test_app.app.clone(), "/v1/supply").await;
    let (_, no_evm) = request(test_app.app.clone(), "/v1/supply?excludeEvm=true").await;
    let (_, no_perp) = request(test_app.app.clone(), "/v1/supply?excludePerpDex=true").await;

    let base_ready = base["readyForSaleSupply"].as_f64().unwrap();
    assert_close(&no_evm["readyForSaleSupply"], base_ready - 29960000.0);
    assert_close(&no_perp["readyForSaleSupply"], base_ready - 1000000.0);
    // Perp-dex bonds come out of the staked segment
    assert_close(&base["perpDexCirculating"], 1000000.0);
    assert_close(&base["stakedCirculating"], 75423721.40);
}

#[tokio::test]
async fn test_supply_bad_toggle_rejected() {
    let test_app = setup_test_app(reference_datasource());
    test_app.poller.refresh_all().await;

    let (status, _) = request(test_app.app.clone(), "/v1/supply?excludeEvm=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_segments_floor_small_slices() {
    let test_app = setup_test_app(reference_datasource());
    test_app.poller.refresh_all().await;

    let (status, v) = request(test_app.app.clone(), "/v1/supply/segments").await;
    assert_eq!(status, StatusCode::OK);

    let segments = v.as_array().unwrap();
    assert_eq!(segments.len(), 8);

    let burn = segments
        .iter()
        .find(|s| s["kind"] == "burnTradingFees")
        .unwrap();
    assert_eq!(burn["label"], "Burn From Trading Fees");
    assert_close(&burn["displayAmount"], 202308.77);
    // 0.25% of total supply
    assert_close(&burn["amount"], 2499494.228075);

    let staked = segments
        .iter()
        .find(|s| s["kind"] == "circulatingStaked")
        .unwrap();
    assert_close(&staked["amount"], 76423721.40);
    assert_close(&staked["circulatingSupply"], 334340095.17);
}

#[tokio::test]
async fn test_stats_reports_burns_and_market() {
    let test_app = setup_test_app(reference_datasource());
    test_app.poller.refresh_all().await;

    let (status, v) = request(test_app.app.clone(), "/v1/stats").await;
    assert_eq!(status, StatusCode::OK);

    assert_close(&v["burnedCore"], 202308.77);
    assert_close(&v["burnedEvm"], 40000.0);
    assert_close(&v["burnedAssistanceFund"], 2701228.54);
    assert_close(&v["totalBurned"], 202308.77 + 40000.0 + 2701228.54);
    assert_close(&v["availableSupply"], 334300095.17);
    assert_close(&v["adjustedTotalSupply"], 999757691.23);
    // The only non-circulating wallet is the FDV foundation wallet
    assert_close(&v["fdvSupply"], 999797691.23);
    // USDC is reported beside the HYPE figures, never mixed into them
    assert_close(&v["assistanceFundUsdc"], 1250000.5);

    let market = &v["market"];
    assert_close(&market["markPrice"], 40.0);
    assert_eq!(market["priceChange"]["direction"], "down");
    assert_close(&market["priceChange"]["percent"], 0.2);
    assert_close(&market["marketCap"], 40.0 * 334300095.17);
}

#[tokio::test]
async fn test_health_and_ready() {
    let test_app = setup_test_app(MockDataSource::new().with_token_info(TokenSupplyInfo::new(
        d("999797691.23"),
        d("334340095.17"),
    )));

    let (status, v) = request(test_app.app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");

    let (status, v) = request(test_app.app.clone(), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(v["status"], "loading");

    test_app.poller.refresh_all().await;
    let (status, v) = request(test_app.app.clone(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ready");
    assert_eq!(v["balancesComplete"], false);
}
