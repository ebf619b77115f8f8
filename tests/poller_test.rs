use hypeburn::config::PollIntervals;
use hypeburn::datasource::MockDataSource;
use hypeburn::domain::{Address, Coin, Decimal, TokenSupplyInfo};
use hypeburn::engine::accountant::ASSISTANCE_FUND_ADDRESS;
use hypeburn::engine::SupplyAccountant;
use hypeburn::orchestration::{Poller, SnapshotStore, SourceKind};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn setup(mock: MockDataSource) -> Poller {
    Poller::new(
        Arc::new(mock),
        SnapshotStore::new(),
        Arc::new(SupplyAccountant::default()),
        PollIntervals::default(),
    )
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_value() {
    let mock = MockDataSource::new().with_staked_balance(d("377323774.95"));
    let poller = setup(mock.clone());

    assert_ok!(poller.refresh(SourceKind::StakedBalance).await);
    let before = poller.store().read().await.staked_balance.clone().unwrap();

    mock.set_failing(true);
    assert_err!(poller.refresh(SourceKind::StakedBalance).await);

    let after = poller.store().read().await.staked_balance.clone().unwrap();
    assert_eq!(after, before);
    assert_eq!(after.value, d("377323774.95"));
}

#[tokio::test]
async fn test_sources_refresh_independently() {
    // Token info succeeds while every balance source is unset
    let mock = MockDataSource::new()
        .with_token_info(TokenSupplyInfo::new(d("999797691.23"), d("334340095.17")));
    let poller = setup(mock);

    poller.refresh_all().await;

    let snapshot = poller.store().read().await;
    assert!(snapshot.token_info().is_some());
    assert!(snapshot.staked_balance.is_none());
    assert!(snapshot.market().is_none());

    let balances = snapshot.external_balances();
    assert!(!balances.is_complete());
    assert_eq!(balances.resolved().staked_balance, Decimal::zero());
}

#[tokio::test]
async fn test_refresh_all_fetches_sources_concurrently() {
    let mock = MockDataSource::new()
        .with_token_info(TokenSupplyInfo::new(d("999797691.23"), d("334340095.17")))
        .with_latency(Duration::from_millis(200));
    let poller = setup(mock);

    let started = std::time::Instant::now();
    poller.refresh_all().await;
    let elapsed = started.elapsed();

    // One round of latency, not one per source
    assert!(elapsed < Duration::from_millis(200) * 3, "took {:?}", elapsed);
    assert!(poller.store().read().await.token_info().is_some());
}

#[tokio::test]
async fn test_perp_dex_stake_stored_as_bond_total() {
    let poller = setup(MockDataSource::new().with_perp_dex_deployers(4));

    assert_ok!(poller.refresh(SourceKind::PerpDexStake).await);
    let snapshot = poller.store().read().await;
    assert_eq!(
        snapshot.external_balances().perp_dex_stake,
        Some(d("2000000"))
    );
}

#[tokio::test]
async fn test_assistance_fund_usdc_kept_apart_from_hype() {
    let fund = Address::new(ASSISTANCE_FUND_ADDRESS);
    let mock = MockDataSource::new()
        .with_spot_balance(&fund, &Coin::hype(), d("2701228.54"))
        .with_spot_balance(&fund, &Coin::usdc(), d("1250000.5"));
    let poller = setup(mock);

    assert_ok!(poller.refresh(SourceKind::AssistanceFundUsdc).await);
    let snapshot = poller.store().read().await;
    assert_eq!(snapshot.assistance_fund_usdc(), Some(d("1250000.5")));
    assert_eq!(snapshot.external_balances().assistance_fund_balance, None);
}

#[tokio::test]
async fn test_spawned_pollers_fill_snapshot() {
    let mock = MockDataSource::new()
        .with_token_info(TokenSupplyInfo::new(d("999797691.23"), d("334340095.17")));
    let poller = Poller::new(
        Arc::new(mock),
        SnapshotStore::new(),
        Arc::new(SupplyAccountant::default()),
        PollIntervals {
            fast: Duration::from_millis(10),
            metrics: Duration::from_millis(10),
            slow: Duration::from_millis(10),
        },
    );

    let handles = poller.spawn_all();
    assert_eq!(handles.len(), SourceKind::ALL.len());

    // The first interval tick fires immediately
    let mut loaded = false;
    for _ in 0..50 {
        if poller.store().read().await.token_info().is_some() {
            loaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    for handle in handles {
        handle.abort();
    }
    assert!(loaded);
}
