//! Integration tests for `DieselCounterStore` against PostgreSQL.
//!
//! The suite runs only when `DOCKET_TEST_DATABASE_URL` points at a database
//! the tests may write to; otherwise every test reports a skip and passes.
//! Each test uses a fresh random owner so runs never collide.
//!
//! Steps stay synchronous and share one Tokio runtime held in the context.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use docket::domain::ports::{CounterStore, CounterStoreError};
use docket::domain::{
    CounterKey, CounterMutation, CounterTransition, DocumentPrefix, SerialDate, UserId,
};
use docket::outbound::persistence::{
    DbPool, DieselCounterStore, PoolConfig, run_pending_migrations,
};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use tokio::runtime::Runtime;

const DATABASE_URL_ENV: &str = "DOCKET_TEST_DATABASE_URL";

struct TestContext {
    runtime: Runtime,
    store: DieselCounterStore,
    key: CounterKey,
    last_result: Option<Result<CounterTransition, CounterStoreError>>,
}

type SharedContext = Arc<Mutex<TestContext>>;

fn setup_test_context(database_url: &str) -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    runtime
        .block_on(run_pending_migrations(database_url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database_url).with_max_size(8)))
        .map_err(|err| err.to_string())?;
    let key = CounterKey::new(
        UserId::random(),
        DocumentPrefix::new("DN").map_err(|err| err.to_string())?,
        SerialDate::today(&mockable::DefaultClock),
    );

    Ok(TestContext {
        runtime,
        store: DieselCounterStore::new(pool),
        key,
        last_result: None,
    })
}

#[fixture]
fn diesel_world() -> Option<SharedContext> {
    let Ok(database_url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP: {DATABASE_URL_ENV} not set");
        return None;
    };
    match setup_test_context(&database_url) {
        Ok(ctx) => Some(Arc::new(Mutex::new(ctx))),
        Err(reason) => panic!("counter store setup failed: {reason}"),
    }
}

fn apply(world: &SharedContext, mutation: CounterMutation) {
    let (store, key, handle) = {
        let ctx = world.lock().expect("context lock");
        (ctx.store.clone(), ctx.key.clone(), ctx.runtime.handle().clone())
    };
    let result = handle.block_on(async move { store.apply(&key, mutation, Utc::now()).await });
    world.lock().expect("context lock").last_result = Some(result);
}

fn stored_last_number(world: &SharedContext) -> Option<u64> {
    let (store, key, handle) = {
        let ctx = world.lock().expect("context lock");
        (ctx.store.clone(), ctx.key.clone(), ctx.runtime.handle().clone())
    };
    handle
        .block_on(async move { store.find(&key).await })
        .expect("find succeeds")
        .map(|counter| counter.last_number)
}

#[given("a Diesel-backed counter store")]
fn a_diesel_backed_counter_store(_world: SharedContext) {}

#[when("the counter is incremented")]
fn the_counter_is_incremented(world: SharedContext) {
    apply(&world, CounterMutation::Increment);
}

#[when("the counter is reset")]
fn the_counter_is_reset(world: SharedContext) {
    apply(&world, CounterMutation::Reset);
}

#[then("the committed value is returned")]
fn the_committed_value_is_returned(world: SharedContext, expected: u64) {
    let ctx = world.lock().expect("context lock");
    match ctx.last_result.as_ref().expect("mutation was applied") {
        Ok(transition) => {
            assert_eq!(transition.counter.last_number, expected);
            assert_eq!(transition.counter.key, ctx.key);
        }
        Err(err) => panic!("expected committed counter, got {err}"),
    }
}

#[then("the replaced value is reported")]
fn the_replaced_value_is_reported(world: SharedContext, expected: u64) {
    let ctx = world.lock().expect("context lock");
    match ctx.last_result.as_ref().expect("mutation was applied") {
        Ok(transition) => assert_eq!(transition.previous_number, expected),
        Err(err) => panic!("expected committed counter, got {err}"),
    }
}

#[rstest]
fn unseen_counters_read_as_absent(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        return;
    };
    a_diesel_backed_counter_store(world.clone());
    assert_eq!(stored_last_number(&world), None);
}

#[rstest]
fn increments_create_then_advance_the_counter(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        return;
    };
    a_diesel_backed_counter_store(world.clone());
    the_counter_is_incremented(world.clone());
    the_committed_value_is_returned(world.clone(), 1);
    the_counter_is_incremented(world.clone());
    the_committed_value_is_returned(world.clone(), 2);
    assert_eq!(stored_last_number(&world), Some(2));
}

#[rstest]
fn reset_returns_counter_to_zero(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        return;
    };
    a_diesel_backed_counter_store(world.clone());
    for _ in 0..3 {
        the_counter_is_incremented(world.clone());
    }
    the_counter_is_reset(world.clone());
    the_committed_value_is_returned(world.clone(), 0);
    the_replaced_value_is_reported(world.clone(), 3);
    the_counter_is_incremented(world.clone());
    the_committed_value_is_returned(world.clone(), 1);
}

#[rstest]
fn concurrent_increments_never_share_a_value(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        return;
    };
    let (store, key, handle) = {
        let ctx = world.lock().expect("context lock");
        (ctx.store.clone(), ctx.key.clone(), ctx.runtime.handle().clone())
    };
    let store = store.with_max_attempts(10);

    let issued: BTreeSet<u64> = handle.block_on(async move {
        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                let key = key.clone();
                tokio::spawn(async move {
                    store
                        .apply(&key, CounterMutation::Increment, Utc::now())
                        .await
                        .expect("increment commits")
                        .counter
                        .last_number
                })
            })
            .collect();
        let mut issued = BTreeSet::new();
        for task in tasks {
            issued.insert(task.await.expect("task completes"));
        }
        issued
    });

    assert_eq!(issued, (1..=32).collect::<BTreeSet<u64>>());
}
