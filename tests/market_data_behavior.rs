//! Behavior-driven tests for the MOEX market data adapter.
//!
//! These tests verify HOW the adapter reacts to upstream failures: how many
//! attempts it makes, how long it waits between them, and what the caller sees
//! once the retry budget is spent. Time is driven by tokio's paused clock so
//! backoff delays are observed exactly.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use riskline_core::{
    FetchFailure, HttpClient, HttpError, HttpRequest, HttpResponse, MarketDataProvider,
    MoexClient, MoexConfig, RiskErrorKind, Ticker,
};
use rust_decimal_macros::dec;
use tokio::time::Instant;

const SBER_BODY: &str = r#"{
    "securities": {"columns": ["SECID"], "data": [["SBER"]]},
    "marketdata": {
        "columns": ["SECID", "BOARDID", "BID", "OFFER", "LAST"],
        "data": [["SBER", "TQBR", 268.4, 268.5, 268.45]]
    }
}"#;

/// Transport double that replays a script and records when each call happened.
enum Step {
    Respond(Result<HttpResponse, HttpError>),
    Hang,
}

struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<(Instant, HttpRequest)>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.lock().expect("call log should not be poisoned").len()
    }

    fn call_instants(&self) -> Vec<Instant> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .iter()
            .map(|(at, _)| *at)
            .collect()
    }

    fn urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .iter()
            .map(|(_, request)| request.url.clone())
            .collect()
    }
}

impl HttpClient for ScriptedTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .push((Instant::now(), request));
        let step = self
            .script
            .lock()
            .expect("script should not be poisoned")
            .pop_front()
            .unwrap_or(Step::Respond(Err(HttpError::new("script exhausted"))));

        match step {
            Step::Respond(response) => Box::pin(async move { response }),
            Step::Hang => Box::pin(std::future::pending::<Result<HttpResponse, HttpError>>()),
        }
    }
}

/// Transport double keyed by ticker, so concurrent lookups follow separate scripts.
struct RoutedTransport {
    routes: Mutex<HashMap<String, VecDeque<Step>>>,
    calls: Mutex<Vec<(Instant, String)>>,
}

impl RoutedTransport {
    fn new(routes: Vec<(&str, Vec<Step>)>) -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(
                routes
                    .into_iter()
                    .map(|(ticker, script)| (ticker.to_owned(), script.into()))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls_for(&self, ticker: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .iter()
            .filter(|(_, called)| called == ticker)
            .map(|(at, _)| *at)
            .collect()
    }
}

impl HttpClient for RoutedTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let ticker = request
            .url
            .rsplit('/')
            .next()
            .and_then(|segment| segment.strip_suffix(".json"))
            .unwrap_or_default()
            .to_owned();
        let step = self
            .routes
            .lock()
            .expect("routes should not be poisoned")
            .get_mut(&ticker)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Step::Respond(Err(HttpError::new("script exhausted"))));
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .push((Instant::now(), ticker));

        match step {
            Step::Respond(response) => Box::pin(async move { response }),
            Step::Hang => Box::pin(std::future::pending::<Result<HttpResponse, HttpError>>()),
        }
    }
}

fn connection_refused() -> Step {
    Step::Respond(Err(HttpError::new("connection failed: refused")))
}

fn body(json: &str) -> Step {
    Step::Respond(Ok(HttpResponse::ok_json(json)))
}

fn client(transport: Arc<dyn HttpClient>, retries: u32, backoff: Duration) -> MoexClient {
    let config = MoexConfig::new("https://iss.moex.test", Duration::from_secs(5), retries, backoff)
        .expect("valid config");
    MoexClient::with_http_client(config, transport)
}

fn sber() -> Ticker {
    Ticker::parse("SBER").expect("valid ticker")
}

// =============================================================================
// Market data: recovery within the retry budget
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_first_two_attempts_fail_third_succeeds_with_linear_backoff() {
    // Given: A transport that fails twice before answering, 3 attempts, 100ms base
    let transport = ScriptedTransport::new(vec![
        connection_refused(),
        Step::Respond(Ok(HttpResponse::with_status(503, "unavailable"))),
        body(SBER_BODY),
    ]);
    let client = client(transport.clone(), 3, Duration::from_millis(100));

    // When: The last price is requested
    let fact = client.last_price(&sber()).await.expect("third attempt succeeds");

    // Then: The parsed price is returned
    assert_eq!(fact.ticker().as_str(), "SBER");
    assert_eq!(fact.last_price(), dec!(268.45));

    // And: The waits between attempts were base*1 then base*2
    let instants = transport.call_instants();
    assert_eq!(instants.len(), 3);
    let first_gap = instants[1] - instants[0];
    let second_gap = instants[2] - instants[1];
    assert_eq!(first_gap, Duration::from_millis(100));
    assert_eq!(second_gap, Duration::from_millis(200));
    assert!(second_gap > first_gap);
}

#[tokio::test(start_paused = true)]
async fn success_on_first_attempt_makes_a_single_call() {
    let transport = ScriptedTransport::new(vec![body(SBER_BODY)]);
    let client = client(transport.clone(), 3, Duration::from_millis(100));

    let fact = client.fetch_last_price(&sber()).await.expect("price");

    assert_eq!(fact.last_price(), dec!(268.45));
    assert_eq!(transport.call_count(), 1);
    assert_eq!(
        transport.urls(),
        vec![String::from(
            "https://iss.moex.test/iss/engines/stock/markets/shares/securities/SBER.json"
        )]
    );
}

// =============================================================================
// Market data: exhausting the retry budget
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_every_attempt_fails_exactly_retries_calls_are_made() {
    // Given: A transport that always refuses the connection
    let transport = ScriptedTransport::new(vec![
        connection_refused(),
        connection_refused(),
        connection_refused(),
        connection_refused(),
    ]);
    let client = client(transport.clone(), 3, Duration::from_millis(50));
    let started = Instant::now();

    // When: The last price is requested
    let error = client.last_price(&sber()).await.expect_err("must fail");

    // Then: One external data error after exactly three attempts
    assert_eq!(error.kind(), RiskErrorKind::ExternalData);
    assert_eq!(transport.call_count(), 3);
    assert!(error.to_string().contains("'SBER' after 3 attempt(s)"));
    assert!(matches!(error.cause(), Some(FetchFailure::Transport(_))));

    // And: Only the two intermediate backoffs were slept through
    assert_eq!(started.elapsed(), Duration::from_millis(150));
}

#[tokio::test(start_paused = true)]
async fn single_attempt_budget_never_sleeps() {
    let transport = ScriptedTransport::new(vec![connection_refused()]);
    let client = client(transport.clone(), 1, Duration::from_secs(10));
    let started = Instant::now();

    let error = client.last_price(&sber()).await.expect_err("must fail");

    assert_eq!(error.kind(), RiskErrorKind::ExternalData);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn last_observed_cause_is_reported() {
    let transport = ScriptedTransport::new(vec![
        connection_refused(),
        Step::Respond(Ok(HttpResponse::with_status(500, "boom"))),
    ]);
    let client = client(transport, 2, Duration::ZERO);

    let error = client.last_price(&sber()).await.expect_err("must fail");

    assert_eq!(error.cause(), Some(&FetchFailure::Status(500)));
}

// =============================================================================
// Market data: semantically incomplete payloads
// =============================================================================

#[tokio::test(start_paused = true)]
async fn missing_last_column_is_retried_not_a_crash() {
    // Given: A row without a LAST column, then a good payload
    let transport = ScriptedTransport::new(vec![
        body(r#"{"marketdata": {"columns": ["SECID", "BID"], "data": [["SBER", 268.4]]}}"#),
        body(SBER_BODY),
    ]);
    let client = client(transport.clone(), 3, Duration::from_millis(10));

    // When: The last price is requested
    let fact = client.last_price(&sber()).await.expect("second attempt succeeds");

    // Then: The defective payload cost one retry
    assert_eq!(fact.last_price(), dec!(268.45));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn null_last_cell_is_retried_then_reported() {
    let null_last = r#"{"marketdata": {"columns": ["SECID", "LAST"], "data": [["SBER", null]]}}"#;
    let transport = ScriptedTransport::new(vec![body(null_last), body(null_last)]);
    let client = client(transport.clone(), 2, Duration::from_millis(10));

    let error = client.last_price(&sber()).await.expect_err("must fail");

    assert_eq!(transport.call_count(), 2);
    assert_eq!(error.kind(), RiskErrorKind::ExternalData);
    assert_eq!(error.cause(), Some(&FetchFailure::MissingValue("LAST")));
}

#[tokio::test(start_paused = true)]
async fn empty_rows_and_garbage_are_external_data_errors() {
    let transport = ScriptedTransport::new(vec![
        body(r#"{"marketdata": {"columns": ["LAST"], "data": []}}"#),
        body("<html>maintenance</html>"),
    ]);
    let client = client(transport, 2, Duration::ZERO);

    let error = client.last_price(&sber()).await.expect_err("must fail");

    assert_eq!(error.kind(), RiskErrorKind::ExternalData);
    assert!(matches!(error.cause(), Some(FetchFailure::MalformedPayload(_))));
}

// =============================================================================
// Market data: timeouts and deadlines
// =============================================================================

#[tokio::test(start_paused = true)]
async fn hung_transport_is_cut_off_by_per_attempt_timeout() {
    // Given: A transport that never answers, 5s timeout, 2 attempts, 1s base
    let transport = ScriptedTransport::new(vec![Step::Hang, Step::Hang]);
    let client = client(transport.clone(), 2, Duration::from_secs(1));
    let started = Instant::now();

    // When: The last price is requested
    let error = client.last_price(&sber()).await.expect_err("must fail");

    // Then: Each attempt gave up after the timeout
    assert_eq!(transport.call_count(), 2);
    assert_eq!(error.cause(), Some(&FetchFailure::Timeout { timeout_ms: 5_000 }));
    assert_eq!(started.elapsed(), Duration::from_secs(11));
}

#[tokio::test(start_paused = true)]
async fn outer_deadline_aborts_mid_backoff_with_same_error_kind() {
    // Given: Backoff far longer than the caller's deadline
    let transport = ScriptedTransport::new(vec![connection_refused(), body(SBER_BODY)]);
    let client = client(transport.clone(), 3, Duration::from_secs(2));

    // When: The lookup is bounded by a 500ms deadline
    let error = client
        .last_price_within(&sber(), Duration::from_millis(500))
        .await
        .expect_err("deadline must elapse");

    // Then: It is reported as external data, after a single attempt
    assert_eq!(error.kind(), RiskErrorKind::ExternalData);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(
        error.cause(),
        Some(&FetchFailure::DeadlineExceeded { deadline_ms: 500 })
    );
    assert!(error.to_string().contains("after 1 attempt(s)"));
}

#[tokio::test(start_paused = true)]
async fn generous_deadline_does_not_change_the_result() {
    let transport = ScriptedTransport::new(vec![connection_refused(), body(SBER_BODY)]);
    let client = client(transport, 3, Duration::from_millis(100));

    let fact = client
        .last_price_within(&sber(), Duration::from_secs(30))
        .await
        .expect("price within deadline");

    assert_eq!(fact.last_price(), dec!(268.45));
}

// =============================================================================
// Market data: independence of calls
// =============================================================================

#[tokio::test(start_paused = true)]
async fn failed_call_does_not_affect_the_next_one() {
    let transport = ScriptedTransport::new(vec![
        connection_refused(),
        connection_refused(),
        body(SBER_BODY),
    ]);
    let client = client(transport.clone(), 2, Duration::ZERO);

    let first = client.last_price(&sber()).await;
    let second = client.last_price(&sber()).await;

    assert!(first.is_err());
    assert_eq!(second.expect("fresh budget").last_price(), dec!(268.45));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn provider_can_be_used_as_trait_object() {
    let transport = ScriptedTransport::new(vec![body(SBER_BODY)]);
    let provider: Arc<dyn MarketDataProvider> = Arc::new(client(transport, 1, Duration::ZERO));

    let fact = provider.last_price(&sber()).await.expect("price");

    assert_eq!(fact.last_price(), dec!(268.45));
}

// =============================================================================
// Market data: concurrent lookups on a shared client
// =============================================================================

#[tokio::test(start_paused = true)]
async fn backoff_in_one_lookup_does_not_delay_another() {
    // Given: GAZP fails once and then backs off for 10s, SBER answers at once
    let gazp_body = r#"{"marketdata": {"columns": ["LAST"], "data": [[160.1]]}}"#;
    let transport = RoutedTransport::new(vec![
        ("GAZP", vec![connection_refused(), body(gazp_body)]),
        ("SBER", vec![body(SBER_BODY)]),
    ]);
    let client = client(transport.clone(), 2, Duration::from_secs(10));
    let gazp = Ticker::parse("GAZP").expect("valid ticker");
    let sber = sber();
    let started = Instant::now();

    // When: Both lookups run concurrently on the same client
    let (slow, fast) = tokio::join!(
        async {
            let result = client.last_price(&gazp).await;
            (result, Instant::now())
        },
        async {
            let result = client.last_price(&sber).await;
            (result, Instant::now())
        },
    );

    // Then: SBER resolved without waiting for GAZP's backoff
    let (fast_result, fast_at) = fast;
    assert_eq!(fast_result.expect("SBER price").last_price(), dec!(268.45));
    assert_eq!(fast_at - started, Duration::ZERO);

    // And: GAZP recovered only after its own 10s backoff
    let (slow_result, slow_at) = slow;
    assert_eq!(slow_result.expect("GAZP price").last_price(), dec!(160.1));
    assert_eq!(slow_at - started, Duration::from_secs(10));
    assert!(fast_at < slow_at);

    let gazp_calls = transport.calls_for("GAZP");
    assert_eq!(gazp_calls.len(), 2);
    assert_eq!(gazp_calls[1] - gazp_calls[0], Duration::from_secs(10));
    assert_eq!(transport.calls_for("SBER"), vec![started]);
}
