//! Per-client token bucket in front of the disambiguation routes.
//!
//! Clients are keyed on `Fly-Client-IP`, or the first hop of
//! `X-Forwarded-For`. Requests carrying neither header pass through.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{HeaderMap, Request, Response, StatusCode};
use axum::response::IntoResponse;
use dashmap::DashMap;
use tower::{Layer, Service};
use tracing::warn;

const LOG_INTERVAL: Duration = Duration::from_secs(60);
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);
const FLY_CLIENT_IP: &str = "fly-client-ip";
const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Clone)]
pub struct RateLimiter<S> {
    inner: S,
    limits: Limits,
    state: SharedState,
}

#[derive(Clone, Copy, Debug)]
struct Limits {
    rate_per_sec: f64,
    burst: f64,
}

#[derive(Clone)]
struct SharedState {
    buckets: Arc<DashMap<String, Bucket>>,
    dropped_since_log: Arc<AtomicU64>,
    last_log: Arc<Mutex<Instant>>,
    last_sweep: Arc<Mutex<Instant>>,
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

#[derive(Clone)]
pub struct RateLimiterLayer {
    limits: Limits,
}

impl RateLimiterLayer {
    pub fn new(rate_per_sec: u32, burst: u32) -> Self {
        Self {
            limits: Limits {
                rate_per_sec: f64::from(rate_per_sec),
                burst: f64::from(burst.max(1)),
            },
        }
    }
}

impl<S> Layer<S> for RateLimiterLayer {
    type Service = RateLimiter<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimiter {
            inner,
            limits: self.limits,
            state: SharedState {
                buckets: Arc::new(DashMap::new()),
                dropped_since_log: Arc::new(AtomicU64::new(0)),
                last_log: Arc::new(Mutex::new(Instant::now())),
                last_sweep: Arc::new(Mutex::new(Instant::now())),
            },
        }
    }
}

impl<S, ReqBody> Service<Request<ReqBody>> for RateLimiter<S>
where
    S: Service<Request<ReqBody>, Response = Response<Body>> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        self.sweep_if_due(Instant::now());
        if let Some(client) = client_id(req.headers())
            && !self.check_and_consume(&client)
        {
            self.state.dropped_since_log.fetch_add(1, Ordering::Relaxed);
            log_drops_if_needed(&self.state);
            return Box::pin(async move {
                Ok((StatusCode::TOO_MANY_REQUESTS, "rate limited").into_response())
            });
        }

        let fut = self.inner.call(req);
        Box::pin(fut)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}

fn client_id(headers: &HeaderMap) -> Option<String> {
    header_str(headers, FLY_CLIENT_IP)
        .or_else(|| header_str(headers, FORWARDED_FOR).and_then(|v| v.split(',').next()))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl<S> RateLimiter<S> {
    fn sweep_if_due(&self, now: Instant) {
        let Ok(mut last) = self.state.last_sweep.lock() else {
            return;
        };
        if now.saturating_duration_since(*last) >= SWEEP_INTERVAL {
            self.prune_idle(now);
            *last = now;
        }
    }

    /// Drop buckets that have been idle long enough to refill completely;
    /// they are indistinguishable from a fresh bucket.
    fn prune_idle(&self, now: Instant) {
        let Limits {
            rate_per_sec,
            burst,
        } = self.limits;
        let refill_secs = burst / rate_per_sec;
        self.state.buckets.retain(|_, bucket| {
            now.saturating_duration_since(bucket.last_refill).as_secs_f64() < refill_secs
        });
    }

    fn check_and_consume(&self, client: &str) -> bool {
        let Limits {
            rate_per_sec,
            burst,
        } = self.limits;
        let now = Instant::now();
        let mut entry = self
            .state
            .buckets
            .entry(client.to_string())
            .or_insert(Bucket {
                tokens: burst,
                last_refill: now,
            });
        let elapsed = now.saturating_duration_since(entry.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            entry.tokens = (entry.tokens + elapsed * rate_per_sec).min(burst);
            entry.last_refill = now;
        }
        if entry.tokens >= 1.0 {
            entry.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

fn log_drops_if_needed(state: &SharedState) {
    let now = Instant::now();
    let Ok(mut last) = state.last_log.lock() else {
        return;
    };
    if now.saturating_duration_since(*last) >= LOG_INTERVAL {
        let dropped = state.dropped_since_log.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            warn!("rate limiter dropped {dropped} requests in the last minute");
        }
        *last = now;
    }
}
