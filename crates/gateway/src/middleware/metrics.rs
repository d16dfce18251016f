//! File server hit counter.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::state::AppState;

/// Number of requests served under `/app`.
#[derive(Debug, Default)]
pub struct HitCounter(AtomicU64);

impl HitCounter {
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Count every request before it reaches the file server.
pub async fn count_hits(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    state.hits.increment();
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter() {
        let hits = HitCounter::default();
        hits.increment();
        hits.increment();
        assert_eq!(hits.get(), 2);

        hits.reset();
        assert_eq!(hits.get(), 0);
    }
}
