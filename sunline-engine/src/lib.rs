//! Coordinates time-zone resolution and solar-position computation
//! off the interactive path.
//!
//! The UI layer hands the [`Engine`] a [`CalculationRequest`] and gets
//! back a receiver that resolves exactly once with the result or a
//! failure. All work -- including the resolver's network call -- runs
//! on a background task, so the submitting context never blocks. A
//! request that is superseded by a newer one before completion is
//! suppressed: its receiver closes without a value.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use sunline_api::{
    zone, CalculationRequest, CalculationResult, Error, Result,
};
use tokio::sync::oneshot;
use tracing::{debug, info_span};
use tracing_futures::Instrument;

pub mod config;

// Runs one request to its terminal outcome: acquire a zone (remote or
// explicit), then compute. Any resolver failure is terminal for the
// request and the calculator is never consulted.

async fn run(
    source: &dyn zone::Source,
    req: &CalculationRequest,
) -> Result<CalculationResult> {
    let zone = if req.use_remote_zone_lookup {
        match source.resolve(&req.coordinate, req.date_time.date()).await
        {
            Ok(zone) => zone,
            Err(e) => return Err(Error::ZoneUnresolved(Box::new(e))),
        }
    } else {
        match &req.explicit_zone {
            Some(zone) => zone.clone(),
            None => {
                return Err(Error::InvalidInput(String::from(
                    "request has no explicit zone and remote lookup \
                     is disabled",
                )))
            }
        }
    };

    sunline_solar::position(&req.coordinate, &req.date_time, &zone)
}

/// Accepts calculation requests and delivers their outcomes. One
/// engine serves the lifetime of the embedding view; it stays usable
/// after any request fails.

pub struct Engine {
    source: Arc<dyn zone::Source>,
    seq: Arc<AtomicU64>,
}

impl Engine {
    /// Creates an engine around a time-zone source. Production wires
    /// in an HTTP resolver; tests use a local fixture.

    pub fn new(source: Arc<dyn zone::Source>) -> Engine {
        Engine {
            source,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submits a calculation. The returned receiver resolves exactly
    /// once with the outcome -- unless a newer request is submitted
    /// before this one completes, in which case the stale request's
    /// receiver closes without a value ("last request wins").
    ///
    /// Failures are terminal for the request; retrying means
    /// submitting a fresh request.

    pub fn submit(
        &self,
        req: CalculationRequest,
    ) -> oneshot::Receiver<Result<CalculationResult>> {
        let (tx, rx) = oneshot::channel();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = self.seq.clone();
        let source = self.source.clone();

        tokio::spawn(
            async move {
                let result = run(&*source, &req).await;

                // A request superseded while in flight must not
                // deliver. Dropping the sender closes the caller's
                // receiver instead.

                if latest.load(Ordering::SeqCst) == seq {
                    if tx.send(result).is_err() {
                        debug!("caller dropped its receiver");
                    }
                } else {
                    debug!("discarding result of superseded request");
                }
            }
            .instrument(info_span!("calc", seq)),
        );

        rx
    }
}
