//! Request coordination with supersession of stale requests.
//!
//! The [`RequestCoordinator`] owns the single current [`QueryDescriptor`] and
//! at most one in-flight fetch. Submitting a different descriptor cancels the
//! in-flight fetch through its [`CancellationToken`] before the new one is
//! spawned. Completions travel back over a channel and are applied only if
//! they belong to the request that is still current, so the result a caller
//! sees never depends on the order in which responses arrive.
//!
//! # Example
//!
//! ```no_run
//! use recipe_api_rs::client::RecipeClient;
//! use recipe_browser_rs::{FilterInputs, Pagination, RequestCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RecipeClient::new()?;
//!     let mut coordinator = RequestCoordinator::new(client);
//!
//!     let descriptor =
//!         recipe_browser_rs::query::build(&Pagination::default(), &FilterInputs::new());
//!     coordinator.submit(descriptor);
//!
//!     if let Some(settled) = coordinator.next_settled().await {
//!         let page = settled.outcome?;
//!         println!("{} recipes", page.total);
//!     }
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use recipe_api_rs::client::RecipeClient;
use recipe_api_rs::error::Result as ApiResult;
use recipe_api_rs::models::PageResult;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::query::{Endpoint, QueryDescriptor};

/// Something that can fetch a page of recipes for a descriptor.
///
/// Implemented by [`RecipeClient`]; tests substitute scripted sources.
pub trait RecipeSource: Send + Sync + 'static {
    /// Fetches the page described by `descriptor`.
    fn fetch(
        &self,
        descriptor: &QueryDescriptor,
    ) -> impl Future<Output = ApiResult<PageResult>> + Send;
}

impl RecipeSource for RecipeClient {
    async fn fetch(&self, descriptor: &QueryDescriptor) -> ApiResult<PageResult> {
        match descriptor.endpoint() {
            Endpoint::Listing => {
                self.list_recipes(descriptor.page(), descriptor.limit())
                    .await
            }
            Endpoint::Search => self.search_recipes(&descriptor.to_search_params()).await,
        }
    }
}

/// A finished request that was still current when it completed.
#[derive(Debug)]
pub struct Settled {
    /// The descriptor the request was issued for.
    pub descriptor: QueryDescriptor,
    /// The page, or the error the request ended with.
    pub outcome: ApiResult<PageResult>,
}

/// A completion as sent back by a request task.
#[derive(Debug)]
pub(crate) struct Completion {
    pub(crate) seq: u64,
    pub(crate) descriptor: QueryDescriptor,
    pub(crate) outcome: ApiResult<PageResult>,
}

#[derive(Debug)]
struct InFlight {
    seq: u64,
    token: CancellationToken,
}

/// Issues fetches and discards the results of superseded ones.
///
/// Must be used from within a Tokio runtime; [`submit`](Self::submit)
/// spawns the request task.
#[derive(Debug)]
pub struct RequestCoordinator<S> {
    source: Arc<S>,
    current: Option<QueryDescriptor>,
    in_flight: Option<InFlight>,
    next_seq: u64,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S: RecipeSource> RequestCoordinator<S> {
    /// Creates a coordinator with nothing submitted.
    pub fn new(source: S) -> Self {
        Self::with_shared(Arc::new(source))
    }

    /// Creates a coordinator over a shared source.
    pub fn with_shared(source: Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            current: None,
            in_flight: None,
            next_seq: 0,
            tx,
            rx,
        }
    }

    /// The most recently submitted descriptor, if any.
    pub fn current(&self) -> Option<&QueryDescriptor> {
        self.current.as_ref()
    }

    /// Returns true while the current request has not completed.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Makes `descriptor` current and fetches it.
    ///
    /// Any in-flight request is cancelled first. Submitting the descriptor
    /// that is already current does nothing; use [`refresh`](Self::refresh)
    /// to fetch it again. Returns true if a request was issued.
    pub fn submit(&mut self, descriptor: QueryDescriptor) -> bool {
        if self.current.as_ref() == Some(&descriptor) {
            debug!(page = descriptor.page(), "descriptor unchanged, not resubmitting");
            return false;
        }
        self.issue(descriptor);
        true
    }

    /// Fetches the current descriptor again, superseding any in-flight
    /// request for it. Returns false if nothing was ever submitted.
    pub fn refresh(&mut self) -> bool {
        match self.current.clone() {
            Some(descriptor) => {
                self.issue(descriptor);
                true
            }
            None => false,
        }
    }

    /// Cancels the in-flight request, if any.
    ///
    /// The cancelled descriptor stops being current, so submitting it again
    /// issues a new request. Returns true if a request was cancelled.
    pub fn cancel_pending(&mut self) -> bool {
        match self.in_flight.take() {
            Some(in_flight) => {
                in_flight.token.cancel();
                debug!(seq = in_flight.seq, "cancelled pending request");
                self.current = None;
                true
            }
            None => false,
        }
    }

    /// Waits for the current request to complete.
    ///
    /// Completions of superseded requests are dropped while waiting. Returns
    /// `None` immediately if nothing is pending. Cancel safe, so it can be
    /// used as a `tokio::select!` branch.
    pub async fn next_settled(&mut self) -> Option<Settled> {
        while self.in_flight.is_some() {
            let completion = self.rx.recv().await?;
            if let Some(settled) = self.accept(completion) {
                return Some(settled);
            }
        }
        None
    }

    /// Applies a completion if it belongs to the current request.
    ///
    /// A completion is current when its descriptor equals the current
    /// descriptor and it comes from the latest request issued for it.
    pub(crate) fn accept(&mut self, completion: Completion) -> Option<Settled> {
        let is_current = self.current.as_ref() == Some(&completion.descriptor)
            && self
                .in_flight
                .as_ref()
                .is_some_and(|f| f.seq == completion.seq);

        if !is_current {
            debug!(
                seq = completion.seq,
                page = completion.descriptor.page(),
                "dropping superseded response"
            );
            return None;
        }

        self.in_flight = None;
        debug!(
            seq = completion.seq,
            ok = completion.outcome.is_ok(),
            "request settled"
        );
        Some(Settled {
            descriptor: completion.descriptor,
            outcome: completion.outcome,
        })
    }

    fn issue(&mut self, descriptor: QueryDescriptor) {
        if let Some(previous) = self.in_flight.take() {
            previous.token.cancel();
            debug!(seq = previous.seq, "superseded in-flight request");
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        let token = CancellationToken::new();
        debug!(
            seq,
            endpoint = ?descriptor.endpoint(),
            page = descriptor.page(),
            limit = descriptor.limit(),
            filters = descriptor.filters().len(),
            "issuing request"
        );

        self.current = Some(descriptor.clone());
        self.in_flight = Some(InFlight {
            seq,
            token: token.clone(),
        });

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                outcome = source.fetch(&descriptor) => Some(outcome),
            };
            match outcome {
                // The receiver lives as long as the coordinator.
                Some(outcome) => {
                    let _ = tx.send(Completion {
                        seq,
                        descriptor,
                        outcome,
                    });
                }
                None => debug!(seq, "request aborted"),
            }
        });
    }
}

impl<S> Drop for RequestCoordinator<S> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.token.cancel();
        }
    }
}
