//! Process-wide similarity service: the loaded oracle (or the reason it is
//! missing), the access guard and the per-request timeout.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use thiserror::Error;

use crate::models::config::OracleAccess;
use crate::oracle::{OracleError, TermSimilarity, WordnetOracle};
use crate::processing::SimilarityRequest;
use crate::processing::aggregate::{AggregateError, PairError, group_similarity};
use crate::processing::cancellation::Cancellation;

/// The oracle built at start, or why it could not be built.
pub type OracleState = Result<Arc<dyn TermSimilarity>, OracleError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    OracleUnavailable,
    Computation,
    Timeout,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("similarity oracle unavailable: {0}")]
    OracleUnavailable(String),
    #[error(transparent)]
    Pair(#[from] PairError),
    #[error("similarity computation exceeded {0:?}")]
    Timeout(Duration),
    #[error("similarity computation cancelled")]
    Cancelled,
    #[error("similarity worker failed: {0}")]
    Worker(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OracleUnavailable(_) => ErrorKind::OracleUnavailable,
            Self::Pair(PairError {
                source: OracleError::Unavailable(_),
                ..
            }) => ErrorKind::OracleUnavailable,
            Self::Pair(_) | Self::Worker(_) => ErrorKind::Computation,
            Self::Timeout(_) | Self::Cancelled => ErrorKind::Timeout,
        }
    }
}

impl From<AggregateError> for ServiceError {
    fn from(error: AggregateError) -> Self {
        match error {
            AggregateError::Pair(pair) => Self::Pair(pair),
            AggregateError::Cancelled { scored, total } => {
                log::debug!("Abandoned group computation after {scored} of {total} pairs");
                Self::Cancelled
            }
        }
    }
}

/// Loads the WordNet oracle, keeping the failure instead of aborting.
pub fn init_oracle(wordnet_path: &Path) -> OracleState {
    match WordnetOracle::load(wordnet_path) {
        Ok(oracle) => {
            log::info!("WordNet loaded from {}", wordnet_path.display());
            Ok(Arc::new(oracle))
        }
        Err(error) => {
            log::error!(
                "Error while accessing the WordNet folder {}: {error}",
                wordnet_path.display()
            );
            log::error!("Any request will fail");
            Err(OracleError::Unavailable(error.to_string()))
        }
    }
}

pub struct SimilarityService {
    oracle: OracleState,
    access: OracleAccess,
    guard: Mutex<()>,
    timeout: Duration,
}

impl SimilarityService {
    pub fn new(oracle: OracleState, access: OracleAccess, timeout: Duration) -> Self {
        Self {
            oracle,
            access,
            guard: Mutex::new(()),
            timeout,
        }
    }

    pub fn is_available(&self) -> bool {
        self.oracle.is_ok()
    }

    /// Runs one request on the calling thread.
    ///
    /// With [`OracleAccess::Serialized`] the guard is held for the whole
    /// request, so the m×n oracle calls of a group never interleave with
    /// another request. Raising `cancel` releases the guard after the oracle
    /// call in progress.
    pub fn compute_blocking(
        &self,
        request: &SimilarityRequest,
        cancel: &Cancellation,
    ) -> Result<f64, ServiceError> {
        let oracle = self
            .oracle
            .as_ref()
            .map_err(|error| ServiceError::OracleUnavailable(error.to_string()))?;

        let _guard = match self.access {
            // The guard protects no data, so a poisoned lock is still usable.
            OracleAccess::Serialized => {
                Some(self.guard.lock().unwrap_or_else(PoisonError::into_inner))
            }
            OracleAccess::Concurrent => None,
        };
        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        match request {
            SimilarityRequest::Pair(left, right) => oracle
                .similarity(left.as_str(), right.as_str())
                .map_err(|source| {
                    ServiceError::Pair(PairError {
                        left: left.to_string(),
                        right: right.to_string(),
                        source,
                    })
                }),
            SimilarityRequest::Groups(left, right) => {
                Ok(group_similarity(left.terms(), right.terms(), &**oracle, cancel)?)
            }
        }
    }

    /// Runs one request on the blocking pool, bounded by the configured
    /// timeout. On timeout the task is cancelled and stops at its next
    /// oracle call.
    pub async fn compute(
        self: &Arc<Self>,
        request: SimilarityRequest,
    ) -> Result<f64, ServiceError> {
        let service = Arc::clone(self);
        let cancel = Cancellation::new();
        let worker_cancel = cancel.clone();
        let task = tokio::task::spawn_blocking(move || {
            service.compute_blocking(&request, &worker_cancel)
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => Err(ServiceError::Worker(error.to_string())),
            Err(_) => {
                cancel.cancel();
                Err(ServiceError::Timeout(self.timeout))
            }
        }
    }
}
