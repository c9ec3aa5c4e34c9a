use crate::metrics::MetricKind;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared, type-erased cause attached to load and computation failures.
pub type Cause = Arc<dyn std::error::Error + Send + Sync>;

/// Errors produced by the store, loader, and orchestration layers.
///
/// The type is `Clone` so that a memoized load failure can be handed to every
/// caller awaiting the same load.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The supplied date string does not parse into a timestamp.
    #[error("invalid date: '{0}'")]
    InvalidDate(String),

    /// An input record set could not be read or parsed.
    #[error("unable to load record set from '{}'", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        cause: Cause,
    },

    /// A metric computer failed while running.
    #[error("computing metric {metric} failed")]
    Computation {
        metric: MetricKind,
        #[source]
        cause: Cause,
    },

    /// Required configuration is absent or malformed.
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// A query referenced an unknown field or compared incompatible values.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn load(path: impl Into<PathBuf>, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Load {
            path: path.into(),
            cause: Arc::new(cause),
        }
    }

    pub(crate) fn computation(metric: MetricKind, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Computation {
            metric,
            cause: Arc::new(cause),
        }
    }
}
