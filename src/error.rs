//! Typed errors for the failures callers may want to tell apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrepError {
    /// The binary was built without support the requested dataset needs.
    #[error("missing optional capability `{capability}`: rebuild with `--features {feature}`")]
    MissingCapability {
        capability: &'static str,
        feature: &'static str,
    },

    #[error("failed to download `{url}`: server answered {status}")]
    Download { url: String, status: u16 },

    #[error("cannot resize a {from:?} grid to {to:?}")]
    EmptyShape {
        from: (usize, usize),
        to: (usize, usize),
    },
}
