//! Error types for query translation.

use thiserror::Error;

/// Errors raised while lowering a query chain to a wire query string.
///
/// Translation fails loudly on shapes the active style cannot express;
/// nothing is silently dropped or rewritten to placeholder fields.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The predicate cannot be expressed in the target style.
    #[error("unsupported predicate for {style} translation: {message}")]
    UnsupportedPredicate {
        /// Translator name (`"rest"` or `"odata"`)
        style: &'static str,
        message: String,
    },
}
