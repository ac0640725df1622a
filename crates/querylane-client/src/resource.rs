//! Typed resource contract.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A plain data record served by a remote collection.
///
/// The resource name is a compile-time tag, declared up front rather
/// than recovered from runtime type inspection; convention-based
/// endpoint naming and not-found errors are keyed off it. Entities are
/// owned by the caller once materialized; the engine keeps no references
/// after a query completes.
pub trait ApiResource: Serialize + DeserializeOwned + Send + Sync {
    /// Stable resource name, e.g. `"campaign"`.
    const RESOURCE: &'static str;

    /// The entity's string identifier. Empty means "not yet assigned by
    /// the server".
    fn id(&self) -> &str;
}
