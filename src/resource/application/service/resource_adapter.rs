//! The lifecycle contract shared by every resource adapter.

use crate::core::domain::{error::IdcloudhostResult, model::resource_kind::ResourceKind};
use async_trait::async_trait;

/// Translates an orchestrator's lifecycle calls for one resource type into
/// API calls.
///
/// Every operation issues its requests sequentially and returns the first
/// failure it meets. Callers must not run two operations on the same
/// resource concurrently; nothing here locks.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    /// Flat record describing one resource of this kind.
    type Record: Send + Sync + 'static;

    /// The resource type handled by this adapter.
    fn kind(&self) -> ResourceKind;

    /// Creates the resource and returns the observed record, including any
    /// provider-assigned identifiers.
    async fn create(&self, desired: Self::Record) -> IdcloudhostResult<Self::Record>;

    /// Fetches the resource and refreshes the record from the response.
    async fn read(&self, current: Self::Record) -> IdcloudhostResult<Self::Record>;

    /// Applies the differences between `prior` (last observed) and `desired`.
    ///
    /// Only changed field groups are sent; an update without changes issues
    /// no request. Groups already applied are kept if a later one fails.
    async fn update(
        &self,
        prior: &Self::Record,
        desired: Self::Record,
    ) -> IdcloudhostResult<Self::Record>;

    /// Deletes the resource. Dependents are left to the remote side.
    async fn delete(&self, current: &Self::Record) -> IdcloudhostResult<()>;

    /// Rebuilds a complete record from an identifier only.
    async fn import(&self, id: &str) -> IdcloudhostResult<Self::Record>;
}
