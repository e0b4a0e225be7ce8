//! [`Handler`] abstractions.

use std::future::Future;

/// Handler of the `Args` operation.
///
/// Used both for the queries of a service and for the operations of its
/// storage backends, so that each side only declares the operations it
/// actually needs.
///
/// Returned futures are [`Send`].
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>> + Send;
}
