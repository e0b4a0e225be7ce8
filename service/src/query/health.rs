//! [`Health`] [`Query`] definition.

use std::convert::Infallible;

use common::operations::Ping;
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::{database, Database},
    read::health::Backend,
    Service,
};

use super::Query;

/// Checks reachability of the [`Service`] backend.
#[derive(Clone, Copy, Debug)]
pub struct Health;

impl<Db> Query<Health> for Service<Db>
where
    Db: Database<Ping, Ok = (), Err = Traced<database::Error>> + Sync,
{
    type Ok = Backend;
    type Err = Infallible;

    async fn execute(&self, _: Health) -> Result<Self::Ok, Self::Err> {
        let Ok(db) = self.database() else {
            return Ok(Backend::Unknown);
        };
        Ok(match db.execute(Ping).await {
            Ok(()) => Backend::Connected,
            Err(e) => {
                log::warn!("backend health check failed: {e}");
                Backend::Error
            }
        })
    }
}
