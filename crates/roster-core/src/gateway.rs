//! [`Gateway`] — lazy, shared access to one record store connection.

use std::future::Future;

use tokio::sync::OnceCell;

use crate::store::RecordStore;

/// Opens a connection to a concrete backend.
pub trait Connector: Send + Sync {
  type Store: RecordStore;
  type Error: std::error::Error + Send + Sync + 'static;

  fn connect(&self) -> impl Future<Output = Result<Self::Store, Self::Error>> + Send + '_;
}

/// Owns the process-wide store connection.
///
/// The connection is opened on the first call to
/// [`ensure_connected`](Gateway::ensure_connected) and reused for the lifetime
/// of the gateway. Concurrent first callers wait on a single attempt.
pub struct Gateway<C: Connector> {
  connector: C,
  store:     OnceCell<C::Store>,
}

impl<C: Connector> Gateway<C> {
  pub fn new(connector: C) -> Self {
    Self { connector, store: OnceCell::new() }
  }

  pub fn is_connected(&self) -> bool { self.store.initialized() }

  /// Connect if not already connected and return the live store.
  ///
  /// A failed attempt leaves the gateway disconnected. Callers treat the
  /// error as fatal; see `roster-api`.
  pub async fn ensure_connected(&self) -> Result<&C::Store, C::Error> {
    self
      .store
      .get_or_try_init(|| async {
        let store = self.connector.connect().await?;
        tracing::info!("connected to record store");
        Ok::<_, C::Error>(store)
      })
      .await
  }
}
