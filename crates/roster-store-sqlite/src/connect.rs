//! [`SqliteConnector`] — turns a connection string into a [`SqliteStore`].

use std::path::PathBuf;

use roster_core::gateway::Connector;

use crate::{Error, Result, SqliteStore};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
  Memory,
  File(PathBuf),
}

/// Parsed store location.
///
/// Accepts `sqlite://<path>`, `sqlite:<path>`, a bare path, or `:memory:`.
/// A leading `~/` is expanded against `$HOME`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConnector {
  target: Target,
}

impl SqliteConnector {
  pub fn parse(url: &str) -> Result<Self> {
    let rest = url.trim();
    let rest = rest
      .strip_prefix("sqlite://")
      .or_else(|| rest.strip_prefix("sqlite:"))
      .unwrap_or(rest);

    let target = match rest {
      "" => return Err(Error::ConnectionString(url.to_owned())),
      ":memory:" => Target::Memory,
      path => Target::File(expand_tilde(path)),
    };
    Ok(Self { target })
  }

  pub fn in_memory() -> Self {
    Self { target: Target::Memory }
  }
}

impl Connector for SqliteConnector {
  type Store = SqliteStore;
  type Error = Error;

  async fn connect(&self) -> Result<SqliteStore> {
    match &self.target {
      Target::Memory => SqliteStore::open_in_memory().await,
      Target::File(path) => SqliteStore::open(path).await,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
  if let Some(rest) = path.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  PathBuf::from(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_supported_forms() {
    assert_eq!(SqliteConnector::parse(":memory:").unwrap(), SqliteConnector::in_memory());
    assert_eq!(SqliteConnector::parse("sqlite://:memory:").unwrap(), SqliteConnector::in_memory());
    assert_eq!(
      SqliteConnector::parse("sqlite:///var/lib/roster.db").unwrap().target,
      Target::File(PathBuf::from("/var/lib/roster.db"))
    );
    assert_eq!(
      SqliteConnector::parse("data/roster.db").unwrap().target,
      Target::File(PathBuf::from("data/roster.db"))
    );
  }

  #[test]
  fn rejects_empty() {
    assert!(matches!(SqliteConnector::parse("  "), Err(Error::ConnectionString(_))));
    assert!(matches!(SqliteConnector::parse("sqlite://"), Err(Error::ConnectionString(_))));
  }

  #[tokio::test]
  async fn connects_in_memory() {
    let store = SqliteConnector::in_memory().connect().await.unwrap();
    assert_eq!(store.count().await.unwrap(), 0);
  }
}
