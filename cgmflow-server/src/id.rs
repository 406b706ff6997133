use uuid::Uuid;
use cgmflow::IdError;

/// Identifies a flow across requests
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
  pub fn new_v4() -> Self {
    SessionId(Uuid::new_v4())
  }

  /// Prefix that scopes this flow's keys in the shared store
  pub fn store_prefix(&self) -> String {
    format!("{}-", self.0)
  }
}

impl std::fmt::Display for SessionId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::str::FromStr for SessionId {
  type Err = IdError<SessionId>;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s)
      .map(SessionId)
      .map_err(|_e| IdError::CannotParse(s.to_owned()))
  }
}


#[cfg(test)]
mod tests {
  use super::SessionId;

  #[test]
  fn parse() {
    let id = SessionId::new_v4();
    assert_eq!(id.to_string().parse::<SessionId>(), Ok(id));
    assert!(id.store_prefix().ends_with('-'));
    assert!("not-a-session".parse::<SessionId>().is_err());
  }
}
