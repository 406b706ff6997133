use std::borrow::{Borrow, Cow};
use super::InvalidValue;

macro_rules! define_choice_id {
  ($name:ident) => {
    #[derive(Debug, PartialEq, Eq, Hash, Clone)]
    #[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct $name(Cow<'static, str>);

    impl $name {
      pub fn try_new<STR>(val: STR) -> Result<Self, InvalidValue>
          where STR: Into<Cow<'static, str>>
      {
        let val = val.into();
        if val.is_empty() {
          return Err(InvalidValue::Empty);
        }
        Ok(Self(val))
      }

      pub fn as_str(&self) -> &str {
        self.0.borrow()
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
      }
    }

    impl std::str::FromStr for $name {
      type Err = InvalidValue;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s.to_owned())
      }
    }

    impl From<&'static str> for $name {
      fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self {
        Self(Cow::Owned(s))
      }
    }

    impl PartialEq<str> for $name {
      fn eq(&self, other: &str) -> bool {
        self.as_str() == other
      }
    }

    impl PartialEq<&str> for $name {
      fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
      }
    }
  };
}

define_choice_id!(DeviceId);
define_choice_id!(TimeRangeId);

impl DeviceId {
  /// The "I don't see my device" choice: a device the catalog does not know
  pub const OTHER: DeviceId = DeviceId(Cow::Borrowed("other"));

  pub fn is_other(&self) -> bool {
    *self == Self::OTHER
  }
}

impl TimeRangeId {
  /// Oldest device-update range. Users in it are due for replacement equipment.
  pub const FIVE_PLUS_YEARS: TimeRangeId = TimeRangeId(Cow::Borrowed("5-plus-years"));

  pub fn is_five_plus_years(&self) -> bool {
    *self == Self::FIVE_PLUS_YEARS
  }
}
