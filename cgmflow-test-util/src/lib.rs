pub fn test_key_val() -> u32 {
  use std::sync::atomic::{AtomicU32, Ordering};
  static COUNT: AtomicU32 = AtomicU32::new(0);

  // add extra bits to make it easy to identify test keys
  (u16::MAX as u32) << 16 | COUNT.fetch_add(1, Ordering::SeqCst)
}

/// Unique store key for a test so parallel tests never share a snapshot
#[macro_export]
macro_rules! test_key {
  () => {
    format!("test-flow-{}", cgmflow_test_util::test_key_val())
  }
}

/// Build an `Answers` record with only the listed slots answered.
///
/// `answers!(Answers, current_device = "other", last_device_update = "0-1-year")`
#[macro_export]
macro_rules! answers {
  ($answers_type:ident) => {
    $answers_type::default()
  };
  ($answers_type:ident, $($field:ident = $val:expr),+ $(,)?) => {
    {
      let mut answers = $answers_type::default();
      $( answers.$field = Some($val.into()); )+
      answers
    }
  };
}
