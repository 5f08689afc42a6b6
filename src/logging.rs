pub use verbosity::*;


// Global control over verbose messaging.
pub(crate) mod verbosity {
  use std::{
    io::{Stdout, stdout, Write},
    sync::{
      Mutex,
      atomic::{AtomicI32, Ordering}
    }
  };

  use lazy_static::lazy_static;
  use strum_macros::{Display, IntoStaticStr};
  use yansi::Paint;

  // Level 0 is silent. Level 4 gives factory (canonicalization) progress. Level 5 gives differentiation and
  // substitution progress. Level n includes all messages in levels m < n.
  static VERBOSITY: AtomicI32 = AtomicI32::new(0);
  lazy_static! {
    static ref VERBOSE_STREAM: Mutex<Stdout> = Mutex::new(stdout());
  }

  #[derive(Copy, Clone, PartialEq, Eq, Debug, Display, IntoStaticStr)]
  pub enum Channel {
    Error,
    Warning,
    Notice,
    Debug,
  }

  impl Channel {
    fn prefix(&self) -> String {
      let name: &'static str = self.into();
      match self {
        Channel::Error   => Paint::red(name).bold().to_string(),
        Channel::Warning => Paint::yellow(name).bold().to_string(),
        Channel::Notice  => Paint::blue(name).to_string(),
        Channel::Debug   => Paint::fixed(244, name).to_string(),
      }
    }
  }

  fn verbosity_is_at_least(lvl: i32) -> bool {
    VERBOSITY.load(Ordering::Relaxed) >= lvl
  }

  pub fn set_verbosity(new_value: i32) {
    VERBOSITY.store(new_value, Ordering::Relaxed);
  }

  pub fn verbosity() -> i32 {
    VERBOSITY.load(Ordering::Relaxed)
  }

  pub(crate) fn verbose_emit(channel: Channel, msg: &str) {
    let mut stream = VERBOSE_STREAM.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _ = writeln!(stream, "{}: {}", channel.prefix(), msg);
  }

  /// Only emits a message if the verbosity level is at least `level`.
  pub fn log(channel: Channel, level: i32, msg: &str) {
    if verbosity_is_at_least(level) {
      verbose_emit(channel, msg);
    }
  }

  /// Like `log`, but only builds the message when it will be emitted. Use this on hot paths.
  pub(crate) fn log_with<F: FnOnce() -> String>(channel: Channel, level: i32, msg: F) {
    if verbosity_is_at_least(level) {
      verbose_emit(channel, msg().as_str());
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn verbosity_gates_messages() {
    let previous = verbosity();
    set_verbosity(2);
    assert_eq!(verbosity(), 2);

    let mut built = false;
    log_with(Channel::Debug, 5, || { built = true; String::from("never") });
    assert!(!built);

    log(Channel::Notice, 1, "emitted at level 1");
    set_verbosity(previous);
  }
}
