use std::borrow::Cow;
use std::time::Instant;

use log::{self, Level};

/// Logs how long a scope took when dropped.
pub struct ScopedTimer {
    label: Option<Cow<'static, str>>,
    level: Level,
    start: Option<Instant>,
}

impl ScopedTimer {
    pub fn with_level(label: impl Into<Cow<'static, str>>, level: Level) -> Self {
        Self {
            label: Some(label.into()),
            level,
            start: Some(Instant::now()),
        }
    }

    pub fn debug(label: impl Into<Cow<'static, str>>) -> Self {
        Self::with_level(label, Level::Debug)
    }

    /// Builds the label only when debug logging is enabled.
    pub fn debug_lazy<F>(label_gen: F) -> Self
    where
        F: FnOnce() -> String,
    {
        if log::log_enabled!(Level::Debug) {
            Self::debug(label_gen())
        } else {
            Self {
                label: None,
                level: Level::Debug,
                start: None,
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let (Some(label), Some(start)) = (&self.label, self.start) {
            let micros = start.elapsed().as_micros();
            log::log!(self.level, "{} took {}.{:03} ms", label, micros / 1000, micros % 1000);
        }
    }
}

/// Runs `f` inside a [`ScopedTimer`].
pub fn measure<T, F>(label: impl Into<Cow<'static, str>>, level: Level, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _timer = ScopedTimer::with_level(label, level);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_returns_result() {
        assert_eq!(measure("sum", Level::Trace, || 2 + 2), 4);
    }

    #[test]
    fn test_lazy_timer_skips_label_without_logger() {
        // no logger is installed in unit tests, so debug is disabled
        let timer = ScopedTimer::debug_lazy(|| panic!("label must not be built"));
        assert!(!timer.is_active());
    }
}
