use std::sync::{LazyLock, Mutex};

use flexi_logger::{Logger, LoggerHandle};
use link_cut_forest::PathAggregate;

#[allow(dead_code)]
pub mod slow_forest;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggSum(pub i32);

impl PathAggregate for AggSum {
    type Value = i32;

    fn from_value(value: &Self::Value) -> Self {
        Self(*value)
    }

    fn merge(self, deeper: Self) -> Self {
        Self(self.0 + deeper.0)
    }
}

impl PartialEq<i32> for AggSum {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

/// Comma-separated values in both path directions. Order-sensitive on
/// purpose, to catch flips that were not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggConcat {
    pub fwd: String,
    pub rev: String,
}

impl PathAggregate for AggConcat {
    type Value = i32;

    fn from_value(value: &Self::Value) -> Self {
        Self {
            fwd: value.to_string(),
            rev: value.to_string(),
        }
    }

    fn merge(self, deeper: Self) -> Self {
        if self.fwd.is_empty() {
            return deeper;
        }
        if deeper.fwd.is_empty() {
            return self;
        }
        Self {
            fwd: format!("{},{}", self.fwd, deeper.fwd),
            rev: format!("{},{}", deeper.rev, self.rev),
        }
    }

    fn reverse(self) -> Self {
        Self {
            fwd: self.rev,
            rev: self.fwd,
        }
    }
}

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .set_palette("196;208;3;7;8".to_owned())
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}
