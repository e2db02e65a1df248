//! Provide tracing for the bus layer and the programs that embed it.
//!
//! The library itself only emits events: `debug!()` when a handle is opened
//! or closed and `trace!()` for every bytes-on-the-wire transfer. Installing
//! a subscriber is left to the program, which should call one of the init
//! functions below once at startup.
//!
//! Modules in this crate `use crate::tracing::prelude::*` for the level
//! macros.

use std::env;
use time::OffsetDateTime;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{format::Writer, time::FormatTime},
    prelude::*,
    util::SubscriberInitExt,
};

pub mod prelude {
    #[allow(unused_imports)]
    pub use tracing::{debug, error, info, trace, warn};
}

use prelude::*;

/// Initialize logging.
///
/// Under systemd (`JOURNAL_STREAM` set) events go to journald; otherwise
/// they go to stdout.
///
/// Panics if a global subscriber is already installed.
pub fn init_journald_or_stdout() {
    if env::var("JOURNAL_STREAM").is_ok() {
        if let Ok(layer) = tracing_journald::layer() {
            tracing_subscriber::registry().with(layer).init();
        } else {
            stdout_registry().init();
            error!("Failed to initialize journald logging, using stdout.");
        }
    } else {
        stdout_registry().init();
    }
}

/// Install the stdout subscriber unless one is already set.
///
/// Returns true if this call installed it.
pub fn try_init_stdout() -> bool {
    stdout_registry().try_init().is_ok()
}

// Filter according to RUST_LOG, overriding the default level (ERROR) to INFO.
fn stdout_registry() -> impl SubscriberInitExt {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("RUST_LOG")
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTimer))
}

// Timestamps in local time, to the nearest second.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = OffsetDateTime::now_local().unwrap_or(OffsetDateTime::now_utc());
        let stamp = now
            .format(time::macros::format_description!("[hour]:[minute]:[second]"))
            .map_err(|_| std::fmt::Error)?;
        write!(w, "{stamp}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_stdout_init_is_refused() {
        // Another test may have won the race; either way a second call
        // must not install anything.
        let _ = try_init_stdout();
        assert!(!try_init_stdout());
    }

    #[test]
    fn local_timer_formats_hh_mm_ss() {
        let mut out = String::new();
        LocalTimer
            .format_time(&mut Writer::new(&mut out))
            .expect("timer formats");
        assert_eq!(out.len(), 8, "{out}");
        assert_eq!(out.matches(':').count(), 2, "{out}");
    }
}
