use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

/// Spinners only on an interactive stderr, and never for machine output.
pub fn init(flags: &GlobalFlags) {
    let progress = std::io::stderr().is_terminal()
        && !flags.quiet
        && flags.format == OutputFormat::Table;

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        progress,
        term_width,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or(UiPrefs {
        progress: false,
        term_width: None,
    })
}
