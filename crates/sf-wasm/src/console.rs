//! Browser console logging and the panic hook.

use log::LevelFilter;

/// Route `log` records to the browser console at `level_name`. The first
/// call installs `console_log`; later calls only change the level.
pub fn init_logger(level_name: &str) {
    let filter = parse_level(level_name);
    let installed = match filter.to_level() {
        Some(level) => console_log::init_with_level(level).is_ok(),
        None => false,
    };
    if !installed {
        log::set_max_level(filter);
    }
}

/// Parse a level name, falling back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

pub fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Shapefall WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn repeated_init_only_moves_the_level() {
        init_logger("warn");
        assert_eq!(log::max_level(), LevelFilter::Warn);
        init_logger("debug");
        assert_eq!(log::max_level(), LevelFilter::Debug);
        // Nothing may reach the JS console from a native test run.
        init_logger("off");
        assert_eq!(log::max_level(), LevelFilter::Off);
    }
}
