// In: src/observability.rs

//! Logging setup. The decoders log through the `log` facade only; this module
//! lets a binary or test harness that has no logger of its own turn the output on.

use log::LevelFilter;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `level`, once per process.
///
/// `RUST_LOG` still overrides the level when set. Later calls, or calls after
/// another logger was installed, are no-ops.
pub fn enable_verbose_logging(level: LevelFilter) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(cfg!(test));
        builder.filter_level(level);
        builder.parse_default_env();

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });

        let _ = builder.try_init();
    });
}
