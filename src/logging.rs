use tracing_subscriber::filter::EnvFilter;

/// Logs go to stderr, so they never end up mixed with the CSV written to
/// stdout. `RUST_LOG` takes precedence over the verbosity flag.
pub fn set_up(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{}={}",
            env!("CARGO_CRATE_NAME"),
            max_level(verbosity)
        ))
    });

    // Fails if a subscriber is already set, which is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(true)
        .try_init();
}

fn max_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[test]
fn test_max_level() {
    for (verbosity, want) in vec![(0, "warn"), (1, "info"), (2, "debug"), (3, "trace"), (9, "trace")] {
        assert_eq!(want, max_level(verbosity));
    }
}
