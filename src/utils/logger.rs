use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Installs the global subscriber for the binary.
///
/// Logs are written to stderr; stdout carries only the report lines printed
/// through the console sink, so the two can be redirected separately.
pub fn init_cli_logger(verbose: bool) {
    cli_subscriber(cli_filter(verbose), std::io::stderr).init();
}

/// `RUST_LOG` wins when set; otherwise crate-level info, or debug when verbose.
fn cli_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "prof_roster=debug,info"
    } else {
        "prof_roster=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

pub fn cli_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_logs_go_to_given_writer_only() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = cli_subscriber(EnvFilter::new("info"), move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Serialized roster");
            tracing::debug!("hidden detail");
        });

        let text = captured.text();
        assert!(text.contains("Serialized roster"));
        assert!(!text.contains("hidden detail"));
        assert!(!text.contains("logger.rs"));
    }
}
