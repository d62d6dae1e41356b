use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use portsweep_common::sink::PROGRESS_TARGET;

use crate::terminal::print::PRINT_TARGET;

/// Installs the global subscriber. `RUST_LOG` overrides the default level.
///
/// Quiet mode drops progress and informational events but keeps the console
/// framing and per-host results.
pub fn init_logging(quiet: bool) {
    let default_directives: String = if quiet {
        format!("warn,{PRINT_TARGET}=info")
    } else {
        "info".to_string()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(SweepFormatter)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .init();
}

/// Prefixes every event with a status symbol instead of timestamps and targets.
///
/// Console framing (`PRINT_TARGET`) is written as-is. Engine progress lines
/// carry their own timestamp and get a neutral marker.
pub struct SweepFormatter;

impl<S, N> FormatEvent<S, N> for SweepFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() != PRINT_TARGET {
            let symbol: ColoredString = if meta.target() == PROGRESS_TARGET {
                "[>]".cyan()
            } else {
                match *meta.level() {
                    Level::TRACE => "[ ]".dimmed(),
                    Level::DEBUG => "[?]".blue(),
                    Level::INFO => "[+]".green().bold(),
                    Level::WARN => "[*]".yellow().bold(),
                    Level::ERROR => "[-]".red().bold(),
                }
            };
            write!(writer, "{symbol} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
