use std::time::Duration;

use crate::{
    config::LifewatchConfig,
    local_logger::init_local_logger,
    monitor::{self, Monitor, WatchSettings},
    prelude::*,
    process::SystemProcessTable,
    query::Query,
};
use clap::{
    Parser,
    builder::{Styles, styling},
};
use console::Term;

const DEFAULT_INTERVAL_SECS: f64 = 0.5;
const DEFAULT_HIGHLIGHT_SECS: f64 = 3.0;

fn create_styles() -> Styles {
    styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Blue.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Watch processes and show life-and-death information of them.",
    styles = create_styles()
)]
pub struct Cli {
    /// Query pattern (regular expression) to identify processes to watch
    pub query: String,

    /// Set the interval between checks (in seconds), default is 0.5
    #[arg(short, long, value_name = "INTERVAL")]
    pub interval: Option<f64>,

    /// Set the duration to highlight the results (in seconds), default is 3.0
    #[arg(short = 'l', long, value_name = "DURATION")]
    pub highlight: Option<f64>,

    /// Add a command name to ignore, may be repeated
    #[arg(short = 'x', long = "cmd-exclude", value_name = "CMDNAME")]
    pub cmd_exclude: Vec<String>,

    /// The configuration name to use
    /// If provided, the configuration will be loaded from ~/.config/lifewatch/{config-name}.yaml
    /// Otherwise, loads from ~/.config/lifewatch/config.yaml
    #[arg(long, env = "LIFEWATCH_CONFIG_NAME")]
    pub config_name: Option<String>,
}

fn seconds(value: f64, what: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| format!("invalid {what}: {value}"))
}

impl WatchSettings {
    /// Merge the command line over the config file, then validate
    pub fn resolve(cli: &Cli, config: &LifewatchConfig) -> Result<Self> {
        let query = Query::new(&cli.query)?;

        let interval_secs = cli
            .interval
            .or(config.watch.interval)
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        let interval = seconds(interval_secs, "interval")?;
        // Anything below a nanosecond rounds down to zero and would spin the loop
        ensure!(
            !interval.is_zero(),
            "invalid interval: {interval_secs}, expected a positive number of seconds"
        );
        let highlight = cli
            .highlight
            .or(config.watch.highlight)
            .unwrap_or(DEFAULT_HIGHLIGHT_SECS);
        ensure!(
            highlight.is_finite() && highlight >= 0.0,
            "invalid highlight duration: {highlight}, expected a non-negative number of seconds"
        );

        let excluded_names = config
            .watch
            .cmd_exclude
            .iter()
            .chain(&cli.cmd_exclude)
            .cloned()
            .collect();

        Ok(WatchSettings {
            query,
            interval,
            highlight: seconds(highlight, "highlight duration")?,
            excluded_names,
        })
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_local_logger()?;

    let config = LifewatchConfig::load(cli.config_name.as_deref())?;
    let settings = WatchSettings::resolve(&cli, &config)?;
    let interval = settings.interval;
    info!(
        "Watching processes matching {:?} every {:?}",
        settings.query.as_str(),
        interval
    );

    let term = Term::stdout();
    let monitor = Monitor::new(SystemProcessTable::new(), settings, console::colors_enabled());
    monitor::watch(monitor, interval, &term).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lifewatch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_builtin_defaults() {
        let settings = WatchSettings::resolve(&parse(&["nginx"]), &LifewatchConfig::default())
            .unwrap();
        assert_eq!(settings.query.as_str(), "nginx");
        assert_eq!(settings.interval, Duration::from_millis(500));
        assert_eq!(settings.highlight, Duration::from_secs(3));
        assert!(settings.excluded_names.is_empty());
    }

    #[test]
    fn test_short_flags_and_repeated_exclusions() {
        let cli = parse(&["-i", "0.25", "-l", "2", "-x", "tail", "-x", "less", "^java$"]);
        let settings = WatchSettings::resolve(&cli, &LifewatchConfig::default()).unwrap();
        assert_eq!(settings.interval, Duration::from_millis(250));
        assert_eq!(settings.highlight, Duration::from_secs(2));
        assert_eq!(settings.excluded_names, vec!["tail", "less"]);
    }

    #[test]
    fn test_command_line_wins_over_config() {
        let mut config = LifewatchConfig::default();
        config.watch.interval = Some(2.0);
        config.watch.highlight = Some(10.0);
        config.watch.cmd_exclude = vec!["less".to_string()];

        let cli = parse(&["--interval", "1", "--cmd-exclude", "tail", "sshd"]);
        let settings = WatchSettings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.interval, Duration::from_secs(1));
        assert_eq!(settings.highlight, Duration::from_secs(10));
        assert_eq!(settings.excluded_names, vec!["less", "tail"]);
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let err = WatchSettings::resolve(&parse(&["[unclosed"]), &LifewatchConfig::default())
            .unwrap_err();
        assert!(format!("{err:#}").starts_with("invalid pattern: \"[unclosed\""));
    }

    #[test]
    fn test_non_positive_interval_is_rejected() {
        let cli = parse(&["--interval", "0", "sshd"]);
        assert!(WatchSettings::resolve(&cli, &LifewatchConfig::default()).is_err());
        let cli = parse(&["--interval", "1e-12", "sshd"]);
        assert!(WatchSettings::resolve(&cli, &LifewatchConfig::default()).is_err());
        let cli = parse(&["--interval=-0.5", "sshd"]);
        assert!(WatchSettings::resolve(&cli, &LifewatchConfig::default()).is_err());
        let cli = parse(&["--highlight=-1", "sshd"]);
        assert!(WatchSettings::resolve(&cli, &LifewatchConfig::default()).is_err());
    }

    #[test]
    fn test_query_is_required() {
        assert!(Cli::try_parse_from(["lifewatch"]).is_err());
    }
}
