use clap::{Arg, ArgMatches, Command};
use munin_nvme_core::{config::CliConfig, run_plugin, CommandRunner, Config, Mode};
use std::{io::stdout, path::PathBuf, process};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Markers munin-node-configure scans plugin files for.
#[used]
static MUNIN_MAGIC_MARKERS: &str = "#%# family=contrib\n#%# capabilities=autoconf\n";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("munin-nvme")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Munin plugin reporting NVMe temperature, throttling, wear-out, media errors and spare capacity")
        .arg(
            Arg::new("mode")
                .value_name("MODE")
                .help("autoconf, config, or anything else to fetch values"),
        )
        .after_help(MUNIN_MAGIC_MARKERS)
        .arg(
            Arg::new("nvme-bin")
                .long("nvme-bin")
                .env("NVME_BIN")
                .value_name("PATH")
                .help("nvme-cli binary name or path"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .env("NVME_TIMEOUT")
                .value_name("SECS")
                .help("Abort when a single nvme-cli call takes longer than this")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("json-config")
                .long("json-config")
                .env("MUNIN_NVME_CONFIG")
                .value_name("PATH")
                .help("Path to JSON configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .env("MUNIN_NVME_LOG")
                .value_name("FILTER")
                .help("Log filter for stderr output")
                .default_value("warn"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .env("MUNIN_NVME_LOG_JSON")
                .help("Write logs as JSON")
                .action(clap::ArgAction::SetTrue),
        )
}

fn run() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    init_logging(&matches);

    let cli_config = CliConfig {
        nvme_bin: matches.get_one::<String>("nvme-bin").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
    };
    let json_config_path = matches.get_one::<PathBuf>("json-config");
    let config = Config::load(Some(&cli_config), json_config_path)?;

    let mode = Mode::from_arg(matches.get_one::<String>("mode").map(String::as_str));
    debug!(?mode, ?config, "starting");
    let runner = CommandRunner::new(&config);

    let mut stdout = stdout().lock();
    run_plugin(&runner, &config, mode, &mut stdout)?;
    Ok(())
}

/// Logs go to stderr; stdout belongs to munin.
fn init_logging(matches: &ArgMatches) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = matches
            .get_one::<String>("log-level")
            .map(String::as_str)
            .unwrap_or("warn");
        EnvFilter::new(level)
    });

    let layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);

    if matches.get_flag("log-json") {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_target(false))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_binary_name() {
        assert_eq!(cli().get_name(), "munin-nvme");
    }

    #[test]
    fn test_magic_markers_are_embedded() {
        assert!(MUNIN_MAGIC_MARKERS.lines().any(|l| l == "#%# family=contrib"));
        assert!(MUNIN_MAGIC_MARKERS.lines().any(|l| l == "#%# capabilities=autoconf"));

        let help = cli().render_long_help().to_string();
        assert!(help.contains("#%# capabilities=autoconf"));
    }

    #[test]
    fn test_mode_argument() {
        let matches = cli().get_matches_from(["munin-nvme", "config"]);
        assert_eq!(
            matches.get_one::<String>("mode").map(String::as_str),
            Some("config")
        );

        let matches = cli().get_matches_from(["munin-nvme"]);
        assert!(matches.get_one::<String>("mode").is_none());
    }
}
