pub mod config;
pub mod error;
pub mod graphs;
pub mod model;
pub mod nvme;
pub mod render;
pub mod sanitize;

pub use config::Config;
pub use error::{CoreError, Result};
pub use graphs::{all_graphs, Graph};
pub use model::*;
pub use nvme::{get_devices, CommandRunner, NvmeCli};
pub use sanitize::clean_fieldname;

use std::fmt;
use std::io::Write;
use tracing::debug;

/// Answer to munin's `autoconf` question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autoconf {
    Yes,
    No(&'static str),
}

impl fmt::Display for Autoconf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No(reason) => write!(f, "no ({})", reason),
        }
    }
}

/// Check whether the plugin can run on this host.
///
/// A missing binary or an empty device list is a negative answer, not an error.
pub fn autoconf(cli: &dyn NvmeCli) -> Result<Autoconf> {
    if !cli.is_available() {
        return Ok(Autoconf::No("cannot find nvme-cli binary"));
    }

    if cli.list_devices()?.is_empty() {
        return Ok(Autoconf::No("no nvme devices found"));
    }

    Ok(Autoconf::Yes)
}

/// Run the plugin in `mode`, writing munin protocol output to `out`.
///
/// Sections are written as soon as they are rendered.
pub fn run_plugin<W: Write>(cli: &dyn NvmeCli, config: &Config, mode: Mode, out: &mut W) -> Result<()> {
    if mode == Mode::Autoconf {
        writeln!(out, "{}", autoconf(cli)?)?;
        return Ok(());
    }

    let devices = get_devices(cli)?;

    for graph in all_graphs(config) {
        debug!(graph = graph.info().multigraph, ?mode, "reporting");
        out.write_all(graph.report(&devices, mode).as_bytes())?;
    }

    out.flush()?;
    Ok(())
}
