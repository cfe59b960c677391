//! `scaffolder version`: logo, crate version and build date.

use serde::Serialize;

use crate::{cli::OutputFormat, error::CliResult, output::OutputManager};

const LOGO: &str = r"
 o-o            o-o o-o    o    o
|               |   |      |    |
 o-o   o-o  oo -O- -O- o-o |  o-O o-o o-o
    | |    | |  |   |  | | | |  | |-' |
o--o   o-o o-o- o   o  o-o o  o-o o-o o";

/// Set at compile time by the release pipeline.
const BUILD_DATE: Option<&str> = option_env!("SCAFFOLDER_BUILD_DATE");

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    build_date: &'static str,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_date: BUILD_DATE.unwrap_or("n/a"),
        }
    }
}

pub fn execute(output: &OutputManager) -> CliResult<()> {
    let info = VersionInfo::current();
    if output.format() == OutputFormat::Json {
        output.json(&info)?;
        return Ok(());
    }

    output.print(LOGO)?;
    output.print(&format!(
        "version: {}, build date: {}\n",
        info.version, info.build_date
    ))?;
    Ok(())
}
