/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::cmd::run_chain_demo;
use crate::config::Settings;
use crate::errors::Result;
use crate::logging::GlobalLogger;

use clap::{App, Arg, ArgMatches};
use lazymat_data::set_global_policy;
use log::{error, info};
use std::error::Error as _;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> Result<()>,
{
    main().unwrap_or_else(|e| {
        error!("{}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            error!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    });
}

fn logging_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .multiple(true)
            .help("show trace-level messages from lazymat"),
        Arg::with_name("log")
            .long("log")
            .value_name("FILE")
            .takes_value(true)
            .help("also write the log to this file"),
    ]
}

fn init_global_logger(matches: &ArgMatches) -> Result<()> {
    let mut logger = GlobalLogger::default();
    logger.verbosity(matches.occurrences_of("verbose") as i32);
    if let Some(path) = matches.value_of("log") {
        logger.path(path);
    }
    logger.apply()
}

pub fn chain() {
    wrap_result_main(|| {
        let matches = {
            App::new("lazymat-chain")
                .version(env!("CARGO_PKG_VERSION"))
                .about("Multiplies a chain of four matrices two different ways, and compares the results.")
                .arg(Arg::with_name("config")
                    .short("c")
                    .long("config")
                    .value_name("CONFIG")
                    .takes_value(true)
                    .help("settings file (yaml)"))
                .args(&logging_args())
                .get_matches()
        };
        init_global_logger(&matches)?;

        let settings = match matches.value_of("config") {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        set_global_policy(settings.optimize.policy());

        let report = run_chain_demo(&settings)?;
        info!("AxBxCxD =\n{:6}", report.abcd);
        Ok(())
    });
}
