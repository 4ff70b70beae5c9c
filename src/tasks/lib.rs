/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)] // serde default fns

mod cmd;
mod config;
mod errors;
mod logging;

pub mod entry_points;

pub use crate::cmd::{linear_ramp, run_chain_demo, ChainReport};
pub use crate::config::{Demo, Optimize, Settings};
pub use crate::errors::{Error, Result};
pub use crate::logging::{ColorizedLevel, GlobalLogger};
