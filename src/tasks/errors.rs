/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use lazymat_data::Dims;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("could not open {}", .path.display())]
    Io { path: PathBuf, #[source] source: io::Error },

    #[error("could not read config")]
    Config(#[from] serde_yaml::Error),

    #[error("could not set up logging")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Matrix(#[from] lazymat_data::Error),

    #[error("{what}: results differ at ({}, {}): {left} vs {right}", .index.0, .index.1)]
    Disagreement { what: &'static str, index: (usize, usize), left: String, right: String },

    #[error("{what}: results have different shapes: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    ShapesDiffer { what: &'static str, left: Dims, right: Dims },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
