use crate::{app, config, model};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("model manager error: {0}")]
    Model(#[from] model::Error),
    #[error("serving error: {0}")]
    Serve(#[from] app::serve::ServeError),
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
