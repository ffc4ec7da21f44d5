use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectError>;

#[derive(Debug, Error)]
pub enum IntrospectError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("failed to parse introspection response: {0}")]
    Parse(String),

    #[error(transparent)]
    Executor(#[from] toolgen_catalog::ExecutorError),

    #[error(transparent)]
    Convert(#[from] toolgen_convert::ConvertError),
}
