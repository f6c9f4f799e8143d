use session::BuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no available port on {host} in {start}..={end}")]
    NoAvailableConnection { host: String, start: u16, end: u16 },
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
