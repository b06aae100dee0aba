use std::fmt::Display;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Transport failure, non-2xx status or malformed payload
    #[error("Remote call to {endpoint} failed: {reason}")]
    RemoteCall { endpoint: String, reason: String },
}

impl Error {
    pub fn remote_call(endpoint: &str, reason: impl Display) -> Self {
        Error::RemoteCall {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}
