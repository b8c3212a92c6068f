//! Command error types

/// Exit status for general failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when the cluster or its services are unavailable (EX_UNAVAILABLE)
pub const EXIT_UNAVAILABLE: i32 = 69;

/// Failures of the `service list` command
#[derive(Debug, thiserror::Error)]
pub enum ServiceListError {
    #[error("Error getting config: {0}")]
    Config(String),

    #[error("Profile {0} not found")]
    ProfileNotFound(String),

    #[error("Invalid URL format: {0}")]
    Template(String),

    #[error("Error getting client: {0}")]
    Client(String),

    #[error("profile {0} is not running.")]
    HostNotRunning(String),

    #[error("Failed to get service URL: {0}")]
    Resolve(String),

    #[error("Failed to render service list: {0}")]
    Render(String),
}

impl ServiceListError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HostNotRunning(_) | Self::Resolve(_) => EXIT_UNAVAILABLE,
            _ => EXIT_FAILURE,
        }
    }

    /// Follow-up hint printed after the error, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Resolve(_) => Some(
                "Check that the cluster is running and that you have specified the correct namespace (-n flag) if required.",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ServiceListError::HostNotRunning("minikube".into()).exit_code(), 69);
        assert_eq!(ServiceListError::Resolve("boom".into()).exit_code(), 69);
        assert_eq!(ServiceListError::Config("bad".into()).exit_code(), 1);
        assert_eq!(ServiceListError::ProfileNotFound("p".into()).exit_code(), 1);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ServiceListError::HostNotRunning("minikube".into()).to_string(),
            "profile minikube is not running."
        );
        assert!(ServiceListError::Resolve("x".into()).notice().is_some());
        assert!(ServiceListError::Client("x".into()).notice().is_none());
    }
}
