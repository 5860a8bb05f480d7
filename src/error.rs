//! Error types for the demos.
//!
//! Arithmetic on the shared counter never fails. What can fail is the machinery around it:
//! a waited task may panic, a runtime may refuse to start, or a caller may hand in a
//! configuration that cannot be run.

/// Errors that can occur while launching or waiting on a demo
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DemoError {
    /// A waited task or joined thread panicked
    TaskPanicked {
        task: String,
        panic_message: String,
    },
    /// The async runtime could not be built
    Runtime { message: String },
    /// The configuration cannot be run as given
    InvalidConfig { message: String },
}

impl DemoError {
    pub(crate) fn from_panic(task: impl Into<String>, payload: Box<dyn std::any::Any + Send>) -> Self {
        let panic_message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };

        DemoError::TaskPanicked {
            task: task.into(),
            panic_message,
        }
    }
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoError::TaskPanicked {
                task,
                panic_message,
            } => {
                write!(
                    f,
                    "Task '{}' panicked: {}\n\
                     \n\
                     Any output it had left to print was lost.",
                    task, panic_message
                )
            }
            DemoError::Runtime { message } => {
                write!(f, "Failed to build async runtime: {}", message)
            }
            DemoError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
        }
    }
}

impl std::error::Error for DemoError {}

impl From<std::io::Error> for DemoError {
    fn from(err: std::io::Error) -> Self {
        DemoError::Runtime {
            message: err.to_string(),
        }
    }
}

/// Result type for demo operations
pub type DemoResult<T> = Result<T, DemoError>;
