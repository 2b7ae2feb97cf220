//! Scenario errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario '{scenario}' failed: {message}")]
    AssertionFailed { scenario: String, message: String },

    #[error("scenario '{scenario}' setup failed: {message}")]
    Setup { scenario: String, message: String },

    #[error("scenario '{scenario}' session error: {source}")]
    Session {
        scenario: String,
        #[source]
        source: tabula_session::SessionError,
    },
}

impl ScenarioError {
    pub fn assertion_failed(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn setup(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Setup {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    pub fn session(scenario: impl Into<String>, source: tabula_session::SessionError) -> Self {
        Self::Session {
            scenario: scenario.into(),
            source,
        }
    }
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
