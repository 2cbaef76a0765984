use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ReliefError {
    pub message: String,
}

impl ReliefError {
    pub fn new(message: &str) -> ReliefError {
        ReliefError {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ReliefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ReliefError {}
