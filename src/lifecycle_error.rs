use std::fmt;

/// Usage errors surfaced by lifecycle operations.
///
/// Every variant signals a precondition violation by the caller, not a
/// recoverable runtime failure; nothing is retried and nothing is logged on
/// the error path. Each variant carries the offending type's name for
/// diagnostics.
#[derive(Debug, PartialEq, Eq)]
pub enum SingletonError {
    /// A base instance is already in place; clear it before assigning.
    AlreadySet { type_name: &'static str },
    /// No base instance is in place to clear.
    NotSet { type_name: &'static str },
    /// The push/pop protocol was violated: assignment or clearing attempted
    /// while overrides are stacked, or a pop on an empty stack.
    PushPop { type_name: &'static str },
}

impl fmt::Display for SingletonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingletonError::AlreadySet { type_name } => {
                write!(f, "singleton already set for type: {type_name}")
            }
            SingletonError::NotSet { type_name } => {
                write!(f, "no singleton set for type: {type_name}")
            }
            SingletonError::PushPop { type_name } => {
                write!(f, "push/pop protocol violated for type: {type_name}")
            }
        }
    }
}

impl std::error::Error for SingletonError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_set_display() {
        let err = SingletonError::AlreadySet { type_name: "Config" };
        assert_eq!(err.to_string(), "singleton already set for type: Config");
    }

    #[test]
    fn test_not_set_display() {
        let err = SingletonError::NotSet { type_name: "Config" };
        assert_eq!(err.to_string(), "no singleton set for type: Config");
    }

    #[test]
    fn test_push_pop_display() {
        let err = SingletonError::PushPop { type_name: "Config" };
        assert_eq!(
            err.to_string(),
            "push/pop protocol violated for type: Config"
        );
    }

    #[test]
    fn test_debug_format() {
        let err = SingletonError::NotSet { type_name: "Config" };
        assert_eq!(
            format!("{:?}", err),
            "NotSet { type_name: \"Config\" }"
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            SingletonError::PushPop { type_name: "A" },
            SingletonError::PushPop { type_name: "A" }
        );
        assert_ne!(
            SingletonError::PushPop { type_name: "A" },
            SingletonError::NotSet { type_name: "A" }
        );
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &SingletonError::NotSet { type_name: "Config" };
        assert_eq!(err.to_string(), "no singleton set for type: Config");
    }
}
