//! Room system errors and host-facing result codes

use thiserror::Error;

use super::name::NameError;

/// Result codes handed to the host, one per outcome class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomSystemResult {
    Success,
    RoomDoesNotExist,
    PointDoesNotExist,
    SameRoom,
    Already,
    OneWayLink,
    Fail,
}

/// Errors returned by room graph and room system operations
///
/// Every variant is an expected condition; nothing is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room '{0}' already exists")]
    RoomExists(String),

    #[error("room '{0}' does not exist")]
    RoomNotFound(String),

    #[error("cannot link room '{0}' to itself")]
    SameRoom(String),

    #[error("link {from} -> {to} already exists")]
    LinkExists { from: String, to: String },

    #[error("link {from} -> {to} does not exist")]
    LinkAbsent { from: String, to: String },

    #[error("selection has {marked} of {required} required points")]
    IncompleteSelection { required: usize, marked: usize },

    #[error("invalid room name: {0}")]
    InvalidName(#[from] NameError),
}

impl RoomError {
    /// Map to the host result code.
    ///
    /// `LinkExists` and `LinkAbsent` both map to `Already`; the host tells
    /// them apart by the operation it invoked.
    pub fn result_code(&self) -> RoomSystemResult {
        match self {
            RoomError::RoomExists(_) => RoomSystemResult::Already,
            RoomError::RoomNotFound(_) => RoomSystemResult::RoomDoesNotExist,
            RoomError::SameRoom(_) => RoomSystemResult::SameRoom,
            RoomError::LinkExists { .. } | RoomError::LinkAbsent { .. } => {
                RoomSystemResult::Already
            }
            RoomError::IncompleteSelection { .. } => RoomSystemResult::PointDoesNotExist,
            RoomError::InvalidName(_) => RoomSystemResult::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_codes() {
        assert_eq!(
            RoomError::RoomExists("a".into()).result_code(),
            RoomSystemResult::Already
        );
        assert_eq!(
            RoomError::RoomNotFound("a".into()).result_code(),
            RoomSystemResult::RoomDoesNotExist
        );
        assert_eq!(
            RoomError::LinkAbsent {
                from: "a".into(),
                to: "b".into()
            }
            .result_code(),
            RoomSystemResult::Already
        );
        assert_eq!(
            RoomError::IncompleteSelection {
                required: 2,
                marked: 1
            }
            .result_code(),
            RoomSystemResult::PointDoesNotExist
        );
        assert_eq!(
            RoomError::InvalidName(NameError::Empty).result_code(),
            RoomSystemResult::Fail
        );
    }

    #[test]
    fn test_error_messages() {
        let err = RoomError::LinkExists {
            from: "a".into(),
            to: "b".into(),
        };
        assert_eq!(err.to_string(), "link a -> b already exists");
    }
}
