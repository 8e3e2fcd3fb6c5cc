//! Generic status of one asynchronous operation.
//!
//! Every screen keeps one [`OpStatus`] per operation (list, create, update,
//! delete) instead of separate loading/error/success flags.

/// Idle | Pending | Succeeded(T) | Failed(E).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OpStatus<T, E> {
    #[default]
    Idle,
    Pending,
    Succeeded(T),
    Failed(E),
}

impl<T, E> OpStatus<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, OpStatus::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            OpStatus::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            OpStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Record the outcome of a finished operation.
    pub fn settle(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => OpStatus::Succeeded(value),
            Err(err) => OpStatus::Failed(err),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_records_outcome() {
        let mut status: OpStatus<u32, String> = OpStatus::Pending;
        assert!(status.is_pending());

        status.settle(Ok(3));
        assert_eq!(status.value(), Some(&3));
        assert!(status.error().is_none());

        status.settle(Err("boom".into()));
        assert_eq!(status.error().map(String::as_str), Some("boom"));
        assert!(status.value().is_none());
    }
}
