use thiserror::Error;

/// Errors reported by operations that take a [`Position`] or a range of
/// positions.
///
/// Every fallible operation checks its inputs before it touches the list, so
/// when one of these is returned the list is left unchanged.
///
/// [`Position`]: crate::Position
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    #[error("position was issued by another list")]
    ForeignPosition,
    #[error("position refers to an element that has been erased")]
    StalePosition,
    #[error("the end position does not hold an element")]
    DerefEnd,
    #[error("cannot move past the end of the list")]
    PastEnd,
    #[error("cannot move before the beginning of the list")]
    BeforeBegin,
    #[error("cannot erase the end position")]
    EraseEnd,
    #[error("`last` is not reachable from `first`")]
    InvalidRange,
    #[error("failed to allocate storage for {requested} nodes")]
    AllocationFailed { requested: usize },
}

#[cfg(test)]
mod tests {
    use super::ListError;
    use expect_test::expect;

    #[test]
    fn error_messages() {
        expect![["position refers to an element that has been erased"]]
            .assert_eq(&ListError::StalePosition.to_string());
        expect![["`last` is not reachable from `first`"]]
            .assert_eq(&ListError::InvalidRange.to_string());
        expect![["failed to allocate storage for 3 nodes"]]
            .assert_eq(&ListError::AllocationFailed { requested: 3 }.to_string());
    }
}
