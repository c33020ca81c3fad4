//! Exit code constants for the clipforge CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, empty input)
//! - 2: Cancelled by the user at a dialog
//! - 3: Collaborator failure (listing or processing exited non-zero)
//! - 4: Desktop failure (clipboard or dialog toolkit)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or nothing to process.
pub const USER_ERROR: i32 = 1;

/// The user dismissed a dialog.
pub const CANCELLED: i32 = 2;

/// The collaborator exited non-zero or timed out.
pub const COLLABORATOR_FAILURE: i32 = 3;

/// Clipboard or dialog toolkit failure.
pub const DESKTOP_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            CANCELLED,
            COLLABORATOR_FAILURE,
            DESKTOP_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn only_success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert!(USER_ERROR > 0);
        assert!(CANCELLED > 0);
        assert!(COLLABORATOR_FAILURE > 0);
        assert!(DESKTOP_FAILURE > 0);
    }
}
