//! Internal helper macros.

/// Returns early with `Err($error)` when `$predicate` does not hold.
///
/// Like `assert!`, but for conditions the caller is expected to handle.
///
/// ```ignore
/// ensure!(self.listener_id.is_none(), ServerError::AlreadyRunning);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
