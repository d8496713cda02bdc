use crate::desktop::{WindowHandle, WindowOwner};

use super::errors::FreezeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreezeOutcome {
    /// The owning thread was suspended and the window is now tracked.
    Frozen {
        owner: WindowOwner,
        /// Suspend count before this call. Non-zero means something else
        /// already had the thread suspended.
        previous_suspend_count: u32,
    },
    /// The window was already tracked as frozen; nothing was called.
    AlreadyFrozen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnfreezeOutcome {
    /// The owning thread was resumed and the window is no longer tracked.
    Unfrozen {
        owner: WindowOwner,
        /// Suspend count before this call. Above one means the thread is
        /// still suspended by someone else after our resume.
        previous_suspend_count: u32,
    },
    /// The window was not tracked as frozen; nothing was called.
    NotFrozen,
}

impl UnfreezeOutcome {
    /// Whether the thread may still be suspended after this resume.
    pub fn still_suspended(&self) -> bool {
        matches!(
            self,
            UnfreezeOutcome::Unfrozen {
                previous_suspend_count,
                ..
            } if *previous_suspend_count > 1
        )
    }
}

/// Result of draining the frozen set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnfreezeAllReport {
    pub unfrozen: Vec<WindowHandle>,
    pub failures: Vec<(WindowHandle, FreezeError)>,
}

impl UnfreezeAllReport {
    pub fn attempted(&self) -> usize {
        self.unfrozen.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_suspended() {
        let owner = WindowOwner {
            thread_id: 1,
            process_id: 2,
        };
        let clean = UnfreezeOutcome::Unfrozen {
            owner,
            previous_suspend_count: 1,
        };
        let shared = UnfreezeOutcome::Unfrozen {
            owner,
            previous_suspend_count: 2,
        };
        assert!(!clean.still_suspended());
        assert!(shared.still_suspended());
        assert!(!UnfreezeOutcome::NotFrozen.still_suspended());
    }

    #[test]
    fn test_report_counts() {
        let report = UnfreezeAllReport {
            unfrozen: vec![WindowHandle::from_raw(1)],
            failures: vec![(
                WindowHandle::from_raw(2),
                FreezeError::LookupFailed {
                    handle: WindowHandle::from_raw(2),
                },
            )],
        };
        assert_eq!(report.attempted(), 2);
        assert!(!report.is_clean());
        assert!(UnfreezeAllReport::default().is_clean());
    }
}
