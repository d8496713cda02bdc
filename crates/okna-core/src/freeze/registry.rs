use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

use super::errors::FreezeError;
use super::types::{FreezeOutcome, UnfreezeAllReport, UnfreezeOutcome};
use crate::desktop::{WindowDirectory, WindowHandle, WindowOwner};

/// Tracks which windows this process has frozen.
///
/// A window is frozen by suspending the thread that pumps its message
/// queue. That thread may own other windows too; they freeze with it.
///
/// Shared between the shell and the hotkey thread behind an `Arc`. The set
/// lock is held across each whole freeze/unfreeze, so a check, its OS call
/// and the set mutation can't interleave with an `unfreeze_all` from the
/// other thread.
///
/// Suspend counts belong to the OS, not to us: if another tool also
/// suspended a thread, one resume here leaves it suspended. The previous
/// count is reported in the outcome so callers can surface that.
pub struct FreezeRegistry {
    directory: WindowDirectory,
    frozen: Mutex<BTreeSet<WindowHandle>>,
}

impl FreezeRegistry {
    pub fn new(directory: WindowDirectory) -> Self {
        Self {
            directory,
            frozen: Mutex::new(BTreeSet::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<WindowHandle>> {
        // A panic mid-operation leaves the set as it was before the insert or
        // remove, so the data is still consistent.
        self.frozen.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn resolve_owner(&self, handle: WindowHandle) -> Result<WindowOwner, FreezeError> {
        if !self.directory.is_live(handle) {
            return Err(FreezeError::InvalidHandle { handle });
        }
        self.directory
            .backend()
            .window_owner(handle)
            .ok_or(FreezeError::LookupFailed { handle })
    }

    pub fn freeze(&self, handle: WindowHandle) -> Result<FreezeOutcome, FreezeError> {
        let mut frozen = self.lock();
        if frozen.contains(&handle) {
            info!(event = "core.freeze.already_frozen", handle = %handle);
            return Ok(FreezeOutcome::AlreadyFrozen);
        }

        let owner = self.resolve_owner(handle).inspect_err(|e| {
            warn!(event = "core.freeze.freeze_failed", handle = %handle, error = %e);
        })?;

        let previous_suspend_count = self
            .directory
            .backend()
            .suspend_thread(owner.thread_id)
            .inspect_err(|e| {
                warn!(
                    event = "core.freeze.freeze_failed",
                    handle = %handle,
                    thread_id = owner.thread_id,
                    error = %e
                );
            })?;

        frozen.insert(handle);

        info!(
            event = "core.freeze.frozen",
            handle = %handle,
            thread_id = owner.thread_id,
            process_id = owner.process_id,
            previous_suspend_count = previous_suspend_count
        );
        Ok(FreezeOutcome::Frozen {
            owner,
            previous_suspend_count,
        })
    }

    fn resume(&self, handle: WindowHandle) -> Result<UnfreezeOutcome, FreezeError> {
        let owner = self.resolve_owner(handle)?;
        let previous_suspend_count = self.directory.backend().resume_thread(owner.thread_id)?;
        Ok(UnfreezeOutcome::Unfrozen {
            owner,
            previous_suspend_count,
        })
    }

    pub fn unfreeze(&self, handle: WindowHandle) -> Result<UnfreezeOutcome, FreezeError> {
        let mut frozen = self.lock();
        if !frozen.contains(&handle) {
            info!(event = "core.freeze.not_frozen", handle = %handle);
            return Ok(UnfreezeOutcome::NotFrozen);
        }

        let outcome = self.resume(handle).inspect_err(|e| {
            warn!(event = "core.freeze.unfreeze_failed", handle = %handle, error = %e);
        })?;

        frozen.remove(&handle);

        if outcome.still_suspended() {
            warn!(
                event = "core.freeze.thread_still_suspended",
                handle = %handle,
                "Thread had other suspenders; it remains suspended"
            );
        }
        info!(event = "core.freeze.unfrozen", handle = %handle);
        Ok(outcome)
    }

    /// Resume every tracked window.
    ///
    /// The set is always empty afterwards. A handle whose resume fails is
    /// reported in the returned report and dropped from tracking, since
    /// nothing more can be done with it from here.
    pub fn unfreeze_all(&self) -> UnfreezeAllReport {
        let mut frozen = self.lock();
        let snapshot: Vec<WindowHandle> = std::mem::take(&mut *frozen).into_iter().collect();

        let mut report = UnfreezeAllReport::default();
        for handle in snapshot {
            match self.resume(handle) {
                Ok(_) => report.unfrozen.push(handle),
                Err(e) => {
                    warn!(
                        event = "core.freeze.unfreeze_all_item_failed",
                        handle = %handle,
                        error = %e
                    );
                    report.failures.push((handle, e));
                }
            }
        }

        info!(
            event = "core.freeze.unfreeze_all_completed",
            unfrozen = report.unfrozen.len(),
            failed = report.failures.len()
        );
        report
    }

    pub fn is_frozen(&self, handle: WindowHandle) -> bool {
        self.lock().contains(&handle)
    }

    /// Snapshot of the frozen handles in ascending order.
    pub fn frozen_handles(&self) -> Vec<WindowHandle> {
        self.lock().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::DesktopBackend;
    use crate::desktop::test_helpers::FakeDesktop;
    use std::sync::Arc;

    fn setup() -> (Arc<FakeDesktop>, FreezeRegistry) {
        let fake = Arc::new(FakeDesktop::new());
        let registry = FreezeRegistry::new(WindowDirectory::new(fake.clone()));
        (fake, registry)
    }

    fn h(raw: isize) -> WindowHandle {
        WindowHandle::from_raw(raw)
    }

    #[test]
    fn test_freeze_suspends_owner_thread() {
        let (fake, registry) = setup();
        fake.add_window(10, "Notepad");

        let outcome = registry.freeze(h(10)).unwrap();
        assert!(matches!(
            outcome,
            FreezeOutcome::Frozen {
                previous_suspend_count: 0,
                ..
            }
        ));
        assert!(registry.is_frozen(h(10)));
        assert_eq!(fake.suspend_count(10), 1);
    }

    #[test]
    fn test_freeze_twice_is_idempotent() {
        let (fake, registry) = setup();
        fake.add_window(10, "Notepad");

        registry.freeze(h(10)).unwrap();
        let second = registry.freeze(h(10)).unwrap();

        assert_eq!(second, FreezeOutcome::AlreadyFrozen);
        assert_eq!(registry.len(), 1);
        assert_eq!(fake.suspend_count(10), 1);
    }

    #[test]
    fn test_freeze_stale_handle() {
        let (_fake, registry) = setup();
        let err = registry.freeze(h(404)).unwrap_err();
        assert_eq!(err, FreezeError::InvalidHandle { handle: h(404) });
        assert!(registry.is_empty());
    }

    #[test]
    fn test_freeze_lookup_failed() {
        let (fake, registry) = setup();
        fake.add_window(10, "Orphan");
        fake.set_owner(10, None);

        let err = registry.freeze(h(10)).unwrap_err();
        assert_eq!(err, FreezeError::LookupFailed { handle: h(10) });
        assert!(registry.is_empty());
    }

    #[test]
    fn test_freeze_open_failed_leaves_set_untouched() {
        let (fake, registry) = setup();
        fake.add_window(10, "Protected");
        fake.deny_thread(10);

        let err = registry.freeze(h(10)).unwrap_err();
        assert!(matches!(err, FreezeError::OpenFailed { thread_id: 10, .. }));
        assert!(registry.is_empty());
        assert_eq!(fake.suspend_count(10), 0);
    }

    #[test]
    fn test_freeze_reports_external_suspension() {
        let (fake, registry) = setup();
        fake.add_window(10, "Notepad");
        fake.suspend_thread(10).unwrap();

        let outcome = registry.freeze(h(10)).unwrap();
        assert!(matches!(
            outcome,
            FreezeOutcome::Frozen {
                previous_suspend_count: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_unfreeze_not_frozen() {
        let (fake, registry) = setup();
        fake.add_window(10, "Notepad");

        assert_eq!(registry.unfreeze(h(10)).unwrap(), UnfreezeOutcome::NotFrozen);
        assert!(registry.is_empty());
        assert_eq!(fake.suspend_count(10), 0);
    }

    #[test]
    fn test_freeze_then_unfreeze() {
        let (fake, registry) = setup();
        fake.add_window(10, "Notepad");

        registry.freeze(h(10)).unwrap();
        let outcome = registry.unfreeze(h(10)).unwrap();

        assert!(matches!(
            outcome,
            UnfreezeOutcome::Unfrozen {
                previous_suspend_count: 1,
                ..
            }
        ));
        assert!(!outcome.still_suspended());
        assert!(!registry.is_frozen(h(10)));
        assert_eq!(fake.suspend_count(10), 0);
    }

    #[test]
    fn test_unfreeze_failure_keeps_tracking() {
        let (fake, registry) = setup();
        fake.add_window(10, "Notepad");
        registry.freeze(h(10)).unwrap();
        fake.deny_thread(10);

        let err = registry.unfreeze(h(10)).unwrap_err();
        assert!(matches!(err, FreezeError::OpenFailed { .. }));
        assert!(registry.is_frozen(h(10)));

        fake.allow_thread(10);
        registry.unfreeze(h(10)).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unfreeze_all_empties_set_despite_failures() {
        let (fake, registry) = setup();
        fake.add_window(10, "a");
        fake.add_window(20, "b");
        fake.add_window(30, "c");
        for raw in [10, 20, 30] {
            registry.freeze(h(raw)).unwrap();
        }
        fake.deny_thread(20);
        fake.destroy_window(30);

        let report = registry.unfreeze_all();

        assert!(registry.is_empty());
        assert_eq!(report.unfrozen, vec![h(10)]);
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(report.failures[0].1, FreezeError::OpenFailed { .. }));
        assert_eq!(
            report.failures[1].1,
            FreezeError::InvalidHandle { handle: h(30) }
        );
        assert_eq!(fake.suspend_count(10), 0);
    }

    #[test]
    fn test_unfreeze_all_on_empty_set() {
        let (_fake, registry) = setup();
        let report = registry.unfreeze_all();
        assert_eq!(report.attempted(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unfreeze_all_from_another_thread() {
        let (fake, registry) = setup();
        let registry = Arc::new(registry);
        fake.add_window(10, "a");
        fake.add_window(20, "b");
        registry.freeze(h(10)).unwrap();
        registry.freeze(h(20)).unwrap();

        let worker = Arc::clone(&registry);
        let report = std::thread::spawn(move || worker.unfreeze_all())
            .join()
            .unwrap();

        assert_eq!(report.unfrozen, vec![h(10), h(20)]);
        assert!(registry.is_empty());
        assert_eq!(registry.frozen_handles(), Vec::<WindowHandle>::new());
    }

    #[test]
    fn test_shared_thread_windows_freeze_together() {
        let (fake, registry) = setup();
        let owner = Some(WindowOwner {
            thread_id: 7,
            process_id: 70,
        });
        fake.add_window(10, "Main");
        fake.add_window(11, "Tool palette");
        fake.set_owner(10, owner);
        fake.set_owner(11, owner);

        registry.freeze(h(10)).unwrap();
        registry.freeze(h(11)).unwrap();
        assert_eq!(fake.suspend_count(7), 2);

        let outcome = registry.unfreeze(h(10)).unwrap();
        assert!(outcome.still_suspended());
        assert_eq!(fake.suspend_count(7), 1);
    }
}
