use std::io::{self, Write};
use std::sync::Arc;

use crate::freeze::{FreezeRegistry, UnfreezeAllReport};

use super::errors::HotkeyError;
use super::parse::route_hotkey;

fn log_report(key: &str, report: &UnfreezeAllReport) {
    if report.is_clean() {
        tracing::info!(
            event = "core.hotkey.unfreeze_all_completed",
            key = key,
            unfrozen = report.unfrozen.len()
        );
        return;
    }
    for (handle, e) in &report.failures {
        tracing::error!(
            event = "core.hotkey.unfreeze_failed",
            key = key,
            handle = %handle,
            error = %e
        );
    }
}

fn write_report(out: &mut impl Write, key: &str, report: &UnfreezeAllReport) -> io::Result<()> {
    if report.attempted() == 0 {
        return Ok(());
    }
    writeln!(
        out,
        "Hotkey '{}': unfroze {} window(s).",
        key,
        report.unfrozen.len()
    )?;
    for (handle, e) in &report.failures {
        writeln!(
            out,
            "Error: could not unfreeze window {}: {}. It may still be frozen.",
            handle, e
        )?;
    }
    out.flush()
}

/// Run `unfreeze_all` on `registry`, log the result and tell the user.
///
/// This is what a hotkey press does. Nothing is written when no window was
/// frozen.
pub fn handle_unfreeze_all(
    registry: &FreezeRegistry,
    key: &str,
    out: &mut impl Write,
) -> UnfreezeAllReport {
    let report = registry.unfreeze_all();
    log_report(key, &report);
    if let Err(e) = write_report(out, key, &report) {
        tracing::warn!(event = "core.hotkey.report_failed", key = key, error = %e);
    }
    report
}

/// A background listener for the unfreeze-all hotkey.
///
/// It stays active until [`HotkeyListener::stop`] is called or the process
/// exits.
pub struct HotkeyListener {
    key: String,
    #[cfg(windows)]
    worker: platform::Worker,
}

impl HotkeyListener {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Listen for `key` globally and unfreeze every frozen window on each press.
///
/// A bare key is watched without being consumed; a chord with modifiers is
/// registered with the system. Returns once the listener is running or has
/// failed to start, so the caller can tell the user whether the hotkey is
/// active.
pub fn spawn_unfreeze_listener(
    registry: Arc<FreezeRegistry>,
    key: &str,
) -> Result<HotkeyListener, HotkeyError> {
    let route = route_hotkey(key)?;
    platform::spawn(registry, key.to_string(), route)
}

#[cfg(windows)]
mod platform {
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, mpsc};
    use std::thread::JoinHandle;
    use std::time::Duration;

    use global_hotkey::hotkey::{Code, HotKey};
    use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
    use rdev::{Event, EventType, Key};
    use tracing::{info, warn};
    use windows::Win32::Foundation::{LPARAM, WPARAM};
    use windows::Win32::System::Threading::GetCurrentThreadId;
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, MSG, PostThreadMessageW, TranslateMessage, WM_QUIT,
    };

    use super::{HotkeyListener, handle_unfreeze_all};
    use crate::freeze::FreezeRegistry;
    use crate::hotkey::errors::HotkeyError;
    use crate::hotkey::parse::HotkeyRoute;

    /// How long a keyboard hook has to fail before it counts as running.
    const HOOK_STARTUP_GRACE: Duration = Duration::from_millis(200);

    pub(super) enum Worker {
        /// Keyboard hook thread. It cannot be stopped from outside, so
        /// stopping only silences it.
        Hook { active: Arc<AtomicBool> },
        /// Message loop owning a system hotkey registration.
        MessageLoop {
            thread_id: u32,
            thread: JoinHandle<()>,
        },
    }

    pub(super) fn spawn(
        registry: Arc<FreezeRegistry>,
        key: String,
        route: HotkeyRoute,
    ) -> Result<HotkeyListener, HotkeyError> {
        let worker = match route {
            HotkeyRoute::Observed(code) => spawn_observer(registry, &key, code)?,
            HotkeyRoute::Registered(hotkey) => spawn_registered(registry, &key, hotkey)?,
        };
        let observed = matches!(worker, Worker::Hook { .. });
        info!(event = "core.hotkey.registered", key = %key, observed = observed);
        Ok(HotkeyListener { key, worker })
    }

    fn failed(key: &str, message: String) -> HotkeyError {
        HotkeyError::RegistrationFailed {
            key: key.to_string(),
            message,
        }
    }

    pub(super) fn observed_key(code: Code) -> Option<Key> {
        let key = match code {
            Code::KeyA => Key::KeyA,
            Code::KeyB => Key::KeyB,
            Code::KeyC => Key::KeyC,
            Code::KeyD => Key::KeyD,
            Code::KeyE => Key::KeyE,
            Code::KeyF => Key::KeyF,
            Code::KeyG => Key::KeyG,
            Code::KeyH => Key::KeyH,
            Code::KeyI => Key::KeyI,
            Code::KeyJ => Key::KeyJ,
            Code::KeyK => Key::KeyK,
            Code::KeyL => Key::KeyL,
            Code::KeyM => Key::KeyM,
            Code::KeyN => Key::KeyN,
            Code::KeyO => Key::KeyO,
            Code::KeyP => Key::KeyP,
            Code::KeyQ => Key::KeyQ,
            Code::KeyR => Key::KeyR,
            Code::KeyS => Key::KeyS,
            Code::KeyT => Key::KeyT,
            Code::KeyU => Key::KeyU,
            Code::KeyV => Key::KeyV,
            Code::KeyW => Key::KeyW,
            Code::KeyX => Key::KeyX,
            Code::KeyY => Key::KeyY,
            Code::KeyZ => Key::KeyZ,
            Code::Digit0 => Key::Num0,
            Code::Digit1 => Key::Num1,
            Code::Digit2 => Key::Num2,
            Code::Digit3 => Key::Num3,
            Code::Digit4 => Key::Num4,
            Code::Digit5 => Key::Num5,
            Code::Digit6 => Key::Num6,
            Code::Digit7 => Key::Num7,
            Code::Digit8 => Key::Num8,
            Code::Digit9 => Key::Num9,
            Code::F1 => Key::F1,
            Code::F2 => Key::F2,
            Code::F3 => Key::F3,
            Code::F4 => Key::F4,
            Code::F5 => Key::F5,
            Code::F6 => Key::F6,
            Code::F7 => Key::F7,
            Code::F8 => Key::F8,
            Code::F9 => Key::F9,
            Code::F10 => Key::F10,
            Code::F11 => Key::F11,
            Code::F12 => Key::F12,
            Code::Space => Key::Space,
            Code::Enter => Key::Return,
            Code::Tab => Key::Tab,
            Code::Escape => Key::Escape,
            _ => return None,
        };
        Some(key)
    }

    /// Watch a bare key with a low-level keyboard hook.
    ///
    /// The hook callback only signals a worker thread, so key delivery to
    /// the focused window is never held up by the Win32 calls.
    fn spawn_observer(
        registry: Arc<FreezeRegistry>,
        key: &str,
        code: Code,
    ) -> Result<Worker, HotkeyError> {
        let target = observed_key(code)
            .ok_or_else(|| failed(key, format!("{:?} cannot be watched as a bare key", code)))?;

        let active = Arc::new(AtomicBool::new(true));
        let (press_tx, press_rx) = mpsc::channel::<()>();
        let (failed_tx, failed_rx) = mpsc::channel::<HotkeyError>();

        let worker_key = key.to_string();
        std::thread::Builder::new()
            .name("okna-hotkey-worker".to_string())
            .spawn(move || {
                while press_rx.recv().is_ok() {
                    handle_unfreeze_all(&registry, &worker_key, &mut io::stderr());
                }
            })
            .map_err(|e| failed(key, format!("Failed to start hotkey thread: {}", e)))?;

        let hook_active = Arc::clone(&active);
        let hook_key = key.to_string();
        std::thread::Builder::new()
            .name("okna-hotkey".to_string())
            .spawn(move || {
                let result = rdev::listen(move |event: Event| {
                    if matches!(event.event_type, EventType::KeyPress(pressed) if pressed == target)
                        && hook_active.load(Ordering::SeqCst)
                    {
                        let _ = press_tx.send(());
                    }
                });
                let message = match result {
                    Ok(()) => "keyboard hook stopped".to_string(),
                    Err(e) => format!("keyboard hook failed: {:?}", e),
                };
                let _ = failed_tx.send(failed(&hook_key, message));
            })
            .map_err(|e| failed(key, format!("Failed to start hotkey thread: {}", e)))?;

        match failed_rx.recv_timeout(HOOK_STARTUP_GRACE) {
            Ok(e) => Err(e),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(Worker::Hook { active }),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(failed(
                key,
                "hotkey thread exited before listening".to_string(),
            )),
        }
    }

    /// Register a chord with the system and pump messages for it.
    fn spawn_registered(
        registry: Arc<FreezeRegistry>,
        key: &str,
        hotkey: HotKey,
    ) -> Result<Worker, HotkeyError> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, HotkeyError>>();
        let thread_key = key.to_string();

        let thread = std::thread::Builder::new()
            .name("okna-hotkey".to_string())
            .spawn(move || run_registered(registry, thread_key, hotkey, ready_tx))
            .map_err(|e| failed(key, format!("Failed to start hotkey thread: {}", e)))?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => Ok(Worker::MessageLoop { thread_id, thread }),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => Err(failed(
                key,
                "hotkey thread exited before registering".to_string(),
            )),
        }
    }

    fn run_registered(
        registry: Arc<FreezeRegistry>,
        key: String,
        hotkey: HotKey,
        ready: mpsc::Sender<Result<u32, HotkeyError>>,
    ) {
        // The manager's hidden window belongs to this thread, so both the
        // registration and the message loop must live here.
        let manager = match GlobalHotKeyManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                let _ = ready.send(Err(failed(
                    &key,
                    format!("Failed to create hotkey manager: {}", e),
                )));
                return;
            }
        };

        if let Err(e) = manager.register(hotkey) {
            let _ = ready.send(Err(failed(&key, registration_message(&e))));
            return;
        }

        let hotkey_id = hotkey.id();
        let handler_key = key.clone();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.id == hotkey_id && event.state == HotKeyState::Pressed {
                handle_unfreeze_all(&registry, &handler_key, &mut io::stderr());
            }
        }));

        // SAFETY: no preconditions.
        let thread_id = unsafe { GetCurrentThreadId() };
        if ready.send(Ok(thread_id)).is_err() {
            return;
        }

        pump_messages();

        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
        if let Err(e) = manager.unregister(hotkey) {
            warn!(event = "core.hotkey.unregister_failed", key = %key, error = %e);
        }
        info!(event = "core.hotkey.stopped", key = %key);
    }

    fn registration_message(error: &global_hotkey::Error) -> String {
        match error {
            global_hotkey::Error::AlreadyRegistered(_) => {
                "already registered by another application".to_string()
            }
            global_hotkey::Error::FailedToRegister(message) => {
                format!("rejected by the system: {}", message)
            }
            other => other.to_string(),
        }
    }

    /// Block until `WM_QUIT` arrives or `GetMessageW` fails.
    fn pump_messages() {
        let mut msg = MSG::default();
        loop {
            // SAFETY: `msg` is a valid out-pointer; a `None` window reads the
            // whole thread queue.
            let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
            // 0 is WM_QUIT, -1 is an error.
            if result.0 <= 0 {
                if result.0 < 0 {
                    warn!(
                        event = "core.hotkey.message_loop_failed",
                        error = %windows::core::Error::from_win32()
                    );
                }
                break;
            }
            // SAFETY: `msg` was filled by GetMessageW above.
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    impl HotkeyListener {
        /// Stop reacting to the hotkey.
        ///
        /// A registered chord is unregistered and its thread joined. A
        /// watched bare key is silenced; its hook ends with the process.
        pub fn stop(self) {
            let HotkeyListener { key, worker } = self;
            match worker {
                Worker::Hook { active } => {
                    active.store(false, Ordering::SeqCst);
                    info!(event = "core.hotkey.stopped", key = %key);
                }
                Worker::MessageLoop { thread_id, thread } => {
                    // SAFETY: posting to a thread id has no memory-safety
                    // preconditions.
                    let posted =
                        unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) };
                    if let Err(e) = posted {
                        warn!(event = "core.hotkey.stop_failed", key = %key, error = %e);
                        return;
                    }
                    let _ = thread.join();
                }
            }
        }
    }
}

#[cfg(not(windows))]
mod platform {
    use std::sync::Arc;

    use super::HotkeyListener;
    use crate::freeze::FreezeRegistry;
    use crate::hotkey::errors::HotkeyError;
    use crate::hotkey::parse::HotkeyRoute;

    pub(super) fn spawn(
        _registry: Arc<FreezeRegistry>,
        key: String,
        _route: HotkeyRoute,
    ) -> Result<HotkeyListener, HotkeyError> {
        Err(HotkeyError::RegistrationFailed {
            key,
            message: format!(
                "global hotkeys are not supported on {}",
                std::env::consts::OS
            ),
        })
    }

    impl HotkeyListener {
        pub fn stop(self) {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::WindowDirectory;
    use crate::desktop::WindowHandle;
    use crate::desktop::test_helpers::FakeDesktop;

    fn setup() -> (Arc<FakeDesktop>, FreezeRegistry) {
        let fake = Arc::new(FakeDesktop::new());
        let registry = FreezeRegistry::new(WindowDirectory::new(fake.clone()));
        (fake, registry)
    }

    #[test]
    fn test_handle_unfreeze_all_drains_registry() {
        let (fake, registry) = setup();
        fake.add_window(10, "a");
        fake.add_window(20, "b");
        registry.freeze(WindowHandle::from_raw(10)).unwrap();
        registry.freeze(WindowHandle::from_raw(20)).unwrap();

        let mut out = Vec::new();
        let report = handle_unfreeze_all(&registry, "f", &mut out);

        assert_eq!(report.unfrozen.len(), 2);
        assert!(registry.is_empty());
        assert_eq!(fake.suspend_count(10), 0);
        assert_eq!(fake.suspend_count(20), 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Hotkey 'f': unfroze 2 window(s).\n"
        );
    }

    #[test]
    fn test_handle_unfreeze_all_reports_windows_left_frozen() {
        let (fake, registry) = setup();
        fake.add_window(10, "Protected");
        registry.freeze(WindowHandle::from_raw(10)).unwrap();
        fake.deny_thread(10);

        let mut out = Vec::new();
        let report = handle_unfreeze_all(&registry, "f", &mut out);

        assert_eq!(report.failures.len(), 1);
        assert!(registry.is_empty());
        assert_eq!(fake.suspend_count(10), 1);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Hotkey 'f': unfroze 0 window(s)."));
        assert!(out.contains("Error: could not unfreeze window 10:"));
        assert!(out.contains("It may still be frozen."));
    }

    #[test]
    fn test_handle_unfreeze_all_silent_when_nothing_frozen() {
        let (_fake, registry) = setup();

        let mut out = Vec::new();
        let report = handle_unfreeze_all(&registry, "f", &mut out);

        assert_eq!(report.attempted(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_spawn_rejects_invalid_key_before_registering() {
        let (_fake, registry) = setup();

        let err = spawn_unfreeze_listener(Arc::new(registry), "ctrl+")
            .err()
            .unwrap();
        assert!(matches!(err, HotkeyError::InvalidKey { .. }));
    }

    #[cfg(windows)]
    #[test]
    fn test_every_bare_key_can_be_watched() {
        use crate::hotkey::parse::HotkeyRoute;

        let keys = ('a'..='z')
            .chain('0'..='9')
            .map(String::from)
            .chain((1..=12).map(|n| format!("f{}", n)))
            .chain(["space", "enter", "tab", "esc"].map(String::from));
        for key in keys {
            let HotkeyRoute::Observed(code) = route_hotkey(&key).unwrap() else {
                panic!("{key} should be watched, not registered");
            };
            assert!(platform::observed_key(code).is_some(), "{key} has no hook key");
        }
    }

    #[cfg(not(windows))]
    #[test]
    fn test_spawn_unsupported_off_windows() {
        let (_fake, registry) = setup();

        let err = spawn_unfreeze_listener(Arc::new(registry), "f")
            .err()
            .unwrap();
        assert!(matches!(err, HotkeyError::RegistrationFailed { .. }));
    }
}
