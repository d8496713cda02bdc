use tracing::{error, info};

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown() {
    info!(event = "core.app.shutdown_started");
}

pub fn log_app_error<E: std::error::Error + ?Sized>(error: &E) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = error_type_name::<E>()
    );
}

fn error_type_name<E: ?Sized>() -> &'static str {
    std::any::type_name::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_events() {
        // Test that event functions don't panic
        log_app_startup();
        log_app_shutdown();

        let test_error = std::io::Error::other("test");
        log_app_error(&test_error);
    }

    #[test]
    fn test_error_type_names_concrete_type() {
        let name = error_type_name::<std::io::Error>();
        assert!(name.ends_with("io::error::Error"), "got {}", name);
        assert!(!name.contains("dyn"));
    }
}
