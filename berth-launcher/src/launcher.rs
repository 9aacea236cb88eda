//! Container launch and the running-handle state machine.
//!
//! [`launch`] drives the container bootstrap and hands back a [`Running`]
//! handle only once the registry reference has actually been captured.
//! The handle owns the framework for the rest of its life and guarantees
//! that shutdown is attempted exactly once, on every exit path.
//!
//! Only one handle may be meaningfully open at a time per installation;
//! the underlying container is a process-wide singleton. That is a usage
//! precondition on the caller, not enforced here.

use crate::error::{ApplicationError, HandleClosed, LaunchError, ShutdownError};
use berth_runtime::{Framework, RegistryHandle};
use std::fmt;
use tracing::{debug, info, warn};

/// Observable state of a [`Running`] handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Started; the application has not run yet.
    Open,
    /// The application run has been invoked.
    Running,
    /// Shut down; the registry reference is no longer valid.
    Closed,
}

/// Start the container with the given argument vector.
///
/// The bootstrap reports readiness through a callback rather than a return
/// value, so the registry reference is captured in a single-assignment cell
/// written from inside the call. If the bootstrap returns without writing
/// the cell, startup is treated as failed even though no error propagated:
/// a started-but-handleless container is unusable.
pub fn launch<F: Framework>(mut framework: F, args: &[String]) -> Result<Running<F>, LaunchError> {
    debug!("Launching container with {} arguments", args.len());

    let mut captured: Option<RegistryHandle> = None;
    framework.startup(args, &mut |registry| captured = Some(registry))?;

    let registry = captured.ok_or(LaunchError::RegistryUnavailable)?;
    info!("Container open, {} modules installed", registry.module_count());

    Ok(Running {
        framework,
        registry,
        state: HandleState::Open,
    })
}

/// A running container instance.
///
/// Holds the live registry reference captured at startup. The container is
/// shut down when [`Running::close`] is called, or on drop if the handle
/// was never explicitly closed.
pub struct Running<F: Framework> {
    framework: F,
    registry: RegistryHandle,
    state: HandleState,
}

impl<F: Framework> Running<F> {
    /// Current state of the handle.
    pub fn state(&self) -> HandleState {
        self.state
    }

    /// The registry of the running container.
    ///
    /// Fails fast once the handle has been closed; the reference is invalid
    /// from the instant shutdown occurs.
    pub fn bundle_registry(&self) -> Result<&RegistryHandle, HandleClosed> {
        match self.state {
            HandleState::Closed => Err(HandleClosed),
            _ => Ok(&self.registry),
        }
    }

    /// Run the application selected by the launch arguments.
    ///
    /// Valid only while [`HandleState::Open`]; transitions the handle to
    /// [`HandleState::Running`]. The container's completion code must be
    /// zero; any other value is surfaced as
    /// [`ApplicationError::ExitCode`], never swallowed.
    pub fn run(&mut self) -> Result<(), ApplicationError> {
        match self.state {
            HandleState::Open => {}
            state => return Err(ApplicationError::NotOpen(state)),
        }

        self.state = HandleState::Running;
        let code = self.framework.run()?;
        if code != 0 {
            return Err(ApplicationError::ExitCode(code));
        }
        Ok(())
    }

    /// Shut the container down.
    ///
    /// Valid from any non-closed state. The handle transitions to
    /// [`HandleState::Closed`] before the shutdown call, so shutdown is
    /// attempted at most once even if it fails; a second `close` is
    /// [`ShutdownError::AlreadyClosed`].
    pub fn close(&mut self) -> Result<(), ShutdownError> {
        if self.state == HandleState::Closed {
            return Err(ShutdownError::AlreadyClosed);
        }

        self.state = HandleState::Closed;
        self.framework.shutdown()?;
        info!("Container closed");
        Ok(())
    }
}

impl<F: Framework> fmt::Debug for Running<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Running")
            .field("state", &self.state)
            .field("modules", &self.registry.module_count())
            .finish_non_exhaustive()
    }
}

impl<F: Framework> Drop for Running<F> {
    fn drop(&mut self) {
        if self.state != HandleState::Closed {
            self.state = HandleState::Closed;
            if let Err(e) = self.framework.shutdown() {
                warn!("Container shutdown failed while dropping handle: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berth_runtime::{FrameworkError, FrameworkResult, ServiceRegistry};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counters observable after the framework has been consumed.
    #[derive(Default)]
    struct Calls {
        startups: AtomicUsize,
        runs: AtomicUsize,
        shutdowns: AtomicUsize,
    }

    /// Scriptable bootstrap collaborator.
    struct FakeFramework {
        calls: Arc<Calls>,
        publish_registry: bool,
        fail_startup: bool,
        fail_shutdown: bool,
        run_code: i32,
    }

    impl FakeFramework {
        fn new() -> (Self, Arc<Calls>) {
            let calls = Arc::new(Calls::default());
            (
                Self {
                    calls: Arc::clone(&calls),
                    publish_registry: true,
                    fail_startup: false,
                    fail_shutdown: false,
                    run_code: 0,
                },
                calls,
            )
        }
    }

    impl Framework for FakeFramework {
        fn startup(
            &mut self,
            _args: &[String],
            on_ready: &mut dyn FnMut(RegistryHandle),
        ) -> FrameworkResult<()> {
            self.calls.startups.fetch_add(1, Ordering::SeqCst);
            if self.fail_startup {
                return Err(FrameworkError::AlreadyStarted);
            }
            if self.publish_registry {
                on_ready(Arc::new(ServiceRegistry::new()));
            }
            Ok(())
        }

        fn run(&mut self) -> FrameworkResult<i32> {
            self.calls.runs.fetch_add(1, Ordering::SeqCst);
            Ok(self.run_code)
        }

        fn shutdown(&mut self) -> FrameworkResult<()> {
            self.calls.shutdowns.fetch_add(1, Ordering::SeqCst);
            if self.fail_shutdown {
                return Err(FrameworkError::NotStarted);
            }
            Ok(())
        }
    }

    #[test]
    fn test_launch_opens_handle() {
        let (framework, calls) = FakeFramework::new();
        let running = launch(framework, &[]).unwrap();

        assert_eq!(running.state(), HandleState::Open);
        assert!(running.bundle_registry().is_ok());
        assert_eq!(calls.startups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handle_is_debuggable() {
        // The handle must format in test assertions regardless of whether
        // the framework behind it does.
        let (framework, _calls) = FakeFramework::new();
        let mut running = launch(framework, &[]).unwrap();

        assert!(format!("{:?}", running).contains("Open"));
        running.close().unwrap();
        assert!(format!("{:?}", running).contains("Closed"));
    }

    #[test]
    fn test_launch_without_registry_fails() {
        // The readiness hook never fires: no handle amid no error.
        let (mut framework, calls) = FakeFramework::new();
        framework.publish_registry = false;

        let result = launch(framework, &[]);
        assert!(matches!(
            result.unwrap_err(),
            LaunchError::RegistryUnavailable
        ));
        assert_eq!(calls.startups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_launch_startup_error_propagates() {
        let (mut framework, calls) = FakeFramework::new();
        framework.fail_startup = true;

        let result = launch(framework, &[]);
        assert!(matches!(result.unwrap_err(), LaunchError::Startup(_)));
        assert_eq!(calls.shutdowns.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_run_success() {
        let (framework, calls) = FakeFramework::new();
        let mut running = launch(framework, &[]).unwrap();

        running.run().unwrap();
        assert_eq!(running.state(), HandleState::Running);
        assert_eq!(calls.runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_nonzero_code_is_fatal_but_closable() {
        let (mut framework, calls) = FakeFramework::new();
        framework.run_code = 1;
        let mut running = launch(framework, &[]).unwrap();

        let err = running.run().unwrap_err();
        assert!(matches!(err, ApplicationError::ExitCode(1)));

        // Shutdown still works after the application failed.
        running.close().unwrap();
        assert_eq!(calls.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_twice_fails() {
        let (framework, _calls) = FakeFramework::new();
        let mut running = launch(framework, &[]).unwrap();

        running.run().unwrap();
        let err = running.run().unwrap_err();
        assert!(matches!(err, ApplicationError::NotOpen(HandleState::Running)));
    }

    #[test]
    fn test_close_is_exactly_once() {
        let (framework, calls) = FakeFramework::new();
        let mut running = launch(framework, &[]).unwrap();

        running.close().unwrap();
        assert_eq!(running.state(), HandleState::Closed);

        let err = running.close().unwrap_err();
        assert!(matches!(err, ShutdownError::AlreadyClosed));
        assert_eq!(calls.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_closed_handle_fails_fast() {
        let (framework, _calls) = FakeFramework::new();
        let mut running = launch(framework, &[]).unwrap();
        running.close().unwrap();

        assert!(running.bundle_registry().is_err());
        assert!(matches!(
            running.run().unwrap_err(),
            ApplicationError::NotOpen(HandleState::Closed)
        ));
    }

    #[test]
    fn test_drop_closes_unclosed_handle() {
        let (framework, calls) = FakeFramework::new();
        {
            let _running = launch(framework, &[]).unwrap();
        }
        assert_eq!(calls.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_after_close_does_not_shutdown_again() {
        let (framework, calls) = FakeFramework::new();
        {
            let mut running = launch(framework, &[]).unwrap();
            running.close().unwrap();
        }
        assert_eq!(calls.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_reports_shutdown_failure_once() {
        let (mut framework, calls) = FakeFramework::new();
        framework.fail_shutdown = true;
        let mut running = launch(framework, &[]).unwrap();

        let err = running.close().unwrap_err();
        assert!(matches!(err, ShutdownError::Framework(_)));

        // Failed or not, the attempt happened; neither a second close nor
        // the drop guard retries it.
        assert!(matches!(
            running.close().unwrap_err(),
            ShutdownError::AlreadyClosed
        ));
        drop(running);
        assert_eq!(calls.shutdowns.load(Ordering::SeqCst), 1);
    }
}
