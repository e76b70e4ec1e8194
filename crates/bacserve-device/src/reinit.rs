//! ReinitializeDevice handling.
//!
//! The machine starts `Idle`; each request ends in `Committed` or `Rejected`
//! and that phase is kept until the next one. Only the password and the
//! target state are checked; pending network configuration is committed
//! as-is.

use bacserve_core::types::ReinitializeState;
use log::{info, warn};

use crate::error::ReinitializeError;
use crate::network_port::NetworkPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReinitializePhase {
    #[default]
    Idle,
    Committed,
    Rejected,
}

/// Result of an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReinitializeOutcome {
    pub state: ReinitializeState,
    /// The caller must restart once the acknowledgement has been sent.
    pub restart: bool,
    /// Whether network configuration was pending when the request arrived.
    pub committed_changes: bool,
}

#[derive(Debug, Clone)]
pub struct Reinitializer {
    password: String,
    phase: ReinitializePhase,
    last: Option<Result<ReinitializeOutcome, ReinitializeError>>,
}

impl Reinitializer {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            phase: ReinitializePhase::Idle,
            last: None,
        }
    }

    /// Phase the most recent request ended in.
    pub fn phase(&self) -> ReinitializePhase {
        self.phase
    }

    /// Outcome of the most recent request, if any.
    pub fn last_result(&self) -> Option<Result<ReinitializeOutcome, ReinitializeError>> {
        self.last
    }

    /// Validates and applies a request. `state` is the raw enumeration value
    /// so that states this library does not name are still reported.
    pub fn handle(
        &mut self,
        port: &mut NetworkPort,
        state: u32,
        password: Option<&str>,
    ) -> Result<ReinitializeOutcome, ReinitializeError> {
        let result = self.validate(state, password).map(|state| {
            let committed_changes = port.commit_pending();
            ReinitializeOutcome {
                state,
                restart: state == ReinitializeState::Warmstart,
                committed_changes,
            }
        });
        self.phase = match result {
            Ok(outcome) => {
                info!(
                    "reinitialize {:?}: committed={} restart={}",
                    outcome.state, outcome.committed_changes, outcome.restart
                );
                ReinitializePhase::Committed
            }
            Err(err) => {
                warn!("reinitialize state {state} rejected: {err}");
                ReinitializePhase::Rejected
            }
        };
        self.last = Some(result);
        result
    }

    fn validate(
        &self,
        state: u32,
        password: Option<&str>,
    ) -> Result<ReinitializeState, ReinitializeError> {
        let password = password.ok_or(ReinitializeError::MissingPassword)?;
        if password != self.password {
            return Err(ReinitializeError::PasswordFailure);
        }
        match ReinitializeState::from_u32(state) {
            Some(s @ (ReinitializeState::ActivateChanges | ReinitializeState::Warmstart)) => Ok(s),
            _ => Err(ReinitializeError::UnsupportedState(state)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_port() -> NetworkPort {
        NetworkPort {
            changes_pending: true,
            ..NetworkPort::default()
        }
    }

    #[test]
    fn checks_run_in_order() {
        let mut reinit = Reinitializer::new("12345");
        let mut port = pending_port();
        let coldstart = ReinitializeState::Coldstart.to_u32();

        assert_eq!(
            reinit.handle(&mut port, coldstart, None),
            Err(ReinitializeError::MissingPassword)
        );
        assert_eq!(
            reinit.handle(&mut port, coldstart, Some("nope")),
            Err(ReinitializeError::PasswordFailure)
        );
        assert_eq!(
            reinit.handle(&mut port, coldstart, Some("12345")),
            Err(ReinitializeError::UnsupportedState(0))
        );
        assert_eq!(
            reinit.handle(&mut port, 99, Some("12345")),
            Err(ReinitializeError::UnsupportedState(99))
        );
        assert!(port.changes_pending);
        assert_eq!(reinit.phase(), ReinitializePhase::Rejected);
        assert_eq!(
            reinit.last_result(),
            Some(Err(ReinitializeError::UnsupportedState(99)))
        );
    }

    #[test]
    fn activate_changes_commits_without_restart() {
        let mut reinit = Reinitializer::new("12345");
        let mut port = pending_port();
        assert_eq!(reinit.phase(), ReinitializePhase::Idle);
        let outcome = reinit
            .handle(
                &mut port,
                ReinitializeState::ActivateChanges.to_u32(),
                Some("12345"),
            )
            .unwrap();
        assert!(!outcome.restart);
        assert!(outcome.committed_changes);
        assert!(!port.changes_pending);
        assert_eq!(reinit.phase(), ReinitializePhase::Committed);
    }

    #[test]
    fn warmstart_requests_restart() {
        let mut reinit = Reinitializer::new("secret");
        let mut port = NetworkPort::default();
        let outcome = reinit
            .handle(&mut port, ReinitializeState::Warmstart.to_u32(), Some("secret"))
            .unwrap();
        assert!(outcome.restart);
        assert!(!outcome.committed_changes);
        assert_eq!(reinit.last_result(), Some(Ok(outcome)));
    }
}
