//! Session tracker
//!
//! [`TrackerState`] is the three-state machine both front ends drive:
//!
//! ```text
//!            start ok                 end clicked
//!   Idle ─────────────▶ Active ────────────────────▶ Ending
//!    ▲                   ▲  ◀──────── cancel ─────────  │
//!    └───────────────────┼──────── end ok ──────────────┘
//!                  probe finds session
//! ```
//!
//! Transitions that do not apply in the current state are no-ops and return
//! `false`. Request failures never move the machine, since nothing is applied
//! before the backend confirms.
//!
//! With the `native` feature, [`Tracker`] runs the machine against a
//! [`TrackerBackend`](crate::client::TrackerBackend).

use chrono::{DateTime, Local, Utc};

use crate::estimate::{Estimate, SecondsPerReel};
use crate::model::{EndSessionRequest, Mood, Session};

/// User-facing tracker messages
pub mod messages {
    pub const SESSION_STARTED: &str = "Session started. Redirecting you to Instagram Reels...";
    pub const SESSION_SAVED: &str = "Session saved. Nice work tracking your usage today.";
    pub const START_FAILED: &str = "Failed to start session.";
    pub const END_FAILED: &str = "Failed to end session.";
    pub const NO_ACTIVE_SESSION: &str = "No active session";
    pub const ALREADY_RUNNING: &str = "Session running";
}

/// Where the user is sent after a session starts
pub const DEFAULT_CONTENT_URL: &str = "https://www.instagram.com/reels/";

/// Tracker view state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrackerState {
    /// No session is running
    #[default]
    Idle,
    /// A session is running
    Active(Session),
    /// A session is running and the end dialog is open
    Ending(Session),
}

impl TrackerState {
    /// The running session, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            TrackerState::Idle => None,
            TrackerState::Active(s) | TrackerState::Ending(s) => Some(s),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, TrackerState::Idle)
    }

    pub fn is_ending(&self) -> bool {
        matches!(self, TrackerState::Ending(_))
    }

    /// Start is only offered with no session running
    pub fn can_start(&self) -> bool {
        self.is_idle()
    }

    /// End is only offered while a session runs and the dialog is closed
    pub fn can_end(&self) -> bool {
        matches!(self, TrackerState::Active(_))
    }

    /// Adopt the result of the on-load active-session probe.
    ///
    /// Only applies while idle, and only to a session the backend still
    /// reports as open.
    pub fn adopt(&mut self, probed: Option<Session>) -> bool {
        match probed {
            Some(session) if self.is_idle() && session.is_active() => {
                *self = TrackerState::Active(session);
                true
            }
            _ => false,
        }
    }

    /// Record a session the backend just created
    pub fn started(&mut self, session: Session) -> bool {
        if !self.can_start() {
            return false;
        }
        *self = TrackerState::Active(session);
        true
    }

    /// Open the end dialog
    pub fn open_end(&mut self) -> bool {
        match std::mem::take(self) {
            TrackerState::Active(s) => {
                *self = TrackerState::Ending(s);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Close the end dialog without ending
    pub fn cancel_end(&mut self) -> bool {
        match std::mem::take(self) {
            TrackerState::Ending(s) => {
                *self = TrackerState::Active(s);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// The backend confirmed the end
    pub fn ended(&mut self) -> bool {
        if self.is_idle() {
            return false;
        }
        *self = TrackerState::Idle;
        true
    }

    /// Running estimate as of `now`
    pub fn estimate(&self, now: DateTime<Utc>, rate: SecondsPerReel) -> Option<Estimate> {
        self.session()
            .map(|s| Estimate::since(s.start_time, now, rate))
    }

    /// Request body for ending the running session, estimated at `now`
    pub fn end_request(
        &self,
        now: DateTime<Utc>,
        rate: SecondsPerReel,
        mood: Option<Mood>,
    ) -> Option<EndSessionRequest> {
        let session = self.session()?;
        let estimate = Estimate::since(session.start_time, now, rate);
        Some(EndSessionRequest {
            session_id: session.id,
            reels_watched: estimate.estimated_reels,
            mood,
        })
    }
}

/// Local UTC offset in minutes east of UTC (IST = +330)
pub fn local_offset_minutes() -> i32 {
    Local::now().offset().local_minus_utc() / 60
}

#[cfg(feature = "native")]
pub use orchestrator::{StartOutcome, Tracker, TrackerError};

#[cfg(feature = "native")]
mod orchestrator {
    use chrono::{DateTime, Utc};
    use thiserror::Error;

    use super::{local_offset_minutes, messages, TrackerState};
    use crate::client::{ClientError, TrackerBackend};
    use crate::estimate::SecondsPerReel;
    use crate::model::{Mood, Session, StartSessionRequest};

    /// Tracker action failures
    #[derive(Error, Debug)]
    pub enum TrackerError {
        #[error("No active session")]
        NoActiveSession,

        /// Backend call failed; `message` is what the user should see
        #[error("{message}")]
        Request {
            message: String,
            #[source]
            source: ClientError,
        },
    }

    /// Result of asking to start
    #[derive(Debug, Clone, PartialEq)]
    pub enum StartOutcome {
        Started(Session),
        /// A session was already running; nothing was sent
        AlreadyActive(Session),
    }

    /// Tracker state machine bound to a backend
    pub struct Tracker<B> {
        backend: B,
        state: TrackerState,
        rate: SecondsPerReel,
    }

    impl<B: TrackerBackend> Tracker<B> {
        pub fn new(backend: B, rate: SecondsPerReel) -> Self {
            Self {
                backend,
                state: TrackerState::Idle,
                rate,
            }
        }

        pub fn state(&self) -> &TrackerState {
            &self.state
        }

        pub fn rate(&self) -> SecondsPerReel {
            self.rate
        }

        pub fn backend(&self) -> &B {
            &self.backend
        }

        /// Probe for a session left running by an earlier visit.
        ///
        /// Any failure reads as "nothing running".
        pub async fn restore(&mut self) -> &TrackerState {
            match self.backend.active_session().await {
                Ok(probed) => {
                    if self.state.adopt(probed) {
                        tracing::info!(
                            session_id = self.state.session().map(|s| s.id),
                            "adopted running session"
                        );
                    }
                }
                Err(e) => {
                    tracing::debug!("active session probe failed, assuming idle: {}", e);
                }
            }
            &self.state
        }

        /// Start a session unless one is already running
        pub async fn start(&mut self) -> Result<StartOutcome, TrackerError> {
            if let Some(session) = self.state.session() {
                tracing::info!(session_id = session.id, "start ignored, session already running");
                return Ok(StartOutcome::AlreadyActive(session.clone()));
            }

            let request = StartSessionRequest {
                tz_offset_minutes: Some(local_offset_minutes()),
            };

            match self.backend.start_session(&request).await {
                Ok(session) => {
                    tracing::info!(session_id = session.id, "session started");
                    self.state.started(session.clone());
                    Ok(StartOutcome::Started(session))
                }
                Err(source) => Err(TrackerError::Request {
                    message: source.user_message(messages::START_FAILED),
                    source,
                }),
            }
        }

        /// Open the end dialog
        pub fn begin_end(&mut self) -> bool {
            self.state.open_end()
        }

        /// Close the end dialog and keep the session running
        pub fn cancel_end(&mut self) -> bool {
            self.state.cancel_end()
        }

        /// End the running session with the estimate as of `now`
        pub async fn end(
            &mut self,
            mood: Option<Mood>,
            now: DateTime<Utc>,
        ) -> Result<Session, TrackerError> {
            let request = self
                .state
                .end_request(now, self.rate, mood)
                .ok_or(TrackerError::NoActiveSession)?;

            match self.backend.end_session(&request).await {
                Ok(session) => {
                    tracing::info!(
                        session_id = session.id,
                        reels = request.reels_watched,
                        "session ended"
                    );
                    self.state.ended();
                    Ok(session)
                }
                Err(source) => Err(TrackerError::Request {
                    message: source.user_message(messages::END_FAILED),
                    source,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn session(id: i64) -> Session {
        Session {
            id,
            start_time: Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap(),
            end_time: None,
            duration_minutes: None,
            reels_watched: None,
            mood: None,
            date: None,
        }
    }

    #[test]
    fn test_full_cycle() {
        let mut state = TrackerState::default();
        assert!(state.can_start());
        assert!(!state.can_end());

        assert!(state.started(session(1)));
        assert!(!state.can_start());
        assert!(state.can_end());

        assert!(state.open_end());
        assert!(state.is_ending());
        assert!(!state.can_end());

        assert!(state.cancel_end());
        assert_eq!(state, TrackerState::Active(session(1)));

        assert!(state.open_end());
        assert!(state.ended());
        assert!(state.is_idle());
    }

    #[test]
    fn test_start_while_active_is_noop() {
        let mut state = TrackerState::Active(session(1));
        assert!(!state.started(session(2)));
        assert_eq!(state.session().map(|s| s.id), Some(1));
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut state = TrackerState::Idle;
        assert!(!state.open_end());
        assert!(!state.cancel_end());
        assert!(!state.ended());
        assert!(state.is_idle());

        let mut state = TrackerState::Active(session(3));
        assert!(!state.cancel_end());
        assert_eq!(state, TrackerState::Active(session(3)));
    }

    #[test]
    fn test_adopt_probe() {
        let mut state = TrackerState::Idle;
        assert!(!state.adopt(None));
        assert!(state.is_idle());

        let mut finished = session(4);
        finished.end_time = Some(Utc::now());
        assert!(!state.adopt(Some(finished)));
        assert!(state.is_idle());

        assert!(state.adopt(Some(session(5))));
        assert_eq!(state.session().map(|s| s.id), Some(5));

        // a second probe never replaces the running session
        assert!(!state.adopt(Some(session(6))));
        assert_eq!(state.session().map(|s| s.id), Some(5));
    }

    #[test]
    fn test_end_request_uses_estimate_at_submit() {
        let s = session(9);
        let state = TrackerState::Ending(s.clone());
        let now = s.start_time + Duration::seconds(95);

        let request = state
            .end_request(now, SecondsPerReel::new(8), Some(Mood::Bored))
            .unwrap();
        assert_eq!(request.session_id, 9);
        assert_eq!(request.reels_watched, 12);
        assert_eq!(request.mood, Some(Mood::Bored));

        assert!(TrackerState::Idle
            .end_request(now, SecondsPerReel::default(), None)
            .is_none());
    }

    #[test]
    fn test_estimate_only_with_session() {
        let s = session(2);
        let now = s.start_time + Duration::seconds(80);
        assert!(TrackerState::Idle.estimate(now, SecondsPerReel::default()).is_none());

        let estimate = TrackerState::Active(s)
            .estimate(now, SecondsPerReel::new(10))
            .unwrap();
        assert_eq!(estimate.estimated_reels, 8);
    }

    #[test]
    fn test_local_offset_is_sane() {
        let offset = local_offset_minutes();
        assert!((-14 * 60..=14 * 60).contains(&offset));
    }
}
