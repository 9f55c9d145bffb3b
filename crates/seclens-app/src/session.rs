// crates/seclens-app/src/session.rs
// Client session controller: framework-free state machine and submit driver

use seclens_types::AnalysisResult;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing,
    Resulted,
    Errored,
}

/// Everything one browser tab knows about its analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub code: String,
    pub fixed_code: String,
    pub vulnerabilities: Vec<String>,
    pub is_analyzing: bool,
    pub has_result: bool,
    pub error: Option<String>,
    /// Bumped on every edit; responses from an older generation are stale
    generation: u64,
}

/// Handed out by [`SessionState::begin_submit`] for the request in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    code: String,
}

impl Ticket {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`SessionState::complete`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The code was edited while the request was in flight
    Stale,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.is_analyzing {
            Phase::Analyzing
        } else if self.error.is_some() {
            Phase::Errored
        } else if self.has_result {
            Phase::Resulted
        } else {
            Phase::Idle
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the code. A displayed result no longer matches the code, so
    /// it is cleared as a unit.
    pub fn edit(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.generation += 1;
        if self.has_result {
            self.clear_result();
        }
    }

    fn clear_result(&mut self) {
        self.has_result = false;
        self.vulnerabilities.clear();
        self.fixed_code.clear();
    }

    pub fn can_submit(&self) -> bool {
        !self.code.trim().is_empty() && !self.is_analyzing
    }

    /// Enter `Analyzing`. Returns `None` (and changes nothing) when submit
    /// is not allowed.
    pub fn begin_submit(&mut self) -> Option<Ticket> {
        if !self.can_submit() {
            return None;
        }
        self.is_analyzing = true;
        self.error = None;
        Some(Ticket {
            generation: self.generation,
            code: self.code.clone(),
        })
    }

    /// Apply the response for `ticket`.
    ///
    /// `is_analyzing` is always cleared. A stale response is otherwise
    /// dropped. A failure keeps whatever result was already shown.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        response: Result<AnalysisResult, String>,
    ) -> Outcome {
        self.is_analyzing = false;

        if ticket.generation != self.generation {
            return Outcome::Stale;
        }

        match response {
            Ok(result) => {
                self.fixed_code = result.fixed_code;
                self.vulnerabilities = result.vulnerabilities;
                self.has_result = true;
            }
            Err(message) => self.error = Some(message),
        }
        Outcome::Applied
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Shared access to a [`SessionState`]. Returns `None` once the state is gone
/// (for example a disposed signal).
pub trait SessionHandle {
    fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Option<R>;
}

impl SessionHandle for Rc<RefCell<SessionState>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Sends one code snippet to the analysis endpoint
pub trait AnalysisTransport {
    fn analyze(&self, code: String) -> impl Future<Output = Result<AnalysisResult, String>>;
}

/// Run one submission end to end.
///
/// The guard is checked here as well as on the button, so a rapid second
/// click while a request is in flight never reaches the transport. Returns
/// `None` when nothing was sent.
pub async fn submit<H, T>(session: H, transport: &T) -> Option<Outcome>
where
    H: SessionHandle,
    T: AnalysisTransport,
{
    let ticket = session.with_state(SessionState::begin_submit).flatten()?;

    let response = transport.analyze(ticket.code().to_string()).await;
    if let Err(ref message) = response {
        log::error!("Error analyzing code: {}", message);
    }

    let outcome = session.with_state(|state| state.complete(ticket, response));
    if outcome == Some(Outcome::Stale) {
        log::debug!("Discarded response for edited code");
    }
    outcome
}
