//! # Link Failsafe
//!
//! Watches the age of the last valid control packet and decides when the
//! wing must stop trusting stale input. Two states:
//!
//! - **Active** - packets are arriving, servo commands follow the pilot
//! - **Failsafe** - 800 ms (configurable) without a packet, hold neutral
//!
//! The controller boots in failsafe: until the first packet arrives there
//! is nothing to trust. Any valid packet reactivates the link; the window
//! is measured from the latest packet with a strict comparison, so an
//! observation at exactly the timeout is still in time.

use std::time::{Duration, Instant};

/// Default time without packets before the failsafe engages
pub const DEFAULT_FAILSAFE_TIMEOUT: Duration = Duration::from_millis(800);

/// Radio link health as judged by packet recency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Packets arriving within the timeout window
    Active,

    /// No packet within the window; outputs must hold neutral
    Failsafe,
}

/// Tracks packet recency and reports the link state
///
/// Time is passed in by the caller, never read from a global clock, which
/// keeps every timing path testable without real waiting.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use wing_link::failsafe::{FailsafeController, LinkState};
///
/// let mut failsafe = FailsafeController::new(Duration::from_millis(800));
/// let boot = Instant::now();
///
/// // Nothing received yet: already in failsafe.
/// assert_eq!(failsafe.check(boot), LinkState::Failsafe);
///
/// failsafe.packet_received(boot);
/// assert_eq!(failsafe.check(boot + Duration::from_millis(800)), LinkState::Active);
/// assert_eq!(failsafe.check(boot + Duration::from_millis(801)), LinkState::Failsafe);
/// ```
#[derive(Debug)]
pub struct FailsafeController {
    /// Maximum tolerated packet age
    timeout: Duration,

    /// When the last valid packet arrived, None until the first one
    last_packet: Option<Instant>,

    /// State as of the last check or packet
    state: LinkState,
}

impl FailsafeController {
    /// Creates a controller in failsafe with the given timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_packet: None,
            state: LinkState::Failsafe,
        }
    }

    /// Record a valid packet arriving at `now`
    ///
    /// Restarts the timeout window and reactivates the link immediately.
    pub fn packet_received(&mut self, now: Instant) {
        self.last_packet = Some(now);
        self.state = LinkState::Active;
    }

    /// Re-evaluate the link against `now` and return the current state
    ///
    /// The comparison is strictly greater-than: a packet aged exactly the
    /// timeout keeps the link active. A controller that has never seen a
    /// packet reports failsafe at any `now`.
    pub fn check(&mut self, now: Instant) -> LinkState {
        let expired = match self.last_packet {
            Some(at) => now.duration_since(at) > self.timeout,
            None => true,
        };

        if expired {
            self.state = LinkState::Failsafe;
        }

        self.state
    }

    /// Returns the state as of the last check or packet, without re-evaluating.
    #[must_use]
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Returns the configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for FailsafeController {
    fn default() -> Self {
        Self::new(DEFAULT_FAILSAFE_TIMEOUT)
    }
}
