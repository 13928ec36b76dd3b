//! # Wing Node
//!
//! The onboard control cycle: drain the radio, command the servos, enforce
//! the failsafe. The caller owns the schedule and the clock; each
//! [`WingNode::poll`] is one complete pass, so the whole flight behavior
//! is reproducible in tests by stepping synthetic time.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::failsafe::{FailsafeController, LinkState};
use crate::radio::decoder::RadioDecoder;
use crate::radio::transport::RadioRx;
use crate::servo::bus::ServoBus;
use crate::servo::mixer::ServoMixer;

/// Wing-side state: radio decoder, mixer, failsafe, and servo outputs
pub struct WingNode<R: RadioRx, S: ServoBus> {
    radio: RadioDecoder<R>,
    mixer: ServoMixer,
    failsafe: FailsafeController,
    servos: S,
}

impl<R: RadioRx, S: ServoBus> WingNode<R, S> {
    /// Creates a node in failsafe, holding the given receiver and outputs.
    pub fn new(receiver: R, mixer: ServoMixer, timeout: Duration, servos: S) -> Self {
        Self {
            radio: RadioDecoder::new(receiver),
            mixer,
            failsafe: FailsafeController::new(timeout),
            servos,
        }
    }

    /// Run one control cycle at time `now`
    ///
    /// Drains the radio queue; a fresh packet is mixed onto the servos and
    /// restarts the failsafe window. With or without a packet, the window
    /// is then re-checked and a newly expired link forces every channel to
    /// neutral. Transitions in either direction are logged once.
    ///
    /// # Returns
    ///
    /// The link state after this cycle.
    pub fn poll(&mut self, now: Instant) -> LinkState {
        let previous = self.failsafe.state();

        if let Some(packet) = self.radio.poll() {
            self.failsafe.packet_received(now);
            debug!(
                "Control packet: x={} y={} button={}",
                packet.axis_x, packet.axis_y, packet.button
            );
            for command in self.mixer.mix(&packet) {
                self.servos.set_angle(command.channel, command.angle);
            }
        }

        let state = self.failsafe.check(now);

        if state == LinkState::Failsafe {
            for command in self.mixer.neutral() {
                self.servos.set_angle(command.channel, command.angle);
            }
        }

        if state != previous {
            match state {
                LinkState::Active => info!("Radio link active"),
                LinkState::Failsafe => warn!("Radio link lost, holding neutral"),
            }
        }

        state
    }

    /// Returns the link state as of the last poll.
    #[must_use]
    pub fn link_state(&self) -> LinkState {
        self.failsafe.state()
    }

    /// Returns the number of radio payloads decoded into packets.
    #[must_use]
    pub fn packets_accepted(&self) -> u64 {
        self.radio.accepted()
    }

    /// Returns the number of radio payloads discarded for length mismatch.
    #[must_use]
    pub fn payloads_discarded(&self) -> u64 {
        self.radio.discarded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failsafe::DEFAULT_FAILSAFE_TIMEOUT;
    use crate::frame::protocol::ControlPacket;
    use crate::radio::transport::mocks::MockRadio;
    use crate::servo::bus::mocks::MockServoBus;
    use crate::servo::mixer::{channels, SERVO_NEUTRAL_DEG};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn test_node(radio: &MockRadio, servos: &MockServoBus) -> WingNode<MockRadio, MockServoBus> {
        WingNode::new(
            radio.clone(),
            ServoMixer::new(),
            DEFAULT_FAILSAFE_TIMEOUT,
            servos.clone(),
        )
    }

    // ==================== Boot Tests ====================

    #[test]
    fn test_first_poll_without_packets_holds_neutral() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        assert_eq!(node.poll(Instant::now()), LinkState::Failsafe);

        assert_eq!(
            servos.commanded(),
            vec![
                (channels::AILERON_LEFT, SERVO_NEUTRAL_DEG),
                (channels::AILERON_RIGHT, SERVO_NEUTRAL_DEG),
                (channels::ELEVATOR, SERVO_NEUTRAL_DEG),
            ]
        );
    }

    // ==================== Packet Handling Tests ====================

    #[test]
    fn test_packet_commands_all_channels() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        radio.queue_payload(&ControlPacket::new(i16::MAX, 0, 0).encode_payload());

        assert_eq!(node.poll(Instant::now()), LinkState::Active);
        assert_eq!(servos.last_angle(channels::AILERON_LEFT), Some(135));
        assert_eq!(servos.last_angle(channels::AILERON_RIGHT), Some(45));
        assert_eq!(servos.last_angle(channels::ELEVATOR), Some(90));
        assert_eq!(node.packets_accepted(), 1);
    }

    #[test]
    fn test_batched_payloads_newest_wins() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        radio.queue_payload(&ControlPacket::new(i16::MIN, 0, 0).encode_payload());
        radio.queue_payload(&ControlPacket::new(0, 0, 0).encode_payload());
        radio.queue_payload(&ControlPacket::new(i16::MAX, 0, 0).encode_payload());

        node.poll(Instant::now());

        // Only the newest packet reaches the servos.
        assert_eq!(servos.last_angle(channels::AILERON_LEFT), Some(135));
        assert_eq!(servos.command_count(), 3);
        assert_eq!(node.packets_accepted(), 3);
    }

    #[test]
    fn test_wrong_length_payload_does_not_command() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        let start = Instant::now();
        radio.queue_payload(&ControlPacket::new(1000, 1000, 0).encode_payload());
        node.poll(start);
        let commands_after_valid = servos.command_count();

        // A runt payload inside the window: no commands, link stays active.
        radio.queue_payload(&[0x01, 0x02, 0x03]);
        assert_eq!(node.poll(start + ms(100)), LinkState::Active);

        assert_eq!(servos.command_count(), commands_after_valid);
        assert_eq!(node.payloads_discarded(), 1);
    }

    // ==================== Failsafe Tests ====================

    #[test]
    fn test_silence_within_window_keeps_last_command() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        let start = Instant::now();
        radio.queue_payload(&ControlPacket::new(i16::MAX, 0, 0).encode_payload());
        node.poll(start);
        let commands_after_valid = servos.command_count();

        assert_eq!(node.poll(start + ms(799)), LinkState::Active);
        assert_eq!(node.poll(start + ms(800)), LinkState::Active);

        // No new commands were issued; the servos hold the last deflection.
        assert_eq!(servos.command_count(), commands_after_valid);
        assert_eq!(servos.last_angle(channels::AILERON_LEFT), Some(135));
    }

    #[test]
    fn test_silence_past_window_forces_neutral() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        let start = Instant::now();
        radio.queue_payload(&ControlPacket::new(i16::MAX, i16::MAX, 1).encode_payload());
        node.poll(start);

        assert_eq!(node.poll(start + ms(801)), LinkState::Failsafe);

        assert_eq!(servos.last_angle(channels::AILERON_LEFT), Some(90));
        assert_eq!(servos.last_angle(channels::AILERON_RIGHT), Some(90));
        assert_eq!(servos.last_angle(channels::ELEVATOR), Some(90));
    }

    #[test]
    fn test_failsafe_repolls_keep_commanding_neutral() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        let start = Instant::now();
        node.poll(start);
        let after_first = servos.command_count();

        node.poll(start + ms(100));
        node.poll(start + ms(200));

        // Neutral is re-commanded each failsafe cycle and stays neutral.
        assert_eq!(servos.command_count(), after_first * 3);
        assert!(servos.commanded().iter().all(|&(_, angle)| angle == 90));
    }

    #[test]
    fn test_recovery_after_failsafe() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        let start = Instant::now();
        radio.queue_payload(&ControlPacket::default().encode_payload());
        node.poll(start);
        assert_eq!(node.poll(start + ms(1000)), LinkState::Failsafe);

        radio.queue_payload(&ControlPacket::new(i16::MIN, 0, 0).encode_payload());
        assert_eq!(node.poll(start + ms(1100)), LinkState::Active);
        assert_eq!(servos.last_angle(channels::AILERON_LEFT), Some(45));

        // The new packet restarts the window from its own arrival.
        assert_eq!(node.poll(start + ms(1900)), LinkState::Active);
        assert_eq!(node.poll(start + ms(1901)), LinkState::Failsafe);
    }

    #[test]
    fn test_wrong_length_does_not_restart_window() {
        let radio = MockRadio::new();
        let servos = MockServoBus::new();
        let mut node = test_node(&radio, &servos);

        let start = Instant::now();
        radio.queue_payload(&ControlPacket::default().encode_payload());
        node.poll(start);

        // Garbage arrives late in the window; it must not count as a packet.
        radio.queue_payload(&[0xFF; 6]);
        assert_eq!(node.poll(start + ms(700)), LinkState::Active);
        assert_eq!(node.poll(start + ms(801)), LinkState::Failsafe);
    }
}
