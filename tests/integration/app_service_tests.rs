//! Integration tests for the host link → register file → outputs pipeline.
//!
//! These run on the host (x86_64) and drive full `AppService` cycles with
//! simulated probes, a scripted link and recording actuators.

use crate::mock_hw::{MockHardware, MockLink, RecordingSink};

use tecolab::app::events::AppEvent;
use tecolab::app::ports::Led;
use tecolab::app::service::AppService;
use tecolab::config::SystemConfig;
use tecolab::protocol::checksum;
use tecolab::protocol::host::{self, ControlReply};
use tecolab::registers::{ConnectionStatus, TemperatureStatus};
use tecolab::safety::ActuatorOutputs;
use tecolab::sensors::Probes;
use tecolab::sensors::temperature::{SimProbe, SimProbeHandle};

struct Rig {
    app: AppService<SimProbe>,
    link: MockLink,
    hw: MockHardware,
    sink: RecordingSink,
    room: SimProbeHandle,
    heater1: SimProbeHandle,
    heater2: SimProbeHandle,
}

impl Rig {
    fn new(room_c: f32, heater1_c: f32, heater2_c: f32) -> Self {
        let (room_probe, room) = SimProbe::new(room_c);
        let (h1_probe, heater1) = SimProbe::new(heater1_c);
        let (h2_probe, heater2) = SimProbe::new(heater2_c);
        let probes = Probes {
            room: room_probe,
            heater1: h1_probe,
            heater2: h2_probe,
        };
        let mut app = AppService::new(&SystemConfig::default(), probes);
        let mut sink = RecordingSink::new();
        app.start(&mut sink);
        Self {
            app,
            link: MockLink::new(),
            hw: MockHardware::new(),
            sink,
            room,
            heater1,
            heater2,
        }
    }

    fn tick(&mut self, now_ms: u32) -> ActuatorOutputs {
        self.app
            .tick(now_ms, &mut self.link, &mut self.hw, &mut self.sink)
    }

    /// Send one request and run the cycle that answers it.
    fn exchange(&mut self, request: &[u8], now_ms: u32) -> Option<Vec<u8>> {
        self.link.send(request);
        self.tick(now_ms);
        self.link.take_reply()
    }
}

// ── Reference scenarios ──────────────────────────────────────

#[test]
fn handshake_echoes_and_connects() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    let reply = rig.exchange(&[b'A', 0x41], 10);
    assert_eq!(reply.as_deref(), Some(&b"AA"[..]));
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Connected)
    );
    assert!(rig.sink.events.contains(&AppEvent::ConnectionChanged {
        from: Some(ConnectionStatus::Waiting),
        to: ConnectionStatus::Connected,
    }));
    assert_eq!(rig.link.flushes, 1);
}

#[test]
fn unknown_tag_gets_error_reply() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    let reply = rig.exchange(b"Z", 10);
    assert_eq!(reply.as_deref(), Some(&[0x01, 0x01][..]));
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Waiting)
    );
    assert!(rig.sink.events.contains(&AppEvent::UnknownCommand(b'Z')));
}

#[test]
fn read_returns_sampled_room_temperature() {
    // 3.08 C is stored as 308 = 0x0134.
    let mut rig = Rig::new(3.08, 21.0, 21.0);
    rig.tick(100);
    let req = [b'R', 0x00, 0x02];
    let reply = rig
        .exchange(&[req[0], req[1], req[2], checksum(&req)], 110)
        .unwrap();
    let cks = checksum(&[0x00, 0x34, 0x01]);
    assert_eq!(reply, vec![0x00, 0x34, 0x01, cks]);
}

#[test]
fn corrupt_frame_is_dropped_silently() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    let reply = rig.exchange(&[b'R', 0x00, 0x02, 0x00], 10);
    assert!(reply.is_none());
    assert_eq!(rig.app.protocol_stats().dropped, 1);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::FrameDropped(_))),
        1
    );
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Waiting)
    );
}

// ── Control path ─────────────────────────────────────────────

#[test]
fn control_setpoint_is_applied_in_the_same_cycle() {
    let mut rig = Rig::new(21.0, 30.0, 31.0);
    rig.tick(100);
    let req = host::control_request(10, 20, 30);
    rig.link.send_frame(&req, 5);
    let out = rig.tick(110);
    assert_eq!(out, ActuatorOutputs { heater1: 10, heater2: 20, cooler: 30 });
    assert_eq!(rig.hw.duties(), (10, 20, 30));

    let reply = ControlReply::decode(&rig.link.take_reply().unwrap()).unwrap();
    assert_eq!(reply.error, 0);
    assert!((reply.room_c - 21.0).abs() < 1e-3);
    assert!((reply.heater1_c - 30.0).abs() < 1e-3);
    assert!((reply.heater2_c - 31.0).abs() < 1e-3);
}

#[test]
fn write_then_read_round_trips() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    let req = host::write_request(6, &[7, 8, 9]);
    rig.link.send_frame(&req, 3 + 3 + 1);
    rig.tick(10);
    assert_eq!(rig.link.take_reply(), Some(vec![0, 0]));
    assert_eq!(rig.hw.duties(), (7, 8, 9));

    let req = host::read_request(6, 3);
    rig.link.send_frame(&req, 4);
    rig.tick(20);
    let reply = rig.link.take_reply().unwrap();
    assert_eq!(reply.len(), host::expected_reply_len(&req));
    assert_eq!(&reply[..4], &[0, 7, 8, 9]);
}

#[test]
fn full_padded_block_is_accepted() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    let req = host::acknowledge_request();
    rig.link.send(&req);
    rig.tick(10);
    assert_eq!(rig.link.take_reply(), Some(b"AA".to_vec()));
}

// ── Thermal safety ───────────────────────────────────────────

#[test]
fn overheat_overrides_host_setpoints() {
    let mut rig = Rig::new(21.0, 105.0, 40.0);
    rig.tick(100);
    assert_eq!(
        rig.app.registers().temperature_status(),
        Some(TemperatureStatus::Overheated)
    );
    assert!(rig.hw.red());

    let req = host::control_request(200, 200, 0);
    rig.link.send_frame(&req, 5);
    let out = rig.tick(110);
    assert_eq!(out, ActuatorOutputs::OVERHEAT);
    assert_eq!(rig.hw.duties(), (0, 0, 255));

    let reply = ControlReply::decode(&rig.link.take_reply().unwrap()).unwrap();
    assert!(reply.overheated());
    assert_eq!(rig.app.registers().heater1_pwm(), 200);
}

#[test]
fn overheat_latches_after_cooling() {
    let mut rig = Rig::new(21.0, 105.0, 40.0);
    rig.tick(100);
    rig.heater1.set(25.0);
    rig.heater2.set(25.0);
    for now in (200..=1_000).step_by(100) {
        rig.tick(now);
    }
    assert_eq!(
        rig.app.registers().temperature_status(),
        Some(TemperatureStatus::Overheated)
    );
    assert_eq!(rig.app.outputs(), ActuatorOutputs::OVERHEAT);
}

#[test]
fn one_hot_heater_ends_as_low_temperature() {
    let mut rig = Rig::new(21.0, 70.0, 25.0);
    rig.tick(100);
    assert_eq!(
        rig.app.registers().temperature_status(),
        Some(TemperatureStatus::LowTemp)
    );
    assert!(!rig.hw.red());
}

#[test]
fn warm_heaters_blink_red_led() {
    let mut rig = Rig::new(21.0, 60.0, 60.0);
    rig.tick(100);
    assert_eq!(
        rig.app.registers().temperature_status(),
        Some(TemperatureStatus::HighTemp)
    );
    assert!(rig.sink.events.contains(&AppEvent::TemperatureStatusChanged {
        from: Some(TemperatureStatus::LowTemp),
        to: TemperatureStatus::HighTemp,
    }));
    let mut levels = Vec::new();
    for now in [200, 250, 300, 500, 750] {
        rig.tick(now);
        levels.push(rig.hw.red());
    }
    assert_eq!(levels, vec![true, false, false, true, false]);
}

#[test]
fn temperature_change_follows_probe_one_sample_late() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    rig.tick(100);
    rig.room.set(22.5);
    rig.tick(200);
    assert_eq!(rig.app.registers().room_temp(), 2100);
    rig.tick(300);
    assert_eq!(rig.app.registers().room_temp(), 2250);
}

// ── Host link status ─────────────────────────────────────────

#[test]
fn link_drops_after_two_seconds_of_silence() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    rig.exchange(&[b'A', b'A'], 1_000);
    rig.tick(3_000);
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Connected)
    );
    assert!(rig.hw.green());

    rig.tick(3_001);
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Waiting)
    );
    assert!(rig.sink.events.contains(&AppEvent::ConnectionChanged {
        from: Some(ConnectionStatus::Connected),
        to: ConnectionStatus::Waiting,
    }));

    // Sticky until the next valid frame.
    rig.tick(10_000);
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Waiting)
    );
    rig.exchange(&[b'A', b'A'], 10_010);
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Connected)
    );
}

#[test]
fn unknown_commands_do_not_keep_the_link_alive() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    rig.exchange(&[b'A', b'A'], 0);
    for now in (500..=2_500).step_by(500) {
        rig.exchange(b"?", now);
    }
    assert_eq!(
        rig.app.registers().connection_status(),
        Some(ConnectionStatus::Waiting)
    );
}

#[test]
fn waiting_link_blinks_green_led() {
    let mut rig = Rig::new(21.0, 21.0, 21.0);
    let mut levels = Vec::new();
    for now in (0..1_000).step_by(125) {
        rig.tick(now);
        levels.push(rig.hw.green());
    }
    assert_eq!(
        levels,
        vec![true, true, false, false, true, true, false, false]
    );
    assert_eq!(rig.hw.led_writes(Led::Green), 4);
}
