#![cfg(feature = "mock")] // Host-only: needs the mock platform

//! End-to-end tracking cycle against the mock DDC bus
//!
//! Run with `cargo test --features mock`.

use balloon_tracker::devices::gps::{
    DdcTransport, GpsConfig, GpsReceiver, ProtocolVariant, ReceiverState, DEFAULT_DDC_ADDRESS,
};
use balloon_tracker::devices::gps_operation::GpsOperation;
use balloon_tracker::platform::mock::{MockGpio, MockI2c, MockTimer};
use balloon_tracker::ubx::commands::{
    LEGACY_RECEIVER_SEQUENCE, POLL_NAV_POSLLH, POLL_NAV_SOL, POLL_NAV_TIMEUTC,
};
use balloon_tracker::ubx::{ubx_checksum, CommandFrame};

fn frame(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() as u16).to_le_bytes();
    let mut bytes = vec![0xB5, 0x62, class, id, len[0], len[1]];
    bytes.extend_from_slice(payload);
    let (ck_a, ck_b) = ubx_checksum(&bytes[2..]);
    bytes.extend_from_slice(&[ck_a, ck_b]);
    bytes
}

fn wire(command: &CommandFrame) -> Vec<u8> {
    command.bytes().collect()
}

fn legacy_receiver_bus() -> MockI2c {
    let mut i2c = MockI2c::new();
    for step in LEGACY_RECEIVER_SEQUENCE {
        let ack = frame(0x05, 0x01, &[step.command.class, step.command.id]);
        i2c.on_write(&wire(&step.command), &ack);
    }

    let mut posllh = [0u8; 28];
    posllh[4..8].copy_from_slice(&(-12_345_678i32).to_le_bytes());
    posllh[8..12].copy_from_slice(&514_000_000i32.to_le_bytes());
    posllh[16..20].copy_from_slice(&60_000_000i32.to_le_bytes());

    let mut sol = [0u8; 52];
    sol[10] = 3;
    sol[47] = 10;

    let mut timeutc = [0u8; 20];
    timeutc[12..14].copy_from_slice(&2017u16.to_le_bytes());
    timeutc[14..19].copy_from_slice(&[5, 20, 8, 15, 42]);

    i2c.on_write(&wire(&POLL_NAV_POSLLH), &frame(0x01, 0x02, &posllh));
    i2c.on_write(&wire(&POLL_NAV_SOL), &frame(0x01, 0x06, &sol));
    i2c.on_write(&wire(&POLL_NAV_TIMEUTC), &frame(0x01, 0x21, &timeutc));
    i2c
}

#[test]
fn test_gen1_tracking_cycle() {
    let receiver = GpsReceiver::new(
        DdcTransport::new(legacy_receiver_bus(), DEFAULT_DDC_ADDRESS),
        MockTimer::new(),
        MockGpio::new(),
        MockGpio::new(),
        GpsConfig::for_variant(ProtocolVariant::Gen1),
    );
    let mut operation = GpsOperation::new(receiver);

    let outcome = operation.search(120_000).expect("search failed");
    assert!(outcome.locked);
    assert_eq!(outcome.fix.latitude, 514_000_000);
    assert_eq!(outcome.fix.longitude, -12_345_678);
    assert_eq!(outcome.fix.altitude, 50_000);
    assert_eq!(outcome.fix.num_svs, 10);
    assert_eq!(
        outcome.fix.to_string(),
        "2017-05-20 08:15:42 51.4000000 -1.2345678 alt 50000m sats 10 type 3"
    );

    let gps = operation.receiver_mut();
    assert_eq!(gps.state(), ReceiverState::PoweredOff);
    assert_eq!(gps.stats().acks, 4);
    assert_eq!(gps.stats().frames_received, 3);
}
