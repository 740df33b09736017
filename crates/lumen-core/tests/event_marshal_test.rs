//! Event marshalling against the compiled fixture protocol:
//! byte-exact payloads, version gating, and descriptor handling.

mod common;

use common::{devnull, fixture, interface, TestConnection};
use lumen_core::{ArgValue, DispatchError};
use lumen_proto::{Fixed, ObjectId, ProtocolError};

#[test]
fn event_payload_is_byte_exact() {
    let protocol = fixture();
    let surface = interface(&protocol, "LmSurface");
    let mut conn = TestConnection::default();

    surface
        .emit_event(&mut conn, ObjectId(7), 1, "frame_done", vec![ArgValue::Uint(0xAABBCCDD)])
        .unwrap();

    assert_eq!(conn.sent.len(), 1);
    let message = &conn.sent[0];
    assert_eq!(message.object_id, ObjectId(7));
    assert_eq!(message.opcode, 1); // frame_done is the second declared event
    assert_eq!(message.payload.as_ref(), [0xDD, 0xCC, 0xBB, 0xAA]);
    assert!(message.fd.is_none());
}

#[test]
fn since_gated_event_is_skipped_below_bound_version() {
    let protocol = fixture();
    let surface = interface(&protocol, "LmSurface");
    let mut conn = TestConnection::default();

    // enter declares since="2"; a version-1 bind sees nothing on the wire
    surface
        .emit_event(&mut conn, ObjectId(7), 1, "enter", vec![ArgValue::Object(ObjectId(3))])
        .unwrap();
    assert!(conn.sent.is_empty());

    // at the declared version the full payload goes out
    surface
        .emit_event(&mut conn, ObjectId(7), 2, "enter", vec![ArgValue::Object(ObjectId(3))])
        .unwrap();
    assert_eq!(conn.sent.len(), 1);
    assert_eq!(conn.sent[0].opcode, 0);
    assert_eq!(conn.sent[0].payload.as_ref(), [3, 0, 0, 0]);
}

#[test]
fn fixed_point_encodes_times_256() {
    let protocol = fixture();
    let output = interface(&protocol, "LmOutput");
    let mut conn = TestConnection::default();

    output
        .emit_event(&mut conn, ObjectId(2), 3, "scale", vec![ArgValue::Fixed(Fixed::from_f64(-2.5))])
        .unwrap();

    // -640 little endian
    assert_eq!(conn.sent[0].payload.as_ref(), (-640i32).to_le_bytes());
}

#[test]
fn string_arguments_are_padded_in_place() {
    let protocol = fixture();
    let registry = interface(&protocol, "LmRegistry");
    let mut conn = TestConnection::default();

    registry
        .emit_event(
            &mut conn,
            ObjectId(1),
            1,
            "global",
            vec![
                ArgValue::Uint(4),
                ArgValue::Str("lm_shm".into()),
                ArgValue::Uint(1),
            ],
        )
        .unwrap();

    let payload = conn.sent[0].payload.as_ref();
    // uint + (len 7 + "lm_shm\0" + 1 pad) + uint
    assert_eq!(payload.len(), 4 + 4 + 8 + 4);
    assert_eq!(&payload[4..8], [7, 0, 0, 0]);
    assert_eq!(&payload[8..15], b"lm_shm\0");
    assert_eq!(payload[15], 0);
    assert_eq!(&payload[16..20], [1, 0, 0, 0]);
}

#[test]
fn descriptor_rides_the_message_record() {
    let protocol = fixture();
    let keyboard = interface(&protocol, "LmKeyboard");
    let mut conn = TestConnection::default();

    keyboard
        .emit_event(
            &mut conn,
            ObjectId(9),
            2,
            "keymap",
            vec![ArgValue::Uint(1), ArgValue::Fd(devnull()), ArgValue::Uint(4096)],
        )
        .unwrap();

    let message = &conn.sent[0];
    assert!(message.fd.is_some());
    // fd occupies no inline bytes: format + size only
    assert_eq!(message.payload.as_ref(), [1, 0, 0, 0, 0, 0x10, 0, 0]);
}

#[test]
fn second_descriptor_is_rejected() {
    let protocol = fixture();
    let mirror = interface(&protocol, "LmMirror");
    let mut conn = TestConnection::default();

    let err = mirror
        .emit_event(
            &mut conn,
            ObjectId(1),
            1,
            "pair",
            vec![ArgValue::Fd(devnull()), ArgValue::Fd(devnull())],
        )
        .unwrap_err();

    assert!(matches!(err, DispatchError::Protocol(ProtocolError::TooManyFds)));
    assert!(conn.sent.is_empty());
}

#[test]
fn arity_mismatch_is_rejected() {
    let protocol = fixture();
    let surface = interface(&protocol, "LmSurface");
    let mut conn = TestConnection::default();

    let err = surface
        .emit_event(&mut conn, ObjectId(7), 4, "frame_done", vec![])
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Protocol(ProtocolError::ArityMismatch { expected: 1, actual: 0, .. })
    ));
}

#[test]
fn mistyped_argument_is_rejected() {
    let protocol = fixture();
    let surface = interface(&protocol, "LmSurface");
    let mut conn = TestConnection::default();

    let err = surface
        .emit_event(&mut conn, ObjectId(7), 4, "frame_done", vec![ArgValue::Int(-1)])
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Protocol(ProtocolError::ArgumentMismatch {
            expected: "uint",
            actual: "int",
            ..
        })
    ));
}

#[test]
fn unknown_event_name_is_rejected() {
    let protocol = fixture();
    let surface = interface(&protocol, "LmSurface");
    let mut conn = TestConnection::default();

    let err = surface.emit_event(&mut conn, ObjectId(7), 4, "vanish", vec![]).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Protocol(ProtocolError::UnknownMessage { .. })
    ));
}
