/*!
 * Tests for the event model and raw record conversion
 */

use ccinspect::caption_time::{CaptionTime, TimeSource};
use ccinspect::engine::CaptionEngine;
use ccinspect::errors::DecodeError;
use ccinspect::events::{
    CaptionEvent, CaptionEventSink, DtvccClass, DtvccPayload, Line21CodeKind, Line21Payload, RawDtvccData,
    RawLine21Code,
};
use ccinspect::tables::line21::ExtendedCharSet;

use crate::common::{basic_na, g0, line21_text, time_at};

#[test]
fn test_rawLine21Code_withPreamble_shouldMapUnionBytes() {
    let raw = RawLine21Code {
        channel: 2,
        code_type: 6,
        data: [2, 1, 11, 0, 0x0A],
    };
    let event = raw.into_event(time_at(0, 0)).unwrap();

    assert_eq!(event.channel, 2);
    assert_eq!(
        event.payload,
        Line21Payload::Preamble {
            display_channel: 2,
            underlined: true,
            row: 11,
            style_address: 0,
            data: 0x0A,
        }
    );
    assert_eq!(event.payload.kind(), Line21CodeKind::Preamble);
}

#[test]
fn test_rawLine21Code_withExtendedWe_shouldSelectCharacterSet() {
    let raw = RawLine21Code {
        channel: 1,
        code_type: 4,
        data: [1, 1, 0x34, 0, 0],
    };
    let event = raw.into_event(time_at(0, 0)).unwrap();

    assert_eq!(
        event.payload,
        Line21Payload::ExtendedWe {
            display_channel: 1,
            char_set: ExtendedCharSet::DutchGerman,
            code: 0x34,
        }
    );
    assert!(event.payload.is_character());
}

#[test]
fn test_rawLine21Code_withUnknownKind_shouldBeReported() {
    let raw = RawLine21Code {
        channel: 1,
        code_type: 9,
        data: [0; 5],
    };

    assert_eq!(raw.into_event(time_at(0, 0)), Err(DecodeError::UnknownLine21Kind(9)));
}

#[test]
fn test_rawDtvccData_withC1_shouldSplitCodeAndParameters() {
    let raw = RawDtvccData {
        service: 3,
        dtvcc_type: 2,
        data: vec![0x92, 4, 7],
    };
    let event = raw.into_event(time_at(0, 0)).unwrap();

    assert_eq!(event.service, 3);
    assert_eq!(event.payload, DtvccPayload::C1 { code: 0x92, data: vec![4, 7] });
    assert_eq!(event.payload.class(), DtvccClass::C1);
}

#[test]
fn test_rawDtvccData_withP16_shouldCarryEscapedBytes() {
    let raw = RawDtvccData {
        service: 1,
        dtvcc_type: 1,
        data: vec![0x18, 0xAB, 0xCD],
    };
    let event = raw.into_event(time_at(0, 0)).unwrap();

    assert_eq!(event.payload, DtvccPayload::C0 { code: 0x18, p16: [0xAB, 0xCD] });
}

#[test]
fn test_rawDtvccData_withUnknownTypeOrEmptyData_shouldBeReported() {
    let unknown = RawDtvccData {
        service: 1,
        dtvcc_type: 0,
        data: vec![0x41],
    };
    assert_eq!(unknown.into_event(time_at(0, 0)), Err(DecodeError::UnknownDtvccType(0)));

    let empty = RawDtvccData {
        service: 1,
        dtvcc_type: 5,
        data: Vec::new(),
    };
    assert!(matches!(
        empty.into_event(time_at(0, 0)),
        Err(DecodeError::TruncatedPayload { command: "G0", .. })
    ));
}

#[test]
fn test_dtvccClass_codes_shouldMatchDiscriminants() {
    for code in 1..=8 {
        let class = DtvccClass::from_code(code).unwrap();
        assert_eq!(class.code(), code);
    }
    assert_eq!(DtvccClass::from_code(9), None);
    assert_eq!(DtvccClass::G2.mnemonic(), "G2");
}

#[test]
fn test_captionEvent_json_shouldParseTaggedForm() {
    let json = r#"{"event":"line21","time":{"second":5,"frame":12,"frame_rate_x100":2997,"source":"frame_numbering"},"channel":1,"payload":{"kind":"global_control","display_channel":1,"command":44}}"#;
    let event: CaptionEvent = serde_json::from_str(json).unwrap();

    match &event {
        CaptionEvent::Line21(line21) => {
            assert_eq!(line21.time.source(), TimeSource::FrameNumbering);
            assert_eq!(line21.time.frame_position_x100(), 5 * 2997 + 12 * 100);
            assert_eq!(
                line21.payload,
                Line21Payload::GlobalControl {
                    display_channel: 1,
                    command: 0x2C,
                }
            );
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn test_captionEvent_json_withInvalidTime_shouldBeRejected() {
    let json = r#"{"event":"dtvcc","time":{"minute":75},"service":1,"payload":{"type":"g0","code":65}}"#;

    assert!(serde_json::from_str::<CaptionEvent>(json).is_err());
}

#[test]
fn test_captionEvent_endOfStream_shouldSerializeAsTagOnly() {
    let json = serde_json::to_string(&CaptionEvent::EndOfStream).unwrap();

    assert_eq!(json, r#"{"event":"end_of_stream"}"#);
}

#[test]
fn test_onEvent_shouldDispatchToEngine() {
    let mut engine = CaptionEngine::new();
    engine.on_event(&CaptionEvent::Line21(basic_na(1, 0x4F, 0x4B))).unwrap();
    engine.on_event(&CaptionEvent::Dtvcc(g0(1, 0x41))).unwrap();
    engine.on_event(&CaptionEvent::EndOfStream).unwrap();

    assert_eq!(line21_text(&engine, 1), "\"OK\"");
    assert_eq!(engine.element_count(), 2);
    assert!(engine.is_end_of_stream());
}

#[test]
fn test_captionTime_display_shouldFollowSource() {
    assert_eq!(CaptionTime::from_frames(1, 2, 3, 4, true, 2997).to_string(), "[01:02:03;04]");
    assert_eq!(CaptionTime::from_frames(1, 2, 3, 4, false, 2500).to_string(), "[01:02:03:04]");
    assert_eq!(CaptionTime::from_millis(1, 2, 3, 45, 2997).to_string(), "[01:02:03,045]");
}
