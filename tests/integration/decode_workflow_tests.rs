/*!
 * End-to-end decoding of mixed CEA-608 / CEA-708 streams
 */

use std::thread;

use ccinspect::engine::{CaptionEngine, SharedEngine};
use ccinspect::events::{CaptionEventSink, RawDtvccData, RawLine21Code};
use ccinspect::renderer;

use crate::common::{basic_na, dtvcc_text, g0, line21_text, sample_stream, time_at};

#[test]
fn test_sampleStream_shouldDecodeBothProtocols() {
    let mut engine = CaptionEngine::new();
    for event in sample_stream() {
        engine.on_event(&event).unwrap();
    }

    assert_eq!(line21_text(&engine, 1), "{RCL} \"HI\" {EOC}");
    assert_eq!(
        dtvcc_text(&engine, 1),
        "{DF0:608-PopUp:R2-C31:Anchor-UL-V0-H0:Pen-Default:Pr-0:VIS:RP} \"OK\" {DSW:00000001}"
    );
    assert_eq!(engine.element_count(), 6);
}

#[test]
fn test_interleavedEvents_shouldNotAffectOtherChannels() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x41, 0)).unwrap();
    engine.handle_dtvcc(&g0(1, 0x58)).unwrap();
    engine.handle_line21(&basic_na(2, 0x5A, 0)).unwrap();
    engine.handle_dtvcc(&g0(1, 0x59)).unwrap();
    engine.handle_line21(&basic_na(1, 0x42, 0)).unwrap();

    assert_eq!(line21_text(&engine, 1), "\"AB\"");
    assert_eq!(line21_text(&engine, 2), "\"Z\"");
    assert_eq!(dtvcc_text(&engine, 1), "\"XY\"");

    let untouched: Vec<u8> = engine
        .dtvcc_services()
        .filter(|(_, sequence)| !sequence.is_empty())
        .map(|(service, _)| service)
        .collect();
    assert_eq!(untouched, vec![1]);
}

#[test]
fn test_rawRecords_shouldDecodeLikeTypedEvents() {
    let mut engine = CaptionEngine::new();
    let records = [
        RawLine21Code { channel: 3, code_type: 5, data: [3, 0x29, 0, 0, 0] },
        RawLine21Code { channel: 3, code_type: 2, data: [0x4E, 0x4F, 0, 0, 0] },
        RawLine21Code { channel: 3, code_type: 7, data: [3, 0x21, 0, 0, 0] },
    ];
    for record in records {
        let event = record.into_event(time_at(3, 0)).unwrap();
        engine.on_line21(&event).unwrap();
    }

    let dtvcc = RawDtvccData { service: 5, dtvcc_type: 2, data: vec![0x8C, 0xFF] };
    engine.on_dtvcc(&dtvcc.into_event(time_at(3, 1)).unwrap()).unwrap();

    assert_eq!(line21_text(&engine, 3), "{RDC} \"NO\" {TO1}");
    assert_eq!(dtvcc_text(&engine, 5), "{DLW:11111111}");
}

#[test]
fn test_headers_shouldFollowEngineNumbering() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(4, 0x41, 0)).unwrap();

    let headers: Vec<String> = engine
        .line21_channels()
        .filter(|(_, sequence)| !sequence.is_empty())
        .map(|(channel, _)| renderer::line21_header("clip", channel))
        .collect();
    assert_eq!(headers, vec!["Decoded Line 21 / CEA-608 for Asset: clip - Channel: 4"]);
}

#[test]
fn test_sharedEngine_fedFromSeveralThreads_shouldKeepServicesSeparate() {
    let shared = SharedEngine::new();

    let handles: Vec<_> = (1u8..=4)
        .map(|service| {
            let engine = shared.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    engine.handle_dtvcc(&g0(service, 0x40 + service)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = shared.snapshot();
    for service in 1u8..=4 {
        let expected = format!("\"{}\"", char::from(0x40 + service).to_string().repeat(25));
        assert_eq!(dtvcc_text(&snapshot, service), expected);
    }
    assert_eq!(shared.with(|engine| engine.element_count()), 4);

    shared.reset();
    assert_eq!(shared.with(|engine| engine.element_count()), 0);
}
