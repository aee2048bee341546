/*!
 * Tests for CEA-608 element accumulation
 */

use ccinspect::elements::{ElementKind, PacPlacement};
use ccinspect::engine::CaptionEngine;
use ccinspect::errors::{DecodeError, Origin};
use ccinspect::events::{Line21Event, Line21Payload};
use ccinspect::tables::line21::{ExtendedCharSet, GLOBAL_CONTROL_CODES};

use crate::common::{basic_na, global_control, line21_text, time_at};

fn event(channel: u8, payload: Line21Payload) -> Line21Event {
    Line21Event::new(time_at(2, 5), channel, payload)
}

#[test]
fn test_basicNa_withConsecutivePairs_shouldMergeIntoOneRun() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x41, 0x00)).unwrap();
    engine.handle_line21(&basic_na(1, 0x42, 0x00)).unwrap();

    let elements = engine.line21_elements(1).unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].as_text().unwrap().text(), "AB");
    assert_eq!(line21_text(&engine, 1), "\"AB\"");
}

#[test]
fn test_basicNa_withTwoCharacters_shouldAppendBoth() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(2, 0x48, 0x49)).unwrap();

    assert_eq!(line21_text(&engine, 2), "\"HI\"");
}

#[test]
fn test_basicNa_withOverriddenCodes_shouldUseCaptionGlyphs() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x2A, 0x7E)).unwrap();

    assert_eq!(line21_text(&engine, 1), "\"áñ\"");
}

#[test]
fn test_basicNa_withBothBytesZero_shouldStillOpenRun() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x00, 0x00)).unwrap();

    assert_eq!(line21_text(&engine, 1), "\"\"");
}

#[test]
fn test_textRun_shouldKeepTimeOfFirstEvent() {
    let mut engine = CaptionEngine::new();
    engine
        .handle_line21(&Line21Event::new(time_at(1, 0), 1, Line21Payload::BasicNa { first: 0x41, second: 0 }))
        .unwrap();
    engine
        .handle_line21(&Line21Event::new(time_at(3, 0), 1, Line21Payload::BasicNa { first: 0x42, second: 0 }))
        .unwrap();

    assert_eq!(engine.line21_elements(1).unwrap()[0].time, time_at(1, 0));
}

#[test]
fn test_globalControl_withEdm_shouldRenderMnemonic() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&global_control(1, 0x2C)).unwrap();

    assert_eq!(line21_text(&engine, 1), "{EDM}");
}

#[test]
fn test_globalControl_betweenCharacters_shouldSplitRuns() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x41, 0)).unwrap();
    engine.handle_line21(&global_control(1, 0x2D)).unwrap();
    engine.handle_line21(&basic_na(1, 0x42, 0)).unwrap();

    assert_eq!(line21_text(&engine, 1), "\"A\" {CR} \"B\"");
}

#[test]
fn test_globalControl_withEveryTableCode_shouldRoundTripMnemonic() {
    for code in GLOBAL_CONTROL_CODES.codes() {
        let mut engine = CaptionEngine::new();
        engine.handle_line21(&global_control(1, code)).unwrap();

        let rendered = line21_text(&engine, 1);
        assert_eq!(
            ccinspect::renderer::parse_mnemonic(&rendered),
            GLOBAL_CONTROL_CODES.get(code)
        );
    }
}

#[test]
fn test_globalControl_withUnknownCommand_shouldFaultWithContext() {
    let mut engine = CaptionEngine::new();
    let error = engine.handle_line21(&global_control(3, 0x50)).unwrap_err();

    match error {
        DecodeError::UnrecognizedCode { table, code, origin, time } => {
            assert_eq!(table, "global control");
            assert_eq!(code, 0x50);
            assert_eq!(origin, Origin::Line21Channel(3));
            assert_eq!(time, time_at(1, 0));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(engine.line21_elements(3).unwrap().is_empty());
}

#[test]
fn test_preamble_withColorStyle_shouldRenderRowAndColor() {
    let mut engine = CaptionEngine::new();
    engine
        .handle_line21(&event(
            1,
            Line21Payload::Preamble {
                display_channel: 1,
                underlined: false,
                row: 15,
                style_address: 0,
                data: 0x08,
            },
        ))
        .unwrap();

    let elements = engine.line21_elements(1).unwrap();
    match &elements[0].kind {
        ElementKind::Preamble(pac) => {
            assert_eq!(pac.color(), Some("Red"));
            assert_eq!(pac.cursor_column(), None);
        }
        other => panic!("unexpected element: {:?}", other),
    }
    assert_eq!(line21_text(&engine, 1), "{R15:Red}");
}

#[test]
fn test_preamble_withAddressCode_shouldRenderCursorColumn() {
    let mut engine = CaptionEngine::new();
    engine
        .handle_line21(&event(
            1,
            Line21Payload::Preamble {
                display_channel: 1,
                underlined: true,
                row: 2,
                style_address: 1,
                data: 0x06,
            },
        ))
        .unwrap();

    let elements = engine.line21_elements(1).unwrap();
    match &elements[0].kind {
        ElementKind::Preamble(pac) => assert_eq!(pac.placement, PacPlacement::Cursor(12)),
        other => panic!("unexpected element: {:?}", other),
    }
    assert_eq!(line21_text(&engine, 1), "{R2:C12:UL}");
}

#[test]
fn test_preamble_withOddAddressCode_shouldFault() {
    let mut engine = CaptionEngine::new();
    let result = engine.handle_line21(&event(
        1,
        Line21Payload::Preamble {
            display_channel: 1,
            underlined: false,
            row: 1,
            style_address: 1,
            data: 0x03,
        },
    ));

    assert!(matches!(result, Err(DecodeError::UnrecognizedCode { code: 0x03, .. })));
}

#[test]
fn test_tabControl_shouldSubtractBase() {
    let mut engine = CaptionEngine::new();
    engine
        .handle_line21(&event(1, Line21Payload::TabControl { display_channel: 1, offset: 0x22 }))
        .unwrap();

    assert_eq!(line21_text(&engine, 1), "{TO2}");
}

#[test]
fn test_tabControl_withOffsetOutOfRange_shouldFault() {
    let mut engine = CaptionEngine::new();
    let result = engine.handle_line21(&event(1, Line21Payload::TabControl { display_channel: 1, offset: 0x24 }));

    assert!(matches!(
        result,
        Err(DecodeError::UnrecognizedCode { table: "tab offset", code: 0x24, .. })
    ));
}

#[test]
fn test_midRow_withBackground_shouldRenderBackgroundOnly() {
    let mut engine = CaptionEngine::new();
    engine
        .handle_line21(&event(
            1,
            Line21Payload::MidRow {
                display_channel: 1,
                partially_transparent: true,
                underlined: false,
                background_or_foreground: 0,
                data: 0x0E,
            },
        ))
        .unwrap();

    let elements = engine.line21_elements(1).unwrap();
    match &elements[0].kind {
        ElementKind::MidRow(style) => {
            assert_eq!(style.background_color(), Some("Black"));
            assert_eq!(style.foreground_style(), None);
        }
        other => panic!("unexpected element: {:?}", other),
    }
    assert_eq!(line21_text(&engine, 1), "{BG-Black:PT}");
}

#[test]
fn test_midRow_withForeground_shouldRenderForegroundOnly() {
    let mut engine = CaptionEngine::new();
    engine
        .handle_line21(&event(
            4,
            Line21Payload::MidRow {
                display_channel: 4,
                partially_transparent: false,
                underlined: true,
                background_or_foreground: 1,
                data: 0x0E,
            },
        ))
        .unwrap();

    assert_eq!(line21_text(&engine, 4), "{FG-Italic White:UL}");
}

/// Feeds `payload` after an open "A" run and checks the fault leaves the run open
fn assert_fault_keeps_open_run(payload: Line21Payload, table: &str, code: u8) {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x41, 0)).unwrap();
    let before = engine.line21_elements(1).unwrap().to_vec();

    let result = engine.handle_line21(&event(1, payload));
    match result {
        Err(DecodeError::UnrecognizedCode { table: faulted, code: faulted_code, origin, .. }) => {
            assert_eq!(faulted, table);
            assert_eq!(faulted_code, code);
            assert_eq!(origin, Origin::Line21Channel(1));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(engine.line21_elements(1).unwrap(), before.as_slice());

    engine.handle_line21(&basic_na(1, 0x42, 0)).unwrap();
    assert_eq!(line21_text(&engine, 1), "\"AB\"");
}

#[test]
fn test_preamble_withUnknownColor_shouldFaultWithoutTouchingSequence() {
    assert_fault_keeps_open_run(
        Line21Payload::Preamble {
            display_channel: 1,
            underlined: false,
            row: 1,
            style_address: 0,
            data: 0x01,
        },
        "PAC color",
        0x01,
    );
}

#[test]
fn test_preamble_withOddAddressCode_shouldKeepOpenRun() {
    assert_fault_keeps_open_run(
        Line21Payload::Preamble {
            display_channel: 1,
            underlined: false,
            row: 1,
            style_address: 1,
            data: 0x03,
        },
        "PAC cursor column",
        0x03,
    );
}

#[test]
fn test_midRow_withUnknownBackground_shouldFaultWithoutTouchingSequence() {
    assert_fault_keeps_open_run(
        Line21Payload::MidRow {
            display_channel: 1,
            partially_transparent: false,
            underlined: false,
            background_or_foreground: 0,
            data: 0x0F,
        },
        "mid-row background color",
        0x0F,
    );
}

#[test]
fn test_midRow_withUnknownForeground_shouldFaultWithoutTouchingSequence() {
    assert_fault_keeps_open_run(
        Line21Payload::MidRow {
            display_channel: 1,
            partially_transparent: false,
            underlined: true,
            background_or_foreground: 1,
            data: 0x01,
        },
        "mid-row foreground style",
        0x01,
    );
}

#[test]
fn test_specialNa_shouldExtendRunAndLabelChannel() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x41, 0)).unwrap();
    engine
        .handle_line21(&event(1, Line21Payload::SpecialNa { display_channel: 5, code: 0x37 }))
        .unwrap();

    let elements = engine.line21_elements(1).unwrap();
    assert_eq!(elements.len(), 1);
    let run = elements[0].as_text().unwrap();
    assert_eq!(run.text(), "A?");
    assert_eq!(run.channel(), Some("1&3"));
}

#[test]
fn test_extendedWe_shouldUseSelectedCharacterSet() {
    let mut engine = CaptionEngine::new();
    engine
        .handle_line21(&event(
            2,
            Line21Payload::ExtendedWe {
                display_channel: 2,
                char_set: ExtendedCharSet::SpanishFrench,
                code: 0x20,
            },
        ))
        .unwrap();

    let elements = engine.line21_elements(2).unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].as_text().unwrap().channel(), Some("2"));
}

#[test]
fn test_specialNa_withUnknownChannelLabel_shouldFaultBeforeOpeningRun() {
    let mut engine = CaptionEngine::new();
    let result = engine.handle_line21(&event(1, Line21Payload::SpecialNa { display_channel: 9, code: 0x30 }));

    assert!(matches!(
        result,
        Err(DecodeError::UnrecognizedCode { table: "channel label", code: 9, .. })
    ));
    assert!(engine.line21_elements(1).unwrap().is_empty());
}

#[test]
fn test_handleLine21_withChannelOutOfRange_shouldFault() {
    let mut engine = CaptionEngine::new();

    assert_eq!(
        engine.handle_line21(&basic_na(0, 0x41, 0)),
        Err(DecodeError::ChannelOutOfRange(0))
    );
    assert_eq!(
        engine.handle_line21(&basic_na(5, 0x41, 0)),
        Err(DecodeError::ChannelOutOfRange(5))
    );
    assert_eq!(engine.element_count(), 0);
}

#[test]
fn test_channels_shouldAccumulateIndependently() {
    let mut engine = CaptionEngine::new();
    engine.handle_line21(&basic_na(1, 0x41, 0)).unwrap();
    engine.handle_line21(&basic_na(3, 0x58, 0)).unwrap();
    engine.handle_line21(&basic_na(1, 0x42, 0)).unwrap();

    assert_eq!(line21_text(&engine, 1), "\"AB\"");
    assert_eq!(line21_text(&engine, 3), "\"X\"");
    assert!(engine.line21_elements(2).unwrap().is_empty());
}
