// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end decoding tests over the wire command corpus: envelope
//! decode, then payload materialization.

use std::time::Duration;

use lumen_lib::command::{Action, Command, Kind};
use lumen_lib::pattern::Pattern;
use lumen_lib::types::Color;
use lumen_lib::{DecodeError, Slot};

// ============================================================================
// Execute commands
// ============================================================================

#[test]
fn execute_color_command_end_to_end() {
    let cmd = Command::decode("!#F00").unwrap();
    assert_eq!(cmd.action(), Action::Execute);
    assert_eq!(cmd.kind(), Kind::Color);
    assert_eq!(cmd.id(), "#F00");

    let color = cmd.color().unwrap();
    assert_eq!(color, Color::new(255, 0, 0));
}

#[test]
fn execute_pattern_command_end_to_end() {
    let cmd = Command::decode("!:ab:|#F00,2s,1s|#FFF,2s,1s|#00F,2s,1s").unwrap();
    assert_eq!(cmd.action(), Action::Execute);
    assert_eq!(cmd.kind(), Kind::Pattern);
    assert_eq!(cmd.id(), "ab");

    let pattern = cmd.pattern().unwrap();
    assert_eq!(pattern.id(), "ab");
    assert_eq!(pattern.loops(), None);
    assert_eq!(pattern.slots().len(), 3);
    assert_eq!(pattern.slots()[0].color(), Some(Color::new(255, 0, 0)));
    assert_eq!(pattern.slots()[1].color(), Some(Color::new(255, 255, 255)));
    assert_eq!(pattern.slots()[2].color(), Some(Color::new(0, 0, 255)));
}

#[test]
fn execute_pattern_with_loop_count() {
    let cmd = Command::decode("!:1:3|#F00,1s,2s|#0F0,1s,2s|#00f,1s,").unwrap();
    assert_eq!(cmd.id(), "1");

    let pattern = cmd.pattern().unwrap();
    assert_eq!(pattern.id(), "1");
    assert_eq!(pattern.loops(), Some(3));
    assert_eq!(pattern.slots().len(), 3);
    // The trailing empty field leaves the last slot's transition default
    assert_eq!(pattern.slots()[2].transition(), "ease");
}

#[test]
fn execute_schedule_commands() {
    let cmd = Command::decode("!~4|||0 30 * * * *|#000|").unwrap();
    assert_eq!(cmd.action(), Action::Execute);
    assert_eq!(cmd.kind(), Kind::Schedule);
    assert_eq!(cmd.id(), "4");

    let entry = cmd.schedule().unwrap();
    assert_eq!(entry.id(), "4");
    assert_eq!(entry.starts(), None);
    assert_eq!(entry.expression(), "0 30 * * * *");
    assert_eq!(entry.action(), "#000");

    let cmd = Command::decode("!~8|2015-07-04|2015-07-05|0 0 20 * * *|:ab|1").unwrap();
    assert_eq!(cmd.id(), "8");
    let entry = cmd.schedule().unwrap();
    assert!(entry.starts().is_some());
    assert_eq!(entry.action(), ":ab");
    assert_eq!(entry.repeat(), Some(1));

    let cmd = Command::decode("!~9|2015-07-04|2015-07-05|0 0 23 * * *|#00|1").unwrap();
    assert_eq!(cmd.id(), "9");
}

#[test]
fn execute_scene_commands() {
    let cmd = Command::decode("!^32|#F00,2|1|3|ab").unwrap();
    assert_eq!(cmd.action(), Action::Execute);
    assert_eq!(cmd.kind(), Kind::Scene);
    assert_eq!(cmd.id(), "32");

    let cmd = Command::decode("!^2|#00F|4|56").unwrap();
    assert_eq!(cmd.id(), "2");
}

// ============================================================================
// Query / add / remove commands
// ============================================================================

#[test]
fn query_property_command() {
    let cmd = Command::decode("?-version").unwrap();
    assert_eq!(cmd.action(), Action::Query);
    assert_eq!(cmd.kind(), Kind::Property);
    assert_eq!(cmd.id(), "version");
}

#[test]
fn add_pattern_command() {
    let cmd = Command::decode("+:ab:|#F00,2s,1s|#FFF,2s,1s|#00F,2s,1s").unwrap();
    assert_eq!(cmd.action(), Action::Add);
    assert_eq!(cmd.kind(), Kind::Pattern);
    assert_eq!(cmd.id(), "ab");
}

#[test]
fn remove_pattern_command() {
    let cmd = Command::decode("-:ab:|#F00,2s,1s|#FFF,2s,1s|#00F,2s,1s").unwrap();
    assert_eq!(cmd.action(), Action::Remove);
    assert_eq!(cmd.kind(), Kind::Pattern);
    assert_eq!(cmd.id(), "ab");
}

// ============================================================================
// The envelope id and the pattern header are separate parsers
// ============================================================================

#[test]
fn envelope_id_and_pattern_header_agree_on_the_corpus() {
    for raw in [
        "!:ab:|#F00,2s,1s|#FFF,2s,1s|#00F,2s,1s",
        "!:1:3|#F00,1s,2s|#0F0,1s,2s|#00f,1s,",
        "!:ab|#F00,2s,1s|#FFF,2s,1s|#00F,2s,1s",
        "+:ab:|#F00,2s,1s",
    ] {
        let cmd = Command::decode(raw).unwrap();
        let pattern = cmd.pattern().unwrap();
        assert_eq!(cmd.id(), pattern.id(), "diverged on {raw}");
    }
}

// ============================================================================
// Slot decoding through the full stack
// ============================================================================

#[test]
fn slot_fields_decode_with_defaults() {
    let slot = Slot::decode("#F00,2s,1s").unwrap();
    assert_eq!(slot.color(), Some(Color::new(255, 0, 0)));
    assert_eq!(slot.fade(), Duration::from_secs(2));
    assert_eq!(slot.hold(), Duration::from_secs(1));
    assert_eq!(slot.transition(), "ease");
}

#[test]
fn malformed_slot_fails_the_pattern_not_the_envelope() {
    let raw = "!:ab|#F00,nonsense,1s";
    let cmd = Command::decode(raw).unwrap();
    assert_eq!(cmd.id(), "ab");
    assert!(matches!(
        cmd.pattern(),
        Err(DecodeError::InvalidDuration { field: "fade", .. })
    ));
}

// ============================================================================
// Round-trips for the persistence boundary
// ============================================================================

#[test]
fn command_survives_store_round_trip() {
    let raw = "+:ab:3|#F00,2s,1s|#0F0,500ms,1s,linear";
    let cmd = Command::decode(raw).unwrap();
    let stored = cmd.encode();
    assert_eq!(Command::decode(&stored).unwrap(), cmd);
}

#[test]
fn pattern_survives_store_round_trip() {
    let pattern = Pattern::decode(":ab:3|#F00,2s,1s|#0F0,500ms,1s,linear").unwrap();
    let stored = pattern.encode();
    assert_eq!(Pattern::decode(&stored).unwrap(), pattern);
}

#[test]
fn color_round_trip_is_exact_for_all_channel_values() {
    for value in 0u8..=255 {
        let color = Color::new(value, 255 - value, value / 2);
        assert_eq!(Color::decode(&color.encode()).unwrap(), color);
    }
}
