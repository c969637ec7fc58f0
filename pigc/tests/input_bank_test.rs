pub mod common;

use embedded_hal::digital::PinState;
use pigc::{Error, InputBank, InputDevice, KeyCode, KeyEvent, LineId, SettleDebouncer};

use crate::common::{MockLine, ScriptedWaiter, create_test_bank, press, release};

const KEYS: [KeyCode; 4] = [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::Escape];

#[test]
fn test_initial_levels_follow_lines() {
    let lines = [
        MockLine::new(4, PinState::High),
        MockLine::new(15, PinState::Low),
        MockLine::new(17, PinState::High),
    ];
    let bank = InputBank::new(
        [
            (LineId(4), KeyCode::Down, lines[0].clone()),
            (LineId(15), KeyCode::Up, lines[1].clone()),
            (LineId(17), KeyCode::Right, lines[2].clone()),
        ],
        ScriptedWaiter::default(),
        SettleDebouncer::default(),
        true,
    )
    .unwrap();

    assert_eq!(bank.last_level(KeyCode::Down), Some(PinState::High));
    assert_eq!(bank.last_level(KeyCode::Up), Some(PinState::Low));
    assert_eq!(bank.last_level(KeyCode::Right), Some(PinState::High));
    assert_eq!(bank.last_level(KeyCode::A), None);
    // A line held low at start is already pressed
    let pressed: Vec<bool> = bank.key_states().iter().map(|s| s.pressed).collect();
    assert_eq!(pressed, [false, true, false]);
    assert!(lines.iter().all(|l| l.reads() == 1));
}

#[test]
fn test_single_press_and_release() {
    let waiter = ScriptedWaiter::new([press(1), release(1)]);
    let (mut bank, _lines) = create_test_bank(&KEYS, &waiter);

    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Down, true));
    assert_eq!(bank.last_level(KeyCode::Down), Some(PinState::Low));
    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Down, false));
    assert_eq!(bank.last_level(KeyCode::Down), Some(PinState::High));
    assert_eq!(waiter.waits(), 2);
}

#[test]
fn test_bounce_back_emits_nothing() {
    // Key 2 bounces low and settles high again, then key 0 is pressed
    let waiter = ScriptedWaiter::new([vec![(2, PinState::Low), (2, PinState::High)], press(0)]);
    let (mut bank, lines) = create_test_bank(&KEYS, &waiter);

    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Up, true));
    assert_eq!(waiter.waits(), 2);
    // Seed read plus one debounce read
    assert_eq!(lines[2].reads(), 2);
    assert_eq!(bank.last_level(KeyCode::Enter), Some(PinState::High));
}

#[test]
fn test_no_duplicate_same_state_events() {
    // A second notification while the key stays pressed is spurious
    let waiter = ScriptedWaiter::new([press(3), press(3), press(3), release(3)]);
    let (mut bank, _lines) = create_test_bank(&KEYS, &waiter);

    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Escape, true));
    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Escape, false));
    assert_eq!(waiter.waits(), 4);
}

#[test]
fn test_simultaneous_edges_resolve_in_configuration_order() {
    // Key 3 and key 1 change in the same wake-up
    let waiter = ScriptedWaiter::new([vec![(3, PinState::Low), (1, PinState::Low)]]);
    let (mut bank, _lines) = create_test_bank(&KEYS, &waiter);

    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Down, true));
    // The second one is still flagged and needs no new wake-up
    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Escape, true));
    assert_eq!(waiter.waits(), 1);

    // Nothing else happened: the next call waits again and hits the end of the script
    assert!(matches!(bank.next_event(), Err(Error::Wait(_))));
}

#[test]
fn test_spurious_edge_before_real_one_in_same_wake() {
    let waiter = ScriptedWaiter::new([vec![(0, PinState::Low), (0, PinState::High), (2, PinState::Low)]]);
    let (mut bank, _lines) = create_test_bank(&KEYS, &waiter);

    assert_eq!(bank.next_event().unwrap(), KeyEvent::new(KeyCode::Enter, true));
    assert_eq!(waiter.waits(), 1);
}

#[test]
fn test_state_persists_across_calls() {
    let waiter = ScriptedWaiter::new([press(0), press(1), release(0), release(1)]);
    let (mut bank, _lines) = create_test_bank(&KEYS, &waiter);

    let events: Vec<KeyEvent> = (0..4).map(|_| bank.next_event().unwrap()).collect();
    assert_eq!(
        events,
        [
            KeyEvent::new(KeyCode::Up, true),
            KeyEvent::new(KeyCode::Down, true),
            KeyEvent::new(KeyCode::Up, false),
            KeyEvent::new(KeyCode::Down, false),
        ]
    );
    let pressed: Vec<bool> = bank.key_states().iter().map(|s| s.pressed).collect();
    assert_eq!(pressed, [false; 4]);
}

#[test]
fn test_active_high_wiring() {
    let lines = [MockLine::new(5, PinState::Low), MockLine::new(6, PinState::Low)];
    let waiter = ScriptedWaiter::new([vec![(1, PinState::High)], vec![(1, PinState::Low)]]);
    let mut bank = InputBank::new(
        [
            (LineId(5), KeyCode::A, lines[0].clone()),
            (LineId(6), KeyCode::B, lines[1].clone()),
        ],
        waiter,
        SettleDebouncer::default(),
        false,
    )
    .unwrap();

    assert_eq!(bank.read_event().unwrap(), KeyEvent::new(KeyCode::B, true));
    assert_eq!(bank.read_event().unwrap(), KeyEvent::new(KeyCode::B, false));
}

#[test]
fn test_wait_failure_is_fatal() {
    let waiter = ScriptedWaiter::new([]);
    let (mut bank, _lines) = create_test_bank(&KEYS, &waiter);

    assert!(matches!(bank.next_event(), Err(Error::Wait(_))));
}

#[test]
fn test_read_failure_after_edge() {
    let waiter = ScriptedWaiter::new([press(2)]);
    let (mut bank, lines) = create_test_bank(&KEYS, &waiter);
    lines[2].break_line();

    let err = bank.next_event().unwrap_err();
    assert!(matches!(err, Error::Resource { line: LineId(102), .. }));
}

#[test]
fn test_read_failure_during_init() {
    let lines = [MockLine::new(1, PinState::High), MockLine::new(2, PinState::High)];
    lines[1].break_line();

    let res = InputBank::new(
        [
            (LineId(1), KeyCode::A, lines[0].clone()),
            (LineId(2), KeyCode::B, lines[1].clone()),
        ],
        ScriptedWaiter::default(),
        SettleDebouncer::default(),
        true,
    );
    assert!(matches!(res, Err(Error::Resource { line: LineId(2), .. })));
}

#[test]
fn test_invalid_tables_are_rejected() {
    let line = || MockLine::new(1, PinState::High);
    let build = |lines: Vec<(LineId, KeyCode, MockLine)>| {
        InputBank::new(lines, ScriptedWaiter::default(), SettleDebouncer::default(), true).map(|_| ())
    };

    assert!(matches!(build(vec![]), Err(Error::Configuration(_))));
    assert!(matches!(
        build(vec![(LineId(1), KeyCode::A, line()), (LineId(1), KeyCode::B, line())]),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        build(vec![(LineId(1), KeyCode::A, line()), (LineId(2), KeyCode::A, line())]),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_keys_enumeration() {
    let waiter = ScriptedWaiter::default();
    let (bank, _lines) = create_test_bank(&KEYS, &waiter);

    assert_eq!(bank.len(), 4);
    assert_eq!(bank.keys().collect::<Vec<_>>(), KEYS);
    // Restartable
    assert_eq!(bank.keys().count(), 4);

    let mut registered = Vec::new();
    bank.map_keys(|key| {
        registered.push(key);
        Ok::<_, Error>(())
    })
    .unwrap();
    assert_eq!(registered, KEYS);
}

#[test]
fn test_keys_enumeration_stops_on_error() {
    let waiter = ScriptedWaiter::default();
    let (bank, _lines) = create_test_bank(&KEYS, &waiter);

    let mut seen = 0;
    let res = bank.map_keys(|key| {
        seen += 1;
        if key == KeyCode::Down { Err("rejected") } else { Ok(()) }
    });
    assert_eq!(res, Err("rejected"));
    assert_eq!(seen, 2);
}
