//! Property tests for the input pipeline and the navigation engine.

mod common;

use common::Screen;
use deskclock::config::{DEBOUNCE_SCANS, EVENT_QUEUE_CAPACITY, HISTORY_DEPTH, TRANSITION_MS};
use deskclock::devices::QuadratureCounter;
use deskclock::input::{
    Debouncer, EventKind, EventQueue, InputEvent, InputScanner, KeyTransition, QuadratureTracker, RawInputs,
};
use deskclock::ui::{Nav, NavigationEngine, PageSet};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use proptest::prelude::*;

/// Expand `(held, released)` run lengths into a sample stream.
fn samples(runs: &[(usize, usize)]) -> Vec<bool> {
    let mut out = Vec::new();
    for &(held, released) in runs {
        out.extend(std::iter::repeat(true).take(held));
        out.extend(std::iter::repeat(false).take(released));
    }
    out
}

fn count_presses(stream: &[bool]) -> usize {
    let mut key = Debouncer::new();
    stream
        .iter()
        .filter(|&&s| key.update(s) == KeyTransition::Pressed)
        .count()
}

struct Counter(u16);

impl QuadratureCounter for Counter {
    fn count(&self) -> u16 {
        self.0
    }

    fn set_count(&mut self, value: u16) {
        self.0 = value;
    }
}

/// Bare page set: ids are plain numbers, page 0 is home.
#[derive(Default)]
struct Deck {
    live: Vec<u8>,
    refreshed: [Option<u32>; 16],
}

impl PageSet for Deck {
    type Id = u8;

    fn home(&self) -> u8 {
        0
    }

    fn name(&self, _id: u8) -> &'static str {
        "page"
    }

    fn refresh_interval_ms(&self, _id: u8) -> u32 {
        50
    }

    fn last_refresh_ms(&self, id: u8) -> Option<u32> {
        self.refreshed[id as usize]
    }

    fn set_last_refresh_ms(&mut self, id: u8, at: Option<u32>) {
        self.refreshed[id as usize] = at;
    }

    fn enter(&mut self, id: u8, _now_ms: u32) {
        self.live.push(id);
    }

    fn exit(&mut self, id: u8, _now_ms: u32) {
        self.live.retain(|&p| p != id);
    }

    fn tick(&mut self, _id: u8, _now_ms: u32) -> Nav<u8> {
        Nav::Stay
    }

    fn action(&mut self, _id: u8, event: &InputEvent, _now_ms: u32) -> Nav<u8> {
        match event.kind {
            EventKind::EncoderRotated(n) => Nav::Push(n as u8),
            EventKind::BackPressed => Nav::Back,
            _ => Nav::Stay,
        }
    }

    fn draw<D>(&self, _id: u8, _target: &mut D, _offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Open(u8),
    Back,
    Home,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..16).prop_map(Op::Open),
        2 => Just(Op::Back),
        1 => Just(Op::Home),
    ]
}

proptest! {
    /// Pulses shorter than the debounce threshold never produce a press.
    #[test]
    fn debounce_rejects_short_glitches(
        runs in prop::collection::vec((1..DEBOUNCE_SCANS as usize, 1usize..6), 0..40)
    ) {
        prop_assert_eq!(count_presses(&samples(&runs)), 0);
    }

    /// Every hold at or above the threshold yields exactly one press,
    /// however long it lasts.
    #[test]
    fn debounce_one_press_per_hold(
        runs in prop::collection::vec((1usize..30, 1usize..6), 0..40)
    ) {
        let expected = runs.iter().filter(|(held, _)| *held >= DEBOUNCE_SCANS as usize).count();
        prop_assert_eq!(count_presses(&samples(&runs)), expected);
    }

    /// Summed encoder deltas match the hardware motion across counter
    /// wraparound.
    #[test]
    fn encoder_deltas_are_lossless(
        start in any::<u16>(),
        moves in prop::collection::vec(-300i16..300, 0..200)
    ) {
        let mut hw = Counter(start);
        let mut tracker = QuadratureTracker::starting_at(hw.count());
        let mut reported: i64 = 0;
        for m in &moves {
            hw.set_count(hw.count().wrapping_add(*m as u16));
            if let Some(d) = tracker.update(hw.count()) {
                reported += i64::from(d);
            }
        }
        let moved: i64 = moves.iter().map(|&m| i64::from(m)).sum();
        prop_assert_eq!(reported, moved);
    }

    /// Scanning emits rotation events whose deltas add up to the motion,
    /// as long as the queue keeps up.
    #[test]
    fn scanner_rotation_adds_up(moves in prop::collection::vec(-20i16..20, 0..100)) {
        let queue: EventQueue = EventQueue::new();
        let mut hw = Counter(1234);
        let mut scanner = InputScanner::new();
        scanner.reset(&mut hw);

        let mut total = 0i32;
        for (t, m) in moves.iter().enumerate() {
            hw.set_count(hw.count().wrapping_add(*m as u16));
            let raw = RawInputs { buttons: [false; 3], encoder_count: hw.count() };
            scanner.scan(raw, t as u32 * 10, &queue);
            while let Some(e) = queue.pop() {
                if let EventKind::EncoderRotated(d) = e.kind {
                    total += i32::from(d);
                }
            }
        }
        prop_assert_eq!(total, moves.iter().map(|&m| i32::from(m)).sum::<i32>());
    }

    /// The queue accepts up to its capacity and hands events back in order.
    #[test]
    fn queue_is_bounded_fifo(n in 0usize..100) {
        let queue: EventQueue = EventQueue::new();
        let accepted = (0..n)
            .filter(|&i| queue.push(InputEvent::new(EventKind::EncoderRotated(1), i as u32)))
            .count();
        prop_assert_eq!(accepted, n.min(EVENT_QUEUE_CAPACITY));

        let mut expected = 0u32;
        while let Some(e) = queue.pop() {
            prop_assert_eq!(e.timestamp, expected);
            expected += 1;
        }
        prop_assert_eq!(expected as usize, accepted);
    }

    /// History stays bounded and exactly one page is entered after every
    /// settled navigation step.
    #[test]
    fn navigation_keeps_one_live_page(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let queue: EventQueue = EventQueue::new();
        let mut screen = Screen::new();
        let mut nav = NavigationEngine::new(Deck::default());
        let mut now = 0u32;
        nav.start(now);

        for op in ops {
            match op {
                Op::Open(id) => {
                    queue.push(InputEvent::new(EventKind::EncoderRotated(i16::from(id)), now));
                }
                Op::Back => {
                    queue.push(InputEvent::new(EventKind::BackPressed, now));
                }
                Op::Home => nav.go_home(now),
            }
            for _ in 0..3 {
                now += TRANSITION_MS;
                nav.poll(now, &queue, &mut screen);
            }

            prop_assert!(nav.history_depth() <= HISTORY_DEPTH);
            prop_assert!(!nav.is_transitioning());
            prop_assert_eq!(&nav.pages().live, &vec![nav.current()]);
        }
    }
}
