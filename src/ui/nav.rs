//! Page navigation engine.
//!
//! Owns which page is current, runs the enter/exit lifecycle, slides
//! between pages and keeps a bounded back-navigation history.
//!
//! ## States
//!
//! - **Idle**: one page is live. Each poll dispatches at most one input
//!   event, runs the page loop and redraws when the page's refresh
//!   interval has elapsed.
//! - **Transitioning**: two pages are live. Both loops run and both are
//!   drawn every poll, offset horizontally, until the slide completes.
//!
//! Switches requested while a slide is in flight are refused, so at most
//! two pages are ever live.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use heapless::Vec;

use super::anim::{progress, round_px};
use super::frame::FrameSink;
use crate::config::{HISTORY_DEPTH, TRANSITION_MS};
use crate::input::{EventQueue, InputEvent};

/// Navigation request returned by a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nav<Id> {
    Stay,
    /// Slide to another page, remembering the current one.
    Push(Id),
    /// Slide back to the most recently remembered page.
    Back,
}

/// A fixed collection of pages addressed by `Id`.
///
/// Implementors dispatch each call to the page named by `id`. Pages are
/// owned for the whole program lifetime; nothing is allocated.
pub trait PageSet {
    type Id: Copy + PartialEq + core::fmt::Debug;

    /// The page shown at boot and after [`NavigationEngine::go_home`].
    fn home(&self) -> Self::Id;

    fn name(&self, id: Self::Id) -> &'static str;

    /// Minimum time between two idle redraws of `id`.
    fn refresh_interval_ms(&self, id: Self::Id) -> u32;

    /// When `id` was last drawn; `None` forces a redraw on the next poll.
    fn last_refresh_ms(&self, id: Self::Id) -> Option<u32>;

    fn set_last_refresh_ms(&mut self, id: Self::Id, at: Option<u32>);

    fn enter(&mut self, id: Self::Id, now_ms: u32);

    fn exit(&mut self, id: Self::Id, now_ms: u32);

    /// Advance the page's own timers and animations.
    fn tick(&mut self, id: Self::Id, now_ms: u32) -> Nav<Self::Id>;

    fn action(&mut self, id: Self::Id, event: &InputEvent, now_ms: u32) -> Nav<Self::Id>;

    fn draw<D>(&self, id: Self::Id, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode<Id> {
    Idle,
    Transitioning { from: Id, to: Id, start_ms: u32 },
}

/// Result of [`NavigationEngine::switch_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchOutcome {
    Started,
    /// The switch started but the history was full, so the page we left
    /// was not recorded.
    StartedWithoutHistory,
    /// Target is already current, or a transition is in flight.
    Refused,
}

impl SwitchOutcome {
    pub fn started(self) -> bool {
        !matches!(self, SwitchOutcome::Refused)
    }
}

/// Horizontal offsets `(from_x, to_x)` of the outgoing and incoming page
/// at `progress` through a slide across `width` pixels.
pub fn slide_offsets(width: i32, progress: f32) -> (i32, i32) {
    let shift = round_px(width as f32 * progress);
    (-shift, width - shift)
}

pub struct NavigationEngine<S: PageSet> {
    pages: S,
    current: S::Id,
    mode: Mode<S::Id>,
    transition_ms: u32,
    history: Vec<S::Id, HISTORY_DEPTH>,
}

impl<S: PageSet> NavigationEngine<S> {
    pub fn new(pages: S) -> Self {
        let current = pages.home();
        Self {
            pages,
            current,
            mode: Mode::Idle,
            transition_ms: TRANSITION_MS,
            history: Vec::new(),
        }
    }

    pub fn with_transition_ms(mut self, transition_ms: u32) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    /// Enter the home page. Call once before the first poll.
    pub fn start(&mut self, now_ms: u32) {
        self.pages.enter(self.current, now_ms);
        self.pages.set_last_refresh_ms(self.current, None);
        info!("Nav: start on {}", self.pages.name(self.current));
    }

    pub fn current(&self) -> S::Id {
        self.current
    }

    pub fn mode(&self) -> Mode<S::Id> {
        self.mode
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.mode, Mode::Transitioning { .. })
    }

    pub fn history(&self) -> &[S::Id] {
        &self.history
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn pages(&self) -> &S {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut S {
        &mut self.pages
    }

    /// Slide to `page`.
    ///
    /// The current page is exited and `page` entered right away, so the
    /// incoming page is fully initialised for every frame of the slide.
    /// With a full history the switch still happens but nothing is
    /// recorded; existing entries are never evicted.
    pub fn switch_to(&mut self, page: S::Id, record_history: bool, now_ms: u32) -> SwitchOutcome {
        if page == self.current || self.is_transitioning() {
            debug!("Nav: switch to {} refused", self.pages.name(page));
            return SwitchOutcome::Refused;
        }

        let mut outcome = SwitchOutcome::Started;
        if record_history && self.history.push(self.current).is_err() {
            warn!("Nav: history full, {} not recorded", self.pages.name(self.current));
            outcome = SwitchOutcome::StartedWithoutHistory;
        }

        let from = self.current;
        self.pages.exit(from, now_ms);
        self.pages.enter(page, now_ms);
        self.mode = Mode::Transitioning {
            from,
            to: page,
            start_ms: now_ms,
        };
        info!("Nav: {} -> {}", self.pages.name(from), self.pages.name(page));
        outcome
    }

    /// Slide back to the most recently recorded page. No-op with an empty
    /// history or while a transition is in flight.
    pub fn go_back(&mut self, now_ms: u32) -> bool {
        if self.is_transitioning() {
            return false;
        }
        match self.history.pop() {
            Some(page) => self.switch_to(page, false, now_ms).started(),
            None => false,
        }
    }

    /// Hard reset to the home page without animation.
    ///
    /// Clears the history and cancels any slide in flight. Used by the
    /// idle timeout, which must not be blocked by navigation state.
    pub fn go_home(&mut self, now_ms: u32) {
        let home = self.pages.home();
        let live = match self.mode {
            Mode::Idle => self.current,
            Mode::Transitioning { to, .. } => to,
        };

        self.history.clear();
        if live != home {
            self.pages.exit(live, now_ms);
            self.pages.enter(home, now_ms);
            info!("Nav: home from {}", self.pages.name(live));
        }
        self.current = home;
        self.mode = Mode::Idle;
        self.pages.set_last_refresh_ms(home, None);
    }

    /// One main-loop step.
    pub fn poll<D: FrameSink, const N: usize>(&mut self, now_ms: u32, queue: &EventQueue<N>, display: &mut D) {
        match self.mode {
            Mode::Transitioning { from, to, start_ms } => {
                self.poll_transition(from, to, start_ms, now_ms, display)
            }
            Mode::Idle => self.poll_idle(now_ms, queue, display),
        }
    }

    fn poll_transition<D: FrameSink>(&mut self, from: S::Id, to: S::Id, start_ms: u32, now_ms: u32, display: &mut D) {
        let p = progress(start_ms, self.transition_ms, now_ms);
        if p >= 1.0 {
            self.current = to;
            self.mode = Mode::Idle;
            self.render(to, now_ms, display);
            return;
        }

        // Requests from either page are dropped until the slide is over.
        let _ = self.pages.tick(from, now_ms);
        let _ = self.pages.tick(to, now_ms);

        let (from_x, to_x) = slide_offsets(display.width(), p);
        display.begin_frame();
        let _ = self.pages.draw(from, display, Point::new(from_x, 0));
        let _ = self.pages.draw(to, display, Point::new(to_x, 0));
        display.end_frame();
    }

    fn poll_idle<D: FrameSink, const N: usize>(&mut self, now_ms: u32, queue: &EventQueue<N>, display: &mut D) {
        if let Some(event) = queue.pop() {
            let nav = self.pages.action(self.current, &event, now_ms);
            if self.apply(nav, now_ms) {
                return;
            }
        }

        let nav = self.pages.tick(self.current, now_ms);
        if self.apply(nav, now_ms) {
            return;
        }

        let due = match self.pages.last_refresh_ms(self.current) {
            None => true,
            Some(at) => now_ms.wrapping_sub(at) >= self.pages.refresh_interval_ms(self.current),
        };
        if due {
            self.render(self.current, now_ms, display);
        }
    }

    /// Returns `true` when a transition started.
    fn apply(&mut self, nav: Nav<S::Id>, now_ms: u32) -> bool {
        match nav {
            Nav::Stay => false,
            Nav::Push(page) => self.switch_to(page, true, now_ms).started(),
            Nav::Back => self.go_back(now_ms),
        }
    }

    fn render<D: FrameSink>(&mut self, id: S::Id, now_ms: u32, display: &mut D) {
        display.begin_frame();
        let _ = self.pages.draw(id, display, Point::zero());
        display.end_frame();
        self.pages.set_last_refresh_ms(id, Some(now_ms));
    }
}
