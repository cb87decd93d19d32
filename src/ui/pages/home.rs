use core::fmt::Write as _;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;
use profont::PROFONT_24_POINT;

use super::{Context, Page, PageId};
use crate::calendar::DateTime;
use crate::config::{CLIMATE_REFRESH_MS, HOME_REFRESH_MS, LOAD_FAILED_MESSAGE_MS};
use crate::devices::Climate;
use crate::input::{EventKind, InputEvent};
use crate::ui::draw::{centered, styled, text_style};
use crate::ui::message::Message;
use crate::ui::nav::Nav;

pub const LOAD_FAILED: &str = "Settings load failed";

/// Clock face: time, date, weekday and climate.
pub struct HomePage {
    time: DateTime,
    time_read_ms: Option<u32>,
    climate: Option<Climate>,
    climate_read_ms: Option<u32>,
    message: Option<Message>,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePage {
    pub const fn new() -> Self {
        Self {
            time: DateTime {
                year: 2000,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
                weekday: 6,
            },
            time_read_ms: None,
            climate: None,
            climate_read_ms: None,
            message: None,
        }
    }

    /// Displayed (DST-adjusted) time.
    pub fn time(&self) -> &DateTime {
        &self.time
    }

    pub fn climate(&self) -> Option<Climate> {
        self.climate
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn due(last: Option<u32>, interval_ms: u32, now_ms: u32) -> bool {
        match last {
            None => true,
            Some(at) => now_ms.wrapping_sub(at) >= interval_ms,
        }
    }

    fn refresh(&mut self, ctx: &mut Context<'_>) {
        if Self::due(self.time_read_ms, HOME_REFRESH_MS, ctx.now_ms) {
            self.time_read_ms = Some(ctx.now_ms);
            match ctx.clock.get_time() {
                Ok(raw) => self.time = raw.local(ctx.settings.dst_enabled),
                Err(e) => warn!("Home: RTC read failed ({})", e.as_str()),
            }
        }

        if Self::due(self.climate_read_ms, CLIMATE_REFRESH_MS, ctx.now_ms) {
            self.climate_read_ms = Some(ctx.now_ms);
            match ctx.sensor.read() {
                Ok(c) => {
                    debug!("Home: T={} H={}", c.temperature_c, c.humidity_pct);
                    self.climate = Some(c);
                }
                Err(e) => warn!("Home: sensor read failed ({})", e.as_str()),
            }
        }
    }

    pub fn draw<D>(&self, target: &mut D, offset: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let t = &self.time;

        let mut clock: String<12> = String::new();
        let _ = write!(clock, "{:02}:{:02}:{:02}", t.hour, t.minute, t.second);
        let big = styled(&PROFONT_24_POINT, BinaryColor::On);
        Text::with_text_style(&clock, Point::new(64, 18) + offset, big, centered()).draw(target)?;

        let mut date: String<20> = String::new();
        let _ = write!(date, "{:04}-{:02}-{:02}  {}", t.year, t.month, t.day, t.weekday_name());
        Text::with_text_style(&date, Point::new(64, 42) + offset, text_style(), centered()).draw(target)?;

        let mut climate: String<24> = String::new();
        let _ = match self.climate {
            Some(c) => write!(climate, "T:{:.1}C H:{:.1}%", c.temperature_c, c.humidity_pct),
            None => write!(climate, "T:--.-C H:--.-%"),
        };
        Text::with_text_style(&climate, Point::new(64, 56) + offset, text_style(), centered()).draw(target)?;

        if let Some(m) = &self.message {
            m.draw(target, offset)?;
        }
        Ok(())
    }
}

impl Page for HomePage {
    fn name(&self) -> &'static str {
        "Home"
    }

    fn refresh_interval_ms(&self) -> u32 {
        HOME_REFRESH_MS
    }

    fn on_enter(&mut self, ctx: &mut Context<'_>) {
        self.time_read_ms = None;
        self.climate_read_ms = None;
        if *ctx.load_failed {
            *ctx.load_failed = false;
            self.message = Some(Message::new(LOAD_FAILED, ctx.now_ms, LOAD_FAILED_MESSAGE_MS));
        }
        self.refresh(ctx);
    }

    fn on_loop(&mut self, ctx: &mut Context<'_>) -> Nav<PageId> {
        if self.message.is_some_and(|m| m.is_expired(ctx.now_ms)) {
            self.message = None;
        }
        self.refresh(ctx);
        Nav::Stay
    }

    fn on_action(&mut self, event: &InputEvent, _ctx: &mut Context<'_>) -> Nav<PageId> {
        match event.kind {
            EventKind::ConfirmPressed => Nav::Push(PageId::MainMenu),
            _ => Nav::Stay,
        }
    }
}
