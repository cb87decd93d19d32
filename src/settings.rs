//! Persistent user settings.
//!
//! The settings live in the external EEPROM as one small record:
//!
//! ```text
//!   [4 magic LE][1 language][1 auto-off][1 dst][1 checksum]
//! ```
//!
//! The checksum is the wrapping byte sum of the three payload bytes.
//! Every save is verified by reading the record back.

use crate::config::{SETTINGS_EEPROM_ADDRESS, SETTINGS_MAGIC};
use crate::devices::Eeprom;
use crate::error::Error;

/// Size of the encoded settings record in bytes.
pub const RECORD_LEN: usize = 8;

/// UI language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    pub const LABELS: [&'static str; 2] = ["English", "Chinese"];

    pub const fn index(self) -> usize {
        match self {
            Language::English => 0,
            Language::Chinese => 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Language::English),
            1 => Some(Language::Chinese),
            _ => None,
        }
    }
}

/// Screen auto-off delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoOff {
    #[default]
    Never,
    Secs30,
    Min1,
    Min5,
    Min10,
}

impl AutoOff {
    pub const LABELS: [&'static str; 5] = ["Never", "30s", "1min", "5min", "10min"];

    const ALL: [AutoOff; 5] = [
        AutoOff::Never,
        AutoOff::Secs30,
        AutoOff::Min1,
        AutoOff::Min5,
        AutoOff::Min10,
    ];

    pub fn index(self) -> usize {
        match self {
            AutoOff::Never => 0,
            AutoOff::Secs30 => 1,
            AutoOff::Min1 => 2,
            AutoOff::Min5 => 3,
            AutoOff::Min10 => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Idle time before the screen turns off, `None` for never.
    pub const fn timeout_ms(self) -> Option<u32> {
        match self {
            AutoOff::Never => None,
            AutoOff::Secs30 => Some(30_000),
            AutoOff::Min1 => Some(60_000),
            AutoOff::Min5 => Some(300_000),
            AutoOff::Min10 => Some(600_000),
        }
    }
}

/// Everything the user can change from the settings menus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub language: Language,
    pub auto_off: AutoOff,
    pub dst_enabled: bool,
}

impl Settings {
    /// Serialize into the on-EEPROM record.
    pub fn serialize(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0..4].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
        buf[4] = self.language.index() as u8;
        buf[5] = self.auto_off.index() as u8;
        buf[6] = u8::from(self.dst_enabled);
        buf[7] = checksum(&buf[4..7]);
        buf
    }

    /// Parse and validate an on-EEPROM record.
    pub fn deserialize(data: &[u8]) -> Result<Self, Error> {
        if data.len() < RECORD_LEN {
            return Err(Error::BufferOverflow);
        }
        let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        if magic != SETTINGS_MAGIC {
            return Err(Error::BadMagic);
        }
        if checksum(&data[4..7]) != data[7] {
            return Err(Error::BadChecksum);
        }

        let language = Language::from_index(usize::from(data[4])).ok_or(Error::InvalidField)?;
        let auto_off = AutoOff::from_index(usize::from(data[5])).ok_or(Error::InvalidField)?;
        let dst_enabled = match data[6] {
            0 => false,
            1 => true,
            _ => return Err(Error::InvalidField),
        };

        Ok(Self {
            language,
            auto_off,
            dst_enabled,
        })
    }
}

fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Where settings are loaded from and saved to.
pub trait SettingsStore {
    fn load(&mut self) -> Result<Settings, Error>;
    fn save(&mut self, settings: &Settings) -> Result<(), Error>;
}

/// Settings record kept in an external EEPROM.
pub struct EepromSettingsStore<E> {
    eeprom: E,
    address: u16,
}

impl<E: Eeprom> EepromSettingsStore<E> {
    pub fn new(eeprom: E) -> Self {
        Self::at(eeprom, SETTINGS_EEPROM_ADDRESS)
    }

    pub fn at(eeprom: E, address: u16) -> Self {
        Self { eeprom, address }
    }

    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }
}

impl<E: Eeprom> SettingsStore for EepromSettingsStore<E> {
    fn load(&mut self) -> Result<Settings, Error> {
        let mut buf = [0u8; RECORD_LEN];
        self.eeprom.read(self.address, &mut buf)?;
        Settings::deserialize(&buf)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), Error> {
        let record = settings.serialize();
        self.eeprom.write(self.address, &record)?;

        let mut readback = [0u8; RECORD_LEN];
        self.eeprom.read(self.address, &mut readback)?;
        if readback != record {
            warn!("Settings: verify failed after write");
            return Err(Error::VerifyMismatch);
        }
        debug!("Settings: saved");
        Ok(())
    }
}

/// Boot-time load. Falls back to defaults (and tries to persist them)
/// when the stored record is missing or corrupt.
///
/// Returns the settings to use and whether the load failed.
pub fn load_or_default<S: SettingsStore + ?Sized>(store: &mut S) -> (Settings, bool) {
    match store.load() {
        Ok(settings) => {
            info!("Settings: loaded");
            (settings, false)
        }
        Err(e) => {
            warn!("Settings: load failed ({}), using defaults", e.as_str());
            let defaults = Settings::default();
            if let Err(e) = store.save(&defaults) {
                error!("Settings: could not write defaults ({})", e.as_str());
            }
            (defaults, true)
        }
    }
}
