//! Shared register file.
//!
//! One packed, little-endian block of device state and actuator setpoints.
//! Internal logic uses the named accessors; the host protocol sees the same
//! data as a flat byte space through [`RegisterFile::read`] and
//! [`RegisterFile::write`].
//!
//! ```text
//!  off  field                    width
//!  0    room temperature x100    2  (i16)
//!  2    heater 1 temperature     2  (i16)
//!  4    heater 2 temperature     2  (i16)
//!  6    heater 1 PWM             1
//!  7    heater 2 PWM             1
//!  8    cooler PWM               1
//!  9    connection status        1
//!  10   temperature status       1
//!  11   last conversion time     4  (u32, ms)
//!  15   last communication time  4  (u32, ms)
//! ```
//!
//! ## Bounds quirk
//!
//! `read` rejects `offset >= SIZE` but `write` accepts `offset == SIZE`.
//! That one-past-the-end write lands in a spill byte that no field and no
//! read can observe.

/// Packed size of the register block in bytes.
pub const REGISTER_FILE_SIZE: usize = 19;

/// Link freshness as seen by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionStatus {
    Waiting = 0,
    Connected = 1,
}

impl ConnectionStatus {
    /// Decode a raw register byte.  Values written by the host outside the
    /// known range are not a status at all.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Waiting),
            1 => Some(Self::Connected),
            _ => None,
        }
    }
}

/// Latched thermal safety state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TemperatureStatus {
    LowTemp = 0,
    HighTemp = 1,
    Overheated = 2,
}

impl TemperatureStatus {
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::LowTemp),
            1 => Some(Self::HighTemp),
            2 => Some(Self::Overheated),
            _ => None,
        }
    }
}

/// Named register, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    RoomTemp,
    Heater1Temp,
    Heater2Temp,
    Heater1Pwm,
    Heater2Pwm,
    CoolerPwm,
    ConnectionStatus,
    TemperatureStatus,
    LastConversionTime,
    LastCommunicationTime,
}

impl Register {
    /// Every register, ordered by offset.
    pub const LAYOUT: [Self; 10] = [
        Self::RoomTemp,
        Self::Heater1Temp,
        Self::Heater2Temp,
        Self::Heater1Pwm,
        Self::Heater2Pwm,
        Self::CoolerPwm,
        Self::ConnectionStatus,
        Self::TemperatureStatus,
        Self::LastConversionTime,
        Self::LastCommunicationTime,
    ];

    pub const fn offset(self) -> u8 {
        match self {
            Self::RoomTemp => 0,
            Self::Heater1Temp => 2,
            Self::Heater2Temp => 4,
            Self::Heater1Pwm => 6,
            Self::Heater2Pwm => 7,
            Self::CoolerPwm => 8,
            Self::ConnectionStatus => 9,
            Self::TemperatureStatus => 10,
            Self::LastConversionTime => 11,
            Self::LastCommunicationTime => 15,
        }
    }

    pub const fn width(self) -> u8 {
        match self {
            Self::RoomTemp | Self::Heater1Temp | Self::Heater2Temp => 2,
            Self::Heater1Pwm
            | Self::Heater2Pwm
            | Self::CoolerPwm
            | Self::ConnectionStatus
            | Self::TemperatureStatus => 1,
            Self::LastConversionTime | Self::LastCommunicationTime => 4,
        }
    }

    /// Register containing byte `offset`, with the byte index inside it.
    pub fn at(offset: usize) -> Option<(Self, usize)> {
        Self::LAYOUT.iter().find_map(|&reg| {
            let start = reg.offset() as usize;
            let end = start + reg.width() as usize;
            (start..end).contains(&offset).then(|| (reg, offset - start))
        })
    }
}

/// The device state block.  Exactly one instance exists, owned by the
/// application service and lent to each component in turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    room_temp: i16,
    heater1_temp: i16,
    heater2_temp: i16,
    heater1_pwm: u8,
    heater2_pwm: u8,
    cooler_pwm: u8,
    connection_status: u8,
    temperature_status: u8,
    last_conversion_ms: u32,
    last_communication_ms: u32,
    /// Target of the one-past-the-end write.
    spill: u8,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Byte view (host protocol) ─────────────────────────────

    /// Byte at `offset`, or 0 when `offset` is outside the block.
    pub fn read(&self, offset: usize) -> u8 {
        if offset >= REGISTER_FILE_SIZE {
            return 0;
        }
        match Register::at(offset) {
            Some((reg, idx)) => self.register_bytes(reg)[idx],
            None => 0,
        }
    }

    /// Store `value` at `offset`.  Note the bound is `<=`, not `<`.
    pub fn write(&mut self, offset: usize, value: u8) {
        if offset > REGISTER_FILE_SIZE {
            return;
        }
        let Some((reg, idx)) = Register::at(offset) else {
            self.spill = value;
            return;
        };
        let mut bytes = self.register_bytes(reg);
        bytes[idx] = value;
        self.store_register_bytes(reg, bytes);
    }

    /// The whole block as the host sees it.
    pub fn snapshot(&self) -> [u8; REGISTER_FILE_SIZE] {
        core::array::from_fn(|i| self.read(i))
    }

    fn register_bytes(&self, reg: Register) -> [u8; 4] {
        let mut out = [0u8; 4];
        match reg {
            Register::RoomTemp => out[..2].copy_from_slice(&self.room_temp.to_le_bytes()),
            Register::Heater1Temp => out[..2].copy_from_slice(&self.heater1_temp.to_le_bytes()),
            Register::Heater2Temp => out[..2].copy_from_slice(&self.heater2_temp.to_le_bytes()),
            Register::Heater1Pwm => out[0] = self.heater1_pwm,
            Register::Heater2Pwm => out[0] = self.heater2_pwm,
            Register::CoolerPwm => out[0] = self.cooler_pwm,
            Register::ConnectionStatus => out[0] = self.connection_status,
            Register::TemperatureStatus => out[0] = self.temperature_status,
            Register::LastConversionTime => out = self.last_conversion_ms.to_le_bytes(),
            Register::LastCommunicationTime => out = self.last_communication_ms.to_le_bytes(),
        }
        out
    }

    fn store_register_bytes(&mut self, reg: Register, b: [u8; 4]) {
        match reg {
            Register::RoomTemp => self.room_temp = i16::from_le_bytes([b[0], b[1]]),
            Register::Heater1Temp => self.heater1_temp = i16::from_le_bytes([b[0], b[1]]),
            Register::Heater2Temp => self.heater2_temp = i16::from_le_bytes([b[0], b[1]]),
            Register::Heater1Pwm => self.heater1_pwm = b[0],
            Register::Heater2Pwm => self.heater2_pwm = b[0],
            Register::CoolerPwm => self.cooler_pwm = b[0],
            Register::ConnectionStatus => self.connection_status = b[0],
            Register::TemperatureStatus => self.temperature_status = b[0],
            Register::LastConversionTime => self.last_conversion_ms = u32::from_le_bytes(b),
            Register::LastCommunicationTime => self.last_communication_ms = u32::from_le_bytes(b),
        }
    }

    // ── Named accessors (internal logic) ──────────────────────

    pub fn room_temp(&self) -> i16 {
        self.room_temp
    }

    pub fn set_room_temp(&mut self, centi_c: i16) {
        self.room_temp = centi_c;
    }

    pub fn heater1_temp(&self) -> i16 {
        self.heater1_temp
    }

    pub fn set_heater1_temp(&mut self, centi_c: i16) {
        self.heater1_temp = centi_c;
    }

    pub fn heater2_temp(&self) -> i16 {
        self.heater2_temp
    }

    pub fn set_heater2_temp(&mut self, centi_c: i16) {
        self.heater2_temp = centi_c;
    }

    pub fn heater1_pwm(&self) -> u8 {
        self.heater1_pwm
    }

    pub fn set_heater1_pwm(&mut self, duty: u8) {
        self.heater1_pwm = duty;
    }

    pub fn heater2_pwm(&self) -> u8 {
        self.heater2_pwm
    }

    pub fn set_heater2_pwm(&mut self, duty: u8) {
        self.heater2_pwm = duty;
    }

    pub fn cooler_pwm(&self) -> u8 {
        self.cooler_pwm
    }

    pub fn set_cooler_pwm(&mut self, duty: u8) {
        self.cooler_pwm = duty;
    }

    /// Decoded connection status; `None` if the host wrote garbage.
    pub fn connection_status(&self) -> Option<ConnectionStatus> {
        ConnectionStatus::from_raw(self.connection_status)
    }

    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.connection_status = status as u8;
    }

    /// Decoded temperature status; `None` if the host wrote garbage.
    pub fn temperature_status(&self) -> Option<TemperatureStatus> {
        TemperatureStatus::from_raw(self.temperature_status)
    }

    pub fn set_temperature_status(&mut self, status: TemperatureStatus) {
        self.temperature_status = status as u8;
    }

    pub fn is_overheated(&self) -> bool {
        self.temperature_status() == Some(TemperatureStatus::Overheated)
    }

    pub fn last_conversion_ms(&self) -> u32 {
        self.last_conversion_ms
    }

    pub fn set_last_conversion_ms(&mut self, ms: u32) {
        self.last_conversion_ms = ms;
    }

    pub fn last_communication_ms(&self) -> u32 {
        self.last_communication_ms
    }

    pub fn set_last_communication_ms(&mut self, ms: u32) {
        self.last_communication_ms = ms;
    }
}
