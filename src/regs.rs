//! Typed views of the bit-packed per-pin registers.

use bitflags::bitflags;

use crate::error::GpioError;

bitflags! {
    /// Fields of the enable/config register (`GPIO_ENB_CONFIG_REG`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EnableConfig: u32 {
        /// Pin is driven by the GPIO controller.
        const ENABLE = 1 << 0;
        /// Set for output, clear for input.
        const OUTPUT = 1 << 1;
        /// Two-bit trigger level kind, see [`TriggerKind`].
        const TRIGGER_KIND = 0b11 << 2;
        /// Trigger polarity, set for high/rising.
        const TRIGGER_HIGH = 1 << 4;
        /// Debounce function enable.
        const DEBOUNCE = 1 << 5;
        /// Interrupt function enable.
        const INTERRUPT = 1 << 6;

        /// Every bit programmed by `set_type`.
        const TRIGGER = Self::TRIGGER_KIND.bits() | Self::TRIGGER_HIGH.bits();
    }
}

bitflags! {
    /// Grant bits of the per-pin security-control register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScrAccess: u32 {
        /// Group 1 read enable.
        const G1R = 1 << 1;
        /// Group 1 write enable.
        const G1W = 1 << 9;
        /// Secure read enable.
        const SEC_REN = 1 << 27;
        /// Secure write enable.
        const SEC_WEN = 1 << 28;

        /// Grants required before the CPU may touch a pin.
        const FULL_ACCESS = Self::G1R.bits()
            | Self::G1W.bits()
            | Self::SEC_REN.bits()
            | Self::SEC_WEN.bits();
    }
}

impl ScrAccess {
    /// Whether every grant the executing domain needs is present.
    pub fn is_full(raw: u32) -> bool {
        Self::from_bits_truncate(raw).contains(Self::FULL_ACCESS)
    }
}

/// Trigger level kind, bits 2..=3 of the enable/config register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TriggerKind {
    NoTrigger = 0,
    Level = 1,
    SingleEdge = 2,
    BothEdge = 3,
}

impl TriggerKind {
    const SHIFT: u32 = 2;

    pub const fn bits(self) -> u32 {
        (self as u32) << Self::SHIFT
    }

    pub fn from_config(cfg: EnableConfig) -> Self {
        match (cfg & EnableConfig::TRIGGER_KIND).bits() >> Self::SHIFT {
            0 => Self::NoTrigger,
            1 => Self::Level,
            2 => Self::SingleEdge,
            _ => Self::BothEdge,
        }
    }
}

/// Interrupt sense flags as passed by the host interrupt layer.
pub mod sense {
    pub const EDGE_RISING: u32 = 0x1;
    pub const EDGE_FALLING: u32 = 0x2;
    pub const EDGE_BOTH: u32 = EDGE_RISING | EDGE_FALLING;
    pub const LEVEL_HIGH: u32 = 0x4;
    pub const LEVEL_LOW: u32 = 0x8;
    pub const SENSE_MASK: u32 = 0xf;
}

/// Flow handler the host must use for a line after `set_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqFlow {
    /// Installed for every line at domain creation.
    Simple,
    /// Re-check pending state after ack.
    Level,
    /// A single ack per event.
    Edge,
}

/// The five trigger types the controller supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerType {
    EdgeRising,
    EdgeFalling,
    EdgeBoth,
    LevelHigh,
    LevelLow,
}

impl TriggerType {
    /// Enable/config bits selecting this trigger. Both-edge keeps polarity low.
    pub fn config(self) -> EnableConfig {
        let (kind, high) = match self {
            Self::EdgeRising => (TriggerKind::SingleEdge, true),
            Self::EdgeFalling => (TriggerKind::SingleEdge, false),
            Self::EdgeBoth => (TriggerKind::BothEdge, false),
            Self::LevelHigh => (TriggerKind::Level, true),
            Self::LevelLow => (TriggerKind::Level, false),
        };
        let mut cfg = EnableConfig::from_bits_retain(kind.bits());
        cfg.set(EnableConfig::TRIGGER_HIGH, high);
        cfg
    }

    pub fn flow(self) -> IrqFlow {
        match self {
            Self::LevelHigh | Self::LevelLow => IrqFlow::Level,
            Self::EdgeRising | Self::EdgeFalling | Self::EdgeBoth => IrqFlow::Edge,
        }
    }

    /// Host sense flags for this trigger.
    pub fn to_raw(self) -> u32 {
        match self {
            Self::EdgeRising => sense::EDGE_RISING,
            Self::EdgeFalling => sense::EDGE_FALLING,
            Self::EdgeBoth => sense::EDGE_BOTH,
            Self::LevelHigh => sense::LEVEL_HIGH,
            Self::LevelLow => sense::LEVEL_LOW,
        }
    }
}

impl TryFrom<u32> for TriggerType {
    type Error = GpioError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw & sense::SENSE_MASK {
            sense::EDGE_RISING => Ok(Self::EdgeRising),
            sense::EDGE_FALLING => Ok(Self::EdgeFalling),
            sense::EDGE_BOTH => Ok(Self::EdgeBoth),
            sense::LEVEL_HIGH => Ok(Self::LevelHigh),
            sense::LEVEL_LOW => Ok(Self::LevelLow),
            _ => Err(GpioError::UnsupportedTriggerType),
        }
    }
}
