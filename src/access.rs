//! Register addressing, raw access and the security gate.

use crate::consts::*;
use crate::error::{GpioError, GpioResult};
use crate::host::{IrqDomain, PinCtrl, WakeController};
use crate::regs::ScrAccess;
use crate::topology::{self, LineLocation};
use crate::{RegisterBank, Tegra186Gpio};

/// The per-pin registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioReg {
    EnbConfig,
    DbcThres,
    Input,
    OutCtrl,
    OutVal,
    IntClear,
}

impl GpioReg {
    pub const ALL: [GpioReg; 6] = [
        Self::EnbConfig,
        Self::DbcThres,
        Self::Input,
        Self::OutCtrl,
        Self::OutVal,
        Self::IntClear,
    ];

    pub const fn offset(self) -> usize {
        match self {
            Self::EnbConfig => GPIO_ENB_CONFIG_REG,
            Self::DbcThres => GPIO_DBC_THRES_REG,
            Self::Input => GPIO_INPUT_REG,
            Self::OutCtrl => GPIO_OUT_CTRL_REG,
            Self::OutVal => GPIO_OUT_VAL_REG,
            Self::IntClear => GPIO_INT_CLEAR_REG,
        }
    }
}

impl<D: IrqDomain, P: PinCtrl, W: WakeController> Tegra186Gpio<D, P, W> {
    /// Resolve a line that physically exists.
    pub(crate) fn valid_line(&self, line: u32) -> GpioResult<LineLocation> {
        match topology::resolve(line) {
            Some(loc) if loc.valid => Ok(loc),
            _ => Err(GpioError::InvalidLine),
        }
    }

    /// Resolve a line this domain fully owns.
    pub(crate) fn owned_line(&self, line: u32) -> GpioResult<LineLocation> {
        let loc = self.valid_line(line)?;
        if !self.scr_grants(&loc) {
            return Err(GpioError::Inaccessible);
        }
        Ok(loc)
    }

    fn line_bank(&self, loc: &LineLocation) -> GpioResult<&RegisterBank> {
        self.bank(loc.bank).ok_or(GpioError::InvalidLine)
    }

    fn scr_grants(&self, loc: &LineLocation) -> bool {
        self.line_bank(loc)
            .and_then(|bank| bank.read32(loc.scr_offset))
            .map(ScrAccess::is_full)
            .unwrap_or(false)
    }

    /// Whether the executing domain holds full read/write access to `line`.
    pub fn is_accessible(&self, line: u32) -> bool {
        self.valid_line(line)
            .map(|loc| self.scr_grants(&loc))
            .unwrap_or(false)
    }

    /// Virtual address of `reg` for `line`.
    pub fn register_address(&self, line: u32, reg: GpioReg) -> GpioResult<usize> {
        let loc = self.valid_line(line)?;
        Ok(self.line_bank(&loc)?.addr(loc.reg_offset + reg.offset()))
    }

    pub fn read(&self, line: u32, reg: GpioReg) -> GpioResult<u32> {
        let loc = self.valid_line(line)?;
        self.line_bank(&loc)?.read32(loc.reg_offset + reg.offset())
    }

    pub fn write(&self, line: u32, reg: GpioReg, val: u32) -> GpioResult {
        let loc = self.valid_line(line)?;
        self.line_bank(&loc)?.write32(loc.reg_offset + reg.offset(), val)
    }

    /// Read-modify-write under the port lock, returning the new value.
    pub(crate) fn modify(
        &self,
        line: u32,
        reg: GpioReg,
        f: impl FnOnce(u32) -> u32,
    ) -> GpioResult<u32> {
        let loc = self.valid_line(line)?;
        let bank = self.line_bank(&loc)?;
        let offset = loc.reg_offset + reg.offset();
        let _guard = self.port_locks[loc.port].lock();
        let val = f(bank.read32(offset)?);
        bank.write32(offset, val)?;
        Ok(val)
    }

    /// Replace the `mask` bits of `reg` with those of `val`.
    pub fn update(&self, line: u32, reg: GpioReg, mask: u32, val: u32) -> GpioResult {
        self.modify(line, reg, |old| (old & !mask) | (val & mask))
            .map(|_| ())
    }
}
