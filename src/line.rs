use crate::access::GpioReg;
use crate::consts::GPIO_DBC_THRES_MAX_MS;
use crate::error::{GpioError, GpioResult};
use crate::host::{IrqDomain, PinCtrl, WakeController};
use crate::regs::EnableConfig;
use crate::Tegra186Gpio;

/// GPIO mode of an accessible line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    /// The enable bit of the config register.
    pub enabled: bool,
    /// Raw output-control register.
    pub output_control: u32,
}

/// The six per-pin registers of one line, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub enb_config: u32,
    pub dbc_thres: u32,
    pub input: u32,
    pub out_ctrl: u32,
    pub out_val: u32,
    pub int_clear: u32,
}

impl<D: IrqDomain, P: PinCtrl, W: WakeController> Tegra186Gpio<D, P, W> {
    fn set_enabled(&self, line: u32, enable: bool) -> GpioResult {
        let bit = EnableConfig::ENABLE.bits();
        self.update(line, GpioReg::EnbConfig, bit, if enable { bit } else { 0 })
    }

    fn set_direction_mode(&self, line: u32, output: bool) -> GpioResult {
        let bit = EnableConfig::OUTPUT.bits();
        self.update(line, GpioReg::EnbConfig, bit, if output { bit } else { 0 })
    }

    /// Claim `line` through pin control.
    ///
    /// Lines this domain cannot access, including nonexistent ones, report
    /// [`GpioError::Busy`].
    pub fn request(&self, line: u32) -> GpioResult {
        self.owned_line(line).map_err(|_| GpioError::Busy)?;
        self.pinctrl
            .request_gpio(line)
            .map_err(GpioError::CollaboratorFailure)
    }

    /// Release `line` and disable it. Never fails.
    pub fn free(&self, line: u32) {
        self.pinctrl.free_gpio(line);
        if self.owned_line(line).is_ok() {
            if let Err(e) = self.set_enabled(line, false) {
                debug!("gpio {}: disable on free failed: {:?}", line, e);
            }
        }
    }

    pub fn direction_input(&self, line: u32) -> GpioResult {
        self.owned_line(line)?;
        self.set_direction_mode(line, false)?;
        self.set_enabled(line, true)?;
        if let Err(e) = self.pinctrl.direction_input(line) {
            error!("gpio {}: pinctrl input failed: {:?}", line, e);
        }
        Ok(())
    }

    /// Drive `value` and switch `line` to output. The level is committed
    /// before the direction bit flips.
    pub fn direction_output(&self, line: u32, value: bool) -> GpioResult {
        self.set_value(line, value)?;
        self.set_direction_mode(line, true)?;
        self.set_enabled(line, true)?;
        if let Err(e) = self.pinctrl.direction_output(line) {
            error!("gpio {}: pinctrl output failed: {:?}", line, e);
        }
        Ok(())
    }

    /// Output level for output lines, input level otherwise.
    pub fn get_value(&self, line: u32) -> GpioResult<bool> {
        self.owned_line(line)?;
        let cfg = EnableConfig::from_bits_retain(self.read(line, GpioReg::EnbConfig)?);
        let reg = if cfg.contains(EnableConfig::OUTPUT) {
            GpioReg::OutVal
        } else {
            GpioReg::Input
        };
        Ok(self.read(line, reg)? & 0x1 != 0)
    }

    pub fn set_value(&self, line: u32, value: bool) -> GpioResult {
        self.owned_line(line)?;
        self.write(line, GpioReg::OutVal, value as u32)?;
        self.write(line, GpioReg::OutCtrl, 0)
    }

    /// Program a debounce window of `usecs`, rounded up to whole milliseconds.
    pub fn set_debounce(&self, line: u32, usecs: u32) -> GpioResult {
        self.owned_line(line)?;
        let ms = usecs.div_ceil(1000);
        if ms > GPIO_DBC_THRES_MAX_MS {
            return Err(GpioError::InvalidArgument);
        }
        let bits = (EnableConfig::ENABLE | EnableConfig::DEBOUNCE).bits();
        self.update(line, GpioReg::EnbConfig, bits, bits)?;
        self.write(line, GpioReg::DbcThres, ms)
    }

    /// Virtual irq of `line`, if the irq domain exists.
    pub fn to_irq(&self, line: u32) -> Option<u32> {
        self.domain.as_ref()?.find_mapping(line)
    }

    /// Enable bit and output control of an accessible line.
    pub fn is_enabled(&self, line: u32) -> Option<LineState> {
        self.owned_line(line).ok()?;
        let cfg = self.read(line, GpioReg::EnbConfig).ok()?;
        Some(LineState {
            enabled: cfg & EnableConfig::ENABLE.bits() != 0,
            output_control: self.read(line, GpioReg::OutCtrl).ok()?,
        })
    }

    /// All registers of an accessible line.
    pub fn read_registers(&self, line: u32) -> Option<RegisterSnapshot> {
        self.owned_line(line).ok()?;
        let mut vals = [0; GpioReg::ALL.len()];
        for (val, reg) in vals.iter_mut().zip(GpioReg::ALL) {
            *val = self.read(line, reg).ok()?;
        }
        let [enb_config, dbc_thres, input, out_ctrl, out_val, int_clear] = vals;
        Some(RegisterSnapshot {
            enb_config,
            dbc_thres,
            input,
            out_ctrl,
            out_val,
            int_clear,
        })
    }
}
