//! Per-line interrupt configuration and the chained demultiplexer.

use bitmaps::Bitmap;

use crate::access::GpioReg;
use crate::consts::MAX_PINS_PER_PORT;
use crate::error::{GpioError, GpioResult};
use crate::host::{IrqDomain, PinCtrl, WakeController};
use crate::regs::{EnableConfig, IrqFlow, TriggerType};
use crate::topology::{self, gpio, PORTS};
use crate::wake::line_to_wake_index;
use crate::Tegra186Gpio;

impl<D: IrqDomain, P: PinCtrl, W: WakeController> Tegra186Gpio<D, P, W> {
    /// Clear a latched interrupt.
    pub fn ack(&self, line: u32) -> GpioResult {
        self.owned_line(line)?;
        self.write(line, GpioReg::IntClear, 1)
    }

    pub fn mask(&self, line: u32) -> GpioResult {
        self.owned_line(line)?;
        self.update(line, GpioReg::EnbConfig, EnableConfig::INTERRUPT.bits(), 0)
    }

    pub fn unmask(&self, line: u32) -> GpioResult {
        self.owned_line(line)?;
        let bit = EnableConfig::INTERRUPT.bits();
        self.update(line, GpioReg::EnbConfig, bit, bit)
    }

    /// Program the trigger of `line` and enable it.
    ///
    /// Returns the flow handler the host must switch the line to. Lines
    /// wired to a wake source forward the trigger to the power-management
    /// controller.
    pub fn set_type(&self, line: u32, trigger: TriggerType) -> GpioResult<IrqFlow> {
        self.owned_line(line)?;
        self.modify(line, GpioReg::EnbConfig, |cfg| {
            let cfg = EnableConfig::from_bits_retain(cfg).difference(EnableConfig::TRIGGER);
            cfg.union(trigger.config()).bits()
        })?;
        let bit = EnableConfig::ENABLE.bits();
        self.update(line, GpioReg::EnbConfig, bit, bit)?;

        if let Some(wake) = line_to_wake_index(line) {
            if let Err(e) = self.wake.set_wake_type(wake, trigger) {
                warn!("gpio {}: wake{} type update failed: {:?}", line, wake, e);
            }
        }
        Ok(trigger.flow())
    }

    /// Arm or disarm the wake source wired to `line`.
    pub fn set_wake(&self, line: u32, enable: bool) -> GpioResult {
        let wake = line_to_wake_index(line).ok_or(GpioError::NoWakeSource)?;
        self.wake.set_wake(wake, enable).map_err(|e| {
            error!(
                "Failed gpio lp0 {} for gpio={}, error={:?}",
                if enable { "enable" } else { "disable" },
                line,
                e
            );
            GpioError::CollaboratorFailure(e)
        })
    }

    /// Demultiplex the parent interrupt of `controller`.
    ///
    /// Reads the status word of every port the controller owns and runs the
    /// virtual irq of each pending pin, ports in controller-local order and
    /// pins ascending. Only register reads and dispatch calls happen here.
    pub fn handle_chained_irq(&self, controller: u8) {
        let Some(cont) = self.controller(controller) else {
            warn!("chained irq for unknown gpio controller {}", controller);
            return;
        };
        let Some(domain) = self.domain.as_ref() else {
            return;
        };

        let port_map = topology::controller_ports(controller);
        domain.chained_enter(cont.irq);
        for port in port_map.into_iter().flatten() {
            let Some(bank) = self.bank(PORTS[port].bank) else {
                continue;
            };
            let Ok(status) = bank.read32(topology::status_offset(port)) else {
                continue;
            };
            let pending = Bitmap::<MAX_PINS_PER_PORT>::from_value(status as u8);
            for pin in &pending {
                if let Some(virq) = domain.find_mapping(gpio(port, pin)) {
                    domain.generic_handle_irq(virq);
                }
            }
        }
        domain.chained_exit(cont.irq);
    }
}
