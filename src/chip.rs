//! Operation tables registered with the host GPIO and interrupt layers.

use crate::error::{GpioError, GpioResult};
use crate::host::{IrqDomain, PinCtrl, WakeController};
use crate::regs::TriggerType;
use crate::Tegra186Gpio;

/// GPIO consumer operations, keyed by line.
pub trait GpioChip {
    fn request(&self, offset: u32) -> GpioResult;
    fn free(&self, offset: u32);
    fn direction_input(&self, offset: u32) -> GpioResult;
    fn direction_output(&self, offset: u32, value: bool) -> GpioResult;
    fn get(&self, offset: u32) -> GpioResult<bool>;
    fn set(&self, offset: u32, value: bool) -> GpioResult;
    fn set_debounce(&self, offset: u32, usecs: u32) -> GpioResult;
    fn to_irq(&self, offset: u32) -> Option<u32>;
}

/// Interrupt chip operations, keyed by virtual irq.
pub trait IrqChip {
    fn irq_ack(&self, virq: u32) -> GpioResult;
    fn irq_mask(&self, virq: u32) -> GpioResult;
    fn irq_unmask(&self, virq: u32) -> GpioResult;
    /// `flow_type` carries host sense flags, see [`crate::sense`].
    fn irq_set_type(&self, virq: u32, flow_type: u32) -> GpioResult;
    fn irq_set_wake(&self, virq: u32, enable: bool) -> GpioResult;

    fn irq_disable(&self, virq: u32) -> GpioResult {
        self.irq_mask(virq)
    }

    fn irq_shutdown(&self, virq: u32) -> GpioResult {
        self.irq_mask(virq)
    }
}

impl<D: IrqDomain, P: PinCtrl, W: WakeController> GpioChip for Tegra186Gpio<D, P, W> {
    fn request(&self, offset: u32) -> GpioResult {
        Tegra186Gpio::request(self, offset)
    }

    fn free(&self, offset: u32) {
        Tegra186Gpio::free(self, offset)
    }

    fn direction_input(&self, offset: u32) -> GpioResult {
        Tegra186Gpio::direction_input(self, offset)
    }

    fn direction_output(&self, offset: u32, value: bool) -> GpioResult {
        Tegra186Gpio::direction_output(self, offset, value)
    }

    fn get(&self, offset: u32) -> GpioResult<bool> {
        self.get_value(offset)
    }

    fn set(&self, offset: u32, value: bool) -> GpioResult {
        self.set_value(offset, value)
    }

    fn set_debounce(&self, offset: u32, usecs: u32) -> GpioResult {
        Tegra186Gpio::set_debounce(self, offset, usecs)
    }

    fn to_irq(&self, offset: u32) -> Option<u32> {
        Tegra186Gpio::to_irq(self, offset)
    }
}

impl<D: IrqDomain, P: PinCtrl, W: WakeController> Tegra186Gpio<D, P, W> {
    fn hwirq(&self, virq: u32) -> GpioResult<u32> {
        self.domain
            .as_ref()
            .and_then(|d| d.hwirq(virq))
            .ok_or(GpioError::InvalidLine)
    }
}

impl<D: IrqDomain, P: PinCtrl, W: WakeController> IrqChip for Tegra186Gpio<D, P, W> {
    fn irq_ack(&self, virq: u32) -> GpioResult {
        self.ack(self.hwirq(virq)?)
    }

    fn irq_mask(&self, virq: u32) -> GpioResult {
        self.mask(self.hwirq(virq)?)
    }

    fn irq_unmask(&self, virq: u32) -> GpioResult {
        self.unmask(self.hwirq(virq)?)
    }

    fn irq_set_type(&self, virq: u32, flow_type: u32) -> GpioResult {
        let line = self.hwirq(virq)?;
        let trigger = TriggerType::try_from(flow_type)?;
        let flow = self.set_type(line, trigger)?;
        if let Some(domain) = self.domain.as_ref() {
            domain.set_flow_handler(virq, flow);
        }
        Ok(())
    }

    fn irq_set_wake(&self, virq: u32, enable: bool) -> GpioResult {
        self.set_wake(self.hwirq(virq)?, enable)
    }
}
