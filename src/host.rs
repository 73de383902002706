//! Interfaces of the host facilities this core calls out to.

use axerrno::AxResult;

use crate::regs::{IrqFlow, TriggerType};

/// Host interrupt routing: the line <-> virtual irq mapping, flow handler
/// selection and dispatch.
pub trait IrqDomain {
    /// Map `hwirq` (a global line) to a virtual irq. `None` on failure.
    fn create_mapping(&self, hwirq: u32) -> Option<u32>;

    fn find_mapping(&self, hwirq: u32) -> Option<u32>;

    /// Reverse lookup, virtual irq to line.
    fn hwirq(&self, virq: u32) -> Option<u32>;

    fn dispose_mapping(&self, virq: u32);

    fn set_flow_handler(&self, virq: u32, flow: IrqFlow);

    /// Register the chained handler for a controller's parent interrupt. The
    /// host calls [`crate::Tegra186Gpio::handle_chained_irq`] with
    /// `controller` when `parent_irq` fires, never concurrently for the same
    /// line.
    fn set_chained_handler(&self, parent_irq: u32, controller: u8);

    /// Run the handler of a virtual irq.
    fn generic_handle_irq(&self, virq: u32);

    fn chained_enter(&self, _parent_irq: u32) {}

    fn chained_exit(&self, _parent_irq: u32) {}
}

/// Pin multiplexing and electrical configuration.
pub trait PinCtrl {
    fn request_gpio(&self, line: u32) -> AxResult;

    fn free_gpio(&self, line: u32);

    fn direction_input(&self, line: u32) -> AxResult;

    fn direction_output(&self, line: u32) -> AxResult;
}

/// Power-management controller wake logic.
pub trait WakeController {
    fn set_wake_type(&self, wake: usize, trigger: TriggerType) -> AxResult;

    fn set_wake(&self, wake: usize, enable: bool) -> AxResult;

    /// Publish the wake index -> line table, lines offset by `base`.
    fn update_wakeup_table(&self, base: u32, table: &[Option<u32>]);
}
