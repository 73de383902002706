use spin::Mutex;

use crate::consts::{MAX_GPIO_PORTS, MAX_PINS_PER_PORT};

/// Slots per controller, indexed by `local_port * MAX_PINS_PER_PORT + pin`.
pub const CONTEXT_SLOTS: usize = MAX_GPIO_PORTS * MAX_PINS_PER_PORT;

/// Register snapshot slots of one controller.
///
/// Left zeroed by this crate; kept for suspend/resume context save in the
/// power-management layer.
pub struct ControllerContext {
    pub cnf: [u32; CONTEXT_SLOTS],
    pub dbc: [u32; CONTEXT_SLOTS],
    pub out_ctrl: [u32; CONTEXT_SLOTS],
    pub out_val: [u32; CONTEXT_SLOTS],
}

impl ControllerContext {
    const fn new() -> Self {
        Self {
            cnf: [0; CONTEXT_SLOTS],
            dbc: [0; CONTEXT_SLOTS],
            out_ctrl: [0; CONTEXT_SLOTS],
            out_val: [0; CONTEXT_SLOTS],
        }
    }
}

/// A hardware GPIO controller and its parent interrupt.
pub struct GpioController {
    pub id: u8,
    /// Parent interrupt line assigned by the platform.
    pub irq: u32,
    pub context: Mutex<ControllerContext>,
}

impl GpioController {
    pub fn new(id: u8, irq: u32) -> Self {
        Self {
            id,
            irq,
            context: Mutex::new(ControllerContext::new()),
        }
    }
}
