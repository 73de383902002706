// Register layout of the Tegra186 GPIO controller (main and AON instances).

/// Number of hardware GPIO controllers, each with one interrupt output.
pub const MAX_GPIO_CONTROLLERS: usize = 7;

/// Maximum number of ports a single controller aggregates.
pub const MAX_GPIO_PORTS: usize = 8;

/// Number of ports in the global line space.
pub const MAX_PORTS: usize = 32;

/// Lines per port. A line decomposes into `(line / 8, line % 8)`.
pub const MAX_PINS_PER_PORT: usize = 8;

/// Size of the flat line space exported to the host.
pub const NUM_LINES: usize = MAX_PORTS * MAX_PINS_PER_PORT;

/// Upper bound on mapped register banks in a platform descriptor.
pub const MAX_BANKS: usize = 4;

/// Number of wake sources routed to the power-management controller.
pub const NUM_WAKE_SOURCES: usize = 96;

// --- Per-pin register block (relative to the port block + pin * GPIO_REG_DIFF) ---

/// Enable/config register: enable, direction, trigger, debounce and irq bits.
pub const GPIO_ENB_CONFIG_REG: usize = 0x00;

/// Debounce threshold in milliseconds, low 8 bits.
pub const GPIO_DBC_THRES_REG: usize = 0x04;

/// Input level, bit 0.
pub const GPIO_INPUT_REG: usize = 0x08;

/// Output control, bit 0 set means the hardware drive value is not used.
pub const GPIO_OUT_CTRL_REG: usize = 0x0c;

/// Output level, bit 0.
pub const GPIO_OUT_VAL_REG: usize = 0x10;

/// Write 1 to clear a latched interrupt.
pub const GPIO_INT_CLEAR_REG: usize = 0x14;

/// Stride between the register blocks of two consecutive pins.
pub const GPIO_REG_DIFF: usize = 0x20;

/// Largest threshold the debounce register can hold, in milliseconds.
pub const GPIO_DBC_THRES_MAX_MS: u32 = 0xff;

// --- Interrupt status ---

/// Offset of the interrupt status region inside a port block.
pub const GPIO_INT_STATUS_OFFSET: usize = 0x100;

/// Offset of the status word for the CPU interrupt group inside that region.
pub const GPIO_STATUS_G1: usize = 0x04;

// --- Security control ---

/// Offset of the security-control register inside a pin's security slot.
pub const GPIO_SCR_REG: usize = 0x04;

/// Stride between two pins' security slots.
pub const GPIO_SCR_DIFF: usize = 0x08;

/// Stride between two ports' security blocks within a controller.
pub const GPIO_SCR_BASE_DIFF: usize = 0x40;

// --- Topology strides ---

/// Stride between two controllers' blocks in the main bank.
pub const GPIO_CONTROLLERS_DIFF: usize = 0x1000;

/// Stride between two ports' data register blocks within a controller.
pub const GPIO_PORT_DIFF: usize = 0x200;

/// Start of the data register blocks in the main bank.
pub const GPIO_MAIN_REG_BASE: usize = 0x10000;

/// Start of the data register blocks in the always-on bank.
pub const GPIO_AON_REG_BASE: usize = 0x1000;
