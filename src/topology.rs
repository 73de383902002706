//! Static port topology of the Tegra186 GPIO controllers.
//!
//! Ports `A`..`FF` occupy indices `0..32` of the global port space. Main
//! ports live in bank 0, where every controller owns a `0x1000` block and
//! every port a `0x200` block starting at `0x10000`. Always-on ports
//! belong to controller 6 and live in bank 1.

use crate::consts::*;

/// Which mapped register region a port lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegBank {
    Main = 0,
    Aon = 1,
}

impl RegBank {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Static description of one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortInfo {
    pub name: &'static str,
    /// Owning controller, `None` for unimplemented ports.
    pub controller: Option<u8>,
    /// Position of the port within its controller.
    pub controller_index: u8,
    pub valid_pins: u8,
    pub bank: RegBank,
    /// Byte offset of the security-control block within `bank`.
    pub scr_offset: usize,
    /// Byte offset of the data register block within `bank`.
    pub reg_offset: usize,
}

impl PortInfo {
    const fn main(name: &'static str, cid: u8, cind: u8, npins: u8) -> Self {
        Self {
            name,
            controller: Some(cid),
            controller_index: cind,
            valid_pins: npins,
            bank: RegBank::Main,
            scr_offset: cid as usize * GPIO_CONTROLLERS_DIFF + cind as usize * GPIO_SCR_BASE_DIFF,
            reg_offset: GPIO_MAIN_REG_BASE
                + cid as usize * GPIO_CONTROLLERS_DIFF
                + cind as usize * GPIO_PORT_DIFF,
        }
    }

    const fn aon(name: &'static str, cid: u8, cind: u8, npins: u8) -> Self {
        Self {
            name,
            controller: Some(cid),
            controller_index: cind,
            valid_pins: npins,
            bank: RegBank::Aon,
            scr_offset: cind as usize * GPIO_SCR_BASE_DIFF,
            reg_offset: GPIO_AON_REG_BASE + cind as usize * GPIO_PORT_DIFF,
        }
    }

    const fn unimplemented(name: &'static str) -> Self {
        Self {
            name,
            controller: None,
            controller_index: 0,
            valid_pins: 0,
            bank: RegBank::Main,
            scr_offset: 0,
            reg_offset: 0,
        }
    }
}

pub const PORT_A: usize = 0;
pub const PORT_B: usize = 1;
pub const PORT_C: usize = 2;
pub const PORT_D: usize = 3;
pub const PORT_E: usize = 4;
pub const PORT_F: usize = 5;
pub const PORT_G: usize = 6;
pub const PORT_H: usize = 7;
pub const PORT_I: usize = 8;
pub const PORT_J: usize = 9;
pub const PORT_K: usize = 10;
pub const PORT_L: usize = 11;
pub const PORT_M: usize = 12;
pub const PORT_N: usize = 13;
pub const PORT_O: usize = 14;
pub const PORT_P: usize = 15;
pub const PORT_Q: usize = 16;
pub const PORT_R: usize = 17;
pub const PORT_S: usize = 18;
pub const PORT_T: usize = 19;
pub const PORT_U: usize = 20;
pub const PORT_V: usize = 21;
pub const PORT_W: usize = 22;
pub const PORT_X: usize = 23;
pub const PORT_Y: usize = 24;
pub const PORT_Z: usize = 25;
pub const PORT_AA: usize = 26;
pub const PORT_BB: usize = 27;
pub const PORT_CC: usize = 28;
pub const PORT_DD: usize = 29;
pub const PORT_EE: usize = 30;
pub const PORT_FF: usize = 31;

/// Global line number of `pin` in `port`.
pub const fn gpio(port: usize, pin: usize) -> u32 {
    (port * MAX_PINS_PER_PORT + pin) as u32
}

pub static PORTS: [PortInfo; MAX_PORTS] = [
    PortInfo::main("A", 2, 0, 7),
    PortInfo::main("B", 3, 0, 7),
    PortInfo::main("C", 3, 1, 7),
    PortInfo::main("D", 3, 2, 6),
    PortInfo::main("E", 2, 1, 8),
    PortInfo::main("F", 2, 2, 6),
    PortInfo::main("G", 4, 1, 6),
    PortInfo::main("H", 1, 0, 7),
    PortInfo::main("I", 0, 4, 8),
    PortInfo::main("J", 5, 0, 8),
    PortInfo::main("K", 5, 1, 1),
    PortInfo::main("L", 1, 1, 8),
    PortInfo::main("M", 5, 3, 6),
    PortInfo::main("N", 0, 0, 7),
    PortInfo::main("O", 0, 1, 4),
    PortInfo::main("P", 4, 0, 7),
    PortInfo::main("Q", 0, 2, 6),
    PortInfo::main("R", 0, 5, 6),
    PortInfo::aon("S", 6, 1, 5),
    PortInfo::main("T", 0, 3, 4),
    PortInfo::aon("U", 6, 2, 6),
    PortInfo::aon("V", 6, 4, 8),
    PortInfo::aon("W", 6, 5, 8),
    PortInfo::main("X", 1, 2, 8),
    PortInfo::main("Y", 1, 3, 7),
    PortInfo::aon("Z", 6, 7, 4),
    PortInfo::aon("AA", 6, 6, 8),
    PortInfo::main("BB", 2, 3, 2),
    PortInfo::main("CC", 5, 2, 4),
    PortInfo::unimplemented("DD"),
    PortInfo::aon("EE", 6, 3, 3),
    PortInfo::aon("FF", 6, 0, 5),
];

/// Where a line's registers are, as resolved from [`PORTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLocation {
    pub port: usize,
    pub pin: usize,
    pub bank: RegBank,
    /// Byte offset of this pin's data registers within `bank`.
    pub reg_offset: usize,
    /// Byte offset of this pin's security-control register within `bank`.
    pub scr_offset: usize,
    pub controller: Option<u8>,
    pub valid: bool,
}

/// Resolve a global line. Returns `None` only when the line is outside the
/// line space; lines of unimplemented ports resolve with `valid == false`.
pub fn resolve(line: u32) -> Option<LineLocation> {
    let line = line as usize;
    let port = line / MAX_PINS_PER_PORT;
    let pin = line % MAX_PINS_PER_PORT;
    let info = PORTS.get(port)?;
    Some(LineLocation {
        port,
        pin,
        bank: info.bank,
        reg_offset: info.reg_offset + pin * GPIO_REG_DIFF,
        scr_offset: info.scr_offset + pin * GPIO_SCR_DIFF + GPIO_SCR_REG,
        controller: info.controller,
        valid: info.controller.is_some() && pin < info.valid_pins as usize,
    })
}

/// Byte offset, within its bank, of a port's interrupt status word.
pub fn status_offset(port: usize) -> usize {
    PORTS[port].reg_offset + GPIO_INT_STATUS_OFFSET + GPIO_STATUS_G1
}

/// Global port numbers owned by `controller`, indexed by controller-local
/// port index.
pub fn controller_ports(controller: u8) -> [Option<usize>; MAX_GPIO_PORTS] {
    let mut map = [None; MAX_GPIO_PORTS];
    for (port, info) in PORTS.iter().enumerate() {
        if info.controller == Some(controller) {
            map[info.controller_index as usize] = Some(port);
        }
    }
    map
}

/// Highest bank index referenced by the table.
pub fn required_banks() -> usize {
    PORTS
        .iter()
        .filter(|p| p.controller.is_some())
        .map(|p| p.bank.index() + 1)
        .max()
        .unwrap_or(0)
}

/// Bytes `bank` must span to cover every register the table points into.
pub fn bank_extent(bank: RegBank) -> usize {
    PORTS
        .iter()
        .filter(|p| p.controller.is_some() && p.bank == bank)
        .map(|p| {
            let last_pin = p.valid_pins.saturating_sub(1) as usize;
            let status_end = p.reg_offset + GPIO_INT_STATUS_OFFSET + GPIO_STATUS_G1 + 4;
            let scr_end = p.scr_offset + last_pin * GPIO_SCR_DIFF + GPIO_SCR_REG + 4;
            status_end.max(scr_end)
        })
        .max()
        .unwrap_or(0)
}

/// Human readable name of a line, e.g. `("AA", 3)`.
pub fn port_name(line: u32) -> Option<(&'static str, usize)> {
    resolve(line).map(|loc| (PORTS[loc.port].name, loc.pin))
}
