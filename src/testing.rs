//! Memory-backed register banks and recording collaborators for unit tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use axaddrspace::HostPhysAddr;
use axerrno::{AxError, AxResult};
use spin::Mutex;

use crate::access::GpioReg;
use crate::consts::*;
use crate::host::{IrqDomain, PinCtrl, WakeController};
use crate::regs::{IrqFlow, ScrAccess, TriggerType};
use crate::topology::{self, resolve, RegBank};
use crate::{PlatformResources, RegisterBank, Tegra186Gpio};

pub const VIRQ_BASE: u32 = 32;
pub const IRQS: [u32; MAX_GPIO_CONTROLLERS] = [288, 289, 290, 291, 292, 293, 294];

const MAIN_BANK_SIZE: usize = 0x20000;
const AON_BANK_SIZE: usize = 0x2000;

pub type TestGpio = Tegra186Gpio<FakeDomain, FakePinCtrl, FakeWake>;

/// A zeroed bank backed by leaked heap memory.
pub fn alloc_bank(size: usize) -> RegisterBank {
    let mem: &'static mut [u32] = Box::leak(vec![0u32; size / 4].into_boxed_slice());
    unsafe { RegisterBank::new(HostPhysAddr::from_usize(0x0220_0000), mem.as_mut_ptr() as *mut u8, size) }
        .unwrap()
}

pub fn alloc_banks() -> [RegisterBank; 2] {
    [alloc_bank(MAIN_BANK_SIZE), alloc_bank(AON_BANK_SIZE)]
}

/// Swap in a main bank that still holds the security registers but not the
/// port data blocks. Returns the banks now backing `ctl`.
pub fn truncate_main_bank(ctl: &mut TestGpio, banks: &[RegisterBank]) -> [RegisterBank; 2] {
    let small = [alloc_bank(0x8000), banks[1]];
    ctl.banks[RegBank::Main.index()] = Some(small[0]);
    small
}

pub fn grant(banks: &[RegisterBank], line: u32) {
    let loc = resolve(line).unwrap();
    banks[loc.bank.index()]
        .write32(loc.scr_offset, ScrAccess::FULL_ACCESS.bits())
        .unwrap();
}

pub fn grant_all(banks: &[RegisterBank]) {
    for line in 0..NUM_LINES as u32 {
        if resolve(line).unwrap().valid {
            grant(banks, line);
        }
    }
}

pub fn poke(banks: &[RegisterBank], line: u32, reg: GpioReg, val: u32) {
    let loc = resolve(line).unwrap();
    banks[loc.bank.index()]
        .write32(loc.reg_offset + reg.offset(), val)
        .unwrap();
}

pub fn peek(banks: &[RegisterBank], line: u32, reg: GpioReg) -> u32 {
    let loc = resolve(line).unwrap();
    banks[loc.bank.index()]
        .read32(loc.reg_offset + reg.offset())
        .unwrap()
}

pub fn set_status(banks: &[RegisterBank], port: usize, status: u32) {
    let bank = topology::PORTS[port].bank.index();
    banks[bank]
        .write32(topology::status_offset(port), status)
        .unwrap();
}

pub fn probe_with(banks: &[RegisterBank]) -> TestGpio {
    probe_with_pinctrl(banks, FakePinCtrl::default())
}

pub fn probe_with_pinctrl(banks: &[RegisterBank], pinctrl: FakePinCtrl) -> TestGpio {
    let res = PlatformResources { banks, irqs: &IRQS };
    TestGpio::probe(&res, pinctrl, FakeWake::default()).unwrap()
}

pub fn init_with(banks: &[RegisterBank], domain: FakeDomain) -> TestGpio {
    let res = PlatformResources { banks, irqs: &IRQS };
    TestGpio::init(&res, domain, FakePinCtrl::default(), FakeWake::default()).unwrap()
}

pub fn init_with_wake(banks: &[RegisterBank], wake: FakeWake) -> TestGpio {
    let res = PlatformResources { banks, irqs: &IRQS };
    TestGpio::init(&res, FakeDomain::default(), FakePinCtrl::default(), wake).unwrap()
}

/// Linear domain mapping line `n` to virq `VIRQ_BASE + n`.
pub struct FakeDomain {
    fail_at: Option<u32>,
    mapped: Mutex<Vec<bool>>,
    pub flows: Mutex<BTreeMap<u32, IrqFlow>>,
    pub chained: Mutex<Vec<(u32, u8)>>,
    pub chained_calls: Mutex<Vec<(&'static str, u32)>>,
    pub dispatched: Mutex<Vec<u32>>,
    pub disposed: Arc<Mutex<Vec<u32>>>,
}

impl Default for FakeDomain {
    fn default() -> Self {
        Self {
            fail_at: None,
            mapped: Mutex::new(vec![false; NUM_LINES]),
            flows: Mutex::default(),
            chained: Mutex::default(),
            chained_calls: Mutex::default(),
            dispatched: Mutex::default(),
            disposed: Arc::default(),
        }
    }
}

impl FakeDomain {
    pub fn failing_at(hwirq: u32) -> Self {
        Self {
            fail_at: Some(hwirq),
            ..Self::default()
        }
    }

    pub fn flow_of(&self, virq: u32) -> Option<IrqFlow> {
        self.flows.lock().get(&virq).copied()
    }
}

impl IrqDomain for FakeDomain {
    fn create_mapping(&self, hwirq: u32) -> Option<u32> {
        if self.fail_at == Some(hwirq) || hwirq as usize >= NUM_LINES {
            return None;
        }
        self.mapped.lock()[hwirq as usize] = true;
        Some(hwirq + VIRQ_BASE)
    }

    fn find_mapping(&self, hwirq: u32) -> Option<u32> {
        let mapped = *self.mapped.lock().get(hwirq as usize)?;
        mapped.then_some(hwirq + VIRQ_BASE)
    }

    fn hwirq(&self, virq: u32) -> Option<u32> {
        let hwirq = virq.checked_sub(VIRQ_BASE)?;
        self.find_mapping(hwirq).map(|_| hwirq)
    }

    fn dispose_mapping(&self, virq: u32) {
        if let Some(hwirq) = self.hwirq(virq) {
            self.mapped.lock()[hwirq as usize] = false;
        }
        self.disposed.lock().push(virq);
    }

    fn set_flow_handler(&self, virq: u32, flow: IrqFlow) {
        self.flows.lock().insert(virq, flow);
    }

    fn set_chained_handler(&self, parent_irq: u32, controller: u8) {
        self.chained.lock().push((parent_irq, controller));
    }

    fn generic_handle_irq(&self, virq: u32) {
        self.dispatched.lock().push(virq);
    }

    fn chained_enter(&self, parent_irq: u32) {
        self.chained_calls.lock().push(("enter", parent_irq));
    }

    fn chained_exit(&self, parent_irq: u32) {
        self.chained_calls.lock().push(("exit", parent_irq));
    }
}

#[derive(Default)]
pub struct FakePinCtrl {
    fail: Option<AxError>,
    pub calls: Mutex<Vec<(&'static str, u32)>>,
}

impl FakePinCtrl {
    pub fn failing(err: AxError) -> Self {
        Self {
            fail: Some(err),
            ..Self::default()
        }
    }

    fn record(&self, op: &'static str, line: u32) -> AxResult {
        self.calls.lock().push((op, line));
        match self.fail {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl PinCtrl for FakePinCtrl {
    fn request_gpio(&self, line: u32) -> AxResult {
        self.record("request", line)
    }

    fn free_gpio(&self, line: u32) {
        let _ = self.record("free", line);
    }

    fn direction_input(&self, line: u32) -> AxResult {
        self.record("input", line)
    }

    fn direction_output(&self, line: u32) -> AxResult {
        self.record("output", line)
    }
}

#[derive(Default)]
pub struct FakeWake {
    fail: Option<AxError>,
    pub types: Mutex<Vec<(usize, TriggerType)>>,
    pub wakes: Mutex<Vec<(usize, bool)>>,
    pub table_len: Mutex<Option<usize>>,
}

impl FakeWake {
    pub fn failing(err: AxError) -> Self {
        Self {
            fail: Some(err),
            ..Self::default()
        }
    }

    fn result(&self) -> AxResult {
        match self.fail {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl WakeController for FakeWake {
    fn set_wake_type(&self, wake: usize, trigger: TriggerType) -> AxResult {
        self.types.lock().push((wake, trigger));
        self.result()
    }

    fn set_wake(&self, wake: usize, enable: bool) -> AxResult {
        self.wakes.lock().push((wake, enable));
        self.result()
    }

    fn update_wakeup_table(&self, _base: u32, table: &[Option<u32>]) {
        *self.table_len.lock() = Some(table.len());
    }
}
