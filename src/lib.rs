#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;

mod access;
mod bank;
mod chip;
mod consts;
mod controller;
mod error;
mod host;
mod irq;
mod line;
mod regs;
mod topology;
mod utils;
mod wake;

#[cfg(test)]
mod testing;

pub use access::GpioReg;
pub use bank::RegisterBank;
pub use chip::{GpioChip, IrqChip};
pub use consts::*;
pub use controller::{ControllerContext, GpioController, CONTEXT_SLOTS};
pub use error::{GpioError, GpioResult};
pub use host::{IrqDomain, PinCtrl, WakeController};
pub use line::{LineState, RegisterSnapshot};
pub use regs::{sense, EnableConfig, IrqFlow, ScrAccess, TriggerKind, TriggerType};
pub use topology::{gpio, port_name, resolve, LineLocation, PortInfo, RegBank, PORTS};
pub use wake::{line_to_wake_index, WAKE_SOURCES};

use spin::Mutex;

/// Resources handed over by platform enumeration.
pub struct PlatformResources<'a> {
    /// Mapped register banks in descriptor order: main first, then always-on.
    pub banks: &'a [RegisterBank],
    /// Parent interrupt line of each controller, in controller id order.
    pub irqs: &'a [u32],
}

/// A probed Tegra186 GPIO block.
///
/// Every line, interrupt and demultiplexing operation goes through this
/// context; several independent instances may coexist.
pub struct Tegra186Gpio<D, P, W> {
    banks: [Option<RegisterBank>; MAX_BANKS],
    controllers: [Option<GpioController>; MAX_GPIO_CONTROLLERS],
    /// Serializes read-modify-write sequences within one port.
    port_locks: [Mutex<()>; MAX_PORTS],
    domain: Option<D>,
    pinctrl: P,
    wake: W,
}

impl<D: IrqDomain, P: PinCtrl, W: WakeController> Tegra186Gpio<D, P, W> {
    /// Record banks and controllers from `res`.
    ///
    /// Fails with [`GpioError::ResourceMissing`] when no controller interrupt
    /// is described or a bank used by the port table is absent.
    pub fn probe(res: &PlatformResources, pinctrl: P, wake: W) -> GpioResult<Self> {
        if res.irqs.is_empty() {
            error!("No GPIO Controller found");
            return Err(GpioError::ResourceMissing);
        }
        if res.banks.len() < topology::required_banks() {
            error!(
                "Missing MEM resource: {} banks, {} required",
                res.banks.len(),
                topology::required_banks()
            );
            return Err(GpioError::ResourceMissing);
        }
        for kind in [RegBank::Main, RegBank::Aon] {
            let need = topology::bank_extent(kind);
            let have = res.banks.get(kind.index()).map_or(0, |b| b.size);
            if have < need {
                error!("MEM resource {} too small: {:#x} < {:#x}", kind.index(), have, need);
                return Err(GpioError::ResourceMissing);
            }
        }
        if res.banks.len() > MAX_BANKS {
            warn!("ignoring {} extra register banks", res.banks.len() - MAX_BANKS);
        }
        if res.irqs.len() > MAX_GPIO_CONTROLLERS {
            warn!(
                "ignoring {} extra controller interrupts",
                res.irqs.len() - MAX_GPIO_CONTROLLERS
            );
        }

        let mut banks = [None; MAX_BANKS];
        for (slot, bank) in banks.iter_mut().zip(res.banks) {
            *slot = Some(*bank);
        }
        let controllers = core::array::from_fn(|i| {
            res.irqs
                .get(i)
                .map(|&irq| GpioController::new(i as u8, irq))
        });

        info!(
            "tegra186 gpio: {} register banks, {} controllers",
            res.banks.len().min(MAX_BANKS),
            res.irqs.len().min(MAX_GPIO_CONTROLLERS)
        );
        Ok(Self {
            banks,
            controllers,
            port_locks: core::array::from_fn(|_| Mutex::new(())),
            domain: None,
            pinctrl,
            wake,
        })
    }

    /// Map every line into `domain` and mask the interrupts of lines this
    /// domain owns.
    ///
    /// On any failure the mappings already made are disposed, the domain is
    /// dropped and [`GpioError::ResourceMissing`] is returned.
    pub fn attach_irq_domain(&mut self, domain: D) -> GpioResult {
        for line in 0..NUM_LINES as u32 {
            if domain.create_mapping(line).is_none() {
                error!("irq mapping failed for gpio {}", line);
                dispose_mappings(&domain, 0..line);
                return Err(GpioError::ResourceMissing);
            }
        }

        if let Err(e) = self.mask_all(&domain) {
            error!("masking gpio interrupts failed: {:?}", e);
            dispose_mappings(&domain, 0..NUM_LINES as u32);
            return Err(GpioError::ResourceMissing);
        }

        self.domain = Some(domain);
        Ok(())
    }

    fn mask_all(&self, domain: &D) -> GpioResult {
        let mut masked = 0;
        for line in 0..NUM_LINES as u32 {
            if self.is_accessible(line) {
                self.update(line, GpioReg::EnbConfig, EnableConfig::INTERRUPT.bits(), 0)?;
                masked += 1;
            }
            if let Some(virq) = domain.find_mapping(line) {
                domain.set_flow_handler(virq, IrqFlow::Simple);
            }
        }
        debug!("masked {} accessible gpio interrupts", masked);
        Ok(())
    }

    /// Install one chained handler per controller.
    pub fn install_chained_handlers(&self) -> GpioResult {
        let domain = self.domain.as_ref().ok_or(GpioError::ResourceMissing)?;
        for cont in self.controllers.iter().flatten() {
            domain.set_chained_handler(cont.irq, cont.id);
        }
        Ok(())
    }

    /// Hand the wake source table to the power-management controller.
    pub fn publish_wake_table(&self) {
        self.wake.update_wakeup_table(0, &WAKE_SOURCES);
    }

    /// Probe, attach `domain`, install chained handlers and publish the wake
    /// table.
    pub fn init(res: &PlatformResources, domain: D, pinctrl: P, wake: W) -> GpioResult<Self> {
        let mut ctl = Self::probe(res, pinctrl, wake)?;
        ctl.attach_irq_domain(domain)?;
        ctl.install_chained_handlers()?;
        ctl.publish_wake_table();
        Ok(ctl)
    }

    pub fn controller(&self, id: u8) -> Option<&GpioController> {
        self.controllers.get(id as usize)?.as_ref()
    }

    pub fn controllers(&self) -> impl Iterator<Item = &GpioController> {
        self.controllers.iter().flatten()
    }

    /// Reserved snapshot buffers of a controller.
    pub fn saved_context(&self, id: u8) -> Option<&Mutex<ControllerContext>> {
        self.controller(id).map(|c| &c.context)
    }

    pub fn irq_domain(&self) -> Option<&D> {
        self.domain.as_ref()
    }

    pub fn bank(&self, bank: RegBank) -> Option<&RegisterBank> {
        self.banks.get(bank.index())?.as_ref()
    }
}

fn dispose_mappings<D: IrqDomain>(domain: &D, lines: core::ops::Range<u32>) {
    for line in lines {
        if let Some(virq) = domain.find_mapping(line) {
            domain.dispose_mapping(virq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::topology::*;

    #[test]
    fn probe_requires_controller_interrupts() {
        let banks = alloc_banks();
        let res = PlatformResources { banks: &banks, irqs: &[] };
        let err = TestGpio::probe(&res, FakePinCtrl::default(), FakeWake::default()).err();
        assert_eq!(err, Some(GpioError::ResourceMissing));
    }

    #[test]
    fn probe_requires_aon_bank() {
        let banks = alloc_banks();
        let res = PlatformResources { banks: &banks[..1], irqs: &IRQS };
        let err = TestGpio::probe(&res, FakePinCtrl::default(), FakeWake::default()).err();
        assert_eq!(err, Some(GpioError::ResourceMissing));
    }

    #[test]
    fn probe_numbers_controllers_in_resource_order() {
        let banks = alloc_banks();
        let res = PlatformResources { banks: &banks, irqs: &IRQS };
        let ctl = TestGpio::probe(&res, FakePinCtrl::default(), FakeWake::default()).unwrap();
        let ids: Vec<_> = ctl.controllers().map(|c| (c.id, c.irq)).collect();
        assert_eq!(ids, IRQS.iter().enumerate().map(|(i, &irq)| (i as u8, irq)).collect::<Vec<_>>());
        assert!(ctl.irq_domain().is_none());
        assert_eq!(ctl.to_irq(0), None);
        let saved = ctl.saved_context(0).unwrap().lock();
        assert_eq!(saved.cnf.len(), MAX_GPIO_PORTS * MAX_PINS_PER_PORT);
        assert!(saved.cnf.iter().chain(&saved.out_val).all(|&v| v == 0));
        drop(saved);
        assert!(ctl.saved_context(7).is_none());
    }

    #[test]
    fn init_masks_only_accessible_lines() {
        let banks = alloc_banks();
        let owned = gpio(PORT_B, 1);
        let foreign = gpio(PORT_B, 2);
        grant(&banks, owned);
        let cfg = EnableConfig::INTERRUPT | EnableConfig::ENABLE;
        poke(&banks, owned, GpioReg::EnbConfig, cfg.bits());
        poke(&banks, foreign, GpioReg::EnbConfig, cfg.bits());

        let ctl = init_with(&banks, FakeDomain::default());
        assert_eq!(peek(&banks, owned, GpioReg::EnbConfig), EnableConfig::ENABLE.bits());
        assert_eq!(peek(&banks, foreign, GpioReg::EnbConfig), cfg.bits());
        assert_eq!(ctl.to_irq(owned), Some(owned + VIRQ_BASE));

        let domain = ctl.irq_domain().unwrap();
        assert_eq!(domain.flows.lock().len(), NUM_LINES);
        assert_eq!(*domain.chained.lock(), vec![(IRQS[0], 0), (IRQS[1], 1), (IRQS[2], 2), (IRQS[3], 3), (IRQS[4], 4), (IRQS[5], 5), (IRQS[6], 6)]);
        assert_eq!(*ctl.wake.table_len.lock(), Some(NUM_WAKE_SOURCES));
    }

    #[test]
    fn failed_mapping_disposes_and_aborts() {
        let banks = alloc_banks();
        let res = PlatformResources { banks: &banks, irqs: &IRQS };
        let mut ctl = TestGpio::probe(&res, FakePinCtrl::default(), FakeWake::default()).unwrap();
        let domain = FakeDomain::failing_at(10);
        let disposed = domain.disposed.clone();
        assert_eq!(ctl.attach_irq_domain(domain), Err(GpioError::ResourceMissing));
        assert_eq!(disposed.lock().len(), 10);
        assert!(ctl.irq_domain().is_none());
        assert_eq!(ctl.install_chained_handlers(), Err(GpioError::ResourceMissing));
    }

    #[test]
    fn probe_rejects_undersized_bank() {
        let banks = [alloc_bank(0x8000), alloc_bank(0x2000)];
        let res = PlatformResources { banks: &banks, irqs: &IRQS };
        let err = TestGpio::probe(&res, FakePinCtrl::default(), FakeWake::default()).err();
        assert_eq!(err, Some(GpioError::ResourceMissing));

        let banks = [alloc_bank(0x20000), alloc_bank(0x1000)];
        let res = PlatformResources { banks: &banks, irqs: &IRQS };
        let err = TestGpio::probe(&res, FakePinCtrl::default(), FakeWake::default()).err();
        assert_eq!(err, Some(GpioError::ResourceMissing));
    }

    #[test]
    fn failed_masking_disposes_every_mapping() {
        let banks = alloc_banks();
        let mut ctl = probe_with(&banks);
        let small = truncate_main_bank(&mut ctl, &banks);
        grant(&small, gpio(PORT_A, 0));

        let domain = FakeDomain::default();
        let disposed = domain.disposed.clone();
        assert_eq!(ctl.attach_irq_domain(domain), Err(GpioError::ResourceMissing));
        assert_eq!(disposed.lock().len(), NUM_LINES);
        assert!(ctl.irq_domain().is_none());
    }
}
