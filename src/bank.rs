use core::ptr::NonNull;

use axaddrspace::{device::AccessWidth, HostPhysAddr};

use crate::error::{GpioError, GpioResult};
use crate::utils::*;

/// One mapped MMIO region of the GPIO block.
#[derive(Debug, Clone, Copy)]
pub struct RegisterBank {
    /// Physical start of the region, as described by the platform.
    pub phys: HostPhysAddr,
    /// Size of the region in bytes.
    pub size: usize,
    base: NonNull<u8>,
}

// Registers are only touched through volatile 32-bit accesses.
unsafe impl Send for RegisterBank {}
unsafe impl Sync for RegisterBank {}

impl RegisterBank {
    /// Wrap an already mapped region.
    ///
    /// # Safety
    /// `base` must map `size` bytes of device memory for the lifetime of every
    /// context built from this bank.
    pub unsafe fn new(phys: HostPhysAddr, base: *mut u8, size: usize) -> Option<Self> {
        Some(Self {
            phys,
            size,
            base: NonNull::new(base)?,
        })
    }

    /// Wrap a region through the hypervisor's linear mapping.
    ///
    /// # Safety
    /// `phys..phys + size` must be GPIO device memory covered by that mapping.
    #[cfg(not(test))]
    pub unsafe fn from_phys(phys: HostPhysAddr, size: usize) -> Option<Self> {
        let base = axvisor_api::memory::phys_to_virt(phys).as_mut_ptr();
        Self::new(phys, base, size)
    }

    /// Virtual address of `offset` within the bank.
    pub fn addr(&self, offset: usize) -> usize {
        self.base.as_ptr() as usize + offset
    }

    fn check(&self, offset: usize) -> GpioResult {
        if offset % 4 != 0 || offset + 4 > self.size {
            return Err(GpioError::InvalidLine);
        }
        Ok(())
    }

    pub fn read32(&self, offset: usize) -> GpioResult<u32> {
        self.check(offset)?;
        // SAFETY: in bounds and aligned, mapping guaranteed by the constructor.
        Ok(unsafe { perform_mmio_read(self.base.as_ptr().add(offset), AccessWidth::Dword) as u32 })
    }

    pub fn write32(&self, offset: usize, val: u32) -> GpioResult {
        self.check(offset)?;
        // SAFETY: as in `read32`.
        unsafe {
            perform_mmio_write(self.base.as_ptr().add(offset), AccessWidth::Dword, val as usize);
        }
        Ok(())
    }
}
