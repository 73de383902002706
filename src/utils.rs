use axaddrspace::device::AccessWidth;

/// Volatile read of `width` bytes at `addr`.
///
/// # Safety
/// `addr` must point into a mapped register region and be aligned to `width`.
pub(crate) unsafe fn perform_mmio_read(addr: *const u8, width: AccessWidth) -> usize {
    match width {
        AccessWidth::Byte => addr.read_volatile() as _,
        AccessWidth::Word => (addr as *const u16).read_volatile() as _,
        AccessWidth::Dword => (addr as *const u32).read_volatile() as _,
        AccessWidth::Qword => (addr as *const u64).read_volatile() as _,
    }
}

/// Volatile write of the low `width` bytes of `val` at `addr`.
///
/// # Safety
/// Same requirements as [`perform_mmio_read`].
pub(crate) unsafe fn perform_mmio_write(addr: *mut u8, width: AccessWidth, val: usize) {
    match width {
        AccessWidth::Byte => addr.write_volatile(val as _),
        AccessWidth::Word => (addr as *mut u16).write_volatile(val as _),
        AccessWidth::Dword => (addr as *mut u32).write_volatile(val as _),
        AccessWidth::Qword => (addr as *mut u64).write_volatile(val as _),
    }
}
