//! Host byte-order detection and per-element byte swapping. Every multi-byte
//! numeric codec funnels through here; varints and single-byte elements never
//! need it.

use crate::tag::Endian;
use std::sync::OnceLock;

static NATIVE_LITTLE: OnceLock<bool> = OnceLock::new();

/// Whether the host stores the least significant byte first. Probed once by
/// writing `1u32` in native layout and inspecting byte 0, then memoized for
/// the lifetime of the process.
pub fn native_little() -> bool {
    *NATIVE_LITTLE.get_or_init(|| 1u32.to_ne_bytes()[0] == 1)
}

/// Reverses the byte order within each `element_size`-byte group of `buf`,
/// leaving the order of the groups themselves untouched. Trailing bytes that
/// do not form a full group are left alone; callers clip to whole elements
/// before swapping.
pub fn swap_elements(buf: &mut [u8], element_size: usize) {
    if element_size > 1 {
        for element in buf.chunks_exact_mut(element_size) {
            element.reverse();
        }
    }
}

/// Whether a buffer of `size`-byte elements in the requested byte order
/// differs from the host layout. Single bytes have no order.
pub(crate) fn needs_swap(endian: Endian, size: u8) -> bool {
    size != 1 && match endian {
        Endian::Little => !native_little(),
        Endian::Big => native_little(),
    }
}
