//! GPIO lines wired to the power-management controller's wake logic.

use crate::consts::NUM_WAKE_SOURCES;
use crate::topology::*;

const fn wake(port: usize, pin: usize) -> Option<u32> {
    Some(gpio(port, pin))
}

/// Wake source index to global line. `None` entries are not routed.
pub static WAKE_SOURCES: [Option<u32>; NUM_WAKE_SOURCES] = {
    let mut table = [None; NUM_WAKE_SOURCES];
    table[0] = wake(PORT_A, 6);
    table[1] = wake(PORT_A, 2);
    table[2] = wake(PORT_A, 5);
    table[3] = wake(PORT_D, 3);
    table[4] = wake(PORT_E, 3);
    table[5] = wake(PORT_G, 3);
    table[7] = wake(PORT_B, 3);
    table[8] = wake(PORT_B, 5);
    table[9] = wake(PORT_C, 0);
    table[10] = wake(PORT_S, 2);
    table[11] = wake(PORT_H, 2);
    table[12] = wake(PORT_J, 5);
    table[13] = wake(PORT_J, 6);
    table[14] = wake(PORT_J, 7);
    table[15] = wake(PORT_K, 0);
    table[16] = wake(PORT_Q, 1);
    table[17] = wake(PORT_F, 4);
    table[18] = wake(PORT_M, 5);
    table[19] = wake(PORT_P, 0);
    table[20] = wake(PORT_P, 2);
    table[21] = wake(PORT_P, 1);
    table[22] = wake(PORT_O, 3);
    table[23] = wake(PORT_R, 5);
    table[25] = wake(PORT_S, 3);
    table[26] = wake(PORT_S, 4);
    table[27] = wake(PORT_S, 1);
    table[28] = wake(PORT_F, 2);
    table[29] = wake(PORT_FF, 0);
    table[30] = wake(PORT_FF, 4);
    table[31] = wake(PORT_C, 6);
    table[32] = wake(PORT_W, 2);
    table[33] = wake(PORT_W, 5);
    table[34] = wake(PORT_W, 1);
    table[35] = wake(PORT_V, 0);
    table[36] = wake(PORT_V, 1);
    table[37] = wake(PORT_V, 2);
    table[38] = wake(PORT_V, 3);
    table[39] = wake(PORT_V, 4);
    table[40] = wake(PORT_V, 5);
    table[41] = wake(PORT_EE, 0);
    table[42] = wake(PORT_Z, 1);
    table[43] = wake(PORT_Z, 3);
    table[44] = wake(PORT_AA, 0);
    table[45] = wake(PORT_AA, 1);
    table[46] = wake(PORT_AA, 2);
    table[47] = wake(PORT_AA, 3);
    table[48] = wake(PORT_AA, 4);
    table[49] = wake(PORT_AA, 5);
    table[50] = wake(PORT_AA, 6);
    table[51] = wake(PORT_AA, 7);
    table[52] = wake(PORT_X, 3);
    table[53] = wake(PORT_X, 7);
    table[54] = wake(PORT_Y, 0);
    table[55] = wake(PORT_Y, 1);
    table[56] = wake(PORT_Y, 2);
    table[57] = wake(PORT_Y, 5);
    table[58] = wake(PORT_Y, 6);
    table[59] = wake(PORT_L, 1);
    table[60] = wake(PORT_L, 3);
    table[61] = wake(PORT_L, 4);
    table[62] = wake(PORT_L, 5);
    table[63] = wake(PORT_I, 4);
    table[64] = wake(PORT_I, 6);
    table[65] = wake(PORT_Z, 0);
    table[66] = wake(PORT_Z, 2);
    table[67] = wake(PORT_FF, 1);
    table[68] = wake(PORT_FF, 2);
    table[69] = wake(PORT_FF, 3);
    table[70] = wake(PORT_H, 3);
    table[71] = wake(PORT_P, 5);
    table
};

/// Wake source wired to `line`, if any.
pub fn line_to_wake_index(line: u32) -> Option<usize> {
    let index = WAKE_SOURCES.iter().position(|w| *w == Some(line))?;
    debug!("gpio wake{} for gpio={}", index, line);
    Some(index)
}
