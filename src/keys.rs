use block_cipher_trait::InvalidKeyLength;
use byteorder::{ByteOrder, BE};
use zeroize::Zeroize;

// 62-bit sequence constants from the designers' specification, numbered as
// there and packed so the schedule consumes one low bit per step.
const Z2: u64 = 0x7369_f885_192c_0ef5;
const Z3: u64 = 0xfc2c_e512_07a6_35db;
const Z4: u64 = 0xfdc9_4c3a_046d_678b;

const C32: u32 = 0xffff_fffc;
const C64: u64 = 0xffff_ffff_ffff_fffc;

const MAX_ROUNDS_64: usize = 44;
const MAX_ROUNDS_128: usize = 72;

// Round-key buffers are sized for the largest variant; only the first
// `rounds` entries are live. Both are wiped on drop.

pub(crate) struct RoundKeys32 {
    keys: [u32; MAX_ROUNDS_64],
    rounds: usize,
}

pub(crate) struct RoundKeys64 {
    keys: [u64; MAX_ROUNDS_128],
    rounds: usize,
}

impl RoundKeys32 {
    #[inline]
    pub(crate) fn as_slice(&self) -> &[u32] {
        &self.keys[..self.rounds]
    }
}

impl RoundKeys64 {
    #[inline]
    pub(crate) fn as_slice(&self) -> &[u64] {
        &self.keys[..self.rounds]
    }
}

impl Drop for RoundKeys32 {
    fn drop(&mut self) {
        self.keys.zeroize();
    }
}

impl Drop for RoundKeys64 {
    fn drop(&mut self) {
        self.keys.zeroize();
    }
}

// Expands a 12 or 16 byte user key into the SIMON-64 round keys. Key bytes
// load as big-endian words; the word workspace is wiped before returning.
pub(crate) fn derive64(key: &[u8]) -> Result<RoundKeys32, InvalidKeyLength> {
    let mut rk = RoundKeys32 {
        keys: [0; MAX_ROUNDS_64],
        rounds: 0,
    };
    match key.len() {
        12 => {
            let mut k = [0u32; 3];
            BE::read_u32_into(key, &mut k);
            expand_64_96(&mut rk.keys, &k);
            k.zeroize();
            rk.rounds = 42;
        }
        16 => {
            let mut k = [0u32; 4];
            BE::read_u32_into(key, &mut k);
            expand_64_128(&mut rk.keys, &k);
            k.zeroize();
            rk.rounds = 44;
        }
        _ => return Err(InvalidKeyLength),
    }
    Ok(rk)
}

// Expands a 16, 24 or 32 byte user key into the SIMON-128 round keys.
pub(crate) fn derive128(key: &[u8]) -> Result<RoundKeys64, InvalidKeyLength> {
    let mut rk = RoundKeys64 {
        keys: [0; MAX_ROUNDS_128],
        rounds: 0,
    };
    match key.len() {
        16 => {
            let mut k = [0u64; 2];
            BE::read_u64_into(key, &mut k);
            expand_128_128(&mut rk.keys, &k);
            k.zeroize();
            rk.rounds = 68;
        }
        24 => {
            let mut k = [0u64; 3];
            BE::read_u64_into(key, &mut k);
            expand_128_192(&mut rk.keys, &k);
            k.zeroize();
            rk.rounds = 69;
        }
        32 => {
            let mut k = [0u64; 4];
            BE::read_u64_into(key, &mut k);
            expand_128_256(&mut rk.keys, &k);
            k.zeroize();
            rk.rounds = 72;
        }
        _ => return Err(InvalidKeyLength),
    }
    Ok(rk)
}

// The five expansions below seed the first m round keys with the user key in
// reverse word order, then run the m-specific recurrence. The three SIMON-128
// variants stop the recurrence short of the round count and spell out the
// remaining keys with fixed sequence bits.

fn expand_64_96(rk: &mut [u32], k: &[u32; 3]) {
    let mut z = Z2;

    rk[0] = k[2];
    rk[1] = k[1];
    rk[2] = k[0];
    for i in 3..42 {
        rk[i] = C32 ^ (z & 1) as u32 ^ rk[i - 3] ^ rk[i - 1].rotate_right(3) ^ rk[i - 1].rotate_right(4);
        z >>= 1;
    }
}

fn expand_64_128(rk: &mut [u32], k: &[u32; 4]) {
    let mut z = Z3;

    rk[0] = k[3];
    rk[1] = k[2];
    rk[2] = k[1];
    rk[3] = k[0];
    for i in 4..44 {
        rk[i] = C32
            ^ (z & 1) as u32
            ^ rk[i - 4]
            ^ rk[i - 1].rotate_right(3)
            ^ rk[i - 3]
            ^ rk[i - 1].rotate_right(4)
            ^ rk[i - 3].rotate_right(1);
        z >>= 1;
    }
}

fn expand_128_128(rk: &mut [u64], k: &[u64; 2]) {
    let mut z = Z2;

    rk[0] = k[1];
    rk[1] = k[0];
    for i in 2..66 {
        rk[i] = C64 ^ (z & 1) ^ rk[i - 2] ^ rk[i - 1].rotate_right(3) ^ rk[i - 1].rotate_right(4);
        z >>= 1;
    }

    rk[66] = C64 ^ 1 ^ rk[64] ^ rk[65].rotate_right(3) ^ rk[65].rotate_right(4);
    rk[67] = C64 ^ rk[65] ^ rk[66].rotate_right(3) ^ rk[66].rotate_right(4);
}

fn expand_128_192(rk: &mut [u64], k: &[u64; 3]) {
    let mut z = Z3;

    rk[0] = k[2];
    rk[1] = k[1];
    rk[2] = k[0];
    for i in 3..67 {
        rk[i] = C64 ^ (z & 1) ^ rk[i - 3] ^ rk[i - 1].rotate_right(3) ^ rk[i - 1].rotate_right(4);
        z >>= 1;
    }

    rk[67] = C64 ^ rk[64] ^ rk[66].rotate_right(3) ^ rk[66].rotate_right(4);
    rk[68] = C64 ^ 1 ^ rk[65] ^ rk[67].rotate_right(3) ^ rk[67].rotate_right(4);
}

fn expand_128_256(rk: &mut [u64], k: &[u64; 4]) {
    let mut z = Z4;

    rk[0] = k[3];
    rk[1] = k[2];
    rk[2] = k[1];
    rk[3] = k[0];
    for i in 4..68 {
        rk[i] = C64
            ^ (z & 1)
            ^ rk[i - 4]
            ^ rk[i - 1].rotate_right(3)
            ^ rk[i - 3]
            ^ rk[i - 1].rotate_right(4)
            ^ rk[i - 3].rotate_right(1);
        z >>= 1;
    }

    rk[68] = C64 ^ rk[64] ^ rk[67].rotate_right(3) ^ rk[65] ^ rk[67].rotate_right(4) ^ rk[65].rotate_right(1);
    rk[69] = C64 ^ 1 ^ rk[65] ^ rk[68].rotate_right(3) ^ rk[66] ^ rk[68].rotate_right(4) ^ rk[66].rotate_right(1);
    rk[70] = C64 ^ rk[66] ^ rk[69].rotate_right(3) ^ rk[67] ^ rk[69].rotate_right(4) ^ rk[67].rotate_right(1);
    rk[71] = C64 ^ rk[67] ^ rk[70].rotate_right(3) ^ rk[68] ^ rk[70].rotate_right(4) ^ rk[68].rotate_right(1);
}

#[cfg(test)]
mod tests {
    #[test]
    fn round_counts() {
        assert_eq!(super::derive64(&[0; 12]).unwrap().as_slice().len(), 42);
        assert_eq!(super::derive64(&[0; 16]).unwrap().as_slice().len(), 44);
        assert_eq!(super::derive128(&[0; 16]).unwrap().as_slice().len(), 68);
        assert_eq!(super::derive128(&[0; 24]).unwrap().as_slice().len(), 69);
        assert_eq!(super::derive128(&[0; 32]).unwrap().as_slice().len(), 72);
    }

    #[test]
    fn seeds_are_user_key_reversed() {
        // Words load big-endian; the schedule starts from the last one.
        let key = [
            0x00, 0x01, 0x02, 0x03, //
            0x08, 0x09, 0x0a, 0x0b, //
            0x10, 0x11, 0x12, 0x13, //
        ];
        let rk = super::derive64(&key).unwrap();
        assert_eq!(rk.as_slice()[0], 0x10111213);
        assert_eq!(rk.as_slice()[1], 0x08090a0b);
        assert_eq!(rk.as_slice()[2], 0x00010203);
    }

    #[test]
    fn deterministic() {
        let key: Vec<u8> = (0..24).collect();
        let a = super::derive128(&key).unwrap();
        let b = super::derive128(&key).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn rejects_wrong_lengths() {
        for &len in &[0usize, 8, 11, 13, 20, 24] {
            assert!(super::derive64(&vec![0; len]).is_err());
        }
        for &len in &[0usize, 8, 12, 17, 23, 31, 33] {
            assert!(super::derive128(&vec![0; len]).is_err());
        }
    }
}
