//! # Simon
//!
//! `simon-cipher` is an implementation of the
//! [SIMON family](https://eprint.iacr.org/2013/404) of lightweight block
//! ciphers, covering the 64-bit block (SIMON-64) and 128-bit block
//! (SIMON-128) variants with all five of their key sizes.
//!
//! It follows the designers' algorithm description and is validated with
//! known-answer test vectors for every (block size, key size) pair.
//!
//! For easy interoperation with Rust crypto this crate implements
//! the `BlockCipher` trait from the `block-cipher-trait` crate.
//!
//! Blocks and keys are mapped to words in big-endian byte order. No buffer
//! alignment is required by the algorithm.

mod keys;
mod transforms;

pub use block_cipher_trait;
pub use block_cipher_trait::generic_array;
pub use generic_array::typenum;

use block_cipher_trait::{BlockCipher, InvalidKeyLength};
use byteorder::{ByteOrder, BE};
use generic_array::GenericArray;
use std::convert::TryInto;
use typenum::{U1, U16, U8};

use transforms::{decrypt_rounds, encrypt_rounds};

/// The SIMON-64 cipher instance (64-bit blocks, 96 or 128 bit keys).
///
/// The round count — 42 or 44 — is fixed by the key length. Once built the
/// instance is immutable and safe to share between concurrent encrypt and
/// decrypt calls; the expanded round keys are wiped on drop.
///
/// Implements both a friendly word-pair interface and the common Rust crypto
/// `block_cipher_trait::BlockCipher` trait for use underneath block modes.
pub struct Simon64 {
    keys: keys::RoundKeys32,
}

/// The SIMON-128 cipher instance (128-bit blocks, 128/192/256 bit keys).
///
/// The round count — 68, 69 or 72 — is fixed by the key length. Once built
/// the instance is immutable and safe to share between concurrent encrypt and
/// decrypt calls; the expanded round keys are wiped on drop.
pub struct Simon128 {
    keys: keys::RoundKeys64,
}

impl Simon64 {
    /// Block size in bytes.
    pub const BLOCK_SIZE: usize = 8;

    /// Constructs an instance from key bytes in big-endian order,
    /// only takes 12 or 16 byte keys.
    pub fn with_key(key: &[u8]) -> Result<Simon64, InvalidKeyLength> {
        Ok(Simon64 {
            keys: keys::derive64(key)?,
        })
    }

    /// Easy encryption of a block held as a pair of big-endian words.
    pub fn encrypt_block(&self, block: [u32; 2]) -> [u32; 2] {
        encrypt_rounds(block, self.keys.as_slice())
    }

    /// Easy decryption of a block held as a pair of big-endian words.
    pub fn decrypt_block(&self, block: [u32; 2]) -> [u32; 2] {
        decrypt_rounds(block, self.keys.as_slice())
    }

    /// Encrypts `input` into `output`, XORing `mask` into the result before
    /// it is written when one is given.
    ///
    /// The mask is the hook block modes of operation need; pass `None` for a
    /// plain single-block call.
    pub fn encrypt_bytes(&self, input: &[u8; 8], mask: Option<&[u8; 8]>, output: &mut [u8; 8]) {
        let block = self.encrypt_block(read_words32(input));
        write_words32(block, mask, output);
    }

    /// Decrypts `input` into `output`, XORing `mask` into the result before
    /// it is written when one is given.
    pub fn decrypt_bytes(&self, input: &[u8; 8], mask: Option<&[u8; 8]>, output: &mut [u8; 8]) {
        let block = self.decrypt_block(read_words32(input));
        write_words32(block, mask, output);
    }
}

impl Simon128 {
    /// Block size in bytes.
    pub const BLOCK_SIZE: usize = 16;

    /// Constructs an instance from key bytes in big-endian order,
    /// only takes 16, 24 or 32 byte keys.
    pub fn with_key(key: &[u8]) -> Result<Simon128, InvalidKeyLength> {
        Ok(Simon128 {
            keys: keys::derive128(key)?,
        })
    }

    /// Easy encryption of a block held as a pair of big-endian words.
    pub fn encrypt_block(&self, block: [u64; 2]) -> [u64; 2] {
        encrypt_rounds(block, self.keys.as_slice())
    }

    /// Easy decryption of a block held as a pair of big-endian words.
    pub fn decrypt_block(&self, block: [u64; 2]) -> [u64; 2] {
        decrypt_rounds(block, self.keys.as_slice())
    }

    /// Encrypts `input` into `output`, XORing `mask` into the result before
    /// it is written when one is given.
    ///
    /// The mask is the hook block modes of operation need; pass `None` for a
    /// plain single-block call.
    pub fn encrypt_bytes(&self, input: &[u8; 16], mask: Option<&[u8; 16]>, output: &mut [u8; 16]) {
        let block = self.encrypt_block(read_words64(input));
        write_words64(block, mask, output);
    }

    /// Decrypts `input` into `output`, XORing `mask` into the result before
    /// it is written when one is given.
    pub fn decrypt_bytes(&self, input: &[u8; 16], mask: Option<&[u8; 16]>, output: &mut [u8; 16]) {
        let block = self.decrypt_block(read_words64(input));
        write_words64(block, mask, output);
    }
}

/// Implements BlockCipher with 128-bit keys as the favoured fixed key length.
/// 96-bit keys are available through `new_varkey`.
impl BlockCipher for Simon64 {
    type KeySize = U16;
    type BlockSize = U8;
    type ParBlocks = U1;

    fn new(key: &GenericArray<u8, U16>) -> Self {
        Simon64::with_key(key).unwrap()
    }

    fn new_varkey(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        Simon64::with_key(key)
    }

    fn encrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        let input = read_words32(block.as_slice().try_into().unwrap());
        let output = self.encrypt_block(input);
        let mut bytes = [0u8; 8];
        write_words32(output, None, &mut bytes);
        block.copy_from_slice(&bytes);
    }

    fn decrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        let input = read_words32(block.as_slice().try_into().unwrap());
        let output = self.decrypt_block(input);
        let mut bytes = [0u8; 8];
        write_words32(output, None, &mut bytes);
        block.copy_from_slice(&bytes);
    }
}

/// Implements BlockCipher with 128-bit keys as the favoured fixed key length.
/// 192 and 256 bit keys are available through `new_varkey`.
impl BlockCipher for Simon128 {
    type KeySize = U16;
    type BlockSize = U16;
    type ParBlocks = U1;

    fn new(key: &GenericArray<u8, U16>) -> Self {
        Simon128::with_key(key).unwrap()
    }

    fn new_varkey(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        Simon128::with_key(key)
    }

    fn encrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        let input = read_words64(block.as_slice().try_into().unwrap());
        let output = self.encrypt_block(input);
        let mut bytes = [0u8; 16];
        write_words64(output, None, &mut bytes);
        block.copy_from_slice(&bytes);
    }

    fn decrypt_block(&self, block: &mut GenericArray<u8, Self::BlockSize>) {
        let input = read_words64(block.as_slice().try_into().unwrap());
        let output = self.decrypt_block(input);
        let mut bytes = [0u8; 16];
        write_words64(output, None, &mut bytes);
        block.copy_from_slice(&bytes);
    }
}

fn read_words32(bytes: &[u8; 8]) -> [u32; 2] {
    let mut block = [0u32; 2];
    BE::read_u32_into(bytes, &mut block);
    block
}

fn write_words32(block: [u32; 2], mask: Option<&[u8; 8]>, output: &mut [u8; 8]) {
    BE::write_u32_into(&block, output);
    if let Some(mask) = mask {
        for (out, m) in output.iter_mut().zip(mask.iter()) {
            *out ^= m;
        }
    }
}

fn read_words64(bytes: &[u8; 16]) -> [u64; 2] {
    let mut block = [0u64; 2];
    BE::read_u64_into(bytes, &mut block);
    block
}

fn write_words64(block: [u64; 2], mask: Option<&[u8; 16]>, output: &mut [u8; 16]) {
    BE::write_u64_into(&block, output);
    if let Some(mask) = mask {
        for (out, m) in output.iter_mut().zip(mask.iter()) {
            *out ^= m;
        }
    }
}
