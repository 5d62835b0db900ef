use simon::block_cipher_trait::BlockCipher;
use simon::generic_array::GenericArray;
use simon::{Simon128, Simon64};
use std::convert::TryInto;

fn nibble_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => unreachable!(),
    }
}

fn bytes_from_hex_str(s: &str) -> Option<Vec<u8>> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.len() % 2 == 1 || bytes.iter().any(|b| !b.is_ascii_hexdigit()) {
        return None;
    }

    Some(
        bytes
            .chunks_exact(2)
            .map(|chunk| nibble_value(chunk[0]) << 4 | nibble_value(chunk[1]))
            .collect(),
    )
}

fn check_simon64(key: &[u8], pt: &[u8], ct: &[u8]) {
    let cipher = Simon64::with_key(key).unwrap();

    // Through the BlockCipher trait, in place.
    let mut block = GenericArray::clone_from_slice(pt);
    BlockCipher::encrypt_block(&cipher, &mut block);
    assert_eq!(block.as_slice(), ct);
    BlockCipher::decrypt_block(&cipher, &mut block);
    assert_eq!(block.as_slice(), pt);

    // Through the byte interface.
    let mut out = [0u8; 8];
    cipher.encrypt_bytes(pt.try_into().unwrap(), None, &mut out);
    assert_eq!(&out[..], ct);
    let mut back = [0u8; 8];
    cipher.decrypt_bytes(&out, None, &mut back);
    assert_eq!(&back[..], pt);
}

fn check_simon128(key: &[u8], pt: &[u8], ct: &[u8]) {
    let cipher = Simon128::with_key(key).unwrap();

    let mut block = GenericArray::clone_from_slice(pt);
    BlockCipher::encrypt_block(&cipher, &mut block);
    assert_eq!(block.as_slice(), ct);
    BlockCipher::decrypt_block(&cipher, &mut block);
    assert_eq!(block.as_slice(), pt);

    let mut out = [0u8; 16];
    cipher.encrypt_bytes(pt.try_into().unwrap(), None, &mut out);
    assert_eq!(&out[..], ct);
    let mut back = [0u8; 16];
    cipher.decrypt_bytes(&out, None, &mut back);
    assert_eq!(&back[..], pt);
}

#[test]
fn designer_vectors() {
    let vectors = include_str!("vectors.txt");
    let mut key = None;
    let mut pt = None;
    let mut checked = 0;
    for line in vectors.lines() {
        let mut parts = line.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some("KEY"), Some(v)) => key = bytes_from_hex_str(v),
            (Some("PT"), Some(v)) => pt = bytes_from_hex_str(v),
            (Some("CT"), Some(v)) => {
                let ct = bytes_from_hex_str(v).unwrap();
                let key = key.as_ref().unwrap();
                let pt = pt.as_ref().unwrap();
                match pt.len() {
                    8 => check_simon64(key, pt, &ct),
                    16 => check_simon128(key, pt, &ct),
                    n => panic!("unexpected block length {}", n),
                }
                checked += 1;
            }
            _ => {}
        }
    }
    assert_eq!(checked, 5);
}
