//! Shared fixtures for integration tests

#![allow(dead_code)]

use jwtmint::*;

pub const HMAC_SECRET: &[u8] = b"integration-test-secret";

pub const RSA_PEM: &[u8] = include_bytes!("../fixtures/rsa_2048.pem");
pub const RSA_ALT_PEM: &[u8] = include_bytes!("../fixtures/rsa_2048_alt.pem");
pub const RSA_1024_PEM: &[u8] = include_bytes!("../fixtures/rsa_1024.pem");
pub const RSA_PKCS8_PEM: &[u8] = include_bytes!("../fixtures/rsa_2048_pkcs8.pem");
pub const P256_PEM: &[u8] = include_bytes!("../fixtures/ec_p256.pem");
pub const P256_ALT_PEM: &[u8] = include_bytes!("../fixtures/ec_p256_alt.pem");
pub const P384_PEM: &[u8] = include_bytes!("../fixtures/ec_p384.pem");
pub const P521_PEM: &[u8] = include_bytes!("../fixtures/ec_p521.pem");

/// Key material matching `id`
pub fn key_for(id: AlgorithmId) -> &'static [u8] {
    match id {
        AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512 => HMAC_SECRET,
        AlgorithmId::RS256
        | AlgorithmId::RS384
        | AlgorithmId::RS512
        | AlgorithmId::PS256
        | AlgorithmId::PS384
        | AlgorithmId::PS512 => RSA_PEM,
        AlgorithmId::ES256 => P256_PEM,
        AlgorithmId::ES384 => P384_PEM,
        AlgorithmId::ES512 => P521_PEM,
    }
}

pub fn algorithm_for(id: AlgorithmId) -> SigningAlgorithm {
    from_id(id, key_for(id)).expect("fixture key must load")
}

pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Replace one segment of a compact token
pub fn with_segment(token: &str, index: usize, segment: &str) -> String {
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[index] = segment;
    parts.join(".")
}

/// Flip the low bit of one decoded byte in a segment and re-encode it
pub fn flip_byte(token: &str, index: usize, position: usize) -> String {
    let segment = token.split('.').nth(index).unwrap();
    let mut bytes = utils::base64url::decode_bytes(segment, 64 * 1024).unwrap();
    let position = position % bytes.len();
    bytes[position] ^= 0x01;
    with_segment(token, index, &utils::base64url::encode_bytes(&bytes))
}
