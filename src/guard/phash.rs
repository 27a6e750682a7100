use anyhow::{Context, Result};
use image_hasher::{HashAlg, HasherConfig, ImageHash};

/// Perceptual hash of an uploaded photo, base64 encoded for storage.
pub fn compute_phash(image_bytes: &[u8]) -> Result<String> {
    let img = image::load_from_memory(image_bytes).context("failed to decode photo for hashing")?;
    let hasher = HasherConfig::new()
        .hash_alg(HashAlg::DoubleGradient)
        .hash_size(8, 8)
        .to_hasher();

    let hash = hasher.hash_image(&img);
    Ok(hash.to_base64())
}

/// Hamming distance between two stored hashes; `u32::MAX` when either one
/// cannot be decoded.
pub fn compute_hamming_distance(lhs: &str, rhs: &str) -> u32 {
    let Ok(h1) = ImageHash::<Vec<u8>>::from_base64(lhs) else {
        return u32::MAX;
    };
    let Ok(h2) = ImageHash::<Vec<u8>>::from_base64(rhs) else {
        return u32::MAX;
    };
    h1.dist(&h2)
}
