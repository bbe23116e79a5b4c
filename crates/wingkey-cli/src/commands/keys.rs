//! Keys command: provision and inspect the fragmented signing key.

use anyhow::Context;
use rand::RngCore;
use rand::rngs::OsRng;
use wingkey_config::Config;
use wingkey_crypto::{FragmentedKeySource, PublicKey, RequestSigner, SEED_LEN};
use zeroize::Zeroizing;

use crate::config_bridge;
use crate::theme::Theme;

/// Length of a generated mask, in bytes.
const GENERATED_MASK_LEN: usize = 16;

/// Decode a 32-byte hex seed, wiping the intermediate buffer.
fn decode_seed(seed_hex: &str) -> anyhow::Result<Zeroizing<[u8; SEED_LEN]>> {
    let bytes = Zeroizing::new(hex::decode(seed_hex.trim()).context("seed is not valid hex")?);
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    if bytes.len() != SEED_LEN {
        anyhow::bail!("seed must be {SEED_LEN} bytes, got {}", bytes.len());
    }
    seed.copy_from_slice(&bytes);
    Ok(seed)
}

fn generate_seed() -> Zeroizing<[u8; SEED_LEN]> {
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    OsRng.fill_bytes(&mut seed[..]);
    seed
}

fn generate_mask() -> Vec<u8> {
    let mut mask = vec![0u8; GENERATED_MASK_LEN];
    OsRng.fill_bytes(&mut mask);
    mask
}

/// Render the `[signing]` block for a config file.
fn signing_block(source: &FragmentedKeySource, public_key: &PublicKey) -> String {
    let fragments = source
        .encoded_fragments()
        .iter()
        .map(|f| format!("\"{f}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let mut block = String::new();
    block.push_str(&format!("# key_id = \"{}\"\n", public_key.key_id_hex()));
    block.push_str(&format!("# public_key = \"{}\"\n", public_key.to_base64()));
    block.push_str("[signing]\n");
    block.push_str(&format!("fragments = [{fragments}]\n"));
    block.push_str(&format!("mask = \"{}\"\n", source.mask_hex()));
    if let Some(checksum) = source.checksum_hex() {
        block.push_str(&format!("checksum = \"{checksum}\"\n"));
    }
    block
}

/// Split a seed into masked fragments and print the config block.
///
/// Without `seed_hex` a fresh seed is generated; without `mask_hex` a
/// random mask is used. The block goes to stdout, notes to stderr.
pub(crate) fn split_key(
    seed_hex: Option<&str>,
    parts: usize,
    mask_hex: Option<&str>,
) -> anyhow::Result<()> {
    let generated = seed_hex.is_none();
    let seed = match seed_hex {
        Some(hex_seed) => decode_seed(hex_seed)?,
        None => generate_seed(),
    };
    let mask = match mask_hex {
        Some(m) => hex::decode(m.trim()).context("mask is not valid hex")?,
        None => generate_mask(),
    };

    let source = FragmentedKeySource::split(&seed, parts, &mask)
        .with_context(|| format!("cannot split the seed into {parts} fragments"))?;
    // Derive the key from the encoded form so the printed block is known to load.
    let rendered = {
        let reloaded = FragmentedKeySource::from_encoded(
            &source.encoded_fragments(),
            &source.mask_hex(),
            source.checksum_hex().as_deref(),
        )?;
        let public_key = RequestSigner::new(reloaded).public_key()?;
        signing_block(&source, &public_key)
    };

    if generated {
        eprintln!(
            "{}",
            Theme::warning("Generated a new seed. These fragments are the only copy.")
        );
    }
    print!("{rendered}");
    Ok(())
}

/// Print the public key derived from the configured fragments.
pub(crate) fn show_public(cfg: &Config) -> anyhow::Result<()> {
    let signer = config_bridge::to_signer(cfg)?;
    let public_key = signer
        .public_key()
        .context("failed to reassemble the signing key")?;

    println!("\n{}", Theme::header("Signing Identity"));
    println!("  {}", Theme::kv("Key ID    ", &public_key.key_id_hex()));
    println!("  {}", Theme::kv("Public key", &public_key.to_base64()));
    println!("  {}", Theme::kv("Hex       ", &public_key.to_hex()));
    println!();

    Ok(())
}
