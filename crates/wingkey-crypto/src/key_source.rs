//! Where the signing seed comes from.
//!
//! The seed is never stored whole. A [`KeySource`] reassembles it on demand
//! into a zeroizing buffer that the signer consumes and drops within a single
//! call. [`FragmentedKeySource`] is the on-device implementation: the seed is
//! split into fragments, each XOR-masked, and reassembled only at signing
//! time. This is obfuscation, not secret sharing; a hardware keystore can be
//! plugged in behind the same trait.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::KeyAssemblyError;

/// Length of an Ed25519 seed in bytes.
pub const SEED_LEN: usize = 32;

/// Length of the optional seed checksum in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Reassembles the raw signing seed on demand.
///
/// Implementations must return the seed in a [`Zeroizing`] buffer and must
/// not keep any copy of it. Length validation is left to the signer.
pub trait KeySource: Send + Sync {
    /// Reassemble the seed.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyAssemblyError`] if the stored material is missing or
    /// fails an integrity check.
    fn reconstruct(&self) -> Result<Zeroizing<Vec<u8>>, KeyAssemblyError>;
}

impl KeySource for Box<dyn KeySource> {
    fn reconstruct(&self) -> Result<Zeroizing<Vec<u8>>, KeyAssemblyError> {
        (**self).reconstruct()
    }
}

impl<T: KeySource + ?Sized> KeySource for Arc<T> {
    fn reconstruct(&self) -> Result<Zeroizing<Vec<u8>>, KeyAssemblyError> {
        (**self).reconstruct()
    }
}

/// A seed stored as XOR-masked fragments.
///
/// Fragment `i` holds `seed_chunk_i XOR mask` where the mask repeats across
/// the whole seed, so fragments of any size can be reassembled by
/// concatenating and unmasking in order.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct FragmentedKeySource {
    fragments: Vec<Vec<u8>>,
    mask: Vec<u8>,
    checksum: Option<[u8; CHECKSUM_LEN]>,
}

impl FragmentedKeySource {
    /// Wrap already-masked fragments.
    #[must_use]
    pub fn new(fragments: Vec<Vec<u8>>, mask: Vec<u8>) -> Self {
        Self {
            fragments,
            mask,
            checksum: None,
        }
    }

    /// Require the reassembled seed to match `checksum`.
    #[must_use]
    pub fn with_checksum(mut self, checksum: [u8; CHECKSUM_LEN]) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Split and mask a seed into `parts` fragments for storage.
    ///
    /// The last fragment absorbs any remainder. The returned source carries
    /// the seed checksum.
    ///
    /// # Errors
    ///
    /// Returns [`KeyAssemblyError::EmptyMask`] if `mask` is empty and
    /// [`KeyAssemblyError::NoFragments`] if `parts` is zero or larger than
    /// the seed.
    pub fn split(
        seed: &[u8; SEED_LEN],
        parts: usize,
        mask: &[u8],
    ) -> Result<Self, KeyAssemblyError> {
        if mask.is_empty() {
            return Err(KeyAssemblyError::EmptyMask);
        }
        if parts == 0 || parts > SEED_LEN {
            return Err(KeyAssemblyError::NoFragments);
        }

        let masked: Zeroizing<Vec<u8>> = Zeroizing::new(apply_mask(seed, mask));
        let chunk = SEED_LEN.checked_div(parts).unwrap_or(SEED_LEN);
        let mut fragments: Vec<Vec<u8>> = masked.chunks(chunk).map(<[u8]>::to_vec).collect();
        // Fold any short trailing chunk into its predecessor.
        while fragments.len() > parts {
            if let Some(mut tail) = fragments.pop()
                && let Some(last) = fragments.last_mut()
            {
                last.extend_from_slice(&tail);
                tail.zeroize();
            }
        }

        Ok(Self {
            fragments,
            mask: mask.to_vec(),
            checksum: Some(seed_checksum(seed)),
        })
    }

    /// Decode the configuration form: base64 fragments, hex mask and an
    /// optional hex checksum.
    ///
    /// # Errors
    ///
    /// Returns [`KeyAssemblyError::CorruptFragment`] for an undecodable
    /// fragment, [`KeyAssemblyError::EmptyMask`] for a bad mask and
    /// [`KeyAssemblyError::ChecksumMismatch`] for a malformed checksum.
    pub fn from_encoded<S: AsRef<str>>(
        fragments: &[S],
        mask_hex: &str,
        checksum_hex: Option<&str>,
    ) -> Result<Self, KeyAssemblyError> {
        let decoded = fragments
            .iter()
            .enumerate()
            .map(|(index, f)| {
                STANDARD
                    .decode(f.as_ref().trim())
                    .map_err(|_| KeyAssemblyError::CorruptFragment { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mask = hex::decode(mask_hex.trim()).map_err(|_| KeyAssemblyError::EmptyMask)?;

        let mut source = Self::new(decoded, mask);
        if let Some(hex_sum) = checksum_hex {
            let bytes = hex::decode(hex_sum.trim()).map_err(|_| KeyAssemblyError::ChecksumMismatch)?;
            let checksum: [u8; CHECKSUM_LEN] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| KeyAssemblyError::ChecksumMismatch)?;
            source = source.with_checksum(checksum);
        }
        Ok(source)
    }

    /// Fragments in their stored (masked) form, base64 encoded.
    #[must_use]
    pub fn encoded_fragments(&self) -> Vec<String> {
        self.fragments.iter().map(|f| STANDARD.encode(f)).collect()
    }

    /// The mask, hex encoded.
    #[must_use]
    pub fn mask_hex(&self) -> String {
        hex::encode(&self.mask)
    }

    /// The checksum, hex encoded, if one is set.
    #[must_use]
    pub fn checksum_hex(&self) -> Option<String> {
        self.checksum.map(hex::encode)
    }

    /// Number of stored fragments.
    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}

impl KeySource for FragmentedKeySource {
    fn reconstruct(&self) -> Result<Zeroizing<Vec<u8>>, KeyAssemblyError> {
        if self.fragments.is_empty() {
            return Err(KeyAssemblyError::NoFragments);
        }
        if self.mask.is_empty() {
            return Err(KeyAssemblyError::EmptyMask);
        }
        if let Some(index) = self.fragments.iter().position(Vec::is_empty) {
            return Err(KeyAssemblyError::CorruptFragment { index });
        }

        let mut masked = Zeroizing::new(Vec::with_capacity(SEED_LEN));
        for fragment in &self.fragments {
            masked.extend_from_slice(fragment);
        }
        let seed = Zeroizing::new(apply_mask(&masked, &self.mask));

        if let Some(expected) = self.checksum
            && seed_checksum(&seed) != expected
        {
            return Err(KeyAssemblyError::ChecksumMismatch);
        }

        Ok(seed)
    }
}

impl std::fmt::Debug for FragmentedKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentedKeySource")
            .field("fragments", &self.fragments.len())
            .field("has_checksum", &self.checksum.is_some())
            .finish_non_exhaustive()
    }
}

/// First four bytes of `sha256(seed)`.
#[must_use]
pub fn seed_checksum(seed: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(seed);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

fn apply_mask(data: &[u8], mask: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(mask.iter().cycle())
        .map(|(byte, m)| byte ^ m)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; SEED_LEN] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
        26, 27, 28, 29, 30, 31, 32,
    ];

    #[test]
    fn test_split_then_reconstruct() {
        for parts in [1, 3, 4, 5, 32] {
            let source = FragmentedKeySource::split(&SEED, parts, &[0x5a, 0xc3, 0x11]).unwrap();
            assert_eq!(source.fragment_count(), parts);
            assert_eq!(source.reconstruct().unwrap().as_slice(), &SEED);
        }
    }

    #[test]
    fn test_fragments_are_masked() {
        let source = FragmentedKeySource::split(&SEED, 2, &[0xff]).unwrap();
        let stored: Vec<u8> = source.fragments.concat();
        assert_ne!(stored.as_slice(), &SEED);
    }

    #[test]
    fn test_encoded_roundtrip() {
        let source = FragmentedKeySource::split(&SEED, 4, &[9, 8, 7]).unwrap();
        let restored = FragmentedKeySource::from_encoded(
            &source.encoded_fragments(),
            &source.mask_hex(),
            source.checksum_hex().as_deref(),
        )
        .unwrap();
        assert_eq!(restored.reconstruct().unwrap().as_slice(), &SEED);
    }

    #[test]
    fn test_no_fragments() {
        let source = FragmentedKeySource::new(Vec::new(), vec![1]);
        assert_eq!(
            source.reconstruct().unwrap_err(),
            KeyAssemblyError::NoFragments
        );
    }

    #[test]
    fn test_empty_fragment_is_corrupt() {
        let source = FragmentedKeySource::new(vec![vec![1; 16], Vec::new(), vec![1; 16]], vec![1]);
        assert_eq!(
            source.reconstruct().unwrap_err(),
            KeyAssemblyError::CorruptFragment { index: 1 }
        );
    }

    #[test]
    fn test_undecodable_fragment_is_corrupt() {
        let result = FragmentedKeySource::from_encoded(&["AAAA", "!!!"], "01", None);
        assert_eq!(
            result.unwrap_err(),
            KeyAssemblyError::CorruptFragment { index: 1 }
        );
    }

    #[test]
    fn test_empty_mask() {
        assert_eq!(
            FragmentedKeySource::split(&SEED, 2, &[]).unwrap_err(),
            KeyAssemblyError::EmptyMask
        );
        let source = FragmentedKeySource::new(vec![vec![1; 32]], Vec::new());
        assert_eq!(source.reconstruct().unwrap_err(), KeyAssemblyError::EmptyMask);
    }

    #[test]
    fn test_tampered_fragment_fails_checksum() {
        let mut source = FragmentedKeySource::split(&SEED, 2, &[0x42]).unwrap();
        source.fragments[0][0] ^= 0x01;
        assert_eq!(
            source.reconstruct().unwrap_err(),
            KeyAssemblyError::ChecksumMismatch
        );
    }

    #[test]
    fn test_invalid_part_counts() {
        assert!(FragmentedKeySource::split(&SEED, 0, &[1]).is_err());
        assert!(FragmentedKeySource::split(&SEED, 33, &[1]).is_err());
    }

    #[test]
    fn test_debug_hides_material() {
        let source = FragmentedKeySource::split(&SEED, 2, &[0x42]).unwrap();
        let debug = format!("{source:?}");
        assert!(debug.contains("fragments: 2"));
        assert!(!debug.contains(&source.mask_hex()));
    }

    #[test]
    fn test_boxed_and_arc_sources() {
        let boxed: Box<dyn KeySource> =
            Box::new(FragmentedKeySource::split(&SEED, 2, &[3]).unwrap());
        assert_eq!(boxed.reconstruct().unwrap().as_slice(), &SEED);

        let shared = Arc::new(FragmentedKeySource::split(&SEED, 2, &[3]).unwrap());
        assert_eq!(shared.reconstruct().unwrap().as_slice(), &SEED);
    }
}
