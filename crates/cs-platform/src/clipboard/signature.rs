use cs_core::ChangeSignature;

/// Turns content fingerprints into a monotonically advancing change counter.
///
/// The counter moves only when the fingerprint differs from the previous
/// one, so repeated polls of unchanged content report the same signature.
#[derive(Debug, Default)]
pub struct SignatureTracker {
    last_fingerprint: Option<blake3::Hash>,
    current: ChangeSignature,
}

impl SignatureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, fingerprint: blake3::Hash) -> ChangeSignature {
        if self.last_fingerprint != Some(fingerprint) {
            self.last_fingerprint = Some(fingerprint);
            self.current = self.current.next();
        }
        self.current
    }
}

/// Content hash built from labelled clipboard parts.
///
/// Each part is length-prefixed, so moving bytes between adjacent parts
/// changes the hash.
#[derive(Debug, Default)]
pub struct Fingerprint {
    hasher: blake3::Hasher,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, bytes: &[u8]) {
        self.hasher.update(label.as_bytes());
        self.hasher.update(&[0]);
        self.hasher.update(&(bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    pub fn finish(&self) -> blake3::Hash {
        self.hasher.finalize()
    }
}
