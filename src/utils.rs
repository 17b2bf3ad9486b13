/// [Szudzik pairing function][szudzik-pairing].
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
///
/// Arithmetic wraps, so for large inputs this is a mixing function rather
/// than a bijection. Callers only use the result to pick a bucket.
///
/// [szudzik-pairing]: http://szudzik.com/ElegantPairing.pdf
pub fn pairing_szudzik(a: u64, b: u64) -> u64 {
    if a < b {
        b.wrapping_mul(b).wrapping_add(a)
    } else {
        a.wrapping_mul(a).wrapping_add(a).wrapping_add(b)
    }
}

/// [Pairing function][pairing] for two `u64` values.
///
/// [pairing]: https://en.wikipedia.org/wiki/Pairing_function
pub fn pairing2(a: u64, b: u64) -> u64 {
    pairing_szudzik(a, b)
}

/// Pairing function for three `u64` values.
pub fn pairing3(a: u64, b: u64, c: u64) -> u64 {
    pairing2(pairing2(a, b), c)
}

/// Folds an arbitrary sequence into a single value, seeded with `tag`.
pub fn pairing_many(tag: u64, values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(tag, pairing2)
}

pub trait MyHash {
    /// Hash used for bucket selection in the unique table and the caches.
    fn hash(&self) -> u64;
}

impl MyHash for u64 {
    fn hash(&self) -> u64 {
        *self
    }
}

impl MyHash for (u64, u64) {
    fn hash(&self) -> u64 {
        pairing2(self.0, self.1)
    }
}

impl MyHash for (u64, u64, u64) {
    fn hash(&self) -> u64 {
        pairing3(self.0, self.1, self.2)
    }
}

impl MyHash for str {
    fn hash(&self) -> u64 {
        // Keep the accumulator small so that the pairing stays injective
        // for short tags.
        self.bytes()
            .fold(0, |acc: u64, b| pairing2(acc & 0xFFFF_FFFF, b as u64))
    }
}
