use crate::signal::Signal;

/// [Szudzik pairing function][szudzik-pairing].
///
/// ```text
/// (a, b) -> if (a<b) then (b^2 + a) else (a^2 + a + b)
/// ```
///
/// [szudzik-pairing]: http://szudzik.com/ElegantPairing.pdf
pub fn pairing_szudzik(a: u64, b: u64) -> u64 {
    if a < b {
        // b * b + a
        b.wrapping_mul(b).wrapping_add(a)
    } else {
        // a * a + a + b
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

pub trait MyHash {
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

impl MyHash for Signal {
    fn hash(&self) -> u64 {
        MyHash::hash(&(self.raw() as u64))
    }
}

impl MyHash for (Signal, Signal) {
    fn hash(&self) -> u64 {
        MyHash::hash(&(self.0.raw() as u64, self.1.raw() as u64))
    }
}

impl MyHash for (Signal, Signal, Signal) {
    fn hash(&self) -> u64 {
        MyHash::hash(&(self.0.raw() as u64, self.1.raw() as u64, self.2.raw() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_szudzik() {
        // a\b  0  1  2  3  4
        // ------------------
        // 0    0  1  4  9 16
        // 1    2  3  5 10 17
        // 2    6  7  8 11 18
        // 3   12 13 14 15 19
        // 4   20 21 22 23 24
        assert_eq!(pairing_szudzik(0, 0), 0);
        assert_eq!(pairing_szudzik(0, 1), 1);
        assert_eq!(pairing_szudzik(1, 0), 2);
        assert_eq!(pairing_szudzik(1, 1), 3);
        assert_eq!(pairing_szudzik(0, 2), 4);
        assert_eq!(pairing_szudzik(1, 2), 5);
        assert_eq!(pairing_szudzik(2, 0), 6);
        assert_eq!(pairing_szudzik(2, 1), 7);
        assert_eq!(pairing_szudzik(2, 2), 8);
        assert_eq!(pairing_szudzik(0, 4), 16);
        assert_eq!(pairing_szudzik(4, 0), 20);
        assert_eq!(pairing_szudzik(4, 4), 24);
    }

    #[test]
    fn test_pair_order_matters() {
        let a = Signal::from_index(2);
        let b = Signal::from_index(3);
        assert_ne!(MyHash::hash(&(a, b)), MyHash::hash(&(b, a)));
    }
}
