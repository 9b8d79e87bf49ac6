use thiserror::Error;

/// Returned when a modular inverse does not exist, i.e. `gcd(value, modulus) != 1`.
/// With a prime modulus this can only happen for multiples of the modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{value} has no inverse modulo {modulus}")]
pub struct NonInvertibleError {
    pub value: u64,
    pub modulus: u64,
}

/// Arithmetic over the prime field Z/P. All operations reduce into `[0, P)`.
///
/// Every computation on share coordinates goes through this type so that
/// negative intermediates are normalized consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    modulus: u64,
}

impl PrimeField {
    /// Panics if `modulus < 2`; the modulus is static configuration, not
    /// runtime data.
    pub fn new(modulus: u64) -> Self {
        assert!(modulus >= 2, "field modulus must be at least 2");
        Self { modulus }
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Normalize a signed intermediate into `[0, P)`.
    pub fn reduce(&self, value: i128) -> u64 {
        value.rem_euclid(self.modulus as i128) as u64
    }

    pub fn add(&self, a: u64, b: u64) -> u64 {
        ((a as u128 + b as u128) % self.modulus as u128) as u64
    }

    pub fn sub(&self, a: u64, b: u64) -> u64 {
        self.add(a % self.modulus, self.neg(b))
    }

    pub fn neg(&self, a: u64) -> u64 {
        let a = a % self.modulus;
        if a == 0 { 0 } else { self.modulus - a }
    }

    pub fn mul(&self, a: u64, b: u64) -> u64 {
        ((a as u128 * b as u128) % self.modulus as u128) as u64
    }

    /// Modular inverse via the extended Euclidean algorithm.
    pub fn inv(&self, a: u64) -> Result<u64, NonInvertibleError> {
        let a = a % self.modulus;
        let (g, x, _) = egcd(a as i128, self.modulus as i128);
        if g != 1 {
            return Err(NonInvertibleError {
                value: a,
                modulus: self.modulus,
            });
        }
        Ok(self.reduce(x))
    }
}

fn egcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x, y) = egcd(b, a % b);
        (g, y, x - (a / b) * y)
    }
}
