#[macro_export]
macro_rules! field_common {
    (
        $field:ident,
        $modulus:ident,
        $inv:ident,
        $modulus_str:ident,
        $r:ident,
        $r2:ident,
        $r3:ident
    ) => {
        impl $field {
            /// Returns zero, the additive identity.
            #[inline]
            pub const fn zero() -> $field {
                $field([0, 0, 0, 0])
            }

            /// Returns one, the multiplicative identity.
            #[inline]
            pub const fn one() -> $field {
                $r
            }

            /// The modulus as a hex string.
            pub const MODULUS_STR: &'static str = $modulus_str;

            /// The modulus as little-endian limbs.
            pub const MODULUS_LIMBS: [u64; 4] = $modulus.0;

            /// The modulus minus two, the Fermat inversion exponent.
            const MODULUS_MINUS_TWO: [u64; 4] = {
                let m = $modulus.0;
                let (d0, borrow) = m[0].overflowing_sub(2);
                let (d1, borrow) = sbb(m[1], 0, borrow);
                let (d2, borrow) = sbb(m[2], 0, borrow);
                let (d3, _) = sbb(m[3], 0, borrow);
                [d0, d1, d2, d3]
            };

            /// (p - 1) / 2, the split point of the signed interpretation.
            const HALF_MODULUS: [u64; 4] = {
                let m = $modulus.0;
                [
                    (m[0] >> 1) | (m[1] << 63),
                    (m[1] >> 1) | (m[2] << 63),
                    (m[2] >> 1) | (m[3] << 63),
                    m[3] >> 1,
                ]
            };

            fn from_u512(limbs: [u64; 8]) -> $field {
                // We reduce an arbitrary 512-bit number by decomposing it into two 256-bit
                // digits with the higher bits multiplied by 2^256. Thus, we perform two
                // reductions:
                //
                // 1. the lower bits are multiplied by R^2, as normal
                // 2. the upper bits are multiplied by R^2 * 2^256 = R^3
                let d0 = $field([limbs[0], limbs[1], limbs[2], limbs[3]]);
                let d1 = $field([limbs[4], limbs[5], limbs[6], limbs[7]]);
                // Convert to Montgomery form
                d0 * $r2 + d1 * $r3
            }

            /// Converts a 512-bit little endian integer into a field element by
            /// reducing it by the modulus.
            pub fn from_bytes_wide(bytes: &[u8; 64]) -> $field {
                $field::from_u512([
                    u64::from_le_bytes(bytes[0..8].try_into().unwrap()),
                    u64::from_le_bytes(bytes[8..16].try_into().unwrap()),
                    u64::from_le_bytes(bytes[16..24].try_into().unwrap()),
                    u64::from_le_bytes(bytes[24..32].try_into().unwrap()),
                    u64::from_le_bytes(bytes[32..40].try_into().unwrap()),
                    u64::from_le_bytes(bytes[40..48].try_into().unwrap()),
                    u64::from_le_bytes(bytes[48..56].try_into().unwrap()),
                    u64::from_le_bytes(bytes[56..64].try_into().unwrap()),
                ])
            }

            /// Converts from an integer represented in little endian into its
            /// (congruent) Montgomery representation.
            pub const fn from_raw(val: [u64; 4]) -> Self {
                (&$field(val)).mul(&$r2)
            }

            /// Attempts to convert a little-endian byte representation of a
            /// canonical integer into a field element, failing if the input is
            /// not reduced.
            pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<$field> {
                let tmp = $field([
                    u64::from_le_bytes(bytes[0..8].try_into().unwrap()),
                    u64::from_le_bytes(bytes[8..16].try_into().unwrap()),
                    u64::from_le_bytes(bytes[16..24].try_into().unwrap()),
                    u64::from_le_bytes(bytes[24..32].try_into().unwrap()),
                ]);
                let is_some = Choice::from($field::is_less_than(&tmp.0, &$modulus.0) as u8);
                CtOption::new(tmp * $r2, is_some)
            }

            /// Converts an element into its canonical byte representation in
            /// little-endian byte order.
            pub fn to_bytes(&self) -> [u8; 32] {
                let tmp: [u64; 4] = (*self).into();
                let mut res = [0u8; 32];
                res[0..8].copy_from_slice(&tmp[0].to_le_bytes());
                res[8..16].copy_from_slice(&tmp[1].to_le_bytes());
                res[16..24].copy_from_slice(&tmp[2].to_le_bytes());
                res[24..32].copy_from_slice(&tmp[3].to_le_bytes());
                res
            }

            /// Exponentiates `self` by `exp`, given as little-endian u64 limbs.
            pub fn pow_vartime(&self, exp: &[u64]) -> $field {
                let mut res = $field::one();
                for e in exp.iter().rev() {
                    for i in (0..64).rev() {
                        res = res.square();
                        if ((*e >> i) & 1) == 1 {
                            res = res.mul(self);
                        }
                    }
                }
                res
            }

            /// Computes the multiplicative inverse of this element, failing if
            /// the element is zero.
            pub fn invert(&self) -> CtOption<Self> {
                let inv = self.pow_vartime(&Self::MODULUS_MINUS_TWO);
                CtOption::new(inv, !self.ct_eq(&Self::zero()))
            }

            /// Multiplies by 2^k. Shifts of the full field width or more
            /// return zero.
            pub fn shl(&self, k: u32) -> Self {
                if k >= 254 {
                    return Self::zero();
                }
                let mut acc = *self;
                let mut i = 0;
                while i < k {
                    acc = acc.double();
                    i += 1;
                }
                acc
            }

            /// Floor-divides the canonical representative by 2^k. Shifts of the
            /// full field width or more return zero.
            pub fn shr(&self, k: u32) -> Self {
                if k >= 254 {
                    return Self::zero();
                }
                let limbs: [u64; 4] = (*self).into();
                let limb_shift = (k / 64) as usize;
                let bit_shift = k % 64;
                let mut out = [0u64; 4];
                let mut i = 0;
                while i + limb_shift < 4 {
                    let src = i + limb_shift;
                    out[i] = limbs[src] >> bit_shift;
                    if bit_shift > 0 && src + 1 < 4 {
                        out[i] |= limbs[src + 1] << (64 - bit_shift);
                    }
                    i += 1;
                }
                Self::from_raw(out)
            }

            /// Whether the canonical representative exceeds (p - 1) / 2, i.e.
            /// whether the element counts as negative under the signed
            /// interpretation of the circuit semantics.
            pub fn is_negative(&self) -> bool {
                let c: [u64; 4] = (*self).into();
                // HALF_MODULUS - c borrows iff c > (p - 1) / 2
                let (_, borrow) = sbb(Self::HALF_MODULUS[0], c[0], false);
                let (_, borrow) = sbb(Self::HALF_MODULUS[1], c[1], borrow);
                let (_, borrow) = sbb(Self::HALF_MODULUS[2], c[2], borrow);
                let (_, borrow) = sbb(Self::HALF_MODULUS[3], c[3], borrow);
                borrow
            }

            /// Ordering under the signed interpretation where residues above
            /// p/2 compare as negative. This matches the comparison semantics
            /// the circuit toolchain exposes and must not be replaced by the
            /// canonical `Ord`.
            pub fn cmp_half(&self, other: &Self) -> ::core::cmp::Ordering {
                match (self.is_negative(), other.is_negative()) {
                    (true, false) => ::core::cmp::Ordering::Less,
                    (false, true) => ::core::cmp::Ordering::Greater,
                    _ => self.cmp(other),
                }
            }

            /// Parses a canonical integer in the given radix (2 to 62) and
            /// reduces it into the field. Bases up to 36 are case-insensitive;
            /// larger bases use `0-9A-Za-z` digits. A leading `-` negates.
            pub fn from_string_radix(s: &str, radix: u32) -> Option<Self> {
                if !(2..=62).contains(&radix) {
                    return None;
                }
                let (neg, digits) = match s.as_bytes() {
                    [b'-', rest @ ..] => (true, rest),
                    rest => (false, rest),
                };
                if digits.is_empty() {
                    return None;
                }
                let base = Self::from(radix as u64);
                let mut acc = Self::zero();
                for &b in digits {
                    let d = digit_value(b, radix)?;
                    acc = acc * base + Self::from(d);
                }
                Some(if neg { -acc } else { acc })
            }

            /// Formats the canonical representative in the given radix
            /// (2 to 62).
            pub fn to_string_radix(&self, radix: u32) -> String {
                assert!((2..=62).contains(&radix), "radix out of range");
                let mut limbs: [u64; 4] = (*self).into();
                if limbs == [0, 0, 0, 0] {
                    return String::from("0");
                }
                let mut out = Vec::new();
                while limbs != [0, 0, 0, 0] {
                    let (q, rem) = div_rem_u64(limbs, radix as u64);
                    out.push(digit_char(rem, radix));
                    limbs = q;
                }
                out.iter().rev().collect()
            }
        }

        impl $crate::arithmetic::BaseField for $field {
            fn zero() -> Self {
                $field::zero()
            }
            fn one() -> Self {
                $field::one()
            }
            fn is_zero(&self) -> bool {
                self.ct_eq(&$field::zero()).into()
            }
            fn add(&self, rhs: &Self) -> Self {
                $field::add(self, rhs)
            }
            fn sub(&self, rhs: &Self) -> Self {
                $field::sub(self, rhs)
            }
            fn neg(&self) -> Self {
                $field::neg(self)
            }
            fn double(&self) -> Self {
                $field::double(self)
            }
            fn mul(&self, rhs: &Self) -> Self {
                $field::mul(self, rhs)
            }
            fn square(&self) -> Self {
                $field::square(self)
            }
            fn invert(&self) -> CtOption<Self> {
                $field::invert(self)
            }
        }

        impl fmt::Debug for $field {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let tmp = self.to_bytes();
                write!(f, "0x")?;
                for &b in tmp.iter().rev() {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }

        impl fmt::Display for $field {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{:?}", self)
            }
        }

        impl Default for $field {
            #[inline]
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<bool> for $field {
            fn from(bit: bool) -> $field {
                if bit {
                    $field::one()
                } else {
                    $field::zero()
                }
            }
        }

        impl From<u64> for $field {
            fn from(val: u64) -> $field {
                $field([val, 0, 0, 0]) * $r2
            }
        }

        impl ConstantTimeEq for $field {
            fn ct_eq(&self, other: &Self) -> Choice {
                self.0[0].ct_eq(&other.0[0])
                    & self.0[1].ct_eq(&other.0[1])
                    & self.0[2].ct_eq(&other.0[2])
                    & self.0[3].ct_eq(&other.0[3])
            }
        }

        impl PartialEq for $field {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                bool::from(self.ct_eq(other))
            }
        }

        impl Eq for $field {}

        impl core::cmp::Ord for $field {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                let left = self.to_bytes();
                let right = other.to_bytes();
                left.iter()
                    .zip(right.iter())
                    .rev()
                    .find_map(|(left_byte, right_byte)| match left_byte.cmp(right_byte) {
                        core::cmp::Ordering::Equal => None,
                        res => Some(res),
                    })
                    .unwrap_or(core::cmp::Ordering::Equal)
            }
        }

        impl core::cmp::PartialOrd for $field {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl ConditionallySelectable for $field {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                $field([
                    u64::conditional_select(&a.0[0], &b.0[0], choice),
                    u64::conditional_select(&a.0[1], &b.0[1], choice),
                    u64::conditional_select(&a.0[2], &b.0[2], choice),
                    u64::conditional_select(&a.0[3], &b.0[3], choice),
                ])
            }
        }

        impl<'a> Neg for &'a $field {
            type Output = $field;

            #[inline]
            fn neg(self) -> $field {
                self.neg()
            }
        }

        impl Neg for $field {
            type Output = $field;

            #[inline]
            fn neg(self) -> $field {
                -&self
            }
        }

        impl<'a, 'b> Sub<&'b $field> for &'a $field {
            type Output = $field;

            #[inline]
            fn sub(self, rhs: &'b $field) -> $field {
                self.sub(rhs)
            }
        }

        impl<'a, 'b> Add<&'b $field> for &'a $field {
            type Output = $field;

            #[inline]
            fn add(self, rhs: &'b $field) -> $field {
                self.add(rhs)
            }
        }

        impl<'a, 'b> Mul<&'b $field> for &'a $field {
            type Output = $field;

            #[inline]
            fn mul(self, rhs: &'b $field) -> $field {
                self.mul(rhs)
            }
        }

        impl<T: ::core::borrow::Borrow<$field>> ::core::iter::Sum<T> for $field {
            fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
                iter.fold(Self::zero(), |acc, item| acc + item.borrow())
            }
        }

        impl<T: ::core::borrow::Borrow<$field>> ::core::iter::Product<T> for $field {
            fn product<I: Iterator<Item = T>>(iter: I) -> Self {
                iter.fold(Self::one(), |acc, item| acc * item.borrow())
            }
        }

        impl From<[u64; 4]> for $field {
            fn from(digits: [u64; 4]) -> Self {
                Self::from_raw(digits)
            }
        }

        impl From<$field> for [u64; 4] {
            fn from(elt: $field) -> [u64; 4] {
                // Turn into canonical form by computing (a.R) / R = a
                $field::montgomery_reduce_short(elt.0[0], elt.0[1], elt.0[2], elt.0[3]).0
            }
        }

        impl From<$field> for [u8; 32] {
            fn from(value: $field) -> [u8; 32] {
                value.to_bytes()
            }
        }

        impl<'a> From<&'a $field> for [u8; 32] {
            fn from(value: &'a $field) -> [u8; 32] {
                value.to_bytes()
            }
        }
    };
}

#[macro_export]
macro_rules! field_arithmetic {
    ($field:ident, $modulus:ident, $inv:ident) => {
        impl $field {
            /// Doubles this field element.
            #[inline]
            pub const fn double(&self) -> $field {
                self.add(self)
            }

            /// Adds `rhs` to `self`, returning the result.
            #[inline]
            pub const fn add(&self, rhs: &Self) -> Self {
                let (d0, carry) = self.0[0].overflowing_add(rhs.0[0]);
                let (d1, carry) = adc(self.0[1], rhs.0[1], carry);
                let (d2, carry) = adc(self.0[2], rhs.0[2], carry);
                // The modulus leaves the top limb's high bits clear, so the sum
                // cannot overflow the top register.
                let d3 = self.0[3] + rhs.0[3] + carry as u64;

                // Attempt to subtract the modulus, to ensure the value
                // is smaller than the modulus.
                (&$field([d0, d1, d2, d3])).sub(&$modulus)
            }

            /// Subtracts `rhs` from `self`, returning the result.
            #[inline]
            pub const fn sub(&self, rhs: &Self) -> Self {
                let (d0, borrow) = self.0[0].overflowing_sub(rhs.0[0]);
                let (d1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
                let (d2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
                let (d3, borrow) = sbb(self.0[3], rhs.0[3], borrow);

                // If underflow occurred on the final limb, borrow = 0xfff...fff,
                // otherwise borrow = 0x000...000. Thus, we use it as a mask to
                // conditionally add the modulus.
                let borrow = 0u64.wrapping_sub(borrow as u64);
                let (d0, carry) = d0.overflowing_add($modulus.0[0] & borrow);
                let (d1, carry) = adc(d1, $modulus.0[1] & borrow, carry);
                let (d2, carry) = adc(d2, $modulus.0[2] & borrow, carry);
                let (d3, _) = adc(d3, $modulus.0[3] & borrow, carry);
                $field([d0, d1, d2, d3])
            }

            /// Negates `self`.
            #[inline]
            pub const fn neg(&self) -> Self {
                if self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0 {
                    return $field([0, 0, 0, 0]);
                }
                // Subtract `self` from the modulus to negate. The final borrow
                // cannot underflow; self is guaranteed to be in the field.
                let (d0, borrow) = $modulus.0[0].overflowing_sub(self.0[0]);
                let (d1, borrow) = sbb($modulus.0[1], self.0[1], borrow);
                let (d2, borrow) = sbb($modulus.0[2], self.0[2], borrow);
                let d3 = $modulus.0[3] - (self.0[3] + borrow as u64);

                $field([d0, d1, d2, d3])
            }

            /// Multiplies `rhs` by `self`, returning the result.
            ///
            /// Interleaved Montgomery multiplication; because the high bit of
            /// the top modulus limb is clear, the intermediate carries fit and
            /// a single final conditional subtraction suffices.
            #[inline]
            pub const fn mul(&self, rhs: &Self) -> $field {
                let (t0, r0) = macx(0, self.0[0], rhs.0[0]);
                let k = t0.wrapping_mul($inv);
                let (_, r1) = macx(t0, k, $modulus.0[0]);
                let (t1, r0) = mac(0, self.0[0], rhs.0[1], r0);
                let (t0, r1) = mac(t1, k, $modulus.0[1], r1);
                let (t2, r0) = mac(0, self.0[0], rhs.0[2], r0);
                let (t1, r1) = mac(t2, k, $modulus.0[2], r1);
                let (t3, r0) = mac(0, self.0[0], rhs.0[3], r0);
                let (t2, r1) = mac(t3, k, $modulus.0[3], r1);
                let t3 = r0 + r1;

                let (t0, r0) = macx(t0, self.0[1], rhs.0[0]);
                let k = t0.wrapping_mul($inv);
                let (_, r1) = macx(t0, k, $modulus.0[0]);
                let (t1, r0) = mac(t1, self.0[1], rhs.0[1], r0);
                let (t0, r1) = mac(t1, k, $modulus.0[1], r1);
                let (t2, r0) = mac(t2, self.0[1], rhs.0[2], r0);
                let (t1, r1) = mac(t2, k, $modulus.0[2], r1);
                let (t3, r0) = mac(t3, self.0[1], rhs.0[3], r0);
                let (t2, r1) = mac(t3, k, $modulus.0[3], r1);
                let t3 = r0 + r1;

                let (t0, r0) = macx(t0, self.0[2], rhs.0[0]);
                let k = t0.wrapping_mul($inv);
                let (_, r1) = macx(t0, k, $modulus.0[0]);
                let (t1, r0) = mac(t1, self.0[2], rhs.0[1], r0);
                let (t0, r1) = mac(t1, k, $modulus.0[1], r1);
                let (t2, r0) = mac(t2, self.0[2], rhs.0[2], r0);
                let (t1, r1) = mac(t2, k, $modulus.0[2], r1);
                let (t3, r0) = mac(t3, self.0[2], rhs.0[3], r0);
                let (t2, r1) = mac(t3, k, $modulus.0[3], r1);
                let t3 = r0 + r1;

                let (t0, r0) = macx(t0, self.0[3], rhs.0[0]);
                let k = t0.wrapping_mul($inv);
                let (_, r1) = macx(t0, k, $modulus.0[0]);
                let (t1, r0) = mac(t1, self.0[3], rhs.0[1], r0);
                let (t0, r1) = mac(t1, k, $modulus.0[1], r1);
                let (t2, r0) = mac(t2, self.0[3], rhs.0[2], r0);
                let (t1, r1) = mac(t2, k, $modulus.0[2], r1);
                let (t3, r0) = mac(t3, self.0[3], rhs.0[3], r0);
                let (t2, r1) = mac(t3, k, $modulus.0[3], r1);
                let t3 = r0 + r1;

                // Result may be within MODULUS of the correct value
                (&$field([t0, t1, t2, t3])).sub(&$modulus)
            }

            /// Squares this element.
            #[inline]
            pub const fn square(&self) -> $field {
                let (r1, carry) = macx(0, self.0[0], self.0[1]);
                let (r2, carry) = mac(0, self.0[0], self.0[2], carry);
                let (r3, r4) = mac(0, self.0[0], self.0[3], carry);

                let (r3, carry) = macx(r3, self.0[1], self.0[2]);
                let (r4, r5) = mac(r4, self.0[1], self.0[3], carry);

                let (r5, r6) = macx(r5, self.0[2], self.0[3]);

                let r7 = r6 >> 63;
                let r6 = (r6 << 1) | (r5 >> 63);
                let r5 = (r5 << 1) | (r4 >> 63);
                let r4 = (r4 << 1) | (r3 >> 63);
                let r3 = (r3 << 1) | (r2 >> 63);
                let r2 = (r2 << 1) | (r1 >> 63);
                let r1 = r1 << 1;

                let (r0, carry) = macx(0, self.0[0], self.0[0]);
                let (r1, carry2) = r1.overflowing_add(carry);
                let (r2, carry) = mac(r2, self.0[1], self.0[1], carry2 as u64);
                let (r3, carry2) = r3.overflowing_add(carry);
                let (r4, carry) = mac(r4, self.0[2], self.0[2], carry2 as u64);
                let (r5, carry2) = r5.overflowing_add(carry);
                let (r6, carry) = mac(r6, self.0[3], self.0[3], carry2 as u64);
                let r7 = r7.wrapping_add(carry);

                $field::montgomery_reduce(r0, r1, r2, r3, r4, r5, r6, r7)
            }

            #[allow(clippy::too_many_arguments)]
            #[inline(always)]
            pub(crate) const fn montgomery_reduce(
                r0: u64,
                r1: u64,
                r2: u64,
                r3: u64,
                r4: u64,
                r5: u64,
                r6: u64,
                r7: u64,
            ) -> $field {
                // The Montgomery reduction here is based on Algorithm 14.32 in
                // Handbook of Applied Cryptography
                // <http://cacr.uwaterloo.ca/hac/about/chap14.pdf>.
                let k = r0.wrapping_mul($inv);
                let (_, carry) = macx(r0, k, $modulus.0[0]);
                let (r1, carry) = mac(r1, k, $modulus.0[1], carry);
                let (r2, carry) = mac(r2, k, $modulus.0[2], carry);
                let (r3, carry) = mac(r3, k, $modulus.0[3], carry);
                let (r4, carry2) = r4.overflowing_add(carry);

                let k = r1.wrapping_mul($inv);
                let (_, carry) = macx(r1, k, $modulus.0[0]);
                let (r2, carry) = mac(r2, k, $modulus.0[1], carry);
                let (r3, carry) = mac(r3, k, $modulus.0[2], carry);
                let (r4, carry) = mac(r4, k, $modulus.0[3], carry);
                let (r5, carry2) = adc(r5, carry, carry2);

                let k = r2.wrapping_mul($inv);
                let (_, carry) = macx(r2, k, $modulus.0[0]);
                let (r3, carry) = mac(r3, k, $modulus.0[1], carry);
                let (r4, carry) = mac(r4, k, $modulus.0[2], carry);
                let (r5, carry) = mac(r5, k, $modulus.0[3], carry);
                let (r6, carry2) = adc(r6, carry, carry2);

                let k = r3.wrapping_mul($inv);
                let (_, carry) = macx(r3, k, $modulus.0[0]);
                let (r4, carry) = mac(r4, k, $modulus.0[1], carry);
                let (r5, carry) = mac(r5, k, $modulus.0[2], carry);
                let (r6, carry) = mac(r6, k, $modulus.0[3], carry);
                let (r7, _) = adc(r7, carry, carry2);

                // Result may be within MODULUS of the correct value
                (&$field([r4, r5, r6, r7])).sub(&$modulus)
            }

            /// Montgomery reduce where the upper four registers are zero.
            #[inline(always)]
            pub(crate) const fn montgomery_reduce_short(
                r0: u64,
                r1: u64,
                r2: u64,
                r3: u64,
            ) -> $field {
                let k = r0.wrapping_mul($inv);
                let (_, r0) = macx(r0, k, $modulus.0[0]);
                let (r1, r0) = mac(r1, k, $modulus.0[1], r0);
                let (r2, r0) = mac(r2, k, $modulus.0[2], r0);
                let (r3, r0) = mac(r3, k, $modulus.0[3], r0);

                let k = r1.wrapping_mul($inv);
                let (_, r1) = macx(r1, k, $modulus.0[0]);
                let (r2, r1) = mac(r2, k, $modulus.0[1], r1);
                let (r3, r1) = mac(r3, k, $modulus.0[2], r1);
                let (r0, r1) = mac(r0, k, $modulus.0[3], r1);

                let k = r2.wrapping_mul($inv);
                let (_, r2) = macx(r2, k, $modulus.0[0]);
                let (r3, r2) = mac(r3, k, $modulus.0[1], r2);
                let (r0, r2) = mac(r0, k, $modulus.0[2], r2);
                let (r1, r2) = mac(r1, k, $modulus.0[3], r2);

                let k = r3.wrapping_mul($inv);
                let (_, r3) = macx(r3, k, $modulus.0[0]);
                let (r0, r3) = mac(r0, k, $modulus.0[1], r3);
                let (r1, r3) = mac(r1, k, $modulus.0[2], r3);
                let (r2, r3) = mac(r2, k, $modulus.0[3], r3);

                // Result may be within MODULUS of the correct value
                (&$field([r0, r1, r2, r3])).sub(&$modulus)
            }

            #[inline(always)]
            pub(crate) const fn is_less_than(x: &[u64; 4], y: &[u64; 4]) -> bool {
                let (_, borrow) = x[0].overflowing_sub(y[0]);
                let (_, borrow) = sbb(x[1], y[1], borrow);
                let (_, borrow) = sbb(x[2], y[2], borrow);
                let (_, borrow) = sbb(x[3], y[3], borrow);
                borrow
            }
        }
    };
}
