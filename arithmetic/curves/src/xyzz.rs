//! Short Weierstrass group law in XYZZ coordinates.
//!
//! A projective point (X, Y, ZZ, ZZZ) with ZZ^3 = ZZZ^2 represents the
//! affine point (X/ZZ, Y/ZZZ); the identity is encoded as ZZ = ZZZ = 0.
//! The formulas are the add-2008-s / madd-2008-s set from
//! <https://www.hyperelliptic.org/EFD/g1p/auto-shortw-xyzz.html>, which keep
//! the additions inversion-free; only the affine export divides.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::arithmetic::BaseField;

/// The `a` coefficient of a curve, pre-classified so the doubling formula
/// can specialize on the common values.
#[derive(Clone, Copy, Debug)]
pub enum CoeffA<F> {
    Zero,
    One,
    MinusOne,
    Other(F),
}

/// Static description of a short Weierstrass curve y^2 = x^3 + a*x + b over
/// a base field.
pub trait CurveParams: Copy + Clone + Debug + Send + Sync + 'static {
    type Base: BaseField;

    const A: CoeffA<Self::Base>;
    const B: Self::Base;
    const GENERATOR: (Self::Base, Self::Base);
}

/// A point in XYZZ coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Point<C: CurveParams> {
    pub x: C::Base,
    pub y: C::Base,
    pub zz: C::Base,
    pub zzz: C::Base,
}

/// An affine point; (0, 0) encodes the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointAffine<C: CurveParams> {
    pub x: C::Base,
    pub y: C::Base,
}

fn mul_by_a<C: CurveParams>(v: &C::Base) -> C::Base {
    match C::A {
        CoeffA::Zero => C::Base::zero(),
        CoeffA::One => *v,
        CoeffA::MinusOne => v.neg(),
        CoeffA::Other(a) => a.mul(v),
    }
}

fn a_value<C: CurveParams>() -> C::Base {
    match C::A {
        CoeffA::Zero => C::Base::zero(),
        CoeffA::One => C::Base::one(),
        CoeffA::MinusOne => C::Base::one().neg(),
        CoeffA::Other(a) => a,
    }
}

impl<C: CurveParams> PointAffine<C> {
    pub fn identity() -> Self {
        PointAffine {
            x: C::Base::zero(),
            y: C::Base::zero(),
        }
    }

    pub fn generator() -> Self {
        PointAffine {
            x: C::GENERATOR.0,
            y: C::GENERATOR.1,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// Whether the point satisfies the curve equation (or is the identity).
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let x3 = self.x.square().mul(&self.x);
        let rhs = x3.add(&mul_by_a::<C>(&self.x)).add(&C::B);
        self.y.square() == rhs
    }

    pub fn neg(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        PointAffine {
            x: self.x,
            y: self.y.neg(),
        }
    }

    pub fn to_projective(&self) -> Point<C> {
        Point::from_affine(self)
    }

    /// Doubling with an affine input; V and W land directly in ZZ and ZZZ.
    pub fn dbl(&self) -> Point<C> {
        if self.is_identity() {
            return Point::identity();
        }

        let u = self.y.double();
        let v = u.square();
        let w = u.mul(&v);
        let s = self.x.mul(&v);
        let m = {
            let xx = self.x.square();
            xx.double().add(&xx).add(&a_value::<C>())
        };
        let x3 = m.square().sub(&s).sub(&s);
        let y3 = m.mul(&s.sub(&x3)).sub(&w.mul(&self.y));
        Point {
            x: x3,
            y: y3,
            zz: v,
            zzz: w,
        }
    }

    /// NAF double-and-add/sub over a little-endian scalar byte string.
    pub fn mul_bytes(&self, scalar: &[u8]) -> Point<C> {
        let naf = naf_digits(scalar);
        let neg = self.neg();
        let mut acc = Point::identity();
        let top = match naf.iter().rposition(|&d| d != 0) {
            Some(i) => i,
            None => return acc,
        };
        for &digit in naf[..=top].iter().rev() {
            acc = acc.dbl();
            if digit == 1 {
                acc = acc.add_mixed(self);
            } else if digit == -1 {
                acc = acc.add_mixed(&neg);
            }
        }
        acc
    }
}

impl<C: CurveParams> Point<C> {
    pub fn identity() -> Self {
        Point {
            x: C::Base::one(),
            y: C::Base::one(),
            zz: C::Base::zero(),
            zzz: C::Base::zero(),
        }
    }

    pub fn generator() -> Self {
        PointAffine::<C>::generator().to_projective()
    }

    pub fn is_identity(&self) -> bool {
        self.zz.is_zero()
    }

    pub fn from_affine(p: &PointAffine<C>) -> Self {
        if p.is_identity() {
            return Self::identity();
        }
        Point {
            x: p.x,
            y: p.y,
            zz: C::Base::one(),
            zzz: C::Base::one(),
        }
    }

    /// Exports to affine coordinates; the only operation here that inverts.
    pub fn to_affine(&self) -> PointAffine<C> {
        if self.is_identity() {
            return PointAffine::identity();
        }
        let zz_inv = self.zz.invert().unwrap();
        let zzz_inv = self.zzz.invert().unwrap();
        PointAffine {
            x: self.x.mul(&zz_inv),
            y: self.y.mul(&zzz_inv),
        }
    }

    pub fn dbl(&self) -> Self {
        if self.is_identity() {
            return *self;
        }

        let u = self.y.double();
        let v = u.square();
        let w = u.mul(&v);
        let s = self.x.mul(&v);
        let m = {
            let xx = self.x.square();
            let mut m = xx.double().add(&xx);
            if !matches!(C::A, CoeffA::Zero) {
                m = m.add(&mul_by_a::<C>(&self.zz.square()));
            }
            m
        };
        let x3 = m.square().sub(&s).sub(&s);
        let y3 = m.mul(&s.sub(&x3)).sub(&w.mul(&self.y));
        Point {
            x: x3,
            y: y3,
            zz: v.mul(&self.zz),
            zzz: w.mul(&self.zzz),
        }
    }

    pub fn add(&self, rhs: &Self) -> Self {
        if self.is_identity() {
            return *rhs;
        }
        if rhs.is_identity() {
            return *self;
        }

        let u1 = self.x.mul(&rhs.zz);
        let u2 = rhs.x.mul(&self.zz);
        let s1 = self.y.mul(&rhs.zzz);
        let s2 = rhs.y.mul(&self.zzz);
        let p = u2.sub(&u1);
        let r = s2.sub(&s1);

        if p.is_zero() && r.is_zero() {
            return self.dbl();
        }

        let pp = p.square();
        let ppp = p.mul(&pp);
        let q = u1.mul(&pp);
        let x3 = r.square().sub(&ppp).sub(&q).sub(&q);
        let y3 = r.mul(&q.sub(&x3)).sub(&s1.mul(&ppp));
        Point {
            x: x3,
            y: y3,
            zz: self.zz.mul(&rhs.zz).mul(&pp),
            zzz: self.zzz.mul(&rhs.zzz).mul(&ppp),
        }
    }

    /// Mixed addition with an affine operand (ZZ2 = ZZZ2 = 1).
    pub fn add_mixed(&self, rhs: &PointAffine<C>) -> Self {
        if self.is_identity() {
            return Self::from_affine(rhs);
        }
        if rhs.is_identity() {
            return *self;
        }

        let u2 = rhs.x.mul(&self.zz);
        let s2 = rhs.y.mul(&self.zzz);
        let p = u2.sub(&self.x);
        let r = s2.sub(&self.y);

        if p.is_zero() && r.is_zero() {
            return rhs.dbl();
        }

        let pp = p.square();
        let ppp = p.mul(&pp);
        let q = self.x.mul(&pp);
        let x3 = r.square().sub(&ppp).sub(&q).sub(&q);
        let y3 = r.mul(&q.sub(&x3)).sub(&self.y.mul(&ppp));
        Point {
            x: x3,
            y: y3,
            zz: self.zz.mul(&pp),
            zzz: self.zzz.mul(&ppp),
        }
    }

    pub fn neg(&self) -> Self {
        Point {
            x: self.x,
            y: self.y.neg(),
            zz: self.zz,
            zzz: self.zzz,
        }
    }

    pub fn sub(&self, rhs: &Self) -> Self {
        Point::add(self, &rhs.neg())
    }

    pub fn mul_bytes(&self, scalar: &[u8]) -> Point<C> {
        let naf = naf_digits(scalar);
        let neg = self.neg();
        let mut acc = Point::identity();
        let top = match naf.iter().rposition(|&d| d != 0) {
            Some(i) => i,
            None => return acc,
        };
        for &digit in naf[..=top].iter().rev() {
            acc = acc.dbl();
            if digit == 1 {
                acc = Point::add(&acc, self);
            } else if digit == -1 {
                acc = Point::add(&acc, &neg);
            }
        }
        acc
    }
}

/// Projective equality by cross-multiplying coordinates; two encodings of
/// the same affine point compare equal.
impl<C: CurveParams> PartialEq for Point<C> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity() {
            return other.is_identity();
        }
        if other.is_identity() {
            return false;
        }
        let u1 = self.x.mul(&other.zz);
        let u2 = other.x.mul(&self.zz);
        let s1 = self.y.mul(&other.zzz);
        let s2 = other.y.mul(&self.zzz);
        u2.sub(&u1).is_zero() && s2.sub(&s1).is_zero()
    }
}

impl<C: CurveParams> Eq for Point<C> {}

impl<C: CurveParams> Default for Point<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: CurveParams> Default for PointAffine<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: CurveParams> From<PointAffine<C>> for Point<C> {
    fn from(p: PointAffine<C>) -> Self {
        Point::from_affine(&p)
    }
}

impl<'a, 'b, C: CurveParams> Add<&'b Point<C>> for &'a Point<C> {
    type Output = Point<C>;

    #[inline]
    fn add(self, rhs: &'b Point<C>) -> Point<C> {
        Point::add(self, rhs)
    }
}

impl<C: CurveParams> Add for Point<C> {
    type Output = Point<C>;

    #[inline]
    fn add(self, rhs: Point<C>) -> Point<C> {
        Point::add(&self, &rhs)
    }
}

impl<'a, 'b, C: CurveParams> Add<&'b PointAffine<C>> for &'a Point<C> {
    type Output = Point<C>;

    #[inline]
    fn add(self, rhs: &'b PointAffine<C>) -> Point<C> {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b, C: CurveParams> Sub<&'b Point<C>> for &'a Point<C> {
    type Output = Point<C>;

    #[inline]
    fn sub(self, rhs: &'b Point<C>) -> Point<C> {
        Point::sub(self, rhs)
    }
}

impl<C: CurveParams> Sub for Point<C> {
    type Output = Point<C>;

    #[inline]
    fn sub(self, rhs: Point<C>) -> Point<C> {
        Point::sub(&self, &rhs)
    }
}

impl<C: CurveParams> AddAssign for Point<C> {
    #[inline]
    fn add_assign(&mut self, rhs: Point<C>) {
        *self = Point::add(self, &rhs);
    }
}

impl<'b, C: CurveParams> AddAssign<&'b Point<C>> for Point<C> {
    #[inline]
    fn add_assign(&mut self, rhs: &'b Point<C>) {
        *self = Point::add(self, rhs);
    }
}

impl<C: CurveParams> SubAssign for Point<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Point<C>) {
        *self = Point::sub(self, &rhs);
    }
}

impl<C: CurveParams> Neg for Point<C> {
    type Output = Point<C>;

    #[inline]
    fn neg(self) -> Point<C> {
        Point::neg(&self)
    }
}

/// Signed-digit recoding of a little-endian scalar; no two adjacent digits
/// are nonzero, so the add/sub chain does one extra op per two bits on
/// average. Two digits beyond the scalar width absorb the final carry.
fn naf_digits(scalar: &[u8]) -> Vec<i8> {
    let n_bits = scalar.len() * 8 + 2;
    let bit = |i: usize| -> u8 {
        if i / 8 < scalar.len() {
            (scalar[i / 8] >> (i % 8)) & 1
        } else {
            0
        }
    };
    let mut naf = vec![0i8; n_bits];
    let mut carry = 0u8;
    for (i, digit) in naf.iter_mut().enumerate() {
        let t = bit(i) + carry;
        if t == 2 {
            carry = 1;
        } else if t == 1 && bit(i + 1) == 1 {
            *digit = -1;
            carry = 1;
        } else {
            *digit = t as i8;
            carry = 0;
        }
    }
    naf
}
