use core::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fq::Fq;
use crate::arithmetic::BaseField;

/// An element of Fq2 = Fq[u] / (u^2 + 1), represented as c0 + c1 * u.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Fq2 {
    pub c0: Fq,
    pub c1: Fq,
}

impl Fq2 {
    #[inline]
    pub const fn new(c0: Fq, c1: Fq) -> Self {
        Fq2 { c0, c1 }
    }

    #[inline]
    pub const fn zero() -> Self {
        Fq2 {
            c0: Fq::zero(),
            c1: Fq::zero(),
        }
    }

    #[inline]
    pub const fn one() -> Self {
        Fq2 {
            c0: Fq::one(),
            c1: Fq::zero(),
        }
    }

    pub fn is_zero(&self) -> bool {
        bool::from(self.ct_eq(&Self::zero()))
    }

    #[inline]
    pub const fn add(&self, rhs: &Self) -> Self {
        Fq2 {
            c0: Fq::add(&self.c0, &rhs.c0),
            c1: Fq::add(&self.c1, &rhs.c1),
        }
    }

    #[inline]
    pub const fn sub(&self, rhs: &Self) -> Self {
        Fq2 {
            c0: Fq::sub(&self.c0, &rhs.c0),
            c1: Fq::sub(&self.c1, &rhs.c1),
        }
    }

    #[inline]
    pub const fn neg(&self) -> Self {
        Fq2 {
            c0: Fq::neg(&self.c0),
            c1: Fq::neg(&self.c1),
        }
    }

    #[inline]
    pub const fn double(&self) -> Self {
        Fq2 {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    /// Karatsuba multiplication: three base-field products, with the
    /// non-residue u^2 = -1 folded into the c0 recombination.
    #[inline]
    pub const fn mul(&self, rhs: &Self) -> Self {
        let t0 = Fq::mul(&self.c0, &rhs.c0);
        let t1 = Fq::mul(&self.c1, &rhs.c1);
        let t2 = Fq::mul(&Fq::add(&self.c0, &self.c1), &Fq::add(&rhs.c0, &rhs.c1));
        Fq2 {
            c0: Fq::sub(&t0, &t1),
            c1: Fq::sub(&Fq::sub(&t2, &t0), &t1),
        }
    }

    /// Complex squaring: two base-field products.
    #[inline]
    pub const fn square(&self) -> Self {
        let ab = Fq::mul(&self.c0, &self.c1);
        Fq2 {
            c0: Fq::mul(&Fq::add(&self.c0, &self.c1), &Fq::sub(&self.c0, &self.c1)),
            c1: Fq::add(&ab, &ab),
        }
    }

    /// (c0 + c1*u)^-1 = (c0 - c1*u) / (c0^2 + c1^2).
    pub fn invert(&self) -> CtOption<Self> {
        let norm = self.c0.square().add(&self.c1.square());
        norm.invert().map(|t| Fq2 {
            c0: self.c0.mul(&t),
            c1: self.c1.mul(&t).neg(),
        })
    }
}

impl ConstantTimeEq for Fq2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl ConditionallySelectable for Fq2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fq2 {
            c0: Fq::conditional_select(&a.c0, &b.c0, choice),
            c1: Fq::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl From<Fq> for Fq2 {
    fn from(c0: Fq) -> Self {
        Fq2 { c0, c1: Fq::zero() }
    }
}

impl<'a> Neg for &'a Fq2 {
    type Output = Fq2;

    #[inline]
    fn neg(self) -> Fq2 {
        self.neg()
    }
}

impl Neg for Fq2 {
    type Output = Fq2;

    #[inline]
    fn neg(self) -> Fq2 {
        -&self
    }
}

impl<'a, 'b> Add<&'b Fq2> for &'a Fq2 {
    type Output = Fq2;

    #[inline]
    fn add(self, rhs: &'b Fq2) -> Fq2 {
        self.add(rhs)
    }
}

impl<'a, 'b> Sub<&'b Fq2> for &'a Fq2 {
    type Output = Fq2;

    #[inline]
    fn sub(self, rhs: &'b Fq2) -> Fq2 {
        self.sub(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fq2> for &'a Fq2 {
    type Output = Fq2;

    #[inline]
    fn mul(self, rhs: &'b Fq2) -> Fq2 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fq2, Fq2);
impl_binops_multiplicative!(Fq2, Fq2);

impl BaseField for Fq2 {
    fn zero() -> Self {
        Fq2::zero()
    }
    fn one() -> Self {
        Fq2::one()
    }
    fn is_zero(&self) -> bool {
        Fq2::is_zero(self)
    }
    fn add(&self, rhs: &Self) -> Self {
        Fq2::add(self, rhs)
    }
    fn sub(&self, rhs: &Self) -> Self {
        Fq2::sub(self, rhs)
    }
    fn neg(&self) -> Self {
        Fq2::neg(self)
    }
    fn double(&self) -> Self {
        Fq2::double(self)
    }
    fn mul(&self, rhs: &Self) -> Self {
        Fq2::mul(self, rhs)
    }
    fn square(&self) -> Self {
        Fq2::square(self)
    }
    fn invert(&self) -> CtOption<Self> {
        Fq2::invert(self)
    }
}
