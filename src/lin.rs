//! Linear space trait used by the optimizer for all of its vector arithmetic.
//!
//! The main interface is `Lin` with implementations for a vector of real
//! numbers `Rn<F>`, for `ndarray::Array1<F>` and for the scalars `f32`/`f64`
//! (a one-dimensional space).
//!
//! ```rust
//! use conjgrad_min::{Lin, Rn};
//!
//! let x = Rn::new(vec![1.,2.]);
//! let y = Rn::new(vec![2.,-3.]);
//!
//! assert_eq!(x.dot(&y), -4.);
//! assert_eq!(Rn::new(vec![3., -1.]), x.clone() + y);
//! assert_eq!(Rn::new(vec![2., 4.]), x * 2.);
//! ```
use ndarray::Array1;
use num_traits::{Float, One, Zero};
use std::ops::{Add, Deref, DerefMut, Mul};

/// Trait defining basic operations for an element of a finite dimensional
/// linear space with a fixed basis.
///
/// The focus is on operations _in place_: methods that return a `Lin` object
/// modify the object in place.
pub trait Lin {
    /// Scalars for this linear space.
    type F: Float;

    /// Vector of zeros with `dim` components.
    fn zeros(dim: usize) -> Self
    where
        Self: Sized;

    /// Number of components.
    fn dim(&self) -> usize;

    /// Component `i` in the canonical basis.
    fn component(&self, i: usize) -> Self::F;

    /// Mutable access to component `i`.
    fn component_mut(&mut self, i: usize) -> &mut Self::F;

    /// Dot product (inner product).
    fn dot(&self, other: &Self) -> Self::F;

    /// Multiplication by a constant.
    fn scale(&mut self, a: Self::F) -> &mut Self;

    /// Adds a vector multiplied by a constant to this vector.
    fn ray_to(&mut self, other: &Self, t: Self::F) -> &mut Self;

    /// Return the origin of the vector space to which self belongs too.
    fn origin(&self) -> Self
    where
        Self: Sized,
    {
        Self::zeros(self.dim())
    }

    /// Norm of the vector.
    fn norm(&self) -> Self::F {
        self.norm_squared().sqrt()
    }

    /// Square of the norm.
    fn norm_squared(&self) -> Self::F {
        self.dot(self)
    }

    /// Scale the vector so that it has a norm one.
    ///
    /// If norm is zero, causes division by zero.
    fn normalize(&mut self) -> &mut Self {
        let norm = self.norm();
        self.scale(Self::F::one() / norm)
    }

    /// Distance between two vectors.
    fn dist(&self, other: &Self) -> Self::F {
        assert_eq!(self.dim(), other.dim());
        (0..self.dim())
            .fold(Self::F::zero(), |sum, i| {
                sum + (self.component(i) - other.component(i)).powi(2)
            })
            .sqrt()
    }

    /// Adds a vector to this vector.
    fn add_mut(&mut self, other: &Self) -> &mut Self {
        self.ray_to(other, Self::F::one())
    }

    /// Creates a linear combination `a * self + b * other`.
    fn combine(&mut self, a: Self::F, other: &Self, b: Self::F) -> &mut Self {
        self.scale(a).ray_to(other, b)
    }

    /// Project on a line given by a given direction.
    ///
    /// `dir` does not have to be normalized, but must be nonzero.
    fn project_on(&mut self, dir: &Self) -> &mut Self {
        let a = self.dot(dir) / dir.norm_squared();
        self.combine(Self::F::zero(), dir, a)
    }

    /// Project on a plane orthogonal to the given direction.
    ///
    /// `dir` does not have to be normalized, but must be nonzero.
    fn project_ortho(&mut self, dir: &Self) -> &mut Self {
        let a = self.dot(dir) / dir.norm_squared();
        self.combine(Self::F::one(), dir, -a)
    }
}

/// An implementation of the Lin trait: an n-dimensional real vector.
///
/// Backed by a `Vec<F>`, where `F` is `Float`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rn<F: Float> {
    vec: Vec<F>,
}

impl<F: Float> Rn<F> {
    pub fn new(v: Vec<F>) -> Self {
        Rn { vec: v }
    }

    pub fn into_inner(self) -> Vec<F> {
        self.vec
    }
}

impl<F: Float> From<Vec<F>> for Rn<F> {
    fn from(v: Vec<F>) -> Self {
        Rn::new(v)
    }
}

impl<F: Float> Deref for Rn<F> {
    type Target = Vec<F>;

    fn deref(&self) -> &Vec<F> {
        &self.vec
    }
}

impl<F: Float> DerefMut for Rn<F> {
    fn deref_mut(&mut self) -> &mut Vec<F> {
        &mut self.vec
    }
}

impl<F: Float> Mul<F> for Rn<F> {
    type Output = Rn<F>;

    fn mul(mut self, other: F) -> Self {
        self.scale(other);
        self
    }
}

impl<F: Float> Add for Rn<F> {
    type Output = Rn<F>;

    fn add(mut self, other: Self) -> Self {
        self.add_mut(&other);
        self
    }
}

impl<F: Float> Lin for Rn<F> {
    type F = F;

    fn zeros(dim: usize) -> Self {
        Rn::new(vec![F::zero(); dim])
    }

    fn dim(&self) -> usize {
        self.vec.len()
    }

    fn component(&self, i: usize) -> F {
        self.vec[i]
    }

    fn component_mut(&mut self, i: usize) -> &mut F {
        &mut self.vec[i]
    }

    fn dist(&self, other: &Self) -> F {
        assert_eq!(self.len(), other.len());
        self.iter()
            .zip(other.iter())
            .fold(F::zero(), |sum, (&x, &y)| sum + (x - y).powi(2))
            .sqrt()
    }

    fn dot(&self, other: &Self) -> F {
        assert_eq!(self.len(), other.len());
        self.iter()
            .zip(other.iter())
            .fold(F::zero(), |sum, (&x, &y)| sum + x * y)
    }

    fn scale(&mut self, a: F) -> &mut Self {
        for x in self.iter_mut() {
            *x = *x * a;
        }
        self
    }

    fn combine(&mut self, a: F, other: &Self, b: F) -> &mut Self {
        assert_eq!(self.len(), other.len());
        for (x, y) in self.iter_mut().zip(other.iter()) {
            *x = *x * a + *y * b;
        }
        self
    }

    fn ray_to(&mut self, other: &Self, b: F) -> &mut Self {
        assert_eq!(self.len(), other.len());
        for (x, y) in self.iter_mut().zip(other.iter()) {
            *x = *x + *y * b;
        }
        self
    }
}

impl<F: Float> Lin for Array1<F> {
    type F = F;

    fn zeros(dim: usize) -> Self {
        Array1::from_elem(dim, F::zero())
    }

    fn dim(&self) -> usize {
        self.len()
    }

    fn component(&self, i: usize) -> F {
        self[i]
    }

    fn component_mut(&mut self, i: usize) -> &mut F {
        &mut self[i]
    }

    fn dot(&self, other: &Self) -> F {
        assert_eq!(self.len(), other.len());
        self.iter()
            .zip(other.iter())
            .fold(F::zero(), |sum, (&x, &y)| sum + x * y)
    }

    fn scale(&mut self, a: F) -> &mut Self {
        self.mapv_inplace(|x| x * a);
        self
    }

    fn ray_to(&mut self, other: &Self, b: F) -> &mut Self {
        assert_eq!(self.len(), other.len());
        self.zip_mut_with(other, |x, &y| *x = *x + y * b);
        self
    }
}

// Scalars as elements of a one-dimensional linear space over themselves.
macro_rules! scalar_lin {
    ($t:ty) => {
        impl Lin for $t {
            type F = $t;

            fn zeros(dim: usize) -> Self {
                debug_assert_eq!(dim, 1);
                0.
            }

            fn dim(&self) -> usize {
                1
            }

            fn component(&self, i: usize) -> $t {
                assert_eq!(i, 0);
                *self
            }

            fn component_mut(&mut self, i: usize) -> &mut $t {
                assert_eq!(i, 0);
                self
            }

            fn dot(&self, other: &Self) -> $t {
                *self * *other
            }

            fn scale(&mut self, a: $t) -> &mut Self {
                *self *= a;
                self
            }

            fn combine(&mut self, a: $t, other: &Self, b: $t) -> &mut Self {
                *self = *self * a + *other * b;
                self
            }

            fn ray_to(&mut self, other: &Self, b: $t) -> &mut Self {
                *self += *other * b;
                self
            }

            fn dist(&self, other: &Self) -> $t {
                (*self - *other).abs()
            }

            fn norm(&self) -> $t {
                self.abs()
            }
        }
    };
}

scalar_lin!(f32);
scalar_lin!(f64);
