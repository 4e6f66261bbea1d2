//! Numeric payload for evaluated nodes.
//!
//! `Number` follows the arithmetic of a dynamically typed calculator:
//! integers are unbounded and stay integers until an operation needs a
//! float (true division, negative powers), and mixed operands produce a
//! float. Integers that fit in `i64` use the `Int` fast path; larger ones
//! move to `Big` and back again when a result fits.
//!
//! Kernels that can fail return `Result<Number, NumericFault>`. The caller
//! decides what a fault means; the evaluator's division family substitutes
//! `0.0`.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

/// Arithmetic fault raised by a `Number` kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericFault {
    /// Division or floor division by zero, or zero raised to a negative power.
    DivisionByZero,
    /// Modulo by zero, including a zero modulus in modular exponentiation.
    ModuloByZero,
    /// Negative exponent in modular exponentiation with a base that has no
    /// inverse under the modulus.
    NotInvertible,
}

impl fmt::Display for NumericFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericFault::DivisionByZero => f.write_str("division by zero"),
            NumericFault::ModuloByZero => f.write_str("modulo by zero"),
            NumericFault::NotInvertible => {
                f.write_str("base is not invertible for the given modulus")
            }
        }
    }
}

impl std::error::Error for NumericFault {}

/// An integer or floating point number.
///
/// `Big` only ever holds integers outside the `i64` range, so every integer
/// has exactly one representation.
#[derive(Clone, Debug)]
pub enum Number {
    Int(i64),
    Big(BigInt),
    Float(f64),
}

/// Left shifts wider than this many bits saturate to an infinite float.
const MAX_SHIFT_BITS: u64 = 1 << 24;

/// Integer powers whose result would need more bits than this are computed
/// as floats instead.
const MAX_POW_BITS: u64 = 1 << 20;

impl Number {
    /// Integer zero, the value of every unbound name.
    pub const ZERO: Number = Number::Int(0);

    /// Integer one.
    pub const ONE: Number = Number::Int(1);

    /// Float zero, substituted for faulting division-family results.
    pub const FLOAT_ZERO: Number = Number::Float(0.0);

    /// `1` for true, `0` for false.
    #[inline]
    pub fn from_bool(b: bool) -> Self {
        if b {
            Number::ONE
        } else {
            Number::ZERO
        }
    }

    /// An integer, narrowed to `Int` when it fits.
    pub fn from_bigint(n: BigInt) -> Self {
        match n.to_i64() {
            Some(i) => Number::Int(i),
            None => Number::Big(n),
        }
    }

    /// Returns `true` for the `Float` representation.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` for integer zero and for `0.0`/`-0.0`.
    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(i) => *i == 0,
            Number::Big(_) => false,
            Number::Float(f) => *f == 0.0,
        }
    }

    /// Truthiness: every non-zero number is true (`NaN` included).
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_zero()
    }

    fn is_negative(&self) -> bool {
        match self {
            Number::Int(i) => *i < 0,
            Number::Big(n) => n.is_negative(),
            Number::Float(f) => *f < 0.0,
        }
    }

    /// Widen to `f64`. Integers beyond the float range become infinite.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers beyond 2^53 lose precision when mixed with floats"
    )]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Big(n) => n.to_f64().unwrap_or(if n.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
            Number::Float(f) => *f,
        }
    }

    /// Narrow to `i64`, truncating floats toward zero.
    ///
    /// `NaN` becomes `0`; out-of-range values saturate.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int casts saturate, which is the documented behavior"
    )]
    pub fn to_int(&self) -> i64 {
        match self {
            Number::Int(i) => *i,
            Number::Big(n) if n.is_negative() => i64::MIN,
            Number::Big(_) => i64::MAX,
            Number::Float(f) => *f as i64,
        }
    }

    /// The exact integer, truncating floats toward zero.
    ///
    /// `NaN` becomes `0`; infinities saturate to the `i64` range.
    pub fn to_bigint(&self) -> BigInt {
        match self {
            Number::Int(i) => BigInt::from(*i),
            Number::Big(n) => n.clone(),
            Number::Float(f) => {
                BigInt::from_f64(f.trunc()).unwrap_or_else(|| BigInt::from(self.to_int()))
            }
        }
    }

    /// The integer value, or `None` for a float.
    fn integer(&self) -> Option<BigInt> {
        match self {
            Number::Float(_) => None,
            int => Some(int.to_bigint()),
        }
    }

    /// Floats truncated to integers; integers unchanged.
    fn integral(self) -> Number {
        match self {
            Number::Float(_) => Number::from_bigint(self.to_bigint()),
            int => int,
        }
    }

    /// Shared shape of `+ - *`: `small` on the `i64` fast path, `big` when
    /// it overflows or an operand is big, `float` when either is a float.
    fn arith(
        self,
        rhs: Number,
        small: fn(i64, i64) -> Option<i64>,
        big: fn(BigInt, BigInt) -> BigInt,
        float: fn(f64, f64) -> f64,
    ) -> Number {
        if let (Number::Int(a), Number::Int(b)) = (&self, &rhs) {
            if let Some(n) = small(*a, *b) {
                return Number::Int(n);
            }
        }
        match (self.integer(), rhs.integer()) {
            (Some(a), Some(b)) => Number::from_bigint(big(a, b)),
            _ => Number::Float(float(self.as_f64(), rhs.as_f64())),
        }
    }

    /// Addition.
    pub fn add(self, rhs: Number) -> Number {
        self.arith(rhs, i64::checked_add, |a, b| a + b, |a, b| a + b)
    }

    /// Subtraction.
    pub fn sub(self, rhs: Number) -> Number {
        self.arith(rhs, i64::checked_sub, |a, b| a - b, |a, b| a - b)
    }

    /// Multiplication.
    pub fn mul(self, rhs: Number) -> Number {
        self.arith(rhs, i64::checked_mul, |a, b| a * b, |a, b| a * b)
    }

    /// Negation.
    pub fn neg(self) -> Number {
        match self {
            Number::Int(a) => a
                .checked_neg()
                .map_or_else(|| Number::from_bigint(-BigInt::from(a)), Number::Int),
            Number::Big(n) => Number::from_bigint(-n),
            Number::Float(f) => Number::Float(-f),
        }
    }

    /// True division. Always produces a float.
    pub fn true_div(self, rhs: Number) -> Result<Number, NumericFault> {
        if rhs.is_zero() {
            return Err(NumericFault::DivisionByZero);
        }
        Ok(Number::Float(self.as_f64() / rhs.as_f64()))
    }

    /// Floor division (rounds toward negative infinity).
    pub fn floor_div(self, rhs: Number) -> Result<Number, NumericFault> {
        if rhs.is_zero() {
            return Err(NumericFault::DivisionByZero);
        }
        match (&self, &rhs) {
            // i64::MIN / -1 overflows and takes the big path
            (Number::Int(a), Number::Int(b)) if !(*a == i64::MIN && *b == -1) => {
                Ok(Number::Int(Integer::div_floor(a, b)))
            }
            _ => match (self.integer(), rhs.integer()) {
                (Some(a), Some(b)) => Ok(Number::from_bigint(Integer::div_floor(&a, &b))),
                _ => Ok(Number::Float((self.as_f64() / rhs.as_f64()).floor())),
            },
        }
    }

    /// Modulo whose result takes the sign of the divisor.
    pub fn rem(self, rhs: Number) -> Result<Number, NumericFault> {
        if rhs.is_zero() {
            return Err(NumericFault::ModuloByZero);
        }
        match (&self, &rhs) {
            (Number::Int(_), Number::Int(-1)) => Ok(Number::ZERO),
            (Number::Int(a), Number::Int(b)) => Ok(Number::Int(Integer::mod_floor(a, b))),
            _ => match (self.integer(), rhs.integer()) {
                (Some(a), Some(b)) => Ok(Number::from_bigint(Integer::mod_floor(&a, &b))),
                _ => {
                    let (a, b) = (self.as_f64(), rhs.as_f64());
                    let r = a % b;
                    if r != 0.0 && (r < 0.0) != (b < 0.0) {
                        Ok(Number::Float(r + b))
                    } else {
                        Ok(Number::Float(r))
                    }
                }
            },
        }
    }

    /// Exponentiation.
    ///
    /// Integer bases with non-negative integer exponents stay exact
    /// integers unless the result would be astronomically large, in which
    /// case it is a float. Zero raised to a negative power faults.
    pub fn pow(self, rhs: Number) -> Result<Number, NumericFault> {
        if self.is_zero() && rhs.is_negative() {
            return Err(NumericFault::DivisionByZero);
        }
        if let Number::Int(exp) = rhs {
            if let Ok(exp) = u32::try_from(exp) {
                if let Number::Int(base) = self {
                    if let Some(value) = base.checked_pow(exp) {
                        return Ok(Number::Int(value));
                    }
                }
                if let Some(base) = self.integer() {
                    let bits = base.bits();
                    if bits <= 1 || bits.saturating_mul(u64::from(exp)) <= MAX_POW_BITS {
                        return Ok(Number::from_bigint(base.pow(exp)));
                    }
                }
            }
        }
        Ok(Number::Float(self.as_f64().powf(rhs.as_f64())))
    }

    /// Modular exponentiation `(self ** exponent) mod modulus`.
    ///
    /// Operands are truncated to integers. The result takes the sign of the
    /// modulus. A negative exponent uses the modular inverse of the base.
    pub fn mod_pow(self, exponent: Number, modulus: Number) -> Result<Number, NumericFault> {
        let m = modulus.to_bigint();
        if m.is_zero() {
            return Err(NumericFault::ModuloByZero);
        }
        let abs_m = m.abs();
        let mut base = Integer::mod_floor(&self.to_bigint(), &abs_m);
        let mut exp = exponent.to_bigint();
        if exp.is_negative() {
            base = mod_inverse(&base, &abs_m).ok_or(NumericFault::NotInvertible)?;
            exp = -exp;
        }

        let mut result = base.modpow(&exp, &abs_m);
        if m.is_negative() && !result.is_zero() {
            result -= &abs_m;
        }
        Ok(Number::from_bigint(result))
    }

    /// Numeric comparison across representations. Integers compare exactly
    /// against floats.
    ///
    /// Returns `None` when either side is `NaN`.
    pub fn compare(&self, rhs: &Number) -> Option<Ordering> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(b),
            (Number::Float(f), int) => compare_int_float(int, *f).map(Ordering::reverse),
            (int, Number::Float(f)) => compare_int_float(int, *f),
            (a, b) => Some(a.to_bigint().cmp(&b.to_bigint())),
        }
    }

    fn bitwise(
        self,
        rhs: Number,
        small: fn(i64, i64) -> i64,
        big: fn(BigInt, BigInt) -> BigInt,
    ) -> Number {
        match (self.integral(), rhs.integral()) {
            (Number::Int(a), Number::Int(b)) => Number::Int(small(a, b)),
            (a, b) => Number::from_bigint(big(a.to_bigint(), b.to_bigint())),
        }
    }

    /// Bitwise complement of the truncated integer.
    pub fn bit_not(self) -> Number {
        match self.integral() {
            Number::Int(i) => Number::Int(!i),
            big => Number::from_bigint(-big.to_bigint() - BigInt::one()),
        }
    }

    /// Bitwise and of the truncated integers.
    pub fn bit_and(self, rhs: Number) -> Number {
        self.bitwise(rhs, |a, b| a & b, |a, b| a & b)
    }

    /// Bitwise or of the truncated integers.
    pub fn bit_or(self, rhs: Number) -> Number {
        self.bitwise(rhs, |a, b| a | b, |a, b| a | b)
    }

    /// Bitwise exclusive or of the truncated integers.
    pub fn bit_xor(self, rhs: Number) -> Number {
        self.bitwise(rhs, |a, b| a ^ b, |a, b| a ^ b)
    }

    /// Left shift of the truncated integer. Negative amounts shift right.
    pub fn shl(self, amount: Number) -> Number {
        let value = self.integral();
        match amount.integral() {
            Number::Int(n) if n < 0 => value.shift_right(n.unsigned_abs()),
            Number::Int(n) => value.shift_left(n.unsigned_abs()),
            big if big.is_negative() => value.shift_right(u64::MAX),
            _ => value.shift_left(u64::MAX),
        }
    }

    /// Arithmetic right shift of the truncated integer. Negative amounts
    /// shift left.
    pub fn shr(self, amount: Number) -> Number {
        let value = self.integral();
        match amount.integral() {
            Number::Int(n) if n < 0 => value.shift_left(n.unsigned_abs()),
            Number::Int(n) => value.shift_right(n.unsigned_abs()),
            big if big.is_negative() => value.shift_left(u64::MAX),
            _ => value.shift_right(u64::MAX),
        }
    }

    fn shift_left(self, n: u64) -> Number {
        if self.is_zero() {
            return Number::ZERO;
        }
        if let Number::Int(value) = self {
            if n < 64 {
                let shifted = value << n;
                if shifted >> n == value {
                    return Number::Int(shifted);
                }
            }
        }
        match usize::try_from(n) {
            Ok(bits) if n <= MAX_SHIFT_BITS => Number::from_bigint(self.to_bigint() << bits),
            _ if self.is_negative() => Number::Float(f64::NEG_INFINITY),
            _ => Number::Float(f64::INFINITY),
        }
    }

    /// Rounds toward negative infinity, saturating at `0` or `-1`.
    fn shift_right(self, n: u64) -> Number {
        match self {
            Number::Int(value) if n < 64 => Number::Int(value >> n),
            Number::Big(value) if n <= MAX_SHIFT_BITS => match usize::try_from(n) {
                Ok(bits) => Number::from_bigint(value >> bits),
                Err(_) => Number::ZERO,
            },
            saturated if saturated.is_negative() => Number::Int(-1),
            _ => Number::ZERO,
        }
    }
}

/// Exact comparison of an integer against a float.
fn compare_int_float(int: &Number, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if let Number::Int(i) = int {
        if let Ok(small) = i32::try_from(*i) {
            return f64::from(small).partial_cmp(&f);
        }
    }
    if f.is_infinite() {
        return Some(if f > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let floor = f.floor();
    let whole = BigInt::from_f64(floor)?;
    match int.to_bigint().cmp(&whole) {
        Ordering::Equal if f > floor => Some(Ordering::Less),
        ord => Some(ord),
    }
}

/// Inverse of `a` modulo `m` (`m > 0`), via the extended Euclidean algorithm.
fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let (mut old_r, mut r) = (a.clone(), m.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }
    old_r.is_one().then(|| Integer::mod_floor(&old_s, m))
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(i64::from(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::from_bigint(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Number::from_bool(value)
    }
}

/// Integers print in full. Floats always carry a fractional part or an
/// exponent, with a signed two-digit exponent (`2.0`, `0.5`, `1e+16`,
/// `1.5e-07`), and `inf`/`nan` are spelled in lowercase.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Big(n) => write!(f, "{n}"),
            Number::Float(x) if x.is_nan() => f.write_str("nan"),
            Number::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "inf" } else { "-inf" })
            }
            Number::Float(x) => write_float(f, *x),
        }
    }
}

/// Shortest round-trip digits; exponent form below `1e-4` and from `1e16`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let repr = format!("{x:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&repr),
    }
}
