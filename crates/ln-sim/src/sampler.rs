//! Binomial and Poisson variates for integer particle transfers.
//!
//! Every draw comes from the caller's generator, so a seeded generator
//! makes whole runs reproducible.

use ln_core::Real;
use rand::Rng;

/// Binomial draws switch to the Poisson limit at or above this many trials
pub const POISSON_MIN_TRIALS: u64 = 20;
/// when the success probability is at most this.
pub const POISSON_MAX_PROBABILITY: Real = 0.05;
/// Rates below this use inversion; others use multiplication of uniforms.
pub const INVERSION_MAX_RATE: Real = 30.0;
/// Hard cap on the inversion loop.
pub const INVERSION_MAX_K: u64 = 1000;
/// Largest rate handed to one multiplication run; `e^-rate` must stay well clear of underflow.
const MULTIPLICATION_CHUNK: Real = 500.0;

/// Number of successes in `n` trials with success probability `p`, in `[0, n]`.
///
/// Probabilities outside `[0, 1]` saturate.
pub fn binomial<R: Rng + ?Sized>(rng: &mut R, n: u64, p: Real) -> u64 {
    if n == 0 || p.is_nan() || p <= 0.0 {
        return 0;
    }
    if p >= 1.0 {
        return n;
    }
    if n >= POISSON_MIN_TRIALS && p <= POISSON_MAX_PROBABILITY {
        return poisson(rng, n as Real * p).min(n);
    }
    let mut successes = 0;
    for _ in 0..n {
        // Inclusive, so a draw of exactly `p` counts as a success.
        if rng.random::<Real>() <= p {
            successes += 1;
        }
    }
    successes
}

/// Poisson variate with rate `lambda`. Non-positive rates give 0.
pub fn poisson<R: Rng + ?Sized>(rng: &mut R, lambda: Real) -> u64 {
    if lambda.is_nan() || lambda <= 0.0 {
        return 0;
    }
    if lambda < INVERSION_MAX_RATE {
        poisson_inversion(rng, lambda)
    } else {
        poisson_multiplication(rng, lambda)
    }
}

/// Walk the CDF from `P(0) = e^-lambda` with `P(k) = P(k-1) * lambda / k`
/// until it reaches one uniform draw.
fn poisson_inversion<R: Rng + ?Sized>(rng: &mut R, lambda: Real) -> u64 {
    let u: Real = rng.random();
    let mut term = (-lambda).exp();
    let mut cumulative = term;
    if cumulative >= u {
        return 0;
    }
    let mut k = 1;
    while k < INVERSION_MAX_K {
        term *= lambda / k as Real;
        cumulative += term;
        if cumulative >= u {
            break;
        }
        k += 1;
    }
    k
}

/// Count how many uniforms can be multiplied in before the product drops to
/// `e^-lambda`. Large rates are split into chunks whose counts add up to the
/// same distribution.
fn poisson_multiplication<R: Rng + ?Sized>(rng: &mut R, lambda: Real) -> u64 {
    let mut remaining = lambda;
    let mut total = 0;
    while remaining > MULTIPLICATION_CHUNK {
        total += multiply_until(rng, MULTIPLICATION_CHUNK);
        remaining -= MULTIPLICATION_CHUNK;
    }
    total + multiply_until(rng, remaining)
}

fn multiply_until<R: Rng + ?Sized>(rng: &mut R, lambda: Real) -> u64 {
    let target = (-lambda).exp();
    let mut product: Real = rng.random();
    let mut k = 0;
    while product > target {
        product *= rng.random::<Real>();
        k += 1;
    }
    k
}
