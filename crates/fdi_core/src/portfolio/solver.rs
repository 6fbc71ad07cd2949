//! Minimum-variance solver over the capped simplex
//!
//! Minimizes `wᵀΣw` subject to `Σw = 1`, `lower ≤ w ≤ upper` and a linear
//! return constraint. The simplex and box constraints are enforced exactly by
//! projection; the return constraint is handled by an augmented Lagrangian
//! outer loop. Each outer step solves its subproblem with accelerated
//! projected gradient (FISTA with adaptive restart).
//!
//! Every loop has a fixed budget, so the solver always terminates.

use serde::{Deserialize, Serialize};

use crate::model::CovarianceMatrix;

/// Bisection steps when projecting onto the capped simplex
const PROJECTION_ITERATIONS: usize = 100;

/// Required shrink factor of the constraint residual between outer steps
const RESIDUAL_SHRINK: f64 = 0.25;

/// Why the solver stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Constraints satisfied and the subproblem is stationary
    Converged,
    /// Iteration budget exhausted before convergence
    MaxIterationsReached,
    /// No weight vector satisfies the bounds and the return constraint
    Infeasible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnConstraint {
    /// `w·r ≥ target`
    AtLeast,
    /// `w·r = target`
    Exactly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub lower: f64,
    pub upper: f64,
}

impl WeightBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Whether some weight vector in the box sums to 1
    pub fn admits_simplex(&self, n: usize) -> bool {
        let n = n as f64;
        self.lower <= self.upper && self.lower * n <= 1.0 + 1e-12 && self.upper * n >= 1.0 - 1e-12
    }
}

/// A single minimum-variance problem
///
/// `expected_returns.len()` must equal `covariance.dim()`.
#[derive(Debug, Clone, Copy)]
pub struct MinVarianceProblem<'a> {
    pub covariance: &'a CovarianceMatrix,
    pub expected_returns: &'a [f64],
    pub target_return: f64,
    pub constraint: ReturnConstraint,
    pub bounds: WeightBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub max_outer_iterations: usize,
    pub max_inner_iterations: usize,
    /// Allowed slack on the return constraint
    pub feasibility_tolerance: f64,
    /// Gradient-mapping norm at which a subproblem counts as solved
    pub stationarity_tolerance: f64,
    pub initial_penalty: f64,
    pub penalty_growth: f64,
    pub max_penalty: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_outer_iterations: 40,
            max_inner_iterations: 2_000,
            feasibility_tolerance: 1e-7,
            stationarity_tolerance: 1e-8,
            initial_penalty: 10.0,
            penalty_growth: 10.0,
            max_penalty: 1e6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    /// Always on the capped simplex unless the result is `Infeasible`
    pub weights: Vec<f64>,
    pub termination: TerminationReason,
    /// Total inner iterations
    pub iterations: usize,
    /// Amount by which the return constraint is violated
    pub constraint_violation: f64,
}

impl SolverOutcome {
    fn infeasible() -> Self {
        Self {
            weights: Vec::new(),
            termination: TerminationReason::Infeasible,
            iterations: 0,
            constraint_violation: f64::INFINITY,
        }
    }

    pub fn converged(&self) -> bool {
        self.termination == TerminationReason::Converged
    }
}

/// Solve a minimum-variance problem.
///
/// Pure function of its inputs: no state is carried between calls.
pub fn solve_min_variance(
    problem: &MinVarianceProblem<'_>,
    settings: &SolverSettings,
) -> SolverOutcome {
    let returns = problem.expected_returns;
    let n = returns.len();
    let WeightBounds { lower, upper } = problem.bounds;

    if n == 0 || n != problem.covariance.dim() || !problem.bounds.admits_simplex(n) {
        return SolverOutcome::infeasible();
    }

    let tolerance = settings.feasibility_tolerance;
    let target = problem.target_return;
    let (min_return, max_return) = achievable_return_range(returns, lower, upper);
    let out_of_reach = match problem.constraint {
        ReturnConstraint::AtLeast => target > max_return + tolerance,
        ReturnConstraint::Exactly => {
            target > max_return + tolerance || target < min_return - tolerance
        }
    };
    if out_of_reach {
        return SolverOutcome::infeasible();
    }

    let return_norm_sq: f64 = returns.iter().map(|r| r * r).sum();
    let curvature = 2.0 * problem.covariance.gershgorin_bound();

    let mut weights = project_capped_simplex(&vec![1.0 / n as f64; n], lower, upper);
    let mut multiplier = 0.0;
    let mut penalty = settings.initial_penalty;
    let mut last_residual = f64::INFINITY;
    let mut iterations = 0;

    for _ in 0..settings.max_outer_iterations {
        let lipschitz = (curvature + penalty * return_norm_sq).max(f64::EPSILON);
        let inner = minimize_subproblem(problem, &weights, multiplier, penalty, lipschitz, settings);
        iterations += inner.iterations;
        weights = inner.weights;

        let gap = target - dot(returns, &weights);
        let residual = match problem.constraint {
            ReturnConstraint::AtLeast => gap.max(-multiplier / penalty).abs(),
            ReturnConstraint::Exactly => gap.abs(),
        };

        if residual <= tolerance && inner.stationary {
            return SolverOutcome {
                weights,
                termination: TerminationReason::Converged,
                iterations,
                constraint_violation: violation(problem.constraint, gap),
            };
        }

        multiplier = match problem.constraint {
            ReturnConstraint::AtLeast => (multiplier + penalty * gap).max(0.0),
            ReturnConstraint::Exactly => multiplier + penalty * gap,
        };
        if residual > RESIDUAL_SHRINK * last_residual {
            penalty = (penalty * settings.penalty_growth).min(settings.max_penalty);
        }
        last_residual = residual;
    }

    let gap = target - dot(returns, &weights);
    SolverOutcome {
        weights,
        termination: TerminationReason::MaxIterationsReached,
        iterations,
        constraint_violation: violation(problem.constraint, gap),
    }
}

struct InnerResult {
    weights: Vec<f64>,
    iterations: usize,
    stationary: bool,
}

fn minimize_subproblem(
    problem: &MinVarianceProblem<'_>,
    start: &[f64],
    multiplier: f64,
    penalty: f64,
    lipschitz: f64,
    settings: &SolverSettings,
) -> InnerResult {
    let WeightBounds { lower, upper } = problem.bounds;
    let step = 1.0 / lipschitz;

    let mut x = start.to_vec();
    let mut y = x.clone();
    let mut t = 1.0_f64;

    for k in 1..=settings.max_inner_iterations {
        let grad = augmented_gradient(problem, &y, multiplier, penalty);
        let trial: Vec<f64> = y.iter().zip(&grad).map(|(yi, gi)| yi - step * gi).collect();
        let next = project_capped_simplex(&trial, lower, upper);

        let mapping = next
            .iter()
            .zip(&y)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f64, f64::max)
            * lipschitz;
        if mapping <= settings.stationarity_tolerance {
            return InnerResult {
                weights: next,
                iterations: k,
                stationary: true,
            };
        }

        // Restart momentum when it points against the last step
        let restart = y
            .iter()
            .zip(&next)
            .zip(&x)
            .map(|((yi, ni), xi)| (yi - ni) * (ni - xi))
            .sum::<f64>()
            > 0.0;
        let (t_next, momentum) = if restart {
            (1.0, 0.0)
        } else {
            let t_next = (1.0 + (1.0 + 4.0 * t * t).sqrt()) / 2.0;
            (t_next, (t - 1.0) / t_next)
        };

        y = next
            .iter()
            .zip(&x)
            .map(|(ni, xi)| ni + momentum * (ni - xi))
            .collect();
        x = next;
        t = t_next;
    }

    InnerResult {
        weights: x,
        iterations: settings.max_inner_iterations,
        stationary: false,
    }
}

/// Gradient of `wᵀΣw` plus the augmented return-constraint term
fn augmented_gradient(
    problem: &MinVarianceProblem<'_>,
    weights: &[f64],
    multiplier: f64,
    penalty: f64,
) -> Vec<f64> {
    let returns = problem.expected_returns;
    let gap = problem.target_return - dot(returns, weights);
    let pull = match problem.constraint {
        ReturnConstraint::AtLeast => (multiplier + penalty * gap).max(0.0),
        ReturnConstraint::Exactly => multiplier + penalty * gap,
    };

    problem
        .covariance
        .mul_vec(weights)
        .iter()
        .zip(returns)
        .map(|(sw, r)| 2.0 * sw - pull * r)
        .collect()
}

fn violation(constraint: ReturnConstraint, gap: f64) -> f64 {
    match constraint {
        ReturnConstraint::AtLeast => gap.max(0.0),
        ReturnConstraint::Exactly => gap.abs(),
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Lowest and highest portfolio return reachable on the capped simplex
fn achievable_return_range(returns: &[f64], lower: f64, upper: f64) -> (f64, f64) {
    let mut order: Vec<usize> = (0..returns.len()).collect();
    order.sort_by(|&a, &b| returns[b].total_cmp(&returns[a]));

    let max = greedy_return(returns, order.iter().copied(), lower, upper);
    let min = greedy_return(returns, order.iter().rev().copied(), lower, upper);
    (min, max)
}

/// Fill weights above the lower bound in the given order
fn greedy_return(
    returns: &[f64],
    order: impl Iterator<Item = usize>,
    lower: f64,
    upper: f64,
) -> f64 {
    let mut remaining = 1.0 - lower * returns.len() as f64;
    let mut total = lower * returns.iter().sum::<f64>();
    for i in order {
        let extra = remaining.min(upper - lower).max(0.0);
        total += extra * returns[i];
        remaining -= extra;
    }
    total
}

/// Euclidean projection onto `{w : Σw = 1, lower ≤ w ≤ upper}`.
///
/// Bisects the shift `τ` with `Σ clamp(v - τ, lower, upper) = 1`. Callers
/// must ensure the set is non-empty.
pub fn project_capped_simplex(values: &[f64], lower: f64, upper: f64) -> Vec<f64> {
    let shifted = |tau: f64| values.iter().map(move |v| (v - tau).clamp(lower, upper));

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min) - upper;
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max) - lower;
    for _ in 0..PROJECTION_ITERATIONS {
        let tau = 0.5 * (lo + hi);
        if shifted(tau).sum::<f64>() > 1.0 {
            lo = tau;
        } else {
            hi = tau;
        }
    }
    shifted(0.5 * (lo + hi)).collect()
}
