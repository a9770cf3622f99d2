//! 0/1 linear model definition.

use super::variables::{BinaryVar, VarId};

/// Relation between a row's left-hand side and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `sum(terms) == rhs`
    Equal,
    /// `sum(terms) <= rhs`
    AtMost,
}

/// A linear constraint with unit coefficients over binary variables.
///
/// Every scheduling constraint family (coverage, exclusivity, presenter
/// non-overlap) is a set partitioning or set packing row, so general
/// coefficients are not needed.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Row name, used in diagnostics only.
    pub name: String,
    /// Variables whose sum is constrained.
    pub terms: Vec<VarId>,
    pub sense: Sense,
    pub rhs: u32,
}

impl LinearConstraint {
    /// Whether the row holds under the given full assignment.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let ones = self
            .terms
            .iter()
            .filter(|v| values.get(v.index()).copied().unwrap_or(false))
            .count() as u64;
        match self.sense {
            Sense::Equal => ones == u64::from(self.rhs),
            Sense::AtMost => ones <= u64::from(self.rhs),
        }
    }
}

/// Objective function of a [`BinaryModel`].
#[derive(Debug, Clone)]
pub enum Objective {
    /// Maximize `sum(weights[i] * x[i])`. One weight per variable.
    Maximize { weights: Vec<f64> },

    /// Minimize `sum(weights[i] * x[i])`. One weight per variable.
    Minimize { weights: Vec<f64> },

    /// Any feasible assignment is optimal.
    Feasibility,
}

impl Objective {
    /// Returns per-variable weights in maximization form.
    ///
    /// `Minimize` is negated; `Feasibility` weighs every variable zero.
    pub fn maximization_weights(&self, var_count: usize) -> Vec<f64> {
        match self {
            Objective::Maximize { weights } => weights.clone(),
            Objective::Minimize { weights } => weights.iter().map(|w| -w).collect(),
            Objective::Feasibility => vec![0.0; var_count],
        }
    }

    /// Evaluates the objective in its own sense for a full assignment.
    pub fn evaluate(&self, values: &[bool]) -> f64 {
        match self {
            Objective::Maximize { weights } | Objective::Minimize { weights } => weights
                .iter()
                .zip(values)
                .filter(|(_, on)| **on)
                .map(|(w, _)| *w)
                .sum(),
            Objective::Feasibility => 0.0,
        }
    }
}

/// A binary linear optimization model.
///
/// # Examples
///
/// ```
/// use u_confsched::model::{BinaryModel, BinaryVar, Objective};
///
/// let mut model = BinaryModel::new("example");
/// let a = model.add_var(BinaryVar::new("a"));
/// let b = model.add_var(BinaryVar::new("b"));
/// model.add_exactly_one("pick", vec![a, b]);
/// model.set_objective(Objective::Maximize { weights: vec![1.0, 2.0] });
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryModel {
    /// Model name.
    pub name: String,
    /// Variables, indexed by [`VarId`].
    pub vars: Vec<BinaryVar>,
    /// Constraint rows.
    pub constraints: Vec<LinearConstraint>,
    /// Objective function.
    pub objective: Objective,
}

impl BinaryModel {
    /// Creates an empty feasibility model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::Feasibility,
        }
    }

    /// Adds a variable and returns its id.
    pub fn add_var(&mut self, var: BinaryVar) -> VarId {
        self.vars.push(var);
        VarId(self.vars.len() - 1)
    }

    /// Adds a constraint row.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: `sum(terms) == 1`.
    pub fn add_exactly_one(&mut self, name: impl Into<String>, terms: Vec<VarId>) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            sense: Sense::Equal,
            rhs: 1,
        });
    }

    /// Convenience: `sum(terms) <= 1`.
    pub fn add_at_most_one(&mut self, name: impl Into<String>, terms: Vec<VarId>) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            sense: Sense::AtMost,
            rhs: 1,
        });
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    /// Validates the model for consistency.
    ///
    /// Checks that all referenced variables exist, that no row repeats a
    /// variable, and that objective weights match the variables.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.vars.len();
        for c in &self.constraints {
            let mut seen = vec![false; n];
            for v in &c.terms {
                if v.index() >= n {
                    return Err(format!("{}: undefined variable {v}", c.name));
                }
                if seen[v.index()] {
                    return Err(format!("{}: variable {v} repeated", c.name));
                }
                seen[v.index()] = true;
            }
        }
        match &self.objective {
            Objective::Maximize { weights } | Objective::Minimize { weights } => {
                if weights.len() != n {
                    return Err(format!(
                        "objective has {} weights for {n} variables",
                        weights.len()
                    ));
                }
                if let Some(i) = weights.iter().position(|w| !w.is_finite()) {
                    return Err(format!("objective weight of x{i} is not finite"));
                }
            }
            Objective::Feasibility => {}
        }
        Ok(())
    }

    /// Whether a full assignment satisfies every row and fixing.
    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.vars.len()
            && self
                .vars
                .iter()
                .zip(values)
                .all(|(var, &on)| var.fixed.is_none_or(|f| f == on))
            && self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    /// For each variable, the indices of the rows it appears in.
    pub fn constraints_of(&self) -> Vec<Vec<usize>> {
        let mut rows = vec![Vec::new(); self.vars.len()];
        for (ci, c) in self.constraints.iter().enumerate() {
            for v in &c.terms {
                if let Some(list) = rows.get_mut(v.index()) {
                    list.push(ci);
                }
            }
        }
        rows
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
