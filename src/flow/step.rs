//! Step descriptors and per-role flow plans.
//!
//! Each step declares *how* the sequencer may advance past it via
//! [`AdvanceStrategy`] — an explicit tag chosen at plan-build time, so
//! the orchestrator never string-matches step ids to pick behavior.

use serde::{Deserialize, Serialize};

use crate::flow::form::FormState;
use crate::locale::Role;
use crate::validate::{validate_personal, FieldErrors};

/// Stable step identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Personal,
    Experience,
    Education,
    CompanyDetails,
    SchoolDetails,
    Review,
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Personal => "personal",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::CompanyDetails => "company_details",
            Self::SchoolDetails => "school_details",
            Self::Review => "review",
        };
        write!(f, "{s}")
    }
}

/// How `advance()` treats a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceStrategy {
    /// Run the validator; advance on pass.
    ValidateOnly,
    /// Run the validator, then the registration gate; advance only once
    /// the side effect has succeeded (or a token already exists).
    ValidateAndRegister,
    /// Advance unconditionally — the step's own save action already
    /// validated and persisted its data.
    TrustChildSave,
}

/// One wizard step. Immutable once the plan is built; its position in
/// the plan is its index.
#[derive(Debug, Clone)]
pub struct StepDescriptor {
    pub id: StepId,
    /// Display name — the rendering layer's concern; opaque here.
    pub label: &'static str,
    pub strategy: AdvanceStrategy,
    pub validate: Option<fn(&FormState) -> FieldErrors>,
}

/// The ordered list of steps for one signup session.
#[derive(Debug, Clone)]
pub struct FlowPlan {
    steps: Vec<StepDescriptor>,
}

impl FlowPlan {
    /// Build the plan for a role. Locale-specific behavior lives in the
    /// validators and payload builder, which read the form's country.
    pub fn for_role(role: Role) -> Self {
        let mut steps = vec![StepDescriptor {
            id: StepId::Personal,
            label: "Personal information",
            strategy: AdvanceStrategy::ValidateAndRegister,
            validate: Some(validate_personal),
        }];

        match role {
            Role::Techie => {
                steps.push(StepDescriptor {
                    id: StepId::Experience,
                    label: "Work experience",
                    strategy: AdvanceStrategy::TrustChildSave,
                    validate: None,
                });
                steps.push(StepDescriptor {
                    id: StepId::Education,
                    label: "Education",
                    strategy: AdvanceStrategy::TrustChildSave,
                    validate: None,
                });
            }
            Role::HiringManager | Role::Company => {
                steps.push(StepDescriptor {
                    id: StepId::CompanyDetails,
                    label: "Company details",
                    strategy: AdvanceStrategy::TrustChildSave,
                    validate: None,
                });
            }
            Role::School => {
                steps.push(StepDescriptor {
                    id: StepId::SchoolDetails,
                    label: "School details",
                    strategy: AdvanceStrategy::TrustChildSave,
                    validate: None,
                });
            }
        }

        steps.push(StepDescriptor {
            id: StepId::Review,
            label: "Review & finish",
            strategy: AdvanceStrategy::ValidateOnly,
            validate: None,
        });

        Self { steps }
    }

    /// Build a plan from explicit descriptors (the flow configuration is
    /// supplied by the embedder; `for_role` is just the stock shape).
    pub fn from_steps(steps: Vec<StepDescriptor>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn techie_plan_shape() {
        let plan = FlowPlan::for_role(Role::Techie);
        let ids: Vec<StepId> = plan.steps().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                StepId::Personal,
                StepId::Experience,
                StepId::Education,
                StepId::Review
            ]
        );
    }

    #[test]
    fn company_roles_share_a_shape() {
        for role in [Role::HiringManager, Role::Company] {
            let plan = FlowPlan::for_role(role);
            let ids: Vec<StepId> = plan.steps().iter().map(|s| s.id).collect();
            assert_eq!(
                ids,
                vec![StepId::Personal, StepId::CompanyDetails, StepId::Review],
                "{role:?}"
            );
        }
    }

    #[test]
    fn school_plan_shape() {
        let plan = FlowPlan::for_role(Role::School);
        let ids: Vec<StepId> = plan.steps().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![StepId::Personal, StepId::SchoolDetails, StepId::Review]
        );
    }

    #[test]
    fn personal_is_the_only_register_gate() {
        for role in [Role::Techie, Role::HiringManager, Role::Company, Role::School] {
            let plan = FlowPlan::for_role(role);
            let gates: Vec<StepId> = plan
                .steps()
                .iter()
                .filter(|s| s.strategy == AdvanceStrategy::ValidateAndRegister)
                .map(|s| s.id)
                .collect();
            assert_eq!(gates, vec![StepId::Personal], "{role:?}");
        }
    }

    #[test]
    fn index_of_finds_steps() {
        let plan = FlowPlan::for_role(Role::Techie);
        assert_eq!(plan.index_of(StepId::Education), Some(2));
        assert_eq!(plan.index_of(StepId::CompanyDetails), None);
    }

    #[test]
    fn step_id_display_matches_serde() {
        let ids = [
            StepId::Personal,
            StepId::Experience,
            StepId::Education,
            StepId::CompanyDetails,
            StepId::SchoolDetails,
            StepId::Review,
        ];
        for id in ids {
            let display = format!("{id}");
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }
}
