use common::plan::PlanTable;

use crate::dtos::sub::PlanResponse;

/// Plans on offer, cheapest quota first.
pub fn list_plans(plans: &PlanTable) -> Vec<PlanResponse> {
    plans
        .entries()
        .into_iter()
        .map(|(plan_id, plan)| PlanResponse {
            plan_id: plan_id.to_string(),
            name: plan.name.clone(),
            requests: plan.requests,
        })
        .collect()
}
