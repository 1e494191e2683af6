use std::collections::HashMap;

use serde::Serialize;

use crate::error::{AppError, Res};

/// What a subscription plan grants: a display name and how many design
/// requests the subscriber may have open at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntitlement {
    pub name: String,
    pub requests: i32,
}

impl PlanEntitlement {
    pub fn new(name: &str, requests: i32) -> Self {
        Self {
            name: name.to_string(),
            requests,
        }
    }

    /// Written for plan ids the table does not know.
    pub fn unknown() -> Self {
        Self::new("Unknown", 0)
    }
}

/// Lookup from the payment provider's plan id to the entitlement it grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanTable {
    plans: HashMap<String, PlanEntitlement>,
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::from_entries([
            ("P-weekly", PlanEntitlement::new("Weekly", 1)),
            ("P-weekly+", PlanEntitlement::new("Weekly+", 2)),
            ("P-weekly++", PlanEntitlement::new("Weekly++", 3)),
        ])
    }
}

impl PlanTable {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, PlanEntitlement)>) -> Self {
        Self {
            plans: entries
                .into_iter()
                .map(|(id, plan)| (id.to_string(), plan))
                .collect(),
        }
    }

    /// Parses `P-id=Name:requests` pairs separated by commas.
    pub fn parse(table: &str) -> Res<Self> {
        let mut plans = HashMap::new();
        for entry in table.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (id, rest) = entry
                .split_once('=')
                .ok_or_else(|| AppError::Internal(format!("Plan entry without '=': {}", entry)))?;
            let (name, requests) = rest
                .rsplit_once(':')
                .ok_or_else(|| AppError::Internal(format!("Plan entry without ':': {}", entry)))?;
            let requests = requests.trim().parse::<i32>().map_err(|e| {
                AppError::Internal(format!("Invalid request quota in '{}': {}", entry, e))
            })?;
            if requests < 0 {
                return Err(AppError::Internal(format!(
                    "Negative request quota in '{}'",
                    entry
                )));
            }
            plans.insert(
                id.trim().to_string(),
                PlanEntitlement::new(name.trim(), requests),
            );
        }
        if plans.is_empty() {
            return Err(AppError::Internal("Plan table is empty".to_string()));
        }
        Ok(Self { plans })
    }

    pub fn get(&self, plan_id: &str) -> Option<&PlanEntitlement> {
        self.plans.get(plan_id)
    }

    /// Known plans ordered by quota, then id.
    pub fn entries(&self) -> Vec<(&str, &PlanEntitlement)> {
        let mut entries: Vec<_> = self
            .plans
            .iter()
            .map(|(id, plan)| (id.as_str(), plan))
            .collect();
        entries.sort_by(|a, b| a.1.requests.cmp(&b.1.requests).then(a.0.cmp(b.0)));
        entries
    }
}

/// What to do with an activation whose plan id is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPlanPolicy {
    /// Activate with the zero-quota `Unknown` plan.
    #[default]
    Sentinel,
    /// Refuse the event without writing.
    Reject,
}

impl std::str::FromStr for UnknownPlanPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Res<Self> {
        match s.to_lowercase().as_str() {
            "sentinel" => Ok(UnknownPlanPolicy::Sentinel),
            "reject" => Ok(UnknownPlanPolicy::Reject),
            other => Err(AppError::Internal(format!(
                "Unknown plan policy: {}",
                other
            ))),
        }
    }
}
