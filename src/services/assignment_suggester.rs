use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::settings::IntelligenceSettings;
use crate::models::task::ScheduledTask;
use crate::models::worker::{Worker, WorkerSpacePreference};
use crate::models::workload::{AssignmentReason, AssignmentSuggestion};
use crate::services::data_access::DataScope;
use crate::services::duration_estimator::DurationEstimator;
use crate::services::employee_scorer::EmployeeScorer;
use crate::services::workload_balancer::WorkloadBalancer;
use crate::utils::stats::round_to_u32;

/// Greedily proposes a worker for each unassigned task, in the order given.
pub struct AssignmentSuggester<'a> {
    settings: &'a IntelligenceSettings,
    estimator: DurationEstimator<'a>,
    scorer: EmployeeScorer<'a>,
    balancer: WorkloadBalancer<'a>,
}

/// Running state of one worker during a suggestion batch.
#[derive(Debug, Clone)]
struct WorkerSlot<'w> {
    worker: &'w Worker,
    assigned_minutes: u32,
    available_minutes: u32,
    overall_score: u32,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    slot: usize,
    score: f64,
    projected_load: f64,
    is_primary: bool,
}

impl<'a> AssignmentSuggester<'a> {
    pub fn new(settings: &'a IntelligenceSettings) -> Self {
        Self {
            settings,
            estimator: DurationEstimator::new(settings),
            scorer: EmployeeScorer::new(settings),
            balancer: WorkloadBalancer::new(settings),
        }
    }

    /// Tasks nobody is eligible for are left out of the result.
    pub fn suggest(
        &self,
        scope: &DataScope<'_>,
        household_id: &str,
        date: NaiveDate,
        unassigned: &[ScheduledTask],
    ) -> AppResult<Vec<AssignmentSuggestion>> {
        let workers = scope.active_workers(household_id)?;
        if workers.is_empty() || unassigned.is_empty() {
            return Ok(Vec::new());
        }

        let balances = self.balancer.balance(scope, household_id, date, None)?;
        let preferences = scope.store().get_worker_space_preferences(household_id)?;

        let mut slots = Vec::with_capacity(workers.len());
        for (worker, balance) in workers.iter().zip(balances.iter()) {
            let score = self.scorer.score(scope, worker)?;
            slots.push(WorkerSlot {
                worker,
                assigned_minutes: balance.assigned_minutes,
                available_minutes: balance.available_minutes,
                overall_score: score.overall_score,
            });
        }

        // Sequential on purpose: each pick changes the load seen by the next task.
        let mut suggestions = Vec::new();
        for task in unassigned {
            let minutes = self
                .estimator
                .estimate(scope, &task.task_id, &task.space_id)?
                .learned_minutes;

            let candidates = self.candidates(&slots, &preferences, task, minutes);
            let Some(best) = pick_best(&candidates) else {
                debug!(
                    target: "app::intelligence::assignment",
                    task_id = %task.task_id,
                    space_id = %task.space_id,
                    zone = %task.zone,
                    "no eligible worker, task needs manual assignment"
                );
                continue;
            };

            let reason = self.reason(&best, &candidates);
            let slot = &mut slots[best.slot];
            slot.assigned_minutes = slot.assigned_minutes.saturating_add(minutes);

            suggestions.push(AssignmentSuggestion {
                task_id: task.task_id.clone(),
                space_id: task.space_id.clone(),
                worker_id: slot.worker.id.clone(),
                worker_name: slot.worker.name.clone(),
                reason,
                justification: justification(reason, &slot.worker.name, best.projected_load),
                score: best.score,
                projected_utilization_percent: round_to_u32(best.projected_load * 100.0),
            });
        }

        info!(
            target: "app::intelligence::assignment",
            household_id,
            %date,
            requested = unassigned.len(),
            suggested = suggestions.len(),
            "suggested assignments"
        );

        Ok(suggestions)
    }

    /// `(1 - min(load, cap)) * w + primary + max(0, base - order * step) + overall/100 * w`
    pub fn assignment_score(
        &self,
        projected_load: f64,
        preference: Option<&WorkerSpacePreference>,
        overall_score: u32,
    ) -> f64 {
        let weights = &self.settings.assignment;
        let load_component = (1.0 - projected_load.min(weights.load_cap)) * weights.load_weight;
        let (primary_component, priority_component) = match preference {
            Some(preference) => (
                if preference.is_primary {
                    weights.primary_bonus
                } else {
                    0.0
                },
                (weights.priority_base - f64::from(preference.priority_order) * weights.priority_step)
                    .max(0.0),
            ),
            None => (0.0, 0.0),
        };
        let performance_component = f64::from(overall_score) / 100.0 * weights.performance_weight;

        load_component + primary_component + priority_component + performance_component
    }

    fn candidates(
        &self,
        slots: &[WorkerSlot<'_>],
        preferences: &[WorkerSpacePreference],
        task: &ScheduledTask,
        minutes: u32,
    ) -> Vec<Candidate> {
        slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let preference = preferences.iter().find(|preference| {
                    preference.worker_id == slot.worker.id && preference.space_id == task.space_id
                });
                if !slot.worker.zone.covers(task.zone) && preference.is_none() {
                    return None;
                }

                let projected_load = f64::from(slot.assigned_minutes.saturating_add(minutes))
                    / f64::from(slot.available_minutes.max(1));
                Some(Candidate {
                    slot: index,
                    score: self.assignment_score(projected_load, preference, slot.overall_score),
                    projected_load,
                    is_primary: preference.is_some_and(|preference| preference.is_primary),
                })
            })
            .collect()
    }

    fn reason(&self, best: &Candidate, candidates: &[Candidate]) -> AssignmentReason {
        if best.is_primary {
            return AssignmentReason::PrimaryAssignee;
        }
        let lightest = candidates.len() > 1
            && candidates
                .iter()
                .filter(|candidate| candidate.slot != best.slot)
                .all(|candidate| best.projected_load < candidate.projected_load);
        if lightest {
            AssignmentReason::LowerLoad
        } else {
            AssignmentReason::TeamBalance
        }
    }
}

/// Highest score wins; the first candidate keeps a tie.
fn pick_best(candidates: &[Candidate]) -> Option<Candidate> {
    candidates.iter().fold(None, |best: Option<Candidate>, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(*candidate),
    })
}

fn justification(reason: AssignmentReason, worker_name: &str, projected_load: f64) -> String {
    let percent = round_to_u32(projected_load * 100.0);
    match reason {
        AssignmentReason::PrimaryAssignee => {
            format!("{worker_name} is the primary assignee for this space ({percent}% projected load)")
        }
        AssignmentReason::LowerLoad => {
            format!("{worker_name} has the lightest projected load ({percent}%)")
        }
        AssignmentReason::TeamBalance => {
            format!("Assigned to {worker_name} to keep the team balanced ({percent}% projected load)")
        }
    }
}
