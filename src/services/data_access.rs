use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::error::AppResult;
use crate::models::task::{ScheduledTask, TaskCompletionRecord, TaskDefinition};
use crate::models::worker::{Worker, WorkerSpacePreference};

/// Read-only view of the household data the engine reasons over.
///
/// Implementations own query mechanics and retries; the engine only reads and
/// propagates failures.
pub trait IntelligenceStore: Send + Sync {
    /// Completed instances with a measured duration, newest first.
    fn get_completions(
        &self,
        task_id: &str,
        space_id: &str,
        limit: usize,
    ) -> AppResult<Vec<TaskCompletionRecord>>;

    /// Instances assigned to the worker in any status, newest first.
    fn get_worker_history(
        &self,
        worker_id: &str,
        limit: usize,
    ) -> AppResult<Vec<TaskCompletionRecord>>;

    fn get_active_workers(&self, household_id: &str) -> AppResult<Vec<Worker>>;

    fn get_worker(&self, worker_id: &str) -> AppResult<Option<Worker>>;

    fn get_scheduled_tasks(
        &self,
        household_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<ScheduledTask>>;

    fn get_worker_space_preferences(
        &self,
        household_id: &str,
    ) -> AppResult<Vec<WorkerSpacePreference>>;

    fn get_task_definition(
        &self,
        task_id: &str,
        space_id: &str,
    ) -> AppResult<Option<TaskDefinition>>;

    fn list_household_tasks(&self, household_id: &str) -> AppResult<Vec<TaskDefinition>>;
}

type TaskKey = (String, String);

/// Lookups for a single top-level call. Each distinct key hits the store at
/// most once; the scope is dropped when the call returns, so nothing survives
/// between calls.
pub struct DataScope<'a> {
    store: &'a dyn IntelligenceStore,
    completions: RefCell<HashMap<(TaskKey, usize), Rc<Vec<TaskCompletionRecord>>>>,
    definitions: RefCell<HashMap<TaskKey, Option<TaskDefinition>>>,
    histories: RefCell<HashMap<(String, usize), Rc<Vec<TaskCompletionRecord>>>>,
    active_workers: RefCell<HashMap<String, Rc<Vec<Worker>>>>,
}

impl<'a> DataScope<'a> {
    pub fn new(store: &'a dyn IntelligenceStore) -> Self {
        Self {
            store,
            completions: RefCell::new(HashMap::new()),
            definitions: RefCell::new(HashMap::new()),
            histories: RefCell::new(HashMap::new()),
            active_workers: RefCell::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &'a dyn IntelligenceStore {
        self.store
    }

    pub fn completions(
        &self,
        task_id: &str,
        space_id: &str,
        limit: usize,
    ) -> AppResult<Rc<Vec<TaskCompletionRecord>>> {
        let key = ((task_id.to_string(), space_id.to_string()), limit);
        if let Some(cached) = self.completions.borrow().get(&key) {
            return Ok(Rc::clone(cached));
        }

        let records = Rc::new(self.store.get_completions(task_id, space_id, limit)?);
        self.completions
            .borrow_mut()
            .insert(key, Rc::clone(&records));
        Ok(records)
    }

    pub fn task_definition(
        &self,
        task_id: &str,
        space_id: &str,
    ) -> AppResult<Option<TaskDefinition>> {
        let key = (task_id.to_string(), space_id.to_string());
        if let Some(cached) = self.definitions.borrow().get(&key) {
            return Ok(cached.clone());
        }

        let definition = self.store.get_task_definition(task_id, space_id)?;
        self.definitions
            .borrow_mut()
            .insert(key, definition.clone());
        Ok(definition)
    }

    pub fn worker_history(
        &self,
        worker_id: &str,
        limit: usize,
    ) -> AppResult<Rc<Vec<TaskCompletionRecord>>> {
        let key = (worker_id.to_string(), limit);
        if let Some(cached) = self.histories.borrow().get(&key) {
            return Ok(Rc::clone(cached));
        }

        let records = Rc::new(self.store.get_worker_history(worker_id, limit)?);
        self.histories.borrow_mut().insert(key, Rc::clone(&records));
        Ok(records)
    }

    pub fn active_workers(&self, household_id: &str) -> AppResult<Rc<Vec<Worker>>> {
        if let Some(cached) = self.active_workers.borrow().get(household_id) {
            return Ok(Rc::clone(cached));
        }

        let workers = Rc::new(self.store.get_active_workers(household_id)?);
        self.active_workers
            .borrow_mut()
            .insert(household_id.to_string(), Rc::clone(&workers));
        Ok(workers)
    }
}
