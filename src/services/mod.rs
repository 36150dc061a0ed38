pub mod assignment_suggester;
pub mod data_access;
pub mod duration_estimator;
pub mod employee_scorer;
pub mod intelligence_service;
pub mod intelligence_summary;
pub mod issue_predictor;
pub mod settings_service;
pub mod workload_balancer;
