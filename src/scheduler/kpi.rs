//! Schedule quality metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from a schedule
//! snapshot and its problem.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Avg Utilization | Mean machine busyness over the makespan |
//! | Avg Flow Time | Mean time from release to completion |
//! | Weighted Completion | Σ priority × completion time |
//!
//! Flow time and weighted completion only count completed products.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{Problem, ScheduleSnapshot, Time};

/// Schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time.
    pub makespan: Time,
    /// Average machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Utilization per machine, indexed by machine id.
    pub utilization_by_machine: Vec<f64>,
    /// Average flow time: mean(completion - release).
    pub avg_flow_time: f64,
    /// Σ priority × completion time.
    pub weighted_completion_time: f64,
    /// Products whose every operation is placed.
    pub completed_products: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a snapshot and its problem.
    pub fn calculate(snapshot: &ScheduleSnapshot, problem: &Problem) -> Self {
        let makespan = snapshot.makespan();

        let mut total_flow_time = 0.0;
        let mut weighted_completion_time = 0.0;
        let mut completed_products = 0;

        for product in &problem.products {
            if snapshot.progress(product.id) != product.operation_count() {
                continue;
            }
            let Some(completion) = snapshot.product_completion_time(product.id) else {
                continue;
            };
            completed_products += 1;
            total_flow_time += (completion - product.release_time) as f64;
            weighted_completion_time += f64::from(product.priority) * completion as f64;
        }

        let utilization_by_machine: Vec<f64> = if makespan <= 0 {
            vec![0.0; snapshot.num_machines()]
        } else {
            snapshot
                .machine_schedules()
                .iter()
                .map(|placements| {
                    let busy: Time = placements.iter().map(|p| p.end_time - p.start_time).sum();
                    busy as f64 / makespan as f64
                })
                .collect()
        };

        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.iter().sum::<f64>() / utilization_by_machine.len() as f64
        };

        let avg_flow_time = if completed_products == 0 {
            0.0
        } else {
            total_flow_time / completed_products as f64
        };

        Self {
            makespan,
            avg_utilization,
            utilization_by_machine,
            avg_flow_time,
            weighted_completion_time,
            completed_products,
        }
    }
}
