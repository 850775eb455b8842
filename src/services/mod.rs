//! Domain services over the wire DTOs.

pub mod action_tracker;
pub mod bowtie;
pub mod cost_benefit;
pub mod register;
pub mod scoring;
