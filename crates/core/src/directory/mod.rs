//! Static agent and property directories for the demo agency.
//!
//! Lookup tables only: the data ships with the binary, and the `Directory`
//! is built once per process and injected wherever lookups are needed.

mod agents;
mod properties;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::SchedulingError;

#[derive(Clone, Debug, Serialize)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialities: Vec<String>,
    pub languages: Vec<String>,
    /// Weekday name to "HH:MM-HH:MM" blocks; empty vec means closed.
    pub working_hours: BTreeMap<String, Vec<String>>,
    pub description: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyListing {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub price: f64,
    pub location: String,
    pub surface_sqm: f64,
    pub rooms: u32,
    pub bedrooms: u32,
    pub description: String,
    pub features: Vec<String>,
    pub available_for_visit: bool,
    pub agent_id: String,
}

/// Filters for property search; all fields are conjunctive when present.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct PropertySearch {
    pub kind: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_surface: Option<f64>,
    pub max_surface: Option<f64>,
    pub min_bedrooms: Option<u32>,
    pub location: Option<String>,
    pub agent_id: Option<String>,
}

pub struct Directory {
    agents: Vec<AgentProfile>,
    properties: Vec<PropertyListing>,
}

impl Directory {
    /// The built-in demo dataset: three agents, six listings.
    pub fn demo() -> Self {
        Self { agents: agents::demo_agents(), properties: properties::demo_properties() }
    }

    pub fn agents(&self) -> &[AgentProfile] {
        &self.agents
    }

    pub fn agent(&self, agent_id: &str) -> Result<&AgentProfile, SchedulingError> {
        self.agents
            .iter()
            .find(|agent| agent.id == agent_id)
            .ok_or_else(|| SchedulingError::not_found("agent", agent_id))
    }

    pub fn agents_by_speciality(&self, speciality: &str) -> Vec<&AgentProfile> {
        let needle = speciality.to_lowercase();
        self.agents
            .iter()
            .filter(|agent| agent.specialities.iter().any(|s| s.to_lowercase() == needle))
            .collect()
    }

    pub fn properties(&self) -> &[PropertyListing] {
        &self.properties
    }

    pub fn property(&self, property_id: &str) -> Result<&PropertyListing, SchedulingError> {
        self.properties
            .iter()
            .find(|property| property.id == property_id)
            .ok_or_else(|| SchedulingError::not_found("property", property_id))
    }

    pub fn search_properties(&self, criteria: &PropertySearch) -> Vec<&PropertyListing> {
        self.properties
            .iter()
            .filter(|p| matches_criteria(p, criteria))
            .collect()
    }
}

fn matches_criteria(property: &PropertyListing, criteria: &PropertySearch) -> bool {
    if let Some(kind) = &criteria.kind {
        if !property.kind.eq_ignore_ascii_case(kind) {
            return false;
        }
    }
    if let Some(min) = criteria.min_price {
        if property.price < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_price {
        if property.price > max {
            return false;
        }
    }
    if let Some(min) = criteria.min_surface {
        if property.surface_sqm < min {
            return false;
        }
    }
    if let Some(max) = criteria.max_surface {
        if property.surface_sqm > max {
            return false;
        }
    }
    if let Some(min) = criteria.min_bedrooms {
        if property.bedrooms < min {
            return false;
        }
    }
    if let Some(location) = &criteria.location {
        if !property.location.to_lowercase().contains(&location.to_lowercase()) {
            return false;
        }
    }
    if let Some(agent_id) = &criteria.agent_id {
        if &property.agent_id != agent_id {
            return false;
        }
    }
    true
}
