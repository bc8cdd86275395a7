//! Directory lookups exposed as tools: agents and property listings.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use visita_core::{Directory, PropertySearch};

use super::Tool;

pub struct ListAgentsTool {
    directory: Arc<Directory>,
}

impl ListAgentsTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for ListAgentsTool {
    fn name(&self) -> &'static str {
        "list_agents"
    }

    fn description(&self) -> &'static str {
        "List all agency agents with specialities and languages"
    }

    async fn execute(&self, _input: Value) -> Result<Value> {
        let agents: Vec<Value> = self
            .directory
            .agents()
            .iter()
            .map(|agent| {
                json!({
                    "id": agent.id,
                    "name": agent.name,
                    "specialities": agent.specialities,
                    "languages": agent.languages,
                    "description": agent.description,
                })
            })
            .collect();
        Ok(json!({ "agents": agents }))
    }
}

pub struct GetAgentInfoTool {
    directory: Arc<Directory>,
}

impl GetAgentInfoTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for GetAgentInfoTool {
    fn name(&self) -> &'static str {
        "get_agent_info"
    }

    fn description(&self) -> &'static str {
        "Detailed profile of one agent by id (agent1..agent3)"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let agent_id = input.get("agent_id").and_then(Value::as_str).unwrap_or_default();
        match self.directory.agent(agent_id) {
            Ok(agent) => Ok(serde_json::to_value(agent)?),
            Err(error) => Ok(json!({ "error": error.to_string() })),
        }
    }
}

pub struct FindAgentBySpecialityTool {
    directory: Arc<Directory>,
}

impl FindAgentBySpecialityTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for FindAgentBySpecialityTool {
    fn name(&self) -> &'static str {
        "find_agent_by_speciality"
    }

    fn description(&self) -> &'static str {
        "Find agents specialized in a given domain (e.g. Luxury, Office)"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let speciality = input.get("speciality").and_then(Value::as_str).unwrap_or_default();
        let matches: Vec<Value> = self
            .directory
            .agents_by_speciality(speciality)
            .into_iter()
            .map(|agent| {
                json!({
                    "id": agent.id,
                    "name": agent.name,
                    "specialities": agent.specialities,
                    "description": agent.description,
                })
            })
            .collect();
        Ok(json!({ "agents": matches }))
    }
}

pub struct ListPropertiesTool {
    directory: Arc<Directory>,
}

impl ListPropertiesTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for ListPropertiesTool {
    fn name(&self) -> &'static str {
        "list_properties"
    }

    fn description(&self) -> &'static str {
        "List property listings, optionally filtered by kind/price/location"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let criteria: PropertySearch = serde_json::from_value(input).unwrap_or_default();
        let properties: Vec<Value> = self
            .directory
            .search_properties(&criteria)
            .into_iter()
            .map(summary)
            .collect();
        Ok(json!({ "properties": properties }))
    }
}

pub struct GetPropertyInfoTool {
    directory: Arc<Directory>,
}

impl GetPropertyInfoTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for GetPropertyInfoTool {
    fn name(&self) -> &'static str {
        "get_property_info"
    }

    fn description(&self) -> &'static str {
        "Full details of one property listing by id (prop1..prop6)"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let property_id = input.get("property_id").and_then(Value::as_str).unwrap_or_default();
        match self.directory.property(property_id) {
            Ok(property) => Ok(serde_json::to_value(property)?),
            Err(error) => Ok(json!({ "error": error.to_string() })),
        }
    }
}

fn summary(property: &visita_core::PropertyListing) -> Value {
    json!({
        "id": property.id,
        "title": property.title,
        "kind": property.kind,
        "price": property.price,
        "location": property.location,
        "surface_sqm": property.surface_sqm,
        "rooms": property.rooms,
        "bedrooms": property.bedrooms,
        "agent_id": property.agent_id,
    })
}
