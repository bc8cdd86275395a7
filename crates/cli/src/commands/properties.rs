use serde_json::json;
use visita_core::PropertySearch;

use super::{core_context, CommandResult};

pub fn run(
    kind: Option<String>,
    max_price: Option<f64>,
    min_bedrooms: Option<u32>,
    location: Option<String>,
) -> CommandResult {
    let (_config, directory, _registry) = match core_context() {
        Ok(context) => context,
        Err(message) => return CommandResult::failure("properties", "config", message),
    };

    let criteria =
        PropertySearch { kind, max_price, min_bedrooms, location, ..PropertySearch::default() };
    let properties: Vec<serde_json::Value> = directory
        .search_properties(&criteria)
        .into_iter()
        .map(|property| {
            json!({
                "id": property.id,
                "title": property.title,
                "kind": property.kind,
                "price": property.price,
                "location": property.location,
                "bedrooms": property.bedrooms,
                "agent_id": property.agent_id,
                "available_for_visit": property.available_for_visit,
            })
        })
        .collect();

    CommandResult::success(
        "properties",
        json!({ "count": properties.len(), "properties": properties }),
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn price_ceiling_filters_listings() {
        let result = super::run(None, Some(900_000.0), None, None);
        assert_eq!(result.exit_code, 0);
        let parsed: serde_json::Value = serde_json::from_str(&result.output).expect("json");
        for property in parsed["result"]["properties"].as_array().expect("array") {
            assert!(property["price"].as_f64().expect("price") <= 900_000.0);
        }
    }
}
