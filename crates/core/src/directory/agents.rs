use std::collections::BTreeMap;

use super::AgentProfile;

const WEEKDAY_BLOCKS: [&str; 2] = ["09:00-12:00", "14:00-18:00"];

fn hours(saturday: &[&str]) -> BTreeMap<String, Vec<String>> {
    let mut table = BTreeMap::new();
    for day in ["monday", "tuesday", "wednesday", "thursday", "friday"] {
        table.insert(day.to_string(), WEEKDAY_BLOCKS.iter().map(|b| b.to_string()).collect());
    }
    table.insert("saturday".to_string(), saturday.iter().map(|b| b.to_string()).collect());
    table.insert("sunday".to_string(), Vec::new());
    table
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub(super) fn demo_agents() -> Vec<AgentProfile> {
    vec![
        AgentProfile {
            id: "agent1".to_string(),
            name: "Marie Dubois".to_string(),
            email: "marie.dubois@agence-immobiliere.fr".to_string(),
            phone: "+33 1 23 45 67 89".to_string(),
            specialities: strings(&["Apartment", "House", "Rental investment"]),
            languages: strings(&["French", "English"]),
            working_hours: hours(&["09:00-12:00"]),
            description: "Specialist in family homes and rental investment. \
                          Over ten years of experience."
                .to_string(),
        },
        AgentProfile {
            id: "agent2".to_string(),
            name: "Pierre Martin".to_string(),
            email: "pierre.martin@agence-immobiliere.fr".to_string(),
            phone: "+33 1 23 45 67 90".to_string(),
            specialities: strings(&["Office", "Retail", "Land"]),
            languages: strings(&["French", "Spanish"]),
            working_hours: hours(&[]),
            description: "Commercial real-estate expert focused on B2B transactions."
                .to_string(),
        },
        AgentProfile {
            id: "agent3".to_string(),
            name: "Sophie Bernard".to_string(),
            email: "sophie.bernard@agence-immobiliere.fr".to_string(),
            phone: "+33 1 23 45 67 91".to_string(),
            specialities: strings(&["Luxury", "Villa", "Penthouse", "International"]),
            languages: strings(&["French", "English", "Italian"]),
            working_hours: hours(&["10:00-16:00"]),
            description: "Luxury market specialist with an international client base. \
                          Over fifteen years of experience."
                .to_string(),
        },
    ]
}
