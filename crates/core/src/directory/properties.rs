use super::PropertyListing;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub(super) fn demo_properties() -> Vec<PropertyListing> {
    vec![
        PropertyListing {
            id: "prop1".to_string(),
            title: "Modern 3-room apartment - Latin Quarter".to_string(),
            kind: "Apartment".to_string(),
            price: 450_000.0,
            location: "5th arrondissement, Paris".to_string(),
            surface_sqm: 65.0,
            rooms: 3,
            bedrooms: 2,
            description: "Tastefully renovated apartment in the historic heart of the \
                          Latin Quarter, close to transport and shops."
                .to_string(),
            features: strings(&["Balcony", "Elevator", "Cellar", "Double glazing"]),
            available_for_visit: true,
            agent_id: "agent1".to_string(),
        },
        PropertyListing {
            id: "prop2".to_string(),
            title: "Family house with garden - Neuilly-sur-Seine".to_string(),
            kind: "House".to_string(),
            price: 1_200_000.0,
            location: "Neuilly-sur-Seine, 92".to_string(),
            surface_sqm: 180.0,
            rooms: 5,
            bedrooms: 4,
            description: "Beautiful family house with landscaped garden, garage and \
                          terrace. Ideal for a family with children."
                .to_string(),
            features: strings(&["Garden", "Garage", "Terrace", "Fireplace", "Fitted kitchen"]),
            available_for_visit: true,
            agent_id: "agent1".to_string(),
        },
        PropertyListing {
            id: "prop3".to_string(),
            title: "200 sqm office - La Defense".to_string(),
            kind: "Office".to_string(),
            price: 850_000.0,
            location: "La Defense, 92".to_string(),
            surface_sqm: 200.0,
            rooms: 1,
            bedrooms: 0,
            description: "Modern office space in a prestigious La Defense tower, suited \
                          to a growing company."
                .to_string(),
            features: strings(&["Air conditioning", "Elevator", "24h security", "Parking"]),
            available_for_visit: true,
            agent_id: "agent2".to_string(),
        },
        PropertyListing {
            id: "prop4".to_string(),
            title: "150 sqm retail unit - Champs-Elysees".to_string(),
            kind: "Retail".to_string(),
            price: 2_500_000.0,
            location: "8th arrondissement, Paris".to_string(),
            surface_sqm: 150.0,
            rooms: 1,
            bedrooms: 0,
            description: "Prestigious retail space on the Champs-Elysees, perfect for a \
                          luxury boutique or restaurant."
                .to_string(),
            features: strings(&["Storefront", "Cellar", "Mezzanine", "Air conditioning"]),
            available_for_visit: true,
            agent_id: "agent2".to_string(),
        },
        PropertyListing {
            id: "prop5".to_string(),
            title: "Penthouse with panoramic terrace - Trocadero".to_string(),
            kind: "Penthouse".to_string(),
            price: 3_800_000.0,
            location: "16th arrondissement, Paris".to_string(),
            surface_sqm: 220.0,
            rooms: 6,
            bedrooms: 4,
            description: "Exceptional penthouse with a wraparound terrace and an \
                          unobstructed view of the Eiffel Tower."
                .to_string(),
            features: strings(&["Terrace", "Panoramic view", "Concierge", "Private elevator"]),
            available_for_visit: true,
            agent_id: "agent3".to_string(),
        },
        PropertyListing {
            id: "prop6".to_string(),
            title: "Villa with pool - Saint-Cloud".to_string(),
            kind: "Villa".to_string(),
            price: 2_900_000.0,
            location: "Saint-Cloud, 92".to_string(),
            surface_sqm: 320.0,
            rooms: 8,
            bedrooms: 5,
            description: "Contemporary villa with heated pool and wooded grounds, ten \
                          minutes from central Paris."
                .to_string(),
            features: strings(&["Pool", "Garden", "Home cinema", "Double garage"]),
            available_for_visit: false,
            agent_id: "agent3".to_string(),
        },
    ]
}
