// Free-text address -> service region.
//
// Matching is a case-insensitive substring test against each city's
// keyword list, checked in table order; first hit wins.

use crate::models::City;

pub trait LocationClassifier {
    fn classify(&self, free_text: &str) -> Option<City>;
}

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    table: Vec<(City, Vec<String>)>,
}

impl KeywordClassifier {
    pub fn new(table: Vec<(City, Vec<String>)>) -> Self {
        let table: Vec<(City, Vec<String>)> = table
            .into_iter()
            .map(|(city, kws)| (city, kws.iter().map(|k| k.to_lowercase()).collect::<Vec<_>>()))
            .collect();
        Self { table }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        let jhb = ["johannesburg", "jhb", "sandton", "roodepoort", "randburg", "midrand"];
        let cpt = ["cape town", "milnerton", "bellville", "parow", "wynberg", "fish hoek"];
        Self::new(vec![
            (City::Johannesburg, jhb.iter().map(|s| s.to_string()).collect()),
            (City::CapeTown, cpt.iter().map(|s| s.to_string()).collect()),
        ])
    }
}

impl LocationClassifier for KeywordClassifier {
    fn classify(&self, free_text: &str) -> Option<City> {
        let text = free_text.to_lowercase();
        self.table
            .iter()
            .find(|(_, kws)| kws.iter().any(|k| text.contains(k.as_str())))
            .map(|(city, _)| *city)
    }
}
