use serde::{Deserialize, Serialize};

pub type Money = u32;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CoasterSpec {
    pub max_speed: u32,    // km/h
    pub max_height: u32,   // m
    pub track_length: u32, // m
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum AttractionKind {
    Standard,
    Child,
    Coaster(CoasterSpec),
}

impl Default for AttractionKind {
    fn default() -> AttractionKind {
        AttractionKind::Standard
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AttractionConfig {
    pub name: String,
    pub capacity: u32, // Maximum number of riders in one round, also the queue limit
    pub duration: u32, // How long is one round, in minutes
    pub price: Money,
    #[serde(default)]
    pub kind: AttractionKind,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VisitorConfig {
    pub name: String,
    pub age: u8,
    pub height: u16, // cm
    pub money: Money,
    #[serde(default)]
    pub vip: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Action {
    SellTicket { visitor: String, attraction: String },
    SurrenderTicket { visitor: String, attraction: String },
    JoinQueue { visitor: String, attraction: String },
    StartRound { attraction: String },
    BeginMaintenance { attraction: String },
    EndMaintenance { attraction: String },
    ActiveAttractions,
    SalesSummary,
}

impl Action {
    pub fn visitor(&self) -> Option<&str> {
        match self {
            Action::SellTicket { visitor, .. }
            | Action::SurrenderTicket { visitor, .. }
            | Action::JoinQueue { visitor, .. } => Some(visitor),
            _ => None,
        }
    }

    pub fn attraction(&self) -> Option<&str> {
        match self {
            Action::SellTicket { attraction, .. }
            | Action::SurrenderTicket { attraction, .. }
            | Action::JoinQueue { attraction, .. }
            | Action::StartRound { attraction }
            | Action::BeginMaintenance { attraction }
            | Action::EndMaintenance { attraction } => Some(attraction),
            Action::ActiveAttractions | Action::SalesSummary => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub park: String,
    pub attractions: Vec<AttractionConfig>,
    pub visitors: Vec<VisitorConfig>,
    pub actions: Vec<Action>,
}

fn sell(visitor: &str, attraction: &str) -> Action {
    Action::SellTicket {
        visitor: visitor.to_owned(),
        attraction: attraction.to_owned(),
    }
}

fn join(visitor: &str, attraction: &str) -> Action {
    Action::JoinQueue {
        visitor: visitor.to_owned(),
        attraction: attraction.to_owned(),
    }
}

fn round(attraction: &str) -> Action {
    Action::StartRound {
        attraction: attraction.to_owned(),
    }
}

fn visitor(name: &str, age: u8, height: u16, money: Money, vip: bool) -> VisitorConfig {
    VisitorConfig {
        name: name.to_owned(),
        age,
        height,
        money,
        vip,
    }
}

/// Built-in day at the park, used when no scenario file is available. It covers
/// the edge cases: a visitor without money, a VIP refused by the child ride and a
/// visitor too short for the coaster.
impl Default for ScenarioConfig {
    fn default() -> ScenarioConfig {
        const COASTER: &str = "Extreme Coaster";
        const CAROUSEL: &str = "Kids Carousel";

        ScenarioConfig {
            park: "Rusty Rides".to_owned(),
            attractions: vec![
                AttractionConfig {
                    name: COASTER.to_owned(),
                    capacity: 5,
                    duration: 3,
                    price: 100,
                    kind: AttractionKind::Coaster(CoasterSpec {
                        max_speed: 100,
                        max_height: 200,
                        track_length: 1500,
                    }),
                },
                AttractionConfig {
                    name: CAROUSEL.to_owned(),
                    capacity: 10,
                    duration: 5,
                    price: 20,
                    kind: AttractionKind::Child,
                },
            ],
            visitors: vec![
                visitor("Finn", 15, 145, 150, false),
                visitor("Marceline", 25, 160, 200, true),
                visitor("Cinnamon Bun", 25, 170, 0, false),
                visitor("Jake", 12, 130, 100, false),
            ],
            actions: vec![
                sell("Finn", COASTER),
                sell("Marceline", CAROUSEL),
                sell("Cinnamon Bun", COASTER),
                sell("Jake", COASTER),
                join("Finn", COASTER),
                join("Marceline", CAROUSEL),
                join("Jake", COASTER),
                round(COASTER),
                round(CAROUSEL),
                Action::SalesSummary,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_adjacent_tagging() {
        let action: Action = serde_json::from_str(
            r#"{"type": "JoinQueue", "data": {"visitor": "Finn", "attraction": "Kids Carousel"}}"#,
        )
        .unwrap();

        assert_eq!(action, join("Finn", "Kids Carousel"));
        assert_eq!(action.visitor(), Some("Finn"));
        assert_eq!(action.attraction(), Some("Kids Carousel"));

        let summary: Action = serde_json::from_str(r#"{"type": "SalesSummary"}"#).unwrap();
        assert_eq!(summary, Action::SalesSummary);
        assert_eq!(summary.attraction(), None);
    }

    #[test]
    fn kind_and_vip_default_when_omitted() {
        let config: ScenarioConfig = serde_json::from_str(
            r#"{
                "park": "Tiny",
                "attractions": [{"name": "Wheel", "capacity": 4, "duration": 2, "price": 10}],
                "visitors": [{"name": "Bo", "age": 30, "height": 170, "money": 5}],
                "actions": []
            }"#,
        )
        .unwrap();

        assert_eq!(config.attractions[0].kind, AttractionKind::Standard);
        assert!(!config.visitors[0].vip);
    }

    #[test]
    fn coaster_spec_is_carried_in_data() {
        let kind: AttractionKind = serde_json::from_str(
            r#"{"type": "Coaster", "data": {"max_speed": 90, "max_height": 45, "track_length": 800}}"#,
        )
        .unwrap();

        assert_eq!(
            kind,
            AttractionKind::Coaster(CoasterSpec {
                max_speed: 90,
                max_height: 45,
                track_length: 800,
            })
        );
    }
}
