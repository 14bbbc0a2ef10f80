use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    number: u32,
    attraction: String,
    price: u32,
    purchased_at: DateTime<Local>,
}

/// Tickets are only created by visitors, there is no way to change them afterwards
impl Ticket {
    pub(crate) fn new(number: u32, attraction: &str, price: u32) -> Ticket {
        Ticket {
            number,
            attraction: attraction.to_owned(),
            price,
            purchased_at: Local::now(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn attraction(&self) -> &str {
        &self.attraction
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn is_for(&self, attraction: &str) -> bool {
        self.attraction == attraction
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Ticket {} for {}, bought on {}",
            self.number,
            self.attraction,
            self.purchased_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_number_and_attraction() {
        let ticket = Ticket::new(3, "Extreme Coaster", 100);
        let text = ticket.to_string();

        assert!(text.starts_with("Ticket 3 for Extreme Coaster, bought on "));
    }

    #[test]
    fn matches_only_its_attraction() {
        let ticket = Ticket::new(1, "Carousel", 20);

        assert!(ticket.is_for("Carousel"));
        assert!(!ticket.is_for("carousel"));
        assert_eq!(ticket.price(), 20);
    }
}
