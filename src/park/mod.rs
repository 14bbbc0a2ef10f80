use crate::park::attraction::Attraction;
use crate::park::visitor::{Purchase, Visitor};
use chrono::NaiveDate;
use failure::Fail;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ledger amounts, wide enough to add up any number of sales priced in `config::Money`
pub type Revenue = u64;

pub mod attraction;
pub mod ticket;
pub mod visitor;

#[derive(Debug, Fail, PartialEq)]
pub enum ParkError {
    #[fail(display = "there is no attraction \"{}\" in the park", _0)]
    UnknownAttraction(String),
    #[fail(display = "attraction \"{}\" is already registered", _0)]
    DuplicateAttraction(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Sales {
    pub revenue: Revenue,
    pub paid_tickets: u64,
    pub free_entries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub day: NaiveDate,
    pub attractions: Vec<(String, Sales)>,
    pub total: Revenue,
}

#[derive(Debug, Serialize)]
pub struct Park {
    name: String,
    attractions: Vec<Attraction>,
    sales: BTreeMap<String, Sales>,
}

/// `Park` owns the attractions and keeps the ledger, visitors are owned by whoever runs the day
impl Park {
    pub fn new(name: &str) -> Park {
        Park {
            name: name.to_owned(),
            attractions: Vec::new(),
            sales: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn register_attraction(&mut self, attraction: Attraction) -> Result<(), ParkError> {
        if self.attraction(attraction.name()).is_some() {
            return Err(ParkError::DuplicateAttraction(attraction.name().to_owned()));
        }

        debug!(park = %self.name, attraction = attraction.name(), "attraction registered");

        self.attractions.push(attraction);

        Ok(())
    }

    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn attraction(&self, name: &str) -> Option<&Attraction> {
        self.attractions.iter().find(|attraction| attraction.name() == name)
    }

    pub fn attraction_mut(&mut self, name: &str) -> Result<&mut Attraction, ParkError> {
        self.attractions
            .iter_mut()
            .find(|attraction| attraction.name() == name)
            .ok_or_else(|| ParkError::UnknownAttraction(name.to_owned()))
    }

    pub fn active_attractions(&self) -> Vec<&Attraction> {
        self.attractions
            .iter()
            .filter(|attraction| attraction.is_active())
            .collect()
    }

    /// Only money that actually changed hands ends up in the ledger, refused purchases are
    /// not recorded at all
    pub fn sell_ticket(
        &mut self,
        visitor: &mut Visitor,
        name: &str,
    ) -> Result<Purchase, ParkError> {
        let attraction = self
            .attractions
            .iter()
            .find(|attraction| attraction.name() == name)
            .ok_or_else(|| ParkError::UnknownAttraction(name.to_owned()))?;

        let purchase = visitor.purchase_ticket(attraction);

        match purchase {
            Purchase::Paid { price, .. } => {
                let sales = self.sales.entry(attraction.name().to_owned()).or_default();
                sales.revenue = sales.revenue.saturating_add(Revenue::from(price));
                sales.paid_tickets = sales.paid_tickets.saturating_add(1);
            }
            Purchase::Free { .. } => {
                let sales = self.sales.entry(attraction.name().to_owned()).or_default();
                sales.free_entries = sales.free_entries.saturating_add(1);
            }
            Purchase::InsufficientFunds { .. } | Purchase::Restricted(_) => {}
        }

        Ok(purchase)
    }

    pub fn sales(&self, attraction: &str) -> Sales {
        self.sales.get(attraction).cloned().unwrap_or_default()
    }

    pub fn sales_summary(&self, day: NaiveDate) -> SalesSummary {
        let attractions: Vec<(String, Sales)> = self
            .sales
            .iter()
            .map(|(name, sales)| (name.clone(), *sales))
            .collect();

        let total = attractions
            .iter()
            .fold(0, |total: Revenue, (_, sales)| total.saturating_add(sales.revenue));

        SalesSummary {
            day,
            attractions,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AttractionConfig, AttractionKind, Money, VisitorConfig};

    fn park() -> Park {
        let mut park = Park::new("Rusty Rides");

        park.register_attraction(Attraction::new(AttractionConfig {
            name: "Wheel".to_owned(),
            capacity: 4,
            duration: 10,
            price: 30,
            kind: AttractionKind::Standard,
        }))
        .unwrap();
        park.register_attraction(Attraction::new(AttractionConfig {
            name: "Kids Carousel".to_owned(),
            capacity: 10,
            duration: 5,
            price: 20,
            kind: AttractionKind::Child,
        }))
        .unwrap();

        park
    }

    fn visitor(name: &str, age: u8, money: Money, vip: bool) -> Visitor {
        Visitor::new(
            0,
            &VisitorConfig {
                name: name.to_owned(),
                age,
                height: 150,
                money,
                vip,
            },
        )
        .unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn register_refuses_duplicate_names() {
        let mut park = park();

        let duplicate = Attraction::new(AttractionConfig {
            name: "Wheel".to_owned(),
            capacity: 1,
            duration: 1,
            price: 1,
            kind: AttractionKind::Standard,
        });

        assert_eq!(
            park.register_attraction(duplicate),
            Err(ParkError::DuplicateAttraction("Wheel".to_owned()))
        );
        assert_eq!(park.attractions().len(), 2);
    }

    #[test]
    fn sell_ticket_records_paid_revenue() {
        let mut park = park();
        let mut bo = visitor("Bo", 30, 100, false);

        let purchase = park.sell_ticket(&mut bo, "Wheel").unwrap();

        assert_eq!(purchase, Purchase::Paid { ticket: 1, price: 30 });
        assert_eq!(bo.money(), 70);
        assert_eq!(
            park.sales("Wheel"),
            Sales {
                revenue: 30,
                paid_tickets: 1,
                free_entries: 0
            }
        );
    }

    #[test]
    fn failed_purchase_is_not_recorded() {
        let mut park = park();
        let mut broke = visitor("Cinnamon Bun", 25, 0, false);

        let purchase = park.sell_ticket(&mut broke, "Wheel").unwrap();

        assert_eq!(purchase, Purchase::InsufficientFunds { price: 30, balance: 0 });
        assert_eq!(park.sales("Wheel"), Sales::default());
        assert_eq!(park.sales_summary(day()).total, 0);
    }

    #[test]
    fn vip_free_entries_count_but_earn_nothing() {
        let mut park = park();
        let mut vip = visitor("Marceline", 25, 100, true);

        park.sell_ticket(&mut vip, "Wheel").unwrap();
        park.sell_ticket(&mut vip, "Wheel").unwrap();
        park.sell_ticket(&mut vip, "Wheel").unwrap();

        assert_eq!(
            park.sales("Wheel"),
            Sales {
                revenue: 30,
                paid_tickets: 1,
                free_entries: 2
            }
        );

        let refused = park.sell_ticket(&mut vip, "Kids Carousel").unwrap();
        assert!(matches!(refused, Purchase::Restricted(_)));
        assert_eq!(park.sales("Kids Carousel"), Sales::default());
    }

    #[test]
    fn sell_ticket_for_unknown_attraction_fails() {
        let mut park = park();
        let mut bo = visitor("Bo", 30, 100, false);

        assert_eq!(
            park.sell_ticket(&mut bo, "Haunted House"),
            Err(ParkError::UnknownAttraction("Haunted House".to_owned()))
        );
        assert_eq!(bo.money(), 100);
    }

    #[test]
    fn summary_adds_up_all_attractions() {
        let mut park = park();
        let mut bo = visitor("Bo", 30, 100, false);
        let mut kid = visitor("Kid", 8, 100, false);

        park.sell_ticket(&mut bo, "Wheel").unwrap();
        park.sell_ticket(&mut bo, "Wheel").unwrap();
        park.sell_ticket(&mut kid, "Kids Carousel").unwrap();

        let summary = park.sales_summary(day());

        assert_eq!(summary.day, day());
        assert_eq!(summary.total, 80);
        assert_eq!(
            summary
                .attractions
                .iter()
                .map(|(name, sales)| (name.as_str(), sales.revenue))
                .collect::<Vec<_>>(),
            vec![("Kids Carousel", 20), ("Wheel", 60)]
        );
    }

    #[test]
    fn active_attractions_skip_maintenance() {
        let mut park = park();

        park.attraction_mut("Wheel").unwrap().begin_maintenance();

        let active: Vec<&str> = park
            .active_attractions()
            .iter()
            .map(|attraction| attraction.name())
            .collect();

        assert_eq!(active, vec!["Kids Carousel"]);
    }

    #[test]
    fn ledger_holds_revenue_beyond_a_single_balance() {
        let mut park = Park::new("Gold Rush");
        park.register_attraction(Attraction::new(AttractionConfig {
            name: "Gold".to_owned(),
            capacity: 2,
            duration: 1,
            price: 3_000_000_000,
            kind: AttractionKind::Standard,
        }))
        .unwrap();

        let mut first = visitor("Midas", 40, 3_000_000_000, false);
        let mut second = visitor("Croesus", 50, 3_000_000_000, false);

        park.sell_ticket(&mut first, "Gold").unwrap();
        park.sell_ticket(&mut second, "Gold").unwrap();

        assert_eq!(park.sales("Gold").revenue, 6_000_000_000);
        assert_eq!(park.sales("Gold").paid_tickets, 2);
        assert_eq!(park.sales_summary(day()).total, 6_000_000_000);
        assert_eq!(first.money(), 0);
        assert_eq!(second.money(), 0);
    }
}
