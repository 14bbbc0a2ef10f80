use crate::config::{Money, VisitorConfig};
use crate::park::attraction::{Attraction, QueuedVisitor, Rejection};
use crate::park::ticket::Ticket;
use failure::Fail;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::RangeInclusive;

pub type VisitorId = u32;

pub const AGE_RANGE: RangeInclusive<u8> = 0..=120;
pub const HEIGHT_RANGE: RangeInclusive<u16> = 50..=250;
pub const VIP_FREE_ENTRIES: u32 = 2;

#[derive(Debug, Fail, PartialEq)]
pub enum VisitorError {
    #[fail(display = "visitor \"{}\" has invalid age {}", name, age)]
    InvalidAge { name: String, age: u8 },
    #[fail(display = "visitor \"{}\" has invalid height {} cm", name, height)]
    InvalidHeight { name: String, height: u16 },
}

/// Pricing rule of a visitor, the only thing VIPs do differently
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Pass {
    Standard,
    Vip { free_entries: HashMap<String, u32> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Purchase {
    Paid { ticket: u32, price: Money },
    Free { ticket: u32, remaining: u32 },
    InsufficientFunds { price: Money, balance: Money },
    Restricted(Rejection),
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinQueue {
    Joined { position: usize },
    Restricted(Rejection),
    NoTicket,
    QueueFull { capacity: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct Visitor {
    id: VisitorId,
    name: String,
    age: u8,
    height: u16,
    money: Money,
    tickets: Vec<Ticket>,
    tickets_issued: u32,
    pass: Pass,
}

impl Visitor {
    pub fn new(id: VisitorId, config: &VisitorConfig) -> Result<Visitor, VisitorError> {
        if !AGE_RANGE.contains(&config.age) {
            return Err(VisitorError::InvalidAge {
                name: config.name.clone(),
                age: config.age,
            });
        }

        if !HEIGHT_RANGE.contains(&config.height) {
            return Err(VisitorError::InvalidHeight {
                name: config.name.clone(),
                height: config.height,
            });
        }

        let pass = if config.vip {
            Pass::Vip {
                free_entries: HashMap::new(),
            }
        } else {
            Pass::Standard
        };

        Ok(Visitor {
            id,
            name: config.name.clone(),
            age: config.age,
            height: config.height,
            money: config.money,
            tickets: Vec::new(),
            tickets_issued: 0,
            pass,
        })
    }

    pub fn id(&self) -> VisitorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn money(&self) -> Money {
        self.money
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn is_vip(&self) -> bool {
        match self.pass {
            Pass::Vip { .. } => true,
            Pass::Standard => false,
        }
    }

    pub fn holds_ticket_for(&self, attraction: &str) -> bool {
        self.tickets.iter().any(|ticket| ticket.is_for(attraction))
    }

    /// VIPs are checked against the attraction restrictions and get their free entries
    /// first, everybody else (and VIPs with no free entries left) pays the full price
    pub fn purchase_ticket(&mut self, attraction: &Attraction) -> Purchase {
        if self.is_vip() {
            if let Err(rejection) = attraction.verify_restrictions(self) {
                return Purchase::Restricted(rejection);
            }
        }

        if let Some(remaining) = self.claim_free_entry(attraction.name()) {
            let ticket = self.issue_ticket(attraction.name(), 0);

            debug!(visitor = %self.name, attraction = attraction.name(), remaining, "free entry granted");

            return Purchase::Free { ticket, remaining };
        }

        self.purchase_paid(attraction)
    }

    fn claim_free_entry(&mut self, attraction: &str) -> Option<u32> {
        match &mut self.pass {
            Pass::Standard => None,
            Pass::Vip { free_entries } => {
                let used = free_entries.entry(attraction.to_owned()).or_insert(0);

                if *used >= VIP_FREE_ENTRIES {
                    return None;
                }

                *used += 1;

                Some(VIP_FREE_ENTRIES - *used)
            }
        }
    }

    fn purchase_paid(&mut self, attraction: &Attraction) -> Purchase {
        let price = attraction.price();

        if self.money < price {
            return Purchase::InsufficientFunds {
                price,
                balance: self.money,
            };
        }

        self.money -= price;
        let ticket = self.issue_ticket(attraction.name(), price);

        debug!(visitor = %self.name, attraction = attraction.name(), price, balance = self.money, "ticket bought");

        Purchase::Paid { ticket, price }
    }

    fn issue_ticket(&mut self, attraction: &str, price: Money) -> u32 {
        self.tickets_issued += 1;
        self.tickets
            .push(Ticket::new(self.tickets_issued, attraction, price));

        self.tickets_issued
    }

    /// Hands over the oldest ticket held for the attraction
    pub fn surrender_ticket(&mut self, attraction: &Attraction) -> Option<Ticket> {
        let index = self
            .tickets
            .iter()
            .position(|ticket| ticket.is_for(attraction.name()))?;

        Some(self.tickets.remove(index))
    }

    pub fn join_queue(&self, attraction: &mut Attraction) -> JoinQueue {
        if let Err(rejection) = attraction.verify_restrictions(self) {
            return JoinQueue::Restricted(rejection);
        }

        if !self.holds_ticket_for(attraction.name()) {
            return JoinQueue::NoTicket;
        }

        match attraction.enqueue(QueuedVisitor {
            id: self.id,
            vip: self.is_vip(),
        }) {
            Some(position) => JoinQueue::Joined { position },
            None => JoinQueue::QueueFull {
                capacity: attraction.capacity(),
            },
        }
    }
}
