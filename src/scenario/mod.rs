use crate::config::{Action, ScenarioConfig};
use crate::park::attraction::{Attraction, Maintenance, Round};
use crate::park::ticket::Ticket;
use crate::park::visitor::{JoinQueue, Purchase};
use crate::park::{Park, SalesSummary};
use crate::scenario::registry::VisitorRegistry;
use chrono::{Local, NaiveDate};
use failure::{Error, Fail};
use std::collections::{HashSet, VecDeque};

pub mod registry;

#[derive(Debug, Fail)]
#[fail(display = "validation failed because of \"{}\"", error)]
pub struct ValidationError {
    error: String,
}

#[derive(Debug, Fail)]
#[fail(display = "there is no visitor \"{}\"", _0)]
pub struct UnknownVisitor(String);

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Sold {
        visitor: String,
        attraction: String,
        purchase: Purchase,
    },
    Surrendered {
        visitor: String,
        attraction: String,
        ticket: Option<Ticket>,
    },
    Queued {
        visitor: String,
        attraction: String,
        result: JoinQueue,
    },
    RoundStarted {
        attraction: String,
        round: Round,
        riders: Vec<String>,
        waiting: usize,
    },
    Maintenance {
        attraction: String,
        result: Maintenance,
    },
    ActiveAttractions(Vec<String>),
    Summary(SalesSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub step: usize,
    pub outcome: Outcome,
}

pub fn validate_config(config: &ScenarioConfig) -> Result<(), Error> {
    let mut attractions = HashSet::new();

    for attraction in config.attractions.iter() {
        if !attractions.insert(attraction.name.as_str()) {
            return Err(ValidationError {
                error: format!("There is attraction name \"{}\" collision", attraction.name),
            }
            .into());
        }

        if attraction.capacity == 0 {
            return Err(ValidationError {
                error: format!("There is attraction \"{}\" with invalid capacity", attraction.name),
            }
            .into());
        }

        if attraction.duration == 0 {
            return Err(ValidationError {
                error: format!("There is attraction \"{}\" with invalid duration", attraction.name),
            }
            .into());
        }
    }

    let mut visitors = HashSet::new();

    for visitor in config.visitors.iter() {
        if !visitors.insert(visitor.name.as_str()) {
            return Err(ValidationError {
                error: format!("There is visitor name \"{}\" collision", visitor.name),
            }
            .into());
        }
    }

    for (step, action) in config.actions.iter().enumerate() {
        if let Some(name) = action.attraction() {
            if !attractions.contains(name) {
                return Err(ValidationError {
                    error: format!("There does not exist attraction \"{}\" requested by step {}", name, step + 1),
                }
                .into());
            }
        }

        if let Some(name) = action.visitor() {
            if !visitors.contains(name) {
                return Err(ValidationError {
                    error: format!("There does not exist visitor \"{}\" requested by step {}", name, step + 1),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// `Scenario` plays a day at the park: it owns the park and its visitors and executes
/// the configured actions one by one
pub struct Scenario {
    pub park: Park,
    pub visitors: VisitorRegistry,
    pub day: NaiveDate,
    actions: VecDeque<Action>,
    step: usize,
}

impl Scenario {
    pub fn bootstrap(config: ScenarioConfig) -> Result<Scenario, Error> {
        validate_config(&config)?;

        let mut park = Park::new(&config.park);

        for attraction in config.attractions.into_iter() {
            park.register_attraction(Attraction::new(attraction))?;
        }

        let mut visitors = VisitorRegistry::new();

        for visitor in config.visitors.iter() {
            visitors.register(visitor)?;
        }

        info!(park = %park.name(), attractions = park.attractions().len(), visitors = visitors.len(), actions = config.actions.len(), "scenario ready");

        Ok(Scenario {
            park,
            visitors,
            day: Local::now().date_naive(),
            actions: config.actions.into_iter().collect(),
            step: 0,
        })
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn step(&mut self) -> Result<Option<Record>, Error> {
        let action = match self.actions.pop_front() {
            Some(action) => action,
            None => return Ok(None),
        };

        self.step += 1;

        debug!(step = self.step, action = ?action, "executing");

        let outcome = self.execute(action)?;

        Ok(Some(Record {
            step: self.step,
            outcome,
        }))
    }

    pub fn run(&mut self) -> Result<Vec<Record>, Error> {
        let mut records = Vec::new();

        while self.has_actions() {
            if let Some(record) = self.step()? {
                records.push(record);
            }
        }

        Ok(records)
    }

    fn execute(&mut self, action: Action) -> Result<Outcome, Error> {
        let outcome = match action {
            Action::SellTicket { visitor, attraction } => {
                let customer = self
                    .visitors
                    .by_name_mut(&visitor)
                    .ok_or_else(|| UnknownVisitor(visitor.clone()))?;
                let purchase = self.park.sell_ticket(customer, &attraction)?;

                Outcome::Sold {
                    visitor,
                    attraction,
                    purchase,
                }
            }
            Action::SurrenderTicket { visitor, attraction } => {
                let customer = self
                    .visitors
                    .by_name_mut(&visitor)
                    .ok_or_else(|| UnknownVisitor(visitor.clone()))?;
                let ticket = customer.surrender_ticket(self.park.attraction_mut(&attraction)?);

                Outcome::Surrendered {
                    visitor,
                    attraction,
                    ticket,
                }
            }
            Action::JoinQueue { visitor, attraction } => {
                let customer = self
                    .visitors
                    .by_name(&visitor)
                    .ok_or_else(|| UnknownVisitor(visitor.clone()))?;
                let result = customer.join_queue(self.park.attraction_mut(&attraction)?);

                Outcome::Queued {
                    visitor,
                    attraction,
                    result,
                }
            }
            Action::StartRound { attraction } => {
                let ride = self.park.attraction_mut(&attraction)?;
                let round = ride.start_round();
                let waiting = ride.queue_len();

                let riders = match &round {
                    Round::Dispatched { riders, .. } => riders
                        .iter()
                        .filter_map(|rider| self.visitors.get(rider.id))
                        .map(|visitor| visitor.name().to_owned())
                        .collect(),
                    Round::OutOfService => Vec::new(),
                };

                Outcome::RoundStarted {
                    attraction,
                    round,
                    riders,
                    waiting,
                }
            }
            Action::BeginMaintenance { attraction } => {
                let result = self.park.attraction_mut(&attraction)?.begin_maintenance();

                Outcome::Maintenance { attraction, result }
            }
            Action::EndMaintenance { attraction } => {
                let result = self.park.attraction_mut(&attraction)?.end_maintenance();

                Outcome::Maintenance { attraction, result }
            }
            Action::ActiveAttractions => Outcome::ActiveAttractions(
                self.park
                    .active_attractions()
                    .iter()
                    .map(|attraction| attraction.name().to_owned())
                    .collect(),
            ),
            Action::SalesSummary => Outcome::Summary(self.park.sales_summary(self.day)),
        };

        Ok(outcome)
    }
}
