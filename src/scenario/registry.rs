use crate::config::VisitorConfig;
use crate::park::visitor::{Visitor, VisitorError, VisitorId};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct IdGenerator {
    curr: VisitorId,
}

impl IdGenerator {
    pub fn new() -> IdGenerator {
        IdGenerator { curr: 0 }
    }

    pub fn next(&mut self) -> VisitorId {
        let id = self.curr;

        self.curr += 1;

        id
    }
}

/// Every visitor of the day, addressable by id (queues) and by name (scenario actions)
#[derive(Debug, Serialize)]
pub struct VisitorRegistry {
    visitors: HashMap<VisitorId, Visitor>,
    names: HashMap<String, VisitorId>,
    id_generator: IdGenerator,
}

impl VisitorRegistry {
    pub fn new() -> VisitorRegistry {
        VisitorRegistry {
            visitors: HashMap::new(),
            names: HashMap::new(),
            id_generator: IdGenerator::new(),
        }
    }

    pub fn register(&mut self, config: &VisitorConfig) -> Result<VisitorId, VisitorError> {
        let id = self.id_generator.next();
        let visitor = Visitor::new(id, config)?;

        self.names.insert(visitor.name().to_owned(), id);
        self.visitors.insert(id, visitor);

        Ok(id)
    }

    pub fn get(&self, id: VisitorId) -> Option<&Visitor> {
        self.visitors.get(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Visitor> {
        self.names.get(name).and_then(|id| self.visitors.get(id))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Visitor> {
        let id = self.names.get(name)?;

        self.visitors.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Visitors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Visitor> {
        let mut visitors: Vec<&Visitor> = self.visitors.values().collect();
        visitors.sort_by_key(|visitor| visitor.id());

        visitors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, age: u8) -> VisitorConfig {
        VisitorConfig {
            name: name.to_owned(),
            age,
            height: 160,
            money: 10,
            vip: false,
        }
    }

    #[test]
    fn ids_are_handed_out_in_order() {
        let mut registry = VisitorRegistry::new();

        assert_eq!(registry.register(&config("Finn", 15)).unwrap(), 0);
        assert_eq!(registry.register(&config("Jake", 12)).unwrap(), 1);

        assert_eq!(registry.get(1).map(|visitor| visitor.name()), Some("Jake"));
        assert_eq!(registry.by_name("Finn").map(|visitor| visitor.id()), Some(0));
        assert!(registry.by_name("Bubblegum").is_none());

        registry.register(&config("Marceline", 25)).unwrap();

        let names: Vec<&str> = registry.iter().map(|visitor| visitor.name()).collect();
        assert_eq!(names, vec!["Finn", "Jake", "Marceline"]);
    }

    #[test]
    fn invalid_visitor_is_not_registered() {
        let mut registry = VisitorRegistry::new();

        assert!(registry.register(&config("Ancient", 200)).is_err());
        assert_eq!(registry.len(), 0);
        assert!(registry.by_name_mut("Ancient").is_none());
    }
}
