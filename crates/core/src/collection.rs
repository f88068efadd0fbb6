//! Card collection view: the catalog joined with a player's unlocks.

use crate::catalog::Catalog;
use crate::profile::PlayerProfile;
use crate::types::{BodySystem, Card, SystemId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollectionFilter {
    #[default]
    All,
    System(SystemId),
}

impl CollectionFilter {
    pub fn accepts(&self, card: &Card) -> bool {
        match self {
            CollectionFilter::All => true,
            CollectionFilter::System(id) => &card.system == id,
        }
    }

    /// Step through `All` and then each catalog system, wrapping around.
    pub fn cycle(&self, catalog: &Catalog, forward: bool) -> Self {
        let systems = catalog.systems();
        if systems.is_empty() {
            return CollectionFilter::All;
        }
        // Position 0 is `All`, 1..=n the systems.
        let n = systems.len() + 1;
        let pos = match self {
            CollectionFilter::All => 0,
            CollectionFilter::System(id) => systems
                .iter()
                .position(|s| &s.id == id)
                .map_or(0, |i| i + 1),
        };
        let next = if forward { (pos + 1) % n } else { (pos + n - 1) % n };
        match next {
            0 => CollectionFilter::All,
            i => CollectionFilter::System(systems[i - 1].id.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollectionEntry<'a> {
    pub card: &'a Card,
    pub system: Option<&'a BodySystem>,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionProgress {
    pub unlocked: usize,
    pub total: usize,
}

impl CollectionProgress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.unlocked * 100 / self.total) as u32
    }
}

/// Catalog cards passing `filter`, in catalog order.
pub fn entries<'a>(
    catalog: &'a Catalog,
    player: Option<&PlayerProfile>,
    filter: &CollectionFilter,
) -> Vec<CollectionEntry<'a>> {
    catalog
        .cards()
        .iter()
        .filter(|c| filter.accepts(c))
        .map(|card| CollectionEntry {
            card,
            system: catalog.system(&card.system),
            unlocked: player.is_some_and(|p| p.has_card(&card.id)),
        })
        .collect()
}

/// Unlocked catalog cards over catalog size; ids unknown to the catalog do not count.
pub fn progress(catalog: &Catalog, player: Option<&PlayerProfile>) -> CollectionProgress {
    let unlocked = match player {
        Some(p) => catalog.cards().iter().filter(|c| p.has_card(&c.id)).count(),
        None => 0,
    };
    CollectionProgress {
        unlocked,
        total: catalog.cards().len(),
    }
}
