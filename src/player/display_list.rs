use std::{collections::BTreeMap, rc::Rc};

use log::debug;

use super::{context::MovieContext, display_object::DisplayObject};

/// Depth-keyed children of one clip. `deprecated` only holds entries while a
/// backward seek replays the timeline; anything left there afterwards is
/// dropped.
#[derive(Debug, Default)]
pub struct DisplayList {
    children: BTreeMap<u16, DisplayObject>,
    deprecated: BTreeMap<u16, DisplayObject>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live child at `depth`. A child parked by a backward seek is promoted
    /// back into the live list on access.
    pub fn get(&mut self, depth: u16) -> Option<&mut DisplayObject> {
        if !self.children.contains_key(&depth) {
            let parked = self.deprecated.remove(&depth)?;
            self.children.insert(depth, parked);
        }
        self.children.get_mut(&depth)
    }

    /// Live child at `depth`, without touching the deprecated cache.
    pub fn get_live(&self, depth: u16) -> Option<&DisplayObject> {
        self.children.get(&depth)
    }

    /// Makes sure `depth` holds an instance of `character_id`. An existing
    /// child with the same character id is returned as is, keeping its
    /// state; a parked child with a matching id is reused before anything
    /// new is instantiated.
    pub fn set(
        &mut self,
        depth: u16,
        character_id: u16,
        context: &Rc<MovieContext>,
    ) -> Option<&mut DisplayObject> {
        let existing = self.children.get(&depth).map(|child| child.character_id);
        match existing {
            Some(id) if id == character_id => return self.children.get_mut(&depth),
            Some(_) => {
                self.children.remove(&depth);
            }
            None => {}
        }

        let parked = match self.deprecated.remove(&depth) {
            Some(child) if child.character_id == character_id => Some(child),
            _ => None,
        };
        let child = match parked {
            Some(child) => child,
            None => DisplayObject::instantiate(context, character_id)?,
        };

        self.children.insert(depth, child);
        self.children.get_mut(&depth)
    }

    /// Removes the live child at `depth`. Missing depths are ignored.
    pub fn erase(&mut self, depth: u16) -> Option<DisplayObject> {
        self.children.remove(&depth)
    }

    /// Parks every live child ahead of a full replay.
    pub fn deprecate_all(&mut self) {
        self.deprecated.append(&mut self.children);
    }

    /// Drops whatever the replay did not reclaim.
    pub fn clear_deprecated(&mut self) {
        if !self.deprecated.is_empty() {
            debug!("Dropping {} unreclaimed children", self.deprecated.len());
            self.deprecated.clear();
        }
    }

    pub fn deprecated_len(&self) -> usize {
        self.deprecated.len()
    }

    /// First child (in depth order) with the given instance name.
    pub fn get_by_name(&self, name: &str) -> Option<&DisplayObject> {
        self.children.values().find(|child| child.is_named(name))
    }

    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut DisplayObject> {
        self.children.values_mut().find(|child| child.is_named(name))
    }

    /// Children in ascending depth order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &DisplayObject)> {
        self.children.iter().map(|(depth, child)| (*depth, child))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u16, &mut DisplayObject)> {
        self.children.iter_mut().map(|(depth, child)| (*depth, child))
    }

    /// Depth to character id mapping of the live children.
    pub fn character_map(&self) -> Vec<(u16, u16)> {
        self.iter()
            .map(|(depth, child)| (depth, child.character_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
