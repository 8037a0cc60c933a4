use std::fmt;
use std::ops::RangeInclusive;

use foundation::arena::Arena;
use foundation::handles::Handle;

use crate::area::AreaClass;
use crate::descriptor::{ALTITUDE_RANGE, CapDescriptor, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::facing::Facing;

/// Stable identity of a cap for as long as it exists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapId(pub Handle);

impl fmt::Display for CapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cap#{}", self.0)
    }
}

/// One editable field of a cap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CapField {
    Latitude(f64),
    Longitude(f64),
    Altitude(f64),
    AreaClass(AreaClass),
    Facing(Facing),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CapCommand {
    /// Appends a cap; `None` adds [`CapDescriptor::default`].
    Add(Option<CapDescriptor>),
    Remove(CapId),
    Update(CapId, CapField),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CapChange {
    Added(CapId),
    Removed(CapId),
    Updated(CapId),
}

impl CapChange {
    pub fn cap(&self) -> CapId {
        match *self {
            CapChange::Added(id) | CapChange::Removed(id) | CapChange::Updated(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    UnknownCap(CapId),
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::UnknownCap(id) => write!(f, "unknown cap: {id}"),
            EditError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} {value} is outside [{min}, {max}]"),
        }
    }
}

impl std::error::Error for EditError {}

fn check(field: &'static str, value: f64, range: RangeInclusive<f64>) -> Result<f64, EditError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(EditError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn validate(descriptor: &CapDescriptor) -> Result<(), EditError> {
    check("latitude", descriptor.latitude, LATITUDE_RANGE)?;
    check("longitude", descriptor.longitude, LONGITUDE_RANGE)?;
    check("altitude", descriptor.altitude, ALTITUDE_RANGE)?;
    Ok(())
}

/// Ordered collection of cap descriptors keyed by [`CapId`].
///
/// Iteration follows insertion order. Removing a cap never shifts the ids of
/// the others, and a removed id stays invalid even after its slot is reused.
#[derive(Debug, Clone, Default)]
pub struct CapSet {
    caps: Arena<CapDescriptor>,
    order: Vec<CapId>,
}

impl CapSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = CapDescriptor>,
    ) -> Result<Self, EditError> {
        let mut set = Self::new();
        for d in descriptors {
            set.apply(CapCommand::Add(Some(d)))?;
        }
        Ok(set)
    }

    /// Single entry point for every mutation.
    pub fn apply(&mut self, command: CapCommand) -> Result<CapChange, EditError> {
        match command {
            CapCommand::Add(descriptor) => {
                let descriptor = descriptor.unwrap_or_default();
                validate(&descriptor)?;
                let id = CapId(self.caps.insert(descriptor));
                self.order.push(id);
                Ok(CapChange::Added(id))
            }
            CapCommand::Remove(id) => {
                self.caps.remove(id.0).ok_or(EditError::UnknownCap(id))?;
                self.order.retain(|other| *other != id);
                Ok(CapChange::Removed(id))
            }
            CapCommand::Update(id, field) => {
                let cap = self.caps.get_mut(id.0).ok_or(EditError::UnknownCap(id))?;
                match field {
                    CapField::Latitude(v) => cap.latitude = check("latitude", v, LATITUDE_RANGE)?,
                    CapField::Longitude(v) => {
                        cap.longitude = check("longitude", v, LONGITUDE_RANGE)?
                    }
                    CapField::Altitude(v) => cap.altitude = check("altitude", v, ALTITUDE_RANGE)?,
                    CapField::AreaClass(a) => cap.area_class = a,
                    CapField::Facing(f) => cap.facing = f,
                }
                Ok(CapChange::Updated(id))
            }
        }
    }

    pub fn get(&self, id: CapId) -> Option<&CapDescriptor> {
        self.caps.get(id.0)
    }

    pub fn contains(&self, id: CapId) -> bool {
        self.caps.contains(id.0)
    }

    /// Id of the cap at `position` in insertion order.
    pub fn id_at(&self, position: usize) -> Option<CapId> {
        self.order.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CapId, &CapDescriptor)> {
        self.order
            .iter()
            .filter_map(|id| self.caps.get(id.0).map(|d| (*id, d)))
    }

    pub fn descriptors(&self) -> Vec<CapDescriptor> {
        self.iter().map(|(_, d)| *d).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
