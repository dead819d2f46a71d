use crate::types::{Coordinates, WeatherError};

/// Label of the auto-located slot
pub const AUTO_LABEL: &str = "Auto";

/// One entry in the fixed city list. Slot 0 is always Auto and has no
/// name or coordinates of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySlot {
    pub index: usize,
    pub name: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl CitySlot {
    pub fn is_auto(&self) -> bool {
        self.name.is_none()
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(AUTO_LABEL)
    }
}

/// Ordered, fixed-length list of city slots.
#[derive(Debug, Clone)]
pub struct CitySlots {
    slots: Vec<CitySlot>,
    home_index: usize,
}

impl CitySlots {
    /// Build the list with Auto at index 0 followed by the presets in order.
    ///
    /// `home` must name one of the presets.
    pub fn new<I>(presets: I, home: &str) -> Result<Self, WeatherError>
    where
        I: IntoIterator<Item = (String, Coordinates)>,
    {
        let mut slots = vec![CitySlot {
            index: 0,
            name: None,
            coordinates: None,
        }];
        slots.extend(
            presets
                .into_iter()
                .enumerate()
                .map(|(i, (name, coordinates))| CitySlot {
                    index: i + 1,
                    name: Some(name),
                    coordinates: Some(coordinates),
                }),
        );

        let home_index = slots
            .iter()
            .position(|s| s.name.as_deref() == Some(home))
            .ok_or_else(|| WeatherError::UnknownCity(home.to_string()))?;

        Ok(Self { slots, home_index })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Never true: Auto is always present.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CitySlot> {
        self.slots.get(index)
    }

    pub fn home_index(&self) -> usize {
        self.home_index
    }

    pub fn iter(&self) -> impl Iterator<Item = &CitySlot> {
        self.slots.iter()
    }
}
