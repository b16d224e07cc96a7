// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Model catalog descriptors and the `{url, name}` projection the session uses.

use core::fmt;

use percent_encoding::percent_decode_str;

/// One catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Catalog id.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Download URL of the `.glb`.
    pub url: &'static str,
    /// Grouping shown in the catalog.
    pub category: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Facility credited for the model.
    pub source_facility: &'static str,
}

impl AssetDescriptor {
    /// The part of the descriptor the viewer needs.
    pub fn asset_ref(&self) -> AssetRef {
        AssetRef::new(self.url, self.name)
    }
}

/// An asset to show: where to load it from and what to call it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetRef {
    /// URL or filesystem path.
    pub url: String,
    /// Display name.
    pub name: String,
}

impl AssetRef {
    /// Build a reference.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    /// Reference named after the last path segment of `url`, without query,
    /// fragment, or extension, and percent-decoded.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let name = path
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .map(|file| file.rsplit_once('.').map_or(file, |(stem, _)| stem))
            .map(|stem| percent_decode_str(stem).decode_utf8_lossy().trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Model".to_owned());
        Self { url, name }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.url)
    }
}

macro_rules! nasa {
    ($path:literal) => {
        concat!(
            "https://raw.githubusercontent.com/nasa/NASA-3D-Resources/master/3D%20Models/",
            $path
        )
    };
}

/// Built-in NASA models.
pub const BUILTIN: &[AssetDescriptor] = &[
    AssetDescriptor {
        id: 1,
        name: "70-Meter Dish",
        url: nasa!("70-meter%20Dish/70%20meter%20dish.glb"),
        category: "Antennas",
        description: "Deep Space Network 70-meter antenna dish used for planetary communications",
        source_facility: "Jet Propulsion Laboratory",
    },
    AssetDescriptor {
        id: 6,
        name: "Hubble Space Telescope (A)",
        url: nasa!("Hubble%20Space%20Telescope%20(A)/Hubble%20Space%20Telescope%20(A).glb"),
        category: "Telescopes",
        description: "Orbiting observatory revealing universe secrets",
        source_facility: "Goddard Space Flight Center",
    },
    AssetDescriptor {
        id: 8,
        name: "James Webb Space Telescope (A)",
        url: nasa!("James%20Webb%20Space%20Telescope%20(A)/James%20Webb%20Space%20Telescope%20(A).glb"),
        category: "Telescopes",
        description: "Next-generation infrared space telescope",
        source_facility: "Goddard Space Flight Center",
    },
    AssetDescriptor {
        id: 17,
        name: "International Space Station (A)",
        url: nasa!("International%20Space%20Station%20(ISS)%20(A)/International%20Space%20Station%20(ISS)%20(A).glb"),
        category: "Space Stations",
        description: "The orbital research laboratory in low-Earth orbit",
        source_facility: "Johnson Space Center",
    },
    AssetDescriptor {
        id: 40,
        name: "Curiosity Rover (MSL)",
        url: nasa!("Curiosity%20Rover%20(MSL)/Curiosity%20Rover%20(MSL)%20(Clean).glb"),
        category: "Mars",
        description: "Mars Science Laboratory rover",
        source_facility: "Jet Propulsion Laboratory",
    },
    AssetDescriptor {
        id: 41,
        name: "Mars 2020 Perseverance Rover",
        url: nasa!("Mars%202020%20Perseverance%20Rover/Mars%202020%20Perseverance%20Rover.glb"),
        category: "Mars",
        description: "Mars rover seeking signs of ancient microbial life",
        source_facility: "Jet Propulsion Laboratory",
    },
    AssetDescriptor {
        id: 71,
        name: "Saturn V",
        url: nasa!("Saturn%20V/Saturn%20V.glb"),
        category: "Rockets",
        description: "Legendary rocket that took astronauts to the Moon",
        source_facility: "Marshall Space Flight Center",
    },
    AssetDescriptor {
        id: 80,
        name: "Apollo Lunar Module",
        url: nasa!("Apollo%20Lunar%20Module/Apollo%20Lunar%20Module.glb"),
        category: "Capsules",
        description: "Historic spacecraft that landed astronauts on the Moon",
        source_facility: "Johnson Space Center",
    },
];

/// Look up a built-in entry by id.
pub fn by_id(id: u32) -> Option<&'static AssetDescriptor> {
    BUILTIN.iter().find(|d| d.id == id)
}

/// Built-in entries in `category`.
pub fn in_category(category: &str) -> impl Iterator<Item = &'static AssetDescriptor> + '_ {
    BUILTIN.iter().filter(move |d| d.category == category)
}
