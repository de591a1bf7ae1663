use crate::models::PlanetRecord;

/// Case-insensitive substring search over planet names
///
/// The keyword is trimmed first. A blank keyword matches nothing rather
/// than everything. Results keep the order of `processed`.
pub fn search<'a>(processed: &'a [PlanetRecord], keyword: &str) -> Vec<&'a PlanetRecord> {
    let Some(needle) = fold_keyword(keyword) else {
        return Vec::new();
    };

    processed
        .iter()
        .filter(|planet| planet.name.to_lowercase().contains(&needle))
        .collect()
}

/// First planet whose name equals `name`, ignoring case
pub fn find_exact<'a>(processed: &'a [PlanetRecord], name: &str) -> Option<&'a PlanetRecord> {
    let needle = fold_keyword(name)?;
    processed
        .iter()
        .find(|planet| planet.name.to_lowercase() == needle)
}

fn fold_keyword(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Names folded once up front, for running many searches over one processed set
///
/// Returns the same matches as [`search`].
pub struct SearchIndex<'a> {
    planets: &'a [PlanetRecord],
    folded_names: Vec<String>,
}

impl<'a> SearchIndex<'a> {
    pub fn build(planets: &'a [PlanetRecord]) -> Self {
        let folded_names = planets.iter().map(|p| p.name.to_lowercase()).collect();
        Self {
            planets,
            folded_names,
        }
    }

    pub fn search(&self, keyword: &str) -> Vec<&'a PlanetRecord> {
        let Some(needle) = fold_keyword(keyword) else {
            return Vec::new();
        };

        self.folded_names
            .iter()
            .zip(self.planets)
            .filter(|(name, _)| name.contains(&needle))
            .map(|(_, planet)| planet)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}
