// Text rendering for planets and search results
use std::io::{self, Write};

use exoscout_core::PlanetRecord;

/// `Kepler-1b | Radius: 1.2 Earth | Orbital Period: 10.5 days`
pub fn summary_line(planet: &PlanetRecord) -> String {
    format!(
        "{} | Radius: {} Earth | Orbital Period: {} days",
        planet.name, planet.radius_earth, planet.orbital_period_days
    )
}

pub fn details(planet: &PlanetRecord) -> String {
    let year = planet
        .discovery_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Name: {}\nRadius: {} Earth radii\nOrbital Period: {} days\nDiscovery Year: {}\nClass: {}",
        planet.name,
        planet.radius_earth,
        planet.orbital_period_days,
        year,
        planet.class()
    )
}

/// Print at most `limit` matches; the count always covers all of them
pub fn write_matches<W: Write>(out: &mut W, matches: &[&PlanetRecord], limit: usize) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "No matching planets found.");
    }

    writeln!(out, "Found {} match(es):", matches.len())?;
    for planet in matches.iter().take(limit) {
        writeln!(out, "{}", summary_line(planet))?;
    }
    if matches.len() > limit {
        writeln!(out, "... and {} more", matches.len() - limit)?;
    }
    Ok(())
}
