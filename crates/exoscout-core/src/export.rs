use crate::{
    models::{PlanetClass, PlanetRecord},
    projection::{PlotSpec, Projection},
    Error, Result,
};
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Exporter for processed planets and plot series
pub struct Exporter;

impl Exporter {
    /// Export planets to a file, format picked from the extension
    pub fn export_to_file<P: AsRef<Path>>(planets: &[PlanetRecord], path: P) -> Result<()> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path).ok_or_else(|| {
            Error::ExportError(
                "Could not determine export format from extension. Use .json, .csv, or .md"
                    .to_string(),
            )
        })?;

        let content = match format {
            ExportFormat::Json => Self::to_json(planets)?,
            ExportFormat::Csv => Self::to_csv(planets),
            ExportFormat::Markdown => Self::to_markdown(planets),
        };

        Self::write(path, &content)
    }

    /// Export plot series to a .csv or .json file
    pub fn export_projection<P: AsRef<Path>>(projection: &Projection, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ExportFormat::from_path(path) {
            Some(ExportFormat::Csv) => Self::projection_to_csv(projection),
            Some(ExportFormat::Json) => Self::projection_to_json(projection)?,
            _ => {
                return Err(Error::ExportError(
                    "Plot series can only be exported as .csv or .json".to_string(),
                ))
            }
        };

        Self::write(path, &content)
    }

    fn write(path: &Path, content: &str) -> Result<()> {
        let mut file = File::create(path).map_err(|e| {
            Error::ExportError(format!("Failed to create {}: {}", path.display(), e))
        })?;

        file.write_all(content.as_bytes()).map_err(|e| {
            Error::ExportError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    pub fn to_json(planets: &[PlanetRecord]) -> Result<String> {
        Ok(serde_json::to_string_pretty(planets)?)
    }

    pub fn to_csv(planets: &[PlanetRecord]) -> String {
        let mut output = String::new();
        output.push_str("Name,Orbital Period (days),Radius (Earth radii),Discovery Year,Class\n");

        for planet in planets {
            output.push_str(&format!(
                "{},{},{},{},{}\n",
                Self::escape_csv(&planet.name),
                planet.orbital_period_days,
                planet.radius_earth,
                planet
                    .discovery_year
                    .map(|y| y.to_string())
                    .unwrap_or_default(),
                planet.class(),
            ));
        }

        output
    }

    pub fn to_markdown(planets: &[PlanetRecord]) -> String {
        let mut output = String::new();

        output.push_str("# Exoplanet Records\n\n");
        output.push_str(&format!(
            "Generated {} | Total planets: {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M UTC"),
            planets.len()
        ));

        output.push_str("| Name | Orbital Period (days) | Radius (R⊕) | Discovered | Class |\n");
        output.push_str("|------|----------------------:|------------:|-----------:|-------|\n");
        for planet in planets {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                planet.name.replace('|', "\\|"),
                planet.orbital_period_days,
                planet.radius_earth,
                planet
                    .discovery_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                planet.class(),
            ));
        }

        if !planets.is_empty() {
            output.push_str("\n## Summary\n\n");

            let years: Vec<i64> = planets.iter().filter_map(|p| p.discovery_year).collect();
            if let (Some(first), Some(last)) = (years.iter().min(), years.iter().max()) {
                output.push_str(&format!("- Discovery years: {} to {}\n", first, last));
            }

            output.push_str("\n### Size Classes\n\n");
            for class in [
                PlanetClass::EarthLike,
                PlanetClass::SuperEarth,
                PlanetClass::GasGiant,
            ] {
                let count = planets.iter().filter(|p| p.class() == class).count();
                output.push_str(&format!("- {}: {}\n", class, count));
            }
        }

        output
    }

    /// Two columns, one row per point, same order as the series
    pub fn projection_to_csv(projection: &Projection) -> String {
        let mut output = String::from("orbital_period_days,radius_earth\n");
        for (x, y) in projection.points() {
            output.push_str(&format!("{},{}\n", x, y));
        }
        output
    }

    /// Series plus the axis metadata a renderer needs
    pub fn projection_to_json(projection: &Projection) -> Result<String> {
        let document = serde_json::json!({
            "plot": PlotSpec::default(),
            "bounds": projection.log_bounds(),
            "xs": projection.xs,
            "ys": projection.ys,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Escape CSV special characters
    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;

    fn sample() -> Vec<PlanetRecord> {
        vec![
            PlanetRecord {
                name: "Kepler-1b".to_string(),
                orbital_period_days: 10.5,
                radius_earth: 1.2,
                discovery_year: Some(2010),
            },
            PlanetRecord {
                name: "HD 209458 b, \"Osiris\"".to_string(),
                orbital_period_days: 3.5,
                radius_earth: 15.1,
                discovery_year: None,
            },
        ]
    }

    #[test]
    fn test_export_format_detection() {
        assert_eq!(
            ExportFormat::from_extension("JSON"),
            Some(ExportFormat::Json)
        );
        assert_eq!(ExportFormat::from_extension("csv"), Some(ExportFormat::Csv));
        assert_eq!(
            ExportFormat::from_extension("markdown"),
            Some(ExportFormat::Markdown)
        );
        assert_eq!(ExportFormat::from_extension("png"), None);
        assert_eq!(
            ExportFormat::from_path(Path::new("out/planets.md")),
            Some(ExportFormat::Markdown)
        );
    }

    #[test]
    fn test_json_export() {
        let json = Exporter::to_json(&sample()).unwrap();
        let back: Vec<PlanetRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_csv_export() {
        let csv = Exporter::to_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Name,Orbital Period (days),Radius (Earth radii),Discovery Year,Class");
        assert_eq!(lines[1], "Kepler-1b,10.5,1.2,2010,Earth-like");
        assert_eq!(lines[2], "\"HD 209458 b, \"\"Osiris\"\"\",3.5,15.1,,Gas giant");
    }

    #[test]
    fn test_markdown_export() {
        let md = Exporter::to_markdown(&sample());
        assert!(md.contains("# Exoplanet Records"));
        assert!(md.contains("Total planets: 2"));
        assert!(md.contains("| Kepler-1b | 10.5 | 1.2 | 2010 | Earth-like |"));
        assert!(md.contains("| N/A |"));
        assert!(md.contains("- Gas giant: 1"));
    }

    #[test]
    fn test_projection_csv() {
        let csv = Exporter::projection_to_csv(&project(&sample()));
        assert_eq!(csv, "orbital_period_days,radius_earth\n10.5,1.2\n3.5,15.1\n");
    }

    #[test]
    fn test_projection_json_carries_plot_metadata() {
        let json = Exporter::projection_to_json(&project(&sample())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["plot"]["title"], "Orbital Period vs Radius");
        assert_eq!(value["plot"]["x_log"], true);
        assert_eq!(value["xs"][1], 3.5);
        assert_eq!(value["ys"][1], 15.1);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("planets.csv");
        Exporter::export_to_file(&sample(), &csv_path).unwrap();
        assert!(std::fs::read_to_string(&csv_path).unwrap().contains("Kepler-1b"));

        let series_path = dir.path().join("series.csv");
        Exporter::export_projection(&project(&sample()), &series_path).unwrap();
        assert!(std::fs::read_to_string(&series_path)
            .unwrap()
            .starts_with("orbital_period_days,radius_earth"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Exporter::export_to_file(&sample(), dir.path().join("planets.png")),
            Err(Error::ExportError(_))
        ));
        assert!(matches!(
            Exporter::export_projection(&project(&sample()), dir.path().join("plot.md")),
            Err(Error::ExportError(_))
        ));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(Exporter::escape_csv("simple"), "simple");
        assert_eq!(Exporter::escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(Exporter::escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(Exporter::escape_csv("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(Exporter::escape_csv("carriage\rreturn"), "\"carriage\rreturn\"");
    }
}
