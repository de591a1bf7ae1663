// Numbered menu that drives a Session one step at a time
use std::io::{BufRead, Write};
use std::path::PathBuf;

use exoscout_core::{Error, Exporter, RecordSource, Session};

use crate::display::write_matches;

pub struct MenuSettings {
    pub result_limit: usize,
    /// Where option 3 writes the plot series
    pub plot_path: PathBuf,
}

const MENU: &str = "\n--- Exoplanet Data Explorer ---
1. Fetch Data
2. Process Data
3. Visualize Orbital Period vs Radius
4. Search Planet by Name
5. Exit";

pub async fn run_menu<S, R, W>(
    session: &mut Session,
    source: &S,
    settings: &MenuSettings,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: RecordSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        writeln!(out, "{}", MENU)?;
        write!(out, "Enter your choice: ")?;
        out.flush()?;

        let Some(choice) = lines.next() else {
            // stdin closed
            writeln!(out)?;
            break;
        };

        match choice?.trim() {
            "1" => {
                writeln!(out, "Fetching data...")?;
                match session.fetch(source).await {
                    Ok(count) => writeln!(out, "Fetched {} records.", count)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "2" => match session.process() {
                Ok(count) => writeln!(out, "Processed {} records.", count)?,
                Err(Error::PreconditionError(_)) => writeln!(out, "Please fetch data first.")?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            "3" => match session.project() {
                Ok(projection) if projection.is_empty() => {
                    writeln!(out, "No data to visualize. Please process data first.")?
                }
                Ok(projection) => {
                    match Exporter::export_projection(&projection, &settings.plot_path) {
                        Ok(()) => writeln!(
                            out,
                            "Plot series ({} points) saved as {}",
                            projection.len(),
                            settings.plot_path.display()
                        )?,
                        Err(e) => writeln!(out, "Error: {}", e)?,
                    }
                }
                Err(Error::PreconditionError(_)) => writeln!(out, "Please process data first.")?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            "4" => {
                if session.processed().is_err() {
                    writeln!(out, "Please process data first.")?;
                    continue;
                }

                write!(out, "Enter planet name keyword: ")?;
                out.flush()?;
                let keyword = match lines.next() {
                    Some(line) => line?,
                    None => break,
                };

                let matches = session.search(&keyword)?;
                write_matches(out, &matches, settings.result_limit)?;
            }
            "5" => {
                writeln!(out, "Exiting. Bye!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }

    Ok(())
}
