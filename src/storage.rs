use crate::models::ViewCountry;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix text cells that a spreadsheet would evaluate as a formula.
fn safe_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{}", s)
    } else {
        s.to_string()
    }
}

/// Save the view as CSV with header, in display order.
pub fn save_csv<P: AsRef<Path>>(countries: &[ViewCountry], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "rank",
        "key",
        "name",
        "official_name",
        "region",
        "population",
        "area",
        "display_population",
        "display_area",
        "independent",
        "un_member",
        "flag_png",
    ))?;
    for (i, c) in countries.iter().enumerate() {
        let r = &c.country;
        wtr.serialize((
            i + 1,
            safe_cell(c.key()),
            safe_cell(&r.name.common),
            r.name.official.as_deref().map(safe_cell),
            safe_cell(&r.region),
            r.population,
            r.area,
            &c.display_population,
            &c.display_area,
            r.is_independent(),
            r.un_member,
            safe_cell(&r.flags.png),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the view as a pretty JSON array (records keep their API field names).
pub fn save_json<P: AsRef<Path>>(countries: &[ViewCountry], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(countries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
