//! Lookups behind `era5cli info`.

use std::fmt;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Info {
    /// A whole catalog, printed in columns.
    List(Catalog),
    /// The catalogs a single variable or level belongs to.
    Membership { name: String, catalogs: Vec<Catalog> },
}

impl Info {
    pub fn new(name: &str) -> Result<Self> {
        if let Some(catalog) = Catalog::from_name(name) {
            return Ok(Info::List(catalog));
        }
        let catalogs = Catalog::containing(name);
        if catalogs.is_empty() {
            return Err(Error::InvalidOption(format!(
                "unknown value for info: '{name}'; use one of levels, 2Dvars, 3Dvars, land, \
                 or a variable or pressure level name"
            )));
        }
        Ok(Info::Membership {
            name: name.to_string(),
            catalogs,
        })
    }

    /// Render for a terminal `width` columns wide.
    pub fn render(&self, width: usize) -> String {
        match self {
            Info::List(catalog) => multicolumn(
                &format!("Available {}:", catalog.title()),
                &catalog.entries(),
                width,
            ),
            Info::Membership { name, catalogs } => {
                let names: Vec<&str> = catalogs.iter().map(|c| c.name()).collect();
                format!("{name} is in the list: {}\n", names.join(", "))
            }
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(terminal_width()))
    }
}

/// Width from `$COLUMNS`, else 80.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

fn multicolumn(header: &str, entries: &[String], width: usize) -> String {
    let cell = entries.iter().map(|e| e.len()).max().unwrap_or(0) + 2;
    let columns = (width / cell).max(1);

    let mut out = format!("{header}\n\n");
    for row in entries.chunks(columns) {
        let line: String = row.iter().map(|e| format!("{e:<cell$}")).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
