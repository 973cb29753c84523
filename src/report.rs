use std::borrow::Borrow;
use std::io::{self, Write};

use crate::data::model::Flight;

/// Write a titled block: the title, one flight per line, then a blank line.
pub fn display_flights<W, F>(out: &mut W, title: &str, flights: &[F]) -> io::Result<()>
where
    W: Write,
    F: Borrow<Flight>,
{
    writeln!(out, "{title}")?;
    for flight in flights {
        writeln!(out, "{}", flight.borrow())?;
    }
    writeln!(out)
}

/// Same layout as [`display_flights`], collected into a string.
pub fn render_flights<F: Borrow<Flight>>(title: &str, flights: &[F]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = display_flights(&mut buf, title, flights);
    String::from_utf8_lossy(&buf).into_owned()
}
