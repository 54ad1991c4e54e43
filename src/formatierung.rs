//! Anzeige von Beträgen im deutschen Zahlenformat:
//! Dezimalkomma, Punkt als Tausendertrennung.

use std::fmt;
use std::fmt::Write;

use crate::zahl::runde;
use crate::Zahl;

/// Geldbetrag mit zwei Nachkommastellen: `€ 1.234,56`.
pub struct Eur(pub Zahl);

impl fmt::Display for Eur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("€ ")?;
        deutsch(f, &format!("{:.2}", runde(self.0, 2)))
    }
}

/// Stückzahl mit bis zu vier Nachkommastellen, Endnullen abgeschnitten.
pub struct Stück(pub Zahl);

impl fmt::Display for Stück {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        deutsch(f, &runde(self.0, 4).normalize().to_string())
    }
}

/// Ein Faktor als Prozentsatz: `0,3215` → `32,15 %`.
pub struct Prozent(pub Zahl);

impl fmt::Display for Prozent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        deutsch(f, &format!("{:.2}", runde(self.0 * Zahl::ONE_HUNDRED, 2)))?;
        f.write_str(" %")
    }
}

fn deutsch(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let (vorzeichen, text) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (vor, nach) = match text.split_once('.') {
        Some((vor, nach)) => (vor, nach),
        None => (text, ""),
    };

    f.write_str(vorzeichen)?;
    let stellen = vor.len();
    for (i, ziffer) in vor.chars().enumerate() {
        if i > 0 && (stellen - i) % 3 == 0 {
            f.write_char('.')?;
        }
        f.write_char(ziffer)?;
    }
    if !nach.is_empty() {
        f.write_char(',')?;
        f.write_str(nach)?;
    }
    Ok(())
}
