//! TSV-Ausgabe für den Export: stabile, benannte numerische Spalten,
//! eine Zeile je Anlage plus die aggregierten Zeilen und die Summe.

use std::fmt;

use crate::depot::Zeile;
use crate::zahl::runde;
use crate::{Anlage, Kennzahlen};

pub struct TsvTitel;

impl fmt::Display for TsvTitel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        schreibe_titel(f)
    }
}

pub struct TsvAnlage<'a> {
    pub anlage: &'a Anlage,
    pub kennzahlen: &'a Kennzahlen,
}

impl fmt::Display for TsvAnlage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        schreibe_anlage(f, self.anlage, self.kennzahlen)
    }
}

pub struct TsvZeile<'a> {
    pub zeile: &'a Zeile,
}

impl fmt::Display for TsvZeile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        schreibe_zeile(f, self.zeile)
    }
}

pub fn schreibe_titel<W: fmt::Write>(w: &mut W) -> fmt::Result {
    write!(w, "Name\tTyp\tSymbol\tBestand\t")?; // 4
    write!(w, "Kaufwert\tEinstand\tMarktwert\t")?; // 3
    writeln!(w, "Realisiert\tUnrealisiert\tGesamt\tRendite") // 4
}

pub fn schreibe_anlage<W: fmt::Write>(
    w: &mut W,
    anlage: &Anlage,
    kennzahlen: &Kennzahlen,
) -> fmt::Result {
    let gesamt = kennzahlen.realisiert_anzeige + kennzahlen.unrealisiert;
    write!(
        w,
        "{}\t{}\t{}\t{}\t",
        anlage.name,
        anlage.typ,
        anlage.symbol.as_deref().unwrap_or(""),
        runde(kennzahlen.bestand, 4).normalize(),
    )?;
    write!(
        w,
        "{:.2}\t{:.2}\t{:.2}\t",
        kennzahlen.kaufwert, kennzahlen.einstand, kennzahlen.marktwert,
    )?;
    writeln!(
        w,
        "{:.2}\t{:.2}\t{:.2}\t{:.4}",
        kennzahlen.realisiert_anzeige, kennzahlen.unrealisiert, gesamt, kennzahlen.rendite,
    )
}

pub fn schreibe_zeile<W: fmt::Write>(w: &mut W, zeile: &Zeile) -> fmt::Result {
    write!(w, "{}\t\t\t\t", zeile.name)?;
    write!(w, "{:.2}\t\t{:.2}\t", zeile.kaufwert, zeile.marktwert)?;
    writeln!(
        w,
        "{:.2}\t{:.2}\t{:.2}\t{:.4}",
        zeile.realisiert, zeile.unrealisiert, zeile.gesamt, zeile.rendite,
    )
}
