//! Der menschenlesbare Bericht: Kopf, ein Block je Anlage, die
//! Typ-Übersicht mit Summe, die Verteilung nach Symbol und zum Schluss
//! die Steuerschätzung.

use std::fmt;

use crate::depot::{SymbolZeile, Zeile};
use crate::formatierung::{Eur, Prozent, Stück};
use crate::steuern::{Posten, SteuerSchätzung};
use crate::{Anlage, AnlageTyp, Datum, Filter, Kennzahlen};

pub const BREITE: usize = 72;

pub struct BerichtKopf {
    pub filter: Filter,
    pub stichtag: Datum,
}

impl fmt::Display for BerichtKopf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Depotauswertung zum {}", self.stichtag)?;
        match self.filter.jahr {
            Some(jahr) => writeln!(f, "Jahr {jahr}, Ansicht: {}", self.filter.ansicht)?,
            None => writeln!(f, "Gesamte Laufzeit, Ansicht: {}", self.filter.ansicht)?,
        }
        writeln!(f, "{:=<BREITE$}", "")
    }
}

pub struct BerichtAnlage<'a> {
    pub anlage: &'a Anlage,
    pub kennzahlen: &'a Kennzahlen,
}

impl fmt::Display for BerichtAnlage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let anlage = self.anlage;
        let kennzahlen = self.kennzahlen;

        match &anlage.symbol {
            Some(symbol) => writeln!(f, "{} [{symbol}] ({})", anlage.name, anlage.typ)?,
            None => writeln!(f, "{} ({})", anlage.name, anlage.typ)?,
        }

        if anlage.typ == AnlageTyp::Zinskonto {
            writeln!(f, "Einzahlungen: {}", Eur(kennzahlen.kaufwert))?;
            writeln!(f, "Saldo: {}", Eur(kennzahlen.marktwert))?;
            writeln!(f, "Zinsen: {}", Eur(kennzahlen.unrealisiert))?;
        } else {
            if let Some(kauf) = anlage.kauf {
                writeln!(
                    f,
                    "Kauf am {}: {} Stück × {}",
                    kauf.datum(),
                    Stück(kauf.stück()),
                    Eur(kauf.preis()),
                )?;
            }
            writeln!(
                f,
                "Bestand: {} Stück, Einstand {}",
                Stück(kennzahlen.bestand),
                Eur(kennzahlen.einstand),
            )?;
            writeln!(f, "Marktwert: {}", Eur(kennzahlen.marktwert))?;
            writeln!(f, "Realisiert: {}", Eur(kennzahlen.realisiert_anzeige))?;
            writeln!(f, "Unrealisiert: {}", Eur(kennzahlen.unrealisiert))?;
        }
        writeln!(f, "Rendite: {}", Prozent(kennzahlen.rendite))?;
        writeln!(f, "{:-<BREITE$}", "")
    }
}

pub struct BerichtZeilen<'a> {
    pub zeilen: &'a [Zeile],
    pub summen: &'a Zeile,
}

impl fmt::Display for BerichtZeilen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Übersicht nach Typ")?;
        for zeile in self.zeilen {
            zeile_schreiben(f, zeile)?;
        }
        writeln!(f, "{:-<BREITE$}", "")?;
        zeile_schreiben(f, self.summen)?;
        writeln!(f, "{:-<BREITE$}", "")
    }
}

fn zeile_schreiben(f: &mut fmt::Formatter<'_>, zeile: &Zeile) -> fmt::Result {
    writeln!(
        f,
        "{:<24} {:>14} {:>14} {:>14}",
        zeile.name,
        Eur(zeile.kaufwert).to_string(),
        Eur(zeile.gesamt).to_string(),
        Prozent(zeile.rendite).to_string(),
    )
}

pub struct BerichtVerteilung<'a> {
    pub verteilung: &'a [SymbolZeile],
}

impl fmt::Display for BerichtVerteilung<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Verteilung nach Symbol")?;
        for zeile in self.verteilung {
            writeln!(
                f,
                "{:<24} {:>14} {:>10}",
                zeile.symbol,
                Eur(zeile.wirtschaftswert).to_string(),
                Prozent(zeile.anteil).to_string(),
            )?;
        }
        writeln!(f, "{:-<BREITE$}", "")
    }
}

pub struct BerichtSteuer<'a> {
    pub steuer: &'a SteuerSchätzung,
}

impl fmt::Display for BerichtSteuer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steuer = self.steuer;
        writeln!(f, "Steuerschätzung für {}", steuer.jahr)?;
        posten_schreiben(f, "Kapitalerträge (§ 20)", &steuer.kapital)?;
        posten_schreiben(f, "Krypto (§ 23)", &steuer.krypto)?;
        posten_schreiben(f, "Termingeschäfte", &steuer.termingeschäfte)?;
        if !steuer.verlustvortrag.is_zero() {
            writeln!(f, "Verlustvortrag Termingeschäfte: {}", Eur(steuer.verlustvortrag))?;
        }
        writeln!(f, "{:-<BREITE$}", "")?;
        writeln!(f, "Geschätzte Steuer gesamt: {}", Eur(steuer.gesamt))
    }
}

fn posten_schreiben(f: &mut fmt::Formatter<'_>, name: &str, posten: &Posten) -> fmt::Result {
    writeln!(f, "{name}")?;
    writeln!(f, "  Einkünfte: {}", Eur(posten.einkünfte))?;
    if !posten.pauschbetrag.is_zero() {
        writeln!(f, "  Verbrauchter Pauschbetrag: {}", Eur(posten.pauschbetrag))?;
    }
    writeln!(f, "  Bemessung: {}", Eur(posten.bemessung))?;
    writeln!(
        f,
        "  Steuer: {}  Soli: {}  Kirchensteuer: {}",
        Eur(posten.steuer),
        Eur(posten.soli),
        Eur(posten.kirchensteuer),
    )
}
