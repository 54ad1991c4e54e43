//! Tageweise Zinseszinsrechnung über ein Konto mit Zahlungsströmen und
//! stückweise konstantem Jahreszins (Actual/365).
//!
//! Der Verlauf wird entlang von Stützpunkten abgearbeitet: erste Zahlung,
//! jede weitere Zahlung, jeder Zinssatzwechsel und der Stichtag. Zwischen
//! zwei Stützpunkten ist der Satz konstant; Abschnitte über einen
//! Jahreswechsel werden am 1. Jänner geteilt, damit jeder Zins-Anteil exakt
//! seinem Kalenderjahr zugeschrieben wird.

use std::collections::BTreeMap;

use chrono::Datelike;
use num_traits::Zero;
use rust_decimal::MathematicalOps;

use crate::zahl::als_faktor;
use crate::{Datum, Ereignis, Zahl, Zinssatz};

const TAGE_PRO_JAHR: u32 = 365;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zinsverlauf {
    /// Saldo am Stichtag.
    pub endsaldo: Zahl,
    /// Netto-Einzahlungen: Einzahlungen minus Auszahlungen.
    pub einzahlungen: Zahl,
    /// Gesamte gutgeschriebene Zinsen; entspricht `endsaldo − einzahlungen`.
    pub zinsen: Zahl,
    pub zinsen_pro_jahr: BTreeMap<i32, Zahl>,
    /// Saldo-Probe an jedem Stützpunkt, für Verlaufs-Anzeigen.
    pub verlauf: Vec<(Datum, Zahl)>,
}

pub fn zinsen_berechnen(
    ereignisse: &[Ereignis],
    zinssätze: &[Zinssatz],
    stichtag: Datum,
) -> Zinsverlauf {
    let mut ergebnis = Zinsverlauf::default();

    let mut zahlungen: Vec<(Datum, Zahl)> = ereignisse
        .iter()
        .map(|ereignis| (ereignis.datum(), ereignis.zahlung()))
        .filter(|(datum, betrag)| !betrag.is_zero() && *datum <= stichtag)
        .collect();
    zahlungen.sort_by_key(|(datum, _)| *datum);

    let Some(&(beginn, _)) = zahlungen.first() else {
        // Keine Zahlungsströme: der Saldo bleibt Null, egal welche Sätze gelten.
        return ergebnis;
    };

    let mut sätze: Vec<(Datum, Zahl)> = zinssätze
        .iter()
        .map(|satz| (satz.ab(), satz.prozent()))
        .collect();
    sätze.sort_by_key(|(ab, _)| *ab);

    let mut stützpunkte: Vec<Datum> = Vec::with_capacity(zahlungen.len() + sätze.len() + 2);
    stützpunkte.push(beginn);
    stützpunkte.push(stichtag);
    stützpunkte.extend(zahlungen.iter().map(|(datum, _)| *datum));
    stützpunkte.extend(
        sätze
            .iter()
            .map(|(ab, _)| *ab)
            .filter(|ab| *ab > beginn && *ab < stichtag),
    );
    stützpunkte.sort();
    stützpunkte.dedup();

    let mut saldo = Zahl::zero();
    let mut zahlungen = zahlungen.into_iter().peekable();

    for (i, &von) in stützpunkte.iter().enumerate() {
        while let Some(&(_, betrag)) = zahlungen.peek().filter(|(datum, _)| *datum == von) {
            saldo += betrag;
            ergebnis.einzahlungen += betrag;
            zahlungen.next();
        }
        ergebnis.verlauf.push((von, saldo));

        let Some(&bis) = stützpunkte.get(i + 1) else {
            break;
        };
        saldo = verzinsen(&mut ergebnis, saldo, von, bis, &sätze);
    }

    ergebnis.endsaldo = saldo;
    ergebnis
}

/// Verzinst `[von, bis)` mit dem dort gültigen konstanten Satz und schreibt
/// die Zinsen dem jeweiligen Kalenderjahr gut.
fn verzinsen(
    ergebnis: &mut Zinsverlauf,
    mut saldo: Zahl,
    von: Datum,
    bis: Datum,
    sätze: &[(Datum, Zahl)],
) -> Zahl {
    if saldo <= Zahl::ZERO {
        return saldo;
    }
    let satz = satz_am(sätze, von);
    if satz.is_zero() {
        return saldo;
    }

    let faktor = Zahl::ONE + als_faktor(satz) / Zahl::from(TAGE_PRO_JAHR);

    let mut anfang = von;
    while anfang < bis {
        let jahreswechsel = Datum::from_ymd_opt(anfang.year() + 1, 1, 1).unwrap();
        let ende = bis.min(jahreswechsel);
        let tage = (ende - anfang).num_days();

        let neu = saldo * faktor.powi(tage);
        let zins = neu - saldo;
        *ergebnis.zinsen_pro_jahr.entry(anfang.year()).or_default() += zins;
        ergebnis.zinsen += zins;

        saldo = neu;
        anfang = ende;
    }
    saldo
}

/// Der am Tag gültige Satz: der späteste Eintrag mit `ab <= tag`, sonst 0 %.
fn satz_am(sätze: &[(Datum, Zahl)], tag: Datum) -> Zahl {
    let idx = sätze.partition_point(|(ab, _)| *ab <= tag);
    if idx == 0 {
        Zahl::zero()
    } else {
        sätze[idx - 1].1
    }
}
