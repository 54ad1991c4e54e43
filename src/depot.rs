//! Aggregation der Einzel-Kennzahlen zur Depotauswertung: Zeilen je
//! Anlagentyp, Verteilung nach Symbol, Gesamtsumme und — bei gewählter
//! Jahresansicht — die Steuerschätzung.

use std::collections::BTreeMap;

use chrono::Datelike;
use num_traits::Zero;

use crate::steuern::{steuern_schätzen, SteuerSchätzung};
use crate::zahl::anteil;
use crate::{
    Anlage, AnlageTyp, Ansicht, Einstellungen, Ereignis, Filter, Kennzahlen, Simulation, Steuerbar,
    String, Zahl,
};

/// Eine aggregierte Zeile der Auswertung.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zeile {
    pub name: String,
    pub kaufwert: Zahl,
    pub marktwert: Zahl,
    pub realisiert: Zahl,
    pub unrealisiert: Zahl,
    pub gesamt: Zahl,
    pub rendite: Zahl,
}

/// Verteilung einer Anlage am Depot, für Drilldown-Ansichten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolZeile {
    pub symbol: String,
    /// Marktwert plus angezeigtem realisiertem Ergebnis.
    pub wirtschaftswert: Zahl,
    /// Anteil am Wirtschaftswert des ganzen Depots, als Faktor.
    pub anteil: Zahl,
}

#[derive(Debug, Default)]
pub struct Auswertung {
    pub zeilen: Vec<Zeile>,
    pub summen: Zeile,
    pub steuer: Option<SteuerSchätzung>,
}

/// Die eine Auswahlregel für alle drei Ansichten.
///
/// Gesamtansicht: alles mit Kaufwert, Zinskonten immer. Jahresansicht:
/// `Realisiert` verlangt einen Verkauf im Jahr, `Bestand` eine offene und
/// bis zum Jahresende existierende Position, `Kombiniert` die Vereinigung.
pub fn ist_ausgewählt(anlage: &Anlage, kennzahlen: &Kennzahlen, filter: Filter) -> bool {
    let Some(jahr) = filter.jahr else {
        return anlage.typ == AnlageTyp::Zinskonto || !kennzahlen.kaufwert.is_zero();
    };

    let realisiert = anlage
        .ereignisse
        .iter()
        .any(|ereignis| matches!(ereignis, Ereignis::Verkauf(datum, ..) if datum.year() == jahr));
    let offen = ist_offen_bis(anlage, kennzahlen, jahr);

    match filter.ansicht {
        Ansicht::Realisiert => realisiert,
        Ansicht::Bestand => offen,
        Ansicht::Kombiniert => realisiert || offen,
    }
}

fn ist_offen_bis(anlage: &Anlage, kennzahlen: &Kennzahlen, jahr: i32) -> bool {
    match anlage.typ {
        AnlageTyp::Zinskonto => anlage
            .ereignisse
            .iter()
            .any(|ereignis| ereignis.datum().year() <= jahr),
        _ => {
            kennzahlen.bestand > Zahl::ZERO
                && anlage
                    .kauf
                    .map_or(false, |kauf| kauf.datum().year() <= jahr)
        }
    }
}

#[tracing::instrument(skip_all, fields(jahr = ?filter.jahr, ansicht = %filter.ansicht))]
pub fn depot_auswerten(
    anlagen: &[(Anlage, Kennzahlen)],
    filter: Filter,
    einstellungen: &Einstellungen,
) -> Auswertung {
    let mut nach_typ: BTreeMap<AnlageTyp, Zeile> = BTreeMap::new();

    for (anlage, kennzahlen) in anlagen {
        if !ist_ausgewählt(anlage, kennzahlen, filter) {
            continue;
        }
        let zeile = nach_typ.entry(anlage.typ).or_insert_with(|| Zeile {
            name: String::new(&anlage.typ.to_string()),
            ..Default::default()
        });
        zeile.kaufwert += kennzahlen.kaufwert;
        zeile.marktwert += kennzahlen.marktwert;
        zeile.realisiert += kennzahlen.realisiert_anzeige;
        zeile.unrealisiert += kennzahlen.unrealisiert;
    }

    let mut zeilen: Vec<Zeile> = nach_typ.into_values().collect();
    if let Some(simulation) = &einstellungen.simulation {
        if let Some(zeile) = simulations_zeile(simulation, filter) {
            zeilen.push(zeile);
        }
    }

    let mut summen = Zeile {
        name: String::new("Summe"),
        ..Default::default()
    };
    for zeile in &mut zeilen {
        zeile.gesamt = zeile.realisiert + zeile.unrealisiert;
        zeile.rendite = anteil(zeile.gesamt, zeile.kaufwert);

        summen.kaufwert += zeile.kaufwert;
        summen.marktwert += zeile.marktwert;
        summen.realisiert += zeile.realisiert;
        summen.unrealisiert += zeile.unrealisiert;
    }
    summen.gesamt = summen.realisiert + summen.unrealisiert;
    // Nenner ist die Summe der Kaufwerte, nie der Schnitt der Zeilen-Renditen.
    summen.rendite = anteil(summen.gesamt, summen.kaufwert);

    // Steuerlich zählt das gewählte Jahr, unabhängig von der Ansicht.
    let steuer = match (filter.jahr, &einstellungen.steuern) {
        (Some(jahr), Some(steuereinstellungen)) => {
            let mut steuerbar = Steuerbar::default();
            for (_, kennzahlen) in anlagen {
                steuerbar += kennzahlen.steuerbar;
            }
            let termin = einstellungen
                .termingeschäfte
                .iter()
                .find(|termin| termin.jahr == jahr);
            Some(steuern_schätzen(
                jahr,
                &steuerbar,
                termin,
                steuereinstellungen,
            ))
        }
        _ => None,
    };

    Auswertung {
        zeilen,
        summen,
        steuer,
    }
}

/// Die extern gerechnete Sparplan-Zusammenfassung als eigene Zeile, mit
/// derselben Jahres-Semantik wie die übrigen Zeilen.
fn simulations_zeile(simulation: &Simulation, filter: Filter) -> Option<Zeile> {
    let (einzahlung, endwert, unrealisiert) = match filter.jahr {
        Some(jahr) => {
            let jahreszeile = simulation.jahre.iter().find(|zeile| zeile.jahr == jahr)?;
            (
                jahreszeile.einzahlung,
                jahreszeile.endwert,
                jahreszeile.unrealisiert,
            )
        }
        None => (
            simulation.einzahlung,
            simulation.endwert,
            simulation.endwert - simulation.einzahlung,
        ),
    };

    Some(Zeile {
        name: simulation.name.clone(),
        kaufwert: einzahlung,
        marktwert: endwert,
        realisiert: Zahl::zero(),
        unrealisiert,
        gesamt: unrealisiert,
        rendite: anteil(unrealisiert, einzahlung),
    })
}

/// Gruppierung nach Symbol statt nach Typ; Anlagen ohne Symbol laufen
/// unter ihrem Namen.
pub fn nach_symbol(anlagen: &[(Anlage, Kennzahlen)], filter: Filter) -> Vec<SymbolZeile> {
    let mut nach_symbol: BTreeMap<String, Zahl> = BTreeMap::new();

    for (anlage, kennzahlen) in anlagen {
        if !ist_ausgewählt(anlage, kennzahlen, filter) {
            continue;
        }
        let symbol = anlage.symbol.clone().unwrap_or_else(|| anlage.name.clone());
        *nach_symbol.entry(symbol).or_default() +=
            kennzahlen.marktwert + kennzahlen.realisiert_anzeige;
    }

    let gesamt: Zahl = nach_symbol.values().copied().sum();
    nach_symbol
        .into_iter()
        .map(|(symbol, wirtschaftswert)| SymbolZeile {
            symbol,
            wirtschaftswert,
            anteil: anteil(wirtschaftswert, gesamt),
        })
        .collect()
}
