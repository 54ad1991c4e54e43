//! Das YAML-Eingabeformat: eine Anlage pro Datei, dazu optional eine
//! Einstellungs-Datei mit Steuerangaben, Termingeschäften und der
//! Zusammenfassung eines extern gerechneten ETF-Sparplans.

use std::fmt;

use serde::Deserialize;

pub use chrono::naive::NaiveDate as Datum;
pub use smol_str::SmolStr as String;

pub use crate::zahl::Zahl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnlageTyp {
    Aktie,
    Anleihe,
    Etf,
    Immobilie,
    Krypto,
    Zinskonto,
}

impl fmt::Display for AnlageTyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnlageTyp::Aktie => "Aktie",
            AnlageTyp::Anleihe => "Anleihe",
            AnlageTyp::Etf => "ETF",
            AnlageTyp::Immobilie => "Immobilie",
            AnlageTyp::Krypto => "Krypto",
            AnlageTyp::Zinskonto => "Zinskonto",
        })
    }
}

/// Die drei Ansichten einer Jahresauswertung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ansicht {
    /// Nur offene Positionen; realisierte Ergebnisse werden ausgeblendet.
    Bestand,
    /// Nur Positionen mit Verkauf im gefilterten Jahr (steuerlich relevant).
    Realisiert,
    /// Vereinigung beider Ansichten.
    #[default]
    Kombiniert,
}

impl fmt::Display for Ansicht {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ansicht::Bestand => "Bestand",
            Ansicht::Realisiert => "Realisiert",
            Ansicht::Kombiniert => "Kombiniert",
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Anlage {
    pub typ: AnlageTyp,
    pub name: String,
    pub symbol: Option<String>,
    /// Fehlt bei Zinskonten; dort zählen nur Ein- und Auszahlungen.
    pub kauf: Option<Kauf>,
    /// Aktueller Kurs pro Stück; `None` heißt unbekannter Marktpreis.
    pub kurs: Option<Zahl>,
    /// Staking oder Lending verlängert die Spekulationsfrist auf zehn Jahre.
    #[serde(default)]
    pub verwahrt: bool,
    #[serde(default)]
    pub ereignisse: Vec<Ereignis>,
    #[serde(default)]
    pub zinssätze: Vec<Zinssatz>,
}

/// `kauf: [datum, stück, preis]`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Kauf(pub Datum, pub Zahl, pub Zahl);

impl Kauf {
    pub fn datum(&self) -> Datum {
        self.0
    }
    pub fn stück(&self) -> Zahl {
        self.1
    }
    pub fn preis(&self) -> Zahl {
        self.2
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ereignis {
    /// `verkauf: [datum, stück, preis]`
    Verkauf(Datum, Zahl, Zahl),
    /// `dividende: [datum, betrag]`
    Dividende(Datum, Zahl),
    /// `zinsen: [datum, betrag]` — manuell erfasste Gutschrift.
    Zinsen(Datum, Zahl),
    /// `einzahlung: [datum, betrag]` — nur Zinskonten.
    Einzahlung(Datum, Zahl),
    /// `auszahlung: [datum, betrag]` — nur Zinskonten, Betrag positiv erfasst.
    Auszahlung(Datum, Zahl),
}

impl Ereignis {
    pub fn datum(&self) -> Datum {
        match self {
            Ereignis::Verkauf(datum, _, _) => *datum,
            Ereignis::Dividende(datum, _) => *datum,
            Ereignis::Zinsen(datum, _) => *datum,
            Ereignis::Einzahlung(datum, _) => *datum,
            Ereignis::Auszahlung(datum, _) => *datum,
        }
    }

    /// Vorzeichenbehafteter Zahlungsstrom für die Zinsrechnung.
    pub fn zahlung(&self) -> Zahl {
        match self {
            Ereignis::Einzahlung(_, betrag) => *betrag,
            Ereignis::Auszahlung(_, betrag) => -*betrag,
            _ => Zahl::ZERO,
        }
    }
}

/// Ein Eintrag des Zinssatz-Verlaufs: `[gültig-ab, prozent pro jahr]`.
/// Sätze gelten stückweise konstant bis zum nächsten Eintrag.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Zinssatz(pub Datum, pub Zahl);

impl Zinssatz {
    pub fn ab(&self) -> Datum {
        self.0
    }
    pub fn prozent(&self) -> Zahl {
        self.1
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SteuerEinstellungen {
    /// Zusammenveranlagung verdoppelt den Sparer-Pauschbetrag.
    #[serde(default)]
    pub zusammenveranlagt: bool,
    /// Persönlicher Grenzsteuersatz in Prozent, für private
    /// Veräußerungsgeschäfte nach § 23 EStG.
    pub grenzsteuersatz: Zahl,
    /// Kirchensteuersatz in Prozent; 0 wenn keiner anfällt.
    #[serde(default)]
    pub kirchensteuersatz: Zahl,
    /// Ob kurzfristige Krypto-Verluste mit Gewinnen desselben Jahres
    /// saldiert werden, bevor die Freigrenze geprüft wird.
    #[serde(default)]
    pub krypto_verluste_saldieren: bool,
}

/// Gewinne und Verluste aus Termingeschäften, extern geliefert.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TerminJahr {
    pub jahr: i32,
    #[serde(default)]
    pub gewinne: Zahl,
    #[serde(default)]
    pub verluste: Zahl,
}

/// Zusammenfassung eines extern gerechneten ETF-Sparplans; wird in der
/// Depotauswertung als eigene Zeile geführt.
#[derive(Debug, Clone, Deserialize)]
pub struct Simulation {
    pub name: String,
    /// Eingezahlte Summe über die Laufzeit.
    pub einzahlung: Zahl,
    /// Endwert über die Laufzeit.
    pub endwert: Zahl,
    #[serde(default)]
    pub jahre: Vec<SimulationsJahr>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SimulationsJahr {
    pub jahr: i32,
    pub einzahlung: Zahl,
    pub endwert: Zahl,
    pub unrealisiert: Zahl,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Einstellungen {
    pub steuern: Option<SteuerEinstellungen>,
    #[serde(default)]
    pub termingeschäfte: Vec<TerminJahr>,
    pub simulation: Option<Simulation>,
}

/// Eine eingelesene Datei ist entweder eine Anlage oder eine
/// Einstellungs-Datei; unterschieden wird über die Pflichtfelder.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Datei {
    Anlage(Box<Anlage>),
    Einstellungen(Einstellungen),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn anlage_einlesen() {
        let anlage: Anlage = serde_yaml::from_str(
            r#"
typ: aktie
name: Foo AG
symbol: FOO
kauf: [2024-01-15, 10, 100]
kurs: 120.50
ereignisse:
- verkauf: [2024-06-01, 4, 150]
- dividende: [2024-07-01, 12.5]
        "#,
        )
        .unwrap();

        assert_eq!(anlage.typ, AnlageTyp::Aktie);
        let kauf = anlage.kauf.unwrap();
        assert_eq!(kauf.stück(), dec!(10));
        assert_eq!(kauf.preis(), dec!(100));
        assert_eq!(anlage.kurs, Some(dec!(120.50)));
        assert_eq!(anlage.ereignisse.len(), 2);
        assert_eq!(
            anlage.ereignisse[0].datum(),
            Datum::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn zinskonto_einlesen() {
        let anlage: Anlage = serde_yaml::from_str(
            r#"
typ: zinskonto
name: Tagesgeld
ereignisse:
- einzahlung: [2023-01-01, 1000]
- auszahlung: [2023-06-01, 200]
zinssätze:
- [2023-01-01, 3.65]
- [2023-07-01, 3.00]
        "#,
        )
        .unwrap();

        assert!(anlage.kauf.is_none());
        assert_eq!(anlage.ereignisse[1].zahlung(), dec!(-200));
        assert_eq!(anlage.zinssätze[1].prozent(), dec!(3.00));
    }

    #[test]
    fn datei_unterscheidung() {
        let datei: Datei = serde_yaml::from_str(
            r#"
steuern:
  zusammenveranlagt: true
  grenzsteuersatz: 42
  kirchensteuersatz: 9
termingeschäfte:
- {jahr: 2024, gewinne: 5000, verluste: 30000}
simulation:
  name: ETF-Sparplan
  einzahlung: 12000
  endwert: 13500
  jahre:
  - {jahr: 2024, einzahlung: 6000, endwert: 6400, unrealisiert: 400}
        "#,
        )
        .unwrap();
        let Datei::Einstellungen(einstellungen) = datei else {
            panic!("sollte als Einstellungen erkannt werden");
        };
        assert!(einstellungen.steuern.unwrap().zusammenveranlagt);
        assert_eq!(einstellungen.termingeschäfte[0].verluste, dec!(30000));
        assert_eq!(einstellungen.simulation.unwrap().jahre.len(), 1);

        let datei: Datei = serde_yaml::from_str(
            r#"
typ: krypto
name: Bitcoin
kauf: [2024-01-01, 0.5, 40000]
        "#,
        )
        .unwrap();
        assert!(matches!(datei, Datei::Anlage(_)));
    }
}
