//! Kennzahlen einer einzelnen Anlage: Bestand, Einstand, Marktwert,
//! realisiertes und unrealisiertes Ergebnis sowie die steuerbaren Beträge
//! des gefilterten Jahres.
//!
//! Eine Anlage ist ein einzelnes Kauf-Los: alle Stücke teilen sich einen
//! Kaufpreis, Teilverkäufe verbrauchen den Einstand zum Durchschnittsmodell.
//! Zinskonten laufen stattdessen komplett über die Zinsrechnung.

use num_traits::Zero;

use crate::zahl::anteil;
use crate::zinsen::zinsen_berechnen;
use crate::{Anlage, AnlageTyp, Ansicht, Datum, Ereignis, Filter, Kauf, Kennzahlen, Steuerbar, Zahl};

/// Spekulationsfrist für Krypto-Veräußerungen (§ 23 EStG), in Tagen.
const SPEKULATIONSFRIST: i64 = 365;
/// Verlängerte Frist bei Staking oder Lending.
const SPEKULATIONSFRIST_VERWAHRT: i64 = 3650;

pub fn kennzahlen_berechnen(anlage: &Anlage, filter: Filter, stichtag: Datum) -> Kennzahlen {
    if anlage.typ == AnlageTyp::Zinskonto {
        return zinskonto_kennzahlen(anlage, filter, stichtag);
    }

    let Some(kauf) = anlage.kauf else {
        // Fehlender Kauf ist kein Fehler: alles bleibt Null.
        return Kennzahlen::default();
    };
    if kauf.stück() <= Zahl::ZERO {
        return Kennzahlen::default();
    }

    let kaufwert = kauf.stück() * kauf.preis();

    let mut verkauft = Zahl::zero();
    let mut erlöse = Zahl::zero();
    let mut verkauft_jahr = Zahl::zero();
    let mut erlöse_jahr = Zahl::zero();
    let mut steuerbar = Steuerbar::default();

    for ereignis in &anlage.ereignisse {
        match *ereignis {
            Ereignis::Verkauf(datum, stück, preis) => {
                verkauft += stück;
                erlöse += stück * preis;
                if filter.enthält(datum) {
                    verkauft_jahr += stück;
                    erlöse_jahr += stück * preis;
                    if anlage.typ == AnlageTyp::Krypto {
                        kurzfristig_erfassen(
                            &mut steuerbar,
                            &kauf,
                            anlage.verwahrt,
                            datum,
                            stück,
                            preis,
                        );
                    }
                }
            }
            Ereignis::Dividende(datum, betrag) if filter.enthält(datum) => {
                steuerbar.dividenden += betrag;
            }
            Ereignis::Zinsen(datum, betrag) if filter.enthält(datum) => {
                steuerbar.zinsen += betrag;
            }
            _ => {}
        }
    }

    let bestand = (kauf.stück() - verkauft).max(Zahl::zero());
    let einstand = bestand * kauf.preis();

    // Der Einstandsverbrauch ist auf die tatsächlich gekauften Stücke
    // gedeckelt: Überverkäufe verfälschen das Ergebnis nicht weiter.
    let realisiert = erlöse - kauf.preis() * verkauft.min(kauf.stück());
    let realisiert_jahr = erlöse_jahr - kauf.preis() * verkauft_jahr.min(kauf.stück());

    let marktwert = anlage.kurs.map_or(Zahl::zero(), |kurs| bestand * kurs);
    let unrealisiert = anlage
        .kurs
        .map_or(Zahl::zero(), |kurs| bestand * (kurs - kauf.preis()));

    let realisiert_anzeige = match filter.ansicht {
        Ansicht::Bestand => Zahl::zero(),
        Ansicht::Realisiert | Ansicht::Kombiniert => {
            if filter.jahr.is_some() {
                realisiert_jahr
            } else {
                realisiert
            }
        }
    };

    if matches!(
        anlage.typ,
        AnlageTyp::Aktie | AnlageTyp::Anleihe | AnlageTyp::Etf
    ) {
        steuerbar.kursgewinne = realisiert_jahr;
    }

    Kennzahlen {
        bestand,
        kaufwert,
        einstand,
        marktwert,
        realisiert,
        realisiert_jahr,
        realisiert_anzeige,
        unrealisiert,
        rendite: anteil(realisiert_anzeige + unrealisiert, kaufwert),
        steuerbar,
    }
}

/// Ein Verkauf innerhalb der Spekulationsfrist zählt als kurzfristig;
/// Gewinne und Verluste werden getrennt gesammelt, die Saldierung ist
/// Sache der Steuerschätzung.
fn kurzfristig_erfassen(
    steuerbar: &mut Steuerbar,
    kauf: &Kauf,
    verwahrt: bool,
    datum: Datum,
    stück: Zahl,
    preis: Zahl,
) {
    let frist = if verwahrt {
        SPEKULATIONSFRIST_VERWAHRT
    } else {
        SPEKULATIONSFRIST
    };
    if (datum - kauf.datum()).num_days() >= frist {
        return;
    }

    let gewinn = stück * (preis - kauf.preis());
    if gewinn > Zahl::ZERO {
        steuerbar.krypto_gewinne += gewinn;
    } else {
        steuerbar.krypto_verluste += -gewinn;
    }
}

fn zinskonto_kennzahlen(anlage: &Anlage, filter: Filter, stichtag: Datum) -> Kennzahlen {
    // In der Jahresansicht zählt der Kontostand zum Jahresende.
    let stichtag = match filter.jahresende() {
        Some(ende) => ende.min(stichtag),
        None => stichtag,
    };

    let verlauf = zinsen_berechnen(&anlage.ereignisse, &anlage.zinssätze, stichtag);

    let zinsen_jahr = match filter.jahr {
        Some(jahr) => verlauf
            .zinsen_pro_jahr
            .get(&jahr)
            .copied()
            .unwrap_or_default(),
        None => verlauf.zinsen,
    };

    Kennzahlen {
        bestand: Zahl::zero(),
        kaufwert: verlauf.einzahlungen,
        einstand: verlauf.einzahlungen,
        marktwert: verlauf.endsaldo,
        realisiert: Zahl::zero(),
        realisiert_jahr: Zahl::zero(),
        realisiert_anzeige: Zahl::zero(),
        unrealisiert: verlauf.zinsen,
        rendite: anteil(verlauf.zinsen, verlauf.einzahlungen),
        steuerbar: Steuerbar {
            zinsen: zinsen_jahr,
            ..Default::default()
        },
    }
}
