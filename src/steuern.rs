//! Geschätzte deutsche Steuer auf die Erträge eines Jahres.
//!
//! Drei getrennte Töpfe, die sich erst in der Endsumme treffen:
//! Kapitalerträge nach § 20 EStG, private Veräußerungsgeschäfte (Krypto)
//! nach § 23 EStG und Termingeschäfte nach § 20 Abs. 6 Satz 5 EStG.
//! Verluste eines Topfes mindern nie einen anderen; geteilt wird nur der
//! Sparer-Pauschbetrag, und zwar als ein Topf, der nacheinander verbraucht
//! wird. Das Ergebnis ist eine Schätzung, keine Steuerberatung.

use num_traits::Zero;
use rust_decimal_macros::dec;

use crate::zahl::{als_faktor, runde};
use crate::{SteuerEinstellungen, Steuerbar, TerminJahr, Zahl};

/// Abgeltungsteuersatz, § 32d (1) EStG.
const ABGELTUNGSTEUERSATZ: Zahl = dec!(25);
/// Solidaritätszuschlag auf die Steuer.
const SOLI_SATZ: Zahl = dec!(5.5);
/// Sparer-Pauschbetrag, § 20 (9) EStG; bei Zusammenveranlagung verdoppelt.
const SPARER_PAUSCHBETRAG: Zahl = dec!(1000);
/// Freigrenze für private Veräußerungsgeschäfte, § 23 (3) EStG.
const KRYPTO_FREIGRENZE: Zahl = dec!(1000);
/// Deckel für verrechenbare Termingeschäftsverluste, § 20 (6) S. 5 EStG.
const TERMINVERLUST_DECKEL: Zahl = dec!(20000);

/// Ein veranlagter Topf.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Posten {
    /// Einkünfte des Topfes nach topf-interner Verlustverrechnung.
    pub einkünfte: Zahl,
    /// Verbrauchter Anteil des Sparer-Pauschbetrags.
    pub pauschbetrag: Zahl,
    pub bemessung: Zahl,
    pub steuer: Zahl,
    pub soli: Zahl,
    pub kirchensteuer: Zahl,
}

impl Posten {
    pub fn gesamt(&self) -> Zahl {
        self.steuer + self.soli + self.kirchensteuer
    }

    fn veranlagen(
        einkünfte: Zahl,
        pauschbetrag: Zahl,
        satz: Zahl,
        einstellungen: &SteuerEinstellungen,
    ) -> Posten {
        let bemessung = (einkünfte - pauschbetrag).max(Zahl::ZERO);
        let steuer = runde(bemessung * als_faktor(satz), 2);
        let soli = runde(steuer * als_faktor(SOLI_SATZ), 2);
        let kirchensteuer = runde(steuer * als_faktor(einstellungen.kirchensteuersatz), 2);
        Posten {
            einkünfte,
            pauschbetrag,
            bemessung,
            steuer,
            soli,
            kirchensteuer,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteuerSchätzung {
    pub jahr: i32,
    pub kapital: Posten,
    pub krypto: Posten,
    pub termingeschäfte: Posten,
    /// Termingeschäftsverluste über dem Deckel; gehen nicht verloren,
    /// sondern in die Folgejahre.
    pub verlustvortrag: Zahl,
    pub gesamt: Zahl,
}

pub fn steuern_schätzen(
    jahr: i32,
    steuerbar: &Steuerbar,
    termin: Option<&TerminJahr>,
    einstellungen: &SteuerEinstellungen,
) -> SteuerSchätzung {
    // Ein gemeinsamer Pauschbetrag-Topf: erst die Kapitalerträge, dann die
    // Termingeschäfte; doppelt ausgegeben wird er nie.
    let mut pauschbetrag = if einstellungen.zusammenveranlagt {
        SPARER_PAUSCHBETRAG + SPARER_PAUSCHBETRAG
    } else {
        SPARER_PAUSCHBETRAG
    };

    // Kapitalerträge: Zinsen, Dividenden und realisierte Kursgewinne.
    let kapitalerträge = steuerbar.zinsen + steuerbar.dividenden + steuerbar.kursgewinne;
    let verbraucht = kapitalerträge.max(Zahl::ZERO).min(pauschbetrag);
    pauschbetrag -= verbraucht;
    let kapital = Posten::veranlagen(
        kapitalerträge.max(Zahl::ZERO),
        verbraucht,
        ABGELTUNGSTEUERSATZ,
        einstellungen,
    );

    // Krypto: Freigrenze statt Freibetrag. Bis zur Grenze bleibt alles
    // steuerfrei, ein Cent darüber macht den vollen Betrag steuerpflichtig.
    let kurzfristig = if einstellungen.krypto_verluste_saldieren {
        (steuerbar.krypto_gewinne - steuerbar.krypto_verluste).max(Zahl::ZERO)
    } else {
        steuerbar.krypto_gewinne
    };
    let krypto = if kurzfristig <= KRYPTO_FREIGRENZE {
        Posten {
            einkünfte: kurzfristig,
            ..Default::default()
        }
    } else {
        Posten::veranlagen(
            kurzfristig,
            Zahl::ZERO,
            einstellungen.grenzsteuersatz,
            einstellungen,
        )
    };

    // Termingeschäfte: Verluste nur topf-intern verrechenbar und gedeckelt.
    let (termingeschäfte, verlustvortrag) = match termin {
        None => (Posten::default(), Zahl::zero()),
        Some(termin) => {
            let abzug = termin
                .verluste
                .min(termin.gewinne)
                .min(TERMINVERLUST_DECKEL)
                .max(Zahl::ZERO);
            let einkünfte = termin.gewinne - abzug;
            let verbraucht = einkünfte.max(Zahl::ZERO).min(pauschbetrag);
            pauschbetrag -= verbraucht;
            let posten =
                Posten::veranlagen(einkünfte, verbraucht, ABGELTUNGSTEUERSATZ, einstellungen);
            (posten, termin.verluste - abzug)
        }
    };

    let gesamt = kapital.gesamt() + krypto.gesamt() + termingeschäfte.gesamt();

    SteuerSchätzung {
        jahr,
        kapital,
        krypto,
        termingeschäfte,
        verlustvortrag,
        gesamt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn einstellungen() -> SteuerEinstellungen {
        SteuerEinstellungen {
            zusammenveranlagt: false,
            grenzsteuersatz: dec!(42),
            kirchensteuersatz: Zahl::ZERO,
            krypto_verluste_saldieren: false,
        }
    }

    #[test]
    fn pauschbetrag_und_soli() {
        let steuerbar = Steuerbar {
            zinsen: dec!(300),
            dividenden: dec!(200),
            kursgewinne: dec!(1000),
            ..Default::default()
        };

        let schätzung = steuern_schätzen(2024, &steuerbar, None, &einstellungen());

        assert_eq!(schätzung.kapital.einkünfte, dec!(1500));
        assert_eq!(schätzung.kapital.pauschbetrag, dec!(1000));
        assert_eq!(schätzung.kapital.bemessung, dec!(500));
        assert_eq!(schätzung.kapital.steuer, dec!(125));
        assert_eq!(schätzung.kapital.soli, dec!(6.88));
        assert!(schätzung.kapital.kirchensteuer.is_zero());
        assert_eq!(schätzung.gesamt, dec!(131.88));
    }

    #[test]
    fn zusammenveranlagung_verdoppelt_den_pauschbetrag() {
        let steuerbar = Steuerbar {
            kursgewinne: dec!(1500),
            ..Default::default()
        };
        let einstellungen = SteuerEinstellungen {
            zusammenveranlagt: true,
            ..einstellungen()
        };

        let schätzung = steuern_schätzen(2024, &steuerbar, None, &einstellungen);
        assert!(schätzung.kapital.bemessung.is_zero());
        assert!(schätzung.gesamt.is_zero());
    }

    #[test]
    fn kirchensteuer_auf_die_steuer() {
        let steuerbar = Steuerbar {
            kursgewinne: dec!(2000),
            ..Default::default()
        };
        let einstellungen = SteuerEinstellungen {
            kirchensteuersatz: dec!(9),
            ..einstellungen()
        };

        let schätzung = steuern_schätzen(2024, &steuerbar, None, &einstellungen);
        assert_eq!(schätzung.kapital.steuer, dec!(250));
        assert_eq!(schätzung.kapital.kirchensteuer, dec!(22.50));
    }

    #[test]
    fn krypto_freigrenze_ist_eine_klippe() {
        let genau = Steuerbar {
            krypto_gewinne: dec!(1000),
            ..Default::default()
        };
        let schätzung = steuern_schätzen(2024, &genau, None, &einstellungen());
        assert!(schätzung.krypto.gesamt().is_zero());

        // Ein Cent darüber: der volle Betrag wird steuerpflichtig.
        let darüber = Steuerbar {
            krypto_gewinne: dec!(1000.01),
            ..Default::default()
        };
        let schätzung = steuern_schätzen(2024, &darüber, None, &einstellungen());
        assert_eq!(schätzung.krypto.bemessung, dec!(1000.01));
        assert_eq!(schätzung.krypto.steuer, dec!(420.00));
    }

    #[test]
    fn krypto_saldierung_ist_eine_einstellung() {
        let steuerbar = Steuerbar {
            krypto_gewinne: dec!(1200),
            krypto_verluste: dec!(400),
            ..Default::default()
        };

        // Ohne Saldierung zählen nur die positiven Gewinne.
        let schätzung = steuern_schätzen(2024, &steuerbar, None, &einstellungen());
        assert_eq!(schätzung.krypto.bemessung, dec!(1200));

        let einstellungen = SteuerEinstellungen {
            krypto_verluste_saldieren: true,
            ..einstellungen()
        };
        let schätzung = steuern_schätzen(2024, &steuerbar, None, &einstellungen);
        // Saldiert bleibt der Betrag unter der Freigrenze.
        assert!(schätzung.krypto.gesamt().is_zero());
        assert_eq!(schätzung.krypto.einkünfte, dec!(800));
    }

    #[test]
    fn terminverluste_sind_gedeckelt() {
        let termin = TerminJahr {
            jahr: 2024,
            gewinne: dec!(30000),
            verluste: dec!(26000),
        };

        let schätzung =
            steuern_schätzen(2024, &Steuerbar::default(), Some(&termin), &einstellungen());

        // Nur 20.000 € Verlust sind verrechenbar, 6.000 € wandern in den
        // Vortrag; der volle Pauschbetrag steht noch zur Verfügung.
        assert_eq!(schätzung.termingeschäfte.einkünfte, dec!(10000));
        assert_eq!(schätzung.termingeschäfte.pauschbetrag, dec!(1000));
        assert_eq!(schätzung.termingeschäfte.bemessung, dec!(9000));
        assert_eq!(schätzung.termingeschäfte.steuer, dec!(2250));
        assert_eq!(schätzung.verlustvortrag, dec!(6000));
    }

    #[test]
    fn pauschbetrag_wird_nicht_doppelt_ausgegeben() {
        let steuerbar = Steuerbar {
            zinsen: dec!(800),
            ..Default::default()
        };
        let termin = TerminJahr {
            jahr: 2024,
            gewinne: dec!(500),
            verluste: Zahl::ZERO,
        };

        let schätzung = steuern_schätzen(2024, &steuerbar, Some(&termin), &einstellungen());

        // Kapitalerträge verbrauchen 800 €, den Termingeschäften bleiben 200 €.
        assert_eq!(schätzung.kapital.pauschbetrag, dec!(800));
        assert!(schätzung.kapital.bemessung.is_zero());
        assert_eq!(schätzung.termingeschäfte.pauschbetrag, dec!(200));
        assert_eq!(schätzung.termingeschäfte.bemessung, dec!(300));
        assert_eq!(schätzung.termingeschäfte.steuer, dec!(75));
    }

    #[test]
    fn verluste_über_den_gewinnen_werden_vorgetragen() {
        let termin = TerminJahr {
            jahr: 2024,
            gewinne: dec!(5000),
            verluste: dec!(30000),
        };

        let schätzung =
            steuern_schätzen(2024, &Steuerbar::default(), Some(&termin), &einstellungen());

        // Abzug ist auf die Gewinne begrenzt; der Rest geht in den Vortrag.
        assert!(schätzung.termingeschäfte.bemessung.is_zero());
        assert!(schätzung.termingeschäfte.gesamt().is_zero());
        assert_eq!(schätzung.verlustvortrag, dec!(25000));
    }
}
